//! Agent tuning, loaded from YAML.

use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use survivor_steering::{Arrive, Flee, SteeringSet, Wander};

/// Top-level agent configuration. Every field has a default, so an empty file is valid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    /// Seed for the wander perturbation.
    pub seed: u64,

    pub steering: SteeringConfig,

    pub exploration: ExplorationConfig,

    pub inventory: InventoryConfig,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            seed: 4,
            steering: SteeringConfig::default(),
            exploration: ExplorationConfig::default(),
            inventory: InventoryConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SteeringConfig {
    /// Distance of the wander circle ahead of the agent.
    pub wander_offset: f32,
    pub wander_radius: f32,
    /// Radians of drift allowed per frame.
    pub wander_max_angle_change: f32,
    pub flee_distance: f32,
    pub arrive_slow_radius: f32,
    pub arrive_target_radius: f32,
}

impl Default for SteeringConfig {
    fn default() -> Self {
        Self {
            wander_offset: 6.0,
            wander_radius: 4.0,
            wander_max_angle_change: Wander::DEFAULT_MAX_ANGLE_CHANGE,
            flee_distance: 6.0,
            arrive_slow_radius: 15.0,
            arrive_target_radius: 3.0,
        }
    }
}

impl SteeringConfig {
    pub fn build(&self, seed: u64) -> SteeringSet {
        SteeringSet::new(
            Flee {
                distance: self.flee_distance,
            },
            Arrive::new(self.arrive_slow_radius, self.arrive_target_radius),
            Wander::new(
                self.wander_offset,
                self.wander_radius,
                self.wander_max_angle_change,
                seed,
            ),
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExplorationConfig {
    /// Seconds without an enemy in sight before an escape counts as successful.
    pub escape_duration: f32,
    /// How far ahead the post-escape safe point is placed.
    pub safe_seek_distance: f32,
    pub safe_point_radius: f32,
    /// Inset of the interior tour corners from the house walls.
    pub tour_inset: f32,
    pub tour_point_radius: f32,
    pub entrance_radius: f32,
    /// Extra distance kept from a purge zone's edge.
    pub zone_margin: f32,
    /// Radians within which a look-behind turn counts as done.
    pub look_behind_tolerance: f32,
}

impl Default for ExplorationConfig {
    fn default() -> Self {
        Self {
            escape_duration: 3.0,
            safe_seek_distance: 25.0,
            safe_point_radius: 2.0,
            tour_inset: 4.5,
            tour_point_radius: 0.5,
            entrance_radius: 2.0,
            zone_margin: 5.0,
            look_behind_tolerance: 0.1,
        }
    }
}

/// Weapon envelopes and consumption thresholds, shared with the inventory tree via the blackboard.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InventoryConfig {
    pub shotgun_range: f32,
    /// Half-angle of the shotgun cone, in degrees.
    pub shotgun_angle: f32,
    pub pistol_range: f32,
    /// Half-angle of the pistol cone, in degrees.
    pub pistol_angle: f32,
    pub health_threshold: f32,
    pub energy_threshold: f32,
    /// Maximum health and energy.
    pub stat_ceiling: f32,
}

impl Default for InventoryConfig {
    fn default() -> Self {
        Self {
            shotgun_range: 5.0,
            shotgun_angle: 20.0,
            pistol_range: 7.0,
            pistol_angle: 10.0,
            health_threshold: 8.0,
            energy_threshold: 8.0,
            stat_ceiling: 10.0,
        }
    }
}

impl AgentConfig {
    /// Load configuration from a YAML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;
        let config = Self::from_yaml(&content)
            .with_context(|| format!("Failed to parse config from {}", path.display()))?;
        Ok(config)
    }

    /// Like [`AgentConfig::load`], but a missing file yields the defaults.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    pub fn validate(&self) -> Result<()> {
        let s = &self.steering;
        if s.arrive_slow_radius < s.arrive_target_radius {
            bail!(
                "steering.arrive_slow_radius ({}) must not be smaller than arrive_target_radius ({})",
                s.arrive_slow_radius,
                s.arrive_target_radius
            );
        }
        if s.wander_max_angle_change < 0.0 {
            bail!("steering.wander_max_angle_change must be non-negative");
        }

        let e = &self.exploration;
        for (name, value) in [
            ("escape_duration", e.escape_duration),
            ("safe_point_radius", e.safe_point_radius),
            ("tour_point_radius", e.tour_point_radius),
            ("entrance_radius", e.entrance_radius),
            ("look_behind_tolerance", e.look_behind_tolerance),
        ] {
            if value <= 0.0 {
                bail!("exploration.{name} must be positive, got {value}");
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_yaml_is_default() {
        let config = AgentConfig::from_yaml("{}").unwrap();
        assert_eq!(config, AgentConfig::default());
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config = AgentConfig::from_yaml(
            "seed: 9\nexploration:\n  escape_duration: 1.5\ninventory:\n  pistol_range: 9.0\n",
        )
        .unwrap();
        assert_eq!(config.seed, 9);
        assert_eq!(config.exploration.escape_duration, 1.5);
        assert_eq!(config.exploration.tour_inset, 4.5);
        assert_eq!(config.inventory.pistol_range, 9.0);
        assert_eq!(config.inventory.shotgun_range, 5.0);
    }

    #[test]
    fn yaml_round_trips() {
        let config = AgentConfig::default();
        let yaml = config.to_yaml().unwrap();
        assert_eq!(AgentConfig::from_yaml(&yaml).unwrap(), config);
    }

    #[test]
    fn inverted_arrive_radii_are_rejected() {
        let err = AgentConfig::from_yaml(
            "steering:\n  arrive_slow_radius: 1.0\n  arrive_target_radius: 3.0\n",
        )
        .unwrap_err();
        assert!(err.to_string().contains("arrive_slow_radius"));
    }
}
