use std::any::{type_name, Any};
use std::collections::BTreeMap;
use std::fmt;
use std::marker::PhantomData;

use thiserror::Error;

/// Typed handle to a named blackboard slot.
///
/// The name selects the slot; `T` is the type the caller expects to find there. Two keys with
/// the same name and different `T` address the same slot, which is how a type mismatch arises.
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BbKey<T: 'static> {
    name: &'static str,
    _phantom: PhantomData<fn() -> T>,
}

impl<T: 'static> Copy for BbKey<T> {}

impl<T: 'static> Clone for BbKey<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: 'static> fmt::Debug for BbKey<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BbKey({:?}: {})", self.name, type_name::<T>())
    }
}

impl<T: 'static> BbKey<T> {
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            _phantom: PhantomData,
        }
    }

    pub fn name(self) -> &'static str {
        self.name
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BlackboardError {
    #[error("blackboard has no element with key {key:?}")]
    MissingKey { key: &'static str },

    #[error("blackboard already has an element with key {key:?}")]
    DuplicateKey { key: &'static str },

    #[error("blackboard type mismatch for key {key:?}: stored {stored}, requested {requested}")]
    TypeMismatch {
        key: &'static str,
        stored: &'static str,
        requested: &'static str,
    },
}

struct Entry {
    value: Box<dyn Any>,
    type_name: &'static str,
}

/// String-keyed, dynamically-typed store shared by every decision component.
///
/// Access failures never panic: they are logged and returned, and the caller decides whether to
/// keep stale or default data for the rest of the frame.
#[derive(Default)]
pub struct Blackboard {
    entries: BTreeMap<&'static str, Entry>,
}

impl fmt::Debug for Blackboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.entries.iter().map(|(k, e)| (k, e.type_name)))
            .finish()
    }
}

impl Blackboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn contains<T: 'static>(&self, key: BbKey<T>) -> bool {
        self.entries.contains_key(key.name)
    }

    /// Names of all stored slots, in key order.
    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.keys().copied()
    }

    /// Insert a new slot. Fails (and leaves the existing value alone) if the key is taken.
    pub fn add<T: 'static>(&mut self, key: BbKey<T>, value: T) -> Result<(), BlackboardError> {
        if self.entries.contains_key(key.name) {
            return Err(logged(BlackboardError::DuplicateKey { key: key.name }));
        }
        self.entries.insert(
            key.name,
            Entry {
                value: Box::new(value),
                type_name: type_name::<T>(),
            },
        );
        Ok(())
    }

    /// Replace the value of an existing slot of the same type, keeping the slot itself.
    pub fn change<T: 'static>(&mut self, key: BbKey<T>, value: T) -> Result<(), BlackboardError> {
        let slot = self.get_mut(key)?;
        *slot = value;
        Ok(())
    }

    /// Copy the stored value out.
    pub fn get<T: Clone + 'static>(&self, key: BbKey<T>) -> Result<T, BlackboardError> {
        self.get_ref(key).cloned()
    }

    /// Copy the stored value into `out`. On failure `out` keeps whatever it held before.
    pub fn get_into<T: Clone + 'static>(&self, key: BbKey<T>, out: &mut T) -> bool {
        match self.get_ref(key) {
            Ok(value) => {
                out.clone_from(value);
                true
            }
            Err(_) => false,
        }
    }

    pub fn get_ref<T: 'static>(&self, key: BbKey<T>) -> Result<&T, BlackboardError> {
        let entry = self
            .entries
            .get(key.name)
            .ok_or_else(|| logged(BlackboardError::MissingKey { key: key.name }))?;
        let stored = entry.type_name;
        entry
            .value
            .downcast_ref::<T>()
            .ok_or_else(|| logged(mismatch::<T>(key.name, stored)))
    }

    pub fn get_mut<T: 'static>(&mut self, key: BbKey<T>) -> Result<&mut T, BlackboardError> {
        let entry = self
            .entries
            .get_mut(key.name)
            .ok_or_else(|| logged(BlackboardError::MissingKey { key: key.name }))?;
        let stored = entry.type_name;
        entry
            .value
            .downcast_mut::<T>()
            .ok_or_else(|| logged(mismatch::<T>(key.name, stored)))
    }

    /// Take a slot out of the blackboard. A mismatched type leaves the slot in place.
    pub fn remove<T: 'static>(&mut self, key: BbKey<T>) -> Result<T, BlackboardError> {
        let entry = self
            .entries
            .get(key.name)
            .ok_or_else(|| logged(BlackboardError::MissingKey { key: key.name }))?;
        if !entry.value.is::<T>() {
            return Err(logged(mismatch::<T>(key.name, entry.type_name)));
        }
        let Entry {
            value,
            type_name: stored,
        } = self
            .entries
            .remove(key.name)
            .ok_or_else(|| logged(BlackboardError::MissingKey { key: key.name }))?;
        value
            .downcast::<T>()
            .map(|b| *b)
            .map_err(|_| logged(mismatch::<T>(key.name, stored)))
    }
}

fn mismatch<T: 'static>(key: &'static str, stored: &'static str) -> BlackboardError {
    BlackboardError::TypeMismatch {
        key,
        stored,
        requested: type_name::<T>(),
    }
}

fn logged(err: BlackboardError) -> BlackboardError {
    tracing::warn!(error = %err, "blackboard access failed");
    err
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEALTH: BbKey<f32> = BbKey::new("Health");
    const HEALTH_AS_INT: BbKey<i32> = BbKey::new("Health");
    const ITEMS: BbKey<Vec<u32>> = BbKey::new("Items");

    #[test]
    fn add_then_get_round_trips() {
        let mut bb = Blackboard::new();
        bb.add(HEALTH, 7.5).unwrap();
        assert_eq!(bb.get(HEALTH), Ok(7.5));
    }

    #[test]
    fn add_twice_keeps_first_value() {
        let mut bb = Blackboard::new();
        bb.add(HEALTH, 1.0).unwrap();
        assert_eq!(
            bb.add(HEALTH, 2.0),
            Err(BlackboardError::DuplicateKey { key: "Health" })
        );
        assert_eq!(bb.get(HEALTH), Ok(1.0));
    }

    #[test]
    fn change_requires_existing_key() {
        let mut bb = Blackboard::new();
        assert_eq!(
            bb.change(HEALTH, 2.0),
            Err(BlackboardError::MissingKey { key: "Health" })
        );
        assert!(!bb.contains(HEALTH));
    }

    #[test]
    fn change_with_wrong_type_is_dropped() {
        let mut bb = Blackboard::new();
        bb.add(HEALTH, 3.0).unwrap();
        let err = bb.change(HEALTH_AS_INT, 9).unwrap_err();
        assert!(matches!(err, BlackboardError::TypeMismatch { key: "Health", .. }));
        assert_eq!(bb.get(HEALTH), Ok(3.0));
    }

    #[test]
    fn failed_get_into_leaves_output_untouched() {
        let mut bb = Blackboard::new();
        bb.add(HEALTH, 3.0).unwrap();

        let mut out = 42;
        assert!(!bb.get_into(HEALTH_AS_INT, &mut out));
        assert_eq!(out, 42);

        let mut missing = vec![1, 2];
        assert!(!bb.get_into(ITEMS, &mut missing));
        assert_eq!(missing, vec![1, 2]);

        let mut health = 0.0;
        assert!(bb.get_into(HEALTH, &mut health));
        assert_eq!(health, 3.0);
    }

    #[test]
    fn get_mut_mutates_in_place() {
        let mut bb = Blackboard::new();
        bb.add(ITEMS, vec![1]).unwrap();
        bb.get_mut(ITEMS).unwrap().push(2);
        assert_eq!(bb.get_ref(ITEMS).unwrap(), &vec![1, 2]);
    }

    #[test]
    fn remove_with_wrong_type_keeps_slot() {
        let mut bb = Blackboard::new();
        bb.add(HEALTH, 3.0).unwrap();
        assert!(bb.remove(HEALTH_AS_INT).is_err());
        assert_eq!(bb.remove(HEALTH), Ok(3.0));
        assert!(bb.is_empty());
    }
}
