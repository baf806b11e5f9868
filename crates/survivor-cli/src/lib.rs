//! Sandbox host used by the `survivor` binary.

#![forbid(unsafe_code)]

pub mod sandbox;

pub use sandbox::{SandboxSummary, SandboxWorld};
