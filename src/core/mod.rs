//! Core domain models for reposnap
//!
//! This module defines the step list the snapshot runner executes.

pub mod step;

pub use step::{Step, SNAPSHOT_STEPS};
