//! Valentine Week library crate; re-exports all modules for integration testing.
//!
//! The binary crate (`main.rs`) is the actual entry point. This library
//! exposes the same modules so that `tests/` can drive the stage machine
//! and the day scenes without a window or GPU.

pub mod shared;
pub mod data;
pub mod input;
pub mod registry;
pub mod stage;
pub mod hub;
pub mod days;
pub mod ui;
