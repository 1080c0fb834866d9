//! Homestead library crate: the farming simulation core.
//!
//! The binary crate (`main.rs`) runs the core headless. This library crate
//! exposes every domain so that adapters and the `tests/` integration tests
//! can drive `GameState` without a window or GPU.

pub mod shared;
pub mod calendar;
pub mod player;
pub mod farming;
pub mod world;
pub mod npcs;
pub mod economy;
pub mod game;
pub mod save;
pub mod data;
