//! Step definitions for task board BDD scenarios.

mod given;
mod then;
mod when;
pub mod world;
