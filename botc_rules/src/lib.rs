//! # Botc Rules
//!
//! The rules crate - roles, teams, worlds, and the first-night information each
//! role receives. Everything here is pure and immutable; this crate contains no
//! reasoning logic.

pub mod config;
pub mod entities;
pub mod error;
pub mod mechanics;
pub mod world_state;

pub use config::*;
pub use entities::*;
pub use error::*;
pub use mechanics::*;
pub use world_state::*;
