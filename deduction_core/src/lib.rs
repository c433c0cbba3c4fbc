//! # Deduction Core
//!
//! Belief-state reasoning over `botc_rules` worlds. A belief state is a
//! collection of worlds not yet ruled out; evidence narrows it, and deduction
//! reads certainties and probabilities off it.
//!
//! ## Core Components
//!
//! - **world_builder**: Enumerates every legal world for a seating
//! - **constraints**: Pure filters, one per piece of evidence
//! - **deduction**: Proven roles, role and alignment probabilities, summaries
//! - **memory**: Ordered observation history that rebuilds the belief state
//!
//! Nothing here mutates a belief state in place: every operation takes a
//! snapshot and returns a new one, so independent reasoners can share worlds
//! freely across threads.

pub mod constraints;
pub mod deduction;
pub mod memory;
pub mod world_builder;

pub use constraints::*;
pub use deduction::*;
pub use memory::*;
pub use world_builder::*;
