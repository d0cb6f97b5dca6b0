//! Two-phase classification pipeline.
//!
//! The boundary stage classifies interfaces; the domain stage classifies every
//! other element with the finished port outcomes in its context. [`Classifier`]
//! wires both stages to a validated configuration.

mod classifier;
pub mod stage;
mod stages;

pub use classifier::Classifier;
pub use stage::{Stage, StageOutput};
