//! boxsim: exact event-driven simulation of hard discs in a square box.
//!
//! Instead of stepping time on a fixed grid, the engine predicts every
//! pairwise and wall contact, queues the predictions by occurrence time, and
//! jumps straight from one collision to the next. Predictions made obsolete
//! by an earlier collision stay in the queue and are discarded lazily when
//! popped. See [`core::Simulation`] for the driver loop.

pub mod core;
pub mod error;
pub mod io;

pub use crate::core::Simulation;
