//! Core engine types: the event queue, discs, walls, and the driver loop.

pub mod event;
pub mod heap;
pub mod particle;
pub mod sim;
pub mod wall;

pub use event::{Event, EventKind};
pub use heap::MinHeap;
pub use particle::Particle;
pub use sim::Simulation;
pub use wall::{Orientation, Wall};
