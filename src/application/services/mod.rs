//! Application services
//!
//! Concrete service implementations that orchestrate domain logic.
//! Services depend on I/O boundary traits (VolumeControl) but are
//! themselves concrete structs, not traits.

mod dirty;

pub use dirty::DirtyService;
