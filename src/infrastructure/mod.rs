//! Infrastructure layer: platform volume access and DI container
//!
//! This layer implements I/O boundary traits and wires up services.

pub mod di;
pub mod superblock;
pub mod traits;
#[cfg(windows)]
pub mod windows;
