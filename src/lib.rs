//! fsutil: inspect the dirty bit of filesystem volumes
//!
//! Layers, innermost first: `domain` (volume entities), `application`
//! (the dirty-bit service), `infrastructure` (platform volume access and
//! wiring), `cli` (table dispatch and handlers).

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
