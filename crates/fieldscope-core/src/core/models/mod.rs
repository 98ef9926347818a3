//! # Core Models Module
//!
//! Plain data structures shared by the physics and engine layers.
//!
//! ## Key Components
//!
//! - [`source`] - Tagged charge sources and their parameter sets
//! - [`shell`] - Validated concentric conductor/dielectric layer stacks
//! - [`sample`] - Field samples, metadata and quantized position keys
//! - [`domain`] - Sampling domains (regular grids or explicit point lists)
//! - [`scene`] - Scene descriptors as handed over by the scene collaborator, and their
//!   conversion into sources

pub mod domain;
pub mod sample;
pub mod scene;
pub mod shell;
pub mod source;
