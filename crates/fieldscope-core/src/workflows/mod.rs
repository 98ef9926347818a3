//! # Workflows Module
//!
//! Top-level entry points that tie scene descriptors, the physics in [`crate::core`] and
//! the sampling machinery in [`crate::engine`] together.
//!
//! - **Visualization Workflow** ([`visualize`]) - Converts a scene into charge sources,
//!   samples the superposed field over a domain into a color-encoded store, and reports
//!   the solved charge distribution of every layered object.

pub mod visualize;
