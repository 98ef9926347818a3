//! # Core Module
//!
//! The stateless foundation of FieldScope: data models describing charge sources and
//! sampling domains, and the closed-form electrostatics that turns them into field
//! vectors.
//!
//! ## Architecture
//!
//! - **Data Models** ([`models`]) - Charge sources, shell systems, samples, domains and
//!   scene descriptors
//! - **Physics** ([`physics`]) - Field evaluators and the layered charge solver
//! - **Utilities** ([`utils`]) - Small geometric helpers shared by the evaluators
//!
//! Nothing in this module holds mutable state; the stateful sample cache and the
//! sampling loop live in [`crate::engine`].

pub mod models;
pub mod physics;
pub mod utils;
