//! # FieldScope Core Library
//!
//! Closed-form electrostatics for interactive field visualization: point charges, wires,
//! planes, spheres and nested conductor/dielectric shell systems, superposed over a
//! sampling domain into a keyed, color-encoded sample store.
//!
//! ## Architectural Philosophy
//!
//! The library follows a three-layer architecture:
//!
//! - **[`core`]: The Foundation.** Stateless data models (`ChargeSource`, `ShellSystem`,
//!   `SamplingDomain`, scene descriptors) and pure physics: one evaluator per source
//!   family plus the layered charge solver.
//!
//! - **[`engine`]: The Logic Core.** The stateful `SampleStore`, its color encodings, and
//!   the sampler that fills a store from a set of sources in a single pass, optionally in
//!   parallel.
//!
//! - **[`workflows`]: The Public API.** End-to-end procedures that turn a scene and a
//!   sampling configuration into a populated store and a summary.

pub mod core;
pub mod engine;
pub mod workflows;
