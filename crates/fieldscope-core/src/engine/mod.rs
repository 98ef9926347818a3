//! # Engine Module
//!
//! Stateful machinery that turns a set of charge sources and a sampling domain into a
//! populated, color-encoded sample store.
//!
//! ## Architecture
//!
//! - **Storage** ([`store`], [`encoding`]) - The keyed sample cache, generic over an
//!   [`encoding::Encoding`] that decides the field family and per-sample color
//! - **Sampling** ([`sampler`]) - Superposition of every active source at every domain
//!   position, optionally evaluated on a worker pool and merged by a single writer
//! - **Configuration** ([`config`]) - Sampling parameters assembled through a builder
//! - **Progress Monitoring** ([`progress`]) - Callback-based progress events for front ends
//! - **Error Handling** ([`error`]) - The aggregate error type returned by workflows
//!
//! The store is not internally synchronized; a pass owns it exclusively while running and
//! re-colors it exactly once at the end.

pub mod config;
pub mod encoding;
pub mod error;
pub mod progress;
pub mod sampler;
pub mod store;
