#![forbid(unsafe_code)]

//! Core: geometry primitives and logging plumbing shared by the gridarea crates.
//!
//! # Role in gridarea
//! `gridarea-core` sits underneath the layout crate. It owns the [`geometry`]
//! types the track solver produces and the [`logging`] glue that binaries use
//! to install a `tracing` subscriber.

pub mod geometry;
pub mod logging;

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{debug, debug_span, error, info, info_span, trace, warn};
