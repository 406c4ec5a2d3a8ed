//! man2zig: turn an HTML C library reference manual into documented Zig bindings.
//!
//! The pipeline has two independent halves:
//!
//! - **split**: raw-text carving of manual sections into per-symbol fragments,
//!   cached as a JSON array ([`split`]).
//! - **generate**: per-symbol extraction from the parsed manual ([`extract`]),
//!   driven by the symbol [`registry`] and rendered by [`synth`] and [`render`].

pub mod config;
pub mod error;
pub mod extract;
pub mod manual;
pub mod model;
pub mod registry;
pub mod render;
pub mod split;
pub mod synth;

pub use error::{Error, Result};
