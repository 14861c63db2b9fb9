//! Source-side data: vintage descriptors, static classification tables and
//! the raw table rows supplied by the retrieval layer.

pub mod bea;
pub mod statcan;
pub mod tables;
pub mod vintage;

pub use tables::*;
pub use vintage::*;
