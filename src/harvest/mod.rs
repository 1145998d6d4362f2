//! Collects scannable sources from a fetched document.

pub mod sources;

pub use sources::Harvest;
