//! Adapter implementations for port traits.
//!
//! - `directory` — Pick assets from filesystem directories

pub mod directory;
