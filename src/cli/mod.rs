//! CLI command handlers

pub mod commands;

pub use commands::{embed_images, layout, populate, prune};
