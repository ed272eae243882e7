//! Configuration module for Pocket Budget
//!
//! This module provides configuration management including:
//! - XDG-compliant path resolution
//! - User display settings persistence

pub mod paths;
pub mod settings;

pub use paths::PocketPaths;
pub use settings::Settings;
