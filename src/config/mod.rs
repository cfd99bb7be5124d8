//! Configuration module for PupilTools
//!
//! This module provides configuration management including:
//! - Platform-aware path resolution
//! - User settings persistence

pub mod paths;
pub mod settings;

pub use paths::PupilPaths;
pub use settings::Settings;
