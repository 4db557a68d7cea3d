//! Core module - Contains the fundamental data structures and utilities
//!
//! This module provides:
//! - Virtual filesystem model (FileEntry, VirtualFileSystem)
//! - Generation options and the content format selector
//! - Module rendering for every content format
//! - Path normalization utilities
//! - String-format escaping
//! - The library error type

pub mod error;
pub mod escape;
pub mod model;
pub mod options;
pub mod paths;
pub mod render;
