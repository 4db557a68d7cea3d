//! Backends module - Filesystem access
//!
//! Provides:
//! - scan: File matching with walkdir
//! - load: Reading matched files into a VirtualFileSystem

pub mod load;
pub mod scan;
