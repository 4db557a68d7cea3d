//! make-vfs - bake a directory of files into a generated module
//!
//! A run matches files under a root directory, optionally reads them, and
//! renders a JavaScript/TypeScript module whose default export maps each
//! relative path to its content or to an import of the file:
//!
//! ```no_run
//! use make_vfs::{generate_module, ContentFormat, VfsOptions};
//!
//! let opts = VfsOptions::new("./migrations")
//!     .with_extensions(["sql"])
//!     .with_content_format(ContentFormat::String);
//! let module = generate_module(&opts)?;
//! std::fs::write("src/migrations.ts", module)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod backends;
pub mod core;
pub mod flows;

pub use crate::backends::load::{load_entries, load_virtual_file_system};
pub use crate::backends::scan::{match_file_paths, scan_files};
pub use crate::core::error::{Result, VfsError};
pub use crate::core::model::{Content, FileEntry, RelativePath, VirtualFileSystem};
pub use crate::core::options::{ContentFormat, ExtensionMatch, FileMatch, VfsOptions};
pub use crate::core::render::{idsafe, RenderConfig, Renderer};
pub use crate::flows::generate::generate_module;
