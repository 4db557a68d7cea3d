//! Generate flow
//!
//! Path Matcher -> read -> Module Renderer, as one pure function of the options.

use log::info;

use crate::backends::load::load_virtual_file_system;
use crate::core::error::{Result, VfsError};
use crate::core::options::{ContentFormat, VfsOptions};
use crate::core::render::{RenderConfig, Renderer};

/// Build the module source for `opts`
///
/// Option problems that need no filesystem access (conflicting filters, a
/// missing target path, an unimplemented format) are reported before the
/// directory is walked.
pub fn generate_module(opts: &VfsOptions) -> Result<String> {
    opts.validate()?;
    precheck(opts)?;

    let vfs = load_virtual_file_system(opts)?;
    let module = Renderer::with_config(RenderConfig::from_options(opts)).render(&vfs)?;

    info!(
        "Generated {} module with {} entries from {}",
        opts.content_format,
        vfs.len(),
        opts.dir_path.display()
    );
    Ok(module)
}

fn precheck(opts: &VfsOptions) -> Result<()> {
    let format = opts.content_format;
    if format.is_reference() && opts.target_path.is_none() {
        return Err(VfsError::MissingTargetPath {
            format: format.to_string(),
        });
    }
    if format == ContentFormat::ArrayBuffer {
        return Err(VfsError::UnsupportedFormat(format.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;
    use tempfile::tempdir;

    #[test]
    fn test_generate_string_module() {
        let temp = tempdir().unwrap();
        fs::write(temp.path().join("001_init.sql"), "CREATE TABLE \"users\" (id int);\n").unwrap();

        let opts = VfsOptions::new(temp.path())
            .with_extensions(["sql"])
            .with_content_format(ContentFormat::String);
        let module = generate_module(&opts).unwrap();

        assert_eq!(
            module,
            "export default {\n  \"001_init.sql\": decodeURIComponent(\"CREATE TABLE %22users%22 (id int)%3B%0A\")\n}"
        );
    }

    #[test]
    fn test_missing_target_checked_before_walk() {
        let opts = VfsOptions::new(Path::new("/definitely/not/here"))
            .with_content_format(ContentFormat::ImportDefault);
        assert!(matches!(
            generate_module(&opts),
            Err(VfsError::MissingTargetPath { .. })
        ));
    }

    #[test]
    fn test_arraybuffer_checked_before_walk() {
        let opts = VfsOptions::new(Path::new("/definitely/not/here"))
            .with_content_format(ContentFormat::ArrayBuffer);
        assert!(matches!(
            generate_module(&opts),
            Err(VfsError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_invalid_arguments_checked_before_walk() {
        let opts = VfsOptions::new(Path::new("/definitely/not/here"))
            .with_extensions(["txt"])
            .with_file_match(|_: &str, _: &Path| false);
        assert!(matches!(
            generate_module(&opts),
            Err(VfsError::InvalidArguments)
        ));
    }
}
