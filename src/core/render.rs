//! Module renderer
//!
//! Renders a VirtualFileSystem to module source text in one of the
//! [`ContentFormat`] shapes. Every shape exposes the mapping as the default
//! export.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;
use std::path::PathBuf;

use crate::core::error::{Result, VfsError};
use crate::core::escape::escape_for_string_literal;
use crate::core::model::{FileEntry, VirtualFileSystem};
use crate::core::options::{ContentFormat, VfsOptions};
use crate::core::paths::{import_specifier, relative_base, strip_extension};

static NON_IDENT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-zA-Z0-9]").expect("Invalid NON_IDENT_RE regex"));

/// Sanitize a relative path into a generated identifier (`a/b-c.ts` -> `_a_b_c_ts`)
pub fn idsafe(path: &str) -> String {
    format!("_{}", NON_IDENT_RE.replace_all(path, "_"))
}

/// Double-quoted literal valid in both JSON and JavaScript
fn quote(s: &str) -> String {
    serde_json::Value::from(s).to_string()
}

/// Render configuration combining format and reference options
#[derive(Debug, Clone, Default)]
pub struct RenderConfig {
    pub format: ContentFormat,
    /// Scanned root, the target of generated import specifiers
    pub dir_path: PathBuf,
    pub target_path: Option<PathBuf>,
    pub no_import_ext: bool,
}

impl RenderConfig {
    pub fn new(format: ContentFormat) -> Self {
        Self {
            format,
            ..Default::default()
        }
    }

    pub fn from_options(opts: &VfsOptions) -> Self {
        Self {
            format: opts.content_format,
            dir_path: opts.dir_path.clone(),
            target_path: opts.target_path.clone(),
            no_import_ext: opts.no_import_ext,
        }
    }
}

/// One generated reference: map key, identifier and import specifier
#[derive(Debug, Clone, PartialEq, Eq)]
struct Binding {
    key: String,
    ident: String,
    specifier: String,
}

/// Renderer for virtual filesystems
pub struct Renderer {
    config: RenderConfig,
}

impl Renderer {
    pub fn new(format: ContentFormat) -> Self {
        Self {
            config: RenderConfig::new(format),
        }
    }

    pub fn with_config(config: RenderConfig) -> Self {
        Self { config }
    }

    /// Render a virtual filesystem to module source
    pub fn render(&self, vfs: &VirtualFileSystem) -> Result<String> {
        debug!(
            "Rendering {} entries as {}",
            vfs.len(),
            self.config.format
        );

        match self.config.format {
            ContentFormat::Buffer => self.render_inline(vfs, |bytes| {
                format!("Buffer.from(\"{}\", \"base64\")", BASE64.encode(bytes))
            }),
            ContentFormat::String => self.render_inline(vfs, |bytes| {
                format!(
                    "decodeURIComponent(\"{}\")",
                    escape_for_string_literal(&String::from_utf8_lossy(bytes))
                )
            }),
            ContentFormat::ImportStar | ContentFormat::ImportDefault | ContentFormat::Require => {
                self.render_imports(vfs)
            }
            ContentFormat::FileReference => self.render_file_references(vfs),
            ContentFormat::ExportPathlist => Ok(self.render_pathlist(vfs)),
            ContentFormat::ArrayBuffer => Err(VfsError::UnsupportedFormat(
                self.config.format.to_string(),
            )),
        }
    }

    /// `export default { "path": <literal>, ... }` with content inlined
    fn render_inline<F>(&self, vfs: &VirtualFileSystem, literal: F) -> Result<String>
    where
        F: Fn(&[u8]) -> String,
    {
        let entries = vfs
            .iter()
            .map(|entry| {
                let bytes = entry.bytes().ok_or_else(|| VfsError::MissingContent {
                    path: entry.path.clone(),
                })?;
                Ok(format!("  {}: {}", quote(&entry.path), literal(bytes)))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(format!("export default {{\n{}\n}}", entries.join(",\n")))
    }

    fn render_imports(&self, vfs: &VirtualFileSystem) -> Result<String> {
        let bindings = self.bindings(vfs, self.config.no_import_ext)?;

        let statements = bindings
            .iter()
            .map(|b| match self.config.format {
                ContentFormat::Require => {
                    format!("const {} = require({})", b.ident, quote(&b.specifier))
                }
                ContentFormat::ImportDefault => {
                    format!("import {} from {}", b.ident, quote(&b.specifier))
                }
                _ => format!("import * as {} from {}", b.ident, quote(&b.specifier)),
            })
            .collect::<Vec<_>>();

        let entries = bindings
            .iter()
            .map(|b| format!("  {}: {}", quote(&b.key), b.ident))
            .collect::<Vec<_>>();

        Ok(format!(
            "{}\n\nexport default {{\n{}\n}}",
            statements.join("\n"),
            entries.join(",\n")
        ))
    }

    fn render_file_references(&self, vfs: &VirtualFileSystem) -> Result<String> {
        // The host resolves `with { type: "file" }` imports by real file name
        let bindings = self.bindings(vfs, false)?;

        let statements = bindings
            .iter()
            .map(|b| {
                format!(
                    "import {} from {} with {{ type: \"file\" }};",
                    b.ident,
                    quote(&b.specifier)
                )
            })
            .collect::<Vec<_>>();

        let entries = bindings
            .iter()
            .map(|b| format!("  {}: file({})", quote(&b.key), b.ident))
            .collect::<Vec<_>>();

        Ok(format!(
            "{}\n\nimport {{ file }} from \"bun\";\n\nexport default {{\n{}\n}}",
            statements.join("\n"),
            entries.join(",\n")
        ))
    }

    fn render_pathlist(&self, vfs: &VirtualFileSystem) -> String {
        let paths = vfs
            .paths()
            .map(|p| format!("  {}", quote(p)))
            .collect::<Vec<_>>();

        format!("export default [\n{}\n]", paths.join(",\n"))
    }

    /// Keys, identifiers and specifiers for the reference-producing formats
    fn bindings(&self, vfs: &VirtualFileSystem, strip_ext: bool) -> Result<Vec<Binding>> {
        let target = self
            .config
            .target_path
            .as_ref()
            .ok_or_else(|| VfsError::MissingTargetPath {
                format: self.config.format.to_string(),
            })?;

        let base = relative_base(&self.config.dir_path, target)
            .map_err(|e| VfsError::resolve(target.clone(), e))?;
        debug!("Import base relative to {}: {:?}", target.display(), base);

        let mut seen: HashMap<String, &FileEntry> = HashMap::new();
        let mut bindings = Vec::with_capacity(vfs.len());

        for entry in vfs {
            let key = if strip_ext {
                strip_extension(&entry.path)
            } else {
                entry.path.clone()
            };
            let ident = idsafe(&key);

            if let Some(first) = seen.get(&ident) {
                return Err(VfsError::DuplicateIdentifier {
                    identifier: ident,
                    first: first.path.clone(),
                    second: entry.path.clone(),
                });
            }
            seen.insert(ident.clone(), entry);

            bindings.push(Binding {
                specifier: import_specifier(&base, &key),
                key,
                ident,
            });
        }

        Ok(bindings)
    }
}
