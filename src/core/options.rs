//! Generation options
//!
//! [`VfsOptions`] is the configuration structure handed to every step of the
//! pipeline. It can be built in code or deserialized from a build manifest;
//! the custom match predicate is code-only.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::core::error::{Result, VfsError};

/// How file contents are rendered into the generated module
///
/// Deserialization goes through [`FromStr`](std::str::FromStr), so manifests
/// accept the same names (and aliases) as the command line and reject the same
/// unknown ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", try_from = "String")]
pub enum ContentFormat {
    /// Inline base64 `Buffer.from(..)` literals
    #[default]
    Buffer,
    /// Inline `decodeURIComponent(..)` text literals
    String,
    /// Recognised but not implemented
    #[serde(rename = "arraybuffer")]
    ArrayBuffer,
    /// `import * as _id from "./path"`
    ImportStar,
    /// `import _id from "./path"`
    ImportDefault,
    /// `const _id = require("./path")`
    Require,
    /// Only the list of matched paths
    ExportPathlist,
    /// `import _id from "./path" with { type: "file" }` wrapped in `file(..)`
    FileReference,
}

impl ContentFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentFormat::Buffer => "buffer",
            ContentFormat::String => "string",
            ContentFormat::ArrayBuffer => "arraybuffer",
            ContentFormat::ImportStar => "import-star",
            ContentFormat::ImportDefault => "import-default",
            ContentFormat::Require => "require",
            ContentFormat::ExportPathlist => "export-pathlist",
            ContentFormat::FileReference => "file-reference",
        }
    }

    /// Formats that emit statements pointing at files on disk
    pub fn is_reference(&self) -> bool {
        matches!(
            self,
            ContentFormat::ImportStar
                | ContentFormat::ImportDefault
                | ContentFormat::Require
                | ContentFormat::FileReference
        )
    }

    /// Formats whose output embeds file contents
    pub fn needs_content(&self) -> bool {
        matches!(self, ContentFormat::Buffer | ContentFormat::String)
    }
}

impl fmt::Display for ContentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ContentFormat {
    type Err = VfsError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "buffer" => Ok(ContentFormat::Buffer),
            "string" => Ok(ContentFormat::String),
            "arraybuffer" => Ok(ContentFormat::ArrayBuffer),
            "import-star" => Ok(ContentFormat::ImportStar),
            "import-default" => Ok(ContentFormat::ImportDefault),
            "require" => Ok(ContentFormat::Require),
            "export-pathlist" => Ok(ContentFormat::ExportPathlist),
            "file-reference" | "import-bunfile" => Ok(ContentFormat::FileReference),
            _ => Err(VfsError::UnknownContentFormat(s.to_string())),
        }
    }
}

impl TryFrom<String> for ContentFormat {
    type Error = VfsError;

    fn try_from(s: String) -> std::result::Result<Self, Self::Error> {
        s.parse()
    }
}

/// Inclusion predicate over (relative posix path, absolute path)
pub trait FileMatch: Send + Sync {
    fn matches(&self, relative: &str, absolute: &Path) -> bool;
}

impl<F> FileMatch for F
where
    F: Fn(&str, &Path) -> bool + Send + Sync,
{
    fn matches(&self, relative: &str, absolute: &Path) -> bool {
        self(relative, absolute)
    }
}

/// Case-sensitive `.<ext>` suffix matcher
#[derive(Debug, Clone)]
pub struct ExtensionMatch {
    suffixes: Vec<String>,
}

impl ExtensionMatch {
    pub fn new<I, S>(extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            suffixes: extensions
                .into_iter()
                .map(|ext| format!(".{}", ext.as_ref()))
                .collect(),
        }
    }
}

impl FileMatch for ExtensionMatch {
    fn matches(&self, relative: &str, _absolute: &Path) -> bool {
        self.suffixes.iter().any(|suffix| relative.ends_with(suffix))
    }
}

/// Options for one generation run
#[derive(Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VfsOptions {
    /// Root directory to scan
    pub dir_path: PathBuf,

    /// Extension allow-list, without the leading dot
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extensions: Option<Vec<String>>,

    /// Custom inclusion predicate
    #[serde(skip)]
    pub file_match: Option<Arc<dyn FileMatch>>,

    #[serde(default)]
    pub content_format: ContentFormat,

    /// File the generated module will be written to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_path: Option<PathBuf>,

    /// Drop the final extension from keys and import specifiers
    #[serde(default)]
    pub no_import_ext: bool,
}

impl VfsOptions {
    pub fn new(dir_path: impl Into<PathBuf>) -> Self {
        Self {
            dir_path: dir_path.into(),
            ..Default::default()
        }
    }

    pub fn with_extensions<S: Into<String>>(mut self, extensions: impl IntoIterator<Item = S>) -> Self {
        self.extensions = Some(extensions.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_file_match(mut self, file_match: impl FileMatch + 'static) -> Self {
        self.file_match = Some(Arc::new(file_match));
        self
    }

    pub fn with_content_format(mut self, format: ContentFormat) -> Self {
        self.content_format = format;
        self
    }

    pub fn with_target_path(mut self, target_path: impl Into<PathBuf>) -> Self {
        self.target_path = Some(target_path.into());
        self
    }

    pub fn with_no_import_ext(mut self, no_import_ext: bool) -> Self {
        self.no_import_ext = no_import_ext;
        self
    }

    /// Reject option combinations that can never succeed
    pub fn validate(&self) -> Result<()> {
        if self.extensions.is_some() && self.file_match.is_some() {
            return Err(VfsError::InvalidArguments);
        }
        Ok(())
    }

    /// The predicate the matcher should apply (everything when unset)
    pub fn matcher(&self) -> Result<Arc<dyn FileMatch>> {
        self.validate()?;
        let matcher: Arc<dyn FileMatch> = match (&self.extensions, &self.file_match) {
            (Some(extensions), _) => Arc::new(ExtensionMatch::new(extensions)),
            (None, Some(file_match)) => Arc::clone(file_match),
            (None, None) => Arc::new(|_: &str, _: &Path| true),
        };
        Ok(matcher)
    }
}

impl fmt::Debug for VfsOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VfsOptions")
            .field("dir_path", &self.dir_path)
            .field("extensions", &self.extensions)
            .field("file_match", &self.file_match.as_ref().map(|_| "<fn>"))
            .field("content_format", &self.content_format)
            .field("target_path", &self.target_path)
            .field("no_import_ext", &self.no_import_ext)
            .finish()
    }
}
