//! CLI module - Command-line interface definitions and handlers

use anyhow::{bail, Context, Result};
use clap::{ArgAction, Parser};
use colored::Colorize;
use log::{debug, LevelFilter};
use std::fs;
use std::path::{Path, PathBuf};

use make_vfs::{generate_module, ContentFormat, VfsOptions};

/// make-vfs - bake a directory of files into a generated module.
#[derive(Parser, Debug)]
#[command(name = "make-vfs")]
#[command(
    author,
    version,
    about,
    long_about = r#"make-vfs scans a directory and emits a JavaScript/TypeScript module whose
default export maps each relative file path to the file's content, or to an
import of the file.

Content formats:
- buffer (default): base64 Buffer.from(..) literals
- string: decodeURIComponent(..) text literals
- import-star / import-default / require: one import per file (needs OUTFILE)
- file-reference: Bun file(..) handles (needs OUTFILE)
- export-pathlist: just the list of matched paths

Examples:
    make-vfs ./migrations ./src/migrations.ts --extensions sql --content-format string
    make-vfs ./routes ./routes.generated.ts --extensions ts,js --content-format import-default --no-import-ext
"#
)]
pub struct Cli {
    /// DIR and OUTFILE given positionally.
    #[arg(value_name = "DIR [OUTFILE]", num_args = 0..=2)]
    pub positional: Vec<PathBuf>,

    /// The directory to load files from.
    #[arg(long, value_name = "DIR", env = "MAKE_VFS_DIR")]
    pub dir: Option<PathBuf>,

    /// The output module file, e.g. vfs.ts or migrations.ts.
    #[arg(
        long,
        value_name = "FILE",
        long_help = "The output module file, e.g. vfs.ts or migrations.ts.\n\n\
Import specifiers are computed relative to this file. Without an outfile the\n\
module is printed to stdout."
    )]
    pub outfile: Option<PathBuf>,

    /// Extensions to include, comma-separated (e.g. ts,js).
    #[arg(long, value_name = "EXTS", value_delimiter = ',')]
    pub extensions: Vec<String>,

    /// The format to store files in the module.
    #[arg(
        long,
        value_name = "FORMAT",
        default_value = "buffer",
        env = "MAKE_VFS_CONTENT_FORMAT",
        long_help = "The format to store files in the module.\n\n\
Supported values: buffer, string, import-star, import-default, require,\n\
export-pathlist, file-reference"
    )]
    pub content_format: String,

    /// Do not add the extension to import paths and keys.
    #[arg(long)]
    pub no_import_ext: bool,

    /// Print the module to stdout even when an outfile is given.
    #[arg(long)]
    pub stdout: bool,

    /// Quiet mode (errors only).
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Verbose mode, repeat for more detail.
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Disable colored output.
    #[arg(long)]
    pub no_color: bool,
}

impl Cli {
    /// Resolve DIR and OUTFILE from flags first, then positionals in order
    pub fn resolve_paths(&self) -> Result<(PathBuf, Option<PathBuf>)> {
        let mut positional = self.positional.iter().cloned();

        let dir = match self.dir.clone().or_else(|| positional.next()) {
            Some(dir) => dir,
            None => bail!("no directory given (pass DIR or --dir)"),
        };
        let outfile = self.outfile.clone().or_else(|| positional.next());

        if let Some(extra) = positional.next() {
            bail!("unexpected argument: {}", extra.display());
        }

        Ok((dir, outfile))
    }

    /// Extensions as given, without empty entries or leading dots
    pub fn extension_list(&self) -> Option<Vec<String>> {
        let extensions: Vec<String> = self
            .extensions
            .iter()
            .map(|e| e.trim().trim_start_matches('.').to_string())
            .filter(|e| !e.is_empty())
            .collect();

        if extensions.is_empty() {
            None
        } else {
            Some(extensions)
        }
    }

    pub fn log_level(&self) -> LevelFilter {
        verbosity_filter(self.verbose, self.quiet)
    }
}

/// Map -v occurrences and --quiet to a log level
pub fn verbosity_filter(verbose: u8, quiet: bool) -> LevelFilter {
    if quiet {
        return LevelFilter::Error;
    }
    match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// Install the stderr logger; RUST_LOG overrides the flag-derived level
pub fn init_logging(cli: &Cli) {
    if cli.no_color {
        colored::control::set_override(false);
    }

    env_logger::Builder::new()
        .filter_level(cli.log_level())
        .parse_default_env()
        .format_timestamp(None)
        .format_target(false)
        .init();
}

/// Run the CLI with parsed arguments
pub fn run(cli: Cli) -> Result<()> {
    let (dir, outfile) = cli.resolve_paths()?;
    let content_format: ContentFormat = cli.content_format.parse()?;

    let mut opts = VfsOptions::new(&dir)
        .with_content_format(content_format)
        .with_no_import_ext(cli.no_import_ext);
    if let Some(extensions) = cli.extension_list() {
        opts = opts.with_extensions(extensions);
    }
    if let Some(outfile) = &outfile {
        opts = opts.with_target_path(outfile);
    }
    debug!("{:?}", opts);

    let module = generate_module(&opts)
        .with_context(|| format!("Failed to generate module from {}", dir.display()))?;

    match outfile {
        Some(path) if !cli.stdout => {
            write_module(&path, &module)?;
            if !cli.quiet {
                eprintln!(
                    "{} {} ({})",
                    "Wrote".green().bold(),
                    path.display(),
                    content_format
                );
            }
        }
        _ => println!("{}", module),
    }

    Ok(())
}

/// Write the module, creating parent directories as needed
fn write_module(path: &Path, module: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }
    fs::write(path, format!("{}\n", module))
        .with_context(|| format!("Failed to write {}", path.display()))
}
