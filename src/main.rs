//! make-vfs - bake a directory of files into a generated module
//!
//! make-vfs provides:
//! - File matching by extension, including dotfiles
//! - Inline content as base64 buffers or decoded strings
//! - Import/require statements pointing back at the files
//! - A bare path list

use anyhow::Result;
use clap::Parser;

mod cli;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli::init_logging(&cli);
    cli::run(cli)
}
