//! linkaudit - flag JS/JSX/TSX files that mix router links with raw anchors
//!
//! linkaudit walks one or more directory roots and reports every source file
//! whose content contains both a `<Link` component and a raw `<a` element.
//! Mixing the two constructs in one file usually means one of them is wrong.

use anyhow::Result;
use clap::Parser;
use std::process::ExitCode;

mod cli;
mod core;
mod scanner;

fn main() -> Result<ExitCode> {
    let cli = cli::Cli::parse();
    cli::run(cli)
}
