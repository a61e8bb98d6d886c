//! eagle: inspect layered configuration sources
//!
//! Shows which files contribute to the active environment and what their
//! overlay looks like.

use anyhow::Result;

mod cli;

fn main() -> Result<()> {
    cli::run()
}
