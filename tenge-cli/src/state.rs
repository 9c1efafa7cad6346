use anyhow::{Context, Result};
use std::path::PathBuf;

/// `~/.tenge`. Created on demand by `config::save_config`.
pub fn tenge_home() -> Result<PathBuf> {
    let home = std::env::var("HOME").context("HOME is not set")?;
    Ok(PathBuf::from(home).join(".tenge"))
}
