use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::RouterConfig;

/// Errors that can occur while writing a [`RouterConfig`] script.
#[derive(Debug, Error)]
pub enum WriteError {
    /// Failed to write output file.
    #[error("failed to write script file: {0}")]
    Io(#[from] std::io::Error),
}

/// Render a [`RouterConfig`] as RouterOS script text.
///
/// Each section is written as its path on one line followed by its commands,
/// with a blank line between sections. Empty sections are omitted.
pub fn write(config: &RouterConfig) -> String {
    let mut blocks = Vec::new();
    for (section, commands) in config.iter() {
        if commands.is_empty() {
            continue;
        }
        let mut block = String::new();
        block.push_str(section);
        block.push('\n');
        for command in commands {
            block.push_str(&command.to_string());
            block.push('\n');
        }
        blocks.push(block);
    }
    blocks.join("\n")
}

/// Render a [`RouterConfig`] and write it to `path`.
pub fn write_file(config: &RouterConfig, path: &Path) -> Result<(), WriteError> {
    fs::write(path, write(config))?;
    Ok(())
}
