//! Writing the generated script to disk.
//!
//! Overwriting an existing file requires confirmation. The confirmation is
//! passed in as a callback so the decision can be made interactively
//! ([`prompt_overwrite`]), forced by a flag, or scripted in tests.

use crate::error::{ObfuscateError, Result};
use std::fs::{self, File};
use std::io::{self, BufRead, BufWriter, Write};
use std::path::Path;
use tracing::info;

/// Whether a typed answer confirms an overwrite: `y` or `yes`, any case,
/// surrounding whitespace ignored.
pub fn is_confirmation(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

/// Write `content` to `path`, creating parent directories as needed.
///
/// If `path` already exists, `confirm` is asked first; a `false` answer
/// returns [`ObfuscateError::UserCancelled`] and leaves the file untouched.
/// Returns the number of bytes written.
pub fn write_script<F>(path: &Path, content: &str, confirm: F) -> Result<usize>
where
    F: FnOnce(&Path) -> io::Result<bool>,
{
    if path.exists() {
        let approved = confirm(path).map_err(|e| ObfuscateError::io(path, e))?;
        if !approved {
            return Err(ObfuscateError::UserCancelled(path.to_path_buf()));
        }
    }

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| ObfuscateError::io(parent, e))?;
        }
    }

    let file = File::create(path).map_err(|e| ObfuscateError::io(path, e))?;
    let mut writer = BufWriter::new(file);
    writer
        .write_all(content.as_bytes())
        .and_then(|_| writer.flush())
        .map_err(|e| ObfuscateError::io(path, e))?;

    info!("wrote {} bytes to {}", content.len(), path.display());
    Ok(content.len())
}

/// Ask on stderr whether to overwrite `path`, reading one line from stdin.
pub fn prompt_overwrite(path: &Path) -> io::Result<bool> {
    let stdin = io::stdin();
    ask_overwrite(path, &mut stdin.lock(), &mut io::stderr())
}

fn ask_overwrite<R: BufRead, W: Write>(path: &Path, input: &mut R, prompt: &mut W) -> io::Result<bool> {
    write!(prompt, "File {} already exists. Overwrite? (y/n): ", path.display())?;
    prompt.flush()?;

    let mut answer = String::new();
    input.read_line(&mut answer)?;
    Ok(is_confirmation(&answer))
}
