//! Script input and audio output for the command line.

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use thiserror::Error;

use super::docx;
use crate::engine::AudioBuffer;

/// Errors that can occur while reading the script.
#[derive(Error, Debug)]
pub enum InputError {
    #[error("No script given. Use --text or --input")]
    NoInput,

    #[error("Script file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Unsupported script format: {0}. Save the document as plain text first")]
    UnsupportedFormat(PathBuf),

    #[error("Script is not valid UTF-8: {0}")]
    NotUtf8(PathBuf),

    #[error("Cannot read document {0}: {1}")]
    InvalidDocument(PathBuf, String),

    #[error("IO error: {0}")]
    IoError(#[from] io::Error),
}

/// Origin of the script text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptSource {
    Inline(String),
    File(PathBuf),
    Stdin,
}

const UNSUPPORTED_EXTENSIONS: &[&str] = &["doc", "odt", "pdf", "rtf"];

/// Read the full script text from its source.
pub fn load_script(source: &ScriptSource) -> Result<String, InputError> {
    match source {
        ScriptSource::Inline(text) => Ok(text.clone()),
        ScriptSource::Stdin => {
            let mut text = String::new();
            io::stdin().read_to_string(&mut text)?;
            Ok(text)
        }
        ScriptSource::File(path) => read_script_file(path),
    }
}

fn read_script_file(path: &Path) -> Result<String, InputError> {
    let extension = path.extension().and_then(|ext| ext.to_str()).unwrap_or("");
    if UNSUPPORTED_EXTENSIONS
        .iter()
        .any(|u| extension.eq_ignore_ascii_case(u))
    {
        return Err(InputError::UnsupportedFormat(path.to_path_buf()));
    }

    if !path.exists() {
        return Err(InputError::FileNotFound(path.to_path_buf()));
    }

    if extension.eq_ignore_ascii_case("docx") {
        let file = fs::File::open(path)?;
        return docx::extract_text(io::BufReader::new(file))
            .map_err(|reason| InputError::InvalidDocument(path.to_path_buf(), reason));
    }

    let bytes = fs::read(path)?;
    let text = String::from_utf8(bytes).map_err(|_| InputError::NotUtf8(path.to_path_buf()))?;

    Ok(text.strip_prefix('\u{feff}').map(str::to_string).unwrap_or(text))
}

/// Write finished audio to `path`, replacing any previous file.
///
/// Bytes go to a sibling `.part` file first and are renamed into place, so
/// `path` never holds a truncated artifact.
pub fn write_output(path: &Path, audio: &AudioBuffer) -> io::Result<()> {
    let file_name = path.file_name().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("Output path has no file name: {}", path.display()),
        )
    })?;

    let mut part_name = file_name.to_os_string();
    part_name.push(".part");
    let part_path = path.with_file_name(part_name);

    if let Err(e) = fs::write(&part_path, audio.as_bytes()) {
        let _ = fs::remove_file(&part_path);
        return Err(e);
    }

    fs::rename(&part_path, path).inspect_err(|_| {
        let _ = fs::remove_file(&part_path);
    })
}
