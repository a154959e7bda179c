//! Sequence archives using `MessagePack`.
//!
//! Processed card texts are saved as their export trees, together with the
//! source tag and text lines they came from. Archives are for inspection and
//! diffing; they are not read back into symbols.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use minilex_foundation::{Error, ErrorKind, Export, Exported, Result};
use minilex_sequence::SymbolSequence;
use serde::{Deserialize, Serialize};

/// Current archive format version.
pub const ARCHIVE_VERSION: u32 = 1;

/// One processed card text.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ArchivedSequence {
    /// Source tag the text was built under.
    pub source: String,
    /// The text lines.
    pub text: Vec<String>,
    /// Export of the flattened sequence.
    pub sequence: Exported,
}

impl ArchivedSequence {
    /// Captures a sequence.
    #[must_use]
    pub fn new(sequence: &SymbolSequence) -> Self {
        Self {
            source: sequence.source().to_string(),
            text: sequence.text().lines().to_vec(),
            sequence: sequence.export(),
        }
    }
}

/// A saved set of processed card texts.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Archive {
    /// Format version.
    pub version: u32,
    /// Entries in processing order.
    pub entries: Vec<ArchivedSequence>,
}

impl Archive {
    /// Creates an archive of the given entries.
    #[must_use]
    pub fn new(entries: Vec<ArchivedSequence>) -> Self {
        Self {
            version: ARCHIVE_VERSION,
            entries,
        }
    }
}

/// Serializes an archive to bytes using `MessagePack` format.
///
/// Uses named serialization to preserve struct field names.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn to_bytes(archive: &Archive) -> Result<Vec<u8>> {
    rmp_serde::to_vec_named(archive)
        .map_err(|e| Error::new(ErrorKind::Serialization(e.to_string())))
}

/// Deserializes an archive from `MessagePack` bytes.
///
/// # Errors
///
/// Returns an error if deserialization fails or the version is unknown.
pub fn from_bytes(bytes: &[u8]) -> Result<Archive> {
    let archive: Archive = rmp_serde::from_slice(bytes)
        .map_err(|e| Error::new(ErrorKind::Serialization(e.to_string())))?;
    if archive.version != ARCHIVE_VERSION {
        return Err(Error::new(ErrorKind::Serialization(format!(
            "unsupported archive version {}",
            archive.version
        ))));
    }
    Ok(archive)
}

/// Saves an archive to a file using `MessagePack` format.
///
/// Creates the file if it doesn't exist, or overwrites it if it does.
///
/// # Errors
///
/// Returns an error if the file cannot be created or written to,
/// or if serialization fails.
pub fn save_to_file<P: AsRef<Path>>(archive: &Archive, path: P) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|e| io_error("create", path, &e))?;

    let mut writer = BufWriter::new(file);
    let bytes = to_bytes(archive)?;

    writer
        .write_all(&bytes)
        .map_err(|e| io_error("write to", path, &e))?;
    writer.flush().map_err(|e| io_error("flush", path, &e))?;

    Ok(())
}

/// Loads an archive from a `MessagePack` file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or if deserialization fails.
pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Archive> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| io_error("open", path, &e))?;

    let mut reader = BufReader::new(file);
    let mut bytes = Vec::new();
    reader
        .read_to_end(&mut bytes)
        .map_err(|e| io_error("read", path, &e))?;

    from_bytes(&bytes)
}

fn io_error(action: &str, path: &Path, err: &std::io::Error) -> Error {
    Error::new(ErrorKind::Io(format!(
        "failed to {action} file '{}': {err}",
        path.display()
    )))
}
