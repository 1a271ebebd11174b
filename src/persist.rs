//! Reading and writing analysis results as JSON files.

use crate::error::{Error, Result};
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::Value;
use std::fs::{self, File};
use std::io::{self, BufReader};
use std::path::Path;

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with four-space indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Read a persisted analysis result.
///
/// Fails with [`Error::NotFound`] if `path` does not exist, before any
/// parsing is attempted.
pub fn read_document<P: AsRef<Path>>(path: P) -> Result<Value> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(Error::NotFound(path.to_path_buf()));
    }

    let reader = BufReader::new(File::open(path)?);
    let document = serde_json::from_reader(reader)?;
    log::debug!("Read analysis result from {}", path.display());
    Ok(document)
}

/// Read a persisted analysis result using `tokio::fs`.
#[cfg(feature = "async")]
pub async fn read_document_async<P: AsRef<Path>>(path: P) -> Result<Value> {
    let path = path.as_ref();
    if !tokio::fs::try_exists(path).await? {
        return Err(Error::NotFound(path.to_path_buf()));
    }

    let data = tokio::fs::read(path).await?;
    Ok(serde_json::from_slice(&data)?)
}

/// Serialize a document to a JSON string.
pub fn to_json_string<T: Serialize + ?Sized>(document: &T, format: JsonFormat) -> Result<String> {
    match format {
        JsonFormat::Compact => Ok(serde_json::to_string(document)?),
        JsonFormat::Pretty => {
            let mut buf = Vec::new();
            let formatter = PrettyFormatter::with_indent(b"    ");
            let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
            document.serialize(&mut ser)?;
            String::from_utf8(buf)
                .map_err(|e| Error::Io(io::Error::new(io::ErrorKind::InvalidData, e)))
        }
    }
}

/// Write a document to `path`, replacing any existing file.
pub fn write_document<P: AsRef<Path>>(path: P, document: &Value, format: JsonFormat) -> Result<()> {
    let path = path.as_ref();
    fs::write(path, to_json_string(document, format)?)?;
    log::debug!("Wrote analysis result to {}", path.display());
    Ok(())
}
