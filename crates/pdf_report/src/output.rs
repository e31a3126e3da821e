//! Writing finished documents to disk.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Errors raised while writing a document.
#[derive(Debug, thiserror::Error)]
pub enum OutputError {
    #[error("cannot create '{}'", path.display())]
    Create {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot write '{}'", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Writes `bytes` to `path`, replacing any existing file.
pub fn save_pdf(bytes: &[u8], path: impl AsRef<Path>) -> Result<(), OutputError> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|source| OutputError::Create {
        path: path.to_path_buf(),
        source,
    })?;

    let write_error = |source| OutputError::Write {
        path: path.to_path_buf(),
        source,
    };
    let mut writer = BufWriter::new(file);
    writer.write_all(bytes).map_err(write_error)?;
    writer.flush().map_err(write_error)?;
    Ok(())
}
