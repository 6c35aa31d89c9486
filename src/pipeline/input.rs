//! Input and output path handling.
//!
//! The input is validated before anything touches the file system, so a
//! missing source never leaves an empty output directory behind, and an
//! output path that points back at the source is refused.

use crate::error::Txt2PdfError;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Validate that `path` exists and can be opened for reading.
pub fn resolve_input(path: &Path) -> Result<PathBuf, Txt2PdfError> {
    if !path.exists() {
        return Err(Txt2PdfError::InputNotFound {
            path: path.to_path_buf(),
        });
    }

    match std::fs::File::open(path) {
        Ok(_) => {}
        Err(e) if e.kind() == ErrorKind::PermissionDenied => {
            return Err(Txt2PdfError::PermissionDenied {
                path: path.to_path_buf(),
            });
        }
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(Txt2PdfError::InputNotFound {
                path: path.to_path_buf(),
            });
        }
        Err(source) => {
            return Err(Txt2PdfError::InputReadFailed {
                path: path.to_path_buf(),
                source,
            });
        }
    }

    debug!("Resolved input: {}", path.display());
    Ok(path.to_path_buf())
}

/// Fail if `output` names the same file as `input`.
///
/// Both sides are canonicalized: the input directly, the output through its
/// parent directory plus file name. An output whose parent does not exist
/// yet cannot be the input.
pub fn reject_output_is_input(input: &Path, output: &Path) -> Result<(), Txt2PdfError> {
    let Ok(input_canonical) = std::fs::canonicalize(input) else {
        return Ok(());
    };
    let Some(name) = output.file_name() else {
        return Ok(());
    };
    let parent = match output.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let Ok(parent_canonical) = std::fs::canonicalize(parent) else {
        return Ok(());
    };

    if parent_canonical.join(name) == input_canonical {
        return Err(Txt2PdfError::OutputIsInput {
            path: output.to_path_buf(),
        });
    }
    Ok(())
}

/// Read the full input into memory.
pub async fn read_input(path: &Path) -> Result<Vec<u8>, Txt2PdfError> {
    tokio::fs::read(path).await.map_err(|source| match source.kind() {
        ErrorKind::NotFound => Txt2PdfError::InputNotFound {
            path: path.to_path_buf(),
        },
        ErrorKind::PermissionDenied => Txt2PdfError::PermissionDenied {
            path: path.to_path_buf(),
        },
        _ => Txt2PdfError::InputReadFailed {
            path: path.to_path_buf(),
            source,
        },
    })
}

/// Create every missing parent directory of `output`.
///
/// A bare file name has an empty parent, meaning the current directory,
/// which always exists.
pub async fn ensure_parent_dir(output: &Path) -> Result<(), Txt2PdfError> {
    let Some(dir) = output.parent().filter(|d| !d.as_os_str().is_empty()) else {
        return Ok(());
    };

    tokio::fs::create_dir_all(dir)
        .await
        .map_err(|source| Txt2PdfError::OutputDirFailed {
            dir: dir.to_path_buf(),
            source,
        })?;
    debug!("Output directory ready: {}", dir.display());
    Ok(())
}

/// Default document title: the input file stem, falling back to "Document".
pub fn default_title(input: &Path) -> String {
    input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "Document".to_string())
}
