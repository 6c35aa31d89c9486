//! Output writing: stale-file removal and the scoped write session.
//!
//! ## Write session
//!
//! The document is written to a temporary sibling of the output path, flushed,
//! synced, and then renamed over the destination. The temporary file is owned
//! by a [`tempfile::TempPath`], which deletes it on drop, so every early return
//! (write error, sync error, failed rename) cleans up after itself and a
//! half-written file never appears under the final name.
//!
//! ## Stale output
//!
//! A previous document at the output path is removed first, best-effort. A
//! file held open by a viewer or a sync client may refuse removal; that is
//! not fatal on its own because the rename will hit the same lock and fail
//! loudly. The removal error is carried forward as a [`StaleRemoval`] so the
//! write error can mention it.

use crate::error::Txt2PdfError;
use std::io::ErrorKind;
use std::path::Path;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info, warn};

/// A non-fatal failure to remove the previous output file.
#[derive(Debug)]
pub struct StaleRemoval {
    pub error: std::io::Error,
}

/// Remove `path` if it exists. Returns the error if removal failed for any
/// reason other than the file being absent.
pub async fn remove_stale_output(path: &Path) -> Option<StaleRemoval> {
    match tokio::fs::remove_file(path).await {
        Ok(()) => {
            debug!("Removed previous output: {}", path.display());
            None
        }
        Err(e) if e.kind() == ErrorKind::NotFound => None,
        Err(error) => {
            warn!(
                "Could not remove previous output '{}': {} (continuing)",
                path.display(),
                error
            );
            Some(StaleRemoval { error })
        }
    }
}

/// Write `pdf` to `path` through a temporary sibling file.
///
/// Returns the number of bytes written.
pub async fn write_document(
    path: &Path,
    pdf: &[u8],
    stale: Option<StaleRemoval>,
) -> Result<u64, Txt2PdfError> {
    let stale_removal = stale.map(|s| s.error.to_string());
    let fail = |source: std::io::Error| Txt2PdfError::OutputWriteFailed {
        path: path.to_path_buf(),
        source,
        stale_removal: stale_removal.clone(),
    };

    let dir = path
        .parent()
        .filter(|d| !d.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    let tmp = tempfile::Builder::new()
        .prefix(".txt2pdf-")
        .suffix(".tmp")
        .tempfile_in(dir)
        .map_err(fail)?;
    let (file, tmp_path) = tmp.into_parts();
    debug!("Write session opened: {}", tmp_path.display());

    let mut file = tokio::fs::File::from_std(file);
    file.write_all(pdf).await.map_err(fail)?;
    file.flush().await.map_err(fail)?;
    file.sync_all().await.map_err(fail)?;
    drop(file);

    tmp_path.persist(path).map_err(|e| fail(e.error))?;

    info!("Wrote {} bytes to {}", pdf.len(), path.display());
    Ok(pdf.len() as u64)
}
