//! Resource file downloading.

use std::path::{Path, PathBuf};
use std::time::Duration;

use futures::StreamExt;
use reqwest::Response;
use tokio::fs::File;
use tokio::io::{AsyncWriteExt, BufWriter};

use crate::error::{Error, Result};
use crate::fs::{filename_from_url, partial_path, ClaimRegistry};
use crate::moodle::ResourceLink;
use crate::pool::{Outcome, SkipReason};
use crate::session::MoodleSession;

/// Write buffer size for streamed bodies (512 KiB).
pub const CHUNK_SIZE: usize = 512 * 1024;

/// A file written to a course directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadedFile {
    pub path: PathBuf,
    pub bytes: u64,
}

/// Per-link download settings.
#[derive(Debug, Clone)]
pub struct DownloadOptions {
    /// Substring a link path must contain to be fetched.
    pub resource_marker: String,
}

/// Download one section link into `course_dir`.
///
/// Never returns an error: fetch and write failures are logged and reported as
/// [`Outcome::Failed`] so the rest of the batch carries on.
pub async fn download_resource(
    session: &MoodleSession,
    link: &ResourceLink,
    course_dir: &Path,
    options: &DownloadOptions,
    claims: &ClaimRegistry,
) -> Outcome<DownloadedFile> {
    // Checking only resources, forums and folders are ignored
    if !link.is_resource(&options.resource_marker) {
        return Outcome::Skipped(SkipReason::NotAResource);
    }

    tracing::info!("Downloading {}", link);
    let response = match session.fetch_resource(&link.href).await {
        Ok(response) => response,
        Err(e) => {
            tracing::warn!("Could not download link {}. Error {}", link, e);
            return Outcome::Failed(e.to_string());
        }
    };

    // The link is usually a redirecting view endpoint, the final URL has the real name
    let file_name = match filename_from_url(response.url()) {
        Ok(name) => name,
        Err(e) => {
            tracing::warn!("Could not download link {}. Error {}", link, e);
            return Outcome::Failed(e.to_string());
        }
    };
    let target = course_dir.join(&file_name);

    let Some(_claim) = claims.try_claim(&target) else {
        tracing::info!("File already being downloaded : {}", file_name);
        return Outcome::Skipped(SkipReason::AlreadyClaimed);
    };

    match tokio::fs::try_exists(&target).await {
        Ok(true) => {
            tracing::info!("File found : {}", file_name);
            return Outcome::Skipped(SkipReason::AlreadyExists);
        }
        Ok(false) => {}
        Err(e) => {
            tracing::warn!("Could not check {}. Error {}", target.display(), e);
            return Outcome::Failed(e.to_string());
        }
    }

    tracing::info!("Creating file : {}", file_name);
    match write_body(response, &target, session.download_timeout()).await {
        Ok(bytes) => Outcome::Done(DownloadedFile {
            path: target,
            bytes,
        }),
        Err(e) => {
            tracing::warn!("Could not write {}. Error {}", target.display(), e);
            Outcome::Failed(e.to_string())
        }
    }
}

/// Stream a response body to `target`.
///
/// The body goes to a partial file first and is renamed into place only once
/// complete, so `target` never holds a truncated download. The transfer fails
/// only when no chunk arrives for `stall_timeout`.
async fn write_body(response: Response, target: &Path, stall_timeout: Duration) -> Result<u64> {
    let partial = partial_path(target);

    let written = match stream_to_file(response, &partial, stall_timeout).await {
        Ok(written) => written,
        Err(e) => {
            discard(&partial).await;
            return Err(e);
        }
    };

    if let Err(e) = tokio::fs::rename(&partial, target).await {
        discard(&partial).await;
        return Err(Error::Io(e));
    }

    Ok(written)
}

async fn stream_to_file(response: Response, path: &Path, stall_timeout: Duration) -> Result<u64> {
    let file = File::create(path).await?;
    let mut writer = BufWriter::with_capacity(CHUNK_SIZE, file);
    let mut stream = response.bytes_stream();
    let mut written: u64 = 0;

    loop {
        let next = tokio::time::timeout(stall_timeout, stream.next())
            .await
            .map_err(|_| {
                Error::Timeout(format!(
                    "no data for {:?} after {} bytes",
                    stall_timeout, written
                ))
            })?;

        let Some(chunk) = next else {
            break;
        };
        let chunk = chunk.map_err(|e| Error::Download(format!("Stream error: {}", e)))?;

        // Filter out keep-alive chunks
        if chunk.is_empty() {
            continue;
        }

        writer.write_all(&chunk).await?;
        written += chunk.len() as u64;
    }

    writer.flush().await?;

    Ok(written)
}

async fn discard(path: &Path) {
    if let Err(e) = tokio::fs::remove_file(path).await {
        tracing::debug!("Could not remove partial file {}: {}", path.display(), e);
    }
}
