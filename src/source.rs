//! Background acquisition: the only nondeterministic, blocking part.
//!
//! Two strategies, both returning a decoded raster:
//! - [`fetch_remote`]: GET a random stock photo from picsum.photos with a
//!   bounded retry loop. A non-success HTTP status is treated exactly like a
//!   transport error for retry purposes.
//! - [`largest_in_dir`]: non-recursive scan of a local directory, picking the
//!   largest image file by byte size. Undecodable candidates are skipped in
//!   favor of the next-largest, so one corrupt file does not sink the run.
//!
//! Everything downstream of this module is deterministic; tests feed the
//! composition core fixture images instead.

use image::DynamicImage;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Stock photo endpoint, already sized to the output canvas.
const REMOTE_ENDPOINT: &str = "https://picsum.photos/1000/350";
/// Bounded retry budget for the remote fetch.
const FETCH_ATTEMPTS: u32 = 3;
/// Extensions considered when scanning a directory.
const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png"];

#[derive(Error, Debug)]
pub enum SourceError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Fetching {url} failed after {attempts} attempts: {last}")]
    FetchFailed {
        url: String,
        attempts: u32,
        last: String,
    },
    #[error("Failed to decode {0}: {1}")]
    Decode(String, String),
    #[error("No decodable image files in {0}")]
    NoImages(PathBuf),
}

/// Fetch a random background photo from the remote endpoint.
///
/// Retries up to [`FETCH_ATTEMPTS`] times; transport errors and non-2xx
/// statuses are retried identically. The decode of a successfully fetched
/// body is not retried.
pub fn fetch_remote() -> Result<DynamicImage, SourceError> {
    fetch_from(REMOTE_ENDPOINT)
}

fn fetch_from(url: &str) -> Result<DynamicImage, SourceError> {
    let agent: ureq::Agent = ureq::Agent::config_builder()
        .timeout_global(Some(Duration::from_secs(30)))
        .build()
        .into();

    let mut last = String::new();
    for attempt in 1..=FETCH_ATTEMPTS {
        match try_fetch(&agent, url) {
            Ok(bytes) => {
                return image::load_from_memory(&bytes)
                    .map_err(|e| SourceError::Decode(url.to_string(), e.to_string()));
            }
            Err(e) => {
                last = e;
                if attempt < FETCH_ATTEMPTS {
                    println!("Fetch attempt {attempt}/{FETCH_ATTEMPTS} failed: {last}, retrying");
                }
            }
        }
    }

    Err(SourceError::FetchFailed {
        url: url.to_string(),
        attempts: FETCH_ATTEMPTS,
        last,
    })
}

/// One fetch attempt. Collapses transport and status failures into a single
/// retryable error string.
fn try_fetch(agent: &ureq::Agent, url: &str) -> Result<Vec<u8>, String> {
    let mut response = agent.get(url).call().map_err(|e| e.to_string())?;
    if !response.status().is_success() {
        return Err(format!("unexpected status {}", response.status()));
    }
    response
        .body_mut()
        .read_to_vec()
        .map_err(|e| e.to_string())
}

/// Pick the largest image file in `dir` (by byte size) and decode it.
///
/// Non-recursive; only [`IMAGE_EXTENSIONS`] are considered. Files whose
/// metadata cannot be read or that fail to decode are skipped.
pub fn largest_in_dir(dir: &Path) -> Result<DynamicImage, SourceError> {
    let mut candidates: Vec<(u64, PathBuf)> = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if !path.is_file() || !has_image_extension(&path) {
            continue;
        }
        let Ok(meta) = entry.metadata() else { continue };
        candidates.push((meta.len(), path));
    }

    // Largest first; the first candidate that decodes wins
    candidates.sort_by(|a, b| b.0.cmp(&a.0));
    for (_, path) in candidates {
        if let Ok(img) = image::open(&path) {
            return Ok(img);
        }
    }

    Err(SourceError::NoImages(dir.to_path_buf()))
}

fn has_image_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| {
            IMAGE_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
}
