use reqwest::StatusCode;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::info;

use crate::error::ScrapeError;

pub const DISCOVER_URL: &str = "https://chuffed.org/discover";

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Where the discovery page HTML comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageSource {
    Url(String),
    File(PathBuf),
}

impl PageSource {
    pub fn load(&self) -> Result<String, ScrapeError> {
        match self {
            PageSource::Url(url) => fetch_page(url),
            PageSource::File(path) => read_page(path),
        }
    }
}

/// Single GET; anything other than 200 is a failure. No retries.
pub fn fetch_page(url: &str) -> Result<String, ScrapeError> {
    let start_time = Instant::now();
    info!(action = "start", component = "fetch", url = url, "Fetching page");

    let client = reqwest::blocking::Client::builder()
        .user_agent(USER_AGENT)
        .build()?;
    let response = client.get(url).send()?;

    let status = response.status();
    if status != StatusCode::OK {
        return Err(ScrapeError::HttpStatus { status });
    }

    let body = response.text()?;
    info!(
        action = "complete",
        component = "fetch",
        status = status.as_u16(),
        body_bytes = body.len(),
        duration_ms = start_time.elapsed().as_millis(),
        "Page fetched"
    );
    Ok(body)
}

pub fn read_page(path: &Path) -> Result<String, ScrapeError> {
    info!(action = "load", component = "fetch", file_path = ?path, "Reading page from file");
    Ok(fs::read_to_string(path)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_page_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("discover.html");
        fs::write(&path, "<html></html>").unwrap();

        let source = PageSource::File(path);
        assert_eq!(source.load().unwrap(), "<html></html>");
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let source = PageSource::File(dir.path().join("missing.html"));
        let err = source.load().unwrap_err();
        assert!(matches!(err, ScrapeError::Io(_)));
        assert!(!err.aborts_quietly());
    }

    #[test]
    fn invalid_url_is_transport_error() {
        let err = fetch_page("not a url").unwrap_err();
        assert!(matches!(err, ScrapeError::Http(_)));
        assert!(err.aborts_quietly());
    }
}
