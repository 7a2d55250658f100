//! Fetching `data.json`.
//!
//! One request, no retry, no cache. A missing file and an HTTP error status
//! are both "non-success" responses; a document that does not parse is a
//! parse failure. Either way the caller gets a [`LoadError`] and nothing is
//! rendered.

use crate::types::PageData;
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Could not load data: {0} not found")]
    NotFound(String),
    #[error("Could not load data: {url} returned HTTP {status}")]
    Status { url: String, status: u16 },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl LoadError {
    /// The response status equivalent of this failure, when there is one.
    ///
    /// A missing local file reports as 404.
    pub fn status(&self) -> Option<u16> {
        match self {
            LoadError::NotFound(_) => Some(404),
            LoadError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Where the page document comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    File(PathBuf),
    Url(String),
}

impl DataSource {
    /// Interpret a `--data` argument: `http://` and `https://` are URLs,
    /// anything else is a path relative to the site directory.
    pub fn parse(arg: &str, site_dir: &Path) -> Self {
        if arg.starts_with("http://") || arg.starts_with("https://") {
            DataSource::Url(arg.to_string())
        } else {
            DataSource::File(site_dir.join(arg))
        }
    }

    /// The configured data file inside the site directory.
    pub fn in_site(site_dir: &Path, data_file: &str) -> Self {
        DataSource::File(site_dir.join(data_file))
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSource::File(path) => write!(f, "{}", path.display()),
            DataSource::Url(url) => f.write_str(url),
        }
    }
}

/// Fetch and parse the page document.
pub fn load(source: &DataSource) -> Result<PageData, LoadError> {
    let body = match source {
        DataSource::File(path) => read_file(path)?,
        DataSource::Url(url) => fetch_url(url)?,
    };
    Ok(parse(&body)?)
}

/// Parse a `data.json` body.
pub fn parse(body: &str) -> Result<PageData, serde_json::Error> {
    serde_json::from_str(body)
}

fn read_file(path: &Path) -> Result<String, LoadError> {
    match std::fs::read_to_string(path) {
        Ok(body) => Ok(body),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(LoadError::NotFound(path.display().to_string()))
        }
        Err(e) => Err(LoadError::Io(e)),
    }
}

fn fetch_url(url: &str) -> Result<String, LoadError> {
    tracing::debug!(url, "fetching page data");
    let response = reqwest::blocking::get(url)?;
    if !response.status().is_success() {
        return Err(LoadError::Status {
            url: url.to_string(),
            status: response.status().as_u16(),
        });
    }
    Ok(response.text()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::io::{BufRead, BufReader, Write};
    use std::net::TcpListener;
    use std::thread;
    use tempfile::TempDir;

    #[test]
    fn load_reads_local_file() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("data.json"),
            r#"{ "profile": { "name": "Alex" } }"#,
        )
        .unwrap();

        let data = load(&DataSource::in_site(tmp.path(), "data.json")).unwrap();
        assert_eq!(data.profile.unwrap().name.as_deref(), Some("Alex"));
    }

    #[test]
    fn missing_file_is_not_found_with_404() {
        let tmp = TempDir::new().unwrap();
        let err = load(&DataSource::in_site(tmp.path(), "data.json")).unwrap_err();
        assert!(matches!(err, LoadError::NotFound(_)));
        assert_eq!(err.status(), Some(404));
        assert!(err.to_string().starts_with("Could not load data"));
    }

    #[test]
    fn malformed_json_is_parse_failure() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("data.json"), "{ not json").unwrap();

        let err = load(&DataSource::in_site(tmp.path(), "data.json")).unwrap_err();
        assert!(matches!(err, LoadError::Json(_)));
        assert_eq!(err.status(), None);
    }

    #[test]
    fn wrong_shape_is_parse_failure() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("data.json"), r#"{ "links": "nope" }"#).unwrap();

        let err = load(&DataSource::in_site(tmp.path(), "data.json")).unwrap_err();
        assert!(matches!(err, LoadError::Json(_)));
    }

    /// Serve a single HTTP response on a local port; returns the data URL.
    fn serve_once(status_line: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut reader = BufReader::new(stream.try_clone().unwrap());
            let mut line = String::new();
            while reader.read_line(&mut line).unwrap() > 0 && line != "\r\n" {
                line.clear();
            }
            write!(
                stream,
                "HTTP/1.1 {status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            )
            .unwrap();
        });
        format!("http://{addr}/data.json")
    }

    #[test]
    fn http_error_status_is_load_failure() {
        let url = serve_once("404 Not Found", "");
        let err = load(&DataSource::Url(url.clone())).unwrap_err();
        assert!(matches!(err, LoadError::Status { status: 404, .. }));
        assert_eq!(err.status(), Some(404));
        assert!(err.to_string().contains(&url));
    }

    #[test]
    fn http_success_is_parsed() {
        let url = serve_once("200 OK", r#"{ "profile": { "name": "Remote" } }"#);
        let data = load(&DataSource::Url(url)).unwrap();
        assert_eq!(data.profile.unwrap().name.as_deref(), Some("Remote"));
    }

    #[test]
    fn data_source_parse_distinguishes_urls() {
        let site = Path::new("/site");
        assert_eq!(
            DataSource::parse("https://example.com/data.json", site),
            DataSource::Url("https://example.com/data.json".to_string())
        );
        assert_eq!(
            DataSource::parse("other.json", site),
            DataSource::File(PathBuf::from("/site/other.json"))
        );
    }
}
