//! Snapshot loader — one best-effort fetch per app life.
//!
//! Success requires a 2xx response (or a readable file) AND a structural
//! parse of the body. The error variants exist for the tracing log only;
//! callers collapse every failure into the same user-visible fallback.

use std::path::PathBuf;

use thiserror::Error;

use crate::snapshot::Snapshot;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("snapshot request failed: {0}")]
    Network(#[from] reqwest::Error),
    #[error("snapshot endpoint returned status {0}")]
    Http(reqwest::StatusCode),
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("malformed snapshot: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Fetch and parse the snapshot. `source` is an http(s) URL or a local file
/// path. Idempotent; no side effect beyond the request itself.
pub async fn load(source: &str) -> Result<Snapshot, LoadError> {
    let body = if source.starts_with("http://") || source.starts_with("https://") {
        fetch_remote(source).await?
    } else {
        read_local(source).await?
    };
    Ok(serde_json::from_str(&body)?)
}

async fn fetch_remote(url: &str) -> Result<String, LoadError> {
    let client = reqwest::Client::new();
    let response = client
        .get(url)
        .header("Accept", "application/json")
        .send()
        .await?;

    if !response.status().is_success() {
        return Err(LoadError::Http(response.status()));
    }

    Ok(response.text().await?)
}

async fn read_local(path: &str) -> Result<String, LoadError> {
    tokio::fs::read_to_string(path)
        .await
        .map_err(|source| LoadError::Io {
            path: PathBuf::from(path),
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(content: &str) -> tempfile::NamedTempFile {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(content.as_bytes()).unwrap();
        f
    }

    #[tokio::test]
    async fn loads_local_snapshot() {
        let f = write_temp(r#"{ "days": [] }"#);
        let snap = load(f.path().to_str().unwrap()).await.unwrap();
        assert!(snap.days.is_empty());
    }

    #[tokio::test]
    async fn malformed_body_classifies_as_parse() {
        let f = write_temp("{ not json");
        let err = load(f.path().to_str().unwrap()).await.unwrap_err();
        assert!(matches!(err, LoadError::Parse(_)));
    }

    #[tokio::test]
    async fn structurally_wrong_body_classifies_as_parse() {
        // Valid JSON, wrong shape: a day with no channel list.
        let f = write_temp(r#"{ "days": [{ "date": "2026-01-01" }] }"#);
        let err = load(f.path().to_str().unwrap()).await.unwrap_err();
        assert!(matches!(err, LoadError::Parse(_)));
    }

    #[tokio::test]
    async fn missing_file_classifies_as_io() {
        let err = load("/nonexistent/data.json").await.unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
    }
}
