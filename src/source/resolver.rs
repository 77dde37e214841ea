//! Locating the legacy database.
//!
//! The migrate command runs from either the frontend or the backend project
//! directory, so the connection settings are probed rather than assumed: an
//! ordered chain of candidates is tried until one connects.

use std::future::Future;
use std::path::{Path, PathBuf};
use std::time::Duration;

use futures::future::BoxFuture;

use super::SqlSource;
use crate::config::{Config, SOURCE_URL_VAR};
use crate::errors::AppError;

/// Keys read from a candidate `.env` file, in order of preference.
pub const SOURCE_URL_KEYS: [&str; 2] = [SOURCE_URL_VAR, "DATABASE_URL"];

type ConnectorFactory<S> = Box<dyn Fn() -> BoxFuture<'static, Result<S, AppError>> + Send + Sync>;

/// One place the legacy database settings might live.
pub struct Candidate<S = SqlSource> {
    label: String,
    connect: ConnectorFactory<S>,
}

impl<S: 'static> Candidate<S> {
    pub fn new<F, Fut>(label: impl Into<String>, connect: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<S, AppError>> + Send + 'static,
    {
        Self {
            label: label.into(),
            connect: Box::new(move || -> BoxFuture<'static, Result<S, AppError>> {
                Box::pin(connect())
            }),
        }
    }
}

impl<S> Candidate<S> {
    pub fn label(&self) -> &str {
        &self.label
    }
}

impl Candidate<SqlSource> {
    /// Candidate reading the database URL from a dotenv file.
    pub fn env_file(label: impl Into<String>, path: PathBuf, timeout: Duration) -> Self {
        Self::new(label, move || {
            let path = path.clone();
            async move {
                let url = url_from_env_file(&path)?;
                SqlSource::connect(&url, timeout).await
            }
        })
    }

    /// Candidate using an explicitly configured URL.
    pub fn direct(url: Option<String>, timeout: Duration) -> Self {
        Self::new("direct lookup", move || {
            let url = url.clone();
            async move {
                let url = url.ok_or_else(|| {
                    AppError::Source(format!("{} is not set", SOURCE_URL_VAR))
                })?;
                SqlSource::connect(&url, timeout).await
            }
        })
    }
}

/// Ordered chain of candidates; the first that connects wins.
pub struct SourceResolver<S = SqlSource> {
    candidates: Vec<Candidate<S>>,
}

impl<S> SourceResolver<S> {
    pub fn new(candidates: Vec<Candidate<S>>) -> Self {
        Self { candidates }
    }

    pub fn candidates(&self) -> impl Iterator<Item = &str> {
        self.candidates.iter().map(|c| c.label())
    }

    /// Try each candidate in order.
    pub async fn resolve(&self) -> Result<S, AppError> {
        let mut attempts = Vec::with_capacity(self.candidates.len());

        for candidate in &self.candidates {
            match (candidate.connect)().await {
                Ok(source) => {
                    tracing::info!("Legacy database resolved via {}", candidate.label);
                    return Ok(source);
                }
                Err(e) => {
                    tracing::debug!("Candidate {} failed: {}", candidate.label, e.message());
                    attempts.push(format!("{}: {}", candidate.label, e.message()));
                }
            }
        }

        Err(AppError::SourceUnavailable {
            attempts,
            remediation: remediation(),
        })
    }
}

impl SourceResolver<SqlSource> {
    /// The standard chain: working tree, sibling backend project, install
    /// location, then the configured URL.
    pub fn standard(config: &Config) -> Self {
        let timeout = config.source_timeout;
        let mut candidates = Vec::new();

        if let Ok(cwd) = std::env::current_dir() {
            candidates.push(Candidate::env_file(
                "working tree",
                cwd.join(".env"),
                timeout,
            ));
            candidates.push(Candidate::env_file(
                "sibling backend project",
                cwd.join("..").join("backend").join(".env"),
                timeout,
            ));
        }

        if let Some(dir) = std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(Path::to_path_buf))
        {
            candidates.push(Candidate::env_file("install location", dir.join(".env"), timeout));
        }

        candidates.push(Candidate::direct(config.source_url.clone(), timeout));

        Self::new(candidates)
    }
}

fn remediation() -> String {
    format!(
        "Set {var} to the legacy SQLite database (for example {var}=sqlite:///srv/estate/legacy.db) \
         in the environment or with --source-url, or add it to .env in the current directory \
         or in ../backend/.env.",
        var = SOURCE_URL_VAR
    )
}

/// Read the database URL from a dotenv file without touching the process
/// environment. Relative SQLite paths are anchored at the file's directory.
fn url_from_env_file(path: &Path) -> Result<String, AppError> {
    if !path.is_file() {
        return Err(AppError::Source(format!("no file at {}", path.display())));
    }

    let entries = dotenvy::from_path_iter(path)
        .map_err(|e| AppError::Source(format!("cannot read {}: {}", path.display(), e)))?;

    let mut found: Option<(usize, String)> = None;
    for entry in entries {
        let (key, value) = entry
            .map_err(|e| AppError::Source(format!("cannot parse {}: {}", path.display(), e)))?;
        if let Some(rank) = SOURCE_URL_KEYS.iter().position(|k| *k == key) {
            if found.as_ref().map_or(true, |(best, _)| rank < *best) {
                found = Some((rank, value));
            }
        }
    }

    let (_, url) = found.ok_or_else(|| {
        AppError::Source(format!(
            "{} does not define {}",
            path.display(),
            SOURCE_URL_KEYS.join(" or ")
        ))
    })?;

    let base = path.parent().unwrap_or_else(|| Path::new("."));
    Ok(anchor_sqlite_url(&url, base))
}

/// Rewrite a SQLite URL with a relative path so it is relative to `base`.
pub fn anchor_sqlite_url(url: &str, base: &Path) -> String {
    let Some(rest) = url.strip_prefix("sqlite:") else {
        return url.to_string();
    };
    let rest = rest.strip_prefix("//").unwrap_or(rest);
    let (file, query) = match rest.split_once('?') {
        Some((file, query)) => (file, Some(query)),
        None => (rest, None),
    };

    if file.is_empty() || file == ":memory:" || Path::new(file).is_absolute() {
        return url.to_string();
    }

    let anchored = base.join(file);
    match query {
        Some(query) => format!("sqlite://{}?{}", anchored.display(), query),
        None => format!("sqlite://{}", anchored.display()),
    }
}
