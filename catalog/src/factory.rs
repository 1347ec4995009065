use crate::store::ProjectStore;
use crate::store::jsonl::JsonlProjectStore;
use crate::store::memory::InMemoryProjectStore;
use crate::types::Project;
use std::path::Path;
use std::path::PathBuf;

#[cfg(feature = "sqlite")]
use crate::store::sqlite::SqliteProjectStore;

/// Backend selection for project persistence.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    serde::Serialize,
    serde::Deserialize,
    strum_macros::Display,
    strum_macros::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Backend {
    Memory,
    #[default]
    Jsonl,
    Sqlite,
}

pub const BACKEND_ENV: &str = "STUDIO_CATALOG_BACKEND";
pub const JSONL_PATH_ENV: &str = "STUDIO_CATALOG_JSONL";
pub const DB_PATH_ENV: &str = "STUDIO_CATALOG_DB";

/// Backend named by `STUDIO_CATALOG_BACKEND`, if set to a known value.
pub fn backend_from_env() -> Option<Backend> {
    let v = std::env::var(BACKEND_ENV).ok()?;
    match v.parse() {
        Ok(be) => Some(be),
        Err(_) => {
            tracing::warn!("{BACKEND_ENV}={v} is not a known backend; ignoring");
            None
        }
    }
}

/// Build a store rooted in `dir`.
/// Paths can be overridden via env:
/// - `STUDIO_CATALOG_JSONL` for the JSONL file path
/// - `STUDIO_CATALOG_DB` for the SQLite file path
///
/// Asking for SQLite without the `sqlite` feature falls back to JSONL.
pub fn open_store(dir: &Path, backend: Backend) -> anyhow::Result<Box<dyn ProjectStore>> {
    Ok(match backend {
        Backend::Memory => Box::new(InMemoryProjectStore::new()),
        Backend::Jsonl => Box::new(JsonlProjectStore::new(jsonl_path(dir))),
        #[cfg(feature = "sqlite")]
        Backend::Sqlite => {
            let path = std::env::var(DB_PATH_ENV)
                .map(PathBuf::from)
                .unwrap_or_else(|_| dir.join("catalog.db"));
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            Box::new(SqliteProjectStore::new(path))
        }
        #[cfg(not(feature = "sqlite"))]
        Backend::Sqlite => {
            tracing::warn!("sqlite backend not compiled; using jsonl");
            Box::new(JsonlProjectStore::new(jsonl_path(dir)))
        }
    })
}

fn jsonl_path(dir: &Path) -> PathBuf {
    std::env::var(JSONL_PATH_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|_| dir.join("catalog.jsonl"))
}

/// Rewrite a JSONL file into `output`, dropping blank or unreadable lines
/// and collapsing repeated ids (the last line for an id wins, at the
/// position of its first appearance). Returns `(read, written)`.
pub fn compact_jsonl(input: &Path, output: &Path) -> anyhow::Result<(usize, usize)> {
    let data = match std::fs::read_to_string(input) {
        Ok(s) => s,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => String::new(),
        Err(e) => return Err(e.into()),
    };
    let mut read = 0usize;
    let mut kept: Vec<Project> = Vec::new();
    for line in data.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        read += 1;
        let Ok(project) = serde_json::from_str::<Project>(line) else {
            tracing::debug!("compact: dropping unreadable line {read}");
            continue;
        };
        match kept.iter_mut().find(|p| p.id == project.id) {
            Some(slot) => *slot = project,
            None => kept.push(project),
        }
    }
    let mut out = String::new();
    for project in &kept {
        out.push_str(&serde_json::to_string(project)?);
        out.push('\n');
    }
    if let Some(dir) = output.parent() {
        std::fs::create_dir_all(dir)?;
    }
    std::fs::write(output, out)?;
    Ok((read, kept.len()))
}
