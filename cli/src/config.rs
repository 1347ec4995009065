use anyhow::Context;
use std::path::Path;
use std::path::PathBuf;
use studio_catalog::factory;
use studio_catalog::factory::Backend;
use studio_perf::AdvisorConfig;

/// Looked up in the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "studio.toml";

/// Overrides `[catalog] dir`.
pub const CATALOG_DIR_ENV: &str = "STUDIO_CATALOG_DIR";

#[derive(Debug, Clone, Default, PartialEq, serde::Deserialize)]
#[serde(default)]
pub struct StudioConfig {
    pub catalog: CatalogSection,
    pub contact: ContactSection,
    pub performance: AdvisorConfig,
}

#[derive(Debug, Clone, PartialEq, serde::Deserialize)]
#[serde(default)]
pub struct CatalogSection {
    pub backend: Backend,
    pub dir: PathBuf,
}

impl Default for CatalogSection {
    fn default() -> Self {
        Self {
            backend: Backend::default(),
            dir: PathBuf::from(".studio"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, serde::Deserialize)]
#[serde(default)]
pub struct ContactSection {
    /// JSONL file receiving submissions. Unset means log only.
    pub outbox: Option<PathBuf>,
}

impl StudioConfig {
    /// Read `path`, or `studio.toml` if present, then apply environment
    /// overrides. A missing default file is not an error.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let mut config = match path {
            Some(p) => Self::from_file(p)?,
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
                Self::from_file(Path::new(DEFAULT_CONFIG_FILE))?
            }
            None => Self::default(),
        };
        config.apply_env();
        Ok(config)
    }

    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let data = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config = toml::from_str(&data)
            .with_context(|| format!("parsing config {}", path.display()))?;
        tracing::debug!("loaded config from {}", path.display());
        Ok(config)
    }

    fn apply_env(&mut self) {
        if let Some(be) = factory::backend_from_env() {
            self.catalog.backend = be;
        }
        if let Ok(dir) = std::env::var(CATALOG_DIR_ENV) {
            self.catalog.dir = PathBuf::from(dir);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_file_is_all_defaults() {
        let config: StudioConfig = toml::from_str("").unwrap();
        assert_eq!(config, StudioConfig::default());
        assert_eq!(config.catalog.backend, Backend::Jsonl);
    }

    #[test]
    fn sections_parse() {
        let config: StudioConfig = toml::from_str(
            r#"
            [catalog]
            backend = "memory"
            dir = "/srv/studio"

            [contact]
            outbox = "/srv/studio/outbox.jsonl"

            [performance]
            low_fps = 40
            "#,
        )
        .unwrap();
        assert_eq!(config.catalog.backend, Backend::Memory);
        assert_eq!(config.catalog.dir, PathBuf::from("/srv/studio"));
        assert_eq!(
            config.contact.outbox,
            Some(PathBuf::from("/srv/studio/outbox.jsonl"))
        );
        assert_eq!(config.performance.low_fps, 40);
        assert_eq!(config.performance.medium_fps, 55);
    }
}
