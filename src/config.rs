use std::path::{Path, PathBuf};

use anyhow::{Result, bail};
use serde::Deserialize;
use sha2::{Digest, Sha256};

use crate::parsers::{ClassNames, RecordKind};

/// One activity document inside an export.
#[derive(Debug, Deserialize, Clone)]
pub struct DocumentConfig {
    pub id: String,
    pub kind: RecordKind,
    pub path: PathBuf,
}

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub run_id: String,
    #[serde(default)]
    pub classes: ClassNames,
    pub documents: Vec<DocumentConfig>,
}

#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config: Config,
    pub config_hash: String,
}

pub fn load_config(path: Option<&Path>) -> Result<LoadedConfig> {
    let bytes: Vec<u8> = if let Some(p) = path {
        std::fs::read(p)?
    } else {
        include_bytes!("../config/default.yml").to_vec()
    };

    let mut config: Config = serde_yaml::from_slice(&bytes)?;
    if config.run_id.trim().is_empty() {
        config.run_id = generate_run_id();
    }
    validate(&config)?;

    let config_hash = hash_bytes(&bytes);

    Ok(LoadedConfig { config, config_hash })
}

fn validate(config: &Config) -> Result<()> {
    let classes = &config.classes;
    for (label, value) in [
        ("record_container", &classes.record_container),
        ("title", &classes.title),
        ("action", &classes.action),
    ] {
        if value.trim().is_empty() {
            bail!("classes.{label} must not be empty");
        }
    }
    let mut seen = std::collections::HashSet::new();
    for doc in &config.documents {
        if !seen.insert(doc.id.as_str()) {
            bail!("duplicate document id in config: {}", doc.id);
        }
        if doc.path.is_absolute() {
            bail!("document {} path must be relative to the export root", doc.id);
        }
    }
    Ok(())
}

fn hash_bytes(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    let digest = hasher.finalize();
    hex::encode(digest)
}

fn generate_run_id() -> String {
    let now = chrono::Utc::now();
    format!("{}_{}", now.format("%Y%m%dT%H%M%SZ"), rand_suffix())
}

fn rand_suffix() -> String {
    use std::time::{SystemTime, UNIX_EPOCH};
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos())
        .unwrap_or(0);
    format!("{:08x}", nanos)
}
