//! Server configuration

use clap::Parser;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use textcat_model::{ArtifactPaths, PreprocessConfig};

/// Command line interface
#[derive(Parser, Debug)]
#[command(name = "textcat-server")]
#[command(about = "TextCat text classification server", long_about = None)]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "config.yaml")]
    pub config: String,

    /// Listen address
    #[arg(short, long)]
    pub listen: Option<String>,

    /// Listen port
    #[arg(short = 'P', long)]
    pub port: Option<u16>,

    /// Directory holding classifier.json, vectorizer.json, labels.json
    #[arg(short, long)]
    pub artifacts_dir: Option<PathBuf>,

    /// Load artifacts eagerly at startup
    #[arg(short, long)]
    pub warm_up: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Listen address
    #[serde(default = "default_listen")]
    pub listen: String,

    /// Listen port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Artifact file locations
    #[serde(default)]
    pub artifacts: ArtifactsConfig,

    /// Preprocessing stage toggles; must match the training-time setup
    #[serde(default)]
    pub preprocess: PreprocessConfig,

    /// Load artifacts eagerly at startup instead of on the first request
    #[serde(default)]
    pub warm_up: bool,
}

/// Locations of the three trained artifacts
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtifactsConfig {
    #[serde(default = "default_classifier_path")]
    pub classifier: PathBuf,

    #[serde(default = "default_vectorizer_path")]
    pub vectorizer: PathBuf,

    #[serde(default = "default_labels_path")]
    pub labels: PathBuf,
}

impl Default for ArtifactsConfig {
    fn default() -> Self {
        Self {
            classifier: default_classifier_path(),
            vectorizer: default_vectorizer_path(),
            labels: default_labels_path(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from file and CLI overrides
    pub fn load(config_path: &str, cli: &Cli) -> anyhow::Result<Self> {
        // Try to load from file, or use defaults
        let mut config: Self = if Path::new(config_path).exists() {
            let content = std::fs::read_to_string(config_path)?;
            serde_yaml::from_str(&content)?
        } else {
            Self::default()
        };

        // Apply CLI overrides
        if let Some(listen) = &cli.listen {
            config.listen = listen.clone();
        }
        if let Some(port) = cli.port {
            config.port = port;
        }
        if let Some(dir) = &cli.artifacts_dir {
            let paths = ArtifactPaths::in_dir(dir);
            config.artifacts.classifier = paths.classifier;
            config.artifacts.vectorizer = paths.vectorizer;
            config.artifacts.labels = paths.labels;
        }
        if cli.warm_up {
            config.warm_up = true;
        }

        Ok(config)
    }

    /// The artifact locations as the lifecycle manager expects them
    pub fn artifact_paths(&self) -> ArtifactPaths {
        ArtifactPaths {
            classifier: self.artifacts.classifier.clone(),
            vectorizer: self.artifacts.vectorizer.clone(),
            labels: self.artifacts.labels.clone(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            port: default_port(),
            artifacts: ArtifactsConfig::default(),
            preprocess: PreprocessConfig::default(),
            warm_up: false,
        }
    }
}

fn default_listen() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_classifier_path() -> PathBuf {
    PathBuf::from("artifacts/classifier.json")
}

fn default_vectorizer_path() -> PathBuf {
    PathBuf::from("artifacts/vectorizer.json")
}

fn default_labels_path() -> PathBuf {
    PathBuf::from("artifacts/labels.json")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_fill_missing_fields() {
        let config: ServerConfig = serde_yaml::from_str("port: 9000\n").unwrap();
        assert_eq!(config.port, 9000);
        assert_eq!(config.listen, "0.0.0.0");
        assert!(config.preprocess.lowercase);
        assert!(!config.warm_up);
    }

    #[test]
    fn artifact_paths_follow_config() {
        let yaml = r#"
artifacts:
  classifier: /models/clf.json
  vectorizer: /models/vec.json
  labels: /models/labels.json
"#;
        let config: ServerConfig = serde_yaml::from_str(yaml).unwrap();
        let paths = config.artifact_paths();
        assert_eq!(paths.classifier, PathBuf::from("/models/clf.json"));
        assert_eq!(paths.labels, PathBuf::from("/models/labels.json"));
    }

    #[test]
    fn preprocess_toggles_deserialize() {
        let yaml = r#"
preprocess:
  lemmatize: false
  language: english
"#;
        let config: ServerConfig = serde_yaml::from_str(yaml).unwrap();
        assert!(!config.preprocess.lemmatize);
        assert!(config.preprocess.lowercase);
    }
}
