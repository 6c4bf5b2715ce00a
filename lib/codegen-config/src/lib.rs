pub mod log;

use config::{Config, File, FileFormat, FileSourceFile};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::log::LoggingConfig;

/// Invocation configuration for one run of the codegen pipeline.
///
/// All references (schema, client schema, documents) are resolved relative
/// to the directory of the config file they were loaded from, or the current
/// working directory when the config was built programmatically.
#[derive(Debug, Default, Deserialize, Serialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct CodegenConfig {
    #[serde(skip)]
    root_directory: PathBuf,

    /// The primary schema source: a path to a `.graphql`/`.gql` SDL file
    /// (with optional `#import` lines) or a `.json` export payload
    /// (introspection result, serialized AST, or SDL string).
    ///
    /// Required unless `skip_schema` is set.
    #[serde(default)]
    pub schema: Option<String>,

    /// An optional client-side schema merged on top of the primary schema
    /// before validation. Accepts the same source shapes as `schema`.
    /// Client-only types and fields are additive; on a name collision the
    /// primary schema wins.
    #[serde(default)]
    pub client_schema: Option<String>,

    /// The name of the template plugin that consumes the validated schema
    /// and documents.
    #[serde(default)]
    pub template: String,

    /// File globs of GraphQL operation documents to load and validate.
    /// Order is preserved; matches within one glob are lexical.
    #[serde(default)]
    pub documents: Vec<String>,

    /// When set, no schema is resolved and the template receives none.
    #[serde(default)]
    pub skip_schema: bool,

    /// When set, document globs are ignored and validation is vacuous.
    #[serde(default)]
    pub skip_documents: bool,

    /// Names of pre-load hooks to run before schema resolution.
    #[serde(default)]
    pub require: Vec<String>,

    /// Suppresses non-error logging.
    #[serde(default)]
    pub silent: bool,

    /// The pipeline logger configuration.
    #[serde(default)]
    pub log: LoggingConfig,

    /// Free-form options handed through to the template plugin.
    #[serde(default)]
    pub template_options: serde_json::Value,
}

impl CodegenConfig {
    pub fn root_directory(&self) -> &Path {
        &self.root_directory
    }

    pub fn with_root_directory(mut self, root: impl Into<PathBuf>) -> Self {
        self.root_directory = root.into();
        self
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CodegenConfigError {
    #[error("Failed to load configuration: {0}")]
    ConfigLoadError(#[from] config::ConfigError),
    #[error("Failed to get the current directory: {0}")]
    CurrentDirError(std::io::Error),
}

static DEFAULT_FILE_NAMES: &[&str] = &[
    "codegen.config.yaml",
    "codegen.config.yml",
    "codegen.config.json",
    "codegen.config.json5",
];

fn get_current_dir() -> Result<PathBuf, CodegenConfigError> {
    std::env::current_dir().map_err(CodegenConfigError::CurrentDirError)
}

/// Loads the codegen configuration from an explicit file path, or from the
/// first of the default file names found in the current directory.
pub fn load_config(
    override_config_path: Option<String>,
) -> Result<CodegenConfig, CodegenConfigError> {
    let mut config = Config::builder();
    let mut config_root_path = get_current_dir()?;

    if let Some(path_str) = override_config_path {
        let path_buf = PathBuf::from(path_str);
        if let Some(parent_dir) = path_buf.parent() {
            config_root_path = config_root_path.join(parent_dir);
        }
        let as_file: File<FileSourceFile, _> = path_buf.into();

        config = config.add_source(as_file.required(true));
    } else {
        for name in DEFAULT_FILE_NAMES {
            config = config.add_source(File::with_name(name).required(false));
        }
    }

    let mut base_cfg = config.build()?.try_deserialize::<CodegenConfig>()?;
    base_cfg.root_directory = config_root_path;

    Ok(base_cfg)
}

/// Parses a configuration directly from YAML text. Relative references
/// resolve against the current directory.
pub fn parse_yaml_config(config_raw: &str) -> Result<CodegenConfig, CodegenConfigError> {
    let config_root_path = get_current_dir()?;
    let base_cfg = Config::builder()
        .add_source(File::from_str(config_raw, FileFormat::Yaml))
        .build()?
        .try_deserialize::<CodegenConfig>()?;

    Ok(base_cfg.with_root_directory(config_root_path))
}
