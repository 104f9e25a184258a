//! Loader for `tweedle.yaml` with environment overlays.
//!
//! Sources are merged in the order they are attached, then `TWEEDLE__*`
//! environment variables win over every file (`TWEEDLE__SEND_QUIETLY=false`).
//! After merging, every string value is `${VAR}`-expanded so credentials can be
//! kept out of the file itself.
use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::fmt;
use std::path::{Path, PathBuf};
use tweedle_common::observability::{LogConfig, LogFormat};

const MAXIMUM_ENV_EXPANSION_DEPTH: usize = 8;

#[derive(Debug, Deserialize)]
pub struct TweedleConfig {
    pub version: Option<String>,
    /// Log failed sends instead of failing the build step.
    #[serde(default = "default_send_quietly", deserialize_with = "lenient_bool")]
    pub send_quietly: bool,
    #[serde(default)]
    pub logging: Option<LoggingConfig>,
    #[serde(default)]
    pub clients: Vec<ClientSpec>,
}

impl TweedleConfig {
    /// Clients that are not switched off with `enabled: false`, in file order.
    pub fn enabled_clients(&self) -> impl Iterator<Item = &ClientSpec> {
        self.clients.iter().filter(|c| c.enabled.unwrap_or(true))
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct LoggingConfig {
    #[serde(default)]
    pub dir: Option<PathBuf>,
    #[serde(default)]
    pub format: LogFormat,
    #[serde(default)]
    pub stderr: Option<bool>,
    #[serde(default)]
    pub filter: Option<String>,
}

impl LoggingConfig {
    /// Map onto the observability settings, keeping defaults for unset fields.
    pub fn to_log_config(&self) -> LogConfig {
        let defaults = LogConfig::default();
        LogConfig {
            log_dir: self.dir.clone(),
            emit_stderr: self.stderr.unwrap_or(true),
            format: self.format,
            default_filter: self.filter.clone().unwrap_or(defaults.default_filter),
            ..defaults
        }
    }
}

/// One account to post from.
///
/// Missing credential fields become empty strings so that validation can name
/// the field instead of failing the whole file.
///
/// Scalars are read leniently: `id: 1` or an unquoted numeric key is taken as
/// text, and `enabled` accepts the same spellings as `send_quietly`.
#[derive(Deserialize)]
pub struct ClientSpec {
    #[serde(deserialize_with = "lenient_string")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient_opt_bool")]
    pub enabled: Option<bool>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub api_key: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub api_key_secret: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub access_token: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub access_token_secret: String,
}

impl fmt::Debug for ClientSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientSpec")
            .field("id", &self.id)
            .field("enabled", &self.enabled)
            .field("api_key", &"<redacted>")
            .field("api_key_secret", &"<redacted>")
            .field("access_token", &"<redacted>")
            .field("access_token_secret", &"<redacted>")
            .finish()
    }
}

fn default_send_quietly() -> bool {
    true
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawFlag {
    Bool(bool),
    Text(String),
}

impl RawFlag {
    fn into_bool<E: serde::de::Error>(self) -> Result<bool, E> {
        match self {
            Self::Bool(b) => Ok(b),
            Self::Text(s) => match s.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" => Ok(true),
                "0" | "false" | "no" => Ok(false),
                other => Err(E::custom(format!("expected a boolean, got {other:?}"))),
            },
        }
    }
}

/// Accepts real booleans as well as the strings env expansion produces.
fn lenient_bool<'de, D>(de: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    RawFlag::deserialize(de)?.into_bool()
}

fn lenient_opt_bool<'de, D>(de: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<RawFlag>::deserialize(de)?
        .map(RawFlag::into_bool)
        .transpose()
}

/// Text fields that YAML or `try_parsing` may have turned into numbers.
fn lenient_string<'de, D>(de: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(de)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        Value::Null => Ok(String::new()),
        other => Err(serde::de::Error::custom(format!(
            "expected a string, got {other}"
        ))),
    }
}

/// Environment overlays such as `TWEEDLE__CLIENTS__0__API_KEY` arrive as a map
/// keyed by index; turn that back into a list ordered by index.
fn sequence_from_index_map(v: &mut Value) {
    let Value::Object(map) = v else {
        return;
    };
    let mut indexed = Vec::with_capacity(map.len());
    for (key, item) in map.iter() {
        match key.parse::<usize>() {
            Ok(idx) => indexed.push((idx, item.clone())),
            Err(_) => return,
        }
    }
    indexed.sort_by_key(|(idx, _)| *idx);
    *v = Value::Array(indexed.into_iter().map(|(_, item)| item).collect());
}

fn expand_env_in_value(v: &mut Value) {
    match v {
        Value::String(s) => {
            if s.contains('$') {
                let mut cur = std::mem::take(s);
                for _ in 0..MAXIMUM_ENV_EXPANSION_DEPTH {
                    let expanded = match shellexpand::env(&cur) {
                        Ok(cow) => cow.into_owned(),
                        Err(_) => cur.clone(),
                    };
                    if expanded == cur {
                        break;
                    }
                    cur = expanded;
                }
                *s = cur;
            }
        }
        Value::Array(arr) => arr.iter_mut().for_each(expand_env_in_value),
        Value::Object(obj) => obj.values_mut().for_each(expand_env_in_value),
        _ => {}
    }
}

/// Builder hides the `config` crate wiring (YAML + env overrides).
pub struct TweedleConfigLoader {
    builder: config::ConfigBuilder<config::builder::DefaultState>,
    env_prefix: String,
}

impl Default for TweedleConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl TweedleConfigLoader {
    /// Start empty; `TWEEDLE__` env overrides are applied on [`load`](Self::load).
    ///
    /// ```
    /// use tweedle_config::TweedleConfigLoader;
    ///
    /// let config = TweedleConfigLoader::new()
    ///     .with_yaml_str("version: '1'\nclients: []")
    ///     .load()
    ///     .expect("valid config");
    ///
    /// assert_eq!(config.version.as_deref(), Some("1"));
    /// assert!(config.send_quietly);
    /// assert!(config.clients.is_empty());
    /// ```
    pub fn new() -> Self {
        Self {
            builder: Config::builder(),
            env_prefix: "TWEEDLE".to_string(),
        }
    }

    /// Use a different environment prefix (mostly for tests).
    pub fn with_env_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    /// Attach a YAML/TOML/JSON file; the `config` crate infers format by suffix.
    pub fn with_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.builder = self
            .builder
            .add_source(File::from(path.as_ref()).required(true));
        self
    }

    /// Like [`with_file`](Self::with_file), but a missing file is skipped so a
    /// pipeline can rely purely on environment variables.
    pub fn with_optional_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.builder = self
            .builder
            .add_source(File::from(path.as_ref()).required(false));
        self
    }

    /// Allow tests/CLI to merge inline YAML snippets.
    ///
    /// ```
    /// use tweedle_config::TweedleConfigLoader;
    ///
    /// let cfg = TweedleConfigLoader::new()
    ///     .with_yaml_str(
    ///         r#"
    /// send_quietly: false
    /// clients:
    ///   - id: "release-bot"
    ///     api_key: "k"
    ///     api_key_secret: "ks"
    ///     access_token: "t"
    ///     access_token_secret: "ts"
    /// "#,
    ///     )
    ///     .load()
    ///     .unwrap();
    ///
    /// assert!(!cfg.send_quietly);
    /// assert_eq!(cfg.clients.len(), 1);
    /// assert_eq!(cfg.clients[0].id, "release-bot");
    /// ```
    pub fn with_yaml_str(mut self, yaml: &str) -> Self {
        self.builder = self
            .builder
            .add_source(File::from_str(yaml, config::FileFormat::Yaml));
        self
    }

    /// Consume the builder and deserialize the merged sources into strongly typed config.
    pub fn load(self) -> Result<TweedleConfig, ConfigError> {
        let cfg = self
            .builder
            .add_source(
                Environment::with_prefix(&self.env_prefix)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let mut v: Value = cfg.try_deserialize()?;
        if let Some(clients) = v.get_mut("clients") {
            sequence_from_index_map(clients);
        }
        expand_env_in_value(&mut v);

        let typed: TweedleConfig =
            serde_json::from_value(v).map_err(|e| ConfigError::Message(e.to_string()))?;

        Ok(typed)
    }
}
