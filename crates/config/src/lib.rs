use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

pub mod error;

use error::*;

pub const CONFIG_FILE: &str = "ygo.toml";
pub const DEFAULT_LOG_FILTER: &str = "ygo_replay=info,ygo_card=info,ygo_cli=info";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolConfig {
  /// Card database (`cards.cdb`), or a directory of them, used to resolve card ids.
  pub catalog_path: Option<PathBuf>,
  /// `strings.conf` with system and set names.
  pub strings_path: Option<PathBuf>,
  pub log_filter: String,
}

impl Default for ToolConfig {
  fn default() -> Self {
    ToolConfig {
      catalog_path: None,
      strings_path: None,
      log_filter: DEFAULT_LOG_FILTER.to_string(),
    }
  }
}

impl ToolConfig {
  pub fn from_env() -> Result<Self> {
    let mut config = ToolConfig::default();

    config.apply_env();

    Ok(config)
  }

  pub fn load() -> Result<Self> {
    Self::load_from(CONFIG_FILE)
  }

  pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self> {
    let mut config = Self::parse(&fs::read_to_string(path)?)?;

    config.apply_env();

    Ok(config)
  }

  /// Like [`ToolConfig::load`], but a missing `ygo.toml` falls back to defaults.
  /// Any other read or parse failure is still reported.
  pub fn load_or_default() -> Result<Self> {
    match Self::load() {
      Err(Error::Io(ref err)) if err.kind() == ErrorKind::NotFound => Self::from_env(),
      other => other,
    }
  }

  pub fn save(&self) -> Result<()> {
    fs::write(CONFIG_FILE, toml::to_string_pretty(self)?).map_err(Into::into)
  }

  fn parse(text: &str) -> Result<Self> {
    #[derive(Debug, Serialize, Deserialize)]
    struct TomlConfig {
      pub catalog_path: Option<PathBuf>,
      pub strings_path: Option<PathBuf>,
      pub log_filter: Option<String>,
    }

    let config: TomlConfig = toml::from_str(text)?;
    Ok(ToolConfig {
      catalog_path: config.catalog_path,
      strings_path: config.strings_path,
      log_filter: config
        .log_filter
        .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string()),
    })
  }

  fn apply_env(&mut self) {
    use std::env;

    if let Some(path) = env::var("YGO_CATALOG_PATH").ok().map(PathBuf::from) {
      self.catalog_path = Some(path);
    }

    if let Some(path) = env::var("YGO_STRINGS_PATH").ok().map(PathBuf::from) {
      self.strings_path = Some(path);
    }

    if let Ok(filter) = env::var("YGO_LOG") {
      self.log_filter = filter;
    }
  }
}

#[test]
fn test_parse_partial() {
  let config = ToolConfig::parse(r#"catalog_path = "cards.cdb""#).unwrap();
  assert_eq!(config.catalog_path, Some(PathBuf::from("cards.cdb")));
  assert_eq!(config.strings_path, None);
  assert_eq!(config.log_filter, DEFAULT_LOG_FILTER);
}

#[test]
fn test_parse_full() {
  let config = ToolConfig::parse(
    r#"
catalog_path = "db/cards.cdb"
strings_path = "db/strings.conf"
log_filter = "debug"
"#,
  )
  .unwrap();
  assert_eq!(config.strings_path, Some(PathBuf::from("db/strings.conf")));
  assert_eq!(config.log_filter, "debug");
}

#[test]
fn test_parse_invalid() {
  assert!(matches!(
    ToolConfig::parse("catalog_path = 1"),
    Err(Error::TomlDe(_))
  ));
}
