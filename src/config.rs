//! Runtime settings.
//!
//! Layered with the `config` crate: built-in defaults, then an optional
//! `polls.toml` (or the file named by `POLLS_CONFIG`), then `POLLS_*`
//! environment variables.

use config::{Config, Environment, File, FileFormat};
use serde::Deserialize;

use crate::error::Result;
use crate::persist::PersistenceMode;

/// Environment variable naming an explicit config file.
pub const CONFIG_PATH_VAR: &str = "POLLS_CONFIG";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Settings {
    pub bind_address: String,
    /// `:memory:` or a path to an SQLite file.
    pub database: String,
    /// Most questions the index lists; unset lists them all.
    #[serde(default)]
    pub index_limit: Option<usize>,
    pub log_filter: String,
}

impl Settings {
    pub fn load() -> Result<Self> {
        match std::env::var(CONFIG_PATH_VAR) {
            Ok(path) => Self::build(File::new(&path, FileFormat::Toml).required(true), Some(environment())),
            Err(_) => Self::build(File::with_name("polls").required(false), Some(environment())),
        }
    }

    /// Reads the given TOML file on top of the defaults; `POLLS_*` variables still win.
    pub fn load_from(path: &str) -> Result<Self> {
        Self::build(File::new(path, FileFormat::Toml).required(true), Some(environment()))
    }

    fn build<F>(file: F, environment: Option<Environment>) -> Result<Self>
    where
        F: config::Source + Send + Sync + 'static,
    {
        let mut builder = Config::builder()
            .set_default("bind_address", "127.0.0.1:8000")?
            .set_default("database", ":memory:")?
            .set_default("log_filter", "info,polls=debug")?
            .add_source(file);
        if let Some(environment) = environment {
            builder = builder.add_source(environment);
        }
        Ok(builder.build()?.try_deserialize()?)
    }

    pub fn persistence_mode(&self) -> PersistenceMode {
        PersistenceMode::from_setting(&self.database)
    }
}

fn environment() -> Environment {
    Environment::with_prefix("POLLS").try_parsing(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn no_file() -> File<config::FileSourceFile, FileFormat> {
        File::with_name("no-such-polls-config").required(false)
    }

    fn variables(pairs: &[(&str, &str)]) -> Environment {
        let map: config::Map<String, String> =
            pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        environment().source(Some(map))
    }

    #[test]
    fn defaults_apply_without_a_file() {
        let settings = Settings::build(no_file(), None).unwrap();
        assert_eq!(settings.bind_address, "127.0.0.1:8000");
        assert_eq!(settings.persistence_mode(), PersistenceMode::InMemory);
        assert_eq!(settings.index_limit, None);
        assert_eq!(settings.log_filter, "info,polls=debug");
    }

    #[test]
    fn file_overrides_defaults() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "bind_address = \"0.0.0.0:9000\"").unwrap();
        writeln!(file, "database = \"polls.sqlite\"").unwrap();
        writeln!(file, "index_limit = 5").unwrap();
        let path = file.path().to_str().unwrap();
        let settings = Settings::build(File::new(path, FileFormat::Toml), None).unwrap();
        assert_eq!(settings.bind_address, "0.0.0.0:9000");
        assert_eq!(settings.persistence_mode(), PersistenceMode::File("polls.sqlite".into()));
        assert_eq!(settings.index_limit, Some(5));
    }

    #[test]
    fn missing_explicit_file_is_a_config_error() {
        let err = Settings::load_from("/definitely/not/here/polls.toml").unwrap_err();
        assert!(matches!(err, crate::error::PollsError::Config(_)));
    }

    #[test]
    fn environment_overrides_defaults_and_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "database = \"from-file.sqlite\"").unwrap();
        let path = file.path().to_str().unwrap();
        let env = variables(&[("POLLS_DATABASE", "from-env.sqlite"), ("POLLS_INDEX_LIMIT", "7")]);
        let settings = Settings::build(File::new(path, FileFormat::Toml), Some(env)).unwrap();
        assert_eq!(settings.persistence_mode(), PersistenceMode::File("from-env.sqlite".into()));
        assert_eq!(settings.index_limit, Some(7));
        assert_eq!(settings.bind_address, "127.0.0.1:8000");
    }

    #[test]
    fn empty_environment_leaves_defaults() {
        let settings = Settings::build(no_file(), Some(variables(&[]))).unwrap();
        assert_eq!(settings.persistence_mode(), PersistenceMode::InMemory);
    }
}
