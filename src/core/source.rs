//! Sources of the raw configuration mapping
//!
//! The factory resolves its configuration from a flat string mapping. By
//! default that mapping is the process environment layered with dotenv files;
//! tests and embedders can substitute any [`ConfigSource`].

use super::error::{LoggerError, Result};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Provider of the `KEY -> value` mapping consumed by [`resolve`]
///
/// [`resolve`]: crate::core::resolve
pub trait ConfigSource: Send + Sync {
    fn load(&self) -> Result<HashMap<String, String>>;
}

impl ConfigSource for HashMap<String, String> {
    fn load(&self) -> Result<HashMap<String, String>> {
        Ok(self.clone())
    }
}

/// Process environment plus `.env` files, without mutating the environment
///
/// Files are read from the base directory in this order, each only filling
/// keys that are still unset:
///
/// 1. process environment
/// 2. `.env.shared`
/// 3. `.env`
/// 4. `.env.<PROFILE>`, when `PROFILE` (from any earlier layer) is set and
///    not `NONE`
#[derive(Debug, Clone)]
pub struct EnvSource {
    base_dir: PathBuf,
    include_process_env: bool,
}

impl EnvSource {
    /// Read files relative to the current working directory
    pub fn new() -> Self {
        Self::in_dir(".")
    }

    /// Read files relative to `base_dir`
    pub fn in_dir(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
            include_process_env: true,
        }
    }

    /// Only read the dotenv files, ignoring the process environment
    #[must_use]
    pub fn files_only(mut self) -> Self {
        self.include_process_env = false;
        self
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    fn layer_file(&self, env: &mut HashMap<String, String>, name: &str) -> Result<()> {
        let path = self.base_dir.join(name);
        if !path.is_file() {
            return Ok(());
        }
        let display = path.display().to_string();
        let entries = dotenvy::from_path_iter(&path)
            .map_err(|e| LoggerError::config_source(&display, e.to_string()))?;
        for entry in entries {
            let (key, value) =
                entry.map_err(|e| LoggerError::config_source(&display, e.to_string()))?;
            env.entry(key).or_insert(value);
        }
        Ok(())
    }
}

impl Default for EnvSource {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigSource for EnvSource {
    fn load(&self) -> Result<HashMap<String, String>> {
        let mut env: HashMap<String, String> = if self.include_process_env {
            std::env::vars_os()
                .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)))
                .collect()
        } else {
            HashMap::new()
        };

        self.layer_file(&mut env, ".env.shared")?;
        self.layer_file(&mut env, ".env")?;

        let profile = env.get("PROFILE").cloned().unwrap_or_else(|| "NONE".to_string());
        if profile != "NONE" {
            self.layer_file(&mut env, &format!(".env.{}", profile))?;
        }

        Ok(env)
    }
}
