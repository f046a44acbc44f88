//! Naming and logging settings, read through the `config` crate.
//!
//! Sources, later ones winning: built-in defaults, an optional `rowscan`
//! file in any format `config` understands, and `ROWSCAN__*` environment
//! variables (`ROWSCAN__NAMING__CONVENTION=identity`).
//!
//! ```toml
//! [naming]
//! convention = "default"
//!
//! [naming.renames]
//! usr_nm = "UserName"
//!
//! [[naming.rewrites]]
//! pattern = "^tbl_"
//! replacement = ""
//!
//! [log]
//! filter = "rowscan=debug"
//! ```

use std::collections::HashMap;
use std::sync::Arc;

use config::{Config, Environment, File, FileFormat};
use serde::Deserialize;

use crate::error::Result;
use crate::naming::{
    DefaultConvention, IdentityConvention, NamingConvention, RenameConvention, RewriteConvention,
};

pub const ENV_PREFIX: &str = "ROWSCAN";
pub const DEFAULT_FILE: &str = "rowscan";

#[derive(Debug, Clone, Deserialize, Default)]
pub struct Settings {
    #[serde(default)]
    pub naming: NamingSettings,
    #[serde(default)]
    pub log: LogSettings,
}

#[derive(Debug, Clone, Copy, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ConventionKind {
    #[default]
    Default,
    Identity,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct NamingSettings {
    #[serde(default)]
    pub convention: ConventionKind,
    /// Matched against the column name after rewrites.
    #[serde(default)]
    pub renames: HashMap<String, String>,
    #[serde(default)]
    pub rewrites: Vec<RewriteRule>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RewriteRule {
    pub pattern: String,
    #[serde(default)]
    pub replacement: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LogSettings {
    #[serde(default = "default_filter")]
    pub filter: String,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self { filter: default_filter() }
    }
}

fn default_filter() -> String {
    "info".to_string()
}

impl Settings {
    /// Reads `path` (required) or, without one, an optional `rowscan` file
    /// in the working directory, then the environment.
    pub fn load(path: Option<&str>) -> Result<Self> {
        Self::load_from(path, Self::environment())
    }
    pub fn load_from(path: Option<&str>, environment: Environment) -> Result<Self> {
        let file = match path {
            Some(path) => File::with_name(path).required(true),
            None => File::with_name(DEFAULT_FILE).required(false),
        };
        let settings = Self::defaults()?
            .add_source(file)
            .add_source(environment)
            .build()?
            .try_deserialize()?;
        Ok(settings)
    }
    /// Settings from a TOML document alone.
    pub fn from_toml(toml: &str) -> Result<Self> {
        let settings = Self::defaults()?
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()?
            .try_deserialize()?;
        Ok(settings)
    }
    pub fn environment() -> Environment {
        Environment::with_prefix(ENV_PREFIX).separator("__")
    }
    fn defaults() -> Result<config::ConfigBuilder<config::builder::DefaultState>> {
        Ok(Config::builder()
            .set_default("naming.convention", "default")?
            .set_default("log.filter", default_filter())?)
    }

    /// Rewrites, then renames, then the base convention.
    pub fn convention(&self) -> Result<Arc<dyn NamingConvention>> {
        let base: Box<dyn NamingConvention> = match self.naming.convention {
            ConventionKind::Default => Box::new(DefaultConvention),
            ConventionKind::Identity => Box::new(IdentityConvention),
        };
        let renames: RenameConvention = self
            .naming
            .renames
            .iter()
            .map(|(column, field)| (column.clone(), field.clone()))
            .collect();
        let mut rewrites = RewriteConvention::new();
        for rule in &self.naming.rewrites {
            rewrites = rewrites.rule(&rule.pattern, rule.replacement.clone())?;
        }
        Ok(Arc::new(rewrites.then(renames).then(base)))
    }
}
