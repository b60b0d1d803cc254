use anyhow::Context as _;

use crate::headings::IdPolicy;
use crate::responsive::{DEFAULT_TABLE_WRAPPER_CLASS, ResponsiveOptions};

pub const TABLE_WRAPPER_CLASS_VAR: &str = "MENU_CONTENT_TABLE_WRAPPER_CLASS";
pub const UNIQUE_IDS_VAR: &str = "MENU_CONTENT_UNIQUE_IDS";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub table_wrapper_class: String,
    pub id_policy: IdPolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            table_wrapper_class: DEFAULT_TABLE_WRAPPER_CLASS.to_owned(),
            id_policy: IdPolicy::Preserve,
        }
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let mut config = Self::default();

        if let Some(class) = lookup(TABLE_WRAPPER_CLASS_VAR)
            && !class.trim().is_empty()
        {
            config.table_wrapper_class = class.trim().to_owned();
        }

        if let Some(raw) = lookup(UNIQUE_IDS_VAR) {
            let unique = parse_flag(&raw).with_context(|| format!("parse {UNIQUE_IDS_VAR}"))?;
            if unique {
                config.id_policy = IdPolicy::Unique;
            }
        }

        Ok(config)
    }

    pub fn responsive_options(&self) -> ResponsiveOptions {
        ResponsiveOptions {
            table_wrapper_class: self.table_wrapper_class.clone(),
        }
    }
}

fn parse_flag(raw: &str) -> anyhow::Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "" | "0" | "false" | "no" | "off" => Ok(false),
        other => anyhow::bail!("expected a boolean, got {other:?}"),
    }
}
