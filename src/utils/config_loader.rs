use async_trait::async_trait;
use dotenvy::dotenv;
use regex::{Captures, Regex};
use serde::de::DeserializeOwned;
use std::{env, fs};
use thiserror::Error;

#[allow(clippy::enum_variant_names)]
#[derive(Debug, Error)]
pub enum LoadConfigError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("TOML error: {0}")]
    TomlError(#[from] toml::de::Error),
    #[error("Regex error: {0}")]
    RegexError(#[from] regex::Error),
}

/// One table of a TOML config file.
///
/// `Root` is the whole document; the section is cut out of it with
/// [`ConfigSection::from_root`]. Both loaders read `.env` first and expand
/// `${VAR}` references before parsing.
#[async_trait]
pub trait ConfigSection: Sized + Send {
    type Root: DeserializeOwned + Send;

    fn from_root(root: Self::Root) -> Self;

    async fn load_section_from_file(file_name: String) -> Result<Self, LoadConfigError> {
        dotenv().ok();
        let contents = tokio::fs::read_to_string(file_name).await?;
        let root: Self::Root = load_from_str(&contents)?;
        Ok(Self::from_root(root))
    }

    fn load_section_from_file_sync(file_name: String) -> Result<Self, LoadConfigError> {
        dotenv().ok();
        let contents = fs::read_to_string(file_name)?;
        let root: Self::Root = load_from_str(&contents)?;
        Ok(Self::from_root(root))
    }
}

/// Parses TOML after substituting `${VAR}` references from the environment.
pub fn load_from_str<T: DeserializeOwned>(contents: &str) -> Result<T, LoadConfigError> {
    let contents = expand_vars(contents)?;
    Ok(toml::from_str(&contents)?)
}

// Unset variables are left as-is so the TOML error points at them.
fn expand_vars(raw_config: &str) -> Result<String, LoadConfigError> {
    let re = Regex::new(r"\$\{([a-zA-Z_][0-9a-zA-Z_]*)\}")?;
    let expanded = re.replace_all(raw_config, |caps: &Captures| env::var(&caps[1]).unwrap_or_else(|_| caps[0].to_string()));
    Ok(expanded.into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_vars_keeps_unknown() -> eyre::Result<()> {
        let raw = "owner = \"${RIN_SWAP_SURELY_UNSET_VAR}\"";
        assert_eq!(expand_vars(raw)?, raw);
        Ok(())
    }

    #[test]
    fn test_expand_vars_substitutes_known() -> eyre::Result<()> {
        // CARGO_PKG_NAME is set for every test binary cargo runs
        let Ok(name) = env::var("CARGO_PKG_NAME") else {
            return Ok(());
        };
        assert_eq!(expand_vars("name = \"${CARGO_PKG_NAME}\"")?, format!("name = \"{name}\""));
        Ok(())
    }
}
