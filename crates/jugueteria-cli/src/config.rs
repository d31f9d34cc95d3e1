// CLI configuration
// The only persisted client state is the credential file; everything else
// arrives through flags or environment variables.

use std::path::PathBuf;

use anyhow::{Context, Result};

pub struct Config {
    pub api_url: String,
    /// Directory holding the `jwt_token` credential file
    pub config_dir: PathBuf,
}

impl Config {
    pub fn resolve(api_url: String, config_dir: Option<PathBuf>) -> Result<Self> {
        let config_dir = match config_dir {
            Some(dir) => dir,
            None => default_config_dir()?,
        };
        Ok(Self {
            api_url,
            config_dir,
        })
    }
}

fn default_config_dir() -> Result<PathBuf> {
    let home = std::env::var_os("HOME")
        .map(PathBuf::from)
        .context("HOME is not set; pass --config-dir instead")?;
    Ok(home.join(".jugueteria"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_config_dir_wins() {
        let config = Config::resolve(
            "http://localhost:8080/api/v1".to_string(),
            Some(PathBuf::from("/tmp/jugueteria-test")),
        )
        .unwrap();
        assert_eq!(config.config_dir, PathBuf::from("/tmp/jugueteria-test"));
    }
}
