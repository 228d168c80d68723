//! CLI configuration from the environment.
use std::env;
use std::path::PathBuf;

pub const DATA_DIR_ENV: &str = "LINEUP_DATA_DIR";
const DEFAULT_DATA_DIR: &str = "lineup_data";

#[derive(Clone, Debug)]
pub struct CliConfig {
    /// Directory holding `team.json` and `settings.json`
    pub data_dir: PathBuf,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self { data_dir: PathBuf::from(DEFAULT_DATA_DIR) }
    }
}

impl CliConfig {
    /// Environment variables:
    /// - `LINEUP_DATA_DIR` - data directory (default: ./lineup_data)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(dir) = read_env::<PathBuf>(DATA_DIR_ENV) {
            if !dir.as_os_str().is_empty() {
                config.data_dir = dir;
            }
        }

        config
    }

    /// `--data-dir` wins over the environment
    pub fn with_data_dir(mut self, dir: Option<PathBuf>) -> Self {
        if let Some(dir) = dir {
            self.data_dir = dir;
        }
        self
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flag_overrides_default() {
        let config = CliConfig::default().with_data_dir(Some(PathBuf::from("/tmp/x")));
        assert_eq!(config.data_dir, PathBuf::from("/tmp/x"));

        let config = CliConfig::default().with_data_dir(None);
        assert_eq!(config.data_dir, PathBuf::from(DEFAULT_DATA_DIR));
    }
}
