use std::path::PathBuf;

use clap::Parser;
use simplelog::LevelFilter;

use crate::{error::Error, storage::FileStorage};

/// Browse the car catalog and keep a wishlist.
#[derive(Debug, Clone, Parser)]
#[command(name = "car-finder", version, about)]
pub struct Config {
    /// Base URL of the catalog API. Cars are read from `<url>/api/cars`.
    #[arg(long, env = "CAR_FINDER_API_URL", default_value = "http://localhost:8000")]
    pub api_url: String,

    /// Where the wishlist is stored. Defaults to the platform data directory.
    #[arg(long, env = "CAR_FINDER_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Start with the dark theme.
    #[arg(long)]
    pub dark: bool,

    /// Log debug output.
    #[arg(long)]
    pub debug: bool,
}

impl Config {
    /// # Errors
    ///
    /// This function will return an error if no directory was given and the
    /// platform has no data directory.
    pub fn data_dir(&self) -> Result<PathBuf, Error> {
        if let Some(dir) = &self.data_dir {
            return Ok(dir.clone());
        }
        dirs::data_dir()
            .map(|dir| dir.join("car-finder"))
            .ok_or(Error::NoDataDirectory)
    }

    /// # Errors
    ///
    /// See [`Config::data_dir`].
    pub fn storage(&self) -> Result<FileStorage, Error> {
        Ok(FileStorage::new(self.data_dir()?))
    }

    #[must_use]
    pub fn log_level(&self) -> LevelFilter {
        if self.debug {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_parse() {
        let config = Config::try_parse_from([
            "car-finder",
            "--api-url",
            "http://catalog.test:9000",
            "--data-dir",
            "/tmp/cars",
            "--dark",
            "--debug",
        ])
        .unwrap();

        assert_eq!(config.api_url, "http://catalog.test:9000");
        assert_eq!(config.data_dir().unwrap(), PathBuf::from("/tmp/cars"));
        assert!(config.dark);
        assert_eq!(config.log_level(), LevelFilter::Debug);
    }

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Config::command().debug_assert();
    }
}
