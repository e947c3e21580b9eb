// config.rs
use crate::city::City;
use crate::errors::{BikeshareError, Result};
use log::debug;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = "bikeshare.config";
pub const DATA_DIR_ENV: &str = "BIKESHARE_DATA_DIR";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub datasets: DatasetFiles,
    pub columns: ColumnNames,
}

/// Where each city's CSV lives. Relative paths are taken from the data directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatasetFiles {
    pub chicago: String,
    pub new_york_city: String,
    pub washington: String,
}

impl Default for DatasetFiles {
    fn default() -> Self {
        DatasetFiles {
            chicago: City::Chicago.default_file().to_string(),
            new_york_city: City::NewYorkCity.default_file().to_string(),
            washington: City::Washington.default_file().to_string(),
        }
    }
}

impl DatasetFiles {
    pub fn file_for(&self, city: City) -> &str {
        match city {
            City::Chicago => &self.chicago,
            City::NewYorkCity => &self.new_york_city,
            City::Washington => &self.washington,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnNames {
    pub start_time: String,
    pub end_time: String,
    pub start_station: String,
    pub end_station: String,
    pub trip_duration: String,
    pub user_type: String,
    pub gender: String,
    pub birth_year: String,
}

impl Default for ColumnNames {
    fn default() -> Self {
        ColumnNames {
            start_time: "Start Time".to_string(),
            end_time: "End Time".to_string(),
            start_station: "Start Station".to_string(),
            end_station: "End Station".to_string(),
            trip_duration: "Trip Duration".to_string(),
            user_type: "User Type".to_string(),
            gender: "Gender".to_string(),
            birth_year: "Birth Year".to_string(),
        }
    }
}

/// Config bound to the directory its dataset paths are resolved against.
#[derive(Debug, Clone)]
pub struct DataSettings {
    pub data_dir: PathBuf,
    pub config: Config,
}

impl DataSettings {
    pub fn dataset_path(&self, city: City) -> PathBuf {
        let file = Path::new(self.config.datasets.file_for(city));
        if file.is_absolute() {
            file.to_path_buf()
        } else {
            self.data_dir.join(file)
        }
    }
}

/// `--data-dir` wins, then `BIKESHARE_DATA_DIR`, then the working directory.
pub fn resolve_data_dir(cli_data_dir: Option<&str>) -> PathBuf {
    if let Some(dir) = cli_data_dir {
        return PathBuf::from(dir);
    }
    match env::var(DATA_DIR_ENV) {
        Ok(dir) if !dir.trim().is_empty() => PathBuf::from(dir),
        _ => PathBuf::from("."),
    }
}

/// Reads `bikeshare.config` from the data directory, falling back to defaults if it isn't there.
pub fn load_settings(data_dir: &Path) -> Result<DataSettings> {
    let config_path = data_dir.join(CONFIG_FILE_NAME);

    let config = if config_path.is_file() {
        debug!("Reading config from {}", config_path.display());
        let text = fs::read_to_string(&config_path)?;
        serde_json::from_str::<Config>(&text).map_err(|e| {
            BikeshareError::Config(format!("{}: {}", config_path.display(), e))
        })?
    } else {
        debug!("No {} in {}, using defaults", CONFIG_FILE_NAME, data_dir.display());
        Config::default()
    };

    Ok(DataSettings {
        data_dir: data_dir.to_path_buf(),
        config,
    })
}
