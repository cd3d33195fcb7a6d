//! Settings and dataset locations.
//!
//! Every field has a default; a JSON config file only needs the keys it overrides.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_BIND: &str = "127.0.0.1:8050";
pub const DEFAULT_NATIONAL_KEY: &str = "US";
pub const DEFAULT_NATIONAL_LABEL: &str = "United States";

const JHU_WEB: &str = "https://raw.githubusercontent.com/CSSEGISandData/COVID-19/web-data/data";
const JHU_SERIES: &str = "https://raw.githubusercontent.com/CSSEGISandData/COVID-19/master/csse_covid_19_data/csse_covid_19_time_series";
const NYT: &str = "https://raw.githubusercontent.com/nytimes/covid-19-data/master";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Where each dataset comes from: an `http(s)://` URL or a local path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Sources {
    pub global_summary: String,
    pub country_summary: String,
    pub state_summary: String,
    pub national_daily: String,
    pub county_daily: String,
    pub county_geometry: String,
    pub world_geometry: String,
    pub global_confirmed: String,
    pub global_deaths: String,
    pub global_recovered: String,
}

impl Default for Sources {
    fn default() -> Self {
        Self {
            global_summary: "https://api.covid19api.com/summary".to_string(),
            country_summary: format!("{JHU_WEB}/cases_country.csv"),
            state_summary: format!("{JHU_WEB}/cases_state.csv"),
            national_daily: format!("{NYT}/us.csv"),
            county_daily: format!("{NYT}/us-counties.csv"),
            county_geometry:
                "https://raw.githubusercontent.com/plotly/datasets/master/geojson-counties-fips.json"
                    .to_string(),
            world_geometry:
                "https://raw.githubusercontent.com/johan/world.geo.json/master/countries.geo.json"
                    .to_string(),
            global_confirmed: format!("{JHU_SERIES}/time_series_covid19_confirmed_global.csv"),
            global_deaths: format!("{JHU_SERIES}/time_series_covid19_deaths_global.csv"),
            global_recovered: format!("{JHU_SERIES}/time_series_covid19_recovered_global.csv"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub sources: Sources,
    /// Per-request HTTP timeout; absent means wait indefinitely.
    pub timeout_secs: Option<u64>,
    /// `Country_Region` value of the country shown on the national tab.
    pub national_key: String,
    /// Display name of that country, used for the national tab.
    pub national_label: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            sources: Sources::default(),
            timeout_secs: None,
            national_key: DEFAULT_NATIONAL_KEY.to_string(),
            national_label: DEFAULT_NATIONAL_LABEL.to_string(),
        }
    }
}

impl Settings {
    /// Defaults, overlaid with `path` when given.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn no_file_means_defaults() {
        let settings = Settings::load(None).unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.national_key, "US");
        assert_eq!(settings.national_label, "United States");
        assert!(settings.timeout().is_none());
        assert!(settings.sources.global_confirmed.ends_with("confirmed_global.csv"));
    }

    #[test]
    fn partial_file_overrides_only_named_keys() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"timeout_secs": 15, "sources": {{"national_daily": "fixtures/us.csv"}}}}"#
        )
        .unwrap();

        let settings = Settings::load(Some(file.path())).unwrap();
        assert_eq!(settings.sources.national_daily, "fixtures/us.csv");
        assert_eq!(settings.sources.county_daily, Sources::default().county_daily);
        assert_eq!(settings.timeout(), Some(Duration::from_secs(15)));
    }

    #[test]
    fn bad_file_reports_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();

        let err = Settings::load(Some(file.path())).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains(&file.path().display().to_string()));
    }
}
