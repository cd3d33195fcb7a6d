//! Headline totals shown above each tab's charts.

use serde::{Deserialize, Serialize};

use crate::data::{CountryRecord, ShapeError};

/// Shape of the live summary JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GlobalSummary {
    #[serde(rename = "Global")]
    pub global: GlobalTotals,
    #[serde(rename = "Date", default)]
    pub date: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GlobalTotals {
    #[serde(rename = "TotalConfirmed")]
    pub confirmed: i64,
    #[serde(rename = "TotalDeaths")]
    pub deaths: i64,
    #[serde(rename = "TotalRecovered")]
    pub recovered: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Totals {
    pub confirmed: i64,
    pub deaths: i64,
    pub recovered: Option<i64>,
}

/// Global and national totals for one render pass.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub last_updated: String,
    pub global: Totals,
    pub national_key: String,
    /// Display name for the national region; defaults to the key.
    pub national_label: String,
    pub national: Totals,
}

impl Summary {
    pub fn from_sources(
        global: &GlobalSummary,
        countries: &[CountryRecord],
        national_key: &str,
    ) -> Result<Self, ShapeError> {
        let nation = CountryRecord::find(countries, national_key)?;

        Ok(Self {
            last_updated: global.date.clone().unwrap_or_else(|| "Unknown".to_string()),
            global: Totals {
                confirmed: global.global.confirmed,
                deaths: global.global.deaths,
                recovered: Some(global.global.recovered),
            },
            national_key: national_key.to_string(),
            national_label: national_key.to_string(),
            national: Totals {
                confirmed: nation.confirmed,
                deaths: nation.deaths,
                recovered: nation.recovered,
            },
        })
    }

    pub fn with_label(mut self, label: &str) -> Self {
        self.national_label = label.to_string();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn country(name: &str, confirmed: i64) -> CountryRecord {
        CountryRecord {
            name: name.to_string(),
            iso3: None,
            confirmed,
            deaths: 1,
            recovered: None,
            active: confirmed - 1,
        }
    }

    fn global() -> GlobalSummary {
        serde_json::from_str(
            r#"{"Global": {"NewConfirmed": 5, "TotalConfirmed": 1000, "TotalDeaths": 50, "TotalRecovered": 300},
                "Date": "2020-06-01T12:00:00Z"}"#,
        )
        .unwrap()
    }

    #[test]
    fn national_totals_come_from_the_keyed_row() {
        // The national row is deliberately not at any fixed position
        let countries = vec![country("Italy", 10), country("Spain", 20), country("US", 500)];
        let summary = Summary::from_sources(&global(), &countries, "US").unwrap();

        assert_eq!(summary.national.confirmed, 500);
        assert_eq!(summary.global.confirmed, 1000);
        assert_eq!(summary.global.recovered, Some(300));
        assert_eq!(summary.last_updated, "2020-06-01T12:00:00Z");
        assert_eq!(summary.national_label, "US");
        assert_eq!(summary.with_label("United States").national_label, "United States");
    }

    #[test]
    fn missing_national_row_fails() {
        let countries = vec![country("Italy", 10)];
        assert!(Summary::from_sources(&global(), &countries, "US").is_err());
    }
}
