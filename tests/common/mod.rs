#![allow(dead_code)]

use std::path::PathBuf;

use covid_dashboard::config::{Settings, Sources};

pub fn fixture(name: &str) -> String {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
        .to_string_lossy()
        .into_owned()
}

pub fn fixture_sources() -> Sources {
    Sources {
        global_summary: fixture("summary.json"),
        country_summary: fixture("cases_country.csv"),
        state_summary: fixture("cases_state.csv"),
        national_daily: fixture("us.csv"),
        county_daily: fixture("us-counties.csv"),
        county_geometry: fixture("counties.geojson"),
        world_geometry: fixture("world.geojson"),
        global_confirmed: fixture("time_series_confirmed.csv"),
        global_deaths: fixture("time_series_deaths.csv"),
        global_recovered: fixture("time_series_recovered.csv"),
    }
}

pub fn fixture_settings() -> Settings {
    Settings {
        sources: fixture_sources(),
        ..Settings::default()
    }
}
