//! Render Pass
//! One forward pass per page load: fetch, shape, aggregate, render, compose.
//! Nothing is cached between passes.

use polars::prelude::DataFrame;
use std::time::Instant;
use tracing::{debug, info};

use super::composer::{Artifacts, Composer};
use super::figures::Figures;
use super::html;
use super::layout::Page;
use crate::config::Settings;
use crate::data::{
    CountryRecord, CountyRecord, DailyRecord, DataLoader, DataProcessor, FeatureCollection,
    StateRecord, TimeSeries,
};
use crate::error::Result;
use crate::stats::{Aggregator, GlobalSummary, Summary};

/// Identifier columns of the global time-series tables.
const SERIES_ID_COLUMNS: [&str; 4] = ["Province/State", "Country/Region", "Lat", "Long"];

/// Raw inputs of one pass, as fetched.
struct Fetched {
    global_summary: GlobalSummary,
    countries: DataFrame,
    states: DataFrame,
    national_daily: DataFrame,
    counties: DataFrame,
    county_geometry: FeatureCollection,
    world_geometry: FeatureCollection,
    confirmed: DataFrame,
    deaths: DataFrame,
    recovered: DataFrame,
}

/// Shaped, typed inputs.
struct Shaped {
    countries: Vec<CountryRecord>,
    states: Vec<StateRecord>,
    daily: Vec<DailyRecord>,
    counties: Vec<CountyRecord>,
    confirmed: DataFrame,
    deaths: DataFrame,
    recovered: DataFrame,
}

pub struct Dashboard {
    loader: DataLoader,
    settings: Settings,
}

impl Dashboard {
    pub fn new(settings: Settings) -> Result<Self> {
        let loader = DataLoader::new(settings.timeout())?;
        Ok(Self { loader, settings })
    }

    /// Run every stage in order. Any failure aborts the pass.
    pub fn render_page(&self) -> Result<Page> {
        let started = Instant::now();
        info!(national = %self.settings.national_key, "render pass started");

        let fetched = self.fetch()?;
        let shaped = self.shape(&fetched)?;

        let summary = Summary::from_sources(
            &fetched.global_summary,
            &shaped.countries,
            &self.settings.national_key,
        )?
        .with_label(&self.settings.national_label);
        let (cases, deaths, recovered) = Self::aggregate(&shaped)?;

        let artifacts = Artifacts {
            world_map: Figures::world_map(&shaped.countries, fetched.world_geometry)?,
            global_status: Figures::global_status(cases, deaths, recovered)?,
            global_table: Figures::global_table(&shaped.countries)?,
            county_map: Figures::county_map(&shaped.counties, fetched.county_geometry)?,
            national_line: Figures::national_line(&shaped.daily, &self.settings.national_key)?,
            national_table: Figures::national_table(&shaped.states)?,
        };

        let page = Composer::build_page(&summary, artifacts);
        info!(
            elapsed_ms = started.elapsed().as_millis() as u64,
            "render pass finished"
        );
        Ok(page)
    }

    /// Render the page and serialise it to HTML.
    pub fn render_html(&self) -> Result<String> {
        let page = self.render_page()?;
        Ok(html::write_page(&page)?)
    }

    fn fetch(&self) -> Result<Fetched> {
        let sources = &self.settings.sources;
        let loader = &self.loader;

        let county_geometry = FeatureCollection::from_value(
            &sources.county_geometry,
            loader.fetch_json(&sources.county_geometry)?,
        )?;
        let world_geometry = FeatureCollection::from_value(
            &sources.world_geometry,
            loader.fetch_json(&sources.world_geometry)?,
        )?;

        let fetched = Fetched {
            global_summary: loader.fetch_json_as(&sources.global_summary)?,
            countries: loader.fetch_table(&sources.country_summary)?,
            states: loader.fetch_table(&sources.state_summary)?,
            national_daily: loader.fetch_table(&sources.national_daily)?,
            counties: loader.fetch_table(&sources.county_daily)?,
            county_geometry,
            world_geometry,
            confirmed: loader.fetch_table(&sources.global_confirmed)?,
            deaths: loader.fetch_table(&sources.global_deaths)?,
            recovered: loader.fetch_table(&sources.global_recovered)?,
        };
        debug!(
            countries = fetched.countries.height(),
            states = fetched.states.height(),
            counties = fetched.counties.height(),
            "sources fetched"
        );
        Ok(fetched)
    }

    fn shape(&self, fetched: &Fetched) -> Result<Shaped> {
        let states = DataProcessor::filter_eq(
            &fetched.states,
            "Country_Region",
            &self.settings.national_key,
        )?;

        Ok(Shaped {
            countries: CountryRecord::from_table(&fetched.countries)?,
            states: StateRecord::from_table(&states)?,
            daily: DailyRecord::from_table(&fetched.national_daily)?,
            counties: CountyRecord::latest_from_table(&fetched.counties)?,
            confirmed: DataProcessor::drop_columns(&fetched.confirmed, &SERIES_ID_COLUMNS)?,
            deaths: DataProcessor::drop_columns(&fetched.deaths, &SERIES_ID_COLUMNS)?,
            recovered: DataProcessor::drop_columns(&fetched.recovered, &SERIES_ID_COLUMNS)?,
        })
    }

    fn aggregate(shaped: &Shaped) -> Result<(TimeSeries, TimeSeries, TimeSeries)> {
        let sum = |df: &DataFrame, name: &str| {
            let dates = Aggregator::date_columns(df);
            Aggregator::sum_across_rows(df, &dates, name)
        };

        Ok((
            sum(&shaped.confirmed, "confirmed")?,
            sum(&shaped.deaths, "deaths")?,
            sum(&shaped.recovered, "recovered")?,
        ))
    }
}
