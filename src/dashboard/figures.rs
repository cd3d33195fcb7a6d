//! Dashboard Figures
//! The fixed set of visuals on the page, built from shaped records and series.

use crate::charts::{
    ChartRenderer, Choropleth, ColorBounds, LineChart, MapView, RowLimit, TableColumn, TableGrid,
};
use crate::data::{
    CountryRecord, CountyRecord, DailyRecord, DataProcessor, FeatureCollection, StateRecord,
    TimeSeries,
};
use crate::error::Result;

/// World map colour range (cases per country).
pub const GLOBAL_CASE_BOUNDS: ColorBounds = ColorBounds::new(0.0, 100_000.0);
/// County map colour range (cases per county).
pub const COUNTY_CASE_BOUNDS: ColorBounds = ColorBounds::new(0.0, 200.0);
/// Rows shown in the national table (50 states plus districts and territories).
pub const NATIONAL_TABLE_ROWS: usize = 57;

pub const TOTAL_CASES: &str = "Total Cases";
pub const ACTIVE_CASES: &str = "Active Cases";
pub const TOTAL_RECOVERED: &str = "Total Recovered";
pub const TOTAL_DEATHS: &str = "Total Deaths";

pub struct Figures;

impl Figures {
    /// Confirmed cases per country, keyed by ISO3. Countries without a code are left off.
    pub fn world_map(countries: &[CountryRecord], geometry: FeatureCollection) -> Result<Choropleth> {
        let (locations, values): (Vec<String>, Vec<i64>) = countries
            .iter()
            .filter_map(|c| Some((c.iso3.clone()?, c.confirmed)))
            .unzip();

        Ok(
            ChartRenderer::choropleth(&locations, &values, GLOBAL_CASE_BOUNDS)?
                .with_title("Global Cases")
                .with_geometry(geometry, MapView::WORLD),
        )
    }

    /// Latest cases per county, keyed by FIPS.
    pub fn county_map(counties: &[CountyRecord], geometry: FeatureCollection) -> Result<Choropleth> {
        let locations: Vec<String> = counties.iter().map(|c| c.fips.clone()).collect();
        let values: Vec<i64> = counties.iter().map(|c| c.cases).collect();

        Ok(
            ChartRenderer::choropleth(&locations, &values, COUNTY_CASE_BOUNDS)?
                .with_title("Cases by County")
                .with_geometry(geometry, MapView::CONTIGUOUS_US)
                .with_size(1000, 560),
        )
    }

    /// Cases, derived active cases, recoveries and deaths on one filled chart.
    pub fn global_status(
        cases: TimeSeries,
        deaths: TimeSeries,
        recovered: TimeSeries,
    ) -> Result<LineChart> {
        let active = DataProcessor::derive_active(&cases, &deaths, &recovered)?;
        let traces = vec![
            cases.with_name(TOTAL_CASES),
            active.with_name(ACTIVE_CASES),
            recovered.with_name(TOTAL_RECOVERED),
            deaths.with_name(TOTAL_DEATHS),
        ];

        Ok(ChartRenderer::multi_line("Global Case Status", traces)
            .with_axes("Date", "Number of People"))
    }

    pub fn national_line(daily: &[DailyRecord], national_key: &str) -> Result<LineChart> {
        let series = DailyRecord::cases_series(daily, "cases")?;
        Ok(
            ChartRenderer::line(&format!("Cases in the {national_key}"), series)
                .with_axes("date", "cases")
                .with_size(620, 450),
        )
    }

    pub fn global_table(countries: &[CountryRecord]) -> Result<TableGrid> {
        let columns = vec![
            TableColumn::new("Country/Region", countries.iter().map(|c| c.name.as_str())),
            TableColumn::new("Cases", countries.iter().map(|c| c.confirmed)),
            TableColumn::new("Active Cases", countries.iter().map(|c| c.active)),
            TableColumn::new("Deaths", countries.iter().map(|c| c.deaths)),
            TableColumn::new("Recovered", countries.iter().map(|c| c.recovered)),
        ];
        Ok(ChartRenderer::table(columns, RowLimit::All)?)
    }

    /// First rows of the state table, with unreported recoveries shown as "No Data".
    pub fn national_table(states: &[StateRecord]) -> Result<TableGrid> {
        let columns = vec![
            TableColumn::new("State", states.iter().map(|s| s.name.as_str())),
            TableColumn::new("Cases", states.iter().map(|s| s.confirmed)),
            TableColumn::new("Deaths", states.iter().map(|s| s.deaths)),
            TableColumn::new(
                "Recovered",
                states.iter().map(|s| DataProcessor::fill_missing(s.recovered)),
            ),
        ];
        Ok(ChartRenderer::table(columns, RowLimit::First(NATIONAL_TABLE_ROWS))?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Cell;
    use chrono::NaiveDate;

    fn series(name: &str, values: &[i64]) -> TimeSeries {
        let start = NaiveDate::from_ymd_opt(2020, 1, 22).unwrap();
        let points = values
            .iter()
            .enumerate()
            .map(|(i, v)| (start + chrono::Duration::days(i as i64), *v))
            .collect();
        TimeSeries::new(name, points).unwrap()
    }

    #[test]
    fn global_status_has_four_named_traces() {
        let chart = Figures::global_status(
            series("confirmed", &[10, 20, 30]),
            series("deaths", &[1, 2, 3]),
            series("recovered", &[2, 3, 4]),
        )
        .unwrap();

        assert_eq!(
            chart.series_names(),
            vec![TOTAL_CASES, ACTIVE_CASES, TOTAL_RECOVERED, TOTAL_DEATHS]
        );
        assert_eq!(chart.series_named(ACTIVE_CASES).unwrap().values(), vec![7, 15, 23]);
        assert!(chart.filled);
    }

    #[test]
    fn global_status_rejects_misaligned_inputs() {
        let result = Figures::global_status(
            series("confirmed", &[10, 20, 30]),
            series("deaths", &[1, 2]),
            series("recovered", &[2, 3, 4]),
        );
        assert!(result.is_err());
    }

    #[test]
    fn national_table_fills_missing_recoveries() {
        let states: Vec<StateRecord> = [("Alabama", Some(120)), ("Alaska", Some(0)), ("Arizona", None)]
            .into_iter()
            .map(|(name, recovered)| StateRecord {
                name: name.to_string(),
                confirmed: 500,
                deaths: 5,
                recovered,
            })
            .collect();

        let table = Figures::national_table(&states).unwrap();
        assert_eq!(table.headers, ["State", "Cases", "Deaths", "Recovered"]);
        assert_eq!(
            table.column("Recovered").unwrap(),
            vec![&Cell::Count(120), &Cell::NoData, &Cell::NoData]
        );
    }

    #[test]
    fn world_map_skips_countries_without_iso3() {
        let countries = vec![
            CountryRecord {
                name: "Italy".to_string(),
                iso3: Some("ITA".to_string()),
                confirmed: 250_000,
                deaths: 1,
                recovered: None,
                active: 0,
            },
            CountryRecord {
                name: "Diamond Princess".to_string(),
                iso3: None,
                confirmed: 700,
                deaths: 1,
                recovered: None,
                active: 0,
            },
        ];

        let map = Figures::world_map(&countries, FeatureCollection::default()).unwrap();
        assert_eq!(map.regions.len(), 1);
        assert_eq!(map.region("ITA").unwrap().value, 250_000);
    }
}
