//! Typed records
//! Projects raw source tables into per-schema structs, validating required columns.

use chrono::NaiveDate;
use polars::prelude::*;
use std::collections::HashMap;

use super::series::parse_date;
use super::{ShapeError, TimeSeries};

fn text_column(df: &DataFrame, name: &str) -> Result<Vec<Option<String>>, ShapeError> {
    let col = df
        .column(name)
        .map_err(|_| ShapeError::schema(name))?
        .cast(&DataType::String)?;
    Ok(col
        .str()?
        .into_iter()
        .map(|v| v.map(str::trim).filter(|s| !s.is_empty()).map(str::to_string))
        .collect())
}

fn count_column(df: &DataFrame, name: &str) -> Result<Vec<Option<i64>>, ShapeError> {
    let col = df
        .column(name)
        .map_err(|_| ShapeError::schema(name))?
        .cast(&DataType::Float64)?;
    Ok(col
        .f64()?
        .into_iter()
        .map(|v| v.filter(|x| x.is_finite()).map(|x| x.round() as i64))
        .collect())
}

fn optional<T>(
    df: &DataFrame,
    name: &str,
    read: fn(&DataFrame, &str) -> Result<Vec<Option<T>>, ShapeError>,
) -> Result<Vec<Option<T>>, ShapeError> {
    if df.column(name).is_ok() {
        read(df, name)
    } else {
        Ok((0..df.height()).map(|_| None).collect())
    }
}

/// One country row of the country summary table.
#[derive(Debug, Clone, PartialEq)]
pub struct CountryRecord {
    pub name: String,
    pub iso3: Option<String>,
    pub confirmed: i64,
    pub deaths: i64,
    pub recovered: Option<i64>,
    pub active: i64,
}

impl CountryRecord {
    pub fn from_table(df: &DataFrame) -> Result<Vec<Self>, ShapeError> {
        let names = text_column(df, "Country_Region")?;
        let confirmed = count_column(df, "Confirmed")?;
        let deaths = count_column(df, "Deaths")?;
        let recovered = optional(df, "Recovered", count_column)?;
        let active = optional(df, "Active", count_column)?;
        let iso3 = optional(df, "ISO3", text_column)?;

        let records = names
            .into_iter()
            .enumerate()
            .filter_map(|(i, name)| {
                let name = name?;
                let confirmed = confirmed[i].unwrap_or(0);
                let deaths = deaths[i].unwrap_or(0);
                let recovered = recovered[i];
                // Derive when the source leaves Active blank
                let active = active[i].unwrap_or(confirmed - deaths - recovered.unwrap_or(0));
                Some(Self {
                    name,
                    iso3: iso3[i].clone(),
                    confirmed,
                    deaths,
                    recovered,
                    active,
                })
            })
            .collect();
        Ok(records)
    }

    /// Look a region up by name, never by row position.
    pub fn find<'a>(records: &'a [Self], name: &str) -> Result<&'a Self, ShapeError> {
        records
            .iter()
            .find(|r| r.name == name)
            .ok_or_else(|| ShapeError::MissingRow {
                column: "Country_Region".to_string(),
                key: name.to_string(),
            })
    }
}

/// One row of the state summary table.
#[derive(Debug, Clone, PartialEq)]
pub struct StateRecord {
    pub name: String,
    pub confirmed: i64,
    pub deaths: i64,
    pub recovered: Option<i64>,
}

impl StateRecord {
    pub fn from_table(df: &DataFrame) -> Result<Vec<Self>, ShapeError> {
        let names = text_column(df, "Province_State")?;
        let confirmed = count_column(df, "Confirmed")?;
        let deaths = count_column(df, "Deaths")?;
        let recovered = count_column(df, "Recovered")?;

        Ok(names
            .into_iter()
            .enumerate()
            .filter_map(|(i, name)| {
                Some(Self {
                    name: name?,
                    confirmed: confirmed[i].unwrap_or(0),
                    deaths: deaths[i].unwrap_or(0),
                    recovered: recovered[i],
                })
            })
            .collect())
    }
}

/// Latest cumulative count for one county.
#[derive(Debug, Clone, PartialEq)]
pub struct CountyRecord {
    pub fips: String,
    pub county: String,
    pub state: String,
    pub date: Option<NaiveDate>,
    pub cases: i64,
}

/// FIPS codes lose their leading zero when the reader infers an integer column.
fn normalize_fips(raw: &str) -> String {
    match raw.parse::<f64>() {
        Ok(n) if n.fract() == 0.0 && n >= 0.0 => format!("{:05}", n as i64),
        _ => raw.to_string(),
    }
}

impl CountyRecord {
    /// The county table repeats every county once per date; keep the newest
    /// row per FIPS code, in first-seen order. Rows without a FIPS code are
    /// dropped.
    pub fn latest_from_table(df: &DataFrame) -> Result<Vec<Self>, ShapeError> {
        let dates = text_column(df, "date")?;
        let counties = text_column(df, "county")?;
        let states = text_column(df, "state")?;
        let fips = text_column(df, "fips")?;
        let cases = count_column(df, "cases")?;

        let mut records: Vec<Self> = Vec::new();
        let mut index: HashMap<String, usize> = HashMap::new();

        for i in 0..df.height() {
            let Some(code) = fips[i].as_deref().map(normalize_fips) else {
                continue;
            };
            let record = Self {
                fips: code.clone(),
                county: counties[i].clone().unwrap_or_default(),
                state: states[i].clone().unwrap_or_default(),
                date: dates[i].as_deref().and_then(parse_date),
                cases: cases[i].unwrap_or(0),
            };

            match index.get(&code) {
                Some(&at) if records[at].date > record.date => {}
                Some(&at) => records[at] = record,
                None => {
                    index.insert(code, records.len());
                    records.push(record);
                }
            }
        }

        Ok(records)
    }

    /// "State, County" label
    pub fn label(&self) -> String {
        format!("{}, {}", self.state, self.county)
    }
}

/// One day of the national daily table.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyRecord {
    pub date: NaiveDate,
    pub cases: i64,
    pub deaths: Option<i64>,
}

impl DailyRecord {
    /// Rows with an unparseable date are skipped.
    pub fn from_table(df: &DataFrame) -> Result<Vec<Self>, ShapeError> {
        let dates = text_column(df, "date")?;
        let cases = count_column(df, "cases")?;
        let deaths = optional(df, "deaths", count_column)?;

        Ok(dates
            .into_iter()
            .enumerate()
            .filter_map(|(i, date)| {
                Some(Self {
                    date: parse_date(date.as_deref()?)?,
                    cases: cases[i].unwrap_or(0),
                    deaths: deaths[i],
                })
            })
            .collect())
    }

    pub fn cases_series(records: &[Self], name: &str) -> Result<TimeSeries, ShapeError> {
        TimeSeries::new(name, records.iter().map(|r| (r.date, r.cases)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::parse_table;

    fn table(csv: &str) -> DataFrame {
        parse_table("inline", csv.as_bytes().to_vec()).unwrap()
    }

    #[test]
    fn country_records_derive_active_when_blank() {
        let df = table(
            "Country_Region,Confirmed,Deaths,Recovered,Active,ISO3\n\
             Italy,100,10,20,,ITA\n\
             Spain,200,20,,150,ESP\n",
        );
        let records = CountryRecord::from_table(&df).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].active, 70);
        assert_eq!(records[0].iso3.as_deref(), Some("ITA"));
        assert_eq!(records[1].recovered, None);
        assert_eq!(records[1].active, 150);
    }

    #[test]
    fn country_lookup_is_by_name() {
        let df = table("Country_Region,Confirmed,Deaths\nItaly,1,0\nUS,5,1\n");
        let records = CountryRecord::from_table(&df).unwrap();

        assert_eq!(CountryRecord::find(&records, "US").unwrap().confirmed, 5);
        let err = CountryRecord::find(&records, "France").unwrap_err();
        assert!(matches!(err, ShapeError::MissingRow { .. }));
    }

    #[test]
    fn missing_required_column_is_schema_error() {
        let df = table("Country_Region,Confirmed\nItaly,1\n");
        let err = CountryRecord::from_table(&df).unwrap_err();
        match err {
            ShapeError::Schema { column } => assert_eq!(column, "Deaths"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn counties_keep_latest_row_and_pad_fips() {
        let df = table(
            "date,county,state,fips,cases,deaths\n\
             2020-03-01,Autauga,Alabama,1001,1,0\n\
             2020-03-01,New York City,New York,,50,2\n\
             2020-03-02,Autauga,Alabama,1001,4,0\n\
             2020-03-02,Baldwin,Alabama,1003,2,0\n",
        );
        let records = CountyRecord::latest_from_table(&df).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].fips, "01001");
        assert_eq!(records[0].cases, 4);
        assert_eq!(records[0].label(), "Alabama, Autauga");
        assert_eq!(records[1].fips, "01003");
    }

    #[test]
    fn daily_records_become_a_series() {
        let df = table("date,cases,deaths\n2020-01-21,1,0\n2020-01-22,3,0\n");
        let records = DailyRecord::from_table(&df).unwrap();
        let series = DailyRecord::cases_series(&records, "cases").unwrap();

        assert_eq!(series.values(), vec![1, 3]);
        assert_eq!(
            series.date_span().unwrap().0,
            NaiveDate::from_ymd_opt(2020, 1, 21).unwrap()
        );
    }
}
