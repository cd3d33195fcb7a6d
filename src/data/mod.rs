//! Data module - fetching, decoding and shaping source datasets

mod geo;
mod loader;
mod processor;
mod records;
mod series;

pub use geo::{Feature, FeatureCollection, Geometry};
pub use loader::{is_remote, parse_json, parse_table, DataLoader, FetchError};
pub use processor::{Cell, DataProcessor, ShapeError, NO_DATA};
pub use records::{CountryRecord, CountyRecord, DailyRecord, StateRecord};
pub use series::{parse_date, TimeSeries};
