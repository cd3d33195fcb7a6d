//! Error display and conversion tests.

use covid_dashboard::charts::RenderError;
use covid_dashboard::config::{ConfigError, Settings};
use covid_dashboard::data::{FetchError, ShapeError};
use covid_dashboard::DashboardError;

#[test]
fn fetch_errors_name_the_source() {
    let err: DashboardError = FetchError::Network {
        url: "https://example.org/cases.csv".to_string(),
        message: "HTTP status 503".to_string(),
    }
    .into();

    let message = err.to_string();
    assert!(message.contains("https://example.org/cases.csv"));
    assert!(message.contains("503"));
}

#[test]
fn shape_errors_name_the_column() {
    let err: DashboardError = ShapeError::Schema {
        column: "Confirmed".to_string(),
    }
    .into();
    assert!(err.to_string().contains("Confirmed"));

    let err: DashboardError = ShapeError::MissingRow {
        column: "Country_Region".to_string(),
        key: "US".to_string(),
    }
    .into();
    assert!(err.to_string().contains("'US'"));
}

#[test]
fn render_errors_roll_up() {
    let err: DashboardError = RenderError::Alignment("2 locations, 3 values".to_string()).into();
    assert!(matches!(err, DashboardError::Render(_)));
    assert!(err.to_string().contains("2 locations, 3 values"));
}

#[test]
fn missing_config_is_a_read_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = Settings::load(Some(dir.path().join("absent.json").as_path())).unwrap_err();
    assert!(matches!(err, ConfigError::Read { .. }));
}
