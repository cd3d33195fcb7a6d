//! Property-based tests for series arithmetic and aggregation.

use chrono::{Duration, NaiveDate};
use polars::prelude::*;
use proptest::prelude::*;

use covid_dashboard::data::{DataProcessor, TimeSeries};
use covid_dashboard::stats::Aggregator;

fn series(name: &str, values: &[i64]) -> TimeSeries {
    let start = NaiveDate::from_ymd_opt(2020, 1, 22).unwrap();
    let points = values
        .iter()
        .enumerate()
        .map(|(i, v)| (start + Duration::days(i as i64), *v))
        .collect();
    TimeSeries::new(name, points).unwrap()
}

fn counts(len: usize) -> impl Strategy<Value = Vec<i64>> {
    prop::collection::vec(0i64..10_000_000, len)
}

proptest! {
    #[test]
    fn active_is_cases_minus_deaths_minus_recovered(
        (cases, deaths, recovered) in (1usize..60).prop_flat_map(|n| (counts(n), counts(n), counts(n)))
    ) {
        let active = DataProcessor::derive_active(
            &series("cases", &cases),
            &series("deaths", &deaths),
            &series("recovered", &recovered),
        )
        .unwrap();

        prop_assert_eq!(active.len(), cases.len());
        for (i, value) in active.values().into_iter().enumerate() {
            prop_assert_eq!(value, cases[i] - deaths[i] - recovered[i]);
        }
    }

    #[test]
    fn misaligned_series_never_derive(
        cases in counts(5),
        extra in 1usize..5,
    ) {
        let shorter = &cases[..5 - extra];
        let result = DataProcessor::derive_active(
            &series("cases", &cases),
            &series("deaths", shorter),
            &series("recovered", &cases),
        );
        prop_assert!(result.is_err());
    }

    #[test]
    fn column_sums_match_manual_totals(
        rows in prop::collection::vec((0i64..1_000_000, 0i64..1_000_000, 0i64..1_000_000), 1..40)
    ) {
        let first: Vec<i64> = rows.iter().map(|r| r.0).collect();
        let second: Vec<i64> = rows.iter().map(|r| r.1).collect();
        let third: Vec<i64> = rows.iter().map(|r| r.2).collect();
        let regions: Vec<String> = (0..rows.len()).map(|i| format!("Region {i}")).collect();

        let df = df!(
            "Country/Region" => regions,
            "1/22/20" => first.clone(),
            "1/23/20" => second.clone(),
            "1/24/20" => third.clone(),
        )
        .unwrap();

        let dates = Aggregator::date_columns(&df);
        prop_assert_eq!(dates.len(), 3);

        let total = Aggregator::sum_across_rows(&df, &dates, "confirmed").unwrap();
        prop_assert_eq!(
            total.values(),
            vec![
                first.iter().sum::<i64>(),
                second.iter().sum::<i64>(),
                third.iter().sum::<i64>(),
            ]
        );
    }
}
