//! Page Composer
//! Places summary numbers and finished artifacts into the fixed two-tab layout.

use super::layout::{Banner, Page, Section, SummaryTile, Tab};
use crate::charts::{format_count, Choropleth, LineChart, TableGrid};
use crate::data::{Cell, DataProcessor};
use crate::stats::{Summary, Totals};

pub const PAGE_TITLE: &str = "Coronavirus Tracker";
pub const PAGE_SUBTITLE: &str = "Data: Johns Hopkins University CSSE, The New York Times";

/// Everything the page shows, already rendered.
#[derive(Debug, Clone)]
pub struct Artifacts {
    pub world_map: Choropleth,
    pub global_status: LineChart,
    pub global_table: TableGrid,
    pub county_map: Choropleth,
    pub national_line: LineChart,
    pub national_table: TableGrid,
}

pub struct Composer;

impl Composer {
    pub fn build_page(summary: &Summary, artifacts: Artifacts) -> Page {
        let Artifacts {
            world_map,
            global_status,
            global_table,
            county_map,
            national_line,
            national_table,
        } = artifacts;

        let global = Tab {
            id: "global".to_string(),
            label: "Global Data".to_string(),
            tiles: Self::tiles("", "Total", &summary.global),
            sections: vec![
                Section::full("map", world_map),
                Section::full("multi-line-graph", global_status),
                Section::full("global-table", global_table),
            ],
        };

        let national = Tab {
            id: "national".to_string(),
            label: format!("{} Data", summary.national_label),
            tiles: Self::tiles("national-", &summary.national_key, &summary.national),
            sections: vec![
                Section::full("national-map", county_map),
                Section::Row(vec![
                    Section::half("national-line-graph", national_line),
                    Section::half("national-table", national_table),
                ]),
            ],
        };

        Page {
            banner: Banner {
                title: PAGE_TITLE.to_string(),
                subtitle: PAGE_SUBTITLE.to_string(),
                last_updated: summary.last_updated.clone(),
            },
            tabs: vec![global, national],
        }
    }

    /// Cases, deaths, recovered; an unreported recovered total shows "No Data".
    fn tiles(id_prefix: &str, caption_prefix: &str, totals: &Totals) -> Vec<SummaryTile> {
        let recovered = match DataProcessor::fill_missing(totals.recovered) {
            Cell::Count(n) => format_count(n),
            other => other.to_string(),
        };

        [
            ("cases", "Cases", format_count(totals.confirmed)),
            ("deaths", "Deaths", format_count(totals.deaths)),
            ("recovered", "Recovered", recovered),
        ]
        .into_iter()
        .map(|(id, caption, value)| SummaryTile {
            id: format!("{id_prefix}{id}"),
            value,
            caption: format!("{caption_prefix} {caption}"),
        })
        .collect()
    }
}
