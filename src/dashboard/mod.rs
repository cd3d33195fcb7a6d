//! Dashboard Module
//! Page layout, composition, the render pass and its HTTP front end.

mod composer;
mod figures;
pub mod html;
mod layout;
mod pipeline;
mod server;

pub use composer::{Artifacts, Composer, PAGE_SUBTITLE, PAGE_TITLE};
pub use figures::{
    Figures, ACTIVE_CASES, COUNTY_CASE_BOUNDS, GLOBAL_CASE_BOUNDS, NATIONAL_TABLE_ROWS,
    TOTAL_CASES, TOTAL_DEATHS, TOTAL_RECOVERED,
};
pub use layout::{Banner, Page, Section, SummaryTile, Tab, Width};
pub use pipeline::Dashboard;
pub use server::{router, serve};
