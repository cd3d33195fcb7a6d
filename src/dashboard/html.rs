//! Page Writer
//! Serialises a composed `Page` into one self-contained HTML document.
//! Maps and charts are inlined as SVG; tables become `<table>` markup.

use std::fmt::Write;

use super::layout::{Page, Section, SummaryTile, Tab, Width};
use crate::charts::{css_hex, RenderError, RenderedArtifact, TableGrid, PAGE_BACKGROUND, PANEL_BACKGROUND};
use crate::data::Cell;

const STYLE: &str = r#"
body { margin: 0; color: #f2f5fa; font-family: "Open Sans", Helvetica, Arial, sans-serif; }
.container { max-width: 1280px; margin: 0 auto; padding: 0 20px; }
#banner h1 { color: white; padding-top: 25px; margin-bottom: 0; }
#banner h6, #banner p { color: #d2d3d6; margin: 0 0 10px 0; }
.tabs > input { display: none; }
.tabs > label { display: inline-block; padding: 12px 28px; margin: 0 10px 15px 0; border-radius: 5px;
  background: #535a66; color: white; cursor: pointer; box-shadow: 0 10px 6px -6px #282b2e; }
.tabs > input:checked + label { background: #2b3038; }
.tab-panel { display: none; }
#tab-global:checked ~ #panel-global, #tab-national:checked ~ #panel-national { display: block; }
.row { display: flex; gap: 20px; flex-wrap: wrap; }
.mini_container { flex: 1; border-radius: 5px; margin: 10px 0; padding: 15px; text-align: center; }
.mini_container h4 { margin: 0; font-size: 1.8em; }
.pretty_container { border-radius: 5px; margin: 10px 0; padding: 15px; overflow: auto; }
.pretty_container.full { width: 100%; box-sizing: border-box; }
.pretty_container.half { flex: 1 1 0; min-width: 420px; }
.pretty_container svg { max-width: 100%; height: auto; }
table { border-collapse: collapse; width: 100%; font-size: 12px; }
th { background: #17181a; color: white; text-align: left; padding: 6px; position: sticky; top: 0; }
td { background: #555863; color: white; padding: 4px 6px; }
td.no-data { color: #d2d3d6; font-style: italic; }
.table-scroll { max-height: 450px; overflow-y: auto; }
"#;

/// Page and panel colours, shared with the rendered charts.
fn theme() -> String {
    let page = css_hex(PAGE_BACKGROUND);
    let panel = css_hex(PANEL_BACKGROUND);
    format!(
        "body {{ background: {page}; }}\n\
         .mini_container, .pretty_container {{ background: {panel}; }}\n\
         td {{ border-bottom: 1px solid {panel}; }}\n"
    )
}

/// Escape text for element content and attribute values.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

pub fn write_page(page: &Page) -> Result<String, RenderError> {
    let mut html = String::with_capacity(1 << 20);
    let banner = &page.banner;

    // fmt::Write into a String cannot fail
    let _ = write!(
        html,
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{title}</title>\n<style>{theme}{STYLE}</style>\n</head>\n<body>\n\
         <div id=\"banner\" class=\"container\">\n<h1>{title}</h1>\n<h6>{subtitle}</h6>\n\
         <p>Data Last Updated: {updated}</p>\n</div>\n",
        title = escape(&banner.title),
        theme = theme(),
        subtitle = escape(&banner.subtitle),
        updated = escape(&banner.last_updated),
    );

    html.push_str("<div class=\"container tabs\">\n");
    for (i, tab) in page.tabs.iter().enumerate() {
        let checked = if i == 0 { " checked" } else { "" };
        let _ = writeln!(
            html,
            "<input type=\"radio\" name=\"tabs\" id=\"tab-{id}\"{checked}><label for=\"tab-{id}\">{label}</label>",
            id = escape(&tab.id),
            label = escape(&tab.label),
        );
    }
    for tab in &page.tabs {
        write_tab(&mut html, tab)?;
    }
    html.push_str("</div>\n</body>\n</html>\n");

    Ok(html)
}

fn write_tab(html: &mut String, tab: &Tab) -> Result<(), RenderError> {
    let _ = writeln!(html, "<div class=\"tab-panel\" id=\"panel-{}\">", escape(&tab.id));

    html.push_str("<div class=\"row\">\n");
    for tile in &tab.tiles {
        write_tile(html, tile);
    }
    html.push_str("</div>\n");

    for section in &tab.sections {
        write_section(html, section)?;
    }

    html.push_str("</div>\n");
    Ok(())
}

fn write_tile(html: &mut String, tile: &SummaryTile) {
    let _ = writeln!(
        html,
        "<div id=\"{}\" class=\"mini_container\"><h4>{}</h4><p>{}</p></div>",
        escape(&tile.id),
        escape(&tile.value),
        escape(&tile.caption),
    );
}

fn write_section(html: &mut String, section: &Section) -> Result<(), RenderError> {
    match section {
        Section::Row(children) => {
            html.push_str("<div class=\"row\">\n");
            for child in children {
                write_section(html, child)?;
            }
            html.push_str("</div>\n");
        }
        Section::Artifact {
            id,
            width,
            artifact,
        } => {
            let class = match width {
                Width::Full => "full",
                Width::Half => "half",
            };
            let _ = writeln!(
                html,
                "<div id=\"{}\" class=\"pretty_container {class}\">",
                escape(id)
            );
            html.push_str(&artifact_markup(artifact)?);
            html.push_str("\n</div>\n");
        }
    }
    Ok(())
}

fn artifact_markup(artifact: &RenderedArtifact) -> Result<String, RenderError> {
    match artifact {
        RenderedArtifact::Choropleth(map) => map.to_svg(),
        RenderedArtifact::Line(chart) => chart.to_svg(),
        RenderedArtifact::Table(table) => Ok(table_markup(table)),
    }
}

fn table_markup(table: &TableGrid) -> String {
    let mut html = String::from("<div class=\"table-scroll\"><table>\n<thead><tr>");
    for header in &table.headers {
        let _ = write!(html, "<th>{}</th>", escape(header));
    }
    html.push_str("</tr></thead>\n<tbody>\n");

    for row in &table.rows {
        html.push_str("<tr>");
        for cell in row {
            match cell {
                Cell::NoData => {
                    let _ = write!(html, "<td class=\"no-data\">{}</td>", escape(&cell.to_string()));
                }
                _ => {
                    let _ = write!(html, "<td>{}</td>", escape(&cell.to_string()));
                }
            }
        }
        html.push_str("</tr>\n");
    }

    html.push_str("</tbody>\n</table></div>");
    html
}
