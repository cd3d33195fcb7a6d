//! Table Grid
//! Fixed-column grid of shaped cells.

use tracing::debug;

use super::RenderError;
use crate::data::Cell;

/// How many source rows make it into the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowLimit {
    All,
    /// At most this many rows. Shorter sources render every row they have.
    First(usize),
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableColumn {
    pub header: String,
    pub cells: Vec<Cell>,
}

impl TableColumn {
    pub fn new<C: Into<Cell>>(header: &str, cells: impl IntoIterator<Item = C>) -> Self {
        Self {
            header: header.to_string(),
            cells: cells.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableGrid {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

impl TableGrid {
    /// Transpose columns into rows, truncating to `limit`.
    pub fn new(columns: Vec<TableColumn>, limit: RowLimit) -> Result<Self, RenderError> {
        let height = columns.first().map_or(0, |c| c.cells.len());
        if let Some(bad) = columns.iter().find(|c| c.cells.len() != height) {
            return Err(RenderError::Alignment(format!(
                "column '{}' has {} cells, expected {}",
                bad.header,
                bad.cells.len(),
                height
            )));
        }

        let shown = match limit {
            RowLimit::All => height,
            RowLimit::First(n) => {
                if height < n {
                    debug!(available = height, limit = n, "table source shorter than row limit");
                }
                height.min(n)
            }
        };

        let headers = columns.iter().map(|c| c.header.clone()).collect();
        let rows = (0..shown)
            .map(|i| columns.iter().map(|c| c.cells[i].clone()).collect())
            .collect();

        Ok(Self { headers, rows })
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column(&self, header: &str) -> Option<Vec<&Cell>> {
        let at = self.headers.iter().position(|h| h == header)?;
        Some(self.rows.iter().map(|row| &row[at]).collect())
    }
}
