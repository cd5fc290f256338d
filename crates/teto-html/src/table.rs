//! HTML tables as rectangular text grids.
//!
//! Each `<table>` yields one [`Grid`] made of its own rows only: rows of a
//! nested table belong to the nested table's grid. Spanned cells are repeated
//! into every row and column they cover, and short rows are padded with empty
//! strings, so every grid is rectangular.

use tracing::debug;

use crate::dom::Element;
use crate::error::GridError;

/// Upper bound honoured for `colspan`/`rowspan`, as browsers do.
const MAX_SPAN: usize = 1000;

/// A rectangular grid of normalized cell texts.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Grid {
    rows: Vec<Vec<String>>,
    width: usize,
}

impl Grid {
    /// Builds a grid, padding rows to the widest one.
    pub fn from_rows(mut rows: Vec<Vec<String>>) -> Self {
        let width = rows.iter().map(Vec::len).max().unwrap_or(0);
        for row in &mut rows {
            row.resize(width, String::new());
        }
        Self { rows, width }
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// True when the grid has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows, each exactly [`Grid::width`] cells long.
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Concatenates grids top to bottom, preserving row order.
    ///
    /// # Errors
    ///
    /// [`GridError::Empty`] when `grids` is empty and
    /// [`GridError::WidthMismatch`] when any grid's width differs from the
    /// first one's.
    pub fn concat(grids: Vec<Grid>) -> Result<Grid, GridError> {
        let expected = grids.first().ok_or(GridError::Empty)?.width;
        if let Some((index, grid)) = grids.iter().enumerate().find(|(_, g)| g.width != expected) {
            return Err(GridError::WidthMismatch {
                index,
                expected,
                found: grid.width,
            });
        }
        let rows = grids.into_iter().flat_map(|g| g.rows).collect();
        Ok(Grid {
            rows,
            width: expected,
        })
    }
}

/// Parses every table at or below `root` (document order) into grids.
/// Tables without rows of their own are skipped.
pub fn parse_tables(root: &Element) -> Vec<Grid> {
    let grids: Vec<Grid> = root
        .find_all("table")
        .into_iter()
        .filter_map(parse_table)
        .collect();
    debug!(
        tables = grids.len(),
        widths = ?grids.iter().map(Grid::width).collect::<Vec<_>>(),
        "parsed table grids"
    );
    grids
}

/// Parses one table element into a grid, or `None` if it has no rows.
pub fn parse_table(table: &Element) -> Option<Grid> {
    let mut pending: Vec<Option<(String, usize)>> = Vec::new();
    let mut rows = Vec::new();

    for tr in own_rows(table) {
        let mut row: Vec<String> = Vec::new();
        let mut cells = tr
            .child_elements()
            .filter(|e| matches!(e.name(), "td" | "th"));

        loop {
            fill_pending(&mut pending, &mut row, false);
            let Some(cell) = cells.next() else { break };
            let text = cell.normalized_text();
            let colspan = span(cell, "colspan");
            let rowspan = span(cell, "rowspan");
            for _ in 0..colspan {
                let column = row.len();
                if rowspan > 1 {
                    if pending.len() <= column {
                        pending.resize(column + 1, None);
                    }
                    pending[column] = Some((text.clone(), rowspan - 1));
                }
                row.push(text.clone());
            }
        }
        // Row-spanned cells to the right of the last explicit cell.
        fill_pending(&mut pending, &mut row, true);

        if !row.is_empty() {
            rows.push(row);
        }
    }

    if rows.is_empty() {
        None
    } else {
        Some(Grid::from_rows(rows))
    }
}

/// Places carried-over row-spanned cells at the current position. With
/// `to_end`, also pads gaps so spans further right land in their column.
fn fill_pending(pending: &mut [Option<(String, usize)>], row: &mut Vec<String>, to_end: bool) {
    while let Some(slot) = pending.get_mut(row.len()) {
        if let Some((text, remaining)) = slot {
            row.push(text.clone());
            *remaining -= 1;
            if *remaining == 0 {
                *slot = None;
            }
        } else if to_end && pending[row.len()..].iter().any(Option::is_some) {
            row.push(String::new());
        } else {
            return;
        }
    }
}

fn own_rows(table: &Element) -> Vec<&Element> {
    let mut rows = Vec::new();
    for child in table.child_elements() {
        match child.name() {
            "tr" => rows.push(child),
            "thead" | "tbody" | "tfoot" => rows.extend(child.children_named("tr")),
            _ => {}
        }
    }
    rows
}

fn span(cell: &Element, attr: &str) -> usize {
    cell.attr(attr)
        .and_then(|v| v.trim().parse::<usize>().ok())
        .filter(|&n| n > 0)
        .map_or(1, |n| n.min(MAX_SPAN))
}
