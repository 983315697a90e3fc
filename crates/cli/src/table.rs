// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Column-aligned text tables.
//!
//! Widths are measured on the plain cell text; colors are applied after
//! padding so escape codes never skew alignment.

pub struct Column {
    pub header: &'static str,
    paint: Option<fn(&str) -> String>,
}

impl Column {
    pub fn new(header: &'static str) -> Self {
        Self { header, paint: None }
    }

    pub fn painted(header: &'static str, paint: fn(&str) -> String) -> Self {
        Self { header, paint: Some(paint) }
    }
}

pub struct Table {
    columns: Vec<Column>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(columns: Vec<Column>) -> Self {
        Self { columns, rows: Vec::new() }
    }

    pub fn row(&mut self, cells: Vec<String>) {
        self.rows.push(cells);
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn render(&self) -> String {
        let widths: Vec<usize> = self
            .columns
            .iter()
            .enumerate()
            .map(|(i, col)| {
                self.rows
                    .iter()
                    .filter_map(|r| r.get(i))
                    .map(|c| c.chars().count())
                    .chain(std::iter::once(col.header.len()))
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        let mut out = String::new();
        let headers: Vec<String> = self.columns.iter().map(|c| c.header.to_string()).collect();
        push_line(&mut out, &headers, &widths, |_, text| crate::color::header(text));
        for row in &self.rows {
            push_line(&mut out, row, &widths, |i, text| {
                match self.columns.get(i).and_then(|c| c.paint) {
                    Some(paint) => paint(text),
                    None => text.to_string(),
                }
            });
        }
        out
    }
}

fn push_line(
    out: &mut String,
    cells: &[String],
    widths: &[usize],
    paint: impl Fn(usize, &str) -> String,
) {
    let last = widths.len().saturating_sub(1);
    for (i, width) in widths.iter().enumerate() {
        let cell = cells.get(i).map(String::as_str).unwrap_or("");
        let padded = if i == last { cell.to_string() } else { format!("{cell:<width$}") };
        out.push_str(&paint(i, &padded));
        if i != last {
            out.push_str("  ");
        }
    }
    out.push('\n');
}

#[cfg(test)]
#[path = "table_tests.rs"]
mod tests;
