//! Format-neutral workbook model produced by the reporting engine.
//!
//! Encoders (see `infra::xlsx`) turn a [`TabularDocument`] into bytes.

/// A workbook: ordered sheets plus the author recorded in its properties.
#[derive(Debug, Clone, PartialEq)]
pub struct TabularDocument {
    pub creator: String,
    pub sheets: Vec<Sheet>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Sheet {
    pub name: String,
    /// Width per column in character units; columns past the end use the default width.
    pub column_widths: Vec<f64>,
    pub rows: Vec<Row>,
}

/// Visual role of a row. Encoders map each role to one cell style.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowStyle {
    Plain,
    Header,
    Title,
    SummaryHeader,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub style: RowStyle,
    pub cells: Vec<Cell>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Number(f64),
}

impl Row {
    pub fn plain(cells: Vec<Cell>) -> Self {
        Self {
            style: RowStyle::Plain,
            cells,
        }
    }

    pub fn blank() -> Self {
        Self::plain(Vec::new())
    }

    /// A row of text cells sharing one style.
    pub fn labels(style: RowStyle, labels: &[&str]) -> Self {
        Self {
            style,
            cells: labels.iter().map(|l| Cell::text(*l)).collect(),
        }
    }
}

impl Cell {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }
}

impl From<f64> for Cell {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<usize> for Cell {
    fn from(value: usize) -> Self {
        Self::Number(value as f64)
    }
}
