use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

/// One cleaned delivery-request row.
///
/// Quantity fields are always concrete (blank cells become 0 during
/// loading); only the lead time may stay missing, and missing lead times
/// are excluded from averages rather than counted as zero.
#[derive(Debug, Clone)]
pub struct Record {
    pub request_type: String,
    pub year: i32,
    pub month: String,
    pub briefing: String,
    pub total: f64,
    pub lead_time_days: Option<f64>,
    pub area: Option<String>,
    pub category: Option<String>,
    pub campaign: Option<String>,
    pub tactical_pieces: f64,
    pub strategic_pieces: f64,
    pub tactical_brief: bool,
    pub strategic_brief: bool,
    pub complexity: Option<Complexity>,
    pub low_pieces: f64,
    pub medium_pieces: f64,
    pub high_pieces: f64,
    pub internal_adjustments: f64,
    pub partner_adjustments: f64,
    pub ai_assisted: f64,
    /// Named piece-type quantity columns, keyed by CSV header. Only columns
    /// the loaded dataset version actually declares have an entry, so a
    /// lookup miss means "this version has no such column" and counts as
    /// zero.
    pub piece_columns: HashMap<String, f64>,
}

impl Record {
    pub fn piece_quantity(&self, column: &str) -> f64 {
        self.piece_columns.get(column).copied().unwrap_or(0.0)
    }
}

/// Closed complexity classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Complexity {
    Baixa,
    Media,
    Alta,
}

impl Complexity {
    pub const ALL: [Complexity; 3] = [Complexity::Baixa, Complexity::Media, Complexity::Alta];

    /// The tier name as it appears in the CSV and in row labels.
    pub fn label(self) -> &'static str {
        match self {
            Complexity::Baixa => "Baixa",
            Complexity::Media => "Média",
            Complexity::Alta => "Alta",
        }
    }

    pub fn parse(s: &str) -> Option<Complexity> {
        match s.trim() {
            "Baixa" => Some(Complexity::Baixa),
            "Média" => Some(Complexity::Media),
            "Alta" => Some(Complexity::Alta),
            _ => None,
        }
    }

    /// The record's dedicated piece-count column for this tier.
    pub fn pieces(self, r: &Record) -> f64 {
        match self {
            Complexity::Baixa => r.low_pieces,
            Complexity::Media => r.medium_pieces,
            Complexity::Alta => r.high_pieces,
        }
    }
}

/// One dashboard cell: a label or campaign string, an integer count, or a
/// lead-time average already rounded to one decimal. Serializes untagged so
/// the JSON carries plain scalars.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Cell {
    Text(String),
    Int(i64),
    Float(f64),
}

impl Cell {
    pub fn empty() -> Cell {
        Cell::Text(String::new())
    }
}

impl From<&str> for Cell {
    fn from(s: &str) -> Cell {
        Cell::Text(s.to_string())
    }
}

impl From<String> for Cell {
    fn from(s: String) -> Cell {
        Cell::Text(s)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Text(s) => write!(f, "{}", s),
            Cell::Int(n) => write!(f, "{}", n),
            Cell::Float(v) => write!(f, "{:.1}", v),
        }
    }
}

/// A dashboard row: a label cell followed by twelve month cells.
pub type Row = Vec<Cell>;

/// Successful response shape, matching the JSON contract consumers of the
/// dashboard expect.
#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub success: bool,
    pub squad: String,
    pub ano: i32,
    pub linhas_processadas: usize,
    pub request_types: Vec<String>,
    pub total_briefings: usize,
    pub total_entregas: i64,
    pub generated_at: DateTime<Utc>,
    pub dashboard: Vec<Row>,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
    pub tipo: String,
    pub status: u16,
}

impl ErrorResponse {
    pub fn from_error(e: &crate::error::DashboardError) -> ErrorResponse {
        ErrorResponse {
            success: false,
            error: e.to_string(),
            tipo: e.kind().to_string(),
            status: e.status_class(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cell_serializes_untagged() {
        let row: Row = vec![Cell::from("Briefings"), Cell::Int(3), Cell::Float(2.5)];
        let json = serde_json::to_string(&row).unwrap();
        assert_eq!(json, r#"["Briefings",3,2.5]"#);
    }

    #[test]
    fn float_cells_display_one_decimal() {
        assert_eq!(Cell::Float(2.0).to_string(), "2.0");
        assert_eq!(Cell::Int(7).to_string(), "7");
        assert_eq!(Cell::empty().to_string(), "");
    }

    #[test]
    fn complexity_parses_csv_tier_names() {
        assert_eq!(Complexity::parse(" Média "), Some(Complexity::Media));
        assert_eq!(Complexity::parse("alta"), None);
        assert_eq!(Complexity::Alta.label(), "Alta");
    }
}
