use crate::types::Row;
use serde::Serialize;
use std::error::Error;
use tabled::{builder::Builder, settings::Style};

/// Write the assembled dashboard as a flat CSV, one line per row.
pub fn write_csv(path: &str, rows: &[Row]) -> Result<(), Box<dyn Error>> {
    let mut wtr = csv::WriterBuilder::new().flexible(true).from_path(path)?;
    for row in rows {
        wtr.write_record(row.iter().map(|cell| cell.to_string()))?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_json<T: Serialize>(path: &str, value: &T) -> Result<(), Box<dyn Error>> {
    let s = serde_json::to_string_pretty(value)?;
    std::fs::write(path, s)?;
    Ok(())
}

/// Print the first `max_rows` dashboard rows as a markdown-style table.
pub fn preview_rows(rows: &[Row], max_rows: usize) {
    if rows.is_empty() {
        println!("(no rows)\n");
        return;
    }
    let mut builder = Builder::default();
    for row in rows.iter().take(max_rows) {
        builder.push_record(row.iter().map(|cell| cell.to_string()));
    }
    let mut table = builder.build();
    println!("{}\n", table.with(Style::markdown()));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Cell;

    #[test]
    fn csv_rows_render_cell_display_forms() {
        let rows: Vec<Row> = vec![
            vec![Cell::from("Geral"), Cell::from("JAN./25")],
            vec![Cell::from("Briefings"), Cell::Int(3)],
            vec![Cell::from("Prazo médio (horas)"), Cell::Float(2.5)],
        ];
        let file = tempfile::NamedTempFile::new().unwrap();
        let path = file.path().to_str().unwrap();
        write_csv(path, &rows).unwrap();
        let written = std::fs::read_to_string(path).unwrap();
        assert_eq!(
            written,
            "Geral,JAN./25\nBriefings,3\nPrazo médio (horas),2.5\n"
        );
    }
}
