// CSV ingestion and cleaning.
//
// The loader reads the delivery export once, resolves columns by header
// name, and produces typed `Record`s. Fixed columns are listed below; every
// other header column is treated as a named piece-type quantity and kept in
// a per-record map, so dataset versions that add or drop piece columns load
// without code changes.
use crate::error::DashboardError;
use crate::types::{Complexity, Record};
use crate::util::{parse_f64_safe, parse_i32_safe};
use csv::{ReaderBuilder, StringRecord};
use std::collections::{HashMap, HashSet};
use std::path::Path;

const COL_REQUEST_TYPE: &str = "Request Type";
const COL_YEAR: &str = "Ano";
const COL_MONTH: &str = "Mês";
const COL_BRIEFING: &str = "Briefing";
const COL_TOTAL: &str = "Total";
const COL_LEAD_TIME: &str = "Dias Primeira entrega";
const COL_AREA: &str = "Área";
const COL_CATEGORY: &str = "Categoria";
const COL_CAMPAIGN: &str = "Campanha";
const COL_TACTICAL_PIECES: &str = "Peças Tático";
const COL_STRATEGIC_PIECES: &str = "Peças Estratégico";
const COL_TACTICAL_BRIEF: &str = "Brief Tático";
const COL_STRATEGIC_BRIEF: &str = "Brief Estratégico";
const COL_COMPLEXITY: &str = "Complexidade";
const COL_LOW_PIECES: &str = "Peças Baixa";
const COL_MEDIUM_PIECES: &str = "Peças Média";
const COL_HIGH_PIECES: &str = "Peças Alta";
const COL_INTERNAL_ADJUSTMENTS: &str = "Ajustes internos";
const COL_PARTNER_ADJUSTMENTS: &str = "Ajustes parceiros";
const COL_AI_ASSISTED: &str = "Advolve";

const FIXED_COLUMNS: &[&str] = &[
    COL_REQUEST_TYPE,
    COL_YEAR,
    COL_MONTH,
    COL_BRIEFING,
    COL_TOTAL,
    COL_LEAD_TIME,
    COL_AREA,
    COL_CATEGORY,
    COL_CAMPAIGN,
    COL_TACTICAL_PIECES,
    COL_STRATEGIC_PIECES,
    COL_TACTICAL_BRIEF,
    COL_STRATEGIC_BRIEF,
    COL_COMPLEXITY,
    COL_LOW_PIECES,
    COL_MEDIUM_PIECES,
    COL_HIGH_PIECES,
    COL_INTERNAL_ADJUSTMENTS,
    COL_PARTNER_ADJUSTMENTS,
    COL_AI_ASSISTED,
];

#[derive(Debug, Clone)]
pub struct LoadReport {
    pub total_rows: usize,
    pub parsed_rows: usize,
    pub skipped_rows: usize,
}

fn field<'a>(row: &'a StringRecord, idx: Option<&usize>) -> Option<&'a str> {
    idx.and_then(|&i| row.get(i))
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

pub fn load_records(path: &str) -> Result<(Vec<Record>, LoadReport), DashboardError> {
    if !Path::new(path).exists() {
        return Err(DashboardError::DataSourceUnavailable {
            path: path.to_string(),
        });
    }
    let mut rdr = ReaderBuilder::new().flexible(true).from_path(path)?;
    let headers = rdr.headers()?.clone();
    let index: HashMap<String, usize> = headers
        .iter()
        .enumerate()
        .map(|(i, h)| (h.trim().to_string(), i))
        .collect();

    let fixed: HashSet<&str> = FIXED_COLUMNS.iter().copied().collect();
    let piece_columns: Vec<(String, usize)> = headers
        .iter()
        .enumerate()
        .map(|(i, h)| (h.trim(), i))
        .filter(|(h, _)| !h.is_empty() && !fixed.contains(h))
        .map(|(h, i)| (h.to_string(), i))
        .collect();

    let mut records: Vec<Record> = Vec::new();
    let mut total_rows = 0usize;
    let mut skipped_rows = 0usize;

    for result in rdr.records() {
        total_rows += 1;
        let row = match result {
            Ok(r) => r,
            Err(_) => {
                skipped_rows += 1;
                continue;
            }
        };
        let get = |col: &str| field(&row, index.get(col));
        let num = |col: &str| parse_f64_safe(get(col)).unwrap_or(0.0);

        // A row is only unusable when its year, month, or briefing id is
        // missing; every quantity degrades to zero instead.
        let Some(year) = parse_i32_safe(get(COL_YEAR)) else {
            skipped_rows += 1;
            continue;
        };
        let Some(month) = get(COL_MONTH) else {
            skipped_rows += 1;
            continue;
        };
        let Some(briefing) = get(COL_BRIEFING) else {
            skipped_rows += 1;
            continue;
        };

        let mut pieces: HashMap<String, f64> = HashMap::with_capacity(piece_columns.len());
        for (name, i) in &piece_columns {
            let value = parse_f64_safe(row.get(*i)).unwrap_or(0.0);
            pieces.insert(name.clone(), value);
        }

        records.push(Record {
            request_type: get(COL_REQUEST_TYPE).unwrap_or("").to_string(),
            year,
            month: month.to_string(),
            briefing: briefing.to_string(),
            total: num(COL_TOTAL),
            lead_time_days: parse_f64_safe(get(COL_LEAD_TIME)),
            area: get(COL_AREA).map(str::to_string),
            category: get(COL_CATEGORY).map(str::to_string),
            campaign: get(COL_CAMPAIGN).map(str::to_string),
            tactical_pieces: num(COL_TACTICAL_PIECES),
            strategic_pieces: num(COL_STRATEGIC_PIECES),
            tactical_brief: num(COL_TACTICAL_BRIEF) == 1.0,
            strategic_brief: num(COL_STRATEGIC_BRIEF) == 1.0,
            complexity: get(COL_COMPLEXITY).and_then(Complexity::parse),
            low_pieces: num(COL_LOW_PIECES),
            medium_pieces: num(COL_MEDIUM_PIECES),
            high_pieces: num(COL_HIGH_PIECES),
            internal_adjustments: num(COL_INTERNAL_ADJUSTMENTS),
            partner_adjustments: num(COL_PARTNER_ADJUSTMENTS),
            ai_assisted: num(COL_AI_ASSISTED),
            piece_columns: pieces,
        });
    }

    let parsed_rows = records.len();
    let report = LoadReport {
        total_rows,
        parsed_rows,
        skipped_rows,
    };
    Ok((records, report))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_csv(content: &str) -> tempfile::NamedTempFile {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(content.as_bytes()).unwrap();
        f.flush().unwrap();
        f
    }

    #[test]
    fn missing_file_is_data_source_unavailable() {
        let err = load_records("no_such_file.csv").unwrap_err();
        assert_eq!(err.kind(), "DataSourceUnavailableError");
    }

    #[test]
    fn loads_typed_records_and_piece_columns() {
        let csv = "\
Request Type,Ano,Mês,Briefing,Total,Dias Primeira entrega,Área,Categoria,Campanha,Peças Tático,Peças Estratégico,Brief Tático,Brief Estratégico,Complexidade,Peças Baixa,Peças Média,Peças Alta,Ajustes internos,Ajustes parceiros,Advolve,KV,Banner estático
ADS,2025,JAN./25,BRF-1,5,2.5,Mídia,Display,Verão,3,0,1,0,Média,1,2,0,1,0,2,4,7
ADS,2025,JAN./25,BRF-2,,abc,,,,,,,,,,,,,,,,
";
        let f = write_csv(csv);
        let (records, report) = load_records(f.path().to_str().unwrap()).unwrap();
        assert_eq!(report.total_rows, 2);
        assert_eq!(report.parsed_rows, 2);
        assert_eq!(report.skipped_rows, 0);

        let r = &records[0];
        assert_eq!(r.request_type, "ADS");
        assert_eq!(r.year, 2025);
        assert_eq!(r.month, "JAN./25");
        assert_eq!(r.total, 5.0);
        assert_eq!(r.lead_time_days, Some(2.5));
        assert_eq!(r.area.as_deref(), Some("Mídia"));
        assert!(r.tactical_brief);
        assert!(!r.strategic_brief);
        assert_eq!(r.complexity, Some(Complexity::Media));
        assert_eq!(r.piece_quantity("KV"), 4.0);
        assert_eq!(r.piece_quantity("Banner estático"), 7.0);
        // Column the dataset does not declare counts as zero.
        assert_eq!(r.piece_quantity("Dark post"), 0.0);
        assert!(!r.piece_columns.contains_key("Dark post"));

        // Blank quantities become zero, unparseable lead time stays missing.
        let r2 = &records[1];
        assert_eq!(r2.total, 0.0);
        assert_eq!(r2.lead_time_days, None);
        assert_eq!(r2.area, None);
        assert_eq!(r2.piece_quantity("KV"), 0.0);
    }

    #[test]
    fn rows_without_year_month_or_briefing_are_skipped() {
        let csv = "\
Request Type,Ano,Mês,Briefing,Total
ADS,,JAN./25,BRF-1,5
ADS,2025,,BRF-2,5
ADS,2025,JAN./25,,5
ADS,2025,JAN./25,BRF-4,5
";
        let f = write_csv(csv);
        let (records, report) = load_records(f.path().to_str().unwrap()).unwrap();
        assert_eq!(report.total_rows, 4);
        assert_eq!(report.skipped_rows, 3);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].briefing, "BRF-4");
    }
}
