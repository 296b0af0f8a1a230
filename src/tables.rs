// The ten table generators and the report assembler.
//
// Every generator is a stateless pass over the filtered record set: it
// walks the month axis in order and emits exactly one cell per month,
// zero-filled when nothing contributed. The assembler concatenates the
// tables in declared order with one empty spacer row between blocks.
use crate::error::DashboardError;
use crate::filter::filter_records;
use crate::mapping::{
    self, COURIER_REQUEST_TYPE, DX_BUCKET, DX_EXTRA_COLUMNS, PIECE_TYPE_BUCKETS,
};
use crate::types::{Cell, Complexity, DashboardResponse, Record, Row};
use crate::util::{average, round1};
use chrono::Utc;
use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

fn header_row(title: &str, months: &[String]) -> Row {
    let mut row = Vec::with_capacity(months.len() + 1);
    row.push(Cell::from(title));
    row.extend(months.iter().map(|m| Cell::from(m.as_str())));
    row
}

fn spacer_row(width: usize) -> Row {
    vec![Cell::empty(); width]
}

fn in_month<'a>(records: &'a [Record], month: &'a str) -> impl Iterator<Item = &'a Record> + 'a {
    records.iter().filter(move |r| r.month == month)
}

/// Label plus one integer cell per month, each the sum of `field` over that
/// month's records.
fn sum_row<F>(label: &str, records: &[Record], months: &[String], field: F) -> Row
where
    F: Fn(&Record) -> f64,
{
    let mut row = vec![Cell::from(label)];
    for m in months {
        let total: f64 = in_month(records, m).map(&field).sum();
        row.push(Cell::Int(total as i64));
    }
    row
}

/// The independent Total row shared by tables 2, 3 and 6: overall delivered
/// quantity per month, computed from the full month slice rather than by
/// adding the displayed rows.
fn total_row(records: &[Record], months: &[String]) -> Row {
    sum_row("Total", records, months, |r| r.total)
}

/// Average lead time per month over the records `keep` selects. Records
/// without a lead time stay out of the denominator; a month with no
/// qualifying lead times at all renders as integer 0.
fn lead_time_row<F>(label: &str, records: &[Record], months: &[String], keep: F) -> Row
where
    F: Fn(&Record) -> bool,
{
    let mut row = vec![Cell::from(label)];
    for m in months {
        let leads: Vec<f64> = in_month(records, m)
            .filter(|r| keep(r))
            .filter_map(|r| r.lead_time_days)
            .collect();
        row.push(if leads.is_empty() {
            Cell::Int(0)
        } else {
            Cell::Float(round1(average(&leads)))
        });
    }
    row
}

fn distinct_briefings(records: &[Record]) -> usize {
    records
        .iter()
        .map(|r| r.briefing.as_str())
        .collect::<HashSet<_>>()
        .len()
}

/// Table 1: distinct briefing ids and summed deliveries per month.
pub fn general_counts(records: &[Record], months: &[String]) -> Vec<Row> {
    let mut rows = vec![header_row("Geral", months)];
    let mut briefings = vec![Cell::from("Briefings")];
    for m in months {
        let distinct: HashSet<&str> = in_month(records, m).map(|r| r.briefing.as_str()).collect();
        briefings.push(Cell::Int(distinct.len() as i64));
    }
    rows.push(briefings);
    rows.push(sum_row("Entregáveis", records, months, |r| r.total));
    rows
}

/// Table 2: one row per request type in the squad's declared order.
pub fn request_type_breakdown(
    records: &[Record],
    months: &[String],
    request_types: &[&str],
) -> Vec<Row> {
    let mut rows = vec![header_row("Entregáveis/Request Type", months)];
    for rt in request_types {
        let mut row = vec![Cell::from(*rt)];
        for m in months {
            let total: f64 = in_month(records, m)
                .filter(|r| r.request_type == *rt)
                .map(|r| r.total)
                .sum();
            row.push(Cell::Int(total as i64));
        }
        rows.push(row);
    }
    rows.push(total_row(records, months));
    rows
}

fn composite_label(r: &Record) -> String {
    match (r.area.as_deref(), r.category.as_deref()) {
        (Some(area), Some(category)) => format!("{} - {}", area, category),
        (Some(area), None) => format!("{} - Sem categoria", area),
        (None, Some(_)) | (None, None) => "Sem informação".to_string(),
    }
}

/// Table 3: runtime-discovered `Área - Categoria` labels, sorted by
/// descending 12-month volume. The sort is stable, so equal-volume labels
/// keep the order they were first seen in (month-major scan).
pub fn category_breakdown(records: &[Record], months: &[String]) -> Vec<Row> {
    struct LabelAcc {
        label: String,
        by_month: Vec<f64>,
    }
    let mut order: HashMap<String, usize> = HashMap::new();
    let mut accs: Vec<LabelAcc> = Vec::new();
    for (mi, m) in months.iter().enumerate() {
        for r in in_month(records, m) {
            let label = composite_label(r);
            let idx = *order.entry(label.clone()).or_insert_with(|| {
                accs.push(LabelAcc {
                    label,
                    by_month: vec![0.0; months.len()],
                });
                accs.len() - 1
            });
            accs[idx].by_month[mi] += r.total;
        }
    }

    let mut totaled: Vec<(f64, LabelAcc)> = accs
        .into_iter()
        .map(|acc| (acc.by_month.iter().sum(), acc))
        .collect();
    totaled.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(Ordering::Equal));

    let mut rows = vec![header_row("Entregáveis/Categoria", months)];
    for (_, acc) in totaled {
        let mut row = vec![Cell::from(acc.label)];
        row.extend(acc.by_month.iter().map(|v| Cell::Int(*v as i64)));
        rows.push(row);
    }
    rows.push(total_row(records, months));
    rows
}

/// Tables 4 and 5: per-month top-3 campaign ranking over one piece-count
/// field. Each month is ranked independently; campaigns without a name are
/// never ranked, and ranks beyond the month's distinct campaigns render as
/// empty cells.
pub fn ranked_campaigns(
    records: &[Record],
    months: &[String],
    title: &str,
    pieces: fn(&Record) -> f64,
) -> Vec<Row> {
    const RANK_LABELS: [&str; 3] = ["1ª campanha", "2ª campanha", "3ª campanha"];

    let ranked: Vec<Vec<(String, f64)>> = months
        .iter()
        .map(|m| {
            let mut totals: Vec<(String, f64)> = Vec::new();
            for r in in_month(records, m).filter(|r| pieces(r) > 0.0) {
                let Some(name) = r.campaign.as_deref() else {
                    continue;
                };
                match totals.iter_mut().find(|(n, _)| n == name) {
                    Some((_, t)) => *t += pieces(r),
                    None => totals.push((name.to_string(), pieces(r))),
                }
            }
            // Stable sort: tied campaigns keep first-discovered order.
            totals.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
            totals
        })
        .collect();

    let mut rows = vec![header_row(title, months)];
    for (rank, label) in RANK_LABELS.iter().enumerate() {
        let mut row = vec![Cell::from(*label)];
        for month_ranking in &ranked {
            row.push(match month_ranking.get(rank) {
                Some((name, count)) => Cell::Text(format!("{} ({} peças)", name, *count as i64)),
                None => Cell::empty(),
            });
        }
        rows.push(row);
    }
    rows
}

/// Table 6: static piece-type buckets summed over their source columns.
/// Source columns the dataset version does not declare contribute zero.
pub fn piece_type_rollup(records: &[Record], months: &[String]) -> Vec<Row> {
    let mut rows = vec![header_row("Tipos de Peça", months)];
    for (bucket, columns) in PIECE_TYPE_BUCKETS {
        let mut row = vec![Cell::from(*bucket)];
        for m in months {
            let mut total = 0.0;
            for r in in_month(records, m) {
                for col in *columns {
                    total += r.piece_quantity(col);
                }
            }
            if *bucket == DX_BUCKET {
                // Courier comms additionally push their Announcements/Push
                // volumes into DX, on top of the bucket's own sources.
                for r in in_month(records, m).filter(|r| r.request_type == COURIER_REQUEST_TYPE) {
                    for col in DX_EXTRA_COLUMNS {
                        total += r.piece_quantity(col);
                    }
                }
            }
            row.push(Cell::Int(total as i64));
        }
        rows.push(row);
    }
    rows.push(total_row(records, months));
    rows
}

/// Table 7: tactical vs strategic piece volumes and per-flag lead times.
pub fn tactical_vs_strategic(records: &[Record], months: &[String]) -> Vec<Row> {
    vec![
        header_row("Estratégicas vs Táticas", months),
        sum_row("Entregáveis Táticos", records, months, |r| r.tactical_pieces),
        sum_row("Entregáveis Estratégicos", records, months, |r| {
            r.strategic_pieces
        }),
        lead_time_row("Prazo médio (horas) - Táticos", records, months, |r| {
            r.tactical_brief
        }),
        lead_time_row("Prazo médio (horas) - Estratégicos", records, months, |r| {
            r.strategic_brief
        }),
        total_row(records, months),
    ]
}

/// Table 8: per-tier piece counts, then per-tier lead times. The Total row
/// is the three tier columns added together, not the generic delivered
/// quantity.
pub fn complexity_breakdown(records: &[Record], months: &[String]) -> Vec<Row> {
    let mut rows = vec![header_row("Complexidade", months)];
    for tier in Complexity::ALL {
        rows.push(sum_row(
            &format!("Peças {}", tier.label()),
            records,
            months,
            move |r| tier.pieces(r),
        ));
    }
    for tier in Complexity::ALL {
        rows.push(lead_time_row(
            &format!("Prazo médio (horas) - {}", tier.label()),
            records,
            months,
            move |r| r.complexity == Some(tier),
        ));
    }
    rows.push(sum_row("Total", records, months, |r| {
        r.low_pieces + r.medium_pieces + r.high_pieces
    }));
    rows
}

/// Table 9: internal and partner adjustment volumes.
pub fn adjustments(records: &[Record], months: &[String]) -> Vec<Row> {
    vec![
        header_row("Ajustes", months),
        sum_row("Ajustes internos", records, months, |r| {
            r.internal_adjustments
        }),
        sum_row("Ajustes parceiros", records, months, |r| {
            r.partner_adjustments
        }),
        sum_row("Total", records, months, |r| {
            r.internal_adjustments + r.partner_adjustments
        }),
    ]
}

/// Table 10: AI-assisted briefing volume and its lead time.
pub fn ai_assistance(records: &[Record], months: &[String]) -> Vec<Row> {
    vec![
        header_row("Advolve", months),
        sum_row("Briefings com IA", records, months, |r| r.ai_assisted),
        lead_time_row("Prazo médio (horas)", records, months, |r| {
            r.ai_assisted > 0.0
        }),
    ]
}

/// Concatenate the ten tables in declared order with one empty 13-cell
/// spacer row between blocks (none after the last).
pub fn assemble_dashboard(
    records: &[Record],
    request_types: &[&str],
    months: &[String],
) -> Vec<Row> {
    let tables = vec![
        general_counts(records, months),
        request_type_breakdown(records, months, request_types),
        category_breakdown(records, months),
        ranked_campaigns(records, months, "Top 3 Campanhas Táticas", |r| {
            r.tactical_pieces
        }),
        ranked_campaigns(records, months, "Top 3 Campanhas Estratégicas", |r| {
            r.strategic_pieces
        }),
        piece_type_rollup(records, months),
        tactical_vs_strategic(records, months),
        complexity_breakdown(records, months),
        adjustments(records, months),
        ai_assistance(records, months),
    ];

    let width = months.len() + 1;
    let table_count = tables.len();
    let mut rows = Vec::new();
    for (i, table) in tables.into_iter().enumerate() {
        rows.extend(table);
        if i + 1 < table_count {
            rows.push(spacer_row(width));
        }
    }
    rows
}

/// Full pipeline for one request: filter, assemble, and wrap in the
/// response shape with the top-level summary counters.
pub fn generate_dashboard(
    records: &[Record],
    squad: &str,
    year: i32,
) -> Result<DashboardResponse, DashboardError> {
    let selection = filter_records(records, squad, year)?;
    let months = mapping::month_axis(year);
    let dashboard = assemble_dashboard(&selection.records, selection.request_types, &months);
    let total_entregas: f64 = selection.records.iter().map(|r| r.total).sum();
    Ok(DashboardResponse {
        success: true,
        squad: squad.to_string(),
        ano: year,
        linhas_processadas: selection.records.len(),
        request_types: selection
            .request_types
            .iter()
            .map(|s| s.to_string())
            .collect(),
        total_briefings: distinct_briefings(&selection.records),
        total_entregas: total_entregas as i64,
        generated_at: Utc::now(),
        dashboard,
    })
}
