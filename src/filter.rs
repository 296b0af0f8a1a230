use crate::error::DashboardError;
use crate::mapping;
use crate::types::Record;

/// Result of the filter stage: the request-scoped record copy plus the
/// squad's declared request-type order, which table 2 renders verbatim.
#[derive(Debug)]
pub struct FilteredSet {
    pub records: Vec<Record>,
    pub request_types: &'static [&'static str],
}

/// Select the records a squad's report may draw from: request type in the
/// squad's mapped set AND year equal to the target. Pure selection, no
/// mutation of the shared record store.
///
/// An unknown squad is a configuration error; an empty selection is
/// reported rather than turned into a silent empty report.
pub fn filter_records(
    records: &[Record],
    squad: &str,
    year: i32,
) -> Result<FilteredSet, DashboardError> {
    let request_types =
        mapping::squad_request_types(squad).ok_or_else(|| DashboardError::UnknownSquad {
            squad: squad.to_string(),
            valid: mapping::valid_squads(),
        })?;

    let selected: Vec<Record> = records
        .iter()
        .filter(|r| r.year == year && request_types.contains(&r.request_type.as_str()))
        .cloned()
        .collect();

    if selected.is_empty() {
        return Err(DashboardError::EmptyResult {
            squad: squad.to_string(),
            year,
        });
    }
    Ok(FilteredSet {
        records: selected,
        request_types,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn record(request_type: &str, year: i32) -> Record {
        Record {
            request_type: request_type.to_string(),
            year,
            month: "JAN./25".to_string(),
            briefing: "BRF-1".to_string(),
            total: 1.0,
            lead_time_days: None,
            area: None,
            category: None,
            campaign: None,
            tactical_pieces: 0.0,
            strategic_pieces: 0.0,
            tactical_brief: false,
            strategic_brief: false,
            complexity: None,
            low_pieces: 0.0,
            medium_pieces: 0.0,
            high_pieces: 0.0,
            internal_adjustments: 0.0,
            partner_adjustments: 0.0,
            ai_assisted: 0.0,
            piece_columns: HashMap::new(),
        }
    }

    #[test]
    fn keeps_only_squad_request_types_in_target_year() {
        let records = vec![
            record("ADS", 2025),
            record("ADS - Projetos especiais", 2025),
            record("Groceries", 2025),
            record("ADS", 2024),
        ];
        let selection = filter_records(&records, "ADS", 2025).unwrap();
        assert_eq!(selection.records.len(), 2);
        assert!(selection.records.iter().all(|r| r.year == 2025));
        assert_eq!(selection.request_types, &["ADS", "ADS - Projetos especiais"]);
    }

    #[test]
    fn unknown_squad_is_a_configuration_error() {
        let records = vec![record("ADS", 2025)];
        let err = filter_records(&records, "Nope", 2025).unwrap_err();
        assert_eq!(err.kind(), "UnknownUnitError");
        assert!(err.to_string().contains("Growth Core"));
    }

    #[test]
    fn empty_selection_is_reported() {
        let records = vec![record("ADS", 2025)];
        let err = filter_records(&records, "Fintech", 2025).unwrap_err();
        assert_eq!(err.kind(), "EmptyResultError");
        let err = filter_records(&records, "ADS", 2023).unwrap_err();
        assert_eq!(err.kind(), "EmptyResultError");
    }
}
