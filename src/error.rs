use thiserror::Error;

/// Typed failure taxonomy for the dashboard pipeline.
///
/// Generators themselves never fail over clean records; everything that can
/// go wrong is either a caller mistake (missing/unknown parameters), an
/// empty selection, or an I/O-level problem surfaced during loading.
#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("Parâmetros obrigatórios: squad, ano")]
    MissingParameter,

    #[error("Squad '{squad}' não reconhecida. Válidas: {valid}")]
    UnknownSquad { squad: String, valid: String },

    #[error("Nenhum dado encontrado para squad '{squad}' em {year}")]
    EmptyResult { squad: String, year: i32 },

    #[error("CSV não encontrado: {path}. Faça upload do arquivo.")]
    DataSourceUnavailable { path: String },

    #[error("Falha ao processar o dashboard: {0}")]
    Unexpected(String),
}

impl DashboardError {
    /// Error-kind tag carried in the error response (`tipo` field).
    pub fn kind(&self) -> &'static str {
        match self {
            DashboardError::MissingParameter => "MissingParameterError",
            DashboardError::UnknownSquad { .. } => "UnknownUnitError",
            DashboardError::EmptyResult { .. } => "EmptyResultError",
            DashboardError::DataSourceUnavailable { .. } => "DataSourceUnavailableError",
            DashboardError::Unexpected(_) => "UnexpectedProcessingError",
        }
    }

    /// HTTP-style status class for a presentation layer. Caller-parameter
    /// problems are 4xx, everything else 5xx.
    pub fn status_class(&self) -> u16 {
        match self {
            DashboardError::MissingParameter => 400,
            DashboardError::UnknownSquad { .. } => 400,
            DashboardError::EmptyResult { .. } => 404,
            DashboardError::DataSourceUnavailable { .. } => 404,
            DashboardError::Unexpected(_) => 500,
        }
    }
}

impl From<csv::Error> for DashboardError {
    fn from(e: csv::Error) -> Self {
        DashboardError::Unexpected(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_classes_follow_taxonomy() {
        assert_eq!(DashboardError::MissingParameter.status_class(), 400);
        let unknown = DashboardError::UnknownSquad {
            squad: "X".into(),
            valid: "ADS".into(),
        };
        assert_eq!(unknown.status_class(), 400);
        assert_eq!(unknown.kind(), "UnknownUnitError");
        let empty = DashboardError::EmptyResult {
            squad: "ADS".into(),
            year: 2024,
        };
        assert_eq!(empty.status_class(), 404);
        assert_eq!(
            DashboardError::Unexpected("boom".into()).status_class(),
            500
        );
    }
}
