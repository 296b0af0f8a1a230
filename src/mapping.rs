// Static configuration tables: squad → request types, piece-type buckets,
// and the month axis. These are process-wide constants with no lifecycle;
// nothing here is mutable after startup.

/// Squad → request types it owns, in declared order. The order is visible in
/// the dashboard: table 2 emits one row per request type in this sequence.
pub const SQUAD_MAPPING: &[(&str, &[&str])] = &[
    ("ADS", &["ADS", "ADS - Projetos especiais"]),
    (
        "Growth Core",
        &[
            "Brand House",
            "Canais WhastApp",
            "Clube iFood",
            "Conexão",
            "Food Delivery",
            "Food Delivery - App",
            "Institucional",
        ],
    ),
    ("Multicategorias", &["Groceries"]),
    ("Entregadores", &["Comms para entregadores"]),
    ("Fintech", &["iFood Benefícios", "iFood Pago"]),
    (
        "B2B Marketplace",
        &[
            "B2B - CRM - Marketplace",
            "B2B - CRM - Restaurantes",
            "B2B - Fast Jobs",
            "B2B - MKT e Comms",
            "B2B - MKT Multicategorias",
        ],
    ),
];

pub fn squad_request_types(squad: &str) -> Option<&'static [&'static str]> {
    SQUAD_MAPPING
        .iter()
        .find(|(name, _)| *name == squad)
        .map(|(_, types)| *types)
}

/// Comma-separated list of valid squad keys, for error messages.
pub fn valid_squads() -> String {
    SQUAD_MAPPING
        .iter()
        .map(|(name, _)| *name)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Piece-type buckets for table 6. Each bucket sums a fixed list of source
/// quantity columns; columns a given dataset version does not declare
/// contribute zero.
pub const PIECE_TYPE_BUCKETS: &[(&str, &[&str])] = &[
    ("KV", &["KV"]),
    (
        "PERFORMANCE",
        &[
            "Banner estático",
            "Banner animado",
            "Títulos",
            "Copy",
            "Descrições",
            "Vídeo",
            "Dark post",
        ],
    ),
    (
        "APP",
        &[
            "Bisnaga",
            "Capa Principal",
            "Capa Interna",
            "Waiting",
            "Inapp",
            "Componente Mercado",
            "TP Premium",
            "Dora",
            "Announcements",
            "Brandpage",
            "Cover",
            "Logo",
            "Brand block",
            "Wallet",
            "Floater",
            "Medium Banner",
            "Banner Item",
        ],
    ),
    (
        "CRM",
        &[
            "E-mail marketing",
            "Notificação App",
            "Push",
            "Push Tabloide",
            "Whatsapp",
            "SMS",
        ],
    ),
    (
        "OFF/Materiais",
        &[
            "Guia",
            "Bag",
            "Sacolas",
            "Folder",
            "Adesivos",
            "Embalagem",
            "Peça impressa",
            "Id visual para eventos",
            "Social post",
            "Post animado",
            "Post estático",
            "PPT",
            "Material rico",
        ],
    ),
    (
        "Peças DX",
        &[
            "WPP - texto",
            "WPP - imagem",
            "WPP - vídeo",
            "inApp - botão braze",
            "inApp - 2 slides ou mais",
            "inApp - Outros",
            "Push - texto",
            "Push - imagem",
            "Push - Outros",
            "CN - imagem",
            "CN - GIF",
            "CN - Outros",
            "Weduka",
            "Portal do entregador",
            "Youtube - thumb",
            "Youtube - descrição",
            "Youtube - vídeo",
            "Melhor canal",
            "HTML",
        ],
    ),
    (
        "Peças B2B",
        &[
            "Banner Portal do Parceiro",
            "Notificações Portal do Parceiro:",
            "Pop-up Portal do Parceiro (PP)",
            "GIF",
        ],
    ),
    ("Outros", &["Outros"]),
];

/// Bucket that receives the courier-comms override in table 6.
pub const DX_BUCKET: &str = "Peças DX";

/// Request type whose `Announcements`/`Push` columns are additionally added
/// to the DX bucket, on top of its base sum.
pub const COURIER_REQUEST_TYPE: &str = "Comms para entregadores";

pub const DX_EXTRA_COLUMNS: &[&str] = &["Announcements", "Push"];

const MONTH_NAMES: [&str; 12] = [
    "JAN.", "FEV.", "MAR.", "ABR.", "MAI.", "JUN.", "JUL.", "AGO.", "SET.", "OUT.", "NOV.", "DEZ.",
];

/// The fixed 12-token month axis for one fiscal year, e.g. `JAN./25`.
/// Every table emits exactly one column per token, zero-filled when no data
/// exists for it.
pub fn month_axis(year: i32) -> Vec<String> {
    MONTH_NAMES
        .iter()
        .map(|name| format!("{}/{:02}", name, year.rem_euclid(100)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn squad_lookup_preserves_declared_order() {
        let types = squad_request_types("ADS").unwrap();
        assert_eq!(types, &["ADS", "ADS - Projetos especiais"]);
        assert!(squad_request_types("ads").is_none());
    }

    #[test]
    fn valid_squads_lists_all_keys() {
        let valid = valid_squads();
        assert!(valid.starts_with("ADS, Growth Core"));
        assert!(valid.ends_with("B2B Marketplace"));
    }

    #[test]
    fn month_axis_has_twelve_year_suffixed_tokens() {
        let months = month_axis(2025);
        assert_eq!(months.len(), 12);
        assert_eq!(months[0], "JAN./25");
        assert_eq!(months[11], "DEZ./25");
    }
}
