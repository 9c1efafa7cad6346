//! Parser settings. Every field has a default, so an empty TOML table (or no
//! file at all) yields a working configuration.

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use tenge_core::{DEFAULT_CURRENCY, DEFAULT_TIMEZONE};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Currency for lines without a currency marker
    pub default_currency: String,
    /// Zone used to compute "today" for unparseable dates
    pub timezone: Tz,
    /// Any of these in a `.txt` body selects the Kaspi profile
    pub kaspi_signatures: Vec<String>,
    /// Header text that opens the generic transaction table
    pub table_start_markers: Vec<String>,
    /// Text that closes the generic transaction table
    pub table_end_markers: Vec<String>,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            default_currency: DEFAULT_CURRENCY.to_string(),
            timezone: DEFAULT_TIMEZONE,
            kaspi_signatures: vec!["Kaspi Bank".to_string(), "Kaspi Gold".to_string()],
            table_start_markers: vec![
                "Дата проведения операции".to_string(),
                "Дата операции".to_string(),
            ],
            table_end_markers: vec!["Всего:".to_string(), "Total:".to_string()],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = ParserConfig::default();
        assert_eq!(cfg.default_currency, "KZT");
        assert_eq!(cfg.timezone, chrono_tz::Asia::Almaty);
        assert!(cfg.kaspi_signatures.iter().any(|s| s == "Kaspi Gold"));
        assert!(cfg.table_end_markers.iter().any(|s| s == "Всего:"));
    }
}
