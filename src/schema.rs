//! Fixed column schema for FinSearchComp prompt records
//!
//! The schema is a compile-time constant: six required fields followed by
//! six optional fields. Their concatenation is the column order of the
//! exported worksheet.

/// Fields every FinSearchComp record is expected to carry
pub const REQUIRED_FIELDS: [&str; 6] = [
    "prompt_id",
    "prompt",
    "response_reference",
    "judge_prompt_template",
    "judge_system_prompt",
    "label",
];

/// Fields present only for some records (market tickers, translations, ...)
pub const OPTIONAL_FIELDS: [&str; 6] = [
    "wind_ticker",
    "akshare_ticker",
    "ground_truth",
    "time",
    "response_reference_translate",
    "yfinance_ticker",
];

/// Total number of columns in the exported table
pub const COLUMN_COUNT: usize = REQUIRED_FIELDS.len() + OPTIONAL_FIELDS.len();

/// All schema fields in column order (required, then optional)
pub const ALL_FIELDS: [&str; COLUMN_COUNT] = [
    REQUIRED_FIELDS[0],
    REQUIRED_FIELDS[1],
    REQUIRED_FIELDS[2],
    REQUIRED_FIELDS[3],
    REQUIRED_FIELDS[4],
    REQUIRED_FIELDS[5],
    OPTIONAL_FIELDS[0],
    OPTIONAL_FIELDS[1],
    OPTIONAL_FIELDS[2],
    OPTIONAL_FIELDS[3],
    OPTIONAL_FIELDS[4],
    OPTIONAL_FIELDS[5],
];

/// Column index of a schema field, if the name belongs to the schema
pub fn column_index(field: &str) -> Option<usize> {
    ALL_FIELDS.iter().position(|f| *f == field)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_fields_order() {
        assert_eq!(
            ALL_FIELDS,
            [
                "prompt_id",
                "prompt",
                "response_reference",
                "judge_prompt_template",
                "judge_system_prompt",
                "label",
                "wind_ticker",
                "akshare_ticker",
                "ground_truth",
                "time",
                "response_reference_translate",
                "yfinance_ticker",
            ]
        );
    }

    #[test]
    fn test_column_count() {
        assert_eq!(COLUMN_COUNT, 12);
    }

    #[test]
    fn test_column_index() {
        assert_eq!(column_index("prompt_id"), Some(0));
        assert_eq!(column_index("label"), Some(5));
        assert_eq!(column_index("yfinance_ticker"), Some(11));
        assert_eq!(column_index("unknown"), None);
    }
}
