//! Field counts and fill-rate statistics for projected rows

use crate::schema::{ALL_FIELDS, OPTIONAL_FIELDS, REQUIRED_FIELDS};
use crate::types::ProjectedRow;

/// Number of fields in the schema, split by kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldCounts {
    pub total: usize,
    pub required: usize,
    pub optional: usize,
}

impl FieldCounts {
    pub fn schema() -> Self {
        Self {
            total: ALL_FIELDS.len(),
            required: REQUIRED_FIELDS.len(),
            optional: OPTIONAL_FIELDS.len(),
        }
    }
}

/// How many records carry a non-empty value for one field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FillRate {
    pub field: String,
    pub filled: usize,
    pub total: usize,
}

impl FillRate {
    /// Count filled values of `field` across `rows`
    pub fn compute(field: &str, rows: &[ProjectedRow]) -> Self {
        let filled = rows.iter().filter(|row| row.is_filled(field)).count();
        Self {
            field: field.to_string(),
            filled,
            total: rows.len(),
        }
    }

    /// Fill rate in percent (0.0 for an empty table)
    pub fn percent(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.filled as f64 / self.total as f64 * 100.0
    }

    /// Fill rate in percent, rounded to one decimal place
    pub fn percent_rounded(&self) -> f64 {
        (self.percent() * 10.0).round() / 10.0
    }
}

/// Summary statistics for an exported table
#[derive(Debug, Clone, PartialEq)]
pub struct TableStats {
    pub records: usize,
    pub fields: FieldCounts,
    pub optional_fill: Vec<FillRate>,
}

impl TableStats {
    pub fn compute(rows: &[ProjectedRow]) -> Self {
        Self {
            records: rows.len(),
            fields: FieldCounts::schema(),
            optional_fill: OPTIONAL_FIELDS
                .iter()
                .map(|field| FillRate::compute(field, rows))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Record;
    use serde_json::json;

    fn rows(values: Vec<serde_json::Value>) -> Vec<ProjectedRow> {
        values
            .into_iter()
            .map(|v| {
                let record: Record = serde_json::from_value(v).unwrap();
                ProjectedRow::from_record(&record)
            })
            .collect()
    }

    #[test]
    fn test_field_counts() {
        let counts = FieldCounts::schema();
        assert_eq!(counts.total, 12);
        assert_eq!(counts.required, 6);
        assert_eq!(counts.optional, 6);
    }

    #[test]
    fn test_fill_rate_one_of_three() {
        let rows = rows(vec![
            json!({"wind_ticker": "000001.SZ"}),
            json!({"wind_ticker": ""}),
            json!({}),
        ]);
        let rate = FillRate::compute("wind_ticker", &rows);
        assert_eq!(rate.filled, 1);
        assert_eq!(rate.total, 3);
        assert_eq!(rate.percent_rounded(), 33.3);
    }

    #[test]
    fn test_fill_rate_two_of_three_rounds_up() {
        let rows = rows(vec![
            json!({"time": "2024-01-01"}),
            json!({"time": "2024-06-30"}),
            json!({}),
        ]);
        assert_eq!(FillRate::compute("time", &rows).percent_rounded(), 66.7);
    }

    #[test]
    fn test_fill_rate_empty_table() {
        let rate = FillRate::compute("time", &[]);
        assert_eq!(rate.filled, 0);
        assert_eq!(rate.percent(), 0.0);
    }

    #[test]
    fn test_table_stats_covers_optional_fields_in_order() {
        let rows = rows(vec![json!({"yfinance_ticker": "AAPL"})]);
        let stats = TableStats::compute(&rows);
        assert_eq!(stats.records, 1);
        let names: Vec<&str> = stats.optional_fill.iter().map(|f| f.field.as_str()).collect();
        assert_eq!(names, OPTIONAL_FIELDS.to_vec());
        assert_eq!(stats.optional_fill[5].filled, 1);
        assert_eq!(stats.optional_fill[5].percent(), 100.0);
    }
}
