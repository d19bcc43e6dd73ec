// Result table shaping
//
// The aggregator produces ordered records; this module gives them their
// export shape: column headers (or none), the output sheet name and the
// strategy's suggested artifact file name. Record order is preserved
// exactly — any ordering has already been applied upstream.

use serde::{Deserialize, Serialize};

use crate::grid::CellValue;

// Suggested artifact names, one literal per strategy. They are fixed
// strings, never derived from the input.
pub const FREQUENCY_FILE_NAME: &str = "occurrences_consolidées.xlsx";
pub const PER_GROUP_FILE_NAME: &str = "mots_clés_par_feuille.xlsx";
pub const PRIMARY_KEYWORD_FILE_NAME: &str = "mots_clés_principaux.xlsx";
pub const UNLABELED_FILE_NAME: &str = "listes_mots_clés.xlsx";

/// An ordered, uniform-shape table ready for spreadsheet export.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ResultTable {
    /// Name of the single sheet the export will carry.
    pub sheet_name: String,
    /// Column headers; `None` means the export has no header row.
    pub headers: Option<Vec<String>>,
    /// Occurrence records, one row each, in aggregator order.
    pub rows: Vec<Vec<CellValue>>,
    /// Suggested artifact file name for this table's strategy.
    pub file_name: String,
}

impl ResultTable {
    /// `{token, count}` rows, most frequent first.
    pub fn frequency(records: Vec<(String, usize)>) -> Self {
        Self {
            sheet_name: "Occurrences".to_string(),
            headers: Some(vec!["Mot Clé".to_string(), "Occurrences".to_string()]),
            rows: records
                .into_iter()
                .map(|(token, count)| {
                    vec![CellValue::Text(token), CellValue::Number(count as f64)]
                })
                .collect(),
            file_name: FREQUENCY_FILE_NAME.to_string(),
        }
    }

    /// `{grid_name, joined_tokens}` rows, one per non-empty grid.
    pub fn per_group(records: Vec<(String, String)>) -> Self {
        Self {
            sheet_name: "Consolidation".to_string(),
            headers: Some(vec!["Feuille".to_string(), "Mots Clés".to_string()]),
            rows: Self::pair_rows(records),
            file_name: PER_GROUP_FILE_NAME.to_string(),
        }
    }

    /// `{primary_keyword, joined_tokens}` rows; the primary keyword may be
    /// an empty string when the fixed-coordinate lookup failed.
    pub fn primary_keyword(records: Vec<(String, String)>) -> Self {
        Self {
            sheet_name: "Consolidation".to_string(),
            headers: Some(vec![
                "Mot Clé Principal".to_string(),
                "Mots Clés".to_string(),
            ]),
            rows: Self::pair_rows(records),
            file_name: PRIMARY_KEYWORD_FILE_NAME.to_string(),
        }
    }

    /// Bare `{joined_tokens}` rows, no label column, no header row.
    pub fn unlabeled(records: Vec<String>) -> Self {
        Self {
            sheet_name: "Consolidation".to_string(),
            headers: None,
            rows: records
                .into_iter()
                .map(|joined| vec![CellValue::Text(joined)])
                .collect(),
            file_name: UNLABELED_FILE_NAME.to_string(),
        }
    }

    fn pair_rows(records: Vec<(String, String)>) -> Vec<Vec<CellValue>> {
        records
            .into_iter()
            .map(|(label, joined)| vec![CellValue::Text(label), CellValue::Text(joined)])
            .collect()
    }

    /// Column count, from the header row or the first record.
    pub fn width(&self) -> usize {
        self.headers
            .as_ref()
            .map(Vec::len)
            .or_else(|| self.rows.first().map(Vec::len))
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frequency_shape() {
        let table = ResultTable::frequency(vec![("x".into(), 3), ("y".into(), 1)]);
        assert_eq!(table.sheet_name, "Occurrences");
        assert_eq!(table.width(), 2);
        assert_eq!(table.file_name, FREQUENCY_FILE_NAME);
        assert_eq!(
            table.rows[0],
            vec![CellValue::Text("x".into()), CellValue::Number(3.0)]
        );
    }

    #[test]
    fn test_unlabeled_has_no_header() {
        let table = ResultTable::unlabeled(vec!["a | b".into()]);
        assert!(table.headers.is_none());
        assert_eq!(table.width(), 1);
        assert_eq!(table.file_name, UNLABELED_FILE_NAME);
    }

    #[test]
    fn test_record_order_is_preserved() {
        let records = vec![
            ("zèbre".into(), "z | a".into()),
            ("abeille".into(), "a | b".into()),
        ];
        let table = ResultTable::per_group(records);
        assert_eq!(table.rows[0][0], CellValue::Text("zèbre".into()));
        assert_eq!(table.rows[1][0], CellValue::Text("abeille".into()));
    }

    #[test]
    fn test_width_of_empty_table() {
        let table = ResultTable::unlabeled(Vec::new());
        assert_eq!(table.width(), 0);
    }
}
