//! Normalizing two-dimensional grids into nested mappings.
//!
//! A grid of rows can encode the same data two ways: wide form (one row
//! per entity, one column per variable) or narrow form (one row per
//! `(entity, variable, value)` triple, possibly with extra grouping
//! columns). Both normalize to the same nested mapping shape the
//! resolver consumes, so a record cannot tell which encoding the data
//! arrived in.

use crate::error::{Error, Result};
use serde_json::{Map, Value};
use std::collections::HashSet;

/// Grid orientation. Pass it explicitly when the inference heuristic
/// would guess wrong.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Orientation {
    /// One row per entity, one column per variable; row 0 is the header.
    Wide,
    /// One row per (entity, ..., variable, value) tuple; row 0 ignored.
    Narrow,
}

/// Guess a grid's orientation by scanning its columns.
///
/// Wide-form entity identifiers are unique per row by construction (one
/// row is one entity), while narrow-form identifiers necessarily repeat
/// (one entity spans several rows). A repeated value in any column but
/// the last therefore signals narrow form. Best-effort only: a wide
/// table with a repeated value in a non-key column is misclassified, so
/// callers that know the orientation should state it.
pub fn infer_orientation(rows: &[Vec<String>]) -> Orientation {
    let columns = rows.iter().map(Vec::len).min().unwrap_or(0);
    for col in 0..columns.saturating_sub(1) {
        let mut seen = HashSet::new();
        if rows.iter().any(|row| !seen.insert(row[col].as_str())) {
            return Orientation::Narrow;
        }
    }
    Orientation::Wide
}

/// Convert a grid of rows into a nested mapping, inferring the
/// orientation unless one is given. An empty grid normalizes to `{}`.
pub fn normalize(rows: &[Vec<String>], orientation: Option<Orientation>) -> Result<Value> {
    let orientation = orientation.unwrap_or_else(|| infer_orientation(rows));
    match orientation {
        Orientation::Wide => decode_wide(rows),
        Orientation::Narrow => decode_narrow(rows),
    }
}

/// Row 0 is the header; each later row keys one entity by its first
/// cell and stores the remaining cells under the matching header names.
fn decode_wide(rows: &[Vec<String>]) -> Result<Value> {
    let mut table = Map::new();
    let Some((header, entities)) = rows.split_first() else {
        return Ok(Value::Object(table));
    };

    for (row_idx, row) in entities.iter().enumerate() {
        let Some((entity, cells)) = row.split_first() else {
            return Err(Error::Format(format!(
                "wide row {} has no cells, expected an entity key",
                row_idx + 2
            )));
        };

        let mut variables = Map::new();
        for (offset, cell) in cells.iter().enumerate() {
            let column = offset + 1;
            let Some(name) = header.get(column) else {
                return Err(Error::Format(format!(
                    "wide row {} has a cell in column {} but the header declares only {} columns",
                    row_idx + 2,
                    column + 1,
                    header.len()
                )));
            };
            variables.insert(name.clone(), Value::String(cell.clone()));
        }
        table.insert(entity.clone(), Value::Object(variables));
    }

    Ok(Value::Object(table))
}

/// Row 0 is a header and is ignored. In each later row, all but the
/// last two cells open nested mappings, the second-to-last cell is the
/// leaf key and the last cell the leaf value. Narrow form generalized
/// to any number of grouping columns.
fn decode_narrow(rows: &[Vec<String>]) -> Result<Value> {
    let mut table = Map::new();

    for (row_idx, row) in rows.iter().enumerate().skip(1) {
        if row.len() < 2 {
            return Err(Error::Format(format!(
                "narrow row {} has {} cell(s), expected at least a key and a value",
                row_idx + 1,
                row.len()
            )));
        }

        let (groups, leaf) = row.split_at(row.len() - 2);
        let mut node = &mut table;
        for cell in groups {
            let child = node
                .entry(cell.clone())
                .or_insert_with(|| Value::Object(Map::new()));
            node = match child {
                Value::Object(map) => map,
                _ => {
                    return Err(Error::Format(format!(
                        "narrow row {} groups under '{}' which already holds a value",
                        row_idx + 1,
                        cell
                    )))
                }
            };
        }
        node.insert(leaf[0].clone(), Value::String(leaf[1].clone()));
    }

    Ok(Value::Object(table))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn grid(rows: &[&[&str]]) -> Vec<Vec<String>> {
        rows.iter()
            .map(|row| row.iter().map(|s| s.to_string()).collect())
            .collect()
    }

    #[test]
    fn test_unique_key_column_infers_wide() {
        let rows = grid(&[&["Person", "Age"], &["Bob", "32"], &["Alice", "24"]]);
        assert_eq!(infer_orientation(&rows), Orientation::Wide);
    }

    #[test]
    fn test_repeated_key_column_infers_narrow() {
        let rows = grid(&[
            &["Person", "Variable", "Value"],
            &["Bob", "Age", "32"],
            &["Bob", "Weight", "178"],
        ]);
        assert_eq!(infer_orientation(&rows), Orientation::Narrow);
    }

    #[test]
    fn test_last_column_repeats_are_ignored() {
        // Only the "32" values repeat, and only in the last column; a
        // repeat there must not flip the table to narrow form.
        let rows = grid(&[&["Person", "Age"], &["Bob", "32"], &["Alice", "32"]]);
        assert_eq!(infer_orientation(&rows), Orientation::Wide);
    }

    #[test]
    fn test_wide_decoding() {
        let rows = grid(&[&["Person", "Age"], &["Bob", "32"], &["Alice", "24"]]);
        let table = normalize(&rows, None).unwrap();
        assert_eq!(
            table,
            json!({"Bob": {"Age": "32"}, "Alice": {"Age": "24"}})
        );
    }

    #[test]
    fn test_narrow_decoding() {
        let rows = grid(&[
            &["Person", "Variable", "Value"],
            &["Bob", "Age", "32"],
            &["Bob", "Weight", "178"],
        ]);
        let table = normalize(&rows, None).unwrap();
        assert_eq!(table, json!({"Bob": {"Age": "32", "Weight": "178"}}));
    }

    #[test]
    fn test_wide_and_narrow_agree_on_matching_data() {
        let wide = grid(&[
            &["Person", "Age", "Weight"],
            &["Bob", "32", "178"],
            &["Alice", "24", "150"],
        ]);
        let narrow = grid(&[
            &["Person", "Variable", "Value"],
            &["Bob", "Age", "32"],
            &["Bob", "Weight", "178"],
            &["Alice", "Age", "24"],
            &["Alice", "Weight", "150"],
        ]);

        assert_eq!(
            normalize(&wide, None).unwrap(),
            normalize(&narrow, None).unwrap()
        );
    }

    #[test]
    fn test_narrow_generalizes_to_deeper_grouping() {
        let rows = grid(&[
            &["City", "Person", "Variable", "Value"],
            &["Oslo", "Bob", "Age", "32"],
            &["Oslo", "Bob", "Weight", "178"],
            &["Oslo", "Alice", "Age", "24"],
        ]);
        let table = normalize(&rows, Some(Orientation::Narrow)).unwrap();
        assert_eq!(
            table,
            json!({"Oslo": {
                "Bob": {"Age": "32", "Weight": "178"},
                "Alice": {"Age": "24"},
            }})
        );
    }

    #[test]
    fn test_explicit_orientation_overrides_inference() {
        // The repeated "Red" cells make the heuristic guess narrow;
        // the caller knows this is a wide table.
        let rows = grid(&[
            &["Person", "Team", "Age"],
            &["Bob", "Red", "32"],
            &["Alice", "Red", "24"],
        ]);
        assert_eq!(infer_orientation(&rows), Orientation::Narrow);

        let table = normalize(&rows, Some(Orientation::Wide)).unwrap();
        assert_eq!(
            table,
            json!({
                "Bob": {"Team": "Red", "Age": "32"},
                "Alice": {"Team": "Red", "Age": "24"},
            })
        );
    }

    #[test]
    fn test_empty_grid_normalizes_to_empty_mapping() {
        assert_eq!(normalize(&[], None).unwrap(), json!({}));
    }

    #[test]
    fn test_wide_empty_row_is_format_error() {
        let rows = vec![
            vec!["Person".to_string(), "Age".to_string()],
            vec![],
        ];
        assert!(matches!(
            normalize(&rows, Some(Orientation::Wide)),
            Err(Error::Format(_))
        ));
    }

    #[test]
    fn test_wide_row_longer_than_header_is_format_error() {
        let rows = grid(&[&["Person", "Age"], &["Bob", "32", "178"]]);
        assert!(matches!(
            normalize(&rows, Some(Orientation::Wide)),
            Err(Error::Format(_))
        ));
    }

    #[test]
    fn test_narrow_short_row_is_format_error() {
        let rows = grid(&[&["Person", "Variable", "Value"], &["Bob"]]);
        assert!(matches!(
            normalize(&rows, Some(Orientation::Narrow)),
            Err(Error::Format(_))
        ));
    }

    #[test]
    fn test_narrow_group_colliding_with_leaf_is_format_error() {
        let rows = grid(&[
            &["A", "B", "C"],
            &["Bob", "Age", "32"],
            &["Bob", "Age", "Extra", "1"],
        ]);
        assert!(matches!(
            normalize(&rows, Some(Orientation::Narrow)),
            Err(Error::Format(_))
        ));
    }
}
