//! Suppression of values repeated from the previous row.

use std::collections::BTreeMap;

use crate::display::{DisplayRow, Tone};

/// Last text seen per column index. A missing column counts as "".
pub type LastSeen = BTreeMap<usize, String>;

/// Blank every listed column whose text equals the previous row's text for
/// that column.
///
/// The last seen value is updated after every row, whether or not the cell
/// was blanked, so a value reappearing after a different one is shown again.
/// Pass the returned state back in to continue across batches.
pub fn merge_unchanged(
    rows: Vec<DisplayRow>,
    columns: &[usize],
    last: LastSeen,
) -> (Vec<DisplayRow>, LastSeen) {
    rows.into_iter()
        .fold((Vec::new(), last), |(mut out, mut last), mut row| {
            for &col in columns {
                let Some(cell) = row.cells.get_mut(col) else {
                    continue;
                };
                let seen = last.get(&col).map(String::as_str).unwrap_or("");
                let text = cell.text.clone();
                if text == seen {
                    cell.text.clear();
                    cell.tone = Tone::Plain;
                }
                last.insert(col, text);
            }
            out.push(row);
            (out, last)
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(rows: &[DisplayRow]) -> Vec<Vec<&str>> {
        rows.iter()
            .map(|r| r.cells.iter().map(|c| c.text.as_str()).collect())
            .collect()
    }

    #[test]
    fn test_repeats_are_blanked() {
        let rows = vec![
            DisplayRow::text(["1", "24h", "a@x"]),
            DisplayRow::text(["2", "24h", "a@x"]),
            DisplayRow::text(["3", "1h", "a@x"]),
            DisplayRow::text(["4", "24h", "b@x"]),
        ];
        let (rows, last) = merge_unchanged(rows, &[1, 2], LastSeen::new());
        assert_eq!(
            texts(&rows),
            vec![
                vec!["1", "24h", "a@x"],
                vec!["2", "", ""],
                vec!["3", "1h", ""],
                vec!["4", "24h", "b@x"],
            ]
        );
        assert_eq!(last.get(&1).map(String::as_str), Some("24h"));
        assert_eq!(last.get(&2).map(String::as_str), Some("b@x"));
    }

    #[test]
    fn test_state_carries_over() {
        let mut last = LastSeen::new();
        last.insert(0, "p=reject; ".to_string());
        let (rows, _) = merge_unchanged(vec![DisplayRow::text(["p=reject; "])], &[0], last);
        assert_eq!(texts(&rows), vec![vec![""]]);
    }

    #[test]
    fn test_unlisted_columns_untouched() {
        let rows = vec![DisplayRow::text(["a", "b"]), DisplayRow::text(["a", "b"])];
        let (rows, _) = merge_unchanged(rows, &[1], LastSeen::new());
        assert_eq!(texts(&rows), vec![vec!["a", "b"], vec!["a", ""]]);
    }
}
