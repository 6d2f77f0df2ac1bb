//! Flattening of three-level reports into rows with row spans.
//!
//! A report has policy results, a policy result has failure details. Each
//! detail becomes one physical row. Report cells appear once, on the first row
//! of the report, spanning all its rows; result cells appear once per result,
//! spanning that result's rows.

use crate::display::{Cell, DisplayRow};

/// Column counts of the three levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    pub report: usize,
    pub result: usize,
    pub detail: usize,
}

impl Layout {
    pub fn width(&self) -> usize {
        self.report + self.result + self.detail
    }
}

/// Top level of a report table.
#[derive(Debug, Clone, Default)]
pub struct Report {
    pub cells: Vec<Cell>,
    pub results: Vec<PolicyResult>,
}

/// Second level, grouping the detail rows below it.
#[derive(Debug, Clone, Default)]
pub struct PolicyResult {
    pub cells: Vec<Cell>,
    /// One entry per detail row.
    pub details: Vec<Vec<Cell>>,
}

impl Report {
    /// Physical rows this report occupies.
    pub fn leaf_count(&self) -> usize {
        self.results
            .iter()
            .map(PolicyResult::leaf_count)
            .sum::<usize>()
            .max(1)
    }
}

impl PolicyResult {
    pub fn leaf_count(&self) -> usize {
        self.details.len().max(1)
    }
}

/// Fit cells to exactly `width` columns (colspans included), then apply the
/// row span to every cell.
fn fit(cells: &[Cell], width: usize, rowspan: usize) -> Vec<Cell> {
    let mut out = Vec::with_capacity(width);
    let mut used = 0;
    for cell in cells {
        let span = cell.colspan.max(1);
        if used + span > width {
            break;
        }
        out.push(cell.clone().rowspan(rowspan));
        used += span;
    }
    while used < width {
        out.push(Cell::empty().rowspan(rowspan));
        used += 1;
    }
    out
}

fn placeholder(columns: usize) -> Option<Cell> {
    (columns > 0).then(|| Cell::empty().colspan(columns))
}

/// Flatten reports into display rows. Every row expands to exactly
/// `layout.width()` columns.
pub fn render(layout: Layout, reports: &[Report]) -> Vec<DisplayRow> {
    let mut rows = Vec::new();

    for report in reports {
        let mut head = Some(fit(&report.cells, layout.report, report.leaf_count()));

        if report.results.is_empty() {
            let mut cells = head.take().unwrap_or_default();
            cells.extend(placeholder(layout.result + layout.detail));
            rows.push(DisplayRow::new(cells));
            continue;
        }

        for result in &report.results {
            let mut middle = Some(fit(&result.cells, layout.result, result.leaf_count()));

            if result.details.is_empty() {
                let mut cells = head.take().unwrap_or_default();
                cells.extend(middle.take().unwrap_or_default());
                cells.extend(placeholder(layout.detail));
                rows.push(DisplayRow::new(cells));
                continue;
            }

            for detail in &result.details {
                let mut cells = head.take().unwrap_or_default();
                cells.extend(middle.take().unwrap_or_default());
                cells.extend(fit(detail, layout.detail, 1));
                rows.push(DisplayRow::new(cells));
            }
        }
    }

    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::text::{expand, Slot};

    const LAYOUT: Layout = Layout {
        report: 2,
        result: 2,
        detail: 3,
    };

    fn cells(texts: &[&str]) -> Vec<Cell> {
        texts.iter().map(|t| Cell::new(*t)).collect()
    }

    fn result(name: &str, details: usize) -> PolicyResult {
        PolicyResult {
            cells: cells(&[name, "1"]),
            details: (0..details)
                .map(|i| cells(&[format!("d{i}").as_str(), "x", "y"]))
                .collect(),
        }
    }

    #[test]
    fn test_spans_for_three_and_zero_details() {
        let report = Report {
            cells: cells(&["1", "example.org"]),
            results: vec![result("sts", 3), result("tlsa", 0)],
        };
        let rows = render(LAYOUT, &[report]);

        assert_eq!(rows.len(), 4);
        assert!(rows[0].cells[..2].iter().all(|c| c.rowspan == 4));
        assert!(rows[0].cells[2..4].iter().all(|c| c.rowspan == 3));
        // Continuation rows of the first result carry only details.
        assert_eq!(rows[1].cells.len(), 3);
        assert_eq!(rows[2].cells.len(), 3);
        // Second result: its own cells plus one placeholder over the details.
        assert_eq!(rows[3].cells.len(), 3);
        assert_eq!(rows[3].cells[0].text, "tlsa");
        assert_eq!(rows[3].cells[0].rowspan, 1);
        assert_eq!(rows[3].cells[2].colspan, 3);

        let grid = expand(&rows).unwrap();
        assert!(grid.iter().all(|r| r.len() == LAYOUT.width()));
    }

    #[test]
    fn test_report_without_results() {
        let report = Report {
            cells: cells(&["2", "example.net"]),
            results: Vec::new(),
        };
        let rows = render(LAYOUT, &[report]);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].cells.len(), 3);
        assert_eq!(rows[0].cells[2].colspan, 5);
        assert_eq!(expand(&rows).unwrap()[0].len(), 7);
    }

    #[test]
    fn test_cells_padded_and_truncated() {
        let report = Report {
            cells: cells(&["only"]),
            results: vec![PolicyResult {
                cells: cells(&["a", "b", "c", "d"]),
                details: vec![cells(&["x"])],
            }],
        };
        let rows = render(LAYOUT, &[report]);
        assert_eq!(rows[0].cells.len(), 7);
        assert_eq!(rows[0].cells[1].text, "");
        assert_eq!(rows[0].cells[3].text, "b");
        assert_eq!(rows[0].cells[4].text, "x");
        assert_eq!(rows[0].cells[6].text, "");
    }

    #[test]
    fn test_multiple_reports_stay_rectangular() {
        let reports = vec![
            Report {
                cells: cells(&["1", "a"]),
                results: vec![result("p", 2), result("q", 1)],
            },
            Report {
                cells: cells(&["2", "b"]),
                results: Vec::new(),
            },
            Report {
                cells: cells(&["3", "c"]),
                results: vec![result("r", 0)],
            },
        ];
        let rows = render(LAYOUT, &reports);
        assert_eq!(rows.len(), 5);

        let grid = expand(&rows).unwrap();
        assert!(grid.iter().all(|r| r.len() == 7));
        assert!(matches!(grid[3][0], Slot::Start(c) if c.text == "2"));
        assert!(matches!(grid[2][0], Slot::Covered));
    }
}
