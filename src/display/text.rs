//! Terminal rendering of the display tree.
//!
//! Tables are expanded into a rectangular slot grid first: a cell with
//! `rowspan > 1` covers the same columns in the following rows, and those
//! rows do not repeat it. Rendering then prints the start slot of every cell
//! and leaves covered slots blank.

use std::fmt::Write as _;

use console::Style;
use thiserror::Error;

use super::{Align, Block, Cell, DisplayRow, Table, Tone, View};

const COLUMN_GAP: &str = "  ";

/// A table whose spans do not tile a rectangle.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("row {row} covers {found} columns, expected {expected}")]
pub struct ShapeError {
    pub row: usize,
    pub expected: usize,
    pub found: usize,
}

/// One position of the expanded grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot<'a> {
    /// Top-left position of a cell.
    Start(&'a Cell),
    /// Covered by a cell starting above or to the left.
    Covered,
}

/// Expand rows into a grid of slots, checking every row has the same width
/// and no row span runs past the last row.
///
/// The width is taken from the first row. An empty slice expands to an
/// empty grid.
pub fn expand(rows: &[DisplayRow]) -> Result<Vec<Vec<Slot<'_>>>, ShapeError> {
    let mut grid: Vec<Vec<Slot<'_>>> = Vec::with_capacity(rows.len());
    // Remaining rows each column stays covered by a span from above.
    let mut pending: Vec<usize> = Vec::new();
    let mut width: Option<usize> = None;

    for (index, row) in rows.iter().enumerate() {
        let mut slots: Vec<Slot<'_>> = Vec::new();
        let mut cells = row.cells.iter();
        let mut col = 0;

        loop {
            if pending.get(col).copied().unwrap_or(0) > 0 {
                slots.push(Slot::Covered);
                col += 1;
                continue;
            }
            let Some(cell) = cells.next() else {
                break;
            };
            let span = cell.colspan.max(1);
            for offset in 0..span {
                slots.push(if offset == 0 { Slot::Start(cell) } else { Slot::Covered });
                if pending.len() <= col + offset {
                    pending.resize(col + offset + 1, 0);
                }
                pending[col + offset] = cell.rowspan.max(1);
            }
            col += span;
        }
        // Trailing columns still covered from above.
        while pending.get(col).copied().unwrap_or(0) > 0 {
            slots.push(Slot::Covered);
            col += 1;
        }

        let expected = *width.get_or_insert(slots.len());
        if slots.len() != expected {
            return Err(ShapeError {
                row: index,
                expected,
                found: slots.len(),
            });
        }

        for remaining in pending.iter_mut() {
            *remaining = remaining.saturating_sub(1);
        }
        grid.push(slots);
    }

    if let Some(col) = pending.iter().position(|&r| r > 0) {
        return Err(ShapeError {
            row: rows.len(),
            expected: width.unwrap_or(0),
            found: col,
        });
    }

    Ok(grid)
}

/// Style for a tone, `None` for plain text.
fn tone_style(tone: Tone) -> Option<Style> {
    match tone {
        Tone::Plain => None,
        Tone::Good => Some(Style::new().green()),
        Tone::Warn => Some(Style::new().yellow()),
        Tone::Bad => Some(Style::new().red()),
    }
}

/// Text in the colour of its tone. Without `color` the text is unchanged.
fn paint(text: &str, tone: Tone, color: bool) -> String {
    match tone_style(tone) {
        Some(style) if color => style.force_styling(true).apply_to(text).to_string(),
        _ => text.to_string(),
    }
}

/// Render a table to lines of text, coloured when the terminal supports it.
pub fn render_table(table: &Table) -> String {
    render_table_with(table, console::colors_enabled())
}

/// Render a table to lines of text. Tables that fail the shape check are
/// rendered row by row without alignment.
///
/// Column widths are measured on the plain text, so colouring never shifts
/// alignment.
pub fn render_table_with(table: &Table, color: bool) -> String {
    let grid = match (expand(&table.header), expand(&table.rows)) {
        (Ok(mut head), Ok(body)) => {
            head.extend(body);
            head
        }
        (Err(e), _) | (_, Err(e)) => {
            tracing::warn!(error = %e, "Table is not rectangular");
            let mut out = String::new();
            for row in table.header.iter().chain(table.rows.iter()) {
                let texts: Vec<String> = row
                    .cells
                    .iter()
                    .map(|cell| paint(&cell.text, cell.tone, color))
                    .collect();
                let _ = writeln!(out, "{}", texts.join(COLUMN_GAP));
            }
            return out;
        }
    };

    let columns = grid.iter().map(Vec::len).max().unwrap_or(0);
    let mut widths = vec![0usize; columns];
    for slots in &grid {
        for (col, slot) in slots.iter().enumerate() {
            if let Slot::Start(cell) = slot {
                if cell.colspan <= 1 {
                    widths[col] = widths[col].max(cell.text.chars().count());
                }
            }
        }
    }
    // Spanning cells widen the last column they cover when needed.
    for slots in &grid {
        for (col, slot) in slots.iter().enumerate() {
            if let Slot::Start(cell) = slot {
                let span = cell.colspan.max(1);
                if span > 1 && col + span <= columns {
                    let available: usize =
                        widths[col..col + span].iter().sum::<usize>() + COLUMN_GAP.len() * (span - 1);
                    let needed = cell.text.chars().count();
                    if needed > available {
                        widths[col + span - 1] += needed - available;
                    }
                }
            }
        }
    }

    let mut out = String::new();
    for (index, slots) in grid.iter().enumerate() {
        let mut line = String::new();
        let mut col = 0;
        while col < slots.len() {
            if col > 0 {
                line.push_str(COLUMN_GAP);
            }
            match slots[col] {
                Slot::Start(cell) => {
                    let span = cell.colspan.max(1).min(slots.len() - col);
                    let width: usize =
                        widths[col..col + span].iter().sum::<usize>() + COLUMN_GAP.len() * (span - 1);
                    let fill = " ".repeat(width.saturating_sub(cell.text.chars().count()));
                    let text = paint(&cell.text, cell.tone, color);
                    match cell.align {
                        Align::Left => {
                            line.push_str(&text);
                            line.push_str(&fill);
                        }
                        Align::Right => {
                            line.push_str(&fill);
                            line.push_str(&text);
                        }
                    }
                    col += span;
                }
                Slot::Covered => {
                    let _ = write!(line, "{:width$}", "", width = widths[col]);
                    col += 1;
                }
            }
        }
        let _ = writeln!(out, "{}", line.trim_end());
        if index + 1 == table.header.len() {
            let total: usize = widths.iter().sum::<usize>() + COLUMN_GAP.len() * columns.saturating_sub(1);
            let _ = writeln!(out, "{}", "-".repeat(total));
        }
    }
    out
}

/// Render a whole view, coloured when the terminal supports it.
pub fn render_view(view: &View) -> String {
    render_view_with(view, console::colors_enabled())
}

/// Render a whole view: breadcrumb title, then each block separated by a
/// blank line. Notices take the colour of their tone.
pub fn render_view_with(view: &View, color: bool) -> String {
    let mut out = String::new();
    let title = view.crumbs.join(" / ");
    let _ = writeln!(out, "{}", title);
    let _ = writeln!(out, "{}", "=".repeat(title.chars().count()));

    for block in &view.blocks {
        out.push('\n');
        match block {
            Block::Heading(text) => {
                let _ = writeln!(out, "## {}", text);
            }
            Block::Paragraph(text) => {
                let _ = writeln!(out, "{}", text);
            }
            Block::Notice(tone, text) => {
                let _ = writeln!(out, "{}", paint(text, *tone, color));
            }
            Block::Links(links) => {
                for (target, text) in links {
                    if target.is_empty() {
                        let _ = writeln!(out, "- {}", text);
                    } else {
                        let _ = writeln!(out, "- {}  (#{})", text, target);
                    }
                }
            }
            Block::Table(table) => out.push_str(&render_table_with(table, color)),
            Block::Literal(text) => {
                for line in text.lines() {
                    let _ = writeln!(out, "    {}", line);
                }
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_rowspans() {
        let rows = vec![
            DisplayRow::new(vec![Cell::new("a").rowspan(2), Cell::new("b")]),
            DisplayRow::new(vec![Cell::new("c")]),
        ];
        let grid = expand(&rows).unwrap();
        assert_eq!(grid.len(), 2);
        assert!(matches!(grid[1][0], Slot::Covered));
        assert!(matches!(grid[1][1], Slot::Start(c) if c.text == "c"));
    }

    #[test]
    fn test_expand_rejects_ragged_rows() {
        let rows = vec![
            DisplayRow::text(["a", "b"]),
            DisplayRow::text(["c"]),
        ];
        let err = expand(&rows).unwrap_err();
        assert_eq!(err, ShapeError { row: 1, expected: 2, found: 1 });
    }

    #[test]
    fn test_expand_rejects_span_past_end() {
        let rows = vec![DisplayRow::new(vec![Cell::new("a").rowspan(2), Cell::new("b")])];
        assert!(expand(&rows).is_err());
    }

    #[test]
    fn test_expand_colspan() {
        let rows = vec![
            DisplayRow::text(["a", "b", "c"]),
            DisplayRow::new(vec![Cell::new("x"), Cell::new("wide").colspan(2)]),
        ];
        let grid = expand(&rows).unwrap();
        assert_eq!(grid[1].len(), 3);
        assert!(matches!(grid[1][2], Slot::Covered));
    }

    #[test]
    fn test_render_table_aligns_columns() {
        let table = Table::new(["Name", "Count"]).with_rows(vec![
            DisplayRow::new(vec![Cell::new("example.org"), Cell::number(3)]),
            DisplayRow::new(vec![Cell::new("a.nl"), Cell::number(12)]),
        ]);
        let out = render_table_with(&table, false);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "Name         Count");
        assert!(lines[1].starts_with("---"));
        assert_eq!(lines[2], "example.org      3");
        assert_eq!(lines[3], "a.nl            12");
    }

    #[test]
    fn test_plain_output_has_no_tone_markup() {
        let table = Table::new(["Result", "Count"]).with_rows(vec![
            DisplayRow::new(vec![Cell::new("fail").tone(Tone::Bad), Cell::number(1)]),
            DisplayRow::new(vec![Cell::new("softfail").tone(Tone::Warn), Cell::number(2)]),
        ]);
        let out = render_table_with(&table, false);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[2], "fail          1");
        assert_eq!(lines[3], "softfail      2");
        assert!(!out.contains('\u{1b}'));
    }

    #[test]
    fn test_colored_cells_keep_alignment() {
        let table = Table::new(["Result", "Count"]).with_rows(vec![
            DisplayRow::new(vec![Cell::new("fail").tone(Tone::Bad), Cell::number(1)]),
            DisplayRow::new(vec![Cell::new("pass").tone(Tone::Good), Cell::number(20)]),
        ]);
        let out = render_table_with(&table, true);
        let lines: Vec<&str> = out.lines().collect();
        let red = Style::new().red().force_styling(true).apply_to("fail").to_string();
        let green = Style::new().green().force_styling(true).apply_to("pass").to_string();
        assert_ne!(red, "fail");
        assert_eq!(lines[2], format!("{red}        1"));
        assert_eq!(lines[3], format!("{green}       20"));
    }

    #[test]
    fn test_notice_colors() {
        let view = View::new(["Mail Admin"])
            .push(Block::Notice(Tone::Warn, "Queue is large".into()))
            .push(Block::Notice(Tone::Plain, "Nothing to do".into()));

        let plain = render_view_with(&view, false);
        assert!(plain.contains("\nQueue is large\n"), "{plain}");
        assert!(!plain.contains('['));

        let colored = render_view_with(&view, true);
        let yellow = Style::new().yellow().force_styling(true).apply_to("Queue is large").to_string();
        assert!(colored.contains(&yellow), "{colored}");
        assert!(colored.contains("\nNothing to do\n"));
    }

    #[test]
    fn test_render_view_title_and_links() {
        let view = View::new(["Mox Admin", "DMARC"]).push(Block::Links(vec![(
            "dmarc/reports".into(),
            "Reports".into(),
        )]));
        let out = render_view_with(&view, false);
        assert!(out.starts_with("Mox Admin / DMARC\n"));
        assert!(out.contains("- Reports  (#dmarc/reports)"));
    }
}
