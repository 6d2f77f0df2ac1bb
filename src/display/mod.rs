//! Display tree produced by views.
//!
//! # Data Flow
//! ```text
//! view function
//!     → View { crumbs, blocks }
//!     → Navigator commits it to a Surface
//!     → text.rs renders it for the terminal (span expansion, column widths)
//! ```
//!
//! # Design Decisions
//! - Views build plain data; no rendering happens while fetching
//! - Tables carry row/column spans explicitly, as computed by the report renderer
//! - A view is rebuilt from scratch on every navigation

pub mod text;

/// Visual emphasis of a cell or notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tone {
    #[default]
    Plain,
    Good,
    Warn,
    Bad,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Align {
    #[default]
    Left,
    Right,
}

/// One table cell. Spans are at least 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    pub text: String,
    /// Extra detail, shown by front-ends that support it.
    pub title: Option<String>,
    pub tone: Tone,
    pub align: Align,
    pub rowspan: usize,
    pub colspan: usize,
}

impl Cell {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            title: None,
            tone: Tone::Plain,
            align: Align::Left,
            rowspan: 1,
            colspan: 1,
        }
    }

    pub fn empty() -> Self {
        Self::new("")
    }

    /// Right-aligned number.
    pub fn number(n: impl ToString) -> Self {
        Self::new(n.to_string()).right()
    }

    pub fn right(mut self) -> Self {
        self.align = Align::Right;
        self
    }

    pub fn tone(mut self, tone: Tone) -> Self {
        self.tone = tone;
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn rowspan(mut self, rows: usize) -> Self {
        self.rowspan = rows.max(1);
        self
    }

    pub fn colspan(mut self, cols: usize) -> Self {
        self.colspan = cols.max(1);
        self
    }
}

/// A physical table row; cells spanned from earlier rows are not repeated.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DisplayRow {
    pub cells: Vec<Cell>,
}

impl DisplayRow {
    pub fn new(cells: Vec<Cell>) -> Self {
        Self { cells }
    }

    /// Row of plain cells.
    pub fn text<I, S>(texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(texts.into_iter().map(Cell::new).collect())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Table {
    /// Header rows; a grouped header may use colspans.
    pub header: Vec<DisplayRow>,
    pub rows: Vec<DisplayRow>,
}

impl Table {
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            header: vec![DisplayRow::text(columns)],
            rows: Vec::new(),
        }
    }

    pub fn with_rows(mut self, rows: Vec<DisplayRow>) -> Self {
        self.rows = rows;
        self
    }

    /// Number of columns of the last header row, spans expanded.
    pub fn width(&self) -> usize {
        self.header
            .last()
            .map_or(0, |r| r.cells.iter().map(|c| c.colspan).sum())
    }
}

/// A block of page content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Heading(String),
    Paragraph(String),
    Notice(Tone, String),
    /// Bulleted list of (link target, text). The target may be empty.
    Links(Vec<(String, String)>),
    Table(Table),
    /// Preformatted text, shown as is.
    Literal(String),
}

/// A page as shown to the operator.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct View {
    /// Breadcrumbs from the index to this page.
    pub crumbs: Vec<String>,
    pub blocks: Vec<Block>,
}

impl View {
    pub fn new<I, S>(crumbs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            crumbs: crumbs.into_iter().map(Into::into).collect(),
            blocks: Vec::new(),
        }
    }

    pub fn push(mut self, block: Block) -> Self {
        self.blocks.push(block);
        self
    }

    pub fn paragraph(self, text: impl Into<String>) -> Self {
        self.push(Block::Paragraph(text.into()))
    }

    pub fn heading(self, text: impl Into<String>) -> Self {
        self.push(Block::Heading(text.into()))
    }

    pub fn table(self, table: Table) -> Self {
        self.push(Block::Table(table))
    }

    /// Fixed page for locations no route matches.
    pub fn not_found() -> Self {
        View::new(["Page not found"]).paragraph("page not found")
    }
}
