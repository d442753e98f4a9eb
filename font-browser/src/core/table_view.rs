//! `ListView` for terminals.
//!
//! Keeps rows sorted by the active column, pages them, and tracks a cursor
//! that follows the same family across refreshes. Draws either plain text
//! (pipes, tests) or a styled full-screen table through crossterm.

use std::cmp::Ordering;
use std::io::{self, Write};

use crossterm::style::{self, Stylize};
use crossterm::terminal::{self, ClearType};
use crossterm::{cursor, QueueableCommand};

use super::error::BrowserError;
use super::list_view::{Column, ListView, SortKey};
use super::rows::FontRow;

pub const DEFAULT_PAGE_SIZE: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineKind {
    Header,
    Selected,
    Footer,
    Plain,
}

struct Line {
    kind: LineKind,
    text: String,
}

impl Line {
    fn new(kind: LineKind, text: String) -> Self {
        Self { kind, text }
    }
}

pub struct TableView<W: Write> {
    out: W,
    styled: bool,
    columns: Vec<Column>,
    sort: SortKey,
    rows: Vec<FontRow>,
    page_size: usize,
    page: usize,
    cursor: Option<usize>,
}

impl<W: Write> TableView<W> {
    /// Creates an empty view writing to `out`. A zero page size is raised to 1.
    pub fn new(out: W, page_size: usize) -> Self {
        Self {
            out,
            styled: false,
            columns: Vec::new(),
            sort: SortKey::ascending(0),
            rows: Vec::new(),
            page_size: page_size.max(1),
            page: 0,
            cursor: None,
        }
    }

    /// Draws with terminal styling (clear screen, bold header, reversed
    /// cursor row) instead of plain text.
    pub fn styled(mut self) -> Self {
        self.styled = true;
        self
    }

    pub fn output(&self) -> &W {
        &self.out
    }

    pub fn sort_key(&self) -> SortKey {
        self.sort
    }

    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    /// Zero-based index of the visible page.
    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_count(&self) -> usize {
        self.rows.len().div_ceil(self.page_size).max(1)
    }

    /// Case-insensitive header lookup.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns
            .iter()
            .position(|c| c.name.eq_ignore_ascii_case(name.trim()))
    }

    /// Sorts by `column`. Sorting again by the current column flips the
    /// direction. Returns `false` for unknown or unsortable columns.
    pub fn sort_by(&mut self, column: usize) -> bool {
        match self.columns.get(column) {
            Some(c) if c.sortable => {}
            _ => return false,
        }
        self.sort = if self.sort.column == column {
            SortKey {
                column,
                descending: !self.sort.descending,
            }
        } else {
            SortKey::ascending(column)
        };
        let selected = self.selected_id().map(str::to_string);
        self.sort_rows();
        self.restore_cursor(selected.as_deref(), None);
        true
    }

    pub fn next_line(&mut self) {
        if let Some(cursor) = self.cursor {
            self.move_cursor((cursor + 1).min(self.rows.len() - 1));
        }
    }

    pub fn previous_line(&mut self) {
        if let Some(cursor) = self.cursor {
            self.move_cursor(cursor.saturating_sub(1));
        }
    }

    /// Moves the cursor to an absolute row index. Returns `false` when out of range.
    pub fn goto(&mut self, index: usize) -> bool {
        if index >= self.rows.len() {
            return false;
        }
        self.move_cursor(index);
        true
    }

    pub fn next_page(&mut self) -> bool {
        if self.page + 1 >= self.page_count() {
            return false;
        }
        self.move_cursor((self.page + 1) * self.page_size);
        true
    }

    pub fn previous_page(&mut self) -> bool {
        if self.page == 0 || self.rows.is_empty() {
            return false;
        }
        self.move_cursor((self.page - 1) * self.page_size);
        true
    }

    /// Renders header, visible page, and footer as plain text.
    pub fn render(&self) -> String {
        self.lines()
            .into_iter()
            .map(|line| line.text + "\n")
            .collect()
    }

    fn lines(&self) -> Vec<Line> {
        let mut lines = Vec::new();

        let header: Vec<String> = self
            .columns
            .iter()
            .enumerate()
            .map(|(i, column)| {
                let name = if i == self.sort.column {
                    let arrow = if self.sort.descending { 'v' } else { '^' };
                    format!("{} {}", column.name, arrow)
                } else {
                    column.name.to_string()
                };
                fit(&name, column.width)
            })
            .collect();
        lines.push(Line::new(LineKind::Header, format!("  {}", header.join(" ").trim_end())));

        let total_width: usize = self.columns.iter().map(|c| c.width + 1).sum();
        lines.push(Line::new(
            LineKind::Plain,
            format!("  {}", "-".repeat(total_width.saturating_sub(1))),
        ));

        if self.rows.is_empty() {
            lines.push(Line::new(LineKind::Plain, "  (no fonts)".to_string()));
        }

        let start = self.page * self.page_size;
        for (offset, row) in self.rows.iter().skip(start).take(self.page_size).enumerate() {
            let selected = self.cursor == Some(start + offset);
            let cells: Vec<String> = self
                .columns
                .iter()
                .enumerate()
                .map(|(i, column)| fit(cell(row, i), column.width))
                .collect();
            let marker = if selected { '>' } else { ' ' };
            let kind = if selected { LineKind::Selected } else { LineKind::Plain };
            lines.push(Line::new(kind, format!("{} {}", marker, cells.join(" ").trim_end())));
        }

        let sort_name = self
            .columns
            .get(self.sort.column)
            .map(|c| c.name)
            .unwrap_or("-");
        lines.push(Line::new(
            LineKind::Footer,
            format!(
                "-- page {}/{}, {} fonts, sorted by {} {} --",
                self.page + 1,
                self.page_count(),
                self.rows.len(),
                sort_name,
                if self.sort.descending { "descending" } else { "ascending" },
            ),
        ));
        lines
    }

    /// Clears the screen and draws with a bold header and a reversed cursor
    /// row. Uses `\r\n` so it also draws correctly in raw mode.
    fn draw_styled(&mut self) -> io::Result<()> {
        let lines = self.lines();
        self.out.queue(terminal::Clear(ClearType::All))?;
        self.out.queue(cursor::MoveTo(0, 0))?;
        for line in lines {
            match line.kind {
                LineKind::Header => self.out.queue(style::PrintStyledContent(line.text.bold()))?,
                LineKind::Selected => {
                    self.out.queue(style::PrintStyledContent(line.text.reverse()))?
                }
                LineKind::Footer => {
                    self.out.queue(style::PrintStyledContent(line.text.dark_grey()))?
                }
                LineKind::Plain => self.out.queue(style::Print(line.text))?,
            };
            self.out.queue(style::Print("\r\n"))?;
        }
        self.out.flush()
    }

    fn move_cursor(&mut self, index: usize) {
        self.cursor = Some(index);
        self.page = index / self.page_size;
    }

    fn sort_rows(&mut self) {
        let SortKey { column, descending } = self.sort;
        self.rows.sort_by(|a, b| {
            let ordering = compare_cells(cell(a, column), cell(b, column));
            if descending {
                ordering.reverse()
            } else {
                ordering
            }
        });
    }

    /// Puts the cursor back on `selected` if still present, otherwise near
    /// `fallback` (or the first row).
    fn restore_cursor(&mut self, selected: Option<&str>, fallback: Option<usize>) {
        if self.rows.is_empty() {
            self.cursor = None;
            self.page = 0;
            return;
        }
        let index = selected
            .and_then(|id| self.rows.iter().position(|r| r.id() == id))
            .or(fallback)
            .unwrap_or(0)
            .min(self.rows.len() - 1);
        self.move_cursor(index);
    }
}

impl<W: Write> ListView for TableView<W> {
    fn configure(&mut self, columns: Vec<Column>, sort: SortKey) {
        self.columns = columns;
        self.sort = sort;
        let selected = self.selected_id().map(str::to_string);
        self.sort_rows();
        self.restore_cursor(selected.as_deref(), None);
    }

    fn set_rows(&mut self, rows: Vec<FontRow>) {
        let selected = self.selected_id().map(str::to_string);
        let previous = self.cursor;
        self.rows = rows;
        self.sort_rows();
        self.restore_cursor(selected.as_deref(), previous);
    }

    fn rows(&self) -> &[FontRow] {
        &self.rows
    }

    fn selected_id(&self) -> Option<&str> {
        self.cursor
            .and_then(|i| self.rows.get(i))
            .map(FontRow::id)
    }

    fn redraw(&mut self) -> Result<(), BrowserError> {
        if self.styled {
            self.draw_styled()?;
        } else {
            let text = self.render();
            self.out.write_all(text.as_bytes())?;
            self.out.flush()?;
        }
        Ok(())
    }
}

fn cell(row: &FontRow, column: usize) -> &str {
    match column {
        0 => &row.family,
        _ => &row.sample.text,
    }
}

fn compare_cells(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

/// Pads or truncates to exactly `width` characters.
fn fit(text: &str, width: usize) -> String {
    let len = text.chars().count();
    if width == 0 {
        String::new()
    } else if len > width {
        let mut cut: String = text.chars().take(width.saturating_sub(1)).collect();
        cut.push('…');
        cut
    } else {
        format!("{}{}", text, " ".repeat(width - len))
    }
}
