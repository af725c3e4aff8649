//! Data table widget.

use ratatui::{
    layout::{Constraint, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

#[derive(Debug, Clone, Copy)]
pub struct Column {
    pub header: &'static str,
    pub width: Constraint,
}

/// Table with a header row and an optional "no data" affordance when there
/// are no rows to show.
pub struct DataTable<'a> {
    pub title: String,
    pub columns: &'a [Column],
    pub rows: Vec<Vec<Cell<'a>>>,
    pub selected: Option<usize>,
    pub loading: bool,
    pub header_style: Style,
    pub row_style: Style,
    pub selected_style: Style,
    pub border_style: Style,
}

impl<'a> DataTable<'a> {
    pub fn render(self, f: &mut Frame<'_>, area: Rect) {
        let title = if self.loading {
            format!("{} (loading…)", self.title)
        } else {
            self.title.clone()
        };
        let block = Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(self.border_style);

        if self.rows.is_empty() {
            // Zero rows is a valid state, not an error.
            let empty = Paragraph::new(Line::from(Span::styled(
                "no data",
                self.row_style,
            )))
            .block(block);
            f.render_widget(empty, area);
            return;
        }

        let header = Row::new(
            self.columns
                .iter()
                .map(|c| Cell::from(c.header))
                .collect::<Vec<_>>(),
        )
        .style(self.header_style);

        let rows: Vec<Row> = self
            .rows
            .into_iter()
            .enumerate()
            .map(|(index, cells)| {
                let style = if Some(index) == self.selected {
                    self.selected_style
                } else {
                    self.row_style
                };
                Row::new(cells).style(style)
            })
            .collect();

        let widths: Vec<Constraint> = self.columns.iter().map(|c| c.width).collect();
        let table = Table::new(rows, widths).header(header).block(block);
        f.render_widget(table, area);
    }
}
