//! Filter bar widget.
//!
//! Shows the active column filters of the current screen, and the editor
//! line while a filter is being edited.

use crate::state::FilterEditor;
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use switchboard_client::{ColumnFilter, FilterValue};

pub struct FilterBar<'a> {
    pub filters: &'a [ColumnFilter],
    pub editor: Option<&'a FilterEditor>,
    pub editing_column: Option<&'static str>,
    pub active_style: Style,
    pub dim_style: Style,
}

impl<'a> FilterBar<'a> {
    pub fn render(&self, f: &mut Frame<'_>, area: Rect) {
        let mut spans: Vec<Span> = Vec::new();

        if let (Some(editor), Some(column)) = (self.editor, self.editing_column) {
            spans.push(Span::styled(
                format!(" {} = {}▏", column, editor.buffer),
                self.active_style,
            ));
        }

        for filter in self.filters {
            if Some(filter.id) == self.editing_column {
                continue;
            }
            let rendered = match &filter.value {
                FilterValue::Text(value) => format!(" {}~{} ", filter.id, value),
                FilterValue::Many(values) => format!(" {}∈[{}] ", filter.id, values.join(",")),
            };
            spans.push(Span::styled(rendered, self.dim_style));
        }

        if spans.is_empty() {
            spans.push(Span::styled(" no filters ", self.dim_style));
        }

        let paragraph = Paragraph::new(Line::from(spans))
            .block(Block::default().title("Filters").borders(Borders::ALL));
        f.render_widget(paragraph, area);
    }
}
