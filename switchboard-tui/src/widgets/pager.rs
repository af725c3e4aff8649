//! Pagination indicator widget.

use ratatui::{
    layout::Rect,
    style::Style,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub struct PagerBar {
    pub page_size: u32,
    pub shown: usize,
    pub total_count: u64,
    pub on_first_page: bool,
    pub style: Style,
}

impl PagerBar {
    pub fn render(&self, f: &mut Frame<'_>, area: Rect) {
        let position = if self.on_first_page { "first page" } else { "…" };
        let text = format!(
            "{} of {} rows · page size {} · {}",
            self.shown, self.total_count, self.page_size, position
        );
        let paragraph = Paragraph::new(text)
            .style(self.style)
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(paragraph, area);
    }
}
