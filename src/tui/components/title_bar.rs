//! # TitleBar Component
//!
//! Single-line bar at the top of the screen. Purely presentational: the
//! parent fills in the props each frame.
//!
//! ```text
//! Omada | Search: cats | 42 photos (page 1 of 9)
//! ```

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};

use crate::tui::component::Component;

pub struct TitleBar {
    /// What the grid is showing, e.g. "Recent photos".
    pub query_label: String,
    pub status_message: String,
}

impl TitleBar {
    pub fn new(query_label: String, status_message: String) -> Self {
        Self {
            query_label,
            status_message,
        }
    }

    fn text(&self) -> String {
        if self.status_message.is_empty() {
            format!("Omada | {}", self.query_label)
        } else {
            format!("Omada | {} | {}", self.query_label, self.status_message)
        }
    }
}

impl Component for TitleBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let line = Line::from(Span::styled(
            self.text(),
            Style::default().add_modifier(Modifier::BOLD),
        ));
        frame.render_widget(line, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn rendered(title_bar: &mut TitleBar) -> String {
        let backend = TestBackend::new(80, 1);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| title_bar.render(f, f.area())).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect::<String>()
    }

    #[test]
    fn test_title_bar_with_status_message() {
        let mut title_bar = TitleBar::new(
            "Search: cats".to_string(),
            "3 photos (page 1 of 5)".to_string(),
        );
        let text = rendered(&mut title_bar);
        assert!(text.contains("Omada | Search: cats | 3 photos (page 1 of 5)"));
    }

    #[test]
    fn test_title_bar_without_status() {
        let mut title_bar = TitleBar::new("Recent photos".to_string(), String::new());
        let text = rendered(&mut title_bar);
        assert!(text.contains("Omada | Recent photos"));
        assert_eq!(text.matches('|').count(), 1);
    }
}
