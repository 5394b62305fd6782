//! # SearchBox Component
//!
//! Single-line text input for the search term.
//!
//! The buffer is internal state and survives submission, so the term stays
//! visible above the results it produced. Submitting blank text is allowed:
//! the core treats it as "show the recent feed".
//!
//! The cursor is a byte offset into the buffer, always on a char boundary.
//! On screen it is placed by display width, so wide glyphs (CJK, emoji)
//! line up. When the text is wider than the box, the view scrolls so the
//! cursor stays visible.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, BorderType, Paragraph};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

const PLACEHOLDER: &str = "Search photos... (Enter for recent)";

/// High-level events emitted by the SearchBox
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchEvent {
    /// Enter pressed; carries the full buffer.
    Submit(String),
    ContentChanged,
}

pub struct SearchBox {
    buffer: String,
    /// Byte offset of the cursor in `buffer`.
    cursor: usize,
    /// Prop: whether keystrokes currently go to this box.
    pub focused: bool,
}

impl SearchBox {
    pub fn new(initial: &str) -> Self {
        Self {
            buffer: initial.to_string(),
            cursor: initial.len(),
            focused: false,
        }
    }

    pub fn text(&self) -> &str {
        &self.buffer
    }

    /// Byte offset where the visible slice starts, and the cursor's column
    /// inside that slice, for a box `width` cells wide.
    fn viewport(&self, width: usize) -> (usize, usize) {
        if width == 0 {
            return (0, 0);
        }
        let mut start = 0;
        let mut col = self.buffer[..self.cursor].width();
        // Leave one cell for the cursor itself.
        while col >= width {
            let Some(c) = self.buffer[start..].chars().next() else {
                break;
            };
            col -= c.width().unwrap_or(0);
            start += c.len_utf8();
        }
        (start, col)
    }
}

fn prev_char_boundary(text: &str, pos: usize) -> usize {
    text[..pos]
        .char_indices()
        .next_back()
        .map(|(i, _)| i)
        .unwrap_or(0)
}

fn next_char_boundary(text: &str, pos: usize) -> usize {
    text[pos..]
        .char_indices()
        .nth(1)
        .map(|(i, _)| pos + i)
        .unwrap_or(text.len())
}

impl Component for SearchBox {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let border_style = if self.focused {
            Style::default().fg(Color::Green)
        } else {
            Style::default().add_modifier(Modifier::DIM)
        };
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .title("Search");

        let inner_width = area.width.saturating_sub(2) as usize;
        let (start, col) = self.viewport(inner_width);

        let paragraph = if self.buffer.is_empty() {
            Paragraph::new(PLACEHOLDER).style(Style::default().fg(Color::DarkGray))
        } else {
            Paragraph::new(&self.buffer[start..])
        };
        frame.render_widget(paragraph.block(block), area);

        if self.focused && area.width > 2 && area.height > 2 {
            let x = area.x + 1 + col as u16;
            frame.set_cursor_position((x, area.y + 1));
        }
    }
}

impl EventHandler for SearchBox {
    type Event = SearchEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::InputChar(c) => {
                self.buffer.insert(self.cursor, *c);
                self.cursor += c.len_utf8();
                Some(SearchEvent::ContentChanged)
            }
            TuiEvent::Paste(text) => {
                // Single line: newlines in pasted text become spaces.
                let flat: String = text
                    .chars()
                    .map(|c| if c == '\n' || c == '\r' { ' ' } else { c })
                    .collect();
                self.buffer.insert_str(self.cursor, &flat);
                self.cursor += flat.len();
                Some(SearchEvent::ContentChanged)
            }
            TuiEvent::Backspace => (self.cursor > 0).then(|| {
                let prev = prev_char_boundary(&self.buffer, self.cursor);
                self.buffer.drain(prev..self.cursor);
                self.cursor = prev;
                SearchEvent::ContentChanged
            }),
            TuiEvent::Delete => (self.cursor < self.buffer.len()).then(|| {
                let next = next_char_boundary(&self.buffer, self.cursor);
                self.buffer.drain(self.cursor..next);
                SearchEvent::ContentChanged
            }),
            TuiEvent::CursorLeft => (self.cursor > 0).then(|| {
                self.cursor = prev_char_boundary(&self.buffer, self.cursor);
                SearchEvent::ContentChanged
            }),
            TuiEvent::CursorRight => (self.cursor < self.buffer.len()).then(|| {
                self.cursor = next_char_boundary(&self.buffer, self.cursor);
                SearchEvent::ContentChanged
            }),
            TuiEvent::Home => (self.cursor != 0).then(|| {
                self.cursor = 0;
                SearchEvent::ContentChanged
            }),
            TuiEvent::End => (self.cursor != self.buffer.len()).then(|| {
                self.cursor = self.buffer.len();
                SearchEvent::ContentChanged
            }),
            TuiEvent::Submit => Some(SearchEvent::Submit(self.buffer.clone())),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn type_str(search: &mut SearchBox, s: &str) {
        for c in s.chars() {
            search.handle_event(&TuiEvent::InputChar(c));
        }
    }

    #[test]
    fn test_typing_and_backspace() {
        let mut search = SearchBox::new("");
        type_str(&mut search, "cat");
        assert_eq!(search.text(), "cat");

        let res = search.handle_event(&TuiEvent::Backspace);
        assert_eq!(res, Some(SearchEvent::ContentChanged));
        assert_eq!(search.text(), "ca");
    }

    #[test]
    fn test_backspace_at_start_is_noop() {
        let mut search = SearchBox::new("");
        assert_eq!(search.handle_event(&TuiEvent::Backspace), None);
    }

    #[test]
    fn test_submit_keeps_buffer() {
        let mut search = SearchBox::new("");
        type_str(&mut search, "cats");
        let res = search.handle_event(&TuiEvent::Submit);
        assert_eq!(res, Some(SearchEvent::Submit("cats".to_string())));
        assert_eq!(search.text(), "cats");
    }

    #[test]
    fn test_blank_submit_is_emitted() {
        let mut search = SearchBox::new("");
        assert_eq!(
            search.handle_event(&TuiEvent::Submit),
            Some(SearchEvent::Submit(String::new()))
        );
    }

    #[test]
    fn test_edit_in_middle_with_multibyte() {
        let mut search = SearchBox::new("café");
        search.handle_event(&TuiEvent::CursorLeft);
        search.handle_event(&TuiEvent::Backspace);
        assert_eq!(search.text(), "caé");
        search.handle_event(&TuiEvent::Delete);
        assert_eq!(search.text(), "ca");
    }

    #[test]
    fn test_home_end() {
        let mut search = SearchBox::new("dog");
        search.handle_event(&TuiEvent::Home);
        type_str(&mut search, "hot");
        assert_eq!(search.text(), "hotdog");
        search.handle_event(&TuiEvent::End);
        type_str(&mut search, "s");
        assert_eq!(search.text(), "hotdogs");
    }

    #[test]
    fn test_paste_flattens_newlines() {
        let mut search = SearchBox::new("");
        search.handle_event(&TuiEvent::Paste("red\nbarn".to_string()));
        assert_eq!(search.text(), "red barn");
    }

    #[test]
    fn test_viewport_scrolls_to_keep_cursor_visible() {
        let search = SearchBox::new("abcdefghij");
        // 10 chars in a 5-wide box: cursor at column 4, text starts at 'g'.
        assert_eq!(search.viewport(5), (6, 4));

        let short = SearchBox::new("abc");
        assert_eq!(short.viewport(5), (0, 3));
    }

    #[test]
    fn test_viewport_counts_wide_glyphs() {
        let search = SearchBox::new("日本");
        assert_eq!(search.viewport(10), (0, 4));
    }

    #[test]
    fn test_render_shows_placeholder_when_empty() {
        let backend = TestBackend::new(50, 3);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut search = SearchBox::new("");
        terminal.draw(|f| search.render(f, f.area())).unwrap();

        let text = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect::<String>();
        assert!(text.contains("Search photos"));
    }
}
