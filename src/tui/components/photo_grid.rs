//! # PhotoGrid Component
//!
//! Three-column grid of photo cards with keyboard selection.
//!
//! ## Architecture
//!
//! `PhotoGrid` is transient (built each frame) and wraps the persistent
//! `&mut PhotoGridState` plus the photo slice as props. Rendering records
//! how many rows fit, which is what `last_visible_index` needs to drive the
//! load-more trigger after the frame is drawn.
//!
//! ```text
//! ╭──────────╮╭──────────╮╭──────────╮   ▲ scroll_row
//! │ title    ││ title    ││ title    │   │
//! │ by owner ││ by owner ││ by owner │   │ visible_rows
//! ╰──────────╯╰──────────╯╰──────────╯   ▼
//! ```

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Paragraph};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::core::photo::Photo;
use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

pub const GRID_COLUMNS: usize = 3;

/// Terminal rows per card: two borders and two text lines.
const CELL_HEIGHT: u16 = 4;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridEvent {
    /// Enter on the photo at this index.
    Open(usize),
    Moved,
}

/// Selection and scroll position. Persisted in `TuiState`.
#[derive(Debug, Default)]
pub struct PhotoGridState {
    pub selected: usize,
    /// First grid row on screen.
    pub scroll_row: usize,
    /// Rows that fit in the last rendered frame. Zero before the first frame.
    pub visible_rows: usize,
}

impl PhotoGridState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Back to the top, e.g. when a new query starts.
    pub fn reset(&mut self) {
        self.selected = 0;
        self.scroll_row = 0;
    }

    /// Index of the last photo on screen, if anything has been drawn.
    pub fn last_visible_index(&self, len: usize) -> Option<usize> {
        if len == 0 || self.visible_rows == 0 {
            return None;
        }
        let end = (self.scroll_row + self.visible_rows) * GRID_COLUMNS;
        Some(end.min(len) - 1)
    }

    fn clamp(&mut self, len: usize) {
        if len == 0 {
            self.reset();
        } else if self.selected >= len {
            self.selected = len - 1;
        }
    }

    fn scroll_to_selected(&mut self) {
        let row = self.selected / GRID_COLUMNS;
        if row < self.scroll_row {
            self.scroll_row = row;
        } else if self.visible_rows > 0 && row >= self.scroll_row + self.visible_rows {
            self.scroll_row = row + 1 - self.visible_rows;
        }
    }

    /// Moves the selection by a signed number of cells, clamped to the list.
    fn move_by(&mut self, delta: isize, len: usize) -> bool {
        if len == 0 {
            return false;
        }
        let target = (self.selected as isize + delta).clamp(0, len as isize - 1) as usize;
        if target == self.selected {
            return false;
        }
        self.selected = target;
        self.scroll_to_selected();
        true
    }
}

/// Cuts `text` to at most `width` display cells, ending in `…` if shortened.
pub fn truncate_to_width(text: &str, width: usize) -> String {
    if text.width() <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }
    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        // Keep one cell for the ellipsis.
        if used + w + 1 > width {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}

pub struct PhotoGrid<'a> {
    pub photos: &'a [Photo],
    pub state: &'a mut PhotoGridState,
}

impl<'a> PhotoGrid<'a> {
    pub fn new(photos: &'a [Photo], state: &'a mut PhotoGridState) -> Self {
        Self { photos, state }
    }

    fn render_cell(frame: &mut Frame, area: Rect, photo: &Photo, selected: bool) {
        let border_style = if selected {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default().add_modifier(Modifier::DIM)
        };
        let width = area.width.saturating_sub(2) as usize;
        let title = if photo.title.trim().is_empty() {
            "(untitled)"
        } else {
            photo.title.as_str()
        };

        let lines = vec![
            Line::from(Span::styled(
                truncate_to_width(title, width),
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                truncate_to_width(&format!("by {}", photo.owner), width),
                Style::default().fg(Color::Gray),
            )),
        ];

        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(border_style);
        frame.render_widget(Paragraph::new(lines).block(block), area);
    }
}

impl Component for PhotoGrid<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        self.state.visible_rows = (area.height / CELL_HEIGHT).max(1) as usize;
        self.state.clamp(self.photos.len());
        self.state.scroll_to_selected();

        let first = self.state.scroll_row * GRID_COLUMNS;
        let on_screen = self
            .photos
            .iter()
            .enumerate()
            .skip(first)
            .take(self.state.visible_rows * GRID_COLUMNS);

        let columns = Layout::horizontal([Constraint::Ratio(1, GRID_COLUMNS as u32); GRID_COLUMNS]);
        for (index, photo) in on_screen {
            let row = ((index - first) / GRID_COLUMNS) as u16;
            let y = area.y + row * CELL_HEIGHT;
            if y + CELL_HEIGHT > area.y + area.height {
                break;
            }
            let row_area = Rect::new(area.x, y, area.width, CELL_HEIGHT);
            let cells: [Rect; GRID_COLUMNS] = columns.areas(row_area);
            let cell = cells[index % GRID_COLUMNS];
            Self::render_cell(frame, cell, photo, index == self.state.selected);
        }
    }
}

impl EventHandler for PhotoGrid<'_> {
    type Event = GridEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        let len = self.photos.len();
        let cols = GRID_COLUMNS as isize;
        let page = (self.state.visible_rows.max(1) * GRID_COLUMNS) as isize;
        let moved = match event {
            TuiEvent::CursorLeft => self.state.move_by(-1, len),
            TuiEvent::CursorRight => self.state.move_by(1, len),
            TuiEvent::CursorUp | TuiEvent::ScrollUp => self.state.move_by(-cols, len),
            TuiEvent::CursorDown | TuiEvent::ScrollDown => self.state.move_by(cols, len),
            TuiEvent::PageUp => self.state.move_by(-page, len),
            TuiEvent::PageDown => self.state.move_by(page, len),
            TuiEvent::Home => self.state.move_by(-(len as isize), len),
            TuiEvent::End => self.state.move_by(len as isize, len),
            TuiEvent::Submit => {
                return (self.state.selected < len).then_some(GridEvent::Open(self.state.selected));
            }
            _ => false,
        };
        moved.then_some(GridEvent::Moved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{fake_photo, fake_photo_titled};
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn photos(n: usize) -> Vec<Photo> {
        (0..n).map(|i| fake_photo(&i.to_string())).collect()
    }

    #[test]
    fn test_last_visible_index_before_first_frame() {
        let state = PhotoGridState::new();
        assert_eq!(state.last_visible_index(30), None);
    }

    #[test]
    fn test_last_visible_index_partial_last_row() {
        let state = PhotoGridState {
            visible_rows: 4,
            ..Default::default()
        };
        // Four rows hold twelve, but only seven are loaded.
        assert_eq!(state.last_visible_index(7), Some(6));
        assert_eq!(state.last_visible_index(100), Some(11));
        assert_eq!(state.last_visible_index(0), None);
    }

    #[test]
    fn test_arrow_navigation_moves_by_row_and_column() {
        let items = photos(10);
        let mut state = PhotoGridState {
            visible_rows: 2,
            ..Default::default()
        };
        let mut grid = PhotoGrid::new(&items, &mut state);

        assert_eq!(grid.handle_event(&TuiEvent::CursorRight), Some(GridEvent::Moved));
        assert_eq!(grid.handle_event(&TuiEvent::CursorDown), Some(GridEvent::Moved));
        assert_eq!(grid.state.selected, 4);
        // Left edge stops at zero.
        grid.handle_event(&TuiEvent::Home);
        assert_eq!(grid.handle_event(&TuiEvent::CursorLeft), None);
    }

    #[test]
    fn test_navigation_scrolls_selection_into_view() {
        let items = photos(30);
        let mut state = PhotoGridState {
            visible_rows: 2,
            ..Default::default()
        };
        let mut grid = PhotoGrid::new(&items, &mut state);

        grid.handle_event(&TuiEvent::CursorDown);
        grid.handle_event(&TuiEvent::CursorDown);
        assert_eq!(grid.state.selected, 6);
        assert_eq!(grid.state.scroll_row, 1);

        grid.handle_event(&TuiEvent::End);
        assert_eq!(grid.state.selected, 29);
        assert_eq!(grid.state.scroll_row, 8);
        assert_eq!(grid.state.last_visible_index(items.len()), Some(29));
    }

    #[test]
    fn test_submit_opens_selected() {
        let items = photos(5);
        let mut state = PhotoGridState {
            selected: 2,
            visible_rows: 1,
            ..Default::default()
        };
        let mut grid = PhotoGrid::new(&items, &mut state);
        assert_eq!(grid.handle_event(&TuiEvent::Submit), Some(GridEvent::Open(2)));
    }

    #[test]
    fn test_submit_on_empty_grid_is_ignored() {
        let items: Vec<Photo> = Vec::new();
        let mut state = PhotoGridState::new();
        let mut grid = PhotoGrid::new(&items, &mut state);
        assert_eq!(grid.handle_event(&TuiEvent::Submit), None);
    }

    #[test]
    fn test_truncate_to_width() {
        assert_eq!(truncate_to_width("sunset", 10), "sunset");
        assert_eq!(truncate_to_width("sunset over", 6), "sunse…");
        // Wide glyphs count double.
        assert_eq!(truncate_to_width("日本語", 5), "日本…");
        assert_eq!(truncate_to_width("abc", 0), "");
    }

    #[test]
    fn test_render_records_visible_rows_and_titles() {
        let items = vec![fake_photo_titled("1", "Harbour at dawn"), fake_photo("2")];
        let mut state = PhotoGridState::new();
        let backend = TestBackend::new(90, 12);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| PhotoGrid::new(&items, &mut state).render(f, f.area()))
            .unwrap();

        assert_eq!(state.visible_rows, 3);
        let text = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect::<String>();
        assert!(text.contains("Harbour at dawn"));
    }
}
