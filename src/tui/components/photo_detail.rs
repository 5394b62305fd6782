//! # PhotoDetailPanel Component
//!
//! Shows the metadata of one photo. Stateless: rebuilt every frame from the
//! core's `DetailState`.

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Paragraph, Wrap};

use crate::core::photo::PhotoDetail;
use crate::core::photo_detail::DetailState;
use crate::tui::component::Component;

const LABEL_WIDTH: usize = 10;

pub struct PhotoDetailPanel<'a> {
    pub state: &'a DetailState,
    pub photo_id: Option<&'a str>,
}

impl<'a> PhotoDetailPanel<'a> {
    pub fn new(state: &'a DetailState, photo_id: Option<&'a str>) -> Self {
        Self { state, photo_id }
    }

    fn field(label: &str, value: &str) -> Line<'static> {
        Line::from(vec![
            Span::styled(
                format!("{:<width$}", label, width = LABEL_WIDTH),
                Style::default().fg(Color::Cyan),
            ),
            Span::raw(value.to_string()),
        ])
    }

    fn detail_lines(detail: &PhotoDetail, width: usize) -> Vec<Line<'static>> {
        let title = if detail.title.trim().is_empty() {
            "(untitled)"
        } else {
            detail.title.as_str()
        };
        let mut lines: Vec<Line<'static>> = textwrap::wrap(title, width.max(1))
            .into_iter()
            .map(|part| {
                Line::from(Span::styled(
                    part.into_owned(),
                    Style::default().add_modifier(Modifier::BOLD),
                ))
            })
            .collect();
        lines.push(Line::default());
        lines.push(Self::field("Owner", &detail.owner.username));
        lines.push(Self::field("Views", &detail.views));
        lines.push(Self::field("Comments", &detail.comment_count));
        lines.push(Self::field("Posted", &detail.dates.posted));
        lines.push(Self::field("Taken", &detail.dates.taken));
        lines.push(Line::default());
        lines.push(Self::field("URL", &detail.url));
        lines
    }
}

impl Component for PhotoDetailPanel<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let title = match self.photo_id {
            Some(id) => format!("Photo {id}"),
            None => "Photo".to_string(),
        };
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .title(title)
            .title_bottom(Line::from(" Esc back · Ctrl+R reload ").right_aligned());
        let inner_width = area.width.saturating_sub(2) as usize;

        let paragraph = match self.state {
            DetailState::Loading => {
                Paragraph::new("Loading photo...").alignment(Alignment::Center)
            }
            DetailState::Error(message) => Paragraph::new(vec![
                Line::from(Span::styled(message.clone(), Style::default().fg(Color::Red))),
                Line::default(),
                Line::from("Ctrl+R to retry"),
            ])
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
            DetailState::Success(detail) => {
                Paragraph::new(Self::detail_lines(detail, inner_width)).wrap(Wrap { trim: false })
            }
        };
        frame.render_widget(paragraph.block(block), area);
    }
}
