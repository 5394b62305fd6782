use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Paragraph, Wrap};

use crate::core::photo_list::ListState;
use crate::core::state::App;
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::{PhotoDetailPanel, PhotoGrid, TitleBar};

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState) {
    use Constraint::{Length, Min};
    let layout = Layout::vertical([Length(1), Length(3), Min(0)]);
    let [title_area, search_area, main_area] = layout.areas(frame.area());

    TitleBar::new(app.photos.query().label(), app.status_message.clone())
        .render(frame, title_area);

    tui.search_box.render(frame, search_area);

    if let Some(detail) = &app.detail {
        PhotoDetailPanel::new(detail.state(), detail.photo_id()).render(frame, main_area);
        return;
    }

    match app.photos.state() {
        ListState::Loading => draw_centered(frame, main_area, "Loading..."),
        ListState::Error(message) => draw_error_view(frame, main_area, message),
        ListState::Success {
            photos,
            is_loading_more,
            ..
        } => {
            if photos.is_empty() {
                draw_centered(frame, main_area, "No photos found");
                return;
            }
            let [grid_area, footer_area] =
                Layout::vertical([Min(0), Length(1)]).areas(main_area);
            PhotoGrid::new(photos, &mut tui.grid).render(frame, grid_area);
            if *is_loading_more {
                let footer = Paragraph::new("Loading more...")
                    .alignment(Alignment::Center)
                    .style(Style::default().add_modifier(Modifier::DIM));
                frame.render_widget(footer, footer_area);
            }
        }
    }
}

fn draw_centered(frame: &mut Frame, area: Rect, text: &str) {
    let [_, middle, _] = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(1),
        Constraint::Fill(1),
    ])
    .areas(area);
    frame.render_widget(Paragraph::new(text).alignment(Alignment::Center), middle);
}

fn draw_error_view(frame: &mut Frame, area: Rect, error_msg: &str) {
    let error_paragraph = Paragraph::new(format!("{error_msg}\n\nCtrl+R to retry"))
        .block(Block::bordered().title("ERROR"))
        .style(Style::default().fg(Color::Red))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });

    frame.render_widget(error_paragraph, area);
}
