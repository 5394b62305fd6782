//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! and translates keyboard events into core::Action values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Event Loop
//!
//! Each iteration draws (when something changed), feeds the grid's last
//! visible index into the load-more trigger, handles terminal events, then
//! drains actions sent back by background fetches. Fetches run on tokio
//! tasks and report through a std `mpsc` channel, so the loop never awaits.
//!
//! ## Keys
//!
//! | Context        | Key              | Effect                          |
//! |----------------|------------------|---------------------------------|
//! | anywhere       | Ctrl+C           | quit                            |
//! | grid           | arrows, PgUp/Dn  | move selection                  |
//! | grid           | Enter            | open photo detail               |
//! | grid           | Ctrl+R           | reload current query            |
//! | grid           | any character    | start typing a search           |
//! | search box     | Enter            | search (blank = recent feed)    |
//! | search box     | Esc              | back to grid                    |
//! | detail         | Esc, Backspace   | back to grid                    |
//! | detail         | Ctrl+R           | reload photo                    |

mod component;
mod components;
mod event;
mod ui;

use log::{debug, info, warn};
use std::io::stdout;
use std::sync::{Arc, mpsc};
use std::time::Duration;

use crossterm::cursor::SetCursorStyle;
use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
    KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::execute;

use crate::core::action::{Action, Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::photo_list::{LoadMoreTrigger, fetch_page};
use crate::core::repository::PhotoRepository;
use crate::core::state::App;
use crate::tui::component::EventHandler;
use crate::tui::components::{GridEvent, PhotoGrid, PhotoGridState, SearchBox, SearchEvent};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

const IDLE_POLL: Duration = Duration::from_millis(250);

/// Modal input mode: determines how keyboard events are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Navigate the grid. Typing auto-switches to Input.
    Cursor,
    /// Text editing in the search box. Esc switches to Cursor.
    Input,
}

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    pub search_box: SearchBox,
    pub grid: PhotoGridState,
    pub input_mode: InputMode,
    pub load_more_trigger: LoadMoreTrigger,
}

impl TuiState {
    pub fn new(initial_search: &str) -> Self {
        Self {
            search_box: SearchBox::new(initial_search),
            grid: PhotoGridState::new(),
            input_mode: InputMode::Cursor,
            load_more_trigger: LoadMoreTrigger::new(),
        }
    }

    /// A new query session starts at the top of the grid.
    fn restart(&mut self) {
        self.grid.reset();
        self.load_more_trigger.reset();
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(
            stdout(),
            EnableMouseCapture,
            EnableBracketedPaste,
            SetCursorStyle::SteadyBlock,
            PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                    | KeyboardEnhancementFlags::REPORT_EVENT_TYPES
            )
        )?;
        info!("Terminal modes enabled (mouse, bracketed paste, keyboard enhancement)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(
            stdout(),
            PopKeyboardEnhancementFlags,
            DisableMouseCapture,
            DisableBracketedPaste,
            SetCursorStyle::DefaultUserShape
        );
    }
}

pub fn run(repository: Arc<dyn PhotoRepository>, config: ResolvedConfig) -> std::io::Result<()> {
    let mut app = App::new(repository);
    let mut tui = TuiState::new(&config.initial_search);

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    // Channel for actions from background tasks
    let (tx, rx) = mpsc::channel();

    dispatch(&mut app, Action::Search(config.initial_search.clone()), &tx);
    let mut needs_redraw = true;

    loop {
        tui.search_box.focused = tui.input_mode == InputMode::Input && !app.is_detail_open();

        if needs_redraw {
            terminal.draw(|f| ui::draw_ui(f, &app, &mut tui))?;
            needs_redraw = false;
        }

        // The grid only knows what is on screen after a draw.
        if !app.is_detail_open() {
            let last_visible = tui.grid.last_visible_index(app.photos.len());
            if tui
                .load_more_trigger
                .update(app.photos.should_load_more(last_visible))
            {
                debug!("Near end of grid (last visible {:?}), loading more", last_visible);
                dispatch(&mut app, Action::LoadMore, &tx);
                needs_redraw = true;
            }
        }

        let first_event = poll_event_timeout(IDLE_POLL);
        if first_event.is_some() {
            needs_redraw = true;
        }

        let mut should_quit = false;
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            if let Some(action) = handle_event(&event, &app, &mut tui) {
                should_quit |= dispatch(&mut app, action, &tx);
            }
        }

        if should_quit {
            break;
        }

        // Handle results from background fetches
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", action);
            dispatch(&mut app, action, &tx);
        }
    }

    ratatui::restore();
    info!("Omada shutting down");
    Ok(())
}

/// Translates one terminal event into at most one core action, updating
/// presentation state on the way.
fn handle_event(event: &TuiEvent, app: &App, tui: &mut TuiState) -> Option<Action> {
    match event {
        TuiEvent::Resize => return None,
        TuiEvent::ForceQuit => return Some(Action::Quit),
        _ => {}
    }

    // Detail screen swallows everything else
    if let Some(detail) = &app.detail {
        return match event {
            TuiEvent::Escape | TuiEvent::Backspace => Some(Action::CloseDetail),
            TuiEvent::Reload => detail
                .photo_id()
                .map(|id| Action::OpenDetail(id.to_string())),
            _ => None,
        };
    }

    if matches!(event, TuiEvent::Reload) {
        tui.restart();
        return Some(Action::Reload);
    }

    match tui.input_mode {
        InputMode::Input => {
            if matches!(event, TuiEvent::Escape) {
                tui.input_mode = InputMode::Cursor;
                return None;
            }
            match tui.search_box.handle_event(event)? {
                SearchEvent::Submit(text) => {
                    debug!("Search submitted: {:?}", tui.search_box.text());
                    tui.input_mode = InputMode::Cursor;
                    tui.restart();
                    Some(Action::Search(text))
                }
                SearchEvent::ContentChanged => None,
            }
        }
        InputMode::Cursor => match event {
            // Typing auto-switches to Input mode and forwards the event
            TuiEvent::InputChar(_) | TuiEvent::Paste(_) => {
                tui.input_mode = InputMode::Input;
                tui.search_box.handle_event(event);
                None
            }
            _ => {
                let photos = app.photos.photos();
                match PhotoGrid::new(photos, &mut tui.grid).handle_event(event)? {
                    GridEvent::Open(index) => {
                        photos.get(index).map(|p| Action::OpenDetail(p.id.clone()))
                    }
                    GridEvent::Moved => None,
                }
            }
        },
    }
}

/// Runs `update` and starts whatever I/O it asks for. Returns true on quit.
fn dispatch(app: &mut App, action: Action, tx: &mpsc::Sender<Action>) -> bool {
    match update(app, action) {
        Effect::None => false,
        Effect::Quit => true,
        effect => {
            spawn_effect(effect, app.repository.clone(), tx.clone());
            false
        }
    }
}

fn spawn_effect(effect: Effect, repository: Arc<dyn PhotoRepository>, tx: mpsc::Sender<Action>) {
    tokio::spawn(async move {
        let action = match effect {
            Effect::FetchPage(request) => {
                info!(
                    "Fetching page {} of {:?} (append={})",
                    request.page, request.query, request.append
                );
                let result = fetch_page(repository.as_ref(), &request).await;
                Action::PageLoaded { request, result }
            }
            Effect::FetchDetail(request) => {
                info!("Fetching detail for photo {}", request.photo_id);
                let result = repository.fetch_detail(&request.photo_id).await;
                Action::DetailLoaded { request, result }
            }
            Effect::None | Effect::Quit => return,
        };
        if tx.send(action).is_err() {
            warn!("Failed to deliver fetch result: receiver dropped");
        }
    });
}
