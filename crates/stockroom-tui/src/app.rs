//! Top-level application state and the main event loop.
//!
//! [`App::run`] sets up the terminal, drives the crossterm event loop, and
//! tears everything down cleanly on exit or panic. [`App::handle`] and
//! [`draw`] are public so tests can drive the app without a terminal.

use crate::{
    commands::{execute_command, Command},
    event::{self, AppEvent},
    theme::Theme,
    widgets::{
        command_bar::{CommandBar, CommandBarState},
        gallery::{GalleryState, ImagePane, ThumbnailList, ThumbnailListState},
        help::HelpPopup,
        record_detail::{DetailView, RecordDetail},
        result_list::{contains, ResultListState, ResultView},
        search_box::{SearchBox, SearchBoxState},
        status_line::StatusLine,
        tab_bar::TabBar,
    },
};
use crossterm::{
    event::{self as ct_event, DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction as LayoutDir, Layout, Rect},
    Frame, Terminal,
};
use std::{io, time::Duration};
use stockroom_core::{config::Config, Dataset, ImageSwapper, Record};

// ---------------------------------------------------------------------------
// Focus + tab types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Search,
    Results,
    Thumbnails,
    /// Vim-style `:` command line is active.
    Command,
}

/// A dataset with its search box and rendered results.
#[derive(Debug)]
pub struct DatasetTab {
    pub dataset: Dataset,
    pub search: SearchBoxState,
    pub results: ResultListState,
}

impl DatasetTab {
    pub fn new(dataset: Dataset) -> Self {
        let results = ResultListState::new(dataset.result_list());
        Self {
            dataset,
            search: SearchBoxState::default(),
            results,
        }
    }

    /// Re-run the search for the current box text.
    pub fn refresh(&mut self) -> stockroom_core::Result<()> {
        self.dataset
            .search(&self.search.query, &mut self.results.list)?;
        self.results.clamp_cursor();
        Ok(())
    }
}

pub enum TabKind {
    Dataset(DatasetTab),
    Gallery(GalleryState),
}

pub struct TabState {
    pub label: String,
    pub kind: TabKind,
}

// ---------------------------------------------------------------------------
// AppState
// ---------------------------------------------------------------------------

pub struct AppState {
    pub tabs: Vec<TabState>,
    pub active_tab: usize,
    pub focus: Focus,
    /// Focus state before entering command mode, restored on exit.
    pub prev_focus: Focus,
    pub theme: Theme,
    pub config: Config,
    pub show_help: bool,
    pub command_bar: CommandBarState,
    /// Last navigation target.
    pub location: Option<String>,
    /// Detail popup for `location`, while open.
    pub detail: Option<DetailView>,
    /// Last error, shown in the status line until the next success.
    pub error: Option<String>,
    pub quit: bool,
}

impl AppState {
    /// Assign the page location and open the record detail popup.
    pub fn navigate(&mut self, location: String, record: Option<Record>) {
        tracing::info!(%location, "navigate");
        self.detail = Some(DetailView {
            location: location.clone(),
            record,
        });
        self.location = Some(location);
        self.error = None;
    }

    /// Re-run the search on the active tab, if it is a dataset.
    pub fn refresh_active(&mut self) {
        let TabKind::Dataset(tab) = &mut self.tabs[self.active_tab].kind else {
            return;
        };
        match tab.refresh() {
            Ok(()) => self.error = None,
            Err(err) => {
                tracing::warn!(dataset = %tab.dataset.name, error = %err, "search failed");
                self.error = Some(err.to_string());
            }
        }
    }

    /// Navigate to the target of the result row under the cursor.
    pub fn open_selected(&mut self) {
        let TabKind::Dataset(tab) = &self.tabs[self.active_tab].kind else {
            return;
        };
        let Some(row) = tab.results.selected() else {
            return;
        };
        let location = row.target.clone();
        let record = tab.dataset.find(&row.id).cloned();
        self.navigate(location, record);
    }

    /// Show the thumbnail under the cursor in the image pane.
    pub fn pick_thumbnail(&mut self) {
        if let TabKind::Gallery(gallery) = &mut self.tabs[self.active_tab].kind {
            gallery.pick_selected();
        }
    }

    pub fn switch_tab(&mut self, idx: usize) {
        if idx >= self.tabs.len() {
            return;
        }
        tracing::debug!(from = self.active_tab, to = idx, "switch tab");
        self.active_tab = idx;
        self.focus = default_focus(&self.tabs[idx].kind);
        self.detail = None;
    }

    fn active(&self) -> &TabState {
        &self.tabs[self.active_tab]
    }
}

fn default_focus(kind: &TabKind) -> Focus {
    match kind {
        TabKind::Dataset(_) => Focus::Results,
        TabKind::Gallery(_) => Focus::Thumbnails,
    }
}

// ---------------------------------------------------------------------------
// App
// ---------------------------------------------------------------------------

pub struct App {
    state: AppState,
}

impl App {
    /// One tab per dataset, followed by the gallery tab.
    pub fn new(datasets: Vec<Dataset>, config: Config, theme: Theme) -> Self {
        let mut tabs: Vec<TabState> = datasets
            .into_iter()
            .map(|dataset| TabState {
                label: dataset.name.clone(),
                kind: TabKind::Dataset(DatasetTab::new(dataset)),
            })
            .collect();

        tabs.push(TabState {
            label: "gallery".to_string(),
            kind: TabKind::Gallery(GalleryState {
                thumbnails: ThumbnailListState::new(config.gallery.images.clone()),
                swapper: ImageSwapper::new(&config.gallery),
            }),
        });

        let focus = default_focus(&tabs[0].kind);
        let mut state = AppState {
            tabs,
            active_tab: 0,
            focus,
            prev_focus: focus,
            theme,
            config,
            show_help: false,
            command_bar: CommandBarState::default(),
            location: None,
            detail: None,
            error: None,
            quit: false,
        };

        // Populate every list with its empty-query rows.
        for idx in 0..state.tabs.len() {
            state.active_tab = idx;
            state.refresh_active();
        }
        state.active_tab = 0;

        App { state }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Set up the terminal, run the event loop, and restore the terminal on exit.
    pub fn run(mut self) -> anyhow::Result<()> {
        install_panic_hook();

        enable_raw_mode()?;
        execute!(io::stdout(), EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(io::stdout());
        let mut terminal = Terminal::new(backend)?;

        let result = self.event_loop(&mut terminal);

        // Always restore terminal, even if the loop returned an error
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), DisableMouseCapture, LeaveAlternateScreen);
        let _ = terminal.show_cursor();

        result
    }

    fn event_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> anyhow::Result<()> {
        loop {
            {
                let s = &self.state;
                terminal.draw(|frame| draw(frame, s))?;
            }

            if self.state.quit {
                break;
            }

            if ct_event::poll(Duration::from_millis(16))? {
                let raw = ct_event::read()?;
                if let Event::Key(key) = &raw {
                    if key.kind != crossterm::event::KeyEventKind::Press {
                        continue;
                    }
                }
                let app_event = if is_insert_mode(self.state.focus) {
                    event::to_app_event_insert(raw)
                } else {
                    event::to_app_event(raw)
                };
                if let Some(ev) = app_event {
                    tracing::debug!(focus = ?self.state.focus, event = ?ev, "event");
                    self.handle(ev);
                }
            }
        }
        Ok(())
    }

    pub fn handle(&mut self, event: AppEvent) {
        let s = &mut self.state;

        // Help popup intercepts all events; only close keys pass through.
        if s.show_help {
            match event {
                AppEvent::Char('?') | AppEvent::Escape => s.show_help = false,
                AppEvent::Quit => s.quit = true,
                _ => {}
            }
            return;
        }

        // Command mode intercepts all events.
        if s.focus == Focus::Command {
            match event {
                AppEvent::Escape => {
                    s.command_bar.clear();
                    s.focus = s.prev_focus;
                }
                AppEvent::Enter => match Command::parse(&s.command_bar.input) {
                    Ok(cmd) => {
                        tracing::debug!(command = ?cmd, "executing command");
                        s.command_bar.clear();
                        s.focus = s.prev_focus;
                        execute_command(s, cmd);
                    }
                    Err(msg) if msg.is_empty() => {
                        s.command_bar.clear();
                        s.focus = s.prev_focus;
                    }
                    Err(msg) => s.command_bar.error = Some(msg),
                },
                AppEvent::Quit => s.quit = true,
                other => s.command_bar.handle(&other),
            }
            return;
        }

        // Detail popup: any dismiss key closes it.
        if s.detail.is_some() {
            match event {
                AppEvent::Escape | AppEvent::Enter | AppEvent::Char('q') => s.detail = None,
                AppEvent::Quit => s.quit = true,
                _ => {}
            }
            return;
        }

        match event {
            AppEvent::Char('?') if s.focus != Focus::Search => s.show_help = true,

            AppEvent::Char(':') if s.focus != Focus::Search => {
                s.prev_focus = s.focus;
                s.command_bar.clear();
                s.focus = Focus::Command;
            }

            AppEvent::Quit => s.quit = true,

            AppEvent::Escape => {
                if s.focus == Focus::Search {
                    s.focus = Focus::Results;
                }
            }

            AppEvent::FocusNext => {
                s.focus = match s.focus {
                    Focus::Search => Focus::Results,
                    Focus::Results => Focus::Search,
                    other => other,
                };
            }

            AppEvent::SearchFocus => {
                if matches!(s.active().kind, TabKind::Dataset(_)) {
                    s.focus = Focus::Search;
                }
            }

            AppEvent::NextTab => s.switch_tab((s.active_tab + 1) % s.tabs.len()),
            AppEvent::PrevTab => {
                s.switch_tab((s.active_tab + s.tabs.len() - 1) % s.tabs.len())
            }

            AppEvent::Click { column, row } => click(s, column, row),

            AppEvent::Enter => match s.focus {
                Focus::Search => s.focus = Focus::Results,
                Focus::Results => s.open_selected(),
                Focus::Thumbnails => s.pick_thumbnail(),
                Focus::Command => {}
            },

            // Terminal resize is handled automatically by ratatui
            AppEvent::Resize(_, _) => {}

            other => dispatch_to_focused(s, other),
        }
    }
}

/// Returns true when a text input is focused.
fn is_insert_mode(focus: Focus) -> bool {
    matches!(focus, Focus::Search | Focus::Command)
}

/// Route an event to the widget that owns the current focus.
fn dispatch_to_focused(s: &mut AppState, event: AppEvent) {
    let focus = s.focus;
    match &mut s.tabs[s.active_tab].kind {
        TabKind::Dataset(tab) => match focus {
            Focus::Search => {
                if tab.search.handle(&event) {
                    s.refresh_active();
                }
            }
            Focus::Results => tab.results.handle(&event),
            _ => {}
        },
        TabKind::Gallery(gallery) => gallery.thumbnails.handle(&event),
    }
}

/// Hit-test a left click against the widgets drawn last frame.
fn click(s: &mut AppState, column: u16, row: u16) {
    match &mut s.tabs[s.active_tab].kind {
        TabKind::Dataset(tab) => {
            if contains(tab.search.last_area.get(), column, row) {
                s.focus = Focus::Search;
            } else if let Some(idx) = tab.results.row_at(column, row) {
                tab.results.cursor = idx;
                s.focus = Focus::Results;
                s.open_selected();
            }
        }
        TabKind::Gallery(gallery) => {
            if let Some(idx) = gallery.thumbnails.index_at(column, row) {
                gallery.thumbnails.cursor = idx;
                s.focus = Focus::Thumbnails;
                s.pick_thumbnail();
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

pub fn draw(frame: &mut Frame, state: &AppState) {
    let area = frame.area();

    // Vertical: 1-line tab bar | body | 1-line status
    let vert = Layout::default()
        .direction(LayoutDir::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Fill(1),
            Constraint::Length(1),
        ])
        .split(area);

    let theme = &state.theme;
    frame.render_widget(TabBar::new(&state.tabs, state.active_tab, theme), vert[0]);

    let mut search_cursor = None;
    match &state.active().kind {
        TabKind::Dataset(tab) => {
            let body = Layout::default()
                .direction(LayoutDir::Vertical)
                .constraints([Constraint::Length(3), Constraint::Fill(1)])
                .split(vert[1]);

            let search_focused = state.focus == Focus::Search;
            let search = SearchBox::new(&tab.search, &state.config.search.input, search_focused, theme);
            if search_focused {
                search_cursor = Some(search.cursor_position(body[0]));
            }
            frame.render_widget(search, body[0]);
            frame.render_widget(
                ResultView::new(
                    &tab.results,
                    &tab.search.query,
                    state.focus == Focus::Results,
                    state.config.ui.bold_ids,
                    theme,
                ),
                body[1],
            );
        }
        TabKind::Gallery(gallery) => {
            let pct = state.config.ui.gallery_pane_width_pct;
            let body = Layout::default()
                .direction(LayoutDir::Horizontal)
                .constraints([Constraint::Percentage(pct), Constraint::Fill(1)])
                .split(vert[1]);

            frame.render_widget(
                ThumbnailList::new(
                    &gallery.thumbnails,
                    gallery.swapper.current_source(),
                    state.focus == Focus::Thumbnails,
                    theme,
                ),
                body[0],
            );
            frame.render_widget(ImagePane::new(&gallery.swapper, theme), body[1]);
        }
    }

    frame.render_widget(
        StatusLine::new(state.location.as_deref(), state.error.as_deref(), theme),
        vert[2],
    );

    if let Some(detail) = &state.detail {
        frame.render_widget(RecordDetail::new(detail, theme), vert[1]);
    }

    if state.show_help {
        frame.render_widget(HelpPopup::new(theme), area);
    }

    // Command bar overlays the bottom row of the screen
    if state.focus == Focus::Command {
        let cmd_area = Rect { y: area.bottom().saturating_sub(1), height: 1, ..area };
        frame.render_widget(CommandBar::new(&state.command_bar, theme), cmd_area);
        frame.set_cursor_position((state.command_bar.cursor_col(cmd_area), cmd_area.y));
        return;
    }

    if let Some(pos) = search_cursor {
        frame.set_cursor_position(pos);
    }
}

// ---------------------------------------------------------------------------
// Terminal helpers
// ---------------------------------------------------------------------------

fn install_panic_hook() {
    let original = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), DisableMouseCapture, LeaveAlternateScreen);
        original(info);
    }));
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
