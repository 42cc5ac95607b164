use ratatui_interact::components::{InputState, ListPickerState};
use ratatui_themes::{ThemeName, ThemePalette};

use crate::actions::{self, ActionError, BrowserOpener, Clipboard, Opener, SystemClipboard};
use crate::catalog::{Catalog, CommandEntry};
use crate::nav::{Navigator, View};
use crate::search::{self, SearchOptions};

/// Actions that the event loop should take after handling a key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    None,
    Quit,
    /// Exit and print the command of the open detail view.
    Accept,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Failure,
}

/// Transient message shown under the list until the next key press.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

/// Main application state.
pub struct App {
    pub catalog: Catalog,

    pub options: SearchOptions,

    /// Current color theme.
    pub theme_name: ThemeName,

    /// Input state for the search bar.
    pub filter_input: InputState,

    /// Whether keystrokes are currently editing the search query.
    pub filtering: bool,

    /// Selection and scroll over the filtered list.
    pub list_state: ListPickerState,

    pub nav: Navigator,

    pub notice: Option<Notice>,

    clipboard: Box<dyn Clipboard>,
    opener: Box<dyn Opener>,
}

impl App {
    pub fn new(catalog: Catalog, options: SearchOptions) -> Self {
        Self::with_collaborators(
            catalog,
            options,
            Box::new(SystemClipboard::new()),
            Box::new(BrowserOpener),
        )
    }

    pub fn with_collaborators(
        catalog: Catalog,
        options: SearchOptions,
        clipboard: Box<dyn Clipboard>,
        opener: Box<dyn Opener>,
    ) -> Self {
        let total = catalog.len();
        Self {
            catalog,
            options,
            theme_name: ThemeName::default(),
            filter_input: InputState::empty(),
            filtering: false,
            list_state: ListPickerState::new(total),
            nav: Navigator::new(),
            notice: None,
            clipboard,
            opener,
        }
    }

    /// Start with `query` already applied.
    pub fn with_query(mut self, query: &str) -> Self {
        self.filter_input.set_text(query.to_string());
        self.refresh_list();
        self
    }

    /// Get the current theme palette.
    pub fn palette(&self) -> ThemePalette {
        self.theme_name.palette()
    }

    pub fn next_theme(&mut self) {
        self.theme_name = self.theme_name.next();
    }

    pub fn prev_theme(&mut self) {
        self.theme_name = self.theme_name.prev();
    }

    /// Get the filter text.
    pub fn filter(&self) -> &str {
        self.filter_input.text()
    }

    /// Whether a non-blank query is narrowing the list.
    pub fn filter_active(&self) -> bool {
        !self.filter().trim().is_empty()
    }

    pub fn view(&self) -> View<'_> {
        self.nav.view()
    }

    /// Entries matching the current query, in catalog order.
    pub fn visible_entries(&self) -> Vec<&CommandEntry> {
        search::filter(self.catalog.get_all(), self.filter(), self.options)
    }

    pub fn selected_index(&self) -> usize {
        self.list_state.selected_index
    }

    pub fn list_scroll(&self) -> usize {
        self.list_state.scroll as usize
    }

    pub fn selected_entry(&self) -> Option<&CommandEntry> {
        self.visible_entries().get(self.selected_index()).copied()
    }

    /// Ensure the scroll offset keeps the selection visible.
    pub fn ensure_visible(&mut self, viewport_height: usize) {
        if viewport_height == 0 {
            return;
        }
        self.list_state.ensure_visible(viewport_height);
    }

    /// Re-sync list totals after the query changed; selection goes back to
    /// the first match.
    fn refresh_list(&mut self) {
        let total = self.visible_entries().len();
        self.list_state.set_total(total);
        self.list_state.select(0);
        tracing::debug!(query = self.filter(), matches = total, "query changed");
    }

    fn clear_filter(&mut self) {
        self.filtering = false;
        self.filter_input.clear();
        self.refresh_list();
    }

    /// The command to print when the user accepts the open detail view.
    pub fn accepted_command(&self) -> Option<&str> {
        self.nav.current().map(|entry| entry.command.as_str())
    }

    /// Open the selected list entry in the detail view.
    pub fn open_selected(&mut self) {
        if let Some(entry) = self.selected_entry().cloned() {
            self.nav.select(entry);
        }
    }

    pub fn back(&mut self) {
        self.nav.back();
    }

    /// Copy the command of the open detail, or of the selected list entry.
    pub fn copy_command(&mut self) {
        let result = if self.nav.is_detail() {
            self.nav.copy(&mut *self.clipboard)
        } else {
            match self.selected_entry().cloned() {
                Some(entry) => actions::copy_command(&entry, &mut *self.clipboard),
                None => Err(ActionError::NoEntry),
            }
        };
        self.report(result, "Copied command to clipboard");
    }

    /// Open the documentation link of the open detail, or of the selected
    /// list entry.
    pub fn open_docs(&mut self) {
        let result = if self.nav.is_detail() {
            self.nav.open_docs(&*self.opener)
        } else {
            match self.selected_entry().cloned() {
                Some(entry) => actions::open_docs(&entry, &*self.opener),
                None => Err(ActionError::NoEntry),
            }
        };
        self.report(result, "Opened documentation");
    }

    fn report(&mut self, result: Result<(), ActionError>, success: &str) {
        self.notice = Some(match result {
            Ok(()) => Notice {
                kind: NoticeKind::Success,
                message: success.to_string(),
            },
            Err(err) => {
                tracing::warn!(error = %err, "action failed");
                Notice {
                    kind: NoticeKind::Failure,
                    message: err.to_string(),
                }
            }
        });
    }

    /// Handle a mouse event and return the resulting Action.
    pub fn handle_mouse(&mut self, event: crossterm::event::MouseEvent) -> Action {
        use crossterm::event::MouseEventKind;

        if self.nav.is_detail() {
            return Action::None;
        }
        match event.kind {
            MouseEventKind::ScrollUp => {
                self.list_state.select_prev();
            }
            MouseEventKind::ScrollDown => {
                self.list_state.select_next();
            }
            _ => {}
        }
        Action::None
    }

    pub fn handle_key(&mut self, key: crossterm::event::KeyEvent) -> Action {
        self.notice = None;

        if self.nav.is_detail() {
            return self.handle_detail_key(key);
        }

        if self.filtering {
            return self.handle_filter_key(key);
        }

        self.handle_list_key(key)
    }

    fn handle_list_key(&mut self, key: crossterm::event::KeyEvent) -> Action {
        use crossterm::event::KeyCode;

        match key.code {
            KeyCode::Char('q') => Action::Quit,
            KeyCode::Char('/') => {
                self.filtering = true;
                Action::None
            }
            KeyCode::Char('T') | KeyCode::Char(']') => {
                self.next_theme();
                Action::None
            }
            KeyCode::Char('[') => {
                self.prev_theme();
                Action::None
            }
            KeyCode::Esc => {
                // Esc only clears an applied query
                if self.filter_active() {
                    self.clear_filter();
                }
                Action::None
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.list_state.select_prev();
                Action::None
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.list_state.select_next();
                Action::None
            }
            KeyCode::Enter | KeyCode::Right | KeyCode::Char('l') => {
                self.open_selected();
                Action::None
            }
            KeyCode::Char('y') => {
                self.copy_command();
                Action::None
            }
            KeyCode::Char('o') => {
                self.open_docs();
                Action::None
            }
            _ => Action::None,
        }
    }

    fn handle_filter_key(&mut self, key: crossterm::event::KeyEvent) -> Action {
        use crossterm::event::KeyCode;

        match key.code {
            KeyCode::Esc => {
                self.clear_filter();
                Action::None
            }
            KeyCode::Enter => {
                // Keep the query applied
                self.filtering = false;
                Action::None
            }
            KeyCode::Backspace => {
                self.filter_input.delete_char_backward();
                self.refresh_list();
                Action::None
            }
            KeyCode::Char(c) => {
                self.filter_input.insert_char(c);
                self.refresh_list();
                Action::None
            }
            KeyCode::Up => {
                self.list_state.select_prev();
                Action::None
            }
            KeyCode::Down => {
                self.list_state.select_next();
                Action::None
            }
            _ => Action::None,
        }
    }

    fn handle_detail_key(&mut self, key: crossterm::event::KeyEvent) -> Action {
        use crossterm::event::KeyCode;

        match key.code {
            KeyCode::Char('q') => Action::Quit,
            KeyCode::Esc | KeyCode::Backspace | KeyCode::Left | KeyCode::Char('h') => {
                self.back();
                Action::None
            }
            KeyCode::Char('y') => {
                self.copy_command();
                Action::None
            }
            KeyCode::Char('o') => {
                self.open_docs();
                Action::None
            }
            KeyCode::Char('p') => Action::Accept,
            _ => Action::None,
        }
    }

    /// Key hints for the help bar.
    pub fn current_help(&self) -> &'static str {
        if self.nav.is_detail() {
            "y: copy command  o: open docs  p: print & exit  Esc: back  q: quit"
        } else if self.filtering {
            "Enter: apply  Esc: clear  ↑↓: navigate"
        } else {
            "Enter: details  y: copy  o: docs  /: search  ↑↓: navigate  q: quit"
        }
    }
}
