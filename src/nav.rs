//! Two-level navigation between the catalog list and an entry's detail view.

use crate::actions::{self, ActionError, Clipboard, Opener};
use crate::catalog::CommandEntry;

/// What the user is currently looking at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View<'a> {
    List,
    Detail(&'a CommandEntry),
}

/// View stack. Empty means the list is showing; each frame is one open
/// detail view. List state (query, selection, scroll) lives with the caller
/// and is untouched by navigation.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Navigator {
    stack: Vec<CommandEntry>,
}

impl Navigator {
    pub fn new() -> Self {
        Self { stack: Vec::new() }
    }

    pub fn view(&self) -> View<'_> {
        match self.stack.last() {
            Some(entry) => View::Detail(entry),
            None => View::List,
        }
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    pub fn is_detail(&self) -> bool {
        !self.stack.is_empty()
    }

    /// The entry whose detail is showing, if any.
    pub fn current(&self) -> Option<&CommandEntry> {
        self.stack.last()
    }

    /// Open `entry` in the detail view. Refused while a detail is already
    /// showing.
    pub fn select(&mut self, entry: CommandEntry) -> bool {
        if self.is_detail() {
            tracing::debug!(id = %entry.id, "ignoring select while detail is open");
            return false;
        }
        tracing::debug!(id = %entry.id, "open detail");
        self.stack.push(entry);
        true
    }

    /// Return to the list. No-op on the list itself.
    pub fn back(&mut self) -> bool {
        match self.stack.pop() {
            Some(entry) => {
                tracing::debug!(id = %entry.id, "close detail");
                true
            }
            None => false,
        }
    }

    pub fn copy(&self, clipboard: &mut dyn Clipboard) -> Result<(), ActionError> {
        let entry = self.current().ok_or(ActionError::NoEntry)?;
        actions::copy_command(entry, clipboard)
    }

    pub fn open_docs(&self, opener: &dyn Opener) -> Result<(), ActionError> {
        let entry = self.current().ok_or(ActionError::NoEntry)?;
        actions::open_docs(entry, opener)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::testing::{MemoryClipboard, RecordingOpener};
    use crate::catalog::Catalog;
    use pretty_assertions::assert_eq;

    fn clear_cache() -> CommandEntry {
        Catalog::builtin().get("drush-cache-rebuild").cloned().unwrap()
    }

    #[test]
    fn test_starts_on_list() {
        let nav = Navigator::new();
        assert_eq!(nav.view(), View::List);
        assert_eq!(nav.depth(), 0);
        assert!(nav.current().is_none());
    }

    #[test]
    fn test_select_then_back_round_trip() {
        let mut nav = Navigator::new();
        let entry = clear_cache();
        assert!(nav.select(entry.clone()));
        assert_eq!(nav.view(), View::Detail(&entry));
        assert_eq!(nav.depth(), 1);
        assert!(nav.back());
        assert_eq!(nav, Navigator::new());
    }

    #[test]
    fn test_back_on_list_is_noop() {
        let mut nav = Navigator::new();
        assert!(!nav.back());
        assert_eq!(nav.view(), View::List);
    }

    #[test]
    fn test_select_refused_in_detail() {
        let catalog = Catalog::builtin();
        let mut nav = Navigator::new();
        nav.select(catalog.get_all()[0].clone());
        assert!(!nav.select(catalog.get_all()[1].clone()));
        assert_eq!(nav.depth(), 1);
        assert_eq!(nav.current(), Some(&catalog.get_all()[0]));
    }

    #[test]
    fn test_copy_in_detail() {
        let mut nav = Navigator::new();
        nav.select(clear_cache());
        let mut clipboard = MemoryClipboard::default();
        nav.copy(&mut clipboard).unwrap();
        assert_eq!(
            clipboard.contents.borrow().as_deref(),
            Some("drush cache:rebuild;")
        );
        assert!(nav.is_detail());
    }

    #[test]
    fn test_copy_denied_keeps_state() {
        let mut nav = Navigator::new();
        nav.select(clear_cache());
        let before = nav.clone();
        let mut clipboard = MemoryClipboard {
            deny: true,
            ..Default::default()
        };
        let err = nav.copy(&mut clipboard).unwrap_err();
        assert!(matches!(err, ActionError::ClipboardDenied(_)));
        assert_eq!(nav, before);
    }

    #[test]
    fn test_open_docs_in_detail() {
        let mut nav = Navigator::new();
        nav.select(clear_cache());
        let opener = RecordingOpener::default();
        nav.open_docs(&opener).unwrap();
        assert_eq!(
            *opener.opened.borrow(),
            vec!["https://www.drush.org/12.x/commands/cache_rebuild/".to_string()]
        );
    }

    #[test]
    fn test_malformed_link_keeps_detail() {
        let entry = CommandEntry::new("bad", "Drush", "Bad link", "drush st", "not a url");
        let mut nav = Navigator::new();
        nav.select(entry.clone());
        let opener = RecordingOpener::default();
        let err = nav.open_docs(&opener).unwrap_err();
        assert!(matches!(err, ActionError::MalformedLink { .. }));
        assert_eq!(nav.view(), View::Detail(&entry));
        assert_eq!(nav.depth(), 1);
        assert!(opener.opened.borrow().is_empty());
    }

    #[test]
    fn test_actions_on_list_report_no_entry() {
        let nav = Navigator::new();
        let mut clipboard = MemoryClipboard::default();
        assert!(matches!(nav.copy(&mut clipboard), Err(ActionError::NoEntry)));
        assert!(matches!(
            nav.open_docs(&RecordingOpener::default()),
            Err(ActionError::NoEntry)
        ));
    }
}
