//! Side effects the cheatsheet can trigger: copying a command and opening a
//! documentation link. Both go through small traits so the rest of the app
//! can be driven without touching the OS.

use thiserror::Error;
use url::Url;

use crate::catalog::CommandEntry;

/// Non-fatal failures of a copy or open request.
#[derive(Debug, Error)]
pub enum ActionError {
    #[error("cannot open documentation link {link:?}: {reason}")]
    MalformedLink { link: String, reason: String },
    #[error("clipboard rejected the write: {0}")]
    ClipboardDenied(String),
    #[error("failed to launch browser for {link}: {source}")]
    OpenFailed {
        link: String,
        #[source]
        source: std::io::Error,
    },
    #[error("no entry selected")]
    NoEntry,
}

pub trait Clipboard {
    fn write(&mut self, text: &str) -> Result<(), ActionError>;
}

pub trait Opener {
    fn open(&self, url: &str) -> Result<(), ActionError>;
}

/// System clipboard backed by arboard. The handle is created on first use
/// and kept alive so the copied text survives on X11.
#[derive(Default)]
pub struct SystemClipboard {
    inner: Option<arboard::Clipboard>,
}

impl SystemClipboard {
    pub fn new() -> Self {
        Self { inner: None }
    }
}

impl Clipboard for SystemClipboard {
    fn write(&mut self, text: &str) -> Result<(), ActionError> {
        if self.inner.is_none() {
            let clipboard = arboard::Clipboard::new()
                .map_err(|e| ActionError::ClipboardDenied(e.to_string()))?;
            self.inner = Some(clipboard);
        }
        let Some(clipboard) = self.inner.as_mut() else {
            return Err(ActionError::ClipboardDenied("clipboard unavailable".to_string()));
        };
        clipboard
            .set_text(text.to_string())
            .map_err(|e| ActionError::ClipboardDenied(e.to_string()))
    }
}

/// Opens links in the user's default browser.
#[derive(Debug, Default, Clone, Copy)]
pub struct BrowserOpener;

impl Opener for BrowserOpener {
    fn open(&self, url: &str) -> Result<(), ActionError> {
        let url = validate_link(url)?;
        webbrowser::open(url.as_str()).map_err(|source| ActionError::OpenFailed {
            link: url.to_string(),
            source,
        })
    }
}

/// Accept only absolute http(s) URLs.
pub fn validate_link(link: &str) -> Result<Url, ActionError> {
    let malformed = |reason: String| ActionError::MalformedLink {
        link: link.to_string(),
        reason,
    };
    let url = Url::parse(link.trim()).map_err(|e| malformed(e.to_string()))?;
    match url.scheme() {
        "http" | "https" if url.host().is_some() => Ok(url),
        "http" | "https" => Err(malformed("missing host".to_string())),
        other => Err(malformed(format!("unsupported scheme {other:?}"))),
    }
}

pub fn copy_command(entry: &CommandEntry, clipboard: &mut dyn Clipboard) -> Result<(), ActionError> {
    clipboard.write(&entry.command)?;
    tracing::info!(id = %entry.id, "copied command to clipboard");
    Ok(())
}

pub fn open_docs(entry: &CommandEntry, opener: &dyn Opener) -> Result<(), ActionError> {
    opener.open(&entry.documentation_link)?;
    tracing::info!(id = %entry.id, link = %entry.documentation_link, "opened documentation");
    Ok(())
}

#[cfg(test)]
pub(crate) mod testing {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;

    /// In-memory clipboard; clones share the same buffer.
    #[derive(Clone, Default)]
    pub struct MemoryClipboard {
        pub contents: Rc<RefCell<Option<String>>>,
        pub deny: bool,
    }

    impl Clipboard for MemoryClipboard {
        fn write(&mut self, text: &str) -> Result<(), ActionError> {
            if self.deny {
                return Err(ActionError::ClipboardDenied("denied by test".to_string()));
            }
            *self.contents.borrow_mut() = Some(text.to_string());
            Ok(())
        }
    }

    /// Records links instead of launching a browser. Validates like the
    /// real opener.
    #[derive(Clone, Default)]
    pub struct RecordingOpener {
        pub opened: Rc<RefCell<Vec<String>>>,
    }

    impl Opener for RecordingOpener {
        fn open(&self, url: &str) -> Result<(), ActionError> {
            let url = validate_link(url)?;
            self.opened.borrow_mut().push(url.to_string());
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::{MemoryClipboard, RecordingOpener};
    use super::*;
    use pretty_assertions::assert_eq;

    fn entry(link: &str) -> CommandEntry {
        CommandEntry::new("cr", "Drush", "Clear Cache", "drush cache:rebuild;", link)
    }

    #[test]
    fn test_validate_link_accepts_http() {
        let url = validate_link("https://www.drush.org/12.x/commands/cache_rebuild/").unwrap();
        assert_eq!(url.host_str(), Some("www.drush.org"));
        assert!(validate_link("http://localhost:8080/docs").is_ok());
    }

    #[test]
    fn test_validate_link_rejects_garbage() {
        for link in ["not a url", "", "/relative/path", "ftp://example.com/x", "mailto:a@b.c"] {
            let err = validate_link(link).unwrap_err();
            assert!(
                matches!(err, ActionError::MalformedLink { .. }),
                "{link:?} gave {err:?}"
            );
        }
    }

    #[test]
    fn test_copy_command_writes_command_text() {
        let mut clipboard = MemoryClipboard::default();
        copy_command(&entry("https://example.com"), &mut clipboard).unwrap();
        assert_eq!(
            clipboard.contents.borrow().as_deref(),
            Some("drush cache:rebuild;")
        );
    }

    #[test]
    fn test_copy_command_denied() {
        let mut clipboard = MemoryClipboard {
            deny: true,
            ..Default::default()
        };
        let err = copy_command(&entry("https://example.com"), &mut clipboard).unwrap_err();
        assert!(matches!(err, ActionError::ClipboardDenied(_)));
        assert!(clipboard.contents.borrow().is_none());
    }

    #[test]
    fn test_open_docs_records_link() {
        let opener = RecordingOpener::default();
        open_docs(&entry("https://www.drush.org/"), &opener).unwrap();
        assert_eq!(*opener.opened.borrow(), vec!["https://www.drush.org/".to_string()]);
    }

    #[test]
    fn test_open_docs_malformed() {
        let opener = RecordingOpener::default();
        let err = open_docs(&entry("not a url"), &opener).unwrap_err();
        assert!(matches!(err, ActionError::MalformedLink { ref link, .. } if link == "not a url"));
        assert!(opener.opened.borrow().is_empty());
    }

    #[test]
    fn test_error_messages() {
        let err = validate_link("not a url").unwrap_err();
        assert!(err.to_string().starts_with("cannot open documentation link \"not a url\""));
        assert_eq!(ActionError::NoEntry.to_string(), "no entry selected");
    }
}
