//! Stale-response coordination for in-flight fetches.
//!
//! Fetches are non-blocking, so a visitor can navigate away while a request
//! is still in flight. The rule: the last request dispatched for the
//! *current* view wins, and a response that settles after its view has been
//! superseded is discarded rather than applied — a fetch started for
//! category A must not overwrite state after the visitor moved to B.
//!
//! Cancellation is advisory. Each dispatch captures a [`RequestTag`] holding
//! the session epoch at that moment; the epoch advances on every navigation
//! (including re-navigation to the same view, which is a deliberate
//! re-fetch). Settling compares tags against the current epoch — no
//! cooperative runtime support required.

use crate::fetch::RemoteContent;
use tracing::debug;

/// Which visitor-facing view a fetch was dispatched for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    Portfolio,
    About,
    Featured,
}

/// Identifies the view a request belongs to: route plus, for the portfolio,
/// the selected category and page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewKey {
    pub route: Route,
    pub category: Option<String>,
    pub page: Option<usize>,
}

impl ViewKey {
    pub fn home() -> Self {
        Self {
            route: Route::Home,
            category: None,
            page: None,
        }
    }

    pub fn portfolio(category: &str, page: usize) -> Self {
        Self {
            route: Route::Portfolio,
            category: Some(category.to_string()),
            page: Some(page),
        }
    }

    pub fn about() -> Self {
        Self {
            route: Route::About,
            category: None,
            page: None,
        }
    }

    pub fn featured() -> Self {
        Self {
            route: Route::Featured,
            category: None,
            page: None,
        }
    }
}

/// Captured at dispatch time; compared against the session epoch at settle
/// time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestTag {
    epoch: u64,
}

/// Tracks the currently active view and the monotonically increasing epoch
/// used to recognize superseded requests.
#[derive(Debug)]
pub struct Session {
    key: ViewKey,
    epoch: u64,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self {
            key: ViewKey::home(),
            epoch: 0,
        }
    }

    pub fn current(&self) -> &ViewKey {
        &self.key
    }

    /// Record a navigation and return the tag for fetches dispatched on its
    /// behalf. Always advances the epoch — navigating back to the same view
    /// re-fetches and supersedes whatever was in flight.
    pub fn navigate(&mut self, key: ViewKey) -> RequestTag {
        self.key = key;
        self.epoch += 1;
        RequestTag { epoch: self.epoch }
    }

    /// Whether a tagged request is still the one the active view is waiting
    /// for.
    pub fn is_current(&self, tag: RequestTag) -> bool {
        tag.epoch == self.epoch
    }
}

/// Holder for one view's remote content; applies settles only when their
/// tag is still current.
#[derive(Debug)]
pub struct ViewSlot<T> {
    content: RemoteContent<T>,
}

impl<T> Default for ViewSlot<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> ViewSlot<T> {
    pub fn new() -> Self {
        Self {
            content: RemoteContent::Pending,
        }
    }

    /// Apply a settled fetch. Returns `false` (leaving the slot untouched)
    /// when the session has navigated since the request was dispatched.
    pub fn settle(
        &mut self,
        session: &Session,
        tag: RequestTag,
        remote: RemoteContent<T>,
    ) -> bool {
        if !session.is_current(tag) {
            debug!("discarding stale response for superseded view");
            return false;
        }
        self.content = remote;
        true
    }

    pub fn content(&self) -> &RemoteContent<T> {
        &self.content
    }

    /// Take the settled content for resolution, resetting the slot to
    /// `Pending` for the next navigation.
    pub fn take(&mut self) -> RemoteContent<T> {
        std::mem::replace(&mut self.content, RemoteContent::Pending)
    }
}
