//! Lightbox state machine.
//!
//! Two states: `Closed` and `Open(image)`. Selecting an image opens the
//! lightbox on it; dismissal comes from an explicit close action, an
//! escape-key event, a click on the backdrop outside the image bounds, or
//! navigating away — a click on the image itself never dismisses.
//!
//! The page-level scroll lock and the escape-key listener are process-wide
//! singletons. They are modeled as one owned [`ViewportEffects`] resource
//! acquired on the `Closed → Open` transition and released on every path
//! back to `Closed`, never as flags scattered across call sites. The
//! invariant: acquisition count is always 0 or 1, across repeated
//! open/close cycles and re-selection while open.
//!
//! The generated site ships a small JS shim (`static/lightbox.js`) that
//! mirrors this transition table client-side.

use crate::model::Image;

/// The viewport side effects owned by the lightbox: page scroll suppression
/// and the escape-key listener. Implementations are the seam between the
/// state machine and whatever shell hosts it.
pub trait ViewportEffects {
    fn lock_scroll(&mut self);
    fn unlock_scroll(&mut self);
    fn register_keyboard(&mut self);
    fn deregister_keyboard(&mut self);
}

/// Effects sink for shells with no live viewport (the static renderer).
#[derive(Debug, Default)]
pub struct NoopEffects;

impl ViewportEffects for NoopEffects {
    fn lock_scroll(&mut self) {}
    fn unlock_scroll(&mut self) {}
    fn register_keyboard(&mut self) {}
    fn deregister_keyboard(&mut self) {}
}

/// What triggered a dismissal attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DismissTrigger {
    CloseButton,
    EscapeKey,
    /// Click outside the image bounds.
    BackdropClick,
    /// Click on the image itself — must not dismiss.
    ImageClick,
    /// Route change while the lightbox is open.
    Navigation,
}

/// The modal image viewer. At most one active image at a time.
#[derive(Debug)]
pub struct Lightbox<E: ViewportEffects> {
    active: Option<Image>,
    effects: E,
}

impl<E: ViewportEffects> Lightbox<E> {
    pub fn new(effects: E) -> Self {
        Self {
            active: None,
            effects,
        }
    }

    pub fn is_open(&self) -> bool {
        self.active.is_some()
    }

    pub fn active(&self) -> Option<&Image> {
        self.active.as_ref()
    }

    /// Open on an image. Re-selecting while already open swaps the active
    /// image without touching the viewport resource, keeping the 0-or-1
    /// acquisition invariant.
    pub fn select(&mut self, image: Image) {
        if self.active.is_none() {
            self.effects.lock_scroll();
            self.effects.register_keyboard();
        }
        self.active = Some(image);
    }

    /// Handle a dismissal trigger. Returns `true` when the lightbox closed.
    /// Closing from `Closed` is a no-op (no double release), and an image
    /// click never closes.
    pub fn dismiss(&mut self, trigger: DismissTrigger) -> bool {
        if trigger == DismissTrigger::ImageClick {
            return false;
        }
        if self.active.take().is_none() {
            return false;
        }
        self.effects.unlock_scroll();
        self.effects.deregister_keyboard();
        true
    }

    /// Access to the effects sink, mainly for shells that own it through
    /// the lightbox.
    pub fn effects(&self) -> &E {
        &self.effects
    }
}
