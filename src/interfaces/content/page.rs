//! Host page abstraction.
//!
//! Everything the controller needs from the browser (selection, viewport,
//! listener registry, the overlay element) goes through [`Page`]. A wasm
//! content script implements it over the DOM; tests use an in-memory fake.

use crate::domain::popup::{PopupMode, StyleDeclaration};
use crate::domain::selection::{Point, Rect, Size};

/// Owned reference to the overlay element created by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OverlayHandle(pub u64);

/// Document-level listeners the controller installs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListenerKind {
    PointerUp,
    KeyDown,
    Click,
}

/// Live text selection as reported by the host.
#[derive(Debug, Clone, PartialEq)]
pub struct PageSelection {
    pub text: String,
    /// Bounding box of the first range, viewport-relative.
    pub bounds: Rect,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct KeyEvent {
    pub key: Option<char>,
    pub ctrl: bool,
    pub shift: bool,
    pub alt: bool,
    pub meta: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ClickEvent {
    pub position: Point,
}

pub trait Page: Send {
    fn selection(&self) -> Option<PageSelection>;
    fn viewport(&self) -> Size;

    /// Registering a kind that is already registered must be a no-op.
    fn add_listener(&mut self, kind: ListenerKind);
    fn remove_listener(&mut self, kind: ListenerKind);

    /// Creates the hidden overlay with its initial declarations.
    fn create_overlay(&mut self, element_id: &str, style: &[StyleDeclaration]) -> OverlayHandle;
    fn set_overlay_text(&mut self, overlay: OverlayHandle, text: &str);
    /// Switches variant; `style` holds only the declarations that change.
    fn set_overlay_mode(
        &mut self,
        overlay: OverlayHandle,
        mode: PopupMode,
        style: &[StyleDeclaration],
    );
    /// Rendered size after the latest content change.
    fn measure_overlay(&self, overlay: OverlayHandle) -> Size;
    fn move_overlay(&mut self, overlay: OverlayHandle, position: Point);
    /// Starts the fade/slide-in transition.
    fn reveal_overlay(&mut self, overlay: OverlayHandle);
    fn remove_overlay(&mut self, overlay: OverlayHandle);
}
