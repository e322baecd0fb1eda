use super::page::{ListenerKind, OverlayHandle, Page};
use crate::domain::popup::{
    OverlayStyle, PopupMode, PopupState, LOADING_MESSAGE, POPUP_ELEMENT_ID, VIEWPORT_MARGIN,
};
use crate::domain::selection::{Point, Rect, SelectionAnchor, Size};

/// Top-left corner for a popup of `size` anchored at `anchor`.
///
/// Overflowing popups are moved left of the right edge or flipped above the
/// anchor, then clamped into the viewport.
pub fn place_popup(anchor: SelectionAnchor, size: Size, viewport: Size) -> Point {
    let mut x = anchor.x;
    let mut y = anchor.y;

    if x + size.width > viewport.width {
        x = viewport.width - size.width - VIEWPORT_MARGIN;
    }
    if y + size.height > viewport.height {
        y = y - size.height - VIEWPORT_MARGIN;
    }

    Point::new(
        clamp_axis(x, size.width, viewport.width),
        clamp_axis(y, size.height, viewport.height),
    )
}

fn clamp_axis(value: f64, extent: f64, limit: f64) -> f64 {
    let max = (limit - extent).max(0.0);
    value.min(max).max(0.0)
}

/// Owner of the single overlay element.
#[derive(Debug)]
pub struct PopupController {
    style: OverlayStyle,
    overlay: Option<OverlayHandle>,
    bounds: Option<Rect>,
    state: PopupState,
}

impl Default for PopupController {
    fn default() -> Self {
        Self::new(OverlayStyle::default())
    }
}

impl PopupController {
    pub fn new(style: OverlayStyle) -> Self {
        Self {
            style,
            overlay: None,
            bounds: None,
            state: PopupState::default(),
        }
    }

    pub fn state(&self) -> &PopupState {
        &self.state
    }

    pub fn is_present(&self) -> bool {
        self.overlay.is_some()
    }

    /// Creates the overlay on first use, otherwise updates it in place.
    pub fn show(
        &mut self,
        page: &mut dyn Page,
        text: &str,
        anchor: SelectionAnchor,
        mode: PopupMode,
    ) {
        let (overlay, created) = match self.overlay {
            Some(overlay) => (overlay, false),
            None => {
                let declarations = self.style.declarations_for(mode);
                let overlay = page.create_overlay(POPUP_ELEMENT_ID, &declarations);
                page.add_listener(ListenerKind::Click);
                self.overlay = Some(overlay);
                (overlay, true)
            }
        };

        page.set_overlay_text(overlay, text);
        page.set_overlay_mode(overlay, mode, &self.style.mode_declarations(mode));

        let size = page.measure_overlay(overlay);
        let position = place_popup(anchor, size, page.viewport());
        page.move_overlay(overlay, position);

        if created {
            page.reveal_overlay(overlay);
        }

        self.bounds = Some(Rect::new(position.x, position.y, size.width, size.height));
        self.state = PopupState {
            present: true,
            content: text.to_string(),
            mode,
        };
    }

    pub fn show_loading(&mut self, page: &mut dyn Page, anchor: SelectionAnchor) {
        self.show(page, LOADING_MESSAGE, anchor, PopupMode::Loading);
    }

    /// Dismisses the popup when the click lands outside it.
    pub fn handle_click(&mut self, page: &mut dyn Page, position: Point) -> bool {
        match self.bounds {
            Some(bounds) if self.overlay.is_some() && !bounds.contains(position) => {
                self.remove(page);
                true
            }
            _ => false,
        }
    }

    pub fn remove(&mut self, page: &mut dyn Page) {
        if let Some(overlay) = self.overlay.take() {
            page.remove_overlay(overlay);
            page.remove_listener(ListenerKind::Click);
        }
        self.bounds = None;
        self.state = PopupState::default();
    }
}
