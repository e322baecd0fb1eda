pub mod page;
pub mod popup;
pub mod selection_tracker;
pub mod session;

pub use page::{ClickEvent, KeyEvent, ListenerKind, OverlayHandle, Page, PageSelection};
pub use popup::{place_popup, PopupController};
pub use selection_tracker::SelectionTracker;
pub use session::{ContentScript, ContentScriptOptions, CycleOutcome};
