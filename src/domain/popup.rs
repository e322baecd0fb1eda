use serde::{Deserialize, Serialize};

/// Reserved element id for the overlay in the host page.
pub const POPUP_ELEMENT_ID: &str = "translator-popup";

/// Distance kept from the viewport edge when the popup has to be moved.
pub const VIEWPORT_MARGIN: f64 = 20.0;

pub const LOADING_MESSAGE: &str = "Translating...";
pub const EMPTY_SELECTION_MESSAGE: &str = "No text selected";
pub const TOO_LONG_MESSAGE: &str =
    "Selected text is too long. Please select a shorter text.(Max 1500 words)";
pub const MISSING_API_KEY_MESSAGE: &str =
    "API Key not found. Please set it in the extension options.";
pub const TRANSLATION_FAILED_MESSAGE: &str = "Translation API failed, please try again";

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum PopupMode {
    Loading,
    #[default]
    Result,
    Error,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct PopupState {
    pub present: bool,
    pub content: String,
    pub mode: PopupMode,
}

/// CSS property and value.
pub type StyleDeclaration = (&'static str, String);

/// Presentational properties of the overlay. The loading variant swaps in its
/// own background and font style.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct OverlayStyle {
    pub background: String,
    pub loading_background: String,
    pub loading_font_style: String,
    pub border: String,
    pub color: String,
    pub padding: String,
    pub z_index: i32,
    pub box_shadow: String,
    pub border_radius_px: u32,
    pub max_width_px: u32,
    pub min_width_px: u32,
    pub line_height: f32,
    pub font_size_px: u32,
    pub font_family: String,
    pub transition: String,
    /// Vertical slide distance of the entry transition.
    pub enter_offset_px: u32,
}

impl Default for OverlayStyle {
    fn default() -> Self {
        Self {
            background: "#ffffff".to_string(),
            loading_background: "#f8f9fa".to_string(),
            loading_font_style: "italic".to_string(),
            border: "1px solid #e0e0e0".to_string(),
            color: "#333333".to_string(),
            padding: "12px 16px".to_string(),
            z_index: 999_999,
            box_shadow: "0 2px 10px rgba(0,0,0,0.1)".to_string(),
            border_radius_px: 8,
            max_width_px: 400,
            min_width_px: 200,
            line_height: 1.6,
            font_size_px: 14,
            font_family: "'Montserrat', sans-serif".to_string(),
            transition: "opacity 0.2s ease".to_string(),
            enter_offset_px: 10,
        }
    }
}

impl OverlayStyle {
    /// Full declaration set for a freshly created overlay, before it is
    /// revealed.
    pub fn declarations_for(&self, mode: PopupMode) -> Vec<StyleDeclaration> {
        let mut declarations = vec![
            ("position", "fixed".to_string()),
            ("border", self.border.clone()),
            ("color", self.color.clone()),
            ("padding", self.padding.clone()),
            ("z-index", self.z_index.to_string()),
            ("box-shadow", self.box_shadow.clone()),
            ("border-radius", format!("{}px", self.border_radius_px)),
            ("max-width", format!("{}px", self.max_width_px)),
            ("min-width", format!("{}px", self.min_width_px)),
            ("line-height", self.line_height.to_string()),
            ("font-size", format!("{}px", self.font_size_px)),
            ("font-family", self.font_family.clone()),
            ("white-space", "pre-line".to_string()),
            ("transition", self.transition.clone()),
            ("opacity", "0".to_string()),
            ("transform", format!("translateY({}px)", self.enter_offset_px)),
        ];
        declarations.extend(self.mode_declarations(mode));
        declarations
    }

    /// Declarations that differ between the loading and settled variants.
    pub fn mode_declarations(&self, mode: PopupMode) -> Vec<StyleDeclaration> {
        match mode {
            PopupMode::Loading => vec![
                ("background-color", self.loading_background.clone()),
                ("font-style", self.loading_font_style.clone()),
            ],
            PopupMode::Result | PopupMode::Error => vec![
                ("background-color", self.background.clone()),
                ("font-style", "normal".to_string()),
            ],
        }
    }
}
