use crate::domain::error::{AppError, Result};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Upper bound on characters sent for a single translation.
pub const MAX_SELECTION_CHARS: usize = 1500;

/// Gap between the bottom of the selection and the popup.
pub const DEFAULT_ANCHOR_OFFSET: f64 = 10.0;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Axis-aligned box in viewport coordinates.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.left
            && point.x <= self.right()
            && point.y >= self.top
            && point.y <= self.bottom()
    }
}

/// Viewport point the popup is positioned from.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Default)]
pub struct SelectionAnchor {
    pub x: f64,
    pub y: f64,
}

impl SelectionAnchor {
    /// Bottom-left of the selection box, pushed down by `offset`.
    pub fn below(bounds: Rect, offset: f64) -> Self {
        Self {
            x: bounds.left,
            y: bounds.bottom() + offset,
        }
    }
}

/// Trimmed selection text that is safe to send for translation.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Validate)]
pub struct SelectedText {
    #[validate(length(min = 1, max = 1500))]
    text: String,
}

impl SelectedText {
    pub fn new(raw: &str) -> Result<Self> {
        let selected = Self {
            text: raw.trim().to_string(),
        };

        if selected.validate().is_err() {
            let length = selected.char_count();
            if length == 0 {
                return Err(AppError::EmptySelection);
            }
            return Err(AppError::SelectionTooLong {
                length,
                max: MAX_SELECTION_CHARS,
            });
        }

        Ok(selected)
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }
}
