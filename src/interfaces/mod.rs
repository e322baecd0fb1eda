pub mod bridge;
pub mod content;
pub mod shortcuts;
