//! Echo bindings: stateless projections of raw input values to display
//! text. Re-evaluated on every input change by the presentation layer.

use crate::config::MAX_MESSAGE_LENGTH;

/// `"N/200"` counter for the message input.
pub fn char_count_label(message: &str) -> String {
    format!("{}/{}", message.chars().count(), MAX_MESSAGE_LENGTH)
}

/// `"80px"` label for the font-size slider.
pub fn font_size_label(font_size: u32) -> String {
    format!("{}px", font_size)
}
