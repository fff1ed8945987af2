//! Driven port for the rendered page.
//!
//! View binders only address elements by id and hand over structured
//! values; adapters decide how those become markup or terminal output.

use super::define_port_error;
use crate::domain::{CenterCard, SelectOption};

define_port_error! {
    /// Errors raised by page adapters.
    pub enum PageError {
        /// No element with the given id exists on the page.
        MissingElement {
            /// Id that was looked up.
            element_id: String,
        } => "element #{element_id} is missing from the page",
    }
}

/// Port for reading inputs from and rendering into page elements.
#[cfg_attr(test, mockall::automock)]
pub trait Page: Send + Sync {
    /// Whether an element with `element_id` exists.
    fn contains(&self, element_id: &str) -> bool;

    /// Current value of an input element.
    fn input_value(&self, element_id: &str) -> Result<String, PageError>;

    /// Replace the text content of an element.
    fn set_text(&self, element_id: &str, text: &str) -> Result<(), PageError>;

    /// Replace every option of a selection control.
    fn replace_options(&self, element_id: &str, options: &[SelectOption])
    -> Result<(), PageError>;

    /// Append a card to a container element.
    fn append_card(&self, element_id: &str, card: &CenterCard) -> Result<(), PageError>;
}
