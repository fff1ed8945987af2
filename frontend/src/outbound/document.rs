//! In-memory page that view binders render into.
//!
//! Elements are addressed by id like DOM nodes. The document is printable,
//! which is how the CLI shows what a binder rendered.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::domain::element_ids;
use crate::domain::ports::{Page, PageError};
use crate::domain::{CenterCard, SelectOption};

/// State of one element.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Element {
    /// Text content, or the value of an input.
    pub text: String,
    /// Options of a selection control.
    pub options: Vec<SelectOption>,
    /// Cards appended to a container.
    pub cards: Vec<CenterCard>,
}

impl Element {
    fn is_empty(&self) -> bool {
        self.text.is_empty() && self.options.is_empty() && self.cards.is_empty()
    }
}

/// Page kept in memory.
///
/// # Examples
/// ```
/// use carlux_frontend::domain::ports::Page;
/// use carlux_frontend::outbound::document::MemoryDocument;
///
/// let page = MemoryDocument::with_elements(["nearest-owner-response"]);
/// page.set_text("nearest-owner-response", "{}").unwrap();
/// assert!(page.set_text("missing", "{}").is_err());
/// ```
#[derive(Debug, Default)]
pub struct MemoryDocument {
    elements: Mutex<BTreeMap<String, Element>>,
}

impl MemoryDocument {
    /// Page containing empty elements with the given ids.
    pub fn with_elements<'a>(ids: impl IntoIterator<Item = &'a str>) -> Self {
        let elements = ids
            .into_iter()
            .map(|id| (id.to_owned(), Element::default()))
            .collect();
        Self {
            elements: Mutex::new(elements),
        }
    }

    /// Page containing every element the view binders address.
    pub fn standard() -> Self {
        Self::with_elements(element_ids::ALL)
    }

    /// Type `value` into an input element, creating it when absent.
    pub fn set_input(&self, element_id: &str, value: impl Into<String>) {
        let mut elements = self.lock();
        let element = elements.entry(element_id.to_owned()).or_default();
        element.text = value.into();
    }

    /// Snapshot of one element.
    pub fn element(&self, element_id: &str) -> Option<Element> {
        self.lock().get(element_id).cloned()
    }

    fn lock(&self) -> MutexGuard<'_, BTreeMap<String, Element>> {
        self.elements.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn update<T>(
        &self,
        element_id: &str,
        apply: impl FnOnce(&mut Element) -> T,
    ) -> Result<T, PageError> {
        let mut elements = self.lock();
        let element = elements
            .get_mut(element_id)
            .ok_or_else(|| PageError::missing_element(element_id))?;
        Ok(apply(element))
    }
}

impl Page for MemoryDocument {
    fn contains(&self, element_id: &str) -> bool {
        self.lock().contains_key(element_id)
    }

    fn input_value(&self, element_id: &str) -> Result<String, PageError> {
        self.update(element_id, |element| element.text.clone())
    }

    fn set_text(&self, element_id: &str, text: &str) -> Result<(), PageError> {
        self.update(element_id, |element| text.clone_into(&mut element.text))
    }

    fn replace_options(&self, element_id: &str, options: &[SelectOption]) -> Result<(), PageError> {
        self.update(element_id, |element| element.options = options.to_vec())
    }

    fn append_card(&self, element_id: &str, card: &CenterCard) -> Result<(), PageError> {
        self.update(element_id, |element| element.cards.push(card.clone()))
    }
}

impl fmt::Display for MemoryDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (id, element) in self.lock().iter().filter(|(_, element)| !element.is_empty()) {
            writeln!(f, "#{id}")?;
            if !element.text.is_empty() {
                for line in element.text.lines() {
                    writeln!(f, "  {line}")?;
                }
            }
            for option in &element.options {
                writeln!(f, "  [{}] {}", option.value, option.label)?;
            }
            for card in &element.cards {
                writeln!(f, "  - {card}")?;
            }
        }
        Ok(())
    }
}
