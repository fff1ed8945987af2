//! Contact links for the support line.

use std::fmt;

/// Support number dialled when none is configured.
pub const DEFAULT_SUPPORT_PHONE: &str = "201112218026";

/// Greeting pre-filled in WhatsApp chats.
const WHATSAPP_GREETING: &str = "Hello";

/// Error returned when a phone number contains anything but digits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidPhoneNumber(String);

impl fmt::Display for InvalidPhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "phone number '{}' must contain digits only", self.0)
    }
}

impl std::error::Error for InvalidPhoneNumber {}

/// International phone number without the leading `+`.
///
/// # Examples
/// ```
/// use carlux_frontend::domain::SupportPhone;
///
/// let phone = SupportPhone::new("+20 111 221 8026").unwrap();
/// assert_eq!(phone.whatsapp_url(), "https://wa.me/201112218026?text=Hello");
/// assert_eq!(phone.call_url(), "tel:201112218026");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SupportPhone(String);

impl SupportPhone {
    /// Normalise `raw` by dropping spaces, dashes and a leading `+`.
    pub fn new(raw: &str) -> Result<Self, InvalidPhoneNumber> {
        let digits: String = raw
            .trim()
            .trim_start_matches('+')
            .chars()
            .filter(|c| !matches!(c, ' ' | '-'))
            .collect();
        if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(InvalidPhoneNumber(raw.to_owned()));
        }
        Ok(Self(digits))
    }

    /// Chat link opening WhatsApp with a greeting.
    pub fn whatsapp_url(&self) -> String {
        format!("https://wa.me/{}?text={WHATSAPP_GREETING}", self.0)
    }

    /// Dialler link.
    pub fn call_url(&self) -> String {
        format!("tel:{}", self.0)
    }
}

impl Default for SupportPhone {
    fn default() -> Self {
        Self(DEFAULT_SUPPORT_PHONE.to_owned())
    }
}

impl AsRef<str> for SupportPhone {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn default_phone_builds_both_links() {
        let phone = SupportPhone::default();
        assert_eq!(phone.whatsapp_url(), "https://wa.me/201112218026?text=Hello");
        assert_eq!(phone.call_url(), "tel:201112218026");
    }

    #[rstest]
    #[case("")]
    #[case("+")]
    #[case("0100-abc")]
    fn rejects_non_numeric_input(#[case] raw: &str) {
        assert!(SupportPhone::new(raw).is_err());
    }
}
