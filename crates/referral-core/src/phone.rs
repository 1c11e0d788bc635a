//! Phone number entry for the invite sheet.

/// Text field that only ever holds ASCII digits.
///
/// Non-digits are stripped as they are typed, so the submit check never has
/// to clean anything up.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PhoneField {
    digits: String,
}

impl PhoneField {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the field contents with the digits of `raw`.
    pub fn set(&mut self, raw: &str) {
        self.digits = digits_only(raw);
    }

    pub fn value(&self) -> &str {
        &self.digits
    }

    pub fn is_empty(&self) -> bool {
        self.digits.is_empty()
    }

    /// Submit is unavailable while the field is empty.
    pub fn can_submit(&self) -> bool {
        !self.is_empty()
    }

    pub fn clear(&mut self) {
        self.digits.clear();
    }
}

/// Keep only ASCII digits.
pub fn digits_only(raw: &str) -> String {
    raw.chars().filter(|c| c.is_ascii_digit()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_digits_are_stripped_on_input() {
        let mut field = PhoneField::new();
        field.set("+976 9911-22ab33");
        assert_eq!(field.value(), "97699112233");
    }

    #[test]
    fn test_empty_field_blocks_submit() {
        let mut field = PhoneField::new();
        assert!(!field.can_submit());
        field.set("abc");
        assert!(!field.can_submit());
        field.set("9");
        assert!(field.can_submit());
        field.clear();
        assert!(!field.can_submit());
    }

    #[test]
    fn test_unicode_digits_are_rejected() {
        assert_eq!(digits_only("٣٤5"), "5");
    }
}
