//! Keystroke and paste filtering for numeric text fields.

use idp_forms_core::NumericPastePolicy;

use crate::events::KeyPress;

/// Keys that never insert text and are always allowed in a numeric field.
const NAVIGATION_KEYS: &[&str] = &[
    "Backspace",
    "Delete",
    "Tab",
    "Escape",
    "Enter",
    "Home",
    "End",
    "ArrowLeft",
    "ArrowRight",
    "ArrowUp",
    "ArrowDown",
];

/// Letters allowed together with Control or Meta (select all, copy, paste, cut, undo).
const CLIPBOARD_SHORTCUTS: &[&str] = &["a", "c", "v", "x", "z"];

/// Returns `true` if the key press may reach a numeric input.
pub fn is_allowed_numeric_key(key: &KeyPress) -> bool {
    if NAVIGATION_KEYS.contains(&key.key.as_str()) {
        return true;
    }
    if key.ctrl || key.meta {
        return CLIPBOARD_SHORTCUTS.contains(&key.key.to_ascii_lowercase().as_str());
    }
    let mut chars = key.key.chars();
    matches!((chars.next(), chars.next()), (Some(c), None) if c.is_ascii_digit())
}

/// Applies the paste policy to text pasted into a numeric input.
///
/// Returns the text to insert, or `None` if the paste is discarded.
pub fn filter_numeric_paste(text: &str, policy: NumericPastePolicy) -> Option<String> {
    match policy {
        NumericPastePolicy::Discard => text
            .chars()
            .all(|c| c.is_ascii_digit())
            .then(|| text.to_string()),
        NumericPastePolicy::Strip => {
            let digits: String = text.chars().filter(char::is_ascii_digit).collect();
            (!digits.is_empty()).then_some(digits)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digits_allowed() {
        for d in '0'..='9' {
            assert!(is_allowed_numeric_key(&KeyPress::new(d.to_string())));
        }
    }

    #[test]
    fn test_letters_and_symbols_rejected() {
        for key in ["a", "e", "-", "+", ".", " ", "Dead"] {
            assert!(!is_allowed_numeric_key(&KeyPress::new(key)), "{key}");
        }
    }

    #[test]
    fn test_navigation_allowed() {
        for key in ["Backspace", "ArrowLeft", "Tab", "Enter", "End"] {
            assert!(is_allowed_numeric_key(&KeyPress::new(key)), "{key}");
        }
    }

    #[test]
    fn test_clipboard_shortcuts() {
        assert!(is_allowed_numeric_key(&KeyPress::new("v").with_ctrl()));
        assert!(is_allowed_numeric_key(&KeyPress::new("C").with_meta()));
        assert!(!is_allowed_numeric_key(&KeyPress::new("b").with_ctrl()));
    }

    #[test]
    fn test_paste_discard_policy() {
        assert_eq!(
            filter_numeric_paste("1234", NumericPastePolicy::Discard),
            Some("1234".to_string())
        );
        assert_eq!(filter_numeric_paste("12a4", NumericPastePolicy::Discard), None);
    }

    #[test]
    fn test_paste_strip_policy() {
        assert_eq!(
            filter_numeric_paste("+94 77-123", NumericPastePolicy::Strip),
            Some("9477123".to_string())
        );
        assert_eq!(filter_numeric_paste("abc", NumericPastePolicy::Strip), None);
    }
}
