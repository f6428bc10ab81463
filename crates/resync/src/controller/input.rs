//! URL override input
//!
//! Pure state, no I/O. The effective URL is the override buffer while
//! overriding is enabled and the original URL otherwise.

/// Original URL plus an optional user-entered replacement
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverrideInput {
    original: String,
    buffer: String,
    enabled: bool,
}

impl OverrideInput {
    /// Start with overriding disabled and the buffer seeded from `original`
    pub fn new(original: impl Into<String>) -> Self {
        let original = original.into();
        Self {
            buffer: original.clone(),
            original,
            enabled: false,
        }
    }

    /// Switch the effective URL source. Edits in the buffer survive toggling.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Replace the buffer. Ignored by `effective_url` while disabled.
    pub fn set_value(&mut self, value: impl Into<String>) {
        self.buffer = value.into();
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn original(&self) -> &str {
        &self.original
    }

    /// Current buffer contents, whether or not it is in effect
    pub fn value(&self) -> &str {
        &self.buffer
    }

    pub fn effective_url(&self) -> &str {
        if self.enabled {
            &self.buffer
        } else {
            &self.original
        }
    }

    /// The URL to send as an override, `None` when not overriding
    pub fn override_url(&self) -> Option<&str> {
        self.enabled.then_some(self.buffer.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ORIGINAL: &str = "https://a.com/api/inngest";

    #[test]
    fn test_starts_on_original() {
        let input = OverrideInput::new(ORIGINAL);
        assert!(!input.is_enabled());
        assert_eq!(input.effective_url(), ORIGINAL);
        assert_eq!(input.value(), ORIGINAL);
        assert_eq!(input.override_url(), None);
    }

    #[test]
    fn test_edits_ignored_while_disabled() {
        let mut input = OverrideInput::new(ORIGINAL);
        input.set_value("https://b.com/x");
        assert_eq!(input.effective_url(), ORIGINAL);
        assert_eq!(input.value(), "https://b.com/x");
    }

    #[test]
    fn test_enable_uses_seeded_buffer() {
        let mut input = OverrideInput::new(ORIGINAL);
        input.set_enabled(true);
        assert_eq!(input.effective_url(), ORIGINAL);
        assert_eq!(input.override_url(), Some(ORIGINAL));
    }

    #[test]
    fn test_toggle_keeps_edits() {
        let mut input = OverrideInput::new(ORIGINAL);
        input.set_enabled(true);
        input.set_value("https://b.com/x");
        assert_eq!(input.effective_url(), "https://b.com/x");

        input.set_enabled(false);
        assert_eq!(input.effective_url(), ORIGINAL);
        assert_eq!(input.override_url(), None);

        input.set_enabled(true);
        assert_eq!(input.effective_url(), "https://b.com/x");
    }

    #[test]
    fn test_empty_override_is_forwarded() {
        let mut input = OverrideInput::new(ORIGINAL);
        input.set_enabled(true);
        input.set_value("");
        assert_eq!(input.override_url(), Some(""));
    }

    #[test]
    fn test_effective_url_tracks_toggle_over_any_sequence() {
        // Deterministic walk over toggle/edit operations
        let mut input = OverrideInput::new(ORIGINAL);
        let mut enabled = false;
        let mut buffer = ORIGINAL.to_string();
        for step in 0..64u32 {
            if step % 3 == 0 {
                enabled = step % 2 == 0;
                input.set_enabled(enabled);
            } else {
                buffer = format!("https://host-{}.example/api", step);
                input.set_value(buffer.clone());
            }
            let expected = if enabled { buffer.as_str() } else { ORIGINAL };
            assert_eq!(input.effective_url(), expected, "step {}", step);
        }
    }
}
