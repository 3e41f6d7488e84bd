//! Contact form submit button.

/// Label shown while the form is being sent.
pub const SENDING_LABEL: &str = "Sending...";

/// Submit button state of the contact form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactForm {
    label: String,
    original_label: String,
    disabled: bool,
}

impl ContactForm {
    /// Creates an idle form whose button reads `label`.
    pub fn new(label: impl Into<String>) -> Self {
        let label = label.into();
        Self {
            original_label: label.clone(),
            label,
            disabled: false,
        }
    }

    /// Puts the button into its loading state.
    ///
    /// Returns false if the form was already sending.
    pub fn submit(&mut self) -> bool {
        if self.disabled {
            return false;
        }
        self.original_label = std::mem::replace(&mut self.label, SENDING_LABEL.to_string());
        self.disabled = true;
        true
    }

    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// The label the button carried before submission.
    #[must_use]
    pub fn original_label(&self) -> &str {
        &self.original_label
    }

    #[must_use]
    pub fn is_sending(&self) -> bool {
        self.disabled
    }
}

impl Default for ContactForm {
    fn default() -> Self {
        Self::new("Send Message")
    }
}
