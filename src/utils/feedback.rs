/// Feedback categories for texts sent back to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedbackType {
    Success,
    Warning,
    Train,
    Station,
    Search,
    Home,
    Work,
}

impl FeedbackType {
    pub fn emoji(&self) -> &'static str {
        match self {
            FeedbackType::Success => "✅",
            FeedbackType::Warning => "⚠️",
            FeedbackType::Train => "🚆",
            FeedbackType::Station => "🚉",
            FeedbackType::Search => "🔍",
            FeedbackType::Home => "🏠",
            FeedbackType::Work => "🏢",
        }
    }

    /// Message text led by this type's emoji.
    pub fn message(&self, text: &str) -> String {
        format!("{} {}", self.emoji(), text)
    }

    /// Button label trailed by this type's emoji.
    pub fn label(&self, text: &str) -> String {
        format!("{} {}", text, self.emoji())
    }
}
