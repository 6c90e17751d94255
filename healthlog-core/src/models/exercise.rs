use serde::Serialize;

/// The day's exercise. Recording one always marks it completed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Exercise {
    #[serde(rename = "type")]
    pub kind: String,
    pub duration: String,
    pub completed: bool,
}

impl Exercise {
    pub fn recorded(kind: impl Into<String>, duration: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            duration: duration.into(),
            completed: true,
        }
    }

    /// `런닝 - 30분`, or `None` when no exercise type has been entered.
    pub fn summary(&self) -> Option<String> {
        if self.kind.is_empty() {
            None
        } else {
            Some(format!("{} - {}", self.kind, self.duration))
        }
    }
}
