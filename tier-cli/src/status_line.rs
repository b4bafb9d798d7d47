//! Key-hint line printed under each wizard step.

/// Typed command hint for the status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyHint {
    pub key: &'static str,
    pub action: &'static str,
    pub enabled: bool,
}

impl KeyHint {
    pub const fn new(
        key: &'static str,
        action: &'static str,
    ) -> Self {
        Self {
            key,
            action,
            enabled: true,
        }
    }

    /// The same hint, shown as disabled unless `enabled`.
    pub const fn enabled_if(
        self,
        enabled: bool,
    ) -> Self {
        Self { enabled, ..self }
    }
}

/// Joins hints into one line. Disabled hints keep their place but are
/// marked so the user can see what is missing.
pub fn build_status_line(hints: &[KeyHint]) -> String {
    hints
        .iter()
        .map(|h| {
            if h.enabled {
                format!("{}: {}", h.key, h.action)
            } else {
                format!("{}: {} (disabled)", h.key, h.action)
            }
        })
        .collect::<Vec<_>>()
        .join(" | ")
}

/// Hints shared by several steps.
pub mod hints {
    use super::KeyHint;

    pub const SELECT: KeyHint = KeyHint::new("<number>", "Select");
    pub const NEXT: KeyHint = KeyHint::new("n", "Continue");
    pub const FINISH: KeyHint = KeyHint::new("n", "Finish");
    pub const BACK: KeyHint = KeyHint::new("b", "Back");
    pub const CANCEL: KeyHint = KeyHint::new("q", "Cancel");
    pub const HELP: KeyHint = KeyHint::new("?", "Help");
}
