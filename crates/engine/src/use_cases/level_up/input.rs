//! Input events consumed and signals produced by the wizard.

use std::str::FromStr;

/// One discrete user action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardInput {
    Up,
    Down,
    Left,
    Right,
    /// Confirm the highlighted choice
    Select,
    Back,
    /// Switch between tabs where a step has them
    Tab,
    /// Append a character to the active text query
    Char(char),
    Backspace,
    /// Terminal size changed; only affects presentation
    Resize { width: u16, height: u16 },
}

/// What the caller should do after an input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardSignal {
    /// Keep feeding input
    Continue,
    /// The character was updated (and a save attempted)
    Finished,
    /// The run ended without touching the character
    Abandoned,
}

impl WizardSignal {
    pub fn is_done(&self) -> bool {
        !matches!(self, Self::Continue)
    }
}

/// Parse a single command word, e.g. from a line-based driver.
///
/// `type <text>` is not a single input and is handled by the caller.
impl FromStr for WizardInput {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "up" | "k" => Ok(Self::Up),
            "down" | "j" => Ok(Self::Down),
            "left" | "h" => Ok(Self::Left),
            "right" | "l" => Ok(Self::Right),
            "select" | "enter" | "s" => Ok(Self::Select),
            "back" | "esc" | "b" => Ok(Self::Back),
            "tab" | "t" => Ok(Self::Tab),
            "backspace" | "bs" => Ok(Self::Backspace),
            other => Err(format!("Unknown command: {other}")),
        }
    }
}
