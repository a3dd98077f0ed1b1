//! Events flowing into the controller

use crate::error::FetchError;
use crate::suggestion::SuggestionSet;
use crate::timer::TimerToken;

use super::scheduler::CycleToken;

/// Keys the controller distinguishes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Escape,
    Enter,
    Tab,
    Backspace,
    Char(char),
    Other,
}

impl Key {
    /// Arrow keys and Escape drive navigation and never trigger a fetch
    pub fn is_navigation(&self) -> bool {
        matches!(
            self,
            Key::ArrowUp | Key::ArrowDown | Key::ArrowLeft | Key::ArrowRight | Key::Escape
        )
    }
}

/// Events produced by the host's widgets
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    /// Key released in the input; `value` is the input text after the key
    InputKeyUp { key: Key, value: String },
    InputKeyDown { key: Key },
    InputBlur,
    InputFocus,
    /// Key pressed while a dropdown row has focus
    DropdownKeyDown { key: Key },
    DropdownFocus,
}

/// Whether the host should suppress the key's default action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    Handled,
    Ignored,
}

/// Deferred work delivered back to the controller through its wakeup channel
#[derive(Debug)]
pub enum Wakeup {
    /// Typing paused for the debounce delay
    Debounce(TimerToken),
    /// The blur grace delay elapsed
    BlurGrace(TimerToken),
    /// A suggestion request finished
    Fetched {
        cycle: CycleToken,
        query: String,
        outcome: Result<SuggestionSet, FetchError>,
    },
}
