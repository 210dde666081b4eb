//! Popup visibility
//!
//! Derived from the two click counters the page sends with every update.
//! Any close click wins: once the close control has been clicked the popup
//! stays hidden, even if the open button is clicked again later.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ModalVisibility {
    Open,
    #[default]
    Closed,
}

impl ModalVisibility {
    /// Visibility for the given click counters
    pub fn from_clicks(open_clicks: u64, close_clicks: u64) -> Self {
        let mut visibility = ModalVisibility::Closed;
        if open_clicks > 0 {
            visibility = ModalVisibility::Open;
        }
        // checked second, so a nonzero close count always wins
        if close_clicks > 0 {
            visibility = ModalVisibility::Closed;
        }
        visibility
    }

    pub fn is_open(self) -> bool {
        self == ModalVisibility::Open
    }

    /// CSS `display` value for the modal container
    pub fn display(self) -> &'static str {
        match self {
            ModalVisibility::Open => "block",
            ModalVisibility::Closed => "none",
        }
    }
}
