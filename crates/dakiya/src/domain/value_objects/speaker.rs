//! Speaker - Who said a transcript line

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Speaker {
    /// The delivery agent on the phone
    Caller,
    /// The automated assistant
    Assistant,
}

impl std::fmt::Display for Speaker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Speaker::Caller => write!(f, "caller"),
            Speaker::Assistant => write!(f, "assistant"),
        }
    }
}
