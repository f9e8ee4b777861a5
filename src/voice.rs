//! The closed set of synthesis voices offered by the panel.

use serde::{Deserialize, Serialize};

/// Voice used by the synthesis step. The wire value is the capitalised name.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, clap::ValueEnum,
)]
pub enum Voice {
    #[default]
    Bella,
    Clara,
    Rachel,
    Adam,
    Josh,
}

impl Voice {
    /// Every voice, in the order the panel lists them.
    pub const ALL: [Voice; 5] = [
        Voice::Bella,
        Voice::Clara,
        Voice::Rachel,
        Voice::Adam,
        Voice::Josh,
    ];

    /// Identifier sent to the backend.
    pub fn id(self) -> &'static str {
        match self {
            Voice::Bella => "Bella",
            Voice::Clara => "Clara",
            Voice::Rachel => "Rachel",
            Voice::Adam => "Adam",
            Voice::Josh => "Josh",
        }
    }

    /// Human-readable label for selection widgets.
    pub fn label(self) -> &'static str {
        match self {
            Voice::Bella => "Bella (Female - Friendly)",
            Voice::Clara => "Clara (Female - Corporate)",
            Voice::Rachel => "Rachel (Female - Clear)",
            Voice::Adam => "Adam (Male - Calm)",
            Voice::Josh => "Josh (Male - Dynamic)",
        }
    }
}

impl std::fmt::Display for Voice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}

impl std::str::FromStr for Voice {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Voice::ALL
            .into_iter()
            .find(|v| v.id().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                anyhow::anyhow!(
                    "Invalid voice '{}'. Valid values: bella, clara, rachel, adam, josh",
                    s
                )
            })
    }
}
