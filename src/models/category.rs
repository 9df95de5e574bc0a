use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ScrapeError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Chiens,
    Moutons,
    PoulesLapinsPigeons,
    AutresAnimaux,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Chiens,
        Category::Moutons,
        Category::PoulesLapinsPigeons,
        Category::AutresAnimaux,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            Category::Chiens => "Chiens",
            Category::Moutons => "Moutons",
            Category::PoulesLapinsPigeons => "Poules/Lapins/Pigeons",
            Category::AutresAnimaux => "Autres animaux",
        }
    }

    /// Path segment under `/categorie/` on the marketplace.
    pub fn segment(&self) -> &'static str {
        match self {
            Category::Chiens => "chiens",
            Category::Moutons => "moutons",
            Category::PoulesLapinsPigeons => "poules-lapins-et-pigeons",
            Category::AutresAnimaux => "autres-animaux",
        }
    }

    pub fn from_display_name(name: &str) -> Result<Self, ScrapeError> {
        Self::ALL
            .into_iter()
            .find(|c| c.display_name() == name)
            .ok_or_else(|| ScrapeError::UnknownCategory(name.to_string()))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Accepts either the display name or the URL segment, ignoring case.
impl FromStr for Category {
    type Err = ScrapeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|c| c.display_name().to_lowercase() == wanted || c.segment() == wanted)
            .ok_or_else(|| ScrapeError::UnknownCategory(s.to_string()))
    }
}
