use derive_more::{AsRef, Deref, Display, From, Into};
use serde::{Deserialize, Serialize};
use serde_with::DeserializeFromStr;
use strum::{Display as StrumDisplay, EnumIter, EnumString, IntoEnumIterator};

#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, Deref, From, Into, AsRef,
)]
#[serde(transparent)]
pub struct ToolId(String);

impl ToolId {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }
}

/// Assessment levels, innermost ring to outermost.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    DeserializeFromStr,
    EnumString,
    EnumIter,
    StrumDisplay,
)]
#[strum(ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    #[strum(serialize = "adopt", serialize = "0")]
    Adopt,
    #[strum(serialize = "trial", serialize = "1")]
    Trial,
    #[strum(serialize = "evaluate", serialize = "2")]
    Evaluate,
    #[strum(serialize = "aware", serialize = "3")]
    Aware,
}

impl Category {
    pub fn as_index(&self) -> usize {
        *self as usize
    }

    pub fn from_index(idx: usize) -> Option<Self> {
        Self::iter().nth(idx % 4)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Adopt => "Adopt",
            Self::Trial => "Trial",
            Self::Evaluate => "Evaluate",
            Self::Aware => "Aware",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Reviewer {
    pub name: String,
    /// Path to a photo on disk; empty or unloadable paths simply draw no photo.
    #[serde(default)]
    pub photo: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Tool {
    pub id: ToolId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub url: String,
    #[serde(default, deserialize_with = "lenient_category")]
    pub category: Option<Category>,
    #[serde(default)]
    pub team_position: Option<String>,
    #[serde(default)]
    pub ai_position: Option<String>,
    #[serde(default)]
    pub reviewer: Option<Reviewer>,
}

/// Unrecognized category strings become `None` so a single bad record cannot
/// sink the whole dataset; such tools are never placed.
fn lenient_category<'de, D>(de: D) -> Result<Option<Category>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(de)?;
    Ok(raw.and_then(|s| match s.parse::<Category>() {
        Ok(c) => Some(c),
        Err(_) => {
            log::warn!("Unrecognized category '{}'; tool will not be placed", s);
            None
        }
    }))
}
