use serde::{Deserialize, Serialize};

/// A single catalog entry, kept exactly as the server sent it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub id: String,
    pub name: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub card_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rarity: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub images: Option<CardImages>,
}

impl Card {
    /// Minimal card with only the required fields set.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            card_type: None,
            rarity: None,
            images: None,
        }
    }

    /// URI of the small image, if the server provided one.
    pub fn small_image(&self) -> Option<&str> {
        self.images
            .as_ref()
            .and_then(|i| i.small.as_deref())
            .filter(|uri| !uri.is_empty())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardImages {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub small: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub large: Option<String>,
}

/// Response envelope of the catalog endpoint.
///
/// `data` is optional on the wire: a body without it is accepted and
/// treated as an empty page by the catalog client.
#[derive(Debug, Clone, Deserialize)]
pub struct CardPage {
    pub data: Option<Vec<Card>>,
}

#[derive(Debug, Clone)]
pub enum AppEvent {
    CardsLoaded(Vec<Card>),
    FetchFailed(String),
    Quit,
}
