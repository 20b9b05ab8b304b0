//! View description of the card screen.
//!
//! `render` is a pure function of the controller state. The terminal renderer
//! draws its output, and `--dump-view` serializes it as JSON.

use crate::app::{App, FetchState};
use crate::types::Card;
use serde::Serialize;

pub const LIST_TITLE: &str = "Pokémon Cards";
pub const NO_IMAGE: &str = "No image available";
pub const CLOSE_LABEL: &str = "Close";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScreenView {
    pub title: String,
    /// Fixed backdrop reference; never fetched by the card flow.
    pub background: String,
    pub body: Body,
    pub overlay: Option<OverlayView>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Body {
    /// Indeterminate progress; `frame` only drives the animation.
    Progress { frame: usize },
    Error { message: String },
    List { rows: Vec<RowView>, highlighted: usize },
}

/// One list row, keyed by card id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowView {
    pub key: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OverlayView {
    pub title: String,
    pub type_line: String,
    pub rarity_line: String,
    pub image: ImageView,
    pub close_label: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum ImageView {
    Uri(String),
    Placeholder(String),
}

pub fn render(app: &App, background: &str) -> ScreenView {
    let body = match app.state() {
        FetchState::Loading => Body::Progress {
            frame: app.spinner_frame(),
        },
        FetchState::Error(msg) => Body::Error {
            message: format!("Error: {msg}"),
        },
        FetchState::Ready(cards) => Body::List {
            rows: cards.iter().map(row).collect(),
            highlighted: app.cursor(),
        },
    };

    ScreenView {
        title: LIST_TITLE.to_string(),
        background: background.to_string(),
        body,
        overlay: app.selection().open_card().map(overlay),
    }
}

fn row(card: &Card) -> RowView {
    RowView {
        key: card.id.clone(),
        label: card.name.clone(),
    }
}

fn overlay(card: &Card) -> OverlayView {
    let image = match card.small_image() {
        Some(uri) => ImageView::Uri(uri.to_string()),
        None => ImageView::Placeholder(NO_IMAGE.to_string()),
    };
    OverlayView {
        title: card.name.clone(),
        type_line: format!("Type: {}", card.card_type.as_deref().unwrap_or_default()),
        rarity_line: format!("Rarity: {}", card.rarity.as_deref().unwrap_or_default()),
        image,
        close_label: CLOSE_LABEL.to_string(),
    }
}
