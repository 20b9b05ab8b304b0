//! tcgview - trading card catalog browser
//!
//! Fetches the first page of a card catalog once, lists the cards in a
//! terminal UI and shows a detail overlay for the selected card.
//!
//! ## Architecture
//!
//! - [`app::App`] owns the fetch state, the selection and the list cursor
//! - [`fetch`] runs the single fetch-on-mount request and reports back as an [`AppEvent`]
//! - [`view::render`] turns controller state into a [`view::ScreenView`]
//! - [`ui::draw`] draws that view with ratatui
//!
//! ## Usage
//!
//! ```bash
//! cargo run --features native -- --page-size 10
//! ```

pub mod app;
pub mod catalog;
pub mod config;
pub mod fetch;
pub mod theme;
pub mod types;
pub mod ui;
pub mod view;

// Re-export commonly used types
pub use app::{App, FetchState, Selection};
pub use catalog::{CatalogClient, FetchError, HttpCatalog};
pub use config::Config;
pub use types::{AppEvent, Card, CardImages};
