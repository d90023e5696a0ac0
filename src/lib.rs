//! # smth
//!
//! A terminal client for the mobile edition of the newsmth forum.
//!
//! ## Architecture
//!
//! Every keypress runs one pass of a small pipeline:
//!
//! ```text
//! Navigation → Fetcher → Extract → Layout → View → TUI
//! ```
//!
//! - [`nav`]: history stack, bookmark cycling, pagination and link cursor
//! - [`fetcher`]: HTTP client with an in-memory cookie store
//! - [`extract`]: pattern-based extraction of section, board and article pages
//! - [`layout`]: reflows article text into screen-sized chunks
//! - [`view`]: turns a page into rows and link positions
//! - [`tui`]: paints the rows with ratatui
//!
//! ## Quick Start
//!
//! ```bash
//! # Browse anonymously
//! smth
//!
//! # Log in first
//! smth <username> <password>
//! ```

/// Application context and error handling.
///
/// The [`AppContext`](app::AppContext) struct wires together the
/// configuration and the fetcher and hands out navigation controllers.
pub mod app;

/// Command-line interface using clap.
///
/// Takes an optional `username password` pair and nothing else.
pub mod cli;

/// Configuration management.
///
/// Loads from `~/.config/smth/config.toml`, supporting:
/// - Site base URL and bookmark roots
/// - Width rule for text layout
/// - Custom colors (named or hex)
/// - Custom keybindings
pub mod config;

/// Core domain models.
///
/// - [`SectionPage`](domain::SectionPage), [`BoardPage`](domain::BoardPage),
///   [`ArticlePage`](domain::ArticlePage): extracted page models
/// - [`LinkPositionState`](domain::LinkPositionState): link cursor
pub mod domain;

/// Page extraction keyed to the forum's markup.
pub mod extract;

/// HTTP fetching.
///
/// - [`Fetcher`](fetcher::Fetcher): Async trait for page transport
/// - [`HttpFetcher`](fetcher::http_fetcher::HttpFetcher): reqwest-based implementation
pub mod fetcher;

/// Text reflow and line classification.
pub mod layout;

/// Tag stripping and entity decoding.
pub mod markup;

/// Navigation state machine.
pub mod nav;

/// Terminal user interface.
///
/// One page pane above a status bar. Up/Down move between links, Right
/// follows one, Left goes back, Tab cycles bookmarks, q quits.
pub mod tui;

/// Screen production from page models.
pub mod view;
