//! # Atlas Architecture
//!
//! Atlas is a **UI-agnostic country explorer library**. It fetches country
//! records from a REST source, filters them, keeps a local simulated session
//! with per-user favorites, and remembers a light/dark preference. The `atlas`
//! binary is one client of it; nothing here assumes a terminal.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  UI (the atlas binary, or anything else)                    │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Fetches remote data, caches the country list             │
//! │  - Turns fetch failures into user-facing messages           │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - Validation and messages, returns CmdResult               │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌──────────────────────────────┐ ┌────────────────────────────┐
//! │  session.rs, theme.rs        │ │  filter.rs, remote/, geo.rs│
//! │  over store/ (KeyValueStore) │ │  pure logic and HTTP       │
//! └──────────────────────────────┘ └────────────────────────────┘
//! ```
//!
//! ## Concurrency
//!
//! Stores are single-threaded (`Rc`, `RefCell`) and mutate through `&mut self`,
//! so two favorite toggles can never interleave. Remote calls are async on
//! tokio; a newer detail or boundary request supersedes an older one so a stale
//! answer never reaches the UI (see [`remote`]). Input debouncing lives in
//! [`debounce`].
//!
//! ## Module Overview
//!
//! - [`api`]: The facade every UI talks to
//! - [`commands`]: Validation and messages per operation
//! - [`session`]: Simulated login, registration and favorites
//! - [`theme`]: Persisted light/dark preference
//! - [`filter`]: Search/region/language filtering
//! - [`debounce`]: Cancel-and-reschedule timer
//! - [`remote`]: Country and boundary HTTP clients
//! - [`geo`]: GeoJSON types
//! - [`display`]: Field formatting and placeholders
//! - [`store`]: Key-value storage trait and backends
//! - [`model`]: Country and user types
//! - [`config`], [`init`]: Settings and data directory
//! - [`error`]: Error types

pub mod api;
pub mod commands;
pub mod config;
pub mod debounce;
pub mod display;
pub mod error;
pub mod filter;
pub mod geo;
pub mod init;
pub mod model;
pub mod remote;
pub mod session;
pub mod store;
pub mod theme;

#[cfg(any(test, feature = "test_utils"))]
pub mod test_utils;
