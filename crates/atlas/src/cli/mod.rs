//! # CLI Behavior
//!
//! This is **one possible UI client** for atlas, not the application itself.
//! The CLI is the only place that knows about terminal I/O, exit codes, and
//! output formatting.
//!
//! ## Naked Execution (`atlas`)
//!
//! Running `atlas` with no arguments lists every country, same as `atlas list`.
//!
//! ## Errors vs Messages
//!
//! A country list that fails to load, an unknown code, or empty login fields
//! are messages: they print and the exit code stays 0. Only failures the user
//! cannot fix by retyping (storage, config, an unusable data dir) end with
//! `Error: ...` on stderr and exit code 1.
//!
//! ## Environment
//!
//! - `ATLAS_DATA`: data directory (session, favorites, theme, `atlas.toml`)
//! - `ATLAS_API_URL`, `ATLAS_BOUNDARY_URL`: remote sources
//! - `ATLAS_DEBOUNCE_MS`: quiet period for `atlas explore`
//! - `RUST_LOG`: log filter; `-v` is shorthand for `debug`
//!
//! ## Module Structure
//!
//! - `setup`: Argument parsing via clap
//! - `handlers`: Context setup and per-command dispatch
//! - `render`: Output formatting
//! - `styles`: Light and dark palettes
//! - `explore`: Interactive, debounced filtering

mod explore;
mod handlers;
mod render;
pub mod setup;
mod styles;

pub use handlers::run;
