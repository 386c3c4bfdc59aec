//! # Atlas CLI
//!
//! The binary is intentionally thin: the CLI lives in `src/cli/`, while this
//! file only starts the runtime, invokes `cli::run()` and handles process
//! termination.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (crates/atlas/src/cli/)                          │
//! │  - clap argument parsing (setup.rs)                         │
//! │  - logging, context wiring, dispatch (handlers.rs)          │
//! │  - terminal rendering with console styles (render.rs)       │
//! │  - interactive filtering (explore.rs)                       │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  atlasapp (crates/atlasapp/)                                │
//! │  - AtlasApi facade, commands, stores, remote clients        │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Everything in `atlasapp` is UI agnostic. The CLI owns every user-facing
//! concern: argument parsing, logging setup, rendering and exit codes.

mod cli;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    if let Err(e) = cli::run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
