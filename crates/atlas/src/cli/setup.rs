use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Returns the version string, including git hash and commit date for non-release builds.
/// Format for releases: "v0.3.0"
/// Format for dev builds: "v0.3.0\ndev: abc1234 2024-01-15 14:30"
fn get_version() -> &'static str {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("GIT_HASH");
    const GIT_COMMIT_DATE: &str = env!("GIT_COMMIT_DATE");
    const IS_RELEASE: &str = env!("IS_RELEASE");

    use std::sync::OnceLock;
    static VERSION_STRING: OnceLock<String> = OnceLock::new();

    VERSION_STRING.get_or_init(|| {
        if IS_RELEASE == "true" || GIT_HASH.is_empty() {
            format!("v{}", VERSION)
        } else {
            format!("v{}\ndev: {} {}", VERSION, GIT_HASH, GIT_COMMIT_DATE)
        }
    })
}

#[derive(Parser, Debug)]
#[command(
    name = "atlas",
    bin_name = "atlas",
    version = get_version(),
    disable_help_subcommand = true
)]
#[command(about = "Explore countries of the world from the terminal", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Data directory (defaults to $ATLAS_DATA, then the OS data dir)
    #[arg(long, global = true, value_name = "DIR", help_heading = "Options")]
    pub data: Option<PathBuf>,

    /// Verbose output (debug logging on stderr)
    #[arg(short, long, global = true, help_heading = "Options")]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List countries, optionally filtered
    #[command(alias = "ls", display_order = 1)]
    List {
        /// Match name, official name or capital (case-insensitive)
        #[arg(short, long)]
        search: Option<String>,

        /// Exact region (Africa, Americas, Asia, Europe, Oceania)
        #[arg(short, long)]
        region: Option<String>,

        /// Spoken language, e.g. French
        #[arg(short, long)]
        language: Option<String>,
    },

    /// Show one country in detail
    #[command(alias = "v", display_order = 2)]
    View {
        /// Country code (cca2, cca3 or cioc)
        code: String,
    },

    /// Show a country's borders
    #[command(display_order = 3)]
    Map {
        /// Country code (cca2, cca3 or cioc)
        code: String,
    },

    /// Filter countries interactively, one edit per line
    #[command(display_order = 4)]
    Explore,

    /// List every spoken language
    #[command(display_order = 5)]
    Languages,

    /// List the filterable regions
    #[command(display_order = 6)]
    Regions,

    /// Log in (any non-empty email and password)
    #[command(display_order = 10)]
    Login {
        #[arg(long, default_value = "")]
        email: String,

        #[arg(long, default_value = "")]
        password: String,
    },

    /// Create a local account and log in
    #[command(display_order = 11)]
    Register {
        #[arg(long, default_value = "")]
        username: String,

        #[arg(long, default_value = "")]
        email: String,

        #[arg(long, default_value = "")]
        password: String,

        /// Repeat the password
        #[arg(long, default_value = "")]
        confirm: String,
    },

    /// Log out (favorites are kept for the next login)
    #[command(display_order = 12)]
    Logout,

    /// Show the logged-in user
    #[command(display_order = 13)]
    Whoami,

    /// Add or remove a favorite country
    #[command(alias = "f", display_order = 20)]
    Fav {
        /// Country code (cca2, cca3 or cioc)
        code: String,
    },

    /// List favorite countries
    #[command(display_order = 21)]
    Favorites,

    /// Show or change the color theme
    #[command(display_order = 30)]
    Theme {
        #[command(subcommand)]
        action: Option<ThemeAction>,
    },

    /// Show configuration values
    #[command(display_order = 31)]
    Config,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeAction {
    /// Print the current theme
    Show,
    /// Switch between light and dark
    Toggle,
    /// Use the light theme
    Light,
    /// Use the dark theme
    Dark,
}
