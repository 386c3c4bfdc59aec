//! Dispatch: one handler per subcommand, each calling the api and printing
//! the rendered result.

use super::explore;
use super::render::{
    render_boundary, render_config, render_country_detail, render_country_list,
    render_messages, render_names, render_theme, render_user,
};
use super::setup::{Cli, Commands, ThemeAction};
use super::styles::{palette, Palette};
use atlasapp::api::{AtlasApi, CmdResult};
use atlasapp::filter::FilterState;
use atlasapp::init::initialize;
use atlasapp::store::fs_backend::FsBackend;
use atlasapp::theme::Theme;
use clap::Parser;
use tracing_subscriber::EnvFilter;

type Api = AtlasApi<FsBackend>;

pub async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let ctx = initialize(cli.data.clone(), terminal_theme())?;
    tracing::debug!(data_dir = %ctx.data_dir.display(), api_url = %ctx.config.api_url, "context ready");
    let mut api = ctx.api;

    match cli.command {
        Some(Commands::List {
            search,
            region,
            language,
        }) => {
            let filter = FilterState {
                search_term: search.unwrap_or_default(),
                region: region.unwrap_or_default(),
                language: language.unwrap_or_default(),
            };
            handle_list(&mut api, &filter).await
        }
        Some(Commands::View { code }) => handle_view(&api, &code).await,
        Some(Commands::Map { code }) => handle_map(&api, &code).await,
        Some(Commands::Explore) => explore::run(&mut api).await,
        Some(Commands::Languages) => {
            let result = api.languages().await?;
            print_names(&api, &result.languages, &result);
            Ok(())
        }
        Some(Commands::Regions) => {
            let result = api.regions();
            print_names(&api, &result.regions, &result);
            Ok(())
        }
        Some(Commands::Login { email, password }) => {
            let result = api.login(&email, &password)?;
            print_messages(&api, &result);
            Ok(())
        }
        Some(Commands::Register {
            username,
            email,
            password,
            confirm,
        }) => {
            let result = api.register(&username, &email, &password, &confirm)?;
            print_messages(&api, &result);
            Ok(())
        }
        Some(Commands::Logout) => {
            let result = api.logout()?;
            print_messages(&api, &result);
            Ok(())
        }
        Some(Commands::Whoami) => {
            let result = api.whoami();
            if let Some(user) = result.user.as_ref() {
                print!("{}", render_user(user, current_palette(&api)));
            }
            print_messages(&api, &result);
            Ok(())
        }
        Some(Commands::Fav { code }) => {
            let result = api.toggle_favorite(&code).await?;
            print_messages(&api, &result);
            Ok(())
        }
        Some(Commands::Favorites) => {
            let result = api.favorites();
            print_countries(&api, &result);
            Ok(())
        }
        Some(Commands::Theme { action }) => handle_theme(&mut api, action),
        Some(Commands::Config) => {
            let result = api.show_config();
            if let Some(config) = result.config.as_ref() {
                print!("{}", render_config(config, current_palette(&api)));
            }
            Ok(())
        }
        None => handle_list(&mut api, &FilterState::new()).await,
    }
}

/// `RUST_LOG` wins; otherwise warnings only, or debug with `-v`.
fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Theme to use until the user picks one.
fn terminal_theme() -> Theme {
    match dark_light::detect() {
        dark_light::Mode::Dark => Theme::Dark,
        _ => Theme::Light,
    }
}

fn current_palette(api: &Api) -> &'static Palette {
    palette(api.current_theme())
}

async fn handle_list(api: &mut Api, filter: &FilterState) -> anyhow::Result<()> {
    let result = api.list_countries(filter).await?;
    print_countries(api, &result);
    Ok(())
}

async fn handle_view(api: &Api, code: &str) -> anyhow::Result<()> {
    let result = api.view_country(code).await?;
    for country in &result.affected_countries {
        print!(
            "{}",
            render_country_detail(country, api.is_favorite(&country.cca3), current_palette(api))
        );
    }
    print_messages(api, &result);
    Ok(())
}

async fn handle_map(api: &Api, code: &str) -> anyhow::Result<()> {
    let result = api.country_map(code).await?;
    let palette = current_palette(api);
    if let Some(country) = result.affected_countries.first() {
        println!("{}", palette.title.apply_to(&country.name.common));
    }
    if let Some(boundary) = result.boundary.as_ref() {
        print!("{}", render_boundary(boundary, palette));
    }
    print_messages(api, &result);
    Ok(())
}

fn handle_theme(api: &mut Api, action: Option<ThemeAction>) -> anyhow::Result<()> {
    let result = match action.unwrap_or(ThemeAction::Show) {
        ThemeAction::Show => api.theme(),
        ThemeAction::Toggle => api.toggle_theme()?,
        ThemeAction::Light => api.set_theme(Theme::Light)?,
        ThemeAction::Dark => api.set_theme(Theme::Dark)?,
    };
    if result.messages.is_empty() {
        if let Some(theme) = result.theme {
            print!("{}", render_theme(theme, current_palette(api)));
        }
    }
    print_messages(api, &result);
    Ok(())
}

fn print_countries(api: &Api, result: &CmdResult) {
    print!(
        "{}",
        render_country_list(
            &result.listed_countries,
            |code| api.is_favorite(code),
            current_palette(api)
        )
    );
    print_messages(api, result);
}

fn print_names(api: &Api, names: &[String], result: &CmdResult) {
    print!("{}", render_names(names));
    print_messages(api, result);
}

fn print_messages(api: &Api, result: &CmdResult) {
    print!("{}", render_messages(&result.messages, current_palette(api)));
}
