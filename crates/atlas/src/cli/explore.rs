//! Interactive filtering.
//!
//! Each stdin line edits one dimension of the filter. Edits go through a
//! [`Debouncer`], so a burst of lines re-filters once, after the burst.
//!
//! ```text
//! fra            search for "fra"
//! r Europe       region = Europe      (r alone clears it)
//! l French       language = French    (l alone clears it)
//! clear          reset every dimension
//! q              quit
//! ```
//!
//! End of input applies whatever edit is still pending, then exits.

use super::render::{render_country_list, render_messages};
use super::styles::palette;
use atlasapp::api::AtlasApi;
use atlasapp::debounce::Debouncer;
use atlasapp::filter::FilterState;
use atlasapp::store::fs_backend::FsBackend;
use tokio::io::{AsyncBufReadExt, BufReader};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Edit {
    Search(String),
    Region(String),
    Language(String),
    Clear,
    Quit,
}

pub fn parse_edit(line: &str) -> Edit {
    let line = line.trim();
    match line {
        "q" | "quit" | "exit" => return Edit::Quit,
        "clear" => return Edit::Clear,
        "r" => return Edit::Region(String::new()),
        "l" => return Edit::Language(String::new()),
        _ => {}
    }
    if let Some(region) = line.strip_prefix("r ") {
        Edit::Region(region.trim().to_string())
    } else if let Some(language) = line.strip_prefix("l ") {
        Edit::Language(language.trim().to_string())
    } else {
        Edit::Search(line.to_string())
    }
}

pub fn apply_edit(state: &FilterState, edit: Edit) -> Option<FilterState> {
    let next = match edit {
        Edit::Search(term) => state.clone().with_search(term),
        Edit::Region(region) => state.clone().with_region(region),
        Edit::Language(language) => state.clone().with_language(language),
        Edit::Clear => FilterState::new(),
        Edit::Quit => return None,
    };
    Some(next)
}

pub async fn run(api: &mut AtlasApi<FsBackend>) -> anyhow::Result<()> {
    let (mut debouncer, mut filters) = Debouncer::new(api.config().debounce_delay());
    let mut state = FilterState::new();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    println!(
        "Type to search. 'r <region>', 'l <language>', 'clear', 'q' to quit. Debounce: {}ms",
        debouncer.delay().as_millis()
    );
    show(api, &state).await?;

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    break;
                };
                match apply_edit(&state, parse_edit(&line)) {
                    Some(next) => {
                        state = next;
                        debouncer.schedule(state.clone());
                    }
                    None => {
                        debouncer.cancel();
                        return Ok(());
                    }
                }
            }
            Some(filter) = filters.recv() => {
                show(api, &filter).await?;
            }
        }
    }

    // Input closed with an edit still waiting
    let last = if debouncer.is_pending() {
        filters.recv().await
    } else {
        filters.try_recv().ok()
    };
    if let Some(filter) = last {
        show(api, &filter).await?;
    }
    Ok(())
}

async fn show(api: &mut AtlasApi<FsBackend>, filter: &FilterState) -> anyhow::Result<()> {
    let result = api.list_countries(filter).await?;
    let palette = palette(api.current_theme());
    print!(
        "{}",
        render_country_list(&result.listed_countries, |c| api.is_favorite(c), palette)
    );
    print!("{}", render_messages(&result.messages, palette));
    Ok(())
}
