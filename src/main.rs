use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use searchrank::config::load_config;
use searchrank::icons::icon_for_url;
use searchrank::storage::{StateDir, StateFile};
use searchrank::telemetry::SearchStats;
use searchrank::{CategorySettings, History, HistoryCandidate, Persisted, Pinned, ResultItem, SearchSession};
use serde::Serialize;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Activity to scope pins to (defaults to the configured one)
    #[arg(short, long)]
    activity: Option<String>,

    /// Directory holding the persisted state
    #[arg(long)]
    state_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Rank a JSON array of results against a query
    Rank {
        #[arg(short, long, default_value = "")]
        query: String,
        /// Read results from a file instead of stdin
        #[arg(short, long)]
        input: Option<PathBuf>,
    },
    /// Record a selected JSON result in history
    Select {
        #[arg(short, long, default_value = "")]
        query: String,
        #[arg(short, long)]
        input: Option<PathBuf>,
    },
    /// Show history grouped into applications and everything else
    History {
        #[arg(long)]
        remove: Option<String>,
        #[arg(long, conflicts_with = "remove")]
        clear: bool,
    },
    /// Pin a JSON result for the current activity
    Pin {
        #[arg(short, long)]
        input: Option<PathBuf>,
        /// Pin for every activity
        #[arg(long)]
        global: bool,
    },
    /// Remove a pin
    Unpin {
        #[arg(long)]
        match_id: String,
        /// Drop the pin from every activity
        #[arg(long)]
        everywhere: bool,
    },
    /// List pins visible in the current activity
    Pins,
    /// Inspect or change category settings
    Categories {
        #[command(subcommand)]
        action: Option<CategoryAction>,
    },
    /// Show or reset search statistics
    Stats {
        #[arg(long)]
        reset: bool,
    },
}

#[derive(Subcommand, Debug)]
enum CategoryAction {
    List,
    Hide { name: String },
    Show { name: String },
    Up { name: String },
    Down { name: String },
    Icon { name: String, icon: Option<String> },
    Reorder { names: Vec<String> },
}

#[derive(Serialize)]
struct CategoryRow<'a> {
    name: &'a str,
    priority: i64,
    visible: bool,
    icon: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RankOutput<'a> {
    pinned: Vec<&'a searchrank::PinnedEntry>,
    results: &'a [ResultItem],
}

fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display())),
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf).context("reading stdin")?;
            Ok(buf)
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn save<P: Persisted>(state: &StateDir, file: StateFile, value: &P) -> Result<()> {
    state.write(file, &value.save())?;
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    // 1. Load Config
    let mut config = load_config()?;
    if let Some(dir) = args.state_dir {
        config.storage.state_dir = Some(dir);
    }
    if let Some(activity) = args.activity {
        config.general.activity = activity;
    }

    // 2. Load persisted stores
    let state = StateDir::from_config(&config)?;
    let categories = CategorySettings::load(&state.read(StateFile::CategorySettings)?);
    let history = History::load(&state.read(StateFile::History)?);
    let pinned = Pinned::load(&state.read(StateFile::Pinned)?);
    let stats = SearchStats::load(&state.read(StateFile::Stats)?);

    let mut session = SearchSession::new(config).with_stores(categories, history, pinned);
    session.stats = stats;

    // 3. Run command
    match args.command {
        Command::Rank { query, input } => {
            let started = Instant::now();
            let mut results: Vec<ResultItem> = serde_json::from_str(&read_input(input.as_deref())?)
                .context("results must be a JSON array")?;
            for item in results.iter_mut() {
                let target = item.url.as_deref().or(item.file_path.as_deref()).unwrap_or_default();
                item.decoration = icon_for_url(target, &item.decoration, &item.category);
            }
            session.update_query(&query);
            session.set_results(results);

            if session.record_search(started.elapsed().as_millis() as u64) {
                save(&state, StateFile::Stats, &session.stats)?;
            }
            print_json(&RankOutput {
                pinned: session.pinned_view(),
                results: &session.ranked,
            })?;
        }
        Command::Select { query, input } => {
            let item: ResultItem = serde_json::from_str(&read_input(input.as_deref())?)
                .context("selection must be a JSON object")?;
            let max_items = session.config.general.max_history_items();
            session.history.add(HistoryCandidate::from_result(&item, &query), max_items);
            save(&state, StateFile::History, &session.history)?;
        }
        Command::History { remove, clear } => {
            if clear {
                session.history.clear();
                save(&state, StateFile::History, &session.history)?;
            } else if let Some(uuid) = remove {
                if session.history.remove(&uuid) {
                    save(&state, StateFile::History, &session.history)?;
                } else {
                    log::warn!("No history entry with uuid {}", uuid);
                }
            }
            print_json(&session.history_view("Applications", "Other"))?;
        }
        Command::Pin { input, global } => {
            let item: ResultItem = serde_json::from_str(&read_input(input.as_deref())?)
                .context("pin target must be a JSON object")?;
            let activity = (!global).then_some(session.activity.as_str());
            session.pinned.pin(&item, activity);
            save(&state, StateFile::Pinned, &session.pinned)?;
        }
        Command::Unpin { match_id, everywhere } => {
            let activity = (!everywhere).then_some(session.activity.as_str());
            session.pinned.unpin(&match_id, activity);
            save(&state, StateFile::Pinned, &session.pinned)?;
        }
        Command::Pins => {
            print_json(&session.pinned_view())?;
        }
        Command::Categories { action } => {
            let settings = &mut session.categories;
            let changed = match action.unwrap_or(CategoryAction::List) {
                CategoryAction::List => false,
                CategoryAction::Hide { name } => { settings.set_visibility(&name, false); true }
                CategoryAction::Show { name } => { settings.set_visibility(&name, true); true }
                CategoryAction::Up { name } => {
                    let all = settings.ordering_names(&[name.as_str()]);
                    settings.move_up(&name, &all);
                    true
                }
                CategoryAction::Down { name } => {
                    let all = settings.ordering_names(&[name.as_str()]);
                    settings.move_down(&name, &all);
                    true
                }
                CategoryAction::Icon { name, icon } => { settings.set_icon(&name, icon); true }
                CategoryAction::Reorder { names } => { settings.reorder_all(&names); true }
            };
            if changed {
                save(&state, StateFile::CategorySettings, &session.categories)?;
            }

            let names = session.categories.ordering_names(&[]);
            let rows: Vec<CategoryRow> = names
                .iter()
                .map(|name| CategoryRow {
                    name,
                    priority: session.categories.resolve_priority(name),
                    visible: session.categories.is_visible(name),
                    icon: session.categories.effective_icon(name, ""),
                })
                .collect();
            print_json(&rows)?;
        }
        Command::Stats { reset } => {
            if reset {
                session.stats.reset();
                save(&state, StateFile::Stats, &session.stats)?;
            }
            print_json(&session.stats)?;
        }
    }

    Ok(())
}
