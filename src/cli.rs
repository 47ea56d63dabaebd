//! CLI module - Command-line interface definitions and handlers

use anyhow::{bail, Result};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::campus::timetable::DayOfWeek;
use crate::core::render::{OutputFormat, RenderConfig};
use crate::store::Store;

/// campus - a local-first campus super-app for the terminal.
#[derive(Parser, Debug)]
#[command(name = "campus")]
#[command(
    author,
    version,
    about,
    long_about = r#"campus keeps all of its state in a .campus/ directory under the chosen root.

Each command prints a ResultSet in the selected format (default: jsonl).

Output formats:
- jsonl: one JSON object per line (best for piping into tools)
- json: a single JSON array
- md: human-friendly Markdown
- raw: text lines only (unstable; intended for debugging)

Examples:
    campus login asha
    campus summarize "Please submit the form by 5/10/2025."
    campus lost add --title "Blue bottle" --description "Left in the library"
    campus place review place_abc --rating 5 --comment "great dosa"
    campus timetable add --course Compilers --day monday --start 09:00 --end 10:30 --location LH-1
"#
)]
pub struct Cli {
    /// Root directory holding the .campus/ data directory.
    #[arg(
        long,
        global = true,
        default_value = ".",
        value_name = "ROOT",
        long_help = "Root directory for all operations (defaults to the current directory).\n\n\
All state is stored under <ROOT>/.campus/ as JSON documents."
    )]
    pub root: PathBuf,

    /// Output format (jsonl/json/md/raw).
    #[arg(
        long,
        global = true,
        default_value = "jsonl",
        value_name = "FORMAT",
        long_help = "Select the output format for ResultSet.\n\n\
Supported values:\n\
- jsonl (default)\n\
- json\n\
- md (markdown)\n\
- raw\n\n\
Tip: Prefer jsonl when you want stable, line-oriented output for piping."
    )]
    pub format: String,

    /// Quiet mode (no rendered output).
    #[arg(
        short,
        long,
        global = true,
        long_help = "Suppress the rendered ResultSet on stdout. Errors still go to stderr\n\
and the exit code reports the outcome."
    )]
    pub quiet: bool,

    /// Pretty-print JSON/JSONL output with indentation.
    #[arg(
        long,
        global = true,
        long_help = "Pretty-print JSON and JSONL output with indentation for human readability.\n\n\
Has no effect on md/raw formats."
    )]
    pub pretty: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Extract action items from pasted email text.
    #[command(
        long_about = "Run the heuristic action-item extractor over email text and emit one\n\
result item per extracted action, in original sentence order (at most 5).\n\n\
Text is taken from the positional argument, from --file, or from stdin.\n\n\
Examples:\n\
  campus summarize \"Please submit the form by 5/10/2025. Thanks.\"\n\
  campus summarize --file mail.txt\n\
  pbpaste | campus summarize\n"
    )]
    Summarize {
        /// Email text to analyze (reads stdin if omitted and no --file).
        #[arg(value_name = "TEXT")]
        text: Option<String>,

        /// Read the email text from a file instead.
        #[arg(long, value_name = "PATH", conflicts_with = "text")]
        file: Option<PathBuf>,
    },

    /// Start a mock session for a display name.
    #[command(
        long_about = "Generate an opaque user id for NAME and persist it as the current\n\
session. This is a cosmetic name-entry flow with no credentials.\n\n\
Example:\n\
  campus login asha\n"
    )]
    Login {
        /// Display name to log in as.
        #[arg(value_name = "NAME")]
        name: String,
    },

    /// Clear the mock session.
    Logout,

    /// Show the current mock session.
    Whoami,

    /// Daily mess menus, one per calendar day.
    Menu {
        #[command(subcommand)]
        action: MenuCommands,
    },

    /// Lost & found posts.
    Lost {
        #[command(subcommand)]
        action: LostCommands,
    },

    /// Marketplace listings.
    Market {
        #[command(subcommand)]
        action: MarketCommands,
    },

    /// Shared travel trips.
    Trip {
        #[command(subcommand)]
        action: TripCommands,
    },

    /// Places directory with reviews.
    Place {
        #[command(subcommand)]
        action: PlaceCommands,
    },

    /// Your weekly class timetable (requires login).
    Timetable {
        #[command(subcommand)]
        action: TimetableCommands,
    },
}

#[derive(Subcommand, Debug)]
pub enum MenuCommands {
    /// Show the menu for a date.
    Show {
        /// Date key, YYYY-MM-DD.
        #[arg(long, value_name = "DATE")]
        date: String,
    },

    /// Set (or replace) the menu for a date.
    Set {
        /// Date key, YYYY-MM-DD.
        #[arg(long, value_name = "DATE")]
        date: String,

        /// Breakfast items (comma-separated).
        #[arg(long, value_name = "ITEMS", value_delimiter = ',', default_value = "")]
        breakfast: Vec<String>,

        /// Lunch items (comma-separated).
        #[arg(long, value_name = "ITEMS", value_delimiter = ',', default_value = "")]
        lunch: Vec<String>,

        /// Dinner items (comma-separated).
        #[arg(long, value_name = "ITEMS", value_delimiter = ',', default_value = "")]
        dinner: Vec<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum LostCommands {
    /// List all lost & found posts.
    List,

    /// Add a post.
    Add {
        #[arg(long, value_name = "TITLE")]
        title: String,

        #[arg(long, value_name = "TEXT", default_value = "")]
        description: String,

        /// Post a found item instead of a lost one.
        #[arg(long)]
        found: bool,
    },

    /// Mark a post as found.
    Resolve {
        /// Post id.
        #[arg(value_name = "ID")]
        id: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum MarketCommands {
    /// List listings.
    List {
        /// Only listings in this category.
        #[arg(long, value_name = "CATEGORY")]
        category: Option<String>,

        /// Only listings still for sale.
        #[arg(long)]
        for_sale: bool,
    },

    /// Add a listing (always starts for sale).
    Add {
        #[arg(long, value_name = "TITLE")]
        title: String,

        #[arg(long, value_name = "PRICE")]
        price: f64,

        #[arg(long, value_name = "CATEGORY")]
        category: String,

        #[arg(long, value_name = "TEXT", default_value = "")]
        description: String,
    },

    /// Mark a listing as sold.
    Sold {
        /// Listing id.
        #[arg(value_name = "ID")]
        id: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum TripCommands {
    /// List all trips.
    List,

    /// Create a trip; you join it automatically (requires login).
    Add {
        #[arg(long, value_name = "PLACE")]
        origin: String,

        #[arg(long, value_name = "PLACE")]
        destination: String,

        /// Departure time, RFC 3339 (e.g. 2025-10-05T08:30:00Z).
        #[arg(long, value_name = "WHEN")]
        departs: DateTime<Utc>,
    },

    /// Join a trip (requires login; joining twice is a no-op).
    Join {
        /// Trip id.
        #[arg(value_name = "ID")]
        id: String,
    },

    /// Leave a trip (requires login).
    Leave {
        /// Trip id.
        #[arg(value_name = "ID")]
        id: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum PlaceCommands {
    /// List places.
    List {
        /// Only places in this category.
        #[arg(long, value_name = "CATEGORY")]
        category: Option<String>,
    },

    /// Add a place.
    Add {
        #[arg(long, value_name = "NAME")]
        name: String,

        #[arg(long, value_name = "CATEGORY")]
        category: String,

        #[arg(long, value_name = "TEXT", default_value = "")]
        description: String,

        #[arg(long, value_name = "ADDRESS", default_value = "")]
        address: String,
    },

    /// Show one place with its average rating.
    Show {
        /// Place id.
        #[arg(value_name = "ID")]
        id: String,
    },

    /// Review a place (requires login).
    Review {
        /// Place id.
        #[arg(value_name = "ID")]
        id: String,

        /// Stars, 1-5.
        #[arg(long, value_name = "N")]
        rating: u8,

        #[arg(long, value_name = "TEXT", default_value = "")]
        comment: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum TimetableCommands {
    /// List your timetable entries.
    List,

    /// Add an entry to your timetable.
    Add {
        #[arg(long, value_name = "NAME")]
        course: String,

        /// Day of week (monday..sunday).
        #[arg(long, value_enum, value_name = "DAY")]
        day: DayOfWeek,

        /// Start time, HH:MM (24-hour).
        #[arg(long, value_name = "TIME")]
        start: String,

        /// End time, HH:MM (24-hour).
        #[arg(long, value_name = "TIME")]
        end: String,

        #[arg(long, value_name = "ROOM", default_value = "")]
        location: String,
    },

    /// Remove an entry from your timetable.
    Remove {
        /// Entry id.
        #[arg(value_name = "ID")]
        id: String,
    },
}

/// Run the CLI with parsed arguments
pub fn run(cli: Cli) -> Result<()> {
    // Parse output format
    let format: OutputFormat = match cli.format.parse() {
        Ok(format) => format,
        Err(err) => bail!("{}", err),
    };
    let render_config = RenderConfig {
        format,
        pretty: cli.pretty,
        quiet: cli.quiet,
    };

    // Get absolute root path
    let root = cli.root.canonicalize().unwrap_or(cli.root);

    // The summarizer is pure and does not touch storage
    if let Commands::Summarize { text, file } = &cli.command {
        return crate::summarize::run_summarize(text.as_deref(), file.as_deref(), render_config);
    }

    let store = Store::open(&root)?;

    match cli.command {
        Commands::Summarize { .. } => unreachable!("handled above"),

        Commands::Login { name } => crate::session::run_login(&store, &name, render_config),
        Commands::Logout => crate::session::run_logout(&store, render_config),
        Commands::Whoami => crate::session::run_whoami(&store, render_config),

        Commands::Menu { action } => match action {
            MenuCommands::Show { date } => {
                crate::campus::menu::run_show(&store, &date, render_config)
            }
            MenuCommands::Set {
                date,
                breakfast,
                lunch,
                dinner,
            } => crate::campus::menu::run_set(
                &store,
                &date,
                clean_items(breakfast),
                clean_items(lunch),
                clean_items(dinner),
                render_config,
            ),
        },

        Commands::Lost { action } => match action {
            LostCommands::List => crate::campus::lostfound::run_list(&store, render_config),
            LostCommands::Add {
                title,
                description,
                found,
            } => {
                crate::campus::lostfound::run_add(&store, &title, &description, found, render_config)
            }
            LostCommands::Resolve { id } => {
                crate::campus::lostfound::run_resolve(&store, &id, render_config)
            }
        },

        Commands::Market { action } => match action {
            MarketCommands::List { category, for_sale } => crate::campus::marketplace::run_list(
                &store,
                category.as_deref(),
                for_sale,
                render_config,
            ),
            MarketCommands::Add {
                title,
                price,
                category,
                description,
            } => crate::campus::marketplace::run_add(
                &store,
                &title,
                price,
                &category,
                &description,
                render_config,
            ),
            MarketCommands::Sold { id } => {
                crate::campus::marketplace::run_sold(&store, &id, render_config)
            }
        },

        Commands::Trip { action } => match action {
            TripCommands::List => crate::campus::travel::run_list(&store, render_config),
            TripCommands::Add {
                origin,
                destination,
                departs,
            } => {
                crate::campus::travel::run_add(&store, &origin, &destination, departs, render_config)
            }
            TripCommands::Join { id } => crate::campus::travel::run_join(&store, &id, render_config),
            TripCommands::Leave { id } => {
                crate::campus::travel::run_leave(&store, &id, render_config)
            }
        },

        Commands::Place { action } => match action {
            PlaceCommands::List { category } => {
                crate::campus::places::run_list(&store, category.as_deref(), render_config)
            }
            PlaceCommands::Add {
                name,
                category,
                description,
                address,
            } => crate::campus::places::run_add(
                &store,
                &name,
                &category,
                &description,
                &address,
                render_config,
            ),
            PlaceCommands::Show { id } => {
                crate::campus::places::run_show(&store, &id, render_config)
            }
            PlaceCommands::Review {
                id,
                rating,
                comment,
            } => crate::campus::places::run_review(&store, &id, rating, &comment, render_config),
        },

        Commands::Timetable { action } => match action {
            TimetableCommands::List => crate::campus::timetable::run_list(&store, render_config),
            TimetableCommands::Add {
                course,
                day,
                start,
                end,
                location,
            } => crate::campus::timetable::run_add(
                &store,
                &course,
                day,
                &start,
                &end,
                &location,
                render_config,
            ),
            TimetableCommands::Remove { id } => {
                crate::campus::timetable::run_remove(&store, &id, render_config)
            }
        },
    }
}

/// Drop empty strings produced by trailing commas or empty defaults
fn clean_items(items: Vec<String>) -> Vec<String> {
    items
        .into_iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_items() {
        let items = vec![" idli ".to_string(), String::new(), "dosa".to_string()];
        assert_eq!(clean_items(items), vec!["idli", "dosa"]);
    }

    #[test]
    fn test_cli_parses_summarize() {
        let cli = Cli::try_parse_from(["campus", "summarize", "some text"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Summarize { text: Some(_), .. }
        ));
    }

    #[test]
    fn test_cli_parses_timetable_add() {
        let cli = Cli::try_parse_from([
            "campus",
            "timetable",
            "add",
            "--course",
            "Compilers",
            "--day",
            "monday",
            "--start",
            "09:00",
            "--end",
            "10:30",
            "--location",
            "LH-1",
        ])
        .unwrap();
        match cli.command {
            Commands::Timetable {
                action: TimetableCommands::Add { day, .. },
            } => assert_eq!(day, DayOfWeek::Monday),
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
