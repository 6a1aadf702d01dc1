//! SciX Workspace - Entry Point
//!
//! Command-line front end over the workspace library.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use futures::StreamExt;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use scix_workspace::export::default_format;
use scix_workspace::formatters::{
    compact_detail, compact_result, format_bibliography_markdown, format_detail_markdown,
    format_groups_markdown, format_page_markdown, format_result_markdown, page_json,
};
use scix_workspace::models::{CitationFormat, Page, ResponseFormat};
use scix_workspace::storage::{self, BibliographyStore, TokenStore};
use scix_workspace::{AdsClient, ClientError, Config, Workspace, WorkspaceError};

#[derive(Parser, Debug)]
#[command(name = "scix")]
#[command(about = "Research workspace for the SciX/ADS literature API")]
#[command(version)]
struct Cli {
    /// ADS API token (overrides the stored token for this run)
    #[arg(long, env = "SCIX_API_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Directory holding the stored token and bibliography
    #[arg(long, env = "SCIX_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn", env = "RUST_LOG")]
    log_level: String,

    /// Output logs as JSON
    #[arg(long)]
    json_logs: bool,

    /// Print results as JSON instead of markdown
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Search the literature
    Search {
        /// Query in ADS syntax
        query: String,

        /// Results per page
        #[arg(long)]
        rows: Option<u32>,

        /// Number of pages to fetch
        #[arg(long, default_value = "1")]
        pages: usize,
    },

    /// Show the full record of a paper
    Detail {
        /// Paper bibcode
        bibcode: String,
    },

    /// Print a citation for a paper
    Cite {
        /// Paper bibcode
        bibcode: String,

        /// Citation style
        #[arg(long, value_enum, default_value = "inline")]
        format: CiteStyle,
    },

    /// List the papers a paper references
    References {
        /// Paper bibcode
        bibcode: String,

        /// Maximum number of references
        #[arg(long)]
        rows: Option<u32>,
    },

    /// Manage the personal bibliography
    Bib {
        #[command(subcommand)]
        action: BibAction,
    },

    /// List the export formats the API offers
    Formats,

    /// Manage the stored API token
    Token {
        #[command(subcommand)]
        action: TokenAction,
    },
}

#[derive(Subcommand, Debug)]
enum BibAction {
    /// Save a paper
    Add {
        /// Paper bibcode
        bibcode: String,
    },
    /// List saved papers, most recent first
    List,
    /// Remove a saved paper
    Remove {
        /// Paper bibcode
        bibcode: String,
    },
    /// Remove every saved paper
    Clear,
    /// Render the whole bibliography in one export format
    Export {
        /// Export format route (e.g. bibtex, aastex, apsj)
        #[arg(long)]
        format: Option<String>,
    },
}

impl BibAction {
    /// Whether the action needs the ADS API, and hence a token.
    const fn needs_api(&self) -> bool {
        matches!(self, Self::Add { .. } | Self::Export { .. })
    }
}

#[derive(Subcommand, Debug)]
enum TokenAction {
    /// Validate and store a token
    Set {
        /// ADS API token
        token: String,
    },
    /// Forget the stored token
    Clear,
    /// Report whether a token is stored
    Status,
}

#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
enum CiteStyle {
    /// Short author-year citation, built locally
    #[default]
    Inline,
    /// Full reference via the export API
    Full,
    /// BibTeX via the export API
    Bibtex,
}

impl From<CiteStyle> for CitationFormat {
    fn from(style: CiteStyle) -> Self {
        match style {
            CiteStyle::Inline => Self::Inline,
            CiteStyle::Full => Self::Full,
            CiteStyle::Bibtex => Self::Bibtex,
        }
    }
}

fn init_tracing(log_level: &str, json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    let subscriber = tracing_subscriber::registry().with(filter);

    // stdout carries command output
    if json {
        subscriber.with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr)).init();
    } else {
        subscriber
            .with(tracing_subscriber::fmt::layer().compact().with_writer(std::io::stderr))
            .init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    init_tracing(&cli.log_level, cli.json_logs);

    tracing::debug!(version = env!("CARGO_PKG_VERSION"), command = ?cli.command, "Starting");

    let mut config = Config::from_env()?;
    if let Some(dir) = cli.data_dir.clone() {
        config = config.with_data_dir(dir);
    }

    let output = if cli.json { ResponseFormat::Json } else { ResponseFormat::Markdown };

    if let Err(err) = run(cli, config, output).await {
        tracing::debug!(error = ?err, "Command failed");
        eprintln!("{}", err.to_user_message());
        std::process::exit(1);
    }

    Ok(())
}

async fn run(cli: Cli, mut config: Config, output: ResponseFormat) -> Result<(), WorkspaceError> {
    match &cli.command {
        Command::Token { action } => return run_token(action, &config).await,
        Command::Bib { action } if !action.needs_api() => {
            let bibliography = BibliographyStore::new(storage::open(&config.data_dir));
            return run_local_bib(action, &bibliography, output);
        }
        Command::Search { rows: Some(rows), .. } => config.page_size = *rows,
        Command::References { rows: Some(rows), .. } => config.references_rows = *rows,
        _ => {}
    }

    let mut workspace = Workspace::connect(config, cli.token)?;

    match cli.command {
        Command::Search { query, pages, .. } => {
            let mut stream = std::pin::pin!(workspace.pages(&query, Some(pages)));
            let mut start = 1;
            while let Some(page) = stream.next().await {
                let page = page?;
                print_page(&page, start, output);
                start += page.docs.len();
            }
        }

        Command::Detail { bibcode } => {
            let detail = workspace.detail(&bibcode).await?;
            if output.is_json() {
                println!("{}", compact_detail(&detail));
            } else {
                println!("{}", format_detail_markdown(&detail));
            }
        }

        Command::Cite { bibcode, format } => {
            let detail = workspace.detail(&bibcode).await?;
            workspace.select_citation_format(format.into());
            println!("{}", workspace.cite(&detail.record).await?);
        }

        Command::References { bibcode, .. } => {
            let docs = workspace.references(&bibcode).await?;
            if output.is_json() {
                let docs: Vec<_> = docs.iter().map(compact_result).collect();
                println!("{}", serde_json::Value::from(docs));
            } else if docs.is_empty() {
                println!("No references found for {bibcode}.");
            } else {
                for (i, doc) in docs.iter().enumerate() {
                    println!("{}", format_result_markdown(doc, i + 1));
                }
            }
        }

        Command::Bib { action } => run_bib(action, &workspace, output).await?,

        Command::Formats => {
            let groups = workspace.export_formats_or_default().await;
            if output.is_json() {
                println!("{}", serde_json::json!(groups));
            } else {
                println!("{}", format_groups_markdown(&groups, default_format(&groups)));
            }
        }

        Command::Token { .. } => {}
    }

    Ok(())
}

fn print_page(page: &Page, start: usize, output: ResponseFormat) {
    if output.is_json() {
        println!("{}", page_json(page));
    } else {
        println!("{}", format_page_markdown(page, start));
    }
}

async fn run_bib(
    action: BibAction,
    workspace: &Workspace,
    output: ResponseFormat,
) -> Result<(), WorkspaceError> {
    match action {
        BibAction::Add { bibcode } => {
            let detail = workspace.detail(&bibcode).await?;
            if workspace.save(&detail.record)? {
                println!("Saved {bibcode}.");
            } else {
                println!("{bibcode} is already in the bibliography.");
            }
        }
        BibAction::Export { format } => {
            let format = match format {
                Some(format) => format,
                None => {
                    let groups = workspace.export_formats_or_default().await;
                    default_format(&groups).to_string()
                }
            };
            println!("{}", workspace.export_bibliography(&format).await?);
        }
        local => run_local_bib(&local, workspace.bibliography(), output)?,
    }

    Ok(())
}

/// Bibliography actions that only touch local storage.
fn run_local_bib(
    action: &BibAction,
    bibliography: &BibliographyStore,
    output: ResponseFormat,
) -> Result<(), WorkspaceError> {
    match action {
        BibAction::List => {
            let entries = bibliography.list_recent_first()?;
            if output.is_json() {
                println!("{}", serde_json::json!(entries));
            } else {
                println!("{}", format_bibliography_markdown(&entries));
            }
        }
        BibAction::Remove { bibcode } => {
            bibliography.remove(bibcode)?;
            println!("Removed {bibcode}.");
        }
        BibAction::Clear => {
            bibliography.clear()?;
            println!("Bibliography cleared.");
        }
        BibAction::Add { .. } | BibAction::Export { .. } => {}
    }

    Ok(())
}

async fn run_token(action: &TokenAction, config: &Config) -> Result<(), WorkspaceError> {
    let tokens = TokenStore::new(storage::open(&config.data_dir));

    match action {
        TokenAction::Set { token } => {
            let token = token.trim();
            if token.is_empty() {
                return Err(WorkspaceError::MissingToken);
            }

            let client = AdsClient::new(config, token).map_err(|e| {
                WorkspaceError::Client(ClientError::Transport(format!(
                    "failed to build HTTP client: {e}"
                )))
            })?;

            if !TokenStore::validate(&client).await {
                return Err(ClientError::Unauthorized.into());
            }

            tokens.set(token)?;
            tracing::info!("API token stored");
            println!("Token saved.");
        }
        TokenAction::Clear => {
            tokens.clear()?;
            println!("Token cleared.");
        }
        TokenAction::Status => {
            if tokens.has()? {
                println!("A token is stored.");
            } else {
                println!("No token stored.");
            }
        }
    }

    Ok(())
}
