use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use journal_finder::config::{
    find_config_file, load_config, user_config_path, Config, ConfigFile, ENV_PREFIX,
};
use journal_finder::mcp::McpServer;
use journal_finder::session::{SessionStore, TUTORIAL_STEPS};
use journal_finder::ui::{self, Spinner, Status};
use journal_finder::utils::{format_cost, truncate_with_ellipsis};
use journal_finder::{Catalog, Dashboard};
use std::io::IsTerminal;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::AsyncBufReadExt;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Journal Finder - Find the right journal for your research paper
#[derive(Parser, Debug)]
#[command(name = "journal-finder")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Find journals for your paper, check it for plagiarism and AI content, and ask the research assistant", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose logging (can be used multiple times for more verbosity: -v, -vv)
    #[arg(long, short, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(long, short)]
    quiet: bool,

    /// Output format
    #[arg(long, short, value_enum, global = true, default_value_t = OutputFormat::Auto)]
    output: OutputFormat,

    /// Configuration file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Show all environment variables
    #[arg(long, global = true)]
    env: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Output format for results
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum OutputFormat {
    /// Automatic based on terminal (table if TTY, JSON otherwise)
    Auto,
    /// Table format (human-readable)
    Table,
    /// JSON format (machine-readable)
    Json,
    /// Plain text format
    Plain,
}

impl OutputFormat {
    /// Resolve `Auto` against the terminal
    fn resolve(self) -> Self {
        match self {
            OutputFormat::Auto if std::io::stdout().is_terminal() => OutputFormat::Table,
            OutputFormat::Auto => OutputFormat::Json,
            other => other,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Sign in
    Login {
        /// User name
        user: String,

        /// Create a new account (shows the tutorial on next search)
        #[arg(long)]
        new_account: bool,
    },

    /// Sign out
    Logout,

    /// Show the current session
    Status,

    /// Recommend journals for a paper
    #[command(alias = "s")]
    Search {
        /// Paper title
        #[arg(long, short)]
        title: String,

        /// Paper abstract
        #[arg(long = "abstract", short)]
        abstract_text: String,

        /// Maximum publishing cost (0-5000)
        #[arg(long, short)]
        budget: Option<u32>,

        /// Minimum impact factor (0-10)
        #[arg(long, short = 'i')]
        min_impact_factor: Option<f64>,
    },

    /// Check text for plagiarism (reads stdin without --text or --file)
    Plagiarism {
        /// Text to check
        #[arg(long, short, conflicts_with = "file")]
        text: Option<String>,

        /// File containing the text to check
        #[arg(long, short)]
        file: Option<PathBuf>,
    },

    /// Check text for AI-generated content (reads stdin without --text or --file)
    AiDetect {
        /// Text to check
        #[arg(long, short, conflicts_with = "file")]
        text: Option<String>,

        /// File containing the text to check
        #[arg(long, short)]
        file: Option<PathBuf>,
    },

    /// Ask the research assistant (interactive without a message)
    Chat {
        /// Message to send
        message: Option<String>,
    },

    /// List the journal catalog
    #[command(alias = "ls")]
    Journals,

    /// Manage the configuration file
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Run the MCP server (for Claude Desktop and other MCP clients)
    Serve {
        /// Run in stdio mode (for MCP clients like Claude Desktop)
        #[arg(long, default_value_t = true)]
        stdio: bool,

        /// Run in streamable HTTP mode (overrides --stdio)
        #[arg(long)]
        http: bool,

        /// Port for HTTP mode
        #[arg(long, short, default_value_t = 3000)]
        port: u16,

        /// Host to bind to for HTTP mode
        #[arg(long, default_value = "127.0.0.1")]
        host: String,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommands {
    /// Print the effective configuration as TOML
    Show,

    /// Write a configuration file with default values
    Init {
        /// Destination (default: the user configuration file)
        #[arg(long)]
        path: Option<PathBuf>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

/// Print all available environment variables
fn print_env_vars() {
    println!("Journal Finder - Environment Variables");
    println!();
    println!("Nested keys use a double underscore between section and key.");
    println!();
    println!("Search:");
    println!("  {ENV_PREFIX}_SEARCH__DEFAULT_BUDGET             Initial budget ceiling (default: 3000)");
    println!("  {ENV_PREFIX}_SEARCH__DEFAULT_MIN_IMPACT_FACTOR  Initial minimum impact factor (default: 5.0)");
    println!("  {ENV_PREFIX}_SEARCH__LATENCY_MS                 Simulated search time (default: 2000)");
    println!();
    println!("Plagiarism Check:");
    println!("  {ENV_PREFIX}_PLAGIARISM__LATENCY_MS             Simulated check time (default: 3000)");
    println!("  {ENV_PREFIX}_PLAGIARISM__MAX_SIMILARITY         Highest reported similarity (default: 15.0)");
    println!("  {ENV_PREFIX}_PLAGIARISM__WARNING_THRESHOLD      Similarity that triggers a warning (default: 10.0)");
    println!();
    println!("AI Content Detection:");
    println!("  {ENV_PREFIX}_AI_DETECTION__LATENCY_MS           Simulated check time (default: 3000)");
    println!("  {ENV_PREFIX}_AI_DETECTION__MAX_PROBABILITY      Highest reported AI probability (default: 20.0)");
    println!("  {ENV_PREFIX}_AI_DETECTION__MIXED_THRESHOLD      AI probability reported as mixed (default: 15.0)");
    println!();
    println!("Assistant:");
    println!("  {ENV_PREFIX}_CHAT__LATENCY_MS                   Simulated typing time (default: 1500)");
    println!();
    println!("Files:");
    println!("  {ENV_PREFIX}_CATALOG__PATH                      TOML catalog replacing the built-in journals");
    println!("  {ENV_PREFIX}_SESSION__PATH                      Session file location");
    println!();
    println!("Logging:");
    println!("  {ENV_PREFIX}_LOGGING__LEVEL                     Log level when not verbose (default: info)");
    println!("  {ENV_PREFIX}_LOGGING__FORMAT                    Set to \"json\" for JSON log lines");
    println!("  RUST_LOG                                      Overrides the log filter entirely");
    println!();
    println!("Example:");
    println!("  export {ENV_PREFIX}_SEARCH__LATENCY_MS=0");
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Show environment variables and exit if requested
    if cli.env {
        print_env_vars();
        return Ok(());
    }

    // Load configuration from file if specified or found in default locations
    let config_path = cli.config.clone().or_else(find_config_file);
    let config = load_config(config_path.as_deref()).with_context(|| match &config_path {
        Some(path) => format!("Failed to load configuration from {}", path.display()),
        None => "Failed to load configuration from the environment".to_string(),
    })?;

    init_tracing(&cli, &config);
    if let Some(path) = &config_path {
        tracing::info!("Using config file: {}", path.display());
    }

    let format = cli.output.resolve();
    let show_progress = !cli.quiet && format == OutputFormat::Table;
    let session = SessionStore::from_config(&config.session);

    match cli.command {
        Some(Commands::Login { user, new_account }) => {
            let state = session.login(&user, new_account)?;
            if !cli.quiet {
                let name = state.user.unwrap_or_default();
                ui::print_status(Status::Success, &format!("Signed in as {}", name));
            }
        }

        Some(Commands::Logout) => {
            let existed = session.logout()?;
            if !cli.quiet {
                if existed {
                    ui::print_status(Status::Success, "Signed out");
                } else {
                    ui::print_status(Status::Info, "No active session");
                }
            }
        }

        Some(Commands::Status) => {
            let state = session.load()?;
            match format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&state)?),
                _ => match (state.authenticated, state.user.as_deref()) {
                    (true, Some(user)) => {
                        let since = state
                            .signed_in_at
                            .map(|t| t.format("%Y-%m-%d %H:%M UTC").to_string())
                            .unwrap_or_default();
                        ui::print_status(
                            Status::Success,
                            &format!("Signed in as {} since {}", user, since),
                        );
                        if state.tutorial_pending {
                            ui::print_status(Status::Pending, "Tutorial pending");
                        }
                    }
                    _ => ui::print_status(Status::Info, "Not signed in"),
                },
            }
        }

        Some(Commands::Search {
            title,
            abstract_text,
            budget,
            min_impact_factor,
        }) => {
            session.require_authenticated()?;
            show_tutorial_once(&session, format, cli.quiet)?;

            let dashboard = Dashboard::from_config(&config)?;
            if let Some(budget) = budget {
                dashboard.set_budget(budget);
            }
            if let Some(value) = min_impact_factor {
                dashboard.set_min_impact_factor(value);
            }

            let spinner = Spinner::maybe("Searching journals...", show_progress);
            let outcome = dashboard.search(&title, &abstract_text).await;
            spinner.clear();
            let recommendation = outcome?;

            match format {
                OutputFormat::Json => {
                    println!("{}", serde_json::to_string_pretty(&recommendation)?)
                }
                OutputFormat::Plain => {
                    println!("{}", recommendation.notification());
                    for result in &recommendation.results {
                        println!();
                        for line in ui::journal_card_lines(result) {
                            println!("{}", line);
                        }
                    }
                }
                _ => ui::print_recommendation(&recommendation),
            }
        }

        Some(Commands::Plagiarism { text, file }) => {
            session.require_authenticated()?;
            let content = read_content(text, file)?;
            let dashboard = Dashboard::from_config(&config)?;

            let spinner = Spinner::maybe("Checking for plagiarism...", show_progress);
            let report = tokio::select! {
                report = dashboard.check_plagiarism(&content) => report,
                _ = tokio::signal::ctrl_c() => {
                    dashboard.close_plagiarism();
                    spinner.finish_with_error("Plagiarism check cancelled");
                    return Ok(());
                }
            };
            spinner.clear();
            let report = report?;

            match format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
                OutputFormat::Plain => {
                    for line in ui::plagiarism_lines(&report) {
                        println!("{}", line);
                    }
                }
                _ => ui::print_plagiarism_report(&report),
            }
        }

        Some(Commands::AiDetect { text, file }) => {
            session.require_authenticated()?;
            let content = read_content(text, file)?;
            let dashboard = Dashboard::from_config(&config)?;

            let spinner = Spinner::maybe("Analyzing content...", show_progress);
            let report = tokio::select! {
                report = dashboard.detect_ai_content(&content) => report,
                _ = tokio::signal::ctrl_c() => {
                    dashboard.close_ai_detection();
                    spinner.finish_with_error("AI content check cancelled");
                    return Ok(());
                }
            };
            spinner.clear();
            let report = report?;

            match format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
                OutputFormat::Plain => {
                    for line in ui::ai_detection_lines(&report) {
                        println!("{}", line);
                    }
                }
                _ => ui::print_ai_detection_report(&report),
            }
        }

        Some(Commands::Chat { message }) => {
            session.require_authenticated()?;
            let dashboard = Dashboard::from_config(&config)?;

            match message {
                Some(message) => {
                    let spinner = Spinner::maybe("Assistant is typing...", show_progress);
                    let reply = dashboard.send_chat(&message).await;
                    spinner.clear();

                    match reply? {
                        Some(reply) if format == OutputFormat::Json => {
                            println!("{}", serde_json::to_string_pretty(&reply)?)
                        }
                        Some(reply) if format == OutputFormat::Plain => println!("{}", reply.content),
                        Some(reply) => ui::print_chat_message(&reply),
                        None => ui::print_status(Status::Warning, "Message is empty"),
                    }
                }
                None => run_chat_loop(&dashboard, format, show_progress).await?,
            }
        }

        Some(Commands::Journals) => {
            let catalog = match &config.catalog.path {
                Some(path) => Catalog::load(path)?,
                None => Catalog::builtin(),
            };
            output_journals(&catalog, format)?;
        }

        Some(Commands::Config { command }) => match command {
            ConfigCommands::Show => print!("{}", config.to_toml()?),
            ConfigCommands::Init { path, force } => {
                let path = path
                    .or_else(user_config_path)
                    .context("Could not determine the configuration directory")?;
                if path.exists() && !force {
                    anyhow::bail!(
                        "{} already exists (use --force to overwrite)",
                        path.display()
                    );
                }
                ConfigFile::default().save(&path)?;
                if !cli.quiet {
                    ui::print_status(
                        Status::Success,
                        &format!("Wrote default configuration to {}", path.display()),
                    );
                }
            }
        },

        Some(Commands::Serve {
            stdio,
            http,
            port,
            host,
        }) => {
            let dashboard = Arc::new(Dashboard::from_config(&config)?);
            let server = McpServer::new(dashboard)?;

            // Use HTTP mode if --http flag is provided, otherwise use --stdio flag
            let use_http = http || !stdio;

            if use_http {
                let addr = format!("{}:{}", host, port);
                let (bound_addr, handle) = server.run_http(&addr).await?;
                tracing::info!("MCP server listening on {}", bound_addr);

                handle
                    .await
                    .map_err(|e| anyhow::anyhow!("Server task failed: {}", e))?;
            } else {
                server.run().await?;
            }
        }

        None => {
            if !cli.quiet {
                ui::print_banner();
            }
        }
    }

    Ok(())
}

fn init_tracing(cli: &Cli, config: &Config) {
    let level = if cli.quiet {
        "error".to_string()
    } else {
        match cli.verbose {
            0 => config.logging.level.clone(),
            1 => "debug".to_string(),
            _ => "trace".to_string(),
        }
    };

    // Logs go to stderr so stdout stays clean for output and the stdio server
    let json_logs = config.logging.is_json();
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| format!("journal_finder={}", level)),
        ))
        .with(json_logs.then(|| {
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(std::io::stderr)
        }))
        .with((!json_logs).then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr)))
        .init();
}

/// Print the tutorial if the account has not seen it yet
fn show_tutorial_once(session: &SessionStore, format: OutputFormat, quiet: bool) -> Result<()> {
    if session.take_tutorial()? && !quiet && format != OutputFormat::Json {
        ui::print_tutorial(&TUTORIAL_STEPS);
    }
    Ok(())
}

/// Text from --text, --file or stdin
fn read_content(text: Option<String>, file: Option<PathBuf>) -> Result<String> {
    if let Some(text) = text {
        return Ok(text);
    }
    if let Some(file) = file {
        return std::fs::read_to_string(&file)
            .with_context(|| format!("Failed to read {}", file.display()));
    }
    std::io::read_to_string(std::io::stdin()).context("Failed to read stdin")
}

/// Interactive assistant session on stdin
async fn run_chat_loop(dashboard: &Dashboard, format: OutputFormat, show_progress: bool) -> Result<()> {
    let interactive = format == OutputFormat::Table;
    if interactive {
        ui::print_section("Research Assistant");
        println!("Type a question, or `exit` to leave.");
        println!();
    }
    for message in dashboard.conversation() {
        print_reply(&message, format)?;
    }

    let mut lines = tokio::io::BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.eq_ignore_ascii_case("exit") || line.eq_ignore_ascii_case("quit") {
            break;
        }

        let spinner = Spinner::maybe("Assistant is typing...", show_progress);
        let reply = tokio::select! {
            reply = dashboard.send_chat(line) => reply,
            _ = tokio::signal::ctrl_c() => {
                dashboard.close_chat();
                spinner.finish_with_error("Reply cancelled");
                break;
            }
        };
        spinner.clear();

        if let Some(reply) = reply? {
            print_reply(&reply, format)?;
        }
    }

    Ok(())
}

fn print_reply(message: &journal_finder::models::ChatMessage, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string(message)?),
        OutputFormat::Plain => println!("{}", message.content),
        _ => ui::print_chat_message(message),
    }
    Ok(())
}

fn output_journals(catalog: &Catalog, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(catalog.records())?);
        }
        OutputFormat::Plain => {
            for journal in catalog.records() {
                println!(
                    "{} (IF {:.1}, {}% acceptance, {}, {})",
                    journal.name,
                    journal.impact_factor,
                    journal.acceptance_rate,
                    format_cost(journal.publishing_cost),
                    journal.review_time
                );
            }
        }
        _ => {
            use comfy_table::{Attribute, Cell, CellAlignment, Table};
            let mut table = Table::new();
            table.load_preset(comfy_table::presets::UTF8_FULL);
            table.set_header(vec![
                "Journal",
                "Impact Factor",
                "Acceptance",
                "Cost",
                "Review",
                "",
            ]);

            for journal in catalog.records() {
                let badge = if journal.is_high_impact() {
                    "High Impact"
                } else {
                    ""
                };
                table.add_row(vec![
                    Cell::new(truncate_with_ellipsis(&journal.name, 48))
                        .add_attribute(Attribute::Bold),
                    Cell::new(format!("{:.1}", journal.impact_factor))
                        .set_alignment(CellAlignment::Right),
                    Cell::new(format!("{}%", journal.acceptance_rate))
                        .set_alignment(CellAlignment::Right),
                    Cell::new(format_cost(journal.publishing_cost))
                        .set_alignment(CellAlignment::Right),
                    Cell::new(&journal.review_time),
                    Cell::new(badge),
                ]);
            }
            println!("{table}");
        }
    }
    Ok(())
}
