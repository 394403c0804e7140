use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

mod commands;

#[derive(Parser)]
#[command(name = "otl")]
#[command(author, version, about, long_about = None)]
#[command(
    about = "Fill out the Oracle E-Business Suite overtime-eligible timecard from a CSV file",
    long_about = "otl drives a browser through the Oracle single sign-on, navigates to the \
                  timecard entry page, and fills the expanding grid from a reference CSV, one \
                  row at a time. The browser stays open afterwards so you can review and \
                  submit the timecard yourself."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in, open a new timecard, and fill it from the CSV
    Fill {
        /// Path to the config file
        #[arg(short, long, value_name = "FILE", default_value = "otl.toml")]
        config: PathBuf,

        /// Timecard CSV (overrides the config file)
        #[arg(long, value_name = "FILE")]
        csv: Option<PathBuf>,

        /// Browser to drive: chrome, chromium, edge, or brave (overrides the config file)
        #[arg(long)]
        browser: Option<String>,

        /// Browser binary (overrides the config file and the platform defaults)
        #[arg(long, value_name = "FILE")]
        browser_binary: Option<PathBuf>,

        /// Run the browser headless; only sensible with stored credentials
        #[arg(long)]
        headless: bool,

        /// SSO username (overrides the secrets file)
        #[arg(long, env = "OTL_USERNAME")]
        username: Option<String>,

        /// SSO password (overrides the secrets file)
        #[arg(long, env = "OTL_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },

    /// Write a starter timecard CSV (and optionally a starter config)
    Template {
        /// Where to write the CSV
        #[arg(value_name = "FILE", default_value = "timecard.csv")]
        output: PathBuf,

        /// Also write a starter otl.toml next to it
        #[arg(long)]
        with_config: bool,

        /// Overwrite existing files
        #[arg(long)]
        force: bool,
    },

    /// Generate shell completions
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    match cli.command {
        Commands::Fill {
            config,
            csv,
            browser,
            browser_binary,
            headless,
            username,
            password,
        } => commands::fill::execute(
            &config,
            csv,
            browser,
            browser_binary,
            headless,
            username,
            password,
        ),
        Commands::Template {
            output,
            with_config,
            force,
        } => commands::template::execute(&output, with_config, force),
        Commands::Completion { shell } => commands::completion::execute(shell, &mut Cli::command()),
    }
}

fn init_logging(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = if verbose {
        EnvFilter::new("otl=debug,otl_core=debug,otl_browser=debug,otl_ebs=debug")
    } else {
        EnvFilter::new("otl=info,otl_core=info,otl_browser=info,otl_ebs=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}
