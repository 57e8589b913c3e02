use crate::commands;
use crate::common::CommonParams;
use crate::log_debug;
use crate::providers::Provider;
use crate::ui;
use clap::builder::{Styles, styling::AnsiColor};
use clap::{Parser, Subcommand, crate_version};
use colored::Colorize;
use std::path::PathBuf;

const LOG_FILE: &str = "archimedes-debug.log";

/// CLI structure defining the available commands and global arguments
#[derive(Parser)]
#[command(
    author,
    version = crate_version!(),
    about = "Archimedes: AI-powered architecture plan reviewer",
    long_about = "Archimedes sends your Markdown architecture plan to an LLM for a structured critique: strengths, severity-ranked areas for improvement, strategic recommendations, and next steps.",
    disable_version_flag = true,
    after_help = get_dynamic_help(),
    styles = get_styles(),
)]
pub struct Cli {
    /// Subcommands available for the CLI
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Log debug messages to a file
    #[arg(
        short = 'l',
        long = "log",
        global = true,
        help = "Log debug messages to a file"
    )]
    pub log: bool,

    /// Specify a custom log file path
    #[arg(
        long = "log-file",
        global = true,
        help = "Specify a custom log file path"
    )]
    pub log_file: Option<String>,

    /// Suppress non-essential output (spinners, waiting messages, etc.)
    #[arg(
        short = 'q',
        long = "quiet",
        global = true,
        help = "Suppress non-essential output"
    )]
    pub quiet: bool,

    /// Display the version
    #[arg(
        short = 'v',
        long = "version",
        global = true,
        help = "Display the version"
    )]
    pub version: bool,
}

/// Enumeration of available subcommands
#[derive(Subcommand)]
#[command(subcommand_negates_reqs = true)]
#[command(subcommand_precedence_over_arg = true)]
pub enum Commands {
    /// Analyze an architecture plan using AI
    #[command(
        about = "Analyze an architecture plan using AI",
        long_about = "Send a Markdown architecture plan to the configured LLM and print a structured critique. Reads the plan from a file, from stdin with '-', or uses the bundled example plan with --example.",
        after_help = get_dynamic_help()
    )]
    Analyze {
        #[command(flatten)]
        common: CommonParams,

        /// Path to the Markdown plan, or '-' to read from stdin
        #[arg(help = "Path to the Markdown plan, or '-' to read from stdin")]
        plan_file: Option<PathBuf>,

        /// Analyze the bundled example plan
        #[arg(long, help = "Analyze the bundled example plan")]
        example: bool,

        /// Export the analysis report (pdf, html, or markdown)
        #[arg(
            short,
            long,
            help = "Export the analysis report in the given format (pdf, html, markdown)"
        )]
        export: Option<String>,

        /// Directory to write exported reports to
        #[arg(long, help = "Directory to write exported reports to")]
        output_dir: Option<PathBuf>,
    },

    /// List models available on the local LM Studio server
    #[command(about = "List models available on the local LM Studio server")]
    Models {
        /// LM Studio host, as host:port
        #[arg(long, help = "LM Studio host, as host:port (e.g. localhost:1234)")]
        host: Option<String>,
    },

    /// Check connectivity to the configured providers
    #[command(
        about = "Check provider connectivity and configuration",
        long_about = "Verify that the Gemini API key is present and that the local LM Studio server is reachable."
    )]
    Doctor {
        /// LM Studio host, as host:port
        #[arg(long, help = "LM Studio host, as host:port (e.g. localhost:1234)")]
        host: Option<String>,
    },

    /// Configure providers, models, and export settings
    #[command(about = "Configure Archimedes settings and providers")]
    Config {
        #[command(flatten)]
        common: CommonParams,

        /// Set API key for the specified provider
        #[arg(long, help = "Set API key for the specified provider")]
        api_key: Option<String>,

        /// Set the default export directory
        #[arg(long, help = "Set the default export directory")]
        export_dir: Option<PathBuf>,
    },
}

/// Define custom styles for Clap
fn get_styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::Magenta.on_default().bold())
        .usage(AnsiColor::Cyan.on_default().bold())
        .literal(AnsiColor::Green.on_default().bold())
        .placeholder(AnsiColor::Yellow.on_default())
        .valid(AnsiColor::Blue.on_default().bold())
        .invalid(AnsiColor::Red.on_default().bold())
        .error(AnsiColor::Red.on_default().bold())
}

/// Parse the command-line arguments
pub fn parse_args() -> Cli {
    Cli::parse()
}

/// Generate dynamic help including available LLM providers
fn get_dynamic_help() -> String {
    let mut providers = Provider::all_names();
    providers.sort_unstable();

    let providers_list = providers
        .iter()
        .map(|p| format!("{}", p.bold()))
        .collect::<Vec<_>>()
        .join(" • ");

    format!("\nAvailable LLM Providers: {providers_list}")
}

/// Main function to parse arguments and handle the command
pub async fn main() -> anyhow::Result<()> {
    let cli = parse_args();

    if cli.version {
        ui::print_version(crate_version!());
        return Ok(());
    }

    if cli.log {
        crate::logger::init().map_err(|e| anyhow::anyhow!("Failed to initialize logging: {e}"))?;
        crate::logger::enable_logging();
        let log_file = cli.log_file.as_deref().unwrap_or(LOG_FILE);
        crate::logger::set_log_file(log_file)?;
    } else {
        crate::logger::disable_logging();
    }

    // Set quiet mode in the UI module
    if cli.quiet {
        crate::ui::set_quiet_mode(true);
    }

    if let Some(command) = cli.command {
        handle_command(command).await
    } else {
        // If no subcommand is provided, print the help
        let _ = Cli::parse_from(["archimedes", "--help"]);
        Ok(())
    }
}

/// Handle the command based on parsed arguments
pub async fn handle_command(command: Commands) -> anyhow::Result<()> {
    match command {
        Commands::Analyze {
            common,
            plan_file,
            example,
            export,
            output_dir,
        } => {
            log_debug!(
                "Handling 'analyze' command with common: {:?}, plan_file: {:?}, example: {}, export: {:?}, output_dir: {:?}",
                common,
                plan_file,
                example,
                export,
                output_dir
            );
            commands::handle_analyze_command(common, plan_file, example, export, output_dir).await
        }
        Commands::Models { host } => {
            log_debug!("Handling 'models' command with host: {:?}", host);
            commands::handle_models_command(host).await
        }
        Commands::Doctor { host } => {
            log_debug!("Handling 'doctor' command with host: {:?}", host);
            commands::handle_doctor_command(host).await
        }
        Commands::Config {
            common,
            api_key,
            export_dir,
        } => {
            log_debug!(
                "Handling 'config' command with common: {:?}, api_key present: {}, export_dir: {:?}",
                common,
                api_key.is_some(),
                export_dir
            );
            commands::handle_config_command(&common, api_key, export_dir)
        }
    }
}
