use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod cli;

use cli::account::{AuthCommand, OnboardingCommand};
use cli::catalog::CatalogCommand;
use cli::context::AppContext;
use cli::practice::PracticeCommand;
use cli::story::StoryCommand;
use cli::theme::ThemeCommand;

#[derive(Parser)]
#[command(name = "pearl")]
#[command(about = "PEARL - gamified career learning in your terminal")]
#[command(version)]
struct Cli {
    /// Path to the config file (defaults to ~/.pearl/config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Path to the state database (overrides storage.db_path)
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Play the Taiken Story
    #[command(subcommand)]
    Story(StoryCommand),

    /// Practice sets
    #[command(subcommand)]
    Practice(PracticeCommand),

    /// Browse episodes and practice sets
    #[command(subcommand)]
    Catalog(CatalogCommand),

    /// Light or dark theme
    #[command(subcommand)]
    Theme(ThemeCommand),

    /// Sign in, sign up, sign out
    #[command(subcommand)]
    Auth(AuthCommand),

    /// Show the full profile of the signed-in user
    Profile,

    /// List the signed-in user's skills
    Skills,

    /// Onboarding status and submission
    #[command(subcommand)]
    Onboarding(OnboardingCommand),

    /// Job recommendations
    Jobs {
        #[arg(long)]
        target_role: Option<String>,
        /// Comma-separated skills
        #[arg(long, value_delimiter = ',')]
        skills: Vec<String>,
        /// Defaults to api.job_location
        #[arg(long)]
        location: Option<String>,
    },

    /// Start a learning journey towards a goal
    Journey {
        goal: String,
        /// Job description text to tailor the journey
        #[arg(long)]
        jd: Option<String>,
    },

    /// Check whether the backend is reachable
    Health,

    /// Manage the configuration file
    #[command(subcommand)]
    Config(ConfigCommand),
}

#[derive(Subcommand)]
enum ConfigCommand {
    /// Write a default config file
    Init {
        /// Overwrite existing config file
        #[arg(long)]
        force: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .init();

    let command = cli.command.unwrap_or(Commands::Story(StoryCommand::Status));

    // config init must not auto-create the file it is about to write
    if let Commands::Config(ConfigCommand::Init { force }) = command {
        return cli::init::init_command(cli.config, force);
    }

    let ctx = AppContext::load(cli.config.as_deref(), cli.db)?;

    match command {
        Commands::Story(cmd) => cli::story::story_command(&ctx, cmd).await?,
        Commands::Practice(cmd) => cli::practice::practice_command(&ctx, cmd)?,
        Commands::Catalog(cmd) => cli::catalog::catalog_command(cmd)?,
        Commands::Theme(cmd) => cli::theme::theme_command(&ctx, cmd)?,
        Commands::Auth(cmd) => cli::account::auth_command(&ctx, cmd)?,
        Commands::Profile => cli::account::profile_command(&ctx)?,
        Commands::Skills => cli::account::skills_command(&ctx)?,
        Commands::Onboarding(cmd) => cli::account::onboarding_command(&ctx, cmd)?,
        Commands::Jobs {
            target_role,
            skills,
            location,
        } => cli::account::jobs_command(&ctx, target_role, skills, location)?,
        Commands::Journey { goal, jd } => cli::account::journey_command(&ctx, goal, jd)?,
        Commands::Health => cli::account::health_command(&ctx)?,
        Commands::Config(ConfigCommand::Init { .. }) => {}
    }

    Ok(())
}
