//! commiter - CLI entry point.

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use dialoguer::Input;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use commiter::commit::{DEFAULT_MAX_FILES_PER_CATEGORY, MessageEngine};
use commiter::config::{self, Config};
use commiter::error::GitError;
use commiter::git::{self, SystemGit};
use commiter::llm::OpenAiClient;

/// Stage changes, generate a commit message, and commit.
#[derive(Parser, Debug)]
#[command(name = "commiter")]
#[command(about = "Stage changes and commit with a generated message")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Use this commit message instead of generating one
    #[arg(short, long)]
    message: Option<String>,

    /// Maximum number of file names listed per category in the generated message
    #[arg(long, default_value_t = DEFAULT_MAX_FILES_PER_CATEGORY)]
    max_files: usize,

    /// Do not stage all changes before committing
    #[arg(long)]
    no_add: bool,

    /// Push the current branch to origin after committing
    #[arg(long)]
    push: bool,

    /// Never call the LLM, even if an API key is configured
    #[arg(long)]
    no_llm: bool,

    /// Edit the proposed message before committing
    #[arg(short, long)]
    edit: bool,

    /// Print the message without committing
    #[arg(long)]
    dry_run: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show or change the stored configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigAction {
    /// Print the current configuration (API key masked)
    Show,
    /// Store the API key
    SetKey { key: String },
    /// Store the model id (e.g. gpt-4o-mini, o1-mini)
    SetModel { model: String },
    /// Store the completion token budget
    SetMaxTokens { max_tokens: u32 },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Some(Command::Config { ref action }) => run_config(action),
        None => run_commit(&cli).await,
    };

    if let Err(e) = result {
        // Propagate git's own exit code
        if let Some(git_err) = e.downcast_ref::<GitError>() {
            eprintln!("Error: {e:#}");
            std::process::exit(git_err.exit_code());
        }
        return Err(e);
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Stage, generate, optionally edit, commit, and optionally push.
async fn run_commit(cli: &Cli) -> Result<()> {
    git::ensure_git_available()?;

    let client = OpenAiClient::new(config::api_base()).context("Failed to build HTTP client")?;
    let engine = MessageEngine::new(SystemGit::new(), client);

    // Step 1: Stage all changes
    if !cli.no_add {
        git::stage_all(engine.git())
            .await
            .context("Failed to stage changes. Ensure git is installed and the repository is initialized.")?;
    }

    // Step 2: Determine the message
    let mut message = match cli.message {
        Some(ref m) => m.clone(),
        None => {
            let settings = if cli.no_llm {
                None
            } else {
                Config::load().llm_settings()
            };
            if settings.is_some() {
                eprintln!("Generating commit message...");
            }
            engine.generate(settings.as_ref(), cli.max_files).await
        }
    };

    // Step 3: Let the user edit it
    if cli.edit {
        message = Input::<String>::new()
            .with_prompt("Edit commit message")
            .with_initial_text(message)
            .allow_empty(true)
            .interact_text()
            .context("Failed to read commit message")?;
    }

    let message = message.trim();
    if message.is_empty() {
        bail!("Unable to determine commit message.");
    }
    debug!("Commit message: {message}");

    if cli.dry_run {
        println!("{message}");
        return Ok(());
    }

    // Step 4: Commit
    let output = git::commit(engine.git(), message).await?;
    print!("{output}");

    // Step 5: Push
    if cli.push {
        let branch = git::current_branch(engine.git()).await?;
        let output = git::push(engine.git(), "origin", &branch).await?;
        print!("{output}");
        println!("✓ Pushed {branch} to origin");
    }

    Ok(())
}

fn run_config(action: &ConfigAction) -> Result<()> {
    if let ConfigAction::Show = action {
        println!("{}", Config::load().display());
        return Ok(());
    }

    // Edit the file as stored, without environment overrides
    let path = Config::default_path()?;
    let mut config = Config::load_from(&path).context("Failed to read existing configuration")?;

    match action {
        ConfigAction::SetKey { key } => config.set_api_key(key.trim()),
        ConfigAction::SetModel { model } => config.set_model(model.trim()),
        ConfigAction::SetMaxTokens { max_tokens } => config.set_max_tokens(*max_tokens),
        ConfigAction::Show => {}
    }

    config
        .save_to(&path)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    println!("✓ Saved configuration to {}", path.display());

    Ok(())
}
