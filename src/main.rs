use std::fs::OpenOptions;
use std::sync::Mutex;

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use lectio::gemini::{
    ApiKeyManager, GeminiClient, GeminiError, GeminiModel, GeminiQuizProvider, KeySource,
};
use lectio::quiz::{
    Chapter, Configuration, Difficulty, Feedback, GenerationRequest, Level, Quiz, QuizProvider,
    curriculum, option_letter,
};
use lectio::{App, Config, Theme};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "lectio")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Gemini model for this run (pro, 2.5-pro, flash, flash-lite)
    #[arg(long, global = true)]
    model: Option<GeminiModel>,

    /// Color theme for this run
    #[arg(long, global = true)]
    theme: Option<String>,

    #[command(flatten)]
    study: StudyArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Preset choices for the setup form
#[derive(Args, Clone, Default)]
struct StudyArgs {
    /// Chapter of Luke (1-12)
    #[arg(short, long)]
    chapter: Option<Chapter>,

    /// Grade level (elementary, middle, high)
    #[arg(short, long)]
    level: Option<Level>,

    /// Difficulty (beginner, intermediate, advanced)
    #[arg(short, long)]
    difficulty: Option<Difficulty>,

    /// When to show correctness (immediate, end)
    #[arg(short, long)]
    feedback: Option<Feedback>,
}

impl StudyArgs {
    fn configuration(&self) -> Configuration {
        let defaults = Configuration::default();
        Configuration {
            chapter: self.chapter.unwrap_or(defaults.chapter),
            level: self.level.unwrap_or(defaults.level),
            difficulty: self.difficulty.unwrap_or(defaults.difficulty),
            feedback: self.feedback.unwrap_or(defaults.feedback),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// List the chapters in the study curriculum
    Chapters,
    /// Generate one quiz and print it
    Generate {
        #[command(flatten)]
        study: StudyArgs,

        /// Print the raw quiz JSON
        #[arg(long)]
        json: bool,
    },
    /// Manage the stored Gemini API key
    Key {
        #[command(subcommand)]
        action: KeyAction,
    },
}

#[derive(Subcommand)]
enum KeyAction {
    /// Store a key in the system keyring
    Set {
        /// Gemini API key (starts with AIza)
        key: String,
    },
    /// Remove the stored key
    Clear,
    /// Show which key would be used
    Status,
    /// Send a tiny request to check the key works
    Test,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.command.is_none())?;

    let mut config = Config::load()?;
    if let Some(model) = cli.model {
        config.model = model;
    }
    if let Some(theme) = cli.theme {
        if !Theme::names().any(|name| name.eq_ignore_ascii_case(theme.trim())) {
            bail!("Unknown theme: {}. Options: {}", theme, Theme::names().collect::<Vec<_>>().join(", "));
        }
        config.theme = theme;
    }

    match cli.command {
        Some(Commands::Chapters) => {
            for chapter in Chapter::all() {
                println!("{:>2}  {}", chapter, curriculum::summary(chapter));
            }
        }
        Some(Commands::Generate { study, json }) => {
            let provider = build_provider(&config)?;
            let request = GenerationRequest::for_config(&study.configuration());
            let quiz = match provider.generate(request).await {
                Ok(quiz) => quiz,
                Err(failure) => {
                    tracing::error!(reason = failure.reason(), "generation failed");
                    bail!("{}", failure);
                }
            };
            if json {
                println!("{}", serde_json::to_string_pretty(&quiz)?);
            } else {
                print_quiz(&quiz);
            }
        }
        Some(Commands::Key { action }) => run_key_action(action, &config).await?,
        None => {
            let provider = build_provider(&config)?;
            tracing::info!(model = provider.model().display_name(), "starting TUI");
            let mut app = App::new(config, provider, cli.study.configuration())?;
            app.run().await?;
        }
    }

    Ok(())
}

/// Log to stderr for subcommands, to a file while the TUI owns the terminal
fn init_logging(tui: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| "lectio=info".into());
    let registry = tracing_subscriber::registry().with(filter);

    if tui {
        let path = Config::log_path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create log directory {:?}", parent))?;
        }
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .with_context(|| format!("Failed to open log file {:?}", path))?;
        registry
            .with(tracing_subscriber::fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_target(false).with_writer(std::io::stderr))
            .init();
    }
    Ok(())
}

fn build_provider(config: &Config) -> Result<GeminiQuizProvider> {
    let (key, source) = ApiKeyManager::resolve().map_err(with_key_hint)?;
    tracing::debug!(?source, "resolved API key");

    let mut client = GeminiClient::new(key)?;
    if let Some(base_url) = &config.api_base_url {
        client = client.with_base_url(base_url.clone());
    }
    Ok(GeminiQuizProvider::new(client, config.model))
}

/// Attach a `key set` suggestion to errors a new key would fix
fn with_key_hint(err: GeminiError) -> anyhow::Error {
    if err.requires_reauth() {
        anyhow::Error::new(err).context("Run `lectio key set <KEY>` to store a valid Gemini API key")
    } else {
        err.into()
    }
}

async fn run_key_action(action: KeyAction, config: &Config) -> Result<()> {
    match action {
        KeyAction::Set { key } => {
            ApiKeyManager::set_api_key(key.trim())?;
            println!("Stored key {}", ApiKeyManager::mask_key(key.trim()));
        }
        KeyAction::Clear => {
            ApiKeyManager::delete_api_key()?;
            println!("Removed the stored key");
        }
        KeyAction::Status => match ApiKeyManager::resolve() {
            Ok((key, source)) => {
                let from = match source {
                    KeySource::Env(var) => format!("environment variable {}", var),
                    KeySource::Keyring => "system keyring".to_string(),
                };
                println!("Using {} from {}", ApiKeyManager::mask_key(&key), from);
                println!("Quizzes are generated with {}", config.model.display_name());
            }
            Err(e) => println!("{}", e),
        },
        KeyAction::Test => {
            let (key, _) = ApiKeyManager::resolve().map_err(with_key_hint)?;
            GeminiClient::new(key)?
                .test_connection()
                .await
                .map_err(with_key_hint)
                .context("Key check failed")?;
            println!("The key works");
        }
    }
    Ok(())
}

fn print_quiz(quiz: &Quiz) {
    println!("{}\n", quiz.title());
    for (i, question) in quiz.questions().iter().enumerate() {
        println!("{}. {}", i + 1, question.prompt());
        for (o, option) in question.options().iter().enumerate() {
            let mark = if question.is_correct(o) { '*' } else { ' ' };
            println!("  {} {}) {}", mark, option_letter(o), option);
        }
        println!("     {}\n", question.explanation());
    }
}
