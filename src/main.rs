//! `gemini-utils`: list and inspect Gemini models, generate content, and
//! save responses as Markdown.
//!
//! Reads `GEMINI_API_KEY` (optionally from a `.env` file). Logs go to
//! stderr and are filtered with `RUST_LOG`; generated text goes to stdout.

#![allow(clippy::print_stdout)]

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use gemini_llm_utils::capabilities::{ContentGenerator, GenAiContentGenerator, GenAiModelGetter, GenAiModelLister};
use gemini_llm_utils::client::GeminiClient;
use gemini_llm_utils::types::{Content, GenerateContentConfig, GenerateContentResponse, Role};
use gemini_llm_utils::{credentials, directory, materialize};

const DEFAULT_MODEL: &str = "models/gemini-2.0-flash";
const DEFAULT_PROMPT: &str = "Hello, what model are you?";
const DEFAULT_GET_MODEL: &str = "models/gemini-1.5-pro";
const DEFAULT_OUTPUT: &str = "prompts/user/general-response.md";

#[derive(Parser)]
#[command(name = "gemini-utils", about = "Gemini model directory and response tools")]
#[command(version, propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output (ignored when RUST_LOG is set)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// List available models
    ListModels {
        /// Only show models supporting this action, e.g. generateContent
        #[arg(long)]
        action: Option<String>,

        /// Follow page tokens and list every model
        #[arg(long)]
        all: bool,

        /// Page size used with --all
        #[arg(long, requires = "all")]
        page_size: Option<i32>,
    },
    /// Show details of one model
    GetModel {
        /// Model name
        #[arg(default_value = DEFAULT_GET_MODEL)]
        name: String,
    },
    /// Generate content and print every part of every candidate
    Generate(GenerateArgs),
    /// Generate content and save the first candidate's text as Markdown
    SaveResponse {
        #[command(flatten)]
        generate: GenerateArgs,

        /// Output file; its directory must exist
        #[arg(long, short, default_value = DEFAULT_OUTPUT)]
        output: PathBuf,
    },
}

#[derive(Args)]
struct GenerateArgs {
    /// Model to call
    #[arg(long, default_value = DEFAULT_MODEL)]
    model: String,

    /// Prompt text
    #[arg(long, conflicts_with = "prompt_file")]
    prompt: Option<String>,

    /// Read the prompt from a file, dropping a leading Markdown header
    #[arg(long)]
    prompt_file: Option<PathBuf>,

    /// System instruction text; repeat for several parts
    #[arg(long = "system")]
    system: Vec<String>,

    /// Read an additional system instruction part from a file
    #[arg(long)]
    system_file: Option<PathBuf>,

    #[arg(long, default_value_t = 0.3)]
    temperature: f32,

    #[arg(long, default_value_t = 20)]
    top_k: i32,

    #[arg(long, default_value_t = 1.0)]
    top_p: f32,

    #[arg(long, default_value_t = 8192)]
    max_output_tokens: i32,

    #[arg(long, default_value_t = 1)]
    candidate_count: i32,

    #[arg(long, default_value_t = 5)]
    seed: i32,

    #[arg(long, default_value = "text/plain")]
    response_mime_type: String,

    #[arg(long)]
    presence_penalty: Option<f32>,

    #[arg(long)]
    frequency_penalty: Option<f32>,

    /// Stop sequence; repeat for several
    #[arg(long = "stop-sequence", default_values_t = vec!["STOP!".to_string()])]
    stop_sequences: Vec<String>,
}

impl GenerateArgs {
    fn prompt(&self) -> Result<String> {
        match (&self.prompt_file, &self.prompt) {
            (Some(path), _) => materialize::read_prompt_from_file(path)
                .with_context(|| format!("reading prompt file {}", path.display())),
            (None, Some(prompt)) => Ok(prompt.clone()),
            (None, None) => Ok(DEFAULT_PROMPT.to_string()),
        }
    }

    fn config(&self) -> Result<GenerateContentConfig> {
        let mut system = self.system.clone();
        if let Some(path) = &self.system_file {
            let text = materialize::read_text_from_file(path)
                .with_context(|| format!("reading system instruction file {}", path.display()))?;
            system.push(text);
        }

        let config = GenerateContentConfig {
            candidate_count: Some(self.candidate_count),
            max_output_tokens: Some(self.max_output_tokens),
            response_mime_type: Some(self.response_mime_type.clone()),
            seed: Some(self.seed),
            temperature: Some(self.temperature),
            top_k: Some(self.top_k),
            top_p: Some(self.top_p),
            presence_penalty: self.presence_penalty,
            frequency_penalty: self.frequency_penalty,
            stop_sequences: self.stop_sequences.clone(),
            ..Default::default()
        };

        Ok(config.with_system_text(system))
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let dotenv_error = unreadable_dotenv(dotenvy::dotenv());

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Some(e) = dotenv_error {
        tracing::warn!("ignoring .env file: {e}");
    }

    match run(cli.command).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

/// Keeps the `.env` load error unless the file is simply absent.
fn unreadable_dotenv(result: dotenvy::Result<PathBuf>) -> Option<dotenvy::Error> {
    match result {
        Ok(_) => None,
        Err(e) if e.not_found() => None,
        Err(e) => Some(e),
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(command: Commands) -> Result<()> {
    let client: Arc<dyn GeminiClient> =
        Arc::new(credentials::new_client().context("error creating client")?);

    match command {
        Commands::ListModels { action, all, page_size } => {
            list_models(client, action.as_deref(), all, page_size).await
        }
        Commands::GetModel { name } => get_model(client, &name).await,
        Commands::Generate(args) => {
            let response = generate(client, &args).await?;
            for text in materialize::response_texts(&response) {
                println!("{text}");
            }
            Ok(())
        }
        Commands::SaveResponse { generate: args, output } => {
            let response = generate(client, &args).await?;
            let contents = materialize::round_trip(&response, &output)
                .with_context(|| format!("saving response to {}", output.display()))?;
            info!(path = %output.display(), bytes = contents.len(), "Response saved");
            info!("{contents}");
            Ok(())
        }
    }
}

async fn list_models(
    client: Arc<dyn GeminiClient>,
    action: Option<&str>,
    all: bool,
    page_size: Option<i32>,
) -> Result<()> {
    let lister = GenAiModelLister::new(client);

    let models = if all {
        directory::list_all_models(&lister, page_size).await?
    } else {
        let page = directory::list_models(&lister).await?;
        if page.next_page_token.as_deref().is_some_and(|t| !t.is_empty()) {
            info!("More models are available; pass --all to list them");
        }
        page.models
    };

    let names = match action {
        Some(action) => directory::filter_models_by_action(&models, action),
        None => models.into_iter().map(|m| m.name).collect(),
    };

    for name in names {
        println!("{name}");
    }
    Ok(())
}

async fn get_model(client: Arc<dyn GeminiClient>, name: &str) -> Result<()> {
    let getter = GenAiModelGetter::new(client);
    let model = directory::models_get(&getter, name)
        .await
        .with_context(|| format!("getting model {name}"))?;

    info!(
        name = %model.name,
        display_name = model.display_name.as_deref().unwrap_or("-"),
        description = model.description.as_deref().unwrap_or("-"),
        input_token_limit = model.input_token_limit,
        output_token_limit = model.output_token_limit,
        supported_actions = ?model.supported_actions,
        version = model.version.as_deref().unwrap_or("-"),
        "Model details"
    );
    Ok(())
}

async fn generate(client: Arc<dyn GeminiClient>, args: &GenerateArgs) -> Result<GenerateContentResponse> {
    let prompt = args.prompt()?;
    let config = args.config()?;
    let generator = GenAiContentGenerator::new(client);

    generator
        .generate(&args.model, vec![Content::from_text(prompt, Role::User)], Some(config))
        .await
        .with_context(|| format!("generating content with {}", args.model))
}
