//! Command-line interface for newscast-rs
//!
//! Runs the news research tools through the same hook pipeline an agent
//! runtime would use, so source policies and audit logs can be exercised
//! from a shell.
//!
//! # Usage
//!
//! ```bash
//! export GEMINI_API_KEY="..."
//! newscast search "latest AI chip announcements" --variant podcast
//! newscast quote NVDA msft N/A
//! newscast prompt --variant podcast-es --podcaster
//! newscast render report.json --output ai_research_report
//! newscast podcast script.txt --filename episode_42
//! newscast tools --variant research-audited
//! newscast sentiment "Nvidia beats estimates" "Chip export ban widens"
//! export NEWSCAST_WHATSAPP_MCP_URL="https://mcp.zapier.com/api/mcp/s/.../mcp"
//! newscast notify "Nuevo episodio disponible"
//! ```

use anyhow::{Context as _, bail};
use async_trait::async_trait;
use clap::{Parser, Subcommand};
use newscast_core::ToolCall;
use newscast_research::api::{GeminiClient, YahooQuoteProvider};
use newscast_research::tools::{
    DEFAULT_PODCAST_FILENAME, FINANCIAL_TOOL, MARKDOWN_TOOL, PODCAST_TOOL, SEARCH_TOOL,
    SENTIMENT_TOOL, WHATSAPP_TOOL,
};
use newscast_research::{
    AgentVariant, Language, NewsReport, Providers, ResearchConfig, build_registry,
    register_notification_tools,
};
use newscast_runtime::{DispatchEventHandler, SessionStore, ToolDispatcher, ToolOutcome};
use newscast_tools::ToolRegistry;
use newscast_utils::LogFormat;
use serde_json::Value;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(name = "newscast")]
#[command(about = "AI news research tools with source policies and audit logs", long_about = None)]
struct Args {
    /// Emit logs as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Research configuration file (JSON)
    #[arg(short, long, global = true, env = "NEWSCAST_CONFIG")]
    config: Option<PathBuf>,

    /// Directory reports and audio are written to
    #[arg(short, long, global = true)]
    output_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run a web search through the variant's hook pipeline
    Search {
        /// Search query
        query: String,
        /// Agent variant whose hooks apply
        #[arg(short, long, default_value_t = AgentVariant::Podcast)]
        variant: AgentVariant,
        /// Session id that labels log lines; each run starts a fresh audit log
        #[arg(short, long)]
        session: Option<String>,
    },
    /// Fetch price and daily change for tickers
    Quote {
        /// Ticker symbols, e.g. NVDA MSFT
        #[arg(required = true)]
        tickers: Vec<String>,
    },
    /// Print a variant's system instruction
    Prompt {
        #[arg(short, long, default_value_t = AgentVariant::Podcast)]
        variant: AgentVariant,
        /// Print the podcaster sub-agent's instruction instead
        #[arg(long)]
        podcaster: bool,
    },
    /// Render a report JSON file to Markdown and save it
    Render {
        /// Path to a report in JSON form
        report: PathBuf,
        /// Output file name
        #[arg(long, default_value = "ai_research_report")]
        output: String,
        /// Report language (en, es)
        #[arg(short, long)]
        language: Option<Language>,
    },
    /// Synthesize a Joe/Jane podcast script into a WAV file
    Podcast {
        /// Path to the script text
        script: PathBuf,
        /// Output file name
        #[arg(long, default_value = DEFAULT_PODCAST_FILENAME)]
        filename: String,
        #[arg(short, long, default_value_t = AgentVariant::Podcast)]
        variant: AgentVariant,
    },
    /// List a variant's tool definitions as JSON
    ///
    /// The `whatsapp` variant connects to the notification server to list them.
    Tools {
        #[arg(short, long, default_value_t = AgentVariant::Podcast)]
        variant: AgentVariant,
    },
    /// Label headlines positive, negative or neutral
    Sentiment {
        /// Headlines to score
        #[arg(required = true)]
        headlines: Vec<String>,
    },
    /// Send a WhatsApp notification through the notification server
    Notify {
        /// Message body, sent unchanged
        message: String,
    },
}

/// Logs dispatch events
struct LoggingEventHandler;

#[async_trait]
impl DispatchEventHandler for LoggingEventHandler {
    async fn on_tool_start(&self, call: &ToolCall) {
        info!(tool_name = %call.name, arguments = %call.arguments_value(), "Tool call started");
    }

    async fn on_tool_blocked(&self, call: &ToolCall, payload: &Value) {
        warn!(tool_name = %call.name, payload = %payload, "Tool call blocked by source policy");
    }

    async fn on_tool_done(
        &self,
        name: &str,
        result: std::result::Result<&Value, &str>,
        duration_ms: u64,
    ) {
        match result {
            Ok(_) => info!(tool_name = %name, duration_ms, "Tool call finished"),
            Err(e) => warn!(tool_name = %name, duration_ms, error = %e, "Tool call failed"),
        }
    }
}

fn load_config(args: &Args) -> anyhow::Result<ResearchConfig> {
    let mut config = match &args.config {
        Some(path) => ResearchConfig::from_file(path)?,
        None => ResearchConfig::default(),
    }
    .with_env();

    if let Some(dir) = &args.output_dir {
        config.output_dir.clone_from(dir);
    }
    config.validate()?;
    Ok(config)
}

/// Providers for the tools a variant uses; Gemini only when it is needed
fn providers_for(config: &ResearchConfig, tool_names: &[&str]) -> anyhow::Result<Providers> {
    let mut providers = Providers::default();

    if tool_names.contains(&FINANCIAL_TOOL) {
        providers = providers.with_quotes(Arc::new(YahooQuoteProvider::new()));
    }

    let needs_gemini = tool_names.contains(&SEARCH_TOOL) || tool_names.contains(&PODCAST_TOOL);
    if needs_gemini {
        let gemini = Arc::new(GeminiClient::new(config)?);
        providers = providers.with_search(gemini.clone()).with_speech(gemini);
    }
    Ok(providers)
}

/// Dispatcher over `tool_names` with the variant's hooks installed
///
/// Notification tools are discovered on the configured MCP server.
async fn dispatcher_for(
    config: &ResearchConfig,
    variant: AgentVariant,
    tool_names: &[&str],
) -> anyhow::Result<ToolDispatcher> {
    let providers = providers_for(config, tool_names)?;
    let registry = build_registry(config, &providers, variant.language());
    if tool_names.contains(&WHATSAPP_TOOL) {
        register_notification_tools(config.require_notification_server()?, &registry).await?;
    }
    let registry = registry.filtered(tool_names);

    let dispatcher = ToolDispatcher::builder()
        .registry(Arc::new(registry))
        .hooks(&variant.hook_config())
        .event_handler(Arc::new(LoggingEventHandler))
        .build()?;
    Ok(dispatcher)
}

/// Dispatch one call in a session that ends with the call
async fn run_once(
    dispatcher: &ToolDispatcher,
    variant: AgentVariant,
    call: ToolCall,
    session: Option<String>,
) -> anyhow::Result<ToolOutcome> {
    let sessions = SessionStore::new().with_language(variant.language().code());
    let session_id = session.unwrap_or_else(|| uuid::Uuid::new_v4().to_string());
    let outcome = sessions.dispatch(dispatcher, &session_id, call).await?;
    sessions.end(&session_id);

    info!(
        session_id = %session_id,
        variant = %variant,
        tool_name = %outcome.tool_name,
        status = ?outcome.status,
        "Session finished"
    );
    Ok(outcome)
}

fn print_json(value: &Value) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_result(outcome: &ToolOutcome) -> anyhow::Result<()> {
    match &outcome.result {
        Value::String(text) => println!("{text}"),
        other => print_json(other)?,
    }
    if outcome.is_error() {
        bail!("{} failed", outcome.tool_name);
    }
    Ok(())
}

async fn search(
    config: &ResearchConfig,
    variant: AgentVariant,
    query: String,
    session: Option<String>,
) -> anyhow::Result<()> {
    let dispatcher = dispatcher_for(config, variant, &[SEARCH_TOOL]).await?;
    let call = ToolCall::new(SEARCH_TOOL).with_arg("query", query);
    let outcome = run_once(&dispatcher, variant, call, session).await?;

    info!(query = %outcome.arguments["query"], "Search dispatched");
    print_result(&outcome)
}

async fn quote(config: &ResearchConfig, tickers: Vec<String>) -> anyhow::Result<()> {
    let variant = AgentVariant::Research;
    let dispatcher = dispatcher_for(config, variant, &[FINANCIAL_TOOL]).await?;
    let call = ToolCall::new(FINANCIAL_TOOL).with_arg("tickers", tickers);
    let outcome = run_once(&dispatcher, variant, call, None).await?;
    print_result(&outcome)
}

fn prompt(variant: AgentVariant, podcaster: bool) -> anyhow::Result<()> {
    let instruction = if podcaster {
        variant
            .podcaster_instruction()?
            .with_context(|| format!("variant '{variant}' has no podcaster agent"))?
    } else {
        variant.instruction()?
    };

    println!("# {} ({})\n", variant.agent_name(), variant.model());
    println!("{instruction}");
    Ok(())
}

async fn render(
    config: &ResearchConfig,
    report: PathBuf,
    output: String,
    language: Option<Language>,
) -> anyhow::Result<()> {
    let raw = std::fs::read_to_string(&report)
        .with_context(|| format!("failed to read {}", report.display()))?;
    let report = NewsReport::from_json(&raw).context("invalid report JSON")?;
    let language = language.unwrap_or(config.language);
    let markdown = report.to_markdown(language);

    let variant = AgentVariant::Research;
    let dispatcher = dispatcher_for(config, variant, &[MARKDOWN_TOOL]).await?;
    let call = ToolCall::new(MARKDOWN_TOOL)
        .with_arg("filename", output)
        .with_arg("content", markdown);
    let outcome = run_once(&dispatcher, variant, call, None).await?;

    print_result(&outcome)?;
    if outcome.result["status"] != "success" {
        bail!("report was not saved");
    }
    Ok(())
}

async fn podcast(
    config: &ResearchConfig,
    script: PathBuf,
    filename: String,
    variant: AgentVariant,
) -> anyhow::Result<()> {
    if !variant.has_podcaster() {
        bail!("variant '{variant}' does not produce podcasts");
    }
    let script = std::fs::read_to_string(&script)
        .with_context(|| format!("failed to read {}", script.display()))?;

    let dispatcher = dispatcher_for(config, variant, &[PODCAST_TOOL]).await?;
    let call = ToolCall::new(PODCAST_TOOL)
        .with_arg("podcast_script", script)
        .with_arg("filename", filename);
    let outcome = run_once(&dispatcher, variant, call, None).await?;

    print_result(&outcome)?;
    if outcome.result["status"] != "success" {
        bail!("podcast audio was not generated");
    }
    Ok(())
}

async fn sentiment(config: &ResearchConfig, headlines: Vec<String>) -> anyhow::Result<()> {
    let variant = AgentVariant::ChatAssistant;
    let dispatcher = dispatcher_for(config, variant, &[SENTIMENT_TOOL]).await?;
    let call = ToolCall::new(SENTIMENT_TOOL).with_arg("headlines", headlines);
    let outcome = run_once(&dispatcher, variant, call, None).await?;
    print_result(&outcome)
}

async fn notify(config: &ResearchConfig, message: String) -> anyhow::Result<()> {
    let variant = AgentVariant::WhatsAppNotifier;
    let dispatcher = dispatcher_for(config, variant, &[WHATSAPP_TOOL]).await?;
    let call = ToolCall::new(WHATSAPP_TOOL).with_arg("instructions", message);
    let outcome = run_once(&dispatcher, variant, call, None).await?;
    print_result(&outcome)
}

async fn tools(config: &ResearchConfig, variant: AgentVariant) -> anyhow::Result<()> {
    let registry = describe_only(config, variant).await?;
    let definitions = variant.tool_registry(&registry).definitions();
    print_json(&serde_json::to_value(definitions)?)
}

/// Registry with every tool, for listing definitions
///
/// A placeholder key is used when none is configured; the tools are only
/// described, never executed. Notification tools require the server.
async fn describe_only(
    config: &ResearchConfig,
    variant: AgentVariant,
) -> anyhow::Result<ToolRegistry> {
    let mut describe_config = config.clone();
    if describe_config.gemini_api_key.is_none() {
        describe_config.gemini_api_key = Some("unset".to_string());
    }
    let gemini = Arc::new(GeminiClient::new(&describe_config)?);
    let providers = Providers::default()
        .with_search(gemini.clone())
        .with_quotes(Arc::new(YahooQuoteProvider::new()))
        .with_speech(gemini);

    let registry = build_registry(config, &providers, variant.language());
    if variant.uses_mcp() {
        register_notification_tools(config.require_notification_server()?, &registry).await?;
    }
    Ok(registry)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let format = if args.json {
        LogFormat::Json
    } else {
        LogFormat::Pretty
    };
    newscast_utils::init_tracing_with("warn,newscast=info", format);

    let config = load_config(&args)?;
    info!(output_dir = %config.output_dir.display(), "Starting newscast");

    match args.command {
        Command::Search {
            query,
            variant,
            session,
        } => search(&config, variant, query, session).await,
        Command::Quote { tickers } => quote(&config, tickers).await,
        Command::Prompt { variant, podcaster } => prompt(variant, podcaster),
        Command::Render {
            report,
            output,
            language,
        } => render(&config, report, output, language).await,
        Command::Podcast {
            script,
            filename,
            variant,
        } => podcast(&config, script, filename, variant).await,
        Command::Tools { variant } => tools(&config, variant).await,
        Command::Sentiment { headlines } => sentiment(&config, headlines).await,
        Command::Notify { message } => notify(&config, message).await,
    }
}
