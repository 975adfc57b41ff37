//! CLI entrypoint for consilium
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, bail};
use clap::Parser;
use consilium_application::{AdvisoryService, ClarifyInput, ContextProvider, SessionStore};
use consilium_domain::{Agenda, RoundRequest};
use consilium_infrastructure::{
    ConfigLoader, FileConfig, FsSessionStore, HttpModelInvoker, PubMedHighlights,
    WebSearchHighlights,
};
use consilium_presentation::{Cli, ConsoleFormatter, OutputFormat, ProgressReporter};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity level
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    info!("Starting consilium");

    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref()).context("failed to load configuration")?
    };
    config.validate().context("invalid configuration")?;

    let store: Arc<FsSessionStore> = Arc::new(
        FsSessionStore::new(&config.store.dir).with_retention(config.limits.retention),
    );

    // Session inspection commands need no model endpoint
    if cli.list_sessions {
        for name in store.list().await? {
            println!("{name}");
        }
        return Ok(());
    }
    if let Some(name) = &cli.session {
        return show_session(&store, name).await;
    }

    let Some(agenda_text) = cli.agenda.clone() else {
        bail!("A case description is required. See --help for usage.");
    };

    // === Dependency Injection ===
    let invoker = Arc::new(
        HttpModelInvoker::new(config.invoker.to_http_config())
            .context("failed to construct model invoker")?,
    );
    let service = AdvisoryService::new(invoker, config.limits.to_service_limits())
        .with_session_store(Arc::clone(&store) as Arc<dyn SessionStore>);

    let model = cli
        .model
        .clone()
        .unwrap_or_else(|| config.invoker.default_model.clone());

    // Clarifying-questions mode
    if cli.questions {
        let input = ClarifyInput::new(agenda_text, cli.count, &model, &config.panel.category);
        let questions = service
            .clarifying_questions(input, &cli.identity, !cli.no_cache)
            .await?;
        println!("{}", ConsoleFormatter::format_questions(&questions));
        return Ok(());
    }

    // Round mode: gather contexts, build the request, execute
    let contexts = gather_contexts(&cli, &config, &agenda_text).await?;

    let roster = config.panel.to_roster(&model)?;
    let request = RoundRequest::new(Agenda::new(agenda_text)?, roster)
        .with_questions(config.panel.questions.clone())
        .with_rules(config.panel.rules.clone())
        .with_contexts(contexts)
        .with_round_count(cli.rounds.unwrap_or(config.limits.round_count))?;

    if !cli.quiet {
        println!();
        println!(
            "Panel: {} advisors, lead {}",
            request.roster.member_count(),
            request.roster.lead.title
        );
        println!("Model: {model}");
        println!();
    }

    let result = if cli.quiet {
        service
            .run_round_quiet(request, &cli.identity, !cli.no_cache)
            .await?
    } else {
        let progress = ProgressReporter::new();
        service
            .run_round(request, &cli.identity, !cli.no_cache, &progress)
            .await?
    };

    let output = match cli.output {
        OutputFormat::Full => ConsoleFormatter::format(&result),
        OutputFormat::Summary => ConsoleFormatter::format_summary_only(&result),
        OutputFormat::Json => ConsoleFormatter::format_json(&result),
    };
    println!("{output}");

    Ok(())
}

/// Print a stored session: the transcript when present, otherwise the raw record.
async fn show_session(store: &FsSessionStore, name: &str) -> Result<()> {
    match store.load(name).await? {
        Some(session) => {
            if let Some(document) = session.document {
                println!("{document}");
            } else if let Some(record) = session.record {
                println!("{}", ConsoleFormatter::format_json(&record));
            }
            Ok(())
        }
        None => bail!("session {name} not found"),
    }
}

/// Collect context blocks: file-based blocks first, then the configured
/// enrichment providers. Provider failures contribute nothing.
async fn gather_contexts(cli: &Cli, config: &FileConfig, agenda: &str) -> Result<Vec<String>> {
    let mut contexts = Vec::new();

    for path in &cli.context_file {
        let block = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("failed to read context file {}", path.display()))?;
        contexts.push(block);
    }

    if cli.no_context {
        return Ok(contexts);
    }

    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(30))
        .build()
        .context("failed to construct HTTP client")?;

    let mut providers: Vec<Box<dyn ContextProvider>> = Vec::new();
    if config.context.web_search {
        providers.push(Box::new(
            WebSearchHighlights::new(client.clone()).with_max_topics(config.context.max_results),
        ));
    }
    if config.context.pubmed {
        providers.push(Box::new(
            PubMedHighlights::new(client).with_max_results(config.context.max_results),
        ));
    }

    for provider in &providers {
        let block = provider.gather(agenda, &config.panel.category).await;
        if block.is_empty() {
            debug!("Provider {} contributed nothing", provider.name());
        } else {
            info!("Provider {} contributed {} bytes", provider.name(), block.len());
            contexts.push(block);
        }
    }

    Ok(contexts)
}
