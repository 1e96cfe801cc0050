use anyhow::Context;
use clap::Parser;
use lectern::{
    ChatProvider, Config, DocumentSplitter, EmbeddingProvider, MemoryVectorIndex, Message,
    PdfLoader, QaPipeline, SamplingConfig,
};
use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Ask questions about a PDF document.
#[derive(Parser, Debug)]
#[command(name = "lectern", version, about)]
struct Cli {
    /// Path to the PDF document to ingest
    #[arg(long)]
    pdf: PathBuf,

    /// Question to ask; omit with --interactive for a chat session
    question: Option<String>,

    /// Start an interactive session that keeps conversation history
    #[arg(long)]
    interactive: bool,

    /// Print the retrieved context instead of generating an answer
    #[arg(long)]
    context_only: bool,

    /// Emit the full query outcome as JSON
    #[arg(long)]
    json: bool,

    /// Approximate chunk size in characters
    #[arg(long)]
    chunk_size: Option<usize>,

    /// Approximate overlap between chunks in characters
    #[arg(long)]
    chunk_overlap: Option<usize>,

    /// Number of chunks to retrieve per question
    #[arg(long)]
    top_k: Option<usize>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lectern=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let mut config = Config::from_env().context("loading configuration")?;
    if let Some(chunk_size) = cli.chunk_size {
        config.rag.chunk_size = chunk_size;
    }
    if let Some(chunk_overlap) = cli.chunk_overlap {
        config.rag.chunk_overlap = chunk_overlap;
    }
    if let Some(top_k) = cli.top_k {
        config.rag.top_k = top_k;
    }

    // Ingest the document once, up front
    let splitter = DocumentSplitter::new(config.rag.chunk_size, config.rag.chunk_overlap)?;
    let chunks = PdfLoader::load_and_split(&cli.pdf, &splitter)?;
    info!(chunks = chunks.len(), pdf = %cli.pdf.display(), "loaded and split document");

    let embedder = EmbeddingProvider::from_config(&config)?.create_embedder()?;
    let index = MemoryVectorIndex::build(embedder.as_ref(), chunks).await?;

    let chat_provider = ChatProvider::from_config(&config)?;
    info!(provider = chat_provider.name(), model = %config.llm.chat_model, "chat provider ready");
    let chat = chat_provider.create_client().await?;

    let pipeline = QaPipeline::new(
        chat,
        embedder,
        SamplingConfig {
            temperature: config.llm.temperature,
        },
        config.rag.top_k,
        Duration::from_secs(config.llm.request_timeout_secs),
    );

    if cli.interactive {
        run_interactive(&pipeline, &index, cli.context_only, cli.json).await
    } else {
        let question = cli
            .question
            .context("provide a question, or pass --interactive")?;
        answer_one(&pipeline, &index, &[], &question, cli.context_only, cli.json).await?;
        Ok(())
    }
}

async fn answer_one(
    pipeline: &QaPipeline,
    index: &MemoryVectorIndex,
    history: &[Message],
    question: &str,
    context_only: bool,
    json: bool,
) -> anyhow::Result<Option<String>> {
    let outcome = if context_only {
        pipeline.contextualize(index, history, question).await?
    } else {
        pipeline.ask(index, history, question).await?
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else if context_only {
        println!("{}", outcome.context);
    } else {
        println!("{}", outcome.answer.clone().unwrap_or_default());
    }

    Ok(outcome.answer)
}

async fn run_interactive(
    pipeline: &QaPipeline,
    index: &MemoryVectorIndex,
    context_only: bool,
    json: bool,
) -> anyhow::Result<()> {
    let stdin = std::io::stdin();
    let mut history: Vec<Message> = Vec::new();

    println!("Ask questions about the document. Type 'exit' to quit.");
    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let question = line.trim();
        if question.is_empty() {
            continue;
        }
        if question.eq_ignore_ascii_case("exit") || question.eq_ignore_ascii_case("quit") {
            break;
        }

        match answer_one(pipeline, index, &history, question, context_only, json).await {
            Ok(Some(answer)) => {
                history.push(Message::human(question));
                history.push(Message::assistant(answer));
            }
            Ok(None) => {}
            Err(e) => eprintln!("error: {e}"),
        }
    }

    Ok(())
}
