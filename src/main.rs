//! Vivavoce - AI-Driven Spoken Interview Engine
//!
//! Console demo: each line you type is treated as one recognized
//! utterance; the agent replies in turn and a full scored report prints
//! when stdin closes.

use anyhow::Result;
use clap::Parser;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;
use vivavoce::asr::StdinSource;
use vivavoce::config::Config;
use vivavoce::emotion::{EmotionSource, ScriptedEmotionFeed};
use vivavoce::engine::InterviewEngine;
use vivavoce::oracle::{OllamaOracle, ReplyOracle, ScriptedOracle};
use vivavoce::report::{ReportRenderer, TextReport};
use vivavoce::tts::{ConsoleSink, SpeechSink};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Role the candidate is interviewed for
    #[arg(short, long)]
    role: Option<String>,

    /// Generate replies through a local Ollama instance
    #[arg(long)]
    ollama: bool,

    /// Feed a synthetic emotion stream alongside the conversation
    #[arg(long)]
    emotions: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Setup logging
    let level = if args.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("🎓 Vivavoce v{} starting...", env!("CARGO_PKG_VERSION"));

    let mut config = Config::load()?;
    if let Some(role) = args.role {
        config.role = role;
    }
    if args.ollama {
        config.ollama_enabled = true;
    }

    // Pick the reply oracle
    let oracle: Arc<dyn ReplyOracle> = if config.ollama_enabled {
        let ollama = OllamaOracle::new(&config);
        if ollama.health_check().await {
            info!("🧠 Using Ollama reply oracle ({})", config.ollama_model);
            Arc::new(ollama)
        } else {
            warn!("Ollama unreachable at {}, using scripted oracle", config.ollama_url);
            Arc::new(ScriptedOracle::for_role(&config.role))
        }
    } else {
        Arc::new(ScriptedOracle::for_role(&config.role))
    };

    let (tx, rx) = tokio::sync::mpsc::unbounded_channel();
    let source = Arc::new(StdinSource::spawn(tx.clone()));
    let sink = Arc::new(ConsoleSink::new());

    let engine = InterviewEngine::new(&config, source, sink.clone(), oracle, tx.clone());
    let handle = engine.handle();

    if args.emotions {
        let feed = ScriptedEmotionFeed::new(
            vec![
                ("neutral".to_string(), 0.6),
                ("calm".to_string(), 0.7),
                ("happy".to_string(), 0.8),
                ("calm".to_string(), 0.75),
            ],
            Duration::from_secs(10),
            tx.clone(),
        );
        feed.start().await?;
    }

    // Periodic live score, demonstrating non-blocking scoring
    {
        let handle = handle.clone();
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(Duration::from_secs(15));
            ticker.tick().await; // first tick is immediate
            loop {
                ticker.tick().await;
                if let Ok(snapshot) = handle.snapshot() {
                    if snapshot.overall > 0 {
                        info!("📊 Live score: {}/100", snapshot.overall);
                    }
                }
            }
        });
    }

    sink.speak(&format!(
        "Welcome. This will be a short {} interview. Tell me about yourself.",
        config.role
    ))
    .await?;
    info!("✅ Listening - answer in the console, Ctrl-D to finish");

    // Runs until stdin closes or an external stop arrives
    engine.run(rx).await;

    let snapshot = handle.snapshot()?;
    let session = handle.session();
    let session = session.lock().map_err(|e| anyhow::anyhow!("{}", e))?;
    println!("{}", TextReport.render(&snapshot, &session));

    Ok(())
}
