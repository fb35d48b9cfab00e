mod http;

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use charla_cache::FsCacheStore;
use charla_conversation::{AudioSource, Pipeline, report};
use charla_deck::{DeckConfig, DeckEvent, DeckRuntime, DeckSession};
use charla_oracle::SlidesClient;
use charla_transcript::Language;
use clap::{Parser, Subcommand};

use crate::http::ReqwestClient;

#[derive(Parser)]
#[command(name = "charla", about = "Conversation analysis and live slide decks from speech")]
struct Cli {
    #[arg(long, env = "CHARLA_BASE_URL")]
    base_url: String,

    #[arg(long, env = "CHARLA_API_KEY", default_value = "")]
    api_key: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Transcribe and analyze a recorded conversation, printing a markdown report
    Analyze {
        /// Local audio file
        #[arg(long, conflicts_with = "url")]
        file: Option<PathBuf>,

        /// Remotely hosted audio
        #[arg(long)]
        url: Option<String>,

        #[arg(long, env = "CHARLA_LANGUAGE", default_value = "en")]
        language: String,

        /// Drop cached artifacts for this source before running
        #[arg(long)]
        redo: bool,

        /// Write the report here instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,

        /// Cache directory (defaults to the platform user data dir)
        #[arg(long)]
        cache_dir: Option<PathBuf>,

        /// Analysis model override
        #[arg(long)]
        model: Option<String>,
    },
    /// Replay a talk script word-by-word into a live slide deck
    Slides {
        /// Text file, paragraphs separated by blank lines
        script: PathBuf,

        /// Slides model override
        #[arg(long)]
        model: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let client = ReqwestClient::new(&cli.base_url, &cli.api_key);

    match cli.command {
        Command::Analyze {
            file,
            url,
            language,
            redo,
            output,
            cache_dir,
            model,
        } => {
            let language = language.parse::<Language>()?;
            let store = match cache_dir {
                Some(dir) => FsCacheStore::new(dir),
                None => FsCacheStore::in_user_data_dir()?,
            };

            let mut pipeline = Pipeline::new(store, client);
            if let Some(model) = model {
                pipeline = pipeline.with_analysis_model(model);
            }

            let (source_name, audio) = match (file, url) {
                (Some(path), _) => {
                    let name = path
                        .file_name()
                        .map(|n| n.to_string_lossy().into_owned())
                        .unwrap_or_else(|| "recording".to_string());
                    let bytes = std::fs::read(&path)?;
                    let mime = mime_for(&path).to_string();
                    (name, AudioSource::File { bytes, mime })
                }
                (None, Some(url)) => (
                    url.rsplit('/')
                        .next()
                        .and_then(|segment| segment.split('?').next())
                        .filter(|segment| !segment.is_empty())
                        .unwrap_or("recording")
                        .to_string(),
                    AudioSource::RemoteUrl(url),
                ),
                (None, None) => return Err("pass --file or --url".into()),
            };

            if redo {
                pipeline.redo(&source_name, language)?;
            }

            let view = pipeline.analyze(&source_name, language, audio).await?;
            tracing::info!(
                transcript_cached = view.cache_hit.transcript,
                analysis_cached = view.cache_hit.analysis,
                "analysis ready"
            );

            let meta = report::ReportMeta {
                source_name: &source_name,
                date: &chrono::Local::now().format("%d/%m/%Y").to_string(),
            };
            let markdown = report::render(&view, &meta, language);
            match output {
                Some(path) => std::fs::write(path, markdown)?,
                None => println!("{markdown}"),
            }
        }

        Command::Slides { script, model } => {
            let text = std::fs::read_to_string(&script)?;

            let mut slides = SlidesClient::new(client);
            if let Some(model) = model {
                slides = slides.with_model(model);
            }

            let session_id = uuid::Uuid::new_v4().to_string();
            let session = DeckSession::new(
                session_id,
                DeckConfig::default(),
                Arc::new(slides),
                Arc::new(LogRuntime),
            );

            let (tx, rx) = tokio::sync::mpsc::channel(64);
            let handle = tokio::spawn(session.run(rx));

            // Word pacing mirrors live dictation: a word every 100 ms, a
            // longer breath between paragraphs.
            for paragraph in text.split("\n\n").filter(|p| !p.trim().is_empty()) {
                for word in paragraph.split_whitespace() {
                    if tx.send(word.to_string()).await.is_err() {
                        break;
                    }
                    tokio::time::sleep(Duration::from_millis(100)).await;
                }
                tokio::time::sleep(Duration::from_millis(3200)).await;
            }
            drop(tx);

            let deck = handle.await?;
            println!("{}", serde_json::to_string_pretty(&deck)?);
        }
    }

    Ok(())
}

struct LogRuntime;

impl DeckRuntime for LogRuntime {
    fn emit(&self, event: DeckEvent) {
        match event {
            DeckEvent::StatusChanged { status, .. } => {
                tracing::info!(?status, "deck status");
            }
            DeckEvent::DeckUpdated { deck, .. } => {
                tracing::info!(
                    title = %deck.deck_title,
                    slides = deck.slides.len(),
                    "deck updated"
                );
            }
            DeckEvent::Failed { error, .. } => {
                tracing::warn!(%error, "deck update failed");
            }
        }
    }
}

fn mime_for(path: &Path) -> &'static str {
    match path
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or("")
        .to_ascii_lowercase()
        .as_str()
    {
        "wav" => "audio/wav",
        "mp3" => "audio/mpeg",
        "ogg" => "audio/ogg",
        "flac" => "audio/flac",
        "m4a" => "audio/mp4",
        "webm" => "audio/webm",
        "aac" => "audio/aac",
        _ => "application/octet-stream",
    }
}
