use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use benkyo_config::Config;
use benkyo_core::{Corpus, ScriptBoundaryTokenizer, Tokenizer};
use benkyo_enrich::{DictClient, Enricher, HttpTranslator, ServiceEnricher};
use benkyo_ledger::Ledger;
use benkyo_notes::NoteStore;
use clap::Parser;
use tokio::signal;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

mod intake;
mod pipeline;
mod prompt;


use self::prompt::RunPlan;

/// Turn directories of Japanese text into cross-linked study notes and
/// Anki-importable CSV files.
#[derive(Parser)]
#[command(name = "benkyo")]
struct Args {
    /// Notes root directory (index files and note subdirectories)
    #[arg(long)]
    notes_root: Option<PathBuf>,
    /// Directory scanned for new .txt sources
    #[arg(long)]
    input_dir: Option<PathBuf>,
    /// Directory the CSV exports are written to
    #[arg(long)]
    csv_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let mut config = Config::new();
    if let Some(notes_root) = args.notes_root {
        config.paths.notes_root = notes_root;
    }
    if let Some(input_dir) = args.input_dir {
        config.paths.input_dir = input_dir;
    }
    if let Some(csv_dir) = args.csv_dir {
        config.paths.csv_dir = csv_dir;
    }

    let plan = {
        let stdin = std::io::stdin();
        let mut stdout = std::io::stdout();
        prompt::select_plan(&mut stdin.lock(), &mut stdout)?
    };

    let cancel = CancellationToken::new();
    let mut run_task = tokio::spawn(run(Arc::new(config), plan, cancel.clone()));

    tokio::select! {
        result = &mut run_task => result??,
        _ = signal::ctrl_c() => {
            tracing::info!("Shutdown requested");
            cancel.cancel();
            run_task.await??;
        }
    }

    Ok(())
}

async fn run(config: Arc<Config>, plan: RunPlan, cancel: CancellationToken) -> anyhow::Result<()> {
    if plan.mode.makes_notes() {
        if plan.translations && !config.translator.enabled {
            tracing::warn!(
                "translations requested but no API key configured; sentence backs will be empty"
            );
        }

        let ledger = Arc::new(Ledger::load(&config.paths).await?);
        let store = Arc::new(NoteStore::init(config.paths.clone()).await?);

        let timeout = Duration::from_secs(config.request_timeout_secs);
        let dict = DictClient::new(&config.lookup, timeout)?;
        let translator = if config.translator.enabled {
            Some(HttpTranslator::new(&config.translator, timeout)?)
        } else {
            None
        };
        let enricher: Arc<dyn Enricher> = Arc::new(ServiceEnricher::new(dict, translator));
        let tokenizer: Arc<dyn Tokenizer> = Arc::new(ScriptBoundaryTokenizer);

        let summary = pipeline::run_notes(
            Arc::clone(&config),
            ledger,
            store,
            enricher,
            tokenizer,
            plan.translations,
            cancel.clone(),
        )
        .await?;
        summary.log();
    }

    if plan.mode.makes_csvs() && !cancel.is_cancelled() {
        for corpus in Corpus::CARDS {
            benkyo_export::export_corpus(&config.paths, corpus).await?;
        }
    }

    Ok(())
}
