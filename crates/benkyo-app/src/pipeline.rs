use std::collections::HashSet;
use std::sync::Arc;

use benkyo_config::Config;
use benkyo_core::{Corpus, SourceBatch, Tokenizer};
use benkyo_enrich::{
    Diagnostic, DiagnosticSink, Enricher, KanjiInfo, Translation, WordInfo, diagnostic_channel,
};
use benkyo_ledger::{Ledger, LedgerError, Partition, Seen, partition};
use benkyo_notes::{NoteError, NoteStore, TagOutcome, compose};
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

use crate::intake;

#[derive(Debug, Default)]
pub struct RunSummary {
    pub batches: usize,
    pub created: usize,
    pub tagged: usize,
    pub degraded: usize,
    pub failures: Vec<String>,
}

impl RunSummary {
    pub fn log(&self) {
        tracing::info!(
            batches = self.batches,
            created = self.created,
            tagged = self.tagged,
            degraded = self.degraded,
            failed = self.failures.len(),
            "run complete"
        );
        for failure in &self.failures {
            tracing::error!("{failure}");
        }
    }
}

enum Outcome {
    Created,
    Tagged,
    AlreadyTagged,
}

/// Ingest every batch in the input directory: segment, dedup against the
/// ledger, enrich and write new notes, append tags on known ones.
pub async fn run_notes(
    config: Arc<Config>,
    ledger: Arc<Ledger>,
    store: Arc<NoteStore>,
    enricher: Arc<dyn Enricher>,
    tokenizer: Arc<dyn Tokenizer>,
    translations: bool,
    cancel: CancellationToken,
) -> anyhow::Result<RunSummary> {
    let batches = intake::load_batches(&config.paths.input_dir).await?;
    if batches.is_empty() {
        tracing::info!(
            "no new sources; place .txt files in {:?} to begin",
            config.paths.input_dir
        );
        return Ok(RunSummary::default());
    }

    let (sink, diag_rx) = diagnostic_channel();
    let collector = tokio::spawn(async move {
        let mut all = Vec::new();
        while let Ok(diagnostic) = diag_rx.recv().await {
            all.push(diagnostic);
        }
        all
    });

    let pipeline = Pipeline {
        config,
        ledger: Arc::clone(&ledger),
        store,
        enricher,
        tokenizer,
        sink,
        translations,
    };

    let mut summary = RunSummary::default();
    for batch in batches {
        if cancel.is_cancelled() {
            tracing::warn!("cancelled; stopping before next batch");
            break;
        }
        pipeline.process_batch(&batch, &mut summary).await;
        summary.batches += 1;
    }

    // The run itself already completed; a sync failure joins the summary.
    if let Err(e) = ledger.flush().await {
        tracing::error!(error = %e, "ledger index sync failed");
        summary.failures.push(format!("ledger sync failed: {e}"));
    }

    // All sink clones live in pipeline tasks, which are joined by now.
    drop(pipeline);
    let diagnostics = collector.await.unwrap_or_default();
    summary.degraded = diagnostics.len();
    for d in &diagnostics {
        tracing::warn!(corpus = %d.corpus, title = %d.title, reason = %d.reason, "degraded enrichment");
    }

    Ok(summary)
}

struct Pipeline {
    config: Arc<Config>,
    ledger: Arc<Ledger>,
    store: Arc<NoteStore>,
    enricher: Arc<dyn Enricher>,
    tokenizer: Arc<dyn Tokenizer>,
    sink: DiagnosticSink,
    translations: bool,
}

impl Pipeline {
    /// One batch, four corpora. A ledger failure aborts the affected corpus
    /// only; the other corpora still run.
    async fn process_batch(&self, batch: &SourceBatch, summary: &mut RunSummary) {
        tracing::info!(source = %batch.name, sentences = batch.sentences.len(), "processing batch");

        self.content_stage(batch, summary).await;

        // Snapshot before this batch records anything: "known" means known
        // from prior runs.
        let known_kanji: HashSet<char> = self
            .ledger
            .known_titles(Corpus::Kanji)
            .await
            .iter()
            .filter_map(|t| t.chars().next())
            .collect();
        let known_kanji = Arc::new(known_kanji);

        match partition(&self.ledger, Corpus::Sentence, batch.sentences.clone()).await {
            Ok(part) => self.sentence_stage(batch, part, summary).await,
            Err(e) => stage_aborted(summary, Corpus::Sentence, e),
        }

        let words = batch.word_candidates(self.tokenizer.as_ref(), &known_kanji);
        match partition(&self.ledger, Corpus::Word, words).await {
            Ok(part) => {
                self.word_stage(batch, part, Arc::clone(&known_kanji), summary)
                    .await
            }
            Err(e) => stage_aborted(summary, Corpus::Word, e),
        }

        let kanji: Vec<String> = batch
            .kanji_candidates()
            .into_iter()
            .map(|c| c.to_string())
            .collect();
        match partition(&self.ledger, Corpus::Kanji, kanji).await {
            Ok(part) => self.kanji_stage(batch, part, summary).await,
            Err(e) => stage_aborted(summary, Corpus::Kanji, e),
        }
    }

    /// Content artifacts carry no tag line, so a re-ingested source needs no
    /// update pass; it only stops being treated as new.
    async fn content_stage(&self, batch: &SourceBatch, summary: &mut RunSummary) {
        match self
            .ledger
            .check_and_record(Corpus::Content, &batch.name)
            .await
        {
            Ok(Seen::New) => match self.store.write_content(&batch.name, &batch.sentences).await {
                Ok(()) => summary.created += 1,
                Err(e) => {
                    tracing::error!(source = %batch.name, error = %e, "content artifact failed");
                    summary.failures.push(e.to_string());
                }
            },
            Ok(Seen::Existing) => {
                tracing::info!(source = %batch.name, "source already ingested; tag updates only");
            }
            Err(e) => stage_aborted(summary, Corpus::Content, e),
        }
    }

    async fn sentence_stage(
        &self,
        batch: &SourceBatch,
        part: Partition,
        summary: &mut RunSummary,
    ) {
        let semaphore = Arc::new(Semaphore::new(self.config.workers));
        let mut tasks: JoinSet<Result<Outcome, NoteError>> = JoinSet::new();

        for title in part.new {
            let semaphore = Arc::clone(&semaphore);
            let enricher = Arc::clone(&self.enricher);
            let tokenizer = Arc::clone(&self.tokenizer);
            let store = Arc::clone(&self.store);
            let sink = self.sink.clone();
            let tag = batch.name.clone();
            let translations = self.translations;
            let from = self.config.translator.from_lang.clone();
            let to = self.config.translator.to_lang.clone();

            tasks.spawn(async move {
                let _permit = semaphore.acquire_owned().await.expect("semaphore closed");

                let translation = if translations {
                    match enricher.fetch_translation(&title, &from, &to).await {
                        Ok(t) => t,
                        Err(e) => {
                            tracing::warn!(sentence = %title, error = %e, "translation failed");
                            let _ = sink
                                .send(Diagnostic::new(Corpus::Sentence, &*title, &e))
                                .await;
                            Translation::degraded()
                        }
                    }
                } else {
                    Translation::degraded()
                };

                let tokens = tokenizer.tokenize(&title);
                let record = compose::sentence_note(&tokens, &translation, &tag);
                store
                    .create(Corpus::Sentence, &title, &record)
                    .await
                    .map(|()| Outcome::Created)
            });
        }

        self.spawn_tag_updates(&mut tasks, Corpus::Sentence, part.existing, &batch.name);
        drain(&mut tasks, summary).await;
    }

    async fn word_stage(
        &self,
        batch: &SourceBatch,
        part: Partition,
        known_kanji: Arc<HashSet<char>>,
        summary: &mut RunSummary,
    ) {
        let semaphore = Arc::new(Semaphore::new(self.config.workers));
        let mut tasks: JoinSet<Result<Outcome, NoteError>> = JoinSet::new();

        for title in part.new {
            let semaphore = Arc::clone(&semaphore);
            let enricher = Arc::clone(&self.enricher);
            let store = Arc::clone(&self.store);
            let sink = self.sink.clone();
            let tag = batch.name.clone();
            let known_kanji = Arc::clone(&known_kanji);

            tasks.spawn(async move {
                let _permit = semaphore.acquire_owned().await.expect("semaphore closed");

                let info = match enricher.fetch_word(&title).await {
                    Ok(info) => info,
                    Err(e) => {
                        tracing::warn!(word = %title, error = %e, "word lookup failed");
                        let _ = sink.send(Diagnostic::new(Corpus::Word, &*title, &e)).await;
                        WordInfo::degraded()
                    }
                };

                let record = compose::word_note(&title, &info, &known_kanji, &tag);
                store
                    .create(Corpus::Word, &title, &record)
                    .await
                    .map(|()| Outcome::Created)
            });
        }

        self.spawn_tag_updates(&mut tasks, Corpus::Word, part.existing, &batch.name);
        drain(&mut tasks, summary).await;
    }

    async fn kanji_stage(&self, batch: &SourceBatch, part: Partition, summary: &mut RunSummary) {
        let semaphore = Arc::new(Semaphore::new(self.config.workers));
        let mut tasks: JoinSet<Result<Outcome, NoteError>> = JoinSet::new();

        for title in part.new {
            let Some(kanji) = title.chars().next() else {
                continue;
            };
            let semaphore = Arc::clone(&semaphore);
            let enricher = Arc::clone(&self.enricher);
            let store = Arc::clone(&self.store);
            let sink = self.sink.clone();
            let tag = batch.name.clone();

            tasks.spawn(async move {
                let _permit = semaphore.acquire_owned().await.expect("semaphore closed");

                let info = match enricher.fetch_kanji(kanji).await {
                    Ok(info) => info,
                    Err(e) => {
                        tracing::warn!(%kanji, error = %e, "kanji lookup failed");
                        let _ = sink.send(Diagnostic::new(Corpus::Kanji, &*title, &e)).await;
                        KanjiInfo::degraded()
                    }
                };

                let record = compose::kanji_note(kanji, &info, &tag);
                store
                    .create(Corpus::Kanji, &title, &record)
                    .await
                    .map(|()| Outcome::Created)
            });
        }

        self.spawn_tag_updates(&mut tasks, Corpus::Kanji, part.existing, &batch.name);
        drain(&mut tasks, summary).await;
    }

    fn spawn_tag_updates(
        &self,
        tasks: &mut JoinSet<Result<Outcome, NoteError>>,
        corpus: Corpus,
        existing: Vec<String>,
        tag: &str,
    ) {
        for title in existing {
            let store = Arc::clone(&self.store);
            let tag = tag.to_string();
            tasks.spawn(async move {
                store.append_tag(corpus, &title, &tag).await.map(|outcome| {
                    match outcome {
                        TagOutcome::Appended => Outcome::Tagged,
                        TagOutcome::AlreadyTagged => Outcome::AlreadyTagged,
                    }
                })
            });
        }
    }
}

fn stage_aborted(summary: &mut RunSummary, corpus: Corpus, error: LedgerError) {
    tracing::error!(%corpus, %error, "ledger unavailable; aborting corpus for this batch");
    summary
        .failures
        .push(format!("{corpus} stage aborted: {error}"));
}

async fn drain(tasks: &mut JoinSet<Result<Outcome, NoteError>>, summary: &mut RunSummary) {
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok(Ok(Outcome::Created)) => summary.created += 1,
            Ok(Ok(Outcome::Tagged)) => summary.tagged += 1,
            Ok(Ok(Outcome::AlreadyTagged)) => {}
            Ok(Err(e)) => {
                tracing::error!(error = %e, "note operation failed");
                summary.failures.push(e.to_string());
            }
            Err(e) => summary.failures.push(format!("worker panicked: {e}")),
        }
    }
}
