use async_trait::async_trait;

pub mod client;
pub mod diagnostics;
pub mod translate;

pub use client::DictClient;
pub use diagnostics::{Diagnostic, DiagnosticSink, diagnostic_channel};
pub use translate::HttpTranslator;

#[derive(Debug, thiserror::Error)]
pub enum EnrichError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("API error: {0}")]
    Api(String),

    #[error("no entry found")]
    NotFound,

    #[error("malformed response: {0}")]
    Malformed(String),
}

/// Dictionary data for one word.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WordInfo {
    pub definitions: Vec<String>,
    pub reading: String,
}

impl WordInfo {
    /// Placeholder used when lookup fails; note creation must never block on
    /// a dead dictionary service.
    pub fn degraded() -> Self {
        Self::default()
    }
}

/// Dictionary data for one kanji character.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KanjiInfo {
    pub keyword: String,
    pub readings: Vec<String>,
    pub stroke_count: Option<u32>,
    pub radicals: Vec<String>,
}

impl KanjiInfo {
    pub fn degraded() -> Self {
        Self::default()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Translation {
    pub text: String,
}

impl Translation {
    pub fn degraded() -> Self {
        Self::default()
    }
}

/// External lookup boundary. Each call may fail independently; callers
/// substitute the degraded record and report to the diagnostic sink rather
/// than aborting a batch.
#[async_trait]
pub trait Enricher: Send + Sync {
    async fn fetch_word(&self, word: &str) -> Result<WordInfo, EnrichError>;

    async fn fetch_kanji(&self, kanji: char) -> Result<KanjiInfo, EnrichError>;

    async fn fetch_translation(
        &self,
        sentence: &str,
        from: &str,
        to: &str,
    ) -> Result<Translation, EnrichError>;
}

/// Production enricher: dictionary client plus optional translator.
pub struct ServiceEnricher {
    dict: DictClient,
    translator: Option<HttpTranslator>,
}

impl ServiceEnricher {
    pub fn new(dict: DictClient, translator: Option<HttpTranslator>) -> Self {
        Self { dict, translator }
    }
}

#[async_trait]
impl Enricher for ServiceEnricher {
    async fn fetch_word(&self, word: &str) -> Result<WordInfo, EnrichError> {
        self.dict.word(word).await
    }

    async fn fetch_kanji(&self, kanji: char) -> Result<KanjiInfo, EnrichError> {
        self.dict.kanji(kanji).await
    }

    async fn fetch_translation(
        &self,
        sentence: &str,
        from: &str,
        to: &str,
    ) -> Result<Translation, EnrichError> {
        match &self.translator {
            Some(t) => t.translate(sentence, from, to).await,
            None => Err(EnrichError::Api("translation service not configured".into())),
        }
    }
}
