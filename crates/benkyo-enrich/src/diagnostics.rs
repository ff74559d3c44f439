use benkyo_core::Corpus;
use kanal::{AsyncReceiver, AsyncSender};

/// One recovered per-item failure, reported out of band so a dead lookup
/// service never interrupts a batch. Collected and summarized at end of run.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    pub corpus: Corpus,
    pub title: String,
    pub reason: String,
}

impl Diagnostic {
    pub fn new(corpus: Corpus, title: impl Into<String>, reason: impl ToString) -> Self {
        Self {
            corpus,
            title: title.into(),
            reason: reason.to_string(),
        }
    }
}

pub type DiagnosticSink = AsyncSender<Diagnostic>;

pub fn diagnostic_channel() -> (DiagnosticSink, AsyncReceiver<Diagnostic>) {
    kanal::bounded_async(256)
}
