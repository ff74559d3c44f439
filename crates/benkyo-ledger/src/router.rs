use benkyo_core::Corpus;

use crate::{Ledger, LedgerError, Seen};

/// Result of routing one corpus's candidates: `new` titles were recorded in
/// the ledger as a side effect and flow to note creation; `existing` titles
/// flow to tag appension.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Partition {
    pub new: Vec<String>,
    pub existing: Vec<String>,
}

/// Classify a batch's deduplicated candidates in input order. New titles are
/// recorded immediately, so a title appearing in two batches of the same run
/// is new exactly once. Any ledger I/O error aborts the whole corpus: a
/// partial classification would either duplicate notes or drop content.
pub async fn partition(
    ledger: &Ledger,
    corpus: Corpus,
    candidates: Vec<String>,
) -> Result<Partition, LedgerError> {
    let mut result = Partition::default();
    for title in candidates {
        match ledger.check_and_record(corpus, &title).await? {
            Seen::New => result.new.push(title),
            Seen::Existing => result.existing.push(title),
        }
    }
    tracing::debug!(
        %corpus,
        new = result.new.len(),
        existing = result.existing.len(),
        "candidates partitioned"
    );
    Ok(result)
}
