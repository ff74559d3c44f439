pub mod batch;
pub mod corpus;
pub mod kanji;
pub mod preprocess;
pub mod segment;
pub mod tokenizer;

pub use batch::SourceBatch;
pub use corpus::Corpus;
pub use tokenizer::{ScriptBoundaryTokenizer, Tokenizer, WhitespaceTokenizer};
