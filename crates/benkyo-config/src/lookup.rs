use serde::{Deserialize, Serialize};

fn default_word_api_url() -> String {
    "https://jisho.org/api/v1/search/words".to_string()
}

fn default_kanji_api_url() -> String {
    "https://kanjiapi.dev/v1/kanji".to_string()
}

#[derive(Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct LookupConfig {
    #[serde(default = "default_word_api_url")]
    pub word_api_url: String,
    #[serde(default = "default_kanji_api_url")]
    pub kanji_api_url: String,
}

impl LookupConfig {
    pub fn new() -> Self {
        let word_api_url =
            std::env::var("BENKYO_WORD_API_URL").unwrap_or_else(|_| default_word_api_url());
        let kanji_api_url =
            std::env::var("BENKYO_KANJI_API_URL").unwrap_or_else(|_| default_kanji_api_url());

        Self {
            word_api_url,
            kanji_api_url,
        }
    }
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            word_api_url: default_word_api_url(),
            kanji_api_url: default_kanji_api_url(),
        }
    }
}
