use std::env;

use serde::{Deserialize, Serialize};

use self::lookup::LookupConfig;
use self::paths::PathsConfig;
use self::translator::TranslatorConfig;

pub mod lookup;
pub mod paths;
pub mod translator;

#[derive(Serialize, Deserialize)]
pub struct Config {
    pub paths: PathsConfig,
    pub lookup: LookupConfig,
    pub translator: TranslatorConfig,

    /// Concurrent enrichment/write workers per pipeline stage.
    pub workers: usize,
    /// Timeout applied to each external lookup call.
    pub request_timeout_secs: u64,
}

impl Config {
    pub fn new() -> Self {
        let workers = env::var("BENKYO_WORKERS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(8);

        let request_timeout_secs = env::var("BENKYO_REQUEST_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(10);

        Config {
            paths: PathsConfig::new(),
            lookup: LookupConfig::new(),
            translator: TranslatorConfig::new(),

            workers,
            request_timeout_secs,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
