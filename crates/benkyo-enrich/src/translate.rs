use std::time::Duration;

use benkyo_config::translator::TranslatorConfig;

use crate::{EnrichError, Translation};

/// DeepL-style translation client.
#[derive(Clone)]
pub struct HttpTranslator {
    client: reqwest::Client,
    api_key: String,
    api_url: String,
}

impl HttpTranslator {
    pub fn new(config: &TranslatorConfig, timeout: Duration) -> Result<Self, EnrichError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            api_url: config.api_url.clone(),
        })
    }

    pub async fn translate(
        &self,
        text: &str,
        from: &str,
        to: &str,
    ) -> Result<Translation, EnrichError> {
        if self.api_key.is_empty() {
            return Err(EnrichError::Api("missing API key".into()));
        }

        let source = from.to_uppercase();
        let target = to.to_uppercase();
        let params = [
            ("text", text),
            ("source_lang", source.as_str()),
            ("target_lang", target.as_str()),
        ];

        let response = self
            .client
            .post(&self.api_url)
            .header("Authorization", format!("DeepL-Auth-Key {}", self.api_key))
            .form(&params)
            .send()
            .await?;

        if response.status() == 429 {
            return Err(EnrichError::Api("rate limit exceeded".into()));
        }
        if !response.status().is_success() {
            return Err(EnrichError::Api(format!("HTTP {}", response.status())));
        }

        let json: serde_json::Value = response.json().await?;
        let text = json["translations"]
            .get(0)
            .and_then(|t| t["text"].as_str())
            .ok_or_else(|| EnrichError::Malformed("no translation in response".into()))?;

        Ok(Translation {
            text: text.to_string(),
        })
    }
}
