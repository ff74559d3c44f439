use std::time::Duration;

use benkyo_config::lookup::LookupConfig;

use crate::{EnrichError, KanjiInfo, WordInfo};

/// Dictionary lookup client: jisho-style word search plus a per-character
/// kanji endpoint. Responses are parsed defensively; a missing field is a
/// `Malformed` error, an empty result set is `NotFound`.
#[derive(Clone)]
pub struct DictClient {
    client: reqwest::Client,
    word_api_url: String,
    kanji_api_url: String,
}

impl DictClient {
    pub fn new(config: &LookupConfig, timeout: Duration) -> Result<Self, EnrichError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            word_api_url: config.word_api_url.clone(),
            kanji_api_url: config.kanji_api_url.clone(),
        })
    }

    pub async fn word(&self, word: &str) -> Result<WordInfo, EnrichError> {
        let response = self
            .client
            .get(&self.word_api_url)
            .query(&[("keyword", word)])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(EnrichError::Api(format!("HTTP {}", response.status())));
        }

        let json: serde_json::Value = response.json().await?;
        parse_word(&json)
    }

    pub async fn kanji(&self, kanji: char) -> Result<KanjiInfo, EnrichError> {
        let url = format!("{}/{}", self.kanji_api_url, kanji);
        let response = self.client.get(&url).send().await?;

        if response.status() == 404 {
            return Err(EnrichError::NotFound);
        }
        if !response.status().is_success() {
            return Err(EnrichError::Api(format!("HTTP {}", response.status())));
        }

        let json: serde_json::Value = response.json().await?;
        parse_kanji(&json)
    }
}

fn string_array(value: &serde_json::Value) -> Vec<String> {
    value
        .as_array()
        .map(|items| {
            items
                .iter()
                .filter_map(|v| v.as_str())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

fn parse_word(json: &serde_json::Value) -> Result<WordInfo, EnrichError> {
    let entry = json["data"].get(0).ok_or(EnrichError::NotFound)?;

    let senses = entry["senses"]
        .as_array()
        .ok_or_else(|| EnrichError::Malformed("missing senses".into()))?;

    let mut definitions = Vec::new();
    for sense in senses {
        // Wikipedia senses trail the dictionary senses; stop there.
        let pos = string_array(&sense["parts_of_speech"]);
        if pos == ["Wikipedia definition"] {
            break;
        }
        definitions.extend(string_array(&sense["english_definitions"]));
    }

    let reading = entry["japanese"]
        .get(0)
        .and_then(|j| j["reading"].as_str())
        .unwrap_or_default()
        .to_string();

    Ok(WordInfo {
        definitions,
        reading,
    })
}

fn parse_kanji(json: &serde_json::Value) -> Result<KanjiInfo, EnrichError> {
    if !json.is_object() {
        return Err(EnrichError::Malformed("expected object".into()));
    }

    let keyword = string_array(&json["meanings"])
        .into_iter()
        .next()
        .unwrap_or_default();

    let mut readings = string_array(&json["kun_readings"]);
    readings.extend(string_array(&json["on_readings"]));

    let stroke_count = json["stroke_count"].as_u64().map(|n| n as u32);
    let radicals = string_array(&json["radical_parts"]);

    Ok(KanjiInfo {
        keyword,
        readings,
        stroke_count,
        radicals,
    })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn word_definitions_stop_at_wikipedia_sense() {
        let response = json!({
            "data": [{
                "japanese": [{"word": "学校", "reading": "がっこう"}],
                "senses": [
                    {"english_definitions": ["school"], "parts_of_speech": ["Noun"]},
                    {"english_definitions": ["School"], "parts_of_speech": ["Wikipedia definition"]},
                    {"english_definitions": ["ignored"], "parts_of_speech": ["Noun"]}
                ]
            }]
        });

        let info = parse_word(&response).unwrap();
        assert_eq!(info.definitions, vec!["school"]);
        assert_eq!(info.reading, "がっこう");
    }

    #[test]
    fn empty_result_set_is_not_found() {
        let response = json!({"data": []});
        assert!(matches!(parse_word(&response), Err(EnrichError::NotFound)));
    }

    #[test]
    fn kanji_fields_extracted() {
        let response = json!({
            "kanji": "学",
            "meanings": ["study", "learning"],
            "kun_readings": ["まな.ぶ"],
            "on_readings": ["ガク"],
            "stroke_count": 8
        });

        let info = parse_kanji(&response).unwrap();
        assert_eq!(info.keyword, "study");
        assert_eq!(info.readings, vec!["まな.ぶ", "ガク"]);
        assert_eq!(info.stroke_count, Some(8));
        assert!(info.radicals.is_empty());
    }
}
