//! SuttaCentral bilara segments.

use std::collections::HashMap;

use serde::Deserialize;
use url::Url;

use super::{endpoint, Passage, TextQuery};
use crate::types::TextsResult;

const SUTTACENTRAL_LICENSE: &str = "CC0 1.0 Universal (SuttaCentral)";

/// Default translator per language on SuttaCentral.
fn translator_for(lang: &str) -> &'static str {
    match lang {
        "de" => "sabbamitta",
        _ => "sujato",
    }
}

/// `MN 1` and `mn1` both name the same sutta uid.
fn sutta_uid(reference: &str) -> String {
    reference
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_ascii_lowercase()
}

pub(super) fn suttacentral_url(base_url: &str, query: &TextQuery) -> TextsResult<Url> {
    let lang = query.translation.to_ascii_lowercase();
    let uid = sutta_uid(&query.reference);
    let mut url = endpoint(
        base_url,
        &["api", "bilarasuttas", uid.as_str(), translator_for(&lang)],
    )?;
    url.query_pairs_mut().append_pair("lang", &lang);
    Ok(url)
}

#[derive(Debug, Deserialize)]
pub(super) struct BilaraResponse {
    #[serde(default)]
    root_text: HashMap<String, String>,
    #[serde(default)]
    translation_text: HashMap<String, String>,
    #[serde(default)]
    keys_order: Vec<String>,
}

pub(super) fn format_suttacentral(resp: BilaraResponse, query: &TextQuery) -> TextsResult<Passage> {
    let keys = if resp.keys_order.is_empty() {
        let mut keys: Vec<String> = resp.root_text.keys().cloned().collect();
        keys.sort();
        keys
    } else {
        resp.keys_order
    };

    let lang = query.translation.to_ascii_lowercase();
    Ok(Passage {
        original_text: join_segments(&keys, &resp.root_text),
        translation: join_segments(&keys, &resp.translation_text),
        transliteration: None,
        language: "pli".to_string(),
        translation_id: format!("{lang}/{}", translator_for(&lang)),
        copyright: Some(SUTTACENTRAL_LICENSE.to_string()),
    })
}

fn join_segments(keys: &[String], segments: &HashMap<String, String>) -> String {
    keys.iter()
        .filter_map(|k| segments.get(k))
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::ProviderKind;
    use crate::types::Tradition;

    fn query(reference: &str) -> TextQuery {
        TextQuery::new(Tradition::Buddhist, reference, None)
    }

    #[test]
    fn test_suttacentral_url() {
        let url = ProviderKind::SuttaCentral
            .build_url("https://suttacentral.net", &query("MN 1"))
            .unwrap();
        assert_eq!(
            url,
            "https://suttacentral.net/api/bilarasuttas/mn1/sujato?lang=en"
        );
    }

    #[test]
    fn test_format_follows_keys_order() {
        let body = r#"{
            "root_text": {"mn1:1.2": "ekaṁ samayaṁ ", "mn1:1.1": "Evaṁ me sutaṁ—"},
            "translation_text": {"mn1:1.2": "At one time ", "mn1:1.1": "So I have heard. "},
            "keys_order": ["mn1:1.1", "mn1:1.2"]
        }"#;
        let passage = ProviderKind::SuttaCentral.format(body, &query("mn1")).unwrap();
        assert_eq!(passage.original_text, "Evaṁ me sutaṁ— ekaṁ samayaṁ");
        assert_eq!(passage.translation, "So I have heard. At one time");
        assert_eq!(passage.translation_id, "en/sujato");
    }

    #[test]
    fn test_format_without_segments_is_empty() {
        let passage = ProviderKind::SuttaCentral
            .format(r#"{"msg": "Not Found"}"#, &query("xx99"))
            .unwrap();
        assert!(passage.is_empty());
    }
}
