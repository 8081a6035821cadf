//! Quran providers: Quran.com v4 and AlQuran Cloud.

use serde::Deserialize;
use url::Url;

use super::{collapse_whitespace, endpoint, strip_markup, Passage, TextQuery};
use crate::types::TextsResult;

const ARABIC_EDITION: &str = "quran-uthmani";
const DEFAULT_ALQURAN_EDITION: &str = "en.sahih";

pub(super) fn quran_com_url(base_url: &str, query: &TextQuery) -> TextsResult<Url> {
    let mut url = endpoint(base_url, &["verses", "by_key", query.reference.trim()])?;
    url.query_pairs_mut()
        .append_pair("translations", &query.translation)
        .append_pair("fields", "text_uthmani");
    Ok(url)
}

#[derive(Debug, Deserialize)]
pub(super) struct QuranComResponse {
    verse: QuranComVerse,
}

#[derive(Debug, Deserialize)]
struct QuranComVerse {
    #[serde(default)]
    text_uthmani: String,
    #[serde(default)]
    translations: Vec<QuranComTranslation>,
}

#[derive(Debug, Deserialize)]
struct QuranComTranslation {
    #[serde(default)]
    text: String,
    #[serde(default)]
    resource_id: Option<u32>,
}

pub(super) fn format_quran_com(resp: QuranComResponse, query: &TextQuery) -> TextsResult<Passage> {
    let first = resp.verse.translations.into_iter().next();
    let translation_id = first
        .as_ref()
        .and_then(|t| t.resource_id)
        .map(|id| id.to_string())
        .unwrap_or_else(|| query.translation.clone());

    Ok(Passage {
        original_text: resp.verse.text_uthmani.trim().to_string(),
        translation: first.map(|t| strip_markup(&t.text)).unwrap_or_default(),
        transliteration: None,
        language: "ar".to_string(),
        translation_id,
        copyright: None,
    })
}

pub(super) fn alquran_cloud_url(base_url: &str, query: &TextQuery) -> TextsResult<Url> {
    let editions = format!("{ARABIC_EDITION},{}", alquran_edition(&query.translation));
    endpoint(
        base_url,
        &["ayah", query.reference.trim(), "editions", editions.as_str()],
    )
}

/// AlQuran Cloud names editions like `en.sahih`. Numeric Quran.com ids do
/// not translate, so they fall back to Saheeh International.
fn alquran_edition(translation: &str) -> &str {
    if translation.contains('.') {
        translation
    } else {
        DEFAULT_ALQURAN_EDITION
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct AlQuranResponse {
    #[serde(default)]
    data: Vec<AlQuranAyah>,
}

#[derive(Debug, Deserialize)]
struct AlQuranAyah {
    #[serde(default)]
    text: String,
    edition: AlQuranEdition,
}

#[derive(Debug, Deserialize)]
struct AlQuranEdition {
    #[serde(default)]
    identifier: String,
}

pub(super) fn format_alquran_cloud(resp: AlQuranResponse) -> TextsResult<Passage> {
    let (arabic, translated): (Vec<_>, Vec<_>) = resp
        .data
        .into_iter()
        .partition(|ayah| ayah.edition.identifier == ARABIC_EDITION);

    let translated = translated.into_iter().next();
    Ok(Passage {
        original_text: arabic
            .into_iter()
            .next()
            .map(|a| a.text.trim().to_string())
            .unwrap_or_default(),
        translation_id: translated
            .as_ref()
            .map(|t| t.edition.identifier.clone())
            .unwrap_or_else(|| DEFAULT_ALQURAN_EDITION.to_string()),
        translation: translated
            .map(|t| collapse_whitespace(&t.text))
            .unwrap_or_default(),
        transliteration: None,
        language: "ar".to_string(),
        copyright: None,
    })
}
