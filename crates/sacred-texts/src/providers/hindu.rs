//! Bhagavad Gita providers.

use serde::Deserialize;
use url::Url;

use super::{collapse_whitespace, endpoint, non_empty, Passage, ProviderKind, TextQuery};
use crate::types::TextsResult;

/// Pull `(chapter, verse)` out of `2.47`, `2:47` or `BG 2.47`.
fn chapter_verse(reference: &str) -> Option<(u32, u32)> {
    let numbers: Vec<u32> = reference
        .split(|c: char| !c.is_ascii_digit())
        .filter(|part| !part.is_empty())
        .filter_map(|part| part.parse().ok())
        .collect();
    match numbers.as_slice() {
        [.., chapter, verse] => Some((*chapter, *verse)),
        _ => None,
    }
}

fn gita_segments(kind: ProviderKind, query: &TextQuery) -> TextsResult<(String, String)> {
    let (chapter, verse) =
        chapter_verse(&query.reference).ok_or_else(|| kind.invalid_reference(&query.reference))?;
    Ok((chapter.to_string(), verse.to_string()))
}

pub(super) fn vedic_scriptures_url(base_url: &str, query: &TextQuery) -> TextsResult<Url> {
    let (chapter, verse) = gita_segments(ProviderKind::VedicScriptures, query)?;
    endpoint(base_url, &["slok", chapter.as_str(), verse.as_str(), ""])
}

#[derive(Debug, Default, Deserialize)]
struct Commentary {
    #[serde(default)]
    author: String,
    /// English translation.
    #[serde(default)]
    et: Option<String>,
    /// Hindi translation.
    #[serde(default)]
    ht: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(super) struct VedicSlok {
    #[serde(default)]
    slok: String,
    #[serde(default)]
    transliteration: String,
    #[serde(default)]
    siva: Option<Commentary>,
    #[serde(default)]
    purohit: Option<Commentary>,
    #[serde(default)]
    prabhu: Option<Commentary>,
    #[serde(default)]
    tej: Option<Commentary>,
    #[serde(default)]
    rams: Option<Commentary>,
}

pub(super) fn format_vedic_scriptures(resp: VedicSlok, query: &TextQuery) -> TextsResult<Passage> {
    let hindi = query.translation.eq_ignore_ascii_case("hi");
    let candidates = if hindi {
        [resp.tej, resp.rams, None]
    } else {
        [resp.siva, resp.purohit, resp.prabhu]
    };

    let chosen = candidates.into_iter().flatten().find_map(|c| {
        let text = if hindi { c.ht } else { c.et };
        non_empty(text).map(|t| (c.author, t))
    });

    let (translation_id, translation) = match chosen {
        Some((author, text)) if !author.trim().is_empty() => (author, text),
        Some((_, text)) => (query.translation.clone(), text),
        None => (query.translation.clone(), String::new()),
    };

    Ok(Passage {
        original_text: resp.slok.trim().to_string(),
        translation: collapse_whitespace(&translation),
        transliteration: non_empty(Some(resp.transliteration)),
        language: "sa".to_string(),
        translation_id,
        copyright: None,
    })
}

pub(super) fn bhagavad_gita_url(base_url: &str, query: &TextQuery) -> TextsResult<Url> {
    let (chapter, verse) = gita_segments(ProviderKind::BhagavadGita, query)?;
    endpoint(
        base_url,
        &["v2", "chapters", chapter.as_str(), "verses", verse.as_str(), ""],
    )
}

#[derive(Debug, Deserialize)]
struct GitaTranslation {
    #[serde(default)]
    description: String,
    #[serde(default)]
    author_name: String,
    #[serde(default)]
    language: String,
}

#[derive(Debug, Deserialize)]
pub(super) struct GitaVerse {
    #[serde(default)]
    text: String,
    #[serde(default)]
    transliteration: String,
    #[serde(default)]
    translations: Vec<GitaTranslation>,
}

fn gita_language(code: &str) -> String {
    match code.to_ascii_lowercase().as_str() {
        "en" => "english".to_string(),
        "hi" => "hindi".to_string(),
        other => other.to_string(),
    }
}

pub(super) fn format_bhagavad_gita(resp: GitaVerse, query: &TextQuery) -> TextsResult<Passage> {
    let language = gita_language(&query.translation);
    let chosen = resp
        .translations
        .into_iter()
        .find(|t| t.language.eq_ignore_ascii_case(&language) && !t.description.trim().is_empty());

    let (translation_id, translation) = match chosen {
        Some(t) => (t.author_name, collapse_whitespace(&t.description)),
        None => (query.translation.clone(), String::new()),
    };

    Ok(Passage {
        original_text: resp.text.trim().to_string(),
        translation,
        transliteration: non_empty(Some(resp.transliteration)),
        language: "sa".to_string(),
        translation_id,
        copyright: None,
    })
}
