//! Gurbani providers: BaniDB and GurbaniNow. References are shabad ids.

use serde::Deserialize;
use serde_json::Value;
use url::Url;

use super::{collapse_whitespace, endpoint, Passage, TextQuery};
use crate::types::TextsResult;

/// Preferred BaniDB translators per language, best first.
const BANIDB_PREFERRED: &[&str] = &["bdb", "ms", "ssk", "ss", "sn"];

pub(super) fn banidb_url(base_url: &str, query: &TextQuery) -> TextsResult<Url> {
    endpoint(base_url, &["shabads", query.reference.trim()])
}

#[derive(Debug, Deserialize)]
pub(super) struct BaniDbShabad {
    #[serde(default)]
    verses: Vec<BaniDbVerse>,
}

#[derive(Debug, Deserialize)]
struct BaniDbVerse {
    #[serde(default)]
    verse: BaniDbText,
    #[serde(default)]
    translation: Value,
    #[serde(default)]
    transliteration: Value,
}

#[derive(Debug, Default, Deserialize)]
struct BaniDbText {
    #[serde(default)]
    unicode: String,
}

/// BaniDB nests translations as `{lang: {translator: text | {unicode: text}}}`.
fn banidb_translation(translation: &Value, lang: &str) -> Option<String> {
    let by_translator = translation.get(lang)?.as_object()?;
    let preferred = BANIDB_PREFERRED
        .iter()
        .filter_map(|key| by_translator.get(*key));
    preferred
        .chain(by_translator.values())
        .find_map(text_of)
}

fn text_of(value: &Value) -> Option<String> {
    let text = match value {
        Value::String(s) => s.as_str(),
        Value::Object(map) => map.get("unicode")?.as_str()?,
        _ => return None,
    };
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}

fn banidb_lang(code: &str) -> &str {
    match code {
        "pa" => "pu",
        other => other,
    }
}

pub(super) fn format_banidb(resp: BaniDbShabad, query: &TextQuery) -> TextsResult<Passage> {
    let lang = query.translation.to_ascii_lowercase();
    let lang = banidb_lang(&lang);

    let mut original = Vec::new();
    let mut translated = Vec::new();
    let mut transliterated = Vec::new();
    for line in &resp.verses {
        original.push(line.verse.unicode.trim().to_string());
        if let Some(t) = banidb_translation(&line.translation, lang) {
            translated.push(t);
        }
        if let Some(t) = line.transliteration.get("english").and_then(text_of) {
            transliterated.push(t);
        }
    }

    Ok(Passage {
        original_text: join_lines(original),
        translation: join_lines(translated),
        transliteration: Some(join_lines(transliterated)).filter(|t| !t.is_empty()),
        language: "pa".to_string(),
        translation_id: query.translation.clone(),
        copyright: None,
    })
}

pub(super) fn gurbani_now_url(base_url: &str, query: &TextQuery) -> TextsResult<Url> {
    endpoint(base_url, &["shabad", query.reference.trim()])
}

#[derive(Debug, Deserialize)]
pub(super) struct GurbaniNowShabad {
    #[serde(default)]
    shabad: Vec<GurbaniNowEntry>,
}

#[derive(Debug, Deserialize)]
struct GurbaniNowEntry {
    line: GurbaniNowLine,
}

#[derive(Debug, Deserialize)]
struct GurbaniNowLine {
    #[serde(default)]
    gurmukhi: Value,
    #[serde(default)]
    translation: Value,
    #[serde(default)]
    transliteration: Value,
}

fn gurbani_now_language(code: &str) -> &'static str {
    match code {
        "pa" | "pu" => "punjabi",
        "es" => "spanish",
        _ => "english",
    }
}

pub(super) fn format_gurbani_now(resp: GurbaniNowShabad, query: &TextQuery) -> TextsResult<Passage> {
    let language = gurbani_now_language(&query.translation.to_ascii_lowercase());

    let mut original = Vec::new();
    let mut translated = Vec::new();
    let mut transliterated = Vec::new();
    for entry in &resp.shabad {
        let line = &entry.line;
        if let Some(t) = text_of(&line.gurmukhi) {
            original.push(t);
        }
        if let Some(t) = line
            .translation
            .get(language)
            .and_then(|l| l.get("default").or_else(|| l.get("unicode")))
            .and_then(text_of)
        {
            translated.push(t);
        }
        if let Some(t) = line
            .transliteration
            .get("english")
            .and_then(|l| l.get("text"))
            .and_then(text_of)
        {
            transliterated.push(t);
        }
    }

    Ok(Passage {
        original_text: join_lines(original),
        translation: join_lines(translated),
        transliteration: Some(join_lines(transliterated)).filter(|t| !t.is_empty()),
        language: "pa".to_string(),
        translation_id: query.translation.clone(),
        copyright: None,
    })
}

fn join_lines(lines: Vec<String>) -> String {
    lines
        .into_iter()
        .map(|l| collapse_whitespace(&l))
        .filter(|l| !l.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::ProviderKind;
    use crate::types::Tradition;

    fn query(reference: &str, translation: Option<&str>) -> TextQuery {
        TextQuery::new(Tradition::Sikh, reference, translation)
    }

    #[test]
    fn test_urls() {
        assert_eq!(
            ProviderKind::BaniDb
                .build_url("https://api.banidb.com/v2", &query("1", None))
                .unwrap(),
            "https://api.banidb.com/v2/shabads/1"
        );
        assert_eq!(
            ProviderKind::GurbaniNow
                .build_url("https://api.gurbaninow.com/v2", &query(" 1 ", None))
                .unwrap(),
            "https://api.gurbaninow.com/v2/shabad/1"
        );
    }

    #[test]
    fn test_format_banidb() {
        let body = r#"{"shabadInfo": {"shabadId": 1}, "verses": [
            {"verseId": 1,
             "verse": {"gurmukhi": "<> siq nwmu", "unicode": "ੴ ਸਤਿ ਨਾਮੁ"},
             "translation": {
                "en": {"ms": "One Universal Creator God. The Name Is Truth.", "bdb": "There is but One God. Truth is His Name."},
                "pu": {"ss": {"gurmukhi": "...", "unicode": "ਅਕਾਲ ਪੁਰਖ ਇੱਕ ਹੈ"}}
             },
             "transliteration": {"english": "ik oankaar sat naam", "hindi": "इक ओअंकार सति नामु"}},
            {"verseId": 2,
             "verse": {"unicode": "॥ ਜਪੁ ॥"},
             "translation": {"en": {"bdb": "Chant And Meditate:"}},
             "transliteration": {"english": "|| jap ||"}}
        ]}"#;
        let passage = ProviderKind::BaniDb.format(body, &query("1", None)).unwrap();
        assert_eq!(passage.original_text, "ੴ ਸਤਿ ਨਾਮੁ\n॥ ਜਪੁ ॥");
        assert_eq!(
            passage.translation,
            "There is but One God. Truth is His Name.\nChant And Meditate:"
        );
        assert_eq!(
            passage.transliteration.as_deref(),
            Some("ik oankaar sat naam\n|| jap ||")
        );

        let punjabi = ProviderKind::BaniDb.format(body, &query("1", Some("pa"))).unwrap();
        assert_eq!(punjabi.translation, "ਅਕਾਲ ਪੁਰਖ ਇੱਕ ਹੈ");
    }

    #[test]
    fn test_format_gurbani_now() {
        let body = r#"{"shabadinfo": {"id": "1"}, "shabad": [
            {"line": {
                "gurmukhi": {"akhar": "<> siq nwmu", "unicode": "ੴ ਸਤਿ ਨਾਮੁ"},
                "translation": {"english": {"default": "One Universal Creator God."}},
                "transliteration": {"english": {"text": "ik oankaar sat naam"}}
            }}
        ]}"#;
        let passage = ProviderKind::GurbaniNow
            .format(body, &query("1", None))
            .unwrap();
        assert_eq!(passage.original_text, "ੴ ਸਤਿ ਨਾਮੁ");
        assert_eq!(passage.translation, "One Universal Creator God.");
        assert_eq!(passage.transliteration.as_deref(), Some("ik oankaar sat naam"));
    }

    #[test]
    fn test_empty_shabad_is_empty() {
        let passage = ProviderKind::GurbaniNow
            .format(r#"{"shabad": []}"#, &query("0", None))
            .unwrap();
        assert!(passage.is_empty());
    }
}
