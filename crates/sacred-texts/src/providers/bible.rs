//! Bible providers: bible-api.com, API.Bible and the ESV API.

use serde::Deserialize;
use url::Url;

use super::{collapse_whitespace, endpoint, non_empty, Passage, TextQuery};
use crate::types::TextsResult;

const ESV_COPYRIGHT: &str = "Scripture quotations are from the ESV® Bible \
     (The Holy Bible, English Standard Version®), © 2001 by Crossway";

/// USFM book codes used by API.Bible passage ids.
const BOOK_CODES: &[(&str, &str)] = &[
    ("genesis", "GEN"),
    ("exodus", "EXO"),
    ("leviticus", "LEV"),
    ("numbers", "NUM"),
    ("deuteronomy", "DEU"),
    ("joshua", "JOS"),
    ("judges", "JDG"),
    ("ruth", "RUT"),
    ("1 samuel", "1SA"),
    ("2 samuel", "2SA"),
    ("1 kings", "1KI"),
    ("2 kings", "2KI"),
    ("1 chronicles", "1CH"),
    ("2 chronicles", "2CH"),
    ("ezra", "EZR"),
    ("nehemiah", "NEH"),
    ("esther", "EST"),
    ("job", "JOB"),
    ("psalm", "PSA"),
    ("psalms", "PSA"),
    ("proverbs", "PRO"),
    ("ecclesiastes", "ECC"),
    ("song of solomon", "SNG"),
    ("song of songs", "SNG"),
    ("isaiah", "ISA"),
    ("jeremiah", "JER"),
    ("lamentations", "LAM"),
    ("ezekiel", "EZK"),
    ("daniel", "DAN"),
    ("hosea", "HOS"),
    ("joel", "JOL"),
    ("amos", "AMO"),
    ("obadiah", "OBA"),
    ("jonah", "JON"),
    ("micah", "MIC"),
    ("nahum", "NAM"),
    ("habakkuk", "HAB"),
    ("zephaniah", "ZEP"),
    ("haggai", "HAG"),
    ("zechariah", "ZEC"),
    ("malachi", "MAL"),
    ("matthew", "MAT"),
    ("mark", "MRK"),
    ("luke", "LUK"),
    ("john", "JHN"),
    ("acts", "ACT"),
    ("romans", "ROM"),
    ("1 corinthians", "1CO"),
    ("2 corinthians", "2CO"),
    ("galatians", "GAL"),
    ("ephesians", "EPH"),
    ("philippians", "PHP"),
    ("colossians", "COL"),
    ("1 thessalonians", "1TH"),
    ("2 thessalonians", "2TH"),
    ("1 timothy", "1TI"),
    ("2 timothy", "2TI"),
    ("titus", "TIT"),
    ("philemon", "PHM"),
    ("hebrews", "HEB"),
    ("james", "JAS"),
    ("1 peter", "1PE"),
    ("2 peter", "2PE"),
    ("1 john", "1JN"),
    ("2 john", "2JN"),
    ("3 john", "3JN"),
    ("jude", "JUD"),
    ("revelation", "REV"),
];

pub(super) fn bible_api_url(base_url: &str, query: &TextQuery) -> TextsResult<Url> {
    let mut url = endpoint(base_url, &[query.reference.trim()])?;
    url.query_pairs_mut()
        .append_pair("translation", &query.translation.to_ascii_lowercase());
    Ok(url)
}

#[derive(Debug, Deserialize)]
pub(super) struct BibleApiResponse {
    #[serde(default)]
    text: String,
    #[serde(default)]
    translation_id: String,
    #[serde(default)]
    translation_note: Option<String>,
}

pub(super) fn format_bible_api(resp: BibleApiResponse, query: &TextQuery) -> TextsResult<Passage> {
    let text = collapse_whitespace(&resp.text);
    Ok(Passage {
        original_text: text.clone(),
        translation: text,
        transliteration: None,
        language: "en".to_string(),
        translation_id: non_empty(Some(resp.translation_id))
            .map(|id| id.to_ascii_uppercase())
            .unwrap_or_else(|| query.translation.clone()),
        copyright: non_empty(resp.translation_note),
    })
}

pub(super) fn api_bible_url(base_url: &str, query: &TextQuery) -> TextsResult<Url> {
    let bible_id = api_bible_id(&query.translation);
    let passage = passage_id(&query.reference);
    let mut url = endpoint(base_url, &["bibles", bible_id, "passages", passage.as_str()])?;
    url.query_pairs_mut()
        .append_pair("content-type", "text")
        .append_pair("include-notes", "false")
        .append_pair("include-titles", "false")
        .append_pair("include-verse-numbers", "false");
    Ok(url)
}

/// Map common abbreviations to API.Bible ids; anything else is passed through.
fn api_bible_id(translation: &str) -> &str {
    match translation.to_ascii_uppercase().as_str() {
        "WEB" => "9879dbb7cfe39e4d-04",
        "KJV" => "de4e12af7f28f599-02",
        "ASV" => "06125adad2d5898a-01",
        _ => translation,
    }
}

/// Turn `John 3:16-18` into `JHN.3.16-JHN.3.18`. References already in
/// passage-id form are returned unchanged.
fn passage_id(reference: &str) -> String {
    let reference = reference.trim();
    let Some((book, locator)) = reference.rsplit_once(' ') else {
        return reference.to_string();
    };

    let book = book_code(book);
    let locator = locator.replace(':', ".");
    match locator.split_once('-') {
        Some((start, end)) => {
            let end = if end.contains('.') {
                end.to_string()
            } else {
                let chapter = start.split('.').next().unwrap_or(start);
                format!("{chapter}.{end}")
            };
            format!("{book}.{start}-{book}.{end}")
        }
        None => format!("{book}.{locator}"),
    }
}

fn book_code(book: &str) -> String {
    let lowered = book.trim().to_ascii_lowercase();
    BOOK_CODES
        .iter()
        .find(|(name, _)| *name == lowered)
        .map(|(_, code)| code.to_string())
        .unwrap_or_else(|| {
            lowered
                .chars()
                .filter(|c| c.is_ascii_alphanumeric())
                .take(3)
                .collect::<String>()
                .to_ascii_uppercase()
        })
}

#[derive(Debug, Deserialize)]
pub(super) struct ApiBibleResponse {
    data: ApiBiblePassage,
}

#[derive(Debug, Deserialize)]
struct ApiBiblePassage {
    #[serde(default)]
    content: String,
    #[serde(default)]
    copyright: Option<String>,
}

pub(super) fn format_api_bible(resp: ApiBibleResponse, query: &TextQuery) -> TextsResult<Passage> {
    let text = collapse_whitespace(&resp.data.content);
    Ok(Passage {
        original_text: text.clone(),
        translation: text,
        transliteration: None,
        language: "en".to_string(),
        translation_id: query.translation.clone(),
        copyright: non_empty(resp.data.copyright),
    })
}

pub(super) fn esv_url(base_url: &str, query: &TextQuery) -> TextsResult<Url> {
    let mut url = endpoint(base_url, &["v3", "passage", "text", ""])?;
    url.query_pairs_mut()
        .append_pair("q", query.reference.trim())
        .append_pair("include-headings", "false")
        .append_pair("include-footnotes", "false")
        .append_pair("include-verse-numbers", "false")
        .append_pair("include-short-copyright", "false")
        .append_pair("include-passage-references", "false");
    Ok(url)
}

#[derive(Debug, Deserialize)]
pub(super) struct EsvResponse {
    #[serde(default)]
    passages: Vec<String>,
}

pub(super) fn format_esv(resp: EsvResponse) -> TextsResult<Passage> {
    let text = collapse_whitespace(&resp.passages.join(" "));
    Ok(Passage {
        original_text: text.clone(),
        translation: text,
        transliteration: None,
        language: "en".to_string(),
        translation_id: "ESV".to_string(),
        copyright: Some(ESV_COPYRIGHT.to_string()),
    })
}
