//! Resource catalogs checked by the verifier.
//!
//! A catalog holds two lists: general religious-studies resources, and
//! sacred texts that each carry their own list of content links. The
//! verifier walks resources first, then every text's content, in order.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::types::TextsResult;

/// A religious-studies reference site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resource {
    pub title: String,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A sacred text and the places it can be read online.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SacredText {
    pub title: String,
    pub tradition: String,
    #[serde(default)]
    pub content: Vec<ContentItem>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentItem {
    pub title: String,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceCatalog {
    #[serde(default)]
    pub resources: Vec<Resource>,
    #[serde(default)]
    pub sacred_texts: Vec<SacredText>,
}

impl ResourceCatalog {
    pub fn new(resources: Vec<Resource>, sacred_texts: Vec<SacredText>) -> Self {
        Self {
            resources,
            sacred_texts,
        }
    }

    pub fn from_json_str(json: &str) -> TextsResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> TextsResult<Self> {
        let data = std::fs::read_to_string(path)?;
        Self::from_json_str(&data)
    }

    /// Every URL in verification order. Duplicates are kept.
    pub fn urls(&self) -> impl Iterator<Item = &str> + '_ {
        let resources = self.resources.iter().map(|r| r.url.as_str());
        let content = self
            .sacred_texts
            .iter()
            .flat_map(|t| t.content.iter())
            .map(|c| c.url.as_str());
        resources.chain(content)
    }

    pub fn url_count(&self) -> usize {
        self.urls().count()
    }

    /// The links the study site ships with.
    pub fn builtin() -> Self {
        let resources = vec![
            resource(
                "Internet Sacred Text Archive",
                "https://sacred-texts.com/",
                "Primary Sources",
                "Public-domain texts on religion, mythology and folklore",
            ),
            resource(
                "Stanford Encyclopedia of Philosophy: Philosophy of Religion",
                "https://plato.stanford.edu/entries/philosophy-religion/",
                "Encyclopedias",
                "Peer-reviewed survey of the philosophy of religion",
            ),
            resource(
                "Pew Research Center: Religion",
                "https://www.pewresearch.org/religion/",
                "Research",
                "Surveys and demographic studies of religious life",
            ),
            resource(
                "The Pluralism Project at Harvard University",
                "https://pluralism.org/",
                "Research",
                "Studies of religious diversity and interfaith engagement",
            ),
            resource(
                "Perseus Digital Library",
                "https://www.perseus.tufts.edu/hopper/",
                "Primary Sources",
                "Greek, Latin and early Christian source texts",
            ),
            resource(
                "Early Christian Writings",
                "https://www.earlychristianwritings.com/",
                "Primary Sources",
                "New Testament, apocrypha and church fathers",
            ),
            resource(
                "Dharma Drum Buddhist Studies Authority Database",
                "https://authority.dila.edu.tw/",
                "Reference",
                "Names, places and dates for Buddhist studies",
            ),
        ];

        let sacred_texts = vec![
            text(
                "The Bible",
                "Christianity",
                &[
                    ("World English Bible", "https://ebible.org/web/", "html"),
                    ("Bible Gateway", "https://www.biblegateway.com/", "html"),
                ],
            ),
            text(
                "Tanakh",
                "Judaism",
                &[("Sefaria Tanakh", "https://www.sefaria.org/texts/Tanakh", "html")],
            ),
            text(
                "The Quran",
                "Islam",
                &[
                    ("Quran.com", "https://quran.com/", "html"),
                    ("Quranic Arabic Corpus", "https://corpus.quran.com/", "html"),
                ],
            ),
            text(
                "Pali Canon",
                "Buddhism",
                &[
                    ("SuttaCentral", "https://suttacentral.net/", "html"),
                    ("Access to Insight: Tipitaka", "https://www.accesstoinsight.org/tipitaka/", "html"),
                ],
            ),
            text(
                "Bhagavad Gita",
                "Hinduism",
                &[
                    ("Holy Bhagavad Gita", "https://www.holy-bhagavad-gita.org/", "html"),
                    ("Sacred Texts: Hinduism", "https://sacred-texts.com/hin/index.htm", "html"),
                ],
            ),
            text(
                "Guru Granth Sahib",
                "Sikhism",
                &[
                    ("SearchGurbani", "https://www.searchgurbani.com/", "html"),
                    ("SikhiToTheMax", "https://www.sikhitothemax.org/", "html"),
                ],
            ),
            text(
                "Tao Te Ching",
                "Taoism",
                &[("Sacred Texts: Tao Te Ching", "https://sacred-texts.com/tao/taote.htm", "html")],
            ),
        ];

        Self::new(resources, sacred_texts)
    }
}

fn resource(title: &str, url: &str, category: &str, description: &str) -> Resource {
    Resource {
        title: title.to_string(),
        url: url.to_string(),
        category: Some(category.to_string()),
        description: Some(description.to_string()),
    }
}

fn text(title: &str, tradition: &str, content: &[(&str, &str, &str)]) -> SacredText {
    SacredText {
        title: title.to_string(),
        tradition: tradition.to_string(),
        content: content
            .iter()
            .map(|(title, url, format)| ContentItem {
                title: title.to_string(),
                url: url.to_string(),
                format: Some(format.to_string()),
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_urls_resources_then_content() {
        let catalog = ResourceCatalog::from_json_str(
            r#"{
                "resources": [{"title": "A", "url": "https://a.example/"}],
                "sacredTexts": [
                    {"title": "T1", "tradition": "X", "content": [
                        {"title": "c1", "url": "https://c1.example/"},
                        {"title": "c2", "url": "https://c2.example/"}
                    ]},
                    {"title": "T2", "tradition": "Y", "content": [
                        {"title": "again", "url": "https://a.example/"}
                    ]}
                ]
            }"#,
        )
        .unwrap();
        let urls: Vec<&str> = catalog.urls().collect();
        assert_eq!(
            urls,
            vec![
                "https://a.example/",
                "https://c1.example/",
                "https://c2.example/",
                "https://a.example/",
            ]
        );
        assert_eq!(catalog.url_count(), 4);
    }

    #[test]
    fn test_missing_sections_default_empty() {
        let catalog = ResourceCatalog::from_json_str(r#"{"resources": []}"#).unwrap();
        assert_eq!(catalog.url_count(), 0);
    }

    #[test]
    fn test_builtin_urls_are_distinct_and_absolute() {
        let catalog = ResourceCatalog::builtin();
        let mut urls: Vec<&str> = catalog.urls().collect();
        assert!(urls.iter().all(|u| u.starts_with("https://")));
        let total = urls.len();
        urls.sort_unstable();
        urls.dedup();
        assert_eq!(urls.len(), total);
    }

    #[test]
    fn test_from_json_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"resources": [{{"title": "A", "url": "https://a.example/"}}]}}"#
        )
        .unwrap();
        let catalog = ResourceCatalog::from_json_file(file.path()).unwrap();
        assert_eq!(catalog.resources.len(), 1);
    }

    #[test]
    fn test_from_json_file_missing() {
        assert!(ResourceCatalog::from_json_file("/definitely/not/here.json").is_err());
    }
}
