//! Static catalog of external sacred-text providers.
//!
//! The built-in table lists providers per tradition in the order the client
//! tries them. Tests and embedders can build their own registry with
//! different base URLs; the order of insertion is the priority order.

use serde::{Deserialize, Serialize};

use crate::providers::ProviderKind;
use crate::types::Tradition;

/// How a provider expects its credential.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthType {
    ApiKey,
    Token,
}

impl AuthType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuthType::ApiKey => "api_key",
            AuthType::Token => "token",
        }
    }
}

/// One external API endpoint. Immutable once registered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderDescriptor {
    /// Stable key used for credentials and logging.
    pub id: String,
    pub name: String,
    pub kind: ProviderKind,
    pub tradition: Tradition,
    pub base_url: String,
    pub features: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth_type: Option<AuthType>,
}

impl ProviderDescriptor {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        kind: ProviderKind,
        tradition: Tradition,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind,
            tradition,
            base_url: base_url.into(),
            features: Vec::new(),
            auth_type: None,
        }
    }

    pub fn with_features<I, S>(mut self, features: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.features = features.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_auth(mut self, auth_type: AuthType) -> Self {
        self.auth_type = Some(auth_type);
        self
    }

    pub fn requires_auth(&self) -> bool {
        self.auth_type.is_some()
    }
}

/// Ordered provider table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProviderRegistry {
    providers: Vec<ProviderDescriptor>,
}

impl ProviderRegistry {
    pub fn new(providers: Vec<ProviderDescriptor>) -> Self {
        Self { providers }
    }

    /// The providers this crate knows about, highest priority first.
    pub fn builtin() -> Self {
        use ProviderKind::*;
        use Tradition::*;

        Self::new(vec![
            ProviderDescriptor::new(
                "bible-api",
                "bible-api.com",
                BibleApi,
                Bible,
                "https://bible-api.com",
            )
            .with_features(["verses", "passages", "public-domain translations"]),
            ProviderDescriptor::new(
                "api-bible",
                "API.Bible",
                ApiBible,
                Bible,
                "https://api.scripture.api.bible/v1",
            )
            .with_features(["verses", "passages", "2500+ versions", "search"])
            .with_auth(AuthType::ApiKey),
            ProviderDescriptor::new("esv", "ESV API", Esv, Bible, "https://api.esv.org")
                .with_features(["passages", "audio", "search"])
                .with_auth(AuthType::Token),
            ProviderDescriptor::new(
                "quran-com",
                "Quran.com API",
                QuranCom,
                Quran,
                "https://api.quran.com/api/v4",
            )
            .with_features(["verses", "translations", "tafsir", "recitations"]),
            ProviderDescriptor::new(
                "alquran-cloud",
                "AlQuran Cloud",
                AlQuranCloud,
                Quran,
                "https://api.alquran.cloud/v1",
            )
            .with_features(["verses", "editions", "audio"]),
            ProviderDescriptor::new(
                "suttacentral",
                "SuttaCentral",
                SuttaCentral,
                Buddhist,
                "https://suttacentral.net",
            )
            .with_features(["pali canon", "parallels", "translations"]),
            ProviderDescriptor::new(
                "vedic-scriptures",
                "Bhagavad Gita (Vedic Scriptures)",
                VedicScriptures,
                Hindu,
                "https://vedicscriptures.github.io",
            )
            .with_features(["bhagavad gita", "commentaries", "transliteration"]),
            ProviderDescriptor::new(
                "bhagavad-gita",
                "Bhagavad Gita API",
                BhagavadGita,
                Hindu,
                "https://bhagavad-gita3.p.rapidapi.com",
            )
            .with_features(["bhagavad gita", "word meanings", "translations"])
            .with_auth(AuthType::ApiKey),
            ProviderDescriptor::new(
                "banidb",
                "BaniDB",
                BaniDb,
                Sikh,
                "https://api.banidb.com/v2",
            )
            .with_features(["guru granth sahib", "translations", "transliteration"]),
            ProviderDescriptor::new(
                "gurbani-now",
                "GurbaniNow",
                GurbaniNow,
                Sikh,
                "https://api.gurbaninow.com/v2",
            )
            .with_features(["guru granth sahib", "translations"]),
        ])
    }

    pub fn all(&self) -> &[ProviderDescriptor] {
        &self.providers
    }

    /// Providers for one tradition, in priority order.
    pub fn providers_for(&self, tradition: Tradition) -> Vec<&ProviderDescriptor> {
        self.providers
            .iter()
            .filter(|p| p.tradition == tradition)
            .collect()
    }

    pub fn get(&self, id: &str) -> Option<&ProviderDescriptor> {
        self.providers.iter().find(|p| p.id == id)
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}
