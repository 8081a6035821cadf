//! Fallback client over the provider registry.
//!
//! Each lookup walks the providers registered for a tradition in priority
//! order, one request at a time, and returns the first non-empty passage.
//! Provider failures are logged and skipped; callers only ever see `None`.

use std::collections::HashMap;

use chrono::Utc;
use tracing::{debug, warn};

use crate::http::HttpClient;
use crate::providers::TextQuery;
use crate::registry::{ProviderDescriptor, ProviderRegistry};
use crate::types::{SearchResult, TextMetadata, TextResult, TextsError, TextsResult, Tradition};

/// Construction-time settings. Immutable once the client is built.
#[derive(Debug, Clone, Default)]
pub struct ClientConfig {
    /// Provider id to secret.
    credentials: HashMap<String, String>,
    pub user_agent: Option<String>,
}

impl ClientConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_credential(mut self, provider_id: impl Into<String>, secret: impl Into<String>) -> Self {
        self.credentials.insert(provider_id.into(), secret.into());
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Configured secret for a provider. Blank secrets count as missing.
    pub fn credential(&self, provider_id: &str) -> Option<&str> {
        self.credentials
            .get(provider_id)
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
    }
}

pub struct SacredTextsClient {
    http: HttpClient,
    registry: ProviderRegistry,
    config: ClientConfig,
}

impl Default for SacredTextsClient {
    fn default() -> Self {
        Self::new(ClientConfig::default())
    }
}

impl SacredTextsClient {
    /// Client over the built-in provider table.
    pub fn new(config: ClientConfig) -> Self {
        Self::with_registry(ProviderRegistry::builtin(), config)
    }

    pub fn with_registry(registry: ProviderRegistry, config: ClientConfig) -> Self {
        let http = HttpClient::new(config.user_agent.as_deref());
        Self {
            http,
            registry,
            config,
        }
    }

    pub fn registry(&self) -> &ProviderRegistry {
        &self.registry
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Whether `provider` can be called with the configured credentials.
    pub fn is_usable(&self, provider: &ProviderDescriptor) -> bool {
        !provider.requires_auth() || self.config.credential(&provider.id).is_some()
    }

    pub async fn get_bible_text(&self, reference: &str, translation: Option<&str>) -> Option<TextResult> {
        self.get_text(TextQuery::new(Tradition::Bible, reference, translation))
            .await
    }

    pub async fn get_quran_text(&self, surah: u32, ayah: u32, translation: Option<&str>) -> Option<TextResult> {
        self.get_text(TextQuery::new(
            Tradition::Quran,
            format!("{surah}:{ayah}"),
            translation,
        ))
        .await
    }

    pub async fn get_buddhist_text(&self, reference: &str, translation: Option<&str>) -> Option<TextResult> {
        self.get_text(TextQuery::new(Tradition::Buddhist, reference, translation))
            .await
    }

    pub async fn get_hindu_text(&self, reference: &str, translation: Option<&str>) -> Option<TextResult> {
        self.get_text(TextQuery::new(Tradition::Hindu, reference, translation))
            .await
    }

    pub async fn get_sikh_text(&self, reference: &str, translation: Option<&str>) -> Option<TextResult> {
        self.get_text(TextQuery::new(Tradition::Sikh, reference, translation))
            .await
    }

    /// Try every provider for `query.tradition` in order and return the
    /// first qualifying result.
    pub async fn get_text(&self, query: TextQuery) -> Option<TextResult> {
        for provider in self.registry.providers_for(query.tradition) {
            match self.try_provider(provider, &query).await {
                Ok(result) => {
                    debug!("{} served {} {}", provider.id, query.tradition, query.reference);
                    return Some(result);
                }
                Err(TextsError::MissingCredential(id)) => {
                    debug!("skipping {id}: no credential configured");
                }
                Err(e) => {
                    warn!("{} failed for {} {}: {e}", provider.id, query.tradition, query.reference);
                }
            }
        }

        warn!(
            "no provider returned {} {} ({})",
            query.tradition, query.reference, query.translation
        );
        None
    }

    async fn try_provider(&self, provider: &ProviderDescriptor, query: &TextQuery) -> TextsResult<TextResult> {
        let mut headers = Vec::new();
        if provider.requires_auth() {
            let secret = self
                .config
                .credential(&provider.id)
                .ok_or_else(|| TextsError::MissingCredential(provider.id.clone()))?;
            headers.extend(provider.kind.auth_header(secret));
        }

        let url = provider.kind.build_url(&provider.base_url, query)?;
        debug!("requesting {} from {}", query.reference, provider.id);

        let response = self.http.get(&url, &headers).await?;
        if !response.is_success() {
            return Err(TextsError::Status {
                status: response.status,
                url: response.url,
            });
        }

        let passage = provider.kind.format(&response.body, query)?;
        if passage.is_empty() {
            return Err(TextsError::EmptyResult(provider.id.clone()));
        }

        Ok(TextResult {
            reference: query.reference.clone(),
            original_text: passage.original_text,
            translation: passage.translation,
            transliteration: passage.transliteration,
            source: query.tradition,
            api: provider.name.clone(),
            metadata: TextMetadata {
                language: passage.language,
                translation: passage.translation_id,
                copyright: passage.copyright,
                timestamp: Utc::now(),
            },
        })
    }

    // Search has no backend yet. These keep the per-tradition contract in
    // place and always return an empty set.

    pub async fn search_bible(&self, query: &str, limit: usize) -> Vec<SearchResult> {
        self.search(Tradition::Bible, query, limit).await
    }

    pub async fn search_quran(&self, query: &str, limit: usize) -> Vec<SearchResult> {
        self.search(Tradition::Quran, query, limit).await
    }

    pub async fn search_buddhist(&self, query: &str, limit: usize) -> Vec<SearchResult> {
        self.search(Tradition::Buddhist, query, limit).await
    }

    pub async fn search_hindu(&self, query: &str, limit: usize) -> Vec<SearchResult> {
        self.search(Tradition::Hindu, query, limit).await
    }

    pub async fn search_sikh(&self, query: &str, limit: usize) -> Vec<SearchResult> {
        self.search(Tradition::Sikh, query, limit).await
    }

    /// Search every tradition. Always empty until a search backend exists.
    pub async fn search_sacred_texts(&self, query: &str, limit: usize) -> Vec<SearchResult> {
        let mut results = Vec::new();
        for tradition in Tradition::all() {
            results.extend(self.search(*tradition, query, limit).await);
        }
        results.truncate(limit);
        results
    }

    async fn search(&self, tradition: Tradition, query: &str, limit: usize) -> Vec<SearchResult> {
        debug!("search not implemented: tradition={tradition} query={query:?} limit={limit}");
        Vec::new()
    }
}
