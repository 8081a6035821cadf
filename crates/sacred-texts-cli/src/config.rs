//! Configuration loading and resolution.
//!
//! Explicit flags win over environment variables, which win over built-in
//! defaults. Lookups take an `env` function so resolution can be tested
//! without touching the process environment.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use sacred_texts::{ClientConfig, ProviderRegistry, ResourceCatalog};

/// Path to a JSON resource catalog used instead of the built-in one.
pub const CATALOG_ENV: &str = "SACRED_TEXTS_CATALOG";

/// Environment variable holding the credential for `provider_id`,
/// e.g. `api-bible` → `SACRED_TEXTS_API_BIBLE_KEY`.
pub fn credential_env_var(provider_id: &str) -> String {
    format!(
        "SACRED_TEXTS_{}_KEY",
        provider_id.to_ascii_uppercase().replace('-', "_")
    )
}

/// Parse a `--credential id=secret` flag.
pub fn parse_credential(raw: &str) -> Result<(String, String), String> {
    let (id, secret) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected PROVIDER=SECRET, got '{raw}'"))?;
    let id = id.trim();
    if id.is_empty() {
        return Err("provider id is empty".to_string());
    }
    Ok((id.to_string(), secret.to_string()))
}

/// Build the client config for every auth-requiring provider in `registry`.
pub fn resolve_client_config(
    registry: &ProviderRegistry,
    explicit: &[(String, String)],
    env: impl Fn(&str) -> Option<String>,
) -> ClientConfig {
    let mut config = ClientConfig::new()
        .with_user_agent(concat!("sacred-texts/", env!("CARGO_PKG_VERSION")));

    for provider in registry.all().iter().filter(|p| p.requires_auth()) {
        let from_flag = explicit
            .iter()
            .rev()
            .find(|(id, _)| *id == provider.id)
            .map(|(_, secret)| secret.clone());
        let secret = from_flag.or_else(|| env(&credential_env_var(&provider.id)));
        if let Some(secret) = secret {
            config = config.with_credential(provider.id.clone(), secret);
        }
    }

    for (id, _) in explicit {
        if registry.get(id).is_none() {
            tracing::warn!("ignoring credential for unknown provider '{id}'");
        }
    }

    config
}

/// Resolve which catalog file to load, if any.
pub fn resolve_catalog_path(
    explicit: Option<&Path>,
    env: impl Fn(&str) -> Option<String>,
) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }
    env(CATALOG_ENV)
        .filter(|p| !p.trim().is_empty())
        .map(PathBuf::from)
}

pub fn load_catalog(path: Option<&Path>) -> Result<ResourceCatalog> {
    match path {
        Some(path) => ResourceCatalog::from_json_file(path)
            .with_context(|| format!("failed to load catalog {}", path.display())),
        None => Ok(ResourceCatalog::builtin()),
    }
}

pub fn process_env(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_credential_env_var() {
        assert_eq!(credential_env_var("api-bible"), "SACRED_TEXTS_API_BIBLE_KEY");
        assert_eq!(credential_env_var("esv"), "SACRED_TEXTS_ESV_KEY");
    }

    #[test]
    fn test_parse_credential() {
        assert_eq!(
            parse_credential("esv=abc=def").unwrap(),
            ("esv".to_string(), "abc=def".to_string())
        );
        assert!(parse_credential("esv").is_err());
        assert!(parse_credential("=abc").is_err());
    }

    #[test]
    fn test_flag_beats_env() {
        let registry = ProviderRegistry::builtin();
        let env = env_of(&[
            ("SACRED_TEXTS_ESV_KEY", "from-env"),
            ("SACRED_TEXTS_API_BIBLE_KEY", "bible-env"),
        ]);
        let explicit = vec![("esv".to_string(), "from-flag".to_string())];

        let config = resolve_client_config(&registry, &explicit, env);
        assert_eq!(config.credential("esv"), Some("from-flag"));
        assert_eq!(config.credential("api-bible"), Some("bible-env"));
        assert_eq!(config.credential("bhagavad-gita"), None);
    }

    #[test]
    fn test_keyless_providers_get_no_credential() {
        let registry = ProviderRegistry::builtin();
        let env = env_of(&[("SACRED_TEXTS_BIBLE_API_KEY", "unused")]);
        let config = resolve_client_config(&registry, &[], env);
        assert_eq!(config.credential("bible-api"), None);
    }

    #[test]
    fn test_catalog_path_resolution() {
        let explicit = PathBuf::from("/tmp/explicit.json");
        let env = env_of(&[(CATALOG_ENV, "/tmp/env.json")]);
        assert_eq!(
            resolve_catalog_path(Some(&explicit), &env),
            Some(explicit.clone())
        );
        assert_eq!(
            resolve_catalog_path(None, &env),
            Some(PathBuf::from("/tmp/env.json"))
        );
        assert_eq!(resolve_catalog_path(None, env_of(&[])), None);
    }

    #[test]
    fn test_load_builtin_catalog() {
        let catalog = load_catalog(None).unwrap();
        assert!(catalog.url_count() > 0);
        assert!(load_catalog(Some(Path::new("/no/such/catalog.json"))).is_err());
    }
}
