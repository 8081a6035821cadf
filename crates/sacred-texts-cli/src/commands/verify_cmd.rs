//! Check resource links and report their status.

use std::path::Path;

use anyhow::{bail, Context, Result};
use sacred_texts::{ResourceCatalog, ResourceVerifier, VerificationResults, VerificationSummary};

use crate::config;
use crate::output;

pub struct VerifyArgs<'a> {
    pub url: Option<&'a str>,
    pub catalog: Option<&'a Path>,
    pub output: Option<&'a Path>,
    pub strict: bool,
    pub json: bool,
}

/// Check one URL. No catalog is resolved or loaded.
pub async fn verify_single(url: &str) -> VerificationResults {
    let verifier = ResourceVerifier::new(ResourceCatalog::default());
    let mut results = VerificationResults::new();
    results.insert(url.to_string(), verifier.verify_resource(url).await);
    results
}

pub async fn run(args: VerifyArgs<'_>) -> Result<()> {
    let results = match args.url {
        Some(url) => verify_single(url).await,
        None => {
            let catalog_path = config::resolve_catalog_path(args.catalog, config::process_env);
            let catalog = config::load_catalog(catalog_path.as_deref())?;
            if let Some(path) = &catalog_path {
                tracing::info!("catalog: {}", path.display());
            }
            ResourceVerifier::new(catalog).verify_all_resources().await
        }
    };
    let summary = VerificationSummary::from_results(&results);

    if let Some(path) = args.output {
        let data = serde_json::to_string_pretty(&results)?;
        std::fs::write(path, data)
            .with_context(|| format!("failed to write results to {}", path.display()))?;
    }

    if args.json {
        output::print_json(&serde_json::json!({
            "results": results,
            "summary": summary,
        }))?;
    } else {
        for (url, status) in &results {
            output::print_status(url, status);
        }
        output::print_summary(&summary);
    }

    if args.strict && summary.failed > 0 {
        bail!("{} resource(s) failed verification", summary.failed);
    }
    Ok(())
}
