//! List registered providers in priority order.

use anyhow::Result;
use sacred_texts::{SacredTextsClient, Tradition};
use serde_json::json;

pub async fn run(client: &SacredTextsClient, tradition: Option<Tradition>, json: bool) -> Result<()> {
    let traditions: Vec<Tradition> = match tradition {
        Some(t) => vec![t],
        None => Tradition::all().to_vec(),
    };

    if json {
        let listing: Vec<_> = traditions
            .iter()
            .flat_map(|t| client.registry().providers_for(*t))
            .map(|p| {
                json!({
                    "id": p.id,
                    "name": p.name,
                    "tradition": p.tradition,
                    "baseUrl": p.base_url,
                    "features": p.features,
                    "requiresAuth": p.requires_auth(),
                    "authType": p.auth_type.map(|a| a.as_str()),
                    "usable": client.is_usable(p),
                })
            })
            .collect();
        return crate::output::print_json(&listing);
    }

    for tradition in traditions {
        println!("{tradition}");
        let providers = client.registry().providers_for(tradition);
        if providers.is_empty() {
            println!("  (none)");
        }
        for (rank, p) in providers.iter().enumerate() {
            let auth = match p.auth_type {
                Some(auth) if client.is_usable(p) => format!("{} configured", auth.as_str()),
                Some(auth) => format!(
                    "{} missing, set {}",
                    auth.as_str(),
                    crate::config::credential_env_var(&p.id)
                ),
                None => "no auth".to_string(),
            };
            println!("  {}. {:<18} {} [{auth}]", rank + 1, p.id, p.base_url);
        }
        println!();
    }
    Ok(())
}
