//! Full-text search across traditions.

use anyhow::Result;
use sacred_texts::{SacredTextsClient, Tradition};

pub async fn run(
    client: &SacredTextsClient,
    query: &str,
    tradition: Option<Tradition>,
    limit: usize,
    json: bool,
) -> Result<()> {
    let results = match tradition {
        None => client.search_sacred_texts(query, limit).await,
        Some(Tradition::Bible) => client.search_bible(query, limit).await,
        Some(Tradition::Quran) => client.search_quran(query, limit).await,
        Some(Tradition::Buddhist) => client.search_buddhist(query, limit).await,
        Some(Tradition::Hindu) => client.search_hindu(query, limit).await,
        Some(Tradition::Sikh) => client.search_sikh(query, limit).await,
    };

    if json {
        return crate::output::print_json(&results);
    }

    if results.is_empty() {
        println!("No results. Search is not available from any provider yet.");
    }
    for hit in &results {
        println!("{} {} ({}): {}", hit.source, hit.reference, hit.api, hit.text);
    }
    Ok(())
}
