//! Look up one passage through the provider fallback chain.

use anyhow::{bail, Context, Result};
use sacred_texts::{SacredTextsClient, Tradition};

use crate::output;

/// Split a `surah:ayah` reference.
pub fn parse_quran_reference(reference: &str) -> Result<(u32, u32)> {
    let (surah, ayah) = reference
        .trim()
        .split_once(':')
        .with_context(|| format!("Quran references look like SURAH:AYAH, got '{reference}'"))?;
    let surah = surah
        .trim()
        .parse()
        .with_context(|| format!("invalid surah '{surah}'"))?;
    let ayah = ayah
        .trim()
        .parse()
        .with_context(|| format!("invalid ayah '{ayah}'"))?;
    Ok((surah, ayah))
}

pub async fn run(
    client: &SacredTextsClient,
    tradition: Tradition,
    reference: &str,
    translation: Option<&str>,
    json: bool,
) -> Result<()> {
    let result = match tradition {
        Tradition::Bible => client.get_bible_text(reference, translation).await,
        Tradition::Quran => {
            let (surah, ayah) = parse_quran_reference(reference)?;
            client.get_quran_text(surah, ayah, translation).await
        }
        Tradition::Buddhist => client.get_buddhist_text(reference, translation).await,
        Tradition::Hindu => client.get_hindu_text(reference, translation).await,
        Tradition::Sikh => client.get_sikh_text(reference, translation).await,
    };

    let Some(result) = result else {
        bail!("no text available for {tradition} {reference}; try again later");
    };

    if json {
        output::print_json(&result)
    } else {
        output::print_text_result(&result);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_quran_reference() {
        assert_eq!(parse_quran_reference("2:255").unwrap(), (2, 255));
        assert_eq!(parse_quran_reference(" 1 : 7 ").unwrap(), (1, 7));
        assert!(parse_quran_reference("2.255").is_err());
        assert!(parse_quran_reference("al-fatiha:1").is_err());
        assert!(parse_quran_reference("1:-1").is_err());
    }
}
