//! Terminal rendering. JSON goes to stdout unchanged; pretty output is for
//! people.

use anyhow::Result;
use sacred_texts::{TextResult, VerificationState, VerificationStatus, VerificationSummary};
use serde::Serialize;

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub fn print_text_result(result: &TextResult) {
    println!("{} {} ({})", result.source, result.reference, result.api);
    println!();
    if result.original_text != result.translation && !result.original_text.is_empty() {
        println!("{}", result.original_text);
        println!();
    }
    if let Some(transliteration) = &result.transliteration {
        println!("{transliteration}");
        println!();
    }
    println!("{}", result.translation);
    println!();
    println!(
        "  language: {}  translation: {}",
        result.metadata.language, result.metadata.translation
    );
    if let Some(copyright) = &result.metadata.copyright {
        println!("  {copyright}");
    }
}

fn state_marker(state: VerificationState) -> &'static str {
    match state {
        VerificationState::Verified => "[OK]",
        VerificationState::Failed => "[!!]",
        VerificationState::Pending => "[??]",
    }
}

pub fn print_status(url: &str, status: &VerificationStatus) {
    println!("{} {url}", state_marker(status.status));
    println!(
        "     {}  (next check {})",
        status.notes,
        status.next_check.format("%Y-%m-%d %H:%M UTC")
    );
}

pub fn print_summary(summary: &VerificationSummary) {
    println!();
    println!(
        "Checked {}: {} available, {} failed",
        summary.total, summary.verified, summary.failed
    );
}
