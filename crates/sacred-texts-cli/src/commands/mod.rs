//! Subcommand implementations for the `sacred-texts` binary.

pub mod providers_cmd;
pub mod search_cmd;
pub mod text_cmd;
pub mod verify_cmd;
