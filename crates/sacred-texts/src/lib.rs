//! Sacred Texts — fallback lookups across public scripture APIs and liveness
//! checks for study resource links.

pub mod catalog;
pub mod client;
pub mod http;
pub mod providers;
pub mod registry;
pub mod types;
pub mod verifier;

pub use catalog::{ContentItem, Resource, ResourceCatalog, SacredText};
pub use client::{ClientConfig, SacredTextsClient};
pub use providers::{Passage, ProviderKind, TextQuery};
pub use registry::{AuthType, ProviderDescriptor, ProviderRegistry};
pub use types::*;
pub use verifier::{ResourceVerifier, VerificationResults, VerificationSummary};
