//! Quaerendo Domain Layer
//!
//! Core types for the Quaerendo fact-checking client. Everything here is pure:
//! no I/O, no clocks, no shared state. The SDK and CLI crates depend on these
//! types; nothing in this crate depends on them.
//!
//! ## Key Concepts
//!
//! - **Claim**: a statement whose veracity is under review
//! - **Evidence**: material attached to exactly one claim, with a Source and review counts
//! - **Source**: provenance of a claim or piece of evidence (title, url, authors)
//! - **Consensus**: the 80% agreement rule that aggregates reviews into one relationship
//! - **Disclosure**: the expand/collapse state of a detail view's sections
//!
//! Display fallbacks (empty titles, empty descriptions, zero reviews) live in
//! [`display`] and are total functions over their inputs.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod id;

pub mod claim;
pub mod consensus;
pub mod disclosure;
pub mod display;
pub mod evidence;
pub mod source;

// Re-exports for convenience
pub use claim::{Claim, ClaimId, ClaimWithEvidence, NewClaim, Topic};
pub use consensus::consensus;
pub use disclosure::{Disclosure, Section, SectionState};
pub use evidence::{Evidence, EvidenceId, EvidenceRelationship, EvidenceReview, NewEvidence};
pub use id::ParseIdError;
pub use source::{Entity, EntityId, NewSource, Source, SourceId};
