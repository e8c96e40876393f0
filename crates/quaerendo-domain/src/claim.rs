//! Claim module - statements under review

use crate::evidence::Evidence;
use crate::id::integer_id;
use crate::source::{NewSource, Source};
use serde::{Deserialize, Serialize};

integer_id!(
    /// Server-assigned identifier of a claim
    ///
    /// Parsed from the `:id` segment of `/claim/:id` and `/submit/evidence/for/:id`.
    ClaimId
);

/// Subject area a claim belongs to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topic {
    /// Topic name
    pub name: String,
}

/// A claim - a statement whose veracity is under review
///
/// The server owns claims; the client only ever holds read-only projections
/// for the lifetime of the view that fetched them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claim {
    /// Unique identifier
    pub id: ClaimId,

    /// The statement itself
    pub claim_text: String,

    /// Context supplied by the submitter
    #[serde(default)]
    pub description: String,

    /// Subject area
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topic: Option<Topic>,

    /// Where the claim was made
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_of_claim: Option<Source>,
}

/// A claim together with every piece of evidence attached to it
///
/// This is the payload of `GET /api/claim/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimWithEvidence {
    /// The claim
    #[serde(flatten)]
    pub claim: Claim,

    /// Evidence attached to the claim (many-to-one)
    #[serde(default)]
    pub related_evidence: Vec<Evidence>,
}

impl ClaimWithEvidence {
    /// Number of attached pieces of evidence that at least one expert reviewed
    pub fn reviewed_evidence_count(&self) -> usize {
        self.related_evidence
            .iter()
            .filter(|e| !e.is_unreviewed())
            .count()
    }
}

/// Claim as submitted by the client (`POST /api/claim/`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewClaim {
    /// The statement
    pub claim_text: String,

    /// Context for reviewers
    pub description: String,

    /// Where the claim was made
    pub source_of_claim: NewSource,
}
