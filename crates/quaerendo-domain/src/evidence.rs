//! Evidence module - material attached to a claim

use crate::claim::ClaimId;
use crate::id::integer_id;
use crate::source::{NewSource, Source};
use serde::{Deserialize, Serialize};

integer_id!(
    /// Server-assigned identifier of a piece of evidence
    EvidenceId
);

/// How a piece of evidence bears on its claim
///
/// `Split` never appears in an individual review; it is the aggregate value
/// when reviewers fail to reach consensus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EvidenceRelationship {
    /// Establishes the claim
    Proves,
    /// Makes the claim more likely
    Supports,
    /// Has no bearing on the claim
    Unrelated,
    /// Bears on the claim without settling it
    Inconclusive,
    /// Makes the claim less likely
    Disputes,
    /// Refutes the claim
    Disproves,
    /// No relationship reached consensus
    Split,
}

impl EvidenceRelationship {
    /// All relationships a reviewer may choose (excludes `Split`)
    pub const REVIEWABLE: [EvidenceRelationship; 6] = [
        EvidenceRelationship::Proves,
        EvidenceRelationship::Supports,
        EvidenceRelationship::Unrelated,
        EvidenceRelationship::Inconclusive,
        EvidenceRelationship::Disputes,
        EvidenceRelationship::Disproves,
    ];

    /// Wire name of the relationship
    pub fn as_str(&self) -> &'static str {
        match self {
            EvidenceRelationship::Proves => "PROVES",
            EvidenceRelationship::Supports => "SUPPORTS",
            EvidenceRelationship::Unrelated => "UNRELATED",
            EvidenceRelationship::Inconclusive => "INCONCLUSIVE",
            EvidenceRelationship::Disputes => "DISPUTES",
            EvidenceRelationship::Disproves => "DISPROVES",
            EvidenceRelationship::Split => "SPLIT",
        }
    }

    /// Parse a relationship, case-insensitively
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "PROVES" => Some(EvidenceRelationship::Proves),
            "SUPPORTS" => Some(EvidenceRelationship::Supports),
            "UNRELATED" => Some(EvidenceRelationship::Unrelated),
            "INCONCLUSIVE" => Some(EvidenceRelationship::Inconclusive),
            "DISPUTES" => Some(EvidenceRelationship::Disputes),
            "DISPROVES" => Some(EvidenceRelationship::Disproves),
            "SPLIT" => Some(EvidenceRelationship::Split),
            _ => None,
        }
    }
}

impl std::str::FromStr for EvidenceRelationship {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid evidence relationship: {}", s))
    }
}

/// A piece of evidence as returned by `GET /api/evidence/{id}`
///
/// `num_expert_reviews == 0` is the unreviewed state and has its own
/// sentence, see [`crate::display::review_sentence`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Evidence {
    /// Unique identifier
    pub id: EvidenceId,

    /// Provenance of this evidence
    pub source_of_evidence: Source,

    /// Submitter's description, possibly empty
    #[serde(default)]
    pub description: String,

    /// Number of reviews by topic experts
    #[serde(default)]
    pub num_expert_reviews: u32,

    /// Number of reviews by non-experts
    #[serde(default)]
    pub num_community_reviews: u32,

    /// Aggregate relationship among expert reviews
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expert_consensus_relationship: Option<EvidenceRelationship>,

    /// Aggregate relationship among community reviews
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub community_consensus_relationship: Option<EvidenceRelationship>,
}

impl Evidence {
    /// Whether no expert has reviewed this evidence yet
    pub fn is_unreviewed(&self) -> bool {
        self.num_expert_reviews == 0
    }
}

/// A single review attached to an evidence submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvidenceReview {
    /// Relationship the reviewer deduced
    pub deduced_evidence_relationship: EvidenceRelationship,

    /// Optional remarks
    #[serde(default)]
    pub additional_comments: String,
}

/// Evidence as submitted for an existing claim (`POST /api/evidence/`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewEvidence {
    /// Claim this evidence is attached to
    pub claim: ClaimId,

    /// Provenance of the evidence
    pub source_of_evidence: NewSource,

    /// Submitter's description
    pub description: String,

    /// The submitter's own review
    pub reviews: Vec<EvidenceReview>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_evidence_payload() {
        let json = r#"{
            "id": 42,
            "source_of_evidence": {"id": 5, "title": "Lancet study", "url": "", "description": "", "authors": []},
            "description": "Randomized trial",
            "expert_consensus_relationship": "SUPPORTS",
            "num_expert_reviews": 3,
            "community_consensus_relationship": "SPLIT",
            "num_community_reviews": 10
        }"#;

        let evidence: Evidence = serde_json::from_str(json).unwrap();
        assert_eq!(evidence.id, EvidenceId::new(42));
        assert_eq!(evidence.source_of_evidence.title, "Lancet study");
        assert_eq!(evidence.num_expert_reviews, 3);
        assert_eq!(
            evidence.expert_consensus_relationship,
            Some(EvidenceRelationship::Supports)
        );
        assert_eq!(
            evidence.community_consensus_relationship,
            Some(EvidenceRelationship::Split)
        );
        assert!(!evidence.is_unreviewed());
    }

    #[test]
    fn test_empty_evidence_payload() {
        let json = r#"{"id": 1, "description": "", "num_expert_reviews": 0, "source_of_evidence": {"title": ""}}"#;
        let evidence: Evidence = serde_json::from_str(json).unwrap();
        assert!(evidence.is_unreviewed());
        assert_eq!(evidence.source_of_evidence.title, "");
        assert_eq!(evidence.expert_consensus_relationship, None);
    }

    #[test]
    fn test_missing_source_is_malformed() {
        let json = r#"{"id": 1, "description": "orphan"}"#;
        assert!(serde_json::from_str::<Evidence>(json).is_err());
    }

    #[test]
    fn test_negative_review_count_is_malformed() {
        let json = r#"{"id": 1, "num_expert_reviews": -2, "source_of_evidence": {}}"#;
        assert!(serde_json::from_str::<Evidence>(json).is_err());
    }

    #[test]
    fn test_relationship_parse() {
        assert_eq!(
            EvidenceRelationship::parse("disputes"),
            Some(EvidenceRelationship::Disputes)
        );
        assert_eq!(EvidenceRelationship::parse("maybe"), None);
        for rel in EvidenceRelationship::REVIEWABLE {
            assert_eq!(EvidenceRelationship::parse(rel.as_str()), Some(rel));
        }
    }

    #[test]
    fn test_new_evidence_serialization() {
        let submission = NewEvidence {
            claim: ClaimId::new(8),
            source_of_evidence: NewSource {
                title: "Field notes".to_string(),
                url: "https://example.org/notes".to_string(),
                description: String::new(),
                authors: vec![],
            },
            description: "Direct observation".to_string(),
            reviews: vec![EvidenceReview {
                deduced_evidence_relationship: EvidenceRelationship::Proves,
                additional_comments: String::new(),
            }],
        };

        let value = serde_json::to_value(&submission).unwrap();
        assert_eq!(value["claim"], 8);
        assert_eq!(value["reviews"][0]["deduced_evidence_relationship"], "PROVES");
        assert_eq!(value["source_of_evidence"]["authors"], serde_json::json!([]));
    }
}
