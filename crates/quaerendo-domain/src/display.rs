//! Display fallbacks for sparse payloads
//!
//! Empty strings and zero counts are valid states, not errors. Each function
//! here is total: every input yields a defined string.

use crate::evidence::EvidenceRelationship;

/// Label shown in place of an empty source title
pub const UNTITLED_EVIDENCE: &str = "Untitled Evidence";

/// Label shown in place of an empty claim text
pub const UNTITLED_CLAIM: &str = "Untitled Claim";

/// Label shown in place of an empty title on a claim's source
pub const UNTITLED_SOURCE: &str = "Untitled Source";

/// Sentence shown in place of an empty evidence description
pub const NO_DESCRIPTION: &str = "No description has been provided for this piece of evidence.";

/// Sentence shown when no expert has reviewed a piece of evidence
pub const UNREVIEWED: &str = "This evidence has not been reviewed by experts.";

/// Title to display for a piece of evidence, given its source title
pub fn display_title(title: &str) -> &str {
    if title.is_empty() {
        UNTITLED_EVIDENCE
    } else {
        title
    }
}

/// Description to display for a piece of evidence
pub fn display_description(description: &str) -> &str {
    if description.is_empty() {
        NO_DESCRIPTION
    } else {
        description
    }
}

/// Sentence summarizing how many experts reviewed a piece of evidence
///
/// # Examples
///
/// ```
/// use quaerendo_domain::display::review_sentence;
///
/// assert_eq!(review_sentence(0), "This evidence has not been reviewed by experts.");
/// assert_eq!(review_sentence(3), "This evidence has been reviewed by 3 experts.");
/// ```
pub fn review_sentence(count: u32) -> String {
    if count == 0 {
        UNREVIEWED.to_string()
    } else {
        format!("This evidence has been reviewed by {} experts.", count)
    }
}

/// Title to display for a claim
pub fn claim_title(claim_text: &str) -> &str {
    if claim_text.is_empty() {
        UNTITLED_CLAIM
    } else {
        claim_text
    }
}

/// Title to display for the source a claim was taken from
pub fn source_title(title: &str) -> &str {
    if title.is_empty() {
        UNTITLED_SOURCE
    } else {
        title
    }
}

/// Human-readable label for a relationship
pub fn relationship_label(relationship: EvidenceRelationship) -> &'static str {
    match relationship {
        EvidenceRelationship::Proves => "Proves",
        EvidenceRelationship::Supports => "Supports",
        EvidenceRelationship::Unrelated => "Unrelated",
        EvidenceRelationship::Inconclusive => "Inconclusive",
        EvidenceRelationship::Disputes => "Disputes",
        EvidenceRelationship::Disproves => "Disproves",
        EvidenceRelationship::Split => "Split",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evidence::Evidence;

    #[test]
    fn test_empty_fallbacks() {
        assert_eq!(display_title(""), "Untitled Evidence");
        assert_eq!(
            display_description(""),
            "No description has been provided for this piece of evidence."
        );
        assert_eq!(claim_title(""), "Untitled Claim");
        assert_eq!(source_title(""), "Untitled Source");
        assert_eq!(source_title("Field notes"), "Field notes");
    }

    #[test]
    fn test_whitespace_is_not_empty() {
        assert_eq!(display_title(" "), " ");
    }

    #[test]
    fn test_review_sentence_boundaries() {
        assert_eq!(review_sentence(0), "This evidence has not been reviewed by experts.");
        assert_eq!(review_sentence(1), "This evidence has been reviewed by 1 experts.");
        assert_eq!(
            review_sentence(u32::MAX),
            format!("This evidence has been reviewed by {} experts.", u32::MAX)
        );
    }

    #[test]
    fn test_sparse_evidence_scenario() {
        let json = r#"{"id": 42, "description": "", "num_expert_reviews": 0, "source_of_evidence": {"title": ""}}"#;
        let evidence: Evidence = serde_json::from_str(json).unwrap();

        assert_eq!(display_title(&evidence.source_of_evidence.title), "Untitled Evidence");
        assert_eq!(display_description(&evidence.description), NO_DESCRIPTION);
        assert_eq!(
            review_sentence(evidence.num_expert_reviews),
            "This evidence has not been reviewed by experts."
        );
    }

    #[test]
    fn test_relationship_labels() {
        assert_eq!(relationship_label(EvidenceRelationship::Split), "Split");
        assert_eq!(relationship_label(EvidenceRelationship::Disproves), "Disproves");
    }
}
