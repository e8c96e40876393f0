//! Review aggregation - the 80% agreement rule

use crate::evidence::EvidenceRelationship;

/// Fraction of reviews that must agree for a relationship to be the consensus
pub const CONSENSUS_THRESHOLD: f64 = 0.8;

/// Number of agreeing reviews required for consensus among `total` reviews
pub fn required_agreement(total: usize) -> usize {
    (total as f64 * CONSENSUS_THRESHOLD).ceil() as usize
}

/// Aggregate individual review verdicts into a single relationship
///
/// Returns the relationship held by at least 80% of the reviews (rounded up),
/// or [`EvidenceRelationship::Split`] when none qualifies. An empty slice has
/// no consensus.
///
/// # Examples
///
/// ```
/// use quaerendo_domain::{consensus, EvidenceRelationship::*};
///
/// assert_eq!(consensus(&[Supports, Supports, Supports, Supports, Disputes]), Supports);
/// assert_eq!(consensus(&[Supports, Disputes]), Split);
/// assert_eq!(consensus(&[]), Split);
/// ```
pub fn consensus(reviews: &[EvidenceRelationship]) -> EvidenceRelationship {
    let required = required_agreement(reviews.len());

    let mut tally: Vec<(EvidenceRelationship, usize)> = Vec::new();
    for review in reviews {
        match tally.iter_mut().find(|(rel, _)| rel == review) {
            Some((_, count)) => *count += 1,
            None => tally.push((*review, 1)),
        }
    }

    tally
        .into_iter()
        .find(|(_, count)| *count >= required)
        .map(|(rel, _)| rel)
        .unwrap_or(EvidenceRelationship::Split)
}
