//! REST paths of the Quaerendo API.

use quaerendo_domain::{ClaimId, EvidenceId};

/// Claim listing and submission
pub const CLAIMS: &str = "/api/claim/";

/// Evidence submission
pub const EVIDENCE: &str = "/api/evidence/";

/// Token login
pub const LOGIN: &str = "/api/auth/login/";

/// Account registration
pub const REGISTER: &str = "/api/auth/register/";

/// A single claim with its related evidence
pub fn claim(id: ClaimId) -> String {
    format!("/api/claim/{}", id)
}

/// A single piece of evidence with its source
pub fn evidence(id: EvidenceId) -> String {
    format!("/api/evidence/{}", id)
}
