//! View routing - which detail entity a URL path selects.
//!
//! Routes are a declarative table of path patterns checked in order; the
//! first match wins. Patterns match by prefix, so `/claim/12/history` still
//! selects claim 12. Anything unmatched (or with an unparsable `:id`) falls
//! through to the claim listing.

use crate::client::Resource;
use quaerendo_domain::{ClaimId, ClaimWithEvidence, Evidence, EvidenceId};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RouteKind {
    ClaimDetail,
    EvidenceDetail,
    SubmitClaim,
    SubmitEvidence,
    Register,
    Login,
}

const ROUTE_TABLE: &[(&str, RouteKind)] = &[
    ("/claim/:id", RouteKind::ClaimDetail),
    ("/evidence/:id", RouteKind::EvidenceDetail),
    ("/submit/claim", RouteKind::SubmitClaim),
    ("/submit/evidence/for/:id", RouteKind::SubmitEvidence),
    ("/register", RouteKind::Register),
    ("/login", RouteKind::Login),
];

/// A client-side view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    /// `/claim/:id`
    ClaimDetail(ClaimId),
    /// `/evidence/:id`
    EvidenceDetail(EvidenceId),
    /// `/submit/claim`
    SubmitClaim,
    /// `/submit/evidence/for/:id`
    SubmitEvidence(ClaimId),
    /// `/register`
    Register,
    /// `/login`
    Login,
    /// `/` and anything unmatched
    ClaimList,
}

impl Route {
    /// Select the view for `path`
    ///
    /// # Examples
    ///
    /// ```
    /// use quaerendo_domain::EvidenceId;
    /// use quaerendo_sdk::Route;
    ///
    /// assert_eq!(Route::resolve("/evidence/42"), Route::EvidenceDetail(EvidenceId::new(42)));
    /// assert_eq!(Route::resolve("/nowhere"), Route::ClaimList);
    /// ```
    pub fn resolve(path: &str) -> Self {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

        ROUTE_TABLE
            .iter()
            .find_map(|(pattern, kind)| {
                let param = match_pattern(pattern, &segments)?;
                build(*kind, param)
            })
            .unwrap_or(Route::ClaimList)
    }

    /// Canonical path of this route
    pub fn path(&self) -> String {
        match self {
            Route::ClaimDetail(id) => format!("/claim/{}", id),
            Route::EvidenceDetail(id) => format!("/evidence/{}", id),
            Route::SubmitClaim => "/submit/claim".to_string(),
            Route::SubmitEvidence(id) => format!("/submit/evidence/for/{}", id),
            Route::Register => "/register".to_string(),
            Route::Login => "/login".to_string(),
            Route::ClaimList => "/".to_string(),
        }
    }

    /// REST path a detail route loads, if it loads one
    pub fn api_path(&self) -> Option<String> {
        match self {
            Route::ClaimDetail(id) => Some(ClaimWithEvidence::api_path(*id)),
            Route::EvidenceDetail(id) => Some(Evidence::api_path(*id)),
            _ => None,
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// Match `segments` against `pattern` by prefix
///
/// Returns `None` on mismatch, otherwise the captured `:id` segment if the
/// pattern has one.
fn match_pattern<'a>(pattern: &str, segments: &[&'a str]) -> Option<Option<&'a str>> {
    let parts: Vec<&str> = pattern.split('/').filter(|s| !s.is_empty()).collect();
    if segments.len() < parts.len() {
        return None;
    }

    let mut param = None;
    for (part, segment) in parts.iter().zip(segments) {
        if part.starts_with(':') {
            param = Some(*segment);
        } else if part != segment {
            return None;
        }
    }
    Some(param)
}

fn build(kind: RouteKind, param: Option<&str>) -> Option<Route> {
    match kind {
        RouteKind::ClaimDetail => param?.parse().ok().map(Route::ClaimDetail),
        RouteKind::EvidenceDetail => param?.parse().ok().map(Route::EvidenceDetail),
        RouteKind::SubmitEvidence => param?.parse().ok().map(Route::SubmitEvidence),
        RouteKind::SubmitClaim => Some(Route::SubmitClaim),
        RouteKind::Register => Some(Route::Register),
        RouteKind::Login => Some(Route::Login),
    }
}
