//! Render models for detail views.
//!
//! Panels are plain data computed from a view snapshot; presentation layers
//! draw them without consulting the request state themselves. A section's
//! `expanded` flag and its `body` are independent: the body is `None` until
//! the entity has loaded, whatever the section's state. A loaded claim with
//! no recorded source also has no source body.

use crate::request::RequestState;
use crate::view::{ClaimView, EvidenceView};
use quaerendo_domain::display::{
    claim_title, display_description, display_title, relationship_label, review_sentence,
    source_title,
};
use quaerendo_domain::{ClaimWithEvidence, Disclosure, Evidence, EvidenceId, Section, Source};

/// Coarse load status of a panel
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelStatus {
    /// Waiting for the response; nothing is shown
    Pending,
    /// Entity data is shown
    Loaded,
    /// The load failed; no entity data is shown, only this message
    Failed(String),
}

/// A collapsible section
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionPanel<B> {
    /// Section heading
    pub heading: &'static str,
    /// Whether the section is expanded
    pub expanded: bool,
    /// Section content, present only once the entity has loaded
    pub body: Option<B>,
}

impl<B> SectionPanel<B> {
    fn new(heading: &'static str, disclosure: &Disclosure, section: Section, body: Option<B>) -> Self {
        Self {
            heading,
            expanded: disclosure.is_expanded(section),
            body,
        }
    }

    /// Content to draw: the body when expanded and loaded
    pub fn visible_body(&self) -> Option<&B> {
        if self.expanded {
            self.body.as_ref()
        } else {
            None
        }
    }
}

/// Provenance details for the source presentation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourcePanel {
    /// Title with fallback applied
    pub title: String,
    /// Author names, or a placeholder when none are credited
    pub authors: String,
    /// Link, if any
    pub url: Option<String>,
    /// Description, possibly empty
    pub description: String,
}

impl From<&Source> for SourcePanel {
    fn from(source: &Source) -> Self {
        Self {
            title: display_title(&source.title).to_string(),
            authors: source.author_names(),
            url: source.link().map(str::to_string),
            description: source.description.clone(),
        }
    }
}

impl SourcePanel {
    /// Source a claim was taken from, titled with the source fallback
    pub fn for_claim(source: &Source) -> Self {
        Self {
            title: source_title(&source.title).to_string(),
            ..Self::from(source)
        }
    }
}

/// Title and description block at the top of a detail view
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    /// Title with fallback applied
    pub title: String,
    /// Description with fallback applied
    pub description: String,
}

/// Everything needed to draw `/evidence/:id`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvidencePanel {
    /// Load status
    pub status: PanelStatus,
    /// Header, present only once loaded
    pub header: Option<Header>,
    /// "Source" section
    pub source: SectionPanel<SourcePanel>,
    /// "Reviews" section; the body is the review sentence
    pub reviews: SectionPanel<String>,
}

impl EvidencePanel {
    /// Render the current state of `view`
    pub fn render(view: &EvidenceView) -> Self {
        let disclosure = view.disclosure();
        view.with_request(|request| Self::from_parts(request, &disclosure))
    }

    /// Render from an explicit load state and disclosure
    pub fn from_parts(request: &RequestState<Evidence>, disclosure: &Disclosure) -> Self {
        let evidence = request.loaded();

        Self {
            status: status_of(request),
            header: evidence.map(|e| Header {
                title: display_title(&e.source_of_evidence.title).to_string(),
                description: display_description(&e.description).to_string(),
            }),
            source: SectionPanel::new(
                "Source",
                disclosure,
                Section::Source,
                evidence.map(|e| SourcePanel::from(&e.source_of_evidence)),
            ),
            reviews: SectionPanel::new(
                "Reviews",
                disclosure,
                Section::Reviews,
                evidence.map(|e| review_sentence(e.num_expert_reviews)),
            ),
        }
    }
}

/// One row of a claim's evidence list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvidenceRow {
    /// Evidence id, for navigation to `/evidence/:id`
    pub id: EvidenceId,
    /// Title with fallback applied
    pub title: String,
    /// Expert consensus label, if the server computed one
    pub consensus: Option<&'static str>,
    /// Review sentence
    pub reviews: String,
}

impl From<&Evidence> for EvidenceRow {
    fn from(evidence: &Evidence) -> Self {
        Self {
            id: evidence.id,
            title: display_title(&evidence.source_of_evidence.title).to_string(),
            consensus: evidence.expert_consensus_relationship.map(relationship_label),
            reviews: review_sentence(evidence.num_expert_reviews),
        }
    }
}

/// Everything needed to draw `/claim/:id`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClaimPanel {
    /// Load status
    pub status: PanelStatus,
    /// Claim text and description, present only once loaded
    pub header: Option<Header>,
    /// Topic name, if any
    pub topic: Option<String>,
    /// "Source" section: where the claim was made
    pub source: SectionPanel<SourcePanel>,
    /// "Reviews" section: attached evidence
    pub reviews: SectionPanel<Vec<EvidenceRow>>,
}

impl ClaimPanel {
    /// Render the current state of `view`
    pub fn render(view: &ClaimView) -> Self {
        let disclosure = view.disclosure();
        view.with_request(|request| Self::from_parts(request, &disclosure))
    }

    /// Render from an explicit load state and disclosure
    pub fn from_parts(request: &RequestState<ClaimWithEvidence>, disclosure: &Disclosure) -> Self {
        let detail = request.loaded();

        Self {
            status: status_of(request),
            header: detail.map(|d| Header {
                title: claim_title(&d.claim.claim_text).to_string(),
                description: d.claim.description.clone(),
            }),
            topic: detail.and_then(|d| d.claim.topic.as_ref().map(|t| t.name.clone())),
            source: SectionPanel::new(
                "Source",
                disclosure,
                Section::Source,
                detail
                    .and_then(|d| d.claim.source_of_claim.as_ref())
                    .map(SourcePanel::for_claim),
            ),
            reviews: SectionPanel::new(
                "Evidence",
                disclosure,
                Section::Reviews,
                detail.map(|d| d.related_evidence.iter().map(EvidenceRow::from).collect()),
            ),
        }
    }
}

fn status_of<T>(request: &RequestState<T>) -> PanelStatus {
    match request {
        RequestState::Pending => PanelStatus::Pending,
        RequestState::Loaded(_) => PanelStatus::Loaded,
        RequestState::Failed(e) => PanelStatus::Failed(e.to_string()),
    }
}
