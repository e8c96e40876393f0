//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use quaerendo_domain::display::claim_title;
use quaerendo_domain::Claim;
use quaerendo_sdk::{ClaimPanel, EvidencePanel, Header, PanelStatus, SectionPanel, SourcePanel};
use serde_json::{json, Value};
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format a claim listing.
    pub fn format_claims(&self, claims: &[Claim]) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(claims)?),
            OutputFormat::Table => Ok(self.format_claims_table(claims)),
            OutputFormat::Quiet => Ok(claims
                .iter()
                .map(|c| c.id.to_string())
                .collect::<Vec<_>>()
                .join("\n")),
        }
    }

    fn format_claims_table(&self, claims: &[Claim]) -> String {
        if claims.is_empty() {
            return self.colorize("No claims found.", "yellow");
        }

        let mut builder = Builder::default();
        builder.push_record(["ID", "Claim", "Topic"]);

        for claim in claims {
            let topic = claim.topic.as_ref().map(|t| t.name.as_str()).unwrap_or("");
            builder.push_record([claim.id.to_string().as_str(), claim_title(&claim.claim_text), topic]);
        }

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));

        table.to_string()
    }

    /// Format an evidence detail panel.
    pub fn format_evidence(&self, panel: &EvidencePanel) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&json!({
                "status": status_json(&panel.status),
                "header": panel.header.as_ref().map(header_json),
                "source": section_json(&panel.source, source_json),
                "reviews": section_json(&panel.reviews, |s| json!(s)),
            }))?),
            OutputFormat::Quiet => Ok(panel
                .header
                .as_ref()
                .map(|h| h.title.clone())
                .unwrap_or_default()),
            OutputFormat::Table => {
                if let Some(failure) = self.failure_notice(&panel.status) {
                    return Ok(failure);
                }

                let mut out = Vec::new();
                self.push_header(&mut out, panel.header.as_ref());
                self.push_section(&mut out, &panel.source, |body, out| push_source(body, out));
                self.push_section(&mut out, &panel.reviews, |body, out| {
                    out.push(format!("  {}", body))
                });
                Ok(out.join("\n"))
            }
        }
    }

    /// Format a claim detail panel.
    pub fn format_claim(&self, panel: &ClaimPanel) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&json!({
                "status": status_json(&panel.status),
                "header": panel.header.as_ref().map(header_json),
                "topic": panel.topic,
                "source": section_json(&panel.source, source_json),
                "evidence": section_json(&panel.reviews, |rows| {
                    Value::Array(rows.iter().map(|r| json!({
                        "id": r.id,
                        "title": r.title,
                        "consensus": r.consensus,
                        "reviews": r.reviews,
                    })).collect())
                }),
            }))?),
            OutputFormat::Quiet => Ok(panel
                .reviews
                .body
                .as_ref()
                .map(|rows| {
                    rows.iter()
                        .map(|r| r.id.to_string())
                        .collect::<Vec<_>>()
                        .join("\n")
                })
                .unwrap_or_default()),
            OutputFormat::Table => {
                if let Some(failure) = self.failure_notice(&panel.status) {
                    return Ok(failure);
                }

                let mut out = Vec::new();
                self.push_header(&mut out, panel.header.as_ref());
                if let Some(topic) = &panel.topic {
                    out.push(format!("Topic: {}", topic));
                }
                self.push_section(&mut out, &panel.source, |body, out| push_source(body, out));
                if panel.source.expanded && panel.source.body.is_none() {
                    out.push("  No source has been recorded for this claim.".to_string());
                }
                self.push_section(&mut out, &panel.reviews, |rows, out| {
                    if rows.is_empty() {
                        out.push("  No evidence has been submitted for this claim.".to_string());
                        return;
                    }
                    let mut builder = Builder::default();
                    builder.push_record(["ID", "Evidence", "Consensus", "Reviews"]);
                    for row in rows {
                        builder.push_record([
                            row.id.to_string().as_str(),
                            &row.title,
                            row.consensus.unwrap_or("-"),
                            &row.reviews,
                        ]);
                    }
                    let mut table = builder.build();
                    table.with(Style::rounded());
                    out.push(table.to_string());
                });
                Ok(out.join("\n"))
            }
        }
    }

    fn failure_notice(&self, status: &PanelStatus) -> Option<String> {
        match status {
            PanelStatus::Failed(message) => Some(self.error(&format!("Could not load: {}", message))),
            PanelStatus::Pending => Some(self.info("Loading...")),
            PanelStatus::Loaded => None,
        }
    }

    fn push_header(&self, out: &mut Vec<String>, header: Option<&Header>) {
        if let Some(header) = header {
            out.push(self.colorize(&header.title, "cyan"));
            if !header.description.is_empty() {
                out.push(header.description.clone());
            }
            out.push(String::new());
        }
    }

    fn push_section<B>(
        &self,
        out: &mut Vec<String>,
        section: &SectionPanel<B>,
        render: impl FnOnce(&B, &mut Vec<String>),
    ) {
        let marker = if section.expanded { "▾" } else { "▸" };
        out.push(self.colorize(&format!("{} {}", marker, section.heading), "magenta"));
        if let Some(body) = section.visible_body() {
            render(body, out);
        }
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            "cyan" => text.cyan().to_string(),
            "magenta" => text.magenta().to_string(),
            _ => text.to_string(),
        }
    }
}

fn push_source(source: &SourcePanel, out: &mut Vec<String>) {
    out.push(format!("  Title:   {}", source.title));
    out.push(format!("  Authors: {}", source.authors));
    if let Some(url) = &source.url {
        out.push(format!("  Link:    {}", url));
    }
    if !source.description.is_empty() {
        out.push(format!("  {}", source.description));
    }
}

fn status_json(status: &PanelStatus) -> Value {
    match status {
        PanelStatus::Pending => json!({"state": "pending"}),
        PanelStatus::Loaded => json!({"state": "loaded"}),
        PanelStatus::Failed(message) => json!({"state": "failed", "error": message}),
    }
}

fn header_json(header: &Header) -> Value {
    json!({"title": header.title, "description": header.description})
}

fn source_json(source: &SourcePanel) -> Value {
    json!({
        "title": source.title,
        "authors": source.authors,
        "url": source.url,
        "description": source.description,
    })
}

fn section_json<B>(section: &SectionPanel<B>, body: impl Fn(&B) -> Value) -> Value {
    json!({
        "heading": section.heading,
        "expanded": section.expanded,
        "body": section.body.as_ref().map(body),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use quaerendo_domain::{ClaimId, ClaimWithEvidence, Disclosure, Evidence, Section};
    use quaerendo_sdk::{RequestState, SdkError};

    fn sparse_panel(disclosure: &Disclosure) -> EvidencePanel {
        let evidence: Evidence = serde_json::from_str(
            r#"{"id": 42, "description": "", "num_expert_reviews": 0, "source_of_evidence": {"title": ""}}"#,
        )
        .unwrap();
        EvidencePanel::from_parts(&RequestState::Loaded(evidence), disclosure)
    }

    fn claim(id: u64, text: &str) -> Claim {
        Claim {
            id: ClaimId::new(id),
            claim_text: text.to_string(),
            description: String::new(),
            topic: None,
            source_of_claim: None,
        }
    }

    #[test]
    fn test_evidence_text_default_disclosure() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = formatter.format_evidence(&sparse_panel(&Disclosure::new())).unwrap();

        assert!(output.contains("Untitled Evidence"));
        assert!(output.contains("No description has been provided"));
        assert!(output.contains("▾ Source"));
        assert!(output.contains("Unknown author"));
        assert!(output.contains("▸ Reviews"));
        assert!(!output.contains("not been reviewed"));
    }

    #[test]
    fn test_evidence_text_reviews_expanded() {
        let mut disclosure = Disclosure::new();
        disclosure.toggle(Section::Reviews);
        disclosure.toggle(Section::Source);

        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = formatter.format_evidence(&sparse_panel(&disclosure)).unwrap();

        assert!(output.contains("This evidence has not been reviewed by experts."));
        assert!(!output.contains("Unknown author"));
    }

    #[test]
    fn test_failed_evidence_text() {
        let request: RequestState<Evidence> = RequestState::Failed(SdkError::HttpError {
            status: 404,
            message: "Not Found".to_string(),
        });
        let panel = EvidencePanel::from_parts(&request, &Disclosure::new());
        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = formatter.format_evidence(&panel).unwrap();

        assert!(output.starts_with("✗ Could not load"));
        assert!(!output.contains("Untitled Evidence"));
    }

    #[test]
    fn test_evidence_json() {
        let formatter = Formatter::new(OutputFormat::Json, false);
        let output = formatter.format_evidence(&sparse_panel(&Disclosure::new())).unwrap();
        let value: Value = serde_json::from_str(&output).unwrap();

        assert_eq!(value["status"]["state"], "loaded");
        assert_eq!(value["header"]["title"], "Untitled Evidence");
        assert_eq!(value["source"]["expanded"], true);
        assert_eq!(value["reviews"]["expanded"], false);
        assert_eq!(
            value["reviews"]["body"],
            "This evidence has not been reviewed by experts."
        );
    }

    #[test]
    fn test_claim_without_source_text() {
        let detail = ClaimWithEvidence {
            claim: claim(5, "Bread rises faster in summer"),
            related_evidence: Vec::new(),
        };
        let panel = ClaimPanel::from_parts(&RequestState::Loaded(detail), &Disclosure::new());
        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = formatter.format_claim(&panel).unwrap();

        assert!(output.contains("▾ Source"));
        assert!(output.contains("No source has been recorded for this claim."));
        assert!(!output.contains("Untitled Evidence"));
    }

    #[test]
    fn test_claims_table() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = formatter
            .format_claims(&[claim(1, "Coffee improves focus"), claim(2, "")])
            .unwrap();
        assert!(output.contains("Coffee improves focus"));
        assert!(output.contains("Untitled Claim"));
    }

    #[test]
    fn test_claims_quiet_and_empty() {
        let quiet = Formatter::new(OutputFormat::Quiet, false);
        assert_eq!(quiet.format_claims(&[claim(1, "a"), claim(2, "b")]).unwrap(), "1\n2");

        let table = Formatter::new(OutputFormat::Table, false);
        assert!(table.format_claims(&[]).unwrap().contains("No claims found"));
    }

    #[test]
    fn test_colorize_disabled() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        assert_eq!(formatter.success("test"), "✓ test");
    }
}
