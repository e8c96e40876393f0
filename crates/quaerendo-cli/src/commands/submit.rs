//! Submission commands.

use crate::cli::{SourceArgs, SubmitClaimArgs, SubmitEvidenceArgs};
use crate::error::{CliError, Result};
use crate::output::Formatter;
use quaerendo_domain::{EvidenceReview, NewClaim, NewEvidence, NewSource};
use quaerendo_sdk::ApiClient;

/// Execute the submit-claim command.
pub async fn execute_submit_claim(
    args: SubmitClaimArgs,
    client: &ApiClient,
    formatter: &Formatter,
) -> Result<()> {
    let claim = build_claim(args)?;
    warn_if_anonymous(client, formatter);

    let created = client.submit_claim(&claim).await?;
    println!("{}", formatter.success(&format!("Claim submitted: /claim/{}", created.id)));
    Ok(())
}

/// Execute the submit-evidence command.
pub async fn execute_submit_evidence(
    args: SubmitEvidenceArgs,
    client: &ApiClient,
    formatter: &Formatter,
) -> Result<()> {
    let evidence = build_evidence(args);
    warn_if_anonymous(client, formatter);

    client.submit_evidence(&evidence).await?;
    println!(
        "{}",
        formatter.success(&format!("Evidence submitted for /claim/{}", evidence.claim))
    );
    Ok(())
}

fn warn_if_anonymous(client: &ApiClient, formatter: &Formatter) {
    if !client.session().is_authenticated() {
        eprintln!(
            "{}",
            formatter.warning("Not logged in; the server may reject this submission")
        );
    }
}

fn build_source(args: SourceArgs) -> NewSource {
    NewSource {
        title: args.source_title,
        url: args.source_url,
        description: args.source_description,
        authors: args.authors,
    }
}

fn build_claim(args: SubmitClaimArgs) -> Result<NewClaim> {
    let claim_text = args.text.trim().to_string();
    if claim_text.is_empty() {
        return Err(CliError::InvalidInput("Claim text must not be empty".to_string()));
    }

    Ok(NewClaim {
        claim_text,
        description: args.description,
        source_of_claim: build_source(args.source),
    })
}

fn build_evidence(args: SubmitEvidenceArgs) -> NewEvidence {
    NewEvidence {
        claim: args.claim_id,
        source_of_evidence: build_source(args.source),
        description: args.description,
        reviews: vec![EvidenceReview {
            deduced_evidence_relationship: args.relationship.into(),
            additional_comments: args.comments,
        }],
    }
}
