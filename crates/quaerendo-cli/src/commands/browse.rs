//! Browsing commands: claim listing, claim and evidence detail, path resolution.

use crate::cli::{ClaimArgs, EvidenceArgs, OpenArgs, ToggleArgs};
use crate::error::Result;
use crate::output::Formatter;
use quaerendo_domain::{ClaimId, EvidenceId, Section};
use quaerendo_sdk::{
    ApiClient, ClaimPanel, ClaimView, DetailView, EvidencePanel, EvidenceView, Resource, Route,
};
use tracing::debug;

/// Execute the claims command.
pub async fn execute_claims(client: &ApiClient, formatter: &Formatter) -> Result<()> {
    let claims = client.claims().await?;
    println!("{}", formatter.format_claims(&claims)?);
    Ok(())
}

/// Execute the claim command.
pub async fn execute_claim(args: ClaimArgs, client: &ApiClient, formatter: &Formatter) -> Result<()> {
    show_claim(args.id, args.toggles, client, formatter).await
}

/// Execute the evidence command.
pub async fn execute_evidence(
    args: EvidenceArgs,
    client: &ApiClient,
    formatter: &Formatter,
) -> Result<()> {
    show_evidence(args.id, args.toggles, client, formatter).await
}

/// Execute the open command.
pub async fn execute_open(args: OpenArgs, client: &ApiClient, formatter: &Formatter) -> Result<()> {
    let route = Route::resolve(&args.path);
    debug!(path = %args.path, %route, "Resolved route");

    match route {
        Route::ClaimDetail(id) => show_claim(id, args.toggles, client, formatter).await,
        Route::EvidenceDetail(id) => show_evidence(id, args.toggles, client, formatter).await,
        Route::ClaimList => execute_claims(client, formatter).await,
        Route::SubmitClaim => {
            println!("{}", formatter.info("Use `quaerendo submit-claim <TEXT>` to submit a claim"));
            Ok(())
        }
        Route::SubmitEvidence(id) => {
            println!(
                "{}",
                formatter.info(&format!(
                    "Use `quaerendo submit-evidence {} --relationship <REL>` to submit evidence",
                    id
                ))
            );
            Ok(())
        }
        Route::Login => {
            println!("{}", formatter.info("Use `quaerendo login <USERNAME>` to log in"));
            Ok(())
        }
        Route::Register => {
            println!(
                "{}",
                formatter.info("Use `quaerendo register <USERNAME> --email <EMAIL>` to register")
            );
            Ok(())
        }
    }
}

async fn show_claim(
    id: ClaimId,
    toggles: ToggleArgs,
    client: &ApiClient,
    formatter: &Formatter,
) -> Result<()> {
    let view = ClaimView::mount();
    apply_toggles(&view, toggles);
    let outcome = view.request(id).run(client).await;
    debug!(%id, ?outcome, "Claim load finished");

    println!("{}", formatter.format_claim(&ClaimPanel::render(&view))?);
    Ok(())
}

async fn show_evidence(
    id: EvidenceId,
    toggles: ToggleArgs,
    client: &ApiClient,
    formatter: &Formatter,
) -> Result<()> {
    let view = EvidenceView::mount();
    apply_toggles(&view, toggles);
    let outcome = view.request(id).run(client).await;
    debug!(%id, ?outcome, "Evidence load finished");

    println!("{}", formatter.format_evidence(&EvidencePanel::render(&view))?);
    Ok(())
}

fn apply_toggles<T: Resource>(view: &DetailView<T>, toggles: ToggleArgs) {
    if toggles.toggle_source {
        view.toggle(Section::Source);
    }
    if toggles.toggle_reviews {
        view.toggle(Section::Reviews);
    }
}
