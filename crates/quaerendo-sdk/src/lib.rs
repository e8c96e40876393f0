//! Quaerendo Rust SDK
//!
//! Session and authorized data access for the Quaerendo fact-checking API,
//! plus the view-side state that sits on top of it: tri-state request
//! results, detail views that discard stale responses, render panels, and
//! the route table.
//!
//! # Example
//!
//! ```no_run
//! use quaerendo_sdk::{ApiClient, EvidencePanel, EvidenceView, FileTokenStore, Route, Session};
//!
//! # async fn demo() -> Result<(), quaerendo_sdk::SdkError> {
//! let session = Session::open(FileTokenStore::new("storage.json"));
//! let client = ApiClient::new("http://localhost:8000", session)?;
//!
//! if let Route::EvidenceDetail(id) = Route::resolve("/evidence/42") {
//!     let view = EvidenceView::mount();
//!     view.request(id).run(&client).await;
//!     let panel = EvidencePanel::render(&view);
//!     println!("{:?}", panel.header);
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod client;
mod error;
mod panel;
pub mod paths;
mod request;
mod routes;
mod session;
mod view;

pub use client::{authorization_header, ApiClient, Resource, DEFAULT_TIMEOUT, TOKEN_SCHEME};
pub use error::SdkError;
pub use panel::{
    ClaimPanel, EvidencePanel, EvidenceRow, Header, PanelStatus, SectionPanel, SourcePanel,
};
pub use request::RequestState;
pub use routes::Route;
pub use session::{FileTokenStore, MemoryTokenStore, Session, TokenStore, TOKEN_SLOT};
pub use view::{ClaimView, DetailView, EvidenceView, LoadOutcome, PendingLoad, ViewSnapshot};
