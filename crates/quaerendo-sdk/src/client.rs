//! Authorized request layer.
//!
//! Every request reads the token from the shared [`Session`] at call time, so
//! a login that happens while a view is open takes effect on that view's next
//! request. Each call is a single attempt; nothing is retried automatically.

use crate::error::SdkError;
use crate::paths;
use crate::request::RequestState;
use crate::session::Session;
use quaerendo_domain::{Claim, ClaimId, ClaimWithEvidence, Evidence, EvidenceId, NewClaim, NewEvidence};
use reqwest::header::AUTHORIZATION;
use reqwest::{RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Transport timeout applied when none is configured
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Scheme prefix of the Authorization header value
pub const TOKEN_SCHEME: &str = "TOKEN";

/// Authorization header value for `token`
///
/// Returns `None` when there is no token (or it is empty), in which case the
/// header is omitted and the server treats the request as anonymous.
///
/// # Examples
///
/// ```
/// use quaerendo_sdk::authorization_header;
///
/// assert_eq!(authorization_header(Some("abc123")).as_deref(), Some("TOKEN abc123"));
/// assert_eq!(authorization_header(None), None);
/// ```
pub fn authorization_header(token: Option<&str>) -> Option<String> {
    token
        .filter(|t| !t.is_empty())
        .map(|t| format!("{} {}", TOKEN_SCHEME, t))
}

/// An entity that a detail view can load by id
pub trait Resource: DeserializeOwned + Send {
    /// Identifier taken from the route
    type Id: Copy + fmt::Display + fmt::Debug + PartialEq + Send + Sync;

    /// REST path of the entity with `id`
    fn api_path(id: Self::Id) -> String;
}

impl Resource for Evidence {
    type Id = EvidenceId;

    fn api_path(id: EvidenceId) -> String {
        paths::evidence(id)
    }
}

impl Resource for ClaimWithEvidence {
    type Id = ClaimId;

    fn api_path(id: ClaimId) -> String {
        paths::claim(id)
    }
}

/// Login request body
#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    username: &'a str,
    password: &'a str,
}

/// Registration request body
#[derive(Debug, Serialize)]
struct RegisterRequest<'a> {
    username: &'a str,
    email: &'a str,
    password: &'a str,
}

/// Token issued by login and registration
#[derive(Debug, Deserialize)]
struct TokenResponse {
    token: String,
}

/// HTTP client for the Quaerendo API
///
/// Holds a [`Session`] handle rather than a token, and attaches
/// `Authorization: TOKEN <token>` to each request only when a token is held.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    http: reqwest::Client,
    session: Session,
}

impl ApiClient {
    /// Create a client for the API at `base_url` with the default timeout
    pub fn new(base_url: &str, session: Session) -> Result<Self, SdkError> {
        Self::with_timeout(base_url, session, DEFAULT_TIMEOUT)
    }

    /// Create a client with an explicit transport timeout
    pub fn with_timeout(
        base_url: &str,
        session: Session,
        timeout: Duration,
    ) -> Result<Self, SdkError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self::with_http_client(base_url, session, http))
    }

    /// Create a client around an existing `reqwest::Client`
    pub fn with_http_client(base_url: &str, session: Session, http: reqwest::Client) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
            session,
        }
    }

    /// Base URL of the API
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The session whose token is attached to requests
    pub fn session(&self) -> &Session {
        &self.session
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorize(&self, request: RequestBuilder) -> (RequestBuilder, bool) {
        match authorization_header(self.session.token().as_deref()) {
            Some(value) => (request.header(AUTHORIZATION, value), true),
            None => (request, false),
        }
    }

    /// `GET path` and decode the JSON body, `None` when the body is empty
    pub async fn get_optional_json<T: DeserializeOwned>(
        &self,
        path: &str,
    ) -> Result<Option<T>, SdkError> {
        let (request, authorized) = self.authorize(self.http.get(self.url(path)));
        debug!(path, authorized, "GET");
        let response = request.send().await?;
        decode(path, response).await
    }

    /// `GET path` and decode the JSON body
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, SdkError> {
        self.get_optional_json(path)
            .await?
            .ok_or_else(|| empty_body(path))
    }

    async fn post_optional_json<B, T>(&self, path: &str, body: &B) -> Result<Option<T>, SdkError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let (request, authorized) = self.authorize(self.http.post(self.url(path)).json(body));
        debug!(path, authorized, "POST");
        let response = request.send().await?;
        decode(path, response).await
    }

    /// `POST path` with a JSON body and decode the JSON response
    pub async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, SdkError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.post_optional_json(path, body)
            .await?
            .ok_or_else(|| empty_body(path))
    }

    /// `GET path`, collapsing the outcome into a [`RequestState`]
    ///
    /// A success without a body stays `Pending`.
    pub async fn fetch<T: DeserializeOwned>(&self, path: &str) -> RequestState<T> {
        match self.get_optional_json(path).await {
            Ok(Some(value)) => RequestState::Loaded(value),
            Ok(None) => RequestState::Pending,
            Err(e) => RequestState::Failed(e),
        }
    }

    /// Fetch a piece of evidence with its source
    pub async fn evidence(&self, id: EvidenceId) -> Result<Evidence, SdkError> {
        self.get_json(&paths::evidence(id)).await
    }

    /// Fetch a claim with its related evidence
    pub async fn claim(&self, id: ClaimId) -> Result<ClaimWithEvidence, SdkError> {
        self.get_json(&paths::claim(id)).await
    }

    /// List claims
    pub async fn claims(&self) -> Result<Vec<Claim>, SdkError> {
        self.get_json(paths::CLAIMS).await
    }

    /// Submit a new claim, returning it as the server stored it
    pub async fn submit_claim(&self, claim: &NewClaim) -> Result<Claim, SdkError> {
        let created: Claim = self.post_json(paths::CLAIMS, claim).await?;
        info!(claim_id = %created.id, "Claim submitted");
        Ok(created)
    }

    /// Submit evidence (and the submitter's review) for an existing claim
    pub async fn submit_evidence(&self, evidence: &NewEvidence) -> Result<(), SdkError> {
        let _echo: Option<serde_json::Value> =
            self.post_optional_json(paths::EVIDENCE, evidence).await?;
        info!(claim_id = %evidence.claim, "Evidence submitted");
        Ok(())
    }

    /// Log in and store the issued token in the session
    pub async fn login(&self, username: &str, password: &str) -> Result<(), SdkError> {
        let body = LoginRequest { username, password };
        let response: TokenResponse = self
            .post_json(paths::LOGIN, &body)
            .await
            .map_err(auth_error)?;
        self.session.set_token(&response.token)?;
        info!(username, "Logged in");
        Ok(())
    }

    /// Register an account and store the issued token in the session
    pub async fn register(&self, username: &str, email: &str, password: &str) -> Result<(), SdkError> {
        let body = RegisterRequest {
            username,
            email,
            password,
        };
        let response: TokenResponse = self
            .post_json(paths::REGISTER, &body)
            .await
            .map_err(auth_error)?;
        self.session.set_token(&response.token)?;
        info!(username, "Registered");
        Ok(())
    }

    /// Forget the session token
    pub fn logout(&self) -> Result<(), SdkError> {
        self.session.clear_token()
    }
}

async fn decode<T: DeserializeOwned>(path: &str, response: Response) -> Result<Option<T>, SdkError> {
    let status = response.status();
    if !status.is_success() {
        let message = response
            .text()
            .await
            .ok()
            .filter(|body| !body.is_empty())
            .unwrap_or_else(|| status.canonical_reason().unwrap_or("Unknown error").to_string());
        warn!(path, status = status.as_u16(), "Request failed");
        return Err(SdkError::HttpError {
            status: status.as_u16(),
            message,
        });
    }

    let body = response.bytes().await?;
    if body.iter().all(u8::is_ascii_whitespace) {
        debug!(path, "Empty response body");
        return Ok(None);
    }

    serde_json::from_slice(&body).map(Some).map_err(|e| {
        warn!(path, error = %e, "Malformed payload");
        SdkError::from(e)
    })
}

fn empty_body(path: &str) -> SdkError {
    SdkError::PayloadError(format!("{}: empty response body", path))
}

fn auth_error(e: SdkError) -> SdkError {
    match e {
        SdkError::HttpError { status, message } if (400..500).contains(&status) => {
            SdkError::AuthError(format!("HTTP {}: {}", status, message))
        }
        other => other,
    }
}
