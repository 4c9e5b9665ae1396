use crate::{
    auth::Session,
    error::{
        Error,
        Result,
    },
};
use fc_metrics_config::TlsPolicy;
use reqwest::{
    header::{
        HeaderName,
        HeaderValue,
        ACCEPT,
        CONTENT_TYPE,
    },
    Method,
    Request,
    Response,
};
use serde::Serialize;
use std::time::Duration;
use url::Url;

pub const X_AUTH_TOKEN: HeaderName = HeaderName::from_static("x-auth-token");
pub const ACCEPT_JSON_V8: &str = "application/json;version=8.1;charset=UTF-8";
pub const CONTENT_TYPE_JSON: &str = "application/json;charset=UTF-8";

/// Builds the HTTP client shared by the login call and the [`Transport`].
pub fn build_client(tls: TlsPolicy, request_timeout: Duration) -> Result<reqwest::Client> {
    if tls.accepts_invalid_certs() {
        warn!("TLS certificate verification is disabled");
    }
    reqwest::Client::builder()
        .danger_accept_invalid_certs(tls.accepts_invalid_certs())
        .timeout(request_timeout)
        .build()
        .map_err(Error::Client)
}

/// Routes authenticated API calls. Every request gets the session token and the versioned JSON headers.
#[derive(Debug, Clone)]
pub struct Transport {
    client: reqwest::Client,
    session: Option<Session>,
}

impl Transport {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client, session: None }
    }

    pub fn with_session(client: reqwest::Client, session: Session) -> Self {
        Self {
            client,
            session: Some(session),
        }
    }

    /// Installs the session produced by the login call. Requests fail with [`Error::AuthNotReady`] until then.
    pub fn install_session(&mut self, session: Session) {
        self.session = Some(session);
    }

    pub fn is_ready(&self) -> bool {
        self.session.is_some()
    }

    pub fn client(&self) -> &reqwest::Client {
        &self.client
    }

    pub async fn send(&self, mut request: Request) -> Result<Response> {
        let session = self.session.as_ref().ok_or(Error::AuthNotReady)?;
        let token = HeaderValue::from_str(session.token())
            .map_err(|_| Error::Authentication("session token is not a valid header value".to_string()))?;

        let headers = request.headers_mut();
        headers.insert(X_AUTH_TOKEN, token);
        headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_JSON_V8));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(CONTENT_TYPE_JSON));

        let url = request.url().clone();
        trace!(method = %request.method(), %url, "Sending request");
        self.client.execute(request).await.map_err(|e| Error::request(&url, e))
    }

    pub async fn get(&self, url: Url) -> Result<Response> {
        self.send(Request::new(Method::GET, url)).await
    }

    pub async fn post_json<T: Serialize + ?Sized>(&self, url: Url, payload: &T) -> Result<Response> {
        let body = serde_json::to_vec(payload).map_err(Error::Encode)?;
        let mut request = Request::new(Method::POST, url);
        *request.body_mut() = Some(body.into());
        self.send(request).await
    }
}
