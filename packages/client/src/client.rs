use flashdeck_core::constants::{LOGIN_ENDPOINT, LOGOUT_ENDPOINT};
use flashdeck_core::SessionRecord;
use flashdeck_storage::AppState;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, COOKIE, SET_COOKIE};
use reqwest::multipart::Form;
use reqwest::{Client, Response};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

use crate::api::{ApiResponse, LoginResponse, ServerResponse};
use crate::error::{ClientError, ClientResult};
use crate::navigation::Navigator;
use crate::notify::{notify_by_response, Notifier, Severity};
use crate::request::{Method, RequestBody, RequestDescriptor};
use crate::session::SessionManager;

/// Toast shown when the server reports an expired session
pub const SESSION_EXPIRED_MESSAGE: &str = "Your session has expired, please log in again";

/// Session-aware client for the Flashdeck JSON API.
///
/// Every request carries the current session record as its `Authorization`
/// header. A `TokenExpired` response logs the client out and surfaces as
/// [`ApiResponse::SessionExpired`]. No timeout is configured; wrap calls in
/// `tokio::time::timeout` where one is needed.
#[derive(Clone)]
pub struct ApiClient {
    http_client: Client,
    base_url: String,
    state: Arc<AppState>,
    session: SessionManager,
    notifier: Arc<dyn Notifier>,
}

impl ApiClient {
    pub fn new(
        base_url: impl Into<String>,
        state: Arc<AppState>,
        notifier: Arc<dyn Notifier>,
        navigator: Arc<dyn Navigator>,
    ) -> ClientResult<Self> {
        let http_client = Client::builder()
            .build()
            .map_err(|e| ClientError::config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self::with_http_client(
            http_client,
            base_url,
            state,
            notifier,
            navigator,
        ))
    }

    pub fn with_http_client(
        http_client: Client,
        base_url: impl Into<String>,
        state: Arc<AppState>,
        notifier: Arc<dyn Notifier>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        let session = SessionManager::new(state.clone(), navigator);
        Self {
            http_client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            state,
            session,
            notifier,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn session(&self) -> &SessionManager {
        &self.session
    }

    /// Absolute URL of an API path
    pub fn endpoint(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    /// Perform one API call.
    ///
    /// Transport failures and non-JSON bodies are returned as errors
    /// unchanged; nothing is retried.
    pub async fn fetching(&self, request: RequestDescriptor) -> ClientResult<ApiResponse> {
        let url = request.target_url();
        let authorization = serde_json::to_string(&self.state.session().get())?;

        debug!("{} {}", request.method, url);
        let mut builder = self
            .http_client
            .request(request.method.to_reqwest(), &url)
            .header(AUTHORIZATION, authorization);

        let cookie = self.state.cookie().get();
        if !cookie.is_empty() {
            builder = builder.header(COOKIE, cookie);
        }

        builder = match (request.method, request.body) {
            (Method::Get, body) => {
                if body.is_some() {
                    debug!("Dropping request body on GET {}", url);
                }
                builder
            }
            (_, Some(RequestBody::Json(data))) => builder
                .header(CONTENT_TYPE, "application/json")
                .body(serde_json::to_string(&data)?),
            (_, Some(RequestBody::Multipart(fields))) => {
                let form = fields
                    .into_iter()
                    .fold(Form::new(), |form, (name, value)| form.text(name, value));
                builder.multipart(form)
            }
            (_, Some(RequestBody::Raw(bytes))) => builder.body(bytes),
            (_, None) => builder,
        };

        let response = builder.send().await?;
        if let Err(e) = self.store_cookies(&response) {
            error!("Failed to store session cookie from {} {}: {}", request.method, url, e);
        }

        let status = response.status();
        let text = response.text().await?;
        let body: Value = serde_json::from_str(&text).map_err(|e| {
            ClientError::invalid_response(format!(
                "{} {} returned a non-JSON body ({}): {}",
                request.method, url, status, e
            ))
        })?;

        let response = ServerResponse::new(body);
        if response.is_token_expired() {
            warn!("Session expired on {} {}", request.method, url);
            let logout_result = self.session.handle_logout(true);
            self.notifier.notify(SESSION_EXPIRED_MESSAGE, Severity::Info);
            logout_result?;
            return Ok(ApiResponse::SessionExpired);
        }

        Ok(ApiResponse::classify(response))
    }

    /// Authenticate and store the new session, person id and permissions.
    ///
    /// A rejected login is toasted from the response and returned as
    /// [`ApiResponse::Failure`].
    pub async fn login(&self, username: &str, password: &str) -> ClientResult<ApiResponse> {
        let request = RequestDescriptor::post(self.endpoint(LOGIN_ENDPOINT))
            .multipart([("username", username), ("password", password)]);

        let response = self.fetching(request).await?;
        match &response {
            ApiResponse::Success(body) => {
                let login: LoginResponse = body.decode()?;
                self.state
                    .session()
                    .set(Some(SessionRecord::authenticated(login.token, username)))?;
                self.state
                    .person_id()
                    .set(login.person_id.unwrap_or_default())?;
                self.state.permissions().set(login.permissions)?;
                info!("Logged in as {}", username);
            }
            ApiResponse::Failure(body) => notify_by_response(self.notifier.as_ref(), body),
            ApiResponse::SessionExpired => {}
        }

        Ok(response)
    }

    /// Invalidate the token on the server, then end the local session.
    ///
    /// The local session is always removed, whatever the server answers; a
    /// failed server call is only logged.
    pub async fn logout(&self) -> ClientResult<()> {
        let request = RequestDescriptor::post(self.endpoint(LOGOUT_ENDPOINT));
        match self.fetching(request).await {
            Ok(response) => debug!("Server logout answered: {:?}", response.response()),
            Err(e) => warn!("Server logout failed: {}", e),
        }

        self.session.handle_logout(false)?;
        Ok(())
    }

    fn store_cookies(&self, response: &Response) -> ClientResult<()> {
        let set_cookies: Vec<&str> = response
            .headers()
            .get_all(SET_COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .collect();

        if set_cookies.is_empty() {
            return Ok(());
        }

        let merged = merge_cookies(&self.state.cookie().get(), &set_cookies);
        self.state.cookie().set(merged)?;
        Ok(())
    }
}

/// Fold `Set-Cookie` values into a `Cookie` header value, replacing cookies
/// of the same name and dropping cookies set to an empty value.
pub fn merge_cookies(existing: &str, set_cookies: &[&str]) -> String {
    let mut cookies: Vec<(String, String)> = existing
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .map(|(name, value)| (name.to_string(), value.to_string()))
        .collect();

    for set_cookie in set_cookies {
        let pair = set_cookie.split(';').next().unwrap_or_default().trim();
        let Some((name, value)) = pair.split_once('=') else {
            continue;
        };
        cookies.retain(|(existing, _)| existing != name);
        if !value.is_empty() {
            cookies.push((name.to_string(), value.to_string()));
        }
    }

    cookies
        .iter()
        .map(|(name, value)| format!("{}={}", name, value))
        .collect::<Vec<_>>()
        .join("; ")
}
