//! Cookie-carrying HTTP session for URL sources.
//!
//! A fetch is a two-step protocol: an optional [`HttpSession::login`] that
//! submits a form and leaves its cookies in the session, then
//! [`HttpSession::fetch`] which retrieves the target through the same
//! session.

use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Response};
use tracing::{debug, info, instrument};
use url::Url;

use resumekit_shared::{
    AuthPlan, ContentBlob, Credentials, DEFAULT_CONTENT_TYPE, FetchConfig, FormLogin,
    ResumeKitError, Result, UrlSource, redact_url,
};

/// User-Agent string for all requests.
const USER_AGENT: &str = concat!("resumekit/", env!("CARGO_PKG_VERSION"));

/// One acquisition's worth of HTTP state: client settings plus cookies.
pub struct HttpSession {
    client: Client,
    config: FetchConfig,
}

impl HttpSession {
    /// Create a fresh session with an empty cookie store.
    pub fn new(config: &FetchConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .cookie_store(true)
            .redirect(reqwest::redirect::Policy::limited(config.max_redirects))
            .build()
            .map_err(|e| {
                ResumeKitError::source_unavailable("http", format!("failed to build HTTP client: {e}"))
            })?;

        Ok(Self {
            client,
            config: config.clone(),
        })
    }

    /// Submit the login form. Cookies from the response chain stay in the
    /// session; a non-success final status is an error.
    #[instrument(skip_all, fields(login_url = %redact_url(&login.url)))]
    pub async fn login(&self, login: &FormLogin, credentials: &Credentials) -> Result<()> {
        let source_id = &redact_url(&login.url);
        ensure_http(&login.url)?;

        debug!(
            user_field = %login.user_field,
            extra_fields = login.extra.len(),
            "submitting login form"
        );

        let response = self
            .client
            .post(login.url.clone())
            .form(&login.payload(credentials))
            .timeout(self.config.login_timeout)
            .send()
            .await
            .map_err(|e| request_error(source_id, "login request failed", e))?;

        let response = require_success(source_id, "login", response)?;
        info!(status = %response.status(), "login succeeded");
        Ok(())
    }

    /// Retrieve `url`, optionally with HTTP Basic credentials.
    #[instrument(skip_all, fields(url = %redact_url(url), basic_auth = basic.is_some()))]
    pub async fn fetch(&self, url: &Url, basic: Option<&Credentials>) -> Result<ContentBlob> {
        let source_id = &redact_url(url);
        ensure_http(url)?;

        let mut request = self.client.get(url.clone()).timeout(self.config.fetch_timeout);
        if let Some(creds) = basic {
            request = request.basic_auth(&creds.username, Some(&creds.password));
        }

        let response = request
            .send()
            .await
            .map_err(|e| request_error(source_id, "request failed", e))?;

        let response = require_success(source_id, "fetch", response)?;
        let declared = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        let bytes = response
            .bytes()
            .await
            .map_err(|e| request_error(source_id, "body read failed", e))?;

        let content_type = resolve_content_type(declared.as_deref(), url);
        debug!(%content_type, len = bytes.len(), "fetched");

        Ok(ContentBlob::new(bytes.to_vec(), content_type, source_id))
    }
}

/// Fetch a URL source, running the login step first when the plan asks for it.
#[instrument(skip_all, fields(url = %redact_url(&source.url), auth = source.auth.kind()))]
pub async fn fetch_url(source: &UrlSource, config: &FetchConfig) -> Result<ContentBlob> {
    let session = HttpSession::new(config)?;

    let basic = match &source.auth {
        AuthPlan::Anonymous => None,
        AuthPlan::Basic(credentials) => Some(credentials),
        AuthPlan::FormLogin { login, credentials } => {
            session.login(login, credentials).await?;
            None
        }
    };

    session.fetch(&source.url, basic).await
}

/// Content type of a response: declared header (without parameters,
/// lower-cased), else a guess from the URL path, else plain text.
pub fn resolve_content_type(declared: Option<&str>, url: &Url) -> String {
    let declared = declared
        .and_then(|ct| ct.split(';').next())
        .map(|ct| ct.trim().to_ascii_lowercase())
        .filter(|ct| !ct.is_empty());

    declared
        .or_else(|| {
            mime_guess::from_path(url.path())
                .first()
                .map(|m| m.essence_str().to_ascii_lowercase())
        })
        .unwrap_or_else(|| DEFAULT_CONTENT_TYPE.to_string())
}

fn ensure_http(url: &Url) -> Result<()> {
    match url.scheme() {
        "http" | "https" => Ok(()),
        other => Err(ResumeKitError::source_unavailable(
            redact_url(url),
            format!("unsupported URL scheme '{other}'"),
        )),
    }
}

fn require_success(source_id: &str, step: &str, response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(ResumeKitError::source_unavailable(
            source_id,
            format!("{step} returned HTTP {status}"),
        ))
    }
}

fn request_error(source_id: &str, context: &str, err: reqwest::Error) -> ResumeKitError {
    let reason = if err.is_timeout() {
        format!("{context}: timed out")
    } else {
        // Strip the URL from reqwest's message; the source id already names it.
        format!("{context}: {}", err.without_url())
    };
    ResumeKitError::source_unavailable(source_id, reason)
}
