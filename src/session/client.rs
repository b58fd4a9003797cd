//! Authenticated Moodle HTTP session.

use std::time::Duration;

use reqwest::{Client, Response};
use url::Url;

use crate::config::{AuthConfig, Config};
use crate::error::{Error, Result};
use crate::session::auth::{extract_login_token, login_form, verify_logged_in};

/// Settings for establishing a session.
#[derive(Debug, Clone)]
pub struct SessionOptions {
    pub user_agent: String,
    pub login_marker: String,
    pub landing_url: Option<Url>,
    pub download_timeout: Duration,
}

impl SessionOptions {
    pub fn from_config(config: &Config) -> Result<Self> {
        let landing_url = config
            .options
            .landing_url
            .as_deref()
            .map(Url::parse)
            .transpose()?;

        Ok(Self {
            user_agent: config.options.user_agent.clone(),
            login_marker: config.options.login_marker.clone(),
            landing_url,
            download_timeout: config.download_timeout(),
        })
    }
}

/// A fetched HTML page.
#[derive(Debug, Clone)]
pub struct Page {
    /// Final URL after redirects. Relative links resolve against it.
    pub url: Url,
    pub body: String,
}

/// A logged-in session shared by every worker.
///
/// The underlying client keeps the session cookie and a connection pool, both
/// safe for concurrent use.
#[derive(Debug, Clone)]
pub struct MoodleSession {
    client: Client,
    landing_url: Url,
    download_timeout: Duration,
}

impl MoodleSession {
    /// Log in and return a session whose cookie is attached to every later request.
    pub async fn login(auth: &AuthConfig, options: &SessionOptions) -> Result<Self> {
        let login_url = Url::parse(&auth.url)?;

        let client = Client::builder()
            .user_agent(&options.user_agent)
            .cookie_store(true)
            .build()
            .map_err(|e| Error::Authentication(format!("Failed to create HTTP client: {}", e)))?;

        let login_token = fetch_login_token(&client, &login_url).await;

        tracing::debug!("POST {}", login_url);
        let response = client
            .post(login_url)
            .form(&login_form(auth, login_token.as_deref()))
            .send()
            .await?;

        tracing::debug!("Login response status: {}", response.status());
        let final_url = response.url().clone();
        let body = response.text().await?;

        verify_logged_in(&body, &options.login_marker)?;

        let landing_url = options.landing_url.clone().unwrap_or(final_url);
        tracing::debug!("Landing page: {}", landing_url);

        Ok(Self {
            client,
            landing_url,
            download_timeout: options.download_timeout,
        })
    }

    /// Page listing the enrolled courses.
    pub fn landing_url(&self) -> &Url {
        &self.landing_url
    }

    pub fn download_timeout(&self) -> Duration {
        self.download_timeout
    }

    /// Fetch an HTML page with the client's default timeout.
    pub async fn fetch_page(&self, url: &Url) -> Result<Page> {
        tracing::debug!("GET {}", url);

        let response = self.client.get(url.clone()).send().await?;
        let response = response.error_for_status()?;

        let url = response.url().clone();
        let body = response.text().await?;

        Ok(Page { url, body })
    }

    /// Start downloading a resource.
    ///
    /// The download timeout bounds the wait for the response headers only.
    /// Callers reading the body bound each chunk with [`Self::download_timeout`],
    /// so a slow transfer that keeps making progress is never cut off.
    /// Redirects are followed; `Response::url` is the resolved target.
    pub async fn fetch_resource(&self, url: &Url) -> Result<Response> {
        tracing::debug!("GET {} (timeout {:?})", url, self.download_timeout);

        let request = self.client.get(url.clone()).send();
        let response = tokio::time::timeout(self.download_timeout, request)
            .await
            .map_err(|_| {
                Error::Timeout(format!(
                    "no response from {} within {:?}",
                    url, self.download_timeout
                ))
            })??;

        if !response.status().is_success() {
            return Err(Error::Download(format!(
                "Failed to download file: HTTP {}",
                response.status()
            )));
        }

        Ok(response)
    }
}

/// Best-effort fetch of the login page's `logintoken`.
async fn fetch_login_token(client: &Client, login_url: &Url) -> Option<String> {
    let response = client.get(login_url.clone()).send().await.ok()?;
    if !response.status().is_success() {
        return None;
    }

    let body = response.text().await.ok()?;
    let token = extract_login_token(&body);
    if token.is_some() {
        tracing::debug!("Found login token on {}", login_url);
    }

    token
}
