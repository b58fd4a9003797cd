//! Login form handling and authenticated-state checks.

use scraper::{Html, Selector};

use crate::config::AuthConfig;
use crate::error::{Error, Result};

/// Build the login form body.
///
/// Recent Moodle releases reject logins without the `logintoken` hidden field
/// served on the login page, so it is forwarded when one was found.
pub fn login_form(auth: &AuthConfig, login_token: Option<&str>) -> Vec<(&'static str, String)> {
    let mut form = vec![
        ("username", auth.username.clone()),
        ("password", auth.password.clone()),
    ];

    if let Some(token) = login_token {
        form.push(("logintoken", token.to_string()));
    }

    form
}

/// Extract the `logintoken` hidden input from a login page, if present.
pub fn extract_login_token(html: &str) -> Option<String> {
    let selector = Selector::parse(r#"input[name="logintoken"]"#).ok()?;
    let document = Html::parse_document(html);

    document
        .select(&selector)
        .filter_map(|input| input.value().attr("value"))
        .map(str::trim)
        .find(|value| !value.is_empty())
        .map(str::to_string)
}

/// Check that a page body belongs to an authenticated session.
pub fn verify_logged_in(body: &str, marker: &str) -> Result<()> {
    if body.contains(marker) {
        return Ok(());
    }

    Err(Error::Authentication(format!(
        "Cannot connect to Moodle: '{}' not found after login. Check auth.username, auth.password and auth.url",
        marker
    )))
}
