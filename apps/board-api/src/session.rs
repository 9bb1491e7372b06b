//! Session carrier: binds a signed token to the browser through an
//! HTTP-only cookie whose value is `"Bearer " + token`.

use actix_web::HttpRequest;
use actix_web::cookie::{Cookie, SameSite, time::Duration};

/// Prefix carried inside the cookie value.
const BEARER_PREFIX: &str = "Bearer ";

/// Cookie policy, taken verbatim from configuration. Domain, secure, and
/// same-site are deployment concerns, not part of the identity contract.
#[derive(Debug, Clone)]
pub struct CookieConfig {
    pub name: String,
    pub domain: Option<String>,
    pub secure: bool,
    pub same_site: SameSite,
}

impl Default for CookieConfig {
    fn default() -> Self {
        Self {
            name: "session".to_string(),
            domain: None,
            secure: false,
            same_site: SameSite::Lax,
        }
    }
}

/// Build the session cookie carrying a freshly issued token. Max-Age matches
/// the token lifetime so cookie and token expire together.
pub fn session_cookie(cfg: &CookieConfig, token: &str, max_age_seconds: i64) -> Cookie<'static> {
    let mut builder = Cookie::build(cfg.name.clone(), format!("{BEARER_PREFIX}{token}"))
        .path("/")
        .http_only(true)
        .secure(cfg.secure)
        .same_site(cfg.same_site)
        .max_age(Duration::seconds(max_age_seconds));

    if let Some(domain) = &cfg.domain {
        builder = builder.domain(domain.clone());
    }

    builder.finish()
}

/// Build a removal cookie. Attributes must match the original cookie or the
/// client will not delete it.
pub fn removal_cookie(cfg: &CookieConfig) -> Cookie<'static> {
    let mut builder = Cookie::build(cfg.name.clone(), "")
        .path("/")
        .http_only(true)
        .secure(cfg.secure)
        .same_site(cfg.same_site)
        .max_age(Duration::ZERO);

    if let Some(domain) = &cfg.domain {
        builder = builder.domain(domain.clone());
    }

    builder.finish()
}

/// Read the named session cookie, stripping the `"Bearer "` prefix when
/// present. `None` when the cookie is absent.
pub fn extract(req: &HttpRequest, name: &str) -> Option<String> {
    let cookie = req.cookie(name)?;
    let value = cookie.value();
    Some(value.strip_prefix(BEARER_PREFIX).unwrap_or(value).to_string())
}
