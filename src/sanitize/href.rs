//! Link target validation.

use url::Url;

/// Schemes a link mark may point at.
pub const SAFE_SCHEMES: [&str; 4] = ["http", "https", "mailto", "tel"];

/// Check whether `href` is an absolute URL with an allowed scheme.
///
/// Relative references (`/about`, `#top`, `page.html`) do not parse without a
/// base and are rejected, as is anything with a `javascript:` or `data:`
/// scheme.
#[inline]
pub fn is_safe_href(href: &str) -> bool {
    let href = href.trim();
    !href.is_empty() && Url::parse(href).is_ok_and(|url| SAFE_SCHEMES.contains(&url.scheme()))
}
