//! Link records, link input validation, and partial link updates.
//!
//! A link's `title` must be non-empty after trimming and its `url` must parse
//! as an absolute URL. Input URLs with no scheme are normalized by prefixing
//! `https://` before validation, so `github.com/alice` is accepted as
//! `https://github.com/alice` and `example.com:8080` as
//! `https://example.com:8080`.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::TypeError;
use crate::ids::LinkId;

/// A single outbound link owned by exactly one user.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub id: LinkId,
    pub title: String,
    pub url: String,
    /// Optional icon hint for the presentation layer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    /// Zero-based rank among the owner's links.
    pub order: usize,
}

/// Validated input for appending a new link.
///
/// Construction trims and validates the title and URL, so a `NewLink` can be
/// persisted without further checks.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewLink {
    title: String,
    url: String,
    icon: Option<String>,
}

impl NewLink {
    /// Validate a title and URL for a new link.
    pub fn new(title: &str, url: &str) -> Result<Self, TypeError> {
        Ok(Self {
            title: validate_title(title)?,
            url: validate_url(url)?,
            icon: None,
        })
    }

    /// Attach an icon hint. Blank icons are ignored.
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        let icon = icon.into();
        let trimmed = icon.trim();
        self.icon = (!trimmed.is_empty()).then(|| trimmed.to_string());
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Build the persisted link with a fresh id at the given order index.
    pub fn into_link(self, order: usize) -> Link {
        Link {
            id: LinkId::new(),
            title: self.title,
            url: self.url,
            icon: self.icon,
            order,
        }
    }
}

/// Field-wise partial update for a [`Link`].
///
/// Unset fields keep their stored values. The link id and order are not
/// patchable; ordering only changes through a reorder.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkPatch {
    pub title: Option<String>,
    pub url: Option<String>,
    pub icon: Option<String>,
}

impl LinkPatch {
    /// Returns `true` if no field is set.
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.url.is_none() && self.icon.is_none()
    }

    /// Merge this patch into `link`, validating any supplied title or URL.
    ///
    /// On error `link` is left untouched.
    pub fn apply(&self, link: &mut Link) -> Result<(), TypeError> {
        let title = self.title.as_deref().map(validate_title).transpose()?;
        let url = self.url.as_deref().map(validate_url).transpose()?;

        if let Some(title) = title {
            link.title = title;
        }
        if let Some(url) = url {
            link.url = url;
        }
        if let Some(icon) = &self.icon {
            let trimmed = icon.trim();
            link.icon = (!trimmed.is_empty()).then(|| trimmed.to_string());
        }
        Ok(())
    }
}

/// Trim a link title, rejecting blank titles.
pub fn validate_title(title: &str) -> Result<String, TypeError> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(TypeError::EmptyTitle);
    }
    Ok(trimmed.to_string())
}

/// Schemes a link may never carry.
const BLOCKED_SCHEMES: &[&str] = &["javascript"];

/// Prefix `https://` onto a trimmed URL that carries no scheme.
///
/// Input with `://` is left alone, as is `scheme:rest` where the part before
/// the colon cannot be a host (`mailto:`, `tel:`, `sms:`). A leading
/// `host:port` such as `example.com:8080` or `localhost:3000` gets the prefix.
pub fn normalize_url(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() || !needs_scheme(trimmed) {
        return trimmed.to_string();
    }
    format!("https://{trimmed}")
}

fn needs_scheme(url: &str) -> bool {
    if url.contains("://") {
        return false;
    }
    match url.split_once(':') {
        None => true,
        Some((head, _)) => {
            head.contains(['.', '/']) || head.eq_ignore_ascii_case("localhost")
        }
    }
}

/// Normalize a URL and require it to parse as an absolute URL.
///
/// Any absolute URL is accepted except `javascript:`.
/// The returned string is the normalized input, not the parser's canonical
/// serialization, so `https://alice.dev` is stored without a trailing slash.
pub fn validate_url(raw: &str) -> Result<String, TypeError> {
    let normalized = normalize_url(raw);
    if normalized.is_empty() {
        return Err(TypeError::InvalidUrl {
            url: raw.to_string(),
            reason: "url must not be empty".into(),
        });
    }
    let parsed = Url::parse(&normalized).map_err(|e| TypeError::InvalidUrl {
        url: raw.to_string(),
        reason: e.to_string(),
    })?;
    if BLOCKED_SCHEMES.contains(&parsed.scheme()) {
        return Err(TypeError::InvalidUrl {
            url: raw.to_string(),
            reason: format!("url scheme {:?} is not allowed", parsed.scheme()),
        });
    }
    Ok(normalized)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_link() -> Link {
        NewLink::new("GitHub", "https://github.com/alice")
            .unwrap()
            .into_link(0)
    }

    #[test]
    fn new_link_trims_fields() {
        let link = NewLink::new("  Site  ", "  https://alice.dev ").unwrap();
        assert_eq!(link.title(), "Site");
        assert_eq!(link.url(), "https://alice.dev");
    }

    #[test]
    fn new_link_rejects_blank_title() {
        assert_eq!(
            NewLink::new("   ", "https://alice.dev").unwrap_err(),
            TypeError::EmptyTitle
        );
    }

    #[test]
    fn new_link_rejects_empty_url() {
        let err = NewLink::new("Site", "  ").unwrap_err();
        assert!(matches!(err, TypeError::InvalidUrl { .. }));
    }

    #[test]
    fn new_link_rejects_malformed_url() {
        let err = NewLink::new("Site", "not a url").unwrap_err();
        assert!(matches!(err, TypeError::InvalidUrl { .. }), "got {err}");
    }

    #[test]
    fn schemeless_url_gets_https_prefix() {
        assert_eq!(normalize_url("github.com/alice"), "https://github.com/alice");
        assert_eq!(normalize_url("http://alice.dev"), "http://alice.dev");
        assert_eq!(normalize_url("mailto:alice@x.com"), "mailto:alice@x.com");
    }

    #[test]
    fn host_port_gets_https_prefix() {
        assert_eq!(
            validate_url("example.com:8080").unwrap(),
            "https://example.com:8080"
        );
        assert_eq!(
            validate_url("localhost:3000/app").unwrap(),
            "https://localhost:3000/app"
        );
    }

    #[test]
    fn mailto_is_accepted() {
        assert!(validate_url("mailto:alice@x.com").is_ok());
    }

    #[test]
    fn other_opaque_schemes_are_accepted() {
        assert_eq!(validate_url("sms:+15551234").unwrap(), "sms:+15551234");
        assert_eq!(validate_url("tel:+15551234").unwrap(), "tel:+15551234");
    }

    #[test]
    fn opaque_script_url_is_rejected() {
        let err = validate_url("javascript:alert(1)").unwrap_err();
        assert!(matches!(err, TypeError::InvalidUrl { .. }));
        assert!(validate_url("JavaScript:alert(1)").is_err());
    }

    #[test]
    fn into_link_assigns_order_and_fresh_id() {
        let a = NewLink::new("A", "https://a.dev").unwrap().into_link(3);
        let b = NewLink::new("A", "https://a.dev").unwrap().into_link(3);
        assert_eq!(a.order, 3);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn blank_icon_is_dropped() {
        let link = NewLink::new("A", "https://a.dev")
            .unwrap()
            .with_icon("  ")
            .into_link(0);
        assert!(link.icon.is_none());
    }

    #[test]
    fn patch_merges_only_supplied_fields() {
        let mut link = sample_link();
        let original = link.clone();
        let patch = LinkPatch {
            title: Some("My GitHub".into()),
            ..Default::default()
        };
        patch.apply(&mut link).unwrap();

        assert_eq!(link.title, "My GitHub");
        assert_eq!(link.id, original.id);
        assert_eq!(link.url, original.url);
        assert_eq!(link.order, original.order);
    }

    #[test]
    fn invalid_patch_leaves_link_untouched() {
        let mut link = sample_link();
        let original = link.clone();
        let patch = LinkPatch {
            title: Some("Renamed".into()),
            url: Some("http://".into()),
            ..Default::default()
        };
        assert!(patch.apply(&mut link).is_err());
        assert_eq!(link, original);
    }

    #[test]
    fn empty_patch_is_detected() {
        assert!(LinkPatch::default().is_empty());
        assert!(!LinkPatch {
            icon: Some("github".into()),
            ..Default::default()
        }
        .is_empty());
    }

    #[test]
    fn icon_is_omitted_from_json_when_absent() {
        let json = serde_json::to_value(sample_link()).unwrap();
        assert!(json.get("icon").is_none());
        assert_eq!(json["order"], 0);
    }
}
