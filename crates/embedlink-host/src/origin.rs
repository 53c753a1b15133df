//! Origin trust and derivation.
//!
//! The host trusts a frame when any allow-list entry appears as a
//! substring of the frame's origin, and pins outgoing sends to a known
//! origin whenever one is available.

use url::Url;

/// Wildcard target origin.
///
/// Accepted by [`WidgetTransport`](crate::transport::WidgetTransport) as
/// "deliver to whatever document is loaded".  Using it for
/// credential-bearing commands defeats origin pinning; the controller
/// only falls back to it when no origin has been captured and none can
/// be derived from the configured widget URL.
pub const WILDCARD_ORIGIN: &str = "*";

// ---------------------------------------------------------------------------
// OriginAllowList
// ---------------------------------------------------------------------------

/// Allow-list of trusted origins, checked by substring match.
///
/// An origin is trusted when **any** entry appears within it.  An empty
/// list trusts nothing.
///
/// # Examples
///
/// ```
/// use embedlink_host::OriginAllowList;
///
/// let allow = OriginAllowList::new(vec!["widget.example.com".to_string()]);
/// assert!(allow.is_trusted("https://widget.example.com"));
/// assert!(!allow.is_trusted("https://evil.example.net"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct OriginAllowList(Vec<String>);

impl OriginAllowList {
    /// Build an allow-list from its entries.
    pub fn new(entries: Vec<String>) -> Self {
        Self(entries)
    }

    /// Whether `origin` matches any entry (substring semantics).
    pub fn is_trusted(&self, origin: &str) -> bool {
        self.0.iter().any(|allowed| origin.contains(allowed.as_str()))
    }

    /// The configured entries.
    pub fn entries(&self) -> &[String] {
        &self.0
    }
}

// ---------------------------------------------------------------------------
// origin_of
// ---------------------------------------------------------------------------

/// Derive the origin (`scheme://host[:port]`) of a URL.
///
/// Returns `None` for unparseable URLs and for URLs with an opaque
/// origin (e.g. `data:` URLs), which cannot be used as a message target.
pub fn origin_of(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    let origin = parsed.origin();
    match origin {
        url::Origin::Tuple(..) => Some(origin.ascii_serialization()),
        url::Origin::Opaque(_) => None,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
