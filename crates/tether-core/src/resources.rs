//! Embedded UI resource routing.
//!
//! The UI surface loads its bundle (markup and scripts embedded at build
//! time) through a [`ResourceRouter`]: a fixed, explicit table from logical
//! path to payload. There is no prefix or glob matching and no mutable state;
//! [`resolve`](ResourceRouter::resolve) is a pure function of the path.
//!
//! The root path `/` and `/index.html` resolve to the identical entry.
//! Unmatched paths return `None` plus a diagnostic log entry and never
//! propagate as a panic into the hosting surface.

/// Content type of an embedded resource. Exactly two exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MimeType {
    /// HTML markup.
    Markup,
    /// JavaScript.
    Script,
}

impl MimeType {
    /// The HTTP content-type string.
    pub fn as_str(&self) -> &'static str {
        match self {
            MimeType::Markup => "text/html",
            MimeType::Script => "text/javascript",
        }
    }
}

/// One logical path with its embedded payload.
#[derive(Debug, Clone, Copy)]
pub struct ResourceEntry {
    /// Logical path as requested by the surface (e.g. "/index.html").
    pub path: &'static str,
    /// Embedded payload bytes (`include_bytes!`).
    pub body: &'static [u8],
    /// Declared content type.
    pub mime: MimeType,
}

/// A resolved resource: payload plus content type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resource {
    pub body: &'static [u8],
    pub mime: MimeType,
}

/// Static path→payload table serving the embedded UI bundle.
///
/// Immutable for the process's lifetime.
pub struct ResourceRouter {
    entries: &'static [ResourceEntry],
}

impl ResourceRouter {
    /// Build a router over a fixed entry table.
    ///
    /// The table should contain an `/index.html` entry; `/` is served as its
    /// alias.
    pub const fn new(entries: &'static [ResourceEntry]) -> Self {
        Self { entries }
    }

    /// Look up a path. Exact matches only; `/` aliases `/index.html`.
    ///
    /// A miss is logged and reported as `None` — never a panic.
    pub fn resolve(&self, path: &str) -> Option<Resource> {
        let path = if path == "/" { "/index.html" } else { path };
        let found = self
            .entries
            .iter()
            .find(|entry| entry.path == path)
            .map(|entry| Resource {
                body: entry.body,
                mime: entry.mime,
            });
        if found.is_none() {
            log::warn!("resource not found: {path}");
        }
        found
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const INDEX: &[u8] = b"<html></html>";
    const SCRIPT: &[u8] = b"export {};";

    const ENTRIES: &[ResourceEntry] = &[
        ResourceEntry {
            path: "/index.html",
            body: INDEX,
            mime: MimeType::Markup,
        },
        ResourceEntry {
            path: "/js/app.js",
            body: SCRIPT,
            mime: MimeType::Script,
        },
    ];

    #[test]
    fn test_root_aliases_index() {
        let router = ResourceRouter::new(ENTRIES);
        let root = router.resolve("/").unwrap();
        let index = router.resolve("/index.html").unwrap();
        assert_eq!(root, index);
        assert_eq!(root.mime, MimeType::Markup);
    }

    #[test]
    fn test_script_mime() {
        let router = ResourceRouter::new(ENTRIES);
        let js = router.resolve("/js/app.js").unwrap();
        assert_eq!(js.mime, MimeType::Script);
        assert_eq!(js.mime.as_str(), "text/javascript");
    }

    #[test]
    fn test_miss_returns_none() {
        let router = ResourceRouter::new(ENTRIES);
        assert!(router.resolve("/missing").is_none());
        // No partial matching.
        assert!(router.resolve("/js").is_none());
        assert!(router.resolve("/js/app.js.map").is_none());
    }
}
