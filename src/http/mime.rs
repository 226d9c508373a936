//! MIME type detection module
//!
//! Resolves the `Content-Type` of a served file from its path. The default
//! resolver checks a small override table before falling back to
//! `mime_guess`, which reports `.js` as `text/javascript`.

/// Suffix overrides checked before the fallback guesser, matched case-sensitively
pub const CONTENT_TYPE_OVERRIDES: &[(&str, &str)] = &[
    (".js", "application/javascript"),
    (".wasm", "application/wasm"),
];

/// Content type used when nothing better is known
pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// Given a path, return a content-type string
pub trait ContentTypeResolver: Send + Sync {
    fn resolve(&self, path: &str) -> &'static str;
}

impl<F> ContentTypeResolver for F
where
    F: Fn(&str) -> &'static str + Send + Sync,
{
    fn resolve(&self, path: &str) -> &'static str {
        self(path)
    }
}

/// Extension table lookup backed by `mime_guess`
#[derive(Debug, Clone, Copy, Default)]
pub struct MimeGuessResolver;

impl ContentTypeResolver for MimeGuessResolver {
    fn resolve(&self, path: &str) -> &'static str {
        mime_guess::from_path(path)
            .first_raw()
            .unwrap_or(DEFAULT_CONTENT_TYPE)
    }
}

/// Wraps a fallback resolver with a fixed suffix table
#[derive(Debug, Clone)]
pub struct OverrideResolver<F> {
    overrides: &'static [(&'static str, &'static str)],
    fallback: F,
}

impl<F: ContentTypeResolver> OverrideResolver<F> {
    /// Resolver with the `.js` and `.wasm` overrides
    pub const fn new(fallback: F) -> Self {
        Self::with_overrides(CONTENT_TYPE_OVERRIDES, fallback)
    }

    pub const fn with_overrides(
        overrides: &'static [(&'static str, &'static str)],
        fallback: F,
    ) -> Self {
        Self {
            overrides,
            fallback,
        }
    }

    /// Look up `path` in the override table only
    pub fn lookup(&self, path: &str) -> Option<&'static str> {
        self.overrides
            .iter()
            .find(|(suffix, _)| path.ends_with(suffix))
            .map(|&(_, content_type)| content_type)
    }
}

impl<F: ContentTypeResolver> ContentTypeResolver for OverrideResolver<F> {
    fn resolve(&self, path: &str) -> &'static str {
        self.lookup(path)
            .unwrap_or_else(|| self.fallback.resolve(path))
    }
}
