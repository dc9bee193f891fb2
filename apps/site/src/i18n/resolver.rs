use serde::Serialize;

/// The active display language for one request. Always one of the configured codes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Locale(String);

impl Locale {
    pub fn code(&self) -> &str {
        &self.0
    }

    /// Writing direction for templates.
    pub fn direction(&self) -> &'static str {
        match self.0.as_str() {
            "ar" | "fa" | "he" | "ur" => "rtl",
            _ => "ltr",
        }
    }
}

/// Raw language preferences pulled from a request.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocaleHints<'a> {
    /// `?lang=` query parameter.
    pub query: Option<&'a str>,
    /// `lang` cookie.
    pub cookie: Option<&'a str>,
    /// `Accept-Language` header value.
    pub accept_language: Option<&'a str>,
}

/// Chooses the locale for a request.
///
/// Carried in `AppState` as `Arc<dyn LocaleResolver>`.
pub trait LocaleResolver: Send + Sync {
    fn resolve(&self, hints: &LocaleHints<'_>) -> Locale;

    fn supported(&self) -> &[String];

    fn is_supported(&self, code: &str) -> bool {
        self.supported().iter().any(|s| s.eq_ignore_ascii_case(code))
    }
}

/// Default resolver: explicit query parameter, then cookie, then `Accept-Language`
/// negotiation, then the first configured language.
pub struct AcceptLanguageResolver {
    supported: Vec<String>,
}

impl AcceptLanguageResolver {
    /// `supported` must be non-empty; its first entry is the fallback.
    pub fn new(supported: Vec<String>) -> Self {
        let supported = supported
            .into_iter()
            .map(|s| s.trim().to_ascii_lowercase())
            .filter(|s| !s.is_empty())
            .collect();
        Self { supported }
    }

    fn fallback(&self) -> Locale {
        Locale(self.supported.first().cloned().unwrap_or_else(|| "de".to_string()))
    }

    fn exact(&self, code: &str) -> Option<Locale> {
        let code = code.trim().to_ascii_lowercase();
        self.supported
            .iter()
            .find(|s| **s == code)
            .map(|s| Locale(s.clone()))
    }

    /// Matches a language tag exactly, or by its primary subtag (`en-GB` → `en`).
    fn matching(&self, tag: &str) -> Option<Locale> {
        self.exact(tag).or_else(|| {
            let primary = tag.split(['-', '_']).next().unwrap_or(tag);
            self.exact(primary)
        })
    }

    fn negotiate(&self, header: &str) -> Option<Locale> {
        parse_accept_language(header)
            .into_iter()
            .find_map(|(tag, _)| self.matching(tag))
    }
}

impl LocaleResolver for AcceptLanguageResolver {
    fn resolve(&self, hints: &LocaleHints<'_>) -> Locale {
        hints
            .query
            .and_then(|q| self.exact(q))
            .or_else(|| hints.cookie.and_then(|c| self.exact(c)))
            .or_else(|| hints.accept_language.and_then(|h| self.negotiate(h)))
            .unwrap_or_else(|| self.fallback())
    }

    fn supported(&self) -> &[String] {
        &self.supported
    }
}

/// Parses an `Accept-Language` value into tags ordered by descending quality.
/// Entries with `q=0`, wildcards and unparseable weights are dropped.
pub fn parse_accept_language(header: &str) -> Vec<(&str, f32)> {
    let mut tags: Vec<(&str, f32)> = header
        .split(',')
        .filter_map(|part| {
            let mut pieces = part.split(';');
            let tag = pieces.next()?.trim();
            if tag.is_empty() || tag == "*" {
                return None;
            }
            let mut quality = 1.0_f32;
            for param in pieces {
                if let Some(q) = param.trim().strip_prefix("q=") {
                    quality = q.trim().parse().ok()?;
                }
            }
            (quality > 0.0).then_some((tag, quality))
        })
        .collect();
    // Stable: equal weights keep header order.
    tags.sort_by(|a, b| b.1.total_cmp(&a.1));
    tags
}
