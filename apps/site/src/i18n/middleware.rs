use axum::{
    extract::{Query, Request, State},
    http::{
        header::{ACCEPT_LANGUAGE, COOKIE},
        Uri,
    },
    middleware::Next,
    response::Response,
};
use serde::Deserialize;
use tracing::debug;

use crate::i18n::LocaleHints;
use crate::state::AppState;

/// Cookie that remembers an explicit language choice.
pub const LANG_COOKIE: &str = "lang";

#[derive(Deserialize)]
struct LangQuery {
    lang: Option<String>,
}

/// Resolves the locale before every request, logs it, and stores it in the
/// request extensions as a [`Locale`](crate::i18n::Locale).
pub async fn attach_locale(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let query = lang_query(request.uri());
    let locale = {
        let headers = request.headers();
        let cookie = headers
            .get_all(COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .find_map(|raw| cookie_value(raw, LANG_COOKIE));
        let hints = LocaleHints {
            query: query.as_deref(),
            cookie,
            accept_language: headers.get(ACCEPT_LANGUAGE).and_then(|v| v.to_str().ok()),
        };
        state.locale.resolve(&hints)
    };

    debug!("Requested locale: {}", locale.code());
    debug!(
        "Translation directory: {}",
        state.config.translations_dir.display()
    );

    request.extensions_mut().insert(locale);
    next.run(request).await
}

/// The percent-decoded `lang` query parameter. A query string that does not parse is ignored.
fn lang_query(uri: &Uri) -> Option<String> {
    let Query(LangQuery { lang }) = Query::try_from_uri(uri).ok()?;
    lang.filter(|code| !code.is_empty())
}

fn cookie_value<'a>(header: &'a str, name: &str) -> Option<&'a str> {
    header.split(';').find_map(|pair| {
        let (key, value) = pair.trim().split_once('=')?;
        (key.trim() == name).then_some(value.trim().trim_matches('"'))
    })
}
