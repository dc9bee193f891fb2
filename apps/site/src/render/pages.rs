use std::collections::BTreeMap;

use axum::{
    extract::{Path, State},
    http::header::SET_COOKIE,
    response::{IntoResponse, Redirect},
    Extension, Json,
};
use serde::Serialize;
use tracing::info;

use crate::content::navigation::list_languages;
use crate::content::resume::{load_tree, ResumeSectionNode};
use crate::content::sections::list_sections;
use crate::content::settings::settings_map;
use crate::errors::AppError;
use crate::i18n::{Locale, LANG_COOKIE};
use crate::models::section::SectionRow;
use crate::render::{build_template_context, TemplateContext};
use crate::state::AppState;

const LANG_COOKIE_MAX_AGE_SECS: u64 = 60 * 60 * 24 * 365;

#[derive(Serialize)]
pub struct HomePage {
    #[serde(flatten)]
    pub context: TemplateContext,
    pub sections: Vec<SectionRow>,
}

#[derive(Serialize)]
pub struct ResumePage {
    #[serde(flatten)]
    pub context: TemplateContext,
    pub resume: Vec<ResumeSectionNode>,
    pub settings: BTreeMap<String, String>,
}

/// GET /
pub async fn handle_home(
    State(state): State<AppState>,
    Extension(locale): Extension<Locale>,
) -> Result<Json<HomePage>, AppError> {
    let context = build_template_context(&state.db, state.locale.as_ref(), &locale).await?;
    let sections = list_sections(&state.db).await?;
    Ok(Json(HomePage { context, sections }))
}

/// GET /resume
pub async fn handle_resume(
    State(state): State<AppState>,
    Extension(locale): Extension<Locale>,
) -> Result<Json<ResumePage>, AppError> {
    let context = build_template_context(&state.db, state.locale.as_ref(), &locale).await?;
    let resume = load_tree(&state.db).await?;
    let settings = settings_map(&state.db).await?;
    Ok(Json(ResumePage {
        context,
        resume,
        settings,
    }))
}

/// GET /lang/:code
/// Remembers the language in a cookie and sends the visitor home.
///
/// The configured languages decide what can be selected. A code that only exists as a
/// language option row is rejected, since the resolver would never honour its cookie.
pub async fn handle_set_language(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let code = code.trim().to_ascii_lowercase();
    if !state.locale.is_supported(&code) {
        let supported = state.locale.supported().join(", ");
        let listed = list_languages(&state.db)
            .await?
            .iter()
            .any(|option| option.code == code);
        let message = if listed {
            format!("Language '{code}' is listed but not enabled in LANGUAGES ({supported})")
        } else {
            format!("Language '{code}' is not supported. Expected one of: {supported}")
        };
        return Err(AppError::Validation(message));
    }
    info!("Language switched to {code}");
    let cookie = format!("{LANG_COOKIE}={code}; Path=/; Max-Age={LANG_COOKIE_MAX_AGE_SECS}; SameSite=Lax");
    Ok(([(SET_COOKIE, cookie)], Redirect::to("/")))
}
