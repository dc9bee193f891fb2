use std::collections::BTreeMap;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::content::navigation::{
    self, LanguageOptionUpdate, NavigationLinkUpdate, NewLanguageOption, NewNavigationLink,
};
use crate::content::resume::{
    self, FieldUpdate, NewField, NewTitled, ResumeSectionNode, TitledUpdate,
};
use crate::content::sections::{self, NewSection, SectionUpdate};
use crate::content::settings;
use crate::errors::AppError;
use crate::models::resume::{ResumeFieldRow, ResumeParagraphRow, ResumeSectionRow};
use crate::models::section::SectionRow;
use crate::models::site::{LanguageOptionRow, NavigationLinkRow};
use crate::state::AppState;

// ── Sections ────────────────────────────────────────────────────────────────

/// GET /admin/sections
pub async fn handle_list_sections(
    State(state): State<AppState>,
) -> Result<Json<Vec<SectionRow>>, AppError> {
    Ok(Json(sections::list_sections(&state.db).await?))
}

/// POST /admin/sections
pub async fn handle_create_section(
    State(state): State<AppState>,
    Json(req): Json<NewSection>,
) -> Result<(StatusCode, Json<SectionRow>), AppError> {
    let row = sections::create_section(&state.db, req).await?;
    Ok((StatusCode::CREATED, Json(row)))
}

/// GET /admin/sections/:id
pub async fn handle_get_section(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<SectionRow>, AppError> {
    Ok(Json(sections::get_section(&state.db, id).await?))
}

/// PUT /admin/sections/:id
pub async fn handle_update_section(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<SectionUpdate>,
) -> Result<Json<SectionRow>, AppError> {
    Ok(Json(sections::update_section(&state.db, id, req).await?))
}

/// DELETE /admin/sections/:id
pub async fn handle_delete_section(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    sections::delete_section(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// PUT /admin/sections/order
pub async fn handle_reorder_sections(
    State(state): State<AppState>,
    Json(ids): Json<Vec<i64>>,
) -> Result<Json<Vec<SectionRow>>, AppError> {
    Ok(Json(sections::reorder_sections(&state.db, &ids).await?))
}

// ── Settings ────────────────────────────────────────────────────────────────

/// GET /admin/settings
pub async fn handle_get_settings(
    State(state): State<AppState>,
) -> Result<Json<BTreeMap<String, String>>, AppError> {
    Ok(Json(settings::settings_map(&state.db).await?))
}

/// PUT /admin/settings
pub async fn handle_update_settings(
    State(state): State<AppState>,
    Json(req): Json<BTreeMap<String, String>>,
) -> Result<Json<BTreeMap<String, String>>, AppError> {
    Ok(Json(settings::upsert_settings(&state.db, &req).await?))
}

/// DELETE /admin/settings/:key
pub async fn handle_delete_setting(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<StatusCode, AppError> {
    settings::delete_setting(&state.db, &key).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── Resume builder ──────────────────────────────────────────────────────────

/// GET /admin/builder
pub async fn handle_get_builder(
    State(state): State<AppState>,
) -> Result<Json<Vec<ResumeSectionNode>>, AppError> {
    Ok(Json(resume::load_tree(&state.db).await?))
}

/// POST /admin/builder/sections
pub async fn handle_create_resume_section(
    State(state): State<AppState>,
    Json(req): Json<NewTitled>,
) -> Result<(StatusCode, Json<ResumeSectionRow>), AppError> {
    let row = resume::create_resume_section(&state.db, req).await?;
    Ok((StatusCode::CREATED, Json(row)))
}

/// PUT /admin/builder/sections/:id
pub async fn handle_update_resume_section(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<TitledUpdate>,
) -> Result<Json<ResumeSectionRow>, AppError> {
    Ok(Json(resume::update_resume_section(&state.db, id, req).await?))
}

/// DELETE /admin/builder/sections/:id
pub async fn handle_delete_resume_section(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    resume::delete_resume_section(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /admin/builder/sections/:id/paragraphs
pub async fn handle_create_paragraph(
    State(state): State<AppState>,
    Path(section_id): Path<i64>,
    Json(req): Json<NewTitled>,
) -> Result<(StatusCode, Json<ResumeParagraphRow>), AppError> {
    let row = resume::create_paragraph(&state.db, section_id, req).await?;
    Ok((StatusCode::CREATED, Json(row)))
}

/// PUT /admin/builder/paragraphs/:id
pub async fn handle_update_paragraph(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<TitledUpdate>,
) -> Result<Json<ResumeParagraphRow>, AppError> {
    Ok(Json(resume::update_paragraph(&state.db, id, req).await?))
}

/// DELETE /admin/builder/paragraphs/:id
pub async fn handle_delete_paragraph(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    resume::delete_paragraph(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /admin/builder/paragraphs/:id/fields
pub async fn handle_create_field(
    State(state): State<AppState>,
    Path(paragraph_id): Path<i64>,
    Json(req): Json<NewField>,
) -> Result<(StatusCode, Json<ResumeFieldRow>), AppError> {
    let row = resume::create_field(&state.db, paragraph_id, req).await?;
    Ok((StatusCode::CREATED, Json(row)))
}

/// PUT /admin/builder/fields/:id
pub async fn handle_update_field(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<FieldUpdate>,
) -> Result<Json<ResumeFieldRow>, AppError> {
    Ok(Json(resume::update_field(&state.db, id, req).await?))
}

/// DELETE /admin/builder/fields/:id
pub async fn handle_delete_field(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    resume::delete_field(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── Navigation ──────────────────────────────────────────────────────────────

/// GET /admin/navigation
pub async fn handle_list_nav_links(
    State(state): State<AppState>,
) -> Result<Json<Vec<NavigationLinkRow>>, AppError> {
    Ok(Json(navigation::list_nav_links(&state.db).await?))
}

/// POST /admin/navigation
pub async fn handle_create_nav_link(
    State(state): State<AppState>,
    Json(req): Json<NewNavigationLink>,
) -> Result<(StatusCode, Json<NavigationLinkRow>), AppError> {
    let row = navigation::create_nav_link(&state.db, req).await?;
    Ok((StatusCode::CREATED, Json(row)))
}

/// PUT /admin/navigation/:id
pub async fn handle_update_nav_link(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<NavigationLinkUpdate>,
) -> Result<Json<NavigationLinkRow>, AppError> {
    Ok(Json(navigation::update_nav_link(&state.db, id, req).await?))
}

/// DELETE /admin/navigation/:id
pub async fn handle_delete_nav_link(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    navigation::delete_nav_link(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── Languages ───────────────────────────────────────────────────────────────

/// GET /admin/languages
pub async fn handle_list_languages(
    State(state): State<AppState>,
) -> Result<Json<Vec<LanguageOptionRow>>, AppError> {
    Ok(Json(navigation::list_languages(&state.db).await?))
}

/// POST /admin/languages
pub async fn handle_create_language(
    State(state): State<AppState>,
    Json(req): Json<NewLanguageOption>,
) -> Result<(StatusCode, Json<LanguageOptionRow>), AppError> {
    let row = navigation::create_language(&state.db, req).await?;
    Ok((StatusCode::CREATED, Json(row)))
}

/// PUT /admin/languages/:id
pub async fn handle_update_language(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<LanguageOptionUpdate>,
) -> Result<Json<LanguageOptionRow>, AppError> {
    Ok(Json(navigation::update_language(&state.db, id, req).await?))
}

/// DELETE /admin/languages/:id
pub async fn handle_delete_language(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    navigation::delete_language(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
