//! Axum route handlers for the skill extraction and matching API.

use std::collections::BTreeSet;

use axum::{
    extract::{multipart::MultipartRejection, rejection::JsonRejection, Multipart, State},
    Json,
};
use serde::Serialize;
use serde_json::Value;
use tracing::info;

use crate::documents::upload::ResumeUpload;
use crate::errors::AppError;
use crate::skills::bulk::{
    rank_all, BulkMatchRequest, BulkResult, UNKNOWN_CANDIDATE, UNKNOWN_POSITION,
};
use crate::skills::extractor::SkillExtractor;
use crate::skills::scorer::{default_required_skills, parse_skill_list, score, MatchResult};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct SkillCategories {
    pub technical: BTreeSet<String>,
    pub soft: BTreeSet<String>,
}

#[derive(Debug, Serialize)]
pub struct ExtractSkillsResponse {
    pub extracted_skills: BTreeSet<String>,
    pub total_skills_found: usize,
    pub resume_text_length: usize,
    pub skill_categories: SkillCategories,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct MatchSkillsResponse {
    #[serde(flatten)]
    pub result: MatchResult,
    pub candidate_name: String,
    pub job_title: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /extract-skills
///
/// Multipart upload (`resume` field). Returns every dictionary skill found.
pub async fn handle_extract_skills(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<ExtractSkillsResponse>, AppError> {
    let upload = ResumeUpload::from_multipart(multipart.map_err(missing_file)?).await?;
    let text = upload
        .extract_text(state.parser.as_ref(), &state.config.upload_dir)
        .await?;

    let skills = SkillExtractor::new(state.dictionary).extract(&text);
    let (technical, soft) = state.dictionary.partition(&skills);
    info!(filename = %upload.filename, skills = skills.len(), "Extracted skills");

    Ok(Json(ExtractSkillsResponse {
        total_skills_found: skills.len(),
        resume_text_length: text.chars().count(),
        extracted_skills: skills,
        skill_categories: SkillCategories { technical, soft },
        message: "Skills extracted successfully".to_string(),
    }))
}

/// POST /match-skills
///
/// Multipart upload (`resume` field, optional `candidate_name`, `job_title`,
/// `required_skills` as a comma-separated list). Without `required_skills`
/// the built-in default list is used.
pub async fn handle_match_skills(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<MatchSkillsResponse>, AppError> {
    let upload = ResumeUpload::from_multipart(multipart.map_err(missing_file)?).await?;

    let required_skills = match upload.fields.get("required_skills") {
        Some(raw) => parse_skill_list(raw),
        None => default_required_skills(),
    };
    if required_skills.is_empty() {
        return Err(AppError::Validation(
            "No valid required skills provided".to_string(),
        ));
    }

    let text = upload
        .extract_text(state.parser.as_ref(), &state.config.upload_dir)
        .await?;
    let skills = SkillExtractor::new(state.dictionary).extract(&text);
    let result = score(&skills, &required_skills);

    let candidate_name = upload.field_or("candidate_name", UNKNOWN_CANDIDATE);
    let job_title = upload.field_or("job_title", UNKNOWN_POSITION);
    info!(
        candidate = %candidate_name,
        job_title = %job_title,
        match_percentage = result.match_percentage,
        "Scored resume"
    );

    Ok(Json(MatchSkillsResponse {
        result,
        candidate_name,
        job_title,
    }))
}

/// POST /bulk-match-skills
///
/// JSON body: `{candidates: [...], required_skills: [...], job_title?}`.
/// Ranking runs on the blocking pool; one bad candidate never fails the batch.
pub async fn handle_bulk_match_skills(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<BulkResult>, AppError> {
    let Json(body) = payload?;
    let request = BulkMatchRequest::from_json(body)?;
    info!(
        candidates = request.candidates.len(),
        required = request.required_skills.len(),
        "Bulk match requested"
    );

    let dictionary = state.dictionary;
    let result = tokio::task::spawn_blocking(move || {
        rank_all(
            &request.candidates,
            &request.required_skills,
            &request.job_title,
            &SkillExtractor::new(dictionary),
        )
    })
    .await
    .map_err(|e| {
        AppError::Internal(anyhow::anyhow!("spawn_blocking failed in bulk ranking: {e}"))
    })?;

    Ok(Json(result))
}

fn missing_file(rejection: MultipartRejection) -> AppError {
    tracing::debug!("Rejected non-multipart upload: {rejection}");
    AppError::Validation("No resume file provided".to_string())
}
