use axum::extract::{Multipart, Query, State};
use axum::Json;
use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::errors::AppError;
use crate::matcher::pipeline::{score_resumes, ScoreResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ScoreRequest {
    pub job_description: String,
    #[serde(default)]
    pub resumes: Vec<String>,
    /// Ranking cutoff; omitted means every scored résumé is returned.
    pub top: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct MatchResponse {
    pub count: usize,
    pub results: Vec<ScoreResult>,
}

#[derive(Debug, Deserialize)]
pub struct MatchQuery {
    pub top: Option<usize>,
}

/// POST /api/v1/matcher/score
///
/// Scores pre-extracted résumé texts against a job description. Scoring is
/// CPU-bound, so it runs on the blocking pool.
pub async fn handle_score(
    State(state): State<AppState>,
    Json(req): Json<ScoreRequest>,
) -> Result<Json<MatchResponse>, AppError> {
    enforce_caps(&state.config, &req.resumes)?;

    let ScoreRequest {
        job_description,
        resumes,
        top,
    } = req;
    let results = tokio::task::spawn_blocking(move || score_resumes(&job_description, &resumes))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("scoring task failed: {e}")))?;

    Ok(Json(rank(results, top)))
}

/// POST /api/v1/matcher/match?top=N
///
/// Multipart variant: one `job_description` text field plus repeated
/// `resume` file parts. Each file goes through the document-to-text
/// extractor; files it cannot read degrade to empty text and score zero
/// rather than failing the request.
pub async fn handle_match_uploads(
    State(state): State<AppState>,
    Query(query): Query<MatchQuery>,
    mut multipart: Multipart,
) -> Result<Json<MatchResponse>, AppError> {
    let mut job_description: Option<String> = None;
    let mut resumes: Vec<String> = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Multipart(e.to_string()))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "job_description" => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::Multipart(e.to_string()))?;
                job_description = Some(text);
            }
            "resume" => {
                if resumes.len() >= state.config.max_resumes {
                    return Err(AppError::UnprocessableEntity(format!(
                        "too many resume files; the limit is {}",
                        state.config.max_resumes
                    )));
                }
                let file_name = field.file_name().unwrap_or_default().to_string();
                let data: Bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Multipart(e.to_string()))?;
                if data.len() > state.config.max_document_bytes {
                    return Err(AppError::UnprocessableEntity(format!(
                        "resume '{file_name}' exceeds {} bytes",
                        state.config.max_document_bytes
                    )));
                }
                resumes.push(state.extractor.extract(&file_name, &data).await);
            }
            other => {
                tracing::warn!(field = other, "ignoring unknown multipart field");
            }
        }
    }

    let job_description = job_description
        .ok_or_else(|| AppError::Validation("missing job_description field".to_string()))?;

    let results = tokio::task::spawn_blocking(move || score_resumes(&job_description, &resumes))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("scoring task failed: {e}")))?;

    Ok(Json(rank(results, query.top)))
}

/// The engine reports in input order; ranking is this caller's job.
/// Sort is stable, so equal scores keep their upload order.
fn rank(mut results: Vec<ScoreResult>, top: Option<usize>) -> MatchResponse {
    results.sort_by(|a, b| b.combined_score.total_cmp(&a.combined_score));
    if let Some(limit) = top {
        results.truncate(limit);
    }
    MatchResponse {
        count: results.len(),
        results,
    }
}

fn enforce_caps(config: &Config, resumes: &[String]) -> Result<(), AppError> {
    if resumes.len() > config.max_resumes {
        return Err(AppError::UnprocessableEntity(format!(
            "{} resumes exceeds the limit of {}",
            resumes.len(),
            config.max_resumes
        )));
    }
    if let Some(index) = resumes
        .iter()
        .position(|r| r.len() > config.max_document_bytes)
    {
        return Err(AppError::UnprocessableEntity(format!(
            "resume at index {index} exceeds {} bytes",
            config.max_document_bytes
        )));
    }
    Ok(())
}
