//! Score fusion pipeline, the one entry point external callers invoke.
//!
//! Per request: build the rule-based scorer from the job description, fit a
//! TF-IDF space over the corpus (job description plus every résumé), project
//! every document, then fuse the rule score and the cosine score per résumé.
//! Results come back in input order; ranking and top-N selection belong to
//! the caller. The pipeline never fails a whole batch: bad top-level input
//! yields an empty result set and a single misbehaving résumé is skipped.

use std::panic::{catch_unwind, AssertUnwindSafe};

use serde::Serialize;

use crate::matcher::rule::RuleBasedScorer;
use crate::matcher::similarity::cosine_similarity;
use crate::matcher::text::excerpt;
use crate::matcher::tfidf::TfIdfVectorizer;

/// Maximum contribution of the vector-similarity half of the score.
const SIMILARITY_WEIGHT: f64 = 50.0;
/// Length of the résumé excerpt returned with each result, in characters.
const EXCERPT_CHARS: usize = 500;

/// Explanatory detail attached to each score.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchDetails {
    /// Years of experience the job description requires.
    pub experience: u32,
    pub matched_skills: Vec<String>,
    pub projects_count: usize,
    pub matched_certifications: Vec<String>,
    /// Leading excerpt of the résumé text, ellipsized when truncated.
    pub resume_text: String,
}

/// One résumé's scores, all rounded to 2 decimals. `combined_score` is the
/// sum of the two bounded partials, so it lives in [0, 100].
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreResult {
    pub content_score: f64,
    pub similarity_score: f64,
    pub combined_score: f64,
    pub details: MatchDetails,
}

/// Scores every résumé against the job description. Result `i` corresponds
/// to `resumes[i]` unless that résumé failed scoring, in which case it is
/// logged and omitted while the rest of the batch proceeds.
pub fn score_resumes(job_description: &str, resumes: &[String]) -> Vec<ScoreResult> {
    if job_description.is_empty() {
        tracing::warn!("empty job description; returning no matches");
        return Vec::new();
    }

    let scorer = RuleBasedScorer::new(job_description);

    let mut corpus: Vec<String> = Vec::with_capacity(resumes.len() + 1);
    corpus.push(job_description.to_string());
    corpus.extend(resumes.iter().cloned());

    let vectorizer = TfIdfVectorizer::fit(&corpus);
    let vectors: Vec<Vec<f64>> = corpus.iter().map(|doc| vectorizer.transform(doc)).collect();
    let job_vector = &vectors[0];

    let mut results = Vec::with_capacity(resumes.len());
    for (index, resume) in resumes.iter().enumerate() {
        let scored = guarded(index, || {
            score_one(&scorer, job_vector, &vectors[index + 1], resume)
        });
        if let Some(result) = scored {
            results.push(result);
        }
    }
    results
}

fn score_one(
    scorer: &RuleBasedScorer,
    job_vector: &[f64],
    resume_vector: &[f64],
    resume_text: &str,
) -> ScoreResult {
    let evaluation = scorer.evaluate(resume_text);
    let content_score = round2(evaluation.total());

    // TF-IDF weights keep cosine in [0, 1]; the clamp only absorbs
    // floating-point drift at the boundary.
    let cosine = cosine_similarity(job_vector, resume_vector).clamp(0.0, 1.0);
    let similarity_score = round2(cosine * SIMILARITY_WEIGHT);
    let combined_score = round2(content_score + similarity_score);

    ScoreResult {
        content_score,
        similarity_score,
        combined_score,
        details: MatchDetails {
            experience: scorer.profile().required_experience_years,
            matched_skills: evaluation.matched_skills,
            projects_count: evaluation.projects_count,
            matched_certifications: evaluation.matched_certifications,
            resume_text: excerpt(resume_text, EXCERPT_CHARS),
        },
    }
}

/// Per-résumé isolation boundary: a panic while scoring one résumé is
/// logged with the offending index and the résumé is dropped from the
/// output, leaving the rest of the batch intact.
fn guarded<T>(index: usize, work: impl FnOnce() -> T) -> Option<T> {
    match catch_unwind(AssertUnwindSafe(work)) {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::warn!(index, "scoring failed for resume; skipping it");
            None
        }
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    const JD: &str =
        "Requirements: Python, SQL. Must have 3 years of experience. Certifications: AWS.";
    const RESUME: &str = "I have 4 years of experience. Skills: Python, SQL, Docker. \
                          Project: inventory system. Certified: AWS.";

    fn one(resume: &str) -> Vec<String> {
        vec![resume.to_string()]
    }

    #[test]
    fn test_reference_scenario() {
        let results = score_resumes(JD, &one(RESUME));
        assert_eq!(results.len(), 1);
        let result = &results[0];
        assert!((result.content_score - 42.0).abs() < f64::EPSILON);
        assert!(result.similarity_score > 0.0, "shared vocabulary must register");
        assert!(result.similarity_score <= 50.0);
        assert!(
            (result.combined_score - (result.content_score + result.similarity_score)).abs()
                < 0.005
        );
    }

    #[test]
    fn test_empty_job_description_yields_no_results() {
        let results = score_resumes("", &one(RESUME));
        assert!(results.is_empty());
    }

    #[test]
    fn test_no_resumes_yields_no_results() {
        assert!(score_resumes(JD, &[]).is_empty());
    }

    #[test]
    fn test_order_preserved() {
        let resumes = vec![
            "Alpha. Skills: Python.".to_string(),
            "Beta. Skills: SQL.".to_string(),
            "Gamma. No relevant skills.".to_string(),
        ];
        let results = score_resumes(JD, &resumes);
        assert_eq!(results.len(), 3);
        assert!(results[0].details.resume_text.starts_with("Alpha"));
        assert!(results[1].details.resume_text.starts_with("Beta"));
        assert!(results[2].details.resume_text.starts_with("Gamma"));
    }

    #[test]
    fn test_score_bounds() {
        let resumes = vec![
            RESUME.to_string(),
            String::new(),
            "completely unrelated gardening text".to_string(),
            "99 years of experience python sql aws ".repeat(50),
        ];
        for result in score_resumes(JD, &resumes) {
            assert!((0.0..=50.0).contains(&result.content_score));
            assert!((0.0..=50.0).contains(&result.similarity_score));
            assert!((0.0..=100.0).contains(&result.combined_score));
        }
    }

    #[test]
    fn test_empty_resume_scores_zero_everywhere() {
        let results = score_resumes(JD, &one(""));
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].content_score, 0.0);
        assert_eq!(results[0].similarity_score, 0.0);
        assert_eq!(results[0].combined_score, 0.0);
    }

    #[test]
    fn test_deterministic_across_calls() {
        let resumes = vec![RESUME.to_string(), "Skills: SQL.".to_string()];
        let first = serde_json::to_value(score_resumes(JD, &resumes)).unwrap();
        let second = serde_json::to_value(score_resumes(JD, &resumes)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_jd_without_sections_still_scores_projects() {
        // No requirements, skills, or experience phrasing anywhere: content
        // score falls back to the project heading count alone.
        let results = score_resumes(
            "Prose-only posting about an engineering role",
            &one("Project: billing. Project: reporting."),
        );
        assert_eq!(results.len(), 1);
        assert!((results[0].content_score - 4.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_excerpt_truncated_to_500_chars() {
        let long_resume = format!("Skills: Python. {}", "x".repeat(600));
        let results = score_resumes(JD, &one(&long_resume));
        let text = &results[0].details.resume_text;
        assert_eq!(text.chars().count(), 503);
        assert!(text.ends_with("..."));
    }

    #[test]
    fn test_details_report_required_experience() {
        let results = score_resumes(JD, &one(RESUME));
        assert_eq!(results[0].details.experience, 3);
    }

    #[test]
    fn test_wire_format_is_camel_case() {
        let results = score_resumes(JD, &one(RESUME));
        let value = serde_json::to_value(&results[0]).unwrap();
        assert!(value.get("contentScore").is_some());
        assert!(value.get("similarityScore").is_some());
        assert!(value.get("combinedScore").is_some());
        let details = value.get("details").unwrap();
        assert!(details.get("matchedSkills").is_some());
        assert!(details.get("projectsCount").is_some());
        assert!(details.get("matchedCertifications").is_some());
        assert!(details.get("resumeText").is_some());
    }

    #[test]
    fn test_guarded_isolates_panics() {
        assert_eq!(guarded(0, || 42), Some(42));
        let outcome: Option<u32> = guarded(1, || panic!("pathological resume"));
        assert_eq!(outcome, None);
        // A panic on one index leaves later work untouched.
        assert_eq!(guarded(2, || 7), Some(7));
    }
}
