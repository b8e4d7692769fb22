#![allow(dead_code)]

//! Rule-based content scoring.
//!
//! Scores a résumé against the explicit requirements of a job description
//! with interpretable containment/regex heuristics. Four weighted sub-scores
//! (experience 20, skills 15, projects 10, certifications 5) cap the total
//! contribution at 50 points. Missing signal on either side lowers the score
//! instead of failing: any string input scores deterministically.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::matcher::profile::{extract_experience_years, JobProfile};

pub const EXPERIENCE_WEIGHT: f64 = 20.0;
pub const SKILLS_WEIGHT: f64 = 15.0;
pub const PROJECTS_WEIGHT: f64 = 10.0;
pub const CERTIFICATIONS_WEIGHT: f64 = 5.0;

/// Points awarded per "Project:" heading found in a résumé.
const POINTS_PER_PROJECT: f64 = 2.0;

static PROJECT_HEADING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\bproject:").expect("valid regex"));

/// One sub-score of the rule-based evaluation. `NoSignal` marks the case
/// where the job description gave us nothing to score against (no stated
/// experience requirement, no skills section); it collapses to 0 points at
/// the final sum instead of raising.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SubScore {
    Scored(f64),
    NoSignal,
}

impl SubScore {
    pub fn points(self) -> f64 {
        match self {
            SubScore::Scored(value) => value,
            SubScore::NoSignal => 0.0,
        }
    }
}

/// Full breakdown of one résumé's rule-based evaluation, with the evidence
/// lists surfaced to callers for explainability.
#[derive(Debug, Clone)]
pub struct RuleEvaluation {
    pub experience: SubScore,
    pub skills: SubScore,
    pub projects: SubScore,
    pub certifications: SubScore,
    pub matched_skills: Vec<String>,
    pub projects_count: usize,
    pub matched_certifications: Vec<String>,
}

impl RuleEvaluation {
    /// Total content score. Each component is individually capped, so the
    /// sum is bounded by 50.
    pub fn total(&self) -> f64 {
        self.experience.points()
            + self.skills.points()
            + self.projects.points()
            + self.certifications.points()
    }
}

/// Scores résumés against one job description's extracted requirements.
/// Construct per scoring request; the profile is derived once from the
/// job-description text and never mutated.
pub struct RuleBasedScorer {
    profile: JobProfile,
}

impl RuleBasedScorer {
    pub fn new(job_description: &str) -> Self {
        Self {
            profile: JobProfile::parse(job_description),
        }
    }

    pub fn profile(&self) -> &JobProfile {
        &self.profile
    }

    /// Evaluates one résumé text. Never fails: absent requirements or an
    /// empty résumé degrade to zero-valued components.
    pub fn evaluate(&self, resume_text: &str) -> RuleEvaluation {
        let resume_lower = resume_text.to_lowercase();

        let experience = self.experience_score(resume_text);
        let (skills, matched_skills) = containment_score(
            &resume_lower,
            &self.profile.required_skills,
            SKILLS_WEIGHT,
        );
        let projects_count = PROJECT_HEADING.find_iter(resume_text).count();
        let projects =
            SubScore::Scored((projects_count as f64 * POINTS_PER_PROJECT).min(PROJECTS_WEIGHT));
        let (certifications, matched_certifications) = containment_score(
            &resume_lower,
            &self.profile.certification_keywords,
            CERTIFICATIONS_WEIGHT,
        );

        RuleEvaluation {
            experience,
            skills,
            projects,
            certifications,
            matched_skills,
            projects_count,
            matched_certifications,
        }
    }

    pub fn score_resume(&self, resume_text: &str) -> f64 {
        self.evaluate(resume_text).total()
    }

    /// Candidate years are read with the same regex as the job description.
    /// A job description with no stated requirement awards no experience
    /// points to anyone; that is long-standing behavior, kept as-is.
    fn experience_score(&self, resume_text: &str) -> SubScore {
        let required = self.profile.required_experience_years;
        if required == 0 {
            return SubScore::NoSignal;
        }
        let candidate = extract_experience_years(resume_text) as f64;
        let ratio = candidate / required as f64;
        SubScore::Scored((ratio * EXPERIENCE_WEIGHT).min(EXPERIENCE_WEIGHT))
    }
}

/// Fraction of `terms` present as case-insensitive substrings of the résumé,
/// scaled to `weight`. No terms means no signal (and no division by zero).
fn containment_score(
    resume_lower: &str,
    terms: &[String],
    weight: f64,
) -> (SubScore, Vec<String>) {
    if terms.is_empty() {
        return (SubScore::NoSignal, Vec::new());
    }
    let matched: Vec<String> = terms
        .iter()
        .filter(|term| resume_lower.contains(term.as_str()))
        .cloned()
        .collect();
    let ratio = matched.len() as f64 / terms.len() as f64;
    (SubScore::Scored((ratio * weight).min(weight)), matched)
}
