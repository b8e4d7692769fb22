//! Job-description profile extraction.
//!
//! Derives the explicit requirements of a job description with first-match
//! regex heuristics: a labeled requirements/skills section, a stated
//! years-of-experience figure, and a certifications section. A description
//! with none of these produces an empty profile, which downstream scoring
//! treats as "no signal" rather than an error.

use once_cell::sync::Lazy;
use regex::Regex;

static SKILLS_SECTION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(?:requirements|skills|qualifications)\s*:\s*([^.\r\n]*)")
        .expect("valid regex")
});

static CERTIFICATIONS_SECTION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)certifications?\s*:\s*([^.\r\n]*)").expect("valid regex"));

static MUST_HAVE_SECTION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)must\s+have\s+([^.\r\n]*)").expect("valid regex"));

static EXPERIENCE_YEARS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(\d+)\s*\+?\s*years?\s+of\s+experience").expect("valid regex"));

static TERM_SEPARATOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i),|;|\band\b|\bor\b").expect("valid regex"));

/// Requirements derived from a job description at construction time.
/// Immutable once built; every field degrades to empty/zero when the
/// corresponding section is absent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JobProfile {
    /// Normalized skill terms from the first requirements/skills/qualifications section.
    pub required_skills: Vec<String>,
    /// Years from the first "N years of experience" phrase; 0 when absent.
    pub required_experience_years: u32,
    /// Normalized terms from the certifications section, falling back to a
    /// "must have" clause when no certifications label exists.
    pub certification_keywords: Vec<String>,
}

impl JobProfile {
    pub fn parse(job_description: &str) -> Self {
        let required_skills = SKILLS_SECTION
            .captures(job_description)
            .map(|c| split_terms(&c[1]))
            .unwrap_or_default();

        let certification_keywords = CERTIFICATIONS_SECTION
            .captures(job_description)
            .or_else(|| MUST_HAVE_SECTION.captures(job_description))
            .map(|c| split_terms(&c[1]))
            .unwrap_or_default();

        Self {
            required_skills,
            required_experience_years: extract_experience_years(job_description),
            certification_keywords,
        }
    }
}

/// First stated "N years of experience" in the text; 0 when no match.
/// Shared between job-description parsing and résumé scoring so both sides
/// read experience the same way.
pub fn extract_experience_years(text: &str) -> u32 {
    EXPERIENCE_YEARS
        .captures(text)
        .and_then(|c| c[1].parse().ok())
        .unwrap_or(0)
}

/// Splits a section segment into normalized terms on commas, semicolons,
/// "and", "or". Terms are lower-cased and trimmed; empties are dropped.
fn split_terms(segment: &str) -> Vec<String> {
    TERM_SEPARATOR
        .split(segment)
        .map(|term| term.trim().to_lowercase())
        .filter(|term| !term.is_empty())
        .collect()
}
