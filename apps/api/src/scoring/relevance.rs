//! Resume-to-job-description relevance: a bounded heuristic, not a ranking
//! model. Skills carry most of the weight, keyword overlap with experience
//! and education lines tops it up, and the result is clamped to [0, 100].

use tracing::debug;

use crate::scoring::resume::parse_resume_text;

/// Returned when either input is empty and no signal exists either way.
const NEUTRAL_SCORE: u8 = 50;

/// Skill ratio contributes at most 60 points (scaled by 70 so a partial
/// match still scores meaningfully).
const SKILL_SCORE_CAP: f64 = 60.0;
const SKILL_SCORE_SCALE: f64 = 70.0;

/// Keyword hits contribute 2 points each, capped at 30.
const KEYWORD_SCORE_CAP: f64 = 30.0;
const KEYWORD_HIT_VALUE: f64 = 2.0;

/// Bonus for clearing this many matching skills.
const BONUS_SKILL_COUNT: usize = 3;
const BONUS_POINTS: f64 = 10.0;

const STOPWORDS: &[&str] = &["and", "the", "this", "that", "with", "from", "have"];

/// Scores a resume against a job description, returning an integer in
/// [0, 100]. Empty input on either side yields the neutral default.
pub fn relevance_score(resume_text: &str, job_description: &str) -> u8 {
    if resume_text.is_empty() || job_description.is_empty() {
        return NEUTRAL_SCORE;
    }

    let parsed = parse_resume_text(resume_text);
    let jd_lower = job_description.to_lowercase();

    let matching_skills: Vec<&String> = parsed
        .skills
        .iter()
        .filter(|skill| jd_lower.contains(skill.as_str()))
        .collect();

    let skill_match_ratio = if parsed.skills.is_empty() {
        0.0
    } else {
        matching_skills.len() as f64 / parsed.skills.len() as f64
    };
    let skill_score = (skill_match_ratio * SKILL_SCORE_SCALE).min(SKILL_SCORE_CAP);

    let job_words = significant_words(&jd_lower);
    let keyword_hits = count_keyword_hits(&parsed.experience, &parsed.education, &job_words);
    let keyword_score = (keyword_hits as f64 * KEYWORD_HIT_VALUE).min(KEYWORD_SCORE_CAP);

    let mut total = skill_score + keyword_score;
    if matching_skills.len() > BONUS_SKILL_COUNT {
        total += BONUS_POINTS;
    }

    debug!(
        "Relevance: {}/{} skills matched, {} keyword hits, raw total {total:.1}",
        matching_skills.len(),
        parsed.skills.len(),
        keyword_hits
    );

    total.clamp(0.0, 100.0).round() as u8
}

/// Lowercased JD tokens worth matching: punctuation stripped, longer than
/// three characters, stopwords removed.
fn significant_words(jd_lower: &str) -> Vec<String> {
    let cleaned: String = jd_lower
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '_' || c.is_whitespace())
        .collect();
    cleaned
        .split_whitespace()
        .filter(|word| word.len() > 3)
        .filter(|word| !STOPWORDS.contains(word))
        .map(str::to_string)
        .collect()
}

/// Counts, over every experience and education line, how many JD words find
/// a home in that line. Containment runs both directions so inflections
/// still match ("engineering" in the JD, "engineer" on the resume).
fn count_keyword_hits(experience: &[String], education: &[String], job_words: &[String]) -> usize {
    let mut hits = 0;
    for item in experience.iter().chain(education.iter()) {
        let item_lower = item.to_lowercase();
        let item_words: Vec<&str> = item_lower.split_whitespace().collect();
        for job_word in job_words {
            if item_words
                .iter()
                .any(|word| word.contains(job_word.as_str()) || job_word.contains(word))
            {
                hits += 1;
            }
        }
    }
    hits
}
