//! Heuristic resume text parsing: skills, experience lines, education lines,
//! and a one-line summary. No NLP — a fixed vocabulary plus line-shape
//! heuristics, which is as much structure as free-text resumes reliably give.

use serde::Serialize;

/// Skill vocabulary matched against every resume, as whole words.
const COMMON_SKILLS: &[&str] = &[
    // Programming languages
    "javascript", "typescript", "python", "java", "c++", "c#", "ruby", "go", "php", "swift",
    "kotlin", "rust",
    // Frontend
    "react", "angular", "vue", "html", "css", "sass", "less", "tailwind", "bootstrap",
    "material-ui", "redux", "webpack", "vite", "next.js", "svelte",
    // Backend
    "node.js", "express", "django", "flask", "spring", "asp.net", "laravel", "ruby on rails",
    "axum",
    // Databases
    "sql", "mysql", "postgresql", "mongodb", "firebase", "supabase", "dynamodb", "redis",
    "oracle",
    // Cloud and DevOps
    "aws", "azure", "gcp", "docker", "kubernetes", "jenkins", "ci/cd", "terraform", "ansible",
    // Mobile
    "android", "ios", "react native", "flutter", "xamarin", "ionic",
    // AI / ML
    "machine learning", "deep learning", "tensorflow", "pytorch", "scikit-learn", "nlp",
    "computer vision",
    // Practices and tooling
    "git", "github", "agile", "scrum", "jira", "kanban", "tdd", "bdd", "rest api", "graphql",
    // Soft skills
    "leadership", "communication", "teamwork", "problem solving", "critical thinking",
    "time management", "project management", "adaptability", "creativity", "collaboration",
    "presentation",
];

/// Domain-specific additions, unlocked when a cue word appears anywhere in
/// the resume. Matched by plain substring, not whole word.
const SOFTWARE_CUES: &[&str] = &["software", "developer", "engineer"];
const SOFTWARE_SKILLS: &[&str] = &[
    "algorithms",
    "data structures",
    "object-oriented",
    "functional programming",
    "microservices",
    "system design",
];

const FINANCE_CUES: &[&str] = &["finance", "business", "analyst"];
const FINANCE_SKILLS: &[&str] = &[
    "excel",
    "financial analysis",
    "tableau",
    "power bi",
    "forecasting",
    "budgeting",
    "accounting",
];

const MARKETING_CUES: &[&str] = &["marketing", "seo", "content"];
const MARKETING_SKILLS: &[&str] = &[
    "seo",
    "sem",
    "social media",
    "content strategy",
    "analytics",
    "copywriting",
    "brand management",
];

const JOB_TITLE_KEYWORDS: &[&str] = &[
    "engineer",
    "developer",
    "manager",
    "director",
    "specialist",
    "analyst",
    "designer",
    "architect",
    "consultant",
    "intern",
    "lead",
];

/// Legal-entity markers; matched case-sensitively, they only mean anything
/// capitalized.
const COMPANY_INDICATORS: &[&str] = &["Inc", "LLC", "Ltd", "Corporation", "Company", "GmbH"];

const EDUCATION_KEYWORDS: &[&str] = &[
    "bachelor",
    "master",
    "phd",
    "bs",
    "ms",
    "ba",
    "ma",
    "b.s.",
    "m.s.",
    "university",
    "college",
    "school",
    "institute",
    "degree",
    "education",
    "major",
    "minor",
    "graduated",
    "gpa",
];

const FIELDS_OF_STUDY: &[&str] = &[
    "computer science",
    "engineering",
    "business",
    "marketing",
    "finance",
    "data science",
    "design",
    "healthcare",
    "education",
    "psychology",
];

#[derive(Debug, Clone, Serialize)]
pub struct ParsedResume {
    pub skills: Vec<String>,
    pub experience: Vec<String>,
    pub education: Vec<String>,
    pub summary: String,
}

/// Whole-word containment: `word` occurs in `text` with no alphanumeric
/// neighbor on either side. Both arguments are matched as given; callers
/// lowercase for case-insensitive checks.
fn contains_word(text: &str, word: &str) -> bool {
    if word.is_empty() {
        return false;
    }
    let mut start = 0;
    while let Some(offset) = text[start..].find(word) {
        let begin = start + offset;
        let end = begin + word.len();
        let boundary_before = text[..begin].chars().next_back().map_or(true, |c| !c.is_alphanumeric());
        let boundary_after = text[end..].chars().next().map_or(true, |c| !c.is_alphanumeric());
        if boundary_before && boundary_after {
            return true;
        }
        // The vocabulary is ASCII, so begin + 1 stays on a char boundary.
        start = begin + 1;
    }
    false
}

fn extract_skills(text_lower: &str) -> Vec<String> {
    let mut found: Vec<String> = COMMON_SKILLS
        .iter()
        .filter(|skill| contains_word(text_lower, skill))
        .map(|skill| skill.to_string())
        .collect();

    let domains = [
        (SOFTWARE_CUES, SOFTWARE_SKILLS),
        (FINANCE_CUES, FINANCE_SKILLS),
        (MARKETING_CUES, MARKETING_SKILLS),
    ];
    for (cues, skills) in domains {
        if cues.iter().any(|cue| text_lower.contains(cue)) {
            for skill in skills {
                if text_lower.contains(skill) && !found.iter().any(|f| f == skill) {
                    found.push(skill.to_string());
                }
            }
        }
    }

    found
}

fn is_section_header(line: &str) -> bool {
    let trimmed = line.trim();
    !trimmed.is_empty()
        && line.len() < 30
        && trimmed.chars().all(|c| c.is_ascii_uppercase() || c.is_whitespace())
        && ["experience", "work", "employment", "history"]
            .iter()
            .any(|kw| trimmed.to_lowercase().contains(kw))
}

fn has_bullet(line: &str) -> bool {
    let trimmed = line.trim_start();
    line.contains('•') || line.contains('*') || trimmed.starts_with('-')
}

fn looks_like_job_title(line: &str, line_lower: &str) -> bool {
    line.len() < 100
        && !has_bullet(line)
        && JOB_TITLE_KEYWORDS.iter().any(|kw| contains_word(line_lower, kw))
}

fn looks_like_company(line: &str) -> bool {
    if line.len() >= 50 || has_bullet(line) {
        return false;
    }
    let trimmed = line.trim();
    let has_indicator = COMPANY_INDICATORS.iter().any(|ind| contains_word(line, ind));
    let plain_text = !trimmed.is_empty()
        && trimmed
            .chars()
            .all(|c| c.is_ascii_alphabetic() || c.is_whitespace() || c == ',' || c == '.');
    has_indicator || plain_text
}

fn extract_experience(text: &str) -> Vec<String> {
    let lines: Vec<&str> = text.lines().collect();

    let sections = lines.iter().filter(|l| is_section_header(l));
    let job_lines = lines
        .iter()
        .filter(|l| looks_like_job_title(l, &l.to_lowercase()));
    let company_lines = lines.iter().filter(|l| looks_like_company(l));
    let bullets = lines
        .iter()
        .filter(|l| {
            let trimmed = l.trim_start();
            (trimmed.starts_with('•') || trimmed.starts_with('-') || trimmed.starts_with('*'))
                && l.len() > 10
                && l.len() < 200
        })
        .take(10);

    sections
        .chain(job_lines)
        .chain(company_lines)
        .chain(bullets)
        .map(|l| l.to_string())
        .collect()
}

fn extract_education(text: &str) -> Vec<String> {
    text.lines()
        .filter(|line| {
            line.len() < 150
                && EDUCATION_KEYWORDS
                    .iter()
                    .any(|kw| contains_word(&line.to_lowercase(), kw))
        })
        .map(|line| line.to_string())
        .collect()
}

fn generate_summary(text: &str, text_lower: &str, skills: &[String]) -> String {
    let word_count = text.split_whitespace().count();
    let top_skills = skills
        .iter()
        .take(5)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ");

    let field_clause = FIELDS_OF_STUDY
        .iter()
        .find(|field| text_lower.contains(*field))
        .map(|field| format!(" in {field}"))
        .unwrap_or_default();

    let expertise = if top_skills.is_empty() {
        "various technologies".to_string()
    } else {
        top_skills
    };

    format!(
        "Resume contains approximately {word_count} words{field_clause} and highlights expertise in {expertise}."
    )
}

/// Parses free resume text into skills, experience lines, education lines,
/// and a summary sentence. Total function: unusable input yields empty lists.
pub fn parse_resume_text(text: &str) -> ParsedResume {
    let text_lower = text.to_lowercase();
    let skills = extract_skills(&text_lower);
    let experience = extract_experience(text);
    let education = extract_education(text);
    let summary = generate_summary(text, &text_lower, &skills);

    ParsedResume {
        skills,
        experience,
        education,
        summary,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_RESUME: &str = "\
Jane Doe
Senior Software Engineer

WORK EXPERIENCE
Acme Corporation
Software Engineer
• Built a payments service in Python and PostgreSQL handling 2M requests/day
• Led migration to Kubernetes, cutting deploy time by 80%

EDUCATION
BS in Computer Science, State University, graduated 2019
";

    #[test]
    fn test_skills_found_as_whole_words() {
        let parsed = parse_resume_text(SAMPLE_RESUME);
        assert!(parsed.skills.contains(&"python".to_string()));
        assert!(parsed.skills.contains(&"postgresql".to_string()));
        assert!(parsed.skills.contains(&"kubernetes".to_string()));
    }

    #[test]
    fn test_substring_skill_does_not_match_inside_word() {
        // "going" must not register the language "go".
        let parsed = parse_resume_text("Ongoing outgoing going");
        assert!(!parsed.skills.contains(&"go".to_string()));

        let parsed = parse_resume_text("Shipped services written in Go and Java");
        assert!(parsed.skills.contains(&"go".to_string()));
    }

    #[test]
    fn test_domain_skills_require_cue_word() {
        // "microservices" is in the software sub-list, gated on a cue.
        let with_cue = parse_resume_text("Software developer building microservices");
        assert!(with_cue.skills.contains(&"microservices".to_string()));

        let without_cue = parse_resume_text("I enjoy microservices");
        assert!(!without_cue.skills.contains(&"microservices".to_string()));
    }

    #[test]
    fn test_experience_includes_section_title_and_bullets() {
        let parsed = parse_resume_text(SAMPLE_RESUME);
        assert!(parsed.experience.iter().any(|l| l.contains("WORK EXPERIENCE")));
        assert!(parsed.experience.iter().any(|l| l.contains("payments service")));
        assert!(parsed
            .experience
            .iter()
            .any(|l| l.contains("Acme Corporation")));
    }

    #[test]
    fn test_education_lines_detected() {
        let parsed = parse_resume_text(SAMPLE_RESUME);
        assert_eq!(parsed.education.len(), 2); // header line + degree line
        assert!(parsed.education.iter().any(|l| l.contains("State University")));
    }

    #[test]
    fn test_summary_mentions_field_and_skills() {
        let parsed = parse_resume_text(SAMPLE_RESUME);
        assert!(parsed.summary.contains("computer science"));
        assert!(parsed.summary.contains("python"));
    }

    #[test]
    fn test_empty_text_yields_empty_lists() {
        let parsed = parse_resume_text("");
        assert!(parsed.skills.is_empty());
        assert!(parsed.experience.is_empty());
        assert!(parsed.education.is_empty());
        assert!(parsed.summary.contains("various technologies"));
    }

    #[test]
    fn test_contains_word_boundaries() {
        assert!(contains_word("knows c++ well", "c++"));
        assert!(contains_word("sql, python", "sql"));
        assert!(!contains_word("nosql databases", "sql"));
        assert!(!contains_word("javascripting", "javascript"));
        assert!(contains_word("java", "java"));
    }

    #[test]
    fn test_company_indicator_is_case_sensitive() {
        assert!(contains_word("Acme Inc", "Inc"));
        assert!(!contains_word("incremental gains", "Inc"));
    }
}
