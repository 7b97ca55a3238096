//! ATS-style scoring over parsed entities
//!
//! Deterministic: the same entity bag and role profile always produce
//! the same sub-scores. The composite weights and the format checklist
//! allocation come from [`Config`] and stay fixed for a run.

use crate::analysis::entities::EntityBag;
use crate::config::{Config, FormatCheckConfig, ScoringConfig};
use crate::taxonomy::RoleProfile;
use serde::{Deserialize, Serialize};

/// Overlap between extracted skills and the role's required list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordMatch {
    pub score: u8,
    /// Required skills found in the resume, in taxonomy-authored order
    /// and casing.
    pub matched_skills: Vec<String>,
    /// Required skills absent from the resume, in taxonomy-authored
    /// order so higher-priority skills surface first.
    pub missing_skills: Vec<String>,
}

/// Checklist items that can fail and drag the format score down. Each
/// failure maps to one remediation suggestion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FormatCheck {
    MissingEmail,
    MissingPhone,
    LowBulletUsage,
    TooShort,
    TooLong,
    TableArtifacts,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scores {
    pub ats_score: u8,
    pub format_score: u8,
    pub section_score: u8,
    pub keyword_match: KeywordMatch,
    pub failed_format_checks: Vec<FormatCheck>,
}

pub struct Scorer {
    scoring: ScoringConfig,
    checks: FormatCheckConfig,
}

impl Scorer {
    pub fn new(config: &Config) -> Self {
        Self {
            scoring: config.scoring.clone(),
            checks: config.format_checks.clone(),
        }
    }

    pub fn score(&self, entities: &EntityBag, profile: &RoleProfile) -> Scores {
        let section_score = self.section_score(entities, profile);
        let (format_score, failed_format_checks) = self.format_score(entities);
        let keyword_match = self.keyword_match(entities, profile);

        let ats = self.scoring.keyword_weight * keyword_match.score as f32
            + self.scoring.section_weight * section_score as f32
            + self.scoring.format_weight * format_score as f32;

        Scores {
            ats_score: (ats.round() as u32).min(100) as u8,
            format_score,
            section_score,
            keyword_match,
            failed_format_checks,
        }
    }

    /// Fraction of the role's expected sections that have non-empty
    /// entity content, scaled to 0-100.
    fn section_score(&self, entities: &EntityBag, profile: &RoleProfile) -> u8 {
        if profile.sections.is_empty() {
            return 0;
        }

        let present = profile
            .sections
            .iter()
            .filter(|name| section_present(entities, name))
            .count();

        ((present as f32 / profile.sections.len() as f32) * 100.0).round() as u8
    }

    /// Weighted checklist over text-level signals; weights sum to 100.
    /// An empty document floors at zero across the board.
    fn format_score(&self, entities: &EntityBag) -> (u8, Vec<FormatCheck>) {
        if entities.signals.word_count == 0 {
            return (0, Vec::new());
        }

        let mut score = 0u32;
        let mut failed = Vec::new();

        if entities.contact.email.is_some() {
            score += self.checks.email_points as u32;
        } else {
            failed.push(FormatCheck::MissingEmail);
        }

        if entities.contact.phone.is_some() {
            score += self.checks.phone_points as u32;
        } else {
            failed.push(FormatCheck::MissingPhone);
        }

        let ratio = entities.signals.bulleted_entry_ratio.clamp(0.0, 1.0);
        score += (self.checks.bullet_points as f32 * ratio).round() as u32;
        if ratio < 0.5 {
            failed.push(FormatCheck::LowBulletUsage);
        }

        let words = entities.signals.word_count;
        if words < self.checks.min_words {
            failed.push(FormatCheck::TooShort);
        } else if words > self.checks.max_words {
            failed.push(FormatCheck::TooLong);
        } else {
            score += self.checks.length_points as u32;
        }

        if entities.signals.has_table_artifacts {
            failed.push(FormatCheck::TableArtifacts);
        } else {
            score += self.checks.no_table_artifact_points as u32;
        }

        (score.min(100) as u8, failed)
    }

    fn keyword_match(&self, entities: &EntityBag, profile: &RoleProfile) -> KeywordMatch {
        // Dedup the required list case-insensitively while preserving
        // the authored order.
        let mut seen = std::collections::HashSet::new();
        let required: Vec<&String> = profile
            .required_skills
            .iter()
            .filter(|skill| seen.insert(skill.to_lowercase()))
            .collect();

        if required.is_empty() {
            return KeywordMatch {
                score: 0,
                matched_skills: Vec::new(),
                missing_skills: Vec::new(),
            };
        }

        let (matched, missing): (Vec<&String>, Vec<&String>) = required
            .iter()
            .copied()
            .partition(|skill| entities.has_skill(skill));

        let score =
            ((matched.len() as f32 / required.len() as f32) * 100.0).round() as u8;

        KeywordMatch {
            score,
            matched_skills: matched.into_iter().cloned().collect(),
            missing_skills: missing.into_iter().cloned().collect(),
        }
    }
}

/// Map an expected-section name onto parsed entity content. Unknown
/// names fall back to a search of the recognized header lines.
fn section_present(entities: &EntityBag, name: &str) -> bool {
    let lowered = name.to_lowercase();

    if lowered.contains("skill") || lowered.contains("competenc") {
        !entities.skills.is_empty()
    } else if lowered.contains("experience")
        || lowered.contains("employment")
        || lowered.contains("work history")
    {
        !entities.experience.is_empty()
    } else if lowered.contains("education") || lowered.contains("academic") {
        !entities.education.is_empty()
    } else if lowered.contains("project")
        || lowered.contains("portfolio")
        || lowered.contains("research")
    {
        !entities.projects.is_empty()
    } else if lowered.contains("summary")
        || lowered.contains("objective")
        || lowered.contains("profile")
    {
        !entities.summary.is_empty()
    } else if lowered.contains("contact") {
        entities.contact.email.is_some()
    } else {
        entities
            .signals
            .header_lines
            .iter()
            .any(|header| header.contains(&lowered))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::entities::{EntityBag, ExperienceEntry, TextSignals};
    use crate::taxonomy::{RecommendedSkills, RoleProfile};

    fn profile(required: &[&str]) -> RoleProfile {
        RoleProfile {
            description: String::new(),
            required_skills: required.iter().map(|s| s.to_string()).collect(),
            sections: vec![
                "Technical Skills".to_string(),
                "Work Experience".to_string(),
                "Education".to_string(),
            ],
            recommended: RecommendedSkills::default(),
        }
    }

    fn resume_bag(skills: &[&str]) -> EntityBag {
        let mut bag = EntityBag::default();
        bag.contact.email = Some("jane@acme.com".to_string());
        bag.contact.phone = Some("555-123-4567".to_string());
        for skill in skills {
            bag.add_skill(skill);
        }
        bag.experience.push(ExperienceEntry {
            company: "Acme Corp".to_string(),
            title: "Data Analyst".to_string(),
            responsibilities: vec!["built dashboards".to_string()],
            ..ExperienceEntry::default()
        });
        bag.signals = TextSignals {
            word_count: 400,
            bulleted_entry_ratio: 1.0,
            has_table_artifacts: false,
            header_lines: vec!["work experience".to_string(), "skills".to_string()],
        };
        bag.document_type = bag.classify();
        bag
    }

    #[test]
    fn test_two_of_three_keywords_scores_67() {
        let scorer = Scorer::new(&Config::default());
        let bag = resume_bag(&["Python", "SQL"]);
        let scores = scorer.score(&bag, &profile(&["Python", "SQL", "Excel"]));

        assert_eq!(scores.keyword_match.score, 67);
        assert_eq!(scores.keyword_match.matched_skills, vec!["Python", "SQL"]);
        assert_eq!(scores.keyword_match.missing_skills, vec!["Excel"]);
    }

    #[test]
    fn test_missing_skills_preserve_authored_order() {
        let scorer = Scorer::new(&Config::default());
        let bag = resume_bag(&["SQL"]);
        let scores = scorer.score(&bag, &profile(&["Tableau", "SQL", "Excel", "Python"]));

        assert_eq!(
            scores.keyword_match.missing_skills,
            vec!["Tableau", "Excel", "Python"]
        );
    }

    #[test]
    fn test_required_list_deduped_before_scoring() {
        let scorer = Scorer::new(&Config::default());
        let bag = resume_bag(&["SQL"]);
        let scores = scorer.score(&bag, &profile(&["SQL", "sql", "Excel"]));

        // Two distinct requirements, one matched.
        assert_eq!(scores.keyword_match.score, 50);
        assert_eq!(scores.keyword_match.missing_skills, vec!["Excel"]);
    }

    #[test]
    fn test_adding_a_skill_never_lowers_the_score() {
        let scorer = Scorer::new(&Config::default());
        let role = profile(&["Python", "SQL", "Excel"]);

        let without = scorer.score(&resume_bag(&["Python"]), &role);
        let with = scorer.score(&resume_bag(&["Python", "Excel"]), &role);

        assert!(with.keyword_match.score >= without.keyword_match.score);
        assert!(!with
            .keyword_match
            .missing_skills
            .contains(&"Excel".to_string()));
    }

    #[test]
    fn test_format_checklist_totals() {
        let scorer = Scorer::new(&Config::default());
        let bag = resume_bag(&["SQL"]);
        let (score, failed) = scorer.format_score(&bag);

        // email 25 + phone 10 + bullets 25 + length 25 + no tables 15
        assert_eq!(score, 100);
        assert!(failed.is_empty());
    }

    #[test]
    fn test_format_failures_are_reported() {
        let scorer = Scorer::new(&Config::default());
        let mut bag = resume_bag(&["SQL"]);
        bag.contact.phone = None;
        bag.signals.word_count = 80;
        bag.signals.has_table_artifacts = true;
        bag.signals.bulleted_entry_ratio = 0.0;

        let (score, failed) = scorer.format_score(&bag);
        assert_eq!(score, 25); // only the email check passes
        assert!(failed.contains(&FormatCheck::MissingPhone));
        assert!(failed.contains(&FormatCheck::TooShort));
        assert!(failed.contains(&FormatCheck::TableArtifacts));
        assert!(failed.contains(&FormatCheck::LowBulletUsage));
    }

    #[test]
    fn test_empty_document_floors_all_scores() {
        let scorer = Scorer::new(&Config::default());
        let bag = EntityBag::default();
        let scores = scorer.score(&bag, &profile(&["Python", "SQL"]));

        assert_eq!(scores.format_score, 0);
        assert_eq!(scores.section_score, 0);
        assert_eq!(scores.keyword_match.score, 0);
        assert_eq!(scores.ats_score, 0);
        assert_eq!(scores.keyword_match.missing_skills, vec!["Python", "SQL"]);
    }

    #[test]
    fn test_section_score_counts_present_sections() {
        let scorer = Scorer::new(&Config::default());
        let bag = resume_bag(&["SQL"]);
        // Skills and experience present, education missing: 2 of 3.
        let scores = scorer.score(&bag, &profile(&["SQL"]));
        assert_eq!(scores.section_score, 67);
    }

    #[test]
    fn test_unmapped_section_falls_back_to_header_search() {
        let mut bag = resume_bag(&["SQL"]);
        bag.signals.header_lines.push("certifications".to_string());

        assert!(section_present(&bag, "Certifications"));
        assert!(!section_present(&bag, "Publications"));
    }

    #[test]
    fn test_scoring_is_idempotent() {
        let scorer = Scorer::new(&Config::default());
        let bag = resume_bag(&["Python", "SQL"]);
        let role = profile(&["Python", "SQL", "Excel"]);

        let first = scorer.score(&bag, &role);
        let second = scorer.score(&bag, &role);
        assert_eq!(first, second);
    }
}
