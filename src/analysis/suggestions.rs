//! Categorized improvement suggestions
//!
//! Rules run independently per category and accumulate; nothing
//! short-circuits. When the document is not a resume the generator
//! returns empty lists plus a single classification notice, and the
//! caller is expected to surface that as a blocking warning.

use crate::analysis::entities::{DocumentType, EntityBag};
use crate::analysis::scorer::{FormatCheck, Scores};
use crate::config::{Config, FormatCheckConfig, SuggestionConfig};
use crate::taxonomy::RoleProfile;
use serde::{Deserialize, Serialize};
use strsim::jaro_winkler;
use unicode_segmentation::UnicodeSegmentation;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SuggestionSet {
    pub contact: Vec<String>,
    pub summary: Vec<String>,
    pub skills: Vec<String>,
    pub experience: Vec<String>,
    pub education: Vec<String>,
    pub format: Vec<String>,
    /// Recommended technical/soft skills for the role not yet on the
    /// resume; only populated in detailed mode.
    pub recommended_additions: Vec<String>,
    /// Set when the document was not classified as a resume.
    pub classification_notice: Option<String>,
}

impl SuggestionSet {
    /// All category suggestions in a fixed order, for callers that want
    /// one flat list.
    pub fn flattened(&self) -> Vec<String> {
        self.contact
            .iter()
            .chain(self.summary.iter())
            .chain(self.skills.iter())
            .chain(self.experience.iter())
            .chain(self.education.iter())
            .chain(self.format.iter())
            .cloned()
            .collect()
    }
}

pub struct SuggestionGenerator {
    config: SuggestionConfig,
    checks: FormatCheckConfig,
}

impl SuggestionGenerator {
    pub fn new(config: &Config) -> Self {
        Self {
            config: config.suggestions.clone(),
            checks: config.format_checks.clone(),
        }
    }

    pub fn generate(
        &self,
        entities: &EntityBag,
        scores: &Scores,
        profile: &RoleProfile,
        detailed: bool,
    ) -> SuggestionSet {
        if entities.document_type != DocumentType::Resume {
            return SuggestionSet {
                classification_notice: Some(format!(
                    "This document was classified as '{}', not a resume. Upload a resume to get targeted suggestions.",
                    entities.document_type
                )),
                ..SuggestionSet::default()
            };
        }

        let mut set = SuggestionSet::default();
        self.contact_rules(entities, &mut set.contact);
        self.summary_rules(entities, profile, &mut set.summary);
        self.skills_rules(entities, scores, &mut set.skills);
        self.experience_rules(entities, &mut set.experience);
        self.education_rules(entities, &mut set.education);
        self.format_rules(scores, &mut set.format);
        if detailed {
            set.recommended_additions = self.recommended_additions(entities, profile);
        }

        set
    }

    fn contact_rules(&self, entities: &EntityBag, out: &mut Vec<String>) {
        if entities.contact.email.is_none() {
            out.push("Add a professional email address so recruiters and ATS parsers can reach you.".to_string());
        }
        if entities.contact.phone.is_none() {
            out.push("Add a phone number to your contact details.".to_string());
        }
        if entities.contact.linkedin.is_none() && entities.contact.portfolio.is_none() {
            out.push("Add a LinkedIn profile or portfolio link to strengthen your contact section.".to_string());
        }
    }

    fn summary_rules(&self, entities: &EntityBag, profile: &RoleProfile, out: &mut Vec<String>) {
        let words = entities.summary.unicode_words().count();

        if entities.summary.is_empty() {
            out.push("Add a professional summary that states your role, experience, and focus.".to_string());
        } else if words < self.config.min_summary_words {
            out.push(format!(
                "Expand your summary to at least {} words; a one-liner reads as a placeholder.",
                self.config.min_summary_words
            ));
        }

        if !entities.summary.is_empty() {
            let summary_lower = entities.summary.to_lowercase();
            let mentions_required = profile
                .required_skills
                .iter()
                .any(|skill| summary_lower.contains(&skill.to_lowercase()));
            if !mentions_required {
                out.push("Work one or two of the role's key skills into your summary so it matches the job you target.".to_string());
            }
        }
    }

    fn skills_rules(&self, entities: &EntityBag, scores: &Scores, out: &mut Vec<String>) {
        for skill in &scores.keyword_match.missing_skills {
            match self.find_near_miss(entities, skill) {
                Some(near) => out.push(format!(
                    "'{}' appears as '{}' in your resume; fix the spelling so keyword filters can match it.",
                    skill, near
                )),
                None => out.push(format!(
                    "Add '{}' to your skills section if you have experience with it.",
                    skill
                )),
            }
        }

        let required_total =
            scores.keyword_match.matched_skills.len() + scores.keyword_match.missing_skills.len();
        if required_total > 0 && scores.keyword_match.matched_skills.len() * 2 < required_total {
            out.push("Broaden your skills section: fewer than half of the role's required skills are represented.".to_string());
        }
    }

    fn experience_rules(&self, entities: &EntityBag, out: &mut Vec<String>) {
        for entry in &entities.experience {
            if entry.achievements.is_empty() {
                out.push(format!(
                    "Add a quantified achievement to {} (metrics like %, revenue, or user counts).",
                    entry.label()
                ));
            }
            if !entry.description.is_empty() && !entry.has_bullet_content() {
                out.push(format!(
                    "Break the description of {} into bullet points covering your responsibilities.",
                    entry.label()
                ));
            }
        }
    }

    fn education_rules(&self, entities: &EntityBag, out: &mut Vec<String>) {
        for entry in &entities.education {
            let label = if entry.institution.is_empty() {
                "an education entry".to_string()
            } else {
                entry.institution.clone()
            };

            if entry.date_range.is_empty() {
                out.push(format!("Add a graduation date to {}.", label));
            }
            if entry.field.is_empty() {
                out.push(format!("Name the field of study for {}.", label));
            }
        }
    }

    fn format_rules(&self, scores: &Scores, out: &mut Vec<String>) {
        for check in &scores.failed_format_checks {
            let text = match check {
                FormatCheck::MissingEmail => {
                    "Include an email address; resumes without one are routinely filtered out.".to_string()
                }
                FormatCheck::MissingPhone => {
                    "Include a phone number in a standard format.".to_string()
                }
                FormatCheck::LowBulletUsage => {
                    "Use bullet points under your experience entries instead of paragraphs.".to_string()
                }
                FormatCheck::TooShort => format!(
                    "Your resume is under {} words; flesh out experience and project detail.",
                    self.checks.min_words
                ),
                FormatCheck::TooLong => format!(
                    "Your resume is over {} words; trim it so the strongest content stands out.",
                    self.checks.max_words
                ),
                FormatCheck::TableArtifacts => {
                    "Replace table layouts with plain text; ATS parsers scramble table columns.".to_string()
                }
            };
            out.push(text);
        }
    }

    /// A missing required skill that closely resembles a token already
    /// on the resume is probably a typo worth calling out.
    fn find_near_miss(&self, entities: &EntityBag, skill: &str) -> Option<String> {
        let skill_lower = skill.to_lowercase();
        if skill_lower.len() < 4 {
            return None;
        }

        entities
            .skills
            .iter()
            .map(|candidate| {
                (
                    candidate,
                    jaro_winkler(&candidate.to_lowercase(), &skill_lower) as f32,
                )
            })
            .filter(|(candidate, similarity)| {
                *similarity >= self.config.near_miss_threshold
                    && candidate.to_lowercase() != skill_lower
            })
            .max_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(candidate, _)| candidate.clone())
    }

    fn recommended_additions(&self, entities: &EntityBag, profile: &RoleProfile) -> Vec<String> {
        profile
            .recommended
            .technical
            .iter()
            .chain(profile.recommended.soft.iter())
            .filter(|skill| !entities.has_skill(skill))
            .cloned()
            .collect()
    }
}
