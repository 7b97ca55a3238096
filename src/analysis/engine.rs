//! Analysis engine: extraction, parsing, scoring, and suggestion
//! generation wired into one pass
//!
//! One invocation analyzes one document end to end. The engine holds no
//! per-request state, so a single instance can serve any number of
//! independent calls. Business-logic conditions never fail the caller;
//! a broken upload produces a zero-scored report classified as `other`.

use crate::analysis::entities::{DocumentType, EntityBag};
use crate::analysis::parser::SectionParser;
use crate::analysis::scorer::{KeywordMatch, Scorer};
use crate::analysis::suggestions::SuggestionGenerator;
use crate::config::Config;
use crate::input::file_detector::FileType;
use crate::input::text_extractor::{extract_text, normalize_text};
use crate::taxonomy::RoleProfile;
use chrono::{DateTime, Utc};
use log::debug;
use serde::{Deserialize, Serialize};

/// Final analysis result for one uploaded document. Built once,
/// serialized verbatim by whoever stores or renders it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub ats_score: u8,
    pub format_score: u8,
    pub section_score: u8,
    pub keyword_match: KeywordMatch,

    /// All category suggestions flattened, in category order.
    pub suggestions: Vec<String>,
    pub contact_suggestions: Vec<String>,
    pub summary_suggestions: Vec<String>,
    pub skills_suggestions: Vec<String>,
    pub experience_suggestions: Vec<String>,
    pub education_suggestions: Vec<String>,
    pub format_suggestions: Vec<String>,
    pub recommended_additions: Vec<String>,

    pub document_type: DocumentType,
    /// Present exactly when `document_type` is not `resume`; the caller
    /// should surface it as a blocking warning.
    pub classification_notice: Option<String>,

    pub entities: EntityBag,
    pub metadata: ReportMetadata,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportMetadata {
    pub generated_at: DateTime<Utc>,
    pub analyzer_version: String,
    pub word_count: usize,
}

pub struct AnalysisEngine {
    parser: SectionParser,
    scorer: Scorer,
    suggester: SuggestionGenerator,
    detailed: bool,
}

impl AnalysisEngine {
    pub fn new(config: &Config) -> Self {
        Self {
            parser: SectionParser::new(),
            scorer: Scorer::new(config),
            suggester: SuggestionGenerator::new(config),
            detailed: config.output.detailed,
        }
    }

    /// Analyze an uploaded document against a role profile.
    ///
    /// Total for business-logic conditions: extraction failures degrade
    /// to an empty document rather than an error, so the only failures
    /// that can escape are fatal host conditions.
    pub fn analyze(
        &self,
        bytes: &[u8],
        file_type: FileType,
        profile: &RoleProfile,
    ) -> AnalysisReport {
        let text = extract_text(bytes, file_type);
        debug!("extracted {} characters of normalized text", text.len());
        self.analyze_normalized(&text, profile)
    }

    /// Analyze already-extracted text against a role profile.
    pub fn analyze_text(&self, text: &str, profile: &RoleProfile) -> AnalysisReport {
        self.analyze_normalized(&normalize_text(text), profile)
    }

    fn analyze_normalized(&self, text: &str, profile: &RoleProfile) -> AnalysisReport {
        let entities = self.parser.parse(text, profile);
        debug!(
            "parsed document: type={}, {} experience entries, {} skills",
            entities.document_type,
            entities.experience.len(),
            entities.skills.len()
        );

        let scores = self.scorer.score(&entities, profile);
        let suggestions = self
            .suggester
            .generate(&entities, &scores, profile, self.detailed);

        let metadata = ReportMetadata {
            generated_at: Utc::now(),
            analyzer_version: env!("CARGO_PKG_VERSION").to_string(),
            word_count: entities.signals.word_count,
        };

        AnalysisReport {
            ats_score: scores.ats_score,
            format_score: scores.format_score,
            section_score: scores.section_score,
            keyword_match: scores.keyword_match,
            suggestions: suggestions.flattened(),
            contact_suggestions: suggestions.contact,
            summary_suggestions: suggestions.summary,
            skills_suggestions: suggestions.skills,
            experience_suggestions: suggestions.experience,
            education_suggestions: suggestions.education,
            format_suggestions: suggestions.format,
            recommended_additions: suggestions.recommended_additions,
            document_type: entities.document_type,
            classification_notice: suggestions.classification_notice,
            entities,
            metadata,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::taxonomy::{RecommendedSkills, RoleProfile};

    fn analyst_profile() -> RoleProfile {
        RoleProfile {
            description: String::new(),
            required_skills: vec![
                "Python".to_string(),
                "SQL".to_string(),
                "Excel".to_string(),
            ],
            sections: vec![
                "Technical Skills".to_string(),
                "Work Experience".to_string(),
                "Education".to_string(),
            ],
            recommended: RecommendedSkills::default(),
        }
    }

    fn engine() -> AnalysisEngine {
        AnalysisEngine::new(&Config::default())
    }

    #[test]
    fn test_empty_pdf_bytes_degrade_to_other() {
        let report = engine().analyze(b"", FileType::Pdf, &analyst_profile());

        assert_eq!(report.document_type, DocumentType::Other);
        assert_eq!(report.ats_score, 0);
        assert_eq!(report.format_score, 0);
        assert_eq!(report.section_score, 0);
        assert_eq!(report.keyword_match.score, 0);
        assert!(report.suggestions.is_empty());
        assert!(report.classification_notice.is_some());
    }

    #[test]
    fn test_inline_scenario_scores_67() {
        let text = "email: jane@acme.com, Python, SQL, 2019-2021 Data Analyst at Acme Corp";
        let report = engine().analyze_text(text, &analyst_profile());

        assert_eq!(report.keyword_match.score, 67);
        assert!(report
            .keyword_match
            .matched_skills
            .contains(&"Python".to_string()));
        assert!(report
            .keyword_match
            .matched_skills
            .contains(&"SQL".to_string()));
        assert_eq!(report.keyword_match.missing_skills, vec!["Excel"]);
    }

    #[test]
    fn test_lorem_ipsum_produces_no_category_suggestions() {
        let report = engine().analyze_text("Lorem ipsum dolor sit amet", &analyst_profile());

        assert_eq!(report.document_type, DocumentType::Other);
        assert!(report.contact_suggestions.is_empty());
        assert!(report.summary_suggestions.is_empty());
        assert!(report.skills_suggestions.is_empty());
        assert!(report.experience_suggestions.is_empty());
        assert!(report.education_suggestions.is_empty());
        assert!(report.format_suggestions.is_empty());
        assert!(report.suggestions.is_empty());
    }

    #[test]
    fn test_scores_stay_in_bounds() {
        let text = "\
Jane Smith
jane@acme.com
Skills
Python, SQL, Excel
Experience
Data Analyst at Acme Corp
2019 - 2021
- Reduced reporting latency by 40%";
        let report = engine().analyze_text(text, &analyst_profile());

        assert_eq!(report.document_type, DocumentType::Resume);
        assert!(report.ats_score <= 100);
        assert!(report.format_score <= 100);
        assert!(report.section_score <= 100);
        assert!(report.keyword_match.score <= 100);
    }

    #[test]
    fn test_missing_skills_are_a_deduped_subset_of_required() {
        let report = engine().analyze_text("Lorem ipsum dolor sit amet", &analyst_profile());
        let required = analyst_profile().required_skills;

        let mut seen = std::collections::HashSet::new();
        for skill in &report.keyword_match.missing_skills {
            assert!(required.contains(skill));
            assert!(seen.insert(skill.clone()), "duplicate missing skill");
        }
    }

    #[test]
    fn test_adding_required_skill_to_text_is_monotone() {
        let base = "email: jane@acme.com, Python, SQL, 2019-2021 Data Analyst at Acme Corp";
        let extended = format!("{}, Excel", base);

        let before = engine().analyze_text(base, &analyst_profile());
        let after = engine().analyze_text(&extended, &analyst_profile());

        assert!(after.keyword_match.score >= before.keyword_match.score);
        assert!(!after
            .keyword_match
            .missing_skills
            .contains(&"Excel".to_string()));
    }

    #[test]
    fn test_report_serializes_to_json() {
        let report = engine().analyze_text("Lorem ipsum dolor sit amet", &analyst_profile());
        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("\"document_type\":\"other\""));

        let parsed: AnalysisReport = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.ats_score, report.ats_score);
    }
}
