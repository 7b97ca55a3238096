//! Structured extraction result for one resume document

use serde::{Deserialize, Serialize};

/// Coarse classification of the analyzed document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentType {
    Resume,
    Other,
}

impl std::fmt::Display for DocumentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DocumentType::Resume => write!(f, "resume"),
            DocumentType::Other => write!(f, "other"),
        }
    }
}

/// Contact fields. `None` means the field was not found, which is
/// distinct from a found-but-empty value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContactInfo {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub linkedin: Option<String>,
    pub github: Option<String>,
    pub portfolio: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EducationEntry {
    pub institution: String,
    pub degree: String,
    pub field: String,
    pub date_range: String,
    pub gpa: Option<String>,
    pub achievements: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExperienceEntry {
    pub company: String,
    pub title: String,
    pub date_range: String,
    pub description: String,
    pub responsibilities: Vec<String>,
    pub achievements: Vec<String>,
}

impl ExperienceEntry {
    /// A short label for suggestion text, falling back through the
    /// fields an entry may or may not have.
    pub fn label(&self) -> String {
        match (self.title.is_empty(), self.company.is_empty()) {
            (false, false) => format!("{} at {}", self.title, self.company),
            (false, true) => self.title.clone(),
            (true, false) => self.company.clone(),
            (true, true) => "an experience entry".to_string(),
        }
    }

    pub fn has_bullet_content(&self) -> bool {
        !self.responsibilities.is_empty() || !self.achievements.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectEntry {
    pub name: String,
    pub technologies: String,
    pub description: String,
    pub responsibilities: Vec<String>,
    pub achievements: Vec<String>,
    pub link: Option<String>,
}

/// Raw-text signals the scorer consumes so it never has to re-read the
/// document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TextSignals {
    pub word_count: usize,
    /// Fraction of experience entries carrying at least one bullet line.
    pub bulleted_entry_ratio: f32,
    pub has_table_artifacts: bool,
    /// Recognized header lines, lowercased, in document order.
    pub header_lines: Vec<String>,
}

/// Everything the parser recovered from one document. Built once per
/// analysis, immutable afterwards. Missing sections are empty
/// collections, never absent markers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EntityBag {
    pub contact: ContactInfo,
    pub summary: String,
    pub education: Vec<EducationEntry>,
    pub experience: Vec<ExperienceEntry>,
    pub projects: Vec<ProjectEntry>,
    /// First-seen order, deduplicated case-insensitively; original
    /// casing retained for display.
    pub skills: Vec<String>,
    pub signals: TextSignals,
    pub document_type: DocumentType,
}

impl Default for DocumentType {
    fn default() -> Self {
        DocumentType::Other
    }
}

impl EntityBag {
    /// Case-insensitive skill membership check.
    pub fn has_skill(&self, skill: &str) -> bool {
        let folded = skill.to_lowercase();
        self.skills.iter().any(|s| s.to_lowercase() == folded)
    }

    /// Add a skill unless an equivalent spelling is already present.
    pub fn add_skill(&mut self, skill: &str) {
        let trimmed = skill.trim();
        if trimmed.is_empty() || self.has_skill(trimmed) {
            return;
        }
        self.skills.push(trimmed.to_string());
    }

    /// A document is a resume when at least two of education,
    /// experience, skills, and a contact email are present with content.
    pub fn classify(&self) -> DocumentType {
        let evidence = [
            !self.education.is_empty(),
            !self.experience.is_empty(),
            !self.skills.is_empty(),
            self.contact.email.is_some(),
        ];
        if evidence.iter().filter(|present| **present).count() >= 2 {
            DocumentType::Resume
        } else {
            DocumentType::Other
        }
    }
}
