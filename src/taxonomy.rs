//! Role taxonomy: per-role required skills, descriptions, and expected
//! resume sections.
//!
//! The taxonomy is reference data, parsed once at startup and treated as
//! immutable for the rest of the run. The authored order of
//! `required_skills` is significant — it decides the order in which
//! missing skills are reported — so every collection here is a `Vec`,
//! never a set or unordered map.

use crate::error::{Result, ResumeAnalyzerError};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Built-in taxonomy shipped with the binary.
const DEFAULT_TAXONOMY: &str = include_str!("../data/job_roles.toml");

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Taxonomy {
    pub categories: Vec<RoleCategory>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoleCategory {
    pub name: String,
    pub roles: Vec<Role>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Role {
    pub name: String,
    #[serde(flatten)]
    pub profile: RoleProfile,
}

/// Scoring baseline for one job role. Never mutated by the analysis core.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoleProfile {
    pub description: String,
    pub required_skills: Vec<String>,
    /// Resume sections this role expects, in display order.
    pub sections: Vec<String>,
    pub recommended: RecommendedSkills,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecommendedSkills {
    #[serde(default)]
    pub technical: Vec<String>,
    #[serde(default)]
    pub soft: Vec<String>,
}

impl Taxonomy {
    /// Load the built-in taxonomy.
    pub fn builtin() -> Result<Self> {
        Self::from_str(DEFAULT_TAXONOMY)
    }

    /// Load a user-supplied taxonomy file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    fn from_str(content: &str) -> Result<Self> {
        let taxonomy: Taxonomy = toml::from_str(content)
            .map_err(|e| ResumeAnalyzerError::Taxonomy(format!("Failed to parse taxonomy: {}", e)))?;
        taxonomy.validate()?;
        Ok(taxonomy)
    }

    fn validate(&self) -> Result<()> {
        if self.categories.is_empty() {
            return Err(ResumeAnalyzerError::Taxonomy(
                "Taxonomy contains no categories".to_string(),
            ));
        }

        let mut seen = std::collections::HashSet::new();
        for category in &self.categories {
            if category.name.trim().is_empty() {
                return Err(ResumeAnalyzerError::Taxonomy(
                    "Category with empty name".to_string(),
                ));
            }
            for role in &category.roles {
                if role.name.trim().is_empty() {
                    return Err(ResumeAnalyzerError::Taxonomy(format!(
                        "Role with empty name under '{}'",
                        category.name
                    )));
                }
                if role.profile.required_skills.is_empty() {
                    return Err(ResumeAnalyzerError::Taxonomy(format!(
                        "Role '{}' has no required skills",
                        role.name
                    )));
                }
                if !seen.insert((category.name.clone(), role.name.clone())) {
                    return Err(ResumeAnalyzerError::Taxonomy(format!(
                        "Duplicate role '{}' under '{}'",
                        role.name, category.name
                    )));
                }
            }
        }

        Ok(())
    }

    /// Look up one role profile by (category, role) pair.
    pub fn lookup(&self, category: &str, role: &str) -> Result<&RoleProfile> {
        self.categories
            .iter()
            .find(|c| c.name == category)
            .and_then(|c| c.roles.iter().find(|r| r.name == role))
            .map(|r| &r.profile)
            .ok_or_else(|| ResumeAnalyzerError::UnknownRole {
                category: category.to_string(),
                role: role.to_string(),
            })
    }

    pub fn category_names(&self) -> Vec<&str> {
        self.categories.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn roles_in(&self, category: &str) -> Vec<&str> {
        self.categories
            .iter()
            .find(|c| c.name == category)
            .map(|c| c.roles.iter().map(|r| r.name.as_str()).collect())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_taxonomy_parses() {
        let taxonomy = Taxonomy::builtin().unwrap();
        assert!(!taxonomy.categories.is_empty());
    }

    #[test]
    fn test_lookup_known_role() {
        let taxonomy = Taxonomy::builtin().unwrap();
        let profile = taxonomy
            .lookup("Data Science and Analytics", "Data Analyst")
            .unwrap();
        assert!(profile.required_skills.iter().any(|s| s == "SQL"));
        assert!(!profile.sections.is_empty());
    }

    #[test]
    fn test_lookup_unknown_role_fails() {
        let taxonomy = Taxonomy::builtin().unwrap();
        let result = taxonomy.lookup("Data Science and Analytics", "Astronaut");
        assert!(matches!(
            result,
            Err(ResumeAnalyzerError::UnknownRole { .. })
        ));
    }

    #[test]
    fn test_required_skill_order_is_preserved() {
        let taxonomy = Taxonomy::builtin().unwrap();
        let profile = taxonomy
            .lookup("Data Science and Analytics", "Data Analyst")
            .unwrap();
        // The TOML authors SQL before Excel; reports must keep that order.
        let sql = profile.required_skills.iter().position(|s| s == "SQL");
        let excel = profile.required_skills.iter().position(|s| s == "Excel");
        assert!(sql.unwrap() < excel.unwrap());
    }

    #[test]
    fn test_duplicate_roles_rejected() {
        let toml = r#"
            [[categories]]
            name = "Engineering"

            [[categories.roles]]
            name = "Backend Developer"
            description = "Server-side work"
            required_skills = ["Rust"]
            sections = ["Skills"]
            [categories.roles.recommended]

            [[categories.roles]]
            name = "Backend Developer"
            description = "Duplicate"
            required_skills = ["Go"]
            sections = ["Skills"]
            [categories.roles.recommended]
        "#;
        assert!(Taxonomy::from_str(toml).is_err());
    }

    #[test]
    fn test_role_without_skills_rejected() {
        let toml = r#"
            [[categories]]
            name = "Engineering"

            [[categories.roles]]
            name = "Backend Developer"
            description = "Server-side work"
            required_skills = []
            sections = ["Skills"]
            [categories.roles.recommended]
        "#;
        assert!(Taxonomy::from_str(toml).is_err());
    }
}
