//! Section and entity detection over normalized resume text
//!
//! A pure function of the text plus the fixed matcher rule set: section
//! boundaries come from header-vocabulary lines, entries inside the
//! experience/education/project sections are split on date-bearing or
//! title-shaped lines, and contact fields are matched anywhere in the
//! document. Heuristic misfires are absorbed into best-effort output,
//! never surfaced as errors.

use crate::analysis::entities::{
    ContactInfo, EducationEntry, EntityBag, ExperienceEntry, ProjectEntry, TextSignals,
};
use crate::analysis::matchers::{MatcherSet, SectionKind};
use crate::taxonomy::RoleProfile;
use aho_corasick::AhoCorasick;
use regex::Regex;
use std::collections::HashMap;
use unicode_segmentation::UnicodeSegmentation;

/// Lines that look like a name but are document titles.
const NAME_DENYLIST: &[&str] = &["resume", "curriculum vitae", "cv"];

pub struct SectionParser {
    matchers: MatcherSet,
    gpa_re: Regex,
    degree_re: Regex,
    institution_re: Regex,
    field_re: Regex,
    technologies_re: Regex,
}

impl Default for SectionParser {
    fn default() -> Self {
        Self::new()
    }
}

impl SectionParser {
    pub fn new() -> Self {
        Self {
            matchers: MatcherSet::new(),
            gpa_re: Regex::new(r"(?i)\bgpa[:\s]*([0-9]\.?[0-9]{0,2}(?:\s*/\s*[0-9]\.?[0-9]{0,2})?)")
                .expect("invalid gpa pattern"),
            degree_re: Regex::new(
                r"(?i)\b(?:bachelor(?:'s)?|master(?:'s)?|ph\.?d|doctorate|mba|b\.?sc?|m\.?sc?|b\.?tech|m\.?tech|b\.e|diploma|associate)\b",
            )
            .expect("invalid degree pattern"),
            institution_re: Regex::new(
                r"(?i)\b(?:university|college|institute|school|academy|polytechnic)\b",
            )
            .expect("invalid institution pattern"),
            field_re: Regex::new(r"(?i)\b(?:in|of)\s+([A-Za-z][A-Za-z &/-]{2,60})")
                .expect("invalid field pattern"),
            technologies_re: Regex::new(r"(?i)^(?:technologies|tech stack|stack|built with|tools)\s*[:\-]\s*(.+)$")
                .expect("invalid technologies pattern"),
        }
    }

    /// Parse normalized text into an entity bag. The role profile only
    /// contributes its required-skill vocabulary: any required skill
    /// found verbatim anywhere in the text counts as present, even when
    /// it never appears in a skills section.
    pub fn parse(&self, text: &str, profile: &RoleProfile) -> EntityBag {
        let mut bag = EntityBag::default();
        if text.trim().is_empty() {
            return bag;
        }

        let lines: Vec<&str> = text.lines().collect();
        let boundaries = self.section_boundaries(&lines);
        let sections = self.section_contents(&lines, &boundaries);

        bag.contact = self.parse_contact(text, &lines, &boundaries);
        bag.summary = sections
            .get(&SectionKind::Summary)
            .map(|content| join_prose(content))
            .unwrap_or_default();

        if let Some(content) = sections.get(&SectionKind::Education) {
            bag.education = self.parse_education(content);
        }
        if let Some(content) = sections.get(&SectionKind::Experience) {
            bag.experience = self.parse_experience(content);
        }
        if let Some(content) = sections.get(&SectionKind::Projects) {
            bag.projects = self.parse_projects(content);
        }

        if let Some(content) = sections.get(&SectionKind::Skills) {
            for skill in self.parse_skill_tokens(content) {
                bag.add_skill(&skill);
            }
        }
        for skill in self.find_required_skills(text, profile) {
            bag.add_skill(&skill);
        }

        let signals = self.collect_signals(text, &lines, &boundaries, &bag);
        bag.signals = signals;
        bag.document_type = bag.classify();
        bag
    }

    fn section_boundaries(&self, lines: &[&str]) -> Vec<(usize, SectionKind)> {
        lines
            .iter()
            .enumerate()
            .filter_map(|(idx, line)| self.matchers.header_section(line).map(|kind| (idx, kind)))
            .collect()
    }

    /// Content of each section: the lines between its header and the
    /// next recognized header. Repeated headers of the same kind append.
    fn section_contents<'a>(
        &self,
        lines: &[&'a str],
        boundaries: &[(usize, SectionKind)],
    ) -> HashMap<SectionKind, Vec<&'a str>> {
        let mut sections: HashMap<SectionKind, Vec<&'a str>> = HashMap::new();

        for (i, (start, kind)) in boundaries.iter().enumerate() {
            let end = boundaries
                .get(i + 1)
                .map(|(next_start, _)| *next_start)
                .unwrap_or(lines.len());
            sections
                .entry(*kind)
                .or_default()
                .extend(lines[start + 1..end].iter().copied());
        }

        sections
    }

    fn parse_contact(
        &self,
        text: &str,
        lines: &[&str],
        boundaries: &[(usize, SectionKind)],
    ) -> ContactInfo {
        let mut contact = ContactInfo {
            email: self.matchers.first_email(text).map(str::to_string),
            phone: self.matchers.first_phone(text).map(str::to_string),
            ..ContactInfo::default()
        };

        // Profile links are matched anywhere in the text, not just in a
        // contact section.
        for url in self.matchers.urls(text) {
            let lowered = url.to_lowercase();
            if lowered.contains("linkedin.") {
                contact.linkedin.get_or_insert_with(|| url.to_string());
            } else if lowered.contains("github.") {
                contact.github.get_or_insert_with(|| url.to_string());
            } else {
                contact.portfolio.get_or_insert_with(|| url.to_string());
            }
        }

        // Name: first non-empty, non-header, non-contact line above the
        // first section header, if it is short and title-cased.
        let head_end = boundaries.first().map(|(idx, _)| *idx).unwrap_or(lines.len());
        contact.name = lines[..head_end]
            .iter()
            .filter(|line| !line.trim().is_empty())
            .take(5)
            .find(|line| self.looks_like_name(line))
            .map(|line| line.trim().to_string());

        contact
    }

    fn looks_like_name(&self, line: &str) -> bool {
        let trimmed = line.trim();
        if NAME_DENYLIST.contains(&trimmed.to_lowercase().as_str()) {
            return false;
        }
        if self.matchers.first_email(trimmed).is_some()
            || self.matchers.first_phone(trimmed).is_some()
            || !self.matchers.urls(trimmed).is_empty()
            || self.matchers.is_bullet(trimmed)
        {
            return false;
        }
        if trimmed.chars().any(|c| c.is_ascii_digit()) {
            return false;
        }

        let tokens: Vec<&str> = trimmed.split_whitespace().collect();
        if tokens.is_empty() || tokens.len() > 5 {
            return false;
        }
        tokens.iter().all(|token| {
            token
                .chars()
                .next()
                .map(|c| c.is_uppercase())
                .unwrap_or(false)
        })
    }

    /// Group section lines into entries. A new entry starts at a
    /// non-bullet line carrying date evidence, or at a short title-shaped
    /// line whose next line carries the date. A date line sitting
    /// directly under such a title stays with it.
    fn split_entries<'a>(&self, lines: &[&'a str]) -> Vec<Vec<&'a str>> {
        let content: Vec<&'a str> = lines
            .iter()
            .filter(|l| !l.trim().is_empty())
            .copied()
            .collect();

        let title_before_date: Vec<bool> = content
            .iter()
            .enumerate()
            .map(|(i, line)| {
                !self.matchers.is_bullet(line)
                    && !self.matchers.has_date(line)
                    && line.split_whitespace().count() <= 8
                    && content.get(i + 1).is_some_and(|next| {
                        !self.matchers.is_bullet(next) && self.matchers.has_date(next)
                    })
            })
            .collect();

        let mut entries: Vec<Vec<&'a str>> = Vec::new();
        for (i, line) in content.iter().enumerate() {
            let is_bullet = self.matchers.is_bullet(line);
            let dated_header = !is_bullet && self.matchers.has_date(line);

            let start_new = entries.is_empty()
                || title_before_date[i]
                || (dated_header && !(i > 0 && title_before_date[i - 1]));

            if start_new {
                entries.push(Vec::new());
            }
            entries.last_mut().expect("entry pushed above").push(*line);
        }

        entries
    }

    fn parse_experience(&self, lines: &[&str]) -> Vec<ExperienceEntry> {
        self.split_entries(lines)
            .iter()
            .map(|entry_lines| self.build_experience_entry(entry_lines))
            .collect()
    }

    fn build_experience_entry(&self, entry_lines: &[&str]) -> ExperienceEntry {
        let mut entry = ExperienceEntry::default();
        let mut prose: Vec<&str> = Vec::new();

        for line in entry_lines {
            if self.matchers.is_bullet(line) {
                let content = self.matchers.strip_bullet(line).to_string();
                if self.matchers.is_achievement_line(&content) {
                    entry.achievements.push(content);
                } else {
                    entry.responsibilities.push(content);
                }
            } else {
                if entry.date_range.is_empty() {
                    if let Some(range) = self.matchers.first_date_range(line) {
                        entry.date_range = range.trim().to_string();
                    }
                }
                prose.push(line);
            }
        }

        if let Some(header) = prose.first() {
            let stripped = self.strip_dates(header);
            let (title, company) = split_title_company(&stripped);
            entry.title = title;
            entry.company = company;
        }

        // A short second line without its own role shape is usually the
        // employer; anything beyond that is free-text description.
        let mut description_lines: Vec<String> = Vec::new();
        for line in prose.iter().skip(1) {
            let stripped = self.strip_dates(line);
            if entry.company.is_empty()
                && description_lines.is_empty()
                && !stripped.is_empty()
                && stripped.split_whitespace().count() <= 6
            {
                entry.company = stripped;
            } else if !stripped.is_empty() {
                description_lines.push(stripped);
            }
        }
        entry.description = description_lines.join(" ");

        entry
    }

    fn parse_education(&self, lines: &[&str]) -> Vec<EducationEntry> {
        self.split_entries(lines)
            .iter()
            .map(|entry_lines| self.build_education_entry(entry_lines))
            .collect()
    }

    fn build_education_entry(&self, entry_lines: &[&str]) -> EducationEntry {
        let mut entry = EducationEntry::default();
        let mut prose: Vec<&str> = Vec::new();

        for line in entry_lines {
            if self.matchers.is_bullet(line) {
                entry
                    .achievements
                    .push(self.matchers.strip_bullet(line).to_string());
            } else {
                if entry.date_range.is_empty() {
                    if let Some(range) = self.matchers.first_date_range(line) {
                        entry.date_range = range.trim().to_string();
                    }
                }
                if entry.gpa.is_none() {
                    if let Some(cap) = self.gpa_re.captures(line) {
                        entry.gpa = Some(cap[1].trim().to_string());
                    }
                }
                prose.push(line);
            }
        }

        for line in &prose {
            let cleaned = self.strip_dates(&self.gpa_re.replace(line, "").to_string());
            if cleaned.is_empty() {
                continue;
            }

            if entry.degree.is_empty() && self.degree_re.is_match(&cleaned) {
                // "B.Sc in Statistics, State University" carries both the
                // degree and the school.
                let (degree_part, institution_part) = match cleaned.split_once(", ") {
                    Some((degree, rest)) => (degree.to_string(), Some(rest.to_string())),
                    None => (cleaned.clone(), None),
                };

                if let Some(cap) = self.field_re.captures(&degree_part) {
                    entry.field = cap[1].trim().trim_end_matches(['-', ',']).trim().to_string();
                    entry.degree = degree_part[..cap.get(0).expect("whole match").start()]
                        .trim()
                        .trim_end_matches([',', '-'])
                        .trim()
                        .to_string();
                } else {
                    entry.degree = degree_part.trim_end_matches([',', '-']).trim().to_string();
                }

                if entry.institution.is_empty() {
                    if let Some(rest) = institution_part {
                        entry.institution = rest.trim().trim_end_matches([',', '-']).trim().to_string();
                    }
                }
            } else if entry.institution.is_empty() && self.institution_re.is_match(&cleaned) {
                entry.institution = cleaned.trim_end_matches([',', '-']).trim().to_string();
            }
        }

        if entry.institution.is_empty() {
            entry.institution = prose
                .iter()
                .map(|line| self.strip_dates(&self.gpa_re.replace(line, "").to_string()))
                .find(|cleaned| !cleaned.is_empty() && !self.degree_re.is_match(cleaned))
                .unwrap_or_default();
        }

        entry
    }

    fn parse_projects(&self, lines: &[&str]) -> Vec<ProjectEntry> {
        // Project listings are often undated, so fall back to treating
        // every non-bullet line after a bullet run as a new entry head.
        let entries = self.split_entries(lines);
        let entries = if entries.len() <= 1 && lines.len() > 2 {
            self.split_on_title_lines(lines)
        } else {
            entries
        };

        entries
            .iter()
            .map(|entry_lines| self.build_project_entry(entry_lines))
            .collect()
    }

    fn split_on_title_lines<'a>(&self, lines: &[&'a str]) -> Vec<Vec<&'a str>> {
        let mut entries: Vec<Vec<&'a str>> = Vec::new();
        let mut previous_was_bullet = true;

        for line in lines.iter().filter(|l| !l.trim().is_empty()) {
            let is_bullet = self.matchers.is_bullet(line);
            if !is_bullet && previous_was_bullet {
                entries.push(Vec::new());
            }
            if entries.is_empty() {
                entries.push(Vec::new());
            }
            entries.last_mut().expect("entry pushed above").push(line);
            previous_was_bullet = is_bullet;
        }

        entries
    }

    fn build_project_entry(&self, entry_lines: &[&str]) -> ProjectEntry {
        let mut entry = ProjectEntry::default();
        let mut prose: Vec<String> = Vec::new();

        for line in entry_lines {
            if self.matchers.is_bullet(line) {
                let content = self.matchers.strip_bullet(line).to_string();
                if self.matchers.is_achievement_line(&content) {
                    entry.achievements.push(content);
                } else {
                    entry.responsibilities.push(content);
                }
                continue;
            }

            if entry.link.is_none() {
                if let Some(url) = self.matchers.urls(line).first() {
                    entry.link = Some(url.to_string());
                }
            }
            if let Some(cap) = self.technologies_re.captures(line) {
                entry.technologies = cap[1].trim().to_string();
                continue;
            }
            prose.push(self.strip_dates(line));
        }

        if let Some(first) = prose.first() {
            let mut name = first.clone();
            // A parenthetical on the title line usually lists the stack.
            if let Some(open) = name.find('(') {
                if let Some(close) = name.rfind(')') {
                    if close > open && entry.technologies.is_empty() {
                        entry.technologies = name[open + 1..close].trim().to_string();
                    }
                    name = format!("{} {}", &name[..open], &name[close + 1..]);
                }
            }
            entry.name = name
                .trim()
                .trim_end_matches([':', '-', ','])
                .trim()
                .to_string();
        }
        entry.description = prose.iter().skip(1).cloned().collect::<Vec<_>>().join(" ");

        entry
    }

    fn parse_skill_tokens(&self, lines: &[&str]) -> Vec<String> {
        let mut skills = Vec::new();

        for line in lines.iter().filter(|l| !l.trim().is_empty()) {
            let mut content = self.matchers.strip_bullet(line).to_string();

            // Drop a short category label ("Technical: SQL, Python").
            if let Some(colon) = content.find(':') {
                if content[..colon].split_whitespace().count() <= 3 {
                    content = content[colon + 1..].to_string();
                }
            }

            for token in content.split([',', ';', '|', '\u{2022}']) {
                let token = token.trim().trim_end_matches('.');
                if (2..=40).contains(&token.len()) {
                    skills.push(token.to_string());
                }
            }
        }

        skills
    }

    /// Find role-required skills anywhere in the text, verbatim,
    /// case-insensitive, on word boundaries. A skill mentioned only in a
    /// project description still counts as present.
    fn find_required_skills(&self, text: &str, profile: &RoleProfile) -> Vec<String> {
        if profile.required_skills.is_empty() {
            return Vec::new();
        }

        let matcher = match AhoCorasick::builder()
            .ascii_case_insensitive(true)
            .match_kind(aho_corasick::MatchKind::LeftmostLongest)
            .build(&profile.required_skills)
        {
            Ok(matcher) => matcher,
            Err(_) => return Vec::new(),
        };

        let bytes = text.as_bytes();
        let mut found = Vec::new();
        for mat in matcher.find_iter(text) {
            let before_ok = mat.start() == 0
                || !bytes[mat.start() - 1].is_ascii_alphanumeric();
            let after_ok =
                mat.end() == bytes.len() || !bytes[mat.end()].is_ascii_alphanumeric();
            if before_ok && after_ok {
                found.push(profile.required_skills[mat.pattern().as_usize()].clone());
            }
        }

        found
    }

    fn collect_signals(
        &self,
        text: &str,
        lines: &[&str],
        boundaries: &[(usize, SectionKind)],
        bag: &EntityBag,
    ) -> TextSignals {
        let bulleted_entry_ratio = if bag.experience.is_empty() {
            0.0
        } else {
            let with_bullets = bag
                .experience
                .iter()
                .filter(|e| e.has_bullet_content())
                .count();
            with_bullets as f32 / bag.experience.len() as f32
        };

        TextSignals {
            word_count: text.unicode_words().count(),
            bulleted_entry_ratio,
            has_table_artifacts: lines
                .iter()
                .any(|line| line.matches('|').count() >= 2),
            header_lines: boundaries
                .iter()
                .map(|(idx, _)| lines[*idx].trim().trim_end_matches(':').to_lowercase())
                .collect(),
        }
    }

    fn strip_dates(&self, line: &str) -> String {
        let mut cleaned = line.to_string();
        while let Some(range) = self.matchers.first_date_range(&cleaned) {
            let range = range.to_string();
            cleaned = cleaned.replacen(&range, "", 1);
        }
        cleaned
            .trim()
            .trim_matches(['-', '\u{2013}', '\u{2014}', ',', '(', ')'])
            .trim()
            .to_string()
    }
}

/// Join section lines into a single prose string.
fn join_prose(lines: &[&str]) -> String {
    lines
        .iter()
        .map(|l| l.trim())
        .filter(|l| !l.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Split an entry header into (title, company) using the common resume
/// separators. A header with no separator is all title.
fn split_title_company(header: &str) -> (String, String) {
    for separator in [" at ", " @ "] {
        if let Some(pos) = header.find(separator) {
            return (
                header[..pos].trim().to_string(),
                header[pos + separator.len()..].trim().to_string(),
            );
        }
    }
    for separator in [" | ", " - ", " \u{2013} ", " \u{2014} ", ", "] {
        if let Some(pos) = header.find(separator) {
            return (
                header[..pos].trim().to_string(),
                header[pos + separator.len()..].trim().to_string(),
            );
        }
    }
    (header.trim().to_string(), String::new())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::taxonomy::{RecommendedSkills, RoleProfile};

    fn analyst_profile() -> RoleProfile {
        RoleProfile {
            description: "Interpret data and build dashboards".to_string(),
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

    const SAMPLE: &str = "\
Jane Smith
jane.smith@acme.com | (555) 123-4567
linkedin.com/in/janesmith

Summary
Data analyst with five years of experience turning warehouse data into decisions.

Work Experience
Data Analyst at Acme Corp
2019 - 2021
- Built SQL dashboards for the finance team
- Reduced reporting latency by 40%

Senior Data Analyst, Initech
2021 - Present
- Led a team of 3 analysts
- maintained the nightly ETL jobs

Education
B.Sc in Statistics, State University
2015 - 2019
GPA: 3.8

Technical Skills
SQL, Python, Tableau
Data Cleaning";

    #[test]
    fn test_contact_extraction() {
        let parser = SectionParser::new();
        let bag = parser.parse(SAMPLE, &analyst_profile());

        assert_eq!(bag.contact.name.as_deref(), Some("Jane Smith"));
        assert_eq!(bag.contact.email.as_deref(), Some("jane.smith@acme.com"));
        assert!(bag.contact.phone.is_some());
        assert!(bag
            .contact
            .linkedin
            .as_deref()
            .is_some_and(|u| u.contains("linkedin.com")));
        assert!(bag.contact.github.is_none());
    }

    #[test]
    fn test_summary_extraction() {
        let parser = SectionParser::new();
        let bag = parser.parse(SAMPLE, &analyst_profile());
        assert!(bag.summary.starts_with("Data analyst with five years"));
    }

    #[test]
    fn test_experience_entries_in_document_order() {
        let parser = SectionParser::new();
        let bag = parser.parse(SAMPLE, &analyst_profile());

        assert_eq!(bag.experience.len(), 2);
        assert_eq!(bag.experience[0].title, "Data Analyst");
        assert_eq!(bag.experience[0].company, "Acme Corp");
        assert_eq!(bag.experience[0].date_range, "2019 - 2021");
        assert_eq!(bag.experience[1].title, "Senior Data Analyst");
        assert_eq!(bag.experience[1].company, "Initech");
    }

    #[test]
    fn test_achievement_vs_responsibility_split() {
        let parser = SectionParser::new();
        let bag = parser.parse(SAMPLE, &analyst_profile());

        let first = &bag.experience[0];
        assert_eq!(first.responsibilities.len(), 1);
        assert!(first.responsibilities[0].contains("SQL dashboards"));
        assert_eq!(first.achievements.len(), 1);
        assert!(first.achievements[0].contains("40%"));

        // "Led a team of 3 analysts" opens with an achievement verb.
        let second = &bag.experience[1];
        assert!(second.achievements.iter().any(|a| a.contains("Led a team")));
        assert!(second
            .responsibilities
            .iter()
            .any(|r| r.contains("nightly ETL")));
    }

    #[test]
    fn test_education_fields() {
        let parser = SectionParser::new();
        let bag = parser.parse(SAMPLE, &analyst_profile());

        assert_eq!(bag.education.len(), 1);
        let edu = &bag.education[0];
        assert!(edu.degree.to_lowercase().contains("b.sc"));
        assert_eq!(edu.field, "Statistics");
        assert!(edu.institution.contains("State University"));
        assert_eq!(edu.date_range, "2015 - 2019");
        assert_eq!(edu.gpa.as_deref(), Some("3.8"));
    }

    #[test]
    fn test_skills_union_includes_body_mentions() {
        let parser = SectionParser::new();
        let bag = parser.parse(SAMPLE, &analyst_profile());

        // Section tokens plus required skills found anywhere.
        assert!(bag.has_skill("SQL"));
        assert!(bag.has_skill("Python"));
        assert!(bag.has_skill("Tableau"));
        assert!(bag.has_skill("Data Cleaning"));
        // Excel never appears, so the union must not invent it.
        assert!(!bag.has_skill("Excel"));
    }

    #[test]
    fn test_required_skill_matching_is_word_bounded() {
        let parser = SectionParser::new();
        let mut profile = analyst_profile();
        profile.required_skills = vec!["R".to_string()];

        // "R" inside "React" must not count.
        let bag = parser.parse("Skills\nReact, Redux", &profile);
        assert!(!bag.has_skill("R"));

        let bag = parser.parse("Skills\nR, Python", &profile);
        assert!(bag.has_skill("R"));
    }

    #[test]
    fn test_empty_text_yields_empty_bag() {
        let parser = SectionParser::new();
        let bag = parser.parse("", &analyst_profile());

        assert_eq!(bag.contact, ContactInfo::default());
        assert!(bag.experience.is_empty());
        assert!(bag.education.is_empty());
        assert!(bag.skills.is_empty());
        assert_eq!(bag.signals.word_count, 0);
    }

    #[test]
    fn test_one_liner_classified_as_other() {
        let parser = SectionParser::new();
        let bag = parser.parse("Lorem ipsum dolor sit amet", &analyst_profile());
        assert_eq!(
            bag.document_type,
            crate::analysis::entities::DocumentType::Other
        );
    }

    #[test]
    fn test_inline_mention_scenario() {
        let parser = SectionParser::new();
        let text = "email: jane@acme.com, Python, SQL, 2019-2021 Data Analyst at Acme Corp";
        let bag = parser.parse(text, &analyst_profile());

        assert_eq!(bag.contact.email.as_deref(), Some("jane@acme.com"));
        assert!(bag.has_skill("Python"));
        assert!(bag.has_skill("SQL"));
        assert!(!bag.has_skill("Excel"));
    }

    #[test]
    fn test_table_artifact_signal() {
        let parser = SectionParser::new();
        let bag = parser.parse(
            "Jane Smith\n| Year | Company |\n| 2019 | Acme |",
            &analyst_profile(),
        );
        assert!(bag.signals.has_table_artifacts);
    }

    #[test]
    fn test_project_parsing() {
        let parser = SectionParser::new();
        let text = "\
Projects
Churn Model (Python, scikit-learn)
github.com/janesmith/churn
- Improved retention forecasting accuracy by 12%
- trained weekly on warehouse exports";
        let bag = parser.parse(text, &analyst_profile());

        assert_eq!(bag.projects.len(), 1);
        let project = &bag.projects[0];
        assert_eq!(project.name, "Churn Model");
        assert!(project.technologies.contains("scikit-learn"));
        assert!(project.link.as_deref().is_some_and(|l| l.contains("github.com")));
        assert_eq!(project.achievements.len(), 1);
        assert_eq!(project.responsibilities.len(), 1);
    }
}
