//! Pattern rule set for section and entity detection
//!
//! All recognition rules live here as a prioritized, ordered list of
//! matchers rather than scattered conditionals, so each rule can be
//! tested on its own and precedence can change without touching the
//! parsing control flow.

use regex::Regex;

/// What a matcher recognizes. Lower precedence number wins when
/// classifying a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatcherKind {
    Header,
    Email,
    Phone,
    Url,
    DateRange,
    Metric,
    Bullet,
    AchievementVerb,
}

/// Resume sections the header vocabulary distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionKind {
    Summary,
    Experience,
    Education,
    Projects,
    Skills,
    Certifications,
    Contact,
}

struct Matcher {
    kind: MatcherKind,
    pattern: Regex,
    precedence: u8,
}

pub struct MatcherSet {
    matchers: Vec<Matcher>,
}

const HEADER_VOCABULARY: &[(&str, SectionKind)] = &[
    ("summary", SectionKind::Summary),
    ("professional summary", SectionKind::Summary),
    ("career summary", SectionKind::Summary),
    ("objective", SectionKind::Summary),
    ("career objective", SectionKind::Summary),
    ("profile", SectionKind::Summary),
    ("about", SectionKind::Summary),
    ("about me", SectionKind::Summary),
    ("overview", SectionKind::Summary),
    ("experience", SectionKind::Experience),
    ("work experience", SectionKind::Experience),
    ("professional experience", SectionKind::Experience),
    ("employment", SectionKind::Experience),
    ("employment history", SectionKind::Experience),
    ("work history", SectionKind::Experience),
    ("career history", SectionKind::Experience),
    ("internships", SectionKind::Experience),
    ("education", SectionKind::Education),
    ("academic background", SectionKind::Education),
    ("academics", SectionKind::Education),
    ("qualifications", SectionKind::Education),
    ("projects", SectionKind::Projects),
    ("personal projects", SectionKind::Projects),
    ("notable projects", SectionKind::Projects),
    ("academic projects", SectionKind::Projects),
    ("portfolio", SectionKind::Projects),
    ("skills", SectionKind::Skills),
    ("technical skills", SectionKind::Skills),
    ("key skills", SectionKind::Skills),
    ("core competencies", SectionKind::Skills),
    ("expertise", SectionKind::Skills),
    ("certifications", SectionKind::Certifications),
    ("certificates", SectionKind::Certifications),
    ("licenses", SectionKind::Certifications),
    ("contact", SectionKind::Contact),
    ("contact information", SectionKind::Contact),
    ("contact info", SectionKind::Contact),
];

impl Default for MatcherSet {
    fn default() -> Self {
        Self::new()
    }
}

impl MatcherSet {
    pub fn new() -> Self {
        let definitions: Vec<(MatcherKind, &str, u8)> = vec![
            (
                MatcherKind::Email,
                r"[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}",
                10,
            ),
            (
                MatcherKind::Url,
                r"(?:https?://|www\.)\S+|\b[a-zA-Z0-9-]+(?:\.[a-zA-Z0-9-]+)+/[A-Za-z0-9_~./-]+",
                20,
            ),
            (
                MatcherKind::Phone,
                r"(?:\+\d{1,3}[-. ]?)?\(?\d{3}\)?[-. ]?\d{3}[-. ]?\d{4}\b",
                30,
            ),
            (
                MatcherKind::DateRange,
                r"(?i)\b(?:jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec)[a-z]*\.?,?\s*(?:19|20)\d{2}|\b(?:19|20)\d{2}\s*(?:[-\u{2013}\u{2014}]|to)\s*(?:(?:19|20)\d{2}|present|current|now)|\b(?:19|20)\d{2}\b",
                40,
            ),
            (
                MatcherKind::Metric,
                r"(?i)\d+(?:\.\d+)?\s*%|\$\s?\d[\d,.]*[kmb]?|\b\d[\d,]*\+?\s*(?:users?|customers?|clients?|downloads?|requests?|transactions?|visitors?|students?|engineers?|people)\b|\b\d+(?:\.\d+)?\s*(?:x|k|m|million|billion)\b",
                50,
            ),
            (MatcherKind::Bullet, r"^(?:[-*\u{2022}\u{25AA}\u{25E6}\u{2023}\u{00B7}>]|\d+[.)])\s+", 60),
            (
                MatcherKind::AchievementVerb,
                r"(?i)^(?:achieved|improved|increased|reduced|decreased|delivered|launched|led|won|awarded|grew|saved|optimized|boosted|cut|exceeded|generated|accelerated|scaled)\b",
                70,
            ),
        ];

        let mut matchers: Vec<Matcher> = definitions
            .into_iter()
            .map(|(kind, pattern, precedence)| Matcher {
                kind,
                pattern: Regex::new(pattern).expect("invalid matcher pattern"),
                precedence,
            })
            .collect();
        matchers.sort_by_key(|m| m.precedence);

        Self { matchers }
    }

    fn find(&self, kind: MatcherKind) -> &Matcher {
        self.matchers
            .iter()
            .find(|m| m.kind == kind)
            .expect("matcher registered at construction")
    }

    /// Classify a line by the highest-precedence matcher that hits.
    /// Header classification runs first: it is a line-shape rule, not a
    /// substring rule.
    pub fn classify_line(&self, line: &str) -> Option<MatcherKind> {
        if self.header_section(line).is_some() {
            return Some(MatcherKind::Header);
        }
        self.matchers
            .iter()
            .find(|m| m.pattern.is_match(line))
            .map(|m| m.kind)
    }

    /// Recognize a section header: a short line (at most four words,
    /// ignoring a trailing colon) drawn from the header vocabulary.
    pub fn header_section(&self, line: &str) -> Option<SectionKind> {
        let stripped = line.trim().trim_end_matches(':').trim();
        if stripped.is_empty() || stripped.split_whitespace().count() > 4 {
            return None;
        }

        let lowered = stripped.to_lowercase();
        HEADER_VOCABULARY
            .iter()
            .find(|(phrase, _)| *phrase == lowered)
            .map(|(_, kind)| *kind)
    }

    /// First email in the text, if any.
    pub fn first_email<'t>(&self, text: &'t str) -> Option<&'t str> {
        self.find(MatcherKind::Email)
            .pattern
            .find(text)
            .map(|m| m.as_str())
    }

    /// First phone-shaped digit grouping in the text, if any.
    pub fn first_phone<'t>(&self, text: &'t str) -> Option<&'t str> {
        self.find(MatcherKind::Phone)
            .pattern
            .find(text)
            .map(|m| m.as_str())
    }

    /// All URL-like tokens in the text.
    pub fn urls<'t>(&self, text: &'t str) -> Vec<&'t str> {
        self.find(MatcherKind::Url)
            .pattern
            .find_iter(text)
            .map(|m| m.as_str())
            .collect()
    }

    pub fn first_date_range<'t>(&self, text: &'t str) -> Option<&'t str> {
        self.find(MatcherKind::DateRange)
            .pattern
            .find(text)
            .map(|m| m.as_str())
    }

    pub fn has_date(&self, line: &str) -> bool {
        self.find(MatcherKind::DateRange).pattern.is_match(line)
    }

    pub fn has_metric(&self, line: &str) -> bool {
        self.find(MatcherKind::Metric).pattern.is_match(line)
    }

    pub fn is_bullet(&self, line: &str) -> bool {
        self.find(MatcherKind::Bullet).pattern.is_match(line)
    }

    /// Strip the leading bullet marker from a line.
    pub fn strip_bullet<'t>(&self, line: &'t str) -> &'t str {
        let pattern = &self.find(MatcherKind::Bullet).pattern;
        match pattern.find(line) {
            Some(m) if m.start() == 0 => line[m.end()..].trim(),
            _ => line.trim(),
        }
    }

    pub fn starts_with_achievement_verb(&self, line: &str) -> bool {
        self.find(MatcherKind::AchievementVerb)
            .pattern
            .is_match(line)
    }

    /// Lines opening with an achievement verb or carrying a metric are
    /// achievements; everything else defaults to a responsibility.
    pub fn is_achievement_line(&self, line: &str) -> bool {
        self.starts_with_achievement_verb(line) || self.has_metric(line)
    }
}
