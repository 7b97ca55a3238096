//! Output formatters: console, JSON, and Markdown renderings of an
//! analysis report

use crate::analysis::engine::AnalysisReport;
use crate::config::OutputFormat;
use crate::error::Result;
use colored::{Color, Colorize};

/// Trait for formatting analysis reports
pub trait OutputFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String>;
    fn supports_format(&self) -> OutputFormat;
}

/// Console formatter with colors and score badges
pub struct ConsoleFormatter {
    use_colors: bool,
    detailed: bool,
}

/// JSON formatter for API integration and structured data
pub struct JsonFormatter {
    pretty: bool,
}

/// Markdown formatter for documentation and sharable reports
pub struct MarkdownFormatter;

/// Report generator that coordinates different formatters
pub struct ReportGenerator {
    console_formatter: ConsoleFormatter,
    json_formatter: JsonFormatter,
    markdown_formatter: MarkdownFormatter,
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool, detailed: bool) -> Self {
        Self {
            use_colors,
            detailed,
        }
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn format_header(&self, title: &str, level: u8) -> String {
        let prefix = match level {
            1 => "█",
            2 => "▓",
            _ => "▒",
        };

        let color = match level {
            1 => Color::Blue,
            2 => Color::Green,
            _ => Color::Yellow,
        };

        if self.use_colors {
            format!("\n{} {}\n", prefix.color(color).bold(), title.color(color).bold())
        } else {
            format!("\n{} {}\n", prefix, title)
        }
    }

    fn format_score_badge(&self, score: u8) -> String {
        let (badge, color) = match score {
            80..=100 => ("EXCELLENT", Color::Green),
            60..=79 => ("GOOD", Color::Yellow),
            40..=59 => ("NEEDS WORK", Color::BrightYellow),
            _ => ("POOR", Color::Red),
        };

        if self.use_colors {
            format!("[{}]", badge.color(color).bold())
        } else {
            format!("[{}]", badge)
        }
    }

    fn push_category(&self, output: &mut String, title: &str, suggestions: &[String]) {
        if suggestions.is_empty() {
            return;
        }
        output.push_str(&self.format_header(title, 3));
        for suggestion in suggestions {
            output.push_str(&format!("  • {}\n", suggestion));
        }
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String> {
        let mut output = String::new();

        output.push_str(&self.format_header("📊 RESUME ANALYSIS", 1));
        output.push_str(&format!(
            "Generated: {} | Words: {}\n",
            report.metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
            report.metadata.word_count
        ));

        if let Some(notice) = &report.classification_notice {
            output.push_str(&format!(
                "\n{} {}\n",
                self.colorize("⚠️  Warning:", Color::Red),
                self.colorize(notice, Color::Red)
            ));
        }

        output.push_str(&self.format_header("Scores", 2));
        output.push_str(&format!(
            "🎯 ATS Score: {}% {}\n",
            report.ats_score,
            self.format_score_badge(report.ats_score)
        ));
        output.push_str(&format!("🔍 Keyword Match: {}%\n", report.keyword_match.score));
        output.push_str(&format!("📑 Section Score: {}%\n", report.section_score));
        output.push_str(&format!("📐 Format Score: {}%\n", report.format_score));

        if !report.keyword_match.missing_skills.is_empty() {
            output.push_str(&self.format_header("⚠️  Missing Skills", 2));
            for skill in &report.keyword_match.missing_skills {
                output.push_str(&format!("  • {}\n", self.colorize(skill, Color::Yellow)));
            }
        }

        if !report.suggestions.is_empty() {
            output.push_str(&self.format_header("💡 Suggestions", 2));
            self.push_category(&mut output, "📞 Contact", &report.contact_suggestions);
            self.push_category(&mut output, "📝 Summary", &report.summary_suggestions);
            self.push_category(&mut output, "🎯 Skills", &report.skills_suggestions);
            self.push_category(&mut output, "💼 Experience", &report.experience_suggestions);
            self.push_category(&mut output, "🎓 Education", &report.education_suggestions);
            self.push_category(&mut output, "📄 Formatting", &report.format_suggestions);
        }

        if !report.recommended_additions.is_empty() {
            output.push_str(&self.format_header("📚 Recommended Additions", 2));
            for skill in &report.recommended_additions {
                output.push_str(&format!("  • {}\n", skill));
            }
        }

        if self.detailed {
            output.push_str(&self.format_header("🔎 Extracted Entities", 2));
            if let Some(name) = &report.entities.contact.name {
                output.push_str(&format!("  Name: {}\n", name));
            }
            if let Some(email) = &report.entities.contact.email {
                output.push_str(&format!("  Email: {}\n", email));
            }
            output.push_str(&format!(
                "  Experience entries: {}\n",
                report.entities.experience.len()
            ));
            output.push_str(&format!(
                "  Education entries: {}\n",
                report.entities.education.len()
            ));
            output.push_str(&format!("  Projects: {}\n", report.entities.projects.len()));
            if !report.entities.skills.is_empty() {
                output.push_str(&format!(
                    "  Skills: {}\n",
                    report.entities.skills.join(", ")
                ));
            }
        }

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Console
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String> {
        let json = if self.pretty {
            serde_json::to_string_pretty(report)?
        } else {
            serde_json::to_string(report)?
        };
        Ok(json)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Json
    }
}

impl MarkdownFormatter {
    pub fn new() -> Self {
        Self
    }

    fn push_category(output: &mut String, title: &str, suggestions: &[String]) {
        if suggestions.is_empty() {
            return;
        }
        output.push_str(&format!("### {}\n\n", title));
        for suggestion in suggestions {
            output.push_str(&format!("- {}\n", suggestion));
        }
        output.push('\n');
    }
}

impl Default for MarkdownFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputFormatter for MarkdownFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String> {
        let mut output = String::new();

        output.push_str("# Resume Analysis Report\n\n");
        output.push_str(&format!(
            "Generated: {} | Document type: {}\n\n",
            report.metadata.generated_at.format("%Y-%m-%d %H:%M UTC"),
            report.document_type
        ));

        if let Some(notice) = &report.classification_notice {
            output.push_str(&format!("> **Warning:** {}\n\n", notice));
        }

        output.push_str("## Scores\n\n");
        output.push_str("| Score | Value |\n|-------|-------|\n");
        output.push_str(&format!("| ATS | {}% |\n", report.ats_score));
        output.push_str(&format!("| Keyword match | {}% |\n", report.keyword_match.score));
        output.push_str(&format!("| Sections | {}% |\n", report.section_score));
        output.push_str(&format!("| Format | {}% |\n\n", report.format_score));

        if !report.keyword_match.missing_skills.is_empty() {
            output.push_str("## Missing Skills\n\n");
            for skill in &report.keyword_match.missing_skills {
                output.push_str(&format!("- {}\n", skill));
            }
            output.push('\n');
        }

        if !report.suggestions.is_empty() {
            output.push_str("## Suggestions\n\n");
            Self::push_category(&mut output, "Contact", &report.contact_suggestions);
            Self::push_category(&mut output, "Summary", &report.summary_suggestions);
            Self::push_category(&mut output, "Skills", &report.skills_suggestions);
            Self::push_category(&mut output, "Experience", &report.experience_suggestions);
            Self::push_category(&mut output, "Education", &report.education_suggestions);
            Self::push_category(&mut output, "Formatting", &report.format_suggestions);
        }

        if !report.recommended_additions.is_empty() {
            output.push_str("## Recommended Additions\n\n");
            for skill in &report.recommended_additions {
                output.push_str(&format!("- {}\n", skill));
            }
            output.push('\n');
        }

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Markdown
    }
}

impl ReportGenerator {
    pub fn new(use_colors: bool, detailed: bool) -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(use_colors, detailed),
            json_formatter: JsonFormatter::new(true),
            markdown_formatter: MarkdownFormatter::new(),
        }
    }

    pub fn format(&self, report: &AnalysisReport, format: &OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Console => self.console_formatter.format_report(report),
            OutputFormat::Json => self.json_formatter.format_report(report),
            OutputFormat::Markdown => self.markdown_formatter.format_report(report),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::engine::AnalysisEngine;
    use crate::config::Config;
    use crate::taxonomy::{RecommendedSkills, RoleProfile};

    fn sample_report() -> AnalysisReport {
        let profile = RoleProfile {
            description: String::new(),
            required_skills: vec!["Python".to_string(), "Excel".to_string()],
            sections: vec!["Technical Skills".to_string()],
            recommended: RecommendedSkills::default(),
        };
        let text = "Jane Smith\njane@acme.com\nSkills\nPython, SQL";
        AnalysisEngine::new(&Config::default()).analyze_text(text, &profile)
    }

    #[test]
    fn test_console_output_mentions_scores() {
        let formatter = ConsoleFormatter::new(false, false);
        let output = formatter.format_report(&sample_report()).unwrap();

        assert!(output.contains("ATS Score"));
        assert!(output.contains("Keyword Match"));
        assert!(output.contains("Excel"));
    }

    #[test]
    fn test_json_output_round_trips() {
        let formatter = JsonFormatter::new(false);
        let output = formatter.format_report(&sample_report()).unwrap();

        let parsed: AnalysisReport = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed.ats_score, sample_report().ats_score);
    }

    #[test]
    fn test_markdown_output_has_score_table() {
        let formatter = MarkdownFormatter::new();
        let output = formatter.format_report(&sample_report()).unwrap();

        assert!(output.starts_with("# Resume Analysis Report"));
        assert!(output.contains("| ATS |"));
        assert!(output.contains("- Excel"));
    }

    #[test]
    fn test_generator_dispatches_by_format() {
        let generator = ReportGenerator::new(false, false);
        let report = sample_report();

        let console = generator.format(&report, &OutputFormat::Console).unwrap();
        let json = generator.format(&report, &OutputFormat::Json).unwrap();
        let markdown = generator.format(&report, &OutputFormat::Markdown).unwrap();

        assert!(console.contains("RESUME ANALYSIS"));
        assert!(json.trim_start().starts_with('{'));
        assert!(markdown.starts_with("# "));
    }
}
