use crate::core::CoaepRecord;
use crate::report::Report;
use colored::*;
use comfy_table::Table;
use std::io::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Markdown,
    Terminal,
}

pub trait OutputWriter {
    fn write_report(&mut self, report: &Report<CoaepRecord>) -> anyhow::Result<()>;
}

pub fn create_writer<'a, W: Write + 'a>(format: OutputFormat, writer: W) -> Box<dyn OutputWriter + 'a> {
    match format {
        OutputFormat::Json => Box::new(JsonWriter::new(writer)),
        OutputFormat::Markdown => Box::new(MarkdownWriter::new(writer)),
        OutputFormat::Terminal => Box::new(TerminalWriter::new(writer)),
    }
}

pub struct JsonWriter<W: Write> {
    writer: W,
}

impl<W: Write> JsonWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputWriter for JsonWriter<W> {
    fn write_report(&mut self, report: &Report<CoaepRecord>) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(report)?;
        self.writer.write_all(json.as_bytes())?;
        writeln!(self.writer)?;
        Ok(())
    }
}

pub struct MarkdownWriter<W: Write> {
    writer: W,
}

impl<W: Write> MarkdownWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputWriter for MarkdownWriter<W> {
    fn write_report(&mut self, report: &Report<CoaepRecord>) -> anyhow::Result<()> {
        self.write_header(report)?;
        self.write_plan(report)?;
        self.write_issues(report)?;
        self.write_successes(report)?;
        Ok(())
    }
}

impl<W: Write> MarkdownWriter<W> {
    fn write_header(&mut self, report: &Report<CoaepRecord>) -> anyhow::Result<()> {
        writeln!(self.writer, "# COAEP Validation Report")?;
        writeln!(self.writer)?;
        writeln!(
            self.writer,
            "Generated: {}",
            chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
        )?;
        writeln!(self.writer)?;
        let status = if report.success { "PASSED" } else { "FAILED" };
        writeln!(self.writer, "**{status}**: {}", report.message)?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_plan(&mut self, report: &Report<CoaepRecord>) -> anyhow::Result<()> {
        let Some(record) = report.record() else {
            return Ok(());
        };

        writeln!(self.writer, "## Plan")?;
        writeln!(self.writer)?;
        writeln!(self.writer, "| Field | Value |")?;
        writeln!(self.writer, "|-------|-------|")?;
        let meta = &record.metadata;
        self.write_row("Faculty", meta.faculty.as_deref().unwrap_or("-"))?;
        self.write_row("Course", meta.course.as_deref().unwrap_or("-"))?;
        self.write_row("School Year", meta.school_year.as_deref().unwrap_or("-"))?;
        self.write_row(
            "Semester",
            &meta.semester.map(|s| s.to_string()).unwrap_or_else(|| "-".into()),
        )?;
        self.write_row("Course Outcomes", &record.course_outcomes.len().to_string())?;
        self.write_row("ILOs", &record.ilo_count().to_string())?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_row(&mut self, field: &str, value: &str) -> anyhow::Result<()> {
        writeln!(self.writer, "| {field} | {value} |")?;
        Ok(())
    }

    fn write_issues(&mut self, report: &Report<CoaepRecord>) -> anyhow::Result<()> {
        let summary = report.summary();
        if summary.is_empty() {
            return Ok(());
        }

        writeln!(self.writer, "## Issues ({})", summary.total)?;
        writeln!(self.writer)?;
        writeln!(self.writer, "| From | Row | Column | Issue |")?;
        writeln!(self.writer, "|------|-----|--------|-------|")?;
        for issue in report.issues() {
            writeln!(
                self.writer,
                "| {} | {} | {} | {} |",
                issue.from,
                coordinate(issue.row),
                coordinate(issue.column),
                issue.error.replace('|', "\\|")
            )?;
        }
        writeln!(self.writer)?;
        for (source, count) in &summary.by_source {
            writeln!(self.writer, "- `{source}`: {count}")?;
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_successes(&mut self, report: &Report<CoaepRecord>) -> anyhow::Result<()> {
        if report.data.success_messages.is_empty() {
            return Ok(());
        }
        writeln!(self.writer, "## Passed Checks")?;
        writeln!(self.writer)?;
        for message in &report.data.success_messages {
            writeln!(self.writer, "- {message}")?;
        }
        Ok(())
    }
}

pub struct TerminalWriter<W: Write> {
    writer: W,
}

impl<W: Write> TerminalWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputWriter for TerminalWriter<W> {
    fn write_report(&mut self, report: &Report<CoaepRecord>) -> anyhow::Result<()> {
        writeln!(self.writer, "{}", "COAEP Validation Report".bold().blue())?;
        writeln!(self.writer, "{}", "=======================".blue())?;
        writeln!(self.writer)?;

        if let Some(record) = report.record() {
            writeln!(
                self.writer,
                "  Course: {}  Faculty: {}",
                record.metadata.course.as_deref().unwrap_or("-"),
                record.metadata.faculty.as_deref().unwrap_or("-")
            )?;
            writeln!(
                self.writer,
                "  Course outcomes: {}  ILOs: {}",
                record.course_outcomes.len(),
                record.ilo_count()
            )?;
            writeln!(self.writer)?;
        }

        for message in &report.data.success_messages {
            writeln!(self.writer, "  {} {}", "✓".green(), message)?;
        }

        let summary = report.summary();
        if !summary.is_empty() {
            let mut table = Table::new();
            table.set_header(vec!["From", "Row", "Column", "Issue"]);
            for issue in report.issues() {
                table.add_row(vec![
                    issue.from.clone(),
                    coordinate(issue.row),
                    coordinate(issue.column),
                    issue.error.clone(),
                ]);
            }
            writeln!(self.writer)?;
            writeln!(self.writer, "{table}")?;
            write!(self.writer, "{}", summary.render())?;
        }

        writeln!(self.writer)?;
        if report.success {
            writeln!(self.writer, "{} {}", "PASSED".green().bold(), report.message)?;
        } else {
            writeln!(self.writer, "{} {}", "FAILED".red().bold(), report.message)?;
        }
        Ok(())
    }
}

fn coordinate(value: Option<usize>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "-".into())
}
