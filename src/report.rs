//! Console and HTML reporting of a finished run

use crate::config::ReportInfo;
use groupwise_core::{AnalysisOutcome, AnalysisResult, PlotOutcome, PlotRecord, Result, Verdict};
use groupwise_plot::OutputConfig;
use html_escape::{encode_double_quoted_attribute, encode_text};
use std::fmt;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Everything a run produced, in declaration order
#[derive(Debug)]
pub struct RunReport {
    pub info: ReportInfo,
    pub analyses: Vec<AnalysisResult>,
    pub plots: Vec<PlotRecord>,
    pub duration: Duration,
}

/// Counts for the closing summary line
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    pub analyses: usize,
    pub ran: usize,
    pub skipped: usize,
    pub failed: usize,
    pub plots: usize,
    pub written: usize,
    pub plots_failed: usize,
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} analyses: {} ran, {} skipped, {} failed; {} plots: {} written, {} failed",
            self.analyses,
            self.ran,
            self.skipped,
            self.failed,
            self.plots,
            self.written,
            self.plots_failed
        )
    }
}

/// One console line for an analysis
pub fn analysis_line(result: &AnalysisResult) -> String {
    match &result.outcome {
        AnalysisOutcome::Completed(done) => {
            let payload = &done.comparison.payload;
            format!(
                "{}: {} ({}) {} = {:.4}, p = {:.4} | {}",
                result.name,
                Verdict::Ran,
                payload.test_name(),
                payload.statistic_name(),
                payload.statistic(),
                payload.p_value(),
                done.message()
            )
        }
        AnalysisOutcome::Skipped(a) => format!(
            "{}: {} ({} score {:.3} < threshold {:.3})",
            result.name,
            Verdict::SkippedNotRelevant,
            a.policy,
            a.score,
            a.threshold
        ),
        AnalysisOutcome::Failed(e) => format!("{}: {} ({})", result.name, Verdict::Failed, e),
    }
}

/// One console line for a plot
pub fn plot_line(record: &PlotRecord) -> String {
    match &record.outcome {
        PlotOutcome::Written(path) => format!("{}: written to {}", record.name, path.display()),
        PlotOutcome::Failed(e) => format!("{}: failed ({})", record.name, e),
    }
}

impl RunReport {
    pub fn summary(&self) -> Summary {
        let mut summary = Summary {
            analyses: self.analyses.len(),
            plots: self.plots.len(),
            ..Summary::default()
        };
        for result in &self.analyses {
            match result.verdict() {
                Verdict::Ran => summary.ran += 1,
                Verdict::SkippedNotRelevant => summary.skipped += 1,
                Verdict::Failed => summary.failed += 1,
            }
        }
        for record in &self.plots {
            match record.outcome {
                PlotOutcome::Written(_) => summary.written += 1,
                PlotOutcome::Failed(_) => summary.plots_failed += 1,
            }
        }
        summary
    }

    /// Analysis lines only; printed before plotting starts
    pub fn write_analyses<W: Write>(analyses: &[AnalysisResult], out: &mut W) -> io::Result<()> {
        for result in analyses {
            writeln!(out, "{}", analysis_line(result))?;
        }
        Ok(())
    }

    /// Plot lines and the summary
    pub fn write_plots_and_summary<W: Write>(&self, out: &mut W) -> io::Result<()> {
        for record in &self.plots {
            writeln!(out, "{}", plot_line(record))?;
        }
        writeln!(out, "{}", self.summary())
    }

    /// Standalone HTML overview linking to every written plot
    pub fn to_html(&self, output_dir: &Path) -> String {
        let mut html = String::new();
        html.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
        html.push_str(&format!("<title>{}</title>\n", encode_text(&self.info.name)));
        html.push_str("</head>\n<body>\n");
        html.push_str(&format!("<h1>{}</h1>\n", encode_text(&self.info.name)));

        html.push_str("<h2>Report Information</h2>\n<ul>\n");
        html.push_str(&format!("<li>Name: {}</li>\n", encode_text(&self.info.name)));
        if let Some(author) = &self.info.author {
            html.push_str(&format!("<li>Author: {}</li>\n", encode_text(author)));
        }
        if let Some(description) = &self.info.description {
            html.push_str(&format!("<li>Description: {}</li>\n", encode_text(description)));
        }
        html.push_str(&format!("<li>Duration: {:.3}s</li>\n", self.duration.as_secs_f64()));
        html.push_str("</ul>\n");

        if !self.analyses.is_empty() {
            html.push_str("<h2>Analysis Overview</h2>\n<table border='1'>\n");
            html.push_str(
                "<tr><th>Analysis</th><th>Verdict</th><th>Test</th><th>Statistic</th>\
                 <th>P-Value</th><th>Significant</th><th>Relevance</th><th>Message</th></tr>\n",
            );
            for result in &self.analyses {
                html.push_str(&analysis_row(result));
            }
            html.push_str("</table>\n");
        }

        html.push_str("<h2>Plots</h2>\n<ul>\n");
        for record in &self.plots {
            match &record.outcome {
                PlotOutcome::Written(path) => {
                    let href = path.strip_prefix(output_dir).unwrap_or(path.as_path());
                    html.push_str(&format!(
                        "<li><a href=\"{}\">{}</a></li>\n",
                        encode_double_quoted_attribute(&href.display().to_string()),
                        encode_text(&record.name)
                    ));
                }
                PlotOutcome::Failed(e) => html.push_str(&format!(
                    "<li>{}: failed ({})</li>\n",
                    encode_text(&record.name),
                    encode_text(&e.to_string())
                )),
            }
        }
        html.push_str("</ul>\n");
        html.push_str(&format!("<p>{}</p>\n", encode_text(&self.summary().to_string())));
        html.push_str("</body>\n</html>\n");
        html
    }

    /// Write `{prefix_}report.html` next to the plots
    pub fn save_html(&self, output: &OutputConfig) -> Result<PathBuf> {
        let path = output.directory().join(output.file_name("report"));
        fs::create_dir_all(output.directory())?;
        fs::write(&path, self.to_html(output.directory()))?;
        tracing::info!(path = %path.display(), "report written");
        Ok(path)
    }
}

fn analysis_row(result: &AnalysisResult) -> String {
    let cells: [String; 7] = match &result.outcome {
        AnalysisOutcome::Completed(done) => {
            let payload = &done.comparison.payload;
            let relevance = done
                .relevance
                .as_ref()
                .map_or_else(|| "-".to_string(), |a| format!("{:.3}", a.score));
            [
                Verdict::Ran.to_string(),
                payload.test_name().to_string(),
                format!("{} = {:.4}", payload.statistic_name(), payload.statistic()),
                format!("{:.4}", payload.p_value()),
                done.significant.to_string(),
                relevance,
                done.message().to_string(),
            ]
        }
        AnalysisOutcome::Skipped(a) => [
            Verdict::SkippedNotRelevant.to_string(),
            "-".to_string(),
            "-".to_string(),
            "-".to_string(),
            "-".to_string(),
            format!("{:.3}", a.score),
            format!("score below threshold {:.3}", a.threshold),
        ],
        AnalysisOutcome::Failed(e) => [
            Verdict::Failed.to_string(),
            "-".to_string(),
            "-".to_string(),
            "-".to_string(),
            "-".to_string(),
            "-".to_string(),
            e.to_string(),
        ],
    };
    let mut row = format!("<tr><td>{}</td>", encode_text(&result.name));
    for cell in &cells {
        row.push_str(&format!("<td>{}</td>", encode_text(cell)));
    }
    row.push_str("</tr>\n");
    row
}

#[cfg(test)]
mod tests {
    use super::*;
    use groupwise_core::{
        AnalysisPayload, Comparison, CompletedAnalysis, Error, RelevanceAssessment,
    };
    use tempfile::TempDir;

    fn report(dir: &Path) -> RunReport {
        let completed = AnalysisResult {
            name: "TTestAnalysis".to_string(),
            outcome: AnalysisOutcome::Completed(CompletedAnalysis {
                comparison: Comparison {
                    payload: AnalysisPayload::TTest {
                        t_statistic: -11.0,
                        p_value: 0.0004,
                        df: 4.0,
                        welch: true,
                    },
                    group_means: Vec::new(),
                },
                significant: true,
                relevance: None,
            }),
        };
        let skipped = AnalysisResult {
            name: "AnovaAnalysis".to_string(),
            outcome: AnalysisOutcome::Skipped(RelevanceAssessment {
                policy: "overlap",
                score: 0.0,
                threshold: 0.9,
            }),
        };
        let failed = AnalysisResult {
            name: "MannWhitneyAnalysis".to_string(),
            outcome: AnalysisOutcome::Failed(Error::analysis(
                "MannWhitneyAnalysis",
                Error::InvalidInput("<empty>".to_string()),
            )),
        };
        RunReport {
            info: ReportInfo {
                name: "Line 4".to_string(),
                author: Some("QA & Ops".to_string()),
                description: None,
            },
            analyses: vec![completed, skipped, failed],
            plots: vec![
                PlotRecord {
                    name: "BoxPlot".to_string(),
                    outcome: PlotOutcome::Written(dir.join("box_plot.html")),
                },
                PlotRecord {
                    name: "SignificancePlot".to_string(),
                    outcome: PlotOutcome::Failed(Error::plot(
                        "SignificancePlot",
                        Error::InvalidInput("nothing".to_string()),
                    )),
                },
            ],
            duration: Duration::from_millis(12),
        }
    }

    #[test]
    fn test_summary_counts() {
        let summary = report(Path::new(".")).summary();
        assert_eq!(
            summary.to_string(),
            "3 analyses: 1 ran, 1 skipped, 1 failed; 2 plots: 1 written, 1 failed"
        );
    }

    #[test]
    fn test_console_lines() {
        let report = report(Path::new("out"));
        let mut out = Vec::new();
        RunReport::write_analyses(&report.analyses, &mut out).unwrap();
        report.write_plots_and_summary(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert!(lines[0].starts_with("TTestAnalysis: ran (T-Test) t = -11.0000, p = 0.0004"));
        assert!(lines[1].starts_with("AnovaAnalysis: skipped-not-relevant"));
        assert!(lines[2].starts_with("MannWhitneyAnalysis: failed"));
        assert!(lines[3].contains("box_plot.html"));
        assert!(lines[4].starts_with("SignificancePlot: failed"));
        assert_eq!(lines[5], report.summary().to_string());
        assert_eq!(lines.len(), 6);
    }

    #[test]
    fn test_html_escapes_and_links() {
        let dir = TempDir::new().unwrap();
        let html = report(dir.path()).to_html(dir.path());
        assert!(html.contains("QA &amp; Ops"));
        assert!(html.contains("&lt;empty&gt;"));
        assert!(html.contains("<a href=\"box_plot.html\">BoxPlot</a>"));
        assert!(html.contains("Analysis Overview"));
        assert!(!html.contains("QA & Ops"));
    }

    #[test]
    fn test_html_link_attribute_is_quoted_safely() {
        let dir = TempDir::new().unwrap();
        let mut report = report(dir.path());
        report.plots[0].outcome = PlotOutcome::Written(dir.path().join("box\"<plot>.html"));
        let html = report.to_html(dir.path());
        assert!(html.contains("<a href=\"box&quot;&lt;plot&gt;.html\">BoxPlot</a>"));
    }

    #[test]
    fn test_save_html_uses_prefix() {
        let dir = TempDir::new().unwrap();
        let output = OutputConfig {
            output_directory: dir.path().join("reports"),
            filename_prefix: Some("line4".to_string()),
            ..OutputConfig::default()
        };
        let path = report(dir.path()).save_html(&output).unwrap();
        assert_eq!(path, dir.path().join("reports").join("line4_report.html"));
        assert!(path.exists());
    }
}
