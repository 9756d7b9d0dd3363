use crate::{cli::OutputFormat, error::Result};
#[cfg(feature = "colored-output")]
use colored::*;
use playlist_length::{extractor::error::RunFailure, model::CalculationReport};
use std::borrow::Cow;
use std::io::Write;
#[cfg(feature = "table-output")]
use tabled::{Table, Tabled, settings::Style};

pub struct OutputManager {
    colored: bool,
}

impl OutputManager {
    pub fn new(colored: bool) -> Self {
        Self { colored }
    }

    pub fn format_report(&self, report: &CalculationReport, format: &OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Pretty => Ok(self.format_pretty(report)),
            OutputFormat::Json => self.format_json(report, true),
            OutputFormat::JsonCompact => self.format_json(report, false),
            #[cfg(feature = "table-output")]
            OutputFormat::Table => Ok(self.format_table(report)),
            #[cfg(not(feature = "table-output"))]
            OutputFormat::Table => {
                // Fallback to pretty format when table feature is disabled
                Ok(self.format_pretty(report))
            }
            OutputFormat::Csv => Ok(self.format_csv(report)),
        }
    }

    /// Error object printed in JSON modes instead of the plain `Error:` line.
    pub fn format_failure(&self, failure: &RunFailure, format: &OutputFormat) -> Result<String> {
        let output = serde_json::json!({
            "status": "error",
            "kind": failure.kind,
            "message": &failure.message,
        });
        let mut result = if matches!(format, OutputFormat::Json) {
            serde_json::to_string_pretty(&output)?
        } else {
            serde_json::to_string(&output)?
        };
        result.push('\n');
        Ok(result)
    }

    /// One-line warning shown while a run proceeds.
    pub fn format_warning(&self, message: &str) -> String {
        format!(
            "{} {}",
            self.colorize("Warning:", &Color::Yellow, true),
            message
        )
    }

    fn format_pretty(&self, report: &CalculationReport) -> String {
        let mut output = String::new();

        output.push_str(&self.colorize("Playlist Summary:", &Color::Green, true));
        output.push('\n');

        output.push_str(&format!(
            "  {}: {}\n",
            self.colorize("Playlist", &Color::Yellow, false),
            self.colorize(&report.playlist_id, &Color::Cyan, false)
        ));

        output.push_str(&format!(
            "  {}: #{} - #{}\n",
            self.colorize("Range", &Color::Yellow, false),
            report.request.start_index(),
            report.request.end_index()
        ));

        output.push_str(&format!(
            "  {}: {}\n",
            self.colorize("Videos retrieved", &Color::Yellow, false),
            report.items_available
        ));

        output.push_str(&format!(
            "  {}: {}\n",
            self.colorize("Total Length", &Color::Yellow, false),
            self.colorize(&report.formatted, &Color::Cyan, true)
        ));

        for speed in &report.speeds {
            output.push_str(&format!(
                "  {}: {}\n",
                self.colorize(&format!("At {}x", speed.multiplier), &Color::Yellow, false),
                self.colorize(&speed.formatted, &Color::Cyan, false)
            ));
        }

        if !report.warnings.is_empty() {
            output.push('\n');
            output.push_str(&self.colorize("Warnings:", &Color::Green, true));
            output.push('\n');
            for warning in &report.warnings {
                output.push_str(&format!(
                    "  {}\n",
                    self.colorize(&warning.to_string(), &Color::Yellow, false)
                ));
            }
        }

        output
    }

    fn format_json(&self, report: &CalculationReport, pretty: bool) -> Result<String> {
        let mut output = serde_json::json!({ "status": "ok" });
        if let (Some(object), serde_json::Value::Object(fields)) =
            (output.as_object_mut(), serde_json::to_value(report)?)
        {
            object.extend(fields);
        }

        let mut result = if pretty {
            serde_json::to_string_pretty(&output)?
        } else {
            serde_json::to_string(&output)?
        };
        result.push('\n');
        Ok(result)
    }

    #[cfg(feature = "table-output")]
    fn format_table(&self, report: &CalculationReport) -> String {
        #[derive(Tabled)]
        struct TableRow<'a> {
            property: Cow<'a, str>,
            value: Cow<'a, str>,
        }

        let mut rows = vec![
            TableRow {
                property: Cow::Borrowed("Playlist"),
                value: Cow::Borrowed(&report.playlist_id),
            },
            TableRow {
                property: Cow::Borrowed("Range"),
                value: Cow::Owned(format!(
                    "#{} - #{}",
                    report.request.start_index(),
                    report.request.end_index()
                )),
            },
            TableRow {
                property: Cow::Borrowed("Videos retrieved"),
                value: Cow::Owned(report.items_available.to_string()),
            },
            TableRow {
                property: Cow::Borrowed("Total Length"),
                value: Cow::Borrowed(&report.formatted),
            },
        ];

        for speed in &report.speeds {
            rows.push(TableRow {
                property: Cow::Owned(format!("At {}x", speed.multiplier)),
                value: Cow::Borrowed(&speed.formatted),
            });
        }

        for warning in &report.warnings {
            rows.push(TableRow {
                property: Cow::Borrowed("Warning"),
                value: Cow::Owned(warning.to_string()),
            });
        }

        let mut table = Table::new(rows).with(Style::modern()).to_string();
        table.push('\n');
        table
    }

    fn format_csv(&self, report: &CalculationReport) -> String {
        let mut output = String::new();
        output.push_str("property,value\n");

        output.push_str(&format!(
            "playlist_id,\"{}\"\n",
            Self::escape_csv(&report.playlist_id)
        ));
        output.push_str(&format!("start_index,{}\n", report.request.start_index()));
        output.push_str(&format!("end_index,{}\n", report.request.end_index()));
        output.push_str(&format!("items_available,{}\n", report.items_available));
        output.push_str(&format!("total_seconds,{}\n", report.total_seconds));
        output.push_str(&format!("total,\"{}\"\n", report.formatted));

        for speed in &report.speeds {
            output.push_str(&format!("speed_{},\"{}\"\n", speed.multiplier, speed.formatted));
        }

        for warning in &report.warnings {
            output.push_str(&format!(
                "warning,\"{}\"\n",
                Self::escape_csv(&warning.to_string())
            ));
        }

        output
    }

    fn escape_csv(s: &str) -> Cow<'_, str> {
        if s.contains('"') {
            Cow::Owned(s.replace('"', "\"\""))
        } else {
            Cow::Borrowed(s)
        }
    }

    fn colorize(&self, text: &str, color: &Color, bold: bool) -> String {
        #[cfg(feature = "colored-output")]
        {
            if self.colored {
                let colored_text = match color {
                    Color::Green => text.green(),
                    Color::Yellow => text.yellow(),
                    Color::Cyan => text.cyan(),
                };
                if bold {
                    colored_text.bold().to_string()
                } else {
                    colored_text.to_string()
                }
            } else {
                text.to_string()
            }
        }

        #[cfg(not(feature = "colored-output"))]
        {
            let _ = (self.colored, color, bold);
            text.to_string()
        }
    }
}

enum Color {
    Green,
    Yellow,
    Cyan,
}

pub fn write_output(content: &str, output_file: Option<&std::path::Path>) -> Result<()> {
    match output_file {
        Some(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(path, content)?;
        }
        None => {
            print!("{content}");
            std::io::stdout().flush()?;
        }
    }
    Ok(())
}
