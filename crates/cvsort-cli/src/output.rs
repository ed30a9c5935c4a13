use std::io::Write;

use cvsort_core::{BatchStats, NOT_FOUND, ResumeRecord};
use owo_colors::OwoColorize;

/// Whether to use colored output.
#[derive(Debug, Clone, Copy)]
pub struct ColorMode(pub bool);

impl ColorMode {
    pub fn enabled(&self) -> bool {
        self.0
    }
}

const FILENAME_MAX: usize = 40;
const NAME_MAX: usize = 32;

/// Print one row per resume: filename, resolved name, final label.
pub fn print_results_table(
    w: &mut dyn Write,
    records: &[ResumeRecord],
    color: ColorMode,
) -> std::io::Result<()> {
    let rows: Vec<[String; 3]> = records
        .iter()
        .map(|r| {
            [
                truncate(&r.filename, FILENAME_MAX),
                truncate(&r.resolved_name, NAME_MAX),
                r.final_label().to_string(),
            ]
        })
        .collect();
    print_table(
        w,
        ["Filename", "Name", "Predicted Label"],
        &rows,
        color,
        |col, cell, record_index| {
            let record = &records[record_index];
            match col {
                1 if cell.trim_end() == NOT_FOUND => cell.dimmed().to_string(),
                2 if record.was_overridden() => cell.yellow().to_string(),
                2 => cell.cyan().to_string(),
                _ => cell.to_string(),
            }
        },
    )
}

/// Print the extraction-only view used by `cvsort names`.
pub fn print_names_table(
    w: &mut dyn Write,
    records: &[ResumeRecord],
    color: ColorMode,
) -> std::io::Result<()> {
    let rows: Vec<[String; 3]> = records
        .iter()
        .map(|r| {
            [
                truncate(&r.filename, FILENAME_MAX),
                truncate(&r.resolved_name, NAME_MAX),
                if r.is_internship_filename { "yes" } else { "" }.to_string(),
            ]
        })
        .collect();
    print_table(
        w,
        ["Filename", "Name", "Internship"],
        &rows,
        color,
        |col, cell, _| match col {
            1 if cell.trim_end() == NOT_FOUND => cell.dimmed().to_string(),
            2 => cell.yellow().to_string(),
            _ => cell.to_string(),
        },
    )
}

/// Aligned three-column table. `style` colors a padded cell given its column
/// and row index; it is only called when color is enabled.
fn print_table(
    w: &mut dyn Write,
    headers: [&str; 3],
    rows: &[[String; 3]],
    color: ColorMode,
    style: impl Fn(usize, &str, usize) -> String,
) -> std::io::Result<()> {
    let mut widths = headers.map(|h| h.chars().count());
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let header = format!(
        "{:<w0$}  {:<w1$}  {}",
        headers[0],
        headers[1],
        headers[2],
        w0 = widths[0],
        w1 = widths[1]
    );
    if color.enabled() {
        writeln!(w, "{}", header.bold())?;
    } else {
        writeln!(w, "{}", header)?;
    }
    writeln!(w, "{}", "-".repeat(widths.iter().sum::<usize>() + 4))?;

    for (i, row) in rows.iter().enumerate() {
        let cells: Vec<String> = row
            .iter()
            .enumerate()
            .map(|(col, cell)| {
                let padded = if col < 2 {
                    format!("{:<width$}", cell, width = widths[col])
                } else {
                    cell.clone()
                };
                if color.enabled() {
                    style(col, &padded, i)
                } else {
                    padded
                }
            })
            .collect();
        writeln!(w, "{}", cells.join("  ").trim_end())?;
    }
    Ok(())
}

/// Print the batch summary.
pub fn print_summary(w: &mut dyn Write, stats: &BatchStats, color: ColorMode) -> std::io::Result<()> {
    writeln!(w)?;
    let sep = "=".repeat(60);
    if color.enabled() {
        writeln!(w, "{}", sep.bold())?;
        writeln!(w, "{}", "SUMMARY".bold())?;
        writeln!(w, "{}", sep.bold())?;
    } else {
        writeln!(w, "{}", sep)?;
        writeln!(w, "SUMMARY")?;
        writeln!(w, "{}", sep)?;
    }

    writeln!(w, "  Resumes processed: {}", stats.total)?;
    if color.enabled() {
        writeln!(w, "  {} {}", "Names found:".green(), stats.names_found)?;
    } else {
        writeln!(w, "  Names found: {}", stats.names_found)?;
    }
    if stats.names_not_found > 0 {
        if color.enabled() {
            writeln!(w, "  {} {}", "Names not found:".yellow(), stats.names_not_found)?;
        } else {
            writeln!(w, "  Names not found: {}", stats.names_not_found)?;
        }
    }
    if stats.empty_text > 0 {
        let msg = format!("No extractable text: {}", stats.empty_text);
        if color.enabled() {
            writeln!(w, "  {}", msg.red())?;
        } else {
            writeln!(w, "  {}", msg)?;
        }
    }
    if stats.internship_overrides > 0 {
        writeln!(
            w,
            "  Labelled Internship by filename: {}",
            stats.internship_overrides
        )?;
    }

    if !stats.label_counts.is_empty() {
        writeln!(w)?;
        writeln!(w, "  Labels:")?;
        for (label, count) in &stats.label_counts {
            if color.enabled() {
                writeln!(w, "    {:<30} {}", label.cyan(), count)?;
            } else {
                writeln!(w, "    {:<30} {}", label, count)?;
            }
        }
    }

    writeln!(w)?;
    Ok(())
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() > max {
        let head: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", head)
    } else {
        s.to_string()
    }
}
