use std::io::{IsTerminal, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

use cvsort_core::config_file::{self, ConfigFile, DEFAULT_MODEL_PATH, DEFAULT_OUTPUT_FILE};
use cvsort_core::{BatchStats, Pipeline, ProgressEvent, extract_records};
use cvsort_ingest::{DocumentExtractor, collect_inputs, read_uploads};
use cvsort_model::LinearTextModel;
use cvsort_reporting::{ExportFormat, export_results};

mod output;

use output::ColorMode;

/// Resume Sorter - Extract candidate names and predict job categories for resumes
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Classify PDF, DOCX and TXT resumes into job categories
    Classify {
        /// Resume files or directories of resumes
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// Path to the JSON model artifact
        #[arg(long)]
        model: Option<PathBuf>,

        /// Export results to a file (defaults to resume_predictions.csv when no path is given)
        #[arg(short, long, num_args = 0..=1)]
        output: Option<Option<PathBuf>>,

        /// Export format: csv, json or text
        #[arg(long)]
        format: Option<ExportFormat>,

        /// Disable colored output
        #[arg(long)]
        no_color: bool,

        /// Hide the progress bar
        #[arg(short, long)]
        quiet: bool,
    },

    /// Extract candidate names without classifying (no model required)
    Names {
        /// Resume files or directories of resumes
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// Disable colored output
        #[arg(long)]
        no_color: bool,

        /// Hide the progress bar
        #[arg(short, long)]
        quiet: bool,
    },
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let config = config_file::load_config();

    match cli.command {
        Command::Classify {
            paths,
            model,
            output,
            format,
            no_color,
            quiet,
        } => classify(&config, paths, model, output, format, no_color, quiet),
        Command::Names {
            paths,
            no_color,
            quiet,
        } => names(&config, paths, no_color, quiet, &mut std::io::stdout()),
    }
}

/// Logs go to stderr so stdout carries only the result table.
fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .init();
}

fn color_mode(config: &ConfigFile, no_color: bool) -> ColorMode {
    ColorMode(!no_color && config.color().unwrap_or(true) && std::io::stdout().is_terminal())
}

/// Export destination and format, resolved as CLI flag > config file > default.
///
/// `output` is `None` when `-o` was not passed, `Some(None)` for a bare `-o`.
fn resolve_export(
    config: &ConfigFile,
    output: Option<Option<PathBuf>>,
    format: Option<ExportFormat>,
) -> anyhow::Result<Option<(PathBuf, ExportFormat)>> {
    let path = match output {
        Some(Some(path)) => Some(path),
        Some(None) => Some(
            config
                .output_path()
                .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_FILE)),
        ),
        None => config.output_path(),
    };
    let Some(path) = path else {
        return Ok(None);
    };

    let format = match format {
        Some(f) => f,
        None => match config.output_format() {
            Some(s) => s
                .parse()
                .map_err(|e: String| anyhow::anyhow!("invalid [output] format in config: {}", e))?,
            None => ExportFormat::default(),
        },
    };
    Ok(Some((path, format)))
}

fn classify(
    config: &ConfigFile,
    paths: Vec<PathBuf>,
    model: Option<PathBuf>,
    output: Option<Option<PathBuf>>,
    format: Option<ExportFormat>,
    no_color: bool,
    quiet: bool,
) -> anyhow::Result<()> {
    let color = color_mode(config, no_color);
    let export = resolve_export(config, output, format)?;

    // Load the model before touching any resumes.
    let model_path = model
        .or_else(|| config.model_path())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_MODEL_PATH));
    let model = LinearTextModel::load(&model_path).with_context(|| {
        format!(
            "Could not load classification model from {}. Pass --model or set [model] path in .cvsort.toml",
            model_path.display()
        )
    })?;

    let files = collect_inputs(&paths)?;
    let mut stdout = std::io::stdout();
    if files.is_empty() {
        writeln!(stdout, "No resumes to classify.")?;
        return Ok(());
    }
    let uploads = read_uploads(&files)?;

    let pipeline = Pipeline::new(Box::new(DocumentExtractor::new()), Arc::new(model));
    tracing::debug!(classifier = %pipeline.classifier().describe(), "pipeline ready");

    let bar = progress_bar(uploads.len() as u64, quiet)?;
    let result = pipeline.run(&uploads, |event| on_progress(&bar, &event));
    bar.finish_and_clear();
    let records = result.context("Classification failed; no results were produced")?;

    output::print_results_table(&mut stdout, &records, color)?;
    output::print_summary(&mut stdout, &BatchStats::from_records(&records), color)?;

    if let Some((path, format)) = export {
        export_results(&records, format, &path)?;
        print_export_notice(&mut stdout, &path, format, color)?;
    }
    Ok(())
}

fn names(
    config: &ConfigFile,
    paths: Vec<PathBuf>,
    no_color: bool,
    quiet: bool,
    w: &mut dyn Write,
) -> anyhow::Result<()> {
    let color = color_mode(config, no_color);

    let files = collect_inputs(&paths)?;
    if files.is_empty() {
        writeln!(w, "No resumes found.")?;
        return Ok(());
    }
    let uploads = read_uploads(&files)?;

    let bar = progress_bar(uploads.len() as u64, quiet)?;
    let records = extract_records(&DocumentExtractor::new(), &uploads, |event| {
        on_progress(&bar, &event)
    });
    bar.finish_and_clear();

    output::print_names_table(w, &records, color)?;
    Ok(())
}

fn progress_bar(len: u64, quiet: bool) -> anyhow::Result<ProgressBar> {
    if quiet {
        return Ok(ProgressBar::hidden());
    }
    let style = ProgressStyle::with_template(
        "{spinner:.cyan} {msg:40!} [{bar:30.cyan/dim}] {pos}/{len}",
    )?
    .progress_chars("=> ");
    let bar = ProgressBar::new(len);
    bar.set_style(style);
    bar.enable_steady_tick(Duration::from_millis(120));
    Ok(bar)
}

fn on_progress(bar: &ProgressBar, event: &ProgressEvent) {
    match event {
        ProgressEvent::Extracting { filename, .. } => {
            bar.set_message(format!("Extracting {}", filename));
        }
        ProgressEvent::Extracted { .. } => bar.inc(1),
        ProgressEvent::Classifying { count } => {
            bar.set_message(format!("Classifying {} resumes", count));
        }
        ProgressEvent::Classified { count } => {
            bar.set_message(format!("Classified {} resumes", count));
        }
    }
}

fn print_export_notice(
    w: &mut dyn Write,
    path: &Path,
    format: ExportFormat,
    color: ColorMode,
) -> std::io::Result<()> {
    let msg = format!("{} results written to {}", format.label(), path.display());
    if color.enabled() {
        use owo_colors::OwoColorize;
        writeln!(w, "{}", msg.green())
    } else {
        writeln!(w, "{}", msg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cvsort_core::config_file::OutputConfig;

    fn config_with_output(path: Option<&str>, format: Option<&str>) -> ConfigFile {
        ConfigFile {
            output: Some(OutputConfig {
                path: path.map(String::from),
                format: format.map(String::from),
            }),
            ..Default::default()
        }
    }

    #[test]
    fn cli_parses_classify() {
        let cli = Cli::try_parse_from([
            "cvsort", "classify", "a.pdf", "dir", "--model", "m.json", "-o", "out.json",
            "--format", "json",
        ])
        .unwrap();
        match cli.command {
            Command::Classify {
                paths,
                model,
                output,
                format,
                ..
            } => {
                assert_eq!(paths, vec![PathBuf::from("a.pdf"), PathBuf::from("dir")]);
                assert_eq!(model, Some(PathBuf::from("m.json")));
                assert_eq!(output, Some(Some(PathBuf::from("out.json"))));
                assert_eq!(format, Some(ExportFormat::Json));
            }
            _ => panic!("expected classify"),
        }
    }

    #[test]
    fn cli_requires_paths() {
        assert!(Cli::try_parse_from(["cvsort", "classify"]).is_err());
        assert!(Cli::try_parse_from(["cvsort", "names"]).is_err());
    }

    #[test]
    fn cli_rejects_unknown_format() {
        assert!(Cli::try_parse_from(["cvsort", "classify", "a.pdf", "--format", "xlsx"]).is_err());
    }

    #[test]
    fn no_export_without_flag_or_config() {
        let export = resolve_export(&ConfigFile::default(), None, None).unwrap();
        assert!(export.is_none());
    }

    #[test]
    fn bare_output_flag_uses_default_file() {
        let export = resolve_export(&ConfigFile::default(), Some(None), None).unwrap();
        assert_eq!(
            export,
            Some((PathBuf::from(DEFAULT_OUTPUT_FILE), ExportFormat::Csv))
        );
    }

    #[test]
    fn cli_overrides_config() {
        let config = config_with_output(Some("cfg.csv"), Some("text"));
        let export = resolve_export(
            &config,
            Some(Some(PathBuf::from("cli.json"))),
            Some(ExportFormat::Json),
        )
        .unwrap();
        assert_eq!(export, Some((PathBuf::from("cli.json"), ExportFormat::Json)));
    }

    #[test]
    fn config_output_applies_without_flag() {
        let config = config_with_output(Some("cfg.txt"), Some("text"));
        let export = resolve_export(&config, None, None).unwrap();
        assert_eq!(export, Some((PathBuf::from("cfg.txt"), ExportFormat::Text)));
    }

    #[test]
    fn bad_config_format_is_an_error() {
        let config = config_with_output(Some("cfg.csv"), Some("xlsx"));
        assert!(resolve_export(&config, None, None).is_err());
    }

    fn run_names(paths: Vec<PathBuf>) -> String {
        let mut buf = Vec::new();
        names(&ConfigFile::default(), paths, true, true, &mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn names_on_empty_dir_reports_no_resumes() {
        let dir = tempfile::tempdir().unwrap();
        let out = run_names(vec![dir.path().to_path_buf()]);
        assert_eq!(out, "No resumes found.\n");
        assert!(!out.contains("classify"));
    }

    #[test]
    fn names_lists_resolved_names() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("jane.txt"), "Jane Doe\njane@example.com\n").unwrap();
        std::fs::write(dir.path().join("sam_intern.txt"), "Sam Lee\n").unwrap();
        let out = run_names(vec![dir.path().to_path_buf()]);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "Filename        Name      Internship");
        assert_eq!(lines[2], "jane.txt        Jane Doe");
        assert_eq!(lines[3], "sam_intern.txt  Sam Lee   yes");
    }
}
