mod bootstrap;

use anyhow::Result;
use stats_core::formatting::{render_json_report, render_text_report};
use stats_core::settings::Settings;
use stats_data::analysis::{analyze_files, AnalysisOptions};

const MISSING_PATHS_MESSAGE: &str = "Invalid path. Please specify two input files.";

fn main() -> Result<()> {
    let settings = Settings::load();

    bootstrap::setup_logging(&settings.log_level, settings.log_file.as_deref())?;

    tracing::debug!("letter-stats v{} starting", env!("CARGO_PKG_VERSION"));

    let Some(output) = run(&settings)? else {
        eprintln!("{}", MISSING_PATHS_MESSAGE);
        return Ok(());
    };

    print!("{}", output);
    Ok(())
}

/// Analyse both inputs and render the report in the configured format.
///
/// Returns `None` without touching the filesystem when either input path
/// is missing.
fn run(settings: &Settings) -> Result<Option<String>> {
    let Some((single_path, pair_path)) = settings.input_paths() else {
        return Ok(None);
    };

    let options = AnalysisOptions {
        decoding: settings.decoding()?,
        open_policy: settings.open_policy(),
    };
    tracing::info!(
        "Single letters from {}, pairs from {} ({:?}, {:?})",
        single_path.display(),
        pair_path.display(),
        options.decoding,
        options.open_policy
    );

    let report = analyze_files(&single_path, &pair_path, options)?;

    let rendered = if settings.wants_json() {
        render_json_report(&report)?
    } else {
        render_text_report(&report)
    };
    Ok(Some(rendered))
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsString;
    use std::path::Path;
    use tempfile::TempDir;

    fn settings_for(args: &[&str]) -> Settings {
        let argv: Vec<OsString> = std::iter::once("letter-stats")
            .chain(args.iter().copied())
            .map(OsString::from)
            .collect();
        Settings::load_from_args(argv)
    }

    fn write_file(dir: &Path, name: &str, content: &str) -> String {
        let path = dir.join(name);
        std::fs::write(&path, content).expect("write input");
        path.to_string_lossy().to_string()
    }

    #[test]
    fn test_run_without_paths_returns_none() {
        assert!(run(&settings_for(&[])).unwrap().is_none());
        assert!(run(&settings_for(&["only-one.txt"])).unwrap().is_none());
    }

    #[test]
    fn test_run_text_report() {
        let tmp = TempDir::new().expect("tempdir");
        let one = write_file(tmp.path(), "one.txt", "AAbb");
        let two = write_file(tmp.path(), "two.txt", "aabbAA");

        let output = run(&settings_for(&[one.as_str(), two.as_str()])).unwrap().unwrap();
        assert_eq!(output, "b - 2\nTotal: 2\na - 2\nTotal: 2\n");
    }

    #[test]
    fn test_run_json_report() {
        let tmp = TempDir::new().expect("tempdir");
        let one = write_file(tmp.path(), "one.txt", "xyz");
        let two = write_file(tmp.path(), "two.txt", "oo");

        let output = run(&settings_for(&["--format", "json", one.as_str(), two.as_str()]))
            .unwrap()
            .unwrap();
        assert!(output.contains("\"single_letters\""));
        assert!(output.contains("\"letter_pairs\""));
        assert!(output.contains("\"total\": 3"));
    }

    #[test]
    fn test_run_strict_missing_file_errors() {
        let tmp = TempDir::new().expect("tempdir");
        let one = write_file(tmp.path(), "one.txt", "abc");
        let missing = tmp.path().join("missing.txt");
        let missing = missing.to_string_lossy().to_string();

        assert!(run(&settings_for(&["--strict", one.as_str(), missing.as_str()])).is_err());
        let degraded = run(&settings_for(&[one.as_str(), missing.as_str()])).unwrap().unwrap();
        assert!(degraded.ends_with("Total: 0\n"));
    }

    #[test]
    fn test_run_both_inputs_from_stdin_errors() {
        let err = run(&settings_for(&["-", "-"])).unwrap_err();
        assert!(err.to_string().contains("stdin can feed only one input"));
    }
}
