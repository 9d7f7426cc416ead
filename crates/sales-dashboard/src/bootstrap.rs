use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use dashboard_core::models::RawTable;
use dashboard_data::reader::{load_raw_table, read_raw_table};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Sample export compiled into the binary, used when no deals file is found.
pub const BUNDLED_SAMPLE: &str = include_str!("../../../data/Deals.csv");

const DATA_FILE_NAME: &str = "Deals.csv";

// ── Directory bootstrap ────────────────────────────────────────────────────────

/// `~/.sales-dashboard/`, or `./.sales-dashboard/` without a home directory.
pub fn app_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".sales-dashboard")
}

/// Ensure `~/.sales-dashboard/` and `~/.sales-dashboard/logs/` exist.
pub fn ensure_directories() -> anyhow::Result<()> {
    let dir = app_dir();
    std::fs::create_dir_all(&dir)?;
    std::fs::create_dir_all(dir.join("logs"))?;
    Ok(())
}

pub fn default_log_file() -> PathBuf {
    app_dir().join("logs").join("sales-dashboard.log")
}

// ── Logging bootstrap ──────────────────────────────────────────────────────────

/// Map a `--log-level` name onto an [`EnvFilter`] directive.
pub fn level_directive(log_level: &str) -> String {
    match log_level.to_uppercase().as_str() {
        "DEBUG" => "debug".to_string(),
        "INFO" => "info".to_string(),
        "WARNING" => "warn".to_string(),
        "ERROR" | "CRITICAL" => "error".to_string(),
        other => other.to_lowercase(),
    }
}

/// Initialise the global `tracing` subscriber.
///
/// With `log_file` set, records are appended to that file without colours so
/// the terminal UI keeps the screen to itself; otherwise they go to stderr.
/// Unknown level names fall back to `info`.
pub fn setup_logging(log_level: &str, log_file: Option<&Path>) -> anyhow::Result<()> {
    let filter =
        EnvFilter::try_new(level_directive(log_level)).unwrap_or_else(|_| EnvFilter::new("info"));

    match log_file {
        Some(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            let layer = fmt::layer()
                .with_target(false)
                .with_ansi(false)
                .with_writer(Mutex::new(file));
            tracing_subscriber::registry().with(filter).with(layer).init();
        }
        None => {
            let layer = fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr);
            tracing_subscriber::registry().with(filter).with(layer).init();
        }
    }

    Ok(())
}

// ── Data-file discovery ────────────────────────────────────────────────────────

/// Locations searched for the deals export, in order.
pub fn data_file_candidates(cwd: &Path, home: Option<&Path>) -> Vec<PathBuf> {
    let mut candidates = vec![
        cwd.join(DATA_FILE_NAME),
        cwd.join("pages").join(DATA_FILE_NAME),
        cwd.join("data").join(DATA_FILE_NAME),
    ];
    if let Some(home) = home {
        candidates.push(home.join(".sales-dashboard").join(DATA_FILE_NAME));
    }
    candidates
}

/// First existing candidate relative to the working and home directories.
pub fn discover_data_file() -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok()?;
    let home = dirs::home_dir();
    data_file_candidates(&cwd, home.as_deref())
        .into_iter()
        .find(|p| p.is_file())
}

/// Load `file`, a discovered export, or the bundled sample, in that order.
pub fn load_input(file: Option<&Path>) -> anyhow::Result<RawTable> {
    match file.map(Path::to_path_buf).or_else(discover_data_file) {
        Some(path) => Ok(load_raw_table(&path)?),
        None => {
            tracing::info!("No deals file found; using the bundled sample");
            Ok(read_raw_table(BUNDLED_SAMPLE.as_bytes())?)
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use dashboard_core::config::PipelineConfig;
    use dashboard_core::models::ViewQuery;
    use dashboard_data::analysis::analyze_deals;
    use tempfile::TempDir;

    #[test]
    fn test_ensure_directories() {
        let tmp = TempDir::new().expect("tempdir");

        // Override HOME so that dirs::home_dir() resolves to our temp dir.
        let original_home = std::env::var_os("HOME");
        std::env::set_var("HOME", tmp.path());

        let result = ensure_directories();
        let log_file = default_log_file();

        match original_home {
            Some(v) => std::env::set_var("HOME", v),
            None => std::env::remove_var("HOME"),
        }

        result.expect("ensure_directories should succeed");

        let dir = tmp.path().join(".sales-dashboard");
        assert!(dir.is_dir(), ".sales-dashboard dir must exist");
        assert!(dir.join("logs").is_dir(), "logs subdir must exist");
        assert_eq!(log_file, dir.join("logs").join("sales-dashboard.log"));
    }

    #[test]
    fn test_level_directive() {
        assert_eq!(level_directive("DEBUG"), "debug");
        assert_eq!(level_directive("info"), "info");
        assert_eq!(level_directive("WARNING"), "warn");
        assert_eq!(level_directive("CRITICAL"), "error");
        assert_eq!(level_directive("Trace"), "trace");
    }

    #[test]
    fn test_data_file_candidates_order() {
        let cwd = Path::new("/work");
        let home = Path::new("/home/me");
        let candidates = data_file_candidates(cwd, Some(home));
        assert_eq!(
            candidates,
            vec![
                PathBuf::from("/work/Deals.csv"),
                PathBuf::from("/work/pages/Deals.csv"),
                PathBuf::from("/work/data/Deals.csv"),
                PathBuf::from("/home/me/.sales-dashboard/Deals.csv"),
            ]
        );
        assert_eq!(data_file_candidates(cwd, None).len(), 3);
    }

    #[test]
    fn test_load_input_explicit_file() {
        let tmp = TempDir::new().expect("tempdir");
        let path = tmp.path().join("export.csv");
        std::fs::write(
            &path,
            "ASSIGNED_BY_NAME;OPPORTUNITY_ACCOUNT;ACCOUNT_CURRENCY_ID;DATE_CREATE\n\
             Alice;10;USD;2024-01-10 09:00:00,000000\n",
        )
        .expect("write");

        let raw = load_input(Some(&path)).expect("load");
        assert_eq!(raw.len(), 1);
    }

    #[test]
    fn test_load_input_missing_file_is_error() {
        let tmp = TempDir::new().expect("tempdir");
        assert!(load_input(Some(&tmp.path().join("absent.csv"))).is_err());
    }

    #[test]
    fn test_bundled_sample_feeds_every_page() {
        let raw = read_raw_table(BUNDLED_SAMPLE.as_bytes()).expect("sample parses");
        assert!(!raw.is_empty());
        for config in [
            PipelineConfig::sales(),
            PipelineConfig::overview(),
            PipelineConfig::data(),
        ] {
            let view = analyze_deals(&raw, config, &ViewQuery::default()).expect("sample analyses");
            assert!(!view.is_empty());
        }
    }
}
