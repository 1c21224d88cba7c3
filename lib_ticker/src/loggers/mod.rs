//! # Loggers
//!
//! Installs a global `fern` dispatcher behind the `log` facade. Records go to
//! stderr, leaving stdout to the binaries' own output, and to
//! `<log_dir>/<app>_<timestamp>.log`. Before a new file is opened, older log
//! files of the same app are removed so only the most recent previous run is
//! kept next to the current one.

use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// Maps a textual level to a filter. Unknown values fall back to `Info`.
pub fn parse_level(log_level: &str) -> log::LevelFilter {
    match log_level.trim().to_lowercase().as_str() {
        "trace" => log::LevelFilter::Trace,
        "debug" => log::LevelFilter::Debug,
        "warn" => log::LevelFilter::Warn,
        "error" => log::LevelFilter::Error,
        "off" => log::LevelFilter::Off,
        _ => log::LevelFilter::Info,
    }
}

/// Path of the log file a run started now would write to.
pub fn log_file_path(log_dir: &Path, app_name: &str) -> PathBuf {
    let file_name = format!("{}_{}.log", app_name, chrono::Local::now().format("%Y-%m-%d_%H-%M-%S"));
    log_dir.join(file_name)
}

/// Sets up the global logger for `app_name`.
///
/// Can only succeed once per process; a second call returns the
/// `SetLoggerError` from `fern`.
pub fn setup_logging(log_dir: &Path, log_level: &str, app_name: &str) -> Result<()> {
    if !log_dir.exists() {
        fs::create_dir_all(log_dir)?;
    }

    cleanup_old_logs(log_dir, app_name)?;

    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "{}[{}][{}] {}",
                chrono::Local::now().format("[%Y-%m-%d %H:%M:%S]"),
                record.target(),
                record.level(),
                message
            ))
        })
        .level(parse_level(log_level))
        .chain(std::io::stderr())
        .chain(fern::log_file(log_file_path(log_dir, app_name))?)
        .apply()?;

    Ok(())
}

/// Deletes `<app_name>_*.log` files in `log_dir` except the newest one.
/// Returns the number of files removed.
pub fn cleanup_old_logs(log_dir: &Path, app_name: &str) -> Result<usize> {
    let prefix = format!("{}_", app_name);

    let mut entries: Vec<(SystemTime, PathBuf)> = fs::read_dir(log_dir)?
        .filter_map(|res| res.ok())
        .map(|e| e.path())
        .filter(|p| p.extension().is_some_and(|ext| ext == "log"))
        .filter(|p| {
            p.file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| n.starts_with(&prefix))
        })
        .map(|p| {
            let modified = fs::metadata(&p)
                .and_then(|m| m.modified())
                .unwrap_or(SystemTime::UNIX_EPOCH);
            (modified, p)
        })
        .collect();

    // Newest first; names carry the timestamp so they break ties.
    entries.sort_by(|a, b| b.cmp(a));

    let mut removed = 0;
    for (_, path) in entries.iter().skip(1) {
        match fs::remove_file(path) {
            Ok(()) => removed += 1,
            Err(e) => eprintln!("Failed to delete old log file {:?}: {}", path, e),
        }
    }

    Ok(removed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use tempfile::tempdir;

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level("DEBUG"), log::LevelFilter::Debug);
        assert_eq!(parse_level("trace"), log::LevelFilter::Trace);
        assert_eq!(parse_level(" warn "), log::LevelFilter::Warn);
        assert_eq!(parse_level("error"), log::LevelFilter::Error);
        assert_eq!(parse_level("fatal"), log::LevelFilter::Info);
        assert_eq!(parse_level(""), log::LevelFilter::Info);
    }

    #[test]
    fn test_log_file_path_shape() {
        let dir = tempdir().unwrap();
        let path = log_file_path(dir.path(), "stock-widget");
        let name = path.file_name().unwrap().to_str().unwrap();
        assert!(name.starts_with("stock-widget_"));
        assert!(name.ends_with(".log"));
        assert_eq!(path.parent(), Some(dir.path()));
    }

    #[test]
    fn test_cleanup_keeps_newest_of_same_app() {
        let dir = tempdir().unwrap();
        for name in [
            "stock-widget_2024-01-01_00-00-00.log",
            "stock-widget_2024-01-02_00-00-00.log",
            "stock-widget_2024-01-03_00-00-00.log",
        ] {
            File::create(dir.path().join(name)).unwrap();
        }
        File::create(dir.path().join("grab-quotes_2024-01-01_00-00-00.log")).unwrap();
        File::create(dir.path().join("stock-widget_notes.txt")).unwrap();

        let removed = cleanup_old_logs(dir.path(), "stock-widget").unwrap();
        assert_eq!(removed, 2);

        let mut left: Vec<String> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
            .collect();
        left.sort();
        assert_eq!(left.len(), 3);
        assert!(left.contains(&"grab-quotes_2024-01-01_00-00-00.log".to_string()));
        assert!(left.contains(&"stock-widget_notes.txt".to_string()));
        assert_eq!(left.iter().filter(|n| n.starts_with("stock-widget_") && n.ends_with(".log")).count(), 1);
    }

    #[test]
    fn test_cleanup_empty_dir() {
        let dir = tempdir().unwrap();
        assert_eq!(cleanup_old_logs(dir.path(), "app").unwrap(), 0);
    }
}
