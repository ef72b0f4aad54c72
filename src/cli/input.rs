//! Report input for the decode command
//!
//! A report can come from the command line, a file or stdin. Files and stdin
//! may hold a whole NOAA bulletin (a timestamp line followed by the report)
//! or a bare report line.

use anyhow::{Context, Result, bail};
use std::io::Read;
use std::path::Path;

use crate::app::services::polled_source::extract_station_line;

/// Resolve the report line to decode
///
/// A line given on the command line is used as is. For file or stdin input
/// with a station code, the bulletin line for that station is selected;
/// otherwise the last non-empty line is used.
pub fn read_report_line(
    line: Option<&str>,
    file: Option<&Path>,
    station: Option<&str>,
) -> Result<String> {
    if let Some(line) = line {
        return select_line(line, None);
    }

    let text = match file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read report file {}", path.display()))?,
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read report from stdin")?;
            buffer
        }
    };

    select_line(&text, station)
}

fn select_line(text: &str, station: Option<&str>) -> Result<String> {
    if let Some(station) = station.filter(|s| !s.is_empty()) {
        return Ok(extract_station_line(text, station)?);
    }

    match text.lines().map(str::trim).rfind(|l| !l.is_empty()) {
        Some(line) => Ok(line.to_string()),
        None => bail!("No report line found in input"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const BULLETIN: &str = "2024/03/16 11:50\nEGLL 161150Z 24012KT 6000 OVC008 15/08 Q1009\n\n";

    #[test]
    fn test_argument_line_is_used_as_is() {
        let line = read_report_line(Some("  LFMN 161200Z CAVOK "), None, None).unwrap();
        assert_eq!(line, "LFMN 161200Z CAVOK");
    }

    #[test]
    fn test_bulletin_file_uses_last_line() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", BULLETIN).unwrap();

        let line = read_report_line(None, Some(file.path()), None).unwrap();

        assert!(line.starts_with("EGLL 161150Z"));
    }

    #[test]
    fn test_station_selects_matching_line() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "{}KJFK 161151Z 18008KT 10SM FEW250 12/03 A3001", BULLETIN).unwrap();

        let line = read_report_line(None, Some(file.path()), Some("EGLL")).unwrap();

        assert!(line.starts_with("EGLL"));
    }

    #[test]
    fn test_missing_station_line_is_an_error() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", BULLETIN).unwrap();

        let result = read_report_line(None, Some(file.path()), Some("LFMN"));
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = read_report_line(None, Some(&dir.path().join("absent.txt")), None);
        assert!(result.unwrap_err().to_string().contains("Failed to read report file"));
    }

    #[test]
    fn test_blank_input_is_an_error() {
        assert!(read_report_line(Some(" \n \n"), None, None).is_err());
    }
}
