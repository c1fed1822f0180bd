//! Plain-text rendering: aligned tables and key/value blocks.
//!
//! Nothing clever — the console writes straight to stdout and leaves
//! styling to the terminal.

use chrono::{DateTime, Utc};

/// Renders an aligned table with a header row and a dashed rule.
///
/// Column widths are sized to the longest cell; rows shorter than the
/// header are padded with empty cells.
pub fn table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let columns = headers.len();
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (i, cell) in row.iter().take(columns).enumerate() {
            widths[i] = widths[i].max(cell.chars().count());
        }
    }

    let render_row = |cells: &[String]| -> String {
        let mut line = String::new();
        for i in 0..columns {
            let cell = cells.get(i).map(String::as_str).unwrap_or("");
            if i > 0 {
                line.push_str("  ");
            }
            line.push_str(cell);
            if i + 1 < columns {
                for _ in cell.chars().count()..widths[i] {
                    line.push(' ');
                }
            }
        }
        line.trim_end().to_string()
    };

    let header_cells: Vec<String> = headers.iter().map(|h| h.to_string()).collect();
    let mut out = render_row(&header_cells);
    out.push('\n');
    let rule_width = widths.iter().sum::<usize>() + 2 * (columns - 1);
    out.push_str(&"-".repeat(rule_width));
    for row in rows {
        out.push('\n');
        out.push_str(&render_row(row));
    }
    out
}

/// One `label: value` line with the label padded to `width`.
pub fn kv(label: &str, value: &str, width: usize) -> String {
    format!("{label:<width$}  {value}")
}

/// Human-oriented timestamp (`2025-05-02 10:00 UTC`).
pub fn timestamp(at: &DateTime<Utc>) -> String {
    at.format("%Y-%m-%d %H:%M UTC").to_string()
}

/// `timestamp` for optional values; dash when absent.
pub fn opt_timestamp(at: &Option<DateTime<Utc>>) -> String {
    at.as_ref().map(timestamp).unwrap_or_else(|| "-".to_string())
}

/// Dash for `None`, the value otherwise.
pub fn opt(value: &Option<String>) -> String {
    match value {
        Some(v) if !v.is_empty() => v.clone(),
        _ => "-".to_string(),
    }
}

/// Truncates long free text for table cells.
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let cut: String = text.chars().take(max.saturating_sub(1)).collect();
    format!("{cut}…")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_alignment() {
        let out = table(
            &["ID", "NAME"],
            &[
                vec!["1".to_string(), "Infusion pump".to_string()],
                vec!["42".to_string(), "ECG".to_string()],
            ],
        );
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "ID  NAME");
        assert!(lines[1].starts_with("--"));
        assert_eq!(lines[2], "1   Infusion pump");
        assert_eq!(lines[3], "42  ECG");
    }

    #[test]
    fn test_table_pads_short_rows() {
        let out = table(&["A", "B"], &[vec!["x".to_string()]]);
        assert!(out.lines().last().unwrap().starts_with('x'));
    }

    #[test]
    fn test_kv_padding() {
        assert_eq!(kv("Name", "Ayo", 8), "Name      Ayo");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        let long = truncate("a very long hazardous situation", 10);
        assert_eq!(long.chars().count(), 10);
        assert!(long.ends_with('…'));
    }

    #[test]
    fn test_opt_renders_dash() {
        assert_eq!(opt(&None), "-");
        assert_eq!(opt(&Some(String::new())), "-");
        assert_eq!(opt(&Some("x".to_string())), "x");
    }

    #[test]
    fn test_timestamp_format() {
        let at: DateTime<Utc> = "2025-05-02T10:00:00Z".parse().unwrap();
        assert_eq!(timestamp(&at), "2025-05-02 10:00 UTC");
    }
}
