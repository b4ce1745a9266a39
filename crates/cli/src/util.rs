//! Shared output helpers for CLI commands

/// Format file size in human-readable form
pub fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.2} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}

/// Render up to `limit` items as indented list lines, eliding the rest
/// with a trailing count line
pub fn elide<S: AsRef<str>>(items: &[S], limit: usize, noun: &str) -> Vec<String> {
    let mut lines: Vec<String> = items
        .iter()
        .take(limit)
        .map(|item| format!("  - {}", item.as_ref()))
        .collect();

    if items.len() > limit {
        lines.push(format!("  ... and {} more {}", items.len() - limit, noun));
    }

    lines
}

/// Print an elided list
pub fn print_elided<S: AsRef<str>>(items: &[S], limit: usize, noun: &str) {
    for line in elide(items, limit, noun) {
        println!("{}", line);
    }
}

/// First 10 characters of an ISO-8601 timestamp (the date part)
pub fn date_part(timestamp: &str) -> &str {
    if timestamp.len() >= 10 {
        &timestamp[..10]
    } else {
        timestamp
    }
}
