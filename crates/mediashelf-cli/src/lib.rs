use mediashelf_core::{MediaView, Notifier, StoredFile, ValidationVerdict};
use serde::Serialize;
use std::fmt::Write;

/// Truncate a string to max_len characters, appending "..." if truncated.
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Initialize tracing for CLI binaries.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// Prints notifications to stderr so stdout stays machine-readable
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify_success(&self, message: &str) {
        eprintln!("[ok] {}", message);
    }

    fn notify_error(&self, message: &str) {
        eprintln!("[error] {}", message);
    }
}

/// One gallery entry as printed by `list --format json`
#[derive(Debug, Serialize)]
pub struct GalleryRow<'a> {
    pub id: &'a str,
    pub file_name: &'a str,
    pub file_type: Option<&'a str>,
    pub size_kb: u64,
    pub category: &'a str,
    pub uploaded_at: String,
    pub view: &'a MediaView,
}

pub fn gallery_rows(entries: &[(StoredFile, MediaView)]) -> Vec<GalleryRow<'_>> {
    entries
        .iter()
        .map(|(file, view)| GalleryRow {
            id: file.id.as_str(),
            file_name: &file.file_name,
            file_type: file.file_type.as_deref(),
            size_kb: file.size_kb(),
            category: &file.category,
            uploaded_at: file.uploaded_at.to_rfc3339(),
            view,
        })
        .collect()
}

pub fn format_gallery_table(entries: &[(StoredFile, MediaView)]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "\n=== All Files ===\n");

    if entries.is_empty() {
        let _ = writeln!(out, "No files uploaded yet.");
        return out;
    }

    let _ = writeln!(
        out,
        "{:<8} {:<30} {:>10} {:<6} {:<10} {:<16} {:<10}",
        "ID", "File Name", "Size (KB)", "Type", "Category", "Uploaded At", "Preview"
    );
    let _ = writeln!(out, "{}", "-".repeat(96));

    for (file, view) in entries {
        let preview = if view.autoplay {
            format!("{} (autoplay)", view.strategy.as_str())
        } else {
            view.strategy.as_str().to_string()
        };
        let _ = writeln!(
            out,
            "{:<8} {:<30} {:>10} {:<6} {:<10} {:<16} {:<10}",
            truncate_string(file.id.as_str(), 8),
            truncate_string(&file.file_name, 30),
            file.size_kb(),
            truncate_string(file.file_type.as_deref().unwrap_or("-"), 6),
            truncate_string(&file.category, 10),
            file.uploaded_at.format("%a %b %d %Y"),
            preview
        );
    }

    out
}

pub fn format_verdicts(verdicts: &[ValidationVerdict]) -> String {
    let mut out = String::new();
    for verdict in verdicts {
        let status = match verdict.reason {
            None => "accepted".to_string(),
            Some(reason) => format!("rejected ({:?})", reason),
        };
        let _ = writeln!(out, "{:<40} {}", truncate_string(&verdict.file_name, 40), status);
    }
    out
}
