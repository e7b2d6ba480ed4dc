use serde::Serialize;
use speksi_core::types::DocStatus;
use std::path::Path;

pub fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{json}");
    Ok(())
}

/// Print rows as left-aligned columns under a dashed header.
pub fn print_table(headers: &[&str], rows: &[Vec<String>]) {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.len()).collect();
    for row in rows {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(cell.chars().count());
        }
    }

    print_row(headers.iter().copied(), &widths);
    let dashes: Vec<String> = widths.iter().map(|&w| "-".repeat(w)).collect();
    print_row(dashes.iter().map(String::as_str), &widths);
    for row in rows {
        print_row(row.iter().map(String::as_str), &widths);
    }
}

fn print_row<'a>(cells: impl Iterator<Item = &'a str>, widths: &[usize]) {
    let padded: Vec<String> = cells
        .zip(widths)
        .map(|(cell, &w)| format!("{cell:w$}"))
        .collect();
    println!("{}", padded.join("  ").trim_end());
}

/// Short cell for a document status; absent documents show as `-`.
pub fn status_cell(status: DocStatus) -> String {
    match status {
        DocStatus::Empty => "-".to_string(),
        other => other.to_string(),
    }
}

pub fn check_mark(present: bool) -> &'static str {
    if present {
        "yes"
    } else {
        "-"
    }
}

/// `path` relative to `base` for display.
pub fn rel(path: &Path, base: &Path) -> String {
    speksi_core::paths::relative_slash(path, base)
}
