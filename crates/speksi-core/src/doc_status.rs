//! Reading and flipping the `**Status**: <value>` marker in a document.

use crate::types::DocStatus;
use regex::Regex;
use std::borrow::Cow;
use std::path::Path;
use std::sync::OnceLock;

pub const ACCEPTED_MARKER: &str = "**Status**: Accepted";

static STATUS_RE: OnceLock<Regex> = OnceLock::new();

fn status_re() -> &'static Regex {
    STATUS_RE.get_or_init(|| Regex::new(r"\*\*Status\*\*:[ \t]*(\S+)").unwrap())
}

/// Status carried by document text. Only the first marker counts.
pub fn parse_doc_status(content: &str) -> DocStatus {
    match status_re().captures(content) {
        Some(caps) if &caps[1] == "Accepted" => DocStatus::Accepted,
        _ => DocStatus::Draft,
    }
}

/// Status of the document at `path`.
///
/// Never fails: a missing file is `Empty`, an unreadable one is `Draft`.
pub fn read_doc_status(path: &Path) -> DocStatus {
    if !path.exists() {
        return DocStatus::Empty;
    }
    match std::fs::read_to_string(path) {
        Ok(content) => parse_doc_status(&content),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "unreadable document, treating as draft");
            DocStatus::Draft
        }
    }
}

/// Rewrite the document's status marker to Accepted when it reads Draft.
///
/// Only the first marker is considered, the same one [`parse_doc_status`]
/// reads, and its token must be exactly `Draft`. A borrowed result means
/// the text was left alone.
pub fn accept_marker(content: &str) -> Cow<'_, str> {
    let Some(caps) = status_re().captures(content) else {
        return Cow::Borrowed(content);
    };
    match (caps.get(0), caps.get(1)) {
        (Some(marker), Some(token)) if token.as_str() == "Draft" => Cow::Owned(format!(
            "{}{ACCEPTED_MARKER}{}",
            &content[..marker.start()],
            &content[token.end()..]
        )),
        _ => Cow::Borrowed(content),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        assert_eq!(read_doc_status(&dir.path().join("proposal.md")), DocStatus::Empty);
    }

    #[test]
    fn file_without_marker_is_draft() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("proposal.md");
        std::fs::write(&path, "# Proposal\n\nJust text.\n").unwrap();
        assert_eq!(read_doc_status(&path), DocStatus::Draft);
    }

    #[test]
    fn accepted_marker_is_accepted() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("proposal.md");
        std::fs::write(&path, "# Proposal\n**Status**: Accepted\n").unwrap();
        assert_eq!(read_doc_status(&path), DocStatus::Accepted);
    }

    #[test]
    fn unknown_values_are_draft() {
        assert_eq!(parse_doc_status("**Status**: Draft"), DocStatus::Draft);
        assert_eq!(parse_doc_status("**Status**: Acceptd"), DocStatus::Draft);
        assert_eq!(parse_doc_status("**Status**: accepted"), DocStatus::Draft);
        assert_eq!(parse_doc_status("**Status**:"), DocStatus::Draft);
    }

    #[test]
    fn first_marker_wins() {
        let text = "**Status**: Draft\n\n**Status**: Accepted\n";
        assert_eq!(parse_doc_status(text), DocStatus::Draft);
    }

    #[test]
    fn marker_tolerates_spacing() {
        assert_eq!(parse_doc_status("**Status**:Accepted"), DocStatus::Accepted);
        assert_eq!(parse_doc_status("**Status**:\t  Accepted"), DocStatus::Accepted);
    }

    #[test]
    fn invalid_utf8_is_draft() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tasks.md");
        std::fs::write(&path, [0xff, 0xfe, 0x00, 0x80]).unwrap();
        assert_eq!(read_doc_status(&path), DocStatus::Draft);
    }

    #[test]
    fn accept_marker_rewrites_first_draft_only() {
        let text = "**Status**:   Draft\nbody\n**Status**: Draft\n";
        let out = accept_marker(text);
        assert_eq!(out, "**Status**: Accepted\nbody\n**Status**: Draft\n");
    }

    #[test]
    fn accept_marker_ignores_punctuated_draft() {
        let text = "**Status**: Draft.\n";
        assert!(matches!(accept_marker(text), Cow::Borrowed(_)));
        assert_eq!(parse_doc_status(text), DocStatus::Draft);
    }

    #[test]
    fn accept_marker_only_touches_the_first_marker() {
        let text = "**Status**: Review\n\n**Status**: Draft\n";
        assert!(matches!(accept_marker(text), Cow::Borrowed(_)));
    }

    #[test]
    fn accepted_marker_reads_back_as_accepted() {
        for text in ["**Status**: Draft\n", "**Status**:Draft", "# T\n**Status**:\t Draft\nbody"] {
            let out = accept_marker(text);
            assert!(matches!(out, Cow::Owned(_)), "{text:?}");
            assert_eq!(parse_doc_status(&out), DocStatus::Accepted, "{text:?}");
            assert!(matches!(accept_marker(&out), Cow::Borrowed(_)));
        }
    }

    #[test]
    fn accept_marker_leaves_other_text_alone() {
        let text = "**Status**: Accepted\n";
        assert!(matches!(accept_marker(text), Cow::Borrowed(_)));
        let text = "**Status**: Drafted\n";
        assert!(matches!(accept_marker(text), Cow::Borrowed(_)));
    }
}
