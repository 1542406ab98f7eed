use super::markdown::{opening_fence, split_sections};

pub const DEFAULT_MAX_CODE_LINES: usize = 24;

#[derive(Debug)]
pub struct CheckReport {
    pub doc_errors: Vec<String>,
    pub frames: Vec<FrameCheck>,
}

#[derive(Debug)]
pub struct FrameCheck {
    /// 1-based, matching the authoring view of the document.
    pub number: usize,
    pub errors: Vec<String>,
}

impl CheckReport {
    pub fn passed(&self) -> bool {
        self.doc_errors.is_empty() && self.frames.iter().all(|f| f.errors.is_empty())
    }
}

/// Validate an authored frames.md document against the frame rules: every
/// frame names its narration text and selected file, code stays within the
/// line budget, and deprecated metadata is called out.
pub fn check_document(src: &str, max_code_lines: usize) -> CheckReport {
    let mut doc_errors = Vec::new();

    let last_non_empty = src.lines().rev().find(|l| !l.trim().is_empty());
    if last_non_empty != Some("---") {
        doc_errors.push("file does not end with ---".to_string());
    }

    let mut frames = Vec::new();
    let mut number = 0;
    for section in split_sections(src) {
        if section.trim().is_empty() {
            continue;
        }
        number += 1;
        frames.push(check_frame(&section, number, max_code_lines));
    }

    CheckReport { doc_errors, frames }
}

fn check_frame(raw: &str, number: usize, max_code_lines: usize) -> FrameCheck {
    let mut errors = Vec::new();
    let mut in_code = false;
    let mut code_marker = String::new();
    let mut code_lines = 0usize;
    let mut has_text = false;
    let mut has_selected_file = false;

    for line in raw.lines() {
        if !in_code {
            if line.starts_with("text:") {
                has_text = true;
            }
            if line.starts_with("selectedFile:") {
                has_selected_file = true;
            }
            if line.starts_with("highlights:") {
                errors.push(
                    "highlights: field is deprecated — use // hl markers inside code lines instead"
                        .to_string(),
                );
            }
            if let Some(fence) = opening_fence(line) {
                in_code = true;
                code_marker = fence.marker;
            }
        } else if line.trim_end() == code_marker {
            in_code = false;
        } else {
            code_lines += 1;
        }
    }

    if !has_text {
        errors.push("missing text:".to_string());
    }
    if !has_selected_file {
        errors.push("missing selectedFile:".to_string());
    }
    if code_lines > max_code_lines {
        errors.push(format!(
            "{code_lines}/{max_code_lines} lines ({} over)",
            code_lines - max_code_lines
        ));
    }

    FrameCheck { number, errors }
}
