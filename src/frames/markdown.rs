use super::tree::build_tree;
use super::{Frame, FrameDocError};
use std::collections::HashMap;

/// A code fence opener: ``` or ~~~ (three or more), optional language tag.
pub(crate) struct Fence {
    pub marker: String,
    pub lang: String,
}

pub(crate) fn opening_fence(line: &str) -> Option<Fence> {
    let first = line.chars().next()?;
    if first != '`' && first != '~' {
        return None;
    }
    let marker_len = line.chars().take_while(|&c| c == first).count();
    if marker_len < 3 {
        return None;
    }
    let rest = &line[marker_len..];
    let lang: String = rest
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric() || *c == '_')
        .collect();
    if !rest[lang.len()..].trim().is_empty() {
        return None;
    }
    Some(Fence {
        marker: line[..marker_len].to_string(),
        lang,
    })
}

/// Split a frames.md document on separator lines that are exactly `---`.
pub(crate) fn split_sections(src: &str) -> Vec<String> {
    let mut sections = Vec::new();
    let mut current = String::new();
    for line in src.lines() {
        if line == "---" {
            sections.push(std::mem::take(&mut current));
        } else {
            current.push_str(line);
            current.push('\n');
        }
    }
    sections.push(current);
    sections
}

/// Parse a frames.md document into frame records. The `tree` of each frame is
/// derived from every `selectedFile` seen up to and including that frame.
pub fn parse_document(src: &str) -> Result<Vec<Frame>, FrameDocError> {
    let mut seen_files = Vec::new();
    let mut frames = Vec::new();

    for section in split_sections(src) {
        if section.trim().is_empty() {
            continue;
        }
        frames.push(parse_frame(&section, frames.len(), &mut seen_files)?);
    }

    if frames.is_empty() {
        return Err(FrameDocError::Empty);
    }
    Ok(frames)
}

fn parse_frame(
    raw: &str,
    index: usize,
    seen_files: &mut Vec<String>,
) -> Result<Frame, FrameDocError> {
    let mut meta: HashMap<String, String> = HashMap::new();
    let mut in_code = false;
    let mut code_marker = String::new();
    let mut code_lang = String::new();
    let mut code_lines: Vec<&str> = Vec::new();

    for line in raw.lines() {
        if !in_code {
            if let Some(fence) = opening_fence(line) {
                code_marker = fence.marker;
                code_lang = fence.lang;
                in_code = true;
                continue;
            }
            // key: value metadata, where the key is a bare word
            if let Some(colon) = line.find(':') {
                if colon > 0 {
                    let key = line[..colon].trim();
                    if !key.is_empty()
                        && key.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
                    {
                        meta.insert(key.to_string(), line[colon + 1..].trim().to_string());
                    }
                }
            }
        } else if line.trim_end() == code_marker {
            in_code = false;
        } else {
            code_lines.push(line);
        }
    }

    let text = match meta.get("text").filter(|t| !t.is_empty()) {
        Some(text) => text.clone(),
        None => {
            return Err(FrameDocError::MissingField {
                frame: index + 1,
                field: "text",
            })
        }
    };
    let selected_file = match meta.get("selectedFile").filter(|f| !f.is_empty()) {
        Some(file) => file.clone(),
        None => {
            return Err(FrameDocError::MissingField {
                frame: index + 1,
                field: "selectedFile",
            })
        }
    };

    let scroll_line = meta
        .get("scrollLine")
        .and_then(|v| v.parse().ok())
        .unwrap_or(0);

    let highlights = meta
        .get("highlights")
        .map(|v| parse_highlights(v))
        .unwrap_or_default();

    seen_files.push(selected_file.clone());

    Ok(Frame {
        text,
        tree: build_tree(seen_files),
        selected_file,
        content: code_lines.join("\n"),
        language: code_lang,
        scroll_line,
        highlights,
    })
}

fn parse_highlights(value: &str) -> Vec<u32> {
    let open = match value.find('[') {
        Some(i) => i,
        None => return Vec::new(),
    };
    let close = match value[open..].find(']') {
        Some(i) => open + i,
        None => return Vec::new(),
    };
    value[open + 1..close]
        .split(',')
        .filter_map(|s| s.trim().parse().ok())
        .collect()
}
