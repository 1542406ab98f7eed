use regex::Regex;
use std::sync::OnceLock;

/// Phonetic rewrite rules applied to narration text before it is spoken.
/// Order matters: longer / more specific patterns come before shorter ones.
const RULE_TABLE: &[(&str, &str)] = &[
    // Markdown formatting: strip markers, keep text
    (r"\*\*(.+?)\*\*", "$1"),
    (r"\*(.+?)\*", "$1"),
    (r"`([^`\n]+)`", "$1"),
    (r"\[([^\]]+)\]\([^)]+\)", "$1"),
    // Operators, specific before general
    (r"===", "strictly equals"),
    (r"!==", "strictly not equals"),
    (r"==", "loosely equals"),
    (r"!=", "loosely not equals"),
    (r"\|\|", "or"),
    (r"&&", "and"),
    (r"=>", "which returns"),
    (r"\.\.\.", "rest"),
    // Slash-separated idioms, before keyword rules split the words
    (r"\basync/await\b", "ay-sink and ah-weight"),
    (r"\btry/catch\b", "try and catch"),
    (r"\bread/write\b", "read and write"),
    // Combined / qualified forms before their shorter counterparts
    (r"\bconsole\.log\b", "console log"),
    (r"\bJSON\.stringify\b", "Jay-son dot stringify"),
    (r"\bJSON\.parse\b", "Jay-son dot parse"),
    (r"\bJSON\b", "Jay-son"),
    (r"\bPromise\.all\b", "Promise dot all"),
    (r"\bPromise\.race\b", "Promise dot race"),
    (r"\bURL\b", "you are ell"),
    (r"\bnew Map\(\)", "a new map"),
    (r"\bnew Set\(\)", "a new set"),
    // Keywords
    (r"\basync\b", "ay-sink"),
    (r"\bawait\b", "ah-weight"),
    // Dot-method calls: "foo.method" becomes "foo dot method". The capture
    // keeps the preceding word character so "response.then" does not collapse.
    (r"(\w)\.then\b", "$1 dot then"),
    (r"(\w)\.catch\b", "$1 dot catch"),
    (r"(\w)\.finally\b", "$1 dot finally"),
    (r"(\w)\.forEach\b", "$1 for each"),
    (r"(\w)\.map\b", "$1 dot map"),
    (r"(\w)\.filter\b", "$1 dot filter"),
    (r"(\w)\.reduce\b", "$1 dot reduce"),
    (r"(\w)\.json\b", "$1 dot json"),
    (r"(\w)\.ok\b", "$1 dot ok"),
    (r"(\w)\.status\b", "$1 dot status"),
    (r"(\w)\.stringify\b", "$1 dot stringify"),
    (r"(\w)\.parse\b", "$1 dot parse"),
    (r"(\w)\.keys\b", "$1 dot keys"),
    (r"(\w)\.values\b", "$1 dot values"),
    (r"(\w)\.entries\b", "$1 dot entries"),
    (r"(\w)\.length\b", "$1 dot length"),
    (r"(\w)\.push\b", "$1 dot push"),
    (r"(\w)\.pop\b", "$1 dot pop"),
    (r"(\w)\.shift\b", "$1 dot shift"),
    (r"(\w)\.includes\b", "$1 dot includes"),
    (r"(\w)\.indexOf\b", "$1 dot index of"),
    (r"(\w)\.find\b", "$1 dot find"),
    (r"(\w)\.all\b", "$1 dot all"),
    // Leftovers: empty parens after method replacement, stray backticks
    (r"\(\)", ""),
    ("`", ""),
];

fn rules() -> &'static Vec<(Regex, &'static str)> {
    static RULES: OnceLock<Vec<(Regex, &'static str)>> = OnceLock::new();
    RULES.get_or_init(|| {
        RULE_TABLE
            .iter()
            .map(|(pattern, replacement)| (Regex::new(pattern).unwrap(), *replacement))
            .collect()
    })
}

fn newlines() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\n+").unwrap())
}

fn double_spaces() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r" {2,}").unwrap())
}

/// Sanitize one narration string. Returns the rewritten text and the number
/// of individual substitutions made.
pub fn sanitize_text(raw: &str) -> (String, usize) {
    let mut text = newlines().replace_all(raw, " ").trim().to_string();
    let mut count = 0;
    for (regex, replacement) in rules() {
        count += regex.find_iter(&text).count();
        text = regex.replace_all(&text, *replacement).into_owned();
    }
    let text = double_spaces().replace_all(&text, " ").trim().to_string();
    (text, count)
}

#[derive(PartialEq)]
enum State {
    Normal,
    InText,
    InCode,
}

/// Sanitize every `text:` value in a frames.md document, leaving fenced code
/// blocks untouched. Multi-line text values are flattened to a single
/// sanitized `text:` line. Returns the rewritten document and the total
/// substitution count.
pub fn sanitize_document(src: &str) -> (String, usize) {
    let mut out: Vec<String> = Vec::new();
    let mut state = State::Normal;
    let mut text_buf: Vec<String> = Vec::new();
    let mut code_marker = String::new();
    let mut substitutions = 0;

    let flush_text = |buf: &mut Vec<String>, out: &mut Vec<String>, total: &mut usize| {
        let (text, count) = sanitize_text(&buf.join("\n"));
        out.push(format!("text: {text}"));
        *total += count;
        buf.clear();
    };

    for line in src.split('\n') {
        if state == State::InCode {
            out.push(line.to_string());
            if line.trim_end() == code_marker {
                state = State::Normal;
            }
            continue;
        }

        if state == State::InText {
            let is_fence = fence_marker(line).is_some();
            let is_meta = is_meta_line(line);
            let is_separator = line.trim_end() == "---";
            let is_empty = line.trim().is_empty();

            if is_fence || is_meta || is_separator || is_empty {
                flush_text(&mut text_buf, &mut out, &mut substitutions);
                state = State::Normal;
                // fall through so the current line is handled below
            } else {
                text_buf.push(line.to_string());
                continue;
            }
        }

        if let Some(value) = line.strip_prefix("text:") {
            text_buf = vec![value.to_string()];
            state = State::InText;
            continue;
        }

        if let Some(marker) = fence_marker(line) {
            code_marker = marker;
            state = State::InCode;
        }
        out.push(line.to_string());
    }

    if state == State::InText {
        flush_text(&mut text_buf, &mut out, &mut substitutions);
    }

    (out.join("\n"), substitutions)
}

/// Leading run of three or more backticks or tildes, if any. Unlike the frame
/// parser this only inspects the prefix, matching how authored documents are
/// scanned for block boundaries.
fn fence_marker(line: &str) -> Option<String> {
    let first = line.chars().next()?;
    if first != '`' && first != '~' {
        return None;
    }
    let len = line.chars().take_while(|&c| c == first).count();
    if len < 3 {
        return None;
    }
    Some(line[..len].to_string())
}

fn is_meta_line(line: &str) -> bool {
    let Some(colon) = line.find(':') else {
        return false;
    };
    colon > 0
        && line[..colon]
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_')
}
