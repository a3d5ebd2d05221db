use std::fs;
use std::path::Path;

use poem_types::Poem;

use crate::error::PoemError;

const TITLE_PREFIX: &str = "title:";
const DATE_PREFIX: &str = "date:";

/// Read and parse one poem file.
pub fn parse_poem(path: &Path) -> Result<Poem, PoemError> {
    let bytes = fs::read(path).map_err(|source| PoemError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let content = String::from_utf8(bytes).map_err(|source| PoemError::Decode {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(parse_poem_text(&content))
}

// ── Poem file format ───────────────────────────────────────────────
//
//   title: 靜夜思
//   date: 726
//
//   床前明月光，
//   疑是地上霜。
//
// Header lines come first, then one blank line, then the body verbatim.
// The first blank line that has something after it ends the header, even
// one appearing before any header line. Without such a line the body is the
// whole file, header lines included.

/// Parse the text of a poem file.
pub fn parse_poem_text(content: &str) -> Poem {
    let content = normalize_newlines(content);
    let lines: Vec<&str> = content.split('\n').collect();

    let mut title = "";
    let mut date = "";
    let mut body_start = 0;

    for (i, line) in lines.iter().enumerate() {
        if let Some(rest) = line.strip_prefix(TITLE_PREFIX) {
            title = rest.trim();
        } else if let Some(rest) = line.strip_prefix(DATE_PREFIX) {
            date = rest.trim();
        } else if line.trim().is_empty() && i + 1 < lines.len() {
            body_start = i + 1;
            break;
        }
    }

    Poem {
        title: title.to_string(),
        date: date.to_string(),
        content: lines[body_start..].join("\n"),
    }
}

/// Fold `\r\n` and lone `\r` into `\n`.
fn normalize_newlines(s: &str) -> String {
    if s.contains('\r') {
        s.replace("\r\n", "\n").replace('\r', "\n")
    } else {
        s.to_string()
    }
}
