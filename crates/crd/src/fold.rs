//! Line folding of rendered YAML
//!
//! `serde_yaml` writes every plain scalar on a single line. This pass breaks
//! over-wide plain scalars at single spaces into multi-line plain scalars, which
//! YAML reads back as the same string. Quoted scalars, block scalars and keys are
//! left alone, as is any word that is longer than the available width on its own.

/// Fold the over-wide plain scalar values of `rendered` to at most `width` columns.
pub fn fold(rendered: &str, width: usize) -> String {
    let mut out = String::with_capacity(rendered.len());
    // Column of the node owning the block scalar currently being copied
    let mut block_parent: Option<usize> = None;

    for line in rendered.lines() {
        let indent = line.len() - line.trim_start_matches(' ').len();

        if let Some(parent) = block_parent {
            if line.trim().is_empty() || indent > parent {
                push_line(&mut out, line);
                continue;
            }
            block_parent = None;
        }

        let Some(entry) = ScalarLine::parse(line, indent) else {
            push_line(&mut out, line);
            continue;
        };

        let value = &line[entry.value_start..];
        if value.starts_with(['|', '>']) {
            block_parent = Some(entry.parent_column);
            push_line(&mut out, line);
        } else if line.chars().count() > width && is_plain(value) {
            fold_line(&mut out, line, &entry, width);
        } else {
            push_line(&mut out, line);
        }
    }

    out
}

/// A rendered line ending in a scalar value, `key: value` or `- value`
struct ScalarLine {
    /// Column of the key or sequence dash the value belongs to
    parent_column: usize,

    /// Byte offset of the value within the line
    value_start: usize,

    /// Indentation for continuation lines of the value
    continuation: usize,
}

impl ScalarLine {
    fn parse(line: &str, indent: usize) -> Option<Self> {
        let mut pos = indent;
        let mut dash = None;
        while line[pos..].starts_with("- ") {
            dash = Some(pos);
            pos += 2;
        }

        let rest = &line[pos..];
        if rest.is_empty() || rest.starts_with(['\'', '"', '?', '[', '{']) {
            return None;
        }

        match rest.find(": ") {
            Some(offset) => Some(Self {
                parent_column: pos,
                value_start: pos + offset + 2,
                continuation: pos + 2,
            }),
            None => dash.map(|dash| Self {
                parent_column: dash,
                value_start: pos,
                continuation: pos,
            }),
        }
    }
}

/// Whether `value` is written as a plain (unquoted, single-line) scalar
fn is_plain(value: &str) -> bool {
    !value.is_empty()
        && !value.starts_with([
            '\'', '"', '|', '>', '&', '*', '!', '%', '@', '`', '{', '[', '#', '?', ':', ',',
        ])
        && !value.starts_with("- ")
}

fn fold_line(out: &mut String, line: &str, entry: &ScalarLine, width: usize) {
    let prefix = &line[..entry.value_start];
    out.push_str(prefix);

    let mut column = prefix.chars().count();
    let mut rest = &line[entry.value_start..];
    loop {
        let available = width.saturating_sub(column);
        if rest.chars().count() <= available {
            break;
        }
        let Some(at) = break_point(rest, available) else {
            break;
        };

        out.push_str(&rest[..at]);
        out.push('\n');
        out.extend(std::iter::repeat(' ').take(entry.continuation));
        column = entry.continuation;
        rest = &rest[at + 1..];
    }

    push_line(out, rest);
}

/// Byte offset of the space to break `text` at.
///
/// Picks the last space that keeps the head within `available` columns, or the
/// first usable space when the leading word alone is too wide. Only single spaces
/// between two words qualify, so folding the line back yields the same text.
fn break_point(text: &str, available: usize) -> Option<usize> {
    let chars: Vec<(usize, char)> = text.char_indices().collect();
    let mut first = None;
    let mut last_fit = None;

    for i in 1..chars.len().saturating_sub(1) {
        let (offset, ch) = chars[i];
        if ch != ' ' || chars[i - 1].1 == ' ' || chars[i + 1].1 == ' ' {
            continue;
        }
        // A continuation line must not read as a comment or an indicator
        if matches!(chars[i + 1].1, '#' | '-' | '?' | ':') {
            continue;
        }

        if first.is_none() {
            first = Some(offset);
        }
        if i <= available {
            last_fit = Some(offset);
        } else {
            break;
        }
    }

    last_fit.or(first)
}

fn push_line(out: &mut String, line: &str) {
    out.push_str(line);
    out.push('\n');
}
