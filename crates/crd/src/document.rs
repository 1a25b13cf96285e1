//! Reading and writing single-document YAML streams

use serde::Deserialize;
use serde_yaml::Value;
use std::io::{Read, Write};
use tracing::debug;

use crate::error::{PatchError, Result};
use crate::fold;

/// Rendered line width used when nothing else is configured
pub const DEFAULT_WIDTH: usize = 120;

/// Read a whole stream and parse it as exactly one YAML document.
pub fn load<R: Read>(mut reader: R) -> Result<Value> {
    let mut input = String::new();
    reader.read_to_string(&mut input)?;
    load_str(&input)
}

/// Parse `input` as exactly one YAML document.
///
/// An empty stream yields `null`.
pub fn load_str(input: &str) -> Result<Value> {
    let mut documents = Vec::new();
    for document in serde_yaml::Deserializer::from_str(input) {
        documents.push(Value::deserialize(document).map_err(PatchError::Parse)?);
    }

    match documents.len() {
        0 => Ok(Value::Null),
        1 => Ok(documents.remove(0)),
        count => Err(PatchError::MultiDocument { count }),
    }
}

/// Render `document` as YAML, folding long plain scalars to `width` columns.
///
/// `serde_yaml` writes every scalar on one line, so over-wide plain scalars are
/// broken at word boundaries afterwards. The folded text is only used when it
/// reads back as the same document. Words longer than the width on their own
/// (URLs, patterns) stay whole and are reported at debug level.
pub fn dump_string(document: &Value, width: usize) -> Result<String> {
    let rendered = serde_yaml::to_string(document).map_err(PatchError::Serialize)?;

    let folded = fold::fold(&rendered, width);
    let rendered = if folded == rendered {
        rendered
    } else if reads_back_equal(&folded, &rendered) {
        folded
    } else {
        debug!(width, "folded output does not read back unchanged, keeping unfolded lines");
        rendered
    };

    let overflowing = rendered
        .lines()
        .filter(|line| line.chars().count() > width)
        .count();
    if overflowing > 0 {
        debug!(overflowing, width, "rendered lines exceed the configured width");
    }

    Ok(rendered)
}

fn reads_back_equal(folded: &str, rendered: &str) -> bool {
    match (
        serde_yaml::from_str::<Value>(folded),
        serde_yaml::from_str::<Value>(rendered),
    ) {
        (Ok(folded), Ok(rendered)) => folded == rendered,
        _ => false,
    }
}

/// Render `document` and write it to `writer` in one go.
pub fn dump<W: Write>(document: &Value, mut writer: W, width: usize) -> Result<()> {
    let rendered = dump_string(document, width)?;
    writer.write_all(rendered.as_bytes())?;
    writer.flush()?;
    Ok(())
}
