//! Reads `sync.modgraph` and `*.modgraph` files (spec §6).
//!
//! The grammar is deliberately minimal: trimmed non-empty lines, a `states`
//! section, a `transitions` section, and parenthesized comma-separated
//! transition triples. This mirrors the original `dd-net-checker` Python
//! tool's `read_actions`/`read_model` reading exactly, down to stripping a
//! leading `(` and trailing `)` before splitting the triple on commas,
//! except that malformed input here returns a `Result` instead of exiting
//! the process.

use std::fs;
use std::path::Path;

use crate::error::ParseError;

/// Reads the ordered, one-per-line action alphabet from a `sync.modgraph`
/// file.
pub fn read_sync_file(path: &Path) -> Result<Vec<String>, ParseError> {
    let text = fs::read_to_string(path).map_err(|source| ParseError::Io {
        path: path.display().to_string(),
        source,
    })?;
    Ok(non_empty_trimmed_lines(&text))
}

/// The raw, name-unresolved contents of one `*.modgraph` file.
#[derive(Debug, Clone)]
pub struct RawModel {
    pub states: Vec<String>,
    pub transitions: Vec<(String, String, String)>,
}

/// Reads one `*.modgraph` file: a `states` section naming every state (the
/// first is the initial state), followed by a `transitions` section of
/// `(src,label,dst)` triples.
pub fn read_model_file(path: &Path) -> Result<RawModel, ParseError> {
    let text = fs::read_to_string(path).map_err(|source| ParseError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let path_str = path.display().to_string();
    let lines = non_empty_trimmed_lines(&text);

    if lines.first().map(String::as_str) != Some("states") {
        return Err(ParseError::MissingStatesHeader { path: path_str });
    }

    let transitions_at = lines
        .iter()
        .position(|line| line == "transitions")
        .ok_or_else(|| ParseError::MissingTransitionsHeader {
            path: path_str.clone(),
        })?;

    let states: Vec<String> = lines[1..transitions_at].to_vec();
    if states.is_empty() {
        return Err(ParseError::EmptyStateList { path: path_str });
    }

    let transitions = lines[transitions_at + 1..]
        .iter()
        .map(|line| parse_transition_line(line, &path_str))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(RawModel { states, transitions })
}

fn non_empty_trimmed_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect()
}

fn parse_transition_line(line: &str, path: &str) -> Result<(String, String, String), ParseError> {
    let malformed = || ParseError::MalformedTransition {
        path: path.to_string(),
        line: line.to_string(),
    };

    let inner = line
        .strip_prefix('(')
        .and_then(|rest| rest.strip_suffix(')'))
        .ok_or_else(malformed)?;

    let fields: Vec<&str> = inner.split(',').map(str::trim).collect();
    match fields.as_slice() {
        [src, label, dst] if !src.is_empty() && !label.is_empty() && !dst.is_empty() => {
            Ok((src.to_string(), label.to_string(), dst.to_string()))
        }
        _ => Err(malformed()),
    }
}
