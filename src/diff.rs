//! Word-level diff engine and rendering.
//!
//! The edit script is the single source of truth for a comparison: the
//! rendered text, the change ratio, and the severity are all derived from it.

use serde::{Deserialize, Serialize};

use crate::constants::diff::{ADDED_MARKER, NO_DIFFERENCES, REMOVED_MARKER};
use crate::types::Word;

/// Per-token diff operation tag.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EditTag {
    /// Token present in both descriptions at aligned positions.
    Unchanged,
    /// Token present only in the source description.
    Removed,
    /// Token present only in the target description.
    Added,
}

/// One entry of an edit script.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditOp {
    /// Operation tag for this token.
    pub tag: EditTag,
    /// The token itself, exactly as it appeared in its description.
    pub word: Word,
}

impl EditOp {
    /// Build an op from a tag and borrowed token.
    pub fn new(tag: EditTag, word: &str) -> Self {
        Self {
            tag,
            word: word.to_string(),
        }
    }
}

/// Compute the word-level edit script between two token sequences.
///
/// Alignment maximizes the number of matched tokens (longest common
/// subsequence) under exact, case-sensitive equality. The walk is
/// deterministic: when both directions preserve the LCS length, the source
/// token is consumed first, so removals precede additions at every
/// divergence point and repeated runs produce identical scripts.
pub fn word_diff(source: &[&str], target: &[&str]) -> Vec<EditOp> {
    let n = source.len();
    let m = target.len();

    if n == 0 {
        return target
            .iter()
            .map(|word| EditOp::new(EditTag::Added, word))
            .collect();
    }
    if m == 0 {
        return source
            .iter()
            .map(|word| EditOp::new(EditTag::Removed, word))
            .collect();
    }

    // lcs[i][j] holds the LCS length of source[i..] and target[j..].
    let mut lcs = vec![vec![0usize; m + 1]; n + 1];
    for i in (0..n).rev() {
        for j in (0..m).rev() {
            lcs[i][j] = if source[i] == target[j] {
                lcs[i + 1][j + 1] + 1
            } else {
                lcs[i + 1][j].max(lcs[i][j + 1])
            };
        }
    }

    let mut script = Vec::with_capacity(n + m);
    let (mut i, mut j) = (0, 0);
    while i < n && j < m {
        if source[i] == target[j] {
            script.push(EditOp::new(EditTag::Unchanged, source[i]));
            i += 1;
            j += 1;
        } else if lcs[i + 1][j] >= lcs[i][j + 1] {
            script.push(EditOp::new(EditTag::Removed, source[i]));
            i += 1;
        } else {
            script.push(EditOp::new(EditTag::Added, target[j]));
            j += 1;
        }
    }
    while i < n {
        script.push(EditOp::new(EditTag::Removed, source[i]));
        i += 1;
    }
    while j < m {
        script.push(EditOp::new(EditTag::Added, target[j]));
        j += 1;
    }
    script
}

/// Render an edit script as human-readable change text.
///
/// Removed and added tokens are listed in script order with their markers;
/// unchanged tokens are omitted. An empty rendering becomes the literal
/// placeholder so legacy rows and fresh no-change rows read the same.
pub fn render_diff(script: &[EditOp]) -> String {
    let lines: Vec<String> = script
        .iter()
        .filter_map(|op| match op.tag {
            EditTag::Removed => Some(format!("{}{REMOVED_MARKER}", op.word)),
            EditTag::Added => Some(format!("{}{ADDED_MARKER}", op.word)),
            EditTag::Unchanged => None,
        })
        .collect();
    if lines.is_empty() {
        NO_DIFFERENCES.to_string()
    } else {
        lines.join("\n")
    }
}
