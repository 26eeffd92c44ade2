//! Line-change statistics for unified diffs

use serde::{Deserialize, Serialize};

/// Added and deleted line counts of a diff
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DiffStats {
    pub added: u64,
    pub deleted: u64,
}

impl DiffStats {
    pub fn new(added: u64, deleted: u64) -> Self {
        Self { added, deleted }
    }

    pub fn total(&self) -> u64 {
        self.added + self.deleted
    }
}

/// Counts added and deleted lines in unified diff text.
///
/// A line starting with `+` is added unless it starts with the `+++` file
/// header; likewise `-` and `---` for deleted lines. Context lines, hunk
/// markers and other headers are ignored. Binary-file and no-newline markers
/// get no special treatment.
pub fn diff_stats(diff: &str) -> DiffStats {
    let mut stats = DiffStats::default();

    for line in diff.lines() {
        if line.starts_with('+') && !line.starts_with("+++") {
            stats.added += 1;
        } else if line.starts_with('-') && !line.starts_with("---") {
            stats.deleted += 1;
        }
    }

    stats
}
