//! The trail of external commands a discovery run issued.

use std::fmt;

/// The literal command line handed to an external tool.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CommandRecord(String);

impl CommandRecord {
    pub fn new(command: impl Into<String>) -> Self {
        Self(command.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CommandRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Append-only, issue-ordered log of [`CommandRecord`]s.
///
/// Records are kept whether or not the command succeeded. There is no
/// deduplication and no size bound.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandAuditLog {
    records: Vec<CommandRecord>,
}

impl CommandAuditLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, record: CommandRecord) {
        self.records.push(record);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CommandRecord> {
        self.records.iter()
    }

    /// Newline-joined command lines, in issue order.
    pub fn to_artifact(&self) -> String {
        crate::lines_artifact(&self.records)
    }
}

impl Extend<CommandRecord> for CommandAuditLog {
    fn extend<I: IntoIterator<Item = CommandRecord>>(&mut self, iter: I) {
        self.records.extend(iter);
    }
}
