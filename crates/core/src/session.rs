/// The most recent leaf command run, kept for display across redraws.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LastRun {
    pub display_name: String,
    pub truncated_output: String,
}

/// In-memory record of the last execution. Nothing is persisted.
///
/// Owned by the menu dispatcher and only touched from its thread; anything
/// that adds concurrency must put it behind a lock.
#[derive(Debug, Default)]
pub struct SessionState {
    last: Option<LastRun>,
}

impl SessionState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrites the previous record.
    pub fn record(&mut self, display_name: impl Into<String>, truncated_output: impl Into<String>) {
        self.last = Some(LastRun {
            display_name: display_name.into(),
            truncated_output: truncated_output.into(),
        });
    }

    #[must_use]
    pub fn current(&self) -> Option<&LastRun> {
        self.last.as_ref()
    }
}
