//! Compressed-size reporting toggle.

/// Decides whether the bundler computes compressed sizes for its build report.
///
/// Computing them means compressing every emitted chunk a second time, which
/// is slow on large outputs. Off unless the project opts in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CompressionReporter {
    enabled: bool,
}

impl CompressionReporter {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Human-readable state for build summaries.
    pub fn describe(&self) -> &'static str {
        if self.enabled {
            "compressed sizes reported"
        } else {
            "compressed size reporting skipped"
        }
    }
}
