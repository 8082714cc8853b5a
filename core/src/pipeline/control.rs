// core/src/pipeline/control.rs

//! Signals a step returns, and the outcome of a whole run.

/// Returned by a step handler to continue with the next step or halt the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineControl {
  Continue,
  /// Halt the run. No later step executes.
  Stop,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineResult {
  /// Every step that was not skipped ran and returned `Continue`.
  Completed,
  /// A step returned `PipelineControl::Stop`.
  Stopped,
}
