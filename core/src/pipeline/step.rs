// core/src/pipeline/step.rs

use super::ContextData;
use std::future::Future;
use std::pin::Pin;

/// Evaluated right before a step runs; `true` skips the step.
///
/// The checkout flow uses this to branch between card and offline payment
/// steps without nesting conditionals inside the handlers.
pub type SkipCondition<TData> = std::sync::Arc<dyn Fn(ContextData<TData>) -> bool + Send + Sync + 'static>;

/// A boxed asynchronous step handler.
///
/// Handlers take a clone of the run's `ContextData` and must release every
/// lock guard before awaiting.
pub type Handler<TData, Err> = Box<
  dyn Fn(ContextData<TData>) -> Pin<Box<dyn Future<Output = Result<super::PipelineControl, Err>> + Send>>
    + Send
    + Sync,
>;

#[derive(Clone)]
pub struct StepDef<T: 'static + Send + Sync> {
  pub name: String,
  /// An optional step without a handler is skipped instead of failing the run.
  pub optional: bool,
  pub skip_if: Option<SkipCondition<T>>,
}

impl<T: 'static + Send + Sync> std::fmt::Debug for StepDef<T> {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("StepDef")
      .field("name", &self.name)
      .field("optional", &self.optional)
      .field("skip_if_present", &self.skip_if.is_some())
      .finish()
  }
}
