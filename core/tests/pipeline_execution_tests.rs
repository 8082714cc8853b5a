// tests/pipeline_execution_tests.rs
mod common;

use checkout_core::pipeline::SkipCondition;
use checkout_core::{CheckoutError, ContextData, ErrorKind, Pipeline, PipelineControl, PipelineResult};
use common::setup_tracing;
use serial_test::serial;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

#[derive(Debug, Default)]
struct Trace {
  visited: Vec<String>,
  offline: bool,
}

type StepFuture = Pin<Box<dyn Future<Output = Result<PipelineControl, CheckoutError>> + Send>>;

fn visit(name: &'static str) -> impl Fn(ContextData<Trace>) -> StepFuture + Send + Sync + 'static {
  move |ctx: ContextData<Trace>| -> StepFuture {
    Box::pin(async move {
      ctx.write().visited.push(name.to_string());
      Ok(PipelineControl::Continue)
    })
  }
}

#[tokio::test]
#[serial]
async fn steps_run_in_declared_order() {
  setup_tracing();
  let mut pipeline = Pipeline::<Trace, CheckoutError>::new(&[("a", false, None), ("b", false, None), ("c", false, None)]);
  pipeline.on_step("c", visit("c"));
  pipeline.on_step("a", visit("a"));
  pipeline.on_step("b", visit("b"));

  let ctx = ContextData::new(Trace::default());
  let result = pipeline.run(ctx.clone()).await.unwrap();

  assert_eq!(result, PipelineResult::Completed);
  assert_eq!(ctx.read().visited, vec!["a", "b", "c"]);
  assert_eq!(pipeline.step_names(), vec!["a", "b", "c"]);
}

#[tokio::test]
#[serial]
async fn skip_condition_branches_between_steps() {
  setup_tracing();
  let when_offline: SkipCondition<Trace> = Arc::new(|ctx: ContextData<Trace>| ctx.read().offline);
  let unless_offline: SkipCondition<Trace> = Arc::new(|ctx: ContextData<Trace>| !ctx.read().offline);
  let mut pipeline = Pipeline::<Trace, CheckoutError>::new(&[
    ("charge_card", false, Some(when_offline)),
    ("assign_id", false, Some(unless_offline)),
    ("finish", false, None),
  ]);
  pipeline.on_step("charge_card", visit("charge_card"));
  pipeline.on_step("assign_id", visit("assign_id"));
  pipeline.on_step("finish", visit("finish"));

  let card_ctx = ContextData::new(Trace::default());
  pipeline.run(card_ctx.clone()).await.unwrap();
  assert_eq!(card_ctx.read().visited, vec!["charge_card", "finish"]);

  let offline_ctx = ContextData::new(Trace {
    offline: true,
    ..Trace::default()
  });
  pipeline.run(offline_ctx.clone()).await.unwrap();
  assert_eq!(offline_ctx.read().visited, vec!["assign_id", "finish"]);
}

#[tokio::test]
#[serial]
async fn first_error_aborts_the_run() {
  setup_tracing();
  let mut pipeline =
    Pipeline::<Trace, CheckoutError>::new(&[("ok", false, None), ("declines", false, None), ("after", false, None)]);
  pipeline.on_step("ok", visit("ok"));
  pipeline.on_step("declines", |_ctx: ContextData<Trace>| async {
    Err::<PipelineControl, _>(CheckoutError::Confirmation("Your card was declined.".to_string()))
  });
  pipeline.on_step("after", visit("after"));

  let ctx = ContextData::new(Trace::default());
  let err = pipeline.run(ctx.clone()).await.unwrap_err();

  assert_eq!(err.kind(), ErrorKind::Confirmation);
  assert_eq!(err.to_string(), "Your card was declined.");
  assert_eq!(ctx.read().visited, vec!["ok"]);
}

#[tokio::test]
#[serial]
async fn stop_control_halts_without_error() {
  setup_tracing();
  let mut pipeline = Pipeline::<Trace, CheckoutError>::new(&[("halt", false, None), ("after", false, None)]);
  pipeline.on_step("halt", |_ctx: ContextData<Trace>| async { Ok::<_, CheckoutError>(PipelineControl::Stop) });
  pipeline.on_step("after", visit("after"));

  let ctx = ContextData::new(Trace::default());
  assert_eq!(pipeline.run(ctx.clone()).await.unwrap(), PipelineResult::Stopped);
  assert!(ctx.read().visited.is_empty());
}

#[tokio::test]
#[serial]
async fn missing_handler_fails_required_steps_but_not_optional_ones() {
  setup_tracing();
  let mut optional = Pipeline::<Trace, CheckoutError>::new(&[("record", true, None), ("finish", false, None)]);
  optional.on_step("finish", visit("finish"));
  let ctx = ContextData::new(Trace::default());
  assert_eq!(optional.run(ctx.clone()).await.unwrap(), PipelineResult::Completed);
  assert_eq!(ctx.read().visited, vec!["finish"]);

  let required = Pipeline::<Trace, CheckoutError>::new(&[("record", false, None)]);
  let err = required.run(ContextData::new(Trace::default())).await.unwrap_err();
  assert_eq!(err.kind(), ErrorKind::Internal);
  assert!(err.to_string().contains("record"));
}

#[tokio::test]
#[serial]
async fn skip_condition_can_be_replaced_after_construction() {
  setup_tracing();
  let mut pipeline = Pipeline::<Trace, CheckoutError>::new(&[("a", false, None), ("b", false, None)]);
  pipeline.on_step("a", visit("a"));
  pipeline.on_step("b", visit("b"));
  let always: SkipCondition<Trace> = Arc::new(|_ctx: ContextData<Trace>| true);
  pipeline.set_skip_condition("a", Some(always));

  let ctx = ContextData::new(Trace::default());
  pipeline.run(ctx.clone()).await.unwrap();
  assert_eq!(ctx.read().visited, vec!["b"]);
}

#[test]
#[should_panic(expected = "not declared")]
fn registering_an_undeclared_step_panics() {
  let mut pipeline = Pipeline::<Trace, CheckoutError>::new(&[("a", false, None)]);
  pipeline.on_step("z", visit("z"));
}
