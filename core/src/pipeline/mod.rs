// core/src/pipeline/mod.rs

//! A small step runner. The checkout flow is declared as named steps with
//! skip conditions instead of nested branches.

pub mod context_data;
pub mod control;
pub mod definition;
pub mod execution;
pub mod step;

pub use context_data::ContextData;
pub use control::{PipelineControl, PipelineResult};
pub use definition::Pipeline;
pub use step::{Handler, SkipCondition, StepDef};
