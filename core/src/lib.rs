// core/src/lib.rs

//! Checkout core: the payment-intent orchestration behind a storefront
//! checkout.
//!
//! The flow is split across a security boundary:
//!  - The **Intent Issuer** (`issuer`) runs server side with the processor's
//!    secret credential and turns a payment request into a client secret.
//!  - The **Checkout Orchestrator** (`orchestrator`) runs client side. It
//!    validates the form, prices the cart, obtains a client secret from the
//!    issuer and confirms the card payment directly with the processor.
//!
//! Everything that talks to the network sits behind the traits in
//! `collaborators`, so the flow can be driven against Stripe, a mock
//! processor or test doubles alike.

pub mod collaborators;
pub mod error;
pub mod issuer;
pub mod models;
pub mod money;
pub mod orchestrator;
pub mod orders;
pub mod pipeline;
pub mod validation;

pub use crate::collaborators::{CardConfirmer, IntentIssuerClient, Navigator, Notifier, PaymentProcessor};
pub use crate::error::{CheckoutError, ErrorKind, FieldError, PipelineError, Result};
pub use crate::issuer::{IntentIssuer, IntentRequest, IssuedIntent};
pub use crate::models::{
  BillingDetails, CardInput, CartItem, CartStore, ConfirmationResult, CustomerAddress, Order, PaymentIntent,
  PaymentMethod, PaymentRequest, PaymentStatus,
};
pub use crate::orchestrator::{
  CheckoutDeps, CheckoutOrchestrator, CheckoutOutcome, CheckoutState, OrchestratorConfig,
};
pub use crate::orders::{InMemoryOrderStore, OrderHistory, OrderStore};
pub use crate::pipeline::{ContextData, Pipeline, PipelineControl, PipelineResult};
pub use crate::validation::CheckoutForm;
