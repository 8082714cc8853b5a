// core/src/models/mod.rs

//! Checkout data types: cart, customer address, payment wire types and orders.

pub mod address;
pub mod cart;
pub mod order;
pub mod payment;

pub use address::{BillingDetails, CustomerAddress};
pub use cart::{CartItem, CartStore};
pub use order::{Order, OrderLine, OrderPaymentStatus, OrderStatus};
pub use payment::{
  CardInput, ConfirmationResult, PaymentIntent, PaymentMethod, PaymentRequest, PaymentStatus, CARD_METHOD_TYPE,
  DEFAULT_CURRENCY,
};
