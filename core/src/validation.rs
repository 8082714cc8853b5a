// core/src/validation.rs

//! Client-side checks run before a checkout submission touches the network.

use crate::error::{CheckoutError, FieldError, Result};
use crate::models::{CustomerAddress, PaymentMethod};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Field order of the address form; field errors are reported in this order.
const ADDRESS_FIELDS: [&str; 6] = ["name", "email", "phone", "address", "city", "pincode"];

/// The values entered on the checkout form.
///
/// `payment_method` stays a raw string here because it comes straight from
/// the form; it becomes a `PaymentMethod` only once validated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutForm {
  pub address: CustomerAddress,
  pub payment_method: String,
}

impl CheckoutForm {
  pub fn new(address: CustomerAddress, payment_method: PaymentMethod) -> Self {
    Self {
      address,
      payment_method: payment_method.as_str().to_string(),
    }
  }

  /// Validates every field and returns the chosen payment method.
  ///
  /// All failing fields are reported at once, as `address.<field>` or
  /// `paymentMethod`.
  pub fn validate(&self) -> Result<PaymentMethod> {
    let mut errors = address_errors(&self.address);

    let method = match self.payment_method.parse::<PaymentMethod>() {
      Ok(method) => Some(method),
      Err(e) => {
        errors.push(FieldError::new("paymentMethod", e.to_string()));
        None
      }
    };

    match method {
      Some(method) if errors.is_empty() => Ok(method),
      _ => Err(CheckoutError::Validation(errors)),
    }
  }
}

fn address_errors(address: &CustomerAddress) -> Vec<FieldError> {
  let validation_errors = match address.validate() {
    Ok(()) => return Vec::new(),
    Err(e) => e,
  };

  let mut errors: Vec<(usize, FieldError)> = validation_errors
    .field_errors()
    .into_iter()
    .flat_map(|(field, field_errors)| {
      let field = field.to_string();
      let position = ADDRESS_FIELDS
        .iter()
        .position(|known| *known == field)
        .unwrap_or(ADDRESS_FIELDS.len());
      field_errors.iter().map(move |err| {
        let message = err
          .message
          .as_ref()
          .map(|m| m.to_string())
          .unwrap_or_else(|| err.code.to_string());
        (position, FieldError::new(format!("address.{}", field), message))
      })
    })
    .collect();

  errors.sort_by_key(|(position, _)| *position);
  errors.into_iter().map(|(_, error)| error).collect()
}
