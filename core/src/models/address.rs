// core/src/models/address.rs

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Shipping and billing contact as entered on the checkout form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct CustomerAddress {
  #[validate(length(min = 2, message = "Name must be at least 2 characters."))]
  pub name: String,
  #[validate(length(min = 10, message = "Please enter a valid phone number."))]
  pub phone: String,
  #[validate(email(message = "Please enter a valid email address."))]
  pub email: String,
  #[validate(length(min = 5, message = "Address is too short."))]
  pub address: String,
  #[validate(length(min = 2, message = "City is too short."))]
  pub city: String,
  #[validate(length(min = 6, message = "Please enter a valid pincode."))]
  pub pincode: String,
}

/// Billing details forwarded to the processor on card confirmation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillingDetails {
  pub name: String,
  pub email: String,
  pub phone: String,
  pub line1: String,
  pub city: String,
  pub postal_code: String,
}

impl From<&CustomerAddress> for BillingDetails {
  fn from(address: &CustomerAddress) -> Self {
    Self {
      name: address.name.clone(),
      email: address.email.clone(),
      phone: address.phone.clone(),
      line1: address.address.clone(),
      city: address.city.clone(),
      postal_code: address.pincode.clone(),
    }
  }
}
