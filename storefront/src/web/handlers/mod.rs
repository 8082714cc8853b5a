// storefront/src/web/handlers/mod.rs

pub mod checkout_handlers;
