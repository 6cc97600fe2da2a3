//! Handler modules for Lambda function

pub mod customers;

// Re-export handler functions for convenience
pub use customers::handle_update_customer;
