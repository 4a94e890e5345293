mod customer_client;

pub use customer_client::{CustomerDirectory, HttpCustomerDirectory};
