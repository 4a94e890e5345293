//! Product catalog.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | POST | `/product` | Create a product |
//! | GET | `/product/{categoryId}` | List products of a category |
//! | PUT | `/product/{id}` | Replace a product |
//! | DELETE | `/product/{id}` | Delete a product |

pub mod handlers;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;

pub use services::ProductService;
