//! API Module
//!
//! HTTP handlers and routing for the cached item API.
//!
//! # Endpoints
//! - `GET /api/items` - List items (served through the cache)
//! - `GET /api/items/:id` - Fetch one item (served through the cache)
//! - `POST /api/items` - Create an item
//! - `PUT /api/items/:id` - Replace an item
//! - `DELETE /api/items/:id` - Delete an item
//! - `GET /stats` - Cache statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod response;
pub mod routes;

pub use handlers::*;
pub use response::{fingerprint, JsonResponse, X_CACHE};
pub use routes::create_router;
