//! Axum HTTP server, routing, and middleware.
//!
//! # Responsibilities
//! - Declare the demo routes in one static table ([`routes::ROUTES`]).
//! - Build the Axum router with the fixed middleware chain.
//! - Render every raised error in one place ([`errors::handle_errors`]).

pub mod body;
pub mod errors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod routes;
pub mod state;
