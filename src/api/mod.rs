//! HTTP API.
//!
//! Exposes the journal, chart and analysis operations as JSON endpoints
//! nested under `/api/`. `api_router()` returns a `Router` that can be
//! mounted on any axum server instance.

pub mod endpoints;
pub mod error;
pub mod router;
pub mod server;
pub mod types;

pub use router::{api_router, api_router_with_ctx};
pub use server::{start_api_server, ApiServer, ApiServerSession};
pub use types::ApiContext;
