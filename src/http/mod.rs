//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware, one route per placeholder)
//!     → request.rs (request ID generation & propagation)
//!     → routing layer resolves each placeholder
//!     → response.rs (public JSON view of the resolved entity)
//!     → Send to client
//! ```

pub mod request;
pub mod response;
pub mod server;

pub use request::{MakeRequestUuid, X_REQUEST_ID};
pub use response::EntityView;
pub use server::HttpServer;
