//! Opaque-id route resolution core for a link-aggregation platform.

pub mod config;
pub mod http;
pub mod ident;
pub mod lifecycle;
pub mod observability;
pub mod routing;
pub mod store;

pub use config::AppConfig;
pub use http::HttpServer;
pub use ident::HashidCodec;
pub use lifecycle::Shutdown;
pub use routing::{EntityKind, RouteBinder};
