//! HTTP API for the HR workflow engine.
//!
//! Exposes the identity, leave, attendance, payroll and performance
//! operations over REST. The actor context arrives via trusted headers;
//! token issuance belongs to the surrounding platform.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use response::ApiError;
pub use state::AppState;
