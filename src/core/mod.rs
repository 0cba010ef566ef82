//! Core modules for lockstep

pub mod api;
pub mod gateway;
pub mod render;
pub mod request;
pub mod session;
pub mod view;

pub use api::{create_router, run_server, AppState};
pub use gateway::{parse_delivery_response, Decisioning, DeliveryClient, GatewayError};
pub use request::{build_slot_request, caller_address};
pub use session::{read_tokens, visitor_cookie_name, write_tokens};
