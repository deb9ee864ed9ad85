//! apigw: API gateway endpoint management
//!
//! Command surface for creating, inspecting, and removing gateway APIs whose operations
//! invoke platform actions. Endpoints come from positional arguments or from an uploaded
//! swagger document and are sent to the platform's route-management service.

pub mod cli;
pub mod config;
pub mod endpoint;
pub mod error;
pub mod gateway;
pub mod listing;
pub mod logging;
