//! # Board Shared
//!
//! Request/response types shared by the API surface, including the explicit
//! public projections that keep the password hash out of every read path.

pub mod dto;
pub mod response;

pub use response::ErrorResponse;
