//! Serializable read models for API/UI consumers.
//!
//! # Responsibility
//! - Render a list and its items as plain serde records.
//! - Accept item writes through the same validation as the service layer.
//!
//! # See also
//! - `service::list_service` for the validation and persistence contract.

pub mod list_view;
