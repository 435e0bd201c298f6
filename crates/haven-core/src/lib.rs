//! Domain layer for the Haven credential vault client: client-side models,
//! wire types for the user and vault services, the error taxonomy, and
//! platform icon resolution.

pub mod api;
pub mod error;
pub mod icons;
pub mod models;
