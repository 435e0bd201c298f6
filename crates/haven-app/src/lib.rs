//! Application layer for the Haven credential vault client: collaborator
//! traits and their HTTP implementations, the session and vault stores,
//! the screen state machine, and the top-level controller.

pub mod api;
pub mod api_client;
pub mod config;
pub mod controller;
pub mod loading;
pub mod mailer;
pub mod nav;
pub mod notify;
pub mod reauth;
pub mod secure_storage;
pub mod session;
pub mod vault;
