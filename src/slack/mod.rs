pub mod action_point;
pub mod client;
pub mod commands;
pub mod events;
pub mod guard;
pub mod oauth;
pub mod payloads;
pub mod server;
pub mod service;
pub mod state;

pub use server::*;
