//! Bushtalk Radio flight tracking service integration.

pub mod client;
pub mod dto;

pub use client::{BushtalkClient, CLIENT_NAME, CLIENT_VERSION};
pub use dto::{AuthResponse, TrackPayload};
