//! X-Plane 12 web API integration.
//!
//! Dataref ids are resolved over REST, then values stream over a WebSocket
//! subscription on the same port.

pub mod decode;
pub mod dto;
pub mod resolver;
pub mod session;

pub use resolver::DatarefResolver;
pub use session::{SessionConfig, SessionPhase, XPlaneSession, XPlaneSessionFactory};
