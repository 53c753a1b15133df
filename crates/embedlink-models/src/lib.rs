#![deny(missing_docs)]

//! # Embedlink Models
//!
//! Core data types for the Embedlink widget-embedding protocol.
//!
//! ## Message flow
//!
//! ```text
//! Host page                              Embedded widget (iframe)
//! ─────────                              ────────────────────────
//!           ◄── WidgetEvent::Ready            {"type":"EMBED_READY"}
//! HostAck ──►                                 {"type":"ack","receivedType":"EMBED_READY"}
//! Command ──►                                 {"action":"login","data":{"token":…}}
//!           ◄── WidgetEvent::LoginStatus      {"type":"embed-login","action":…,"status":…}
//! ```
//!
//! ## Module layout
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`command`] | Host → widget commands (`login`, `logout`) and the ready ack |
//! | [`event`] | Widget → host events (`EMBED_READY`, `embed-login` status reports) |
//! | [`inbound`] | Loosely-shaped inbound frames and canonical-tag normalization |
//! | [`credentials`] | User identity claims (`Credentials`, `Role`) |
//! | [`log`] | Append-only traffic log (`TrafficLog`, `LogEntry`, `Direction`) |
//! | [`error`] | Validation errors ([`ProtocolError`]) |

pub mod command;
pub mod credentials;
pub mod error;
pub mod event;
pub mod inbound;
pub mod log;

// Re-export all public types at crate root for convenience.
// Downstream crates can use `embedlink_models::Command` directly.
pub use command::*;
pub use credentials::*;
pub use error::*;
pub use event::*;
pub use inbound::*;
pub use log::*;
