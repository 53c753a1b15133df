//! # Embedlink Host
//!
//! Host-page controller for embedding the Embedlink chat widget.
//!
//! The crate provides:
//!
//! * [`HostController`] — the messaging state machine mediating between
//!   user-entered credentials, the token exchange service, and the
//!   embedded widget.
//! * [`WidgetTransport`] — the seam over the window-messaging boundary
//!   (an iframe's `postMessage` in a browser shell).
//! * [`TokenSource`] / [`HttpTokenSource`] — token acquisition against
//!   the token exchange service.
//! * [`HostError`] — unified error type for all host operations.
//!
//! # Quick start
//!
//! ```rust,no_run
//! use embedlink_host::{HostConfig, HostController, HttpTokenSource};
//! use embedlink_models::{Credentials, Role};
//!
//! # async fn run(transport: Box<dyn embedlink_host::WidgetTransport>) {
//! let config = HostConfig::new(
//!     "https://widget.example.com/embed",
//!     "http://localhost:3000",
//!     vec!["widget.example.com".to_string()],
//! );
//! let tokens = Box::new(HttpTokenSource::new(config.token_service_url.clone()));
//! let mut controller = HostController::new(config, transport, tokens);
//!
//! controller.set_credentials(Credentials::new("a@b.com", "A", Role::User));
//! controller.request_token().await;
//! # }
//! ```

pub mod config;
pub mod controller;
pub mod error;
pub mod origin;
pub mod token;
pub mod transport;

pub use config::HostConfig;
pub use controller::HostController;
pub use error::HostError;
pub use origin::{origin_of, OriginAllowList, WILDCARD_ORIGIN};
pub use token::{HttpTokenSource, TokenGrant, TokenSource};
pub use transport::{WidgetTransport, WindowFrame};
