//! The host-page messaging state machine.
//!
//! [`HostController`] mediates between user-entered credentials, the
//! token exchange service, and the embedded widget, entirely through
//! asynchronous message passing.  It shares no memory with the widget;
//! every frame crosses the boundary serialized.
//!
//! # Failure semantics
//!
//! No public operation returns an error or panics.  Malformed frames,
//! transport failures and token-exchange failures are caught, recorded
//! in the traffic log, and the controller keeps accepting frames: the
//! host page must never crash because of the widget.

use std::str::FromStr;

use embedlink_models::{
    Command, Credentials, Direction, HostAck, Inbound, LoginAction, Tag, TrafficLog,
};
use serde_json::Value;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::config::HostConfig;
use crate::error::HostError;
use crate::origin::{OriginAllowList, WILDCARD_ORIGIN};
use crate::token::TokenSource;
use crate::transport::{WidgetTransport, WindowFrame};

/// The messaging state machine owning one embedded widget.
///
/// Constructed once per page load.  All state is instance state; there
/// are no process-wide globals.
pub struct HostController {
    config: HostConfig,
    transport: Box<dyn WidgetTransport>,
    tokens: Box<dyn TokenSource>,
    allow: OriginAllowList,
    credentials: Option<Credentials>,
    authenticated: bool,
    widget_ready: bool,
    loading: bool,
    /// Captured lazily from the first received frame.
    iframe_origin: Option<String>,
    log: TrafficLog,
}

impl HostController {
    /// Create a controller over the given transport and token source.
    pub fn new(
        config: HostConfig,
        transport: Box<dyn WidgetTransport>,
        tokens: Box<dyn TokenSource>,
    ) -> Self {
        let allow = OriginAllowList::new(config.allowed_origins.clone());
        Self {
            config,
            transport,
            tokens,
            allow,
            credentials: None,
            authenticated: false,
            widget_ready: false,
            loading: false,
            iframe_origin: None,
            log: TrafficLog::new(),
        }
    }

    // ------------------------------------------------------------------
    // Incoming frames
    // ------------------------------------------------------------------

    /// Handle one frame received from the window boundary.
    ///
    /// The payload may be a JSON string or a native object.  Malformed
    /// payloads are recorded as a parse error and dropped.  `EMBED_READY`
    /// is acknowledged before the origin allow-list runs (the reference
    /// behavior; see DESIGN.md), then frames from untrusted origins are
    /// dropped without being interpreted as protocol data.
    pub async fn handle_frame(&mut self, origin: &str, payload: &Value) {
        let inbound = match Inbound::from_value(payload) {
            Ok(inbound) => inbound,
            Err(e) => {
                warn!(error = %e, "Parse error");
                self.log.record(Direction::Error, format!("Parse error: {e}"));
                return;
            }
        };
        self.log.record(Direction::Received, payload.to_string());

        // Origin captured lazily from the first received frame; later
        // sends are pinned to it.
        if self.iframe_origin.is_none() {
            self.iframe_origin = Some(origin.to_string());
        }

        let tag = inbound.canonical_tag();

        if tag == Tag::EmbedReady {
            self.widget_ready = true;
            self.send_ack();
        }

        if !self.allow.is_trusted(origin) {
            // Cross-origin noise: dropped silently, not an error.
            debug!(%origin, "dropping frame from untrusted origin");
            return;
        }

        self.dispatch(tag, &inbound).await;
    }

    /// Route a normalized frame on its canonical discriminant.
    ///
    /// Unrecognized discriminants are a deliberate no-op: newer widget
    /// builds may emit frame kinds this controller does not know yet.
    async fn dispatch(&mut self, tag: Tag, inbound: &Inbound) {
        match tag {
            // Acked in handle_frame.
            Tag::EmbedReady => {}
            Tag::AuthRequest => {
                info!("widget requested authentication");
                self.request_token().await;
            }
            Tag::AuthSuccess => {
                self.authenticated = true;
                self.loading = false;
            }
            Tag::AuthFailure => {
                let reason = inbound.error_detail().unwrap_or("unknown");
                warn!(%reason, "widget reported auth failure");
                self.log
                    .record(Direction::Error, format!("Auth failure: {reason}"));
                self.loading = false;
            }
            Tag::Ready => {
                self.loading = false;
            }
            Tag::Success => {
                self.loading = false;
                let action = inbound
                    .action
                    .as_deref()
                    .and_then(|a| LoginAction::from_str(a).ok());
                match action {
                    Some(LoginAction::Login) => self.authenticated = true,
                    Some(LoginAction::Logout) => self.authenticated = false,
                    None => {}
                }
                info!(action = ?inbound.action, "widget reported success");
            }
            Tag::Error => {
                let detail = inbound.error_detail().unwrap_or("unknown error");
                warn!(%detail, "widget reported error");
                self.log.record(Direction::Error, detail.to_string());
                self.loading = false;
            }
            Tag::Other(_) => {}
        }
    }

    // ------------------------------------------------------------------
    // Token acquisition
    // ------------------------------------------------------------------

    /// Exchange the current credentials for a token and forward it to
    /// the widget as a `login` command.
    ///
    /// Exactly one exchange attempt per call, no retry.  On failure the
    /// error is recorded and `authenticated` is left unchanged.  The
    /// widget should have signaled `EMBED_READY` first; this ordering is
    /// not enforced here and callers must not rely on enforcement.
    pub async fn request_token(&mut self) {
        if let Err(e) = self.try_request_token().await {
            warn!(error = %e, "token request failed");
            self.log
                .record(Direction::Error, format!("Token request failed: {e}"));
            self.loading = false;
        }
    }

    async fn try_request_token(&mut self) -> Result<(), HostError> {
        let credentials = self
            .credentials
            .clone()
            .ok_or_else(|| HostError::Config("no credentials set".into()))?;

        self.loading = true;
        let grant = self.tokens.issue_token(&credentials).await?;
        self.send_command(&Command::login(grant.token));
        Ok(())
    }

    // ------------------------------------------------------------------
    // Outgoing frames
    // ------------------------------------------------------------------

    /// Serialize a command and post it to the widget's window.
    ///
    /// Every send is mirrored into the traffic log.
    pub fn send_command(&mut self, command: &Command) {
        match serde_json::to_string(command) {
            Ok(payload) => self.post(payload),
            Err(e) => {
                self.log
                    .record(Direction::Error, format!("Serialize error: {e}"));
            }
        }
    }

    /// Send a `logout` command.
    ///
    /// Does not wait for confirmation, and does not clear
    /// `authenticated` optimistically: the flag only moves when the
    /// widget's own logout status event arrives.
    pub fn logout(&mut self) {
        self.send_command(&Command::logout());
    }

    fn send_ack(&mut self) {
        match serde_json::to_string(&HostAck::embed_ready()) {
            Ok(payload) => self.post(payload),
            Err(e) => {
                self.log
                    .record(Direction::Error, format!("Serialize error: {e}"));
            }
        }
    }

    fn post(&mut self, payload: String) {
        let target = self.target_origin();
        if let Err(e) = self.transport.post(&payload, &target) {
            warn!(error = %e, "post to widget failed");
            self.log.record(Direction::Error, format!("Post failed: {e}"));
            return;
        }
        self.log.record(Direction::Sent, payload);
    }

    /// Target origin for outgoing frames: the captured iframe origin if
    /// known, else the origin of the configured widget URL, else the
    /// wildcard (which defeats origin pinning; see DESIGN.md).
    fn target_origin(&self) -> String {
        if let Some(origin) = &self.iframe_origin {
            return origin.clone();
        }
        self.config
            .widget_origin()
            .unwrap_or_else(|| WILDCARD_ORIGIN.to_string())
    }

    // ------------------------------------------------------------------
    // Event loop
    // ------------------------------------------------------------------

    /// Drain frames from the window boundary until the channel closes.
    ///
    /// The single-consumer channel is the analog of the page's message
    /// event queue: frames are handled strictly in arrival order.
    pub async fn run(&mut self, mut frames: mpsc::Receiver<WindowFrame>) {
        while let Some(frame) = frames.recv().await {
            self.handle_frame(&frame.origin, &frame.payload).await;
        }
        debug!("window frame channel closed");
    }

    // ------------------------------------------------------------------
    // State
    // ------------------------------------------------------------------

    /// Store the credentials used for subsequent token requests.
    pub fn set_credentials(&mut self, credentials: Credentials) {
        self.credentials = Some(credentials);
    }

    /// The credentials currently held, if any.
    pub fn credentials(&self) -> Option<&Credentials> {
        self.credentials.as_ref()
    }

    /// Whether the widget has confirmed a login.
    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    /// Whether the widget has signaled `EMBED_READY`.
    pub fn is_widget_ready(&self) -> bool {
        self.widget_ready
    }

    /// Whether an operation is in flight from the page's point of view.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// The captured widget origin, if any frame has been received.
    pub fn iframe_origin(&self) -> Option<&str> {
        self.iframe_origin.as_deref()
    }

    /// The observational traffic log.
    pub fn log(&self) -> &TrafficLog {
        &self.log
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
