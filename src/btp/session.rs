//! The order-entry session engine.
//!
//! An [`OrderEntrySession`] drives one BTP connection: the login handshake,
//! outbound sequence numbering, idle heartbeats, and inbound dispatch to an
//! application handler.
//!
//! The TCP write half, the sequence counter, and the last-send timestamp
//! live together behind one async mutex, so assigning a sequence id,
//! encoding, and writing the frame happen under a single lock acquisition.
//! On-wire sequence ids are therefore gapless and in order no matter how
//! many producer tasks share a [`SessionHandle`]. The read half belongs to
//! [`run`](OrderEntrySession::run) alone.
//!
//! # Example
//!
//! ```no_run
//! use btnl_rs::btp::login::AuthToken;
//! use btnl_rs::btp::order_entry::{Open, OrderEntry, TimeInForce};
//! use btnl_rs::btp::{Body, OrderEntrySession, SessionConfig, SessionEvent, Side};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), btnl_rs::error::SessionError> {
//! let token = AuthToken::from_bytes([0; 32]);
//! let config = SessionConfig::new("127.0.0.1", 11000, 1, token);
//! let mut session = OrderEntrySession::connect(&config).await?;
//! session.login().await?;
//!
//! session
//!     .send(Body::OrderEntry(OrderEntry::Open(Open {
//!         order_id: 1,
//!         product_id: 3668,
//!         side: Side::Bid,
//!         price: 10_000,
//!         quantity: 10,
//!         time_in_force: TimeInForce::Day,
//!     })))
//!     .await?;
//!
//! session
//!     .run(|event| match event {
//!         SessionEvent::Message(msg) => println!("{msg:?}"),
//!         SessionEvent::Disconnected(d) => println!("server disconnect: {d:?}"),
//!     })
//!     .await?;
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicU8, Ordering};
use std::time::Duration;

use tokio::io::AsyncWriteExt;
use tokio::net::TcpStream;
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::sync::Mutex;
use tokio::time::Instant;

use crate::constants::DEFAULT_HEARTBEAT_INTERVAL_SECS;
use crate::error::SessionError;

use super::login::{AuthToken, Login, LoginRequest};
use super::message::{Body, Disconnect, Message};
use super::BodyEncoding;

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Connection parameters for an order-entry session.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Exchange host.
    pub host: String,
    /// Exchange port.
    pub port: u16,
    /// Connection id assigned by the exchange.
    pub connection_id: u64,
    /// The 32-byte connection secret.
    pub auth_token: AuthToken,
    /// Idle heartbeat cadence in seconds (default 30).
    pub heartbeat_interval_secs: u8,
}

impl SessionConfig {
    /// Build a config with the default heartbeat interval.
    pub fn new(
        host: impl Into<String>,
        port: u16,
        connection_id: u64,
        auth_token: AuthToken,
    ) -> Self {
        Self {
            host: host.into(),
            port,
            connection_id,
            auth_token,
            heartbeat_interval_secs: DEFAULT_HEARTBEAT_INTERVAL_SECS,
        }
    }
}

// ---------------------------------------------------------------------------
// Session state
// ---------------------------------------------------------------------------

/// Lifecycle state of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Connected, login not yet attempted.
    Idle,
    /// Login request written, awaiting the server's response.
    AwaitingAck,
    /// Logged in; the only state that permits `send`.
    Open,
    /// Shutting down deliberately; read errors are now expected.
    Stopping,
    /// Terminated. A new session requires a new connection.
    Closed,
}

impl SessionState {
    fn from_u8(v: u8) -> Self {
        match v {
            0 => Self::Idle,
            1 => Self::AwaitingAck,
            2 => Self::Open,
            3 => Self::Stopping,
            _ => Self::Closed,
        }
    }
}

/// An inbound occurrence delivered to the application handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// A non-heartbeat frame, in arrival order.
    Message(Message),
    /// The server sent a disconnect; the session closes right after this.
    Disconnected(Disconnect),
}

// ---------------------------------------------------------------------------
// Shared write side
// ---------------------------------------------------------------------------

/// Write half plus everything that must move in lockstep with it.
struct WriteState {
    half: OwnedWriteHalf,
    next_sequence_id: u32,
    last_send: Instant,
}

struct Shared {
    writer: Mutex<WriteState>,
    state: AtomicU8,
    heartbeat_interval: Duration,
}

impl Shared {
    fn state(&self) -> SessionState {
        SessionState::from_u8(self.state.load(Ordering::Acquire))
    }

    fn set_state(&self, state: SessionState) {
        self.state.store(state as u8, Ordering::Release);
    }

    /// Assign a sequence id, encode, and write — atomically under the writer
    /// lock. Heartbeats take sequence 0 and do not advance the counter.
    async fn write_message(&self, body: Body) -> Result<(), SessionError> {
        let mut w = self.writer.lock().await;
        let sequence_id = if body.body_encoding() == BodyEncoding::Heartbeat {
            0
        } else {
            let seq = w.next_sequence_id;
            w.next_sequence_id += 1;
            seq
        };
        let msg = Message::new(sequence_id, body);
        tracing::debug!(
            sequence_id,
            encoding = ?msg.header.body_encoding,
            "writing frame"
        );
        w.half.write_all(&msg.encode()).await?;
        w.last_send = Instant::now();
        Ok(())
    }

    /// Emit a heartbeat only if nothing has been written for a full
    /// interval. Checked and written under one lock so a concurrent send
    /// cannot slip between the check and the write.
    async fn heartbeat_if_idle(&self) -> Result<(), SessionError> {
        let mut w = self.writer.lock().await;
        if w.last_send.elapsed() < self.heartbeat_interval {
            return Ok(());
        }
        let msg = Message::new(0, Body::Heartbeat);
        tracing::debug!("writing idle heartbeat");
        w.half.write_all(&msg.encode()).await?;
        w.last_send = Instant::now();
        Ok(())
    }

    async fn shutdown_writer(&self) {
        let mut w = self.writer.lock().await;
        if let Err(e) = w.half.shutdown().await {
            tracing::debug!("writer shutdown: {e}");
        }
    }
}

// ---------------------------------------------------------------------------
// Handle
// ---------------------------------------------------------------------------

/// A cloneable handle for producer tasks.
///
/// Lets application code send frames and stop the session while
/// [`OrderEntrySession::run`] owns the session itself.
#[derive(Clone)]
pub struct SessionHandle {
    shared: Arc<Shared>,
}

impl SessionHandle {
    /// Current lifecycle state.
    pub fn state(&self) -> SessionState {
        self.shared.state()
    }

    /// Send one application frame. The session must be open.
    pub async fn send(&self, body: Body) -> Result<(), SessionError> {
        send_on(&self.shared, body).await
    }

    /// Close the writer half and transition the session toward `Closed`.
    pub async fn stop(&self) {
        stop_on(&self.shared).await;
    }
}

async fn send_on(shared: &Arc<Shared>, body: Body) -> Result<(), SessionError> {
    if shared.state() != SessionState::Open {
        return Err(SessionError::NotOpen);
    }
    match shared.write_message(body).await {
        Ok(()) => Ok(()),
        Err(e) => {
            shared.set_state(SessionState::Closed);
            Err(e)
        }
    }
}

async fn stop_on(shared: &Arc<Shared>) {
    shared.set_state(SessionState::Stopping);
    shared.shutdown_writer().await;
    shared.set_state(SessionState::Closed);
    tracing::info!("session stopped");
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

/// A live BTP order-entry session.
pub struct OrderEntrySession {
    shared: Arc<Shared>,
    reader: OwnedReadHalf,
    connection_id: u64,
    auth_token: AuthToken,
    heartbeat_interval_secs: u8,
}

impl OrderEntrySession {
    /// Open the TCP connection. The session starts [`SessionState::Idle`];
    /// call [`login`](Self::login) next.
    pub async fn connect(config: &SessionConfig) -> Result<Self, SessionError> {
        let stream = TcpStream::connect((config.host.as_str(), config.port)).await?;
        let (reader, write_half) = stream.into_split();

        tracing::info!(
            host = %config.host,
            port = config.port,
            connection_id = config.connection_id,
            "connected to order-entry endpoint"
        );

        let interval_secs = config.heartbeat_interval_secs.max(1);
        let shared = Arc::new(Shared {
            writer: Mutex::new(WriteState {
                half: write_half,
                next_sequence_id: 1,
                last_send: Instant::now(),
            }),
            state: AtomicU8::new(SessionState::Idle as u8),
            heartbeat_interval: Duration::from_secs(u64::from(interval_secs)),
        });

        Ok(Self {
            shared,
            reader,
            connection_id: config.connection_id,
            auth_token: config.auth_token,
            heartbeat_interval_secs: config.heartbeat_interval_secs,
        })
    }

    /// Current lifecycle state.
    pub fn state(&self) -> SessionState {
        self.shared.state()
    }

    /// A cloneable handle for producer tasks.
    pub fn handle(&self) -> SessionHandle {
        SessionHandle {
            shared: Arc::clone(&self.shared),
        }
    }

    /// Perform the login handshake.
    ///
    /// Writes the login request at sequence 1 and awaits the server's
    /// response frame. On an ack the session opens and the idle-heartbeat
    /// task starts. On a reject — or any unexpected frame — the session
    /// closes.
    pub async fn login(&mut self) -> Result<(), SessionError> {
        if self.shared.state() != SessionState::Idle {
            return Err(SessionError::NotOpen);
        }

        let request = Body::Login(Login::Request(LoginRequest {
            connection_id: self.connection_id,
            auth_token: self.auth_token,
            heartbeat_interval: self.heartbeat_interval_secs,
        }));

        self.shared.set_state(SessionState::AwaitingAck);
        if let Err(e) = self.shared.write_message(request).await {
            self.shared.set_state(SessionState::Closed);
            return Err(e);
        }

        let response = match Message::read_from(&mut self.reader).await {
            Ok(msg) => msg,
            Err(e) => {
                self.shared.set_state(SessionState::Closed);
                return Err(e);
            }
        };

        match response.body {
            Body::Login(Login::Ack) => {
                self.shared.set_state(SessionState::Open);
                self.spawn_heartbeat();
                tracing::info!(connection_id = self.connection_id, "login acknowledged");
                Ok(())
            }
            Body::Login(Login::Reject(reject)) => {
                self.shared.set_state(SessionState::Closed);
                self.shared.shutdown_writer().await;
                tracing::warn!(reason = ?reject.reason, "login rejected");
                Err(SessionError::LoginRejected(reject.reason))
            }
            other => {
                self.shared.set_state(SessionState::Closed);
                self.shared.shutdown_writer().await;
                Err(SessionError::UnexpectedDuringLogin(other.body_encoding()))
            }
        }
    }

    /// Send one application frame. The session must be open.
    pub async fn send(&self, body: Body) -> Result<(), SessionError> {
        send_on(&self.shared, body).await
    }

    /// Close the writer half and transition the session toward `Closed`.
    ///
    /// An in-flight [`run`](Self::run) sees its read fail and returns
    /// gracefully.
    pub async fn stop(&self) {
        stop_on(&self.shared).await;
    }

    /// Drain inbound frames into `handler` until the session ends.
    ///
    /// Heartbeats are swallowed. A server [`Disconnect`] surfaces through
    /// the handler, then the session closes and `run` returns `Ok(())` —
    /// a disconnect is normal termination, not an error. Transport and
    /// parse faults close the session and are returned. If no frame at all
    /// arrives within twice the heartbeat interval the peer is presumed
    /// dead ([`SessionError::PeerTimeout`]).
    pub async fn run<F>(&mut self, mut handler: F) -> Result<(), SessionError>
    where
        F: FnMut(SessionEvent),
    {
        if self.shared.state() != SessionState::Open {
            return Err(SessionError::NotOpen);
        }
        let read_deadline = self.shared.heartbeat_interval * 2;

        loop {
            let read = tokio::time::timeout(read_deadline, Message::read_from(&mut self.reader));
            let msg = match read.await {
                Err(_) => {
                    self.shared.set_state(SessionState::Closed);
                    return Err(SessionError::PeerTimeout);
                }
                Ok(Err(SessionError::Transport(e))) => {
                    // A read failure after a deliberate stop is the normal
                    // way out, not a fault.
                    if matches!(
                        self.shared.state(),
                        SessionState::Stopping | SessionState::Closed
                    ) {
                        self.shared.set_state(SessionState::Closed);
                        tracing::info!("session closed");
                        return Ok(());
                    }
                    self.shared.set_state(SessionState::Closed);
                    return Err(SessionError::Transport(e));
                }
                Ok(Err(e)) => {
                    self.shared.set_state(SessionState::Closed);
                    return Err(e);
                }
                Ok(Ok(msg)) => msg,
            };

            match msg.body {
                Body::Heartbeat => continue,
                Body::Disconnect(disconnect) => {
                    tracing::info!(reason = ?disconnect.reason, "server disconnect");
                    self.shared.set_state(SessionState::Stopping);
                    handler(SessionEvent::Disconnected(disconnect));
                    self.shared.shutdown_writer().await;
                    self.shared.set_state(SessionState::Closed);
                    return Ok(());
                }
                _ => handler(SessionEvent::Message(msg)),
            }
        }
    }

    /// Spawn the idle-heartbeat task. It wakes every interval, emits a
    /// heartbeat only when no write happened for a full interval, and exits
    /// once the session leaves `Open`.
    fn spawn_heartbeat(&self) {
        let shared = Arc::clone(&self.shared);
        tokio::spawn(async move {
            loop {
                tokio::time::sleep(shared.heartbeat_interval).await;
                if shared.state() != SessionState::Open {
                    break;
                }
                if let Err(e) = shared.heartbeat_if_idle().await {
                    tracing::debug!("heartbeat task exiting: {e}");
                    break;
                }
            }
        });
    }
}
