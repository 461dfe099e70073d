//! Public market-data WebSocket feed.
//!
//! Connects to `wss://bitnomial.com/exchange/ws`, sends a JSON subscribe
//! message, and streams one JSON event per frame, dispatched on the `type`
//! discriminator into [`FeedEvent`].
//!
//! # Example
//!
//! ```no_run
//! use btnl_rs::ws::feed::{Channel, ChannelName, MarketDataStream, SubscribeRequest};
//! use futures_util::StreamExt;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), btnl_rs::error::FeedError> {
//! let mut stream = MarketDataStream::connect().await?;
//!
//! let request = SubscribeRequest::subscribe(
//!     vec!["BUI".into()],
//!     vec![Channel::new(ChannelName::Trade, vec!["BUI".into()])],
//! );
//! stream.subscribe(&request).await?;
//!
//! while let Some(event) = stream.next().await {
//!     match event {
//!         Ok(e) => println!("{e:?}"),
//!         Err(e) => eprintln!("Error: {e}"),
//!     }
//! }
//! # Ok(())
//! # }
//! ```

use std::pin::Pin;
use std::task::{Context, Poll};

use futures_util::stream::{SplitSink, SplitStream};
use futures_util::{SinkExt, Stream, StreamExt};
use serde::{Deserialize, Serialize};
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};

use crate::constants::WS_FEED_URL;
use crate::error::FeedError;

// ---------------------------------------------------------------------------
// Subscribe / Unsubscribe request types
// ---------------------------------------------------------------------------

/// A feed channel name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChannelName {
    /// Trade prints.
    Trade,
    /// Book snapshots and level updates.
    Book,
    /// Block-trade prints.
    Block,
    /// Market status transitions.
    Status,
}

/// One channel subscription entry.
#[derive(Debug, Clone, Serialize)]
pub struct Channel {
    /// Which channel.
    pub name: ChannelName,
    /// Product codes this channel applies to.
    pub product_codes: Vec<String>,
}

impl Channel {
    /// Create a channel entry.
    pub fn new(name: ChannelName, product_codes: Vec<String>) -> Self {
        Self {
            name,
            product_codes,
        }
    }
}

/// Whether a request adds or removes subscriptions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SubscribeType {
    Subscribe,
    Unsubscribe,
}

/// JSON subscribe/unsubscribe request sent over the WebSocket.
#[derive(Debug, Clone, Serialize)]
pub struct SubscribeRequest {
    /// Subscribe or unsubscribe.
    #[serde(rename = "type")]
    pub kind: SubscribeType,
    /// Product codes subscribed at the top level.
    pub product_codes: Vec<String>,
    /// Per-channel subscriptions.
    pub channels: Vec<Channel>,
}

impl SubscribeRequest {
    /// Build a subscribe request.
    pub fn subscribe(product_codes: Vec<String>, channels: Vec<Channel>) -> Self {
        Self {
            kind: SubscribeType::Subscribe,
            product_codes,
            channels,
        }
    }

    /// Build an unsubscribe request.
    pub fn unsubscribe(product_codes: Vec<String>, channels: Vec<Channel>) -> Self {
        Self {
            kind: SubscribeType::Unsubscribe,
            product_codes,
            channels,
        }
    }
}

// ---------------------------------------------------------------------------
// Feed events
// ---------------------------------------------------------------------------

/// Side of the book as the feed spells it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FeedSide {
    Bid,
    Ask,
}

/// Market status as the feed spells it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MarketStatus {
    Open,
    Halt,
    Closed,
}

/// A parsed market-data event, tagged by its `type` field.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum FeedEvent {
    /// A trade printed.
    Trade {
        ack_id: String,
        price: i64,
        quantity: i64,
        symbol: String,
        taker_side: FeedSide,
        timestamp: String,
    },

    /// The aggregate quantity at one price level changed.
    Level {
        ack_id: String,
        price: i64,
        quantity: i64,
        side: FeedSide,
        symbol: String,
        timestamp: String,
    },

    /// A full book snapshot; levels are `(price, quantity)` pairs.
    Book {
        ack_id: String,
        bids: Vec<(i64, i64)>,
        asks: Vec<(i64, i64)>,
        symbol: String,
        timestamp: String,
    },

    /// A block trade printed.
    Block {
        ack_id: String,
        leader_side: FeedSide,
        price: i64,
        quantity: i64,
        symbol: String,
        timestamp: String,
    },

    /// A market status transition.
    Status {
        ack_id: String,
        state: MarketStatus,
        symbol: String,
        timestamp: String,
    },
}

// ---------------------------------------------------------------------------
// Stream wrapper
// ---------------------------------------------------------------------------

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// A streaming connection to the public market-data feed.
///
/// Implements [`Stream<Item = Result<FeedEvent, FeedError>>`] so it works
/// with `StreamExt::next()` and other stream combinators. Send a
/// [`SubscribeRequest`] after connecting.
pub struct MarketDataStream {
    read: SplitStream<WsStream>,
    write: SplitSink<WsStream, Message>,
}

impl MarketDataStream {
    /// Connect to the default feed endpoint.
    pub async fn connect() -> Result<Self, FeedError> {
        Self::connect_to(WS_FEED_URL).await
    }

    /// Connect to a custom feed endpoint (e.g. a mock server).
    pub async fn connect_to(url: &str) -> Result<Self, FeedError> {
        let (ws, _resp) = connect_async(url).await?;
        let (write, read) = ws.split();

        tracing::info!(%url, "connected to market-data feed");

        Ok(Self { read, write })
    }

    /// Send a subscribe or unsubscribe request.
    pub async fn subscribe(&mut self, request: &SubscribeRequest) -> Result<(), FeedError> {
        let json = serde_json::to_string(request)?;
        self.write.send(Message::Text(json.into())).await?;

        tracing::debug!(
            kind = ?request.kind,
            channels = request.channels.len(),
            "sent feed subscription request"
        );
        Ok(())
    }

    /// Close the WebSocket gracefully.
    pub async fn close(mut self) -> Result<(), FeedError> {
        self.write.send(Message::Close(None)).await?;
        tracing::info!("market-data feed closed");
        Ok(())
    }
}

impl Stream for MarketDataStream {
    type Item = Result<FeedEvent, FeedError>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        loop {
            match self.read.poll_next_unpin(cx) {
                Poll::Ready(Some(Ok(msg))) => {
                    match msg {
                        Message::Text(text) => match serde_json::from_str::<FeedEvent>(&text) {
                            Ok(event) => return Poll::Ready(Some(Ok(event))),
                            Err(e) => {
                                tracing::warn!("failed to parse feed message: {e}, raw: {text}");
                                return Poll::Ready(Some(Err(FeedError::Decode(e))));
                            }
                        },
                        Message::Ping(_) | Message::Pong(_) => {
                            // Ping/pong handled automatically by tungstenite
                            continue;
                        }
                        Message::Close(_) => {
                            tracing::info!("market-data feed closed by server");
                            return Poll::Ready(None);
                        }
                        _ => continue,
                    }
                }
                Poll::Ready(Some(Err(e))) => {
                    return Poll::Ready(Some(Err(FeedError::WebSocket(e))));
                }
                Poll::Ready(None) => return Poll::Ready(None),
                Poll::Pending => return Poll::Pending,
            }
        }
    }
}
