//! Wire codec tests: literal byte vectors from the protocol specification
//! plus property-based round-trip laws for every body variant.

use proptest::prelude::*;

use btnl_rs::btp::login::{
    AuthToken, Login, LoginReject, LoginRejectReason, LoginRequest, LogoutRequest,
};
use btnl_rs::btp::market_state::{MarketState, MarketStateUpdate};
use btnl_rs::btp::message::{Body, Disconnect, DisconnectReason, Header, Message};
use btnl_rs::btp::order_entry::{
    Ack, Close, CloseReason, Fill, Liquidity, Modify, Open, OrderEntry, Reject, RejectReason,
    TimeInForce,
};
use btnl_rs::btp::pricefeed::{Block, Book, BookLevel, Level, Pricefeed, Trade};
use btnl_rs::btp::{BodyEncoding, Side};
use btnl_rs::error::{AuthError, ParseError};

// ===================================================================
// Seed vectors
// ===================================================================

#[test]
fn heartbeat_frame_is_twelve_literal_bytes() {
    let msg = Message::new(0, Body::Heartbeat);
    let encoded = msg.encode();
    assert_eq!(
        encoded.as_ref(),
        [b'B', b'T', 0x02, 0x00, 0x00, 0x00, 0x00, 0x00, b'H', b'B', 0x00, 0x00]
    );

    let decoded = Message::decode(&encoded).unwrap();
    assert_eq!(decoded.header.sequence_id, 0);
    assert_eq!(decoded.header.body_encoding, BodyEncoding::Heartbeat);
    assert_eq!(decoded.header.body_length, 0);
    assert_eq!(decoded.body, Body::Heartbeat);
}

#[test]
fn heartbeat_forces_sequence_zero() {
    let msg = Message::new(7, Body::Heartbeat);
    assert_eq!(msg.header.sequence_id, 0);
}

#[test]
fn open_order_bytes() {
    let open = Open {
        order_id: 1,
        product_id: 3668,
        side: Side::Bid,
        price: 10_000,
        quantity: 10,
        time_in_force: TimeInForce::Day,
    };

    #[rustfmt::skip]
    let expected_body: &[u8] = &[
        b'O',
        0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
        0x54, 0x0E, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
        b'B',
        0x10, 0x27, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
        0x0A, 0x00, 0x00, 0x00,
        b'D',
    ];
    assert_eq!(open.encode().as_ref(), expected_body);
    assert_eq!(Open::decode(expected_body).unwrap(), open);

    let frame = Message::new(1, Body::OrderEntry(OrderEntry::Open(open))).encode();
    let body_len = expected_body.len() as u16;
    let mut expected_frame = vec![b'B', b'T', 0x02, 0x00, 0x01, 0x00, 0x00, 0x00, b'O', b'E'];
    expected_frame.extend_from_slice(&body_len.to_le_bytes());
    expected_frame.extend_from_slice(expected_body);
    assert_eq!(frame.as_ref(), expected_frame.as_slice());
}

#[test]
fn login_request_bytes() {
    let request = LoginRequest {
        connection_id: 1,
        auth_token: AuthToken::from_bytes([0; 32]),
        heartbeat_interval: 30,
    };
    let encoded = request.encode();
    assert_eq!(encoded.len(), 42);
    assert_eq!(encoded[0], b'L');
    assert_eq!(&encoded[1..9], &[0x01, 0, 0, 0, 0, 0, 0, 0]);
    assert_eq!(&encoded[9..41], &[0u8; 32]);
    assert_eq!(encoded[41], 0x1E);

    assert_eq!(
        Login::decode(&encoded).unwrap(),
        Login::Request(request)
    );
}

#[test]
fn login_ack_body_is_single_byte() {
    let encoded = Login::Ack.encode();
    assert_eq!(encoded.as_ref(), [b'A']);
    assert_eq!(Login::decode(&encoded).unwrap(), Login::Ack);

    let frame = Message::new(1, Body::Login(Login::Ack)).encode();
    assert_eq!(frame.len(), 13);
}

#[test]
fn disconnect_with_sequence_gap() {
    #[rustfmt::skip]
    let bytes: &[u8] = &[
        0x01,
        0x05, 0x00, 0x00, 0x00,
        0x07, 0x00, 0x00, 0x00,
    ];
    let disconnect = Disconnect::decode(bytes).unwrap();
    assert_eq!(disconnect.reason, DisconnectReason::SequenceIdFault);
    assert_eq!(disconnect.expected_sequence_id, Some(5));
    assert_eq!(disconnect.actual_sequence_id, Some(7));
    assert_eq!(disconnect.encode().as_ref(), bytes);
}

#[test]
fn disconnect_zero_sequences_are_absent() {
    let bytes = [0x02, 0, 0, 0, 0, 0, 0, 0, 0];
    let disconnect = Disconnect::decode(&bytes).unwrap();
    assert_eq!(disconnect.reason, DisconnectReason::HeartbeatFault);
    assert_eq!(disconnect.expected_sequence_id, None);
    assert_eq!(disconnect.actual_sequence_id, None);
    assert_eq!(disconnect.encode().as_ref(), bytes);
}

#[test]
fn book_with_one_bid_and_no_asks() {
    #[rustfmt::skip]
    let bytes: &[u8] = &[
        b'B',
        0x09, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
        0x64, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
        0x0C, 0x00, 0x00, 0x00,
        0x63, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
        0x02, 0x00, 0x00, 0x00,
        0x00, 0x00, 0x00, 0x00,
    ];
    let book = Book::decode(bytes).unwrap();
    assert_eq!(book.last_ack_id, 9);
    assert_eq!(book.product_id, 100);
    assert_eq!(
        book.bids,
        vec![BookLevel {
            price: 99,
            quantity: 2
        }]
    );
    assert_eq!(book.asks, vec![]);
    assert_eq!(book.encode().as_ref(), bytes);
}

#[test]
fn book_with_oversized_length_prefix_is_a_short_buffer() {
    // A bids byte-count prefix near u32::MAX must be rejected against the
    // actual buffer, not trusted to size an allocation.
    #[rustfmt::skip]
    let bytes: &[u8] = &[
        b'B',
        0x09, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
        0x64, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
        0xFF, 0xFF, 0xFF, 0xFF,
    ];
    assert!(matches!(
        Book::decode(bytes),
        Err(ParseError::ShortBuffer { .. })
    ));
}

#[test]
fn book_with_empty_sides() {
    let book = Book {
        last_ack_id: 1,
        product_id: 2,
        bids: vec![],
        asks: vec![],
    };
    let encoded = book.encode();
    assert_eq!(encoded.len(), 25);
    let decoded = Book::decode(&encoded).unwrap();
    assert!(decoded.bids.is_empty());
    assert!(decoded.asks.is_empty());
}

// ===================================================================
// Boundary behaviors
// ===================================================================

#[test]
fn auth_token_must_be_64_hex_chars() {
    assert!(AuthToken::from_hex(&"00".repeat(32)).is_ok());

    // Valid hex, wrong length: reported as the decoded byte count.
    assert_eq!(
        AuthToken::from_hex("deadbeef"),
        Err(AuthError::BadTokenLength { actual: 4 })
    );
    assert_eq!(
        AuthToken::from_hex(&"00".repeat(33)),
        Err(AuthError::BadTokenLength { actual: 33 })
    );

    // Right length, not hex.
    assert_eq!(
        AuthToken::from_hex(&"zz".repeat(32)),
        Err(AuthError::BadTokenEncoding)
    );
}

#[test]
fn zero_body_length_is_only_valid_for_heartbeat() {
    let mut frame = Message::new(0, Body::Heartbeat).encode().to_vec();
    assert_eq!(Message::decode(&frame).unwrap().body, Body::Heartbeat);

    // Same frame relabeled as order entry: an empty OE body cannot parse.
    frame[8] = b'O';
    frame[9] = b'E';
    frame[4] = 1;
    assert!(matches!(
        Message::decode(&frame),
        Err(ParseError::ShortBuffer { .. })
    ));
}

#[test]
fn bad_magic_and_version_are_frame_faults() {
    let good = Message::new(1, Body::Login(Login::Ack)).encode();

    let mut bad_magic = good.to_vec();
    bad_magic[0] = b'X';
    assert!(matches!(
        Message::decode(&bad_magic),
        Err(ParseError::BadFrame(_))
    ));

    let mut bad_version = good.to_vec();
    bad_version[2] = 3;
    assert!(matches!(
        Message::decode(&bad_version),
        Err(ParseError::BadFrame(_))
    ));

    let mut bad_encoding = good.to_vec();
    bad_encoding[8] = b'Z';
    assert!(matches!(
        Message::decode(&bad_encoding),
        Err(ParseError::BadFrame(_))
    ));
}

#[test]
fn wrong_subtype_byte_is_a_wrong_tag() {
    let open = Open {
        order_id: 1,
        product_id: 2,
        side: Side::Ask,
        price: 3,
        quantity: 4,
        time_in_force: TimeInForce::Ioc,
    };
    let mut bytes = open.encode().to_vec();
    bytes[0] = b'M';
    assert_eq!(
        Open::decode(&bytes),
        Err(ParseError::WrongTag {
            expected: b'O',
            found: b'M',
        })
    );
}

#[test]
fn unknown_enum_codes_are_rejected() {
    let fill = Fill {
        ack_id: 1,
        order_id: 2,
        price: 3,
        quantity: 4,
        liquidity: Liquidity::Add,
    };
    let mut bytes = fill.encode().to_vec();
    *bytes.last_mut().unwrap() = b'Z';
    assert_eq!(
        Fill::decode(&bytes),
        Err(ParseError::UnknownEnum {
            field: "liquidity",
            value: b'Z',
        })
    );

    // Reject reason 19 is past the end of the listed set.
    let reject = Reject {
        order_id: 1,
        modify_id: None,
        reason: RejectReason::ConnectionDisabled,
    };
    let mut bytes = reject.encode().to_vec();
    *bytes.last_mut().unwrap() = 19;
    assert!(matches!(
        Reject::decode(&bytes),
        Err(ParseError::UnknownEnum { .. })
    ));
}

#[test]
fn short_buffers_are_rejected() {
    let trade = Trade {
        ack_id: 1,
        product_id: 2,
        taker_side: Side::Bid,
        price: 3,
        quantity: 4,
    };
    let bytes = trade.encode();
    assert!(matches!(
        Trade::decode(&bytes[..bytes.len() - 1]),
        Err(ParseError::ShortBuffer { .. })
    ));
    assert!(matches!(
        Trade::decode(&[]),
        Err(ParseError::ShortBuffer { .. })
    ));
}

#[test]
fn fill_price_is_four_bytes_unsigned() {
    let fill = Fill {
        ack_id: 1,
        order_id: 2,
        price: u32::MAX,
        quantity: 1,
        liquidity: Liquidity::Remove,
    };
    // 1 tag + 8 + 8 + 4 price + 4 quantity + 1 liquidity
    assert_eq!(fill.encode().len(), 26);
    assert_eq!(Fill::decode(&fill.encode()).unwrap().price, u32::MAX);
}

// ===================================================================
// Round-trip laws
// ===================================================================

fn side() -> impl Strategy<Value = Side> {
    prop_oneof![Just(Side::Bid), Just(Side::Ask)]
}

fn time_in_force() -> impl Strategy<Value = TimeInForce> {
    prop_oneof![Just(TimeInForce::Day), Just(TimeInForce::Ioc)]
}

fn close_reason() -> impl Strategy<Value = CloseReason> {
    prop_oneof![
        Just(CloseReason::IocFinished),
        Just(CloseReason::NonConnectionCancel),
        Just(CloseReason::SelfMatchPreventionCanceled),
    ]
}

fn liquidity() -> impl Strategy<Value = Liquidity> {
    prop_oneof![
        Just(Liquidity::Add),
        Just(Liquidity::Remove),
        Just(Liquidity::SpreadLegMatch),
    ]
}

fn reject_reason() -> impl Strategy<Value = RejectReason> {
    (1u8..=18).prop_map(|code| match code {
        1 => RejectReason::AccountNotFound,
        2 => RejectReason::ProductNotFound,
        3 => RejectReason::OrderNotFound,
        4 => RejectReason::OrderAlreadyExists,
        5 => RejectReason::OrderAlreadyClosed,
        6 => RejectReason::OrderNotChangedByModify,
        7 => RejectReason::QuantityGreaterThanMaxOrderSize,
        8 => RejectReason::QuantityLessThanMinOrderSize,
        9 => RejectReason::PriceOutsidePriceBands,
        10 => RejectReason::PriceOutsidePriceLimits,
        11 => RejectReason::PriceNotTickAligned,
        12 => RejectReason::MarketHalted,
        13 => RejectReason::MarketClosed,
        14 => RejectReason::GiveUpAccountNotFound,
        15 => RejectReason::GiveUpUnauthorized,
        16 => RejectReason::MessagingRateExceeded,
        17 => RejectReason::PositionLimitExceeded,
        _ => RejectReason::ConnectionDisabled,
    })
}

/// `modify_id` uses 0 as the wire sentinel for absent, so present ids start
/// at 1.
fn opt_modify_id() -> impl Strategy<Value = Option<u64>> {
    proptest::option::of(1u64..)
}

fn order_entry_body() -> impl Strategy<Value = OrderEntry> {
    prop_oneof![
        (any::<u64>(), any::<u64>(), side(), any::<i64>(), any::<u32>(), time_in_force()).prop_map(
            |(order_id, product_id, side, price, quantity, time_in_force)| {
                OrderEntry::Open(Open {
                    order_id,
                    product_id,
                    side,
                    price,
                    quantity,
                    time_in_force,
                })
            }
        ),
        (any::<u64>(), any::<u64>(), any::<i64>(), any::<u32>()).prop_map(
            |(order_id, modify_id, price, quantity)| {
                OrderEntry::Modify(Modify {
                    order_id,
                    modify_id,
                    price,
                    quantity,
                })
            }
        ),
        (any::<u64>(), any::<u64>(), opt_modify_id()).prop_map(
            |(ack_id, order_id, modify_id)| {
                OrderEntry::Ack(Ack {
                    ack_id,
                    order_id,
                    modify_id,
                })
            }
        ),
        (any::<u64>(), opt_modify_id(), reject_reason()).prop_map(
            |(order_id, modify_id, reason)| {
                OrderEntry::Reject(Reject {
                    order_id,
                    modify_id,
                    reason,
                })
            }
        ),
        (any::<u64>(), any::<u64>(), close_reason()).prop_map(|(ack_id, order_id, reason)| {
            OrderEntry::Close(Close {
                ack_id,
                order_id,
                reason,
            })
        }),
        (any::<u64>(), any::<u64>(), any::<u32>(), any::<u32>(), liquidity()).prop_map(
            |(ack_id, order_id, price, quantity, liquidity)| {
                OrderEntry::Fill(Fill {
                    ack_id,
                    order_id,
                    price,
                    quantity,
                    liquidity,
                })
            }
        ),
    ]
}

fn login_body() -> impl Strategy<Value = Login> {
    prop_oneof![
        (any::<u64>(), any::<[u8; 32]>(), any::<u8>()).prop_map(
            |(connection_id, token, heartbeat_interval)| {
                Login::Request(LoginRequest {
                    connection_id,
                    auth_token: AuthToken::from_bytes(token),
                    heartbeat_interval,
                })
            }
        ),
        any::<bool>().prop_map(|persist_orders| Login::Logout(LogoutRequest { persist_orders })),
        Just(Login::Ack),
        prop_oneof![
            Just(LoginRejectReason::NoReqReceived),
            Just(LoginRejectReason::Unauthorized),
            Just(LoginRejectReason::AlreadyLoggedIn),
        ]
        .prop_map(|reason| Login::Reject(LoginReject { reason })),
    ]
}

fn book_level() -> impl Strategy<Value = BookLevel> {
    (any::<i64>(), any::<u32>()).prop_map(|(price, quantity)| BookLevel { price, quantity })
}

fn pricefeed_body() -> impl Strategy<Value = Pricefeed> {
    prop_oneof![
        (any::<u64>(), any::<u64>(), side(), any::<i64>(), any::<u32>()).prop_map(
            |(ack_id, product_id, taker_side, price, quantity)| {
                Pricefeed::Trade(Trade {
                    ack_id,
                    product_id,
                    taker_side,
                    price,
                    quantity,
                })
            }
        ),
        (any::<u64>(), any::<u64>(), side(), any::<i64>(), any::<u32>()).prop_map(
            |(ack_id, product_id, side, price, quantity)| {
                Pricefeed::Level(Level {
                    ack_id,
                    product_id,
                    side,
                    price,
                    quantity,
                })
            }
        ),
        (
            any::<u64>(),
            any::<u64>(),
            proptest::collection::vec(book_level(), 0..16),
            proptest::collection::vec(book_level(), 0..16),
        )
            .prop_map(|(last_ack_id, product_id, bids, asks)| {
                Pricefeed::Book(Book {
                    last_ack_id,
                    product_id,
                    bids,
                    asks,
                })
            }),
        (any::<u64>(), any::<u64>(), any::<i64>(), any::<u32>()).prop_map(
            |(ack_id, product_id, price, quantity)| {
                Pricefeed::Block(Block {
                    ack_id,
                    product_id,
                    price,
                    quantity,
                })
            }
        ),
    ]
}

fn market_state_body() -> impl Strategy<Value = MarketStateUpdate> {
    (
        prop_oneof![
            Just(MarketState::Open),
            Just(MarketState::Halt),
            Just(MarketState::Closed),
        ],
        any::<u64>(),
        any::<u64>(),
    )
        .prop_map(|(state, ack_id, product_id)| MarketStateUpdate {
            state,
            ack_id,
            product_id,
        })
}

fn disconnect_body() -> impl Strategy<Value = Disconnect> {
    (
        prop_oneof![
            Just(DisconnectReason::SequenceIdFault),
            Just(DisconnectReason::HeartbeatFault),
            Just(DisconnectReason::FailedToLogin),
            Just(DisconnectReason::MessagingRateExceeded),
            Just(DisconnectReason::ParseFailure),
        ],
        proptest::option::of(1u32..),
        proptest::option::of(1u32..),
    )
        .prop_map(|(reason, expected, actual)| Disconnect {
            reason,
            expected_sequence_id: expected,
            actual_sequence_id: actual,
        })
}

fn any_body() -> impl Strategy<Value = Body> {
    prop_oneof![
        login_body().prop_map(Body::Login),
        order_entry_body().prop_map(Body::OrderEntry),
        market_state_body().prop_map(Body::MarketState),
        Just(Body::Heartbeat),
        disconnect_body().prop_map(Body::Disconnect),
        pricefeed_body().prop_map(Body::Pricefeed),
    ]
}

proptest! {
    #[test]
    fn order_entry_roundtrip(body in order_entry_body()) {
        let encoded = body.encode();
        prop_assert_eq!(OrderEntry::decode(&encoded).unwrap(), body);
    }

    #[test]
    fn login_roundtrip(body in login_body()) {
        let encoded = body.encode();
        prop_assert_eq!(Login::decode(&encoded).unwrap(), body);
    }

    #[test]
    fn pricefeed_roundtrip(body in pricefeed_body()) {
        let encoded = body.encode();
        prop_assert_eq!(Pricefeed::decode(&encoded).unwrap(), body);
    }

    #[test]
    fn market_state_roundtrip(body in market_state_body()) {
        let encoded = body.encode();
        prop_assert_eq!(MarketStateUpdate::decode(&encoded).unwrap(), body);
    }

    #[test]
    fn disconnect_roundtrip(body in disconnect_body()) {
        let encoded = body.encode();
        prop_assert_eq!(Disconnect::decode(&encoded).unwrap(), body);
    }

    #[test]
    fn frame_roundtrip(seq in 1u32.., body in any_body()) {
        let msg = Message::new(seq, body);
        let encoded = msg.encode();

        // The header always declares the exact body length.
        prop_assert_eq!(
            usize::from(msg.header.body_length),
            msg.body.encode().len()
        );

        let decoded = Message::decode(&encoded).unwrap();
        prop_assert_eq!(decoded.header, msg.header);
        prop_assert_eq!(decoded.body, msg.body);
    }

    #[test]
    fn header_roundtrip(seq in any::<u32>(), len in any::<u16>()) {
        let header = Header {
            sequence_id: seq,
            body_encoding: BodyEncoding::Pricefeed,
            body_length: len,
        };
        let encoded = header.encode();
        prop_assert_eq!(encoded.len(), 12);
        prop_assert_eq!(Header::decode(&encoded).unwrap(), header);
    }
}
