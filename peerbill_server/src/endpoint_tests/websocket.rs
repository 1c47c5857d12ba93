use actix_web::{http::StatusCode, test, test::TestRequest, App};
use mockall::predicate::eq;
use peerbill_engine::{
    db_types::Trader,
    request_objects::PairRequest,
    test_utils::mocks::{MockMarket, MockTraders},
    traits::{MarketDataError, OrderDirectoryError},
    RateQuoteApi,
    TraderFeedApi,
};
use serde_json::Value;

use super::helpers::MockCollaborators;
use crate::{
    server::configure_websockets,
    ws::{rates_reply, traders_reply},
};

fn trader(username: &str) -> Trader {
    Trader {
        id: 5,
        username: username.into(),
        crypto: "USDT".into(),
        fiat: "NGN".into(),
        buy_rate: None,
        sell_rate: None,
        min_amount: None,
        max_amount: None,
        is_active: true,
    }
}

#[actix_web::test]
async fn rates_frame_gets_a_rate() {
    let _ = env_logger::try_init();
    let mut market = MockMarket::new();
    market.expect_spot_price().with(eq("ETH"), eq("NGN")).times(1).returning(|_, _| Ok(4_100_000.5));
    let api = RateQuoteApi::new(market);
    let reply = rates_reply(&api, r#"{"crypto":"ETH","fiat":"NGN"}"#).await.unwrap();
    assert_eq!(reply, r#"{"rate":4100000.5}"#);
}

#[actix_web::test]
async fn rates_failure_is_reported_in_band() {
    let _ = env_logger::try_init();
    let mut market = MockMarket::new();
    market.expect_spot_price().returning(|c, f| {
        Err(MarketDataError::RateNotFound { crypto: c.to_string(), fiat: f.to_string() })
    });
    let api = RateQuoteApi::new(market);
    let reply = rates_reply(&api, r#"{"crypto":"ETH","fiat":"XYZ"}"#).await.unwrap();
    let reply: Value = serde_json::from_str(&reply).unwrap();
    assert!(reply["error"].as_str().unwrap().contains("XYZ"));
}

#[actix_web::test]
async fn unparseable_frames_are_ignored() {
    let _ = env_logger::try_init();
    let mut market = MockMarket::new();
    market.expect_spot_price().times(0);
    let api = RateQuoteApi::new(market);
    assert!(rates_reply(&api, "hello").await.is_none());
    assert!(rates_reply(&api, r#"{"crypto":"ETH"}"#).await.is_none());
}

#[actix_web::test]
async fn traders_frame_lists_traders() {
    let _ = env_logger::try_init();
    let mut traders = MockTraders::new();
    traders
        .expect_fetch_traders()
        .with(eq("USDT"), eq("NGN"))
        .returning(|_, _| Ok(vec![trader("carol"), trader("dan")]));
    let api = TraderFeedApi::new(traders);
    let reply = traders_reply(&api, &serde_json::to_string(&PairRequest::new("USDT", "NGN")).unwrap()).await.unwrap();
    let reply: Value = serde_json::from_str(&reply).unwrap();
    let names =
        reply["traders"].as_array().unwrap().iter().map(|t| t["username"].as_str().unwrap()).collect::<Vec<_>>();
    assert_eq!(names, vec!["carol", "dan"]);
}

#[actix_web::test]
async fn traders_errors_keep_the_session() {
    let _ = env_logger::try_init();
    let mut traders = MockTraders::new();
    traders.expect_fetch_traders().returning(|_, _| Err(OrderDirectoryError::Unreachable("refused".into())));
    let api = TraderFeedApi::new(traders);
    let reply = traders_reply(&api, r#"{"crypto":"USDT","fiat":"NGN"}"#).await.unwrap();
    let reply: Value = serde_json::from_str(&reply).unwrap();
    assert!(reply.get("error").is_some());
    let reply = traders_reply(&api, r#"{"crypto":"U","fiat":"NGN"}"#).await.unwrap();
    assert!(serde_json::from_str::<Value>(&reply).unwrap()["error"].as_str().unwrap().contains("crypto"));
}

#[actix_web::test]
async fn feeds_require_a_websocket_upgrade() {
    let _ = env_logger::try_init();
    let flows = MockCollaborators::default().into_flows();
    let app = test::init_service(App::new().configure(|cfg| configure_websockets(cfg, &flows))).await;
    let res = test::call_service(&app, TestRequest::get().uri("/ws/get-rates").to_request()).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let req = TestRequest::get()
        .uri("/ws/get-traders")
        .insert_header(("Upgrade", "websocket"))
        .insert_header(("Connection", "Upgrade"))
        .insert_header(("Sec-WebSocket-Version", "13"))
        .insert_header(("Sec-WebSocket-Key", "dGhlIHNhbXBsZSBub25jZQ=="))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::SWITCHING_PROTOCOLS);
}
