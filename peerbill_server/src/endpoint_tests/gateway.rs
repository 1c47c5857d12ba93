use actix_web::{http::StatusCode, test, test::TestRequest, App};
use chrono::Utc;
use mockall::predicate::eq;
use pbg_common::Secret;
use peerbill_engine::{
    db_types::{KeyPair, OrderType, TxHash, Wallet},
    traits::{MarketDataError, OrderDirectoryError},
};
use serde_json::Value;

use super::helpers::*;
use crate::server::configure_gateway;

#[actix_web::test]
async fn health_check() {
    let _ = env_logger::try_init();
    let flows = MockCollaborators::default().into_flows();
    let app = test::init_service(App::new().configure(|cfg| configure_gateway(cfg, &flows))).await;
    let res = test::call_service(&app, TestRequest::get().uri("/health").to_request()).await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(test::read_body(res).await, "👍️\n");
}

#[actix_web::test]
async fn made_payment_releases_escrow() {
    let _ = env_logger::try_init();
    let mut mocks = MockCollaborators::default();
    mocks
        .settlement_directory
        .expect_fetch_order()
        .with(eq(42), eq(OrderType::Buy))
        .times(1)
        .returning(|_, _| Ok(Some(eth_order(true))));
    mocks
        .settlement_directory
        .expect_update_order_status()
        .withf(|u| u.id == 42 && u.username == "alice_1" && u.is_completed && !u.is_expired)
        .times(1)
        .returning(|_| Ok("Order 42 completed".to_string()));
    mocks.settlement_wallets.expect_fetch_wallet().with(eq(ESCROW)).returning(|_| Ok(Some(escrow_wallet())));
    mocks.settlement_chain.expect_balance_of().times(1).returning(|_, _| Ok("1.0".to_string()));
    mocks
        .settlement_chain
        .expect_transfer()
        .withf(|t| t.destination == USER && t.symbol == "ETH" && t.amount.value() == 500_000_000_000_000_000)
        .times(1)
        .returning(|_| Ok(TxHash::from("0xfeed")));

    let (status, body) =
        post_request("/v1/made_payment", &made_payment_body(), mocks.into_flows()).await.expect("Request failed");
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, r#"{"message":"Order 42 completed"}"#);
}

#[actix_web::test]
async fn made_payment_before_payment_is_received() {
    let _ = env_logger::try_init();
    let mut mocks = MockCollaborators::default();
    mocks.settlement_directory.expect_fetch_order().returning(|_, _| Ok(Some(eth_order(false))));
    mocks.settlement_directory.expect_update_order_status().times(0);
    mocks.settlement_wallets.expect_fetch_wallet().returning(|_| Ok(Some(escrow_wallet())));
    mocks.settlement_chain.expect_balance_of().returning(|_, _| Ok("1.0".to_string()));
    mocks.settlement_chain.expect_transfer().times(0);

    let (status, body) =
        post_request("/v1/made_payment", &made_payment_body(), mocks.into_flows()).await.expect("Request failed");
    assert_eq!(status, StatusCode::PRECONDITION_FAILED);
    let body: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(body["code"], 9);
}

#[actix_web::test]
async fn made_payment_reports_every_invalid_field() {
    let _ = env_logger::try_init();
    let mut mocks = MockCollaborators::default();
    mocks.settlement_directory.expect_fetch_order().times(0);
    let body = r#"{"id":0,"order_type":"swap","username":"Alice","user_address":"0x12","escrow_address":"0x34"}"#;
    let (status, body) = post_request("/v1/made_payment", body, mocks.into_flows()).await.expect("Request failed");
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let body: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(body["code"], 3);
    let fields = body["details"].as_array().unwrap().iter().map(|d| d["field"].as_str().unwrap()).collect::<Vec<_>>();
    assert_eq!(fields, vec!["id", "username", "order_type", "user_address", "escrow_address"]);
}

#[actix_web::test]
async fn made_payment_for_unknown_order() {
    let _ = env_logger::try_init();
    let mut mocks = MockCollaborators::default();
    mocks.settlement_directory.expect_fetch_order().returning(|_, _| Ok(None));
    mocks.settlement_wallets.expect_fetch_wallet().times(0);
    let (status, _) =
        post_request("/v1/made_payment", &made_payment_body(), mocks.into_flows()).await.expect("Request failed");
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn generate_wallet() {
    let _ = env_logger::try_init();
    let mut mocks = MockCollaborators::default();
    mocks.chain.expect_generate_keypair().times(1).returning(|| {
        Ok(KeyPair {
            address: "0x52908400098527886E0F7030069857D2E4169EE7".into(),
            public_key: "04ab".into(),
            private_key: Secret::new("0123".to_string()),
        })
    });
    mocks.wallets.expect_insert_wallet().times(1).returning(|w| {
        Ok(Wallet {
            id: 1,
            address: w.address.to_lowercase(),
            public_key: w.public_key,
            private_key: w.private_key,
            crypto: w.crypto,
            created_at: Utc::now(),
        })
    });
    let (status, body) =
        post_request("/v1/generate_wallet", r#"{"crypto":"BNB"}"#, mocks.into_flows()).await.expect("Request failed");
    assert_eq!(status, StatusCode::OK);
    let body: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(body["address"].as_str().unwrap().len(), 42);
}

#[actix_web::test]
async fn get_rates() {
    let _ = env_logger::try_init();
    let mut mocks = MockCollaborators::default();
    mocks.market.expect_spot_price().with(eq("ETH"), eq("USD")).returning(|_, _| Ok(2500.25));
    let (status, body) = post_request("/v1/get_rates", r#"{"crypto":"ETH","fiat":"USD"}"#, mocks.into_flows())
        .await
        .expect("Request failed");
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, r#"{"rate":2500.25}"#);
}

#[actix_web::test]
async fn get_rates_for_unknown_pair() {
    let _ = env_logger::try_init();
    let mut mocks = MockCollaborators::default();
    mocks.market.expect_spot_price().returning(|c, f| {
        Err(MarketDataError::RateNotFound { crypto: c.to_string(), fiat: f.to_string() })
    });
    let (status, _) = post_request("/v1/get_rates", r#"{"crypto":"ETH","fiat":"XYZ"}"#, mocks.into_flows())
        .await
        .expect("Request failed");
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn update_order_with_bank_details() {
    let _ = env_logger::try_init();
    let mut mocks = MockCollaborators::default();
    mocks
        .orders
        .expect_update_order()
        .withf(|u| u.id == 9 && u.bank_name.as_deref() == Some("First Bank") && u.account_holder.is_none())
        .times(1)
        .returning(|_| Ok("Order updated".to_string()));
    let body = r#"{"id":9,"username":"bob","order_type":"sell","bank_name":"First Bank","account_holder":""}"#;
    let (status, body) = post_request("/v1/update_order", body, mocks.into_flows()).await.expect("Request failed");
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, r#"{"message":"Order updated"}"#);
}

#[actix_web::test]
async fn update_order_directory_failure() {
    let _ = env_logger::try_init();
    let mut mocks = MockCollaborators::default();
    mocks.orders.expect_update_order().returning(|_| Err(OrderDirectoryError::Unreachable("refused".into())));
    let body = r#"{"id":9,"username":"bob","order_type":"buy"}"#;
    let (status, body) = post_request("/v1/update_order", body, mocks.into_flows()).await.expect("Request failed");
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(body["code"], 13);
}

#[actix_web::test]
async fn wrong_method_is_not_routed() {
    let _ = env_logger::try_init();
    let flows = MockCollaborators::default().into_flows();
    let app = test::init_service(App::new().configure(|cfg| configure_gateway(cfg, &flows))).await;
    let res = test::call_service(&app, TestRequest::get().uri("/v1/get_rates").to_request()).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}
