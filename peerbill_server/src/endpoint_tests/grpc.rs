use chrono::{Duration, Utc};
use mockall::predicate::eq;
use peerbill_engine::{
    db_types::{OrderType, TxHash},
    traits::OrderDirectoryError,
};
use tonic::{Code, Request};
use tonic_types::StatusExt;

use super::helpers::*;
use crate::grpc::{pb, PeerbillUser, PeerbillUserService};

fn made_payment_request() -> pb::MadePaymentRequest {
    pb::MadePaymentRequest {
        id: 42,
        order_type: "buy".into(),
        username: "alice_1".into(),
        user_address: USER.into(),
        escrow_address: ESCROW.into(),
    }
}

#[tokio::test]
async fn made_payment_releases_native_coin() {
    let _ = env_logger::try_init();
    let mut mocks = MockCollaborators::default();
    mocks
        .settlement_directory
        .expect_fetch_order()
        .with(eq(42), eq(OrderType::Buy))
        .returning(|_, _| Ok(Some(eth_order(true))));
    mocks
        .settlement_directory
        .expect_update_order_status()
        .withf(|u| u.is_completed && !u.is_expired)
        .times(1)
        .returning(|_| Ok("Order 42 completed".to_string()));
    mocks.settlement_wallets.expect_fetch_wallet().returning(|_| Ok(Some(escrow_wallet())));
    mocks.settlement_chain.expect_balance_of().returning(|_, _| Ok("1.0".to_string()));
    mocks.settlement_chain.expect_transfer().times(1).returning(|_| Ok(TxHash::from("0xfeed")));

    let service = PeerbillUserService::new(mocks.into_flows());
    let reply = service.made_payment(Request::new(made_payment_request())).await.expect("MadePayment failed");
    assert_eq!(reply.into_inner().message, "Order 42 completed");
}

#[tokio::test]
async fn expired_underfunded_order_is_closed() {
    let _ = env_logger::try_init();
    let mut mocks = MockCollaborators::default();
    mocks.settlement_directory.expect_fetch_order().returning(|_, _| {
        let mut order = eth_order(false);
        order.duration = Some(Utc::now() - Duration::minutes(5));
        Ok(Some(order))
    });
    mocks
        .settlement_directory
        .expect_update_order_status()
        .withf(|u| u.is_completed && u.is_expired)
        .times(1)
        .returning(|_| Ok("Order 42 expired".to_string()));
    mocks.settlement_wallets.expect_fetch_wallet().returning(|_| Ok(Some(escrow_wallet())));
    mocks.settlement_chain.expect_balance_of().returning(|_, _| Ok("0.2".to_string()));
    mocks.settlement_chain.expect_transfer().times(0);

    let service = PeerbillUserService::new(mocks.into_flows());
    let reply = service.made_payment(Request::new(made_payment_request())).await.expect("MadePayment failed");
    assert_eq!(reply.into_inner().message, "Order 42 expired");
}

#[tokio::test]
async fn invalid_request_carries_bad_request_details() {
    let _ = env_logger::try_init();
    let mut mocks = MockCollaborators::default();
    mocks.settlement_directory.expect_fetch_order().times(0);
    let service = PeerbillUserService::new(mocks.into_flows());
    let request = pb::MadePaymentRequest { username: "al".into(), escrow_address: "".into(), ..made_payment_request() };
    let status = service.made_payment(Request::new(request)).await.unwrap_err();
    assert_eq!(status.code(), Code::InvalidArgument);
    let details = status.get_details_bad_request().expect("BadRequest detail");
    let fields = details.field_violations.iter().map(|v| v.field.as_str()).collect::<Vec<_>>();
    assert_eq!(fields, vec!["username", "escrow_address"]);
}

#[tokio::test]
async fn insufficient_balance_is_invalid_argument() {
    let _ = env_logger::try_init();
    let mut mocks = MockCollaborators::default();
    mocks.settlement_directory.expect_fetch_order().returning(|_, _| Ok(Some(eth_order(true))));
    mocks.settlement_directory.expect_update_order_status().times(0);
    mocks.settlement_wallets.expect_fetch_wallet().returning(|_| Ok(Some(escrow_wallet())));
    mocks.settlement_chain.expect_balance_of().returning(|_, _| Ok("0.1".to_string()));
    mocks.settlement_chain.expect_transfer().times(0);

    let service = PeerbillUserService::new(mocks.into_flows());
    let status = service.made_payment(Request::new(made_payment_request())).await.unwrap_err();
    assert_eq!(status.code(), Code::InvalidArgument);
    assert!(status.message().contains("0.1 ETH"));
    assert!(status.message().contains("0.5 ETH"));
}

#[tokio::test]
async fn get_rates() {
    let mut mocks = MockCollaborators::default();
    mocks.market.expect_spot_price().with(eq("BNB"), eq("EUR")).returning(|_, _| Ok(512.0));
    let service = PeerbillUserService::new(mocks.into_flows());
    let request = pb::RateRequest { crypto: "BNB".into(), fiat: "EUR".into() };
    let reply = service.get_rates(Request::new(request)).await.unwrap().into_inner();
    assert!((reply.rate - 512.0).abs() < f64::EPSILON);
}

#[tokio::test]
async fn generate_wallet_rejects_short_symbols() {
    let mut mocks = MockCollaborators::default();
    mocks.chain.expect_generate_keypair().times(0);
    let service = PeerbillUserService::new(mocks.into_flows());
    let status = service.generate_wallet(Request::new(pb::GenerateWalletRequest { crypto: "X".into() })).await;
    assert_eq!(status.unwrap_err().code(), Code::InvalidArgument);
}

#[tokio::test]
async fn update_order_failure_is_internal() {
    let mut mocks = MockCollaborators::default();
    mocks
        .orders
        .expect_update_order()
        .returning(|_| Err(OrderDirectoryError::Status { status: 503, message: "maintenance".into() }));
    let service = PeerbillUserService::new(mocks.into_flows());
    let request = pb::UpdateOrderRequest {
        id: 3,
        username: "carol".into(),
        order_type: "sell".into(),
        bank_name: None,
        account_number: Some("".into()),
        account_holder: None,
    };
    let status = service.update_order(Request::new(request)).await.unwrap_err();
    assert_eq!(status.code(), Code::Internal);
}
