use std::str::FromStr;

use actix_web::{
    body::MessageBody,
    http::{header::ContentType, StatusCode},
    test,
    test::TestRequest,
    App,
};
use chrono::{Duration, Utc};
use log::debug;
use pbg_common::Secret;
use peerbill_engine::{
    assets::SupportedAssets,
    db_types::{Order, OrderType, Wallet},
    test_utils::mocks::{MockChain, MockDirectory, MockMarket, MockTraders, MockWallets},
    OrderUpdateApi,
    RateQuoteApi,
    SettlementApi,
    SettlementOptions,
    TraderFeedApi,
    WalletApi,
};
use rust_decimal::Decimal;

use crate::{flows::Flows, server::configure_gateway};

pub const ESCROW: &str = "0x00000000000000000000000000000000000000aa";
pub const USER: &str = "0x00000000000000000000000000000000000000bb";

pub type MockFlows = Flows<MockDirectory, MockWallets, MockChain, MockMarket, MockTraders>;

/// One mock per collaborator slot. Each flow owns its collaborators, so the settlement flow gets its own set.
#[derive(Default)]
pub struct MockCollaborators {
    pub settlement_directory: MockDirectory,
    pub settlement_wallets: MockWallets,
    pub settlement_chain: MockChain,
    pub wallets: MockWallets,
    pub chain: MockChain,
    pub market: MockMarket,
    pub orders: MockDirectory,
    pub traders: MockTraders,
}

impl MockCollaborators {
    pub fn into_flows(self) -> MockFlows {
        let settlement = SettlementApi::new(
            self.settlement_directory,
            self.settlement_wallets,
            self.settlement_chain,
            SupportedAssets::default(),
            SettlementOptions::default(),
        );
        Flows::new(
            settlement,
            WalletApi::new(self.wallets, self.chain),
            RateQuoteApi::new(self.market),
            OrderUpdateApi::new(self.orders),
            TraderFeedApi::new(self.traders),
        )
    }
}

pub fn eth_order(is_received: bool) -> Order {
    Order {
        id: 42,
        order_type: OrderType::Buy,
        username: "alice_1".into(),
        escrow_address: ESCROW.into(),
        crypto: "ETH".into(),
        fiat: "NGN".into(),
        fiat_amount: Decimal::from(1_250_000),
        crypto_amount: Decimal::from_str("0.5").unwrap(),
        rate: None,
        user_address: Some(USER.into()),
        is_accepted: true,
        is_completed: false,
        is_rejected: false,
        is_received,
        is_expired: false,
        duration: Some(Utc::now() + Duration::minutes(30)),
        created_at: None,
        bank_name: None,
        account_number: None,
        account_holder: None,
    }
}

pub fn escrow_wallet() -> Wallet {
    Wallet {
        id: 7,
        address: ESCROW.into(),
        public_key: "04ab".into(),
        private_key: Secret::new("escrow-key".to_string()),
        crypto: "ETH".into(),
        created_at: Utc::now(),
    }
}

pub fn made_payment_body() -> String {
    format!(
        r#"{{"id":42,"order_type":"buy","username":"alice_1","user_address":"{USER}","escrow_address":"{ESCROW}"}}"#
    )
}

pub async fn post_request(path: &str, body: &str, flows: MockFlows) -> Result<(StatusCode, String), String> {
    let req =
        TestRequest::post().uri(path).insert_header(ContentType::json()).set_payload(body.to_string()).to_request();
    let app = App::new().configure(|cfg| configure_gateway(cfg, &flows));
    let service = test::init_service(app).await;
    debug!("Making request to {path}");
    let (_, res) = test::try_call_service(&service, req).await.map_err(|e| e.to_string())?.into_parts();
    let status = res.status();
    let body = String::from_utf8_lossy(&res.into_body().try_into_bytes().unwrap()).into_owned();
    Ok((status, body))
}
