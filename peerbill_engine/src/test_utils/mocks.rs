//! Mock collaborators for flow and endpoint tests.
use std::time::Duration;

use async_trait::async_trait;
use mockall::mock;

use crate::{
    assets::Asset,
    db_types::{
        KeyPair,
        NewWallet,
        Order,
        OrderStatusUpdate,
        OrderType,
        OrderUpdate,
        Trader,
        TransferInstruction,
        TxHash,
        Wallet,
    },
    traits::{
        ChainClient,
        ChainClientError,
        MarketData,
        MarketDataError,
        OrderDirectory,
        OrderDirectoryError,
        TraderDirectory,
        WalletStore,
        WalletStoreError,
    },
};

mock! {
    pub Directory {}

    #[async_trait]
    impl OrderDirectory for Directory {
        async fn fetch_order(&self, id: i64, order_type: OrderType) -> Result<Option<Order>, OrderDirectoryError>;
        async fn update_order_status(&self, update: &OrderStatusUpdate) -> Result<String, OrderDirectoryError>;
        async fn update_order(&self, update: &OrderUpdate) -> Result<String, OrderDirectoryError>;
    }
}

mock! {
    pub Traders {}

    #[async_trait]
    impl TraderDirectory for Traders {
        async fn fetch_traders(&self, crypto: &str, fiat: &str) -> Result<Vec<Trader>, OrderDirectoryError>;
    }
}

mock! {
    pub Wallets {}

    #[async_trait]
    impl WalletStore for Wallets {
        async fn fetch_wallet(&self, address: &str) -> Result<Option<Wallet>, WalletStoreError>;
        async fn insert_wallet(&self, wallet: NewWallet) -> Result<Wallet, WalletStoreError>;
    }
}

mock! {
    pub Chain {}

    #[async_trait]
    impl ChainClient for Chain {
        fn generate_keypair(&self) -> Result<KeyPair, ChainClientError>;
        async fn balance_of(&self, asset: &Asset, address: &str) -> Result<String, ChainClientError>;
        async fn transfer(&self, instruction: &TransferInstruction) -> Result<TxHash, ChainClientError>;
        async fn await_confirmation(
            &self,
            network: &str,
            tx: &TxHash,
            timeout: Duration,
        ) -> Result<(), ChainClientError>;
    }
}

mock! {
    pub Market {}

    #[async_trait]
    impl MarketData for Market {
        async fn spot_price(&self, crypto: &str, fiat: &str) -> Result<f64, MarketDataError>;
    }
}
