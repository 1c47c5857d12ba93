use std::{fmt::Debug, sync::Arc};

use peerbill_engine::{
    traits::{ChainClient, MarketData, OrderDirectory, TraderDirectory, WalletStore},
    OrderUpdateApi,
    RateQuoteApi,
    SettlementApi,
    TraderFeedApi,
    WalletApi,
};

/// The gateway's flows, built once at startup and shared by the gRPC, JSON and WebSocket listeners.
pub struct Flows<D, W, C, M, T> {
    pub settlement: Arc<SettlementApi<D, W, C>>,
    pub wallets: Arc<WalletApi<W, C>>,
    pub rates: Arc<RateQuoteApi<M>>,
    pub orders: Arc<OrderUpdateApi<D>>,
    pub traders: Arc<TraderFeedApi<T>>,
}

impl<D, W, C, M, T> Flows<D, W, C, M, T>
where
    D: OrderDirectory,
    W: WalletStore,
    C: ChainClient,
    M: MarketData,
    T: TraderDirectory,
{
    pub fn new(
        settlement: SettlementApi<D, W, C>,
        wallets: WalletApi<W, C>,
        rates: RateQuoteApi<M>,
        orders: OrderUpdateApi<D>,
        traders: TraderFeedApi<T>,
    ) -> Self {
        Self {
            settlement: Arc::new(settlement),
            wallets: Arc::new(wallets),
            rates: Arc::new(rates),
            orders: Arc::new(orders),
            traders: Arc::new(traders),
        }
    }
}

impl<D, W, C, M, T> Clone for Flows<D, W, C, M, T> {
    fn clone(&self) -> Self {
        Self {
            settlement: Arc::clone(&self.settlement),
            wallets: Arc::clone(&self.wallets),
            rates: Arc::clone(&self.rates),
            orders: Arc::clone(&self.orders),
            traders: Arc::clone(&self.traders),
        }
    }
}

impl<D, W, C, M, T> Debug for Flows<D, W, C, M, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Flows")
    }
}
