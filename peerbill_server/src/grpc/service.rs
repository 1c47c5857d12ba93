use std::{sync::Arc, time::Instant};

use peerbill_engine::{
    request_objects::PairRequest,
    traits::{ChainClient, MarketData, OrderDirectory, TraderDirectory, WalletStore},
};
use tonic::{Request, Response, Status};

use crate::{
    flows::Flows,
    grpc::{logger::log_call, pb, status::api_status, PeerbillUser},
};

/// Serves the gRPC API from the shared flows.
pub struct PeerbillUserService<D, W, C, M, T> {
    flows: Flows<D, W, C, M, T>,
}

impl<D, W, C, M, T> PeerbillUserService<D, W, C, M, T> {
    pub fn new(flows: Flows<D, W, C, M, T>) -> Self {
        Self { flows }
    }
}

#[tonic::async_trait]
impl<D, W, C, M, T> PeerbillUser for PeerbillUserService<D, W, C, M, T>
where
    D: OrderDirectory + 'static,
    W: WalletStore + 'static,
    C: ChainClient + 'static,
    M: MarketData + 'static,
    T: TraderDirectory + 'static,
{
    async fn generate_wallet(
        &self,
        request: Request<pb::GenerateWalletRequest>,
    ) -> Result<Response<pb::GenerateWalletResponse>, Status> {
        let started = Instant::now();
        let crypto = request.into_inner().crypto;
        let result = self
            .flows
            .wallets
            .generate_wallet(&crypto)
            .await
            .map(|address| Response::new(pb::GenerateWalletResponse { address }))
            .map_err(|e| api_status(&e));
        log_call("GenerateWallet", started, &result);
        result
    }

    async fn get_rates(&self, request: Request<pb::RateRequest>) -> Result<Response<pb::RateResponse>, Status> {
        let started = Instant::now();
        let pair: PairRequest = request.into_inner().into();
        let result = self
            .flows
            .rates
            .get_rate(&pair)
            .await
            .map(|rate| Response::new(pb::RateResponse { rate }))
            .map_err(|e| api_status(&e));
        log_call("GetRates", started, &result);
        result
    }

    async fn made_payment(
        &self,
        request: Request<pb::MadePaymentRequest>,
    ) -> Result<Response<pb::MadePaymentResponse>, Status> {
        let started = Instant::now();
        let result = Arc::clone(&self.flows.settlement)
            .made_payment_detached(request.into_inner().into())
            .await
            .map(|message| Response::new(pb::MadePaymentResponse { message }))
            .map_err(|e| api_status(&e));
        log_call("MadePayment", started, &result);
        result
    }

    async fn update_order(
        &self,
        request: Request<pb::UpdateOrderRequest>,
    ) -> Result<Response<pb::UpdateOrderResponse>, Status> {
        let started = Instant::now();
        let result = self
            .flows
            .orders
            .update_order(request.into_inner().into())
            .await
            .map(|message| Response::new(pb::UpdateOrderResponse { message }))
            .map_err(|e| api_status(&e));
        log_call("UpdateOrder", started, &result);
        result
    }
}
