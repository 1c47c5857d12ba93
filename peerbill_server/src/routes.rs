//! JSON gateway route handlers.
//!
//! Each `POST /v1/*` route mirrors one `pb.PeerbillUser` RPC: the body is the RPC's request message as JSON and the
//! response is its reply message. Flow errors become `{code, message, details}` bodies (see [`ServerError`]).
//!
//! Handlers must not block the worker thread. Everything slow (the trader service, the chains, the price feed, the
//! wallet store) is awaited.
use actix_web::{get, web, HttpResponse, Responder};
use log::*;
use peerbill_engine::{
    request_objects::PairRequest,
    traits::{ChainClient, MarketData, OrderDirectory, WalletStore},
    OrderUpdateApi,
    RateQuoteApi,
    SettlementApi,
    WalletApi,
};

use crate::{errors::ServerError, grpc::pb};

// Web-actix cannot handle generics in handlers, so it's implemented manually using the `route!` macro
#[macro_export]
macro_rules! route {
    ($name:ident => $method:ident $path:literal impl $($bounds:ty),+) => {
        paste::paste! { pub struct [<$name:camel Route>]< $( [< T $bounds:camel> ],)+ >( $( core::marker::PhantomData<fn() -> [< T $bounds:camel> ] >,)+ );}
        paste::paste! { impl< $( [< T $bounds:camel> ],)+ > [<$name:camel Route>]< $( [< T $bounds:camel> ],)+ > {
            #[allow(clippy::new_without_default)]
            pub fn new() -> Self {
                Self($( core::marker::PhantomData::<fn() -> [< T $bounds:camel> ] >,)+)
            }
        }}
        paste::paste! { impl<$( [< T $bounds:camel >] , )+> actix_web::dev::HttpServiceFactory for [<$name:camel Route>]<$([<T $bounds:camel>],)+>
        where
            $([<T $bounds:camel>]: $bounds + 'static,)+
        {
            fn register(self, config: &mut actix_web::dev::AppService) {
                let res = actix_web::Resource::new($path)
                    .name(stringify!($name))
                    .guard(actix_web::guard::$method())
                    .to($name::< $( [< T $bounds:camel >], )+>);
                actix_web::dev::HttpServiceFactory::register(res, config);
            }
        }}
    };
}

#[get("/health")]
pub async fn health() -> impl Responder {
    trace!("💻️ Received health check request");
    HttpResponse::Ok().body("👍️\n")
}

//----------------------------------------------   Wallets  ----------------------------------------------------
route!(generate_wallet => Post "/v1/generate_wallet" impl WalletStore, ChainClient);
/// Creates a fresh escrow wallet for the given cryptocurrency and returns its address.
pub async fn generate_wallet<W, C>(
    body: web::Json<pb::GenerateWalletRequest>,
    api: web::Data<WalletApi<W, C>>,
) -> Result<HttpResponse, ServerError>
where
    W: WalletStore,
    C: ChainClient,
{
    let address = api.generate_wallet(&body.crypto).await?;
    Ok(HttpResponse::Ok().json(pb::GenerateWalletResponse { address }))
}

//----------------------------------------------   Rates  ----------------------------------------------------
route!(get_rates => Post "/v1/get_rates" impl MarketData);
pub async fn get_rates<M>(
    body: web::Json<pb::RateRequest>,
    api: web::Data<RateQuoteApi<M>>,
) -> Result<HttpResponse, ServerError>
where
    M: MarketData,
{
    let pair = PairRequest::from(body.into_inner());
    let rate = api.get_rate(&pair).await?;
    Ok(HttpResponse::Ok().json(pb::RateResponse { rate }))
}

//----------------------------------------------   Orders  ----------------------------------------------------
route!(made_payment => Post "/v1/made_payment" impl OrderDirectory, WalletStore, ChainClient);
/// The buyer (or seller) reports that the fiat leg is done. Releases the escrowed crypto when the order allows it.
///
/// Not idempotent. A retry after a release re-reads the escrow balance and pays out again if the wallet still holds
/// enough. The settlement runs on its own task, so a client that disconnects mid-request does not interrupt it.
pub async fn made_payment<D, W, C>(
    body: web::Json<pb::MadePaymentRequest>,
    api: web::Data<SettlementApi<D, W, C>>,
) -> Result<HttpResponse, ServerError>
where
    D: OrderDirectory + 'static,
    W: WalletStore + 'static,
    C: ChainClient + 'static,
{
    let message = api.into_inner().made_payment_detached(body.into_inner().into()).await?;
    Ok(HttpResponse::Ok().json(pb::MadePaymentResponse { message }))
}

route!(update_order => Post "/v1/update_order" impl OrderDirectory);
pub async fn update_order<D>(
    body: web::Json<pb::UpdateOrderRequest>,
    api: web::Data<OrderUpdateApi<D>>,
) -> Result<HttpResponse, ServerError>
where
    D: OrderDirectory,
{
    let message = api.update_order(body.into_inner().into()).await?;
    Ok(HttpResponse::Ok().json(pb::UpdateOrderResponse { message }))
}
