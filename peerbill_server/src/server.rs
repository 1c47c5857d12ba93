use std::{net::SocketAddr, str::FromStr, sync::Arc};

use actix_cors::Cors;
use actix_web::{dev::Server, http::header, middleware::Logger, web, App, HttpServer};
use futures::TryFutureExt;
use log::*;
use peerbill_clients::{EvmChainClient, RatesApi, TraderApi};
use peerbill_engine::{
    assets::SupportedAssets,
    traits::{ChainClient, MarketData, OrderDirectory, TraderDirectory, WalletStore},
    OrderUpdateApi,
    RateQuoteApi,
    SettlementApi,
    SqliteDatabase,
    TraderFeedApi,
    WalletApi,
};
use tonic::transport::server::TcpIncoming;

use crate::{
    config::ServerConfig,
    errors::ServerError,
    flows::Flows,
    grpc::{PeerbillUserServer, PeerbillUserService},
    routes::{health, GenerateWalletRoute, GetRatesRoute, MadePaymentRoute, UpdateOrderRoute},
    ws::{WsGetRatesRoute, WsGetTradersRoute},
};

pub type GatewayFlows = Flows<TraderApi, SqliteDatabase, EvmChainClient, RatesApi, TraderApi>;

/// Starts the gRPC, JSON and WebSocket listeners and runs until SIGINT/SIGTERM, or until one of them fails.
pub async fn run_server(config: ServerConfig) -> Result<(), ServerError> {
    let db = SqliteDatabase::new_with_url(&config.database.source, config.database.max_connections)
        .await
        .map_err(|e| ServerError::InitializeError(e.to_string()))?;
    db.migrate(&config.database.migration_url).await.map_err(|e| ServerError::MigrationError(e.to_string()))?;
    let flows = build_flows(&config, db)?;

    let http = create_gateway_server(&config, flows.clone())?;
    let ws = create_websocket_server(&config, flows.clone())?;
    let grpc_addr = SocketAddr::from_str(&config.grpc_addr)
        .map_err(|e| ServerError::ConfigurationError(format!("Invalid gRPC address {}. {e}", config.grpc_addr)))?;
    let incoming = TcpIncoming::new(grpc_addr, true, None)
        .map_err(|e| ServerError::InitializeError(format!("Cannot listen on {grpc_addr}. {e}")))?;
    info!("🚀️ gRPC listening on {grpc_addr}");

    let http_handle = http.handle();
    let ws_handle = ws.handle();
    let (stop_grpc, grpc_stop_requested) = tokio::sync::oneshot::channel::<()>();
    let grpc = tonic::transport::Server::builder()
        .add_service(PeerbillUserServer::new(PeerbillUserService::new(flows)))
        .serve_with_incoming_shutdown(incoming, async {
            let _ = grpc_stop_requested.await;
        })
        .map_err(|e| ServerError::GrpcError(e.to_string()));

    let servers = async move {
        tokio::try_join!(http.err_into::<ServerError>(), ws.err_into::<ServerError>(), grpc).map(|_| ())
    };
    tokio::pin!(servers);
    tokio::select! {
        result = &mut servers => {
            warn!("🛑️ A listener stopped unexpectedly");
            return result;
        },
        () = shutdown_signal() => {},
    }
    info!("🛑️ Shutting down. Waiting for in-flight requests to finish.");
    let _ = stop_grpc.send(());
    tokio::join!(http_handle.stop(true), ws_handle.stop(true));
    servers.await
}

/// Builds each collaborator once. Every flow receives a clone of the same handle, so the listeners share one
/// connection pool per external system.
pub fn build_flows(config: &ServerConfig, db: SqliteDatabase) -> Result<GatewayFlows, ServerError> {
    let trader_api =
        TraderApi::new(config.trader_api.clone()).map_err(|e| ServerError::InitializeError(e.to_string()))?;
    let rates_api = RatesApi::new(config.rates_api.clone()).map_err(|e| ServerError::InitializeError(e.to_string()))?;
    let chain = EvmChainClient::new(&config.chain).map_err(|e| ServerError::InitializeError(e.to_string()))?;
    let settlement = SettlementApi::new(
        trader_api.clone(),
        db.clone(),
        chain.clone(),
        SupportedAssets::default(),
        config.settlement.options(),
    );
    Ok(Flows::new(
        settlement,
        WalletApi::new(db, chain),
        RateQuoteApi::new(rates_api),
        OrderUpdateApi::new(trader_api.clone()),
        TraderFeedApi::new(trader_api),
    ))
}

pub fn create_gateway_server(config: &ServerConfig, flows: GatewayFlows) -> Result<Server, ServerError> {
    let origins = config.allowed_origins.clone();
    let srv = HttpServer::new(move || {
        App::new()
            .wrap(Logger::new("%t (%D ms) %s %a %{Host}i %U").log_target("pbg::access_log"))
            .wrap(cors_policy(&origins))
            .configure(|cfg| configure_gateway(cfg, &flows))
    })
    .disable_signals()
    .bind(config.http_addr.as_str())?
    .run();
    info!("🚀️ JSON gateway listening on {}", config.http_addr);
    Ok(srv)
}

pub fn create_websocket_server(config: &ServerConfig, flows: GatewayFlows) -> Result<Server, ServerError> {
    let origins = config.allowed_origins.clone();
    let srv = HttpServer::new(move || {
        App::new()
            .wrap(Logger::new("%t (%D ms) %s %a %U").log_target("pbg::ws_access_log"))
            .wrap(cors_policy(&origins))
            .configure(|cfg| configure_websockets(cfg, &flows))
    })
    .disable_signals()
    .bind(config.websocket_addr.as_str())?
    .run();
    info!("🚀️ WebSocket feeds listening on {}", config.websocket_addr);
    Ok(srv)
}

pub fn configure_gateway<D, W, C, M, T>(cfg: &mut web::ServiceConfig, flows: &Flows<D, W, C, M, T>)
where
    D: OrderDirectory + 'static,
    W: WalletStore + 'static,
    C: ChainClient + 'static,
    M: MarketData + 'static,
    T: TraderDirectory + 'static,
{
    cfg.app_data(web::Data::from(Arc::clone(&flows.settlement)))
        .app_data(web::Data::from(Arc::clone(&flows.wallets)))
        .app_data(web::Data::from(Arc::clone(&flows.rates)))
        .app_data(web::Data::from(Arc::clone(&flows.orders)))
        .service(health)
        .service(GenerateWalletRoute::<W, C>::new())
        .service(GetRatesRoute::<M>::new())
        .service(MadePaymentRoute::<D, W, C>::new())
        .service(UpdateOrderRoute::<D>::new());
}

pub fn configure_websockets<D, W, C, M, T>(cfg: &mut web::ServiceConfig, flows: &Flows<D, W, C, M, T>)
where
    M: MarketData + 'static,
    T: TraderDirectory + 'static,
{
    cfg.app_data(web::Data::from(Arc::clone(&flows.rates)))
        .app_data(web::Data::from(Arc::clone(&flows.traders)))
        .service(WsGetRatesRoute::<M>::new())
        .service(WsGetTradersRoute::<T>::new());
}

pub fn cors_policy(origins: &[String]) -> Cors {
    let mut cors = Cors::default()
        .allowed_methods(vec!["GET", "POST", "PUT", "PATCH", "DELETE"])
        .allowed_headers(vec![header::AUTHORIZATION, header::CONTENT_TYPE])
        .max_age(3600);
    for origin in origins {
        cors = if origin == "*" { cors.allow_any_origin() } else { cors.allowed_origin(origin) };
    }
    cors
}

async fn shutdown_signal() {
    let interrupt = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("🛑️ Cannot listen for SIGINT. {e}");
            std::future::pending::<()>().await;
        }
    };
    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            },
            Err(e) => {
                error!("🛑️ Cannot listen for SIGTERM. {e}");
                std::future::pending::<()>().await;
            },
        }
    };
    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();
    tokio::select! {
        () = interrupt => info!("🛑️ Received SIGINT"),
        () = terminate => info!("🛑️ Received SIGTERM"),
    }
}
