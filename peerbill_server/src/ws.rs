//! WebSocket feeds.
//!
//! A client sends `{"crypto": "...", "fiat": "..."}` text frames and gets one reply frame per request:
//! `{"rate": ...}` on `/ws/get-rates` and `{"traders": [...]}` on `/ws/get-traders`. A failed lookup is answered with
//! `{"error": "..."}` and the session stays open. Frames that don't parse are dropped.
use std::{future::Future, sync::Arc};

use actix_web::{web, HttpRequest, HttpResponse};
use actix_ws::{Message, MessageStream, Session};
use futures::StreamExt;
use log::*;
use peerbill_engine::{
    request_objects::PairRequest,
    traits::{MarketData, TraderDirectory},
    ApiError,
    RateQuoteApi,
    TraderFeedApi,
};
use serde_json::{json, Value};

use crate::route;

route!(ws_get_rates => Get "/ws/get-rates" impl MarketData);
pub async fn ws_get_rates<M>(
    req: HttpRequest,
    body: web::Payload,
    api: web::Data<RateQuoteApi<M>>,
) -> Result<HttpResponse, actix_web::Error>
where
    M: MarketData + 'static,
{
    let (response, session, stream) = actix_ws::handle(&req, body)?;
    log_open("rates", &req);
    let api = api.into_inner();
    actix_web::rt::spawn(run_feed(session, stream, "rates", move |frame| {
        let api = Arc::clone(&api);
        async move { rates_reply(&api, &frame).await }
    }));
    Ok(response)
}

route!(ws_get_traders => Get "/ws/get-traders" impl TraderDirectory);
pub async fn ws_get_traders<T>(
    req: HttpRequest,
    body: web::Payload,
    api: web::Data<TraderFeedApi<T>>,
) -> Result<HttpResponse, actix_web::Error>
where
    T: TraderDirectory + 'static,
{
    let (response, session, stream) = actix_ws::handle(&req, body)?;
    log_open("traders", &req);
    let api = api.into_inner();
    actix_web::rt::spawn(run_feed(session, stream, "traders", move |frame| {
        let api = Arc::clone(&api);
        async move { traders_reply(&api, &frame).await }
    }));
    Ok(response)
}

/// The reply to one rates frame, or `None` when the frame should be ignored.
pub async fn rates_reply<M: MarketData>(api: &RateQuoteApi<M>, frame: &str) -> Option<String> {
    let pair = parse_pair(frame)?;
    let reply = match api.get_rate(&pair).await {
        Ok(rate) => json!({ "rate": rate }),
        Err(e) => error_frame("rates", &e),
    };
    Some(reply.to_string())
}

/// The reply to one traders frame, or `None` when the frame should be ignored.
pub async fn traders_reply<T: TraderDirectory>(api: &TraderFeedApi<T>, frame: &str) -> Option<String> {
    let pair = parse_pair(frame)?;
    let reply = match api.get_traders(&pair).await {
        Ok(traders) => json!({ "traders": traders }),
        Err(e) => error_frame("traders", &e),
    };
    Some(reply.to_string())
}

fn parse_pair(frame: &str) -> Option<PairRequest> {
    match serde_json::from_str::<PairRequest>(frame) {
        Ok(pair) => Some(pair),
        Err(e) => {
            warn!("🔌️ Ignoring unparseable frame. {e}");
            None
        },
    }
}

fn error_frame(feed: &str, err: &ApiError) -> Value {
    warn!("🔌️ {feed} lookup failed. {err}");
    json!({ "error": err.to_string() })
}

fn log_open(feed: &str, req: &HttpRequest) {
    let peer = req.connection_info().realip_remote_addr().unwrap_or("unknown").to_string();
    info!("🔌️ {feed} feed opened by {peer}");
}

async fn run_feed<F, Fut>(mut session: Session, mut stream: MessageStream, feed: &'static str, reply: F)
where
    F: Fn(String) -> Fut,
    Fut: Future<Output = Option<String>>,
{
    let reason = loop {
        let Some(msg) = stream.next().await else { break None };
        match msg {
            Ok(Message::Text(text)) => {
                if let Some(answer) = reply(text.to_string()).await {
                    if session.text(answer).await.is_err() {
                        debug!("🔌️ {feed} client went away");
                        return;
                    }
                }
            },
            Ok(Message::Ping(bytes)) => {
                if session.pong(&bytes).await.is_err() {
                    return;
                }
            },
            Ok(Message::Close(reason)) => break reason,
            Ok(Message::Binary(_)) => debug!("🔌️ Ignoring binary frame on the {feed} feed"),
            Ok(_) => {},
            Err(e) => {
                warn!("🔌️ Protocol error on the {feed} feed. {e}");
                break None;
            },
        }
    };
    let _ = session.close(reason).await;
    info!("🔌️ {feed} feed closed");
}
