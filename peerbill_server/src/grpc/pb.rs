//! Wire messages of the `pb.PeerbillUser` service (see `proto/peerbill_user.proto`).
//!
//! The same types are the JSON gateway's request and response bodies, so the field names are the proto names.
use peerbill_engine::request_objects;
use serde::{Deserialize, Serialize};

#[derive(Clone, PartialEq, ::prost::Message, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerateWalletRequest {
    #[prost(string, tag = "1")]
    pub crypto: String,
}

#[derive(Clone, PartialEq, ::prost::Message, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerateWalletResponse {
    #[prost(string, tag = "1")]
    pub address: String,
}

#[derive(Clone, PartialEq, ::prost::Message, Serialize, Deserialize)]
#[serde(default)]
pub struct RateRequest {
    #[prost(string, tag = "1")]
    pub crypto: String,
    #[prost(string, tag = "2")]
    pub fiat: String,
}

#[derive(Clone, PartialEq, ::prost::Message, Serialize, Deserialize)]
#[serde(default)]
pub struct RateResponse {
    #[prost(double, tag = "1")]
    pub rate: f64,
}

#[derive(Clone, PartialEq, ::prost::Message, Serialize, Deserialize)]
#[serde(default)]
pub struct MadePaymentRequest {
    #[prost(int64, tag = "1")]
    pub id: i64,
    #[prost(string, tag = "2")]
    pub order_type: String,
    #[prost(string, tag = "3")]
    pub username: String,
    #[prost(string, tag = "4")]
    pub user_address: String,
    #[prost(string, tag = "5")]
    pub escrow_address: String,
}

#[derive(Clone, PartialEq, ::prost::Message, Serialize, Deserialize)]
#[serde(default)]
pub struct MadePaymentResponse {
    #[prost(string, tag = "1")]
    pub message: String,
}

#[derive(Clone, PartialEq, ::prost::Message, Serialize, Deserialize)]
#[serde(default)]
pub struct UpdateOrderRequest {
    #[prost(int64, tag = "1")]
    pub id: i64,
    #[prost(string, tag = "2")]
    pub username: String,
    #[prost(string, tag = "3")]
    pub order_type: String,
    #[prost(string, optional, tag = "4")]
    pub bank_name: Option<String>,
    #[prost(string, optional, tag = "5")]
    pub account_number: Option<String>,
    #[prost(string, optional, tag = "6")]
    pub account_holder: Option<String>,
}

#[derive(Clone, PartialEq, ::prost::Message, Serialize, Deserialize)]
#[serde(default)]
pub struct UpdateOrderResponse {
    #[prost(string, tag = "1")]
    pub message: String,
}

impl From<RateRequest> for request_objects::PairRequest {
    fn from(req: RateRequest) -> Self {
        Self { crypto: req.crypto, fiat: req.fiat }
    }
}

impl From<MadePaymentRequest> for request_objects::MadePaymentRequest {
    fn from(req: MadePaymentRequest) -> Self {
        Self {
            id: req.id,
            order_type: req.order_type,
            username: req.username,
            user_address: req.user_address,
            escrow_address: req.escrow_address,
        }
    }
}

// Clients that can't send an absent optional send "" instead.
fn present(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}

impl From<UpdateOrderRequest> for request_objects::UpdateOrderRequest {
    fn from(req: UpdateOrderRequest) -> Self {
        Self {
            id: req.id,
            username: req.username,
            order_type: req.order_type,
            bank_name: present(req.bank_name),
            account_number: present(req.account_number),
            account_holder: present(req.account_holder),
        }
    }
}
