//! The `pb.PeerbillUser` gRPC service.
//!
//! Messages live in [`pb`]; the server scaffolding is generated by `build.rs`.
pub mod logger;
pub mod pb;
mod service;
pub mod status;

mod generated {
    include!(concat!(env!("OUT_DIR"), "/pb.PeerbillUser.rs"));
}

pub use generated::peerbill_user_server::{PeerbillUser, PeerbillUserServer};
pub use service::PeerbillUserService;
