use std::time::Instant;

use log::*;
use tonic::{Code, Response, Status};

/// Writes one access log line for a finished RPC.
pub fn log_call<T>(method: &str, started: Instant, result: &Result<Response<T>, Status>) {
    let duration = started.elapsed();
    match result {
        Ok(_) => info!("📡️ protocol=grpc method={method} status_code={:?} duration={duration:?}", Code::Ok),
        Err(status) => error!(
            "📡️ protocol=grpc method={method} status_code={:?} status_text=\"{}\" duration={duration:?}",
            status.code(),
            status.message()
        ),
    }
}
