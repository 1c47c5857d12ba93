//! Generates the `pb.PeerbillUser` service scaffolding. Messages are hand-written prost types in `src/grpc/pb.rs`, so
//! no `protoc` is needed at build time. `proto/peerbill_user.proto` describes the same contract for clients.
use tonic_build::manual::{Builder, Method, Service};

fn method(name: &str, route: &str, input: &str, output: &str) -> Method {
    Method::builder()
        .name(name)
        .route_name(route)
        .input_type(format!("crate::grpc::pb::{input}"))
        .output_type(format!("crate::grpc::pb::{output}"))
        .codec_path("tonic::codec::ProstCodec")
        .build()
}

fn main() {
    let service = Service::builder()
        .name("PeerbillUser")
        .package("pb")
        .method(method("generate_wallet", "GenerateWallet", "GenerateWalletRequest", "GenerateWalletResponse"))
        .method(method("get_rates", "GetRates", "RateRequest", "RateResponse"))
        .method(method("made_payment", "MadePayment", "MadePaymentRequest", "MadePaymentResponse"))
        .method(method("update_order", "UpdateOrder", "UpdateOrderRequest", "UpdateOrderResponse"))
        .build();
    Builder::new().build_client(false).compile(&[service]);
    println!("cargo:rerun-if-changed=build.rs");
}
