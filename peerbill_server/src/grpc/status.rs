use peerbill_engine::{ApiError, StatusKind};
use tonic::{Code, Status};
use tonic_types::{ErrorDetails, StatusExt};

pub fn grpc_code(kind: StatusKind) -> Code {
    match kind {
        StatusKind::InvalidArgument => Code::InvalidArgument,
        StatusKind::NotFound => Code::NotFound,
        StatusKind::FailedPrecondition => Code::FailedPrecondition,
        StatusKind::Internal => Code::Internal,
    }
}

/// Converts a flow error into a gRPC status. Validation failures carry a `google.rpc.BadRequest` detail with one entry
/// per offending field.
pub fn api_status(err: &ApiError) -> Status {
    let code = grpc_code(err.code());
    match err.violations() {
        Some(violations) => {
            let mut details = ErrorDetails::new();
            for violation in violations.iter() {
                details.add_bad_request_violation(violation.field.clone(), violation.description.clone());
            }
            Status::with_error_details(code, err.to_string(), details)
        },
        None => Status::new(code, err.to_string()),
    }
}
