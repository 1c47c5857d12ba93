use actix_web::{
    error::ResponseError,
    http::{header::ContentType, StatusCode},
    HttpResponse,
};
use peerbill_engine::{ApiError, StatusKind};
use serde_json::json;

use crate::grpc::status::grpc_code;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Could not initialize server. {0}")]
    InitializeError(String),
    #[error("An I/O error happened in the server. {0}")]
    IOError(#[from] std::io::Error),
    #[error("Invalid server configuration. {0}")]
    ConfigurationError(String),
    #[error("Could not apply database migrations. {0}")]
    MigrationError(String),
    #[error("The gRPC listener failed. {0}")]
    GrpcError(String),
    #[error("{0}")]
    Api(#[from] ApiError),
}

/// The gRPC status code number for each outcome category, so that JSON clients see the same codes as gRPC clients.
pub fn grpc_code_number(kind: StatusKind) -> i32 {
    grpc_code(kind) as i32
}

pub fn http_status(kind: StatusKind) -> StatusCode {
    match kind {
        StatusKind::InvalidArgument => StatusCode::BAD_REQUEST,
        StatusKind::NotFound => StatusCode::NOT_FOUND,
        StatusKind::FailedPrecondition => StatusCode::PRECONDITION_FAILED,
        StatusKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl ResponseError for ServerError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::Api(e) => http_status(e.code()),
            Self::InitializeError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::IOError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::ConfigurationError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::MigrationError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::GrpcError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let body = match self {
            Self::Api(e) => {
                let details: Vec<serde_json::Value> = e
                    .violations()
                    .map(|v| v.iter().map(|f| json!({"field": f.field, "description": f.description})).collect())
                    .unwrap_or_default();
                json!({ "code": grpc_code_number(e.code()), "message": e.to_string(), "details": details })
            },
            _ => json!({ "error": self.to_string() }),
        };
        HttpResponse::build(self.status_code()).insert_header(ContentType::json()).body(body.to_string())
    }
}

#[cfg(test)]
mod test {
    use actix_web::body::MessageBody;
    use peerbill_engine::validation::FieldViolations;

    use super::*;

    fn body_of(err: &ServerError) -> serde_json::Value {
        let bytes = err.error_response().into_body().try_into_bytes().unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn validation_errors_list_every_field() {
        let mut violations = FieldViolations::new();
        violations.check("id", Err("must be a positive integer".into())).check("username", Err("too short".into()));
        let err = ServerError::from(ApiError::from(violations));
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        let body = body_of(&err);
        assert_eq!(body["code"], 3);
        assert_eq!(body["details"][0]["field"], "id");
        assert_eq!(body["details"][1]["field"], "username");
        assert_eq!(body["details"][1]["description"], "too short");
    }

    #[test]
    fn flow_errors_map_to_http_statuses() {
        let cases = [
            (ApiError::NotFound("no order".into()), StatusCode::NOT_FOUND, 5),
            (ApiError::Precondition("not yet".into()), StatusCode::PRECONDITION_FAILED, 9),
            (ApiError::Transfer("reverted".into()), StatusCode::INTERNAL_SERVER_ERROR, 13),
            (
                ApiError::InsufficientBalance { balance: "0.1 ETH".into(), required: "0.5 ETH".into() },
                StatusCode::BAD_REQUEST,
                3,
            ),
        ];
        for (api_err, status, code) in cases {
            let err = ServerError::from(api_err);
            assert_eq!(err.status_code(), status);
            let body = body_of(&err);
            assert_eq!(body["code"], code);
            assert_eq!(body["details"], json!([]));
        }
    }

    #[test]
    fn json_codes_match_tonic_codes() {
        use tonic::Code;
        assert_eq!(grpc_code_number(StatusKind::InvalidArgument), Code::InvalidArgument as i32);
        assert_eq!(grpc_code_number(StatusKind::NotFound), Code::NotFound as i32);
        assert_eq!(grpc_code_number(StatusKind::FailedPrecondition), 9);
        assert_eq!(grpc_code_number(StatusKind::Internal), 13);
    }

    #[test]
    fn bootstrap_errors_use_the_plain_shape() {
        let err = ServerError::ConfigurationError("PBG_DB_SOURCE is not set".into());
        assert_eq!(body_of(&err)["error"], "Invalid server configuration. PBG_DB_SOURCE is not set");
    }
}
