use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use papertrade_core::errors::{DatabaseError, Error as CoreError};
use papertrade_core::portfolio::trading::TradeError;
use papertrade_core::portfolio::valuation::ValuationError;
use papertrade_market_data::MarketDataError;
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    Core(#[from] CoreError),
    #[error("{0}")]
    Trade(#[from] TradeError),
    #[error("{0}")]
    MarketData(#[from] MarketDataError),
    #[error("Not Found")]
    NotFound,
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    Unauthorized(String),
    #[error("{0}")]
    Internal(String),
    #[error("{0}")]
    Anyhow(#[from] anyhow::Error),
}

#[derive(Serialize)]
struct ErrorBody {
    code: u16,
    message: String,
}

fn market_data_status(err: &MarketDataError) -> StatusCode {
    match err {
        MarketDataError::SymbolNotFound(_) => StatusCode::NOT_FOUND,
        MarketDataError::RateLimited { .. } | MarketDataError::Timeout { .. } => {
            StatusCode::SERVICE_UNAVAILABLE
        }
        MarketDataError::ProviderError { .. }
        | MarketDataError::ValidationFailed { .. }
        | MarketDataError::Network(_) => StatusCode::BAD_GATEWAY,
    }
}

fn trade_status(err: &TradeError) -> StatusCode {
    match err {
        e if e.is_user_error() => StatusCode::UNPROCESSABLE_ENTITY,
        TradeError::AccountNotFound(_) => StatusCode::NOT_FOUND,
        e @ TradeError::QuoteUnavailable { .. } if e.is_transient() => {
            StatusCode::SERVICE_UNAVAILABLE
        }
        TradeError::QuoteUnavailable { .. } => StatusCode::BAD_GATEWAY,
        _ => StatusCode::SERVICE_UNAVAILABLE,
    }
}

fn core_status(err: &CoreError) -> StatusCode {
    match err {
        CoreError::Database(DatabaseError::NotFound(_)) => StatusCode::NOT_FOUND,
        CoreError::Database(DatabaseError::UniqueViolation(_)) => StatusCode::CONFLICT,
        CoreError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        CoreError::Trade(e) => trade_status(e),
        CoreError::Valuation(ValuationError::AccountNotFound(_)) => StatusCode::NOT_FOUND,
        CoreError::Valuation(_) => StatusCode::BAD_GATEWAY,
        CoreError::MarketData(e) => market_data_status(e),
        CoreError::Validation(_) => StatusCode::BAD_REQUEST,
        CoreError::Unexpected(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Core(e) => core_status(e),
            ApiError::Trade(e) => trade_status(e),
            ApiError::MarketData(e) => market_data_status(e),
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Internal(_) | ApiError::Anyhow(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::warn!("Request failed with {}: {}", status, self);
        }
        let body = Json(ErrorBody {
            code: status.as_u16(),
            message: self.to_string(),
        });
        (status, body).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
