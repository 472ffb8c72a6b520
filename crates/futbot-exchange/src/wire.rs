//! Wire format for the futures REST API.

use futbot_core::{OrderRequest, OrderType};
use serde::Deserialize;

use crate::error::ExchangeError;
use crate::signer::QueryParams;

/// Order placement endpoint.
pub const ORDER_PATH: &str = "/fapi/v1/order";
/// Account information endpoint (used as the session probe).
pub const ACCOUNT_PATH: &str = "/fapi/v2/account";
/// Header carrying the API key.
pub const API_KEY_HEADER: &str = "X-MBX-APIKEY";

/// Error body returned with non-2xx responses.
#[derive(Debug, Deserialize)]
pub struct ApiErrorBody {
    pub code: i64,
    pub msg: String,
}

/// Order parameters in the order the exchange documents them.
///
/// Only the fields meaningful for the order type are emitted; `reduceOnly`
/// is omitted rather than sent as `false`.
pub fn order_params(order: &OrderRequest) -> QueryParams {
    let mut params = QueryParams::new();
    params
        .push("symbol", order.symbol.as_str())
        .push("side", order.side.as_str())
        .push("type", order.order_type.as_str());

    if order.order_type == OrderType::Limit {
        if let Some(tif) = order.time_in_force {
            params.push("timeInForce", tif.as_str());
        }
    }

    params.push("quantity", order.quantity.to_wire());

    if let Some(price) = order.price {
        params.push("price", price.to_wire());
    }
    if let Some(stop_price) = order.stop_price {
        params.push("stopPrice", stop_price.to_wire());
    }
    if order.reduce_only {
        params.push("reduceOnly", "true");
    }
    if let Some(id) = &order.client_order_id {
        params.push("newClientOrderId", id.as_str());
    }
    params
}

/// Turn a non-2xx response into an error, keeping the exchange's detail.
pub fn error_from_response(status: u16, body: &str) -> ExchangeError {
    match serde_json::from_str::<ApiErrorBody>(body) {
        Ok(err) => ExchangeError::Api {
            code: err.code,
            msg: err.msg,
        },
        Err(_) => ExchangeError::Http {
            status,
            body: body.to_string(),
        },
    }
}
