//! Exchange order responses.
//!
//! The core never interprets these beyond what the presenter displays;
//! fields the exchange adds are kept in `extra`.

use crate::decimal::{Price, Size};
use crate::order::{OrderSide, OrderType};
use serde::{Deserialize, Serialize};

/// Response to a successful order placement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderResult {
    pub order_id: i64,
    pub symbol: String,
    pub side: OrderSide,
    /// Raw order type as echoed by the exchange.
    #[serde(rename = "type")]
    pub order_type: String,
    pub status: String,
    #[serde(default)]
    pub price: Option<Price>,
    #[serde(default)]
    pub stop_price: Option<Price>,
    #[serde(default)]
    pub orig_qty: Option<Size>,
    #[serde(default)]
    pub executed_qty: Option<Size>,
    #[serde(default)]
    pub avg_price: Option<Price>,
    #[serde(default)]
    pub reduce_only: bool,
    #[serde(default)]
    pub time_in_force: Option<String>,
    #[serde(default)]
    pub client_order_id: Option<String>,
    #[serde(default)]
    pub update_time: Option<i64>,
    /// Everything else the exchange returned.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl OrderResult {
    /// Parsed order type, `None` for types this tool never submits.
    pub fn parsed_type(&self) -> Option<OrderType> {
        self.order_type.parse().ok()
    }
}

/// Both legs of a fully placed OCO pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OcoResult {
    pub take_profit: OrderResult,
    pub stop_loss: OrderResult,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parse_exchange_response() {
        let body = r#"{
            "clientOrderId": "futbot_1700000000000_abcd1234",
            "cumQty": "0",
            "cumQuote": "0",
            "executedQty": "0",
            "orderId": 4022957,
            "avgPrice": "0.00",
            "origQty": "1",
            "price": "0",
            "reduceOnly": true,
            "side": "SELL",
            "positionSide": "BOTH",
            "status": "NEW",
            "stopPrice": "3500",
            "closePosition": false,
            "symbol": "ETHUSDT",
            "timeInForce": "GTC",
            "type": "STOP_MARKET",
            "origType": "STOP_MARKET",
            "updateTime": 1700000000123
        }"#;

        let result: OrderResult = serde_json::from_str(body).unwrap();
        assert_eq!(result.order_id, 4022957);
        assert_eq!(result.side, OrderSide::Sell);
        assert_eq!(result.parsed_type(), Some(OrderType::StopMarket));
        assert_eq!(result.stop_price, Some(Price::new(dec!(3500))));
        assert_eq!(result.orig_qty, Some(Size::new(dec!(1))));
        assert!(result.reduce_only);
        assert_eq!(
            result.extra.get("positionSide").and_then(|v| v.as_str()),
            Some("BOTH")
        );
    }

    #[test]
    fn test_parse_minimal_response() {
        let body = r#"{"orderId":1,"symbol":"BTCUSDT","side":"BUY","type":"MARKET","status":"FILLED"}"#;
        let result: OrderResult = serde_json::from_str(body).unwrap();
        assert_eq!(result.status, "FILLED");
        assert!(result.price.is_none());
        assert!(result.extra.is_empty());
    }

    #[test]
    fn test_unknown_type_passes_through() {
        let body = r#"{"orderId":1,"symbol":"BTCUSDT","side":"BUY","type":"TRAILING_STOP_MARKET","status":"NEW"}"#;
        let result: OrderResult = serde_json::from_str(body).unwrap();
        assert_eq!(result.order_type, "TRAILING_STOP_MARKET");
        assert!(result.parsed_type().is_none());
    }
}
