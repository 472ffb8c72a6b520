//! Order request types.
//!
//! `OrderRequest` carries one exchange order. Which of `price`, `stop_price`
//! and `time_in_force` must be present is fixed by `order_type`:
//!
//! | type        | price | stop_price | time_in_force |
//! |-------------|-------|------------|---------------|
//! | MARKET      | -     | -          | -             |
//! | LIMIT       | req   | -          | req           |
//! | STOP_MARKET | -     | req        | -             |
//!
//! `OcoRequest` derives the two reduce-only legs that protect an open position.

use crate::decimal::{Price, Size};
use crate::error::{CoreError, Result};
use crate::order::{ClientOrderId, OrderSide, OrderType, TimeInForce};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Exchange instrument id, normalized to upper case (e.g. `BTCUSDT`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Symbol(String);

impl Symbol {
    pub fn new(raw: &str) -> Result<Self> {
        let symbol = raw.trim().to_ascii_uppercase();
        if symbol.is_empty() {
            return Err(CoreError::InvalidSymbol("symbol is empty".to_string()));
        }
        if !symbol
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_')
        {
            return Err(CoreError::InvalidSymbol(raw.to_string()));
        }
        Ok(Self(symbol))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A single order to be sent to the exchange.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderRequest {
    pub symbol: Symbol,
    pub side: OrderSide,
    pub order_type: OrderType,
    pub quantity: Size,
    /// Limit price (LIMIT only).
    pub price: Option<Price>,
    /// Trigger price (STOP_MARKET only).
    pub stop_price: Option<Price>,
    pub reduce_only: bool,
    /// Required for LIMIT, absent otherwise.
    pub time_in_force: Option<TimeInForce>,
    /// Sent as `newClientOrderId` when present.
    pub client_order_id: Option<ClientOrderId>,
}

impl OrderRequest {
    /// Start building an order of the given type.
    pub fn builder(symbol: Symbol, side: OrderSide, order_type: OrderType) -> OrderRequestBuilder {
        OrderRequestBuilder::new(symbol, side, order_type)
    }

    /// Market order.
    pub fn market(symbol: Symbol, side: OrderSide, quantity: Size) -> Result<Self> {
        Self::builder(symbol, side, OrderType::Market)
            .quantity(quantity)
            .build()
    }

    /// Good-till-canceled limit order.
    pub fn limit(symbol: Symbol, side: OrderSide, quantity: Size, price: Price) -> Result<Self> {
        Self::builder(symbol, side, OrderType::Limit)
            .quantity(quantity)
            .price(price)
            .time_in_force(TimeInForce::GoodTillCanceled)
            .build()
    }

    /// Stop-market order triggered at `stop_price`.
    pub fn stop_market(
        symbol: Symbol,
        side: OrderSide,
        quantity: Size,
        stop_price: Price,
    ) -> Result<Self> {
        Self::builder(symbol, side, OrderType::StopMarket)
            .quantity(quantity)
            .stop_price(stop_price)
            .build()
    }

    /// Check the type-dependent field invariant.
    pub fn validate(&self) -> Result<()> {
        if !self.quantity.is_positive() {
            return Err(CoreError::InvalidSize(format!(
                "{}: must be positive",
                self.quantity
            )));
        }
        let order_type = self.order_type.as_str();

        match self.order_type {
            OrderType::Market => {
                reject_present(order_type, "price", self.price.is_some())?;
                reject_present(order_type, "stopPrice", self.stop_price.is_some())?;
                reject_present(order_type, "timeInForce", self.time_in_force.is_some())?;
            }
            OrderType::Limit => {
                require_positive(order_type, "price", self.price)?;
                reject_present(order_type, "stopPrice", self.stop_price.is_some())?;
                if self.time_in_force.is_none() {
                    return Err(CoreError::MissingField {
                        order_type,
                        field: "timeInForce",
                    });
                }
            }
            OrderType::StopMarket => {
                require_positive(order_type, "stopPrice", self.stop_price)?;
                reject_present(order_type, "price", self.price.is_some())?;
                reject_present(order_type, "timeInForce", self.time_in_force.is_some())?;
            }
        }
        Ok(())
    }
}

fn require_positive(order_type: &'static str, field: &'static str, value: Option<Price>) -> Result<()> {
    match value {
        None => Err(CoreError::MissingField { order_type, field }),
        Some(p) if !p.is_positive() => Err(CoreError::InvalidPrice(format!(
            "{field} {p}: must be positive"
        ))),
        Some(_) => Ok(()),
    }
}

fn reject_present(order_type: &'static str, field: &'static str, present: bool) -> Result<()> {
    if present {
        return Err(CoreError::UnexpectedField { order_type, field });
    }
    Ok(())
}

impl fmt::Display for OrderRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            self.order_type, self.side, self.quantity, self.symbol
        )?;
        if let Some(price) = self.price {
            write!(f, " @ {price}")?;
        }
        if let Some(stop) = self.stop_price {
            write!(f, " stop {stop}")?;
        }
        if self.reduce_only {
            write!(f, " (reduce-only)")?;
        }
        Ok(())
    }
}

/// Builder for [`OrderRequest`]; `build` enforces the type invariant.
#[derive(Debug, Clone)]
pub struct OrderRequestBuilder {
    symbol: Symbol,
    side: OrderSide,
    order_type: OrderType,
    quantity: Size,
    price: Option<Price>,
    stop_price: Option<Price>,
    reduce_only: bool,
    time_in_force: Option<TimeInForce>,
    client_order_id: Option<ClientOrderId>,
}

impl OrderRequestBuilder {
    pub fn new(symbol: Symbol, side: OrderSide, order_type: OrderType) -> Self {
        Self {
            symbol,
            side,
            order_type,
            quantity: Size::ZERO,
            price: None,
            stop_price: None,
            reduce_only: false,
            time_in_force: None,
            client_order_id: None,
        }
    }

    pub fn quantity(mut self, quantity: Size) -> Self {
        self.quantity = quantity;
        self
    }

    pub fn price(mut self, price: Price) -> Self {
        self.price = Some(price);
        self
    }

    pub fn stop_price(mut self, stop_price: Price) -> Self {
        self.stop_price = Some(stop_price);
        self
    }

    pub fn reduce_only(mut self, reduce_only: bool) -> Self {
        self.reduce_only = reduce_only;
        self
    }

    pub fn time_in_force(mut self, tif: TimeInForce) -> Self {
        self.time_in_force = Some(tif);
        self
    }

    pub fn client_order_id(mut self, id: ClientOrderId) -> Self {
        self.client_order_id = Some(id);
        self
    }

    pub fn build(self) -> Result<OrderRequest> {
        let request = OrderRequest {
            symbol: self.symbol,
            side: self.side,
            order_type: self.order_type,
            quantity: self.quantity,
            price: self.price,
            stop_price: self.stop_price,
            reduce_only: self.reduce_only,
            time_in_force: self.time_in_force,
            client_order_id: self.client_order_id,
        };
        request.validate()?;
        Ok(request)
    }
}

/// Take-profit / stop-loss pair protecting an existing position.
///
/// The two legs are independent exchange orders. Nothing links them: a fill
/// on one leg does not cancel the other.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OcoRequest {
    pub symbol: Symbol,
    /// Side of the position being protected (BUY = long).
    pub original_side: OrderSide,
    pub quantity: Size,
    pub take_profit_price: Price,
    pub stop_loss_price: Price,
}

impl OcoRequest {
    pub fn new(
        symbol: Symbol,
        original_side: OrderSide,
        quantity: Size,
        take_profit_price: Price,
        stop_loss_price: Price,
    ) -> Result<Self> {
        if !quantity.is_positive() {
            return Err(CoreError::InvalidSize(format!("{quantity}: must be positive")));
        }
        if !take_profit_price.is_positive() {
            return Err(CoreError::InvalidPrice(format!(
                "take profit {take_profit_price}: must be positive"
            )));
        }
        if !stop_loss_price.is_positive() {
            return Err(CoreError::InvalidPrice(format!(
                "stop loss {stop_loss_price}: must be positive"
            )));
        }
        Ok(Self {
            symbol,
            original_side,
            quantity,
            take_profit_price,
            stop_loss_price,
        })
    }

    /// Side both legs are placed on.
    pub fn closing_side(&self) -> OrderSide {
        self.original_side.opposite()
    }

    /// Reduce-only GTC limit at the take-profit price.
    pub fn take_profit_leg(&self) -> Result<OrderRequest> {
        OrderRequest::builder(self.symbol.clone(), self.closing_side(), OrderType::Limit)
            .quantity(self.quantity)
            .price(self.take_profit_price)
            .time_in_force(TimeInForce::GoodTillCanceled)
            .reduce_only(true)
            .build()
    }

    /// Reduce-only stop-market triggered at the stop-loss price.
    pub fn stop_loss_leg(&self) -> Result<OrderRequest> {
        OrderRequest::builder(self.symbol.clone(), self.closing_side(), OrderType::StopMarket)
            .quantity(self.quantity)
            .stop_price(self.stop_loss_price)
            .reduce_only(true)
            .build()
    }
}
