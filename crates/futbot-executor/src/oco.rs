//! Take-profit / stop-loss pair placement.
//!
//! Two sequential, independent orders on the closing side of a position:
//! a reduce-only LIMIT at the take-profit price, then a reduce-only
//! STOP_MARKET at the stop-loss price. There is no rollback. If the
//! second leg fails the first stays on the book.

use futbot_core::{OcoRequest, OcoResult};
use futbot_exchange::Session;
use tracing::{info, warn};

use crate::error::OcoError;
use crate::reporter::Reporter;
use crate::submitter::submit;

/// Place the take-profit leg, then the stop-loss leg.
///
/// Both legs are derived up front; an underivable leg fails with
/// `OcoError::InvalidRequest` before anything is sent.
pub async fn place_oco(
    session: &Session,
    request: &OcoRequest,
    reporter: &dyn Reporter,
) -> Result<OcoResult, OcoError> {
    let take_profit_leg = request.take_profit_leg()?;
    let stop_loss_leg = request.stop_loss_leg()?;

    info!(
        symbol = %request.symbol,
        position_side = %request.original_side,
        closing_side = %request.closing_side(),
        quantity = %request.quantity,
        take_profit = %request.take_profit_price,
        stop_loss = %request.stop_loss_price,
        "Placing OCO orders"
    );

    let take_profit = submit(session, &take_profit_leg, reporter)
        .await
        .map_err(OcoError::TakeProfitFailed)?;

    let stop_loss = match submit(session, &stop_loss_leg, reporter).await {
        Ok(result) => result,
        Err(source) => {
            warn!(
                take_profit_order_id = take_profit.order_id,
                symbol = %take_profit.symbol,
                "Stop-loss leg failed; take-profit order remains open and must be reconciled manually"
            );
            return Err(OcoError::StopLossFailed {
                take_profit: Box::new(take_profit),
                source,
            });
        }
    };

    Ok(OcoResult {
        take_profit,
        stop_loss,
    })
}
