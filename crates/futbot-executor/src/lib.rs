//! Order execution for futbot.
//!
//! - `submit`: one order, one network call, no retry
//! - `place_oco`: take-profit leg then stop-loss leg, no linkage between them
//! - `Reporter`: injected sink for attempt/success/failure events
//!
//! # Partial OCO failure
//!
//! The two OCO legs are independent exchange orders. If the take-profit leg
//! is accepted and the stop-loss leg is rejected, the take-profit order stays
//! live and nothing cancels it. [`OcoError::StopLossFailed`] carries that
//! live order so the caller can tell the operator what to clean up.

pub mod error;
pub mod oco;
pub mod reporter;
pub mod submitter;

pub use error::OcoError;
pub use oco::place_oco;
pub use reporter::{RecordingReporter, ReportEvent, Reporter, TracingReporter};
pub use submitter::submit;
