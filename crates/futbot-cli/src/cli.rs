//! Command-line interface.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use futbot_core::{OrderSide, Price, Size, Symbol};

/// A CLI-based trading bot for Binance USDT-M Futures (testnet)
#[derive(Parser, Debug)]
#[command(name = "futbot", version, about, long_about = None)]
pub struct Cli {
    /// Configuration file path (can also be set via FUTBOT_CONFIG env var)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Do not print the welcome banner
    #[arg(long, global = true)]
    pub no_banner: bool,

    /// Plain output without ANSI colours
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Echo all log events to the console, not just warnings
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Place a market order
    Market(MarketArgs),
    /// Place a GTC limit order
    Limit(LimitArgs),
    /// Place a take-profit / stop-loss pair closing an existing position
    Oco(OcoArgs),
}

impl Command {
    /// Short label used in progress messages.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Market(_) => "market",
            Self::Limit(_) => "limit",
            Self::Oco(_) => "OCO",
        }
    }
}

#[derive(Args, Debug, Clone, PartialEq)]
pub struct MarketArgs {
    /// Trading pair, e.g. BTCUSDT
    #[arg(value_parser = parse_symbol)]
    pub symbol: Symbol,
    /// BUY or SELL
    #[arg(value_parser = parse_side)]
    pub side: OrderSide,
    /// Order quantity in base asset
    #[arg(value_parser = parse_size)]
    pub quantity: Size,
}

#[derive(Args, Debug, Clone, PartialEq)]
pub struct LimitArgs {
    /// Trading pair, e.g. BTCUSDT
    #[arg(value_parser = parse_symbol)]
    pub symbol: Symbol,
    /// BUY or SELL
    #[arg(value_parser = parse_side)]
    pub side: OrderSide,
    /// Order quantity in base asset
    #[arg(value_parser = parse_size)]
    pub quantity: Size,
    /// Limit price
    #[arg(value_parser = parse_price)]
    pub price: Price,
}

#[derive(Args, Debug, Clone, PartialEq)]
pub struct OcoArgs {
    /// Trading pair, e.g. ETHUSDT
    #[arg(value_parser = parse_symbol)]
    pub symbol: Symbol,
    /// Side of the existing position (BUY for long, SELL for short)
    #[arg(value_parser = parse_side)]
    pub side: OrderSide,
    /// Position quantity to protect
    #[arg(value_parser = parse_size)]
    pub quantity: Size,
    /// Take-profit limit price
    #[arg(value_parser = parse_price)]
    pub take_profit_price: Price,
    /// Stop-loss trigger price
    #[arg(value_parser = parse_price)]
    pub stop_loss_price: Price,
}

fn parse_symbol(s: &str) -> Result<Symbol, String> {
    Symbol::new(s).map_err(|e| e.to_string())
}

fn parse_side(s: &str) -> Result<OrderSide, String> {
    s.parse().map_err(|e: futbot_core::CoreError| e.to_string())
}

fn parse_size(s: &str) -> Result<Size, String> {
    Size::parse_positive(s).map_err(|e| e.to_string())
}

fn parse_price(s: &str) -> Result<Price, String> {
    Price::parse_positive(s).map_err(|e| e.to_string())
}
