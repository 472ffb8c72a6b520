//! Result presenter.
//!
//! Every method returns the rendered text; `main` decides where it goes
//! (results on stdout, errors on stderr). Colour is applied after padding
//! so column widths are computed on visible text only.

use std::io::IsTerminal;

use crossterm::style::{style, Stylize};
use futbot_core::{OrderResult, OrderSide};
use futbot_exchange::{ErrorKind, Session};

use crate::app::Outcome;
use crate::error::AppError;

const BANNER: &str = r"
    ______      __                          ____        __
   / ____/_  __/ /___  __________  _____   / __ )____  / /_
  / /_  / / / / __/ / / / ___/ _ \/ ___/  / __  / __ \/ __/
 / __/ / /_/ / /_/ /_/ / /  /  __(__  )  / /_/ / /_/ / /_
/_/    \__,_/\__/\__,_/_/   \___/____/  /_____/\____/\__/
";

const SUBTITLE: &str = "A CLI-Based Trading Bot for Binance USDT-M Futures";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tone {
    Plain,
    Title,
    Header,
    Accent,
    Good,
    Bad,
    Warn,
}

/// One table cell: visible text plus its colour.
type Cell = (String, Tone);

struct Table {
    title: String,
    headers: Vec<&'static str>,
    rows: Vec<Vec<Cell>>,
}

/// Console renderer.
#[derive(Debug, Clone, Copy)]
pub struct Presenter {
    color: bool,
}

impl Presenter {
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    /// Colour only for an interactive stdout, unless disabled by flag or
    /// `NO_COLOR`.
    pub fn detect(no_color: bool) -> Self {
        let color = !no_color
            && std::env::var_os("NO_COLOR").is_none()
            && std::io::stdout().is_terminal();
        Self::new(color)
    }

    pub fn uses_color(&self) -> bool {
        self.color
    }

    pub fn banner(&self) -> String {
        format!(
            "{}\n{}\n",
            self.paint(BANNER.trim_end(), Tone::Title),
            self.paint(SUBTITLE, Tone::Accent)
        )
    }

    pub fn connected(&self, session: &Session) -> String {
        self.paint(
            &format!("Successfully connected to {}", session.base_url()),
            Tone::Good,
        )
    }

    pub fn progress(&self, label: &str) -> String {
        format!("Placing {label} order...")
    }

    pub fn outcome(&self, outcome: &Outcome) -> String {
        match outcome {
            Outcome::Market(result) => self.market_table(result),
            Outcome::Limit(result) => self.limit_table(result),
            Outcome::Oco(result) => self.oco_table(&result.take_profit, &result.stop_loss),
        }
    }

    pub fn market_table(&self, result: &OrderResult) -> String {
        self.render(&Table {
            title: "Market Order Placed Successfully".to_string(),
            headers: vec!["Attribute", "Value"],
            rows: vec![
                attr("Order ID", result.order_id.to_string(), Tone::Accent),
                attr("Symbol", result.symbol.clone(), Tone::Plain),
                attr("Side", result.side.to_string(), side_tone(result.side)),
                attr("Quantity", quantity(result), Tone::Plain),
                attr("Status", result.status.clone(), status_tone(&result.status)),
            ],
        })
    }

    pub fn limit_table(&self, result: &OrderResult) -> String {
        self.render(&Table {
            title: "Limit Order Placed Successfully".to_string(),
            headers: vec!["Attribute", "Value"],
            rows: vec![
                attr("Order ID", result.order_id.to_string(), Tone::Accent),
                attr("Symbol", result.symbol.clone(), Tone::Plain),
                attr("Side", result.side.to_string(), side_tone(result.side)),
                attr("Price", opt(result.price), Tone::Plain),
                attr("Quantity", quantity(result), Tone::Plain),
                attr("Status", result.status.clone(), status_tone(&result.status)),
            ],
        })
    }

    pub fn oco_table(&self, take_profit: &OrderResult, stop_loss: &OrderResult) -> String {
        let leg = |name: &str, result: &OrderResult, price: String| {
            vec![
                (name.to_string(), Tone::Header),
                (result.order_id.to_string(), Tone::Accent),
                (result.side.to_string(), side_tone(result.side)),
                (price, Tone::Plain),
                (result.status.clone(), status_tone(&result.status)),
            ]
        };

        self.render(&Table {
            title: format!("OCO Orders Placed for {}", take_profit.symbol),
            headers: vec!["Order", "Order ID", "Side", "Price / Stop", "Status"],
            rows: vec![
                leg("Take-Profit (LIMIT)", take_profit, opt(take_profit.price)),
                leg(
                    "Stop-Loss (STOP_MARKET)",
                    stop_loss,
                    format!("stop {}", opt(stop_loss.stop_price)),
                ),
            ],
        })
    }

    /// Error report for stderr, with a warning when an order was left live.
    pub fn error(&self, err: &AppError) -> String {
        let label = match err.kind() {
            ErrorKind::Config => "CONFIGURATION ERROR",
            ErrorKind::Connection => "CONNECTION ERROR",
            ErrorKind::Exchange => "API ERROR",
        };
        let mut out = format!("{}: {err}", self.paint(label, Tone::Bad));

        if let Some(order) = err.live_order() {
            out.push('\n');
            out.push_str(&self.paint("WARNING", Tone::Warn));
            out.push_str(&format!(
                ": take-profit order {} ({} {} {} @ {}) is live without a stop-loss. \
                 Cancel it or place the stop-loss manually.",
                order.order_id,
                order.side,
                quantity(order),
                order.symbol,
                opt(order.price),
            ));
        }
        out
    }

    fn paint(&self, text: &str, tone: Tone) -> String {
        if !self.color {
            return text.to_string();
        }
        let styled = style(text);
        let styled = match tone {
            Tone::Plain => return text.to_string(),
            Tone::Title => styled.cyan().bold(),
            Tone::Header => styled.magenta().bold(),
            Tone::Accent => styled.yellow(),
            Tone::Good => styled.green().bold(),
            Tone::Bad => styled.red().bold(),
            Tone::Warn => styled.yellow().bold(),
        };
        styled.to_string()
    }

    fn render(&self, table: &Table) -> String {
        let mut widths: Vec<usize> = table.headers.iter().map(|h| h.chars().count()).collect();
        for row in &table.rows {
            for (width, (text, _)) in widths.iter_mut().zip(row) {
                *width = (*width).max(text.chars().count());
            }
        }

        let border = |left: &str, mid: &str, right: &str| {
            let segments: Vec<String> = widths.iter().map(|w| "─".repeat(w + 2)).collect();
            format!("{left}{}{right}", segments.join(mid))
        };
        let line = |cells: &[Cell]| {
            let body: Vec<String> = cells
                .iter()
                .zip(&widths)
                .map(|((text, tone), width)| {
                    let pad = width - text.chars().count();
                    format!(" {}{} ", self.paint(text, *tone), " ".repeat(pad))
                })
                .collect();
            format!("│{}│", body.join("│"))
        };

        let headers: Vec<Cell> = table
            .headers
            .iter()
            .map(|h| (h.to_string(), Tone::Header))
            .collect();

        let mut out = Vec::with_capacity(table.rows.len() + 5);
        out.push(self.paint(&table.title, Tone::Title));
        out.push(border("┌", "┬", "┐"));
        out.push(line(&headers));
        out.push(border("├", "┼", "┤"));
        for row in &table.rows {
            out.push(line(row));
        }
        out.push(border("└", "┴", "┘"));
        out.join("\n")
    }
}

fn attr(name: &str, value: String, tone: Tone) -> Vec<Cell> {
    vec![(name.to_string(), Tone::Header), (value, tone)]
}

fn opt<T: std::fmt::Display>(value: Option<T>) -> String {
    value.map_or_else(|| "-".to_string(), |v| v.to_string())
}

fn quantity(result: &OrderResult) -> String {
    opt(result.orig_qty)
}

fn side_tone(side: OrderSide) -> Tone {
    match side {
        OrderSide::Buy => Tone::Good,
        OrderSide::Sell => Tone::Bad,
    }
}

fn status_tone(status: &str) -> Tone {
    match status {
        "FILLED" | "NEW" | "PARTIALLY_FILLED" => Tone::Good,
        "REJECTED" | "EXPIRED" | "CANCELED" => Tone::Bad,
        _ => Tone::Plain,
    }
}
