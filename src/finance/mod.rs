//! Account data and the derived figures the screens display.
//!
//! The transaction history is a fixed in-memory dataset; everything else in
//! this module is a pure function over it.

pub mod aggregate;
pub mod stocks;
pub mod tax;
pub mod transactions;

pub use aggregate::{
    BalancePoint, CategoryRow, CategoryTotals, MonthKey, MonthlySummary, SankeyData, SankeyLink,
    TimePeriod, aggregate_by_month, filter_by_period, group_by_day, recent, running_balance,
    sankey, total_balance,
};
pub use stocks::{STOCK_DATES, STOCK_SERIES, StockSeries};
pub use tax::{TaxStatementFlow, TaxStatementState};
pub use transactions::{
    Category, TRANSACTIONS, Transaction, TransactionKind, classify_transaction, format_amount,
    format_eur,
};

/// Headline portfolio value on the wealth screens, in cents.
pub const PORTFOLIO_VALUE_CENTS: i64 = 1_375_198;
