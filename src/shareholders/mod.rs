//! Shareholder roster and dividend distribution

mod data;
mod dividends;

pub use data::{total_investment, RemunerationMode, Shareholder};
pub use dividends::{compute_shareholder_dividends, shareholder_payouts, ShareholderPayout};
