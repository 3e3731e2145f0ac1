use std::collections::HashMap;

use log::debug;
use rust_decimal::Decimal;

use super::valuation_errors::ValuationError;
use super::valuation_model::{AccountValuation, HoldingValuation, Performance};
use crate::accounts::{Account, Holding};
use crate::quotes::Quote;
use crate::utils::money::round_currency;

/// Values an account against a set of quotes keyed by ticker.
///
/// Pure and deterministic: holdings are visited in ticker order and the
/// account is left untouched. Every held ticker must have a quote; extra
/// quotes are ignored. An account without holdings is worth its cash.
///
/// Per-holding figures are rounded to cents for display. The total is the
/// rounded sum of cash and unrounded market values, matching the figure the
/// revaluation job records.
pub fn calculate_account_valuation(
    account: &Account,
    quotes: &HashMap<String, Quote>,
) -> Result<AccountValuation, ValuationError> {
    let mut market_value = Decimal::ZERO;
    let mut holdings = Vec::with_capacity(account.holdings.len());

    for (ticker, holding) in &account.holdings {
        let quote = quotes
            .get(ticker)
            .ok_or_else(|| ValuationError::MissingQuote(ticker.clone()))?;
        let current_value = Decimal::from(holding.share_count) * quote.price;
        market_value += current_value;
        holdings.push(value_holding(holding, quote.price, current_value));
    }

    let total_value = round_currency(account.cash + market_value);
    debug!(
        "Valued account {}: cash {} + market {} = {}",
        account.user_id, account.cash, market_value, total_value
    );

    Ok(AccountValuation {
        total_value,
        cash_value: round_currency(account.cash),
        holdings,
    })
}

/// Total value only: cash plus shares at the quoted prices, rounded to cents.
pub fn calculate_total_value(
    account: &Account,
    quotes: &HashMap<String, Quote>,
) -> Result<Decimal, ValuationError> {
    calculate_account_valuation(account, quotes).map(|v| v.total_value)
}

fn value_holding(holding: &Holding, price: Decimal, current_value: Decimal) -> HoldingValuation {
    let avg_cost = if holding.share_count != 0 {
        round_currency(holding.cost_basis / Decimal::from(holding.share_count))
    } else {
        Decimal::ZERO
    };
    let gain_loss = round_currency(current_value - holding.cost_basis);

    HoldingValuation {
        ticker: holding.ticker.clone(),
        display_name: holding.display_name.clone(),
        shares: holding.share_count,
        avg_cost,
        cost_basis: holding.cost_basis,
        current_price: price,
        current_value: round_currency(current_value),
        gain_loss,
        performance: Performance::from_gain_loss(gain_loss),
    }
}
