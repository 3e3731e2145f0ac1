use log::debug;
use papertrade_market_data::RetryClass;
use rust_decimal::Decimal;

use super::trade_errors::TradeError;
use super::trade_model::TradeSide;
use crate::accounts::{Account, Holding};
use crate::quotes::Quote;
use crate::utils::money::round_currency;

/// Unrounded value of `shares` at the quoted price, or `None` on overflow.
pub fn trade_value(quote: &Quote, shares: i64) -> Option<Decimal> {
    Decimal::from(shares).checked_mul(quote.price)
}

/// Applies a buy (`signed_amount > 0`) or sell (`signed_amount < 0`) at the
/// quoted price and returns the resulting account.
///
/// The input account is never modified. The holding is keyed by
/// `quote.symbol`.
///
/// - Buy: cash falls by the trade value; shares and cost basis of the
///   holding grow, creating it with the quote's display name if needed.
/// - Sell: cash rises by the trade value, shares fall, and the cost basis
///   grows by the proceeds as well. The holding is dropped once no shares
///   remain.
///
/// Cash and the touched cost basis are rounded to cents.
pub fn apply_trade(
    account: &Account,
    quote: &Quote,
    signed_amount: i64,
) -> Result<Account, TradeError> {
    let side = TradeSide::from_signed_amount(signed_amount).ok_or(TradeError::InvalidAmount)?;
    if !quote.is_tradable() {
        return Err(TradeError::QuoteUnavailable {
            ticker: quote.symbol.clone(),
            reason: format!("unusable quote price {}", quote.price),
            retry_class: RetryClass::Never,
        });
    }

    let shares = signed_amount
        .checked_abs()
        .ok_or(TradeError::InvalidAmount)?;
    let value = trade_value(quote, shares).ok_or(TradeError::InvalidAmount)?;
    let ticker = quote.symbol.as_str();
    let mut next = account.clone();

    match side {
        TradeSide::Sell => {
            let available = account.holding(ticker).map_or(0, |h| h.share_count);
            if available < shares {
                return Err(TradeError::InsufficientShares {
                    ticker: ticker.to_string(),
                    required: shares,
                    available,
                });
            }

            next.cash = round_currency(account.cash + value);
            let remaining = available - shares;
            if remaining == 0 {
                next.holdings.remove(ticker);
            } else if let Some(holding) = next.holdings.get_mut(ticker) {
                holding.share_count = remaining;
                holding.cost_basis = round_currency(holding.cost_basis + value);
            }
        }
        TradeSide::Buy => {
            if account.cash < value {
                return Err(TradeError::InsufficientFunds {
                    required: round_currency(value),
                    available: account.cash,
                });
            }

            next.cash = round_currency(account.cash - value);
            let holding = next
                .holdings
                .entry(ticker.to_string())
                .or_insert_with(|| Holding {
                    ticker: ticker.to_string(),
                    share_count: 0,
                    cost_basis: Decimal::ZERO,
                    display_name: quote.display_name.clone(),
                });
            holding.share_count = holding
                .share_count
                .checked_add(shares)
                .ok_or(TradeError::InvalidAmount)?;
            holding.cost_basis = round_currency(holding.cost_basis + value);
        }
    }

    debug!(
        "{:?} {} {} @ {} for {}: cash {} -> {}",
        side, shares, ticker, quote.price, account.user_id, account.cash, next.cash
    );
    Ok(next)
}
