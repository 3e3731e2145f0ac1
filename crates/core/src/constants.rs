use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Virtual cash credited to every new account
pub const DEFAULT_STARTING_CASH: Decimal = dec!(100000);

/// Decimal places kept on every currency amount
pub const CURRENCY_DECIMAL_PRECISION: u32 = 2;

/// Upper bound on a single quote fetch, in milliseconds
pub const DEFAULT_QUOTE_TIMEOUT_MS: u64 = 10_000;

/// Number of accounts revalued at the same time
pub const DEFAULT_REVALUATION_CONCURRENCY: usize = 8;

/// Currency every account is denominated in
pub const ACCOUNT_CURRENCY: &str = "USD";
