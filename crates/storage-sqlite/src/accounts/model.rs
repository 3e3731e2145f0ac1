//! Database model for accounts.

use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use diesel::prelude::*;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;

use papertrade_core::accounts::{Account, AccountHoldingsUpdate, Holding, NewAccount, ValuationHistoryUpdate};
use papertrade_core::errors::{DatabaseError, Error, Result};
use papertrade_core::utils::money::round_currency;

/// Database model for accounts.
///
/// Cash is a numeric column, rounded back to cents on read. Holdings and the
/// valuation history are JSON documents with numeric amounts.
#[derive(Queryable, Identifiable, Insertable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::accounts)]
#[diesel(primary_key(user_id))]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct AccountDB {
    pub user_id: String,
    pub display_name: String,
    pub cash: f64,
    pub holdings: String,
    pub valuation_history: String,
    pub last_revalued_at: NaiveDateTime,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Columns touched after a trade.
#[derive(AsChangeset, Debug)]
#[diesel(table_name = crate::schema::accounts)]
pub struct AccountHoldingsChangeset {
    pub cash: f64,
    pub holdings: String,
    pub updated_at: NaiveDateTime,
}

/// Columns touched after a revaluation.
#[derive(AsChangeset, Debug)]
#[diesel(table_name = crate::schema::accounts)]
pub struct ValuationHistoryChangeset {
    pub valuation_history: String,
    pub last_revalued_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

fn corrupt(user_id: &str, field: &str, detail: impl std::fmt::Display) -> Error {
    Error::Database(DatabaseError::CorruptRecord(format!(
        "account {} has an unreadable {}: {}",
        user_id, field, detail
    )))
}

fn cash_column(cash: Decimal) -> Result<f64> {
    cash.to_f64().ok_or_else(|| {
        Error::Database(DatabaseError::Internal(format!(
            "cash {} cannot be stored as a number",
            cash
        )))
    })
}

impl TryFrom<AccountDB> for Account {
    type Error = Error;

    fn try_from(db: AccountDB) -> Result<Self> {
        let cash = Decimal::from_f64(db.cash)
            .map(round_currency)
            .ok_or_else(|| corrupt(&db.user_id, "cash", db.cash))?;
        let holdings: BTreeMap<String, Holding> = serde_json::from_str(&db.holdings)
            .map_err(|e| corrupt(&db.user_id, "holdings", e))?;
        let valuation_history: Vec<Decimal> = serde_json::from_str(&db.valuation_history)
            .map_err(|e| corrupt(&db.user_id, "valuation history", e))?;

        Ok(Self {
            user_id: db.user_id,
            display_name: db.display_name,
            cash,
            holdings,
            valuation_history,
            last_revalued_at: db.last_revalued_at.and_utc(),
            created_at: db.created_at.and_utc(),
            updated_at: db.updated_at.and_utc(),
        })
    }
}

impl TryFrom<NewAccount> for AccountDB {
    type Error = Error;

    fn try_from(domain: NewAccount) -> Result<Self> {
        let now = chrono::Utc::now().naive_utc();
        Ok(Self {
            user_id: domain.user_id,
            display_name: domain.display_name,
            cash: cash_column(domain.cash)?,
            holdings: "{}".to_string(),
            valuation_history: serde_json::to_string(&domain.valuation_history)?,
            last_revalued_at: domain.last_revalued_at.naive_utc(),
            created_at: now,
            updated_at: now,
        })
    }
}

impl TryFrom<AccountHoldingsUpdate> for AccountHoldingsChangeset {
    type Error = Error;

    fn try_from(update: AccountHoldingsUpdate) -> Result<Self> {
        Ok(Self {
            cash: cash_column(update.cash)?,
            holdings: serde_json::to_string(&update.holdings)?,
            updated_at: chrono::Utc::now().naive_utc(),
        })
    }
}

impl TryFrom<ValuationHistoryUpdate> for ValuationHistoryChangeset {
    type Error = Error;

    fn try_from(update: ValuationHistoryUpdate) -> Result<Self> {
        Ok(Self {
            valuation_history: serde_json::to_string(&update.valuation_history)?,
            last_revalued_at: update.last_revalued_at.naive_utc(),
            updated_at: chrono::Utc::now().naive_utc(),
        })
    }
}
