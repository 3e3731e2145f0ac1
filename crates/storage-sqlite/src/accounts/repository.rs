use async_trait::async_trait;
use diesel::prelude::*;
use diesel::r2d2::{self, Pool};
use diesel::sqlite::SqliteConnection;
use std::sync::Arc;

use crate::db::{get_connection, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::accounts;
use crate::schema::accounts::dsl::*;

use super::model::{AccountDB, AccountHoldingsChangeset, ValuationHistoryChangeset};
use papertrade_core::accounts::{
    Account, AccountHoldingsUpdate, AccountRepositoryTrait, NewAccount, ValuationHistoryUpdate,
};
use papertrade_core::errors::{DatabaseError, Error, Result};

/// Repository for managing account data in the database
pub struct AccountRepository {
    pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
    writer: WriteHandle,
}

impl AccountRepository {
    /// Creates a new AccountRepository instance
    pub fn new(
        pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
        writer: WriteHandle,
    ) -> Self {
        Self { pool, writer }
    }

    /// Inserts an account on an open connection. Used by user registration so
    /// both rows land in the same writer transaction.
    pub(crate) fn insert_account(conn: &mut SqliteConnection, new_account: NewAccount) -> Result<Account> {
        new_account.validate()?;
        let account_db = AccountDB::try_from(new_account)?;

        diesel::insert_into(accounts::table)
            .values(&account_db)
            .execute(conn)
            .into_core()?;

        Account::try_from(account_db)
    }
}

fn account_not_found(owner: &str) -> Error {
    Error::Database(DatabaseError::NotFound(format!(
        "account for user {}",
        owner
    )))
}

#[async_trait]
impl AccountRepositoryTrait for AccountRepository {
    async fn create(&self, new_account: NewAccount) -> Result<Account> {
        self.writer
            .exec(move |conn| Self::insert_account(conn, new_account))
            .await
    }

    fn get_by_user_id(&self, owner: &str) -> Result<Option<Account>> {
        let mut conn = get_connection(&self.pool)?;

        accounts
            .find(owner)
            .select(AccountDB::as_select())
            .first::<AccountDB>(&mut conn)
            .optional()
            .into_core()?
            .map(Account::try_from)
            .transpose()
    }

    async fn update_holdings(&self, owner: &str, update: AccountHoldingsUpdate) -> Result<Account> {
        let owner = owner.to_string();
        let changeset = AccountHoldingsChangeset::try_from(update)?;

        self.writer
            .exec(move |conn| {
                let updated = diesel::update(accounts.find(owner.as_str()))
                    .set(&changeset)
                    .returning(AccountDB::as_returning())
                    .get_result::<AccountDB>(conn)
                    .optional()
                    .into_core()?
                    .ok_or_else(|| account_not_found(&owner))?;
                Account::try_from(updated)
            })
            .await
    }

    async fn update_valuation_history(
        &self,
        owner: &str,
        update: ValuationHistoryUpdate,
    ) -> Result<Account> {
        let owner = owner.to_string();
        let changeset = ValuationHistoryChangeset::try_from(update)?;

        self.writer
            .exec(move |conn| {
                let updated = diesel::update(accounts.find(owner.as_str()))
                    .set(&changeset)
                    .returning(AccountDB::as_returning())
                    .get_result::<AccountDB>(conn)
                    .optional()
                    .into_core()?
                    .ok_or_else(|| account_not_found(&owner))?;
                Account::try_from(updated)
            })
            .await
    }

    fn list_all(&self) -> Result<Vec<Account>> {
        let mut conn = get_connection(&self.pool)?;

        let results = accounts
            .select(AccountDB::as_select())
            .order((display_name.asc(), user_id.asc()))
            .load::<AccountDB>(&mut conn)
            .into_core()?;

        results.into_iter().map(Account::try_from).collect()
    }
}
