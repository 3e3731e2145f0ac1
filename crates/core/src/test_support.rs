//! In-memory doubles shared by the service test suites.

#![allow(dead_code)]

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use papertrade_market_data::{MarketDataError, MarketDataProvider, Quote};
use rust_decimal::Decimal;

use crate::accounts::{
    Account, AccountHoldingsUpdate, AccountRepositoryTrait, Holding, NewAccount,
    ValuationHistoryUpdate,
};
use crate::errors::{DatabaseError, Result};
use crate::users::{NewUser, User, UserRepositoryTrait};

// =========================================================================
// Mock AccountRepository
// =========================================================================

#[derive(Clone, Default)]
pub struct MockAccountRepository {
    accounts: Arc<Mutex<BTreeMap<String, Account>>>,
    fail_on_save: Arc<Mutex<bool>>,
    fail_on_save_for: Arc<Mutex<HashSet<String>>>,
    holdings_writes: Arc<AtomicUsize>,
    history_writes: Arc<AtomicUsize>,
}

impl MockAccountRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_accounts(accounts: Vec<Account>) -> Self {
        let repo = Self::new();
        for account in accounts {
            repo.insert(account);
        }
        repo
    }

    pub fn insert(&self, account: Account) {
        self.accounts
            .lock()
            .unwrap()
            .insert(account.user_id.clone(), account);
    }

    pub fn set_fail_on_save(&self, fail: bool) {
        *self.fail_on_save.lock().unwrap() = fail;
    }

    pub fn fail_on_save_for(&self, user_id: &str) {
        self.fail_on_save_for
            .lock()
            .unwrap()
            .insert(user_id.to_string());
    }

    pub fn get(&self, user_id: &str) -> Option<Account> {
        self.accounts.lock().unwrap().get(user_id).cloned()
    }

    pub fn holdings_writes(&self) -> usize {
        self.holdings_writes.load(Ordering::SeqCst)
    }

    pub fn history_writes(&self) -> usize {
        self.history_writes.load(Ordering::SeqCst)
    }

    fn check_save(&self, user_id: &str) -> Result<()> {
        if *self.fail_on_save.lock().unwrap()
            || self.fail_on_save_for.lock().unwrap().contains(user_id)
        {
            return Err(crate::Error::Unexpected("Intentional save failure".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl AccountRepositoryTrait for MockAccountRepository {
    async fn create(&self, new_account: NewAccount) -> Result<Account> {
        self.check_save(&new_account.user_id)?;
        let account = account_from_new(new_account);
        self.insert(account.clone());
        Ok(account)
    }

    fn get_by_user_id(&self, user_id: &str) -> Result<Option<Account>> {
        Ok(self.get(user_id))
    }

    async fn update_holdings(
        &self,
        user_id: &str,
        update: AccountHoldingsUpdate,
    ) -> Result<Account> {
        self.check_save(user_id)?;
        let mut accounts = self.accounts.lock().unwrap();
        let account = accounts
            .get_mut(user_id)
            .ok_or_else(|| DatabaseError::NotFound(user_id.to_string()))?;
        account.cash = update.cash;
        account.holdings = update.holdings;
        account.updated_at = Utc::now();
        self.holdings_writes.fetch_add(1, Ordering::SeqCst);
        Ok(account.clone())
    }

    async fn update_valuation_history(
        &self,
        user_id: &str,
        update: ValuationHistoryUpdate,
    ) -> Result<Account> {
        self.check_save(user_id)?;
        let mut accounts = self.accounts.lock().unwrap();
        let account = accounts
            .get_mut(user_id)
            .ok_or_else(|| DatabaseError::NotFound(user_id.to_string()))?;
        account.valuation_history = update.valuation_history;
        account.last_revalued_at = update.last_revalued_at;
        self.history_writes.fetch_add(1, Ordering::SeqCst);
        Ok(account.clone())
    }

    fn list_all(&self) -> Result<Vec<Account>> {
        Ok(self.accounts.lock().unwrap().values().cloned().collect())
    }
}

// =========================================================================
// Mock UserRepository
// =========================================================================

#[derive(Clone, Default)]
pub struct MockUserRepository {
    users: Arc<Mutex<Vec<User>>>,
    pub accounts: MockAccountRepository,
}

impl MockUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn user_count(&self) -> usize {
        self.users.lock().unwrap().len()
    }
}

#[async_trait]
impl UserRepositoryTrait for MockUserRepository {
    async fn register(&self, new_user: NewUser, new_account: NewAccount) -> Result<(User, Account)> {
        let user = User {
            id: new_user.id,
            username: new_user.username,
            password_hash: new_user.password_hash,
            created_at: Utc::now(),
        };
        let account = self.accounts.create(new_account).await?;
        self.users.lock().unwrap().push(user.clone());
        Ok((user, account))
    }

    fn find_by_username(&self, username: &str) -> Result<Option<User>> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.username == username)
            .cloned())
    }

    fn get_by_id(&self, user_id: &str) -> Result<Option<User>> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.id == user_id)
            .cloned())
    }
}

// =========================================================================
// Mock MarketDataProvider
// =========================================================================

#[derive(Clone, Default)]
pub struct MockQuoteProvider {
    prices: Arc<Mutex<HashMap<String, Decimal>>>,
    unreachable: Arc<Mutex<bool>>,
    calls: Arc<AtomicUsize>,
}

impl MockQuoteProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_price(self, symbol: &str, price: Decimal) -> Self {
        self.set_price(symbol, price);
        self
    }

    pub fn set_price(&self, symbol: &str, price: Decimal) {
        self.prices
            .lock()
            .unwrap()
            .insert(symbol.to_string(), price);
    }

    pub fn set_unreachable(&self, unreachable: bool) {
        *self.unreachable.lock().unwrap() = unreachable;
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MarketDataProvider for MockQuoteProvider {
    fn id(&self) -> &'static str {
        "MOCK"
    }

    async fn get_latest_quote(&self, symbol: &str) -> std::result::Result<Quote, MarketDataError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if *self.unreachable.lock().unwrap() {
            return Err(MarketDataError::ProviderError {
                provider: "MOCK".to_string(),
                message: "connection refused".to_string(),
            });
        }
        let price = self
            .prices
            .lock()
            .unwrap()
            .get(symbol)
            .copied()
            .ok_or_else(|| MarketDataError::SymbolNotFound(symbol.to_string()))?;
        Ok(Quote::new(symbol, price, format!("{} Corp", symbol), "USD"))
    }
}

// =========================================================================
// Builders
// =========================================================================

pub fn utc(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
}

pub fn holding(ticker: &str, share_count: i64, cost_basis: Decimal) -> Holding {
    Holding {
        ticker: ticker.to_string(),
        share_count,
        cost_basis,
        display_name: format!("{} Corp", ticker),
    }
}

pub fn account(user_id: &str, cash: Decimal, holdings: Vec<Holding>) -> Account {
    let created = utc(2024, 7, 1, 21, 0);
    Account {
        user_id: user_id.to_string(),
        display_name: user_id.to_string(),
        cash,
        holdings: holdings
            .into_iter()
            .map(|h| (h.ticker.clone(), h))
            .collect(),
        valuation_history: vec![cash],
        last_revalued_at: created,
        created_at: created,
        updated_at: created,
    }
}

pub fn quote(symbol: &str, price: Decimal) -> Quote {
    Quote::new(symbol, price, format!("{} Corp", symbol), "USD")
}

fn account_from_new(new_account: NewAccount) -> Account {
    let now = Utc::now();
    Account {
        user_id: new_account.user_id,
        display_name: new_account.display_name,
        cash: new_account.cash,
        holdings: BTreeMap::new(),
        valuation_history: new_account.valuation_history,
        last_revalued_at: new_account.last_revalued_at,
        created_at: now,
        updated_at: now,
    }
}
