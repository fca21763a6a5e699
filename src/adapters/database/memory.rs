use crate::{
    domain::{Account, MenuItem, Order},
    ports::database::{DatabasePort, Error, UnitOfWork},
};
use std::{
    collections::HashMap,
    sync::{Arc, Mutex, PoisonError},
};
use uuid::Uuid;

#[derive(Debug, Default)]
struct Tables {
    accounts: HashMap<Uuid, Account>,
    orders: HashMap<Uuid, Order>,
    menu_items: HashMap<Uuid, MenuItem>,
}

#[derive(Clone, Debug)]
pub struct MemoryDatabase {
    tables: Arc<Mutex<Tables>>,
}

#[async_trait::async_trait]
impl DatabasePort for MemoryDatabase {
    async fn get_account(&self, account_id: Uuid) -> Result<Account, Error> {
        self.tables
            .lock()?
            .accounts
            .get(&account_id)
            .cloned()
            .ok_or(Error::AccountDoesNotExist(account_id))
    }

    async fn get_order(&self, order_id: Uuid) -> Result<Order, Error> {
        self.tables
            .lock()?
            .orders
            .get(&order_id)
            .cloned()
            .ok_or(Error::OrderDoesNotExist(order_id))
    }

    async fn get_menu_item(&self, item_id: Uuid) -> Result<MenuItem, Error> {
        self.tables
            .lock()?
            .menu_items
            .get(&item_id)
            .cloned()
            .ok_or(Error::MenuItemDoesNotExist(item_id))
    }

    async fn commit(&self, unit: UnitOfWork) -> Result<(), Error> {
        // Every write happens under the same guard, and nothing below can fail
        let mut tables = self.tables.lock()?;

        for account in unit.accounts {
            tables.accounts.insert(account.account_id, account);
        }
        for order in unit.orders {
            tables.orders.insert(order.order_id, order);
        }
        for item in unit.menu_items {
            tables.menu_items.insert(item.item_id, item);
        }
        for item_id in unit.deleted_menu_items {
            tables.menu_items.remove(&item_id);
        }

        Ok(())
    }
}

impl Default for MemoryDatabase {
    fn default() -> Self {
        Self {
            tables: Arc::new(Mutex::new(Tables::default())),
        }
    }
}

/// Erased [`PoisonError`]
///
/// `PoisonError` keeps the `MutexGuard` internally, which is not send. Thus we erase the error
/// and only keep the string representation instead.
#[derive(Debug, thiserror::Error)]
#[error("poison error: {0}")]
pub struct ErasedPoisonError(String);

/// We need to create a custom `From` implementation here for an error that's specific to this
/// adapter.
impl<T> From<PoisonError<T>> for Error {
    fn from(err: PoisonError<T>) -> Self {
        Self::Adapter(Box::new(ErasedPoisonError(err.to_string())))
    }
}
