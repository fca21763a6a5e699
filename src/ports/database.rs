use uuid::Uuid;

use crate::domain::{Account, MenuItem, Order};

#[mockall::automock]
#[async_trait::async_trait]
pub trait DatabasePort {
    async fn get_account(&self, account_id: Uuid) -> Result<Account, Error>;
    async fn get_order(&self, order_id: Uuid) -> Result<Order, Error>;
    async fn get_menu_item(&self, item_id: Uuid) -> Result<MenuItem, Error>;
    /// Persist every record staged in the unit of work
    ///
    /// Implementations must apply either all of the changes or none of them.
    async fn commit(&self, unit: UnitOfWork) -> Result<(), Error>;
}

/// Set of record changes applied atomically by [`DatabasePort::commit`]
///
/// Commands load the records they need, run the domain operation on local copies, and stage the
/// updated copies here. If the operation fails, nothing is committed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UnitOfWork {
    pub accounts: Vec<Account>,
    pub orders: Vec<Order>,
    pub menu_items: Vec<MenuItem>,
    pub deleted_menu_items: Vec<Uuid>,
}

impl UnitOfWork {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn put_account(mut self, account: Account) -> Self {
        self.accounts.push(account);
        self
    }

    pub fn put_order(mut self, order: Order) -> Self {
        self.orders.push(order);
        self
    }

    pub fn put_menu_item(mut self, item: MenuItem) -> Self {
        self.menu_items.push(item);
        self
    }

    pub fn delete_menu_item(mut self, item_id: Uuid) -> Self {
        self.deleted_menu_items.push(item_id);
        self
    }
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("account {0} does not exist")]
    AccountDoesNotExist(Uuid),
    #[error("order {0} does not exist")]
    OrderDoesNotExist(Uuid),
    #[error("menu item {0} does not exist")]
    MenuItemDoesNotExist(Uuid),

    /// Concrete adapter errors
    ///
    /// This could represent any errors from a concrete adapter that is not part of the domain
    /// model, such as connectivity, configuration, or permission errors.
    #[error("adapter error: {0:?}")]
    Adapter(Box<dyn std::error::Error + Send + Sync>),
}
