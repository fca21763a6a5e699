use uuid::Uuid;

use crate::{
    domain::MenuItem,
    ports::{
        authority::AuthorityPort,
        database::{DatabasePort, UnitOfWork},
    },
};

use super::{service, DomainLogic, Error};

#[derive(Debug)]
pub struct CreateMenuItemRequest {
    pub caller: Uuid,
    pub name: String,
    pub price: u64,
}

/// Change the name or price of a menu item
///
/// Fields left to `None` are kept as is.
#[derive(Debug)]
pub struct UpdateMenuItemRequest {
    pub caller: Uuid,
    pub item_id: Uuid,
    pub name: Option<String>,
    pub price: Option<u64>,
}

#[derive(Debug)]
pub struct DeleteMenuItemRequest {
    pub caller: Uuid,
    pub item_id: Uuid,
}

impl<D, A> DomainLogic<D, A>
where
    D: DatabasePort,
    A: AuthorityPort,
{
    #[tracing::instrument(skip(self))]
    pub async fn create_menu_item(&self, req: CreateMenuItemRequest) -> Result<MenuItem, Error> {
        self.ensure_admin(req.caller).await?;

        let item = MenuItem::new(Uuid::new_v4(), req.name, req.price);
        self.database
            .commit(UnitOfWork::new().put_menu_item(item.clone()))
            .await?;

        tracing::info!(item_id = %item.item_id, "menu item created");
        Ok(item)
    }

    #[tracing::instrument(skip(self))]
    pub async fn update_menu_item(&self, req: UpdateMenuItemRequest) -> Result<MenuItem, Error> {
        self.ensure_admin(req.caller).await?;

        let mut item = self.get_menu_item(req.item_id).await?;
        if let Some(name) = req.name {
            item.name = name;
        }
        if let Some(price) = req.price {
            item.price = price;
        }
        self.database
            .commit(UnitOfWork::new().put_menu_item(item.clone()))
            .await?;

        Ok(item)
    }

    /// Remove a menu item, returning its last stored value
    #[tracing::instrument(skip(self))]
    pub async fn delete_menu_item(&self, req: DeleteMenuItemRequest) -> Result<MenuItem, Error> {
        self.ensure_admin(req.caller).await?;

        let item = self.get_menu_item(req.item_id).await?;
        self.database
            .commit(UnitOfWork::new().delete_menu_item(item.item_id))
            .await?;

        tracing::info!("menu item deleted");
        Ok(item)
    }
}

service!(CreateMenuItemRequest => MenuItem, create_menu_item);
service!(UpdateMenuItemRequest => MenuItem, update_menu_item);
service!(DeleteMenuItemRequest => MenuItem, delete_menu_item);
