use uuid::Uuid;

use crate::{
    domain::Order,
    ports::{
        authority::AuthorityPort,
        database::{DatabasePort, UnitOfWork},
    },
};

use super::{rejected, service, DomainLogic, Error};

#[derive(Debug)]
pub struct PlaceOrderRequest {
    pub user_id: Uuid,
    /// Menu items in the order, all of which must exist
    pub items: Vec<Uuid>,
    pub discount: u64,
    pub total_cost: u64,
}

#[derive(Debug)]
pub struct ApplyDiscountRequest {
    pub order_id: Uuid,
    pub discount: u64,
}

impl<D, A> DomainLogic<D, A>
where
    D: DatabasePort,
    A: AuthorityPort,
{
    #[tracing::instrument(skip(self), fields(user_id = %req.user_id))]
    pub async fn place_order(&self, req: PlaceOrderRequest) -> Result<Order, Error> {
        let mut user = self.database.get_account(req.user_id).await?;
        for item_id in &req.items {
            self.get_menu_item(*item_id).await?;
        }

        let order = Order::place(
            Uuid::new_v4(),
            &mut user,
            req.items,
            req.discount,
            req.total_cost,
        );
        self.database
            .commit(
                UnitOfWork::new()
                    .put_account(user)
                    .put_order(order.clone()),
            )
            .await?;

        tracing::info!(order_id = %order.order_id, total_cost = order.total_cost(), "order placed");
        Ok(order)
    }

    #[tracing::instrument(skip(self))]
    pub async fn apply_discount(&self, req: ApplyDiscountRequest) -> Result<Order, Error> {
        let mut order = self.database.get_order(req.order_id).await?;

        order.apply_discount(req.discount).map_err(rejected)?;
        self.database
            .commit(UnitOfWork::new().put_order(order.clone()))
            .await?;

        tracing::info!(total_cost = order.total_cost(), "discount applied");
        Ok(order)
    }
}

service!(PlaceOrderRequest => Order, place_order);
service!(ApplyDiscountRequest => Order, apply_discount);
