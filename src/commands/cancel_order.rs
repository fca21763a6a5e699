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
pub struct CancelOrderRequest {
    pub user_id: Uuid,
    pub order_id: Uuid,
}

impl<D, A> DomainLogic<D, A>
where
    D: DatabasePort,
    A: AuthorityPort,
{
    #[tracing::instrument(skip(self))]
    pub async fn cancel_order(&self, req: CancelOrderRequest) -> Result<Order, Error> {
        let user = self.database.get_account(req.user_id).await?;
        let mut order = self.database.get_order(req.order_id).await?;

        order.cancel(&user).map_err(rejected)?;
        self.database
            .commit(UnitOfWork::new().put_order(order.clone()))
            .await?;

        tracing::info!("order cancelled");
        Ok(order)
    }
}

service!(CancelOrderRequest => Order, cancel_order);
