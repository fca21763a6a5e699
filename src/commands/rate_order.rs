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
pub struct RateOrderRequest {
    pub user_id: Uuid,
    pub order_id: Uuid,
    /// Between 1 and 5
    pub rating: u8,
}

impl<D, A> DomainLogic<D, A>
where
    D: DatabasePort,
    A: AuthorityPort,
{
    #[tracing::instrument(skip(self))]
    pub async fn rate_order(&self, req: RateOrderRequest) -> Result<Order, Error> {
        let mut user = self.database.get_account(req.user_id).await?;
        let mut order = self.database.get_order(req.order_id).await?;

        order.rate(&mut user, req.rating).map_err(rejected)?;
        self.database
            .commit(
                UnitOfWork::new()
                    .put_account(user)
                    .put_order(order.clone()),
            )
            .await?;

        tracing::info!("order rated");
        Ok(order)
    }
}

service!(RateOrderRequest => Order, rate_order);
