use uuid::Uuid;

use crate::{
    domain::{Account, Funds, PaymentStatus},
    ports::{
        authority::AuthorityPort,
        database::{DatabasePort, UnitOfWork},
    },
};

use super::{rejected, service, DomainLogic, Error};

/// Pay the remaining cost of an order from the user's balance
#[derive(Debug)]
pub struct PayFullRequest {
    pub user_id: Uuid,
    pub order_id: Uuid,
    /// Account credited with the payment
    pub payee_id: Uuid,
}

/// Pay the remaining cost of an order with loyalty points
#[derive(Debug)]
pub struct PayWithPointsRequest {
    pub user_id: Uuid,
    pub order_id: Uuid,
    pub payee_id: Uuid,
}

/// Pay an installment towards an order
#[derive(Debug)]
pub struct PayPartialRequest {
    pub user_id: Uuid,
    pub order_id: Uuid,
    pub payee_id: Uuid,
    pub amount: u64,
}

#[derive(Debug, PartialEq, Eq)]
pub struct PaymentResponse {
    pub order_id: Uuid,
    pub payee_id: Uuid,
    /// Cash moved from the user to the payee
    pub amount_paid: u64,
    pub points_awarded: u64,
    pub points_redeemed: u64,
    /// Cost left on the order
    pub remaining_cost: u64,
    pub payment_status: PaymentStatus,
}

impl<D, A> DomainLogic<D, A>
where
    D: DatabasePort,
    A: AuthorityPort,
{
    #[tracing::instrument(skip(self))]
    pub async fn pay_full(&self, req: PayFullRequest) -> Result<PaymentResponse, Error> {
        let mut order = self.database.get_order(req.order_id).await?;
        let mut user = self.database.get_account(req.user_id).await?;
        let payee = self.get_payee(&user, req.payee_id).await?;

        let payment = order.pay_full(&mut user).map_err(rejected)?;
        let response = PaymentResponse {
            order_id: order.order_id,
            payee_id: req.payee_id,
            amount_paid: payment.funds.value(),
            points_awarded: payment.points_awarded,
            points_redeemed: 0,
            remaining_cost: payment.remaining_cost,
            payment_status: order.payment_status(),
        };
        let unit = transfer(user, payee, payment.funds).put_order(order);
        self.database.commit(unit).await?;

        tracing::info!(amount = response.amount_paid, "order paid in full");
        Ok(response)
    }

    #[tracing::instrument(skip(self))]
    pub async fn pay_with_points(
        &self,
        req: PayWithPointsRequest,
    ) -> Result<PaymentResponse, Error> {
        let mut order = self.database.get_order(req.order_id).await?;
        let mut user = self.database.get_account(req.user_id).await?;
        // The payee must exist even though no cash moves
        self.get_payee(&user, req.payee_id).await?;

        let redemption = order.pay_with_points(&mut user).map_err(rejected)?;
        let response = PaymentResponse {
            order_id: order.order_id,
            payee_id: req.payee_id,
            amount_paid: 0,
            points_awarded: 0,
            points_redeemed: redemption.points_redeemed,
            remaining_cost: 0,
            payment_status: order.payment_status(),
        };
        self.database
            .commit(UnitOfWork::new().put_account(user).put_order(order))
            .await?;

        tracing::info!(points = response.points_redeemed, "order paid with points");
        Ok(response)
    }

    #[tracing::instrument(skip(self))]
    pub async fn pay_partial(&self, req: PayPartialRequest) -> Result<PaymentResponse, Error> {
        let mut order = self.database.get_order(req.order_id).await?;
        let mut user = self.database.get_account(req.user_id).await?;
        let payee = self.get_payee(&user, req.payee_id).await?;

        let payment = order.pay_partial(&mut user, req.amount).map_err(rejected)?;
        let response = PaymentResponse {
            order_id: order.order_id,
            payee_id: req.payee_id,
            amount_paid: payment.funds.value(),
            points_awarded: payment.points_awarded,
            points_redeemed: 0,
            remaining_cost: payment.remaining_cost,
            payment_status: order.payment_status(),
        };
        let unit = transfer(user, payee, payment.funds).put_order(order);
        self.database.commit(unit).await?;

        tracing::info!(
            amount = response.amount_paid,
            remaining_cost = response.remaining_cost,
            "installment paid"
        );
        Ok(response)
    }

    /// Load the payee, unless it's the paying user
    async fn get_payee(&self, user: &Account, payee_id: Uuid) -> Result<Option<Account>, Error> {
        if payee_id == user.account_id {
            return Ok(None);
        }
        Ok(Some(self.database.get_account(payee_id).await?))
    }
}

/// Credit the payee with funds withdrawn from `user`
///
/// A `None` payee means the user pays themselves.
fn transfer(mut user: Account, payee: Option<Account>, funds: Funds) -> UnitOfWork {
    match payee {
        Some(mut payee) => {
            payee.receive(funds);
            UnitOfWork::new().put_account(user).put_account(payee)
        }
        None => {
            user.receive(funds);
            UnitOfWork::new().put_account(user)
        }
    }
}

service!(PayFullRequest => PaymentResponse, pay_full);
service!(PayWithPointsRequest => PaymentResponse, pay_with_points);
service!(PayPartialRequest => PaymentResponse, pay_partial);
