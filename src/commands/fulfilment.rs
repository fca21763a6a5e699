//! Restaurant and delivery side of the order lifecycle.
//!
//! These operations are unconditional setters on the order. When admin gating is enabled, the
//! caller must hold the admin capability.

use uuid::Uuid;

use crate::{
    domain::{Order, OrderStatus},
    ports::{
        authority::AuthorityPort,
        database::{DatabasePort, UnitOfWork},
    },
};

use super::{service, DomainLogic, Error};

#[derive(Debug)]
pub struct AssignDeliveryRequest {
    pub caller: Uuid,
    pub order_id: Uuid,
    /// Account of the delivery agent
    pub agent_id: Uuid,
}

#[derive(Debug)]
pub struct UpdateStatusRequest {
    pub caller: Uuid,
    pub order_id: Uuid,
    pub status: OrderStatus,
}

#[derive(Debug)]
pub struct CompleteOrderRequest {
    pub caller: Uuid,
    pub order_id: Uuid,
}

/// Flip a paid order back to unpaid
#[derive(Debug)]
pub struct IssueRefundRequest {
    pub caller: Uuid,
    pub order_id: Uuid,
}

#[derive(Debug, PartialEq, Eq)]
pub struct CompleteOrderResponse {
    pub order: Order,
    /// Menu items removed from the menu along with the order
    pub consumed_items: Vec<Uuid>,
}

impl<D, A> DomainLogic<D, A>
where
    D: DatabasePort,
    A: AuthorityPort,
{
    #[tracing::instrument(skip(self))]
    pub async fn assign_delivery(&self, req: AssignDeliveryRequest) -> Result<Order, Error> {
        self.ensure_admin(req.caller).await?;
        let mut order = self.database.get_order(req.order_id).await?;
        let agent = self.database.get_account(req.agent_id).await?;

        order.assign_delivery(agent.account_id);
        self.database
            .commit(UnitOfWork::new().put_order(order.clone()))
            .await?;

        tracing::info!("delivery assigned");
        Ok(order)
    }

    #[tracing::instrument(skip(self))]
    pub async fn update_status(&self, req: UpdateStatusRequest) -> Result<Order, Error> {
        self.ensure_admin(req.caller).await?;
        let mut order = self.database.get_order(req.order_id).await?;

        order.update_status(req.status);
        self.database
            .commit(UnitOfWork::new().put_order(order.clone()))
            .await?;

        tracing::info!(status = %order.status(), "status updated");
        Ok(order)
    }

    #[tracing::instrument(skip(self))]
    pub async fn complete_order(
        &self,
        req: CompleteOrderRequest,
    ) -> Result<CompleteOrderResponse, Error> {
        self.ensure_admin(req.caller).await?;
        let mut order = self.database.get_order(req.order_id).await?;

        order.complete();
        let mut unit = UnitOfWork::new().put_order(order.clone());
        let consumed_items = if self.config.consume_menu_items {
            order.items.clone()
        } else {
            Vec::new()
        };
        for item_id in &consumed_items {
            unit = unit.delete_menu_item(*item_id);
        }
        self.database.commit(unit).await?;

        tracing::info!(consumed = consumed_items.len(), "order completed");
        Ok(CompleteOrderResponse {
            order,
            consumed_items,
        })
    }

    #[tracing::instrument(skip(self))]
    pub async fn issue_refund(&self, req: IssueRefundRequest) -> Result<Order, Error> {
        self.ensure_admin(req.caller).await?;
        let mut order = self.database.get_order(req.order_id).await?;

        order.issue_refund();
        self.database
            .commit(UnitOfWork::new().put_order(order.clone()))
            .await?;

        tracing::info!("refund issued");
        Ok(order)
    }
}

service!(AssignDeliveryRequest => Order, assign_delivery);
service!(UpdateStatusRequest => Order, update_status);
service!(CompleteOrderRequest => CompleteOrderResponse, complete_order);
service!(IssueRefundRequest => Order, issue_refund);
