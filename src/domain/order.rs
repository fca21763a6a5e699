use std::fmt;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::{points_for, Account, Error, Funds};

/// Preparation status of an order
///
/// Status changes are driven by the restaurant and the delivery agent. Payment is tracked
/// separately through [`PaymentStatus`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OrderStatus {
    Pending,
    Cancelled,
    Completed,
    /// Free-form status set by the restaurant or delivery agent, e.g. "preparing"
    Other(String),
}

impl From<&str> for OrderStatus {
    fn from(label: &str) -> Self {
        match label.to_ascii_lowercase().as_str() {
            "pending" => OrderStatus::Pending,
            "cancelled" => OrderStatus::Cancelled,
            "completed" => OrderStatus::Completed,
            _ => OrderStatus::Other(label.to_string()),
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderStatus::Pending => f.write_str("pending"),
            OrderStatus::Cancelled => f.write_str("cancelled"),
            OrderStatus::Completed => f.write_str("completed"),
            OrderStatus::Other(label) => f.write_str(label),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PaymentStatus {
    Unpaid,
    Paid,
}

/// Customer rating between 1 and 5
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rating(u8);

impl Rating {
    pub fn value(&self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Rating {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1..=5 => Ok(Rating(value)),
            _ => Err(Error::InvalidRating(value)),
        }
    }
}

/// Cash taken from the payer by a payment
///
/// The funds still need to be received by the payee.
#[derive(Debug)]
pub struct Payment {
    pub funds: Funds,
    pub points_awarded: u64,
    /// Cost left on the order after this payment
    pub remaining_cost: u64,
}

/// Outcome of paying an order with loyalty points
#[derive(Debug, PartialEq, Eq)]
pub struct PointsRedemption {
    pub points_redeemed: u64,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Order {
    pub order_id: Uuid,
    /// Account that placed the order
    pub user_id: Uuid,
    /// Menu items in the order
    pub items: Vec<Uuid>,
    /// Cost left to pay
    ///
    /// Discounts and partial payments reduce this amount.
    total_cost: u64,
    /// Total discount applied to the order
    discount: u64,
    /// Cash taken so far through full or partial payments
    amount_paid: u64,
    payment_status: PaymentStatus,
    status: OrderStatus,
    delivery_agent: Option<Uuid>,
    rating: Option<Rating>,
    pub placed_at: DateTime<Utc>,
    paid_at: Option<DateTime<Utc>>,
}

impl Order {
    /// Place a new order for `user`
    ///
    /// No funds move: the order starts pending and unpaid, and is appended to the user's order
    /// history.
    pub fn place(
        order_id: Uuid,
        user: &mut Account,
        items: Vec<Uuid>,
        discount: u64,
        total_cost: u64,
    ) -> Self {
        user.record_order(order_id);

        Self {
            order_id,
            user_id: user.account_id,
            items,
            total_cost,
            discount,
            amount_paid: 0,
            payment_status: PaymentStatus::Unpaid,
            status: OrderStatus::Pending,
            delivery_agent: None,
            rating: None,
            placed_at: Utc::now(),
            paid_at: None,
        }
    }

    pub fn total_cost(&self) -> u64 {
        self.total_cost
    }

    pub fn discount(&self) -> u64 {
        self.discount
    }

    pub fn amount_paid(&self) -> u64 {
        self.amount_paid
    }

    pub fn payment_status(&self) -> PaymentStatus {
        self.payment_status
    }

    pub fn is_paid(&self) -> bool {
        self.payment_status == PaymentStatus::Paid
    }

    pub fn status(&self) -> &OrderStatus {
        &self.status
    }

    pub fn delivery_agent(&self) -> Option<Uuid> {
        self.delivery_agent
    }

    /// Rating given by the user, `0` when unrated
    pub fn rating(&self) -> u8 {
        self.rating.map(|rating| rating.value()).unwrap_or(0)
    }

    pub fn paid_at(&self) -> Option<DateTime<Utc>> {
        self.paid_at
    }

    pub fn apply_discount(&mut self, amount: u64) -> Result<(), Error> {
        self.ensure_unpaid()?;
        if amount > self.total_cost {
            return Err(Error::DiscountExceedsCost {
                discount: amount,
                total_cost: self.total_cost,
            });
        }

        self.discount += amount;
        self.total_cost -= amount;
        Ok(())
    }

    /// Pay the whole remaining cost from the user's balance
    pub fn pay_full(&mut self, user: &mut Account) -> Result<Payment, Error> {
        self.ensure_owner(user)?;
        self.ensure_unpaid()?;

        let funds = user.withdraw(self.total_cost)?;
        let points_awarded = points_for(funds.value());
        user.award_points(points_awarded);
        self.amount_paid += funds.value();
        self.mark_paid();

        Ok(Payment {
            funds,
            points_awarded,
            remaining_cost: 0,
        })
    }

    /// Pay the whole remaining cost with loyalty points
    ///
    /// Redemptions don't earn points and no cash leaves the user's balance.
    pub fn pay_with_points(&mut self, user: &mut Account) -> Result<PointsRedemption, Error> {
        self.ensure_owner(user)?;
        self.ensure_unpaid()?;

        let points_redeemed = self.total_cost;
        user.redeem_points(points_redeemed)?;
        self.mark_paid();

        Ok(PointsRedemption { points_redeemed })
    }

    /// Pay an installment towards the remaining cost
    ///
    /// The user's balance must cover `amount`, but the withdrawal is capped at the remaining
    /// cost. The order becomes paid once the remaining cost reaches zero, and only the settling
    /// installment earns loyalty points.
    pub fn pay_partial(&mut self, user: &mut Account, amount: u64) -> Result<Payment, Error> {
        self.ensure_owner(user)?;
        self.ensure_unpaid()?;
        if amount > user.balance() {
            return Err(Error::InsufficientFunds {
                available: user.balance(),
                required: amount,
            });
        }

        let funds = user.withdraw(amount.min(self.total_cost))?;
        self.total_cost -= funds.value();
        self.amount_paid += funds.value();
        let mut points_awarded = 0;
        if self.total_cost == 0 {
            points_awarded = points_for(funds.value());
            user.award_points(points_awarded);
            self.mark_paid();
        }

        Ok(Payment {
            funds,
            points_awarded,
            remaining_cost: self.total_cost,
        })
    }

    /// Cancel a pending, unpaid order
    ///
    /// No funds are taken before payment, so there is nothing to give back.
    pub fn cancel(&mut self, user: &Account) -> Result<(), Error> {
        self.ensure_owner(user)?;
        if self.status != OrderStatus::Pending {
            return Err(Error::AlreadyPrepared(self.order_id));
        }
        if self.is_paid() {
            return Err(Error::AlreadyCancelled(self.order_id));
        }

        self.status = OrderStatus::Cancelled;
        Ok(())
    }

    pub fn rate(&mut self, user: &mut Account, rating: u8) -> Result<(), Error> {
        let rating = Rating::try_from(rating)?;
        self.ensure_owner(user)?;
        if !self.is_paid() {
            return Err(Error::InvalidOrder {
                order_id: self.order_id,
                reason: "only paid orders can be rated".into(),
            });
        }
        if self.rating.is_some() {
            return Err(Error::AlreadyRated {
                order_id: self.order_id,
            });
        }

        self.rating = Some(rating);
        user.record_rating(rating.value());
        Ok(())
    }

    pub fn assign_delivery(&mut self, agent_id: Uuid) {
        self.delivery_agent = Some(agent_id);
    }

    pub fn update_status(&mut self, status: OrderStatus) {
        self.status = status;
    }

    pub fn complete(&mut self) {
        self.status = OrderStatus::Completed;
    }

    /// Mark the order as unpaid again
    ///
    /// This only flips the payment flag; reversing the funds is up to the restaurant.
    pub fn issue_refund(&mut self) {
        self.payment_status = PaymentStatus::Unpaid;
        self.paid_at = None;
    }

    fn mark_paid(&mut self) {
        self.payment_status = PaymentStatus::Paid;
        self.paid_at = Some(Utc::now());
    }

    fn ensure_unpaid(&self) -> Result<(), Error> {
        if self.is_paid() {
            return Err(Error::AlreadyPaid(self.order_id));
        }
        Ok(())
    }

    fn ensure_owner(&self, user: &Account) -> Result<(), Error> {
        if user.account_id != self.user_id {
            return Err(Error::InvalidOrder {
                order_id: self.order_id,
                reason: format!("order is not owned by {}", user.account_id).into(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::*;
    use speculoos::prelude::*;

    #[fixture]
    fn user() -> Account {
        let mut user = Account::new(Uuid::new_v4(), "alice");
        user.deposit(100);
        user
    }

    fn order_for(user: &mut Account, total_cost: u64) -> Order {
        Order::place(Uuid::new_v4(), user, vec![Uuid::new_v4()], 0, total_cost)
    }

    #[rstest]
    fn test_place(mut user: Account) {
        let order = order_for(&mut user, 30);

        assert_that!(order.status()).is_equal_to(&OrderStatus::Pending);
        assert_that!(order.payment_status()).is_equal_to(PaymentStatus::Unpaid);
        assert_that!(order.delivery_agent()).is_none();
        assert_that!(order.rating()).is_equal_to(0);
        assert_that!(user.order_history()).is_equal_to(&[order.order_id][..]);
        // No funds move when placing an order
        assert_that!(user.balance()).is_equal_to(100);
    }

    #[rstest]
    fn test_pay_full(mut user: Account) {
        // GIVEN a user with a balance of 100 and an order costing 30
        let mut order = order_for(&mut user, 30);

        // WHEN paying the order in full
        let res = order.pay_full(&mut user);

        // THEN the user is debited and earns 3 points
        assert_that!(res)
            .is_ok()
            .matches(|payment| payment.funds.value() == 30 && payment.points_awarded == 3);
        assert_that!(user.balance()).is_equal_to(70);
        assert_that!(user.loyalty_points()).is_equal_to(3);
        assert_that!(order.is_paid()).is_true();
        assert_that!(order.paid_at()).is_some();
    }

    #[rstest]
    fn test_pay_full_twice(mut user: Account) {
        let mut order = order_for(&mut user, 30);
        let _ = order.pay_full(&mut user).unwrap();

        let res = order.pay_full(&mut user);

        assert_that!(res)
            .is_err()
            .matches(|err| matches!(err, Error::AlreadyPaid(_)));
        assert_that!(user.balance()).is_equal_to(70);
        assert_that!(user.loyalty_points()).is_equal_to(3);
    }

    #[rstest]
    fn test_pay_full_insufficient(mut user: Account) {
        let mut order = order_for(&mut user, 150);

        let res = order.pay_full(&mut user);

        assert_that!(res)
            .is_err()
            .matches(|err| matches!(err, Error::InsufficientFunds { .. }));
        assert_that!(user.balance()).is_equal_to(100);
        assert_that!(order.is_paid()).is_false();
    }

    #[rstest]
    fn test_pay_full_other_user(mut user: Account) {
        let mut order = order_for(&mut user, 30);
        let mut other = Account::new(Uuid::new_v4(), "mallory");
        other.deposit(100);

        let res = order.pay_full(&mut other);

        assert_that!(res)
            .is_err()
            .matches(|err| matches!(err, Error::InvalidOrder { .. }));
        assert_that!(other.balance()).is_equal_to(100);
    }

    #[rstest]
    #[case(50, 0, PaymentStatus::Paid, 5)]
    #[case(20, 30, PaymentStatus::Unpaid, 0)]
    #[case(80, 0, PaymentStatus::Paid, 5)]
    fn test_pay_partial(
        mut user: Account,
        #[case] amount: u64,
        #[case] remaining: u64,
        #[case] status: PaymentStatus,
        #[case] points: u64,
    ) {
        // GIVEN an order costing 50
        let mut order = order_for(&mut user, 50);

        // WHEN paying an installment
        let res = order.pay_partial(&mut user, amount);

        // THEN the remaining cost drops by the amount withdrawn
        assert_that!(res).is_ok();
        assert_that!(order.total_cost()).is_equal_to(remaining);
        assert_that!(order.payment_status()).is_equal_to(status);
        assert_that!(user.loyalty_points()).is_equal_to(points);
        assert_that!(user.balance()).is_equal_to(100 - (50 - remaining));
    }

    #[rstest]
    fn test_pay_partial_chained(mut user: Account) {
        let mut order = order_for(&mut user, 50);

        let _ = order.pay_partial(&mut user, 20).unwrap();
        let payment = order.pay_partial(&mut user, 30).unwrap();

        assert_that!(payment.remaining_cost).is_equal_to(0);
        assert_that!(order.is_paid()).is_true();
        assert_that!(order.amount_paid()).is_equal_to(50);
        // Only the settling installment of 30 earns points
        assert_that!(payment.points_awarded).is_equal_to(3);
        assert_that!(user.loyalty_points()).is_equal_to(3);
        assert_that!(order.pay_partial(&mut user, 10))
            .is_err()
            .matches(|err| matches!(err, Error::AlreadyPaid(_)));
    }

    #[rstest]
    fn test_pay_partial_beyond_balance() {
        // GIVEN a balance of 60 and an order costing 50
        let mut user = Account::new(Uuid::new_v4(), "alice");
        user.deposit(60);
        let mut order = order_for(&mut user, 50);

        // WHEN offering an installment of 80
        let res = order.pay_partial(&mut user, 80);

        // THEN the balance doesn't cover the installment, even though it covers the order
        assert_that!(res).is_err().matches(|err| {
            matches!(
                err,
                Error::InsufficientFunds {
                    available: 60,
                    required: 80
                }
            )
        });
        assert_that!(user.balance()).is_equal_to(60);
        assert_that!(order.total_cost()).is_equal_to(50);
        assert_that!(order.is_paid()).is_false();
    }

    #[rstest]
    fn test_pay_with_points(mut user: Account) {
        user.award_points(40);
        let mut order = order_for(&mut user, 25);

        let res = order.pay_with_points(&mut user);

        assert_that!(res).is_ok().is_equal_to(PointsRedemption {
            points_redeemed: 25,
        });
        assert_that!(user.loyalty_points()).is_equal_to(15);
        assert_that!(user.balance()).is_equal_to(100);
        assert_that!(order.is_paid()).is_true();
    }

    #[rstest]
    fn test_pay_with_points_insufficient(mut user: Account) {
        user.award_points(10);
        let mut order = order_for(&mut user, 25);

        let res = order.pay_with_points(&mut user);

        assert_that!(res)
            .is_err()
            .matches(|err| matches!(err, Error::InsufficientFunds { .. }));
        assert_that!(user.loyalty_points()).is_equal_to(10);
        assert_that!(order.is_paid()).is_false();
    }

    #[rstest]
    fn test_cancel(mut user: Account) {
        let mut order = order_for(&mut user, 30);

        assert_that!(order.cancel(&user)).is_ok();
        assert_that!(order.status()).is_equal_to(&OrderStatus::Cancelled);
        assert_that!(user.balance()).is_equal_to(100);
        // Cancelling again fails since the order is not pending anymore
        assert_that!(order.cancel(&user))
            .is_err()
            .is_equal_to(Error::AlreadyPrepared(order.order_id));
    }

    #[rstest]
    fn test_cancel_paid(mut user: Account) {
        let mut order = order_for(&mut user, 30);
        let _ = order.pay_full(&mut user).unwrap();

        assert_that!(order.cancel(&user))
            .is_err()
            .is_equal_to(Error::AlreadyCancelled(order.order_id));
    }

    #[rstest]
    fn test_cancel_in_preparation(mut user: Account) {
        let mut order = order_for(&mut user, 30);
        order.update_status("preparing".into());

        assert_that!(order.cancel(&user))
            .is_err()
            .is_equal_to(Error::AlreadyPrepared(order.order_id));
    }

    #[rstest]
    #[case(10, 20)]
    #[case(30, 0)]
    fn test_apply_discount(mut user: Account, #[case] discount: u64, #[case] expected: u64) {
        let mut order = order_for(&mut user, 30);

        assert_that!(order.apply_discount(discount)).is_ok();
        assert_that!(order.total_cost()).is_equal_to(expected);
        assert_that!(order.discount()).is_equal_to(discount);
    }

    #[rstest]
    fn test_apply_discount_exceeds_cost(mut user: Account) {
        let mut order = order_for(&mut user, 30);

        assert_that!(order.apply_discount(31))
            .is_err()
            .is_equal_to(Error::DiscountExceedsCost {
                discount: 31,
                total_cost: 30,
            });
        assert_that!(order.total_cost()).is_equal_to(30);
    }

    #[rstest]
    fn test_rate(mut user: Account, #[values(1, 3, 5)] rating: u8) {
        let mut order = order_for(&mut user, 30);
        let _ = order.pay_full(&mut user).unwrap();

        assert_that!(order.rate(&mut user, rating)).is_ok();
        assert_that!(order.rating()).is_equal_to(rating);
        assert_that!(user.rating_history()).is_equal_to(&[rating][..]);
        // Ratings can only be given once
        assert_that!(order.rate(&mut user, rating))
            .is_err()
            .matches(|err| matches!(err, Error::AlreadyRated { .. }));
    }

    #[rstest]
    fn test_rate_out_of_range(mut user: Account, #[values(0, 6, 255)] rating: u8) {
        let mut order = order_for(&mut user, 30);
        let _ = order.pay_full(&mut user).unwrap();

        assert_that!(order.rate(&mut user, rating))
            .is_err()
            .is_equal_to(Error::InvalidRating(rating));
        assert_that!(order.rating()).is_equal_to(0);
    }

    #[rstest]
    fn test_rate_unpaid(mut user: Account, #[values(1, 5)] rating: u8) {
        let mut order = order_for(&mut user, 30);

        assert_that!(order.rate(&mut user, rating))
            .is_err()
            .matches(|err| matches!(err, Error::InvalidOrder { .. }));
        assert_that!(user.rating_history().len()).is_equal_to(0);
    }

    #[rstest]
    fn test_issue_refund(mut user: Account) {
        let mut order = order_for(&mut user, 30);
        let _ = order.pay_full(&mut user).unwrap();

        order.issue_refund();

        assert_that!(order.payment_status()).is_equal_to(PaymentStatus::Unpaid);
        // Only the flag changes
        assert_that!(user.balance()).is_equal_to(70);
    }

    #[rstest]
    #[case("pending", OrderStatus::Pending)]
    #[case("Completed", OrderStatus::Completed)]
    #[case("out for delivery", OrderStatus::Other("out for delivery".to_string()))]
    fn test_status_from_label(#[case] label: &str, #[case] expected: OrderStatus) {
        assert_that!(OrderStatus::from(label)).is_equal_to(expected);
    }
}
