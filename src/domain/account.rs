use uuid::Uuid;

use super::Error;

/// Currency units paid for each loyalty point awarded
pub const POINTS_RATE: u64 = 10;

/// Loyalty points earned by a cash payment of `amount`
pub fn points_for(amount: u64) -> u64 {
    amount / POINTS_RATE
}

/// A user's ledger entry
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Account {
    /// Unique identifier for the `Account`
    ///
    /// Users, restaurants and delivery agents all hold an account.
    pub account_id: Uuid,
    pub name: String,
    /// Spendable balance, in native currency units
    balance: u64,
    /// Loyalty points available for redemption
    loyalty_points: u64,
    /// Orders placed by this account, oldest first
    order_history: Vec<Uuid>,
    /// Ratings given by this account, oldest first
    rating_history: Vec<u8>,
}

impl Account {
    pub fn new(account_id: Uuid, name: impl Into<String>) -> Self {
        Self {
            account_id,
            name: name.into(),
            balance: 0,
            loyalty_points: 0,
            order_history: Vec::default(),
            rating_history: Vec::default(),
        }
    }

    pub fn balance(&self) -> u64 {
        self.balance
    }

    pub fn loyalty_points(&self) -> u64 {
        self.loyalty_points
    }

    pub fn order_history(&self) -> &[Uuid] {
        &self.order_history
    }

    pub fn rating_history(&self) -> &[u8] {
        &self.rating_history
    }

    /// Add cash to the balance
    ///
    /// The balance saturates at `u64::MAX`: any amount beyond the cap is dropped.
    pub fn deposit(&mut self, amount: u64) {
        self.balance = self.balance.saturating_add(amount);
    }

    /// Credit a transferable value previously taken out of an account
    ///
    /// Like [`Account::deposit`], the balance saturates at `u64::MAX`.
    pub fn receive(&mut self, funds: Funds) {
        self.deposit(funds.0);
    }

    pub fn withdraw(&mut self, amount: u64) -> Result<Funds, Error> {
        if amount > self.balance {
            return Err(Error::InsufficientFunds {
                available: self.balance,
                required: amount,
            });
        }

        self.balance -= amount;
        Ok(Funds(amount))
    }

    pub fn award_points(&mut self, points: u64) {
        self.loyalty_points = self.loyalty_points.saturating_add(points);
    }

    pub fn redeem_points(&mut self, points: u64) -> Result<(), Error> {
        if points > self.loyalty_points {
            return Err(Error::InsufficientFunds {
                available: self.loyalty_points,
                required: points,
            });
        }

        self.loyalty_points -= points;
        Ok(())
    }

    pub(super) fn record_order(&mut self, order_id: Uuid) {
        self.order_history.push(order_id);
    }

    pub(super) fn record_rating(&mut self, rating: u8) {
        self.rating_history.push(rating);
    }
}

/// Value taken out of an account
///
/// `Funds` can only be created by [`Account::withdraw`] and must end up in an account through
/// [`Account::receive`], so currency is never created or lost in transit. The only exception is
/// a receiving balance at the `u64::MAX` cap, which keeps the cap.
#[derive(Debug, PartialEq, Eq)]
#[must_use = "withdrawn funds must be received by an account"]
pub struct Funds(u64);

impl Funds {
    pub fn value(&self) -> u64 {
        self.0
    }
}
