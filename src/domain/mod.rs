use std::borrow::Cow;

use uuid::Uuid;

mod account;
mod menu;
mod order;

pub use account::{points_for, Account, Funds, POINTS_RATE};
pub use menu::MenuItem;
pub use order::{Order, OrderStatus, Payment, PaymentStatus, PointsRedemption, Rating};

/// Business rule violations
///
/// Every operation checks its preconditions before mutating anything, so returning one of these
/// leaves the records exactly as they were loaded.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// Debiting `required` from a balance of `available` would make it negative
    ///
    /// Used both for spendable balances and loyalty points.
    #[error("insufficient funds: {required} required, {available} available")]
    InsufficientFunds { available: u64, required: u64 },

    #[error("order {0} is already paid")]
    AlreadyPaid(Uuid),

    /// Ratings must be between 1 and 5 inclusive
    #[error("invalid rating: {0}")]
    InvalidRating(u8),

    #[error("order {order_id} is already rated")]
    AlreadyRated { order_id: Uuid },

    /// The order is not in a state, or not owned by the caller, that allows the operation
    #[error("invalid order {order_id}: {reason}")]
    InvalidOrder {
        order_id: Uuid,
        reason: Cow<'static, str>,
    },

    /// The order was paid and can no longer be cancelled
    #[error("order {0} cannot be cancelled once paid")]
    AlreadyCancelled(Uuid),

    /// The order left the pending state
    #[error("order {0} is already being prepared")]
    AlreadyPrepared(Uuid),

    #[error("menu item {0} not found")]
    ItemNotFound(Uuid),

    #[error("discount of {discount} exceeds order cost of {total_cost}")]
    DiscountExceedsCost { discount: u64, total_cost: u64 },
}
