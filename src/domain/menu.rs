use uuid::Uuid;

/// Dish offered on a restaurant's menu
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MenuItem {
    pub item_id: Uuid,
    pub name: String,
    /// Price in native currency units
    pub price: u64,
}

impl MenuItem {
    pub fn new(item_id: Uuid, name: impl Into<String>, price: u64) -> Self {
        Self {
            item_id,
            name: name.into(),
            price,
        }
    }
}
