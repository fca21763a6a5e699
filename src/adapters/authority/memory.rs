use crate::ports::authority::{AuthorityPort, Error};
use std::collections::HashSet;
use uuid::Uuid;

/// Fixed set of accounts holding the admin capability
#[derive(Clone, Debug, Default)]
pub struct StaticAuthority {
    admins: HashSet<Uuid>,
}

impl StaticAuthority {
    pub fn new(admins: impl IntoIterator<Item = Uuid>) -> Self {
        Self {
            admins: admins.into_iter().collect(),
        }
    }
}

#[async_trait::async_trait]
impl AuthorityPort for StaticAuthority {
    async fn is_admin(&self, caller: Uuid) -> Result<bool, Error> {
        Ok(self.admins.contains(&caller))
    }
}
