use std::sync::Arc;

use uuid::Uuid;

use crate::{
    config::LifecycleConfig,
    domain::{self, MenuItem},
    ports::{
        authority::AuthorityPort,
        database::{self, DatabasePort},
    },
};

pub mod cancel_order;
pub mod fulfilment;
pub mod ledger;
pub mod menu;
pub mod payment;
pub mod place_order;
pub mod rate_order;

/// Entry point for every operation
///
/// Each request type is served through [`tower::Service`]. Operations load the records they
/// need, apply the domain rules on local copies, then commit every change in a single
/// [`UnitOfWork`](crate::ports::database::UnitOfWork).
pub struct DomainLogic<D, A> {
    database: Arc<D>,
    authority: Arc<A>,
    config: Arc<LifecycleConfig>,
}

impl<D, A> DomainLogic<D, A> {
    pub fn new(database: Arc<D>, authority: Arc<A>, config: LifecycleConfig) -> Self {
        Self {
            database,
            authority,
            config: Arc::new(config),
        }
    }
}

impl<D, A> Clone for DomainLogic<D, A> {
    fn clone(&self) -> Self {
        Self {
            database: self.database.clone(),
            authority: self.authority.clone(),
            config: self.config.clone(),
        }
    }
}

impl<D, A> DomainLogic<D, A>
where
    D: DatabasePort,
    A: AuthorityPort,
{
    /// Check that `caller` holds the admin capability, if admin gating is enabled
    async fn ensure_admin(&self, caller: Uuid) -> Result<(), Error> {
        if !self.config.admin_gated {
            return Ok(());
        }

        if self.authority.is_admin(caller).await? {
            Ok(())
        } else {
            tracing::warn!(%caller, "caller is not an admin");
            Err(Error::Unauthorized(caller))
        }
    }

    async fn get_menu_item(&self, item_id: Uuid) -> Result<MenuItem, Error> {
        match self.database.get_menu_item(item_id).await {
            Ok(item) => Ok(item),
            Err(database::Error::MenuItemDoesNotExist(item_id)) => {
                Err(rejected(domain::Error::ItemNotFound(item_id)))
            }
            Err(err) => Err(err.into()),
        }
    }
}

/// Log a business rule violation before returning it
fn rejected(err: domain::Error) -> Error {
    tracing::warn!(error = %err, "operation rejected");
    Error::Domain(err)
}

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("database port error: {0:?}")]
    Database(#[from] crate::ports::database::Error),
    #[error("authority port error: {0:?}")]
    Authority(#[from] crate::ports::authority::Error),
    #[error(transparent)]
    Domain(#[from] domain::Error),

    #[error("{0} is not allowed to perform this operation")]
    Unauthorized(Uuid),
}

/// Serve a request type through the matching `DomainLogic` method
macro_rules! service {
    ($request:ty => $response:ty, $method:ident) => {
        impl<D, A> tower::Service<$request> for $crate::commands::DomainLogic<D, A>
        where
            D: $crate::ports::database::DatabasePort + 'static,
            A: $crate::ports::authority::AuthorityPort + 'static,
        {
            type Response = $response;
            type Error = $crate::commands::Error;
            type Future = std::pin::Pin<
                Box<dyn std::future::Future<Output = Result<Self::Response, Self::Error>>>,
            >;

            fn poll_ready(
                &mut self,
                _cx: &mut std::task::Context<'_>,
            ) -> std::task::Poll<Result<(), Self::Error>> {
                std::task::Poll::Ready(Ok(()))
            }

            fn call(&mut self, req: $request) -> Self::Future {
                let logic = self.clone();
                Box::pin(async move { logic.$method(req).await })
            }
        }
    };
}

pub(crate) use service;

/// Wait for `service` to be ready, then send it `req`
///
/// `DomainLogic` serves one `Service` per request type, so readiness has to be polled for a
/// named request type.
pub async fn serve<S, R>(service: &mut S, req: R) -> Result<S::Response, S::Error>
where
    S: tower::Service<R>,
{
    use tower::{Service, ServiceExt};

    ServiceExt::<R>::ready(service).await?.call(req).await
}
