use std::sync::Arc;

use rust_food_delivery_service::{
    adapters::{authority::memory::StaticAuthority, database::memory::MemoryDatabase},
    commands::{
        ledger::{DepositRequest, OpenAccountRequest},
        menu::CreateMenuItemRequest,
        payment::PayFullRequest,
        place_order::PlaceOrderRequest,
        rate_order::RateOrderRequest,
        serve, DomainLogic,
    },
    config::Config,
    telemetry::setup_tracing,
};
use tower::BoxError;
use uuid::Uuid;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    let config = Config::load()?;
    setup_tracing(&config.logging);

    let admin = Uuid::new_v4();
    let database = Arc::new(MemoryDatabase::default());
    let mut domain = DomainLogic::new(
        database,
        Arc::new(StaticAuthority::new([admin])),
        config.lifecycle.clone(),
    );

    let user = serve(
        &mut domain,
        OpenAccountRequest {
            name: "alice".to_string(),
        },
    )
    .await?;
    let restaurant = serve(
        &mut domain,
        OpenAccountRequest {
            name: "noodle bar".to_string(),
        },
    )
    .await?;
    let item = serve(
        &mut domain,
        CreateMenuItemRequest {
            caller: admin,
            name: "dan dan noodles".to_string(),
            price: 30,
        },
    )
    .await?;

    serve(
        &mut domain,
        DepositRequest {
            account_id: user.account_id,
            amount: 100,
        },
    )
    .await?;
    let order = serve(
        &mut domain,
        PlaceOrderRequest {
            user_id: user.account_id,
            items: vec![item.item_id],
            discount: 0,
            total_cost: item.price,
        },
    )
    .await?;
    let payment = serve(
        &mut domain,
        PayFullRequest {
            user_id: user.account_id,
            order_id: order.order_id,
            payee_id: restaurant.account_id,
        },
    )
    .await?;
    tracing::info!(?payment, "payment settled");

    let order = serve(
        &mut domain,
        RateOrderRequest {
            user_id: user.account_id,
            order_id: order.order_id,
            rating: 5,
        },
    )
    .await?;
    tracing::info!(rating = order.rating(), "order rated");

    Ok(())
}
