use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, PoisonError};

use serde_json::{json, Value};

use advance_api::{build_api, ApiOptions, Endpoint, HandlerError, ModuleDescriptor, Toolkit};

const DEFAULT_ADDR: &str = "0.0.0.0:8080";

type Store = Arc<Mutex<BTreeMap<String, Value>>>;

/// `/users`: plain endpoint list over an in-memory store.
fn users_module(store: Store) -> ModuleDescriptor {
    let list_store = store.clone();
    let get_store = store.clone();

    ModuleDescriptor::declarative(
        "/users",
        vec![
            Endpoint::get("/", move |_req, res| {
                let store = list_store.clone();
                async move {
                    let users: Vec<Value> = store
                        .lock()
                        .unwrap_or_else(PoisonError::into_inner)
                        .values()
                        .cloned()
                        .collect();
                    Ok(res.success(users))
                }
            })
            .describe("List users"),
            Endpoint::get("/:id", move |req, res| {
                let store = get_store.clone();
                async move {
                    let id = req.param("id").unwrap_or_default();
                    let user = store
                        .lock()
                        .unwrap_or_else(PoisonError::into_inner)
                        .get(id)
                        .cloned();
                    match user {
                        Some(user) => Ok(res.success(user)),
                        None => Ok(res.error_with_code(format!("user {id} not found"), 404)),
                    }
                }
            })
            .describe("Fetch one user"),
        ],
    )
}

/// `/orders`: routes declared from a build function.
fn orders_module(toolkit: &Toolkit, store: Store) -> ModuleDescriptor {
    let kit = toolkit.clone();

    ModuleDescriptor::imperative("/orders", move |router| {
        let create_store = store.clone();
        router.post("/", move |req, res| {
            let store = create_store.clone();
            let kit = kit.clone();
            async move {
                let body: Value = req.json()?;
                let item = kit.objects().get_or(&body, "item", Value::Null);
                if item.is_null() {
                    return Err(HandlerError::rejected(
                        axum::http::StatusCode::BAD_REQUEST,
                        "`item` is required",
                    ));
                }

                let id = kit.uuid();
                let order = json!({ "id": id, "item": item });
                store
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .insert(id, order.clone());
                Ok(res.success(order))
            }
        })?;

        router.delete("/:id", move |req, res| {
            let store = store.clone();
            async move {
                let id = req.param("id").unwrap_or_default();
                let removed = store
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .remove(id);
                match removed {
                    Some(order) => Ok(res.success(order)),
                    None => Ok(res.error_with_code(format!("order {id} not found"), 404)),
                }
            }
        })?;

        Ok(())
    })
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    advance_api_observability::init();

    let addr = std::env::var("ADVANCE_API_ADDR").unwrap_or_else(|_| DEFAULT_ADDR.to_string());

    let users: Store = Arc::new(Mutex::new(BTreeMap::from([(
        "1".to_string(),
        json!({ "id": "1", "name": "Ada" }),
    )])));
    let orders: Store = Arc::default();

    let api = build_api(ApiOptions::from_env().setup(move |kit| {
        Ok(vec![users_module(users), orders_module(kit, orders)])
    }))?;

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, api.into_router()).await?;
    Ok(())
}
