use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use reqwest::StatusCode as HttpStatusCode;
use serde_json::json;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use uuid::Uuid;

use server::routes::{self, ServerState};
use service::sheet::SheetStore;
use service::storage::JsonSheetFile;

fn cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

struct TestApp {
    base_url: String,
}

async fn start_server() -> anyhow::Result<TestApp> {
    // Isolated temp sheet file per test run
    let data_file = format!("target/test-data/{}/sheets.json", Uuid::new_v4());
    let store = SheetStore::new(Arc::new(JsonSheetFile::new(data_file)));
    let state = ServerState { store };

    let app: Router = routes::build_router(state, cors());
    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr: SocketAddr = listener.local_addr()?;
    let base_url = format!("http://{}:{}", addr.ip(), addr.port());

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            eprintln!("server error: {}", e);
        }
    });

    Ok(TestApp { base_url })
}

fn client() -> reqwest::Client {
    reqwest::Client::new()
}

#[tokio::test]
async fn e2e_health() -> anyhow::Result<()> {
    let app = start_server().await?;
    let res = client().get(format!("{}/api/health", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["status"], "ok");
    Ok(())
}

#[tokio::test]
async fn e2e_inventory_crud_flow() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = client();

    // empty tab to start with
    let res = c.get(format!("{}/api/inventory", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    assert_eq!(res.json::<serde_json::Value>().await?, json!([]));

    // create -> id 1, equal timestamps
    let res = c
        .post(format!("{}/api/inventory", app.base_url))
        .json(&json!({"name": "Rice", "quantity": 50, "unit": "kg", "category": "Grains"}))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let created = res.json::<serde_json::Value>().await?;
    assert_eq!(created["id"], 1);
    assert_eq!(created["name"], "Rice");
    assert_eq!(created["created_at"], created["updated_at"]);

    // partial update keeps untouched fields
    let res = c
        .put(format!("{}/api/inventory/1", app.base_url))
        .json(&json!({"quantity": 30}))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let updated = res.json::<serde_json::Value>().await?;
    assert_eq!(updated["quantity"], 30);
    assert_eq!(updated["name"], "Rice");
    assert_eq!(updated["unit"], "kg");

    // unknown id -> 404 with a JSON error body
    let res = c
        .put(format!("{}/api/inventory/99", app.base_url))
        .json(&json!({"quantity": 1}))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);
    let body = res.json::<serde_json::Value>().await?;
    assert!(body["error"].as_str().unwrap_or_default().contains("not found"));

    // delete, then the list is empty again
    let res = c.delete(format!("{}/api/inventory/1", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let res = c.get(format!("{}/api/inventory", app.base_url)).send().await?;
    assert_eq!(res.json::<serde_json::Value>().await?, json!([]));

    let res = c.delete(format!("{}/api/inventory/1", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn e2e_employee_boolean_round_trip() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = client();

    let res = c
        .post(format!("{}/api/employees", app.base_url))
        .json(&json!({"name": "Ana", "role": "Cook", "active": false}))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    assert_eq!(res.json::<serde_json::Value>().await?["active"], false);

    // `active` defaults to true when omitted
    let res = c
        .post(format!("{}/api/employees", app.base_url))
        .json(&json!({"name": "Jo", "role": "Baker"}))
        .send()
        .await?;
    assert_eq!(res.json::<serde_json::Value>().await?["active"], true);

    let res = c.get(format!("{}/api/employees", app.base_url)).send().await?;
    let listed = res.json::<serde_json::Value>().await?;
    assert_eq!(listed[0]["active"], false);
    assert_eq!(listed[1]["active"], true);
    Ok(())
}

#[tokio::test]
async fn e2e_checkin_flow() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = client();

    let emp = c
        .post(format!("{}/api/employees", app.base_url))
        .json(&json!({"name": "Ana", "role": "Cook", "active": true}))
        .send()
        .await?
        .json::<serde_json::Value>()
        .await?;
    let today = chrono::Local::now().format("%Y-%m-%d").to_string();
    let dish = c
        .post(format!("{}/api/dishes", app.base_url))
        .json(&json!({"name": "Feijoada", "description": "Black bean stew", "date": today}))
        .send()
        .await?
        .json::<serde_json::Value>()
        .await?;

    // unresolved employee reference -> 404, nothing appended
    let res = c
        .post(format!("{}/api/checkins", app.base_url))
        .json(&json!({"employee_id": 7, "dish_id": dish["id"], "date": today, "time": "12:30"}))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);
    let res = c.get(format!("{}/api/checkins", app.base_url)).send().await?;
    assert_eq!(res.json::<serde_json::Value>().await?, json!([]));

    // valid check-in copies the referenced names in
    let res = c
        .post(format!("{}/api/checkins", app.base_url))
        .json(&json!({"employee_id": emp["id"], "dish_id": dish["id"], "date": today, "time": "12:30"}))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let checkin = res.json::<serde_json::Value>().await?;
    assert_eq!(checkin["employee_name"], "Ana");
    assert_eq!(checkin["dish_name"], "Feijoada");

    // today's view includes it
    let res = c.get(format!("{}/api/checkins/today", app.base_url)).send().await?;
    let todays = res.json::<serde_json::Value>().await?;
    assert_eq!(todays.as_array().map(|a| a.len()), Some(1));
    assert_eq!(todays[0]["id"], checkin["id"]);
    Ok(())
}
