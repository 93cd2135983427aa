//! End-to-end tests: the wizard driving a live pdc-server over HTTP
//!
//! Boots the real server on an ephemeral port with an in-memory database and
//! runs `ApiClient` against it, so the full path (controller, autosaver,
//! HTTP client, router, record store) is exercised together.

use std::sync::Arc;
use std::time::Duration;

use pdc_common::config::ImageHostConfig;
use pdc_common::db::open_in_memory;
use pdc_common::model::{ConditionItem, InspectionStatus};
use pdc_server::{build_router, AppState};
use pdc_wizard::state::{ExteriorConditionPatch, VehicleDetailsPatch};
use pdc_wizard::{ApiClient, StoreError, Wizard};

/// Short debounce so the autosave assertions stay fast on a real clock
const TEST_QUIET: Duration = Duration::from_millis(50);

async fn spawn_server() -> String {
    let pool = open_in_memory().await.expect("in-memory database");
    let app = build_router(AppState::new(pool, ImageHostConfig::default()));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{}", addr)
}

async fn signed_in_client(base_url: &str) -> Arc<ApiClient> {
    let client = Arc::new(ApiClient::new(base_url));
    client
        .register("Inspector", "inspector@example.com", "pw-123456")
        .await
        .expect("register");
    client
}

#[tokio::test]
async fn capture_session_roundtrip_over_http() {
    let base_url = spawn_server().await;
    let client = signed_in_client(&base_url).await;

    let mut wizard = Wizard::begin_with_quiet(client.clone(), TEST_QUIET)
        .await
        .expect("create-before-edit draft");
    let record_id = wizard.record_id();

    // The draft is durable before any edit
    let draft = client.get_inspection(record_id).await.unwrap();
    assert_eq!(draft.status, InspectionStatus::Draft);

    // Edit, then let the debounced autosave reach the server
    wizard.update_vehicle_details(&VehicleDetailsPatch {
        client_name: Some("J. Doe".to_string()),
        ..VehicleDetailsPatch::default()
    });
    tokio::time::sleep(Duration::from_millis(500)).await;
    let saved = client.get_inspection(record_id).await.unwrap();
    assert_eq!(saved.vehicle_details.client_name, "J. Doe");
    assert_eq!(saved.status, InspectionStatus::Draft);

    // Complete synchronously and verify through a fresh fetch
    wizard.update_exterior_condition(&ExteriorConditionPatch {
        paint_condition: Some(ConditionItem::issue("scratch on door")),
        ..ExteriorConditionPatch::default()
    });
    let completed = wizard.complete().await.expect("complete must succeed");
    assert_eq!(completed.status, InspectionStatus::Completed);

    let fetched = client.get_inspection(record_id).await.unwrap();
    assert_eq!(fetched.status, InspectionStatus::Completed);
    assert_eq!(
        fetched.exterior_condition.paint_condition,
        ConditionItem::issue("scratch on door")
    );

    // And it shows up in the dashboard listing
    let all = client.list_inspections().await.unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].id, record_id);
}

#[tokio::test]
async fn deleted_records_are_gone_and_foreign_tokens_rejected() {
    let base_url = spawn_server().await;
    let client = signed_in_client(&base_url).await;

    let record = client
        .create_inspection(&Default::default())
        .await
        .unwrap();
    client.delete_inspection(record.id).await.unwrap();

    let missing = client.get_inspection(record.id).await;
    assert!(matches!(missing, Err(StoreError::NotFound)));

    // A client without a token cannot touch the record store at all
    let anonymous = ApiClient::new(base_url.as_str());
    assert!(matches!(
        anonymous.list_inspections().await,
        Err(StoreError::Unauthorized)
    ));

    // A different account sees another owner's ids as missing
    let other = Arc::new(ApiClient::new(base_url.as_str()));
    other
        .register("Other", "other@example.com", "pw-123456")
        .await
        .unwrap();
    let record = client.create_inspection(&Default::default()).await.unwrap();
    assert!(matches!(
        other.get_inspection(record.id).await,
        Err(StoreError::NotFound)
    ));
}
