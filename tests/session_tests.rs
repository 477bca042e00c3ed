//! Tests del pegamento de sesión: el almacén vive y muere con la identidad

use fleetguard::models::auth::{LoginRequest, SignupRequest};
use fleetguard::services::auth_service::DEMO_ADMIN_EMAIL;
use fleetguard::{AppError, AppState, EnvironmentConfig};
use tempfile::TempDir;

fn local_config(dir: &TempDir) -> EnvironmentConfig {
    EnvironmentConfig::local(dir.path(), true)
}

#[tokio::test]
async fn sign_in_loads_the_seeded_fleet() {
    let dir = TempDir::new().unwrap();
    let mut state = AppState::new(local_config(&dir)).await.unwrap();

    assert!(state.fleet().is_none());

    let user = state
        .sign_in(&LoginRequest {
            email: DEMO_ADMIN_EMAIL.to_string(),
            password: "admin123".to_string(),
        })
        .await
        .unwrap();

    assert_eq!(user.name, "Tendai Mukamuri");
    let fleet = state.fleet().unwrap();
    assert_eq!(fleet.vehicles().len(), 4);
    assert_eq!(fleet.drivers().len(), 4);
    assert_eq!(fleet.maintenance_records().len(), 4);
}

#[tokio::test]
async fn sign_out_tears_down_the_store() {
    let dir = TempDir::new().unwrap();
    let mut state = AppState::new(local_config(&dir)).await.unwrap();

    state.sign_in_demo().await.unwrap();
    assert!(state.fleet().is_some());

    state.sign_out();

    assert!(!state.is_authenticated());
    assert!(state.fleet().is_none());
}

#[tokio::test]
async fn wrong_credentials_leave_no_session() {
    let dir = TempDir::new().unwrap();
    let mut state = AppState::new(local_config(&dir)).await.unwrap();

    let result = state
        .sign_in(&LoginRequest {
            email: DEMO_ADMIN_EMAIL.to_string(),
            password: "nope123".to_string(),
        })
        .await;

    assert!(matches!(result, Err(AppError::Unauthorized(_))));
    assert!(!state.is_authenticated());
    assert!(state.fleet().is_none());
}

#[tokio::test]
async fn persisted_session_reopens_the_store_on_restart() {
    let dir = TempDir::new().unwrap();

    let mut state = AppState::new(local_config(&dir)).await.unwrap();
    state.sign_in_demo().await.unwrap();
    drop(state);

    // Nuevo arranque sobre el mismo directorio: la sesión persistida
    // reabre el almacén sin pasar por login
    let state = AppState::new(local_config(&dir)).await.unwrap();
    assert!(state.is_authenticated());
    assert_eq!(state.fleet().unwrap().vehicles().len(), 4);
}

#[tokio::test]
async fn signup_opens_a_manager_session() {
    let dir = TempDir::new().unwrap();
    let mut state = AppState::new(local_config(&dir)).await.unwrap();

    let user = state
        .sign_up(&SignupRequest {
            name: "Hope Chuma".to_string(),
            email: "hope.chuma@company.co.zw".to_string(),
            password: "secret1".to_string(),
        })
        .await
        .unwrap();

    assert_eq!(state.current_user().map(|u| u.id.as_str()), Some(user.id.as_str()));
    assert!(state.fleet().is_some());
}
