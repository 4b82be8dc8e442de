pub mod console;
pub mod link;
pub mod motor;
pub mod settings;
mod utils;

use std::sync::Arc;

use console::{
    commands::{commit_reading, get_console_snapshot, toggle_field_lock, undo_last_reading},
    ConsoleController, ConsoleObserver,
};
use link::RigLink;
use motor::{MotorCommand, MotorRelay};
use settings::{RigSettings, SettingsStore};
use tauri::{Emitter, Manager, State};
use tokio::sync::Mutex;

const CONTROLLER_PATH: &str = "controllerdata";

pub(crate) struct AppState {
    pub(crate) console: ConsoleController,
    link: Mutex<RigLink>,
    motor: MotorRelay,
    settings: SettingsStore,
}

#[tauri::command]
async fn relay_key(
    key: String,
    pressed: bool,
    state: State<'_, AppState>,
) -> Result<Option<MotorCommand>, String> {
    Ok(state.motor.relay_key(&key, pressed).await)
}

#[tauri::command]
async fn resend_motor_command(state: State<'_, AppState>) -> Result<MotorCommand, String> {
    Ok(state.motor.resend().await)
}

#[tauri::command]
fn get_rig_settings(state: State<'_, AppState>) -> Result<RigSettings, String> {
    Ok(state.settings.rig())
}

#[tauri::command]
async fn set_rig_settings(
    settings: RigSettings,
    state: State<'_, AppState>,
    app_handle: tauri::AppHandle,
) -> Result<(), String> {
    state
        .settings
        .update_rig(settings.clone())
        .map_err(|e| e.to_string())?;

    state
        .motor
        .set_endpoint(settings.endpoint(CONTROLLER_PATH))
        .await;

    state
        .link
        .lock()
        .await
        .restart(&settings, state.console.clone())
        .await
        .map_err(|e| e.to_string())?;

    app_handle
        .emit("rig-settings-updated", &settings)
        .map_err(|e| e.to_string())?;

    Ok(())
}

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    // Initialize logging (reads RUST_LOG env var)
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    log::info!("DuckRig console starting up...");

    tauri::Builder::default()
        .plugin(tauri_plugin_opener::init())
        .setup(|app| {
            let result = (|| -> anyhow::Result<()> {
                let app_data_dir = app
                    .path()
                    .app_data_dir()
                    .map_err(|err| anyhow::anyhow!(err))?;
                std::fs::create_dir_all(&app_data_dir)?;

                let settings_store = SettingsStore::new(app_data_dir.join("settings.json"))?;
                let rig = settings_store.rig();
                log::info!("Rig endpoint: {}", rig.rig_url);

                let observer: Arc<dyn ConsoleObserver> = Arc::new(app.handle().clone());
                let console = ConsoleController::new(observer);

                let client = reqwest::Client::new();
                let motor = MotorRelay::new(client.clone(), rig.endpoint(CONTROLLER_PATH));

                let mut link = RigLink::new(client);
                {
                    let console = console.clone();
                    tauri::async_runtime::block_on(async { link.start(&rig, console) })?;
                }

                app.manage(AppState {
                    console,
                    link: Mutex::new(link),
                    motor,
                    settings: settings_store,
                });

                Ok(())
            })();

            result.map_err(|err| err.into())
        })
        .invoke_handler(tauri::generate_handler![
            get_console_snapshot,
            toggle_field_lock,
            commit_reading,
            undo_last_reading,
            relay_key,
            resend_motor_command,
            get_rig_settings,
            set_rig_settings,
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
