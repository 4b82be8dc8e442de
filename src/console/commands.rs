use tauri::State;

use crate::{
    console::{ConsoleController, ConsoleSnapshot, LedgerRow, TrackedField},
    AppState,
};

fn controller_from_state(state: &State<'_, AppState>) -> ConsoleController {
    state.console.clone()
}

#[tauri::command]
pub async fn get_console_snapshot(state: State<'_, AppState>) -> Result<ConsoleSnapshot, String> {
    let controller = controller_from_state(&state);
    Ok(controller.get_snapshot().await)
}

#[tauri::command]
pub async fn toggle_field_lock(
    state: State<'_, AppState>,
    field_index: usize,
) -> Result<bool, String> {
    let field = TrackedField::from_index(field_index)
        .ok_or_else(|| format!("no tracked field at index {field_index}"))?;
    let controller = controller_from_state(&state);
    Ok(controller.toggle_lock(field).await)
}

#[tauri::command]
pub async fn commit_reading(state: State<'_, AppState>) -> Result<Option<LedgerRow>, String> {
    let controller = controller_from_state(&state);
    Ok(controller.attempt_commit().await)
}

#[tauri::command]
pub async fn undo_last_reading(state: State<'_, AppState>) -> Result<Option<LedgerRow>, String> {
    let controller = controller_from_state(&state);
    Ok(controller.undo_last().await)
}
