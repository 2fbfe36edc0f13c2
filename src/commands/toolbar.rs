//! 工具栏动作命令
//! 工具栏本身是查看器产出的声明式描述，这里实现两个按钮按下后的动作：
//! 全屏切换与"用默认应用打开"。

use tauri_plugin_opener::OpenerExt;

use super::preview::SessionState;
use crate::viewers::ViewerError;

/// 切换宿主窗口全屏状态，返回切换后的状态
#[tauri::command]
pub async fn toolbar_toggle_fullscreen(window: tauri::Window) -> Result<bool, String> {
    let fullscreen = window.is_fullscreen().map_err(|e| e.to_string())?;
    window
        .set_fullscreen(!fullscreen)
        .map_err(|e| e.to_string())?;
    Ok(!fullscreen)
}

/// 用系统默认应用打开当前预览的文件
#[tauri::command]
pub async fn toolbar_open_external(
    app: tauri::AppHandle,
    session: SessionState<'_>,
) -> Result<(), String> {
    let guard = session.lock().await;
    let active = match guard.as_ref() {
        Some(active) => active,
        None => return Err(ViewerError::no_active_session().to_string()),
    };

    println!("[toolbar] 用默认应用打开: {}", active.file.path);
    app.opener()
        .open_path(active.file.path.clone(), None::<&str>)
        .map_err(|e| format!("打开失败: {}", e))
}
