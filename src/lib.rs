mod commands;
mod viewers;

use commands::*;
use std::sync::Arc;
use tauri::Manager;
use viewers::registry::ViewerRegistry;

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    tauri::Builder::default()
        .plugin(tauri_plugin_dialog::init())
        .plugin(tauri_plugin_fs::init())
        .plugin(tauri_plugin_opener::init())
        .setup(|app| {
            // 启动时显式构建查看器注册表，并交给 Tauri 托管。
            // 注册表不是进程级全局状态，避免模块加载顺序带来的隐藏依赖。
            let registry = ViewerRegistry::with_default_viewers();
            println!(
                "[registry] 已注册 MIME 类型: {}",
                registry.registered_mime_types().join(", ")
            );
            app.manage(Arc::new(registry));

            // 预览会话槽位：同一时刻至多一个会话，由宿主负责创建与销毁
            app.manage(SharedSession::default());

            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            open_preview,
            render_preview,
            preview_size_for_allocation,
            preview_toolbar,
            close_preview,
            supported_mime_types,
            toolbar_toggle_fullscreen,
            toolbar_open_external,
            frontend_log
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
