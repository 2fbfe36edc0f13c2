//! 预览会话命令
//! 宿主窗口与查看器层之间的边界：按 MIME 类型分发、驱动查看器契约的
//! 各个操作。会话状态由 Tauri 托管，命令在异步锁上串行，查看器本身
//! 不做任何后台工作。

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tauri::{Emitter, State};
use tokio::sync::Mutex;

use crate::viewers::html::engine::HtmlEngine;
use crate::viewers::registry::ViewerRegistry;
use crate::viewers::{
    mime_type_for_path, Allocation, DisplayContainer, FileRef, HostWindow, Toolbar, Viewer,
    ViewerError,
};

/// 进行中的预览会话：查看器实例的生命周期与会话一致
pub struct PreviewSession {
    pub viewer: Box<dyn Viewer>,
    pub file: FileRef,
    pub mime_type: String,
}

/// 会话槽位：同一时刻至多一个预览会话
pub type SharedSession = Arc<Mutex<Option<PreviewSession>>>;

pub type SessionState<'a> = State<'a, SharedSession>;
pub type RegistryState<'a> = State<'a, Arc<ViewerRegistry>>;

/// 打开预览后回传给宿主的会话信息
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreviewInfo {
    pub mime_type: String,
    pub move_on_click: bool,
    pub can_full_screen: bool,
    pub title: Option<String>,
}

/// 宿主窗口标题：HTML 优先取 <title>，其余退回文件名。
/// 标题只是锦上添花，读取失败一律静默。
fn caption_for(file: &FileRef, mime_type: &str) -> Option<String> {
    if mime_type == "text/html" {
        if let Ok(engine) = HtmlEngine::from_file(&file.path) {
            return engine.title();
        }
    }
    file.file_stem()
}

/// 打开一个预览会话
///
/// 流程：识别 MIME 类型 → 从注册表为本会话创建查看器 → 解析文件引用 →
/// `prepare`。附着回调向宿主窗口发出 `quickpeek:preview:attached` 事件，
/// 该事件只表示表面可挂载；内容加载完成与否由渲染表面经
/// `quickpeek:preview:loaded` 另行上报，与本命令无关。
/// 已有会话会被新会话替换。
#[tauri::command]
pub async fn open_preview(
    path: String,
    window: tauri::Window,
    registry: RegistryState<'_>,
    session: SessionState<'_>,
) -> Result<PreviewInfo, String> {
    let mime_type = mime_type_for_path(&path)
        .ok_or_else(|| format!("不支持预览的文件类型: {}", path))?;

    let mut viewer = registry
        .create_viewer(mime_type)
        .ok_or_else(|| ViewerError::unsupported_mime_type(mime_type).to_string())?;

    let file = FileRef::new(&path).map_err(|e| e.to_string())?;
    let host = HostWindow::new(window.label());

    let attached_window = window.clone();
    let attached_payload = serde_json::json!({ "mimeType": mime_type });
    viewer.prepare(
        file.clone(),
        host,
        Box::new(move || {
            let _ = attached_window.emit("quickpeek:preview:attached", attached_payload);
        }),
    );

    let caps = viewer.capabilities();
    let title = caption_for(&file, mime_type);
    if let Some(t) = &title {
        let _ = window.set_title(t);
    }

    println!("[preview] 打开会话: {} ({})", path, mime_type);

    let mut guard = session.lock().await;
    *guard = Some(PreviewSession {
        viewer,
        file,
        mime_type: mime_type.to_string(),
    });

    Ok(PreviewInfo {
        mime_type: mime_type.to_string(),
        move_on_click: caps.move_on_click,
        can_full_screen: caps.can_full_screen,
        title,
    })
}

/// 取当前会话的显示容器，交给宿主挂载
#[tauri::command]
pub async fn render_preview(
    session: SessionState<'_>,
) -> Result<Option<DisplayContainer>, String> {
    let guard = session.lock().await;
    match guard.as_ref() {
        Some(active) => Ok(active.viewer.render()),
        None => Err(ViewerError::no_active_session().to_string()),
    }
}

/// 查看器的尺寸协商：宿主给出分配，查看器返回期望尺寸
#[tauri::command]
pub async fn preview_size_for_allocation(
    allocation: Allocation,
    session: SessionState<'_>,
) -> Result<Allocation, String> {
    let guard = session.lock().await;
    match guard.as_ref() {
        Some(active) => Ok(active.viewer.size_for_allocation(allocation)),
        None => Err(ViewerError::no_active_session().to_string()),
    }
}

/// 取当前会话的工具栏描述
#[tauri::command]
pub async fn preview_toolbar(session: SessionState<'_>) -> Result<Option<Toolbar>, String> {
    let guard = session.lock().await;
    match guard.as_ref() {
        Some(active) => Ok(active.viewer.create_toolbar()),
        None => Err(ViewerError::no_active_session().to_string()),
    }
}

/// 结束当前会话。查看器实例随会话销毁；仍在进行中的内容加载
/// 是否中止由 webview 自身的生命周期决定，这里不做取消。
#[tauri::command]
pub async fn close_preview(session: SessionState<'_>) -> Result<bool, String> {
    let mut guard = session.lock().await;
    let closed = guard.take().is_some();
    if closed {
        println!("[preview] 会话已关闭");
    }
    Ok(closed)
}

/// 已注册的全部 MIME 类型
#[tauri::command]
pub async fn supported_mime_types(registry: RegistryState<'_>) -> Result<Vec<String>, String> {
    Ok(registry.registered_mime_types())
}
