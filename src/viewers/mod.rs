use serde::{Deserialize, Serialize};
use tauri::Url;

pub mod html;
pub mod image;
pub mod registry;
pub mod toolbar;

pub use toolbar::Toolbar;

/// 附着回调：`prepare` 在构建完显示容器后同步调用一次。
///
/// 注意契约语义：回调表示"渲染表面已构建、可以挂载"（attached），
/// 而不是"内容已加载完成"（loaded）。URI 指向的内容由内嵌 webview
/// 在回调返回之后异步加载，加载结果（包括失败）不经过查看器，
/// 由渲染表面通过宿主事件通道自行上报。
pub type AttachedCallback = Box<dyn FnOnce() + Send>;

/// 查看器能力标志，每种查看器类型为常量，与输入文件无关
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewerCapabilities {
    /// 点击时是否跟随移动窗口
    pub move_on_click: bool,
    /// 是否支持全屏展示
    pub can_full_screen: bool,
}

/// 窗口分配尺寸
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Allocation {
    pub width: u32,
    pub height: u32,
}

/// 文件引用：调用方持有的预览目标
///
/// 只要求路径能解析为可获取的 URI，不检查文件是否存在——
/// 内容是否可达由渲染表面在加载时自行发现，这里保持沉默。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileRef {
    /// 原始文件路径
    pub path: String,
    /// 解析出的 file:// URI
    pub uri: String,
}

impl FileRef {
    /// 从绝对路径创建文件引用，相对路径无法构成 URI 时报错
    pub fn new(path: &str) -> Result<Self, ViewerError> {
        let uri = Url::from_file_path(path).map_err(|_| ViewerError::invalid_file_ref(path))?;
        Ok(Self {
            path: path.to_string(),
            uri: uri.to_string(),
        })
    }

    /// 文件名（不含扩展名），用于窗口标题的兜底
    pub fn file_stem(&self) -> Option<String> {
        std::path::Path::new(&self.path)
            .file_stem()
            .and_then(|s| s.to_str())
            .map(|s| s.to_string())
    }
}

/// 宿主窗口句柄：查看器只保存窗口标签，不直接持有窗口对象，
/// 工具栏动作通过标签回指共享预览窗口
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostWindow {
    label: String,
}

impl HostWindow {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }
}

/// 渲染表面内容
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SurfaceContent {
    /// 内嵌网页渲染表面，用于 HTML
    Web {
        /// 交给 webview 异步加载的 URI
        uri: String,
        /// 是否保留表面自带的右键菜单；上下文动作归宿主所有，预览时关闭
        context_menu_enabled: bool,
    },
    /// 图片表面，尺寸在探测失败时为 None
    Image {
        uri: String,
        width: Option<u32>,
        height: Option<u32>,
    },
}

/// 显示容器：`render` 交还给宿主、由宿主挂载进场景的值描述
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayContainer {
    pub surface: SurfaceContent,
    /// 是否接收指针输入
    pub reactive: bool,
}

/// 查看器契约：所有按 MIME 类型插入的预览插件共享的接口
///
/// 生命周期为显式两阶段：构造后处于未就绪状态，`prepare` 成功后进入就绪
/// 状态；`render` 与 `create_toolbar` 只在就绪状态下返回 `Some`。
/// 实例的作用域是单次预览会话，销毁由宿主负责，契约不建模终止迁移。
pub trait Viewer: Send {
    /// 能力标志，对同一查看器类型恒定
    fn capabilities(&self) -> ViewerCapabilities;

    /// 构建显示容器并进入就绪状态
    ///
    /// `on_attached` 在返回前同步调用恰好一次，语义见 [`AttachedCallback`]。
    /// 本操作不读取文件内容、不报告加载错误。
    fn prepare(&mut self, file: FileRef, window: HostWindow, on_attached: AttachedCallback);

    /// 返回 `prepare` 构建的显示容器；未就绪时为 `None`
    fn render(&self) -> Option<DisplayContainer>;

    /// 根据宿主分配的尺寸给出期望尺寸
    fn size_for_allocation(&self, allocation: Allocation) -> Allocation;

    /// 构建工具栏描述；未就绪时为 `None`
    ///
    /// 纯构建器，重复调用返回等价的值，由宿主保证至多挂载一次。
    fn create_toolbar(&self) -> Option<Toolbar>;
}

/// 查看器层错误
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewerError {
    pub code: ViewerErrorCode,
    pub message: String,
    pub details: Option<String>,
}

/// 错误码
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewerErrorCode {
    InvalidFileRef,
    UnsupportedMimeType,
    NoActiveSession,
    IoError,
    Unknown,
}

impl std::fmt::Display for ViewerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)?;
        if let Some(details) = &self.details {
            write!(f, " ({})", details)?;
        }
        Ok(())
    }
}

impl std::error::Error for ViewerError {}

impl ViewerError {
    pub fn new(code: ViewerErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn invalid_file_ref(path: &str) -> Self {
        Self::new(
            ViewerErrorCode::InvalidFileRef,
            format!("无法解析为 URI: {}", path),
        )
    }

    pub fn unsupported_mime_type(mime_type: &str) -> Self {
        Self::new(
            ViewerErrorCode::UnsupportedMimeType,
            format!("没有注册该类型的查看器: {}", mime_type),
        )
    }

    pub fn no_active_session() -> Self {
        Self::new(ViewerErrorCode::NoActiveSession, "没有进行中的预览会话")
    }
}

impl From<std::io::Error> for ViewerError {
    fn from(err: std::io::Error) -> Self {
        ViewerError::new(ViewerErrorCode::IoError, err.to_string())
    }
}

/// 根据扩展名识别 MIME 类型
pub fn mime_type_for_extension(ext: &str) -> Option<&'static str> {
    let ext_lower = ext.to_lowercase();
    let ext_trimmed = ext_lower.strip_prefix('.').unwrap_or(&ext_lower);

    match ext_trimmed {
        "html" | "htm" => Some("text/html"),
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        "bmp" => Some("image/bmp"),
        _ => None,
    }
}

/// 根据文件路径识别 MIME 类型
pub fn mime_type_for_path(path: &str) -> Option<&'static str> {
    let path_lower = path.to_lowercase();
    if let Some(dot_pos) = path_lower.rfind('.') {
        mime_type_for_extension(&path_lower[dot_pos..])
    } else {
        None
    }
}
