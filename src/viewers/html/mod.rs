//! HTML 查看器
//! `text/html` 的预览插件：把文件 URI 描述成一个内嵌网页渲染表面，
//! 实际渲染交给宿主窗口的 webview。本模块不解析 HTML、不做缓存、
//! 不处理加载错误——加载失败时表面显示什么由渲染引擎决定。

pub mod engine;

use crate::viewers::{
    Allocation, AttachedCallback, DisplayContainer, FileRef, HostWindow, SurfaceContent, Toolbar,
    Viewer, ViewerCapabilities,
};

/// 两阶段生命周期的显式状态
enum HtmlViewerState {
    Unprepared,
    Ready {
        container: DisplayContainer,
        file: FileRef,
        window: HostWindow,
    },
}

pub struct HtmlViewer {
    state: HtmlViewerState,
}

impl HtmlViewer {
    /// 本查看器负责的 MIME 类型
    pub const MIME_TYPES: &'static [&'static str] = &["text/html"];

    /// 创建未就绪的查看器实例。无副作用，不会失败。
    pub fn new() -> Self {
        Self {
            state: HtmlViewerState::Unprepared,
        }
    }
}

impl Default for HtmlViewer {
    fn default() -> Self {
        Self::new()
    }
}

impl Viewer for HtmlViewer {
    fn capabilities(&self) -> ViewerCapabilities {
        ViewerCapabilities {
            move_on_click: false,
            can_full_screen: true,
        }
    }

    /// 构建网页渲染表面并进入就绪状态。
    ///
    /// 表面自带的右键菜单被关闭：上下文动作归宿主所有。
    /// `on_attached` 在返回前同步触发，此时内容加载必然尚未完成；
    /// 加载在 webview 中异步进行，结果不回传到本查看器。
    fn prepare(&mut self, file: FileRef, window: HostWindow, on_attached: AttachedCallback) {
        let surface = SurfaceContent::Web {
            uri: file.uri.clone(),
            context_menu_enabled: false,
        };
        let container = DisplayContainer {
            surface,
            reactive: true,
        };

        self.state = HtmlViewerState::Ready {
            container,
            file,
            window,
        };

        on_attached();
    }

    fn render(&self) -> Option<DisplayContainer> {
        match &self.state {
            HtmlViewerState::Ready { container, .. } => Some(container.clone()),
            HtmlViewerState::Unprepared => None,
        }
    }

    /// HTML 预览没有固有的宽高比约束，原样返回宿主分配的尺寸
    fn size_for_allocation(&self, allocation: Allocation) -> Allocation {
        allocation
    }

    fn create_toolbar(&self) -> Option<Toolbar> {
        match &self.state {
            HtmlViewerState::Ready { file, window, .. } => Some(Toolbar::standard(file, window)),
            HtmlViewerState::Unprepared => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::viewers::toolbar::ToolbarItem;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn test_file() -> FileRef {
        FileRef {
            path: "/tmp/page.html".to_string(),
            uri: "file:///tmp/page.html".to_string(),
        }
    }

    fn prepared_viewer() -> HtmlViewer {
        let mut viewer = HtmlViewer::new();
        viewer.prepare(test_file(), HostWindow::new("preview"), Box::new(|| {}));
        viewer
    }

    #[test]
    fn test_capabilities_fixed() {
        let caps = HtmlViewer::new().capabilities();
        assert!(!caps.move_on_click);
        assert!(caps.can_full_screen);

        // 就绪前后能力标志不变
        assert_eq!(prepared_viewer().capabilities(), caps);
    }

    #[test]
    fn test_prepare_fires_attached_exactly_once_synchronously() {
        let calls = Arc::new(AtomicUsize::new(0));
        let calls_in_callback = Arc::clone(&calls);

        let mut viewer = HtmlViewer::new();
        viewer.prepare(
            test_file(),
            HostWindow::new("preview"),
            Box::new(move || {
                calls_in_callback.fetch_add(1, Ordering::SeqCst);
            }),
        );

        // prepare 返回时回调必须已经触发过恰好一次
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_render_requires_prepare() {
        assert!(HtmlViewer::new().render().is_none());
        assert!(prepared_viewer().render().is_some());
    }

    #[test]
    fn test_render_surface_contents() {
        let container = prepared_viewer().render().unwrap();
        assert!(container.reactive);
        match container.surface {
            SurfaceContent::Web {
                uri,
                context_menu_enabled,
            } => {
                assert_eq!(uri, "file:///tmp/page.html");
                assert!(!context_menu_enabled);
            }
            other => panic!("unexpected surface: {:?}", other),
        }
    }

    #[test]
    fn test_size_for_allocation_identity() {
        let viewer = prepared_viewer();
        let alloc = Allocation {
            width: 800,
            height: 600,
        };
        assert_eq!(viewer.size_for_allocation(alloc), alloc);

        // 退化分配同样原样返回
        let zero = Allocation {
            width: 0,
            height: 0,
        };
        assert_eq!(viewer.size_for_allocation(zero), zero);
    }

    #[test]
    fn test_toolbar_shape() {
        assert!(HtmlViewer::new().create_toolbar().is_none());

        let toolbar = prepared_viewer().create_toolbar().unwrap();
        assert_eq!(toolbar.items.len(), 3);
        assert!(matches!(&toolbar.items[0], ToolbarItem::FullScreen { .. }));
        assert!(matches!(&toolbar.items[1], ToolbarItem::Separator));
        assert!(matches!(
            &toolbar.items[2],
            ToolbarItem::OpenWithDefaultApp { .. }
        ));
    }

    #[test]
    fn test_toolbar_repeat_calls_equivalent() {
        let viewer = prepared_viewer();
        assert_eq!(viewer.create_toolbar(), viewer.create_toolbar());
    }
}
