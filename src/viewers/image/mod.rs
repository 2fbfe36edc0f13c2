//! 图片查看器
//! 与 HTML 查看器同形的兄弟插件：prepare 只从文件头探测像素尺寸，
//! 不解码像素数据；尺寸用于在 size_for_allocation 中保持宽高比。
//! 探测失败保持沉默，表现为没有固有尺寸约束。

use crate::viewers::{
    Allocation, AttachedCallback, DisplayContainer, FileRef, HostWindow, SurfaceContent, Toolbar,
    Viewer, ViewerCapabilities,
};

enum ImageViewerState {
    Unprepared,
    Ready {
        container: DisplayContainer,
        file: FileRef,
        window: HostWindow,
        dimensions: Option<(u32, u32)>,
    },
}

pub struct ImageViewer {
    state: ImageViewerState,
}

impl ImageViewer {
    /// 本查看器负责的 MIME 类型
    pub const MIME_TYPES: &'static [&'static str] = &[
        "image/png",
        "image/jpeg",
        "image/gif",
        "image/webp",
        "image/bmp",
    ];

    pub fn new() -> Self {
        Self {
            state: ImageViewerState::Unprepared,
        }
    }

    /// 在分配范围内等比缩放，不放大超过原始尺寸
    fn fit_within(width: u32, height: u32, allocation: Allocation) -> Allocation {
        let scale_w = allocation.width as f64 / width as f64;
        let scale_h = allocation.height as f64 / height as f64;
        let scale = scale_w.min(scale_h).min(1.0);

        Allocation {
            width: (width as f64 * scale).round() as u32,
            height: (height as f64 * scale).round() as u32,
        }
    }
}

impl Default for ImageViewer {
    fn default() -> Self {
        Self::new()
    }
}

impl Viewer for ImageViewer {
    fn capabilities(&self) -> ViewerCapabilities {
        ViewerCapabilities {
            move_on_click: true,
            can_full_screen: true,
        }
    }

    fn prepare(&mut self, file: FileRef, window: HostWindow, on_attached: AttachedCallback) {
        // 只读文件头，拿不到尺寸时静默退回 None
        let dimensions = image::image_dimensions(&file.path).ok();

        let surface = SurfaceContent::Image {
            uri: file.uri.clone(),
            width: dimensions.map(|(w, _)| w),
            height: dimensions.map(|(_, h)| h),
        };
        let container = DisplayContainer {
            surface,
            reactive: true,
        };

        self.state = ImageViewerState::Ready {
            container,
            file,
            window,
            dimensions,
        };

        on_attached();
    }

    fn render(&self) -> Option<DisplayContainer> {
        match &self.state {
            ImageViewerState::Ready { container, .. } => Some(container.clone()),
            ImageViewerState::Unprepared => None,
        }
    }

    /// 已知图片尺寸时按宽高比适配分配，否则原样返回
    fn size_for_allocation(&self, allocation: Allocation) -> Allocation {
        match &self.state {
            ImageViewerState::Ready {
                dimensions: Some((width, height)),
                ..
            } if *width > 0 && *height > 0 && allocation.width > 0 && allocation.height > 0 => {
                Self::fit_within(*width, *height, allocation)
            }
            _ => allocation,
        }
    }

    fn create_toolbar(&self) -> Option<Toolbar> {
        match &self.state {
            ImageViewerState::Ready { file, window, .. } => Some(Toolbar::standard(file, window)),
            ImageViewerState::Unprepared => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_file() -> FileRef {
        FileRef {
            path: "/tmp/photo.png".to_string(),
            uri: "file:///tmp/photo.png".to_string(),
        }
    }

    fn viewer_with_dimensions(width: u32, height: u32) -> ImageViewer {
        let mut viewer = ImageViewer::new();
        viewer.prepare(test_file(), HostWindow::new("preview"), Box::new(|| {}));
        // 探测对不存在的文件会静默失败，测试里手动注入尺寸
        if let ImageViewerState::Ready { dimensions, .. } = &mut viewer.state {
            *dimensions = Some((width, height));
        }
        viewer
    }

    #[test]
    fn test_capabilities_fixed() {
        let caps = ImageViewer::new().capabilities();
        assert!(caps.move_on_click);
        assert!(caps.can_full_screen);
    }

    #[test]
    fn test_render_requires_prepare() {
        assert!(ImageViewer::new().render().is_none());

        let mut viewer = ImageViewer::new();
        viewer.prepare(test_file(), HostWindow::new("preview"), Box::new(|| {}));
        assert!(viewer.render().is_some());
    }

    #[test]
    fn test_size_preserves_aspect_ratio() {
        let viewer = viewer_with_dimensions(200, 100);
        let result = viewer.size_for_allocation(Allocation {
            width: 100,
            height: 100,
        });
        assert_eq!(
            result,
            Allocation {
                width: 100,
                height: 50
            }
        );
    }

    #[test]
    fn test_size_never_upscales() {
        let viewer = viewer_with_dimensions(10, 10);
        let result = viewer.size_for_allocation(Allocation {
            width: 100,
            height: 100,
        });
        assert_eq!(
            result,
            Allocation {
                width: 10,
                height: 10
            }
        );
    }

    #[test]
    fn test_size_identity_without_dimensions() {
        let mut viewer = ImageViewer::new();
        viewer.prepare(test_file(), HostWindow::new("preview"), Box::new(|| {}));

        let alloc = Allocation {
            width: 640,
            height: 480,
        };
        assert_eq!(viewer.size_for_allocation(alloc), alloc);
    }

    #[test]
    fn test_size_identity_for_zero_allocation() {
        let viewer = viewer_with_dimensions(200, 100);
        let zero = Allocation {
            width: 0,
            height: 0,
        };
        assert_eq!(viewer.size_for_allocation(zero), zero);
    }

    #[test]
    fn test_toolbar_shape_matches_html_viewer() {
        let mut viewer = ImageViewer::new();
        assert!(viewer.create_toolbar().is_none());

        viewer.prepare(test_file(), HostWindow::new("preview"), Box::new(|| {}));
        assert_eq!(viewer.create_toolbar().unwrap().items.len(), 3);
    }
}
