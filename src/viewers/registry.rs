//! MIME 分发注册表
//! 启动时构建一次、随后只读的查看器工厂表。查看器实例的作用域是单次
//! 预览会话，因此注册的是工厂而不是共享实例，每次分发都产出新实例。

use std::collections::HashMap;
use std::sync::Arc;

use crate::viewers::html::HtmlViewer;
use crate::viewers::image::ImageViewer;
use crate::viewers::Viewer;

/// 查看器工厂：按 MIME 类型注册，为每个会话创建独立实例
pub type ViewerFactory = Arc<dyn Fn() -> Box<dyn Viewer> + Send + Sync>;

pub struct ViewerRegistry {
    entries: HashMap<String, ViewerFactory>,
}

impl ViewerRegistry {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// 注册契约：把一组 MIME 类型映射到同一个查看器工厂。
    /// 重复注册同一类型时后注册者覆盖先注册者。
    pub fn register_mime_types(&mut self, mime_types: &[&str], factory: ViewerFactory) {
        for mime_type in mime_types {
            self.entries
                .insert((*mime_type).to_string(), Arc::clone(&factory));
        }
    }

    /// 为一次预览会话创建查看器实例，未注册的类型返回 None
    pub fn create_viewer(&self, mime_type: &str) -> Option<Box<dyn Viewer>> {
        self.entries.get(mime_type).map(|factory| factory())
    }

    pub fn supports(&self, mime_type: &str) -> bool {
        self.entries.contains_key(mime_type)
    }

    /// 已注册的 MIME 类型（按字典序，便于日志与测试）
    pub fn registered_mime_types(&self) -> Vec<String> {
        let mut mime_types: Vec<String> = self.entries.keys().cloned().collect();
        mime_types.sort();
        mime_types
    }

    /// 注册内置查看器
    pub fn with_default_viewers() -> Self {
        let mut registry = Self::new();
        registry.register_mime_types(
            HtmlViewer::MIME_TYPES,
            Arc::new(|| Box::new(HtmlViewer::new()) as Box<dyn Viewer>),
        );
        registry.register_mime_types(
            ImageViewer::MIME_TYPES,
            Arc::new(|| Box::new(ImageViewer::new()) as Box<dyn Viewer>),
        );
        registry
    }
}

impl Default for ViewerRegistry {
    fn default() -> Self {
        Self::new()
    }
}
