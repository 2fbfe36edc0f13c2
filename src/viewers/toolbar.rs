//! 工具栏描述模块
//! 查看器只产出声明式的工具栏描述，控件的实际渲染与点击分发由宿主窗口负责

use serde::{Deserialize, Serialize};

use crate::viewers::{FileRef, HostWindow};

/// 工具栏项
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ToolbarItem {
    /// 全屏切换按钮，携带目标窗口标签
    FullScreen { window: String },
    /// 分隔条
    Separator,
    /// 用系统默认应用打开当前文件
    OpenWithDefaultApp { path: String },
}

impl ToolbarItem {
    pub fn full_screen(window: &HostWindow) -> Self {
        ToolbarItem::FullScreen {
            window: window.label().to_string(),
        }
    }

    pub fn open_with_default_app(file: &FileRef) -> Self {
        ToolbarItem::OpenWithDefaultApp {
            path: file.path.clone(),
        }
    }
}

/// 工具栏容器
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Toolbar {
    pub items: Vec<ToolbarItem>,
}

impl Toolbar {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// 在指定位置插入一项，越界时追加到末尾
    pub fn insert(&mut self, index: usize, item: ToolbarItem) {
        if index <= self.items.len() {
            self.items.insert(index, item);
        } else {
            self.items.push(item);
        }
    }

    /// 标准三件套：全屏、分隔条、默认应用打开
    pub fn standard(file: &FileRef, window: &HostWindow) -> Self {
        let mut toolbar = Toolbar::new();
        toolbar.insert(0, ToolbarItem::full_screen(window));
        toolbar.insert(1, ToolbarItem::Separator);
        toolbar.insert(2, ToolbarItem::open_with_default_app(file));
        toolbar
    }
}

impl Default for Toolbar {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_file() -> FileRef {
        FileRef {
            path: "/tmp/page.html".to_string(),
            uri: "file:///tmp/page.html".to_string(),
        }
    }

    #[test]
    fn test_standard_toolbar_order() {
        let toolbar = Toolbar::standard(&test_file(), &HostWindow::new("preview"));
        assert_eq!(toolbar.items.len(), 3);
        assert!(matches!(&toolbar.items[0], ToolbarItem::FullScreen { window } if window == "preview"));
        assert!(matches!(&toolbar.items[1], ToolbarItem::Separator));
        assert!(matches!(&toolbar.items[2], ToolbarItem::OpenWithDefaultApp { path } if path == "/tmp/page.html"));
    }

    #[test]
    fn test_insert_out_of_range_appends() {
        let mut toolbar = Toolbar::new();
        toolbar.insert(5, ToolbarItem::Separator);
        assert_eq!(toolbar.items.len(), 1);
    }
}
