//! HTML 标题引擎
//! 负责文件读取、编码检测和 <title> 提取，为宿主窗口提供标题文本。
//! 与查看器契约无关：prepare 不读文件，标题是宿主层的锦上添花，
//! 任何一步失败都静默退回文件名。

use chardetng::EncodingDetector;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fs;
use std::path::Path;

use crate::viewers::ViewerError;

/// 匹配 <title>...</title>
/// 简单实现，对复杂 HTML 可能不准确，但在大多数情况下足够
static TITLE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)<title>(.*?)</title>").unwrap());

/// HTML 标题引擎
pub struct HtmlEngine {
    /// 解码后的文件内容
    content: String,
    /// 检测到的编码
    encoding: String,
    /// 文件路径
    file_path: String,
}

impl HtmlEngine {
    /// 从文件创建引擎实例
    pub fn from_file(path: &str) -> Result<Self, ViewerError> {
        let bytes = fs::read(path).map_err(ViewerError::from)?;

        // 编码检测
        let mut detector = EncodingDetector::new();
        detector.feed(&bytes, true);
        let encoding = detector.guess(None, true);
        let (decoded, _, _) = encoding.decode(&bytes);

        Ok(Self {
            content: decoded.into_owned(),
            encoding: encoding.name().to_string(),
            file_path: path.to_string(),
        })
    }

    /// 检测到的编码名
    pub fn encoding(&self) -> &str {
        &self.encoding
    }

    /// 从内容中提取 <title> 标签文本
    fn title_from_content(&self) -> Option<String> {
        let captures = TITLE_RE.captures(&self.content)?;
        let title = captures.get(1)?.as_str().trim();
        if title.is_empty() {
            None
        } else {
            Some(title.to_string())
        }
    }

    /// 文件名（不含扩展名）作为标题兜底
    fn title_from_file_name(&self) -> Option<String> {
        Path::new(&self.file_path)
            .file_stem()
            .and_then(|s| s.to_str())
            .map(|s| s.to_string())
    }

    /// 获取标题（优先从内容提取，否则使用文件名）
    pub fn title(&self) -> Option<String> {
        self.title_from_content().or_else(|| self.title_from_file_name())
    }
}
