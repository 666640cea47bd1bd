//! 抓取书籍导入模块
//!
//! 读取抓取程序保存的JSON书籍，并用它驱动任意格式的构建器。

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::builder::BookBuilder;
use crate::error::{BookError, Result};

/// base64编码的图片
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct EncodedImage {
    /// 文件名，例如 "cover.jpg"
    pub file_name: String,
    /// MIME类型，例如 "image/jpeg"
    pub content_type: String,
    /// base64数据，允许带 `data:<type>;base64,` 前缀
    pub base64_data: String,
}

impl EncodedImage {
    /// 解码图片数据
    pub fn decode(&self) -> Result<Vec<u8>> {
        let data = match self.base64_data.split_once(";base64,") {
            Some((prefix, data)) if prefix.starts_with("data:") => data,
            _ => self.base64_data.as_str(),
        };

        let compact: String = data.chars().filter(|c| !c.is_whitespace()).collect();
        STANDARD
            .decode(compact)
            .map_err(|e| BookError::Source(format!("封面 {} 的base64数据无效: {}", self.file_name, e)))
    }
}

/// 抓取的章节
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ScrapedChapter {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub paragraphs: Vec<String>,
}

/// 抓取的书籍
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ScrapedBook {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub cover_page: Option<EncodedImage>,
    /// 以序号为键的章节
    #[serde(default)]
    pub chapters: BTreeMap<i32, ScrapedChapter>,
}

impl ScrapedBook {
    /// 从JSON字符串解析
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| BookError::Source(format!("JSON格式错误: {}", e)))
    }

    /// 从JSON文件读取
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            BookError::Source(format!("无法读取源文件 {}: {}", path.display(), e))
        })?;
        Self::from_json_str(&content)
    }

    /// 将描述、封面与章节写入构建器
    ///
    /// 书名与语言由调用方在创建构建器时设置。
    ///
    /// # 参数
    /// * `builder` - 任意格式的构建器
    ///
    /// # 返回值
    /// * `Result<B>` - 封面数据无法解码时返回 `BookError::Source`
    pub fn apply_to<B: BookBuilder>(&self, builder: B) -> Result<B> {
        let mut builder = builder;

        if let Some(description) = self.description.as_deref().filter(|d| !d.trim().is_empty()) {
            builder = builder.with_description(description);
        }

        match &self.cover_page {
            Some(cover) => {
                let data = cover.decode()?;
                debug!(file_name = %cover.file_name, size = data.len(), "解码封面");
                builder = builder.with_cover_bytes(data, &cover.file_name, &cover.content_type)?;
            }
            None => warn!(title = %self.title, "书籍数据中没有封面"),
        }

        for (sequence, chapter) in &self.chapters {
            builder = builder.add_chapter(*sequence, &chapter.title, &chapter.paragraphs);
        }

        Ok(builder)
    }
}
