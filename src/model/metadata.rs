//! 元数据模块
//!
//! 提供书籍元数据的结构定义。

use chrono::NaiveDate;
use uuid::Uuid;

/// 默认语言代码
const DEFAULT_LANGUAGE: &str = "en";

/// 书籍元数据
#[derive(Debug, Clone)]
pub struct Metadata {
    /// 唯一标识符，创建时生成且不可重新赋值
    identifier: String,
    /// 书名
    pub title: String,
    /// 语言(ISO 639-1代码)
    pub language: String,
    /// 作者
    pub author: Option<String>,
    /// 出版社
    pub publisher: Option<String>,
    /// 出版日期
    pub publication_date: Option<NaiveDate>,
    /// 描述/简介
    pub description: Option<String>,
}

impl Metadata {
    /// 创建新的元数据实例，同时生成唯一标识符
    pub fn new() -> Self {
        Self {
            identifier: Uuid::new_v4().to_string(),
            title: String::new(),
            language: DEFAULT_LANGUAGE.to_string(),
            author: None,
            publisher: None,
            publication_date: None,
            description: None,
        }
    }

    /// 获取唯一标识符
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// 获取非空的作者名
    pub fn author_if_present(&self) -> Option<&str> {
        self.author.as_deref().filter(|author| !author.is_empty())
    }
}

impl Default for Metadata {
    fn default() -> Self {
        Self::new()
    }
}
