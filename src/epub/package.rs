//! 内存产物模块
//!
//! 构建阶段产出的全部条目，按插入顺序保存，路径唯一。

use crate::error::{BookError, Result};
use crate::xml::XmlDocument;

/// 条目内容
#[derive(Debug, Clone)]
pub enum PackageContent {
    /// 原样写入的二进制数据
    Binary(Vec<u8>),
    /// 写出时序列化的XML文档
    Document(XmlDocument),
}

/// 压缩包条目
#[derive(Debug, Clone)]
pub struct PackageEntry {
    /// 压缩包内的路径
    pub path: String,
    pub content: PackageContent,
}

/// EPUB内存产物
#[derive(Debug, Clone, Default)]
pub struct EpubPackage {
    entries: Vec<PackageEntry>,
}

impl EpubPackage {
    pub fn new() -> Self {
        Self::default()
    }

    /// 添加条目
    ///
    /// # 返回值
    /// * `Result<()>` - 路径已存在时返回 `BookError::DuplicateEntry`
    pub fn insert(&mut self, path: impl Into<String>, content: PackageContent) -> Result<()> {
        let path = path.into();
        if self.contains(&path) {
            return Err(BookError::DuplicateEntry(path));
        }
        self.entries.push(PackageEntry { path, content });
        Ok(())
    }

    /// 添加二进制条目
    pub fn insert_binary(&mut self, path: impl Into<String>, data: impl Into<Vec<u8>>) -> Result<()> {
        self.insert(path, PackageContent::Binary(data.into()))
    }

    /// 添加XML文档条目
    pub fn insert_document(&mut self, path: impl Into<String>, document: XmlDocument) -> Result<()> {
        self.insert(path, PackageContent::Document(document))
    }

    pub fn contains(&self, path: &str) -> bool {
        self.entries.iter().any(|entry| entry.path == path)
    }

    /// 根据路径获取条目内容
    pub fn get(&self, path: &str) -> Option<&PackageContent> {
        self.entries
            .iter()
            .find(|entry| entry.path == path)
            .map(|entry| &entry.content)
    }

    /// 按插入顺序遍历条目
    pub fn entries(&self) -> impl Iterator<Item = &PackageEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
