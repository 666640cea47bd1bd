//! 书籍聚合模块

use std::collections::BTreeMap;

use crate::model::{Chapter, CoverImage, Metadata};

/// 书籍，独占元数据、章节与封面
#[derive(Debug, Clone, Default)]
pub struct Book {
    /// 元数据
    pub metadata: Metadata,
    /// 章节，按序号升序排列
    chapters: BTreeMap<i32, Chapter>,
    /// 封面
    pub cover: Option<CoverImage>,
}

impl Book {
    pub fn new() -> Self {
        Self::default()
    }

    /// 添加章节
    ///
    /// 序号已存在时覆盖原章节（后写入者生效），并返回被替换的章节。
    pub fn add_chapter(&mut self, sequence: i32, chapter: Chapter) -> Option<Chapter> {
        self.chapters.insert(sequence, chapter)
    }

    /// 按序号升序遍历章节
    pub fn chapters(&self) -> impl Iterator<Item = (i32, &Chapter)> {
        self.chapters.iter().map(|(sequence, chapter)| (*sequence, chapter))
    }

    /// 根据序号获取章节
    pub fn chapter(&self, sequence: i32) -> Option<&Chapter> {
        self.chapters.get(&sequence)
    }

    /// 章节数量
    pub fn chapter_count(&self) -> usize {
        self.chapters.len()
    }

    pub fn has_cover(&self) -> bool {
        self.cover.is_some()
    }
}
