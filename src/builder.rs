//! 构建器契约模块
//!
//! 所有格式的构建器共享同一套流式配置接口。构建器按值传递，
//! `build` 消耗构建器本身，因此"已构建"是编译期保证的终止状态。

use std::io::Read;

use chrono::NaiveDate;

use crate::error::{BookError, Result};
use crate::model::{Book, CoverImage};
use crate::writer::BookWriter;

/// 书籍构建器
pub trait BookBuilder: Sized {
    /// 构建完成后得到的写出器类型
    type Writer: BookWriter;

    /// 设置书名，不校验是否为空
    fn with_title(self, title: impl Into<String>) -> Self;

    /// 设置语言代码，不校验是否为空
    fn with_language(self, language: impl Into<String>) -> Self;

    /// 设置作者
    fn with_author(self, author: impl Into<String>) -> Self;

    /// 设置出版社
    fn with_publisher(self, publisher: impl Into<String>) -> Self;

    /// 设置描述/简介
    fn with_description(self, description: impl Into<String>) -> Self;

    /// 设置出版日期
    fn with_publication_date(self, date: NaiveDate) -> Self;

    /// 添加封面图片
    ///
    /// 立即读取数据源的全部内容，之后不再访问该数据源。
    /// 空数据源会得到零字节的封面。
    ///
    /// # 参数
    /// * `source` - 图片数据源
    /// * `file_name` - 图片文件名，不能为空
    /// * `content_type` - 图片MIME类型
    ///
    /// # 返回值
    /// * `Result<Self>` - 数据源读取失败或文件名为空时返回 `BookError::InvalidInput`
    fn with_cover<R: Read>(
        self,
        source: R,
        file_name: impl Into<String>,
        content_type: impl Into<String>,
    ) -> Result<Self>;

    /// 添加章节，序号重复时覆盖原章节
    fn add_chapter<I, S>(self, sequence: i32, title: impl Into<String>, paragraphs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>;

    /// 当前正在配置的书籍
    fn book(&self) -> &Book;

    /// 完成构建，返回绑定了产物的写出器
    fn build(self) -> Result<Self::Writer>;

    /// 以字节数据添加封面
    fn with_cover_bytes(
        self,
        data: Vec<u8>,
        file_name: impl Into<String>,
        content_type: impl Into<String>,
    ) -> Result<Self> {
        self.with_cover(data.as_slice(), file_name, content_type)
    }
}

/// 读取封面数据源并校验参数
pub(crate) fn read_cover<R: Read>(
    source: R,
    file_name: String,
    content_type: String,
) -> Result<CoverImage> {
    if file_name.trim().is_empty() {
        return Err(BookError::InvalidInput("封面文件名不能为空".to_string()));
    }

    CoverImage::from_reader(source, file_name, content_type)
        .map_err(|e| BookError::InvalidInput(format!("无法读取封面数据: {}", e)))
}
