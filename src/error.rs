use std::io;
use thiserror::Error;

use crate::format::BookFormat;

pub type Result<T> = std::result::Result<T, BookError>;

/// 书籍构建与写出相关的错误类型
#[derive(Error, Debug)]
pub enum BookError {
    #[error("IO错误: {0}")]
    Io(#[from] io::Error),

    #[error("Zip文件错误: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("XML错误: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("输入参数无效: {0}")]
    InvalidInput(String),

    #[error("不支持的书籍格式: {0}")]
    UnsupportedFormat(String),

    #[error("压缩包条目重复: {0}")]
    DuplicateEntry(String),

    #[error("缺少必需的条目: {0}")]
    MissingEntry(String),

    #[error("书籍《{title}》构建失败: {reason}")]
    Build { title: String, reason: String },

    #[error("{format}写入失败 (目标: {target}): {source}")]
    Write {
        format: BookFormat,
        target: String,
        #[source]
        source: Box<BookError>,
    },

    #[error("配置文件错误: {0}")]
    Config(String),

    #[error("源数据错误: {0}")]
    Source(String),

    #[error("后台任务失败: {0}")]
    TaskJoin(String),
}

impl BookError {
    /// 构造构建错误
    pub(crate) fn build(title: &str, reason: impl Into<String>) -> Self {
        BookError::Build {
            title: title.to_string(),
            reason: reason.into(),
        }
    }

    /// 将底层错误包装为写出错误
    pub(crate) fn write(format: BookFormat, target: impl Into<String>, source: BookError) -> Self {
        BookError::Write {
            format,
            target: target.into(),
            source: Box::new(source),
        }
    }
}
