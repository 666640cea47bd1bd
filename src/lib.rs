pub mod builder;
pub mod config;
pub mod epub;
pub mod error;
pub mod factory;
pub mod fb2;
pub mod format;
pub mod model;
pub mod source;
pub mod writer;
pub mod xml;

// === 核心API重新导出 ===

/// 构建器与写出器契约
pub use builder::BookBuilder;
pub use writer::BookWriter;

/// 错误处理
pub use error::{BookError, Result};

/// 格式选择与工厂
pub use factory::{AnyBuilder, AnyWriter, BookFactory};
pub use format::BookFormat;

// === 数据结构 ===

/// 书籍数据模型
pub use model::{Book, Chapter, CoverImage, Metadata, Paragraph};

// === 各格式实现 ===

/// EPUB构建器与写出器
pub use epub::{EpubBuilder, EpubPackage, EpubWriter};

/// FB2构建器与写出器
pub use fb2::{Fb2Builder, Fb2Writer};

// === 转换器组件 ===

/// 配置与抓取书籍导入
pub use config::ConvertorConfig;
pub use source::{EncodedImage, ScrapedBook, ScrapedChapter};

// === 库信息 ===

/// BookPress库的版本信息
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// BookPress库的描述
pub const DESCRIPTION: &str = "一个将书籍模型编码为EPUB与FB2电子书的Rust库";

/// 库的主页
pub const HOMEPAGE: &str = "https://github.com/FWW321/bookpress";

// === 便捷函数 ===

/// 快速创建指定格式的构建器
///
/// 这是 `BookFactory::default().create_builder` 的便捷包装函数，不附带诊断上下文。
///
/// # 参数
/// * `format` - 输出格式
/// * `title` - 书名
/// * `language` - 语言代码
///
/// # 示例
///
/// ```rust
/// use bookpress::{BookBuilder, BookFormat, BookWriter};
///
/// let writer = bookpress::create_builder(BookFormat::Epub, "示例", "zh")
///     .add_chapter(1, "第一章", ["第一段", "第二段"])
///     .build()?;
/// let stream = writer.save_as_stream()?;
/// assert!(!stream.get_ref().is_empty());
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn create_builder(
    format: BookFormat,
    title: impl Into<String>,
    language: impl Into<String>,
) -> AnyBuilder {
    BookFactory::default().create_builder(format, title, language)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
        println!("BookPress version: {}", VERSION);
    }

    #[test]
    fn test_description() {
        assert!(!DESCRIPTION.is_empty());
        println!("Description: {}", DESCRIPTION);
    }

    #[test]
    fn test_homepage() {
        assert!(!HOMEPAGE.is_empty());
        println!("Homepage: {}", HOMEPAGE);
    }

    #[test]
    fn test_create_builder() {
        let builder = create_builder(BookFormat::Fb2, "标题", "zh");
        assert_eq!(builder.format(), BookFormat::Fb2);
        assert_eq!(builder.book().metadata.title, "标题");
    }

    #[cfg(feature = "tokio")]
    #[tokio::test]
    async fn test_async_save() {
        let dir = tempfile::tempdir().unwrap();
        let book_writer = create_builder(BookFormat::Fb2, "Async", "en")
            .add_chapter(1, "One", ["a"])
            .build()
            .unwrap();

        let stream = writer::save_as_stream_async(&book_writer).await.unwrap();
        assert_eq!(stream.position(), 0);

        let saved = writer::save_to_file_async(&book_writer, dir.path().join("async"))
            .await
            .unwrap();
        assert_eq!(saved, dir.path().join("async.fb2"));
        assert_eq!(std::fs::read(&saved).unwrap(), stream.into_inner());
    }
}
