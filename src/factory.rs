//! 构建器工厂模块
//!
//! 按格式创建构建器。格式集合是封闭的，因此用枚举而不是特征对象承载两种实现。

use std::io::{Read, Seek, Write};

use chrono::NaiveDate;
use tracing::{Span, info, info_span};

use crate::builder::BookBuilder;
use crate::epub::{EpubBuilder, EpubWriter};
use crate::error::Result;
use crate::fb2::{Fb2Builder, Fb2Writer};
use crate::format::BookFormat;
use crate::model::Book;
use crate::writer::BookWriter;

/// 书籍构建器工厂
///
/// 持有显式的诊断上下文，由它创建的构建器在其下打开子span。
#[derive(Debug, Clone)]
pub struct BookFactory {
    span: Span,
}

impl Default for BookFactory {
    fn default() -> Self {
        Self { span: Span::none() }
    }
}

impl BookFactory {
    pub fn new() -> Self {
        Self::default()
    }

    /// 使用指定的诊断上下文
    pub fn with_span(span: Span) -> Self {
        Self { span }
    }

    /// 创建指定格式的构建器，并设置书名与语言
    ///
    /// # 参数
    /// * `format` - 输出格式
    /// * `title` - 书名
    /// * `language` - 语言代码
    pub fn create_builder(
        &self,
        format: BookFormat,
        title: impl Into<String>,
        language: impl Into<String>,
    ) -> AnyBuilder {
        let span = info_span!(parent: &self.span, "book_builder", format = %format);
        info!(parent: &span, %format, "创建构建器");

        let builder = match format {
            BookFormat::Epub => AnyBuilder::Epub(EpubBuilder::with_span(span)),
            BookFormat::Fb2 => AnyBuilder::Fb2(Fb2Builder::with_span(span)),
        };
        builder.with_title(title).with_language(language)
    }

    /// 按格式名称创建构建器
    ///
    /// # 返回值
    /// * `Result<AnyBuilder>` - 名称不是 `epub`/`fb2` 时返回 `BookError::UnsupportedFormat`
    pub fn create_builder_by_name(
        &self,
        format: &str,
        title: impl Into<String>,
        language: impl Into<String>,
    ) -> Result<AnyBuilder> {
        let format: BookFormat = format.parse()?;
        Ok(self.create_builder(format, title, language))
    }
}

/// 任意格式的构建器
#[derive(Debug, Clone)]
pub enum AnyBuilder {
    Epub(EpubBuilder),
    Fb2(Fb2Builder),
}

impl AnyBuilder {
    pub fn format(&self) -> BookFormat {
        match self {
            AnyBuilder::Epub(_) => BookFormat::Epub,
            AnyBuilder::Fb2(_) => BookFormat::Fb2,
        }
    }
}

impl BookBuilder for AnyBuilder {
    type Writer = AnyWriter;

    fn with_title(self, title: impl Into<String>) -> Self {
        match self {
            AnyBuilder::Epub(b) => AnyBuilder::Epub(b.with_title(title)),
            AnyBuilder::Fb2(b) => AnyBuilder::Fb2(b.with_title(title)),
        }
    }

    fn with_language(self, language: impl Into<String>) -> Self {
        match self {
            AnyBuilder::Epub(b) => AnyBuilder::Epub(b.with_language(language)),
            AnyBuilder::Fb2(b) => AnyBuilder::Fb2(b.with_language(language)),
        }
    }

    fn with_author(self, author: impl Into<String>) -> Self {
        match self {
            AnyBuilder::Epub(b) => AnyBuilder::Epub(b.with_author(author)),
            AnyBuilder::Fb2(b) => AnyBuilder::Fb2(b.with_author(author)),
        }
    }

    fn with_publisher(self, publisher: impl Into<String>) -> Self {
        match self {
            AnyBuilder::Epub(b) => AnyBuilder::Epub(b.with_publisher(publisher)),
            AnyBuilder::Fb2(b) => AnyBuilder::Fb2(b.with_publisher(publisher)),
        }
    }

    fn with_description(self, description: impl Into<String>) -> Self {
        match self {
            AnyBuilder::Epub(b) => AnyBuilder::Epub(b.with_description(description)),
            AnyBuilder::Fb2(b) => AnyBuilder::Fb2(b.with_description(description)),
        }
    }

    fn with_publication_date(self, date: NaiveDate) -> Self {
        match self {
            AnyBuilder::Epub(b) => AnyBuilder::Epub(b.with_publication_date(date)),
            AnyBuilder::Fb2(b) => AnyBuilder::Fb2(b.with_publication_date(date)),
        }
    }

    fn with_cover<R: Read>(
        self,
        source: R,
        file_name: impl Into<String>,
        content_type: impl Into<String>,
    ) -> Result<Self> {
        Ok(match self {
            AnyBuilder::Epub(b) => AnyBuilder::Epub(b.with_cover(source, file_name, content_type)?),
            AnyBuilder::Fb2(b) => AnyBuilder::Fb2(b.with_cover(source, file_name, content_type)?),
        })
    }

    fn add_chapter<I, S>(self, sequence: i32, title: impl Into<String>, paragraphs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        match self {
            AnyBuilder::Epub(b) => AnyBuilder::Epub(b.add_chapter(sequence, title, paragraphs)),
            AnyBuilder::Fb2(b) => AnyBuilder::Fb2(b.add_chapter(sequence, title, paragraphs)),
        }
    }

    fn book(&self) -> &Book {
        match self {
            AnyBuilder::Epub(b) => b.book(),
            AnyBuilder::Fb2(b) => b.book(),
        }
    }

    fn build(self) -> Result<AnyWriter> {
        Ok(match self {
            AnyBuilder::Epub(b) => AnyWriter::Epub(b.build()?),
            AnyBuilder::Fb2(b) => AnyWriter::Fb2(b.build()?),
        })
    }
}

/// 任意格式的写出器
#[derive(Debug, Clone)]
pub enum AnyWriter {
    Epub(EpubWriter),
    Fb2(Fb2Writer),
}

impl BookWriter for AnyWriter {
    fn format(&self) -> BookFormat {
        match self {
            AnyWriter::Epub(w) => w.format(),
            AnyWriter::Fb2(w) => w.format(),
        }
    }

    fn book_title(&self) -> &str {
        match self {
            AnyWriter::Epub(w) => w.book_title(),
            AnyWriter::Fb2(w) => w.book_title(),
        }
    }

    fn span(&self) -> &Span {
        match self {
            AnyWriter::Epub(w) => w.span(),
            AnyWriter::Fb2(w) => w.span(),
        }
    }

    fn write_to<W: Write + Seek>(&self, output: &mut W) -> Result<()> {
        match self {
            AnyWriter::Epub(w) => w.write_to(output),
            AnyWriter::Fb2(w) => w.write_to(output),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BookError;
    use std::io::Cursor;
    use zip::ZipArchive;

    #[test]
    fn test_create_builder_per_format() {
        let factory = BookFactory::new();

        let epub = factory.create_builder(BookFormat::Epub, "书", "zh");
        assert_eq!(epub.format(), BookFormat::Epub);
        assert_eq!(epub.book().metadata.title, "书");
        assert_eq!(epub.book().metadata.language, "zh");

        let fb2 = factory.create_builder(BookFormat::Fb2, "书", "zh");
        assert_eq!(fb2.format(), BookFormat::Fb2);
    }

    #[test]
    fn test_create_builder_by_name() {
        let factory = BookFactory::new();
        assert_eq!(
            factory.create_builder_by_name("FB2", "t", "en").unwrap().format(),
            BookFormat::Fb2
        );

        let result = factory.create_builder_by_name("mobi", "t", "en");
        assert!(matches!(result, Err(BookError::UnsupportedFormat(_))));
    }

    #[test]
    fn test_same_book_both_formats() {
        let factory = BookFactory::new();

        for format in [BookFormat::Epub, BookFormat::Fb2] {
            let writer = factory
                .create_builder(format, "Test Book", "en")
                .with_author("Jane Doe")
                .add_chapter(2, "Second", ["b"])
                .add_chapter(1, "First", ["a"])
                .build()
                .unwrap();

            assert_eq!(writer.format(), format);
            assert_eq!(writer.book_title(), "Test Book");

            let bytes = writer.save_as_stream().unwrap().into_inner();
            match format {
                BookFormat::Epub => {
                    let archive = ZipArchive::new(Cursor::new(bytes)).unwrap();
                    assert!(archive.file_names().any(|name| name == "OEBPS/chapter_2.xhtml"));
                }
                BookFormat::Fb2 => {
                    let xml = String::from_utf8(bytes).unwrap();
                    let first = xml.find("<p>First</p>").unwrap();
                    let second = xml.find("<p>Second</p>").unwrap();
                    assert!(first < second);
                }
            }
        }
    }

    #[test]
    fn test_any_writer_saves_with_extension() {
        let dir = tempfile::tempdir().unwrap();
        let writer = BookFactory::new()
            .create_builder(BookFormat::Epub, "Saved", "en")
            .build()
            .unwrap();

        let saved = writer.save_to_file(dir.path().join("book.fb2")).unwrap();
        assert_eq!(saved, dir.path().join("book.epub"));
        assert!(saved.is_file());
    }
}
