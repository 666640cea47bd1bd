//! EPUB构建器
//!
//! 配置阶段只修改书籍模型；`build` 时一次性生成全部条目。

use std::io::Read;

use chrono::{DateTime, NaiveDate, Utc};
use tracing::{Span, debug, error, info};

use crate::builder::{BookBuilder, read_cover};
use crate::epub::container::Container;
use crate::epub::nav::toc_page;
use crate::epub::opf::{COVER_PAGE_ID, Opf};
use crate::epub::package::EpubPackage;
use crate::epub::style::STYLESHEET;
use crate::epub::writer::EpubWriter;
use crate::epub::xhtml::{chapter_page, cover_page};
use crate::epub::{
    CONTAINER_PATH, COVER_PAGE_FILE, MIMETYPE, MIMETYPE_PATH, OPF_PATH, STYLE_FILE, TOC_FILE,
    chapter_href, content_path,
};
use crate::error::{BookError, Result};
use crate::model::{Book, Chapter};

/// EPUB构建器
#[derive(Debug, Clone)]
pub struct EpubBuilder {
    book: Book,
    span: Span,
}

impl EpubBuilder {
    /// 创建空构建器，书名为空，语言为 "en"
    pub fn new() -> Self {
        Self::with_span(Span::none())
    }

    /// 创建使用指定诊断上下文的构建器
    pub fn with_span(span: Span) -> Self {
        Self {
            book: Book::new(),
            span,
        }
    }

    /// 创建并设置书名与语言
    pub fn create(title: impl Into<String>, language: impl Into<String>) -> Self {
        Self::new().with_title(title).with_language(language)
    }

    /// 生成全部条目
    ///
    /// 封面与导航文档的路径取自清单，与 `content.opf` 保持一致。
    fn assemble(&self, modified: &DateTime<Utc>) -> Result<EpubPackage> {
        let book = &self.book;
        let language = book.metadata.language.as_str();
        let opf = Opf::from_book(book, modified);
        let mut package = EpubPackage::new();

        debug!(parent: &self.span, "写入mimetype与样式表");
        package.insert_binary(MIMETYPE_PATH, MIMETYPE)?;
        package.insert_binary(content_path(STYLE_FILE), STYLESHEET)?;

        if let Some(cover) = &book.cover {
            if cover.file_name.trim().is_empty() {
                return Err(BookError::InvalidInput("封面文件名不能为空".to_string()));
            }
            let image_path = opf.get_cover_image_path().unwrap_or(&cover.file_name);
            let page_path = opf
                .get_manifest_item(COVER_PAGE_ID)
                .map_or(COVER_PAGE_FILE, |item| item.href.as_str());
            debug!(parent: &self.span, file_name = %image_path, size = cover.len(), "写入封面");
            package.insert_binary(content_path(image_path), cover.data())?;
            package.insert_document(content_path(page_path), cover_page(cover, language))?;
        }

        let container = Container::new(OPF_PATH);
        let opf_path = container.get_opf_path().unwrap_or(OPF_PATH).to_string();
        package.insert_document(CONTAINER_PATH, container.to_document())?;

        debug!(parent: &self.span, chapters = book.chapter_count(), "生成包文档与目录");
        package.insert_document(opf_path, opf.to_document())?;
        let nav_path = opf.get_nav_path().unwrap_or(TOC_FILE);
        package.insert_document(content_path(nav_path), toc_page(book))?;

        for (sequence, chapter) in book.chapters() {
            package.insert_document(
                content_path(&chapter_href(sequence)),
                chapter_page(chapter, language),
            )?;
        }

        Ok(package)
    }
}

impl Default for EpubBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl BookBuilder for EpubBuilder {
    type Writer = EpubWriter;

    fn with_title(mut self, title: impl Into<String>) -> Self {
        let title = title.into();
        debug!(parent: &self.span, title = %title, "设置书名");
        self.book.metadata.title = title;
        self
    }

    fn with_language(mut self, language: impl Into<String>) -> Self {
        let language = language.into();
        debug!(parent: &self.span, language = %language, "设置语言");
        self.book.metadata.language = language;
        self
    }

    fn with_author(mut self, author: impl Into<String>) -> Self {
        let author = author.into();
        debug!(parent: &self.span, author = %author, "设置作者");
        self.book.metadata.author = Some(author);
        self
    }

    fn with_publisher(mut self, publisher: impl Into<String>) -> Self {
        let publisher = publisher.into();
        debug!(parent: &self.span, publisher = %publisher, "设置出版社");
        self.book.metadata.publisher = Some(publisher);
        self
    }

    fn with_description(mut self, description: impl Into<String>) -> Self {
        let description = description.into();
        debug!(parent: &self.span, length = description.chars().count(), "设置简介");
        self.book.metadata.description = Some(description);
        self
    }

    fn with_publication_date(mut self, date: NaiveDate) -> Self {
        debug!(parent: &self.span, %date, "设置出版日期");
        self.book.metadata.publication_date = Some(date);
        self
    }

    fn with_cover<R: Read>(
        mut self,
        source: R,
        file_name: impl Into<String>,
        content_type: impl Into<String>,
    ) -> Result<Self> {
        let cover = read_cover(source, file_name.into(), content_type.into())?;
        info!(parent: &self.span, file_name = %cover.file_name, size = cover.len(), "添加封面");
        self.book.cover = Some(cover);
        Ok(self)
    }

    fn add_chapter<I, S>(mut self, sequence: i32, title: impl Into<String>, paragraphs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let chapter = Chapter::with_paragraphs(title, paragraphs);
        info!(parent: &self.span, sequence, title = %chapter.title, paragraphs = chapter.paragraphs.len(), "添加章节");
        if self.book.add_chapter(sequence, chapter).is_some() {
            debug!(parent: &self.span, sequence, "章节序号重复，覆盖原章节");
        }
        self
    }

    fn book(&self) -> &Book {
        &self.book
    }

    fn build(self) -> Result<EpubWriter> {
        let title = self.book.metadata.title.clone();
        info!(parent: &self.span, title = %title, "开始构建EPUB");

        let modified = Utc::now();
        match self.assemble(&modified) {
            Ok(package) => {
                info!(parent: &self.span, title = %title, entries = package.len(), "EPUB构建完成");
                Ok(EpubWriter::new(package, title, modified, self.span))
            }
            Err(e) => {
                error!(parent: &self.span, title = %title, error = %e, "EPUB构建失败");
                Err(BookError::build(&title, e.to_string()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Read};
    use zip::{CompressionMethod, ZipArchive};

    use crate::writer::BookWriter;

    fn read_archive(writer: &EpubWriter) -> ZipArchive<Cursor<Vec<u8>>> {
        let bytes = writer.save_as_stream().unwrap().into_inner();
        ZipArchive::new(Cursor::new(bytes)).unwrap()
    }

    fn read_entry(archive: &mut ZipArchive<Cursor<Vec<u8>>>, name: &str) -> String {
        let mut content = String::new();
        archive
            .by_name(name)
            .unwrap()
            .read_to_string(&mut content)
            .unwrap();
        content
    }

    #[test]
    fn test_minimal_book() {
        let writer = EpubBuilder::create("Test Book", "en")
            .add_chapter(1, "Chapter 1", ["P1", "P2"])
            .build()
            .unwrap();

        let mut archive = read_archive(&writer);
        let first = archive.by_index(0).unwrap();
        assert_eq!(first.name(), "mimetype");
        assert_eq!(first.compression(), CompressionMethod::Stored);
        drop(first);

        let chapter = read_entry(&mut archive, "OEBPS/chapter_1.xhtml");
        assert!(chapter.contains("<h1 class=\"chapter-title\">Chapter 1</h1><p>P1</p><p>P2</p>"));

        let opf = read_entry(&mut archive, "OEBPS/content.opf");
        assert!(opf.contains("<dc:title>Test Book</dc:title><dc:language>en</dc:language>"));

        let container = read_entry(&mut archive, "META-INF/container.xml");
        assert!(container.contains("full-path=\"OEBPS/content.opf\""));

        assert!(archive.by_name("OEBPS/toc.xhtml").is_ok());
        assert!(archive.by_name("OEBPS/style.css").is_ok());
    }

    #[test]
    fn test_cover_is_packaged() {
        let writer = EpubBuilder::create("Cover Book", "en")
            .with_cover(&[0xFFu8, 0xD8, 0xFF][..], "cover.jpg", "image/jpeg")
            .unwrap()
            .add_chapter(1, "One", ["x"])
            .build()
            .unwrap();

        let mut archive = read_archive(&writer);
        let mut image = Vec::new();
        archive
            .by_name("OEBPS/cover.jpg")
            .unwrap()
            .read_to_end(&mut image)
            .unwrap();
        assert_eq!(image, vec![0xFF, 0xD8, 0xFF]);

        let opf = read_entry(&mut archive, "OEBPS/content.opf");
        assert!(opf.contains(
            "<item id=\"cover-image\" href=\"cover.jpg\" media-type=\"image/jpeg\" properties=\"cover-image\"/>"
        ));
        assert!(opf.contains("<spine><itemref idref=\"cover-page\"/><itemref idref=\"toc\"/>"));

        let cover_page = read_entry(&mut archive, "OEBPS/cover.xhtml");
        assert!(cover_page.contains("src=\"cover.jpg\""));
    }

    #[test]
    fn test_no_cover_entries_without_cover() {
        let writer = EpubBuilder::create("Plain", "en").build().unwrap();

        assert!(!writer.package().contains("OEBPS/cover.xhtml"));
        let opf = read_entry(&mut read_archive(&writer), "OEBPS/content.opf");
        assert!(!opf.contains("cover-image"));
        assert!(!opf.contains("cover-page"));
    }

    #[test]
    fn test_chapters_in_ascending_order() {
        let writer = EpubBuilder::create("Order", "en")
            .add_chapter(10, "Ten", ["x"])
            .add_chapter(2, "Two", ["y"])
            .add_chapter(2, "Two again", ["z"])
            .build()
            .unwrap();

        let opf = read_entry(&mut read_archive(&writer), "OEBPS/content.opf");
        let second = opf.find("idref=\"chapter_2\"").unwrap();
        let tenth = opf.find("idref=\"chapter_10\"").unwrap();
        assert!(second < tenth);

        let chapter = read_entry(&mut read_archive(&writer), "OEBPS/chapter_2.xhtml");
        assert!(chapter.contains("Two again"));
        assert!(!chapter.contains("<p>y</p>"));
    }

    #[test]
    fn test_author_and_optional_metadata() {
        let date = NaiveDate::from_ymd_opt(2023, 9, 1).unwrap();
        let writer = EpubBuilder::create("Meta", "uk")
            .with_author("Jane Doe")
            .with_publisher("Acme")
            .with_publication_date(date)
            .build()
            .unwrap();

        let opf = read_entry(&mut read_archive(&writer), "OEBPS/content.opf");
        assert!(opf.contains("<dc:creator opf:role=\"aut\">Jane Doe</dc:creator>"));
        assert!(opf.contains("<dc:publisher>Acme</dc:publisher>"));
        assert!(opf.contains("<dc:date>2023-09-01</dc:date>"));
        assert!(opf.contains("<dc:language>uk</dc:language>"));
    }

    #[test]
    fn test_colliding_cover_name_fails_build() {
        let result = EpubBuilder::create("Clash", "en")
            .with_cover(&[1u8][..], "style.css", "image/png")
            .unwrap()
            .build();

        match result {
            Err(BookError::Build { title, reason }) => {
                assert_eq!(title, "Clash");
                assert!(reason.contains("OEBPS/style.css"));
            }
            other => panic!("期望Build错误, 得到: {:?}", other.map(|w| w.package().len())),
        }
    }

    #[test]
    fn test_entry_paths_follow_manifest() {
        let writer = EpubBuilder::create("Paths", "en")
            .with_cover(&[1u8, 2][..], "art/front.png", "image/png")
            .unwrap()
            .add_chapter(1, "One", ["x"])
            .build()
            .unwrap();

        let paths: Vec<&str> = writer.package().entries().map(|e| e.path.as_str()).collect();
        assert_eq!(
            paths,
            vec![
                "mimetype",
                "OEBPS/style.css",
                "OEBPS/art/front.png",
                "OEBPS/cover.xhtml",
                "META-INF/container.xml",
                "OEBPS/content.opf",
                "OEBPS/toc.xhtml",
                "OEBPS/chapter_1.xhtml",
            ]
        );
    }

    #[test]
    fn test_build_is_stable_across_saves() {
        let writer = EpubBuilder::create("Stable", "en")
            .add_chapter(1, "One", ["x"])
            .build()
            .unwrap();

        let first = writer.save_as_stream().unwrap().into_inner();
        let second = writer.save_as_stream().unwrap().into_inner();
        assert_eq!(first, second);
    }

    #[test]
    fn test_builder_reads_cover_once() {
        let mut source = Cursor::new(vec![7u8, 8, 9]);
        let builder = EpubBuilder::new().with_cover(&mut source, "c.png", "image/png").unwrap();

        source.get_mut().fill(0);
        assert_eq!(builder.book().cover.as_ref().unwrap().data(), &[7, 8, 9]);
    }
}
