//! FB2构建器
//!
//! 每次配置调用都立即向构建器持有的XML树追加节点，节点顺序即调用顺序，
//! 重复调用会产生重复节点。章节节点按序号单独保存，同一序号后写入者生效，
//! `build` 时按升序放入 `<body>` 并将整棵树冻结为只读文档。

use std::collections::BTreeMap;
use std::io::Read;

use chrono::NaiveDate;
use tracing::{Span, debug, error, info, warn};

use crate::builder::{BookBuilder, read_cover};
use crate::error::{BookError, Result};
use crate::fb2::document::{
    BODY_PATH, DESCRIPTION_PATH, TITLE_INFO_PATH, annotation_element, author_element,
    binary_element, book_title_element, coverpage_element, date_element, lang_element,
    publish_info_element, section_element, seed_document,
};
use crate::fb2::writer::Fb2Writer;
use crate::model::{Book, Chapter};
use crate::xml::{XmlDocument, XmlElement};

/// FB2构建器
#[derive(Debug, Clone)]
pub struct Fb2Builder {
    book: Book,
    root: XmlElement,
    sections: BTreeMap<i32, XmlElement>,
    /// 追加节点时找不到父节点的记录，在 `build` 时报告
    faults: Vec<String>,
    span: Span,
}

impl Fb2Builder {
    /// 创建空构建器，书名为空，语言为 "en"
    pub fn new() -> Self {
        Self::with_span(Span::none())
    }

    /// 创建使用指定诊断上下文的构建器
    pub fn with_span(span: Span) -> Self {
        Self::from_seed(seed_document(), span)
    }

    /// 创建并设置书名与语言
    pub fn create(title: impl Into<String>, language: impl Into<String>) -> Self {
        Self::new().with_title(title).with_language(language)
    }

    pub(crate) fn from_seed(root: XmlElement, span: Span) -> Self {
        Self {
            book: Book::new(),
            root,
            sections: BTreeMap::new(),
            faults: Vec::new(),
            span,
        }
    }

    /// 当前的XML树（不含尚未放入body的章节）
    pub fn root(&self) -> &XmlElement {
        &self.root
    }

    /// 向指定路径下的节点追加子元素
    fn append_to(&mut self, path: &[&str], element: XmlElement) {
        match self.root.find_path_mut(path) {
            Some(parent) => parent.push(element),
            None => {
                let location = path.join("/");
                warn!(parent: &self.span, location = %location, element = element.name(), "种子文档中缺少父节点");
                self.faults.push(format!("种子文档中缺少节点 {}", location));
            }
        }
    }

    /// 冻结XML树
    fn assemble(mut self) -> std::result::Result<(XmlDocument, Span), (String, Span)> {
        if let Some(fault) = self.faults.first() {
            return Err((fault.clone(), self.span));
        }

        let Some(body) = self.root.find_path_mut(BODY_PATH) else {
            return Err(("种子文档中缺少节点 body".to_string(), self.span));
        };
        for section in self.sections.into_values() {
            body.push(section);
        }

        Ok((XmlDocument::new(self.root), self.span))
    }
}

impl Default for Fb2Builder {
    fn default() -> Self {
        Self::new()
    }
}

impl BookBuilder for Fb2Builder {
    type Writer = Fb2Writer;

    fn with_title(mut self, title: impl Into<String>) -> Self {
        let title = title.into();
        debug!(parent: &self.span, title = %title, "设置书名");
        self.append_to(TITLE_INFO_PATH, book_title_element(&title));
        self.book.metadata.title = title;
        self
    }

    fn with_language(mut self, language: impl Into<String>) -> Self {
        let language = language.into();
        debug!(parent: &self.span, language = %language, "设置语言");
        self.append_to(TITLE_INFO_PATH, lang_element(&language));
        self.book.metadata.language = language;
        self
    }

    fn with_author(mut self, author: impl Into<String>) -> Self {
        let author = author.into();
        debug!(parent: &self.span, author = %author, "设置作者");
        self.append_to(TITLE_INFO_PATH, author_element(&author));
        self.book.metadata.author = Some(author);
        self
    }

    fn with_publisher(mut self, publisher: impl Into<String>) -> Self {
        let publisher = publisher.into();
        debug!(parent: &self.span, publisher = %publisher, "设置出版社");
        self.append_to(DESCRIPTION_PATH, publish_info_element(&publisher));
        self.book.metadata.publisher = Some(publisher);
        self
    }

    fn with_description(mut self, description: impl Into<String>) -> Self {
        let description = description.into();
        debug!(parent: &self.span, length = description.chars().count(), "设置简介");
        self.append_to(TITLE_INFO_PATH, annotation_element(&description));
        self.book.metadata.description = Some(description);
        self
    }

    fn with_publication_date(mut self, date: NaiveDate) -> Self {
        debug!(parent: &self.span, %date, "设置出版日期");
        self.append_to(TITLE_INFO_PATH, date_element(date));
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
        info!(parent: &self.span, file_name = %cover.file_name, size = cover.len(), "嵌入封面");

        self.append_to(&[], binary_element(&cover));
        self.append_to(TITLE_INFO_PATH, coverpage_element());
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
        if self.sections.insert(sequence, section_element(&chapter)).is_some() {
            debug!(parent: &self.span, sequence, "章节序号重复，覆盖原章节");
        }
        self.book.add_chapter(sequence, chapter);
        self
    }

    fn book(&self) -> &Book {
        &self.book
    }

    fn build(self) -> Result<Fb2Writer> {
        let title = self.book.metadata.title.clone();
        info!(parent: &self.span, title = %title, chapters = self.sections.len(), "开始构建FB2");

        match self.assemble() {
            Ok((document, span)) => {
                info!(parent: &span, title = %title, "FB2构建完成");
                Ok(Fb2Writer::new(document, title, span))
            }
            Err((reason, span)) => {
                error!(parent: &span, title = %title, reason = %reason, "FB2构建失败");
                Err(BookError::build(&title, reason))
            }
        }
    }
}
