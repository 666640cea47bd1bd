//! FB2写出器

use std::io::{Seek, Write};
use std::sync::Arc;

use tracing::Span;

use crate::error::Result;
use crate::format::BookFormat;
use crate::writer::BookWriter;
use crate::xml::XmlDocument;

/// FB2写出器
///
/// 文档在构建完成后只读共享，克隆后可在其他线程写出。
#[derive(Debug, Clone)]
pub struct Fb2Writer {
    document: Arc<XmlDocument>,
    title: String,
    span: Span,
}

impl Fb2Writer {
    pub(crate) fn new(document: XmlDocument, title: String, span: Span) -> Self {
        Self {
            document: Arc::new(document),
            title,
            span,
        }
    }

    /// 绑定的文档
    pub fn document(&self) -> &XmlDocument {
        &self.document
    }
}

impl BookWriter for Fb2Writer {
    fn format(&self) -> BookFormat {
        BookFormat::Fb2
    }

    fn book_title(&self) -> &str {
        &self.title
    }

    fn span(&self) -> &Span {
        &self.span
    }

    fn write_to<W: Write + Seek>(&self, output: &mut W) -> Result<()> {
        self.document.write_to(output)
    }
}
