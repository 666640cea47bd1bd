//! OPF包文档模块
//!
//! 根据书籍内容生成清单与脊柱，并输出 `content.opf`。

use chrono::{DateTime, Utc};

use crate::epub::opf::metadata::{BOOK_ID, metadata_element};
use crate::epub::opf::{ManifestItem, SpineItem};
use crate::epub::{
    COVER_PAGE_FILE, CSS_MEDIA_TYPE, OPF_NS, STYLE_FILE, TOC_FILE, XHTML_MEDIA_TYPE, chapter_href,
    chapter_id,
};
use crate::model::Book;
use crate::xml::{XmlDocument, XmlElement};

/// 各固定清单项的ID
pub const TOC_ID: &str = "toc";
pub const STYLE_ID: &str = "style";
pub const COVER_IMAGE_ID: &str = "cover-image";
pub const COVER_PAGE_ID: &str = "cover-page";

/// OPF包文档
#[derive(Debug, Clone)]
pub struct Opf {
    /// EPUB版本
    pub version: String,
    /// 已生成的元数据元素
    pub metadata: XmlElement,
    /// 清单项，保持插入顺序
    pub manifest: Vec<ManifestItem>,
    /// 脊柱(阅读顺序)
    pub spine: Vec<SpineItem>,
}

impl Opf {
    /// 根据书籍生成包文档
    ///
    /// 脊柱顺序为封面页（如有）、目录页，然后按序号升序排列的章节。
    ///
    /// # 参数
    /// * `book` - 书籍
    /// * `modified` - 构建时刻
    pub fn from_book(book: &Book, modified: &DateTime<Utc>) -> Self {
        let mut manifest = vec![
            ManifestItem::new(TOC_ID, TOC_FILE, XHTML_MEDIA_TYPE).with_properties("nav"),
            ManifestItem::new(STYLE_ID, STYLE_FILE, CSS_MEDIA_TYPE),
        ];
        let mut spine = Vec::new();

        if let Some(cover) = &book.cover {
            manifest.push(
                ManifestItem::new(COVER_IMAGE_ID, &cover.file_name, &cover.content_type)
                    .with_properties("cover-image"),
            );
            manifest.push(ManifestItem::new(COVER_PAGE_ID, COVER_PAGE_FILE, XHTML_MEDIA_TYPE));
            spine.push(SpineItem::new(COVER_PAGE_ID));
        }

        spine.push(SpineItem::new(TOC_ID));

        for (sequence, _) in book.chapters() {
            let id = chapter_id(sequence);
            manifest.push(ManifestItem::new(&id, chapter_href(sequence), XHTML_MEDIA_TYPE));
            spine.push(SpineItem::new(id));
        }

        Self {
            version: "3.0".to_string(),
            metadata: metadata_element(&book.metadata, modified),
            manifest,
            spine,
        }
    }

    /// 根据ID获取清单项
    pub fn get_manifest_item(&self, id: &str) -> Option<&ManifestItem> {
        self.manifest.iter().find(|item| item.id == id)
    }

    /// 获取导航文档的路径
    pub fn get_nav_path(&self) -> Option<&str> {
        self.manifest
            .iter()
            .find(|item| item.is_nav())
            .map(|item| item.href.as_str())
    }

    /// 获取封面图片的路径
    pub fn get_cover_image_path(&self) -> Option<&str> {
        self.manifest
            .iter()
            .find(|item| item.is_cover_image())
            .map(|item| item.href.as_str())
    }

    /// 生成 `content.opf` 文档
    pub fn to_document(&self) -> XmlDocument {
        XmlDocument::new(
            XmlElement::new("package")
                .attr("xmlns", OPF_NS)
                .attr("version", &self.version)
                .attr("unique-identifier", BOOK_ID)
                .child(self.metadata.clone())
                .child(
                    XmlElement::new("manifest")
                        .children(self.manifest.iter().map(ManifestItem::to_element)),
                )
                .child(
                    XmlElement::new("spine")
                        .children(self.spine.iter().map(SpineItem::to_element)),
                ),
        )
    }
}
