//! 元数据生成模块
//!
//! 将书籍元数据写为OPF的 `<metadata>` 元素。

use chrono::{DateTime, Utc};

use crate::epub::{DC_NS, OPF_NS};
use crate::model::Metadata;
use crate::xml::XmlElement;

/// 唯一标识符元素的ID，被 `package@unique-identifier` 引用
pub const BOOK_ID: &str = "book-id";

/// `dcterms:modified` 的时间格式
const MODIFIED_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// 出版日期格式
const DATE_FORMAT: &str = "%Y-%m-%d";

/// 生成 `<metadata>` 元素
///
/// 作者、出版社、描述与日期只在有值时输出。
///
/// # 参数
/// * `metadata` - 书籍元数据
/// * `modified` - 构建时刻，写入 `dcterms:modified`
pub fn metadata_element(metadata: &Metadata, modified: &DateTime<Utc>) -> XmlElement {
    let mut element = XmlElement::new("metadata")
        .attr("xmlns:dc", DC_NS)
        .attr("xmlns:opf", OPF_NS)
        .child(
            XmlElement::new("dc:identifier")
                .attr("id", BOOK_ID)
                .text(format!("urn:uuid:{}", metadata.identifier())),
        )
        .child(XmlElement::new("dc:title").text(&metadata.title))
        .child(XmlElement::new("dc:language").text(&metadata.language));

    if let Some(author) = metadata.author_if_present() {
        element.push(XmlElement::new("dc:creator").attr("opf:role", "aut").text(author));
    }
    if let Some(publisher) = non_empty(&metadata.publisher) {
        element.push(XmlElement::new("dc:publisher").text(publisher));
    }
    if let Some(description) = non_empty(&metadata.description) {
        element.push(XmlElement::new("dc:description").text(description));
    }
    if let Some(date) = metadata.publication_date {
        element.push(XmlElement::new("dc:date").text(date.format(DATE_FORMAT).to_string()));
    }

    element
        .child(
            XmlElement::new("meta")
                .attr("property", "dcterms:modified")
                .text(modified.format(MODIFIED_FORMAT).to_string()),
        )
        .child(
            XmlElement::new("meta")
                .attr("property", "rendition:layout")
                .text("reflowable"),
        )
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}
