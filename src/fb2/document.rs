//! FB2文档节点模块
//!
//! 提供种子文档以及各类元数据、章节、二进制节点的生成函数。

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use chrono::NaiveDate;

use crate::fb2::{COVER_ID, FB2_NS, PROGRAM_USED, XLINK_NS};
use crate::model::{Chapter, CoverImage};
use crate::xml::XmlElement;

/// `<title-info>` 在根元素下的路径
pub const TITLE_INFO_PATH: &[&str] = &["description", "title-info"];

/// `<description>` 在根元素下的路径
pub const DESCRIPTION_PATH: &[&str] = &["description"];

/// `<body>` 在根元素下的路径
pub const BODY_PATH: &[&str] = &["body"];

/// 生成种子文档的根元素
///
/// ```text
/// FictionBook
/// ├── description
/// │   ├── title-info
/// │   └── document-info/program-used
/// └── body
/// ```
pub fn seed_document() -> XmlElement {
    XmlElement::new("FictionBook")
        .attr("xmlns", FB2_NS)
        .attr("xmlns:xlink", XLINK_NS)
        .child(
            XmlElement::new("description")
                .child(XmlElement::new("title-info"))
                .child(
                    XmlElement::new("document-info")
                        .child(XmlElement::new("program-used").text(PROGRAM_USED)),
                ),
        )
        .child(XmlElement::new("body"))
}

/// 按第一个空白拆分作者名
///
/// # 返回值
/// * `(String, String)` - 名(第一个词)与姓(其余词以单个空格连接)，缺失部分为空字符串
pub fn split_author(author: &str) -> (String, String) {
    let mut words = author.split_whitespace();
    let first_name = words.next().unwrap_or_default().to_string();
    let last_name = words.collect::<Vec<_>>().join(" ");
    (first_name, last_name)
}

pub fn book_title_element(title: &str) -> XmlElement {
    XmlElement::new("book-title").text(title)
}

pub fn lang_element(language: &str) -> XmlElement {
    XmlElement::new("lang").text(language)
}

pub fn author_element(author: &str) -> XmlElement {
    let (first_name, last_name) = split_author(author);
    XmlElement::new("author")
        .child(XmlElement::new("first-name").text(first_name))
        .child(XmlElement::new("last-name").text(last_name))
}

/// 简介，每个非空行对应一个段落
pub fn annotation_element(description: &str) -> XmlElement {
    XmlElement::new("annotation").children(
        description
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(|line| XmlElement::new("p").text(line)),
    )
}

pub fn date_element(date: NaiveDate) -> XmlElement {
    let value = date.format("%Y-%m-%d").to_string();
    XmlElement::new("date").attr("value", &value).text(value)
}

pub fn publish_info_element(publisher: &str) -> XmlElement {
    XmlElement::new("publish-info").child(XmlElement::new("publisher").text(publisher))
}

/// 封面图片的base64二进制节点
pub fn binary_element(cover: &CoverImage) -> XmlElement {
    XmlElement::new("binary")
        .attr("id", COVER_ID)
        .attr("content-type", &cover.content_type)
        .text(STANDARD.encode(cover.data()))
}

/// 引用封面二进制节点的 `<coverpage>`
pub fn coverpage_element() -> XmlElement {
    XmlElement::new("coverpage")
        .child(XmlElement::new("image").attr("xlink:href", format!("#{}", COVER_ID)))
}

/// 章节节点：标题段落后跟正文段落
pub fn section_element(chapter: &Chapter) -> XmlElement {
    XmlElement::new("section")
        .child(XmlElement::new("title").child(XmlElement::new("p").text(&chapter.title)))
        .children(
            chapter
                .paragraphs
                .iter()
                .map(|paragraph| XmlElement::new("p").text(&paragraph.text)),
        )
}
