//! XHTML内容页模块
//!
//! 生成章节页与封面页。

use crate::epub::{OPS_NS, STYLE_FILE, XHTML_NS};
use crate::model::{Chapter, CoverImage};
use crate::xml::{XmlDocument, XmlElement};

/// 带命名空间与语言声明的 `<html>` 根元素
pub(crate) fn html_root(language: &str) -> XmlElement {
    XmlElement::new("html")
        .attr("xmlns", XHTML_NS)
        .attr("xmlns:epub", OPS_NS)
        .attr("lang", language)
        .attr("xml:lang", language)
}

/// 引用共享样式表的 `<link>` 元素
pub(crate) fn stylesheet_link() -> XmlElement {
    XmlElement::new("link")
        .attr("href", STYLE_FILE)
        .attr("rel", "stylesheet")
        .attr("type", "text/css")
}

pub(crate) fn charset_meta() -> XmlElement {
    XmlElement::new("meta").attr("charset", "utf-8")
}

/// 生成章节页
///
/// 标题与段落文本原样保存，序列化时统一转义。
///
/// # 参数
/// * `chapter` - 章节
/// * `language` - 书籍语言
pub fn chapter_page(chapter: &Chapter, language: &str) -> XmlDocument {
    let section = XmlElement::new("section")
        .attr("epub:type", "chapter")
        .attr("role", "doc-chapter")
        .child(
            XmlElement::new("h1")
                .attr("class", "chapter-title")
                .text(&chapter.title),
        )
        .children(
            chapter
                .paragraphs
                .iter()
                .map(|paragraph| XmlElement::new("p").text(&paragraph.text)),
        );

    XmlDocument::new(
        html_root(language)
            .child(
                XmlElement::new("head")
                    .child(XmlElement::new("title").text(&chapter.title))
                    .child(stylesheet_link())
                    .child(charset_meta()),
            )
            .child(XmlElement::new("body").child(section)),
    )
}

/// 生成封面页
pub fn cover_page(cover: &CoverImage, language: &str) -> XmlDocument {
    XmlDocument::new(
        html_root(language)
            .child(
                XmlElement::new("head")
                    .child(XmlElement::new("title").text("Cover"))
                    .child(charset_meta()),
            )
            .child(
                XmlElement::new("body").child(
                    XmlElement::new("section")
                        .attr("epub:type", "cover")
                        .attr("role", "doc-cover")
                        .child(
                            XmlElement::new("img")
                                .attr("src", &cover.file_name)
                                .attr("alt", "Cover Image"),
                        ),
                ),
            ),
    )
}
