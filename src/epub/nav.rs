//! 导航文档模块
//!
//! 生成EPUB 3的目录页(toc.xhtml)，每个章节对应一个链接。

use crate::epub::chapter_href;
use crate::epub::xhtml::{charset_meta, html_root, stylesheet_link};
use crate::model::Book;
use crate::xml::{XmlDocument, XmlElement};

/// 目录页标题
const TOC_TITLE: &str = "Table of Contents";

/// 生成目录页，条目按章节序号升序排列
pub fn toc_page(book: &Book) -> XmlDocument {
    let entries = book.chapters().map(|(sequence, chapter)| {
        XmlElement::new("li").child(
            XmlElement::new("a")
                .attr("href", chapter_href(sequence))
                .text(&chapter.title),
        )
    });

    let nav = XmlElement::new("nav")
        .attr("epub:type", "toc")
        .attr("id", "toc")
        .child(
            XmlElement::new("ol")
                .attr("style", "list-style-type: none; padding-left: 0;")
                .children(entries),
        );

    XmlDocument::new(
        html_root(&book.metadata.language)
            .child(
                XmlElement::new("head")
                    .child(XmlElement::new("title").text(TOC_TITLE))
                    .child(charset_meta())
                    .child(stylesheet_link()),
            )
            .child(
                XmlElement::new("body").child(
                    XmlElement::new("div")
                        .attr("class", "toc-container")
                        .child(
                            XmlElement::new("h1")
                                .attr("style", "text-align: center; margin-bottom: 1.5em;")
                                .text(TOC_TITLE),
                        )
                        .child(nav),
                ),
            ),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Chapter;

    #[test]
    fn test_links_follow_sequence_order() {
        let mut book = Book::new();
        book.add_chapter(2, Chapter::new("B"));
        book.add_chapter(1, Chapter::new("A"));

        let document = toc_page(&book);
        let ol = document
            .root()
            .find_path(&["body", "div", "nav", "ol"])
            .unwrap();

        let links: Vec<(String, String)> = ol
            .find_all("li")
            .filter_map(|li| li.find("a"))
            .map(|a| (a.attribute("href").unwrap_or_default().to_string(), a.text_content()))
            .collect();

        assert_eq!(
            links,
            vec![
                ("chapter_1.xhtml".to_string(), "A".to_string()),
                ("chapter_2.xhtml".to_string(), "B".to_string()),
            ]
        );
    }

    #[test]
    fn test_empty_book_has_empty_list() {
        let xml = String::from_utf8(toc_page(&Book::new()).to_bytes().unwrap()).unwrap();
        assert!(xml.contains("<nav epub:type=\"toc\" id=\"toc\">"));
        assert!(xml.contains("<ol style=\"list-style-type: none; padding-left: 0;\"/>"));
    }
}
