//! EPUB编码模块
//!
//! 将书籍模型转换为按压缩包路径索引的内存产物（二进制数据与XML文档），
//! 再由写出器打包为OCF ZIP容器。

pub mod builder;
pub mod container;
pub mod nav;
pub mod opf;
pub mod package;
pub mod style;
pub mod writer;
pub mod xhtml;

pub use builder::EpubBuilder;
pub use container::{Container, RootFile};
pub use opf::{ManifestItem, Opf, SpineItem};
pub use package::{EpubPackage, PackageContent, PackageEntry};
pub use writer::EpubWriter;

/// mimetype文件内容
pub const MIMETYPE: &str = "application/epub+zip";

/// 各固定条目在压缩包中的路径
pub const MIMETYPE_PATH: &str = "mimetype";
pub const CONTAINER_PATH: &str = "META-INF/container.xml";
pub const CONTENT_DIR: &str = "OEBPS";
pub const OPF_PATH: &str = "OEBPS/content.opf";
pub const TOC_FILE: &str = "toc.xhtml";
pub const STYLE_FILE: &str = "style.css";
pub const COVER_PAGE_FILE: &str = "cover.xhtml";

/// XML命名空间
pub const XHTML_NS: &str = "http://www.w3.org/1999/xhtml";
pub const OPS_NS: &str = "http://www.idpf.org/2007/ops";
pub const OPF_NS: &str = "http://www.idpf.org/2007/opf";
pub const DC_NS: &str = "http://purl.org/dc/elements/1.1/";
pub const CONTAINER_NS: &str = "urn:oasis:names:tc:opendocument:xmlns:container";

/// 媒体类型
pub const XHTML_MEDIA_TYPE: &str = "application/xhtml+xml";
pub const CSS_MEDIA_TYPE: &str = "text/css";
pub const OPF_MEDIA_TYPE: &str = "application/oebps-package+xml";

/// 章节ID，十进制序号且不补零
pub fn chapter_id(sequence: i32) -> String {
    format!("chapter_{}", sequence)
}

/// 章节文件名
pub fn chapter_href(sequence: i32) -> String {
    format!("{}.xhtml", chapter_id(sequence))
}

/// 内容目录下文件在压缩包中的完整路径
pub fn content_path(href: &str) -> String {
    format!("{}/{}", CONTENT_DIR, href)
}
