//! OPF（Open Packaging Format）生成模块
//!
//! 此模块负责生成EPUB包文件中的元数据、清单与脊柱。

mod document;
mod manifest;
mod metadata;
mod spine;

pub use document::{COVER_IMAGE_ID, COVER_PAGE_ID, Opf, STYLE_ID, TOC_ID};
pub use manifest::ManifestItem;
pub use metadata::{BOOK_ID, metadata_element};
pub use spine::SpineItem;
