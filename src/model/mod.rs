//! 书籍数据模型模块
//!
//! 提供书籍、章节、段落、封面和元数据的值容器，除简单修改外不包含编码逻辑。

mod book;
mod chapter;
mod cover;
mod metadata;

pub use book::Book;
pub use chapter::{Chapter, Paragraph};
pub use cover::CoverImage;
pub use metadata::Metadata;
