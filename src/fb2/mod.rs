//! FB2编码模块
//!
//! FictionBook 2.0 是单个XML文档。构建器在配置阶段就把元数据追加到文档中，
//! 章节节点按序号保存，在 `build` 时按升序放入 `<body>`。

pub mod builder;
pub mod document;
pub mod writer;

pub use builder::Fb2Builder;
pub use writer::Fb2Writer;

/// FictionBook命名空间
pub const FB2_NS: &str = "http://www.gribuser.ru/xml/fictionbook/2.0";

/// XLink命名空间
pub const XLINK_NS: &str = "http://www.w3.org/1999/xlink";

/// 封面二进制数据的ID
pub const COVER_ID: &str = "cover-image";

/// 写入 `document-info/program-used` 的程序名
pub const PROGRAM_USED: &str = "bookpress";
