//! 封面图片模块

use std::io::{self, Read};
use std::sync::Arc;

/// 封面图片
///
/// 创建时一次性读取调用方数据源的全部内容，之后不再持有该数据源。
/// 图片数据以只读共享方式保存，每次读取都得到独立的视图。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoverImage {
    /// 文件名，同时作为压缩包条目名与href目标
    pub file_name: String,
    /// MIME类型，例如 "image/jpeg"
    pub content_type: String,
    data: Arc<[u8]>,
}

impl CoverImage {
    /// 从字节数据创建封面
    pub fn new(data: Vec<u8>, file_name: impl Into<String>, content_type: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            data: Arc::from(data),
        }
    }

    /// 读取数据源的全部内容创建封面
    ///
    /// # 参数
    /// * `source` - 调用方提供的数据源，只会被完整读取一次
    /// * `file_name` - 图片文件名
    /// * `content_type` - 图片MIME类型
    pub fn from_reader<R: Read>(
        mut source: R,
        file_name: impl Into<String>,
        content_type: impl Into<String>,
    ) -> io::Result<Self> {
        let mut buffer = Vec::new();
        source.read_to_end(&mut buffer)?;
        Ok(Self::new(buffer, file_name, content_type))
    }

    /// 获取图片数据
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// 图片字节数
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_from_reader_drains_source() {
        let mut source = Cursor::new(vec![0xFF, 0xD8, 0xFF, 0xE0]);
        let cover = CoverImage::from_reader(&mut source, "cover.jpg", "image/jpeg").unwrap();

        assert_eq!(cover.data(), &[0xFF, 0xD8, 0xFF, 0xE0]);
        assert_eq!(source.position(), 4);

        // 数据源被复用后不影响封面
        source.get_mut().clear();
        assert_eq!(cover.len(), 4);
    }

    #[test]
    fn test_empty_source_gives_empty_cover() {
        let cover = CoverImage::from_reader(io::empty(), "cover.png", "image/png").unwrap();
        assert!(cover.is_empty());
        assert_eq!(cover.content_type, "image/png");
    }
}
