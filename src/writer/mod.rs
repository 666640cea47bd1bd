//! 写出器契约模块
//!
//! 写出器绑定构建阶段生成的产物，负责将其序列化为内存流或文件。
//! 文件写出先落到目标目录中的临时文件，完成后再重命名到最终路径。

mod path;
#[cfg(feature = "tokio")]
mod nonblocking;

pub use path::{DEFAULT_FILE_NAME, resolve_output_path, sanitize_file_name};
#[cfg(feature = "tokio")]
pub use nonblocking::{save_as_stream_async, save_to_file_async};

use std::fs;
use std::io::{Cursor, Seek, Write};
use std::path::{Path, PathBuf};

use chrono::Local;
use tempfile::NamedTempFile;
use tracing::{Span, debug, error, info};

use crate::error::{BookError, Result};
use crate::format::BookFormat;

/// 内存流写出目标的描述
const STREAM_TARGET: &str = "内存流";

/// 书籍写出器
pub trait BookWriter {
    /// 输出格式
    fn format(&self) -> BookFormat;

    /// 书名，用于目录目标下的文件命名
    fn book_title(&self) -> &str;

    /// 诊断上下文
    fn span(&self) -> &Span;

    /// 将产物序列化到任意可定位的输出
    fn write_to<W: Write + Seek>(&self, output: &mut W) -> Result<()>;

    /// 序列化到新分配的内存缓冲区
    ///
    /// # 返回值
    /// * `Result<Cursor<Vec<u8>>>` - 位置位于开头的完整数据
    fn save_as_stream(&self) -> Result<Cursor<Vec<u8>>> {
        let format = self.format();
        info!(parent: self.span(), %format, "开始写出到内存流");

        let mut buffer = Cursor::new(Vec::new());
        if let Err(e) = self.write_to(&mut buffer) {
            error!(parent: self.span(), %format, error = %e, "写出到内存流失败");
            return Err(BookError::write(format, STREAM_TARGET, e));
        }
        buffer.set_position(0);

        info!(parent: self.span(), %format, size = buffer.get_ref().len(), "内存流写出完成");
        Ok(buffer)
    }

    /// 保存到文件
    ///
    /// 路径为已存在的目录时在其中按书名创建子目录与带时间戳的文件名；
    /// 否则补全或替换为规范扩展名。缺失的父目录会被创建，已存在的文件会被覆盖。
    ///
    /// # 参数
    /// * `path` - 目标文件或目录
    ///
    /// # 返回值
    /// * `Result<PathBuf>` - 实际写入的文件路径
    fn save_to_file(&self, path: impl AsRef<Path>) -> Result<PathBuf> {
        let format = self.format();
        let requested = path.as_ref();
        info!(parent: self.span(), %format, path = %requested.display(), "开始保存到文件");

        let target = resolve_output_path(requested, format, self.book_title(), &Local::now());
        match persist_atomically(self, &target) {
            Ok(()) => {
                info!(parent: self.span(), %format, path = %target.display(), "文件保存完成");
                Ok(target)
            }
            Err(e) => {
                error!(parent: self.span(), %format, path = %target.display(), error = %e, "保存文件失败");
                Err(BookError::write(format, target.display().to_string(), e))
            }
        }
    }
}

/// 先写入同目录的临时文件，再重命名覆盖目标文件
fn persist_atomically<B: BookWriter + ?Sized>(writer: &B, target: &Path) -> Result<()> {
    let directory = match target.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };

    if !directory.exists() {
        debug!(parent: writer.span(), directory = %directory.display(), "创建目录");
        fs::create_dir_all(&directory)?;
    }

    let mut temp_file = NamedTempFile::new_in(&directory)?;
    writer.write_to(temp_file.as_file_mut())?;
    temp_file.as_file_mut().flush()?;
    temp_file.as_file().sync_all()?;
    temp_file.persist(target).map_err(|e| BookError::Io(e.error))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;

    /// 输出固定内容的测试写出器
    struct StaticWriter {
        content: Vec<u8>,
        fail: bool,
        span: Span,
    }

    impl StaticWriter {
        fn new(content: &[u8]) -> Self {
            Self {
                content: content.to_vec(),
                fail: false,
                span: Span::none(),
            }
        }
    }

    impl BookWriter for StaticWriter {
        fn format(&self) -> BookFormat {
            BookFormat::Fb2
        }

        fn book_title(&self) -> &str {
            "Invalid:File*Name?"
        }

        fn span(&self) -> &Span {
            &self.span
        }

        fn write_to<W: Write + Seek>(&self, output: &mut W) -> Result<()> {
            if self.fail {
                return Err(BookError::Io(std::io::Error::other("文档缺失")));
            }
            output.write_all(&self.content)?;
            Ok(())
        }
    }

    #[test]
    fn test_stream_is_rewound() {
        let writer = StaticWriter::new(b"<FictionBook/>");

        let mut stream = writer.save_as_stream().unwrap();
        assert_eq!(stream.position(), 0);

        let mut content = String::new();
        stream.read_to_string(&mut content).unwrap();
        assert_eq!(content, "<FictionBook/>");

        // 重复写出得到相同的数据
        let again = writer.save_as_stream().unwrap().into_inner();
        assert_eq!(again, b"<FictionBook/>");
    }

    #[test]
    fn test_stream_failure_is_write_error() {
        let mut writer = StaticWriter::new(b"");
        writer.fail = true;

        match writer.save_as_stream() {
            Err(BookError::Write { format, target, .. }) => {
                assert_eq!(format, BookFormat::Fb2);
                assert_eq!(target, STREAM_TARGET);
            }
            other => panic!("期望Write错误, 得到: {:?}", other.map(|c| c.into_inner())),
        }
    }

    #[test]
    fn test_save_corrects_extension_and_creates_directories() {
        let dir = tempfile::tempdir().unwrap();
        let writer = StaticWriter::new(b"data");

        let requested = dir.path().join("nested").join("deeper").join("book.pdf");
        let saved = writer.save_to_file(&requested).unwrap();

        assert_eq!(saved, dir.path().join("nested").join("deeper").join("book.fb2"));
        assert_eq!(fs::read(&saved).unwrap(), b"data");
        assert!(!requested.exists());
    }

    #[test]
    fn test_save_overwrites_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("book.fb2");
        fs::write(&target, b"old content that is longer").unwrap();

        let writer = StaticWriter::new(b"new");
        writer.save_to_file(&target).unwrap();

        assert_eq!(fs::read(&target).unwrap(), b"new");
    }

    #[test]
    fn test_save_to_directory_uses_sanitized_title() {
        let dir = tempfile::tempdir().unwrap();
        let writer = StaticWriter::new(b"data");

        let saved = writer.save_to_file(dir.path()).unwrap();

        let folder = dir.path().join("Invalid_File_Name_");
        assert!(folder.is_dir());
        assert_eq!(saved.parent().unwrap(), folder);

        let file_name = saved.file_name().unwrap().to_string_lossy().to_string();
        assert!(file_name.ends_with("_Invalid_File_Name_.fb2"));
        // yyyyMMdd_HHmmss_
        assert_eq!(file_name.find("_Invalid"), Some(15));
    }

    #[test]
    fn test_failed_save_leaves_no_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut writer = StaticWriter::new(b"");
        writer.fail = true;

        let target = dir.path().join("broken.fb2");
        let result = writer.save_to_file(&target);

        assert!(matches!(result, Err(BookError::Write { .. })));
        assert!(!target.exists());
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_save_into_file_parent_fails() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, b"x").unwrap();

        let writer = StaticWriter::new(b"data");
        let result = writer.save_to_file(blocker.join("book.fb2"));

        assert!(matches!(result, Err(BookError::Write { .. })));
    }
}
