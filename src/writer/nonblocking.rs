//! 异步写出
//!
//! 将ZIP压缩与文件写出卸载到tokio的阻塞线程池。

use std::io::Cursor;
use std::path::PathBuf;

use crate::error::{BookError, Result};
use crate::writer::BookWriter;

/// 在阻塞线程池中序列化到内存流
pub async fn save_as_stream_async<B>(writer: &B) -> Result<Cursor<Vec<u8>>>
where
    B: BookWriter + Clone + Send + 'static,
{
    let writer = writer.clone();
    tokio::task::spawn_blocking(move || writer.save_as_stream())
        .await
        .map_err(|e| BookError::TaskJoin(e.to_string()))?
}

/// 在阻塞线程池中保存到文件
///
/// 任务被取消时不会留下写了一半的目标文件。
pub async fn save_to_file_async<B>(writer: &B, path: impl Into<PathBuf>) -> Result<PathBuf>
where
    B: BookWriter + Clone + Send + 'static,
{
    let writer = writer.clone();
    let path = path.into();
    tokio::task::spawn_blocking(move || writer.save_to_file(path))
        .await
        .map_err(|e| BookError::TaskJoin(e.to_string()))?
}
