//! 输出路径解析模块
//!
//! 负责扩展名校正、目录目标的文件名合成以及文件名清理。

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use chrono::{DateTime, TimeZone};

use crate::format::BookFormat;

/// 清理结果为空时使用的默认文件名
pub const DEFAULT_FILE_NAME: &str = "Book";

/// 目录目标中文件名的时间戳格式
const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// 文件名中不允许出现的字符
const INVALID_FILE_NAME_CHARS: [char; 9] = ['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

/// 清理文件名
///
/// 逐个字符地将非法字符替换为 `_`，去掉末尾的句点；
/// 结果为空或只含空白时返回 `"Book"`。
///
/// # 示例
///
/// ```rust
/// use bookpress::writer::sanitize_file_name;
///
/// assert_eq!(sanitize_file_name("Invalid:File*Name?"), "Invalid_File_Name_");
/// assert_eq!(sanitize_file_name("..."), "Book");
/// ```
pub fn sanitize_file_name(name: &str) -> String {
    let replaced: String = name
        .chars()
        .map(|c| {
            if c.is_control() || INVALID_FILE_NAME_CHARS.contains(&c) {
                '_'
            } else {
                c
            }
        })
        .collect();

    let trimmed = replaced.trim_end_matches('.');
    if trimmed.trim().is_empty() {
        DEFAULT_FILE_NAME.to_string()
    } else {
        trimmed.to_string()
    }
}

/// 解析最终的输出路径
///
/// # 参数
/// * `path` - 调用方给出的路径，可以是已存在的目录或文件路径
/// * `format` - 输出格式，决定规范扩展名
/// * `title` - 书名，用于目录目标下的子目录与文件名
/// * `now` - 本地时间，用于目录目标下的时间戳
///
/// # 返回值
/// * `PathBuf` - 目录目标返回 `<dir>/<书名>/<时间戳>_<书名><扩展名>`，
///   否则返回补全或替换扩展名后的路径
pub fn resolve_output_path<Tz: TimeZone>(
    path: &Path,
    format: BookFormat,
    title: &str,
    now: &DateTime<Tz>,
) -> PathBuf
where
    Tz::Offset: std::fmt::Display,
{
    if path.is_dir() {
        let sanitized_title = sanitize_file_name(title);
        let file_name = format!(
            "{}_{}{}",
            now.format(TIMESTAMP_FORMAT),
            sanitized_title,
            format.extension()
        );
        return path.join(&sanitized_title).join(file_name);
    }

    match path.extension() {
        None => {
            let mut with_extension = OsString::from(path.as_os_str());
            with_extension.push(format.extension());
            PathBuf::from(with_extension)
        }
        Some(extension)
            if extension
                .to_string_lossy()
                .eq_ignore_ascii_case(format.extension_without_dot()) =>
        {
            path.to_path_buf()
        }
        Some(_) => path.with_extension(format.extension_without_dot()),
    }
}
