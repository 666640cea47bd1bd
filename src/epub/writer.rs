//! EPUB写出器
//!
//! 将内存产物打包为OCF ZIP容器：mimetype作为第一个条目且不压缩，
//! 其余条目按插入顺序以Deflate压缩写入。

use std::io::{Seek, Write};
use std::sync::Arc;

use chrono::{DateTime, Datelike, Timelike, Utc};
use tracing::{Span, trace};
use zip::CompressionMethod;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

use crate::epub::package::{EpubPackage, PackageContent};
use crate::epub::MIMETYPE_PATH;
use crate::error::{BookError, Result};
use crate::format::BookFormat;
use crate::writer::BookWriter;

/// EPUB写出器
///
/// 产物只读共享，克隆后可在其他线程写出。
#[derive(Debug, Clone)]
pub struct EpubWriter {
    package: Arc<EpubPackage>,
    title: String,
    /// 构建时刻，作为所有条目的修改时间
    modified: DateTime<Utc>,
    span: Span,
}

impl EpubWriter {
    pub(crate) fn new(
        package: EpubPackage,
        title: String,
        modified: DateTime<Utc>,
        span: Span,
    ) -> Self {
        Self {
            package: Arc::new(package),
            title,
            modified,
            span,
        }
    }

    /// 绑定的内存产物
    pub fn package(&self) -> &EpubPackage {
        &self.package
    }
}

impl BookWriter for EpubWriter {
    fn format(&self) -> BookFormat {
        BookFormat::Epub
    }

    fn book_title(&self) -> &str {
        &self.title
    }

    fn span(&self) -> &Span {
        &self.span
    }

    fn write_to<W: Write + Seek>(&self, output: &mut W) -> Result<()> {
        let mimetype = match self.package.get(MIMETYPE_PATH) {
            Some(PackageContent::Binary(data)) => data,
            _ => return Err(BookError::MissingEntry(MIMETYPE_PATH.to_string())),
        };

        let options = SimpleFileOptions::default().last_modified_time(zip_time(&self.modified));
        let stored = options.compression_method(CompressionMethod::Stored);
        let deflated = options.compression_method(CompressionMethod::Deflated);

        let mut zip = ZipWriter::new(output);

        zip.start_file(MIMETYPE_PATH, stored)?;
        zip.write_all(mimetype)?;

        for entry in self.package.entries().filter(|entry| entry.path != MIMETYPE_PATH) {
            trace!(parent: &self.span, path = %entry.path, "写入条目");
            zip.start_file(entry.path.as_str(), deflated)?;
            match &entry.content {
                PackageContent::Binary(data) => zip.write_all(data)?,
                PackageContent::Document(document) => document.write_to(&mut zip)?,
            }
        }

        zip.finish()?;
        Ok(())
    }
}

/// ZIP条目时间，超出DOS时间范围时取1980-01-01
fn zip_time(time: &DateTime<Utc>) -> zip::DateTime {
    u16::try_from(time.year())
        .ok()
        .and_then(|year| {
            zip::DateTime::from_date_and_time(
                year,
                time.month() as u8,
                time.day() as u8,
                time.hour() as u8,
                time.minute() as u8,
                time.second() as u8,
            )
            .ok()
        })
        .unwrap_or_default()
}
