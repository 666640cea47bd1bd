//! 书籍格式模块
//!
//! 支持的输出格式是一个封闭集合，每种格式对应唯一的规范扩展名。

use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::BookError;

/// 支持的电子书格式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum BookFormat {
    /// EPUB 3 (OCF ZIP容器)
    Epub,
    /// FictionBook 2.0 (单个XML文档)
    Fb2,
}

impl BookFormat {
    /// 获取格式的规范扩展名（包含点号）
    pub fn extension(self) -> &'static str {
        match self {
            BookFormat::Epub => ".epub",
            BookFormat::Fb2 => ".fb2",
        }
    }

    /// 获取不带点号的扩展名
    pub fn extension_without_dot(self) -> &'static str {
        &self.extension()[1..]
    }

    /// 格式的显示名称
    pub fn name(self) -> &'static str {
        match self {
            BookFormat::Epub => "EPUB",
            BookFormat::Fb2 => "FB2",
        }
    }
}

impl Display for BookFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.name())
    }
}

impl FromStr for BookFormat {
    type Err = BookError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().trim_start_matches('.').to_ascii_lowercase().as_str() {
            "epub" => Ok(BookFormat::Epub),
            "fb2" => Ok(BookFormat::Fb2),
            _ => Err(BookError::UnsupportedFormat(s.to_string())),
        }
    }
}
