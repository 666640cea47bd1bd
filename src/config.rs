//! 转换器配置模块
//!
//! 提供转换器的配置管理功能，支持从YAML文件加载配置。

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{BookError, Result};
use crate::format::BookFormat;

/// 默认配置文件路径
pub const DEFAULT_CONFIG_PATH: &str = "bookpress.yaml";

/// 转换器配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConvertorConfig {
    /// 默认输出格式
    pub output_format: BookFormat,
    /// 默认语言代码
    pub default_language: String,
    /// 输出根目录，支持 `~`、`$VAR`、`${VAR}` 与 `%VAR%`
    pub base_location: String,
    /// 日志级别，`RUST_LOG` 未设置时生效
    pub log_level: String,
}

impl Default for ConvertorConfig {
    fn default() -> Self {
        Self::default_config()
    }
}

impl ConvertorConfig {
    /// 从配置文件加载
    ///
    /// # 参数
    /// * `path` - YAML配置文件路径
    ///
    /// # 返回值
    /// * `Result<Self>` - 加载成功返回配置实例，失败返回 `BookError::Config`
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())
            .map_err(|e| BookError::Config(format!("无法读取配置文件: {}", e)))?;

        serde_yml::from_str(&content)
            .map_err(|e| BookError::Config(format!("配置文件格式错误: {}", e)))
    }

    /// 生成默认配置文件
    ///
    /// # 参数
    /// * `path` - 写入位置，已存在的文件会被覆盖
    pub fn generate_default_config(path: impl AsRef<Path>) -> Result<()> {
        let yaml_content = serde_yml::to_string(&Self::default_config())
            .map_err(|e| BookError::Config(format!("序列化配置失败: {}", e)))?;

        // 在YAML内容前添加注释说明
        let content_with_header = format!(
            "# bookpress 转换器配置文件\n# output_format: epub 或 fb2\n# base_location 支持 ~、$VAR、${{VAR}} 与 %VAR% 环境变量\n\n{}",
            yaml_content
        );

        fs::write(path.as_ref(), content_with_header)
            .map_err(|e| BookError::Config(format!("写入配置文件失败: {}", e)))?;

        Ok(())
    }

    /// 获取默认配置
    pub fn default_config() -> Self {
        Self {
            output_format: BookFormat::Fb2,
            default_language: "ua".to_string(),
            base_location: "~/ScrapedBooks".to_string(),
            log_level: "info".to_string(),
        }
    }

    /// 尝试从配置文件加载，如果文件不存在则先生成配置文件再使用默认配置
    ///
    /// 文件存在但格式错误时返回错误，不会覆盖该文件。
    pub fn load_or_init(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            return Self::from_file(path);
        }

        // 生成失败（例如目录只读）不影响使用默认配置
        let _ = Self::generate_default_config(path);
        Ok(Self::default_config())
    }

    /// 展开环境变量后的输出根目录
    pub fn expanded_base_location(&self) -> PathBuf {
        PathBuf::from(expand_env(&self.base_location))
    }

    /// 输出根目录下以输入文件名命名的输出路径
    ///
    /// # 参数
    /// * `input` - 输入文件路径，取其不含扩展名的文件名
    /// * `format` - 输出格式
    pub fn output_file_path(&self, input: impl AsRef<Path>, format: BookFormat) -> PathBuf {
        let stem = input
            .as_ref()
            .file_stem()
            .map(|stem| stem.to_string_lossy().to_string())
            .unwrap_or_else(|| crate::writer::DEFAULT_FILE_NAME.to_string());

        self.expanded_base_location()
            .join(format!("{}{}", stem, format.extension()))
    }
}

/// 展开路径中的 `~` 与环境变量，未定义的变量保持原样
fn expand_env(value: &str) -> String {
    let expanded = shellexpand::full_with_context_no_errors(
        value,
        || dirs::home_dir().map(|home| home.to_string_lossy().into_owned()),
        |name| env::var(name).ok(),
    );
    expand_percent_vars(&expanded)
}

/// Windows风格的 `%VAR%`
fn expand_percent_vars(value: &str) -> String {
    let mut result = String::with_capacity(value.len());
    let mut rest = value;

    while let Some(start) = rest.find('%') {
        result.push_str(&rest[..start]);
        let after = &rest[start + 1..];
        match after.find('%') {
            Some(end) if end > 0 => {
                let name = &after[..end];
                match env::var(name) {
                    Ok(resolved) => result.push_str(&resolved),
                    Err(_) => result.push_str(&rest[start..start + end + 2]),
                }
                rest = &after[end + 1..];
            }
            _ => {
                result.push('%');
                rest = after;
            }
        }
    }

    result.push_str(rest);
    result
}
