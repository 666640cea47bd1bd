use std::path::{Path, PathBuf};
use std::process::ExitCode;

use bookpress::config::DEFAULT_CONFIG_PATH;
use bookpress::{
    BookBuilder, BookFactory, BookFormat, BookWriter, ConvertorConfig, Result, ScrapedBook,
};
use clap::Parser;
use tracing::info_span;
use tracing_subscriber::EnvFilter;

/// 📚 BookPress - 电子书生成工具
#[derive(Parser)]
#[command(name = "bookpress")]
#[command(about = "将抓取的书籍JSON转换为EPUB或FB2电子书")]
#[command(version)]
struct Args {
    /// 书籍JSON文件路径
    #[arg(help = "抓取程序保存的书籍JSON文件")]
    input: PathBuf,

    /// 输出格式
    #[arg(short, long, value_enum, help = "输出格式（默认取配置文件）")]
    format: Option<BookFormat>,

    /// 语言代码
    #[arg(short, long, help = "书籍语言代码（默认取配置文件）")]
    language: Option<String>,

    /// 输出路径
    #[arg(short, long, help = "输出文件或目录（默认取配置文件中的base_location）")]
    output: Option<PathBuf>,

    /// 配置文件路径
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH, help = "YAML配置文件，不存在时自动生成")]
    config: PathBuf,

    /// 详细输出模式
    #[arg(short, long, help = "显示详细信息并启用debug日志")]
    verbose: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    println!("📚 BookPress - 电子书生成工具");

    let config = match ConvertorConfig::load_or_init(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ 错误: {}", e);
            return ExitCode::FAILURE;
        }
    };

    init_logging(&config, args.verbose);

    if args.verbose {
        println!("🔍 详细模式已启用");
        println!("⚙️  配置文件: {}", args.config.display());
    }

    match convert(&args, &config) {
        Ok(path) => {
            println!("💾 已保存到: {}", path.display());
            println!("🎉 电子书生成完成！");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(error = %e, "转换失败");
            eprintln!("❌ 错误: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// 安装日志订阅器，`RUST_LOG` 优先于配置文件中的级别
fn init_logging(config: &ConvertorConfig, verbose: bool) {
    let fallback = if verbose { "debug" } else { config.log_level.as_str() };
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(fallback))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

fn convert(args: &Args, config: &ConvertorConfig) -> Result<PathBuf> {
    let format = args.format.unwrap_or(config.output_format);
    let language = args
        .language
        .clone()
        .unwrap_or_else(|| config.default_language.clone());

    println!("正在读取书籍数据: {}", args.input.display());
    let book = ScrapedBook::from_path(&args.input)?;
    println!("📖 书名: {}", book.title);
    println!("  共 {} 个章节", book.chapters.len());
    if args.verbose {
        for (sequence, chapter) in &book.chapters {
            println!("  {}. {} ({} 段)", sequence, chapter.title, chapter.paragraphs.len());
        }
    }

    let factory = BookFactory::with_span(info_span!("convert", input = %args.input.display()));
    let builder = factory.create_builder(format, &book.title, language);
    let writer = book.apply_to(builder)?.build()?;
    println!("🔧 {} 构建完成", writer.format());

    let target = output_target(args.output.as_deref(), config);
    writer.save_to_file(target)
}

/// 未指定输出路径时使用配置中的根目录，并确保其存在以按目录目标处理
fn output_target(output: Option<&Path>, config: &ConvertorConfig) -> PathBuf {
    match output {
        Some(path) => path.to_path_buf(),
        None => {
            let base = config.expanded_base_location();
            if let Err(e) = std::fs::create_dir_all(&base) {
                tracing::warn!(directory = %base.display(), error = %e, "无法创建输出目录");
            }
            base
        }
    }
}
