//! 板块轮动数据抓取 CLI。
//!
//! 调用东方财富数据中心接口，批量拉取行业/概念两类板块在五个排名维度
//! 上的前10/后10数据，按分类方式分区导出为带时间戳的 CSV。
//!
//! ```bash
//! board-wheel                         # 默认导出到 过往数据/
//! board-wheel --out-dir 数据 --page-size 200
//! ```

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use board_wheel::models::settings::RunConfig;
use board_wheel::services::board_wheel::BoardWheelService;
use board_wheel::services::exporter;

#[derive(Parser)]
#[command(name = "board-wheel")]
#[command(about = "东方财富板块轮动前10后10数据导出", long_about = None)]
#[command(version)]
struct Cli {
    /// 输出目录
    #[arg(long, default_value = "过往数据")]
    out_dir: PathBuf,

    /// 单页请求条数
    #[arg(long, default_value_t = 500)]
    page_size: u32,

    /// 瞬时网络错误最大重试次数
    #[arg(long, default_value_t = 3)]
    max_retries: u32,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = RunConfig {
        output_dir: cli.out_dir,
        page_size: cli.page_size,
        max_retries: cli.max_retries,
        ..RunConfig::default()
    };

    let service = BoardWheelService::new(&config)?;
    let all_rows = service.fetch_all().await?;

    let output_path = exporter::export_rows(&all_rows, &config.output_dir)?;
    println!("已导出：{}", output_path.display());

    Ok(())
}
