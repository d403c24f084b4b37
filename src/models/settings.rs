use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// 单次运行的配置，由入口显式传入，不使用全局可变状态。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunConfig {
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    #[serde(default = "default_page_size")]
    pub page_size: u32,
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    /// 日期条滚动后等待懒加载完成的时间（毫秒）
    #[serde(default = "default_scroll_settle_ms")]
    pub scroll_settle_ms: u64,
}

fn default_output_dir() -> PathBuf { PathBuf::from("过往数据") }
fn default_page_size() -> u32 { 500 }
fn default_max_retries() -> u32 { 3 }
fn default_scroll_settle_ms() -> u64 { 500 }

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            page_size: default_page_size(),
            max_retries: default_max_retries(),
            scroll_settle_ms: default_scroll_settle_ms(),
        }
    }
}
