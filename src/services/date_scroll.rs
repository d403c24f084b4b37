use anyhow::Result;
use std::collections::BTreeSet;
use std::time::Duration;
use tokio::time::sleep;

/// 日期条表头单元格文本，收集时跳过
const HEADER_CELL: &str = "排名";
/// 需要在最右侧连续停留的轮数
const STABLE_ROUNDS_REQUIRED: u32 = 2;

/// 虚拟化横向日期条的最小操作集，由浏览器自动化端实现。
/// 宽度与偏移语义对应 DOM 的 scrollWidth / scrollLeft / clientWidth。
pub trait DateStrip {
    fn visible_cells(&mut self) -> Result<Vec<String>>;
    fn scroll_width(&self) -> i64;
    fn scroll_left(&self) -> i64;
    fn client_width(&self) -> i64;
    fn scroll_by(&mut self, delta: i64) -> Result<()>;
}

/// 收集状态机的三个阶段
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollPhase {
    /// 还没滚到最右侧，继续扫描
    Scanning,
    /// 已到最右侧，等待集合稳定
    Converging,
    /// 收集完成
    Done,
}

/// 横向滚动收集日期条上的全部唯一日期。
///
/// 每轮：读取当前可见单元格并入集合；若集合自上一轮未增长且已在最右侧
/// 连续停留满 2 轮则结束；否则按到边情况更新停留计数，向右滚动一个视口
/// 宽度并等待懒加载。终止判定使用上一轮结束时的停留计数，到边后至少还会
/// 再读两轮，防止懒加载内容未渲染就提前收束。
pub async fn collect_dates<S: DateStrip>(strip: &mut S, settle: Duration) -> Result<BTreeSet<String>> {
    let mut dates: BTreeSet<String> = BTreeSet::new();
    let mut prev_len = 0usize;
    let mut stable_rounds = 0u32;
    let mut phase = ScrollPhase::Scanning;

    while phase != ScrollPhase::Done {
        for cell in strip.visible_cells()? {
            let txt = cell.trim();
            if !txt.is_empty() && txt != HEADER_CELL {
                dates.insert(txt.to_string());
            }
        }

        if dates.len() == prev_len && stable_rounds >= STABLE_ROUNDS_REQUIRED {
            phase = ScrollPhase::Done;
            continue;
        }

        let right_gap = strip.scroll_width() - strip.scroll_left() - strip.client_width();
        if right_gap <= 0 {
            stable_rounds += 1;
            phase = ScrollPhase::Converging;
        } else {
            stable_rounds = 0;
            phase = ScrollPhase::Scanning;
        }

        prev_len = dates.len();
        strip.scroll_by(strip.client_width())?;
        sleep(settle).await;
    }

    log::info!("日期收集完成，共 {} 条", dates.len());
    Ok(dates)
}
