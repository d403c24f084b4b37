use anyhow::{Context, Result};
use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::models::board::{BoardRotationRow, Category};

/// 导出列头，顺序固定：日期在前，板块代码收尾
const ROW_HEADERS: [&str; 8] = [
    "日期", "分类方式", "维度", "排名方向", "排名", "指标值", "板块名称", "板块代码",
];

/// 导出排序契约：日期降序 → 维度声明顺序 → 排名方向（前10/后10/未知）→ 排名升序。
/// sort_by 是稳定排序，同一数据集重复排序结果一致。
fn compare_rows(a: &BoardRotationRow, b: &BoardRotationRow) -> Ordering {
    b.date
        .cmp(&a.date)
        .then_with(|| a.dimension.cmp(&b.dimension))
        .then_with(|| a.direction.cmp(&b.direction))
        .then_with(|| a.rank.cmp(&b.rank))
}

pub fn sort_rows(rows: &mut [BoardRotationRow]) {
    rows.sort_by(compare_rows);
}

/// 把汇总行按分类方式分区导出为单个带时间戳的 CSV。
/// 每个有数据的分类方式一个命名区块（区块名行 + 表头 + 数据行），
/// 无数据的分类方式不产生区块。返回生成文件的路径。
pub fn export_rows(rows: &[BoardRotationRow], output_dir: &Path) -> Result<PathBuf> {
    fs::create_dir_all(output_dir)
        .with_context(|| format!("创建输出目录失败: {}", output_dir.display()))?;

    let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
    let output_path = output_dir.join(format!("板块轮动_前10后10_{}.csv", timestamp));

    let mut file = File::create(&output_path)
        .with_context(|| format!("创建导出文件失败: {}", output_path.display()))?;
    // UTF-8 BOM，Excel 打开中文不乱码
    file.write_all(b"\xef\xbb\xbf")?;

    let mut writer = csv::WriterBuilder::new().flexible(true).from_writer(file);

    for category in Category::ALL {
        let mut section: Vec<BoardRotationRow> = rows
            .iter()
            .filter(|r| r.category == category)
            .cloned()
            .collect();
        if section.is_empty() {
            continue;
        }
        sort_rows(&mut section);

        writer.write_record([category.label()])?;
        writer.write_record(ROW_HEADERS)?;
        for row in &section {
            let rank = row.rank.to_string();
            let value = row.value.to_string();
            writer.write_record([
                row.date.as_str(),
                row.category.label(),
                row.dimension.label(),
                row.direction.label(),
                rank.as_str(),
                value.as_str(),
                row.board_name.as_str(),
                row.board_code.as_str(),
            ])?;
        }
        writer.write_record([""])?;
    }

    writer.flush()?;
    Ok(output_path)
}

/// 把滚动收集到的交易日期倒序写成 CSV，返回生成文件的路径。
pub fn export_dates(dates: &BTreeSet<String>, output_dir: &Path) -> Result<PathBuf> {
    fs::create_dir_all(output_dir)
        .with_context(|| format!("创建输出目录失败: {}", output_dir.display()))?;

    let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
    let output_path = output_dir.join(format!("交易日期_{}.csv", timestamp));

    let mut file = File::create(&output_path)
        .with_context(|| format!("创建导出文件失败: {}", output_path.display()))?;
    file.write_all(b"\xef\xbb\xbf")?;

    let mut writer = csv::Writer::from_writer(file);
    writer.write_record(["日期"])?;
    for date in dates.iter().rev() {
        writer.write_record([date.as_str()])?;
    }
    writer.flush()?;
    Ok(output_path)
}
