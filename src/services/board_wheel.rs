use anyhow::{anyhow, bail, Context, Result};
use serde::Deserialize;
use serde_json::Value;

use crate::models::board::{BoardRotationRow, Category, Dimension, Direction};
use crate::models::settings::RunConfig;
use crate::utils::http::build_datacenter_client;
use crate::utils::retry::retry_with_backoff;

const DATACENTER_BASE_URL: &str = "https://datacenter.eastmoney.com";
const BOARD_WHEEL_PATH: &str = "/securities/api/data/v1/get";

/// 板块轮动接口返回结构（外层定型，行数据保留为 Value 逐字段取）
#[derive(Debug, Deserialize)]
struct BoardWheelResp {
    result: Option<BoardWheelResult>,
}

#[derive(Debug, Default, Deserialize)]
struct BoardWheelResult {
    data: Option<Vec<Value>>,
    pages: Option<u32>,
}

/// 东方财富板块轮动数据抓取服务。
/// 按 (分类方式, 维度) 逐对分页拉取前10/后10排名并归一化为 BoardRotationRow。
pub struct BoardWheelService {
    client: reqwest::Client,
    base_url: String,
    page_size: u32,
    max_retries: u32,
}

impl BoardWheelService {
    pub fn new(config: &RunConfig) -> Result<Self> {
        Self::with_base_url(DATACENTER_BASE_URL, config)
    }

    /// 指定接口地址构建服务，测试时指向 mock server。
    pub fn with_base_url(base_url: impl Into<String>, config: &RunConfig) -> Result<Self> {
        let client = build_datacenter_client()?;
        Ok(Self {
            client,
            base_url: base_url.into(),
            page_size: config.page_size,
            max_retries: config.max_retries,
        })
    }

    /// 拉取某个 (分类方式, 维度) 的全部分页数据。
    /// 翻页终止条件：返回空页，或达到接口报告的 pages 总页数，先到者为准
    /// （pages 字段不一致时空页兜底，保证收敛）。
    pub async fn fetch_dimension(
        &self,
        category: Category,
        dimension: Dimension,
    ) -> Result<Vec<BoardRotationRow>> {
        let url = format!("{}{}", self.base_url, BOARD_WHEEL_PATH);
        let filter = format!(
            "(COMMON_TYPE1=\"{}\")(COMMON_TYPE2=\"{}\")(INDICATORID_RANK<=10)",
            dimension.common_type1(),
            category.common_type2()
        );

        let mut rows: Vec<BoardRotationRow> = Vec::new();
        let mut page_number = 1u32;

        loop {
            let params: Vec<(&str, String)> = vec![
                ("reportName", "RPT_BOARD_WHEEL".to_string()),
                (
                    "columns",
                    "BOARD_CODE,BOARD_NAME,TRADE_DATE,INDICATORID,INDICATORID_RANK,COMMON_TYPE3"
                        .to_string(),
                ),
                ("filter", filter.clone()),
                ("source", "SECURITIES".to_string()),
                ("client", "APP".to_string()),
                ("sortColumns", "TRADE_DATE,INDICATORID_RANK".to_string()),
                ("sortTypes", "1,1".to_string()),
                ("pageNumber", page_number.to_string()),
                ("pageSize", self.page_size.to_string()),
            ];

            let body: BoardWheelResp = retry_with_backoff(self.max_retries, || async {
                let resp = self.client.get(&url).query(&params).send().await?;
                let resp = resp.error_for_status()?;
                let body = resp.json::<BoardWheelResp>().await?;
                Ok(body)
            })
            .await
            .with_context(|| {
                format!(
                    "拉取板块轮动数据失败: {}/{} 第{}页",
                    category.label(),
                    dimension.label(),
                    page_number
                )
            })?;

            // 缺少 result/data 视为该页 0 行，不算格式错误
            let result = body.result.unwrap_or_default();
            let data = result.data.unwrap_or_default();
            if data.is_empty() {
                break;
            }

            for item in &data {
                rows.push(normalize_item(item, category, dimension)?);
            }

            let pages = result.pages.unwrap_or(1);
            if page_number >= pages {
                break;
            }
            page_number += 1;
        }

        Ok(rows)
    }

    /// 顺序遍历 分类方式 × 维度 全部 10 个组合并汇总所有行。
    /// 任一组合失败则整体失败，不做跳过续跑。
    pub async fn fetch_all(&self) -> Result<Vec<BoardRotationRow>> {
        let mut all_rows: Vec<BoardRotationRow> = Vec::new();

        for category in Category::ALL {
            for dimension in Dimension::ALL {
                println!("拉取 {}/{} ...", category.label(), dimension.label());
                let rows = self.fetch_dimension(category, dimension).await?;
                println!("  获取 {} 行", rows.len());
                all_rows.extend(rows);
            }
        }

        Ok(all_rows)
    }
}

/// 把接口返回的一条原始记录归一化为 BoardRotationRow。
/// 必填字段缺失即整体失败：半条记录进入汇总会污染导出结果。
fn normalize_item(item: &Value, category: Category, dimension: Dimension) -> Result<BoardRotationRow> {
    let trade_date = item
        .get("TRADE_DATE")
        .and_then(|v| v.as_str())
        .ok_or_else(|| anyhow!("板块轮动记录缺少 TRADE_DATE: {}", item))?;
    // 接口可能带时间部分，只保留日期
    let date: String = trade_date.chars().take(10).collect();

    let rank = item
        .get("INDICATORID_RANK")
        .and_then(|v| v.as_u64())
        .ok_or_else(|| anyhow!("板块轮动记录缺少 INDICATORID_RANK: {}", item))?
        as u32;

    let value = match item.get("INDICATORID") {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(s)) => s
            .trim()
            .parse::<f64>()
            .map_err(|e| anyhow!("INDICATORID 无法解析为数值 {:?}: {}", s, e))?,
        _ => bail!("板块轮动记录缺少 INDICATORID: {}", item),
    };

    let board_name = item
        .get("BOARD_NAME")
        .and_then(|v| v.as_str())
        .ok_or_else(|| anyhow!("板块轮动记录缺少 BOARD_NAME: {}", item))?
        .to_string();

    let board_code = item
        .get("BOARD_CODE")
        .and_then(|v| v.as_str())
        .ok_or_else(|| anyhow!("板块轮动记录缺少 BOARD_CODE: {}", item))?
        .to_string();

    let direction = Direction::from_raw(item.get("COMMON_TYPE3").and_then(|v| v.as_str()));

    Ok(BoardRotationRow {
        date,
        category,
        dimension,
        direction,
        rank,
        value,
        board_name,
        board_code,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_normalize_item_truncates_timestamp() {
        let item = json!({
            "TRADE_DATE": "2024-01-02 00:00:00",
            "INDICATORID": 3.21,
            "INDICATORID_RANK": 1,
            "BOARD_NAME": "半导体",
            "BOARD_CODE": "BK1036",
            "COMMON_TYPE3": "01"
        });
        let row = normalize_item(&item, Category::Industry, Dimension::ChangePercent).unwrap();
        assert_eq!(row.date, "2024-01-02");
        assert_eq!(row.direction, Direction::Top10);
        assert_eq!(row.rank, 1);
        assert!((row.value - 3.21).abs() < 1e-9);
    }

    #[test]
    fn test_normalize_item_value_as_string() {
        let item = json!({
            "TRADE_DATE": "2024-01-02",
            "INDICATORID": "12.5",
            "INDICATORID_RANK": 2,
            "BOARD_NAME": "白酒",
            "BOARD_CODE": "BK0896",
            "COMMON_TYPE3": "02"
        });
        let row = normalize_item(&item, Category::Concept, Dimension::Turnover).unwrap();
        assert!((row.value - 12.5).abs() < 1e-9);
        assert_eq!(row.direction, Direction::Bottom10);
    }

    #[test]
    fn test_normalize_item_missing_required_field_is_fatal() {
        let item = json!({
            "TRADE_DATE": "2024-01-02",
            "INDICATORID": 1.0,
            "BOARD_NAME": "半导体",
            "BOARD_CODE": "BK1036"
        });
        let err = normalize_item(&item, Category::Industry, Dimension::ChangePercent);
        assert!(err.is_err());
    }

    #[test]
    fn test_normalize_item_unknown_marker_kept_verbatim() {
        let item = json!({
            "TRADE_DATE": "2024-01-02",
            "INDICATORID": 1.0,
            "INDICATORID_RANK": 3,
            "BOARD_NAME": "半导体",
            "BOARD_CODE": "BK1036",
            "COMMON_TYPE3": "07"
        });
        let row = normalize_item(&item, Category::Industry, Dimension::ChangePercent).unwrap();
        assert_eq!(row.direction, Direction::Unknown("07".to_string()));
        assert_eq!(row.direction.label(), "07");
    }
}
