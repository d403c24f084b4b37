use serde::{Deserialize, Serialize};

/// 板块分类方式（接口参数 COMMON_TYPE2）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    /// 行业板块（COMMON_TYPE2="2"）
    Industry,
    /// 概念板块（COMMON_TYPE2="3"）
    Concept,
}

impl Category {
    pub const ALL: [Category; 2] = [Category::Industry, Category::Concept];

    pub fn common_type2(&self) -> &'static str {
        match self {
            Category::Industry => "2",
            Category::Concept => "3",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Category::Industry => "行业",
            Category::Concept => "概念",
        }
    }
}

/// 排名维度（接口参数 COMMON_TYPE1），声明顺序即导出时的排序顺序
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Dimension {
    /// 涨幅
    ChangePercent,
    /// 涨停家数
    LimitUpCount,
    /// 涨跌比
    UpDownRatio,
    /// 主力净流入
    NetInflow,
    /// 成交额
    Turnover,
}

impl Dimension {
    pub const ALL: [Dimension; 5] = [
        Dimension::ChangePercent,
        Dimension::LimitUpCount,
        Dimension::UpDownRatio,
        Dimension::NetInflow,
        Dimension::Turnover,
    ];

    pub fn common_type1(&self) -> &'static str {
        match self {
            Dimension::ChangePercent => "001",
            Dimension::LimitUpCount => "004",
            Dimension::UpDownRatio => "005",
            Dimension::NetInflow => "003",
            Dimension::Turnover => "002",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Dimension::ChangePercent => "涨幅",
            Dimension::LimitUpCount => "涨停家数",
            Dimension::UpDownRatio => "涨跌比",
            Dimension::NetInflow => "主力净流入",
            Dimension::Turnover => "成交额",
        }
    }
}

/// 排名方向，来自接口的 COMMON_TYPE3 标记。
/// "01"=前10，"02"=后10；其余值原样保留，不丢弃也不猜测。
/// 派生的 Ord 保证排序时 前10 < 后10 < 未知标记。
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Direction {
    Top10,
    Bottom10,
    Unknown(String),
}

impl Direction {
    pub fn from_raw(raw: Option<&str>) -> Direction {
        match raw {
            Some("01") => Direction::Top10,
            Some("02") => Direction::Bottom10,
            Some(other) => Direction::Unknown(other.to_string()),
            None => Direction::Unknown(String::new()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Direction::Top10 => "前10",
            Direction::Bottom10 => "后10",
            Direction::Unknown(raw) => raw,
        }
    }
}

/// 一条归一化后的板块轮动排名记录。
/// 由分页抓取产生，导出层只读不改。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardRotationRow {
    pub date: String, // "YYYY-MM-DD"
    pub category: Category,
    pub dimension: Dimension,
    pub direction: Direction,
    pub rank: u32,      // 组内 1..=10
    pub value: f64,     // 指标值，含义随维度变化
    pub board_name: String,
    pub board_code: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_codes_and_labels() {
        assert_eq!(Category::Industry.common_type2(), "2");
        assert_eq!(Category::Concept.common_type2(), "3");
        assert_eq!(Category::Industry.label(), "行业");
        assert_eq!(Category::Concept.label(), "概念");
    }

    #[test]
    fn test_dimension_codes_and_labels() {
        assert_eq!(Dimension::ChangePercent.common_type1(), "001");
        assert_eq!(Dimension::LimitUpCount.common_type1(), "004");
        assert_eq!(Dimension::UpDownRatio.common_type1(), "005");
        assert_eq!(Dimension::NetInflow.common_type1(), "003");
        assert_eq!(Dimension::Turnover.common_type1(), "002");
        assert_eq!(Dimension::NetInflow.label(), "主力净流入");
    }

    #[test]
    fn test_direction_from_raw() {
        assert_eq!(Direction::from_raw(Some("01")), Direction::Top10);
        assert_eq!(Direction::from_raw(Some("02")), Direction::Bottom10);
        // 未识别标记原样保留
        assert_eq!(
            Direction::from_raw(Some("03")),
            Direction::Unknown("03".to_string())
        );
        assert_eq!(Direction::from_raw(None), Direction::Unknown(String::new()));
    }

    #[test]
    fn test_direction_sort_order() {
        let mut dirs = vec![
            Direction::Unknown("09".to_string()),
            Direction::Bottom10,
            Direction::Top10,
        ];
        dirs.sort();
        assert_eq!(
            dirs,
            vec![
                Direction::Top10,
                Direction::Bottom10,
                Direction::Unknown("09".to_string())
            ]
        );
    }

    #[test]
    fn test_dimension_sort_follows_declaration_order() {
        let mut dims = vec![Dimension::Turnover, Dimension::ChangePercent, Dimension::NetInflow];
        dims.sort();
        assert_eq!(
            dims,
            vec![Dimension::ChangePercent, Dimension::NetInflow, Dimension::Turnover]
        );
    }
}
