// ==========================================
// 制造库存系统 - 领域类型定义
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 库存变动方向 (Movement Direction)
// ==========================================
// 由 delta 的符号推导，不单独落库
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MovementDirection {
    Inbound,  // 入库 (delta >= 0)
    Outbound, // 出库 (delta < 0)
}

impl MovementDirection {
    /// 根据变动量判定方向
    pub fn from_delta(delta: i64) -> Self {
        if delta < 0 {
            MovementDirection::Outbound
        } else {
            MovementDirection::Inbound
        }
    }

    /// 转换为展示/日志用的字符串
    pub fn to_db_str(&self) -> &'static str {
        match self {
            MovementDirection::Inbound => "INBOUND",
            MovementDirection::Outbound => "OUTBOUND",
        }
    }
}

impl fmt::Display for MovementDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_db_str())
    }
}

// ==========================================
// 无法评估原因 (Not Evaluable Reason)
// ==========================================
// 模拟生产时的"无法评估"结果，不是错误
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NotEvaluableReason {
    ProductNotFound, // 产品不存在
    NoMaterials,     // 产品未定义物料清单
}

impl NotEvaluableReason {
    /// 面向用户的说明
    pub fn message(&self) -> &'static str {
        match self {
            NotEvaluableReason::ProductNotFound => "产品不存在",
            NotEvaluableReason::NoMaterials => "产品未定义原材料需求",
        }
    }
}

impl fmt::Display for NotEvaluableReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}
