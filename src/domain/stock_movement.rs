// ==========================================
// 制造库存系统 - 库存变动流水
// ==========================================
// 用途: 审计追踪，与库存调整在同一事务内写入
// 对齐: scripts/schema.sql stock_movement 表
// ==========================================

use crate::domain::types::MovementDirection;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockMovement {
    pub movement_id: String,         // UUID v4
    pub raw_material_id: i64,        // 原材料ID
    pub delta: i64,                  // 变动量 (可为负)
    pub quantity_before: i64,        // 调整前库存
    pub quantity_after: i64,         // 调整后库存
    pub actor: String,               // 操作人
    pub reason: Option<String>,      // 调整原因
    pub movement_ts: NaiveDateTime,  // 发生时间
}

impl StockMovement {
    pub fn direction(&self) -> MovementDirection {
        MovementDirection::from_delta(self.delta)
    }
}

/// 流水草稿：调整前尚不知道前后数量，由仓储在事务内补全
#[derive(Debug, Clone, PartialEq)]
pub struct StockMovementDraft {
    pub movement_id: String,
    pub actor: String,
    pub reason: Option<String>,
    pub movement_ts: NaiveDateTime,
}

impl StockMovementDraft {
    /// # 参数
    /// - `movement_id`: 流水ID (通常使用UUID)
    /// - `actor`: 操作人
    /// - `reason`: 调整原因
    ///
    /// 时间取本地当前时间
    pub fn new(movement_id: String, actor: impl Into<String>, reason: Option<String>) -> Self {
        Self {
            movement_id,
            actor: actor.into(),
            reason,
            movement_ts: chrono::Local::now().naive_local(),
        }
    }

    pub fn into_movement(
        self,
        raw_material_id: i64,
        delta: i64,
        quantity_before: i64,
        quantity_after: i64,
    ) -> StockMovement {
        StockMovement {
            movement_id: self.movement_id,
            raw_material_id,
            delta,
            quantity_before,
            quantity_after,
            actor: self.actor,
            reason: self.reason,
            movement_ts: self.movement_ts,
        }
    }
}
