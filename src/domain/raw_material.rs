// ==========================================
// 制造库存系统 - 原材料领域模型
// ==========================================
// 对齐: scripts/schema.sql raw_materials 表
// ==========================================

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

// ==========================================
// RawMaterial - 原材料
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawMaterial {
    pub id: i64,             // 自增主键
    pub code: String,        // 原材料编码 (唯一)
    pub name: String,        // 原材料名称
    pub unit: String,        // 计量单位标签 (不做换算)
    pub quantity: i64,       // 在库数量 (≥0)
    pub unit_price: Decimal, // 单价
}

impl RawMaterial {
    /// 库存是否足以覆盖 required 单位
    pub fn has_stock_for(&self, required: i64) -> bool {
        self.quantity >= required
    }
}

// ==========================================
// RawMaterialInput - 原材料创建/更新载荷
// ==========================================
// unit 为空时取配置 material.default_unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawMaterialInput {
    pub code: String,
    pub name: String,
    pub unit: Option<String>,
    pub quantity: i64,
    pub unit_price: Decimal,
}

impl RawMaterialInput {
    pub fn new(
        code: impl Into<String>,
        name: impl Into<String>,
        quantity: i64,
        unit_price: Decimal,
    ) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            unit: None,
            quantity,
            unit_price,
        }
    }

    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = Some(unit.into());
        self
    }
}
