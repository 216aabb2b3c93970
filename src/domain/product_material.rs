// ==========================================
// 制造库存系统 - 物料清单关联
// ==========================================
// 对齐: scripts/schema.sql product_materials 表
// 约束: 每对 (product_id, raw_material_id) 至多一条, required_quantity > 0
// ==========================================

use serde::{Deserialize, Serialize};

/// 产品-原材料关联
///
/// 按主键引用两端，不持有 Product / RawMaterial 本体。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductMaterial {
    pub id: i64,
    pub product_id: i64,
    pub raw_material_id: i64,
    pub required_quantity: i64, // 每件产品所需原材料单位数
}
