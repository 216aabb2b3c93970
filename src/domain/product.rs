// ==========================================
// 制造库存系统 - 产品领域模型
// ==========================================
// 对齐: scripts/schema.sql products 表
// ==========================================

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

// ==========================================
// Product - 产品
// ==========================================
// 物料需求由 ProductMaterial 按 product_id 引用，本结构不持有反向列表
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,        // 自增主键
    pub code: String,   // 产品编码 (唯一, ≤50)
    pub name: String,   // 产品名称 (≤100)
    pub value: Decimal, // 单价 (两位小数)
}

// ==========================================
// ProductInput - 产品创建/更新载荷
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductInput {
    pub code: String,
    pub name: String,
    pub value: Decimal,
}

impl ProductInput {
    pub fn new(code: impl Into<String>, name: impl Into<String>, value: Decimal) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            value,
        }
    }
}

/// 产品编码最大长度
pub const PRODUCT_CODE_MAX_LEN: usize = 50;

/// 产品名称最大长度
pub const PRODUCT_NAME_MAX_LEN: usize = 100;
