// ==========================================
// 制造库存系统 - 可生产性计算结果模型
// ==========================================
// 用途: FeasibilityEngine 输出格式
// ==========================================

use crate::domain::product::Product;
use crate::domain::types::NotEvaluableReason;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

// ==========================================
// ProductSummary - 产品摘要
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductSummary {
    pub id: i64,
    pub code: String,
    pub name: String,
    pub value: Decimal,
}

impl From<&Product> for ProductSummary {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id,
            code: product.code.clone(),
            name: product.name.clone(),
            value: product.value,
        }
    }
}

// ==========================================
// 生产建议
// ==========================================

/// 建议中的逐材料明细
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuggestionMaterialDetail {
    pub raw_material_id: i64,
    pub raw_material_name: String,
    pub required_quantity: i64, // 单件需求
    pub available: i64,         // 当前在库
}

/// 生产建议
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductionSuggestion {
    pub product: ProductSummary,
    pub max_quantity: i64,     // 最大可生产件数
    pub total_value: Decimal,  // value × max_quantity
    pub material_details: Vec<SuggestionMaterialDetail>,
}

// ==========================================
// 单品可行性评估
// ==========================================

/// 单个产品的可生产性判定
///
/// Blocked 只记录首个阻断材料；完整的逐材料对比见模拟生产。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProductFeasibility {
    /// 未定义物料清单
    NoMaterials,
    /// 某材料缺失或不足一件所需
    Blocked {
        raw_material_id: i64,
        raw_material_name: Option<String>, // 材料不在快照中时为 None
        required_quantity: i64,
        available: Option<i64>,
    },
    /// 可生产
    Producible { max_quantity: i64 },
}

impl ProductFeasibility {
    pub fn is_producible(&self) -> bool {
        matches!(self, ProductFeasibility::Producible { .. })
    }

    /// 面向用户的原因说明
    pub fn reason(&self) -> String {
        match self {
            ProductFeasibility::NoMaterials => "NO_MATERIALS: 未定义原材料需求".to_string(),
            ProductFeasibility::Blocked {
                raw_material_id,
                required_quantity,
                available,
                ..
            } => match available {
                Some(available) => format!(
                    "BLOCKED: raw_material_id={} required={} available={}",
                    raw_material_id, required_quantity, available
                ),
                None => format!(
                    "BLOCKED: raw_material_id={} 不在库存中",
                    raw_material_id
                ),
            },
            ProductFeasibility::Producible { max_quantity } => {
                format!("PRODUCIBLE: max_quantity={}", max_quantity)
            }
        }
    }
}

/// 评估结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductEvaluation {
    pub product: ProductSummary,
    pub feasibility: ProductFeasibility,
}

// ==========================================
// 模拟生产
// ==========================================

/// 模拟中的逐材料明细
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationMaterialDetail {
    pub material_id: i64,
    pub material_name: Option<String>,
    pub required_per_unit: i64,
    pub required_total: i64,
    pub available: Option<i64>,
    pub sufficient: bool,
}

/// 模拟生产结果（dry-run，不扣减库存）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductionSimulation {
    pub product_id: i64,
    pub product_name: String,
    pub quantity: i64,
    pub unit_value: Decimal,
    pub total_value: Decimal, // unit_value × quantity，与可行性无关
    pub can_produce: bool,
    pub materials: Vec<SimulationMaterialDetail>,
}

impl ProductionSimulation {
    /// 不足的材料
    pub fn shortages(&self) -> impl Iterator<Item = &SimulationMaterialDetail> {
        self.materials.iter().filter(|m| !m.sufficient)
    }
}

/// 模拟生产输出
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SimulationOutcome {
    /// 无法评估（产品不存在或无物料清单）
    NotEvaluable {
        product_id: i64,
        reason: NotEvaluableReason,
        message: String,
    },
    /// 已评估
    Evaluated(ProductionSimulation),
}

impl SimulationOutcome {
    pub fn not_evaluable(product_id: i64, reason: NotEvaluableReason) -> Self {
        SimulationOutcome::NotEvaluable {
            product_id,
            reason,
            message: reason.message().to_string(),
        }
    }

    /// 是否可行（无法评估视为不可行）
    pub fn is_feasible(&self) -> bool {
        match self {
            SimulationOutcome::Evaluated(sim) => sim.can_produce,
            SimulationOutcome::NotEvaluable { .. } => false,
        }
    }

    pub fn simulation(&self) -> Option<&ProductionSimulation> {
        match self {
            SimulationOutcome::Evaluated(sim) => Some(sim),
            SimulationOutcome::NotEvaluable { .. } => None,
        }
    }
}
