// ==========================================
// 制造库存系统 - 可生产性引擎
// ==========================================
// 职责: 基于库存快照计算生产建议、单品可行性与模拟生产
// 输入: InventorySnapshot（一次读事务取回）
// 输出: ProductionSuggestion / ProductEvaluation / SimulationOutcome
// 红线: 纯计算，无状态、无副作用、不访问存储
// ==========================================

use crate::domain::product::Product;
use crate::domain::product_material::ProductMaterial;
use crate::domain::production::{
    ProductEvaluation, ProductFeasibility, ProductSummary, ProductionSimulation,
    ProductionSuggestion, SimulationMaterialDetail, SimulationOutcome, SuggestionMaterialDetail,
};
use crate::domain::raw_material::RawMaterial;
use crate::domain::snapshot::InventorySnapshot;
use crate::domain::types::NotEvaluableReason;
use rust_decimal::Decimal;
use std::collections::HashMap;


/// 原材料 id → 原材料
type StockIndex<'a> = HashMap<i64, &'a RawMaterial>;

// ==========================================
// FeasibilityEngine - 可生产性引擎
// ==========================================
pub struct FeasibilityEngine {
    // 无状态引擎,不需要注入依赖
}

impl FeasibilityEngine {
    pub fn new() -> Self {
        Self {}
    }

    // ==========================================
    // 单品判定
    // ==========================================

    /// 判定单个产品的最大可生产量
    ///
    /// # 规则
    /// 1. 无物料需求 → NoMaterials
    /// 2. 任一材料不在库存中，或 available < required → Blocked（首个即停止）
    /// 3. 否则 max_quantity = min(available / required)
    pub fn evaluate_product(
        &self,
        requirements: &[&ProductMaterial],
        stock: &StockIndex<'_>,
    ) -> ProductFeasibility {
        if requirements.is_empty() {
            return ProductFeasibility::NoMaterials;
        }

        let mut max_quantity: Option<i64> = None;

        for pm in requirements {
            let material = stock.get(&pm.raw_material_id).copied();
            let available = material.map(|m| m.quantity);

            match available {
                // 需求量非正属于数据异常，按阻断处理
                Some(available) if pm.required_quantity > 0 && available >= pm.required_quantity => {
                    let cap = available / pm.required_quantity;
                    max_quantity = Some(max_quantity.map_or(cap, |q| q.min(cap)));
                }
                _ => {
                    return ProductFeasibility::Blocked {
                        raw_material_id: pm.raw_material_id,
                        raw_material_name: material.map(|m| m.name.clone()),
                        required_quantity: pm.required_quantity,
                        available,
                    };
                }
            }
        }

        match max_quantity {
            Some(q) if q > 0 => ProductFeasibility::Producible { max_quantity: q },
            // 没有任何材料参与约束，视为不可生产而非无限
            _ => ProductFeasibility::NoMaterials,
        }
    }

    /// 对快照中所有产品逐一判定（保持快照顺序）
    pub fn evaluate_all(&self, snapshot: &InventorySnapshot) -> Vec<ProductEvaluation> {
        let stock = snapshot.stock_index();
        let requirements = snapshot.requirements_index();

        snapshot
            .products
            .iter()
            .map(|product| ProductEvaluation {
                product: ProductSummary::from(product),
                feasibility: self.evaluate_product(requirements_of(&requirements, product.id), &stock),
            })
            .collect()
    }

    // ==========================================
    // 生产建议
    // ==========================================

    /// 计算生产建议
    ///
    /// 只保留可生产的产品，按 total_value 降序；
    /// 同值保持快照顺序（产品按 id 升序读取）。
    pub fn compute_suggestions(&self, snapshot: &InventorySnapshot) -> Vec<ProductionSuggestion> {
        let stock = snapshot.stock_index();
        let requirements = snapshot.requirements_index();

        let mut suggestions = Vec::new();
        for product in &snapshot.products {
            let reqs = requirements_of(&requirements, product.id);
            match self.evaluate_product(reqs, &stock) {
                ProductFeasibility::Producible { max_quantity } => {
                    suggestions.push(build_suggestion(product, reqs, &stock, max_quantity));
                }
                other => {
                    tracing::debug!(
                        product_id = product.id,
                        reason = %other.reason(),
                        "产品不可生产，跳过"
                    );
                }
            }
        }

        // sort_by 为稳定排序
        suggestions.sort_by(|a, b| b.total_value.cmp(&a.total_value));
        suggestions
    }

    // ==========================================
    // 模拟生产
    // ==========================================

    /// 模拟生产 quantity 件产品（dry-run）
    ///
    /// # 说明
    /// - quantity 的正数校验由 API 边界负责
    /// - 产品不存在或无物料需求 → NotEvaluable（结果值，不是错误）
    /// - 逐材料明细无论是否可行都完整返回
    pub fn simulate_production(
        &self,
        snapshot: &InventorySnapshot,
        product_id: i64,
        quantity: i64,
    ) -> SimulationOutcome {
        let Some(product) = snapshot.find_product(product_id) else {
            return SimulationOutcome::not_evaluable(product_id, NotEvaluableReason::ProductNotFound);
        };

        let requirements = snapshot.requirements_for(product_id);
        if requirements.is_empty() {
            return SimulationOutcome::not_evaluable(product_id, NotEvaluableReason::NoMaterials);
        }

        let stock = snapshot.stock_index();
        let materials: Vec<SimulationMaterialDetail> = requirements
            .iter()
            .map(|pm| {
                let material = stock.get(&pm.raw_material_id).copied();
                let available = material.map(|m| m.quantity);
                // 溢出即视为不足
                let required_total = pm.required_quantity.saturating_mul(quantity);

                SimulationMaterialDetail {
                    material_id: pm.raw_material_id,
                    material_name: material.map(|m| m.name.clone()),
                    required_per_unit: pm.required_quantity,
                    required_total,
                    available,
                    sufficient: available.map_or(false, |a| a >= required_total),
                }
            })
            .collect();

        let can_produce = materials.iter().all(|m| m.sufficient);

        SimulationOutcome::Evaluated(ProductionSimulation {
            product_id: product.id,
            product_name: product.name.clone(),
            quantity,
            unit_value: product.value,
            total_value: total_value_of(product, quantity),
            can_produce,
            materials,
        })
    }
}

/// value × quantity，溢出时饱和到 Decimal::MAX
fn total_value_of(product: &Product, quantity: i64) -> Decimal {
    product
        .value
        .checked_mul(Decimal::from(quantity))
        .unwrap_or_else(|| {
            tracing::warn!(
                product_id = product.id,
                value = %product.value,
                quantity,
                "总价值溢出，按 Decimal::MAX 计"
            );
            Decimal::MAX
        })
}

impl Default for FeasibilityEngine {
    fn default() -> Self {
        Self::new()
    }
}

// ==========================================
// 内部辅助
// ==========================================

fn requirements_of<'a, 'b>(
    index: &'b HashMap<i64, Vec<&'a ProductMaterial>>,
    product_id: i64,
) -> &'b [&'a ProductMaterial] {
    index.get(&product_id).map(Vec::as_slice).unwrap_or(&[])
}

fn build_suggestion(
    product: &Product,
    requirements: &[&ProductMaterial],
    stock: &StockIndex<'_>,
    max_quantity: i64,
) -> ProductionSuggestion {
    let material_details = requirements
        .iter()
        .filter_map(|pm| {
            stock.get(&pm.raw_material_id).map(|m| SuggestionMaterialDetail {
                raw_material_id: m.id,
                raw_material_name: m.name.clone(),
                required_quantity: pm.required_quantity,
                available: m.quantity,
            })
        })
        .collect();

    ProductionSuggestion {
        product: ProductSummary::from(product),
        max_quantity,
        total_value: total_value_of(product, max_quantity),
        material_details,
    }
}
