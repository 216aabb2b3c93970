// ==========================================
// 制造库存系统 - 生产计算 API
// ==========================================
// 职责: 生产建议、模拟生产、阻断产品查询
// 依赖: SnapshotSource（读） + FeasibilityEngine（算）
// ==========================================

use std::sync::Arc;

use crate::api::error::{ApiError, ApiResult};
use crate::api::validator::validate_positive_quantity;
use crate::config::InventoryConfigReader;
use crate::domain::production::{ProductEvaluation, ProductionSuggestion, SimulationOutcome};
use crate::domain::snapshot::InventorySnapshot;
use crate::engine::{FeasibilityEngine, SnapshotSource};

// ==========================================
// ProductionApi - 生产计算 API
// ==========================================

/// 生产计算API
///
/// 每次调用读取一次库存快照并一次算完，调用之间不保留状态。
///
/// # 并发限制
/// 快照读取之后、结果返回之前，若有其他写入方修改了库存，返回结果可能基于过期视图。
/// 系统不对库存加锁也不做版本校验，调用方如需执行生产应在扣减库存时重新确认。
pub struct ProductionApi {
    snapshot_source: Arc<dyn SnapshotSource>,
    engine: FeasibilityEngine,
    config: Arc<dyn InventoryConfigReader>,
}

impl ProductionApi {
    pub fn new(
        snapshot_source: Arc<dyn SnapshotSource>,
        config: Arc<dyn InventoryConfigReader>,
    ) -> Self {
        Self {
            snapshot_source,
            engine: FeasibilityEngine::new(),
            config,
        }
    }

    /// 生产建议
    ///
    /// 只包含可生产的产品，按总价值降序。
    /// 配置 production.suggestion_limit > 0 时截断到该条数。
    pub fn get_suggestions(&self) -> ApiResult<Vec<ProductionSuggestion>> {
        let snapshot = self.load_snapshot()?;
        let mut suggestions = self.engine.compute_suggestions(&snapshot);

        let limit = self
            .config
            .get_suggestion_limit()
            .map_err(|e| ApiError::InternalError(format!("读取建议条数上限失败: {}", e)))?;
        if limit > 0 && suggestions.len() > limit {
            suggestions.truncate(limit);
        }

        tracing::info!(
            products = snapshot.products.len(),
            suggestions = suggestions.len(),
            "生产建议计算完成"
        );
        Ok(suggestions)
    }

    /// 模拟生产
    ///
    /// # 返回
    /// - Ok(SimulationOutcome::Evaluated): 含逐材料明细，can_produce 标记可行性
    /// - Ok(SimulationOutcome::NotEvaluable): 产品不存在或未定义物料
    /// - Err(ApiError::InvalidQuantity): quantity <= 0，不读取快照
    pub fn simulate_production(&self, product_id: i64, quantity: i64) -> ApiResult<SimulationOutcome> {
        let quantity = validate_positive_quantity("quantity", quantity)?;
        let snapshot = self.load_snapshot()?;
        let outcome = self.engine.simulate_production(&snapshot, product_id, quantity);

        tracing::info!(
            product_id,
            quantity,
            feasible = outcome.is_feasible(),
            "模拟生产完成"
        );
        Ok(outcome)
    }

    /// 不可生产的产品（未定义物料或被某材料阻断）
    pub fn list_blocked_products(&self) -> ApiResult<Vec<ProductEvaluation>> {
        let snapshot = self.load_snapshot()?;
        Ok(self
            .engine
            .evaluate_all(&snapshot)
            .into_iter()
            .filter(|e| !e.feasibility.is_producible())
            .collect())
    }

    fn load_snapshot(&self) -> ApiResult<InventorySnapshot> {
        self.snapshot_source.load_snapshot().map_err(|e| {
            tracing::error!(error = %e, "读取库存快照失败");
            ApiError::from(e)
        })
    }
}
