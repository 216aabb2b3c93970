// ==========================================
// 制造库存系统 - 原材料 API
// ==========================================
// 职责: 原材料查询、维护、库存调整与流水查询
// ==========================================

use std::sync::Arc;

use crate::api::error::{ApiError, ApiResult};
use crate::api::validator::{normalize_raw_material_input, validate_text};
use crate::config::InventoryConfigReader;
use crate::domain::raw_material::{RawMaterial, RawMaterialInput};
use crate::domain::stock_movement::{StockMovement, StockMovementDraft};
use crate::repository::product_material_repo::ProductMaterialRepository;
use crate::repository::raw_material_repo::RawMaterialRepository;
use crate::repository::stock_movement_repo::StockMovementRepository;

// ==========================================
// RawMaterialApi - 原材料 API
// ==========================================

/// 原材料API
///
/// 职责：
/// 1. 原材料查询（列表、按ID、按编码）
/// 2. 原材料维护（创建、更新、删除）
/// 3. 库存调整（不得低于 0）+ 流水记录
pub struct RawMaterialApi {
    raw_material_repo: Arc<RawMaterialRepository>,
    product_material_repo: Arc<ProductMaterialRepository>,
    stock_movement_repo: Arc<StockMovementRepository>,
    config: Arc<dyn InventoryConfigReader>,
}

impl RawMaterialApi {
    pub fn new(
        raw_material_repo: Arc<RawMaterialRepository>,
        product_material_repo: Arc<ProductMaterialRepository>,
        stock_movement_repo: Arc<StockMovementRepository>,
        config: Arc<dyn InventoryConfigReader>,
    ) -> Self {
        Self {
            raw_material_repo,
            product_material_repo,
            stock_movement_repo,
            config,
        }
    }

    pub fn list_raw_materials(&self) -> ApiResult<Vec<RawMaterial>> {
        Ok(self.raw_material_repo.list_all()?)
    }

    /// 按ID查询原材料
    ///
    /// # 返回
    /// - Err(ApiError::NotFound): 原材料不存在
    pub fn get_raw_material(&self, id: i64) -> ApiResult<RawMaterial> {
        self.raw_material_repo
            .find_by_id(id)?
            .ok_or_else(|| ApiError::NotFound(format!("原材料(id={})不存在", id)))
    }

    pub fn find_raw_material_by_code(&self, code: &str) -> ApiResult<Option<RawMaterial>> {
        let code = code.trim();
        if code.is_empty() {
            return Err(ApiError::InvalidInput("原材料编码不能为空".to_string()));
        }
        Ok(self.raw_material_repo.find_by_code(code)?)
    }

    /// 创建原材料
    ///
    /// unit 为空时使用配置 material.default_unit
    pub fn create_raw_material(&self, input: RawMaterialInput) -> ApiResult<RawMaterial> {
        let input = normalize_raw_material_input(&input, &self.default_unit()?)?;

        if self.raw_material_repo.find_by_code(&input.code)?.is_some() {
            return Err(ApiError::DuplicateCode {
                entity: "RawMaterial".to_string(),
                code: input.code,
            });
        }

        let material = self.raw_material_repo.insert(&input)?;
        tracing::info!(raw_material_id = material.id, code = %material.code, "原材料已创建");
        Ok(material)
    }

    /// 更新原材料（含在库数量的直接覆盖）
    pub fn update_raw_material(&self, id: i64, input: RawMaterialInput) -> ApiResult<RawMaterial> {
        let input = normalize_raw_material_input(&input, &self.default_unit()?)?;

        if let Some(existing) = self.raw_material_repo.find_by_code(&input.code)? {
            if existing.id != id {
                return Err(ApiError::DuplicateCode {
                    entity: "RawMaterial".to_string(),
                    code: input.code,
                });
            }
        }

        let material = self.raw_material_repo.update(id, &input)?;
        tracing::info!(raw_material_id = id, "原材料已更新");
        Ok(material)
    }

    /// 删除原材料
    ///
    /// 仍被物料清单引用时拒绝（BusinessRuleViolation，列出引用它的产品ID）
    pub fn delete_raw_material(&self, id: i64) -> ApiResult<()> {
        let references = self.product_material_repo.list_by_raw_material(id)?;
        if !references.is_empty() {
            let product_ids: Vec<String> =
                references.iter().map(|pm| pm.product_id.to_string()).collect();
            return Err(ApiError::BusinessRuleViolation(format!(
                "原材料(id={})仍被产品引用: [{}]",
                id,
                product_ids.join(", ")
            )));
        }

        self.raw_material_repo.delete(id)?;
        tracing::info!(raw_material_id = id, "原材料已删除");
        Ok(())
    }

    /// 调整库存
    ///
    /// # 参数
    /// - id: 原材料ID
    /// - delta: 变动量（可为负）
    /// - actor: 操作人
    /// - reason: 调整原因（可选）
    ///
    /// # 返回
    /// - Ok(RawMaterial): 调整后的原材料
    /// - Err(ApiError::InsufficientStock): 结果将低于 0，库存不变，不写流水
    /// - Err(ApiError::NotFound): 原材料不存在
    ///
    /// 库存更新与流水写入在同一事务内，任一失败都不生效
    pub fn adjust_stock(
        &self,
        id: i64,
        delta: i64,
        actor: &str,
        reason: Option<&str>,
    ) -> ApiResult<RawMaterial> {
        let actor = validate_text("操作人", actor, None)?;
        if delta == 0 {
            return Err(ApiError::InvalidInput("库存变动量不能为0".to_string()));
        }

        let reason = reason
            .map(str::trim)
            .filter(|r| !r.is_empty())
            .map(str::to_string);
        let draft = StockMovementDraft::new(uuid::Uuid::new_v4().to_string(), actor, reason);

        let adjustment = self.raw_material_repo.adjust_stock(id, delta, draft)?;

        tracing::info!(
            raw_material_id = id,
            movement_id = %adjustment.movement.movement_id,
            delta = delta,
            direction = %adjustment.movement.direction(),
            quantity_before = adjustment.quantity_before,
            quantity_after = adjustment.material.quantity,
            "库存已调整"
        );

        Ok(adjustment.material)
    }

    /// 查询原材料的库存流水（最新在前）
    pub fn list_stock_movements(&self, id: i64) -> ApiResult<Vec<StockMovement>> {
        // 确认原材料存在
        self.get_raw_material(id)?;
        Ok(self.stock_movement_repo.list_by_raw_material(id)?)
    }

    /// 全部原材料的最近 limit 条流水（最新在前）
    pub fn list_recent_movements(&self, limit: usize) -> ApiResult<Vec<StockMovement>> {
        if limit == 0 {
            return Err(ApiError::InvalidInput("limit 必须大于0".to_string()));
        }
        Ok(self.stock_movement_repo.list_recent(limit)?)
    }

    /// 库存是否足以覆盖 required 单位（原材料不存在视为不足）
    pub fn check_stock_availability(&self, id: i64, required: i64) -> ApiResult<bool> {
        Ok(self
            .raw_material_repo
            .find_by_id(id)?
            .map(|m| m.has_stock_for(required))
            .unwrap_or(false))
    }

    fn default_unit(&self) -> ApiResult<String> {
        self.config
            .get_default_material_unit()
            .map_err(|e| ApiError::InternalError(format!("读取默认计量单位失败: {}", e)))
    }
}
