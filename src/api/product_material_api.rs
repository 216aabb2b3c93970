// ==========================================
// 制造库存系统 - 物料清单 API
// ==========================================
// 职责: 产品与原材料的需求量关联维护
// ==========================================

use std::sync::Arc;

use crate::api::error::{ApiError, ApiResult};
use crate::api::validator::validate_positive_quantity;
use crate::domain::product_material::ProductMaterial;
use crate::repository::product_material_repo::ProductMaterialRepository;
use crate::repository::product_repo::ProductRepository;
use crate::repository::raw_material_repo::RawMaterialRepository;

pub struct ProductMaterialApi {
    product_repo: Arc<ProductRepository>,
    raw_material_repo: Arc<RawMaterialRepository>,
    product_material_repo: Arc<ProductMaterialRepository>,
}

impl ProductMaterialApi {
    pub fn new(
        product_repo: Arc<ProductRepository>,
        raw_material_repo: Arc<RawMaterialRepository>,
        product_material_repo: Arc<ProductMaterialRepository>,
    ) -> Self {
        Self {
            product_repo,
            raw_material_repo,
            product_material_repo,
        }
    }

    /// 查询产品的物料清单
    ///
    /// # 返回
    /// - Ok(Vec): 可能为空（产品未定义物料）
    /// - Err(ApiError::NotFound): 产品不存在
    pub fn list_materials_for_product(&self, product_id: i64) -> ApiResult<Vec<ProductMaterial>> {
        self.ensure_product_exists(product_id)?;
        Ok(self.product_material_repo.list_by_product(product_id)?)
    }

    pub fn find_association(
        &self,
        product_id: i64,
        raw_material_id: i64,
    ) -> ApiResult<Option<ProductMaterial>> {
        Ok(self
            .product_material_repo
            .find_association(product_id, raw_material_id)?)
    }

    /// 新增或更新需求量
    ///
    /// # 校验
    /// - required_quantity > 0（InvalidQuantity）
    /// - 产品、原材料均存在（NotFound）
    pub fn upsert_association(
        &self,
        product_id: i64,
        raw_material_id: i64,
        required_quantity: i64,
    ) -> ApiResult<ProductMaterial> {
        let required_quantity = validate_positive_quantity("required_quantity", required_quantity)?;
        self.ensure_product_exists(product_id)?;
        if self.raw_material_repo.find_by_id(raw_material_id)?.is_none() {
            return Err(ApiError::NotFound(format!(
                "原材料(id={})不存在",
                raw_material_id
            )));
        }

        let association =
            self.product_material_repo
                .upsert(product_id, raw_material_id, required_quantity)?;
        tracing::info!(
            product_id,
            raw_material_id,
            required_quantity,
            "物料需求已写入"
        );
        Ok(association)
    }

    pub fn delete_association(&self, product_id: i64, raw_material_id: i64) -> ApiResult<()> {
        self.product_material_repo
            .delete_association(product_id, raw_material_id)?;
        tracing::info!(product_id, raw_material_id, "物料需求已删除");
        Ok(())
    }

    fn ensure_product_exists(&self, product_id: i64) -> ApiResult<()> {
        if !self.product_repo.exists(product_id)? {
            return Err(ApiError::NotFound(format!("产品(id={})不存在", product_id)));
        }
        Ok(())
    }
}
