// ==========================================
// 制造库存系统 - 产品 API
// ==========================================
// 职责: 产品查询、创建、更新、删除
// ==========================================

use std::sync::Arc;

use crate::api::error::{ApiError, ApiResult};
use crate::api::validator::normalize_product_input;
use crate::domain::product::{Product, ProductInput};
use crate::repository::product_repo::ProductRepository;

// ==========================================
// ProductApi - 产品 API
// ==========================================

/// 产品API
///
/// 职责：
/// 1. 产品查询（列表、按ID、按编码）
/// 2. 产品维护（创建、更新、删除），编码唯一性预检
pub struct ProductApi {
    product_repo: Arc<ProductRepository>,
}

impl ProductApi {
    pub fn new(product_repo: Arc<ProductRepository>) -> Self {
        Self { product_repo }
    }

    /// 查询全部产品
    pub fn list_products(&self) -> ApiResult<Vec<Product>> {
        Ok(self.product_repo.list_all()?)
    }

    /// 按ID查询产品
    ///
    /// # 返回
    /// - Ok(Product)
    /// - Err(ApiError::NotFound): 产品不存在
    pub fn get_product(&self, id: i64) -> ApiResult<Product> {
        self.product_repo
            .find_by_id(id)?
            .ok_or_else(|| ApiError::NotFound(format!("产品(id={})不存在", id)))
    }

    /// 按编码查询产品
    pub fn find_product_by_code(&self, code: &str) -> ApiResult<Option<Product>> {
        let code = code.trim();
        if code.is_empty() {
            return Err(ApiError::InvalidInput("产品编码不能为空".to_string()));
        }
        Ok(self.product_repo.find_by_code(code)?)
    }

    /// 创建产品
    ///
    /// # 返回
    /// - Ok(Product): 带主键的新产品
    /// - Err(ApiError::DuplicateCode): 编码已被占用
    pub fn create_product(&self, input: ProductInput) -> ApiResult<Product> {
        let input = normalize_product_input(&input)?;

        if self.product_repo.find_by_code(&input.code)?.is_some() {
            return Err(ApiError::DuplicateCode {
                entity: "Product".to_string(),
                code: input.code,
            });
        }

        let product = self.product_repo.insert(&input)?;
        tracing::info!(product_id = product.id, code = %product.code, "产品已创建");
        Ok(product)
    }

    /// 更新产品
    pub fn update_product(&self, id: i64, input: ProductInput) -> ApiResult<Product> {
        let input = normalize_product_input(&input)?;

        if let Some(existing) = self.product_repo.find_by_code(&input.code)? {
            if existing.id != id {
                return Err(ApiError::DuplicateCode {
                    entity: "Product".to_string(),
                    code: input.code,
                });
            }
        }

        let product = self.product_repo.update(id, &input)?;
        tracing::info!(product_id = id, "产品已更新");
        Ok(product)
    }

    /// 删除产品（物料清单随之删除）
    pub fn delete_product(&self, id: i64) -> ApiResult<()> {
        self.product_repo.delete(id)?;
        tracing::info!(product_id = id, "产品已删除");
        Ok(())
    }
}
