// ==========================================
// 制造库存系统 - API层错误类型
// ==========================================
// 职责: 定义API层错误类型，转换Repository错误为用户友好的错误消息
// 说明: 库存不足在可行性计算中不是错误，只通过结果标记表达；
//       InsufficientStock 仅用于库存调整被拒绝
// ==========================================

use crate::repository::error::RepositoryError;
use thiserror::Error;

/// API层错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    // ==========================================
    // 输入校验错误
    // ==========================================
    #[error("无效输入: {0}")]
    InvalidInput(String),

    #[error("无效数量: {field}={value}，必须为正整数")]
    InvalidQuantity { field: String, value: i64 },

    // ==========================================
    // 业务规则错误
    // ==========================================
    #[error("资源未找到: {0}")]
    NotFound(String),

    #[error("编码已存在: {entity} code={code}")]
    DuplicateCode { entity: String, code: String },

    #[error("库存不足: raw_material_id={raw_material_id}, 当前={current}, 变动={delta}")]
    InsufficientStock {
        raw_material_id: i64,
        current: i64,
        delta: i64,
    },

    #[error("业务规则违反: {0}")]
    BusinessRuleViolation(String),

    // ==========================================
    // 数据访问错误
    // ==========================================
    #[error("数据库错误: {0}")]
    DatabaseError(String),

    #[error("数据库连接失败: {0}")]
    DatabaseConnectionError(String),

    #[error("数据库事务失败: {0}")]
    DatabaseTransactionError(String),

    // ==========================================
    // 通用错误
    // ==========================================
    #[error("内部错误: {0}")]
    InternalError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ApiError {
    /// 是否为"未找到"类错误（调用方可据此返回结构化缺失）
    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::NotFound(_))
    }
}

// ==========================================
// 从 RepositoryError 转换
// 目的: 将Repository层的技术错误转换为用户友好的业务错误
// ==========================================
impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound { entity, id } => {
                ApiError::NotFound(format!("{}(id={})不存在", entity, id))
            }
            RepositoryError::DatabaseConnectionError(msg) => ApiError::DatabaseConnectionError(msg),
            RepositoryError::DatabaseTransactionError(msg) => {
                ApiError::DatabaseTransactionError(msg)
            }
            RepositoryError::LockError(msg) => {
                ApiError::DatabaseConnectionError(format!("数据库锁获取失败: {}", msg))
            }
            RepositoryError::DatabaseQueryError(msg) => ApiError::DatabaseError(msg),
            RepositoryError::UniqueConstraintViolation(msg) => {
                ApiError::BusinessRuleViolation(format!("唯一约束违反: {}", msg))
            }
            RepositoryError::ForeignKeyViolation(msg) => {
                ApiError::BusinessRuleViolation(format!("外键约束违反（记录仍被引用或引用不存在）: {}", msg))
            }
            RepositoryError::CheckConstraintViolation(msg) => {
                ApiError::InvalidInput(format!("检查约束违反: {}", msg))
            }
            RepositoryError::NegativeStock {
                raw_material_id,
                current,
                delta,
            } => ApiError::InsufficientStock {
                raw_material_id,
                current,
                delta,
            },
            RepositoryError::FieldValueError { field, message } => {
                ApiError::InvalidInput(format!("字段{}错误: {}", field, message))
            }
            RepositoryError::Other(err) => ApiError::Other(err),
        }
    }
}

/// Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repository_error_conversion() {
        // NotFound错误转换
        let repo_err = RepositoryError::NotFound {
            entity: "Product".to_string(),
            id: "7".to_string(),
        };
        let api_err: ApiError = repo_err.into();
        assert!(api_err.is_not_found());
        match api_err {
            ApiError::NotFound(msg) => {
                assert!(msg.contains("Product"));
                assert!(msg.contains("7"));
            }
            _ => panic!("Expected NotFound"),
        }

        // NegativeStock转换
        let repo_err = RepositoryError::NegativeStock {
            raw_material_id: 3,
            current: 2,
            delta: -5,
        };
        let api_err: ApiError = repo_err.into();
        match api_err {
            ApiError::InsufficientStock {
                raw_material_id,
                current,
                delta,
            } => {
                assert_eq!(raw_material_id, 3);
                assert_eq!(current, 2);
                assert_eq!(delta, -5);
            }
            _ => panic!("Expected InsufficientStock"),
        }
    }

    #[test]
    fn test_storage_failure_is_distinct_error() {
        let api_err: ApiError = RepositoryError::LockError("poisoned".to_string()).into();
        assert!(matches!(api_err, ApiError::DatabaseConnectionError(_)));

        let api_err: ApiError = RepositoryError::DatabaseQueryError("disk I/O".to_string()).into();
        assert!(matches!(api_err, ApiError::DatabaseError(_)));
    }
}
