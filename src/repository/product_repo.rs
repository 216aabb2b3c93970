// ==========================================
// 制造库存系统 - 产品数据仓储
// ==========================================
// 红线: Repository 不含业务逻辑
// ==========================================

use crate::domain::product::{Product, ProductInput};
use crate::repository::codec::{read_decimal, write_decimal};
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::{params, Connection, OptionalExtension, Result as SqliteResult, Row};
use std::sync::{Arc, Mutex};

const SELECT_COLUMNS: &str = "SELECT id, code, name, value FROM products";

/// 行映射（供快照仓储复用）
pub(crate) fn map_product_row(row: &Row<'_>) -> SqliteResult<Product> {
    Ok(Product {
        id: row.get(0)?,
        code: row.get(1)?,
        name: row.get(2)?,
        value: read_decimal(row, 3)?,
    })
}

/// 查询全部产品（按 id 升序）
pub(crate) fn query_all_products(conn: &Connection) -> SqliteResult<Vec<Product>> {
    let mut stmt = conn.prepare(&format!("{} ORDER BY id ASC", SELECT_COLUMNS))?;
    let products = stmt
        .query_map([], map_product_row)?
        .collect::<SqliteResult<Vec<_>>>()?;
    Ok(products)
}

// ==========================================
// ProductRepository - 产品仓储
// ==========================================
/// 产品仓储
/// 职责: 管理 products 表的 CRUD 操作
pub struct ProductRepository {
    conn: Arc<Mutex<Connection>>,
}

impl ProductRepository {
    /// 从已有连接创建仓储实例
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    /// 获取数据库连接
    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// 查询全部产品
    pub fn list_all(&self) -> RepositoryResult<Vec<Product>> {
        let conn = self.get_conn()?;
        Ok(query_all_products(&conn)?)
    }

    /// 按主键查询
    ///
    /// # 返回
    /// - Ok(Some(Product)): 找到
    /// - Ok(None): 未找到
    /// - Err: 数据库错误
    pub fn find_by_id(&self, id: i64) -> RepositoryResult<Option<Product>> {
        let conn = self.get_conn()?;
        let product = conn
            .query_row(
                &format!("{} WHERE id = ?1", SELECT_COLUMNS),
                params![id],
                map_product_row,
            )
            .optional()?;
        Ok(product)
    }

    /// 按产品编码查询
    pub fn find_by_code(&self, code: &str) -> RepositoryResult<Option<Product>> {
        let conn = self.get_conn()?;
        let product = conn
            .query_row(
                &format!("{} WHERE code = ?1", SELECT_COLUMNS),
                params![code],
                map_product_row,
            )
            .optional()?;
        Ok(product)
    }

    pub fn exists(&self, id: i64) -> RepositoryResult<bool> {
        let conn = self.get_conn()?;
        let found = conn
            .query_row("SELECT 1 FROM products WHERE id = ?1", params![id], |_| {
                Ok(())
            })
            .optional()?;
        Ok(found.is_some())
    }

    /// 插入产品，返回带主键的实体
    pub fn insert(&self, input: &ProductInput) -> RepositoryResult<Product> {
        let conn = self.get_conn()?;
        conn.execute(
            "INSERT INTO products (code, name, value) VALUES (?1, ?2, ?3)",
            params![input.code, input.name, write_decimal(&input.value)],
        )?;
        let id = conn.last_insert_rowid();

        Ok(Product {
            id,
            code: input.code.clone(),
            name: input.name.clone(),
            value: input.value,
        })
    }

    /// 更新产品（code/name/value 全量覆盖）
    ///
    /// # 返回
    /// - Ok(Product): 更新后的实体
    /// - Err(NotFound): 主键不存在
    pub fn update(&self, id: i64, input: &ProductInput) -> RepositoryResult<Product> {
        let conn = self.get_conn()?;
        let rows = conn.execute(
            r#"
            UPDATE products
            SET code = ?2, name = ?3, value = ?4, updated_at = datetime('now')
            WHERE id = ?1
            "#,
            params![id, input.code, input.name, write_decimal(&input.value)],
        )?;

        if rows == 0 {
            return Err(RepositoryError::not_found("Product", id));
        }

        Ok(Product {
            id,
            code: input.code.clone(),
            name: input.name.clone(),
            value: input.value,
        })
    }

    /// 删除产品（物料关联随外键级联删除）
    pub fn delete(&self, id: i64) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        let rows = conn.execute("DELETE FROM products WHERE id = ?1", params![id])?;
        if rows == 0 {
            return Err(RepositoryError::not_found("Product", id));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn setup_repo() -> ProductRepository {
        let conn = Connection::open_in_memory().unwrap();
        crate::db::configure_sqlite_connection(&conn).unwrap();
        crate::db::init_schema(&conn).unwrap();
        ProductRepository::new(Arc::new(Mutex::new(conn)))
    }

    #[test]
    fn test_insert_and_find() {
        let repo = setup_repo();
        let created = repo
            .insert(&ProductInput::new("P-001", "桌子", Decimal::new(15050, 2)))
            .unwrap();
        assert!(created.id > 0);

        let by_id = repo.find_by_id(created.id).unwrap().unwrap();
        assert_eq!(by_id, created);
        assert_eq!(by_id.value.to_string(), "150.50");

        let by_code = repo.find_by_code("P-001").unwrap().unwrap();
        assert_eq!(by_code.id, created.id);

        assert!(repo.find_by_code("NOPE").unwrap().is_none());
    }

    #[test]
    fn test_duplicate_code_rejected() {
        let repo = setup_repo();
        repo.insert(&ProductInput::new("P-001", "A", Decimal::ONE))
            .unwrap();

        let err = repo
            .insert(&ProductInput::new("P-001", "B", Decimal::ONE))
            .unwrap_err();
        assert!(matches!(err, RepositoryError::UniqueConstraintViolation(_)));
    }

    #[test]
    fn test_update_and_delete_missing() {
        let repo = setup_repo();
        let err = repo
            .update(99, &ProductInput::new("X", "X", Decimal::ONE))
            .unwrap_err();
        assert!(matches!(err, RepositoryError::NotFound { .. }));

        let err = repo.delete(99).unwrap_err();
        assert!(matches!(err, RepositoryError::NotFound { .. }));
    }

    #[test]
    fn test_list_all_ordered_by_id() {
        let repo = setup_repo();
        repo.insert(&ProductInput::new("B", "b", Decimal::ONE)).unwrap();
        repo.insert(&ProductInput::new("A", "a", Decimal::ONE)).unwrap();

        let codes: Vec<String> = repo.list_all().unwrap().into_iter().map(|p| p.code).collect();
        assert_eq!(codes, vec!["B".to_string(), "A".to_string()]);
    }
}
