// ==========================================
// 制造库存系统 - 配置管理器
// ==========================================
// 职责: 配置加载、查询、覆写管理
// 存储: config_kv 表 (key-value + scope)
// ==========================================

use crate::config::inventory_config_trait::InventoryConfigReader;
use rusqlite::{params, Connection, OptionalExtension};
use std::collections::BTreeMap;
use std::error::Error;
use std::sync::{Arc, Mutex};

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
pub struct ConfigManager {
    conn: Arc<Mutex<Connection>>,
}

impl ConfigManager {
    /// 从已有连接创建 ConfigManager
    ///
    /// 说明：为保证连接行为一致，会对传入连接再次应用统一 PRAGMA（幂等）。
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Result<Self, Box<dyn Error>> {
        {
            let conn_guard = conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;
            crate::db::configure_sqlite_connection(&conn_guard)?;
        }

        Ok(Self { conn })
    }

    /// 从 config_kv 表读取配置值（scope_id='global'）
    fn get_config_value(&self, key: &str) -> Result<Option<String>, Box<dyn Error>> {
        let conn = self.conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;

        let value = conn
            .query_row(
                "SELECT value FROM config_kv WHERE scope_id = 'global' AND key = ?1",
                params![key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    /// 读取 global scope 的配置值
    pub fn get_global_config_value(&self, key: &str) -> Result<Option<String>, Box<dyn Error>> {
        self.get_config_value(key)
    }

    fn get_config_or_default(&self, key: &str, default: &str) -> Result<String, Box<dyn Error>> {
        Ok(self.get_config_value(key)?.unwrap_or_else(|| default.to_string()))
    }

    /// 写入 global scope 的配置值（UPSERT）
    pub fn set_global_config_value(&self, key: &str, value: &str) -> Result<(), Box<dyn Error>> {
        let conn = self.conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;
        conn.execute(
            r#"
            INSERT INTO config_kv (scope_id, key, value) VALUES ('global', ?1, ?2)
            ON CONFLICT(scope_id, key) DO UPDATE SET value = ?2, updated_at = datetime('now')
            "#,
            params![key, value],
        )?;
        tracing::info!(config_key = key, value = value, "配置已更新");
        Ok(())
    }

    /// 列出 global scope 的全部配置（按 key 排序）
    pub fn list_global_configs(&self) -> Result<BTreeMap<String, String>, Box<dyn Error>> {
        let conn = self.conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;
        let mut stmt =
            conn.prepare("SELECT key, value FROM config_kv WHERE scope_id = 'global' ORDER BY key")?;

        let mut configs = BTreeMap::new();
        let rows = stmt.query_map([], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })?;
        for row in rows {
            let (key, value) = row?;
            configs.insert(key, value);
        }
        Ok(configs)
    }
}

// ==========================================
// InventoryConfigReader Trait 实现
// ==========================================
impl InventoryConfigReader for ConfigManager {
    fn get_suggestion_limit(&self) -> Result<usize, Box<dyn Error>> {
        let value = self.get_config_or_default(config_keys::SUGGESTION_LIMIT, "0")?;
        Ok(value.trim().parse::<usize>().unwrap_or_else(|_| {
            tracing::warn!(
                config_key = config_keys::SUGGESTION_LIMIT,
                raw_value = %value,
                "配置格式错误，使用默认值 0"
            );
            0
        }))
    }

    fn get_default_material_unit(&self) -> Result<String, Box<dyn Error>> {
        let value = self.get_config_or_default(
            config_keys::DEFAULT_MATERIAL_UNIT,
            DEFAULT_MATERIAL_UNIT,
        )?;
        let trimmed = value.trim();
        if trimmed.is_empty() {
            Ok(DEFAULT_MATERIAL_UNIT.to_string())
        } else {
            Ok(trimmed.to_string())
        }
    }
}

/// 原材料默认计量单位
pub const DEFAULT_MATERIAL_UNIT: &str = "un";

// ==========================================
// 配置键常量
// ==========================================
pub mod config_keys {
    // 生产建议
    pub const SUGGESTION_LIMIT: &str = "production.suggestion_limit";

    // 原材料
    pub const DEFAULT_MATERIAL_UNIT: &str = "material.default_unit";
}
