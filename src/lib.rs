// ==========================================
// 制造库存系统 - 核心库
// ==========================================
// 技术栈: Rust + SQLite
// 系统定位: 原材料库存管理 + 基于库存的可生产性计算
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与计算结果
pub mod domain;

// 数据仓储层 - 数据访问
pub mod repository;

// 引擎层 - 可生产性计算
pub mod engine;

// 配置层 - 系统配置
pub mod config;

// 数据库基础设施（连接初始化/PRAGMA 统一）
pub mod db;

// 日志系统
pub mod logging;

// API 层 - 业务接口
pub mod api;

// 应用层 - 组装
pub mod app;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域实体
pub use domain::{
    InventorySnapshot, Product, ProductMaterial, ProductionSuggestion, RawMaterial, StockMovement,
};

// 引擎
pub use engine::{FeasibilityEngine, SnapshotSource};

// API
pub use api::{ApiError, ApiResult, ProductApi, ProductMaterialApi, ProductionApi, RawMaterialApi};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "autoflex-inventory";
