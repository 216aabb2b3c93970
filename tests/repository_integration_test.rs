// ==========================================
// Repository 层集成测试
// ==========================================
// 测试范围: 文件数据库上的快照一致性、库存调整事务、跨连接可见性
// ==========================================


use std::sync::{Arc, Mutex};

use autoflex_inventory::db::open_sqlite_connection;
use autoflex_inventory::domain::{ProductInput, RawMaterialInput, StockMovementDraft};
use autoflex_inventory::engine::{InventoryRepositories, SnapshotSource};
use autoflex_inventory::repository::RepositoryError;
use rust_decimal::Decimal;

fn draft(movement_id: &str) -> StockMovementDraft {
    StockMovementDraft::new(movement_id.to_string(), "tester", None)
}

fn open_repos(db_path: &str) -> InventoryRepositories {
    let conn = open_sqlite_connection(db_path).expect("无法打开数据库");
    InventoryRepositories::from_connection(Arc::new(Mutex::new(conn)))
}

#[test]
fn test_snapshot_包含三类记录() {
    let (_temp_file, db_path) = test_helpers::create_test_db().unwrap();
    let repos = open_repos(&db_path);

    let p = repos
        .product_repo
        .insert(&ProductInput::new("P1", "产品1", Decimal::new(1000, 2)))
        .unwrap();
    let m = repos
        .raw_material_repo
        .insert(&RawMaterialInput::new("M1", "材料1", 10, Decimal::ONE).with_unit("un"))
        .unwrap();
    repos.product_material_repo.upsert(p.id, m.id, 2).unwrap();

    let snapshot = repos.snapshot_source().load_snapshot().unwrap();
    assert_eq!(snapshot.products, vec![p.clone()]);
    assert_eq!(snapshot.raw_materials, vec![m.clone()]);
    assert_eq!(snapshot.associations.len(), 1);
    assert_eq!(snapshot.requirements_for(p.id)[0].raw_material_id, m.id);
}

#[test]
fn test_跨连接可见性() {
    let (_temp_file, db_path) = test_helpers::create_test_db().unwrap();
    let writer = open_repos(&db_path);
    let reader = open_repos(&db_path);

    let m = writer
        .raw_material_repo
        .insert(&RawMaterialInput::new("M1", "材料1", 10, Decimal::ONE).with_unit("un"))
        .unwrap();
    writer
        .raw_material_repo
        .adjust_stock(m.id, -4, draft("mv-1"))
        .unwrap();

    let snapshot = reader.snapshot_source().load_snapshot().unwrap();
    assert_eq!(snapshot.raw_materials[0].quantity, 6);
}

#[test]
fn test_adjust_stock_拒绝后数据不变() {
    let (_temp_file, db_path) = test_helpers::create_test_db().unwrap();
    let repos = open_repos(&db_path);

    let m = repos
        .raw_material_repo
        .insert(&RawMaterialInput::new("M1", "材料1", 2, Decimal::ONE).with_unit("un"))
        .unwrap();

    let err = repos
        .raw_material_repo
        .adjust_stock(m.id, -3, draft("mv-1"))
        .unwrap_err();
    assert!(matches!(err, RepositoryError::NegativeStock { current: 2, delta: -3, .. }));

    let reloaded = repos.raw_material_repo.find_by_id(m.id).unwrap().unwrap();
    assert_eq!(reloaded.quantity, 2);
    assert!(repos
        .stock_movement_repo
        .list_by_raw_material(m.id)
        .unwrap()
        .is_empty());
}

#[test]
fn test_adjust_stock_流水写入失败时回滚() {
    let (_temp_file, db_path) = test_helpers::create_test_db().unwrap();
    let repos = open_repos(&db_path);

    let m = repos
        .raw_material_repo
        .insert(&RawMaterialInput::new("M1", "材料1", 10, Decimal::ONE).with_unit("un"))
        .unwrap();
    repos
        .raw_material_repo
        .adjust_stock(m.id, 5, draft("mv-fixed"))
        .unwrap();

    // 重复的 movement_id 使流水写入失败
    let err = repos
        .raw_material_repo
        .adjust_stock(m.id, -7, draft("mv-fixed"))
        .unwrap_err();
    assert!(matches!(err, RepositoryError::UniqueConstraintViolation(_)));

    // 其他连接看到的库存与流水都停留在第一次调整之后
    let reader = open_repos(&db_path);
    assert_eq!(
        reader.raw_material_repo.find_by_id(m.id).unwrap().unwrap().quantity,
        15
    );
    let movements = reader.stock_movement_repo.list_by_raw_material(m.id).unwrap();
    assert_eq!(movements.len(), 1);
    assert_eq!(movements[0].delta, 5);
}

#[test]
fn test_decimal_精度保留() {
    let (_temp_file, db_path) = test_helpers::create_test_db().unwrap();
    let repos = open_repos(&db_path);

    let p = repos
        .product_repo
        .insert(&ProductInput::new("P1", "产品1", Decimal::new(123456789, 2)))
        .unwrap();

    // 新连接读取
    let reloaded = open_repos(&db_path)
        .product_repo
        .find_by_id(p.id)
        .unwrap()
        .unwrap();
    assert_eq!(reloaded.value, Decimal::new(123456789, 2));
}
