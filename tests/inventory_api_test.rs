// ==========================================
// 产品 / 原材料 / 物料清单 API 集成测试
// ==========================================
// 测试范围:
// 1. 产品维护: 创建、编码唯一、更新、删除（级联物料清单）
// 2. 原材料维护: 默认计量单位、删除受物料清单约束
// 3. 库存调整: 负库存拒绝、流水记录
// 4. 物料清单: 两端存在性、需求量校验、upsert 语义
// ==========================================

mod helpers;

use autoflex_inventory::api::ApiError;
use autoflex_inventory::config::config_keys;
use autoflex_inventory::domain::{MovementDirection, ProductInput, RawMaterialInput};
use helpers::api_test_helper::*;
use rust_decimal::Decimal;

// ==========================================
// 产品
// ==========================================

#[test]
fn test_create_product_规范化输入() {
    let env = ApiTestEnv::new().expect("无法创建测试环境");

    let product = env
        .product_api
        .create_product(ProductInput::new("  P-001 ", " 桌子 ", Decimal::new(10005, 3)))
        .expect("创建失败");

    assert_eq!(product.code, "P-001");
    assert_eq!(product.name, "桌子");
    assert_eq!(product.value, Decimal::new(1001, 2));

    let found = env
        .product_api
        .find_product_by_code("P-001")
        .expect("查询失败")
        .expect("应能按编码找到");
    assert_eq!(found, product);
}

#[test]
fn test_create_product_编码重复() {
    let env = ApiTestEnv::new().expect("无法创建测试环境");
    env.create_product("P1", 1000);

    let result = env
        .product_api
        .create_product(ProductInput::new("P1", "另一个", Decimal::ONE));
    assert!(matches!(result, Err(ApiError::DuplicateCode { .. })));
}

#[test]
fn test_create_product_非法输入() {
    let env = ApiTestEnv::new().expect("无法创建测试环境");

    let blank = env
        .product_api
        .create_product(ProductInput::new("   ", "名称", Decimal::ONE));
    assert!(matches!(blank, Err(ApiError::InvalidInput(_))));

    let negative = env
        .product_api
        .create_product(ProductInput::new("P1", "名称", Decimal::new(-1, 2)));
    assert!(matches!(negative, Err(ApiError::InvalidInput(_))));

    let too_long = env
        .product_api
        .create_product(ProductInput::new("X".repeat(51), "名称", Decimal::ONE));
    assert!(matches!(too_long, Err(ApiError::InvalidInput(_))));
}

#[test]
fn test_update_product() {
    let env = ApiTestEnv::new().expect("无法创建测试环境");
    let p1 = env.create_product("P1", 1000);
    env.create_product("P2", 2000);

    // 保持自身编码可以更新
    let updated = env
        .product_api
        .update_product(p1.id, ProductInput::new("P1", "改名", Decimal::new(1500, 2)))
        .expect("更新失败");
    assert_eq!(updated.name, "改名");
    assert_eq!(updated.value, Decimal::new(1500, 2));

    // 改成别人的编码被拒绝
    let result = env
        .product_api
        .update_product(p1.id, ProductInput::new("P2", "改名", Decimal::ONE));
    assert!(matches!(result, Err(ApiError::DuplicateCode { .. })));

    assert_not_found(
        env.product_api
            .update_product(9999, ProductInput::new("P9", "不存在", Decimal::ONE)),
    );
}

#[test]
fn test_delete_product_级联删除物料清单() {
    let env = ApiTestEnv::new().expect("无法创建测试环境");
    let product = env.create_product("P1", 1000);
    let material = env.create_material("M1", 10);
    env.require(&product, &material, 2);

    env.product_api.delete_product(product.id).expect("删除失败");

    assert_not_found(env.product_api.get_product(product.id));
    assert!(env
        .repos
        .product_material_repo
        .list_by_raw_material(material.id)
        .unwrap()
        .is_empty());

    // 原材料本身不受影响
    assert_eq!(
        env.raw_material_api.get_raw_material(material.id).unwrap().quantity,
        10
    );
}

// ==========================================
// 原材料
// ==========================================

#[test]
fn test_create_raw_material_默认计量单位() {
    let env = ApiTestEnv::new().expect("无法创建测试环境");

    let m1 = env.create_material("M1", 5);
    assert_eq!(m1.unit, "un");

    env.config_manager
        .set_global_config_value(config_keys::DEFAULT_MATERIAL_UNIT, "kg")
        .unwrap();
    let m2 = env.create_material("M2", 5);
    assert_eq!(m2.unit, "kg");

    let m3 = env
        .raw_material_api
        .create_raw_material(RawMaterialInput::new("M3", "材料3", 1, Decimal::ONE).with_unit("m"))
        .unwrap();
    assert_eq!(m3.unit, "m");
}

#[test]
fn test_create_raw_material_负库存拒绝() {
    let env = ApiTestEnv::new().expect("无法创建测试环境");

    let result = env
        .raw_material_api
        .create_raw_material(RawMaterialInput::new("M1", "材料1", -1, Decimal::ONE));
    assert!(matches!(result, Err(ApiError::InvalidInput(_))));
}

#[test]
fn test_delete_raw_material_仍被引用时拒绝() {
    let env = ApiTestEnv::new().expect("无法创建测试环境");
    let product = env.create_product("P1", 1000);
    let material = env.create_material("M1", 10);
    env.require(&product, &material, 2);

    let other = env.create_product("P2", 500);
    env.require(&other, &material, 1);

    match env.raw_material_api.delete_raw_material(material.id) {
        Err(ApiError::BusinessRuleViolation(msg)) => {
            assert!(msg.contains(&product.id.to_string()));
            assert!(msg.contains(&other.id.to_string()));
        }
        unexpected => panic!("Expected BusinessRuleViolation, got {:?}", unexpected),
    }
    // 原材料仍在
    assert!(env.raw_material_api.get_raw_material(material.id).is_ok());

    env.product_material_api
        .delete_association(product.id, material.id)
        .unwrap();
    env.product_material_api
        .delete_association(other.id, material.id)
        .unwrap();
    env.raw_material_api
        .delete_raw_material(material.id)
        .expect("解除引用后应可删除");
    assert_not_found(env.raw_material_api.get_raw_material(material.id));
}

// ==========================================
// 库存调整
// ==========================================

#[test]
fn test_adjust_stock_记录流水() {
    let env = ApiTestEnv::new().expect("无法创建测试环境");
    let material = env.create_material("M1", 10);

    let after_in = env
        .raw_material_api
        .adjust_stock(material.id, 5, "admin", Some("采购入库"))
        .expect("入库失败");
    assert_eq!(after_in.quantity, 15);

    let after_out = env
        .raw_material_api
        .adjust_stock(material.id, -15, "admin", None)
        .expect("出库失败");
    assert_eq!(after_out.quantity, 0);

    let movements = env
        .raw_material_api
        .list_stock_movements(material.id)
        .unwrap();
    assert_eq!(movements.len(), 2);

    let inbound = movements
        .iter()
        .find(|m| m.delta == 5)
        .expect("应有入库流水");
    assert_eq!(inbound.direction(), MovementDirection::Inbound);
    assert_eq!(inbound.quantity_before, 10);
    assert_eq!(inbound.quantity_after, 15);
    assert_eq!(inbound.reason.as_deref(), Some("采购入库"));

    let outbound = movements
        .iter()
        .find(|m| m.delta == -15)
        .expect("应有出库流水");
    assert_eq!(outbound.direction(), MovementDirection::Outbound);
    assert_eq!(outbound.quantity_after, 0);
    assert_eq!(outbound.reason, None);
}

#[test]
fn test_list_recent_movements() {
    let env = ApiTestEnv::new().expect("无法创建测试环境");
    let m1 = env.create_material("M1", 10);
    let m2 = env.create_material("M2", 10);

    env.raw_material_api.adjust_stock(m1.id, 1, "admin", None).unwrap();
    env.raw_material_api.adjust_stock(m2.id, 2, "admin", None).unwrap();
    env.raw_material_api.adjust_stock(m1.id, 3, "admin", None).unwrap();

    // 最新在前
    let recent = env.raw_material_api.list_recent_movements(2).unwrap();
    let deltas: Vec<i64> = recent.iter().map(|m| m.delta).collect();
    assert_eq!(deltas, vec![3, 2]);

    assert!(matches!(
        env.raw_material_api.list_recent_movements(0),
        Err(ApiError::InvalidInput(_))
    ));
}

#[test]
fn test_adjust_stock_低于零被拒绝且库存不变() {
    let env = ApiTestEnv::new().expect("无法创建测试环境");
    let material = env.create_material("M1", 3);

    let result = env.raw_material_api.adjust_stock(material.id, -4, "admin", None);
    match result {
        Err(ApiError::InsufficientStock {
            raw_material_id,
            current,
            delta,
        }) => {
            assert_eq!(raw_material_id, material.id);
            assert_eq!(current, 3);
            assert_eq!(delta, -4);
        }
        other => panic!("Expected InsufficientStock, got {:?}", other),
    }

    assert_eq!(
        env.raw_material_api.get_raw_material(material.id).unwrap().quantity,
        3
    );
    assert!(env
        .raw_material_api
        .list_stock_movements(material.id)
        .unwrap()
        .is_empty());
}

#[test]
fn test_adjust_stock_参数校验() {
    let env = ApiTestEnv::new().expect("无法创建测试环境");
    let material = env.create_material("M1", 3);

    assert!(matches!(
        env.raw_material_api.adjust_stock(material.id, 0, "admin", None),
        Err(ApiError::InvalidInput(_))
    ));
    assert!(matches!(
        env.raw_material_api.adjust_stock(material.id, 1, "  ", None),
        Err(ApiError::InvalidInput(_))
    ));
    assert_not_found(env.raw_material_api.adjust_stock(9999, 1, "admin", None));
}

#[test]
fn test_check_stock_availability() {
    let env = ApiTestEnv::new().expect("无法创建测试环境");
    let material = env.create_material("M1", 10);

    assert!(env.raw_material_api.check_stock_availability(material.id, 10).unwrap());
    assert!(!env.raw_material_api.check_stock_availability(material.id, 11).unwrap());
    assert!(!env.raw_material_api.check_stock_availability(9999, 1).unwrap());
}

// ==========================================
// 物料清单
// ==========================================

#[test]
fn test_upsert_association_更新需求量() {
    let env = ApiTestEnv::new().expect("无法创建测试环境");
    let product = env.create_product("P1", 1000);
    let material = env.create_material("M1", 10);

    let first = env
        .product_material_api
        .upsert_association(product.id, material.id, 2)
        .unwrap();
    let second = env
        .product_material_api
        .upsert_association(product.id, material.id, 5)
        .unwrap();

    assert_eq!(first.id, second.id);
    assert_eq!(second.required_quantity, 5);

    let list = env
        .product_material_api
        .list_materials_for_product(product.id)
        .unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(
        env.product_material_api
            .find_association(product.id, material.id)
            .unwrap(),
        Some(second)
    );
}

#[test]
fn test_upsert_association_校验() {
    let env = ApiTestEnv::new().expect("无法创建测试环境");
    let product = env.create_product("P1", 1000);
    let material = env.create_material("M1", 10);

    for quantity in [0, -3] {
        match env
            .product_material_api
            .upsert_association(product.id, material.id, quantity)
        {
            Err(ApiError::InvalidQuantity { value, .. }) => assert_eq!(value, quantity),
            other => panic!("Expected InvalidQuantity, got {:?}", other),
        }
    }

    assert_not_found(
        env.product_material_api
            .upsert_association(9999, material.id, 1),
    );
    assert_not_found(
        env.product_material_api
            .upsert_association(product.id, 9999, 1),
    );
}

#[test]
fn test_list_materials_for_product() {
    let env = ApiTestEnv::new().expect("无法创建测试环境");
    let product = env.create_product("P1", 1000);

    // 产品存在但未定义物料: 空列表
    assert!(env
        .product_material_api
        .list_materials_for_product(product.id)
        .unwrap()
        .is_empty());

    assert_not_found(env.product_material_api.list_materials_for_product(9999));
    assert_not_found(env.product_material_api.delete_association(product.id, 9999));
}
