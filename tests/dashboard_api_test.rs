// ==========================================
// DashboardApi / CatalogApi 集成测试
// ==========================================
// 测试范围:
// 1. 看板指标: dashboard_metrics (过滤规范化、窗口语义、配置覆写)
// 2. 缺陷分析: pareto_defects
// 3. 工厂排名: plant_ranking
// 4. 目录查询: list_plants, list_lines, list_equipment, available_dates
// ==========================================

mod helpers;

use helpers::api_test_helper::ApiTestEnv;
use helpers::test_data_builder::{LineRecordBuilder, PackagingRecordBuilder};
use packline_qc::config::OVERWEIGHT_GRAMS_PER_BAG_KEY;
use packline_qc::domain::MeasurementFilter;

fn plant_filter(plant: &str) -> MeasurementFilter {
    MeasurementFilter {
        plant: Some(plant.to_string()),
        ..Default::default()
    }
}

// ==========================================
// 看板指标测试
// ==========================================

#[test]
fn test_dashboard_metrics_空库全零() {
    let env = ApiTestEnv::new().expect("无法创建测试环境");

    let metrics = env
        .state
        .dashboard_api
        .dashboard_metrics(&MeasurementFilter::default())
        .expect("查询失败");

    assert_eq!(metrics.overall_efficiency, 0.0);
    assert_eq!(metrics.good_bags, 0);
    assert_eq!(metrics.leak_bags, 0);
}

#[test]
fn test_dashboard_metrics_按工厂过滤() {
    let env = ApiTestEnv::new().expect("无法创建测试环境");

    env.insert_line(&LineRecordBuilder::new("FUNZA").efficiency_ccw(90.0).build());
    env.insert_line(&LineRecordBuilder::new("RECIFE").efficiency_ccw(30.0).build());
    env.insert_packaging(&PackagingRecordBuilder::new("FUNZA").good_bags(400).build());
    env.insert_packaging(&PackagingRecordBuilder::new("RECIFE").good_bags(100).build());

    let metrics = env
        .state
        .dashboard_api
        .dashboard_metrics(&plant_filter("FUNZA"))
        .expect("查询失败");

    // 其他工厂的数据不渗入
    assert_eq!(metrics.ccw_efficiency, 90.0);
    assert_eq!(metrics.good_bags, 400);
}

#[test]
fn test_dashboard_metrics_空串过滤等同无约束() {
    let env = ApiTestEnv::new().expect("无法创建测试环境");

    env.insert_line(&LineRecordBuilder::new("FUNZA").efficiency_ccw(90.0).build());
    env.insert_line(&LineRecordBuilder::new("RECIFE").efficiency_ccw(30.0).build());

    let all_blank = MeasurementFilter {
        start_date: Some("".to_string()),
        end_date: Some("".to_string()),
        plant: Some("  ".to_string()),
        line: Some("".to_string()),
        equipment: Some("".to_string()),
    };
    let metrics = env
        .state
        .dashboard_api
        .dashboard_metrics(&all_blank)
        .expect("查询失败");

    // 空串不约束任何表: 两厂记录全部计入
    assert_eq!(metrics.ccw_efficiency, 60.0);
}

#[test]
fn test_dashboard_metrics_日期窗口语义() {
    let env = ApiTestEnv::new().expect("无法创建测试环境");

    env.insert_line(
        &LineRecordBuilder::new("FUNZA")
            .dates("2024-01-05", "2024-01-05")
            .efficiency_ccw(90.0)
            .build(),
    );
    env.insert_line(
        &LineRecordBuilder::new("FUNZA")
            .dates("2024-02-01", "2024-02-01")
            .efficiency_ccw(10.0)
            .build(),
    );
    // 跨窗口边界的记录 (date_end 超出上界) 不计入
    env.insert_line(
        &LineRecordBuilder::new("FUNZA")
            .dates("2024-01-20", "2024-02-02")
            .efficiency_ccw(50.0)
            .build(),
    );

    let filter = MeasurementFilter {
        start_date: Some("2024-01-01".to_string()),
        end_date: Some("2024-01-31".to_string()),
        ..Default::default()
    };
    let metrics = env
        .state
        .dashboard_api
        .dashboard_metrics(&filter)
        .expect("查询失败");

    assert_eq!(metrics.ccw_efficiency, 90.0);
}

#[test]
fn test_dashboard_metrics_按设备过滤() {
    let env = ApiTestEnv::new().expect("无法创建测试环境");

    env.insert_line(
        &LineRecordBuilder::new("FUNZA")
            .equipment("CCW-01")
            .efficiency_ccw(90.0)
            .build(),
    );
    env.insert_line(
        &LineRecordBuilder::new("FUNZA")
            .equipment("CCW-02")
            .efficiency_ccw(40.0)
            .build(),
    );

    let filter = MeasurementFilter {
        equipment: Some("CCW-01".to_string()),
        ..Default::default()
    };
    let metrics = env
        .state
        .dashboard_api
        .dashboard_metrics(&filter)
        .expect("查询失败");

    assert_eq!(metrics.ccw_efficiency, 90.0);
}

#[test]
fn test_dashboard_metrics_超重配置覆写() {
    let mut env = ApiTestEnv::new().expect("无法创建测试环境");

    env.insert_packaging(&PackagingRecordBuilder::new("FUNZA").good_bags(100).build());
    env.set_config(OVERWEIGHT_GRAMS_PER_BAG_KEY, "0.25");
    env.reload_state();

    let metrics = env
        .state
        .dashboard_api
        .dashboard_metrics(&MeasurementFilter::default())
        .expect("查询失败");

    assert_eq!(metrics.overweight_grams, 25.0);
}

#[test]
fn test_dashboard_metrics_配置非法回落默认() {
    let mut env = ApiTestEnv::new().expect("无法创建测试环境");

    env.insert_packaging(&PackagingRecordBuilder::new("FUNZA").good_bags(100).build());
    env.set_config(OVERWEIGHT_GRAMS_PER_BAG_KEY, "not-a-number");
    env.reload_state();

    let metrics = env
        .state
        .dashboard_api
        .dashboard_metrics(&MeasurementFilter::default())
        .expect("查询失败");

    // 非法配置不让请求失败，回落到默认 0.1 g/袋
    assert_eq!(metrics.overweight_grams, 10.0);
}

// ==========================================
// 缺陷分析测试
// ==========================================

#[test]
fn test_pareto_defects_过滤口径() {
    let env = ApiTestEnv::new().expect("无法创建测试环境");

    env.insert_packaging(
        &PackagingRecordBuilder::new("FUNZA")
            .defects(5, 5, 5, 5)
            .build(),
    );
    env.insert_packaging(
        &PackagingRecordBuilder::new("RECIFE")
            .defects(100, 0, 0, 0)
            .build(),
    );

    let breakdown = env
        .state
        .dashboard_api
        .pareto_defects(&plant_filter("FUNZA"))
        .expect("查询失败");

    assert_eq!(breakdown.total, 20);
    assert_eq!(breakdown.leak_pct, 25.0);
    assert_eq!(breakdown.flat_pct, 25.0);
    assert_eq!(breakdown.double_pct, 25.0);
    assert_eq!(breakdown.thick_pct, 25.0);
}

#[test]
fn test_pareto_defects_空库零总量() {
    let env = ApiTestEnv::new().expect("无法创建测试环境");

    let breakdown = env
        .state
        .dashboard_api
        .pareto_defects(&MeasurementFilter::default())
        .expect("查询失败");

    assert_eq!(breakdown.total, 0);
    assert_eq!(breakdown.leak_pct, 0.0);
}

// ==========================================
// 工厂排名测试
// ==========================================

#[test]
fn test_plant_ranking_全局口径() {
    let env = ApiTestEnv::new().expect("无法创建测试环境");

    env.insert_line(&LineRecordBuilder::new("FUNZA").efficiency_ccw(90.0).build());
    env.insert_line(&LineRecordBuilder::new("RECIFE").efficiency_ccw(30.0).build());

    let ranking = env.state.dashboard_api.plant_ranking().expect("查询失败");

    let plants: Vec<&str> = ranking.iter().map(|e| e.plant.as_str()).collect();
    assert_eq!(plants, ["FUNZA", "RECIFE"]);
    assert_eq!(ranking[0].overall_efficiency, 90.0);
    assert_eq!(ranking[1].overall_efficiency, 30.0);
}

// ==========================================
// 目录查询测试
// ==========================================

#[test]
fn test_list_plants_去重非空() {
    let env = ApiTestEnv::new().expect("无法创建测试环境");

    env.insert_line(&LineRecordBuilder::new("FUNZA").build());
    env.insert_line(&LineRecordBuilder::new("FUNZA").build());
    env.insert_line(&LineRecordBuilder::new("ORIENTE").build());
    env.insert_line(&LineRecordBuilder::new("").build());

    let plants = env.state.catalog_api.list_plants().expect("查询失败");
    assert_eq!(plants, ["FUNZA", "ORIENTE"]);
}

#[test]
fn test_list_lines_需要工厂() {
    let env = ApiTestEnv::new().expect("无法创建测试环境");

    env.insert_line(&LineRecordBuilder::new("FUNZA").line("L1").build());
    env.insert_line(&LineRecordBuilder::new("FUNZA").line("L2").build());
    env.insert_line(&LineRecordBuilder::new("ORIENTE").line("L9").build());

    let lines = env.state.catalog_api.list_lines("FUNZA").expect("查询失败");
    assert_eq!(lines, ["L1", "L2"]);

    // 工厂为空时返回空清单而非报错
    let empty = env.state.catalog_api.list_lines("  ").expect("查询失败");
    assert!(empty.is_empty());
}

#[test]
fn test_list_equipment_可选约束() {
    let env = ApiTestEnv::new().expect("无法创建测试环境");

    env.insert_line(
        &LineRecordBuilder::new("FUNZA")
            .line("L1")
            .equipment("CCW-01")
            .build(),
    );
    env.insert_line(
        &LineRecordBuilder::new("FUNZA")
            .line("L2")
            .equipment("CCW-02")
            .build(),
    );
    env.insert_line(
        &LineRecordBuilder::new("ORIENTE")
            .line("L1")
            .equipment("CCW-03")
            .build(),
    );

    let all = env
        .state
        .catalog_api
        .list_equipment(None, None)
        .expect("查询失败");
    assert_eq!(all, ["CCW-01", "CCW-02", "CCW-03"]);

    let by_plant = env
        .state
        .catalog_api
        .list_equipment(Some("FUNZA"), None)
        .expect("查询失败");
    assert_eq!(by_plant, ["CCW-01", "CCW-02"]);

    let by_plant_line = env
        .state
        .catalog_api
        .list_equipment(Some("FUNZA"), Some("L2"))
        .expect("查询失败");
    assert_eq!(by_plant_line, ["CCW-02"]);
}

#[test]
fn test_available_dates_合并两表() {
    let env = ApiTestEnv::new().expect("无法创建测试环境");

    env.insert_line(
        &LineRecordBuilder::new("FUNZA")
            .dates("2024-01-05", "2024-01-06")
            .build(),
    );
    env.insert_packaging(
        &PackagingRecordBuilder::new("FUNZA")
            .dates("2023-12-01", "2024-02-15")
            .build(),
    );

    let range = env
        .state
        .catalog_api
        .available_dates()
        .expect("查询失败")
        .expect("应有日期范围");

    assert_eq!(range.min_date, "2023-12-01");
    assert_eq!(range.max_date, "2024-02-15");
}

#[test]
fn test_available_dates_空库为None() {
    let env = ApiTestEnv::new().expect("无法创建测试环境");

    let range = env.state.catalog_api.available_dates().expect("查询失败");
    assert!(range.is_none());
}
