// ==========================================
// 包装线质量KPI分析系统 - 应用状态
// ==========================================
// 职责: 管理应用级别的共享状态和API实例
// 约定: 单一共享连接按依赖注入传递，无进程级单例
// ==========================================

use std::sync::{Arc, Mutex};

use anyhow::{anyhow, Context, Result};
use rusqlite::Connection;

use crate::api::{CatalogApi, DashboardApi};
use crate::config::ConfigManager;
use crate::db::open_sqlite_connection;
use crate::engine::{DefectParetoEngine, KpiEngine, PlantRankingEngine};
use crate::repository::{LineRecordRepository, PackagingRecordRepository};

/// 应用状态
///
/// 包含所有API实例和共享资源
pub struct AppState {
    /// 数据库路径
    pub db_path: String,

    /// 看板API
    pub dashboard_api: Arc<DashboardApi>,

    /// 目录API
    pub catalog_api: Arc<CatalogApi>,
}

impl AppState {
    /// 创建新的AppState实例
    ///
    /// # 说明
    /// - 打开单一共享连接，经 from_connection 注入各仓储
    /// - 每袋超重克数从 config_kv 读取（缺省回落到编译期默认值）
    pub fn new(db_path: String) -> Result<Self> {
        let conn = open_sqlite_connection(&db_path)
            .with_context(|| format!("无法打开数据库: {}", db_path))?;
        build_state_from_connection(db_path, Arc::new(Mutex::new(conn)))
    }
}

/// 获取默认数据库路径
///
/// 优先使用用户数据目录（如 ~/.local/share/packline-qc/packline_qc.db），
/// 目录不可用时回落到当前目录。
pub fn get_default_db_path() -> String {
    dirs::data_dir()
        .map(|dir| {
            dir.join("packline-qc")
                .join("packline_qc.db")
                .to_string_lossy()
                .to_string()
        })
        .unwrap_or_else(|| "packline_qc.db".to_string())
}

/// 从已有连接装配AppState
///
/// # 说明
/// - 单一共享连接按依赖注入传递给仓储/引擎/API 各层
/// - 测试环境可直接复用已初始化 schema 的连接
pub fn build_state_from_connection(
    db_path: String,
    conn: Arc<Mutex<Connection>>,
) -> Result<AppState> {
    // ==========================================
    // 初始化Repository层
    // ==========================================
    let line_repo = Arc::new(LineRecordRepository::from_connection(conn.clone()));
    let packaging_repo = Arc::new(PackagingRecordRepository::from_connection(conn.clone()));

    // ==========================================
    // 初始化配置层
    // ==========================================
    let config_manager = ConfigManager::from_connection(conn)
        .map_err(|e| anyhow!("无法创建ConfigManager: {}", e))?;
    let overweight_grams = config_manager
        .overweight_grams_per_bag()
        .map_err(|e| anyhow!("读取超重配置失败: {}", e))?;

    // ==========================================
    // 初始化Engine层
    // ==========================================
    let kpi_engine = Arc::new(
        KpiEngine::new(line_repo.clone(), packaging_repo.clone())
            .with_overweight_grams_per_bag(overweight_grams),
    );
    let defect_engine = Arc::new(DefectParetoEngine::new(packaging_repo.clone()));
    let ranking_engine = Arc::new(PlantRankingEngine::new(
        line_repo.clone(),
        packaging_repo.clone(),
    ));

    // ==========================================
    // 初始化API层
    // ==========================================
    let dashboard_api = Arc::new(DashboardApi::new(kpi_engine, defect_engine, ranking_engine));
    let catalog_api = Arc::new(CatalogApi::new(line_repo, packaging_repo));

    Ok(AppState {
        db_path,
        dashboard_api,
        catalog_api,
    })
}
