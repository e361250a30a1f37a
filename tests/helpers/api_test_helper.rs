// ==========================================
// API集成测试辅助工具
// ==========================================
// 职责: 提供API层集成测试的通用辅助函数
// ==========================================

#[path = "../test_helpers.rs"]
mod test_helpers;

use std::sync::{Arc, Mutex};

use rusqlite::Connection;
use tempfile::NamedTempFile;

use packline_qc::app::{build_state_from_connection, AppState};
use packline_qc::db::open_sqlite_connection;
use packline_qc::domain::{LineRecord, PackagingRecord};
use packline_qc::repository::{LineRecordRepository, PackagingRecordRepository};

// ==========================================
// API测试环境
// ==========================================

/// API测试环境
///
/// 包含装配好的 AppState 和用于准备测试数据的仓储
pub struct ApiTestEnv {
    pub db_path: String,
    pub state: AppState,

    // Repository层（用于测试数据准备）
    pub line_repo: Arc<LineRecordRepository>,
    pub packaging_repo: Arc<PackagingRecordRepository>,

    // 共享连接（用于直接 SQL 准备，如配置/产能行）
    pub conn: Arc<Mutex<Connection>>,

    // 临时文件（确保生命周期）
    _temp_file: NamedTempFile,
}

impl ApiTestEnv {
    /// 创建新的API测试环境（完整 schema）
    pub fn new() -> Result<Self, String> {
        let (temp_file, db_path) = test_helpers::create_test_db()
            .map_err(|e| format!("创建测试数据库失败: {}", e))?;
        Self::build(temp_file, db_path)
    }

    /// 创建不含可选表（tsc_daily / config_kv）的API测试环境
    pub fn new_without_optional_tables() -> Result<Self, String> {
        let (temp_file, db_path) = test_helpers::create_test_db_without_optional_tables()
            .map_err(|e| format!("创建测试数据库失败: {}", e))?;
        Self::build(temp_file, db_path)
    }

    fn build(temp_file: NamedTempFile, db_path: String) -> Result<Self, String> {
        let conn = open_sqlite_connection(&db_path)
            .map_err(|e| format!("无法打开数据库: {}", e))?;
        let conn = Arc::new(Mutex::new(conn));

        let line_repo = Arc::new(LineRecordRepository::from_connection(conn.clone()));
        let packaging_repo = Arc::new(PackagingRecordRepository::from_connection(conn.clone()));

        let state = build_state_from_connection(db_path.clone(), conn.clone())
            .map_err(|e| format!("无法装配AppState: {}", e))?;

        Ok(Self {
            db_path,
            state,
            line_repo,
            packaging_repo,
            conn,
            _temp_file: temp_file,
        })
    }

    /// 插入产线记录
    pub fn insert_line(&self, record: &LineRecord) -> i64 {
        self.line_repo.insert(record).expect("插入产线记录失败")
    }

    /// 插入包装记录
    pub fn insert_packaging(&self, record: &PackagingRecord) -> i64 {
        self.packaging_repo
            .insert(record)
            .expect("插入包装记录失败")
    }

    /// 写入 global scope 配置值
    pub fn set_config(&self, key: &str, value: &str) {
        let conn = self.conn.lock().expect("锁获取失败");
        test_helpers::set_config_value(&conn, key, value).expect("写入配置失败");
    }

    /// 写入 tsc_daily 理论产能行
    pub fn insert_capacity_row(&self, tsc_id: i64, date: &str, total_bags: i64) {
        let conn = self.conn.lock().expect("锁获取失败");
        test_helpers::insert_capacity_row(&conn, tsc_id, date, total_bags)
            .expect("写入产能行失败");
    }

    /// 重新装配 AppState（配置变更后使用）
    pub fn reload_state(&mut self) {
        self.state = build_state_from_connection(self.db_path.clone(), self.conn.clone())
            .expect("无法重新装配AppState");
    }
}
