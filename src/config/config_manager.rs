// ==========================================
// 包装线质量KPI分析系统 - 配置管理器
// ==========================================
// 职责: 配置加载、查询
// 存储: config_kv 表 (key-value, scope_id='global')
// 降级: 缺表/缺键一律回落到编译期默认值
// ==========================================

use crate::db::{configure_sqlite_connection, open_sqlite_connection, table_exists};
use crate::engine::kpi::DEFAULT_OVERWEIGHT_GRAMS_PER_BAG;
use rusqlite::{params, Connection};
use std::error::Error;
use std::sync::{Arc, Mutex};

/// 每袋超重克数的配置键
pub const OVERWEIGHT_GRAMS_PER_BAG_KEY: &str = "overweight_grams_per_bag";

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
pub struct ConfigManager {
    conn: Arc<Mutex<Connection>>,
}

impl ConfigManager {
    /// 创建新的 ConfigManager 实例
    ///
    /// # 参数
    /// - db_path: 数据库文件路径
    pub fn new(db_path: &str) -> Result<Self, Box<dyn Error>> {
        let conn = open_sqlite_connection(db_path)?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// 从已有连接创建 ConfigManager
    ///
    /// 说明：为保证连接行为一致，会对传入连接再次应用统一 PRAGMA（幂等）。
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Result<Self, Box<dyn Error>> {
        {
            let conn_guard = conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;
            configure_sqlite_connection(&conn_guard)?;
        }

        Ok(Self { conn })
    }

    /// 从 config_kv 表读取配置值（scope_id='global'）
    ///
    /// # 返回
    /// - Some(String): 配置值
    /// - None: 配置不存在（含 config_kv 表缺失）
    pub fn get_global_config_value(&self, key: &str) -> Result<Option<String>, Box<dyn Error>> {
        let conn = self.conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;

        // config_kv 属于可选协作方，缺表视为全部配置缺省
        if !table_exists(&conn, "config_kv")? {
            return Ok(None);
        }

        let result = conn.query_row(
            "SELECT value FROM config_kv WHERE scope_id = 'global' AND key = ?1",
            params![key],
            |row| row.get::<_, String>(0),
        );

        match result {
            Ok(value) => Ok(Some(value)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(Box::new(e)),
        }
    }

    /// 读取每袋超重克数（缺省为 DEFAULT_OVERWEIGHT_GRAMS_PER_BAG）
    ///
    /// # 说明
    /// - 配置值非法（无法解析为正数）时回落到默认值并告警，不让请求失败
    pub fn overweight_grams_per_bag(&self) -> Result<f64, Box<dyn Error>> {
        let raw = match self.get_global_config_value(OVERWEIGHT_GRAMS_PER_BAG_KEY)? {
            Some(v) => v,
            None => return Ok(DEFAULT_OVERWEIGHT_GRAMS_PER_BAG),
        };

        match raw.trim().parse::<f64>() {
            Ok(grams) if grams > 0.0 => Ok(grams),
            _ => {
                tracing::warn!(
                    key = OVERWEIGHT_GRAMS_PER_BAG_KEY,
                    value = raw.as_str(),
                    "配置值非法，回落到默认值"
                );
                Ok(DEFAULT_OVERWEIGHT_GRAMS_PER_BAG)
            }
        }
    }
}
