// ==========================================
// 包装线质量KPI分析系统 - 产线记录仓储 (ccw 表)
// ==========================================
// 职责: ccw 表的数据访问（插入、目录查询、标量聚合）
// 红线: 不含业务逻辑，缺失值归一与效率平均在引擎层完成
// 约束: 所有查询使用参数化,防止 SQL 注入
// ==========================================

use crate::db::open_sqlite_connection;
use crate::domain::filter::{render_where, FilterPredicate, FilterTarget};
use crate::domain::record::LineRecord;
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::{params, params_from_iter, Connection, OptionalExtension};
use std::sync::{Arc, Mutex};

// ==========================================
// 聚合行类型
// ==========================================

/// ccw 表过滤聚合（AVG 在空集/全 NULL 时为 None）
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LineAggregates {
    pub avg_efficiency_ccw: Option<f64>,
    pub avg_efficiency_atlas: Option<f64>,
    pub avg_std_deviation: Option<f64>,
}

/// 无联动包装记录的 ccw 子集聚合（人工线口径）
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UnlinkedLineAggregates {
    pub avg_efficiency_ccw: Option<f64>,
    pub avg_efficiency_atlas: Option<f64>,
}

/// 有联动包装记录的 ccw 子集聚合（自动线口径, 内联 tsc 效率）
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LinkedLineAggregates {
    pub avg_efficiency_ccw: Option<f64>,
    pub avg_efficiency_atlas: Option<f64>,
    pub avg_efficiency_tsc: Option<f64>,
}

/// 按工厂的 ccw 汇总（工厂排名用）
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LinePlantSummary {
    pub total_good_units: Option<i64>,
    pub total_overweight_units: Option<i64>,
    pub avg_std_deviation: Option<f64>,
    pub avg_efficiency_ccw: Option<f64>,
    pub avg_efficiency_atlas: Option<f64>,
}

// ==========================================
// LineRecordRepository - 产线记录仓储
// ==========================================
/// 产线记录仓储
/// 职责: ccw 表的只读聚合查询; insert 仅供测试夹具与建库工具
pub struct LineRecordRepository {
    conn: Arc<Mutex<Connection>>,
}

impl LineRecordRepository {
    /// 创建新的 LineRecordRepository 实例
    ///
    /// # 参数
    /// - db_path: 数据库文件路径
    pub fn new(db_path: &str) -> RepositoryResult<Self> {
        let conn = open_sqlite_connection(db_path)
            .map_err(|e| RepositoryError::DatabaseConnectionError(e.to_string()))?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// 从已有连接创建仓储实例
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    /// 获取数据库连接
    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// 插入产线记录，返回存储分配的主键
    ///
    /// # 说明
    /// - 引擎运行期只读，此方法供测试夹具与本地建库工具使用
    pub fn insert(&self, record: &LineRecord) -> RepositoryResult<i64> {
        let conn = self.get_conn()?;
        conn.execute(
            r#"
            INSERT INTO ccw (
                plant, line, eq, date_start, date_end,
                eficiencia_ccw, eficiencia_atlas, des_estandar,
                descargas_buenas, sobre_peso
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
            "#,
            params![
                record.plant,
                record.line,
                record.equipment,
                record.date_start.to_string(),
                record.date_end.to_string(),
                record.efficiency_ccw,
                record.efficiency_atlas,
                record.std_deviation,
                record.good_units,
                record.overweight_units,
            ],
        )
        .map_err(|e| RepositoryError::query("ccw.insert", e))?;

        Ok(conn.last_insert_rowid())
    }

    /// 查询全部非空工厂名（去重）
    pub fn distinct_plants(&self) -> RepositoryResult<Vec<String>> {
        let conn = self.get_conn()?;
        let mut stmt = conn
            .prepare("SELECT DISTINCT plant FROM ccw WHERE plant IS NOT NULL AND plant <> '' ORDER BY plant")
            .map_err(|e| RepositoryError::query("ccw.distinct_plants", e))?;

        let plants = stmt
            .query_map([], |row| row.get::<_, String>(0))
            .map_err(|e| RepositoryError::query("ccw.distinct_plants", e))?
            .collect::<rusqlite::Result<Vec<_>>>()
            .map_err(|e| RepositoryError::query("ccw.distinct_plants", e))?;

        Ok(plants)
    }

    /// 查询指定工厂的非空产线名（去重）
    pub fn distinct_lines(&self, plant: &str) -> RepositoryResult<Vec<String>> {
        let conn = self.get_conn()?;
        let mut stmt = conn
            .prepare(
                r#"
                SELECT DISTINCT line
                FROM ccw
                WHERE plant = ?1 AND line IS NOT NULL AND line <> ''
                ORDER BY line
                "#,
            )
            .map_err(|e| RepositoryError::query("ccw.distinct_lines", e))?;

        let lines = stmt
            .query_map(params![plant], |row| row.get::<_, String>(0))
            .map_err(|e| RepositoryError::query("ccw.distinct_lines", e))?
            .collect::<rusqlite::Result<Vec<_>>>()
            .map_err(|e| RepositoryError::query("ccw.distinct_lines", e))?;

        Ok(lines)
    }

    /// 查询非空设备编码（去重，工厂/产线约束可选）
    pub fn distinct_equipment(
        &self,
        plant: Option<&str>,
        line: Option<&str>,
    ) -> RepositoryResult<Vec<String>> {
        let conn = self.get_conn()?;

        let mut conditions = vec!["eq IS NOT NULL AND eq <> ''".to_string()];
        let mut bind_params: Vec<String> = Vec::new();
        if let Some(p) = plant.map(str::trim).filter(|p| !p.is_empty()) {
            conditions.push("plant = ?".to_string());
            bind_params.push(p.to_string());
        }
        if let Some(l) = line.map(str::trim).filter(|l| !l.is_empty()) {
            conditions.push("line = ?".to_string());
            bind_params.push(l.to_string());
        }

        let sql = format!(
            "SELECT DISTINCT eq FROM ccw{} ORDER BY eq",
            render_where(&conditions)
        );

        let mut stmt = conn
            .prepare(&sql)
            .map_err(|e| RepositoryError::query("ccw.distinct_equipment", e))?;

        let equipment = stmt
            .query_map(params_from_iter(bind_params), |row| row.get::<_, String>(0))
            .map_err(|e| RepositoryError::query("ccw.distinct_equipment", e))?
            .collect::<rusqlite::Result<Vec<_>>>()
            .map_err(|e| RepositoryError::query("ccw.distinct_equipment", e))?;

        Ok(equipment)
    }

    /// 查询日期范围 (MIN(date_start), MAX(date_end))，空表返回 None
    pub fn date_bounds(&self) -> RepositoryResult<Option<(String, String)>> {
        let conn = self.get_conn()?;
        let bounds: (Option<String>, Option<String>) = conn
            .query_row(
                "SELECT MIN(date_start), MAX(date_end) FROM ccw",
                [],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .map_err(|e| RepositoryError::query("ccw.date_bounds", e))?;

        Ok(match bounds {
            (Some(min), Some(max)) => Some((min, max)),
            _ => None,
        })
    }

    /// 过滤聚合: 效率均值与标准偏差均值
    pub fn efficiency_aggregates(
        &self,
        predicate: &FilterPredicate,
    ) -> RepositoryResult<LineAggregates> {
        let conn = self.get_conn()?;
        let sql = format!(
            r#"
            SELECT
               AVG(ccw.eficiencia_ccw)   AS avg_ccw_eff,
               AVG(ccw.eficiencia_atlas) AS avg_atlas_eff,
               AVG(ccw.des_estandar)     AS avg_desestandar
            FROM ccw{}
            "#,
            predicate.where_sql(FilterTarget::Line)
        );

        conn.query_row(&sql, params_from_iter(predicate.params()), |row| {
            Ok(LineAggregates {
                avg_efficiency_ccw: row.get(0)?,
                avg_efficiency_atlas: row.get(1)?,
                avg_std_deviation: row.get(2)?,
            })
        })
        .map_err(|e| RepositoryError::query("ccw.efficiency_aggregates", e))
    }

    /// 过滤聚合: 无联动包装记录的子集（人工线口径）
    ///
    /// # 说明
    /// - LEFT JOIN 后以 tsc.id IS NULL 限定“无联动”子集
    /// - 与 linked_efficiency_aggregates 构成对 ccw 记录的完备不相交划分
    pub fn unlinked_efficiency_aggregates(
        &self,
        predicate: &FilterPredicate,
    ) -> RepositoryResult<UnlinkedLineAggregates> {
        let conn = self.get_conn()?;

        let mut conditions = predicate.conditions(FilterTarget::Line);
        conditions.push("tsc.id IS NULL".to_string());

        let sql = format!(
            r#"
            SELECT
              AVG(ccw.eficiencia_ccw)   AS avg_ccw,
              AVG(ccw.eficiencia_atlas) AS avg_atlas
            FROM ccw
            LEFT JOIN tsc ON ccw.id = tsc.ccw_id{}
            "#,
            render_where(&conditions)
        );

        conn.query_row(&sql, params_from_iter(predicate.params()), |row| {
            Ok(UnlinkedLineAggregates {
                avg_efficiency_ccw: row.get(0)?,
                avg_efficiency_atlas: row.get(1)?,
            })
        })
        .map_err(|e| RepositoryError::query("ccw.unlinked_efficiency_aggregates", e))
    }

    /// 过滤聚合: 有联动包装记录的子集（自动线口径，内联语义）
    pub fn linked_efficiency_aggregates(
        &self,
        predicate: &FilterPredicate,
    ) -> RepositoryResult<LinkedLineAggregates> {
        let conn = self.get_conn()?;
        let sql = format!(
            r#"
            SELECT
              AVG(ccw.eficiencia_ccw)   AS avg_ccw,
              AVG(ccw.eficiencia_atlas) AS avg_atlas,
              AVG(tsc.eficiencia_tsc)   AS avg_tsc
            FROM ccw
            JOIN tsc ON ccw.id = tsc.ccw_id{}
            "#,
            predicate.where_sql(FilterTarget::Line)
        );

        conn.query_row(&sql, params_from_iter(predicate.params()), |row| {
            Ok(LinkedLineAggregates {
                avg_efficiency_ccw: row.get(0)?,
                avg_efficiency_atlas: row.get(1)?,
                avg_efficiency_tsc: row.get(2)?,
            })
        })
        .map_err(|e| RepositoryError::query("ccw.linked_efficiency_aggregates", e))
    }

    /// 按工厂汇总（工厂排名用，无请求过滤）
    pub fn plant_summary(&self, plant: &str) -> RepositoryResult<LinePlantSummary> {
        let conn = self.get_conn()?;
        conn.query_row(
            r#"
            SELECT
               SUM(descargas_buenas),
               SUM(sobre_peso),
               AVG(des_estandar),
               AVG(eficiencia_ccw),
               AVG(eficiencia_atlas)
            FROM ccw
            WHERE plant = ?1
            "#,
            params![plant],
            |row| {
                Ok(LinePlantSummary {
                    total_good_units: row.get(0)?,
                    total_overweight_units: row.get(1)?,
                    avg_std_deviation: row.get(2)?,
                    avg_efficiency_ccw: row.get(3)?,
                    avg_efficiency_atlas: row.get(4)?,
                })
            },
        )
        .optional()
        .map_err(|e| RepositoryError::query("ccw.plant_summary", e))
        .map(|row| row.unwrap_or_default())
    }
}
