// ==========================================
// 包装线质量KPI分析系统 - 包装记录仓储 (tsc 表)
// ==========================================
// 职责: tsc 表的数据访问（插入、目录查询、标量聚合、缺陷求和）
//       以及可选产能子表 tsc_daily 的理论袋数查询
// 红线: 不含业务逻辑，缺失值归一与百分比计算在引擎层完成
// 约束: 所有查询使用参数化,防止 SQL 注入
// ==========================================

use crate::db::{open_sqlite_connection, table_exists};
use crate::domain::filter::{FilterPredicate, FilterTarget};
use crate::domain::record::PackagingRecord;
use crate::domain::types::DefectCategory;
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::{params, params_from_iter, Connection, OptionalExtension};
use std::sync::{Arc, Mutex};

// ==========================================
// 聚合行类型
// ==========================================

/// tsc 表过滤聚合（AVG/SUM 在空集时为 None）
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PackagingAggregates {
    pub avg_efficiency_tsc: Option<f64>,
    pub sum_good_bags: Option<i64>,
    pub sum_leak_bags: Option<i64>,
    pub sum_flat_bags: Option<i64>,
    pub sum_double_bags: Option<i64>,
    pub sum_thick_bags: Option<i64>,
}

/// 四类缺陷的过滤求和（顺序固定: leak, flat, double, thick）
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DefectSums {
    pub leak_bags: Option<i64>,
    pub flat_bags: Option<i64>,
    pub double_bags: Option<i64>,
    pub thick_bags: Option<i64>,
}

/// 按工厂的 tsc 汇总（工厂排名用）
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PackagingPlantSummary {
    pub total_good_bags: Option<i64>,
    pub avg_efficiency_tsc: Option<f64>,
}

// ==========================================
// PackagingRecordRepository - 包装记录仓储
// ==========================================
/// 包装记录仓储
/// 职责: tsc 表的只读聚合查询; insert 仅供测试夹具与建库工具
pub struct PackagingRecordRepository {
    conn: Arc<Mutex<Connection>>,
}

impl PackagingRecordRepository {
    /// 创建新的 PackagingRecordRepository 实例
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

    /// 插入包装记录，返回存储分配的主键
    ///
    /// # 说明
    /// - linked_line 为 None 时写入 NULL（人工线，无联动产线记录）
    /// - 引擎运行期只读，此方法供测试夹具与本地建库工具使用
    pub fn insert(&self, record: &PackagingRecord) -> RepositoryResult<i64> {
        let conn = self.get_conn()?;
        conn.execute(
            r#"
            INSERT INTO tsc (
                ccw_id, plant, line, eq, date_start, date_end,
                eficiencia_tsc, good_bags,
                leak_bags, flat_bags, double_bags, thick_bags
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)
            "#,
            params![
                record.linked_line,
                record.plant,
                record.line,
                record.equipment,
                record.date_start.to_string(),
                record.date_end.to_string(),
                record.efficiency_tsc,
                record.good_bags,
                record.leak_bags,
                record.flat_bags,
                record.double_bags,
                record.thick_bags,
            ],
        )
        .map_err(|e| RepositoryError::query("tsc.insert", e))?;

        Ok(conn.last_insert_rowid())
    }

    /// 查询全部非空工厂名（去重）
    pub fn distinct_plants(&self) -> RepositoryResult<Vec<String>> {
        let conn = self.get_conn()?;
        let mut stmt = conn
            .prepare("SELECT DISTINCT plant FROM tsc WHERE plant IS NOT NULL AND plant <> '' ORDER BY plant")
            .map_err(|e| RepositoryError::query("tsc.distinct_plants", e))?;

        let plants = stmt
            .query_map([], |row| row.get::<_, String>(0))
            .map_err(|e| RepositoryError::query("tsc.distinct_plants", e))?
            .collect::<rusqlite::Result<Vec<_>>>()
            .map_err(|e| RepositoryError::query("tsc.distinct_plants", e))?;

        Ok(plants)
    }

    /// 查询日期范围 (MIN(date_start), MAX(date_end))，空表返回 None
    pub fn date_bounds(&self) -> RepositoryResult<Option<(String, String)>> {
        let conn = self.get_conn()?;
        let bounds: (Option<String>, Option<String>) = conn
            .query_row(
                "SELECT MIN(date_start), MAX(date_end) FROM tsc",
                [],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .map_err(|e| RepositoryError::query("tsc.date_bounds", e))?;

        Ok(match bounds {
            (Some(min), Some(max)) => Some((min, max)),
            _ => None,
        })
    }

    /// 过滤聚合: 包装效率均值、合格袋数与缺陷求和
    pub fn aggregates(
        &self,
        predicate: &FilterPredicate,
    ) -> RepositoryResult<PackagingAggregates> {
        let conn = self.get_conn()?;
        let sql = format!(
            r#"
            SELECT
               AVG(tsc.eficiencia_tsc)  AS avg_tsc_eff,
               SUM(tsc.good_bags)       AS sum_good_bags,
               SUM(tsc.leak_bags)       AS sum_leak_bags,
               SUM(tsc.flat_bags)       AS sum_flat_bags,
               SUM(tsc.double_bags)     AS sum_double_bags,
               SUM(tsc.thick_bags)      AS sum_thick_bags
            FROM tsc{}
            "#,
            predicate.where_sql(FilterTarget::Packaging)
        );

        conn.query_row(&sql, params_from_iter(predicate.params()), |row| {
            Ok(PackagingAggregates {
                avg_efficiency_tsc: row.get(0)?,
                sum_good_bags: row.get(1)?,
                sum_leak_bags: row.get(2)?,
                sum_flat_bags: row.get(3)?,
                sum_double_bags: row.get(4)?,
                sum_thick_bags: row.get(5)?,
            })
        })
        .map_err(|e| RepositoryError::query("tsc.aggregates", e))
    }

    /// 过滤求和: 四类缺陷（帕累托分析用）
    ///
    /// 列顺序由 DefectCategory::ALL 固定 (leak, flat, double, thick)
    pub fn defect_sums(&self, predicate: &FilterPredicate) -> RepositoryResult<DefectSums> {
        let conn = self.get_conn()?;
        let select_list = DefectCategory::ALL
            .iter()
            .map(|category| format!("SUM(tsc.{0}) AS {0}", category.column()))
            .collect::<Vec<_>>()
            .join(", ");
        let sql = format!(
            "SELECT {}\n            FROM tsc{}",
            select_list,
            predicate.where_sql(FilterTarget::Packaging)
        );

        conn.query_row(&sql, params_from_iter(predicate.params()), |row| {
            Ok(DefectSums {
                leak_bags: row.get(0)?,
                flat_bags: row.get(1)?,
                double_bags: row.get(2)?,
                thick_bags: row.get(3)?,
            })
        })
        .map_err(|e| RepositoryError::query("tsc.defect_sums", e))
    }

    /// 过滤求和: 理论袋数（可选产能子表 tsc_daily）
    ///
    /// # 说明
    /// - tsc_daily 属于可选协作方，缺表时返回 None（引擎侧归一为 0），不报错
    /// - 日期约束作用于 td.date，范围字段作用于联表 tsc
    pub fn theoretical_bags(
        &self,
        predicate: &FilterPredicate,
    ) -> RepositoryResult<Option<i64>> {
        let conn = self.get_conn()?;

        let has_table = table_exists(&conn, "tsc_daily")
            .map_err(|e| RepositoryError::query("tsc_daily.table_exists", e))?;
        if !has_table {
            tracing::debug!("tsc_daily 表不存在，理论袋数降级为 0");
            return Ok(None);
        }

        let sql = format!(
            r#"
            SELECT SUM(td.total_bags) AS sum_total_bags
            FROM tsc_daily td
            JOIN tsc ON td.tsc_id = tsc.id{}
            "#,
            predicate.where_sql(FilterTarget::Capacity)
        );

        conn.query_row(&sql, params_from_iter(predicate.params()), |row| row.get(0))
            .map_err(|e| RepositoryError::query("tsc_daily.theoretical_bags", e))
    }

    /// 按工厂汇总（工厂排名用，无请求过滤）
    pub fn plant_summary(&self, plant: &str) -> RepositoryResult<PackagingPlantSummary> {
        let conn = self.get_conn()?;
        conn.query_row(
            r#"
            SELECT
               SUM(good_bags),
               AVG(eficiencia_tsc)
            FROM tsc
            WHERE plant = ?1
            "#,
            params![plant],
            |row| {
                Ok(PackagingPlantSummary {
                    total_good_bags: row.get(0)?,
                    avg_efficiency_tsc: row.get(1)?,
                })
            },
        )
        .optional()
        .map_err(|e| RepositoryError::query("tsc.plant_summary", e))
        .map(|row| row.unwrap_or_default())
    }
}
