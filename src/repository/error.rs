// ==========================================
// 包装线质量KPI分析系统 - 仓储层错误类型
// ==========================================
// 工具: thiserror 派生宏
// 约定: 上游查询失败以单一聚合失败呈现，不返回部分结果
// ==========================================

use thiserror::Error;

/// 仓储层错误类型
#[derive(Error, Debug)]
pub enum RepositoryError {
    // ===== 数据库错误 =====
    #[error("数据库连接失败: {0}")]
    DatabaseConnectionError(String),

    #[error("数据库锁获取失败: {0}")]
    LockError(String),

    #[error("数据库查询失败 (stage={stage}): {message}")]
    DatabaseQueryError { stage: String, message: String },

    #[error("唯一约束违反: {0}")]
    UniqueConstraintViolation(String),

    #[error("外键约束违反: {0}")]
    ForeignKeyViolation(String),

    // ===== 通用错误 =====
    #[error("内部错误: {0}")]
    InternalError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl RepositoryError {
    /// 由 rusqlite 错误构造查询失败，并标记失败阶段（可解释性）
    pub fn query(stage: &str, err: rusqlite::Error) -> Self {
        match err {
            rusqlite::Error::SqliteFailure(_, Some(msg)) => {
                if msg.contains("UNIQUE") {
                    RepositoryError::UniqueConstraintViolation(msg)
                } else if msg.contains("FOREIGN KEY") {
                    RepositoryError::ForeignKeyViolation(msg)
                } else {
                    RepositoryError::DatabaseQueryError {
                        stage: stage.to_string(),
                        message: msg,
                    }
                }
            }
            _ => RepositoryError::DatabaseQueryError {
                stage: stage.to_string(),
                message: err.to_string(),
            },
        }
    }
}

// 实现 From<rusqlite::Error>（阶段未知的缺省转换）
impl From<rusqlite::Error> for RepositoryError {
    fn from(err: rusqlite::Error) -> Self {
        RepositoryError::query("unknown", err)
    }
}

/// Result 类型别名
pub type RepositoryResult<T> = Result<T, RepositoryError>;
