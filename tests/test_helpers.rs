// ==========================================
// 测试辅助函数
// ==========================================
// 职责: 临时数据库、共享连接、测试夹具路径
// ==========================================

#![allow(dead_code)]

use maverick_ops::db::{init_schema, open_sqlite_connection};
use rusqlite::Connection;
use std::error::Error;
use std::io::Write;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use tempfile::NamedTempFile;

/// 运单日志夹具文件名
pub const SHIPMENTS_FIXTURE: &str = "maverick_daily_shipments.csv";

/// Excel 运单日志夹具文件名（日期列为日期格式单元格）
pub const SHIPMENTS_XLSX_FIXTURE: &str = "maverick_daily_shipments.xlsx";

/// 任务源夹具文件名
pub const TASKS_FIXTURE: &str = "partner_tasks.json";

/// 创建临时测试数据库并初始化 schema
///
/// # 返回
/// - NamedTempFile: 临时数据库文件（需要保持存活）
/// - String: 数据库文件路径
pub fn create_test_db() -> Result<(NamedTempFile, String), Box<dyn Error>> {
    let temp_file = NamedTempFile::new()?;
    let db_path = temp_file.path().to_string_lossy().to_string();

    let conn = open_sqlite_connection(&db_path)?;
    init_schema(&conn)?;

    Ok((temp_file, db_path))
}

/// 打开共享连接（各仓储 / 服务共用）
pub fn shared_connection(db_path: &str) -> Result<Arc<Mutex<Connection>>, Box<dyn Error>> {
    let conn = open_sqlite_connection(db_path)?;
    Ok(Arc::new(Mutex::new(conn)))
}

/// 夹具文件路径
pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// 写入临时 CSV 文件
pub fn write_temp_csv(content: &str) -> Result<NamedTempFile, Box<dyn Error>> {
    write_temp_csv_bytes(content.as_bytes())
}

/// 写入临时 CSV 文件（原始字节，可含非 UTF-8 内容）
pub fn write_temp_csv_bytes(content: &[u8]) -> Result<NamedTempFile, Box<dyn Error>> {
    let mut file = tempfile::Builder::new().suffix(".csv").tempfile()?;
    file.write_all(content)?;
    file.flush()?;
    Ok(file)
}

/// 写入临时任务源 JSON 文件
pub fn write_temp_json(content: &str) -> Result<NamedTempFile, Box<dyn Error>> {
    let mut file = tempfile::Builder::new().suffix(".json").tempfile()?;
    file.write_all(content.as_bytes())?;
    file.flush()?;
    Ok(file)
}

/// 统计表行数
pub fn count_rows(conn: &Arc<Mutex<Connection>>, table: &str) -> i64 {
    let conn = conn.lock().unwrap();
    conn.query_row(&format!("SELECT COUNT(*) FROM {}", table), [], |row| row.get(0))
        .unwrap()
}
