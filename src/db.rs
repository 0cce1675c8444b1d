// ==========================================
// Maverick 物流运营 - SQLite 连接与建表
// ==========================================
// 目标:
// - 统一所有 Connection::open 的 PRAGMA 行为
// - 统一 busy_timeout，减少导入与查询交错时的偶发 busy 错误
// - 建表幂等（CREATE TABLE IF NOT EXISTS），可重复执行
// ==========================================

use rusqlite::Connection;
use rusqlite::OptionalExtension;
use std::time::Duration;

/// 默认 busy_timeout（毫秒）
pub const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;

/// 当前代码所期望的 schema_version
pub const CURRENT_SCHEMA_VERSION: i64 = 1;

/// 配置 SQLite 连接的统一 PRAGMA
///
/// 说明：
/// - foreign_keys 需要“每个连接”单独开启
/// - busy_timeout 需要“每个连接”单独配置
pub fn configure_sqlite_connection(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.busy_timeout(Duration::from_millis(DEFAULT_BUSY_TIMEOUT_MS))?;
    Ok(())
}

/// 打开 SQLite 连接并应用统一配置
pub fn open_sqlite_connection(db_path: &str) -> rusqlite::Result<Connection> {
    let conn = Connection::open(db_path)?;
    configure_sqlite_connection(&conn)?;
    Ok(conn)
}

/// 创建全部业务表（幂等）
///
/// 表:
/// - daily_shipments: 已分类运单（shipment_id 唯一）
/// - partner_tasks_status: 合作方任务健康（(partner_contract, task_source_id) 唯一）
/// - ingest_batch: 导入步骤审计
/// - config_kv: 全局配置
/// - schema_version: 版本标记
pub fn init_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS schema_version (
            version INTEGER PRIMARY KEY,
            applied_at TEXT NOT NULL DEFAULT (datetime('now'))
        );

        CREATE TABLE IF NOT EXISTS config_kv (
            scope_id TEXT NOT NULL,
            key TEXT NOT NULL,
            value TEXT NOT NULL,
            updated_at TEXT NOT NULL DEFAULT (datetime('now')),
            PRIMARY KEY (scope_id, key)
        );

        CREATE TABLE IF NOT EXISTS daily_shipments (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            shipment_id TEXT NOT NULL UNIQUE,
            log_date TEXT,
            vehicle_id TEXT,
            driver_id TEXT,
            partner_contract TEXT,
            origin_city TEXT,
            destination_city TEXT,
            load_type TEXT,
            package_count INTEGER,
            shipment_value_usd REAL,
            planned_departure_datetime TEXT,
            actual_departure_datetime TEXT,
            planned_arrival_datetime TEXT NOT NULL,
            actual_arrival_datetime TEXT,
            miles_driven REAL,
            fuel_consumed_gallons REAL,
            fuel_efficiency_mpg REAL NOT NULL DEFAULT 0,
            delivery_status TEXT NOT NULL,
            on_time_status_reported TEXT,
            on_time_status_calculated TEXT NOT NULL,
            notes TEXT
        );

        CREATE INDEX IF NOT EXISTS idx_daily_shipments_partner
            ON daily_shipments(partner_contract, delivery_status);

        CREATE TABLE IF NOT EXISTS partner_tasks_status (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            partner_contract TEXT NOT NULL,
            task_source_id INTEGER NOT NULL,
            task_title TEXT NOT NULL,
            task_completed_status INTEGER NOT NULL,
            simulated_service_health TEXT NOT NULL,
            log_timestamp TEXT NOT NULL,
            UNIQUE (partner_contract, task_source_id)
        );

        CREATE TABLE IF NOT EXISTS ingest_batch (
            batch_id TEXT PRIMARY KEY,
            step TEXT NOT NULL,
            source TEXT NOT NULL,
            started_at TEXT NOT NULL,
            finished_at TEXT NOT NULL,
            rows_ingested INTEGER NOT NULL,
            rows_skipped INTEGER NOT NULL,
            status TEXT NOT NULL,
            message TEXT
        );
        "#,
    )?;

    conn.execute(
        "INSERT OR IGNORE INTO schema_version (version) VALUES (?1)",
        [CURRENT_SCHEMA_VERSION],
    )?;
    Ok(())
}

/// 读取 schema_version（若表不存在则返回 None）
pub fn read_schema_version(conn: &Connection) -> rusqlite::Result<Option<i64>> {
    let has_table: bool = conn
        .query_row(
            "SELECT 1 FROM sqlite_master WHERE type='table' AND name='schema_version' LIMIT 1",
            [],
            |_row| Ok(true),
        )
        .optional()?
        .unwrap_or(false);

    if !has_table {
        return Ok(None);
    }

    let v: Option<i64> = conn.query_row("SELECT MAX(version) FROM schema_version", [], |row| row.get(0))?;
    Ok(v)
}
