// ==========================================
// Maverick 物流运营 - 运单仓储
// ==========================================
// 表: daily_shipments
// 红线: Repository 不含业务逻辑（分类在导入层完成）
// ==========================================

use crate::domain::shipment::ShipmentRecord;
use crate::domain::types::{DeliveryStatus, TimelinessLabel};
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::{params, Connection, Row};
use std::sync::{Arc, Mutex};

const SELECT_COLUMNS: &str = r#"
    shipment_id, log_date, vehicle_id, driver_id, partner_contract,
    origin_city, destination_city, load_type, package_count, shipment_value_usd,
    planned_departure_datetime, actual_departure_datetime,
    planned_arrival_datetime, actual_arrival_datetime,
    miles_driven, fuel_consumed_gallons, fuel_efficiency_mpg,
    delivery_status, on_time_status_reported, on_time_status_calculated, notes
"#;

// ==========================================
// ShipmentRepository - 运单仓储
// ==========================================
pub struct ShipmentRepository {
    conn: Arc<Mutex<Connection>>,
}

impl ShipmentRepository {
    /// 从已有连接创建仓储实例
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// 批量写入运单（按 shipment_id 覆盖）
    ///
    /// # 返回
    /// - Ok(usize): 写入条数
    ///
    /// # 说明
    /// - 同一 shipment_id 再次导入时替换旧行
    /// - 单事务，失败整体回滚
    pub fn batch_upsert(&self, records: &[ShipmentRecord]) -> RepositoryResult<usize> {
        let conn = self.get_conn()?;
        let tx = conn.unchecked_transaction()?;

        let mut count = 0;
        {
            let mut stmt = tx.prepare(
                r#"
                INSERT INTO daily_shipments (
                    shipment_id, log_date, vehicle_id, driver_id, partner_contract,
                    origin_city, destination_city, load_type, package_count, shipment_value_usd,
                    planned_departure_datetime, actual_departure_datetime,
                    planned_arrival_datetime, actual_arrival_datetime,
                    miles_driven, fuel_consumed_gallons, fuel_efficiency_mpg,
                    delivery_status, on_time_status_reported, on_time_status_calculated, notes
                ) VALUES (
                    ?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11,
                    ?12, ?13, ?14, ?15, ?16, ?17, ?18, ?19, ?20, ?21
                )
                ON CONFLICT(shipment_id) DO UPDATE SET
                    log_date = excluded.log_date,
                    vehicle_id = excluded.vehicle_id,
                    driver_id = excluded.driver_id,
                    partner_contract = excluded.partner_contract,
                    origin_city = excluded.origin_city,
                    destination_city = excluded.destination_city,
                    load_type = excluded.load_type,
                    package_count = excluded.package_count,
                    shipment_value_usd = excluded.shipment_value_usd,
                    planned_departure_datetime = excluded.planned_departure_datetime,
                    actual_departure_datetime = excluded.actual_departure_datetime,
                    planned_arrival_datetime = excluded.planned_arrival_datetime,
                    actual_arrival_datetime = excluded.actual_arrival_datetime,
                    miles_driven = excluded.miles_driven,
                    fuel_consumed_gallons = excluded.fuel_consumed_gallons,
                    fuel_efficiency_mpg = excluded.fuel_efficiency_mpg,
                    delivery_status = excluded.delivery_status,
                    on_time_status_reported = excluded.on_time_status_reported,
                    on_time_status_calculated = excluded.on_time_status_calculated,
                    notes = excluded.notes
                "#,
            )?;

            for r in records {
                stmt.execute(params![
                    r.shipment_id,
                    r.log_date,
                    r.vehicle_id,
                    r.driver_id,
                    r.partner_contract,
                    r.origin_city,
                    r.destination_city,
                    r.load_type,
                    r.package_count,
                    r.shipment_value_usd,
                    r.planned_departure_datetime,
                    r.actual_departure_datetime,
                    r.planned_arrival_datetime,
                    r.actual_arrival_datetime,
                    r.miles_driven,
                    r.fuel_consumed_gallons,
                    r.fuel_efficiency_mpg,
                    r.delivery_status.as_str(),
                    r.on_time_status_reported,
                    r.on_time_status_calculated.as_str(),
                    r.notes,
                ])?;
                count += 1;
            }
        }

        tx.commit()?;
        Ok(count)
    }

    /// 查询统计口径内的运单（Delivered + In-Transit）
    ///
    /// # 参数
    /// - partner_contract: 指定合作方；None 表示全部
    pub fn list_reportable(
        &self,
        partner_contract: Option<&str>,
    ) -> RepositoryResult<Vec<ShipmentRecord>> {
        let conn = self.get_conn()?;
        let sql = format!(
            r#"
            SELECT {}
            FROM daily_shipments
            WHERE delivery_status IN ('Delivered', 'In-Transit')
              AND (?1 IS NULL OR partner_contract = ?1)
            ORDER BY shipment_id
            "#,
            SELECT_COLUMNS
        );
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt.query_map(params![partner_contract], map_shipment_row)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    /// 按 shipment_id 查询
    pub fn find_by_id(&self, shipment_id: &str) -> RepositoryResult<Option<ShipmentRecord>> {
        let conn = self.get_conn()?;
        let sql = format!(
            "SELECT {} FROM daily_shipments WHERE shipment_id = ?1",
            SELECT_COLUMNS
        );
        let result = conn.query_row(&sql, params![shipment_id], map_shipment_row);

        match result {
            Ok(record) => Ok(Some(record)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// 运单总行数（含全部状态）
    pub fn count_all(&self) -> RepositoryResult<usize> {
        let conn = self.get_conn()?;
        let n: i64 = conn.query_row("SELECT COUNT(*) FROM daily_shipments", [], |row| row.get(0))?;
        Ok(n as usize)
    }

    /// 运单中出现过的合作方（去重、升序）
    pub fn list_partner_contracts(&self) -> RepositoryResult<Vec<String>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT DISTINCT partner_contract
            FROM daily_shipments
            WHERE partner_contract IS NOT NULL AND partner_contract <> ''
            ORDER BY partner_contract
            "#,
        )?;
        let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }
}

fn map_shipment_row(row: &Row<'_>) -> rusqlite::Result<ShipmentRecord> {
    Ok(ShipmentRecord {
        shipment_id: row.get(0)?,
        log_date: row.get(1)?,
        vehicle_id: row.get(2)?,
        driver_id: row.get(3)?,
        partner_contract: row.get(4)?,
        origin_city: row.get(5)?,
        destination_city: row.get(6)?,
        load_type: row.get(7)?,
        package_count: row.get(8)?,
        shipment_value_usd: row.get(9)?,
        planned_departure_datetime: row.get(10)?,
        actual_departure_datetime: row.get(11)?,
        planned_arrival_datetime: row.get(12)?,
        actual_arrival_datetime: row.get(13)?,
        miles_driven: row.get(14)?,
        fuel_consumed_gallons: row.get(15)?,
        fuel_efficiency_mpg: row.get(16)?,
        delivery_status: DeliveryStatus::parse(&row.get::<_, String>(17)?),
        on_time_status_reported: row.get(18)?,
        on_time_status_calculated: TimelinessLabel::from_db_str(&row.get::<_, String>(19)?),
        notes: row.get(20)?,
    })
}
