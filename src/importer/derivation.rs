// ==========================================
// Maverick 物流运营 - 字段派生
// ==========================================
// 导入时一次性派生，落库后不再重算:
// - fuel_efficiency_mpg
// - on_time_status_calculated
// ==========================================

use crate::domain::shipment::{RawShipmentRow, ShipmentRecord};
use crate::domain::types::DeliveryStatus;
use crate::engine::timeliness::{fuel_efficiency, TimelinessClassifier};

/// RawShipmentRow → ShipmentRecord
pub fn derive_shipment_record(
    raw: RawShipmentRow,
    classifier: &TimelinessClassifier,
) -> ShipmentRecord {
    let delivery_status = DeliveryStatus::parse(&raw.delivery_status);
    let label = classifier.classify(
        &raw.planned_arrival_datetime,
        raw.actual_arrival_datetime.as_deref(),
        &delivery_status,
    );
    let mpg = fuel_efficiency(raw.miles_driven, raw.fuel_consumed_gallons);

    ShipmentRecord {
        shipment_id: raw.shipment_id,
        log_date: raw.log_date,
        vehicle_id: raw.vehicle_id,
        driver_id: raw.driver_id,
        partner_contract: raw.partner_contract,
        origin_city: raw.origin_city,
        destination_city: raw.destination_city,
        load_type: raw.load_type,
        package_count: raw.package_count,
        shipment_value_usd: raw.shipment_value_usd,
        planned_departure_datetime: raw.planned_departure_datetime,
        actual_departure_datetime: raw.actual_departure_datetime,
        planned_arrival_datetime: raw.planned_arrival_datetime,
        actual_arrival_datetime: raw.actual_arrival_datetime,
        miles_driven: raw.miles_driven,
        fuel_consumed_gallons: raw.fuel_consumed_gallons,
        fuel_efficiency_mpg: mpg,
        delivery_status,
        on_time_status_reported: raw.on_time_status_reported,
        on_time_status_calculated: label,
        notes: raw.notes,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::TimelinessLabel;

    #[test]
    fn test_派生标签与油耗() {
        let raw = RawShipmentRow {
            row_number: 1,
            shipment_id: "MAV-001".to_string(),
            planned_arrival_datetime: "2024-01-01T10:00:00".to_string(),
            actual_arrival_datetime: Some("2024-01-01T10:14:00".to_string()),
            miles_driven: Some(300.0),
            fuel_consumed_gallons: Some(45.0),
            delivery_status: "Delivered".to_string(),
            ..Default::default()
        };

        let record = derive_shipment_record(raw, &TimelinessClassifier::default());
        assert_eq!(record.on_time_status_calculated, TimelinessLabel::OnTime);
        assert_eq!(record.fuel_efficiency_mpg, 6.67);
        assert_eq!(record.delivery_status, DeliveryStatus::Delivered);
    }

    #[test]
    fn test_非法时间戳保留行() {
        let raw = RawShipmentRow {
            shipment_id: "MAV-002".to_string(),
            planned_arrival_datetime: "TBD".to_string(),
            actual_arrival_datetime: Some("2024-01-01T10:14:00".to_string()),
            delivery_status: "Delivered".to_string(),
            ..Default::default()
        };

        let record = derive_shipment_record(raw, &TimelinessClassifier::default());
        assert_eq!(record.on_time_status_calculated, TimelinessLabel::Error);
        assert_eq!(record.fuel_efficiency_mpg, 0.0);
    }
}
