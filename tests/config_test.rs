// ==========================================
// ConfigManager 集成测试
// ==========================================
// 测试目标: config_kv 读写与 IngestConfigReader 默认值
// ==========================================

mod test_helpers;

use maverick_ops::config::{config_keys, ConfigManager, IngestConfigReader, PartnerSource};
use maverick_ops::importer::{InMemoryTaskFeed, IngestionService};
use maverick_ops::repository::PartnerTaskRepository;
use test_helpers::{create_test_db, shared_connection};

#[test]
fn test_默认配置() {
    let (_temp_file, db_path) = create_test_db().unwrap();
    let config = ConfigManager::new(&db_path).unwrap();

    assert_eq!(config.get_on_time_grace_minutes().unwrap(), 15);
    assert_eq!(config.get_tasks_per_partner().unwrap(), 5);

    let sources = config.get_partner_sources().unwrap();
    assert_eq!(sources.len(), 6);
    assert_eq!(sources[0].source_user_id, 1);
    assert_eq!(sources[0].partner_contract, "Amazon-Prime");
    assert_eq!(sources[5].partner_contract, "Enterprise-Corp");
}

#[test]
fn test_配置覆写持久化() {
    let (_temp_file, db_path) = create_test_db().unwrap();
    {
        let config = ConfigManager::new(&db_path).unwrap();
        config
            .set_global_config_value(config_keys::ON_TIME_GRACE_MINUTES, "30")
            .unwrap();
        config
            .set_global_config_value(config_keys::TASKS_PER_PARTNER, " 3 ")
            .unwrap();
    }

    let reopened = ConfigManager::new(&db_path).unwrap();
    assert_eq!(reopened.get_on_time_grace_minutes().unwrap(), 30);
    assert_eq!(reopened.get_tasks_per_partner().unwrap(), 3);
    assert_eq!(
        reopened
            .get_global_config_value(config_keys::ON_TIME_GRACE_MINUTES)
            .unwrap()
            .as_deref(),
        Some("30")
    );
}

#[test]
fn test_配置值格式错误() {
    let (_temp_file, db_path) = create_test_db().unwrap();
    let config = ConfigManager::new(&db_path).unwrap();
    config
        .set_global_config_value(config_keys::ON_TIME_GRACE_MINUTES, "fifteen")
        .unwrap();

    assert!(config.get_on_time_grace_minutes().is_err());
}

#[test]
fn test_合作方映射覆写() {
    let (_temp_file, db_path) = create_test_db().unwrap();
    let config = ConfigManager::new(&db_path).unwrap();

    config
        .set_partner_sources(&[
            PartnerSource {
                source_user_id: 9,
                partner_contract: "Penske-Regional".to_string(),
            },
            PartnerSource {
                source_user_id: 2,
                partner_contract: "Hertz-Local".to_string(),
            },
        ])
        .unwrap();

    let sources = config.get_partner_sources().unwrap();
    assert_eq!(sources.len(), 2);
    assert_eq!(sources[0].source_user_id, 2);
    assert_eq!(sources[1].partner_contract, "Penske-Regional");
}

#[test]
fn test_配置驱动导入() {
    let (_temp_file, db_path) = create_test_db().unwrap();
    let conn = shared_connection(&db_path).unwrap();

    let config = ConfigManager::from_connection(conn.clone()).unwrap();
    config
        .set_partner_sources(&[PartnerSource {
            source_user_id: 9,
            partner_contract: "Penske-Regional".to_string(),
        }])
        .unwrap();
    config
        .set_global_config_value(config_keys::TASKS_PER_PARTNER, "1")
        .unwrap();

    let service = IngestionService::new(conn.clone(), config);
    let feed = InMemoryTaskFeed::new()
        .with_task(9, 1, "inspect trucks", false)
        .with_task(9, 2, "sign renewal", true)
        .with_task(1, 3, "unmapped", true);
    let batch = service.ingest_partner_tasks(&feed);
    assert_eq!(batch.rows_ingested, 1);

    let repo = PartnerTaskRepository::from_connection(conn);
    let records = repo.list_by_partner(None).unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].partner_contract, "Penske-Regional");
    assert_eq!(records[0].task_source_id, 1);
}
