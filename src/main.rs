// ==========================================
// Maverick 物流运营 - 命令行入口
// ==========================================
// 用法:
//   maverick-ops [--db <path>] <命令>
//   maverick-ops ingest [shipments.csv|.xlsx] [tasks.json|http(s)://任务源]
//   maverick-ops summary
//   maverick-ops partner <partner_contract>
//   maverick-ops partners
//   maverick-ops batches [limit]
//
// 数据库路径: --db → MAVERICK_DB_PATH → 用户数据目录
// 输出: stdout 为 JSON，日志写 stderr
// ==========================================

use anyhow::{anyhow, bail, Context};
use maverick_ops::app::{get_default_db_path, AppState};
use maverick_ops::importer::{HttpTaskFeed, JsonFileTaskFeed, TaskFeed};
use maverick_ops::logging;
use serde::Serialize;
use std::path::PathBuf;

const DEFAULT_SHIPMENTS_FILE: &str = "maverick_daily_shipments.csv";
const DEFAULT_TASKS_FILE: &str = "partner_tasks.json";
const DEFAULT_BATCH_LIMIT: usize = 10;

fn main() -> anyhow::Result<()> {
    logging::init();

    let mut args = std::env::args().skip(1).peekable();

    // 可选: --db <path> 覆盖默认数据库路径
    let db_path = if args.peek().map(String::as_str) == Some("--db") {
        args.next();
        args.next().ok_or_else(|| anyhow!("--db 缺少路径参数"))?
    } else {
        get_default_db_path()
    };
    let command = args.next().unwrap_or_else(|| "summary".to_string());

    tracing::info!(version = maverick_ops::VERSION, db_path = %db_path, "{}", maverick_ops::APP_NAME);

    let state = AppState::new(db_path).map_err(|e| anyhow!(e))?;

    match command.as_str() {
        "ingest" => {
            let shipments = PathBuf::from(
                args.next()
                    .unwrap_or_else(|| DEFAULT_SHIPMENTS_FILE.to_string()),
            );
            let tasks = args.next().unwrap_or_else(|| DEFAULT_TASKS_FILE.to_string());
            let feed: Box<dyn TaskFeed> =
                if tasks.starts_with("http://") || tasks.starts_with("https://") {
                    Box::new(HttpTaskFeed::new(&tasks))
                } else {
                    Box::new(JsonFileTaskFeed::new(&tasks))
                };

            let summary = state
                .ingestion
                .run(&shipments, feed.as_ref())
                .context("导入流程失败")?;
            print_json(&summary)
        }
        "summary" => print_json(&state.operations_api.get_daily_summary()?),
        "partner" => {
            let partner = args
                .next()
                .ok_or_else(|| anyhow!("缺少参数: partner <partner_contract>"))?;
            print_json(&state.operations_api.get_partner_status(&partner)?)
        }
        "partners" => print_json(&state.operations_api.list_partners()?),
        "batches" => {
            let limit = match args.next() {
                Some(v) => v
                    .trim()
                    .parse::<usize>()
                    .with_context(|| format!("limit 不是有效数字: {}", v))?,
                None => DEFAULT_BATCH_LIMIT,
            };
            print_json(&state.ingestion.recent_batches(limit)?)
        }
        other => bail!(
            "未知命令: {} (可用: ingest, summary, partner, partners, batches)",
            other
        ),
    }
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
