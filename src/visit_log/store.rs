//! 访问日志存储和异步持久化

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use parking_lot::RwLock;
use tokio::sync::mpsc;

use crate::geoip::GeoInfo;
use crate::model::visit::{VisitRecord, classify_device};

/// 去抖窗口：窗口内的多次追加合并为一次全量写盘
const DEBOUNCE_WINDOW: Duration = Duration::from_secs(1);

/// 进程内访问日志（追加式，带文件持久化）
///
/// 记录追加后不再修改或删除。持久化由单个后台任务负责：
/// 每次追加发送一个“日志已变更”信号，任务收到信号后等待一个
/// 去抖窗口、排空积压信号，再把当前完整快照写入文件，
/// 保证落盘的总是最后一次入队时的状态。
pub struct VisitLog {
    records: Arc<RwLock<Vec<VisitRecord>>>,
    flush_tx: mpsc::Sender<()>,
}

impl VisitLog {
    /// 打开访问日志，启动后台写入任务
    ///
    /// 文件存在且可解析时作为初始日志加载；解析失败记录 warn
    /// 并从空日志开始，不会使进程退出。
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self::with_debounce(path, DEBOUNCE_WINDOW)
    }

    /// 指定去抖窗口打开（测试用短窗口）
    pub fn with_debounce(path: impl Into<PathBuf>, debounce: Duration) -> Self {
        let path = path.into();
        let records = Arc::new(RwLock::new(load_records(&path)));
        let (flush_tx, flush_rx) = mpsc::channel(16);

        tokio::spawn(flush_loop(records.clone(), path, flush_rx, debounce));

        Self { records, flush_tx }
    }

    /// 追加一条访问记录，返回追加后的记录
    ///
    /// 序号在写锁内分配为 `当前长度 + 1`，并发请求下保持单调且不重复。
    pub fn append(&self, ip: String, geo: GeoInfo, user_agent: String) -> VisitRecord {
        let record = {
            let mut records = self.records.write();
            let record = VisitRecord {
                seq: records.len() as u64 + 1,
                ip,
                city: geo.city,
                region_name: geo.region_name,
                country: geo.country,
                lat: geo.lat,
                lon: geo.lon,
                device: classify_device(&user_agent).to_string(),
                user_agent,
                timestamp: Utc::now().to_rfc3339(),
            };
            records.push(record.clone());
            record
        };

        // channel 满说明已有待处理的写盘信号，合并即可
        let _ = self.flush_tx.try_send(());

        record
    }

    /// 当前日志的完整快照（按追加顺序）
    pub fn snapshot(&self) -> Vec<VisitRecord> {
        self.records.read().clone()
    }

    /// 当前记录条数
    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }
}

/// 从文件加载初始日志
fn load_records(path: &Path) -> Vec<VisitRecord> {
    if !path.exists() {
        return Vec::new();
    }

    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            tracing::warn!("读取访问日志文件失败，从空日志开始: {} ({})", e, path.display());
            return Vec::new();
        }
    };

    match serde_json::from_str::<Vec<VisitRecord>>(&content) {
        Ok(records) => {
            tracing::info!("已加载 {} 条历史访问记录: {}", records.len(), path.display());
            records
        }
        Err(e) => {
            tracing::warn!("解析访问日志文件失败，从空日志开始: {} ({})", e, path.display());
            Vec::new()
        }
    }
}

/// 后台写盘循环（单写者）
async fn flush_loop(
    records: Arc<RwLock<Vec<VisitRecord>>>,
    path: PathBuf,
    mut flush_rx: mpsc::Receiver<()>,
    debounce: Duration,
) {
    while flush_rx.recv().await.is_some() {
        // 去抖：等待窗口结束，再排空期间积累的信号
        tokio::time::sleep(debounce).await;
        while flush_rx.try_recv().is_ok() {}

        let snapshot = records.read().clone();
        match serde_json::to_string_pretty(&snapshot) {
            Ok(content) => {
                if let Err(e) = tokio::fs::write(&path, content).await {
                    tracing::warn!("写入访问日志文件失败: {} ({})", e, path.display());
                } else {
                    tracing::debug!("已持久化 {} 条访问记录", snapshot.len());
                }
            }
            Err(e) => tracing::warn!("序列化访问日志失败: {}", e),
        }
    }
    tracing::debug!("访问日志写盘循环已退出");
}
