use futures_util::future::join_all;
use serde::Serialize;
use thiserror::Error;
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

use crate::cache::keys::refresh_lock_key;
use crate::cache::{Cache, CacheError};
use crate::constants::{NetworkId, networks_for};
use crate::indexer::fetch::IndexerClient;
use crate::indexer::lock::RefreshLock;
use crate::models::{Account, Instance};

#[derive(Debug, Error)]
pub enum RefreshError {
    #[error("failed to acquire refresh lock: {0}")]
    Lock(#[from] CacheError),
}

/// 刷新模式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshMode {
    /// 调用方等待所有拉取任务完成
    Synchronous,
    /// 拉取在后台运行，结果只写入日志
    Detached,
}

impl RefreshMode {
    pub fn from_latest(latest: bool) -> Self {
        if latest {
            RefreshMode::Synchronous
        } else {
            RefreshMode::Detached
        }
    }
}

/// 一次刷新的汇总，仅供参考，不表示失败
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RefreshSummary {
    pub scheduled: usize,
    pub delivered: usize,
    pub soft_failures: usize,
}

#[derive(Debug)]
pub enum RefreshOutcome {
    /// 锁已被占用，本次没有发起任何拉取
    Skipped,
    Completed(RefreshSummary),
    /// 后台任务句柄，其结果只会进入日志
    Detached(JoinHandle<()>),
}

/// 展开完整的账户集合（调用方提供的账户加上身份自身），
/// 并为每个账户的每个适用网络生成一个拉取组合
pub fn fetch_plan(instance: &Instance, accounts: Vec<Account>) -> Vec<(Account, NetworkId)> {
    accounts
        .into_iter()
        .chain(std::iter::once(Account::own(instance)))
        .flat_map(|account| {
            networks_for(account.platform)
                .iter()
                .map(move |network_id| (account.clone(), *network_id))
        })
        .collect()
}

/// 去重的并发刷新任务
#[derive(Clone)]
pub struct Refresher {
    lock: RefreshLock,
    indexer: IndexerClient,
}

impl Refresher {
    pub fn new(cache: Cache, indexer: IndexerClient) -> Self {
        Self {
            lock: RefreshLock::new(cache),
            indexer,
        }
    }

    /// 刷新身份的所有关联账户
    ///
    /// 锁被占用时直接返回 [`RefreshOutcome::Skipped`]。只有同步模式会返回获取锁时的错误，
    /// 后台模式下所有错误都只记录日志。
    pub async fn refresh(
        &self,
        instance: &Instance,
        accounts: Vec<Account>,
        mode: RefreshMode,
    ) -> Result<RefreshOutcome, RefreshError> {
        let key = refresh_lock_key(&instance.uri());

        let acquired = match self.lock.try_acquire(&key).await {
            Ok(acquired) => acquired,
            Err(e) if mode == RefreshMode::Synchronous => return Err(e.into()),
            Err(e) => {
                error!(instance = %instance, error = %e, "Failed to acquire refresh lock");
                return Ok(RefreshOutcome::Skipped);
            }
        };

        if !acquired {
            debug!(instance = %instance, "Refresh already in progress, skipping");
            return Ok(RefreshOutcome::Skipped);
        }

        let plan = fetch_plan(instance, accounts);

        match mode {
            RefreshMode::Synchronous => Ok(RefreshOutcome::Completed(self.fan_out(plan).await)),
            RefreshMode::Detached => {
                let refresher = self.clone();
                let instance = instance.to_string();
                let handle = tokio::spawn(async move {
                    let summary = refresher.fan_out(plan).await;
                    info!(
                        instance = %instance,
                        scheduled = summary.scheduled,
                        delivered = summary.delivered,
                        soft_failures = summary.soft_failures,
                        "Detached refresh finished"
                    );
                });
                Ok(RefreshOutcome::Detached(handle))
            }
        }
    }

    /// 为每个组合启动一个拉取任务，并等待全部完成
    async fn fan_out(&self, plan: Vec<(Account, NetworkId)>) -> RefreshSummary {
        let handles: Vec<_> = plan
            .into_iter()
            .map(|(account, network_id)| {
                let indexer = self.indexer.clone();
                tokio::spawn(async move { indexer.fetch_item(&account, network_id).await })
            })
            .collect();

        let mut summary = RefreshSummary {
            scheduled: handles.len(),
            ..Default::default()
        };

        for result in join_all(handles).await {
            match result {
                Ok(outcome) if !outcome.is_soft_failure() => summary.delivered += 1,
                Ok(_) => summary.soft_failures += 1,
                Err(e) => {
                    error!(error = %e, "Fetch task did not run to completion");
                    summary.soft_failures += 1;
                }
            }
        }

        summary
    }
}
