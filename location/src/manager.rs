//! 收货地址选择管理
//!
//! [`LocationManager`] 是地址列表和当前选中地址的唯一持有者, 购物车/结算/地址簿
//! 等页面只读取 [`LocationSnapshot`] 快照或订阅变更, 不保留可变副本.
//!
//! 并发请求不做串行化, 刷新结果按请求序号生效: 比已生效结果更早发出的刷新会被丢弃,
//! 退出登录清空状态时也会推进序号, 迟到的刷新不会把数据写回.

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

use common::error::{ApiError, ApiResult};
use common::request::address::ReqAddressInfo;

use crate::address::{normalize, normalize_all, Address};
use crate::policy::select_address;
use crate::storage::AddressStorage;

/// 提供给页面的只读快照
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LocationSnapshot {
    pub addresses: Vec<Address>,
    pub selected_address: Option<Address>,
    pub loading: bool,
}

pub struct LocationManager {
    storage: Arc<dyn AddressStorage>,
    auth: watch::Receiver<bool>,
    state: watch::Sender<LocationSnapshot>,
    in_flight: AtomicUsize,
    // 已发出的请求序号
    issued: AtomicU64,
    // 最近一次生效的请求序号
    applied: AtomicU64,
}

/// 请求期间保持 loading, 结束(包括出错和取消)时自动释放
struct LoadingGuard<'a> {
    manager: &'a LocationManager,
}

impl<'a> LoadingGuard<'a> {
    fn new(manager: &'a LocationManager) -> Self {
        manager.in_flight.fetch_add(1, Ordering::SeqCst);
        manager.sync_loading();

        Self { manager }
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.manager.in_flight.fetch_sub(1, Ordering::SeqCst);
        self.manager.sync_loading();
    }
}

impl LocationManager {
    pub fn new(storage: Arc<dyn AddressStorage>, auth: watch::Receiver<bool>) -> Self {
        let (state, _) = watch::channel(LocationSnapshot::default());

        Self {
            storage,
            auth,
            state,
            in_flight: AtomicUsize::new(0),
            issued: AtomicU64::new(0),
            applied: AtomicU64::new(0),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        *self.auth.borrow()
    }

    pub fn snapshot(&self) -> LocationSnapshot {
        self.state.borrow().clone()
    }

    pub fn addresses(&self) -> Vec<Address> {
        self.state.borrow().addresses.clone()
    }

    pub fn selected_address(&self) -> Option<Address> {
        self.state.borrow().selected_address.clone()
    }

    pub fn loading(&self) -> bool {
        self.state.borrow().loading
    }

    /// 订阅状态变更
    pub fn subscribe(&self) -> watch::Receiver<LocationSnapshot> {
        self.state.subscribe()
    }

    fn sync_loading(&self) {
        self.state.send_if_modified(|state| {
            let loading = self.in_flight.load(Ordering::SeqCst) > 0;
            if state.loading == loading {
                return false;
            }
            state.loading = loading;
            true
        });
    }

    fn next_seq(&self) -> u64 {
        self.issued.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// 清空地址和选中状态, 不访问后端
    pub fn clear(&self) {
        let seq = self.next_seq();
        self.state.send_if_modified(|state| {
            self.applied.fetch_max(seq, Ordering::SeqCst);
            if state.addresses.is_empty() && state.selected_address.is_none() {
                return false;
            }
            state.addresses.clear();
            state.selected_address = None;
            true
        });
    }

    /// 重新拉取地址列表并按选择规则更新选中地址
    ///
    /// 未登录时只清空状态. 拉取失败只记录日志, 保留原有数据.
    pub async fn refresh(&self) {
        if !self.is_authenticated() {
            self.clear();
            return;
        }

        let seq = self.next_seq();
        let _loading = LoadingGuard::new(self);

        match self.storage.list().await.and_then(normalize_all) {
            Ok(addresses) => self.apply(seq, addresses),
            Err(err) => error!("Failed to fetch addresses: {}", err),
        }
    }

    fn apply(&self, seq: u64, addresses: Vec<Address>) {
        self.state.send_if_modified(|state| {
            if seq < self.applied.load(Ordering::SeqCst) {
                debug!("discarding stale address list #{}", seq);
                return false;
            }
            self.applied.store(seq, Ordering::SeqCst);

            let selected = select_address(&addresses, state.selected_address.as_ref());
            let changed = state.addresses != addresses || state.selected_address != selected;
            state.addresses = addresses;
            state.selected_address = selected;
            changed
        });
    }

    /// 立即切换选中地址
    pub fn set_selected(&self, address: Address) {
        self.state.send_modify(|state| state.selected_address = Some(address));
    }

    /// 选中地址; `persistent` 为 true 时同时设为默认地址并刷新.
    /// 设为默认失败只记录日志, 不回滚已切换的选中地址. 未登录时保持清空状态.
    pub async fn select(&self, address: Address, persistent: bool) {
        if !self.is_authenticated() {
            debug!("ignoring selection of {} while signed out", address.id);
            self.clear();
            return;
        }

        let id = address.id.clone();
        self.set_selected(address);
        if !persistent {
            return;
        }

        let _loading = LoadingGuard::new(self);
        match self.storage.update(&id, &ReqAddressInfo::make_default()).await {
            Ok(_) => self.refresh().await,
            Err(err) => error!("Failed to update default address on selection: {}", err),
        }
    }

    fn ensure_authenticated(&self) -> ApiResult<()> {
        if !self.is_authenticated() {
            return Err(ApiError::Unauthenticated);
        }

        Ok(())
    }

    /// 新建收货地址, 成功后刷新
    pub async fn create_address(&self, info: &ReqAddressInfo) -> ApiResult<Address> {
        self.ensure_authenticated()?;
        info.validate_for_create()?;

        let _loading = LoadingGuard::new(self);
        let created = normalize(self.storage.create(info).await?)?;
        info!("address {} created", created.id);
        self.refresh().await;

        Ok(created)
    }

    /// 修改收货地址, 成功后刷新
    pub async fn update_address(&self, id: &str, info: &ReqAddressInfo) -> ApiResult<Address> {
        self.ensure_authenticated()?;

        let _loading = LoadingGuard::new(self);
        let updated = normalize(self.storage.update(id, info).await?)?;
        self.refresh().await;

        Ok(updated)
    }

    /// 删除收货地址, 成功后刷新
    pub async fn delete_address(&self, id: &str) -> ApiResult<String> {
        self.ensure_authenticated()?;

        let _loading = LoadingGuard::new(self);
        let message = self.storage.delete(id).await?;
        info!("address {} deleted", id);
        self.refresh().await;

        Ok(message)
    }

    /// 地址簿中的"设为默认", 失败返回给调用方
    pub async fn set_default(&self, id: &str) -> ApiResult<Address> {
        self.update_address(id, &ReqAddressInfo::make_default()).await
    }

    /// 登录后刷新, 退出后立即清空
    pub async fn on_auth_changed(&self, authenticated: bool) {
        if authenticated {
            self.refresh().await;
        } else {
            self.clear();
        }
    }

    /// 跟随登录状态变化, 包括当前的初始状态
    pub fn watch_auth(self: &Arc<Self>) -> JoinHandle<()> {
        let manager = Arc::clone(self);
        let mut auth = self.auth.clone();

        tokio::spawn(async move {
            loop {
                let authenticated = *auth.borrow_and_update();
                if authenticated {
                    let manager = Arc::clone(&manager);
                    tokio::spawn(async move { manager.on_auth_changed(true).await });
                } else {
                    manager.on_auth_changed(false).await;
                }

                if auth.changed().await.is_err() {
                    debug!("auth signal closed, stop watching");
                    break;
                }
            }
        })
    }
}
