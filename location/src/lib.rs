//! 店铺客户端的收货地址模块
//!
//! 负责登录状态, 收货地址列表的拉取/增删改, 以及购物车和结算页使用的"当前选中地址".

pub mod address;
pub mod api;
pub mod auth;
pub mod manager;
pub mod policy;
pub mod remote;
pub mod session;
pub mod storage;

pub use address::Address;
pub use api::ApiClient;
pub use auth::AuthContext;
pub use manager::{LocationManager, LocationSnapshot};
pub use remote::HttpAddressStorage;
pub use storage::{AddressStorage, MemoryAddressStorage};
