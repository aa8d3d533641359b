//! 当前收货地址的选择规则
//!
//! 每次刷新地址列表后按以下顺序决定选中的地址:
//! 1. 列表中第一个 `is_default` 的地址为默认地址
//! 2. 存在默认地址且与上一次选中的不是同一个(或之前没有选中) -> 选中默认地址
//! 3. 上一次选中的地址仍在列表中 -> 选中刷新后的这条记录
//! 4. 否则选默认地址, 没有默认地址选第一个, 列表为空则不选

use crate::address::Address;

/// 后端不保证默认地址唯一, 取第一个
pub fn find_default(addresses: &[Address]) -> Option<&Address> {
    addresses.iter().find(|item| item.is_default)
}

pub fn select_address(addresses: &[Address], prev: Option<&Address>) -> Option<Address> {
    let default_addr = find_default(addresses);

    if let Some(default_addr) = default_addr {
        if prev.map_or(true, |prev| prev.id != default_addr.id) {
            return Some(default_addr.clone());
        }
    }

    if let Some(prev) = prev {
        if let Some(current) = addresses.iter().find(|item| item.id == prev.id) {
            return Some(current.clone());
        }
    }

    default_addr.or_else(|| addresses.first()).cloned()
}
