pub mod a001_dispatch;
pub mod a002_inventory;
