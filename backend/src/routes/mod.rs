pub mod carriers;
pub mod slotting;
pub mod storage_map;
pub mod transport;
pub mod zones;
