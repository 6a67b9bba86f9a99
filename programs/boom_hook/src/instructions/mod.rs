pub mod execute;
pub mod meta_list;
pub mod whitelist;
