pub mod explosion;
pub mod issuance;
pub mod lottery;
pub mod pool;
pub mod presale;
pub mod sequencer;
