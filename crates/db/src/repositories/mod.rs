//! Repository implementations for data access.

pub mod period_lock;

pub use period_lock::PeriodLockRepository;
