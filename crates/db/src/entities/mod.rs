//! `SeaORM` entity definitions.

pub mod monthly_closes;
