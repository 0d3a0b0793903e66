//! Общие типы backend и клиентов: агрегаты, перечисления, DTO и
//! классификатор приоритетов правил.

pub mod dashboards;
pub mod domain;
pub mod enums;
pub mod projections;
pub mod shared;
pub mod system;
