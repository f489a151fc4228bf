pub mod user_repo;
pub use user_repo::UserRepository;
pub mod message_repo;
pub use message_repo::MessageRepository;
pub mod finance_repo;
pub use finance_repo::FinanceRepository;
pub mod unit_repo;
pub use unit_repo::UnitRepository;
