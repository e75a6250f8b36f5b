pub mod car_repo;
pub mod client_repo;
pub mod report_repo;
pub mod sale_repo;
pub mod seller_repo;
pub mod user_repo;

pub use car_repo::CarRepository;
pub use client_repo::ClientRepository;
pub use report_repo::ReportRepository;
pub use sale_repo::SaleRepository;
pub use seller_repo::SellerRepository;
pub use user_repo::UserRepository;
