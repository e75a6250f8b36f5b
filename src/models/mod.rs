pub mod car;
pub mod client;
pub mod pagination;
pub mod report;
pub mod sale;
pub mod seller;
pub mod user;

pub use car::{Car, CarCreate, CarStatus, CarUpdate};
pub use client::{Client, ClientCreate, ClientUpdate};
pub use pagination::{PageParams, Paginated};
pub use report::{
    DashboardResponse, SalesByCarItem, SalesByCarResponse, SalesByDateItem, SalesByDateResponse,
    SalesBySellerItem, SalesBySellerResponse, SalesChartItem, TopSeller,
};
pub use sale::{Sale, SaleCreate, SaleResponse};
pub use seller::{Seller, SellerCreate, SellerResponse, SellerUpdate};
pub use user::{User, UserCreate, UserResponse, UserRole};
