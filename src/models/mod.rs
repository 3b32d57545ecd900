//! Wire models of the offer API.

mod address;
mod pricing;
mod product;
mod responses;
mod system;

pub use address::Address;
pub use pricing::{
    AbsoluteDiscount, AverageMonthlyCost, Discount, PercentageDiscount, Pricing, SubsequentCost,
};
pub use product::{ConnectionType, InternetProduct, ProductInfo};
pub use responses::{InternetProductsCursor, InternetProductsResponse, SharedInternetProductsResponse};
pub use system::{Health, Version};
