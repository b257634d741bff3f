pub mod orders;

pub use orders::{
    LineItemResponse, OrderResponse, PlaceOrderRequest, PlaceOrderResponse, ProductSummary,
    Reference, StatusChangeResponse, UpdateStatusRequest, UpdateStatusResponse, UserSummary,
};
