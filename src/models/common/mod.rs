pub mod pagination;
pub mod response;
