//! 수강 신청과 레슨 완료 DTO

pub mod request;
pub mod response;

pub use request::*;
pub use response::*;
