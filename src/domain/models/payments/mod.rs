//! 결제 프로세서(Stripe) 응답 모델

pub mod stripe;

pub use stripe::*;
