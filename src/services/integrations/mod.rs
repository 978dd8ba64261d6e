//! 외부 서비스 연동: 오브젝트 스토리지, 이메일, 결제
//!
//! 세 연동 모두 `ServiceLocator`에 등록된 공용 `reqwest::Client`를 사용합니다.
//! 전송 실패나 2xx가 아닌 응답은 `AppError::ExternalServiceError`가 됩니다.

pub mod sigv4;
pub mod storage_service;
pub mod email_service;
pub mod payment_service;

pub use storage_service::StorageService;
pub use email_service::EmailService;
pub use payment_service::PaymentService;
