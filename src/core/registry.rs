//! # Service Registry - 싱글톤 의존성 주입 시스템
//!
//! 각 리포지토리/서비스는 `static OnceCell<Arc<Self>>`로 자신의 싱글톤을 들고 있고,
//! 아래 등록 구조체를 `inventory::submit!`으로 제출합니다. 시작 시점에
//! [`ServiceLocator::initialize_all`]이 모든 생성자를 호출하여 인스턴스를 만들고
//! 리포지토리의 인덱스 생성 같은 비동기 초기화(`init`)를 수행합니다.
//!
//! ```text
//! main
//!  ├─ ServiceLocator::set(Arc<Database>)
//!  ├─ ServiceLocator::set(Arc<RedisClient>)
//!  ├─ ServiceLocator::set(Arc<reqwest::Client>)
//!  └─ ServiceLocator::initialize_all()
//!       ├─ RepositoryRegistration 순회 → constructor() → init() (인덱스 생성)
//!       └─ ServiceRegistration 순회    → constructor() → init()
//! ```

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use log::{debug, info};
use once_cell::sync::Lazy;

use crate::errors::{AppError, AppResult};

/// 비즈니스 로직 서비스를 위한 공통 인터페이스
#[async_trait]
pub trait Service: Send + Sync {
    /// 레지스트리 로그에 표시되는 서비스 이름
    fn name(&self) -> &str;

    /// 시작 시 한 번 호출되는 초기화 훅
    async fn init(&self) -> AppResult<()> {
        Ok(())
    }
}

/// 데이터 액세스 계층을 위한 공통 인터페이스
#[async_trait]
pub trait Repository: Send + Sync {
    fn name(&self) -> &str;

    /// 이 리포지토리가 다루는 MongoDB 컬렉션 이름
    fn collection_name(&self) -> &str;

    /// 컬렉션 인덱스 생성 등 시작 시 초기화
    async fn init(&self) -> AppResult<()>;
}

/// 서비스 생성자 등록 정보
pub struct ServiceRegistration {
    pub name: &'static str,
    pub constructor: fn() -> Arc<dyn Service>,
}

/// 리포지토리 생성자 등록 정보
pub struct RepositoryRegistration {
    pub name: &'static str,
    pub constructor: fn() -> Arc<dyn Repository>,
}

inventory::collect!(ServiceRegistration);
inventory::collect!(RepositoryRegistration);

/// 인프라 인스턴스를 타입별로 보관하는 전역 컨테이너
pub struct ServiceLocator {
    instances: RwLock<HashMap<TypeId, Arc<dyn Any + Send + Sync>>>,
}

static LOCATOR: Lazy<ServiceLocator> = Lazy::new(ServiceLocator::new);

impl ServiceLocator {
    fn new() -> Self {
        Self {
            instances: RwLock::new(HashMap::new()),
        }
    }

    /// 등록된 인스턴스를 찾아 반환합니다.
    ///
    /// # Errors
    ///
    /// * `AppError::InternalError` - 해당 타입이 등록되지 않은 경우
    pub fn try_get<T: 'static + Send + Sync>() -> AppResult<Arc<T>> {
        let type_name = std::any::type_name::<T>();
        let instances = LOCATOR
            .instances
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        instances
            .get(&TypeId::of::<T>())
            .cloned()
            .and_then(|instance| instance.downcast::<T>().ok())
            .ok_or_else(|| {
                AppError::InternalError(format!(
                    "Service not found: {}. Register it with ServiceLocator::set() first",
                    type_name
                ))
            })
    }

    /// 등록된 인스턴스를 반환합니다.
    ///
    /// # Panics
    ///
    /// 등록되지 않은 타입을 요청하면 패닉합니다. 인프라 타입은 서버 시작 전에
    /// 반드시 등록되어야 하므로 누락은 배선 오류입니다.
    pub fn get<T: 'static + Send + Sync>() -> Arc<T> {
        match Self::try_get::<T>() {
            Ok(instance) => instance,
            Err(e) => panic!("{}", e),
        }
    }

    /// 인스턴스를 타입 키로 등록합니다. 같은 타입이 있으면 교체합니다.
    pub fn set<T: 'static + Send + Sync>(instance: Arc<T>) {
        let type_name = std::any::type_name::<T>();
        info!("📦 Registering: {}", Self::extract_clean_type_name(type_name));

        let mut instances = LOCATOR
            .instances
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        instances.insert(TypeId::of::<T>(), instance as Arc<dyn Any + Send + Sync>);
    }

    pub fn contains<T: 'static + Send + Sync>() -> bool {
        LOCATOR
            .instances
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .contains_key(&TypeId::of::<T>())
    }

    /// 등록된 모든 리포지토리와 서비스를 생성하고 초기화합니다.
    ///
    /// 리포지토리를 먼저 초기화하여 서비스가 만들어질 때 인덱스가 준비되어 있도록 합니다.
    pub async fn initialize_all() -> AppResult<()> {
        info!("🔄 서비스 레지스트리 초기화 시작");

        let mut repo_count = 0;
        for registration in inventory::iter::<RepositoryRegistration>() {
            debug!("  ├─ repository {} 생성 중", registration.name);
            let repository = (registration.constructor)();
            repository.init().await.map_err(|e| {
                AppError::InternalError(format!("{} 초기화 실패: {}", registration.name, e))
            })?;
            info!("  ├─ ✓ {} ({})", repository.name(), repository.collection_name());
            repo_count += 1;
        }

        let mut service_count = 0;
        for registration in inventory::iter::<ServiceRegistration>() {
            debug!("  ├─ service {} 생성 중", registration.name);
            let service = (registration.constructor)();
            service.init().await.map_err(|e| {
                AppError::InternalError(format!("{} 초기화 실패: {}", registration.name, e))
            })?;
            info!("  ├─ ✓ {}", service.name());
            service_count += 1;
        }

        info!(
            "✅ 레지스트리 초기화 완료: repository {}개, service {}개",
            repo_count, service_count
        );

        Ok(())
    }

    fn extract_clean_type_name(type_name: &str) -> &str {
        match type_name.rfind("::") {
            Some(pos) => &type_name[pos + 2..],
            None => type_name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Marker(u32);

    #[test]
    fn test_set_and_get_roundtrip() {
        ServiceLocator::set(Arc::new(Marker(7)));

        assert!(ServiceLocator::contains::<Marker>());
        assert_eq!(ServiceLocator::get::<Marker>().0, 7);
    }

    #[test]
    fn test_try_get_unregistered_type() {
        struct Missing;

        let result = ServiceLocator::try_get::<Missing>();
        assert!(matches!(result, Err(AppError::InternalError(_))));
    }

    #[test]
    fn test_extract_clean_type_name() {
        assert_eq!(
            ServiceLocator::extract_clean_type_name("edemy_backend::db::Database"),
            "Database"
        );
        assert_eq!(ServiceLocator::extract_clean_type_name("Database"), "Database");
    }
}
