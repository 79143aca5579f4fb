//! Remote signature creation engine.
//!
//! [`QSignCore`] wires the worker registry, key pools, credential factory and token providers
//! into the sign, session and credential services.

use std::sync::Arc;

use config::ConfigError;
use config::core_config::CoreConfig;
use proto::clock::{Clock, DefaultClock};
use proto::retry_decorator::RetryPolicy;
use proto::retry_decorator::decorated_data_provider::decorate_data_provider;
use provider::certificate_authority::CertificateAuthorityClient;
use provider::credential_factory::CredentialFactory;
use provider::crypto_token::CryptoTokenClient;
use provider::key_pool::CryptoTokenLocks;
use provider::key_pool::renewable::RenewableKeyPool;
use provider::key_pool::single_use::SingleUseKeyPool;
use provider::signer::RemoteSigner;
use provider::signing_token::SigningTokenProviders;
use provider::signing_token::long_term::LongTermTokenProvider;
use provider::signing_token::one_time::OneTimeTokenProvider;
use provider::signing_token::session::SessionTokenProvider;
use provider::user_info::UserInfoProvider;
use provider::worker::WorkerRegistry;
use repository::DataRepository;
use service::credential::CredentialService;
use service::session::SessionService;
use service::sign::SignService;

pub mod config;
pub mod error;
pub mod model;
pub mod proto;
pub mod provider;
pub mod repository;
pub mod service;


/// Clients of the systems the engine talks to.
pub struct ExternalServices {
    pub crypto_token_client: Arc<dyn CryptoTokenClient>,
    pub certificate_authority_client: Arc<dyn CertificateAuthorityClient>,
    pub user_info_provider: Arc<dyn UserInfoProvider>,
    /// System time when not set
    pub clock: Option<Arc<dyn Clock>>,
}

#[derive(Clone)]
pub struct QSignCore {
    worker_registry: Arc<WorkerRegistry>,
    renewable_key_pool: Arc<RenewableKeyPool>,
    single_use_key_pool: Arc<SingleUseKeyPool>,
    sign_service: SignService,
    session_service: SessionService,
    credential_service: CredentialService,
}

impl QSignCore {
    pub fn new(
        config: CoreConfig,
        data_repository: Arc<dyn DataRepository>,
        services: ExternalServices,
    ) -> Result<Self, ConfigError> {
        config.validate()?;

        let clock = services.clock.unwrap_or_else(|| Arc::new(DefaultClock));
        let data_repository =
            decorate_data_provider(data_repository, RetryPolicy::from(&config.retry));

        let crypto_tokens = config.crypto_tokens();
        let locks = Arc::new(CryptoTokenLocks::new(
            crypto_tokens.iter().map(|token| token.id),
        ));
        let worker_registry = Arc::new(WorkerRegistry::new(config.workers(), crypto_tokens));

        let renewable_key_pool = Arc::new(RenewableKeyPool::new(
            data_repository.get_renewable_key_repository(),
            data_repository.get_session_repository(),
            services.crypto_token_client.clone(),
            worker_registry.clone(),
            locks.clone(),
            clock.clone(),
        ));
        let single_use_key_pool = Arc::new(SingleUseKeyPool::new(
            data_repository.get_single_use_key_repository(),
            services.crypto_token_client.clone(),
            locks,
            clock.clone(),
        ));

        let credential_factory = Arc::new(CredentialFactory::new(
            services.certificate_authority_client,
            services.crypto_token_client.clone(),
            services.user_info_provider,
            worker_registry.clone(),
            config.signature_qualifier_profiles(),
            clock.clone(),
        ));

        let session_service = SessionService::new(
            data_repository.get_session_repository(),
            renewable_key_pool.clone(),
            clock.clone(),
        );

        let token_providers = Arc::new(SigningTokenProviders::new(
            OneTimeTokenProvider::new(renewable_key_pool.clone(), credential_factory.clone()),
            LongTermTokenProvider::new(data_repository.get_credential_repository()),
            SessionTokenProvider::new(
                renewable_key_pool.clone(),
                credential_factory.clone(),
                Arc::new(session_service.clone()),
                clock.clone(),
            ),
        ));

        let sign_service = SignService::new(
            worker_registry.clone(),
            token_providers,
            Arc::new(RemoteSigner::new(services.crypto_token_client)),
        );

        let credential_service = CredentialService::new(
            worker_registry.clone(),
            single_use_key_pool.clone(),
            credential_factory,
            data_repository.get_credential_repository(),
            clock,
        );

        Ok(Self {
            worker_registry,
            renewable_key_pool,
            single_use_key_pool,
            sign_service,
            session_service,
            credential_service,
        })
    }

    pub fn sign_service(&self) -> &SignService {
        &self.sign_service
    }

    pub fn session_service(&self) -> &SessionService {
        &self.session_service
    }

    pub fn credential_service(&self) -> &CredentialService {
        &self.credential_service
    }

    pub fn worker_registry(&self) -> &WorkerRegistry {
        &self.worker_registry
    }

    /// Pool of one-time and session keys, for provisioning and maintenance jobs
    pub fn renewable_key_pool(&self) -> &RenewableKeyPool {
        &self.renewable_key_pool
    }

    /// Pool of long-term keys, for provisioning jobs
    pub fn single_use_key_pool(&self) -> &SingleUseKeyPool {
        &self.single_use_key_pool
    }
}
