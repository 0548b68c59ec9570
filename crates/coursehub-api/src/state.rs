//! Application state shared across all handlers and middleware.

use std::sync::Arc;
use std::time::Instant;

use coursehub_auth::{
    PasswordHasher, PasswordValidator, PermissionChecker, PgPermissionStore, TokenService,
};
use coursehub_cache::CacheManager;
use coursehub_core::config::AppConfig;
use coursehub_core::result::AppResult;
use coursehub_database::DatabasePool;
use coursehub_database::repositories::{
    AcademicYearRepository, AccountMetadataRepository, AccountRepository, AffectationRepository,
    CourseRepository, CourseTypeRepository, NodeRepository, PermissionRepository,
    ProfileRepository, RoleRepository, UeRepository,
};
use coursehub_service::{
    AcademicYearService, AccountService, AffectationService, CourseService, CourseTypeService,
    NodeService, ProfileService, RoleService, SessionService, UeService,
};

/// Shared application state, cloned into every handler.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Loaded configuration.
    pub config: Arc<AppConfig>,
    /// Database pool.
    pub db: DatabasePool,
    /// Revocation cache.
    pub cache: Arc<CacheManager>,
    /// Access/refresh token engines.
    pub tokens: Arc<TokenService>,
    /// Permission checker shared by all services.
    pub checker: Arc<PermissionChecker>,
    /// Process start, for the health endpoint.
    pub started_at: Instant,

    pub session_service: Arc<SessionService>,
    pub account_service: Arc<AccountService>,
    pub profile_service: Arc<ProfileService>,
    pub role_service: Arc<RoleService>,
    pub academic_year_service: Arc<AcademicYearService>,
    pub node_service: Arc<NodeService>,
    pub ue_service: Arc<UeService>,
    pub course_type_service: Arc<CourseTypeService>,
    pub course_service: Arc<CourseService>,
    pub affectation_service: Arc<AffectationService>,
}

impl AppState {
    /// Wire repositories, auth components and services on top of an open
    /// pool and cache.
    pub fn build(config: AppConfig, db: DatabasePool, cache: Arc<CacheManager>) -> AppResult<Self> {
        let pool = db.pool().clone();

        let account_repo = Arc::new(AccountRepository::new(pool.clone()));
        let profile_repo = Arc::new(ProfileRepository::new(pool.clone()));
        let year_repo = Arc::new(AcademicYearRepository::new(pool.clone()));
        let metadata_repo = Arc::new(AccountMetadataRepository::new(pool.clone()));
        let role_repo = Arc::new(RoleRepository::new(pool.clone()));
        let permission_repo = Arc::new(PermissionRepository::new(pool.clone()));
        let node_repo = Arc::new(NodeRepository::new(pool.clone()));
        let ue_repo = Arc::new(UeRepository::new(pool.clone()));
        let course_type_repo = Arc::new(CourseTypeRepository::new(pool.clone()));
        let course_repo = Arc::new(CourseRepository::new(pool.clone()));
        let affectation_repo = Arc::new(AffectationRepository::new(pool));

        let tokens = Arc::new(TokenService::from_config(&config.auth, Arc::clone(&cache))?);
        let hasher = Arc::new(PasswordHasher::new());
        let validator = Arc::new(PasswordValidator::new(&config.auth));
        let checker = Arc::new(PermissionChecker::new(Arc::new(PgPermissionStore::new(
            year_repo.as_ref().clone(),
            metadata_repo.as_ref().clone(),
            role_repo.as_ref().clone(),
        ))));

        let session_service = Arc::new(SessionService::new(
            Arc::clone(&account_repo),
            Arc::clone(&hasher),
            Arc::clone(&tokens),
        ));
        let account_service = Arc::new(AccountService::new(
            Arc::clone(&account_repo),
            Arc::clone(&metadata_repo),
            Arc::clone(&role_repo),
            Arc::clone(&year_repo),
            Arc::clone(&hasher),
            Arc::clone(&validator),
            Arc::clone(&checker),
        ));
        let profile_service = Arc::new(ProfileService::new(
            Arc::clone(&profile_repo),
            Arc::clone(&account_repo),
            Arc::clone(&year_repo),
            Arc::clone(&checker),
        ));
        let role_service = Arc::new(RoleService::new(
            Arc::clone(&role_repo),
            Arc::clone(&permission_repo),
            Arc::clone(&checker),
        ));
        let academic_year_service = Arc::new(AcademicYearService::new(
            Arc::clone(&year_repo),
            Arc::clone(&checker),
        ));
        let node_service = Arc::new(NodeService::new(
            Arc::clone(&node_repo),
            Arc::clone(&ue_repo),
            Arc::clone(&checker),
        ));
        let ue_service = Arc::new(UeService::new(
            Arc::clone(&ue_repo),
            Arc::clone(&node_repo),
            Arc::clone(&course_repo),
            Arc::clone(&checker),
        ));
        let course_type_service = Arc::new(CourseTypeService::new(
            Arc::clone(&course_type_repo),
            Arc::clone(&checker),
        ));
        let course_service = Arc::new(CourseService::new(
            Arc::clone(&course_repo),
            Arc::clone(&course_type_repo),
            Arc::clone(&year_repo),
            Arc::clone(&checker),
        ));
        let affectation_service = Arc::new(AffectationService::new(
            affectation_repo,
            profile_repo,
            course_repo,
            Arc::clone(&checker),
        ));

        Ok(Self {
            config: Arc::new(config),
            db,
            cache,
            tokens,
            checker,
            started_at: Instant::now(),
            session_service,
            account_service,
            profile_service,
            role_service,
            academic_year_service,
            node_service,
            ue_service,
            course_type_service,
            course_service,
            affectation_service,
        })
    }
}
