//! Application state wiring all services together.
//!
//! Services are generic over repository, hasher and token traits; AppState
//! pins them to the concrete infra implementations.

use std::path::PathBuf;
use std::sync::Arc;

use poolside_core::service::auth::AuthService;
use poolside_core::service::reservation::ReservationService;
use poolside_core::service::schedule::ScheduleService;
use poolside_core::service::user::UserService;
use poolside_infra::config::database_url;
use poolside_infra::crypto::password::Pbkdf2PasswordHasher;
use poolside_infra::crypto::token::JwtTokenIssuer;
use poolside_infra::sqlite::pool::DatabasePool;
use poolside_infra::sqlite::reservation::SqliteReservationRepository;
use poolside_infra::sqlite::schedule::SqliteScheduleRepository;
use poolside_infra::sqlite::user::SqliteUserRepository;
use poolside_types::config::PoolsideConfig;

pub type ConcreteAuthService =
    AuthService<SqliteUserRepository, Pbkdf2PasswordHasher, JwtTokenIssuer>;

pub type ConcreteUserService =
    UserService<SqliteUserRepository, SqliteReservationRepository, Pbkdf2PasswordHasher>;

pub type ConcreteScheduleService =
    ScheduleService<SqliteScheduleRepository, SqliteReservationRepository>;

pub type ConcreteReservationService =
    ReservationService<SqliteReservationRepository, SqliteScheduleRepository>;

/// Shared application state, used by both CLI commands and REST handlers.
#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<ConcreteAuthService>,
    pub user_service: Arc<ConcreteUserService>,
    pub schedule_service: Arc<ConcreteScheduleService>,
    pub reservation_service: Arc<ConcreteReservationService>,
    /// Verifies bearer tokens in the auth extractor.
    pub tokens: Arc<JwtTokenIssuer>,
    pub config: Arc<PoolsideConfig>,
    pub db_pool: DatabasePool,
}

impl AppState {
    /// Open the database described by `config` (inside `data_dir` unless a
    /// URL is configured) and wire services.
    pub async fn from_config(config: PoolsideConfig, data_dir: PathBuf) -> anyhow::Result<Self> {
        tokio::fs::create_dir_all(&data_dir).await?;

        if config.auth.uses_development_secret() {
            tracing::warn!("JWT_SECRET not set; tokens are signed with the development secret");
        }

        let db_pool = DatabasePool::new(&database_url(&config, &data_dir)).await?;

        let hasher = Arc::new(Pbkdf2PasswordHasher::from_config(&config.password));
        let tokens = Arc::new(JwtTokenIssuer::from_config(&config.auth));

        let users = || SqliteUserRepository::new(db_pool.clone());
        let schedules = || SqliteScheduleRepository::new(db_pool.clone());
        let reservations = || SqliteReservationRepository::new(db_pool.clone());

        let auth_service = AuthService::new(users(), Arc::clone(&hasher), Arc::clone(&tokens));
        let user_service = UserService::new(users(), reservations(), Arc::clone(&hasher));
        let schedule_service = ScheduleService::new(schedules(), reservations());
        let reservation_service = ReservationService::new(reservations(), schedules());

        Ok(Self {
            auth_service: Arc::new(auth_service),
            user_service: Arc::new(user_service),
            schedule_service: Arc::new(schedule_service),
            reservation_service: Arc::new(reservation_service),
            tokens,
            config: Arc::new(config),
            db_pool,
        })
    }
}
