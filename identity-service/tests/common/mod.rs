use std::sync::Arc;

use chrono::Duration;

use auth::PasswordHasher;
use auth::TokenCodec;
use identity_service::domain::auth::ports::AuthServicePort;
use identity_service::domain::auth::service::AuthService;
use identity_service::domain::session::registry::SessionRegistry;
use identity_service::domain::user::models::EmailAddress;
use identity_service::domain::user::models::RegisterUserCommand;
use identity_service::domain::user::models::UserProfile;
use identity_service::domain::user::models::Username;
use identity_service::outbound::repositories::InMemoryUserRepository;

pub const SECRET: &[u8] = b"integration_secret_32_bytes_long!!";

/// Test harness wiring the service over the in-memory repository
pub struct TestAuth {
    pub service: Arc<AuthService<InMemoryUserRepository>>,
}

impl TestAuth {
    /// Harness with comfortable token lifetimes.
    pub fn new() -> Self {
        Self::with_ttls(Duration::minutes(15), Duration::days(7))
    }

    /// Harness with explicit token lifetimes (negative TTLs mint tokens that
    /// are already expired, which is handy for lifecycle tests).
    pub fn with_ttls(access_ttl: Duration, refresh_ttl: Duration) -> Self {
        init_tracing();

        let service = AuthService::new(
            Arc::new(InMemoryUserRepository::new()),
            // Minimal work factor: these tests exercise flows, not KDF cost.
            PasswordHasher::with_work_factor(1).expect("Failed to build password hasher"),
            TokenCodec::new(SECRET, access_ttl, refresh_ttl),
            SessionRegistry::new(),
        );

        Self {
            service: Arc::new(service),
        }
    }

    /// Register an account, panicking on failure.
    pub async fn register(&self, username: &str, email: &str, password: &str) -> UserProfile {
        let command = RegisterUserCommand::new(
            Username::new(username.to_string()).expect("invalid test username"),
            EmailAddress::new(email.to_string()).expect("invalid test email"),
            password.to_string(),
        );

        self.service
            .register(command)
            .await
            .expect("Failed to register test user")
    }
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
}
