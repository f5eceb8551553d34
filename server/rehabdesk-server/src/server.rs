use accounts_service::{FinanceReporter, PaymentPostingService};
use allowance_service::AllowanceReporter;
use anyhow::Result;
use auth_rbac::{PermissionGuard, Role};
use chrono::Utc;
use payroll_service::{AdvanceService, CompensationService, PayrollService};
use record_store::{
    AdvanceRepository, BonusRepository, DeductionRepository, GraduateRepository, InMemoryStore,
    PatientRepository, PaymentRepository, PayrollRepository, StaffRepository, User, UserRepository,
};
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address for the HTTP listener
    pub bind_addr: String,
    /// Decimal places for currency rounding
    pub currency_scale: u32,
    /// Username of the seeded administrator account
    pub admin_username: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:8080".to_string(),
            currency_scale: 2,
            admin_username: "admin".to_string(),
        }
    }
}

impl ServerConfig {
    /// Read configuration from the environment, falling back to defaults
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            bind_addr: std::env::var("REHABDESK_BIND").unwrap_or(defaults.bind_addr),
            currency_scale: std::env::var("REHABDESK_CURRENCY_SCALE")
                .ok()
                .and_then(|value| value.parse().ok())
                .unwrap_or(defaults.currency_scale),
            admin_username: std::env::var("REHABDESK_ADMIN_USERNAME")
                .unwrap_or(defaults.admin_username),
        }
    }
}

/// Main RehabDesk server state
#[derive(Clone)]
pub struct RehabDeskServer {
    /// Server configuration
    pub config: ServerConfig,
    /// Record store behind the repository traits
    pub store: Arc<InMemoryStore>,
    /// Permission guard invoked at every operation boundary
    pub guard: PermissionGuard,
    /// Payment posting keeping patient running totals in step
    pub posting: Arc<PaymentPostingService>,
    /// Payroll record service
    pub payroll: Arc<PayrollService>,
    /// Salary advance service
    pub advances: Arc<AdvanceService>,
    /// Bonus and deduction records
    pub compensation: Arc<CompensationService>,
    /// Patient account and facility finance summaries
    pub finance: Arc<FinanceReporter>,
    /// Daily cigarette allowance report
    pub allowance: Arc<AllowanceReporter>,
}

impl RehabDeskServer {
    /// Create a server instance with a fresh in-memory store
    pub fn new(config: ServerConfig) -> Self {
        Self::with_store(config, Arc::new(InMemoryStore::new()))
    }

    /// Create a server instance around an existing store (used by tests)
    pub fn with_store(config: ServerConfig, store: Arc<InMemoryStore>) -> Self {
        let posting = Arc::new(PaymentPostingService::new(
            Arc::clone(&store) as Arc<dyn PatientRepository>,
            Arc::clone(&store) as Arc<dyn PaymentRepository>,
        ));
        let payroll = Arc::new(PayrollService::new(
            Arc::clone(&store) as Arc<dyn StaffRepository>,
            Arc::clone(&store) as Arc<dyn PayrollRepository>,
        ));
        let advances = Arc::new(AdvanceService::new(
            Arc::clone(&store) as Arc<dyn StaffRepository>,
            Arc::clone(&store) as Arc<dyn AdvanceRepository>,
            config.currency_scale,
        ));
        let compensation = Arc::new(CompensationService::new(
            Arc::clone(&store) as Arc<dyn StaffRepository>,
            Arc::clone(&store) as Arc<dyn BonusRepository>,
            Arc::clone(&store) as Arc<dyn DeductionRepository>,
        ));
        let finance = Arc::new(FinanceReporter::new(
            Arc::clone(&store) as Arc<dyn PatientRepository>,
            Arc::clone(&store) as Arc<dyn PaymentRepository>,
        ));
        let allowance = Arc::new(AllowanceReporter::new(
            Arc::clone(&store) as Arc<dyn PatientRepository>,
            Arc::clone(&store) as Arc<dyn StaffRepository>,
            Arc::clone(&store) as Arc<dyn GraduateRepository>,
        ));

        Self {
            config,
            store,
            guard: PermissionGuard::new(),
            posting,
            payroll,
            advances,
            compensation,
            finance,
            allowance,
        }
    }

    /// Seed the administrator account on first start
    ///
    /// With an empty user store nobody could pass authentication, so startup
    /// creates one active admin and logs its id. That id is the bearer token
    /// a fronting gateway presents until real users are provisioned.
    pub async fn seed_admin(&self) -> Result<Option<User>> {
        if !self.store.list_users().await?.is_empty() {
            return Ok(None);
        }
        let now = Utc::now();
        let admin = User {
            id: Uuid::new_v4(),
            username: self.config.admin_username.clone(),
            display_name: "Administrator".to_string(),
            role: Role::Admin,
            permissions: Default::default(),
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        let admin = self.store.create_user(admin).await?;
        info!(user_id = %admin.id, username = %admin.username, "seeded administrator account");
        Ok(Some(admin))
    }
}
