//! Server state
//!
//! Owns the roster, audit log, templates and dispatch engine. Cloning is
//! cheap: every component sits behind an `Arc`.

use std::path::Path;
use std::sync::Arc;

use sms_transport::{SimulatedTransport, SmsTransport, TextBeeTransport};

use crate::audit::AuditLog;
use crate::birthdays::BirthdayScheduler;
use crate::core::error::BoxError;
use crate::core::tasks::{BackgroundTasks, TaskKind};
use crate::core::Config;
use crate::dispatch::{DispatchEngine, DispatchOptions};
use crate::roster::RosterStore;
use crate::template::TemplateStore;

#[derive(Clone)]
pub struct ServerState {
    pub config: Arc<Config>,
    pub roster: Arc<RosterStore>,
    pub audit: Arc<AuditLog>,
    pub templates: Arc<TemplateStore>,
    pub engine: Arc<DispatchEngine>,
}

impl ServerState {
    /// Build state around an already-loaded roster and a chosen transport
    pub fn new(
        config: Config,
        roster: RosterStore,
        transport: Arc<dyn SmsTransport>,
    ) -> Self {
        let roster = Arc::new(roster);
        let audit = Arc::new(AuditLog::new(config.audit_capacity));
        let templates = Arc::new(TemplateStore::new(&config.portal_name));
        let engine = Arc::new(DispatchEngine::new(
            roster.clone(),
            audit.clone(),
            templates.clone(),
            transport,
        ));

        Self {
            config: Arc::new(config),
            roster,
            audit,
            templates,
            engine,
        }
    }

    /// Load the startup roster and build the configured transport.
    ///
    /// A missing or unreadable roster file leaves the roster empty; an
    /// upload can fill it later.
    pub async fn initialize(config: &Config) -> Result<Self, BoxError> {
        let members = load_startup_roster(&config.roster_path).await;
        let roster = RosterStore::new(members);
        roster.log_preview(3);

        let transport: Arc<dyn SmsTransport> = if config.simulation_mode {
            tracing::info!("Simulation mode: messages are logged, not sent");
            Arc::new(SimulatedTransport::new())
        } else {
            if config.sms.api_key.is_none() || config.sms.device_id.is_none() {
                tracing::warn!("SMS_API_KEY or SMS_DEVICE_ID not set; live sends will fail");
            }
            tracing::info!(base_url = %config.sms.base_url, "Live mode: using TextBee gateway");
            Arc::new(TextBeeTransport::new(config.sms.clone())?)
        };

        Ok(Self::new(config.clone(), roster, transport))
    }

    /// Register the scheduler and optional startup bulk run
    pub fn start_background_tasks(&self) -> BackgroundTasks {
        let mut tasks = BackgroundTasks::new();

        if self.config.birthday_enabled {
            let scheduler = BirthdayScheduler::new(self.clone(), tasks.shutdown_token());
            tasks.spawn("birthday_scheduler", TaskKind::Periodic, scheduler.run());
        }

        if self.config.auto_run_bulk {
            let engine = self.engine.clone();
            let opts = DispatchOptions {
                batch_size: self.config.default_batch_size,
                delay: std::time::Duration::from_millis(self.config.default_delay_ms),
                start: 0,
                limit: None,
            };
            tasks.spawn("auto_bulk_send", TaskKind::Warmup, async move {
                tracing::info!("AUTO_RUN_BULK enabled, starting bulk send");
                if let Err(e) = engine.dispatch(opts).await {
                    tracing::warn!(error = %e, "Startup bulk send did not run");
                }
            });
        }

        tasks.log_summary();
        tasks
    }
}

async fn load_startup_roster(path: &str) -> Vec<shared::models::MemberRecord> {
    if !Path::new(path).exists() {
        tracing::warn!(path = %path, "Roster file not found, starting with an empty roster");
        return Vec::new();
    }

    let owned = path.to_string();
    let loaded =
        tokio::task::spawn_blocking(move || RosterStore::load_path(Path::new(&owned))).await;
    match loaded {
        Ok(Ok(members)) => {
            tracing::info!(path = %path, members = members.len(), "Roster loaded");
            members
        }
        Ok(Err(e)) => {
            tracing::warn!(path = %path, error = %e, "Failed to read roster, starting empty");
            Vec::new()
        }
        Err(e) => {
            tracing::error!(error = %e, "Roster loader task failed");
            Vec::new()
        }
    }
}
