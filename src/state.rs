use std::sync::Arc;

use sqlx::SqlitePool;

use crate::{
    config::Config,
    database::init_db,
    mail::{Mailer, SmtpMailer},
};

pub struct AppState {
    pub config: Config,
    pub pool: SqlitePool,
    pub mailer: Arc<dyn Mailer>,
}

impl AppState {
    pub async fn new() -> Arc<Self> {
        let config = Config::load();

        let pool = init_db(&config.database_url)
            .await
            .expect("Database misconfigured!");

        let mailer = SmtpMailer::new(&config.smtp).expect("Mail transport misconfigured!");

        Arc::new(Self {
            config,
            pool,
            mailer: Arc::new(mailer),
        })
    }

    /// Assembles state from pre-built parts; used by the integration tests.
    pub fn from_parts(config: Config, pool: SqlitePool, mailer: Arc<dyn Mailer>) -> Arc<Self> {
        Arc::new(Self {
            config,
            pool,
            mailer,
        })
    }
}
