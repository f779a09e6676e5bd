use fintrack_config::Config;
use fintrack_core::{Clock, Dashboard, DashboardService, LedgerStore, SystemClock};
use fintrack_domain::{Money, PeriodSelection, Record, RecordKind, Session};
use fintrack_storage_json::JsonLedgerStore;
use uuid::Uuid;

use crate::{
    currency::{format_money, LocaleConfig},
    errors::AppError,
};

/// Facade over one configured record store.
///
/// Owns its configuration, store and clock outright; nothing here is global.
/// Every operation takes the caller's [`Session`].
pub struct FinanceTracker {
    config: Config,
    locale: LocaleConfig,
    store: Box<dyn LedgerStore>,
    clock: Box<dyn Clock>,
}

impl FinanceTracker {
    pub fn new(config: Config, store: Box<dyn LedgerStore>, clock: Box<dyn Clock>) -> Self {
        let locale = LocaleConfig::for_tag(&config.locale);
        Self {
            config,
            locale,
            store,
            clock,
        }
    }

    /// JSON store under the configured data root, system clock.
    pub fn open(config: Config) -> Result<Self, AppError> {
        let root = config.resolve_data_root();
        let store = JsonLedgerStore::under_root(&root, config.backup_retention)?;
        tracing::debug!(root = %root.display(), "opened json record store");
        Ok(Self::new(config, Box::new(store), Box::new(SystemClock)))
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn store(&self) -> &dyn LedgerStore {
        self.store.as_ref()
    }

    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    /// The dashboard for `selection` as of the clock's today.
    pub fn dashboard(
        &self,
        session: &Session,
        selection: &PeriodSelection,
    ) -> Result<Dashboard, AppError> {
        let today = self.clock.today();
        Ok(DashboardService::load(
            self.store.as_ref(),
            session,
            selection,
            today,
        )?)
    }

    /// The dashboard on the configured default period.
    pub fn default_dashboard(&self, session: &Session) -> Result<Dashboard, AppError> {
        self.dashboard(session, &PeriodSelection::new(self.config.default_period))
    }

    pub fn record(&self, session: &Session, record: impl Into<Record>) -> Result<Uuid, AppError> {
        let record = record.into();
        let kind = record.kind();
        let id = self.store.insert(session, record)?;
        tracing::info!(user = %session.user_id, %kind, %id, "recorded entry");
        Ok(id)
    }

    pub fn remove(&self, session: &Session, kind: RecordKind, id: Uuid) -> Result<(), AppError> {
        self.store.delete(session, kind, id)?;
        tracing::info!(user = %session.user_id, %kind, %id, "removed entry");
        Ok(())
    }

    pub fn categories(&self, session: &Session, kind: RecordKind) -> Result<Vec<String>, AppError> {
        Ok(self.store.categories(session, kind)?)
    }

    /// Amount in the configured currency and locale, e.g. `R$ 1.234,56`.
    pub fn format_amount(&self, amount: Money) -> String {
        format_money(amount, &self.config.currency, &self.locale)
    }
}
