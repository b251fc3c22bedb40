use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use tracing::info;

use domain::{
    entities::{customers::CustomerEntity, plans::PlanEntity, users::UserEntity},
    value_objects::{reports::ReportCard, settings::SystemSettings},
};

use super::seed;

/// File name matching the original browser storage key for the catalog.
pub const SUBSCRIPTION_STORAGE: &str = "subscriply-storage.json";
/// File name matching the original browser storage key for accounts.
pub const AUTH_STORAGE: &str = "auth-storage.json";

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct SubscriptionSnapshot {
    #[serde(default)]
    pub plans: Vec<PlanEntity>,
    #[serde(default)]
    pub customers: Vec<CustomerEntity>,
    #[serde(default)]
    pub reports: Vec<ReportCard>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct AuthSnapshot {
    #[serde(default)]
    pub users: Vec<UserEntity>,
    #[serde(default)]
    pub settings: SystemSettings,
}

/// Owned, injectable state container backing every repository. Two JSON
/// snapshot files under a data directory; mutations rewrite the whole
/// snapshot before returning, so the in-memory state is the single source
/// of truth and the files merely trail it.
pub struct SnapshotStore {
    data_dir: PathBuf,
    seed_owner: String,
    subscription: RwLock<SubscriptionSnapshot>,
    auth: RwLock<AuthSnapshot>,
}

impl SnapshotStore {
    /// Loads both snapshots from `data_dir`, installing the seed dataset
    /// when no catalog has ever been persisted. `seed_owner` is the account
    /// the seed records belong to.
    pub fn load(data_dir: impl Into<PathBuf>, seed_owner: &str) -> Result<Self> {
        let data_dir = data_dir.into();
        fs::create_dir_all(&data_dir).with_context(|| {
            format!("failed to create data directory {}", data_dir.display())
        })?;

        let mut subscription: SubscriptionSnapshot =
            read_snapshot(&data_dir.join(SUBSCRIPTION_STORAGE))?.unwrap_or_default();
        let auth: AuthSnapshot = read_snapshot(&data_dir.join(AUTH_STORAGE))?.unwrap_or_default();

        let mut seeded = false;
        if subscription.plans.is_empty() && subscription.customers.is_empty() {
            info!(owner_id = seed_owner, "store: empty catalog, installing seed dataset");
            subscription = seed::initial_subscription_snapshot(seed_owner);
            seeded = true;
        }
        if subscription.reports.is_empty() {
            subscription.reports = seed::default_report_cards();
            seeded = true;
        }

        let store = Self {
            data_dir,
            seed_owner: seed_owner.to_string(),
            subscription: RwLock::new(subscription),
            auth: RwLock::new(auth),
        };

        if seeded {
            let guard = store.read_subscription();
            store.persist_subscription(&guard)?;
        }

        info!(
            data_dir = %store.data_dir.display(),
            "store: snapshots loaded"
        );
        Ok(store)
    }

    /// Guarantees the configured admin account exists. Existing users are
    /// never overwritten, so a changed seed password does not clobber a
    /// rotated one.
    pub fn ensure_seed_admin(&self, username: &str, password_hash: String) -> Result<()> {
        let mut auth = self.write_auth();
        if auth.users.iter().any(|user| user.username == username) {
            return Ok(());
        }

        info!(username, "store: creating seed admin account");
        auth.users.push(UserEntity {
            username: username.to_string(),
            password_hash,
            is_admin: true,
        });
        self.persist_auth(&auth)
    }

    pub(crate) fn with_subscription<T>(&self, f: impl FnOnce(&SubscriptionSnapshot) -> T) -> T {
        f(&self.read_subscription())
    }

    pub(crate) fn with_subscription_mut<T>(
        &self,
        f: impl FnOnce(&mut SubscriptionSnapshot) -> T,
    ) -> Result<T> {
        let mut guard = self.write_subscription();
        let out = f(&mut guard);
        self.persist_subscription(&guard)?;
        Ok(out)
    }

    pub(crate) fn with_auth<T>(&self, f: impl FnOnce(&AuthSnapshot) -> T) -> T {
        f(&self.read_auth())
    }

    pub(crate) fn with_auth_mut<T>(&self, f: impl FnOnce(&mut AuthSnapshot) -> T) -> Result<T> {
        let mut guard = self.write_auth();
        let out = f(&mut guard);
        self.persist_auth(&guard)?;
        Ok(out)
    }

    /// Reinstalls the seed catalog and customers. Report visibility and
    /// accounts survive a reset.
    pub(crate) fn reset_to_initial_data(&self) -> Result<()> {
        let seeded = seed::initial_subscription_snapshot(&self.seed_owner);
        self.with_subscription_mut(|snapshot| {
            snapshot.plans = seeded.plans;
            snapshot.customers = seeded.customers;
        })
    }

    // Snapshots stay internally consistent even if a writer panicked, since
    // every mutation happens through the closure helpers above; recovering
    // a poisoned lock is therefore safe.
    fn read_subscription(&self) -> RwLockReadGuard<'_, SubscriptionSnapshot> {
        self.subscription
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write_subscription(&self) -> RwLockWriteGuard<'_, SubscriptionSnapshot> {
        self.subscription
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn read_auth(&self) -> RwLockReadGuard<'_, AuthSnapshot> {
        self.auth
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write_auth(&self) -> RwLockWriteGuard<'_, AuthSnapshot> {
        self.auth
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn persist_subscription(&self, snapshot: &SubscriptionSnapshot) -> Result<()> {
        write_snapshot(&self.data_dir.join(SUBSCRIPTION_STORAGE), snapshot)
    }

    fn persist_auth(&self, snapshot: &AuthSnapshot) -> Result<()> {
        write_snapshot(&self.data_dir.join(AUTH_STORAGE), snapshot)
    }
}

fn read_snapshot<T: DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    if !path.exists() {
        return Ok(None);
    }

    let bytes =
        fs::read(path).with_context(|| format!("failed to read snapshot {}", path.display()))?;
    let snapshot = serde_json::from_slice(&bytes)
        .with_context(|| format!("failed to parse snapshot {}", path.display()))?;
    Ok(Some(snapshot))
}

fn write_snapshot<T: Serialize>(path: &Path, snapshot: &T) -> Result<()> {
    let bytes = serde_json::to_vec_pretty(snapshot)
        .with_context(|| format!("failed to serialize snapshot {}", path.display()))?;

    // Write-then-rename keeps the previous snapshot intact if the process
    // dies mid-write.
    let tmp_path = path.with_extension("json.tmp");
    fs::write(&tmp_path, bytes)
        .with_context(|| format!("failed to write snapshot {}", tmp_path.display()))?;
    fs::rename(&tmp_path, path)
        .with_context(|| format!("failed to replace snapshot {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::local_store::repositories::{
        customers::CustomerLocalStore, plans::PlanLocalStore, system::SystemLocalStore,
    };
    use domain::{
        repositories::{
            customers::CustomerRepository, plans::PlanRepository, system::SystemRepository,
        },
        value_objects::{
            customers::InsertCustomerModel, enums::customer_statuses::CustomerStatus,
            plans::InsertPlanModel, settings::UpdateSettingsModel,
        },
    };
    use std::sync::Arc;
    use uuid::Uuid;

    fn temp_data_dir() -> PathBuf {
        std::env::temp_dir().join(format!("subscriply-test-{}", Uuid::new_v4()))
    }

    fn insert_plan_model(name: &str) -> InsertPlanModel {
        InsertPlanModel {
            name: name.to_string(),
            price_minor: 5990,
            cost_minor: Some(2990),
            duration_days: 30,
            description: String::new(),
        }
    }

    #[tokio::test]
    async fn installs_the_seed_dataset_on_first_load() {
        let dir = temp_data_dir();
        let store = SnapshotStore::load(&dir, "admin").unwrap();

        store.with_subscription(|snapshot| {
            assert_eq!(snapshot.plans.len(), 4);
            assert_eq!(snapshot.customers.len(), 4);
            assert_eq!(snapshot.reports.len(), 7);
            assert!(snapshot.plans.iter().all(|plan| plan.owner_id == "admin"));
        });
        assert!(dir.join(SUBSCRIPTION_STORAGE).exists());

        fs::remove_dir_all(&dir).unwrap();
    }

    #[tokio::test]
    async fn mutations_survive_a_reload() {
        let dir = temp_data_dir();

        {
            let store = Arc::new(SnapshotStore::load(&dir, "admin").unwrap());
            let plans = PlanLocalStore::new(Arc::clone(&store));
            plans.insert("admin", insert_plan_model("Extra")).await.unwrap();
        }

        let store = Arc::new(SnapshotStore::load(&dir, "admin").unwrap());
        let plans = PlanLocalStore::new(Arc::clone(&store));
        let listed = plans.list("admin").await.unwrap();

        assert_eq!(listed.len(), 5);
        assert!(listed.iter().any(|plan| plan.name == "Extra"));

        fs::remove_dir_all(&dir).unwrap();
    }

    #[tokio::test]
    async fn plan_in_use_scans_every_owner() {
        let dir = temp_data_dir();
        let store = Arc::new(SnapshotStore::load(&dir, "admin").unwrap());
        let plans = PlanLocalStore::new(Arc::clone(&store));
        let customers = CustomerLocalStore::new(Arc::clone(&store));

        let admin_plan = plans.insert("admin", insert_plan_model("Shared")).await.unwrap();
        let bob_customer = customers
            .insert(
                "bob",
                InsertCustomerModel {
                    name: "Bob's customer".to_string(),
                    email: "c@example.com".to_string(),
                    phone: None,
                    status: CustomerStatus::Active,
                },
            )
            .await
            .unwrap();

        assert!(!customers.plan_in_use(admin_plan.id).await.unwrap());

        customers
            .add_subscription(
                "bob",
                bob_customer.id,
                domain::entities::customers::SubscriptionEntity {
                    id: Uuid::new_v4(),
                    plan_id: admin_plan.id,
                    start_date: chrono::Utc::now(),
                },
            )
            .await
            .unwrap();

        assert!(customers.plan_in_use(admin_plan.id).await.unwrap());

        fs::remove_dir_all(&dir).unwrap();
    }

    #[tokio::test]
    async fn seed_admin_is_created_once_and_never_overwritten() {
        let dir = temp_data_dir();
        let store = SnapshotStore::load(&dir, "admin").unwrap();

        store.ensure_seed_admin("admin", "hash-one".to_string()).unwrap();
        store.ensure_seed_admin("admin", "hash-two".to_string()).unwrap();

        store.with_auth(|auth| {
            assert_eq!(auth.users.len(), 1);
            assert_eq!(auth.users[0].password_hash, "hash-one");
            assert!(auth.users[0].is_admin);
        });

        fs::remove_dir_all(&dir).unwrap();
    }

    #[tokio::test]
    async fn settings_updates_merge_into_the_defaults() {
        let dir = temp_data_dir();
        let store = Arc::new(SnapshotStore::load(&dir, "admin").unwrap());
        let system = SystemLocalStore::new(Arc::clone(&store));

        let settings = system
            .update_settings(UpdateSettingsModel {
                company_name: Some("Acme Subscriptions".to_string()),
                subscription_warning_days: Some(10),
                ..UpdateSettingsModel::default()
            })
            .await
            .unwrap();

        assert_eq!(settings.company_name, "Acme Subscriptions");
        assert_eq!(settings.subscription_warning_days, 10);
        // Untouched fields keep their defaults.
        assert_eq!(settings.notification_email, "admin@example.com");
        assert!(settings.enable_email_notifications);

        fs::remove_dir_all(&dir).unwrap();
    }

    #[tokio::test]
    async fn reset_reinstalls_the_catalog_but_keeps_reports() {
        let dir = temp_data_dir();
        let store = Arc::new(SnapshotStore::load(&dir, "admin").unwrap());
        let plans = PlanLocalStore::new(Arc::clone(&store));

        plans.insert("admin", insert_plan_model("Extra")).await.unwrap();
        store
            .with_subscription_mut(|snapshot| snapshot.reports[0].visible = false)
            .unwrap();

        store.reset_to_initial_data().unwrap();

        store.with_subscription(|snapshot| {
            assert_eq!(snapshot.plans.len(), 4);
            assert!(!snapshot.reports[0].visible);
        });

        fs::remove_dir_all(&dir).unwrap();
    }
}
