use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::sync::Mutex;

use dispatchdesk_core::{AppError, AppResult, TenantId, UserIdentity};
use dispatchdesk_domain::{AuditAction, Capability, PermissionSet, ReservedRole, Role, RoleName};

use crate::{
    AuditEvent, AuditRepository, CreateRoleInput, IdentityRepository, PermissionEvaluator,
    RoleReference, RoleRepository,
};

use super::RoleAdministrationService;

#[derive(Default)]
struct FakeRoleRepository {
    roles: Mutex<BTreeMap<(TenantId, String), Role>>,
}

#[async_trait]
impl RoleRepository for FakeRoleRepository {
    async fn find_role(&self, tenant_id: TenantId, role_name: &str) -> AppResult<Option<Role>> {
        Ok(self
            .roles
            .lock()
            .await
            .get(&(tenant_id, role_name.to_owned()))
            .cloned())
    }

    async fn list_roles(&self, tenant_id: TenantId) -> AppResult<Vec<Role>> {
        Ok(self
            .roles
            .lock()
            .await
            .iter()
            .filter(|((role_tenant, _), _)| *role_tenant == tenant_id)
            .map(|(_, role)| role.clone())
            .collect())
    }

    async fn create_role(&self, tenant_id: TenantId, role: Role) -> AppResult<Role> {
        let mut roles = self.roles.lock().await;
        let key = (tenant_id, role.name().as_str().to_owned());
        if roles.contains_key(&key) {
            return Err(AppError::Conflict(format!(
                "role '{}' already exists",
                role.name()
            )));
        }

        roles.insert(key, role.clone());
        Ok(role)
    }

    async fn upsert_role(&self, tenant_id: TenantId, role: Role) -> AppResult<Role> {
        self.roles
            .lock()
            .await
            .insert((tenant_id, role.name().as_str().to_owned()), role.clone());
        Ok(role)
    }

    async fn rename_role(
        &self,
        tenant_id: TenantId,
        old_name: &RoleName,
        new_name: &RoleName,
    ) -> AppResult<Role> {
        let mut roles = self.roles.lock().await;
        if roles.contains_key(&(tenant_id, new_name.as_str().to_owned())) {
            return Err(AppError::Conflict(format!("role '{new_name}' already exists")));
        }

        let role = roles
            .remove(&(tenant_id, old_name.as_str().to_owned()))
            .ok_or_else(|| AppError::NotFound(format!("role '{old_name}' was not found")))?
            .renamed(new_name.clone());
        roles.insert((tenant_id, new_name.as_str().to_owned()), role.clone());
        Ok(role)
    }

    async fn delete_role(&self, tenant_id: TenantId, role_name: &str) -> AppResult<()> {
        let mut roles = self.roles.lock().await;
        let key = (tenant_id, role_name.to_owned());
        match roles.get(&key) {
            Some(role) if role.is_custom() => {
                roles.remove(&key);
                Ok(())
            }
            _ => Err(AppError::NotFound(format!(
                "custom role '{role_name}' was not found"
            ))),
        }
    }
}

#[derive(Default)]
struct FakeIdentityRepository {
    identities: Mutex<Vec<(TenantId, String, String)>>,
    fail_reassign: AtomicBool,
}

impl FakeIdentityRepository {
    async fn add(&self, tenant_id: TenantId, subject: &str, role: &str) {
        self.identities
            .lock()
            .await
            .push((tenant_id, subject.to_owned(), role.to_owned()));
    }

    async fn role_of(&self, subject: &str) -> Option<String> {
        self.identities
            .lock()
            .await
            .iter()
            .find(|(_, identity_subject, _)| identity_subject == subject)
            .map(|(_, _, role)| role.clone())
    }
}

#[async_trait]
impl IdentityRepository for FakeIdentityRepository {
    async fn find_identity(
        &self,
        tenant_id: TenantId,
        subject: &str,
    ) -> AppResult<Option<UserIdentity>> {
        Ok(self
            .identities
            .lock()
            .await
            .iter()
            .find(|(identity_tenant, identity_subject, _)| {
                *identity_tenant == tenant_id && identity_subject == subject
            })
            .map(|(_, subject, role)| {
                UserIdentity::new(
                    subject.clone(),
                    subject.clone(),
                    format!("{subject}@x.com"),
                    role.clone(),
                    tenant_id,
                )
            }))
    }

    async fn reassign_role(
        &self,
        tenant_id: TenantId,
        from_role: &str,
        to_role: &str,
    ) -> AppResult<u64> {
        if self.fail_reassign.load(Ordering::SeqCst) {
            return Err(AppError::Internal("identity store unavailable".to_owned()));
        }

        let mut updated = 0;
        for (identity_tenant, _, role) in self.identities.lock().await.iter_mut() {
            if *identity_tenant == tenant_id && role == from_role {
                *role = to_role.to_owned();
                updated += 1;
            }
        }

        Ok(updated)
    }

    async fn count_identities_with_role(
        &self,
        tenant_id: TenantId,
        role_name: &str,
    ) -> AppResult<u64> {
        Ok(self
            .identities
            .lock()
            .await
            .iter()
            .filter(|(identity_tenant, _, role)| *identity_tenant == tenant_id && role == role_name)
            .count() as u64)
    }

    async fn list_role_references(&self, tenant_id: TenantId) -> AppResult<Vec<RoleReference>> {
        let mut counts = BTreeMap::<String, u64>::new();
        for (identity_tenant, _, role) in self.identities.lock().await.iter() {
            if *identity_tenant == tenant_id {
                *counts.entry(role.clone()).or_default() += 1;
            }
        }

        Ok(counts
            .into_iter()
            .map(|(role_name, identity_count)| RoleReference {
                role_name,
                identity_count,
            })
            .collect())
    }
}

#[derive(Default)]
struct FakeAuditRepository {
    events: Mutex<Vec<AuditEvent>>,
}

#[async_trait]
impl AuditRepository for FakeAuditRepository {
    async fn append_event(&self, event: AuditEvent) -> AppResult<()> {
        self.events.lock().await.push(event);
        Ok(())
    }
}

struct Harness {
    tenant_id: TenantId,
    service: RoleAdministrationService,
    roles: Arc<FakeRoleRepository>,
    identities: Arc<FakeIdentityRepository>,
    audit: Arc<FakeAuditRepository>,
}

impl Harness {
    async fn seeded() -> Self {
        let tenant_id = TenantId::new();
        let roles = Arc::new(FakeRoleRepository::default());
        let identities = Arc::new(FakeIdentityRepository::default());
        let audit = Arc::new(FakeAuditRepository::default());
        let service =
            RoleAdministrationService::new(roles.clone(), identities.clone(), audit.clone());

        let seeded = service.seed_reserved_roles(tenant_id).await;
        assert!(seeded.is_ok_and(|names| names.len() == ReservedRole::all().len()));

        Self {
            tenant_id,
            service,
            roles,
            identities,
            audit,
        }
    }

    fn actor(&self, role: &str) -> UserIdentity {
        UserIdentity::new("actor-1", "Actor", "actor@x.com", role, self.tenant_id)
    }

    fn admin(&self) -> UserIdentity {
        self.actor("administrator")
    }

    fn evaluator(&self) -> PermissionEvaluator {
        PermissionEvaluator::new(self.roles.clone())
    }

    async fn create(&self, name: &str, based_on: Option<&str>) -> AppResult<Role> {
        self.service
            .create_role(
                &self.admin(),
                CreateRoleInput {
                    name: name.to_owned(),
                    based_on: based_on.map(str::to_owned),
                },
            )
            .await
    }

    async fn audit_actions(&self) -> Vec<AuditAction> {
        self.audit
            .events
            .lock()
            .await
            .iter()
            .map(|event| event.action)
            .collect()
    }
}

#[tokio::test]
async fn reserved_names_cannot_be_created_renamed_or_deleted() {
    let harness = Harness::seeded().await;
    assert!(harness.create("field-tech", None).await.is_ok());

    for reserved in ReservedRole::all() {
        let name = reserved.as_str();
        assert!(matches!(
            harness.create(name, None).await,
            Err(AppError::Reserved(_))
        ));
        assert!(matches!(
            harness.service.delete_role(&harness.admin(), name).await,
            Err(AppError::Reserved(_))
        ));
        assert!(matches!(
            harness
                .service
                .rename_role(&harness.admin(), name, "renamed")
                .await,
            Err(AppError::Reserved(_))
        ));
        assert!(matches!(
            harness
                .service
                .rename_role(&harness.admin(), "field-tech", name)
                .await,
            Err(AppError::Reserved(_))
        ));
    }
}

#[tokio::test]
async fn create_rejects_invalid_and_duplicate_names() {
    let harness = Harness::seeded().await;

    for name in ["", "field tech", "tech!", "ünicode"] {
        assert!(matches!(
            harness.create(name, None).await,
            Err(AppError::InvalidName(_))
        ));
    }

    assert!(harness.create("field-tech", None).await.is_ok());
    assert!(matches!(
        harness.create("field-tech", None).await,
        Err(AppError::Conflict(_))
    ));
}

#[tokio::test]
async fn create_without_base_starts_from_the_baseline() {
    let harness = Harness::seeded().await;

    let created = harness.create("dispatcher", Some("ghost")).await;

    assert!(created.is_ok_and(|role| role.is_custom() && role.permissions() == &PermissionSet::baseline()));
}

#[tokio::test]
async fn create_copies_the_base_map_without_linking_it() {
    let harness = Harness::seeded().await;
    let technician = harness
        .service
        .get_role(&harness.admin(), "technician")
        .await;
    let technician_map = match technician {
        Ok(role) => role.permissions().clone(),
        Err(error) => panic!("technician should be seeded: {error}"),
    };

    let created = harness.create("field-tech", Some("technician")).await;
    assert!(matches!(created, Ok(ref role) if role.permissions() == &technician_map));

    let updated = harness
        .service
        .update_role_permissions(&harness.admin(), "technician", PermissionSet::empty())
        .await;
    assert!(updated.is_ok());

    let field_tech = harness
        .evaluator()
        .effective_permissions(harness.tenant_id, "field-tech")
        .await;
    assert!(matches!(field_tech, Ok(ref set) if set == &technician_map));
}

#[tokio::test]
async fn only_the_super_role_may_base_a_role_on_the_super_role() {
    let harness = Harness::seeded().await;

    let denied = harness.create("root-lite", Some("sysadmin")).await;
    assert!(matches!(denied, Err(AppError::Forbidden(_))));

    let created = harness
        .service
        .create_role(
            &harness.actor("sysadmin"),
            CreateRoleInput {
                name: "root-lite".to_owned(),
                based_on: Some("sysadmin".to_owned()),
            },
        )
        .await;
    assert!(created.is_ok_and(|role| role.permissions() == &PermissionSet::all_granted()));
}

#[tokio::test]
async fn non_elevated_callers_cannot_administer_roles() {
    let harness = Harness::seeded().await;
    let caller = harness.actor("technician");

    assert!(matches!(
        harness.service.list_roles(&caller).await,
        Err(AppError::Forbidden(_))
    ));
    assert!(matches!(
        harness
            .service
            .create_role(
                &caller,
                CreateRoleInput {
                    name: "dispatcher".to_owned(),
                    based_on: None,
                },
            )
            .await,
        Err(AppError::Forbidden(_))
    ));
    assert!(matches!(
        harness
            .service
            .update_role_permissions(&caller, "user", PermissionSet::empty())
            .await,
        Err(AppError::Forbidden(_))
    ));
}

#[tokio::test]
async fn super_role_definition_requires_the_super_role() {
    let harness = Harness::seeded().await;

    let denied = harness
        .service
        .update_role_permissions(&harness.admin(), "sysadmin", PermissionSet::empty())
        .await;
    assert!(matches!(denied, Err(AppError::Forbidden(_))));

    let stored = harness
        .service
        .update_role_permissions(&harness.actor("sysadmin"), "sysadmin", PermissionSet::empty())
        .await;
    assert!(stored.is_ok_and(|role| role.permissions() == &PermissionSet::all_granted()));

    let effective = harness
        .evaluator()
        .effective_permissions(harness.tenant_id, "sysadmin")
        .await;
    assert!(matches!(effective, Ok(ref set) if set == &PermissionSet::all_granted()));
}

#[tokio::test]
async fn permission_updates_apply_to_the_next_evaluation() {
    let harness = Harness::seeded().await;
    let updated = PermissionSet::baseline().with(Capability::EditAllTickets, true);

    let result = harness
        .service
        .update_role_permissions(&harness.admin(), "user", updated.clone())
        .await;
    assert!(result.is_ok());

    let effective = harness
        .evaluator()
        .effective_permissions(harness.tenant_id, "user")
        .await;
    assert!(matches!(effective, Ok(ref set) if set == &updated));
}

#[tokio::test]
async fn updating_an_unknown_custom_role_is_not_found() {
    let harness = Harness::seeded().await;

    let result = harness
        .service
        .update_role_permissions(&harness.admin(), "ghost", PermissionSet::baseline())
        .await;

    assert!(matches!(result, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn updating_a_missing_reserved_role_creates_it() {
    let harness = Harness::seeded().await;
    harness
        .roles
        .roles
        .lock()
        .await
        .remove(&(harness.tenant_id, "technician".to_owned()));

    let result = harness
        .service
        .update_role_permissions(&harness.admin(), "technician", PermissionSet::empty())
        .await;

    assert!(result.is_ok_and(|role| !role.is_custom() && role.permissions().is_empty()));
}

#[tokio::test]
async fn get_role_synthesizes_the_super_role() {
    let harness = Harness::seeded().await;
    harness
        .roles
        .roles
        .lock()
        .await
        .remove(&(harness.tenant_id, "sysadmin".to_owned()));

    let role = harness
        .service
        .get_role(&harness.actor("user"), "sysadmin")
        .await;

    assert!(role.is_ok_and(|role| role.permissions() == &PermissionSet::all_granted()));
}

#[tokio::test]
async fn rename_moves_every_holder_to_the_new_name() {
    let harness = Harness::seeded().await;
    assert!(harness.create("field-tech", Some("technician")).await.is_ok());
    for subject in ["u-1", "u-2", "u-3"] {
        harness
            .identities
            .add(harness.tenant_id, subject, "field-tech")
            .await;
    }
    harness.identities.add(harness.tenant_id, "u-4", "user").await;

    let outcome = harness
        .service
        .rename_role(&harness.admin(), "field-tech", "field-agent")
        .await;

    let outcome = match outcome {
        Ok(outcome) => outcome,
        Err(error) => panic!("rename should succeed: {error}"),
    };
    assert_eq!(outcome.role.name().as_str(), "field-agent");
    assert_eq!(outcome.users_updated, 3);
    assert_eq!(outcome.users_remaining, Some(0));
    assert_eq!(harness.identities.role_of("u-1").await.as_deref(), Some("field-agent"));
    assert_eq!(harness.identities.role_of("u-4").await.as_deref(), Some("user"));

    let stale = harness
        .evaluator()
        .effective_permissions(harness.tenant_id, "field-tech")
        .await;
    assert!(matches!(stale, Ok(ref set) if set.is_empty()));
    assert!(harness.audit_actions().await.contains(&AuditAction::RoleRenamed));
}

#[tokio::test]
async fn rename_validates_source_and_target() {
    let harness = Harness::seeded().await;
    assert!(harness.create("field-tech", None).await.is_ok());
    assert!(harness.create("dispatcher", None).await.is_ok());

    assert!(matches!(
        harness
            .service
            .rename_role(&harness.admin(), "ghost", "field-agent")
            .await,
        Err(AppError::NotFound(_))
    ));
    assert!(matches!(
        harness
            .service
            .rename_role(&harness.admin(), "field-tech", "dispatcher")
            .await,
        Err(AppError::Conflict(_))
    ));
    assert!(matches!(
        harness
            .service
            .rename_role(&harness.admin(), "field-tech", "field agent")
            .await,
        Err(AppError::InvalidName(_))
    ));
}

#[tokio::test]
async fn rename_succeeds_when_identity_propagation_fails() {
    let harness = Harness::seeded().await;
    assert!(harness.create("field-tech", None).await.is_ok());
    harness
        .identities
        .add(harness.tenant_id, "u-1", "field-tech")
        .await;
    harness.identities.fail_reassign.store(true, Ordering::SeqCst);

    let outcome = harness
        .service
        .rename_role(&harness.admin(), "field-tech", "field-agent")
        .await;

    assert!(outcome.is_ok_and(|outcome| outcome.users_updated == 0
        && outcome.users_remaining == Some(1)));

    let orphans = harness.service.orphaned_identities(&harness.admin()).await;
    assert!(orphans.is_ok_and(|orphans| orphans.len() == 1
        && orphans[0].role_name == "field-tech"
        && orphans[0].identity_count == 1));

    harness.identities.fail_reassign.store(false, Ordering::SeqCst);
    let reassigned = harness
        .service
        .reassign_identities(&harness.admin(), "field-tech", "field-agent")
        .await;
    assert!(matches!(reassigned, Ok(1)));
    assert_eq!(harness.identities.role_of("u-1").await.as_deref(), Some("field-agent"));
}

#[tokio::test]
async fn delete_leaves_holders_on_a_dangling_name() {
    let harness = Harness::seeded().await;
    assert!(harness.create("field-tech", Some("technician")).await.is_ok());
    harness
        .identities
        .add(harness.tenant_id, "u-1", "field-tech")
        .await;
    harness.identities.add(harness.tenant_id, "u-2", "sysadmin").await;

    let deleted = harness.service.delete_role(&harness.admin(), "field-tech").await;
    assert!(deleted.is_ok());

    assert_eq!(harness.identities.role_of("u-1").await.as_deref(), Some("field-tech"));
    let effective = harness
        .evaluator()
        .effective_permissions(harness.tenant_id, "field-tech")
        .await;
    assert!(matches!(effective, Ok(ref set) if set.is_empty()));

    let orphans = harness.service.orphaned_identities(&harness.admin()).await;
    assert!(orphans.is_ok_and(|orphans| orphans
        .iter()
        .map(|orphan| orphan.role_name.as_str())
        .eq(["field-tech"])));

    assert!(matches!(
        harness.service.delete_role(&harness.admin(), "field-tech").await,
        Err(AppError::NotFound(_))
    ));
}

#[tokio::test]
async fn reassign_refuses_live_and_unknown_roles() {
    let harness = Harness::seeded().await;
    assert!(harness.create("field-tech", None).await.is_ok());

    assert!(matches!(
        harness
            .service
            .reassign_identities(&harness.admin(), "field-tech", "user")
            .await,
        Err(AppError::Conflict(_))
    ));
    assert!(matches!(
        harness
            .service
            .reassign_identities(&harness.admin(), "technician", "user")
            .await,
        Err(AppError::Reserved(_))
    ));
    assert!(matches!(
        harness
            .service
            .reassign_identities(&harness.admin(), "ghost", "phantom")
            .await,
        Err(AppError::NotFound(_))
    ));
    assert!(matches!(
        harness
            .service
            .reassign_identities(&harness.admin(), "ghost", "sysadmin")
            .await,
        Err(AppError::Forbidden(_))
    ));
}

#[tokio::test]
async fn seeding_keeps_edited_reserved_roles() {
    let harness = Harness::seeded().await;
    let result = harness
        .service
        .update_role_permissions(&harness.admin(), "user", PermissionSet::empty())
        .await;
    assert!(result.is_ok());

    let seeded = harness.service.seed_reserved_roles(harness.tenant_id).await;
    assert!(seeded.is_ok_and(|names| names.is_empty()));

    let user = harness
        .evaluator()
        .effective_permissions(harness.tenant_id, "user")
        .await;
    assert!(matches!(user, Ok(ref set) if set.is_empty()));
}

#[tokio::test]
async fn mutations_are_audited_with_the_actor() {
    let harness = Harness::seeded().await;
    assert!(harness.create("field-tech", None).await.is_ok());
    assert!(
        harness
            .service
            .update_role_permissions(&harness.admin(), "field-tech", PermissionSet::empty())
            .await
            .is_ok()
    );
    assert!(harness.service.delete_role(&harness.admin(), "field-tech").await.is_ok());

    assert_eq!(
        harness.audit_actions().await,
        vec![
            AuditAction::RoleCreated,
            AuditAction::RolePermissionsUpdated,
            AuditAction::RoleDeleted,
        ]
    );
    let events = harness.audit.events.lock().await;
    assert!(events.iter().all(|event| event.subject == "actor-1"
        && event.resource_type == "role"
        && event.tenant_id == harness.tenant_id));
}
