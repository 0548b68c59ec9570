//! Permission checker.

use std::sync::Arc;

use tracing::{debug, warn};
use uuid::Uuid;

use coursehub_core::error::AppError;
use coursehub_core::result::AppResult;
use coursehub_entity::permission::{Operation, ServiceName};

use super::store::PermissionStore;

/// Decides whether an account may perform `operation` on `service`.
///
/// The chain is: current academic year, then the account's role for that
/// year, then the role's permissions filtered to the requested pair. Any
/// missing link denies.
#[derive(Debug, Clone)]
pub struct PermissionChecker {
    store: Arc<dyn PermissionStore>,
}

impl PermissionChecker {
    /// Create a checker over `store`.
    pub fn new(store: Arc<dyn PermissionStore>) -> Self {
        Self { store }
    }

    /// `Ok(())` when allowed, `Forbidden` otherwise.
    pub async fn check_permissions(
        &self,
        account_id: Uuid,
        service: ServiceName,
        operation: Operation,
    ) -> AppResult<()> {
        let Some(academic_year) = self.store.current_academic_year().await? else {
            warn!(%account_id, %service, %operation, "No current academic year, denying");
            return Err(AppError::forbidden("No current academic year is configured"));
        };

        let Some(role_id) = self
            .store
            .find_role_for_year(account_id, academic_year)
            .await?
        else {
            debug!(%account_id, academic_year, %service, %operation, "No role for year");
            return Err(denied(service, operation));
        };

        let permissions = self
            .store
            .find_role_permissions(role_id, service, operation)
            .await?;

        if permissions.iter().any(|p| p.grants(service, operation)) {
            Ok(())
        } else {
            debug!(%account_id, %role_id, %service, %operation, "Permission denied");
            Err(denied(service, operation))
        }
    }
}

fn denied(service: ServiceName, operation: Operation) -> AppError {
    AppError::forbidden(format!("Not allowed to {operation} on {service}"))
}

#[cfg(test)]
mod tests {
    use std::collections::{HashMap, HashSet};

    use async_trait::async_trait;

    use coursehub_core::error::ErrorKind;
    use coursehub_entity::permission::Permission;

    use super::*;

    /// In-memory store: metadata keyed by (account, year), grants keyed by role.
    #[derive(Debug, Default)]
    struct MemoryStore {
        current_year: Option<i32>,
        metadata: HashMap<(Uuid, i32), Uuid>,
        grants: HashMap<Uuid, HashSet<(ServiceName, Operation)>>,
    }

    #[async_trait]
    impl PermissionStore for MemoryStore {
        async fn current_academic_year(&self) -> AppResult<Option<i32>> {
            Ok(self.current_year)
        }

        async fn find_role_for_year(
            &self,
            account_id: Uuid,
            academic_year: i32,
        ) -> AppResult<Option<Uuid>> {
            Ok(self.metadata.get(&(account_id, academic_year)).copied())
        }

        async fn find_role_permissions(
            &self,
            role_id: Uuid,
            service: ServiceName,
            operation: Operation,
        ) -> AppResult<Vec<Permission>> {
            let granted = self
                .grants
                .get(&role_id)
                .is_some_and(|set| set.contains(&(service, operation)));
            Ok(if granted {
                vec![Permission {
                    id: Uuid::new_v4(),
                    service,
                    operation,
                }]
            } else {
                Vec::new()
            })
        }
    }

    struct Fixture {
        checker: PermissionChecker,
        alice: Uuid,
        bob: Uuid,
    }

    /// alice is a Teacher in 2024 with `(AffectationService, Get)` only.
    /// bob is a Teacher in 2023 only.
    fn fixture() -> Fixture {
        let alice = Uuid::new_v4();
        let bob = Uuid::new_v4();
        let teacher = Uuid::new_v4();

        let mut store = MemoryStore {
            current_year: Some(2024),
            ..Default::default()
        };
        store.metadata.insert((alice, 2024), teacher);
        store.metadata.insert((bob, 2023), teacher);
        store.grants.insert(
            teacher,
            HashSet::from([(ServiceName::AffectationService, Operation::Get)]),
        );

        Fixture {
            checker: PermissionChecker::new(Arc::new(store)),
            alice,
            bob,
        }
    }

    #[tokio::test]
    async fn test_teacher_can_read_affectations() {
        let f = fixture();
        f.checker
            .check_permissions(f.alice, ServiceName::AffectationService, Operation::Get)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_teacher_cannot_delete_affectations() {
        let f = fixture();
        let err = f
            .checker
            .check_permissions(f.alice, ServiceName::AffectationService, Operation::Delete)
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Forbidden);
    }

    #[tokio::test]
    async fn test_other_service_is_denied() {
        let f = fixture();
        let err = f
            .checker
            .check_permissions(f.alice, ServiceName::AccountService, Operation::Get)
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Forbidden);
    }

    #[tokio::test]
    async fn test_role_from_another_year_does_not_apply() {
        let f = fixture();
        let err = f
            .checker
            .check_permissions(f.bob, ServiceName::AffectationService, Operation::Get)
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Forbidden);
    }

    #[tokio::test]
    async fn test_unknown_account_is_forbidden_not_missing() {
        let f = fixture();
        let err = f
            .checker
            .check_permissions(Uuid::new_v4(), ServiceName::NodeService, Operation::Get)
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Forbidden);
    }

    #[tokio::test]
    async fn test_no_current_year_denies() {
        let checker = PermissionChecker::new(Arc::new(MemoryStore::default()));
        let err = checker
            .check_permissions(Uuid::new_v4(), ServiceName::NodeService, Operation::Get)
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Forbidden);
    }
}
