use async_trait::async_trait;
use sqlx::{FromRow, PgPool};

use dispatchdesk_application::{IdentityRepository, RoleReference};
use dispatchdesk_core::{AppError, AppResult, TenantId, UserIdentity};

/// PostgreSQL-backed access to the role field of user records.
#[derive(Clone)]
pub struct PostgresIdentityRepository {
    pool: PgPool,
}

impl PostgresIdentityRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct IdentityRow {
    id: String,
    display_name: String,
    email: String,
    role: String,
    approved: bool,
}

#[derive(Debug, FromRow)]
struct RoleReferenceRow {
    role: String,
    identity_count: i64,
}

#[async_trait]
impl IdentityRepository for PostgresIdentityRepository {
    async fn find_identity(
        &self,
        tenant_id: TenantId,
        subject: &str,
    ) -> AppResult<Option<UserIdentity>> {
        let row = sqlx::query_as::<_, IdentityRow>(
            r#"
            SELECT id, display_name, email, role, approved
            FROM users
            WHERE tenant_id = $1 AND id = $2
            "#,
        )
        .bind(tenant_id.as_uuid())
        .bind(subject)
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to find identity: {error}")))?;

        Ok(row.map(|row| {
            UserIdentity::new(row.id, row.display_name, row.email, row.role, tenant_id)
                .with_approved(row.approved)
        }))
    }

    async fn reassign_role(
        &self,
        tenant_id: TenantId,
        from_role: &str,
        to_role: &str,
    ) -> AppResult<u64> {
        let rows_affected = sqlx::query(
            r#"
            UPDATE users
            SET role = $3
            WHERE tenant_id = $1 AND role = $2
            "#,
        )
        .bind(tenant_id.as_uuid())
        .bind(from_role)
        .bind(to_role)
        .execute(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to reassign identities: {error}")))?
        .rows_affected();

        Ok(rows_affected)
    }

    async fn count_identities_with_role(
        &self,
        tenant_id: TenantId,
        role_name: &str,
    ) -> AppResult<u64> {
        let count = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*)
            FROM users
            WHERE tenant_id = $1 AND role = $2
            "#,
        )
        .bind(tenant_id.as_uuid())
        .bind(role_name)
        .fetch_one(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to count identities: {error}")))?;

        u64::try_from(count)
            .map_err(|error| AppError::Internal(format!("invalid identity count: {error}")))
    }

    async fn list_role_references(&self, tenant_id: TenantId) -> AppResult<Vec<RoleReference>> {
        sqlx::query_as::<_, RoleReferenceRow>(
            r#"
            SELECT role, COUNT(*) AS identity_count
            FROM users
            WHERE tenant_id = $1
            GROUP BY role
            ORDER BY role
            "#,
        )
        .bind(tenant_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to list role references: {error}")))?
        .into_iter()
        .map(|row| {
            Ok(RoleReference {
                role_name: row.role,
                identity_count: u64::try_from(row.identity_count).map_err(|error| {
                    AppError::Internal(format!("invalid identity count: {error}"))
                })?,
            })
        })
        .collect()
    }
}
