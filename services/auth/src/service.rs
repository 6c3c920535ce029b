//! Auth service: login, session bookkeeping and authorization
//!
//! The service holds no mutable state of its own; everything durable lives
//! in the admin and session stores, reached per call.

use chrono::Duration;
use std::sync::Arc;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::{
    clock::Clock,
    error::{AuthError, AuthResult},
    jwt::{TokenCodec, TokenSubject},
    models::{Admin, AdminSummary, NewSession, SessionRecord},
    password,
    repositories::{AdminStore, SessionStore},
};

/// A freshly created login session
#[derive(Debug, Clone)]
pub struct IssuedSession {
    pub token: String,
    pub record: SessionRecord,
}

/// Admin resolved from a verified token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedAdmin {
    pub id: i32,
    pub email: String,
    /// Session record the token belongs to
    pub session_id: String,
}

impl AuthenticatedAdmin {
    pub fn summary(&self) -> AdminSummary {
        AdminSummary {
            id: self.id,
            email: self.email.clone(),
        }
    }
}

/// Auth service shared across handlers
#[derive(Clone)]
pub struct AuthService {
    admins: Arc<dyn AdminStore>,
    sessions: Arc<dyn SessionStore>,
    codec: TokenCodec,
    clock: Arc<dyn Clock>,
    secure_cookies: bool,
}

impl AuthService {
    /// Create a new auth service
    pub fn new(
        admins: Arc<dyn AdminStore>,
        sessions: Arc<dyn SessionStore>,
        codec: TokenCodec,
        clock: Arc<dyn Clock>,
        secure_cookies: bool,
    ) -> Self {
        Self {
            admins,
            sessions,
            codec,
            clock,
            secure_cookies,
        }
    }

    /// Whether auth cookies carry the `Secure` attribute
    pub fn secure_cookies(&self) -> bool {
        self.secure_cookies
    }

    /// Token and session lifetime in seconds
    pub fn session_ttl_seconds(&self) -> i64 {
        self.codec.ttl_seconds()
    }

    /// Check credentials against the admin store.
    ///
    /// `Ok(None)` for an unknown email, an inactive admin or a wrong password;
    /// which one is never revealed. On success the last-login stamp is
    /// updated before returning.
    pub async fn authenticate(&self, email: &str, password: &str) -> AuthResult<Option<Admin>> {
        let admin = self.admins.find_by_email(email).await.map_err(|e| {
            error!("Admin lookup failed: {}", e);
            AuthError::Internal
        })?;

        let Some(mut admin) = admin.filter(|admin| admin.is_active) else {
            // Same cost as a wrong password, so timing does not reveal the account.
            password::verify_dummy(password).await.map_err(|e| {
                error!("Password verification failed: {}", e);
                AuthError::Internal
            })?;
            info!("Login rejected: unknown or inactive account {}", email);
            return Ok(None);
        };

        let matches = password::verify_password(password, &admin.password_hash)
            .await
            .map_err(|e| {
                error!("Password verification failed: {}", e);
                AuthError::Internal
            })?;

        if !matches {
            info!("Login rejected: wrong password for admin {}", admin.id);
            return Ok(None);
        }

        let now = self.clock.now();
        self.admins
            .touch_last_login(admin.id, now)
            .await
            .map_err(|e| {
                error!("Failed to update last login for admin {}: {}", admin.id, e);
                AuthError::Internal
            })?;
        admin.last_login_at = Some(now);

        Ok(Some(admin))
    }

    /// Issue a token and record a new session for the admin
    pub async fn create_session(&self, admin: &Admin) -> AuthResult<IssuedSession> {
        let now = self.clock.now();
        let token_id = format!(
            "{}_{}_{}",
            admin.id,
            now.timestamp_millis(),
            Uuid::new_v4().simple()
        );

        let subject = TokenSubject {
            admin_id: admin.id,
            email: admin.email.clone(),
            is_admin: true,
            session_id: token_id.clone(),
        };
        let token = self.codec.issue(&subject, now).map_err(|e| {
            error!("Failed to sign token: {}", e);
            AuthError::Internal
        })?;

        let new_session = NewSession {
            admin_id: admin.id,
            token_id,
            expires_at: now + Duration::seconds(self.codec.ttl_seconds()),
            created_at: now,
        };
        let record = self.sessions.insert(&new_session).await.map_err(|e| {
            error!("Failed to store session for admin {}: {}", admin.id, e);
            AuthError::Internal
        })?;

        info!("Created session {} for admin {}", record.token_id, admin.id);
        Ok(IssuedSession { token, record })
    }

    /// Delete every session of an admin. No sessions is a successful no-op.
    pub async fn invalidate_all_sessions(&self, admin_id: i32) -> AuthResult<u64> {
        let removed = self.sessions.delete_for_admin(admin_id).await.map_err(|e| {
            error!("Failed to invalidate sessions for admin {}: {}", admin_id, e);
            AuthError::Internal
        })?;

        info!("Invalidated {} session(s) for admin {}", removed, admin_id);
        Ok(removed)
    }

    /// Best-effort removal of expired session records; failures are only logged
    pub async fn clean_expired_sessions(&self) {
        match self.sessions.delete_expired(self.clock.now()).await {
            Ok(0) => {}
            Ok(removed) => info!("Cleaned up {} expired session(s)", removed),
            Err(e) => error!("Failed to clean expired sessions: {}", e),
        }
    }

    /// Run [`Self::clean_expired_sessions`] detached from the caller
    pub fn spawn_session_cleanup(&self) -> tokio::task::JoinHandle<()> {
        let service = self.clone();
        tokio::spawn(async move { service.clean_expired_sessions().await })
    }

    /// Resolve a presented token to an admin who may act right now.
    ///
    /// Requires a valid signature, an unexpired token with admin rights, a
    /// live session record for the token, and an admin row that still exists
    /// and is active. Every failure, including store errors, is `Unauthorized`.
    pub async fn authorize(&self, token: Option<&str>) -> AuthResult<AuthenticatedAdmin> {
        let token = token.ok_or(AuthError::Unauthorized)?;
        let now = self.clock.now();

        let claims = self.codec.verify(token, now).map_err(|e| {
            warn!("Rejected token: {}", e);
            AuthError::Unauthorized
        })?;

        if !claims.is_admin {
            warn!("Rejected token without admin rights for user {}", claims.user_id);
            return Err(AuthError::Unauthorized);
        }

        let live = self
            .sessions
            .is_live(claims.user_id, &claims.sid, now)
            .await
            .map_err(|e| {
                error!("Session lookup failed: {}", e);
                AuthError::Unauthorized
            })?;
        if !live {
            warn!("Rejected token for admin {}: session ended", claims.user_id);
            return Err(AuthError::Unauthorized);
        }

        let admin = self
            .admins
            .find_by_id(claims.user_id)
            .await
            .map_err(|e| {
                error!("Admin lookup failed: {}", e);
                AuthError::Unauthorized
            })?
            .filter(|admin| admin.is_active)
            .ok_or_else(|| {
                warn!("Rejected token for admin {}: missing or inactive", claims.user_id);
                AuthError::Unauthorized
            })?;

        Ok(AuthenticatedAdmin {
            id: admin.id,
            email: admin.email,
            session_id: claims.sid,
        })
    }

    /// Create an admin unless one with this email exists.
    ///
    /// Returns `None` when the email was already provisioned.
    pub async fn provision_admin(&self, email: &str, password: &str) -> anyhow::Result<Option<Admin>> {
        let hash = password::hash_password(password).await?;
        let admin = self.admins.insert_if_absent(email, &hash).await?;
        Ok(admin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        clock::ManualClock,
        config::TokenConfig,
        repositories::memory::{MemoryAdminStore, MemorySessionStore},
    };
    use chrono::{TimeZone, Utc};

    struct Harness {
        service: AuthService,
        admins: MemoryAdminStore,
        sessions: MemorySessionStore,
        clock: ManualClock,
    }

    fn harness() -> Harness {
        let admins = MemoryAdminStore::new();
        let sessions = MemorySessionStore::new();
        let clock = ManualClock::new(Utc.with_ymd_and_hms(2026, 5, 10, 9, 0, 0).unwrap());
        let service = AuthService::new(
            Arc::new(admins.clone()),
            Arc::new(sessions.clone()),
            TokenCodec::new(&TokenConfig::new("service-test-secret")),
            Arc::new(clock.clone()),
            false,
        );
        Harness {
            service,
            admins,
            sessions,
            clock,
        }
    }

    async fn add_admin(h: &Harness, email: &str, password: &str, active: bool) -> Admin {
        let hash = password::hash_password(password).await.unwrap();
        h.admins.add(email, &hash, active).await
    }

    #[tokio::test]
    async fn test_authenticate_success_updates_last_login() {
        let h = harness();
        let admin = add_admin(&h, "admin@test.com", "correct", true).await;
        let call_time = h.clock.now();

        let found = h
            .service
            .authenticate("admin@test.com", "correct")
            .await
            .unwrap()
            .expect("admin should authenticate");

        assert_eq!(found.id, admin.id);
        let stored = h.admins.get(admin.id).await.unwrap();
        assert!(stored.last_login_at.unwrap() >= call_time);
    }

    #[tokio::test]
    async fn test_inactive_admin_never_authenticates() {
        let h = harness();
        let admin = add_admin(&h, "admin@test.com", "correct", false).await;

        let result = h.service.authenticate("admin@test.com", "correct").await;
        assert_eq!(result.unwrap().map(|a| a.id), None);
        assert!(h.admins.get(admin.id).await.unwrap().last_login_at.is_none());
    }

    #[tokio::test]
    async fn test_wrong_password_and_unknown_email() {
        let h = harness();
        add_admin(&h, "admin@test.com", "correct", true).await;

        assert!(h.service.authenticate("admin@test.com", "nope").await.unwrap().is_none());
        assert!(h.service.authenticate("ADMIN@test.com", "correct").await.unwrap().is_none());
        assert!(h.service.authenticate("other@test.com", "correct").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_every_rejection_costs_one_verification() {
        let h = harness();
        add_admin(&h, "admin@test.com", "correct", true).await;
        add_admin(&h, "retired@test.com", "correct", false).await;

        for (email, pw) in [
            ("admin@test.com", "nope"),
            ("retired@test.com", "correct"),
            ("nobody@test.com", "correct"),
        ] {
            let before = password::verification_count();
            assert!(h.service.authenticate(email, pw).await.unwrap().is_none());
            assert_eq!(password::verification_count(), before + 1, "{}", email);
        }
    }

    #[tokio::test]
    async fn test_authenticate_store_outage_is_internal() {
        let h = harness();
        h.admins.set_unavailable(true);
        let result = h.service.authenticate("admin@test.com", "correct").await;
        assert_eq!(result.unwrap_err(), AuthError::Internal);
    }

    #[tokio::test]
    async fn test_session_ids_are_unique_within_the_same_instant() {
        let h = harness();
        let admin = add_admin(&h, "admin@test.com", "correct", true).await;

        let first = h.service.create_session(&admin).await.unwrap();
        let second = h.service.create_session(&admin).await.unwrap();

        assert_ne!(first.record.token_id, second.record.token_id);
        assert_eq!(h.sessions.count_for_admin(admin.id).await.unwrap(), 2);
        assert_eq!(
            first.record.expires_at - first.record.created_at,
            Duration::hours(8)
        );
    }

    #[tokio::test]
    async fn test_token_validity_window() {
        let h = harness();
        let admin = add_admin(&h, "admin@test.com", "correct", true).await;
        let issued = h.service.create_session(&admin).await.unwrap();

        assert!(h.service.authorize(Some(&issued.token)).await.is_ok());

        h.clock.advance(Duration::hours(8) - Duration::seconds(1));
        assert!(h.service.authorize(Some(&issued.token)).await.is_ok());

        h.clock.advance(Duration::seconds(2));
        assert_eq!(
            h.service.authorize(Some(&issued.token)).await,
            Err(AuthError::Unauthorized)
        );
    }

    #[tokio::test]
    async fn test_invalidate_all_sessions_for_any_count() {
        let h = harness();
        let admin = add_admin(&h, "admin@test.com", "correct", true).await;
        let other = add_admin(&h, "other@test.com", "correct", true).await;
        h.service.create_session(&other).await.unwrap();

        for count in [0usize, 1, 5] {
            for _ in 0..count {
                h.service.create_session(&admin).await.unwrap();
            }
            let removed = h.service.invalidate_all_sessions(admin.id).await.unwrap();
            assert_eq!(removed, count as u64);
            assert_eq!(h.sessions.count_for_admin(admin.id).await.unwrap(), 0);
        }

        assert_eq!(h.sessions.count_for_admin(other.id).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_deactivation_revokes_unexpired_token() {
        let h = harness();
        let admin = add_admin(&h, "admin@test.com", "correct", true).await;
        let issued = h.service.create_session(&admin).await.unwrap();
        assert!(h.service.authorize(Some(&issued.token)).await.is_ok());

        h.admins.set_active(admin.id, false).await;
        assert_eq!(
            h.service.authorize(Some(&issued.token)).await,
            Err(AuthError::Unauthorized)
        );
    }

    #[tokio::test]
    async fn test_deleted_admin_is_unauthorized() {
        let h = harness();
        let admin = add_admin(&h, "admin@test.com", "correct", true).await;
        let issued = h.service.create_session(&admin).await.unwrap();

        h.admins.remove(admin.id).await;
        assert_eq!(
            h.service.authorize(Some(&issued.token)).await,
            Err(AuthError::Unauthorized)
        );
    }

    #[tokio::test]
    async fn test_logout_revokes_previously_issued_token() {
        let h = harness();
        let admin = add_admin(&h, "admin@test.com", "correct", true).await;
        let issued = h.service.create_session(&admin).await.unwrap();

        h.service.invalidate_all_sessions(admin.id).await.unwrap();
        assert_eq!(
            h.service.authorize(Some(&issued.token)).await,
            Err(AuthError::Unauthorized)
        );
    }

    #[tokio::test]
    async fn test_authorize_rejects_missing_and_foreign_tokens() {
        let h = harness();
        let admin = add_admin(&h, "admin@test.com", "correct", true).await;
        h.service.create_session(&admin).await.unwrap();

        let foreign = TokenCodec::new(&TokenConfig::new("someone-else"))
            .issue(
                &TokenSubject {
                    admin_id: admin.id,
                    email: admin.email.clone(),
                    is_admin: true,
                    session_id: "forged".to_string(),
                },
                h.clock.now(),
            )
            .unwrap();

        assert_eq!(h.service.authorize(None).await, Err(AuthError::Unauthorized));
        assert_eq!(
            h.service.authorize(Some(&foreign)).await,
            Err(AuthError::Unauthorized)
        );
    }

    #[tokio::test]
    async fn test_authorize_store_outage_is_unauthorized() {
        let h = harness();
        let admin = add_admin(&h, "admin@test.com", "correct", true).await;
        let issued = h.service.create_session(&admin).await.unwrap();

        h.sessions.set_unavailable(true);
        assert_eq!(
            h.service.authorize(Some(&issued.token)).await,
            Err(AuthError::Unauthorized)
        );
    }

    #[tokio::test]
    async fn test_clean_expired_sessions() {
        let h = harness();
        let admin = add_admin(&h, "admin@test.com", "correct", true).await;
        h.service.create_session(&admin).await.unwrap();

        h.clock.advance(Duration::hours(4));
        h.service.create_session(&admin).await.unwrap();

        h.clock.advance(Duration::hours(5));
        h.service.clean_expired_sessions().await;
        assert_eq!(h.sessions.all().await.len(), 1);

        h.sessions.set_unavailable(true);
        h.service.clean_expired_sessions().await;
    }

    #[tokio::test]
    async fn test_provision_admin_is_idempotent() {
        let h = harness();
        let created = h
            .service
            .provision_admin("seed@test.com", "admin123")
            .await
            .unwrap()
            .expect("first provisioning creates the admin");
        assert!(created.is_active);

        let again = h.service.provision_admin("seed@test.com", "other").await.unwrap();
        assert!(again.is_none());

        let found = h.service.authenticate("seed@test.com", "admin123").await.unwrap();
        assert_eq!(found.map(|a| a.id), Some(created.id));
    }
}
