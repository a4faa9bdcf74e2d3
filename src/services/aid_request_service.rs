//! Aid request service - submission, review and cleanup of requests.

use async_trait::async_trait;
use bson::{oid::ObjectId, DateTime};
use std::sync::Arc;

use crate::domain::{AidRequest, NewAidRequest, RequestStatus};
use crate::errors::{AppError, AppResult};
use crate::infra::UnitOfWork;

/// Aid request service trait for dependency injection.
#[async_trait]
pub trait AidRequestService: Send + Sync {
    /// Every request
    async fn list_all(&self) -> AppResult<Vec<AidRequest>>;

    /// Requests in one state, newest first
    async fn list_by_status(&self, status: RequestStatus) -> AppResult<Vec<AidRequest>>;

    /// Requests submitted by one email, newest first
    async fn list_by_email(&self, email: &str) -> AppResult<Vec<AidRequest>>;

    /// Record a new request as `pending`
    async fn submit(&self, input: NewAidRequest) -> AppResult<ObjectId>;

    /// Move a request into one of the assignable states
    async fn update_status(&self, id: ObjectId, status: Option<&str>) -> AppResult<RequestStatus>;

    /// Remove a request
    async fn delete(&self, id: ObjectId) -> AppResult<()>;
}

/// Concrete implementation of AidRequestService using Unit of Work.
pub struct AidRequestManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> AidRequestManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> AidRequestService for AidRequestManager<U> {
    async fn list_all(&self) -> AppResult<Vec<AidRequest>> {
        self.uow.requests().find_all().await
    }

    async fn list_by_status(&self, status: RequestStatus) -> AppResult<Vec<AidRequest>> {
        self.uow.requests().find_by_status(status).await
    }

    async fn list_by_email(&self, email: &str) -> AppResult<Vec<AidRequest>> {
        self.uow.requests().find_by_email(email).await
    }

    async fn submit(&self, input: NewAidRequest) -> AppResult<ObjectId> {
        let request = AidRequest::submit(input, DateTime::now());
        let id = self.uow.requests().insert(request).await?;
        tracing::info!(request_id = %id, "Aid request submitted");
        Ok(id)
    }

    async fn update_status(&self, id: ObjectId, status: Option<&str>) -> AppResult<RequestStatus> {
        let status = RequestStatus::parse_assignable(status)?;

        let outcome = self.uow.requests().update_status(id, status).await?;
        if !outcome.found() {
            return Err(AppError::not_found("Request"));
        }

        tracing::info!(request_id = %id, %status, "Aid request status updated");
        Ok(status)
    }

    async fn delete(&self, id: ObjectId) -> AppResult<()> {
        if !self.uow.requests().delete(id).await? {
            return Err(AppError::not_found("Request"));
        }
        tracing::info!(request_id = %id, "Aid request deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Details;
    use crate::infra::repositories::MockAidRequestRepository;
    use crate::infra::{TestUnitOfWork, WriteOutcome};
    use mockall::predicate::eq;

    fn service(repo: MockAidRequestRepository) -> AidRequestManager<TestUnitOfWork> {
        AidRequestManager::new(Arc::new(TestUnitOfWork {
            requests: Some(Arc::new(repo)),
            ..Default::default()
        }))
    }

    #[tokio::test]
    async fn submit_stores_pending_request() {
        let id = ObjectId::new();
        let mut repo = MockAidRequestRepository::new();
        repo.expect_insert()
            .withf(|request| {
                request.status == RequestStatus::Pending
                    && request.email.as_deref() == Some("a@x.com")
                    && request.id.is_none()
            })
            .times(1)
            .returning(move |_| Ok(id));

        let input = NewAidRequest {
            email: Some("a@x.com".into()),
            details: Details::new(),
        };
        assert_eq!(service(repo).submit(input).await.unwrap(), id);
    }

    #[tokio::test]
    async fn invalid_status_never_reaches_the_store() {
        let mut repo = MockAidRequestRepository::new();
        repo.expect_update_status().never();
        let svc = service(repo);

        for bad in [Some("pending"), Some("lost"), None] {
            let err = svc.update_status(ObjectId::new(), bad).await.unwrap_err();
            assert!(matches!(err, AppError::Validation(_)));
        }
    }

    #[tokio::test]
    async fn update_status_of_missing_request_is_not_found() {
        let id = ObjectId::new();
        let mut repo = MockAidRequestRepository::new();
        repo.expect_update_status()
            .with(eq(id), eq(RequestStatus::Matched))
            .times(1)
            .returning(|_, _| Ok(WriteOutcome::default()));

        let err = service(repo).update_status(id, Some("matched")).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn update_status_returns_new_state() {
        let mut repo = MockAidRequestRepository::new();
        repo.expect_update_status().returning(|_, _| {
            Ok(WriteOutcome {
                matched: 1,
                modified: 1,
            })
        });

        let status = service(repo)
            .update_status(ObjectId::new(), Some("completed"))
            .await
            .unwrap();
        assert_eq!(status, RequestStatus::Completed);
    }

    #[tokio::test]
    async fn delete_of_missing_request_is_not_found() {
        let mut repo = MockAidRequestRepository::new();
        repo.expect_delete().times(1).returning(|_| Ok(false));

        let err = service(repo).delete(ObjectId::new()).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
