//! In-memory persistence and HTTP helpers shared by the integration tests.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use bson::{oid::ObjectId, DateTime};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use aid_bridge::api::{create_router, AppState};
use aid_bridge::domain::{
    AidRequest, Campaign, CampaignStatus, RequestStatus, User, VolunteerApplication,
    VolunteerStatus,
};
use aid_bridge::errors::{AppError, AppResult};
use aid_bridge::infra::repositories::{
    AidRequestRepository, CampaignRepository, UserRepository, VolunteerRepository,
};
use aid_bridge::infra::{UnitOfWork, WriteOutcome};
use aid_bridge::services::SharedSecretVerifier;

pub const SECRET: &str = "integration-test-secret-at-least-32-chars";

/// Newest first; documents stamped in the same millisecond keep reverse
/// insertion order.
fn newest_first<T: Clone>(items: &[T], created_at: impl Fn(&T) -> Option<DateTime>) -> Vec<T> {
    let mut sorted: Vec<T> = items.iter().rev().cloned().collect();
    sorted.sort_by(|a, b| created_at(b).cmp(&created_at(a)));
    sorted
}

fn outcome(matched: bool, modified: bool) -> WriteOutcome {
    WriteOutcome {
        matched: matched as u64,
        modified: modified as u64,
    }
}

#[derive(Default)]
pub struct MemoryUsers(Mutex<Vec<User>>);

#[async_trait]
impl UserRepository for MemoryUsers {
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let users = self.0.lock().unwrap();
        Ok(users.iter().find(|u| u.email == email).cloned())
    }

    async fn insert(&self, mut user: User) -> AppResult<ObjectId> {
        let mut users = self.0.lock().unwrap();
        if users.iter().any(|u| u.email == user.email) {
            return Err(AppError::conflict("User"));
        }
        let id = ObjectId::new();
        user.id = Some(id);
        users.push(user);
        Ok(id)
    }

    async fn update_role(&self, email: &str, role: &str) -> AppResult<WriteOutcome> {
        let mut users = self.0.lock().unwrap();
        match users.iter_mut().find(|u| u.email == email) {
            Some(user) => {
                let modified = user.role.as_deref() != Some(role);
                user.role = Some(role.to_string());
                Ok(outcome(true, modified))
            }
            None => Ok(outcome(false, false)),
        }
    }
}

#[derive(Default)]
pub struct MemoryRequests(Mutex<Vec<AidRequest>>);

#[async_trait]
impl AidRequestRepository for MemoryRequests {
    async fn find_all(&self) -> AppResult<Vec<AidRequest>> {
        Ok(self.0.lock().unwrap().clone())
    }

    async fn find_by_status(&self, status: RequestStatus) -> AppResult<Vec<AidRequest>> {
        let requests = self.0.lock().unwrap();
        let matching: Vec<AidRequest> =
            requests.iter().filter(|r| r.status == status).cloned().collect();
        Ok(newest_first(&matching, |r| r.created_at))
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Vec<AidRequest>> {
        let requests = self.0.lock().unwrap();
        let matching: Vec<AidRequest> =
            requests.iter().filter(|r| r.email.as_deref() == Some(email)).cloned().collect();
        Ok(newest_first(&matching, |r| r.created_at))
    }

    async fn insert(&self, mut request: AidRequest) -> AppResult<ObjectId> {
        let id = ObjectId::new();
        request.id = Some(id);
        self.0.lock().unwrap().push(request);
        Ok(id)
    }

    async fn update_status(&self, id: ObjectId, status: RequestStatus) -> AppResult<WriteOutcome> {
        let mut requests = self.0.lock().unwrap();
        match requests.iter_mut().find(|r| r.id == Some(id)) {
            Some(request) => {
                let modified = request.status != status;
                request.status = status;
                Ok(outcome(true, modified))
            }
            None => Ok(outcome(false, false)),
        }
    }

    async fn delete(&self, id: ObjectId) -> AppResult<bool> {
        let mut requests = self.0.lock().unwrap();
        let before = requests.len();
        requests.retain(|r| r.id != Some(id));
        Ok(requests.len() < before)
    }
}

#[derive(Default)]
pub struct MemoryVolunteers(Mutex<Vec<VolunteerApplication>>);

#[async_trait]
impl VolunteerRepository for MemoryVolunteers {
    async fn find_by_email(&self, email: &str) -> AppResult<Option<VolunteerApplication>> {
        let applications = self.0.lock().unwrap();
        Ok(applications.iter().find(|a| a.email == email).cloned())
    }

    async fn find_by_status(
        &self,
        status: VolunteerStatus,
    ) -> AppResult<Vec<VolunteerApplication>> {
        let applications = self.0.lock().unwrap();
        let matching: Vec<VolunteerApplication> = applications
            .iter()
            .filter(|a| a.status == status)
            .cloned()
            .collect();
        Ok(newest_first(&matching, |a| a.created_at))
    }

    async fn insert(&self, mut application: VolunteerApplication) -> AppResult<ObjectId> {
        let mut applications = self.0.lock().unwrap();
        if applications.iter().any(|a| a.email == application.email) {
            return Err(AppError::conflict("Volunteer application"));
        }
        let id = ObjectId::new();
        application.id = Some(id);
        applications.push(application);
        Ok(id)
    }

    async fn update_status(
        &self,
        id: ObjectId,
        status: VolunteerStatus,
    ) -> AppResult<WriteOutcome> {
        let mut applications = self.0.lock().unwrap();
        match applications.iter_mut().find(|a| a.id == Some(id)) {
            Some(application) => {
                let modified = application.status != status;
                application.status = status;
                Ok(outcome(true, modified))
            }
            None => Ok(outcome(false, false)),
        }
    }

    async fn delete(&self, id: ObjectId) -> AppResult<bool> {
        let mut applications = self.0.lock().unwrap();
        let before = applications.len();
        applications.retain(|a| a.id != Some(id));
        Ok(applications.len() < before)
    }
}

#[derive(Default)]
pub struct MemoryCampaigns(Mutex<Vec<Campaign>>);

#[async_trait]
impl CampaignRepository for MemoryCampaigns {
    async fn find(&self, status: Option<CampaignStatus>) -> AppResult<Vec<Campaign>> {
        let campaigns = self.0.lock().unwrap();
        let matching: Vec<Campaign> = campaigns
            .iter()
            .filter(|c| status.is_none() || c.status == status)
            .cloned()
            .collect();
        Ok(newest_first(&matching, |c| c.created_at))
    }

    async fn insert(&self, mut campaign: Campaign) -> AppResult<ObjectId> {
        let id = ObjectId::new();
        campaign.id = Some(id);
        self.0.lock().unwrap().push(campaign);
        Ok(id)
    }

    async fn update_status(
        &self,
        id: ObjectId,
        status: CampaignStatus,
        updated_at: DateTime,
    ) -> AppResult<WriteOutcome> {
        let mut campaigns = self.0.lock().unwrap();
        match campaigns.iter_mut().find(|c| c.id == Some(id)) {
            Some(campaign) => {
                campaign.status = Some(status);
                campaign.updated_at = Some(updated_at);
                Ok(outcome(true, true))
            }
            None => Ok(outcome(false, false)),
        }
    }
}

/// Unit of Work over in-memory collections
pub struct MemoryStore {
    pub users: Arc<MemoryUsers>,
    pub requests: Arc<MemoryRequests>,
    pub volunteers: Arc<MemoryVolunteers>,
    pub campaigns: Arc<MemoryCampaigns>,
    pub reachable: bool,
}

impl MemoryStore {
    pub fn new(reachable: bool) -> Self {
        Self {
            users: Arc::default(),
            requests: Arc::default(),
            volunteers: Arc::default(),
            campaigns: Arc::default(),
            reachable,
        }
    }
}

#[async_trait]
impl UnitOfWork for MemoryStore {
    fn users(&self) -> Arc<dyn UserRepository> {
        self.users.clone()
    }

    fn requests(&self) -> Arc<dyn AidRequestRepository> {
        self.requests.clone()
    }

    fn volunteers(&self) -> Arc<dyn VolunteerRepository> {
        self.volunteers.clone()
    }

    fn campaigns(&self) -> Arc<dyn CampaignRepository> {
        self.campaigns.clone()
    }

    async fn ping(&self) -> AppResult<()> {
        if self.reachable {
            Ok(())
        } else {
            Err(AppError::internal("database unreachable"))
        }
    }
}

/// Router and store for one test
pub struct TestApp {
    pub router: Router,
    pub store: Arc<MemoryStore>,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_store(MemoryStore::new(true))
    }

    pub fn with_store(store: MemoryStore) -> Self {
        let store = Arc::new(store);
        let identity = Arc::new(SharedSecretVerifier::new(SECRET, 1));
        let router = create_router(AppState::new(store.clone(), identity));
        Self { router, store }
    }

    /// Bearer token for the given email
    pub fn token_for(&self, email: &str) -> String {
        SharedSecretVerifier::new(SECRET, 1)
            .issue("uid-test", email)
            .unwrap()
    }

    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes)
                .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
        };
        (status, body)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.send(Request::get(uri).body(Body::empty()).unwrap()).await
    }

    pub async fn get_with_token(&self, uri: &str, token: &str) -> (StatusCode, Value) {
        self.send(
            Request::get(uri)
                .header(header::AUTHORIZATION, format!("Bearer {}", token))
                .body(Body::empty())
                .unwrap(),
        )
        .await
    }

    pub async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.send(json_request("POST", uri, body)).await
    }

    pub async fn patch(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.send(json_request("PATCH", uri, body)).await
    }

    pub async fn delete(&self, uri: &str) -> (StatusCode, Value) {
        self.send(Request::delete(uri).body(Body::empty()).unwrap())
            .await
    }
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Id returned by an insert response
pub fn inserted_id(body: &Value) -> String {
    body["insertedId"].as_str().unwrap().to_string()
}
