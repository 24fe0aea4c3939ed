//! In-memory stores and helpers for API tests.

use async_trait::async_trait;
use axum::Router;
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{EncodingKey, Header};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::Mutex;
use uuid::Uuid;
use vociform_core::{
    Form, FormResponse, NewForm, NewResponse, NewUsageEvent, UsageAccount, UsageEvent,
};
use vociform_error::{
    DatabaseError, DatabaseErrorKind, TranscribeError, TranscribeErrorKind, VociformResult,
};
use vociform_interface::{
    AccountDefaults, AudioPayload, FormStore, FormSummary, FormUpdate, ResponseStore,
    Transcriber, Transcription, UsageStore,
};
use vociform_quota::{QuotaGate, RateLimiter, VociformConfig};
use vociform_server::{create_router, AppState, AuthKeys};

pub const TEST_SECRET: &[u8] = b"test-signing-secret";

/// Mint an HS256 token for `user_id`, far-future expiry.
pub fn token_for(user_id: Uuid) -> String {
    #[derive(Serialize)]
    struct Claims {
        sub: String,
        exp: usize,
    }
    let claims = Claims {
        sub: user_id.to_string(),
        exp: 4_102_444_800, // 2100-01-01
    };
    jsonwebtoken::encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(TEST_SECRET),
    )
    .unwrap()
}

/// In-memory usage store.
#[derive(Default)]
pub struct MemoryUsageStore {
    accounts: Mutex<HashMap<Uuid, UsageAccount>>,
    events: Mutex<Vec<UsageEvent>>,
}

impl MemoryUsageStore {
    pub fn seed_account(&self, account: UsageAccount) {
        self.accounts
            .lock()
            .unwrap()
            .insert(account.user_id, account);
    }

    pub fn account(&self, user_id: Uuid) -> Option<UsageAccount> {
        self.accounts.lock().unwrap().get(&user_id).cloned()
    }

    pub fn push_event_at(&self, user_id: Uuid, created_at: DateTime<Utc>) {
        let mut events = self.events.lock().unwrap();
        let id = events.len() as i64 + 1;
        events.push(UsageEvent {
            id,
            user_id,
            endpoint: "transcribe".to_string(),
            cost_cents: 2,
            metadata: serde_json::Value::Null,
            created_at,
        });
    }

    pub fn event_count(&self, user_id: Uuid) -> usize {
        self.events
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.user_id == user_id)
            .count()
    }
}

#[async_trait]
impl UsageStore for MemoryUsageStore {
    async fn get_or_create_account(
        &self,
        user_id: Uuid,
        defaults: AccountDefaults,
    ) -> VociformResult<UsageAccount> {
        let mut accounts = self.accounts.lock().unwrap();
        let now = Utc::now();
        let account = accounts.entry(user_id).or_insert_with(|| UsageAccount {
            user_id,
            plan_tier: defaults.plan_tier,
            calls_used: 0,
            calls_limit: defaults.calls_limit,
            period_end: defaults.period_end,
            created_at: now,
            updated_at: now,
        });
        Ok(account.clone())
    }

    async fn reset_period(
        &self,
        user_id: Uuid,
        period_end: DateTime<Utc>,
    ) -> VociformResult<()> {
        let mut accounts = self.accounts.lock().unwrap();
        let account = accounts
            .get_mut(&user_id)
            .ok_or_else(|| DatabaseError::new(DatabaseErrorKind::NotFound))?;
        account.calls_used = 0;
        account.period_end = period_end;
        Ok(())
    }

    async fn increment_usage(&self, user_id: Uuid) -> VociformResult<()> {
        let mut accounts = self.accounts.lock().unwrap();
        let account = accounts
            .get_mut(&user_id)
            .ok_or_else(|| DatabaseError::new(DatabaseErrorKind::NotFound))?;
        account.calls_used += 1;
        Ok(())
    }

    async fn append_event(&self, event: NewUsageEvent) -> VociformResult<()> {
        let mut events = self.events.lock().unwrap();
        let id = events.len() as i64 + 1;
        events.push(UsageEvent {
            id,
            user_id: event.user_id,
            endpoint: event.endpoint,
            cost_cents: event.cost_cents,
            metadata: event.metadata,
            created_at: Utc::now(),
        });
        Ok(())
    }

    async fn recent_event_count(
        &self,
        user_id: Uuid,
        since: DateTime<Utc>,
    ) -> VociformResult<u64> {
        let events = self.events.lock().unwrap();
        Ok(events
            .iter()
            .filter(|e| e.user_id == user_id && e.created_at >= since)
            .count() as u64)
    }
}

/// In-memory form store.
#[derive(Default)]
pub struct MemoryFormStore {
    forms: Mutex<Vec<Form>>,
    response_counts: Mutex<HashMap<Uuid, i64>>,
}

impl MemoryFormStore {
    pub fn seed_form(&self, form: Form) {
        self.forms.lock().unwrap().push(form);
    }

    pub fn set_response_count(&self, form_id: Uuid, count: i64) {
        self.response_counts.lock().unwrap().insert(form_id, count);
    }

    pub fn form(&self, id: Uuid) -> Option<Form> {
        self.forms.lock().unwrap().iter().find(|f| f.id == id).cloned()
    }
}

#[async_trait]
impl FormStore for MemoryFormStore {
    async fn create_form(&self, owner: Uuid, form: NewForm) -> VociformResult<Form> {
        let now = Utc::now();
        let created = Form {
            id: Uuid::new_v4(),
            user_id: owner,
            title: form.title,
            description: form.description,
            fields: form.fields,
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        self.forms.lock().unwrap().push(created.clone());
        Ok(created)
    }

    async fn list_forms(&self, owner: Uuid) -> VociformResult<Vec<FormSummary>> {
        let counts = self.response_counts.lock().unwrap();
        let mut forms: Vec<Form> = self
            .forms
            .lock()
            .unwrap()
            .iter()
            .filter(|f| f.user_id == owner)
            .cloned()
            .collect();
        forms.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(forms
            .into_iter()
            .map(|form| {
                let response_count = counts.get(&form.id).copied().unwrap_or(0);
                FormSummary {
                    form,
                    response_count,
                }
            })
            .collect())
    }

    async fn get_form(&self, id: Uuid) -> VociformResult<Option<Form>> {
        Ok(self.form(id))
    }

    async fn get_active_form(&self, id: Uuid) -> VociformResult<Option<Form>> {
        Ok(self.form(id).filter(|f| f.is_active))
    }

    async fn update_form(
        &self,
        owner: Uuid,
        id: Uuid,
        update: FormUpdate,
    ) -> VociformResult<Form> {
        let mut forms = self.forms.lock().unwrap();
        let form = forms
            .iter_mut()
            .find(|f| f.id == id && f.user_id == owner)
            .ok_or_else(|| DatabaseError::new(DatabaseErrorKind::NotFound))?;
        if let Some(title) = update.title {
            form.title = title;
        }
        if let Some(description) = update.description {
            form.description = description;
        }
        if let Some(fields) = update.fields {
            form.fields = fields;
        }
        if let Some(is_active) = update.is_active {
            form.is_active = is_active;
        }
        form.updated_at = Utc::now();
        Ok(form.clone())
    }

    async fn delete_form(&self, owner: Uuid, id: Uuid) -> VociformResult<()> {
        let mut forms = self.forms.lock().unwrap();
        let before = forms.len();
        forms.retain(|f| !(f.id == id && f.user_id == owner));
        if forms.len() == before {
            return Err(DatabaseError::new(DatabaseErrorKind::NotFound).into());
        }
        Ok(())
    }
}

/// In-memory response store.
#[derive(Default)]
pub struct MemoryResponseStore {
    responses: Mutex<Vec<FormResponse>>,
}

impl MemoryResponseStore {
    pub fn seed_response(&self, response: FormResponse) {
        self.responses.lock().unwrap().push(response);
    }

    pub fn last(&self) -> Option<FormResponse> {
        self.responses.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl ResponseStore for MemoryResponseStore {
    async fn insert_response(&self, response: NewResponse) -> VociformResult<FormResponse> {
        let created = FormResponse {
            id: Uuid::new_v4(),
            form_id: response.form_id,
            response_data: response.response_data,
            ip_address: response.ip_address,
            user_agent: response.user_agent,
            created_at: Utc::now(),
        };
        self.responses.lock().unwrap().push(created.clone());
        Ok(created)
    }

    async fn list_responses(&self, form_id: Uuid) -> VociformResult<Vec<FormResponse>> {
        let mut responses: Vec<FormResponse> = self
            .responses
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.form_id == form_id)
            .cloned()
            .collect();
        responses.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(responses)
    }
}

/// Scripted transcriber.
pub struct ScriptedTranscriber {
    text: String,
    failure: Mutex<Option<TranscribeErrorKind>>,
}

impl ScriptedTranscriber {
    pub fn returning(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            failure: Mutex::new(None),
        }
    }

    pub fn fail_with(&self, kind: TranscribeErrorKind) {
        *self.failure.lock().unwrap() = Some(kind);
    }
}

#[async_trait]
impl Transcriber for ScriptedTranscriber {
    async fn transcribe(&self, audio: &AudioPayload) -> VociformResult<Transcription> {
        if let Some(kind) = self.failure.lock().unwrap().clone() {
            return Err(TranscribeError::new(kind).into());
        }
        vociform_transcribe::validate_audio(
            audio,
            self.max_audio_size_bytes(),
            self.supported_audio_formats(),
        )?;
        Ok(Transcription {
            text: self.text.clone(),
        })
    }

    fn provider_name(&self) -> &'static str {
        "scripted"
    }
}

/// Everything an API test needs: the router plus handles on the fakes.
pub struct TestApp {
    pub app: Router,
    pub usage: Arc<MemoryUsageStore>,
    pub forms: Arc<MemoryFormStore>,
    pub responses: Arc<MemoryResponseStore>,
    pub transcriber: Arc<ScriptedTranscriber>,
}

pub fn test_app() -> TestApp {
    let config = VociformConfig::load().unwrap();
    let usage = Arc::new(MemoryUsageStore::default());
    let forms = Arc::new(MemoryFormStore::default());
    let responses = Arc::new(MemoryResponseStore::default());
    let transcriber = Arc::new(ScriptedTranscriber::returning("hello world"));

    let state = AppState {
        forms: Arc::clone(&forms) as Arc<dyn FormStore>,
        responses: Arc::clone(&responses) as Arc<dyn ResponseStore>,
        transcriber: Arc::clone(&transcriber) as Arc<dyn Transcriber>,
        quota: QuotaGate::new(Arc::clone(&usage) as Arc<dyn UsageStore>, &config),
        limiter: RateLimiter::new(Arc::clone(&usage) as Arc<dyn UsageStore>, &config),
        auth: AuthKeys::new(TEST_SECRET),
        transcription: config.transcription.clone(),
    };

    TestApp {
        app: create_router(state),
        usage,
        forms,
        responses,
        transcriber,
    }
}

/// A free-tier account with the given usage, period ending in 10 days.
pub fn free_account(user_id: Uuid, calls_used: i32) -> UsageAccount {
    let now = Utc::now();
    UsageAccount {
        user_id,
        plan_tier: vociform_core::PlanTier::Free,
        calls_used,
        calls_limit: 50,
        period_end: now + Duration::days(10),
        created_at: now,
        updated_at: now,
    }
}

/// A simple active form owned by `owner`.
pub fn sample_form(owner: Uuid) -> Form {
    let now = Utc::now();
    Form {
        id: Uuid::new_v4(),
        user_id: owner,
        title: "Customer feedback".to_string(),
        description: "Tell us how we did".to_string(),
        fields: vec![vociform_core::FormField {
            id: "q1".to_string(),
            label: "Comments".to_string(),
            kind: vociform_core::FieldKind::Textarea,
            required: true,
            options: vec![],
        }],
        is_active: true,
        created_at: now,
        updated_at: now,
    }
}
