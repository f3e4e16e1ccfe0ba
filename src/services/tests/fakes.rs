//! In-memory collaborators for service tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use jiff::Timestamp;
use uuid::Uuid;

use crate::domain::{
    Actor, Company, FixedClock, Response, ResponseFilter, Role, University, Vacancy, VacancyFilter,
};
use crate::error::{AppError, AppResult};
use crate::repositories::{
    CompanyRepository, Repositories, ResponseRepository, UniversityRepository, VacancyRepository,
};
use crate::services::Services;
use crate::utils::{PasswordService, TokenService};

fn page<T: Clone>(mut rows: Vec<T>, limit: i64, offset: i64) -> Vec<T> {
    let offset = offset.max(0) as usize;
    let limit = limit.max(0) as usize;
    if offset >= rows.len() {
        return Vec::new();
    }
    rows.drain(offset..).take(limit).collect()
}

/// Rows keyed by id plus a counter of successful writes.
///
/// With `stale_lookups` set, natural-key lookups miss while `save` still
/// enforces uniqueness, like a concurrent insert landing between the two.
pub struct Table<T> {
    rows: Mutex<HashMap<Uuid, T>>,
    writes: AtomicUsize,
    stale_lookups: AtomicBool,
}

impl<T: Clone> Table<T> {
    fn new() -> Self {
        Self {
            rows: Mutex::new(HashMap::new()),
            writes: AtomicUsize::new(0),
            stale_lookups: AtomicBool::new(false),
        }
    }

    pub fn set_stale_lookups(&self, stale: bool) {
        self.stale_lookups.store(stale, Ordering::SeqCst);
    }

    fn lookup(&self) -> Vec<T> {
        if self.stale_lookups.load(Ordering::SeqCst) {
            return Vec::new();
        }
        self.all()
    }

    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    pub fn len(&self) -> usize {
        self.rows.lock().unwrap().len()
    }

    fn get(&self, id: Uuid) -> Option<T> {
        self.rows.lock().unwrap().get(&id).cloned()
    }

    fn all(&self) -> Vec<T> {
        self.rows.lock().unwrap().values().cloned().collect()
    }

    fn put(&self, id: Uuid, row: T) {
        self.rows.lock().unwrap().insert(id, row);
        self.writes.fetch_add(1, Ordering::SeqCst);
    }

    fn remove(&self, id: Uuid) -> bool {
        let removed = self.rows.lock().unwrap().remove(&id).is_some();
        if removed {
            self.writes.fetch_add(1, Ordering::SeqCst);
        }
        removed
    }
}

pub struct FakeCompanies(pub Table<Company>);

#[async_trait]
impl CompanyRepository for FakeCompanies {
    async fn save(&self, company: &Company) -> AppResult<()> {
        // Same unique keys as the database.
        for other in self.0.all().iter().filter(|c| c.id() != company.id()) {
            if other.inn() == company.inn() {
                return Err(AppError::conflict("company", "inn", company.inn()));
            }
            if other.login() == company.login() {
                return Err(AppError::conflict("company", "login", company.login()));
            }
        }
        self.0.put(company.id(), company.clone());
        Ok(())
    }

    async fn find_by_id(&self, company_id: Uuid) -> AppResult<Option<Company>> {
        Ok(self.0.get(company_id))
    }

    async fn find_by_login(&self, login: &str) -> AppResult<Option<Company>> {
        Ok(self.0.lookup().into_iter().find(|c| c.login() == login))
    }

    async fn find_by_inn(&self, inn: &str) -> AppResult<Option<Company>> {
        Ok(self.0.lookup().into_iter().find(|c| c.inn() == inn))
    }

    async fn list(&self, approved: Option<bool>, limit: i64, offset: i64) -> AppResult<Vec<Company>> {
        let mut rows: Vec<Company> = self
            .0
            .all()
            .into_iter()
            .filter(|c| approved.is_none_or(|a| c.is_approved() == a))
            .collect();
        rows.sort_by_key(|c| std::cmp::Reverse(c.created_at()));
        Ok(page(rows, limit, offset))
    }

    async fn list_by_representative(&self, representative: Uuid) -> AppResult<Vec<Company>> {
        Ok(self
            .0
            .all()
            .into_iter()
            .filter(|c| c.representative_id() == representative)
            .collect())
    }

    async fn delete(&self, company_id: Uuid) -> AppResult<bool> {
        Ok(self.0.remove(company_id))
    }
}

pub struct FakeUniversities(pub Table<University>);

#[async_trait]
impl UniversityRepository for FakeUniversities {
    async fn save(&self, university: &University) -> AppResult<()> {
        let taken = self
            .0
            .all()
            .iter()
            .any(|u| u.id() != university.id() && u.login() == university.login());
        if taken {
            return Err(AppError::conflict("university", "login", university.login()));
        }
        self.0.put(university.id(), university.clone());
        Ok(())
    }

    async fn find_by_id(&self, university_id: Uuid) -> AppResult<Option<University>> {
        Ok(self.0.get(university_id))
    }

    async fn find_by_login(&self, login: &str) -> AppResult<Option<University>> {
        Ok(self.0.lookup().into_iter().find(|u| u.login() == login))
    }

    async fn list(&self, limit: i64, offset: i64) -> AppResult<Vec<University>> {
        Ok(page(self.0.all(), limit, offset))
    }
}

pub struct FakeVacancies(pub Table<Vacancy>);

#[async_trait]
impl VacancyRepository for FakeVacancies {
    async fn save(&self, vacancy: &Vacancy) -> AppResult<()> {
        self.0.put(vacancy.id(), vacancy.clone());
        Ok(())
    }

    async fn find_by_id(&self, vacancy_id: Uuid) -> AppResult<Option<Vacancy>> {
        Ok(self.0.get(vacancy_id))
    }

    async fn list_by_company(&self, company: Uuid, limit: i64, offset: i64) -> AppResult<Vec<Vacancy>> {
        self.search(&VacancyFilter {
            company_id: Some(company),
            limit,
            offset,
            ..Default::default()
        })
        .await
    }

    async fn list_all(&self, limit: i64, offset: i64) -> AppResult<Vec<Vacancy>> {
        Ok(page(self.0.all(), limit, offset))
    }

    async fn search(&self, filter: &VacancyFilter) -> AppResult<Vec<Vacancy>> {
        let rows = self
            .0
            .all()
            .into_iter()
            .filter(|v| filter.matches(&v.snapshot()))
            .collect();
        Ok(page(rows, filter.limit, filter.offset))
    }

    async fn delete(&self, vacancy_id: Uuid) -> AppResult<bool> {
        Ok(self.0.remove(vacancy_id))
    }
}

pub struct FakeResponses(pub Table<Response>);

#[async_trait]
impl ResponseRepository for FakeResponses {
    async fn save(&self, response: &Response) -> AppResult<()> {
        self.0.put(response.id(), response.clone());
        Ok(())
    }

    async fn find_by_id(&self, response_id: Uuid) -> AppResult<Option<Response>> {
        Ok(self.0.get(response_id))
    }

    async fn list_by_vacancy(&self, vacancy: Uuid, limit: i64, offset: i64) -> AppResult<Vec<Response>> {
        let rows = self
            .0
            .all()
            .into_iter()
            .filter(|r| r.vacancy_id() == vacancy)
            .collect();
        Ok(page(rows, limit, offset))
    }

    async fn search(&self, filter: &ResponseFilter) -> AppResult<Vec<Response>> {
        let rows = self
            .0
            .all()
            .into_iter()
            .filter(|r| filter.vacancy_id.is_none_or(|v| v == r.vacancy_id()))
            .filter(|r| filter.status.as_deref().is_none_or(|s| s == r.status().as_str()))
            .collect();
        Ok(page(rows, filter.limit, filter.offset))
    }

    async fn delete(&self, response_id: Uuid) -> AppResult<bool> {
        Ok(self.0.remove(response_id))
    }
}

/// Reversible "hash" so tests can reason about stored credentials.
pub struct PlainPasswords;

impl PasswordService for PlainPasswords {
    fn hash(&self, password: &str) -> AppResult<String> {
        Ok(format!("hashed:{password}"))
    }

    fn check(&self, password: &str, password_hash: &str) -> AppResult<bool> {
        Ok(password_hash == format!("hashed:{password}"))
    }
}

/// Tokens of the form `role:subject`.
pub struct PlainTokens;

impl TokenService for PlainTokens {
    fn generate(&self, subject: Uuid, role: Role, _issued_at: Timestamp) -> AppResult<String> {
        Ok(format!("{role}:{subject}"))
    }

    fn validate(&self, token: &str) -> AppResult<Actor> {
        let (role, subject) = token
            .split_once(':')
            .ok_or_else(|| AppError::unauthorized("malformed token"))?;
        let role = role.parse().map_err(|_| AppError::unauthorized("bad role"))?;
        let id = Uuid::parse_str(subject).map_err(|_| AppError::unauthorized("bad subject"))?;
        Ok(Actor::new(id, role))
    }
}

pub fn start() -> Timestamp {
    "2024-04-01T09:00:00Z".parse::<Timestamp>().unwrap()
}

/// Services wired to fakes, with handles on every fake.
pub struct Harness {
    pub services: Services,
    pub companies: Arc<FakeCompanies>,
    pub universities: Arc<FakeUniversities>,
    pub vacancies: Arc<FakeVacancies>,
    pub responses: Arc<FakeResponses>,
    pub clock: Arc<FixedClock>,
}

impl Harness {
    pub fn new() -> Self {
        let companies = Arc::new(FakeCompanies(Table::new()));
        let universities = Arc::new(FakeUniversities(Table::new()));
        let vacancies = Arc::new(FakeVacancies(Table::new()));
        let responses = Arc::new(FakeResponses(Table::new()));
        let clock = Arc::new(FixedClock::new(start()));

        let repos = Repositories::new(
            companies.clone(),
            universities.clone(),
            vacancies.clone(),
            responses.clone(),
        );
        let services = Services::new(repos, Arc::new(PlainPasswords), Arc::new(PlainTokens), clock.clone());

        Self {
            services,
            companies,
            universities,
            vacancies,
            responses,
            clock,
        }
    }
}
