//! Moderation commands, executed as the built-in admin actor.
//!
//! Every method returns the text to print so the executor owns stdout.

use crate::cli::parser::{
    CompanyCommand, PageArgs, ResponseCommand, UniversityCommand, VacancyCommand,
};
use crate::domain::{Actor, Company, Response, ResponseFilter, University, Vacancy, VacancyFilter};
use crate::error::{AppError, AppResult};
use crate::services::Services;

pub struct AdminCommandHandler {
    services: Services,
    actor: Actor,
}

impl AdminCommandHandler {
    pub fn new(services: Services) -> Self {
        Self {
            services,
            actor: Actor::admin(),
        }
    }

    pub async fn company(&self, command: &CompanyCommand) -> AppResult<String> {
        match command {
            CompanyCommand::Approve { id } => {
                let company = self.services.companies.approve(&self.actor, *id).await?;
                Ok(format!("Company {} ({}) approved", company.id(), company.title()))
            }
            CompanyCommand::Show { id } => {
                let company = self.services.companies.get(*id).await?;
                to_json(&company.snapshot())
            }
            CompanyCommand::List { state, page } => {
                let companies = self
                    .services
                    .companies
                    .list(state.as_filter(), page.limit, page.offset)
                    .await?;
                Ok(render(&companies, company_line))
            }
        }
    }

    pub async fn university(&self, command: &UniversityCommand) -> AppResult<String> {
        match command {
            UniversityCommand::Confirm { id } => {
                let university = self.services.universities.confirm(&self.actor, *id).await?;
                Ok(format!(
                    "University {} ({}) confirmed",
                    university.id(),
                    university.title()
                ))
            }
            UniversityCommand::List { page } => {
                let universities = self
                    .services
                    .universities
                    .list(page.limit, page.offset)
                    .await?;
                Ok(render(&universities, university_line))
            }
        }
    }

    pub async fn vacancy(&self, command: &VacancyCommand) -> AppResult<String> {
        let vacancies = match command {
            VacancyCommand::List {
                company: Some(company_id),
                page,
            } => {
                self.services
                    .vacancies
                    .list_by_company(*company_id, page.limit, page.offset)
                    .await?
            }
            VacancyCommand::List {
                company: None,
                page,
            } => {
                self.services
                    .vacancies
                    .list_all(page.limit, page.offset)
                    .await?
            }
            VacancyCommand::Search {
                company,
                location,
                employment,
                schedule,
                experience,
                education,
                active,
                page,
            } => {
                let filter = VacancyFilter {
                    company_id: *company,
                    location: location.clone(),
                    employment: employment.clone(),
                    schedule: schedule.clone(),
                    experience: experience.clone(),
                    education: education.clone(),
                    is_active: *active,
                    limit: page.limit,
                    offset: page.offset,
                };
                self.services.vacancies.search(filter).await?
            }
            VacancyCommand::Activate { id } => {
                let vacancy = self.services.vacancies.activate(*id).await?;
                return Ok(format!("Vacancy {} activated", vacancy.id()));
            }
            VacancyCommand::Deactivate { id } => {
                let vacancy = self.services.vacancies.deactivate(*id).await?;
                return Ok(format!("Vacancy {} deactivated", vacancy.id()));
            }
        };
        Ok(render(&vacancies, vacancy_line))
    }

    pub async fn response(&self, command: &ResponseCommand) -> AppResult<String> {
        match command {
            ResponseCommand::Status { id, status } => {
                let response = self
                    .services
                    .responses
                    .set_status(*id, status.as_str())
                    .await?;
                Ok(format!("Response {} is now {}", response.id(), response.status()))
            }
            ResponseCommand::List {
                vacancy,
                status,
                page: PageArgs { limit, offset },
            } => {
                let filter = ResponseFilter {
                    vacancy_id: *vacancy,
                    status: status.map(|s| s.as_str().to_string()),
                    limit: *limit,
                    offset: *offset,
                };
                let responses = self.services.responses.search(filter).await?;
                Ok(render(&responses, response_line))
            }
        }
    }
}

fn to_json<T: serde::Serialize>(value: &T) -> AppResult<String> {
    serde_json::to_string_pretty(value).map_err(|e| AppError::Internal {
        source: anyhow::Error::from(e),
    })
}

fn render<T>(items: &[T], line: fn(&T) -> String) -> String {
    if items.is_empty() {
        return "No records found".to_string();
    }
    items.iter().map(line).collect::<Vec<_>>().join("\n")
}

fn company_line(company: &Company) -> String {
    let state = if company.is_approved() { "approved" } else { "pending" };
    format!("{}  {:<8}  {}  {}", company.id(), state, company.inn(), company.title())
}

fn university_line(university: &University) -> String {
    let state = if university.is_confirmed() { "confirmed" } else { "unconfirmed" };
    format!("{}  {:<11}  {}", university.id(), state, university.title())
}

fn vacancy_line(vacancy: &Vacancy) -> String {
    let state = if vacancy.is_active() { "active" } else { "closed" };
    format!(
        "{}  {:<6}  company={}  {}",
        vacancy.id(),
        state,
        vacancy.company_id(),
        vacancy.title()
    )
}

fn response_line(response: &Response) -> String {
    let snapshot = response.snapshot();
    format!(
        "{}  {:<8}  vacancy={}  {} <{}>",
        snapshot.id, snapshot.status, snapshot.vacancy_id, snapshot.full_name, snapshot.email
    )
}
