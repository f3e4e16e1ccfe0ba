pub(crate) mod fakes;

use crate::domain::{Actor, Company, Role};
use crate::services::RegisterCompanyInput;
use fakes::Harness;
use uuid::Uuid;

pub(crate) fn register_input(login: &str, inn: &str) -> RegisterCompanyInput {
    RegisterCompanyInput {
        title: "Acme".to_string(),
        description: "Rockets and more".to_string(),
        contacts: "hr@acme.test".to_string(),
        inn: inn.to_string(),
        address: "Main st. 1".to_string(),
        representative_id: Uuid::new_v4(),
        login: login.to_string(),
        password: "correct-horse".to_string(),
        ..Default::default()
    }
}

pub(crate) async fn approved_company(h: &Harness, login: &str, inn: &str) -> Company {
    let company = h.services.companies.register(register_input(login, inn)).await.unwrap();
    h.services
        .companies
        .approve(&Actor::admin(), company.id())
        .await
        .unwrap()
}

fn company_actor(company: &Company) -> Actor {
    Actor::new(company.id(), Role::Company)
}
