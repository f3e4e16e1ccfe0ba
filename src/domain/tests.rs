//! Property tests shared by all aggregates: transitions keep invariants,
//! never move creation time, never move update time backwards, and a
//! snapshot reconstructs into an identical value.

use super::*;
use jiff::{SignedDuration, Timestamp};
use proptest::option;
use proptest::prelude::*;
use uuid::Uuid;

fn instant() -> impl Strategy<Value = Timestamp> {
    (1_000_000i64..2_000_000_000i64).prop_map(|secs| Timestamp::from_second(secs).unwrap())
}

fn later() -> impl Strategy<Value = SignedDuration> {
    (0i64..1_000_000i64).prop_map(SignedDuration::from_secs)
}

fn optional_text() -> impl Strategy<Value = Option<String>> {
    option::of("[a-zA-Z ]{0,24}")
}

prop_compose! {
    fn company_attrs()(
        title in "[A-Za-z][A-Za-z ]{0,63}",
        description in "[a-z ]{0,64}",
        inn in "[0-9]{10}",
        login in "[a-z][a-z0-9]{3,31}",
        password_hash in "[A-Za-z0-9$]{10,64}",
    ) -> CreateCompanyAttrs {
        CreateCompanyAttrs {
            title,
            description,
            inn,
            login,
            password_hash,
            representative_id: Uuid::new_v4(),
            ..Default::default()
        }
    }
}

prop_compose! {
    fn vacancy_attrs()(
        title in "[A-Za-z][A-Za-z ]{0,63}",
        description in "[a-z]{1,64}",
        bounds in (option::of(0i32..100_000), option::of(0i32..100_000)),
        location in "[a-z]{0,12}",
    ) -> CreateVacancyAttrs {
        let (salary_from, salary_to) = match bounds {
            (Some(a), Some(b)) => (Some(a.min(b)), Some(a.max(b))),
            other => other,
        };
        CreateVacancyAttrs {
            company_id: Uuid::new_v4(),
            title,
            description,
            salary_from,
            salary_to,
            location,
            ..Default::default()
        }
    }
}

prop_compose! {
    fn response_attrs()(
        full_name in "[A-Za-z][A-Za-z ]{0,63}",
        email in "[a-z]{1,16}@[a-z]{1,8}",
        phone in "[0-9+]{0,16}",
    ) -> CreateResponseAttrs {
        CreateResponseAttrs {
            vacancy_id: Uuid::new_v4(),
            full_name,
            email,
            phone,
            ..Default::default()
        }
    }
}

fn response_status() -> impl Strategy<Value = &'static str> {
    prop_oneof![Just("new"), Just("viewed"), Just("rejected"), Just("accepted")]
}

proptest! {
    #[test]
    fn company_round_trip(attrs in company_attrs(), at in instant()) {
        let company = Company::create(attrs, at).unwrap();
        let rebuilt = Company::reconstruct(company.snapshot()).unwrap();
        prop_assert_eq!(rebuilt.snapshot(), company.snapshot());
    }

    #[test]
    fn company_transitions_keep_invariants(
        attrs in company_attrs(),
        at in instant(),
        step in later(),
        title in optional_text(),
        contacts in optional_text(),
    ) {
        let company = Company::create(attrs, at).unwrap();
        let next_at = at + step;
        let update = CompanyProfileUpdate { title, contacts, ..Default::default() };

        let results = [
            company.approve(next_at),
            company.update_profile(&update, next_at),
            company.change_credentials(None, None, next_at),
        ];
        for result in results {
            // A rejected transition is fine; an accepted one must be valid.
            if let Ok(next) = result {
                prop_assert!(Company::reconstruct(next.snapshot()).is_ok());
                prop_assert_eq!(next.created_at(), company.created_at());
                prop_assert!(next.updated_at() >= company.updated_at());
            }
        }
    }

    #[test]
    fn company_empty_update_only_touches_updated_at(
        attrs in company_attrs(),
        at in instant(),
        step in later(),
    ) {
        let company = Company::create(attrs, at).unwrap();
        let next = company
            .update_profile(&CompanyProfileUpdate::default(), at + step)
            .unwrap();

        let mut expected = company.snapshot();
        expected.updated_at = at + step;
        prop_assert_eq!(next.snapshot(), expected);
    }

    #[test]
    fn vacancy_round_trip_and_transitions(
        attrs in vacancy_attrs(),
        at in instant(),
        step in later(),
        location in optional_text(),
    ) {
        let vacancy = Vacancy::create(attrs, at).unwrap();
        prop_assert_eq!(Vacancy::reconstruct(vacancy.snapshot()).unwrap(), vacancy.clone());

        let next_at = at + step;
        let patch = VacancyPatch { location, ..Default::default() };
        for next in [
            vacancy.update(&patch, next_at).unwrap(),
            vacancy.activate(next_at).unwrap(),
            vacancy.deactivate(next_at).unwrap(),
        ] {
            prop_assert_eq!(next.created_at(), vacancy.created_at());
            prop_assert_eq!(next.updated_at(), next_at);
        }

        let untouched = vacancy.update(&VacancyPatch::default(), next_at).unwrap();
        let mut expected = vacancy.snapshot();
        expected.updated_at = next_at;
        prop_assert_eq!(untouched.snapshot(), expected);
    }

    #[test]
    fn response_round_trip_and_status(
        attrs in response_attrs(),
        at in instant(),
        step in later(),
        status in response_status(),
    ) {
        let response = Response::create(attrs, at).unwrap();
        prop_assert_eq!(Response::reconstruct(response.snapshot()).unwrap(), response.clone());

        let next = response.set_status(status, at + step).unwrap();
        prop_assert_eq!(next.status().as_str(), status);
        prop_assert_eq!(next.created_at(), response.created_at());
        prop_assert!(next.updated_at() >= response.updated_at());

        let untouched = response.update_contacts(None, None, None, at + step).unwrap();
        let mut expected = response.snapshot();
        expected.updated_at = at + step;
        prop_assert_eq!(untouched.snapshot(), expected);
    }

    #[test]
    fn response_rejects_unlisted_status(
        attrs in response_attrs(),
        at in instant(),
        status in "[a-z]{1,12}",
    ) {
        prop_assume!(!["new", "viewed", "rejected", "accepted"].contains(&status.as_str()));
        let response = Response::create(attrs, at).unwrap();
        let err = response.set_status(&status, at).unwrap_err();
        prop_assert_eq!(err.invariant_reason(), Some("invalid status"));
    }

    #[test]
    fn university_round_trip(
        title in "[A-Za-z][A-Za-z ]{0,63}",
        login in "[a-z]{4,32}",
        inn in "[0-9]{0,16}",
        at in instant(),
        step in later(),
    ) {
        let attrs = CreateUniversityAttrs {
            title,
            login,
            password_hash: "hashed:long-enough".to_string(),
            inn,
            contacts: String::new(),
        };
        let university = University::create(attrs, at).unwrap();
        prop_assert_eq!(University::reconstruct(university.snapshot()).unwrap(), university.clone());

        let confirmed = university.confirm(at + step).unwrap();
        prop_assert_eq!(confirmed.created_at(), university.created_at());
        prop_assert!(confirmed.is_confirmed());
    }
}
