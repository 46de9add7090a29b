mod assign;
mod bulk;
mod compliance;
mod list;
mod remove;

pub use assign::assign_dates;
pub use bulk::bulk_dates;
pub use compliance::query_compliance;
pub use list::list_assignments;
pub use remove::remove_dates;

#[cfg(test)]
mod testing {
    use crate::core::application::Application;
    use crate::core::application::tests::MockAppInstanceParameters;
    use crate::core::config::Config;
    use crate::domain::schedule::{DateAssignment, DateWindow, Level, MockScheduleService};
    use crate::inbound::http::middleware::{COMPANY_HEADER, ROLE_HEADER, USER_HEADER};
    use crate::inbound::http::router;
    use axum_test::{TestRequest, TestServer};
    use http::{HeaderName, HeaderValue};
    use time::macros::{date, datetime};
    use uuid::Uuid;

    pub const COMPANY: Uuid = Uuid::from_u128(0xc1);
    pub const ITEM: Uuid = Uuid::from_u128(0x20);

    pub fn server(schedule_service: MockScheduleService) -> TestServer {
        server_with_config(schedule_service, Config::default())
    }

    pub fn server_with_config(schedule_service: MockScheduleService, config: Config) -> TestServer {
        let app = Application::<MockScheduleService>::mock_instance(MockAppInstanceParameters {
            config: Some(config),
            schedule_service: Some(schedule_service),
        });

        TestServer::new(router(app)).unwrap()
    }

    pub fn as_role(request: TestRequest, role: &'static str) -> TestRequest {
        request
            .add_header(
                HeaderName::from_static(USER_HEADER),
                HeaderValue::from_static("user-1"),
            )
            .add_header(
                HeaderName::from_static(ROLE_HEADER),
                HeaderValue::from_static(role),
            )
    }

    pub fn as_company(request: TestRequest, company_id: Uuid) -> TestRequest {
        as_role(request, "company").add_header(
            HeaderName::from_static(COMPANY_HEADER),
            HeaderValue::from_str(company_id.to_string().as_str()).unwrap(),
        )
    }

    pub fn assignment(window: DateWindow) -> DateAssignment {
        DateAssignment {
            id: Uuid::from_u128(0xa),
            level: Level::SubProject,
            item_id: ITEM,
            company_id: COMPANY,
            window,
            is_flexible: false,
            created_by: "user-1".to_string(),
            updated_by: "user-1".to_string(),
            created_at: datetime!(2025 - 01 - 01 0:00),
            updated_at: datetime!(2025 - 01 - 01 0:00),
        }
    }

    pub fn window() -> DateWindow {
        DateWindow::new(date!(2025 - 03 - 01), date!(2025 - 04 - 01))
    }
}
