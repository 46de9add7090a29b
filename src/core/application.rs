use crate::core::config::Config;
use crate::domain::schedule::ScheduleService;
use std::sync::Arc;

pub trait ApplicationServices: Clone + Send + Sync {
    type SCHEDULE: ScheduleService + Send;

    fn config(&self) -> Config;

    fn schedule_service(&self) -> Arc<Self::SCHEDULE>;
}

pub struct Application<SCHEDULE>
where
    SCHEDULE: ScheduleService + Send + Sync + 'static,
{
    config: Config,
    schedule_service: Arc<SCHEDULE>,
}

impl<SCHEDULE> Application<SCHEDULE>
where
    SCHEDULE: ScheduleService + Send + Sync + 'static,
{
    pub fn new(config: Config, schedule_service: SCHEDULE) -> Self {
        Self {
            config,
            schedule_service: Arc::new(schedule_service),
        }
    }
}

impl<SCHEDULE> Clone for Application<SCHEDULE>
where
    SCHEDULE: ScheduleService + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            config: self.config.clone(),
            schedule_service: self.schedule_service.clone(),
        }
    }
}

impl<SCHEDULE> ApplicationServices for Application<SCHEDULE>
where
    SCHEDULE: ScheduleService + Send + Sync + 'static,
{
    type SCHEDULE = SCHEDULE;

    fn config(&self) -> Config {
        self.config.clone()
    }

    fn schedule_service(&self) -> Arc<Self::SCHEDULE> {
        self.schedule_service.clone()
    }
}

#[cfg(test)]
pub mod tests {
    use crate::core::application::Application;
    use crate::core::config::Config;
    use crate::domain::schedule::{MockScheduleService, ScheduleService};

    pub struct MockAppInstanceParameters<SCHEDULE>
    where
        SCHEDULE: ScheduleService + Send + Sync + 'static,
    {
        pub config: Option<Config>,
        pub schedule_service: Option<SCHEDULE>,
    }

    impl<SCHEDULE> Application<SCHEDULE>
    where
        SCHEDULE: ScheduleService + Send + Sync + 'static,
    {
        pub fn mock_instance(
            params: MockAppInstanceParameters<MockScheduleService>,
        ) -> Application<MockScheduleService> {
            let app_config = params.config.unwrap_or_default();
            let schedule_service = params
                .schedule_service
                .unwrap_or(MockScheduleService::new());

            Application::new(app_config, schedule_service)
        }
    }
}
