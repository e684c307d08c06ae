use crate::auth::application::orchestrator::account_registration::AccountRegistrationOrchestrator;
use crate::auth::application::use_cases::verify_account_email::IVerifyAccountEmailUseCase;
use crate::multimedia::application::ports::outgoing::FileStorage;
use crate::tests::support::stubs::*;
use crate::AppState;
use actix_web::web;
use std::sync::Arc;

pub struct TestAppStateBuilder {
    register_account: Option<Arc<AccountRegistrationOrchestrator>>,
    verify_account_email: Option<Arc<dyn IVerifyAccountEmailUseCase + Send + Sync>>,
    profile_picture_storage: Option<Arc<dyn FileStorage + Send + Sync>>,
}

pub fn default_test_account_registration_orchestrator() -> Arc<AccountRegistrationOrchestrator> {
    let create_account = Arc::new(StubCreateAccountUseCase);
    let email_notifier = Arc::new(StubUserEmailNotifier::default());

    Arc::new(AccountRegistrationOrchestrator::new(
        create_account,
        email_notifier,
    ))
}

impl Default for TestAppStateBuilder {
    fn default() -> Self {
        Self {
            register_account: Some(default_test_account_registration_orchestrator()),
            verify_account_email: Some(Arc::new(StubVerifyAccountEmailUseCase)),
            profile_picture_storage: Some(Arc::new(RecordingFileStorage::default())),
        }
    }
}

impl TestAppStateBuilder {
    pub fn with_register_account_orchestrator(
        mut self,
        orchestrator: Arc<AccountRegistrationOrchestrator>,
    ) -> Self {
        self.register_account = Some(orchestrator);
        self
    }

    pub fn with_verify_account_email(
        mut self,
        uc: impl IVerifyAccountEmailUseCase + Send + Sync + 'static,
    ) -> Self {
        self.verify_account_email = Some(Arc::new(uc));
        self
    }

    pub fn with_profile_picture_storage(
        mut self,
        storage: impl FileStorage + Send + Sync + 'static,
    ) -> Self {
        self.profile_picture_storage = Some(Arc::new(storage));
        self
    }

    pub fn build(self) -> web::Data<AppState> {
        web::Data::new(AppState {
            register_account_orchestrator: self
                .register_account
                .unwrap_or_else(default_test_account_registration_orchestrator),
            verify_account_email_use_case: self
                .verify_account_email
                .unwrap_or_else(|| Arc::new(StubVerifyAccountEmailUseCase)),
            profile_picture_storage: self
                .profile_picture_storage
                .unwrap_or_else(|| Arc::new(RecordingFileStorage::default())),
        })
    }
}
