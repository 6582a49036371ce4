//! Wires the session, router, API client and services together.
//!
//! Every user action first navigates to the screen it belongs to, so the guard decides
//! whether it may run. Form input is validated before any request is made; validation
//! and API errors are reported through the notifier in the active locale.

use std::sync::{Arc, Mutex, MutexGuard};

use log::warn;
use validator::{Validate, ValidationErrors};

use crate::auth::{LoginRequest, RegisterForm, Session};
use crate::client::ApiClient;
use crate::config::Config;
use crate::error::{ApiError, AppError};
use crate::i18n::{self, Locale};
use crate::models::{AuthPayload, Task, TaskForm};
use crate::notify::Notifier;
use crate::router::{route_for, Navigation, Router, View};
use crate::services::{AuthService, TaskService};
use crate::storage::Storage;

const LOGIN_FORM: &str = "auth.login.form";
const REGISTER_FORM: &str = "auth.register.form";
const TASK_FORM: &str = "task_modal.form";

pub struct App {
    session: Session,
    router: Arc<Mutex<Router>>,
    auth: AuthService,
    tasks: TaskService,
    notifier: Arc<dyn Notifier>,
}

fn lock(router: &Mutex<Router>) -> MutexGuard<'_, Router> {
    router.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl App {
    pub fn new(
        config: &Config,
        storage: Arc<dyn Storage>,
        notifier: Arc<dyn Notifier>,
    ) -> Result<Self, AppError> {
        let session = Session::new(storage);
        let router = Arc::new(Mutex::new(Router::new(
            session.clone(),
            config.language_tag.clone(),
        )));

        let expired_router = Arc::clone(&router);
        let expired_notifier = Arc::clone(&notifier);
        let client = ApiClient::from_config(config, session.clone())?.on_unauthorized(move || {
            let mut router = lock(&expired_router);
            let locale = router.active_locale();
            match router.redirect_to_login() {
                Ok(true) => expired_notifier.error(&i18n::t(locale, "auth.session_expired")),
                Ok(false) => {}
                Err(e) => warn!("Could not redirect to login after 401: {}", e),
            }
        });
        let client = Arc::new(client);

        Ok(Self {
            session,
            router,
            auth: AuthService::new(Arc::clone(&client)),
            tasks: TaskService::new(client),
            notifier,
        })
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn locale(&self) -> Locale {
        lock(&self.router).active_locale()
    }

    pub fn current(&self) -> Option<Navigation> {
        lock(&self.router).current().cloned()
    }

    /// Navigates to an arbitrary path and returns where the user ended up.
    pub fn navigate(&self, path: &str) -> Result<Navigation, AppError> {
        let navigation = lock(&self.router).push(path)?.clone();
        Ok(navigation)
    }

    /// Navigates to `view` under the preferred locale.
    pub fn open(&self, view: View) -> Result<Navigation, AppError> {
        let mut router = lock(&self.router);
        let path = format!("/{}/{}", router.preferred_locale(), route_for(view).segment);
        let navigation = router.push(&path)?.clone();
        Ok(navigation)
    }

    /// Stores the language preference used for locale-less navigation.
    pub fn set_language(&self, code: &str) -> Result<Locale, AppError> {
        let locale: Locale = code.parse().map_err(AppError::Config)?;
        self.session.set_preferred_language(locale.code())?;
        self.notifier.info(&i18n::t(locale, "language.changed"));
        Ok(locale)
    }

    pub async fn login(&self, credentials: LoginRequest) -> Result<AuthPayload, AppError> {
        self.enter_public(View::Login)?;
        if let Err(errors) = credentials.validate() {
            return Err(self.report_invalid(LOGIN_FORM, errors));
        }

        let payload = self
            .auth
            .login(&credentials)
            .await
            .map_err(|e| self.report_failure(e))?;
        self.open(View::Dashboard)?;
        self.notifier.success(&i18n::t_with(
            self.locale(),
            "auth.login.success",
            &[("name", payload.user.name.as_str())],
        ));
        Ok(payload)
    }

    pub async fn register(&self, form: RegisterForm) -> Result<AuthPayload, AppError> {
        self.enter_public(View::Register)?;
        let request = match form.into_request() {
            Ok(request) => request,
            Err(errors) => return Err(self.report_invalid(REGISTER_FORM, errors)),
        };

        let payload = self
            .auth
            .register(&request)
            .await
            .map_err(|e| self.report_failure(e))?;
        self.open(View::Dashboard)?;
        self.notifier.success(&i18n::t_with(
            self.locale(),
            "auth.register.success",
            &[("name", payload.user.name.as_str())],
        ));
        Ok(payload)
    }

    pub async fn logout(&self) -> Result<(), AppError> {
        let result = self.auth.logout().await;
        self.open(View::Login)?;
        match result {
            Ok(()) => {
                self.notifier.success(&i18n::t(self.locale(), "auth.logout.success"));
                Ok(())
            }
            Err(e) => Err(self.report_failure(e)),
        }
    }

    pub async fn list_tasks(&self) -> Result<Vec<Task>, AppError> {
        self.enter_dashboard()?;
        self.tasks
            .get_all_tasks()
            .await
            .map_err(|e| self.report_failure(e))
    }

    pub async fn show_task(&self, id: i64) -> Result<Task, AppError> {
        self.enter_dashboard()?;
        self.tasks
            .get_task_by_id(id)
            .await
            .map_err(|e| self.report_failure(e))
    }

    pub async fn create_task(&self, form: TaskForm) -> Result<Task, AppError> {
        self.enter_dashboard()?;
        let input = match form.into_input() {
            Ok(input) => input,
            Err(errors) => return Err(self.report_invalid(TASK_FORM, errors)),
        };

        let task = self
            .tasks
            .create_task(&input)
            .await
            .map_err(|e| self.report_failure(e))?;
        self.notifier.success(&i18n::t(self.locale(), "tasks.created"));
        Ok(task)
    }

    pub async fn update_task(&self, id: i64, form: TaskForm) -> Result<Task, AppError> {
        self.enter_dashboard()?;
        let input = match form.into_input() {
            Ok(input) => input,
            Err(errors) => return Err(self.report_invalid(TASK_FORM, errors)),
        };

        let task = self
            .tasks
            .update_task(id, &input)
            .await
            .map_err(|e| self.report_failure(e))?;
        self.notifier.success(&i18n::t(self.locale(), "tasks.updated"));
        Ok(task)
    }

    pub async fn delete_task(&self, id: i64) -> Result<bool, AppError> {
        self.enter_dashboard()?;
        let deleted = self
            .tasks
            .delete_task(id)
            .await
            .map_err(|e| self.report_failure(e))?;
        self.notifier.success(&i18n::t(self.locale(), "tasks.deleted"));
        Ok(deleted)
    }

    /// Opens a sign-in screen; refused when a session already exists.
    fn enter_public(&self, view: View) -> Result<Navigation, AppError> {
        let navigation = self.open(view)?;
        if navigation.view != view {
            let message = i18n::t(navigation.locale, "auth.already_signed_in");
            self.notifier.info(&message);
            return Err(AppError::Denied(message));
        }
        Ok(navigation)
    }

    /// Opens the dashboard; refused without a session.
    fn enter_dashboard(&self) -> Result<Navigation, AppError> {
        let navigation = self.open(View::Dashboard)?;
        if navigation.view != View::Dashboard {
            let message = i18n::t(navigation.locale, "auth.sign_in_required");
            self.notifier.error(&message);
            return Err(AppError::Denied(message));
        }
        Ok(navigation)
    }

    fn report_invalid(&self, form: &str, errors: ValidationErrors) -> AppError {
        for (field, message) in i18n::translate_errors(self.locale(), form, &errors) {
            self.notifier.error(&format!("{}: {}", field, message));
        }
        AppError::Validation(errors)
    }

    fn report_failure(&self, error: ApiError) -> AppError {
        self.notifier.error(&error.message);
        AppError::Api(error)
    }
}
