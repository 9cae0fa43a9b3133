use crate::notify::Notifier;
use crate::session::{Session, SessionProvider};
use crate::views::route::Route;

pub const LOGIN_SUCCESS_MESSAGE: &str = "Login bem-sucedido!";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginStatus {
    Idle,
    Loading,
    Success,
    Error,
}

/// Email/password form.
#[derive(Debug, Clone)]
pub struct LoginView {
    pub email: String,
    pub password: String,
    status: LoginStatus,
}

impl Default for LoginView {
    fn default() -> Self {
        Self::new()
    }
}

impl LoginView {
    pub fn new() -> Self {
        Self {
            email: String::new(),
            password: String::new(),
            status: LoginStatus::Idle,
        }
    }

    pub fn status(&self) -> LoginStatus {
        self.status
    }

    /// Submit button state.
    pub fn can_submit(&self) -> bool {
        self.status != LoginStatus::Loading
    }

    /// A visitor who is already signed in goes straight home.
    pub fn on_mount(&self, session: &Session) -> Option<Route> {
        session.is_present().then_some(Route::Home)
    }

    /// Signs in with the form values. Returns the route to follow on success;
    /// on failure the provider's message is alerted and the form stays.
    pub async fn submit(
        &mut self,
        provider: &dyn SessionProvider,
        notifier: &dyn Notifier,
    ) -> Option<Route> {
        if !self.can_submit() {
            return None;
        }
        self.status = LoginStatus::Loading;

        match provider.sign_in(self.email.trim(), &self.password).await {
            Ok(user) => {
                tracing::info!(user = %user.id, "[login_view] signed in");
                self.status = LoginStatus::Success;
                notifier.alert(LOGIN_SUCCESS_MESSAGE);
                Some(Route::Home)
            }
            Err(e) => {
                tracing::warn!(error = %e, "[login_view] sign-in failed");
                self.status = LoginStatus::Error;
                notifier.alert(&e.to_string());
                None
            }
        }
    }
}
