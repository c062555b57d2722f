//! Authentication route handlers: login, registration, logout.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;

use crate::error::{AppError, clear_sentry_user, set_sentry_user};
use crate::filters;
use crate::middleware::{OptionalAuth, clear_current_customer, set_current_customer};
use crate::models::CurrentCustomer;
use crate::routes::home::MessageQuery;
use crate::services::auth::{AuthError, AuthService, RegisterForm};
use crate::state::AppState;

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/login.html")]
pub struct LoginTemplate {
    pub error: Option<String>,
    pub success: Option<String>,
}

/// Registration page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/register.html")]
pub struct RegisterTemplate {
    pub errors: Vec<String>,
}

/// Login form fields.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

/// Display the login page.
///
/// Customers who are already logged in go straight to the catalog.
pub async fn login_page(
    OptionalAuth(customer): OptionalAuth,
    Query(query): Query<MessageQuery>,
) -> Response {
    if customer.is_some() {
        return Redirect::to("/").into_response();
    }

    LoginTemplate {
        error: query.error,
        success: query.success,
    }
    .into_response()
}

/// Handle a login attempt.
///
/// On success the customer is stored in the session and redirected to the
/// catalog. Bad credentials redirect back to the login page with a message
/// that does not reveal whether the email exists.
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Response {
    let service = AuthService::new(state.pool());

    let customer = match service.login(&form.email, &form.password).await {
        Ok(customer) => customer,
        Err(AuthError::InvalidCredentials) => {
            tracing::info!("failed login attempt");
            return login_redirect_with_error("Invalid email or password.");
        }
        Err(e) => return AppError::from(e).into_response(),
    };

    let current = CurrentCustomer {
        id: customer.id,
        email: customer.email.clone(),
        display_name: customer.display_name(),
    };

    if let Err(e) = set_current_customer(&session, &current).await {
        tracing::error!(error = %e, "failed to persist login session");
        return login_redirect_with_error("Something went wrong. Please try again.");
    }

    set_sentry_user(&current.id, Some(current.email.as_str()));

    Redirect::to("/").into_response()
}

/// Display the registration page.
pub async fn register_page() -> impl IntoResponse {
    RegisterTemplate { errors: vec![] }
}

/// Handle a registration attempt.
///
/// Validation reports every violation at once; on success the customer is
/// sent to the login page rather than being logged in automatically.
pub async fn register(State(state): State<AppState>, Form(form): Form<RegisterForm>) -> Response {
    let service = AuthService::new(state.pool());

    match service.register(&form).await {
        Ok(_customer) => {
            let success = urlencoding::encode("Registration successful. Please log in.");
            Redirect::to(&format!("/login?success={success}")).into_response()
        }
        Err(AuthError::Validation(errors)) => RegisterTemplate { errors }.into_response(),
        // Lost the insert race after the pre-check passed.
        Err(AuthError::EmailTaken) => RegisterTemplate {
            errors: vec!["Email is already registered.".to_owned()],
        }
        .into_response(),
        Err(e) => AppError::from(e).into_response(),
    }
}

/// Log the customer out and destroy the session.
pub async fn logout(session: Session) -> Response {
    if let Err(e) = clear_current_customer(&session).await {
        tracing::error!(error = %e, "failed to clear session on logout");
    }
    if let Err(e) = session.flush().await {
        tracing::error!(error = %e, "failed to flush session on logout");
    }

    clear_sentry_user();

    Redirect::to("/login").into_response()
}

fn login_redirect_with_error(message: &str) -> Response {
    let error = urlencoding::encode(message);
    Redirect::to(&format!("/login?error={error}")).into_response()
}
