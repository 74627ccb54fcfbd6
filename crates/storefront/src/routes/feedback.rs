//! Feedback and complaint form handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
};
use chrono::Utc;
use serde::Deserialize;
use tracing::instrument;
use uuid::Uuid;

use makan_core::{Email, StallId};

use crate::error::{AppError, Result};
use crate::filters;
use crate::foodstore::{ComplaintRecord, FeedbackRecord};
use crate::middleware::OptionalAuth;
use crate::state::AppState;

// =============================================================================
// Form & Query Types
// =============================================================================

/// Feedback form data.
///
/// `rating` arrives as a string because the "no rating" select option
/// submits an empty value.
#[derive(Debug, Deserialize)]
pub struct FeedbackForm {
    pub email: String,
    pub message: String,
    pub rating: Option<String>,
}

/// Complaint form data.
#[derive(Debug, Deserialize)]
pub struct ComplaintForm {
    pub stall_id: i32,
    pub subject: String,
    pub message: String,
}

/// Query parameters for error/success display.
#[derive(Debug, Deserialize)]
pub struct MessageQuery {
    pub error: Option<String>,
    pub success: Option<String>,
}

/// Query parameters for the complaint form.
#[derive(Debug, Deserialize)]
pub struct ComplaintQuery {
    /// The stall being complained about; linked from the stall page.
    pub stall: Option<i32>,
    pub error: Option<String>,
    pub success: Option<String>,
}

// =============================================================================
// Templates
// =============================================================================

/// Feedback page template.
#[derive(Template, WebTemplate)]
#[template(path = "feedback/new.html")]
pub struct FeedbackTemplate {
    pub error: Option<String>,
    pub success: bool,
    pub email: String,
    pub logged_in: bool,
}

/// Complaint page template.
#[derive(Template, WebTemplate)]
#[template(path = "complaints/new.html")]
pub struct ComplaintTemplate {
    pub stall_id: String,
    pub stall_name: String,
    pub error: Option<String>,
    pub success: bool,
    pub logged_in: bool,
}

fn feedback_error_message(code: &str) -> String {
    match code {
        "email" => "Please enter a valid email address.",
        "message" => "Please write a message before submitting.",
        "subject" => "Please give your complaint a subject.",
        "submit" => "Something went wrong. Please try again.",
        _ => "Something went wrong. Please try again.",
    }
    .to_string()
}

// =============================================================================
// Feedback Handlers
// =============================================================================

/// Display the feedback form.
#[instrument(skip(customer))]
pub async fn feedback_page(
    OptionalAuth(customer): OptionalAuth,
    Query(query): Query<MessageQuery>,
) -> impl IntoResponse {
    let email = customer
        .as_ref()
        .map(|c| c.email.to_string())
        .unwrap_or_default();

    FeedbackTemplate {
        error: query.error.as_deref().map(feedback_error_message),
        success: query.success.is_some(),
        email,
        logged_in: customer.is_some(),
    }
}

/// Submit feedback.
#[instrument(skip(state, customer, form))]
pub async fn submit_feedback(
    State(state): State<AppState>,
    OptionalAuth(customer): OptionalAuth,
    Form(form): Form<FeedbackForm>,
) -> Response {
    let Ok(email) = Email::parse(form.email.trim()) else {
        return Redirect::to("/feedback?error=email").into_response();
    };

    if form.message.trim().is_empty() {
        return Redirect::to("/feedback?error=message").into_response();
    }

    let record = FeedbackRecord {
        id: Uuid::new_v4(),
        user_id: customer.map(|c| c.id),
        email,
        message: form.message.trim().to_owned(),
        rating: form
            .rating
            .as_deref()
            .and_then(|r| r.parse::<u8>().ok())
            .filter(|r| (1..=5).contains(r)),
        submitted_at: Utc::now(),
    };

    match state.store().create_feedback(&record).await {
        Ok(()) => Redirect::to("/feedback?success=1").into_response(),
        Err(e) => {
            tracing::error!(id = %record.id, "Failed to store feedback: {e}");
            Redirect::to("/feedback?error=submit").into_response()
        }
    }
}

// =============================================================================
// Complaint Handlers
// =============================================================================

/// Display the complaint form for one stall.
///
/// The stall comes from the `?stall=` query parameter (linked from the
/// stall's menu page); without it there is nothing to complain about.
#[instrument(skip(state, customer))]
pub async fn complaint_page(
    State(state): State<AppState>,
    OptionalAuth(customer): OptionalAuth,
    Query(query): Query<ComplaintQuery>,
) -> Result<Response> {
    let stall_id = query
        .stall
        .map(StallId::new)
        .ok_or_else(|| AppError::BadRequest("missing stall id".to_owned()))?;

    let stall = state
        .store()
        .stall(stall_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("stall {stall_id}")))?;

    Ok(ComplaintTemplate {
        stall_id: stall_id.to_string(),
        stall_name: stall.name,
        error: query.error.as_deref().map(feedback_error_message),
        success: query.success.is_some(),
        logged_in: customer.is_some(),
    }
    .into_response())
}

/// Submit a complaint against a stall.
#[instrument(skip(state, customer, form), fields(stall_id = form.stall_id))]
pub async fn submit_complaint(
    State(state): State<AppState>,
    OptionalAuth(customer): OptionalAuth,
    Form(form): Form<ComplaintForm>,
) -> Response {
    let stall_id = StallId::new(form.stall_id);
    let back = |suffix: &str| format!("/complaints?stall={stall_id}{suffix}");

    if form.subject.trim().is_empty() {
        return Redirect::to(&back("&error=subject")).into_response();
    }
    if form.message.trim().is_empty() {
        return Redirect::to(&back("&error=message")).into_response();
    }

    let record = ComplaintRecord {
        id: Uuid::new_v4(),
        user_id: customer.map(|c| c.id),
        stall_id,
        subject: form.subject.trim().to_owned(),
        message: form.message.trim().to_owned(),
        submitted_at: Utc::now(),
    };

    match state.store().create_complaint(&record).await {
        Ok(()) => Redirect::to(&back("&success=1")).into_response(),
        Err(e) => {
            tracing::error!(id = %record.id, "Failed to store complaint: {e}");
            Redirect::to(&back("&error=submit")).into_response()
        }
    }
}
