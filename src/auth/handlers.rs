use actix_web::{web, HttpResponse};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{error, info};
use uuid::Uuid;

use super::token::AuthenticatedIdentity;
use crate::directory::Account;
use crate::error::AppError;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Outward account shape. The password hash is not part of this struct at
/// all, so it cannot leak through a serialization change.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountView {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl AccountView {
    fn public(account: &Account) -> Self {
        Self {
            id: account.id,
            name: account.name.clone(),
            email: account.email.clone(),
            created_at: account.created_at,
            updated_at: None,
        }
    }

    fn detailed(account: &Account) -> Self {
        Self {
            updated_at: Some(account.updated_at),
            ..Self::public(account)
        }
    }
}

pub async fn register(
    req: web::Json<RegisterRequest>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    info!(
        "received registration request for email: {}",
        req.email.as_deref().unwrap_or("<missing>")
    );

    match state
        .auth
        .register(req.name.as_deref(), req.email.as_deref(), req.password.as_deref())
        .await
    {
        Ok(account) => Ok(HttpResponse::Created().json(json!({
            "success": true,
            "user": AccountView::public(&account)
        }))),
        Err(e) => {
            error!("registration failed: {}", e);
            Err(e)
        }
    }
}

pub async fn login(
    req: web::Json<LoginRequest>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    info!(
        "received login request for email: {}",
        req.email.as_deref().unwrap_or("<missing>")
    );

    match state
        .auth
        .login(req.email.as_deref(), req.password.as_deref())
        .await
    {
        Ok((token, account)) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "token": token,
            "user": AccountView::public(&account)
        }))),
        Err(e) => {
            error!("login failed: {}", e);
            Err(e)
        }
    }
}

/// Protected route; the `AuthenticatedIdentity` extractor runs the auth
/// gate before this body executes.
pub async fn me(
    identity: AuthenticatedIdentity,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let account = state.auth.find_account(identity.id).await?;
    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "user": AccountView::detailed(&account)
    })))
}
