//! Request validation extractors for the `/escolas` resource.
//!
//! Bodies must be `{ "escola": { ... } }`. Before the payload reaches the
//! service, every known field that is present and non-null must be a JSON
//! string, and creation additionally requires a non-empty `EscolaNome`.
//! Value rules (lengths, hex colors) are enforced by the entity itself.

use axum::extract::{FromRequest, FromRequestParts, Path, Request};
use axum::http::request::Parts;
use axum::Json;
use escola_core::escola::EscolaGuid;
use escola_core::input::{EscolaInput, EscolaPatch};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::error::AppError;

/// Envelope key wrapping the Escola payload.
const ENVELOPE: &str = "escola";

/// Fields accepted in both create and update payloads.
const MUTABLE_FIELDS: &[&str] = &[
    "EscolaNome",
    "EscolaCorPriEs",
    "EscolaCorPriCl",
    "EscolaCorSecEs",
    "EscolaCorSecCl",
    "EscolaIcone",
];

/// Fields that must be present and non-empty on create.
const REQUIRED_ON_CREATE: &[&str] = &["EscolaNome"];

// ---------------------------------------------------------------------------
// Path
// ---------------------------------------------------------------------------

/// The `{EscolaGUID}` path segment, validated as a 36-character identifier.
#[derive(Debug, Clone)]
pub struct EscolaPath(pub EscolaGuid);

impl<S> FromRequestParts<S> for EscolaPath
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError::BadRequest(e.body_text()))?;

        if raw.trim().is_empty() {
            return Err(AppError::BadRequest(
                "Path parameter 'EscolaGUID' is required".into(),
            ));
        }

        Ok(EscolaPath(EscolaGuid::parse(&raw)?))
    }
}

// ---------------------------------------------------------------------------
// Bodies
// ---------------------------------------------------------------------------

/// Validated body of `POST /escolas`.
#[derive(Debug)]
pub struct CreateEscolaBody(pub EscolaInput);

impl<S> FromRequest<S> for CreateEscolaBody
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let escola = envelope(req, state).await?;
        validate_create(&escola)?;
        Ok(CreateEscolaBody(into_typed(escola)?))
    }
}

/// Validated body of `PUT /escolas/{EscolaGUID}`.
#[derive(Debug)]
pub struct UpdateEscolaBody(pub EscolaPatch);

impl<S> FromRequest<S> for UpdateEscolaBody
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let escola = envelope(req, state).await?;
        require_strings(&escola, MUTABLE_FIELDS)?;
        Ok(UpdateEscolaBody(into_typed(escola)?))
    }
}

/// Parse the JSON body and pull out the `escola` object.
async fn envelope<S>(req: Request, state: &S) -> Result<Map<String, Value>, AppError>
where
    S: Send + Sync,
{
    let Json(body) = Json::<Value>::from_request(req, state)
        .await
        .map_err(|e| AppError::BadRequest(e.body_text()))?;

    match body {
        Value::Object(mut root) => match root.remove(ENVELOPE) {
            Some(Value::Object(escola)) => Ok(escola),
            Some(Value::Null) | None => Err(AppError::BadRequest(format!(
                "Field '{ENVELOPE}' is required"
            ))),
            Some(_) => Err(AppError::BadRequest(format!(
                "Field '{ENVELOPE}' must be an object"
            ))),
        },
        _ => Err(AppError::BadRequest(
            "Request body must be a JSON object".into(),
        )),
    }
}

fn validate_create(escola: &Map<String, Value>) -> Result<(), AppError> {
    for field in REQUIRED_ON_CREATE {
        match escola.get(*field) {
            None | Some(Value::Null) => return Err(required(field)),
            Some(Value::String(s)) if s.is_empty() => return Err(required(field)),
            _ => {}
        }
    }
    require_strings(escola, &["EscolaGUID"])?;
    require_strings(escola, MUTABLE_FIELDS)
}

/// Every listed field that is present and non-null must be a string.
fn require_strings(escola: &Map<String, Value>, fields: &[&str]) -> Result<(), AppError> {
    for field in fields {
        match escola.get(*field) {
            None | Some(Value::Null) | Some(Value::String(_)) => {}
            Some(_) => {
                return Err(AppError::BadRequest(format!(
                    "Field '{field}' must be a string"
                )))
            }
        }
    }
    Ok(())
}

fn required(field: &str) -> AppError {
    AppError::BadRequest(format!("Field '{field}' is required"))
}

fn into_typed<T: DeserializeOwned>(escola: Map<String, Value>) -> Result<T, AppError> {
    serde_json::from_value(Value::Object(escola))
        .map_err(|e| AppError::BadRequest(format!("Invalid escola payload: {e}")))
}
