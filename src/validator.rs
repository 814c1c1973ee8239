use anyhow::anyhow;
use axum::{
    Json,
    extract::{FromRequest, Request, rejection::JsonRejection},
};
use rollcall_core::AppError;
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors};

fn format_errors(errors: &ValidationErrors) -> String {
    errors
        .field_errors()
        .iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |error| {
                error
                    .message
                    .as_ref()
                    .map(|msg| msg.to_string())
                    .unwrap_or_else(|| format!("{} is invalid", field))
            })
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// Strips axum's generic prefix and serde's position suffix from a data error.
fn describe_data_error(body_text: &str) -> String {
    let detail = body_text
        .split_once(": ")
        .map(|(_, rest)| rest)
        .unwrap_or(body_text);
    let detail = detail
        .rsplit_once(" at line ")
        .map(|(head, _)| head)
        .unwrap_or(detail);

    if let Some(field) = detail
        .split("missing field `")
        .nth(1)
        .and_then(|s| s.split('`').next())
    {
        return format!("{} is required", field);
    }

    format!("Invalid request body: {}", detail)
}

fn reject(rejection: JsonRejection) -> AppError {
    match rejection {
        // Well-formed JSON whose values do not fit: unknown enum variants,
        // bad dates, missing fields.
        JsonRejection::JsonDataError(err) => {
            AppError::unprocessable(anyhow!(describe_data_error(&err.body_text())))
        }
        JsonRejection::MissingJsonContentType(_) => {
            AppError::bad_request(anyhow!("Missing 'Content-Type: application/json' header"))
        }
        _ => AppError::bad_request(anyhow!("Invalid request body")),
    }
}

/// `Json<T>` followed by `validator` checks. Shape errors are 422, syntax errors 400.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await.map_err(reject)?;

        value
            .validate()
            .map_err(|errors| AppError::unprocessable(anyhow!("{}", format_errors(&errors))))?;

        Ok(ValidatedJson(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_field_message() {
        let text = "Failed to deserialize the JSON body into the target type: missing field `session` at line 1 column 20";
        assert_eq!(describe_data_error(text), "session is required");
    }

    #[test]
    fn test_unknown_variant_message() {
        let text = "Failed to deserialize the JSON body into the target type: session: unknown variant `evening`, expected `morning` or `afternoon` at line 1 column 42";
        assert_eq!(
            describe_data_error(text),
            "Invalid request body: session: unknown variant `evening`, expected `morning` or `afternoon`"
        );
    }
}
