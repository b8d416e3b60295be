use contracts::system::auth::{LoginRequest, LoginResponse};

use crate::shared::api::{ApiClient, ApiEnvelope, Transport};

/// Client-side checks run before the request is issued.
pub fn validate_login(email: &str, password: &str) -> Result<LoginRequest, String> {
    let email = email.trim();
    if email.is_empty() {
        return Err("Email is required".to_string());
    }
    if !email.contains('@') || email.starts_with('@') || email.ends_with('@') {
        return Err("Enter a valid email address".to_string());
    }
    if password.is_empty() {
        return Err("Password is required".to_string());
    }
    Ok(LoginRequest {
        email: email.to_string(),
        password: password.to_string(),
    })
}

/// POST api/auth/login
pub async fn login<T: Transport>(
    client: &ApiClient<T>,
    request: &LoginRequest,
) -> ApiEnvelope<LoginResponse> {
    client.post("api/auth/login", request).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::api::testing::StubTransport;
    use crate::shared::api::RequestBody;
    use futures::executor::block_on;
    use serde_json::json;

    #[test]
    fn test_validate_login() {
        assert!(validate_login("", "x").is_err());
        assert!(validate_login("ops", "x").is_err());
        assert!(validate_login("ops@petcaart.com", "").is_err());
        let ok = validate_login("  ops@petcaart.com ", "pw").unwrap();
        assert_eq!(ok.email, "ops@petcaart.com");
    }

    #[test]
    fn test_login_posts_credentials() {
        let transport = StubTransport::ok(json!({
            "token": "jwt",
            "user": { "_id": "u1", "name": "Ops", "email": "ops@petcaart.com" }
        }));
        let client = ApiClient::new("https://api.petcaart.com/", "ngrok-skip-browser-warning", transport.clone());
        let request = validate_login("ops@petcaart.com", "pw").unwrap();

        let response = block_on(login(&client, &request)).into_result().unwrap();
        assert_eq!(response.token, "jwt");

        let seen = transport.requests();
        assert_eq!(seen[0].url, "https://api.petcaart.com/api/auth/login");
        assert_eq!(
            seen[0].body,
            RequestBody::Json(json!({ "email": "ops@petcaart.com", "password": "pw" }))
        );
    }

    #[test]
    fn test_rejected_login_is_a_failure() {
        let transport = StubTransport::status(401, json!({ "message": "Invalid credentials" }));
        let client = ApiClient::new("https://api.petcaart.com/", "ngrok-skip-browser-warning", transport);
        let request = validate_login("ops@petcaart.com", "bad").unwrap();
        let failure = block_on(login(&client, &request)).into_result().unwrap_err();
        assert!(failure.is_unauthorized());
        assert_eq!(failure.message, "Invalid credentials");
    }
}
