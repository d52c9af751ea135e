use tonic::Status;

use super::internal_status;
use crate::domain::identity::models::AppId;
use crate::domain::identity::ports::AuthServicePort;
use crate::proto::LoginRequest;
use crate::proto::LoginResponse;

pub async fn login<S: AuthServicePort>(
    service: &S,
    request: LoginRequest,
) -> Result<LoginResponse, Status> {
    validate(&request)?;

    let token = service
        .login(&request.email, &request.password, AppId(request.app_id))
        .await
        .map_err(|e| internal_status("login", e))?;

    Ok(LoginResponse { token })
}

fn validate(request: &LoginRequest) -> Result<(), Status> {
    if request.email.is_empty() {
        return Err(Status::invalid_argument("empty email"));
    }
    if request.password.is_empty() {
        return Err(Status::invalid_argument("empty password"));
    }
    // Application IDs are positive
    if request.app_id <= 0 {
        return Err(Status::invalid_argument("empty app_id"));
    }
    Ok(())
}
