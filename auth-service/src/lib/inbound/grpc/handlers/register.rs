use tonic::Status;

use super::internal_status;
use crate::domain::identity::ports::AuthServicePort;
use crate::proto::RegisterRequest;
use crate::proto::RegisterResponse;

pub async fn register<S: AuthServicePort>(
    service: &S,
    request: RegisterRequest,
) -> Result<RegisterResponse, Status> {
    validate(&request)?;

    let user_id = service
        .register(&request.email, &request.password)
        .await
        .map_err(|e| internal_status("register", e))?;

    Ok(RegisterResponse { user_id: user_id.0 })
}

fn validate(request: &RegisterRequest) -> Result<(), Status> {
    if request.email.is_empty() {
        return Err(Status::invalid_argument("empty email"));
    }
    if request.password.is_empty() {
        return Err(Status::invalid_argument("empty password"));
    }
    Ok(())
}
