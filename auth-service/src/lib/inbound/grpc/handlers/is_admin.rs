use tonic::Status;

use super::internal_status;
use crate::domain::identity::models::UserId;
use crate::domain::identity::ports::AuthServicePort;
use crate::proto::IsAdminRequest;
use crate::proto::IsAdminResponse;

pub async fn is_admin<S: AuthServicePort>(
    service: &S,
    request: IsAdminRequest,
) -> Result<IsAdminResponse, Status> {
    if request.user_id == 0 {
        return Err(Status::invalid_argument("empty user_id"));
    }

    let is_admin = service
        .is_admin(UserId(request.user_id))
        .await
        .map_err(|e| internal_status("is_admin", e))?;

    Ok(IsAdminResponse { is_admin })
}

#[cfg(test)]
mod tests {
    use tonic::Code;

    use super::*;
    use crate::identity::errors::AuthError;
    use crate::inbound::grpc::handlers::test_support::MockTestAuthService;

    #[tokio::test]
    async fn test_is_admin_success() {
        let mut service = MockTestAuthService::new();
        service
            .expect_is_admin()
            .withf(|user_id| *user_id == UserId(5))
            .times(1)
            .returning(|_| Ok(true));

        let response = is_admin(&service, IsAdminRequest { user_id: 5 })
            .await
            .unwrap();
        assert!(response.is_admin);
    }

    #[tokio::test]
    async fn test_is_admin_zero_user_id() {
        let mut service = MockTestAuthService::new();
        service.expect_is_admin().times(0);

        let status = is_admin(&service, IsAdminRequest { user_id: 0 })
            .await
            .unwrap_err();
        assert_eq!(status.code(), Code::InvalidArgument);
        assert_eq!(status.message(), "empty user_id");
    }

    #[tokio::test]
    async fn test_is_admin_unknown_user_is_masked() {
        let mut service = MockTestAuthService::new();
        service
            .expect_is_admin()
            .times(1)
            .returning(|_| Err(AuthError::InvalidUserId));

        let status = is_admin(&service, IsAdminRequest { user_id: 9 })
            .await
            .unwrap_err();
        assert_eq!(status.code(), Code::Internal);
    }
}
