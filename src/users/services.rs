use tracing::{info, warn};

use crate::{
    error::{AppError, AppResult},
    text::eq_ignore_case,
    users::{dto::LoginRequest, password::verify_plaintext, repo::UserRepo},
};

/// Returns the stored spelling of the username on success.
pub async fn login(repo: &UserRepo, req: LoginRequest) -> AppResult<String> {
    let users = repo
        .load()
        .await?
        .ok_or_else(|| AppError::not_found("UserName or Password not correct!!"))?;

    let username = req.username.unwrap_or_default();
    let password = req.password.unwrap_or_default();

    let Some(user) = users
        .into_iter()
        .find(|u| eq_ignore_case(&u.username, &username))
    else {
        warn!(%username, "login unknown username");
        return Err(AppError::Unauthorized);
    };

    if !verify_plaintext(&password, &user.password_hash) {
        warn!(%username, user_id = user.user_id, "login invalid password");
        return Err(AppError::Unauthorized);
    }

    info!(user_id = user.user_id, username = %user.username, "user logged in");
    Ok(user.username)
}

#[cfg(test)]
mod tests {
    use time::OffsetDateTime;

    use super::*;
    use crate::users::repo::UserRecord;

    fn login_req(username: &str, password: &str) -> LoginRequest {
        LoginRequest {
            username: Some(username.into()),
            password: Some(password.into()),
        }
    }

    async fn seeded() -> (tempfile::TempDir, UserRepo) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("user.json");
        let users = serde_json::json!([
            {
                "userID": 1,
                "username": "Admin",
                "passwordHash": "PLAINTEXT:secret123",
                "createAt": "2024-05-01T08:30:00.1234567Z",
                "createBy": "system"
            }
        ]);
        std::fs::write(&path, serde_json::to_vec_pretty(&users).unwrap()).unwrap();
        (dir, UserRepo::new(path))
    }

    #[tokio::test]
    async fn login_succeeds_with_case_insensitive_username() {
        let (_dir, repo) = seeded().await;
        let name = login(&repo, login_req("aDMIN", "secret123")).await.unwrap();
        assert_eq!(name, "Admin");
    }

    #[tokio::test]
    async fn login_password_is_case_sensitive() {
        let (_dir, repo) = seeded().await;
        let err = login(&repo, login_req("admin", "Secret123")).await.unwrap_err();
        assert!(matches!(err, AppError::Unauthorized));
    }

    #[tokio::test]
    async fn login_unknown_user_is_unauthorized() {
        let (_dir, repo) = seeded().await;
        let err = login(&repo, login_req("ghost", "secret123")).await.unwrap_err();
        assert!(matches!(err, AppError::Unauthorized));
    }

    #[tokio::test]
    async fn login_with_missing_fields_is_unauthorized() {
        let (_dir, repo) = seeded().await;
        let req = LoginRequest { username: None, password: None };
        let err = login(&repo, req).await.unwrap_err();
        assert!(matches!(err, AppError::Unauthorized));
    }

    #[tokio::test]
    async fn login_missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let repo = UserRepo::new(dir.path().join("user.json"));
        let err = login(&repo, login_req("admin", "secret123")).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn stored_timestamp_with_seven_fraction_digits_parses() {
        let (_dir, repo) = seeded().await;
        let users: Vec<UserRecord> = repo.load().await.unwrap().unwrap();
        assert_eq!(users[0].create_at.year(), 2024);
        assert!(users[0].create_at < OffsetDateTime::now_utc());
    }
}
