//! Users, sign-in, and account operations.

use pressroom_common::error::Resource;
use pressroom_common::models::{Credentials, PasswordChange, User};
use pressroom_common::validation::require_str;
use serde_json::{json, Value};

use crate::client::{field, found, with_token, ApiClient, Query};
use crate::error::{ApiError, Result};

impl ApiClient {
    /// `GET /users/{uid}`. Without `uid` the signed-in user is fetched; with
    /// neither, the user is not found. `token` lets the backend include
    /// private fields.
    pub async fn get_user(&self, uid: Option<&str>, token: Option<&str>) -> Result<User> {
        let uid = match uid.filter(|u| !u.is_empty()) {
            Some(uid) => uid.to_owned(),
            None => self
                .session
                .user()
                .map(|u| u.id)
                .filter(|id| !id.is_empty())
                .ok_or(ApiError::NotFound { resource: Resource::User })?,
        };
        let query = Query::new().opt("token", token);
        let body = self.execute(self.http.get(self.endpoint(&["users", &uid])?).query(&query)).await?;
        field(body, "user")
    }

    /// `GET /users?keyword=`
    pub async fn get_users(&self, keyword: Option<&str>) -> Result<Vec<User>> {
        let query = Query::new().opt("keyword", keyword);
        let body = self.execute(self.http.get(self.endpoint(&["users"])?).query(&query)).await?;
        field(body, "users")
    }

    /// `POST /users/{uid}/password` for the signed-in user.
    pub async fn change_password(&self, change: &PasswordChange) -> Result<Value> {
        let token = self.require_token()?;
        let uid = self
            .session
            .user()
            .map(|u| u.id)
            .filter(|id| !id.is_empty())
            .ok_or(ApiError::Unauthorized { resource: Resource::User })?;
        let req = self.http.post(self.endpoint(&["users", &uid, "password"])?).json(change);
        self.execute(with_token(req, Some(&token))).await
    }

    /// `PATCH /users/{uid}` with `{ user }`.
    pub async fn update_user(&self, user: &User) -> Result<User> {
        let token = self.require_token()?;
        let uid = require_str("user._id", &user.id)?;
        let req = self.http.patch(self.endpoint(&["users", uid])?).json(&json!({ "user": user }));
        let body = self.execute(with_token(req, Some(&token))).await?;
        field(body, "user")
    }

    /// `GET /slugs/users/{username}`.
    pub async fn get_user_from_username(&self, username: &str) -> Result<User> {
        let username = require_str("username", username)?;
        self.lookup_user(&["slugs", "users", username]).await
    }

    /// `GET /users/{uid}`, reporting a 404 as the user not being found.
    pub async fn get_user_from_user_id(&self, uid: &str) -> Result<User> {
        let uid = require_str("uid", uid)?;
        self.lookup_user(&["users", uid]).await
    }

    async fn lookup_user(&self, segments: &[&str]) -> Result<User> {
        let body = self
            .execute(self.http.get(self.endpoint(segments)?))
            .await
            .map_err(|e| e.not_found_on_404(Resource::User))?;
        found(body, "user", Resource::User)
    }

    /// `POST /auth`. Returns the whole body (token and user).
    pub async fn sign_in(&self, credentials: &Credentials) -> Result<Value> {
        self.execute(self.http.post(self.endpoint(&["auth"])?).json(credentials)).await
    }

    /// `POST /users`.
    pub async fn sign_up(&self, data: &Value) -> Result<Value> {
        self.execute(self.http.post(self.endpoint(&["users"])?).json(data)).await
    }

    /// `POST /signup/check`. `Some` when the email already has an account.
    pub async fn check_sign_up(&self, email: &str) -> Result<Option<User>> {
        let req = self.http.post(self.endpoint(&["signup", "check"])?).json(&json!({ "email": email }));
        field(self.execute(req).await?, "user")
    }

    /// `GET /publishers/{pid}/menu?token=`: the publisher menu, plus the
    /// cookie/session info when `token` is given.
    pub async fn get_cookie_and_token(&self, token: Option<&str>) -> Result<Value> {
        let query = Query::new().opt("token", token);
        self.execute(self.http.get(self.publisher_endpoint(&["menu"])?).query(&query)).await
    }
}
