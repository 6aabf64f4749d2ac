//! Publisher settings, admins, writers, and contact categories.

use pressroom_common::error::Resource;
use pressroom_common::models::{Contact, ContactCat, NewContactCat, Publisher, User};
use pressroom_common::validation::{require, require_str, validate_request};
use serde_json::{json, Value};

use crate::client::{field, with_token, ApiClient, Query};
use crate::error::{ApiError, Result};

impl ApiClient {
    /// `GET /publishers/{pid}?token=`. Without a token the public view is
    /// returned.
    pub async fn get_publisher(&self, token: Option<&str>) -> Result<Publisher> {
        let query = Query::new().opt("token", token);
        let body = self.execute(self.http.get(self.publisher_endpoint(&[])?).query(&query)).await?;
        field(body, "publisher")
    }

    /// `GET /publishers/{id}` for a publisher other than the configured one.
    pub async fn get_other_publisher(&self, id: &str) -> Result<Publisher> {
        let id = require_str("id", id)?;
        let body = self
            .execute(self.http.get(self.endpoint(&["publishers", id])?))
            .await
            .map_err(|e| e.not_found_on_404(Resource::Publisher))?;
        field(body, "publisher")
    }

    /// `PATCH /publishers/{pid}` with `{ publisher }`.
    pub async fn update_publisher(&self, publisher: &Publisher) -> Result<Publisher> {
        let req = self
            .http
            .patch(self.publisher_endpoint(&[])?)
            .json(&json!({ "publisher": publisher }));
        field(self.execute(with_token(req, self.session_token().as_deref())).await?, "publisher")
    }

    /// `GET /publishers/{pid}/setting`: the whole settings document.
    pub async fn get_publisher_setting(&self) -> Result<Value> {
        self.execute(self.http.get(self.publisher_endpoint(&["setting"])?)).await
    }

    pub async fn get_publisher_writers(&self) -> Result<Vec<User>> {
        field(self.execute(self.http.get(self.publisher_endpoint(&["writers"])?)).await?, "writers")
    }

    /// Contact categories, empty when the publisher has none.
    pub async fn get_publisher_contact_cats(&self) -> Result<Vec<ContactCat>> {
        let body = self.execute(self.http.get(self.publisher_endpoint(&["contactcats"])?)).await?;
        let cats = body.pointer("/publisher/contactCats").cloned().unwrap_or(Value::Null);
        if cats.is_null() {
            return Ok(Vec::new());
        }
        Ok(serde_json::from_value(cats)?)
    }

    /// About-us text, empty when unset.
    pub async fn get_publisher_about_us(&self) -> Result<String> {
        let body = self.execute(self.http.get(self.publisher_endpoint(&["aboutus"])?)).await?;
        Ok(body
            .pointer("/publisher/aboutUs")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_owned())
    }

    /// `POST /publishers/{pid}/contactcats`. Only `catName` is mandatory.
    pub async fn new_contact_cat(&self, contact_cat: &NewContactCat) -> Result<ContactCat> {
        validate_request(contact_cat)?;
        let req = self
            .http
            .post(self.publisher_endpoint(&["contactcats"])?)
            .json(&json!({ "contactCat": contact_cat }));
        field(self.execute(with_token(req, self.session_token().as_deref())).await?, "contactCat")
    }

    /// `PATCH /publishers/{pid}/contactcats/{_id}`.
    pub async fn update_contact_cat(&self, contact_cat: &ContactCat) -> Result<ContactCat> {
        let id = require("contactCat", contact_cat.id.as_deref())?;
        let req = self
            .http
            .patch(self.publisher_endpoint(&["contactcats", id])?)
            .json(&json!({ "contactCat": contact_cat }));
        let body = self
            .execute(with_token(req, self.session_token().as_deref()))
            .await
            .map_err(|e| e.not_found_on_404(Resource::ContactCat))?;
        field(body, "contactCat")
    }

    pub async fn delete_contact_cat(&self, conid: &str) -> Result<Value> {
        let conid = require_str("conid", conid)?;
        let req = self.http.delete(self.publisher_endpoint(&["contactcats", conid])?);
        self.execute(with_token(req, self.session_token().as_deref()))
            .await
            .map_err(|e| e.not_found_on_404(Resource::ContactCat))
    }

    /// `POST /publishers/{pid}/contacts`: a reader's message to a category.
    pub async fn send_contact_email(&self, contact_cat: &str, message: &Value) -> Result<Contact> {
        let req = self
            .http
            .post(self.publisher_endpoint(&["contacts"])?)
            .json(&json!({ "contactCat": contact_cat, "contact": message }));
        field(self.execute(req).await?, "contact")
    }

    // ── Admins ────────────────────────────────────────────────────────────────

    fn admin_token(&self) -> Result<String> {
        self.session_token().ok_or(ApiError::Unauthorized { resource: Resource::Admin })
    }

    pub async fn get_admins(&self) -> Result<Vec<User>> {
        let token = self.admin_token()?;
        let req = self.http.get(self.publisher_endpoint(&["admins"])?);
        field(self.execute(with_token(req, Some(&token))).await?, "admins")
    }

    pub async fn add_admin(&self, uid: &str) -> Result<Value> {
        let token = self.admin_token()?;
        let uid = require_str("uid", uid)?;
        let req = self.http.post(self.publisher_endpoint(&["admins", uid])?);
        self.execute(with_token(req, Some(&token))).await
    }

    pub async fn remove_admin(&self, admin_id: &str) -> Result<Value> {
        let token = self.admin_token()?;
        let admin_id = require_str("adminId", admin_id)?;
        let req = self.http.delete(self.publisher_endpoint(&["admins", admin_id])?);
        self.execute(with_token(req, Some(&token)))
            .await
            .map_err(|e| e.not_found_on_404(Resource::Admin))
    }
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use axum::routing::{delete, get, patch};
    use axum::{Json, Router};

    use super::*;
    use crate::test_support::Backend;

    #[tokio::test]
    async fn missing_sections_default_to_empty() {
        let backend = Backend::spawn(
            Router::new()
                .route("/publishers/pub-1/contactcats", get(|| async { Json(json!({ "publisher": {} })) }))
                .route("/publishers/pub-1/aboutus", get(|| async { Json(json!({ "publisher": { "aboutUs": null } })) })),
        )
        .await;
        let client = backend.anonymous_client();

        assert!(client.get_publisher_contact_cats().await.unwrap().is_empty());
        assert_eq!(client.get_publisher_about_us().await.unwrap(), "");
    }

    #[tokio::test]
    async fn contact_cats_are_decoded() {
        let backend = Backend::spawn(Router::new().route(
            "/publishers/pub-1/contactcats",
            get(|| async {
                Json(json!({ "publisher": { "contactCats": [{ "_id": "cc-1", "catName": "Ads", "toEmail": ["ads@x.io"] }] } }))
            }),
        ))
        .await;

        let cats = backend.anonymous_client().get_publisher_contact_cats().await.unwrap();
        assert_eq!(cats[0].cat_name, "Ads");
        assert_eq!(cats[0].to_email, vec!["ads@x.io".to_owned()]);
    }

    #[tokio::test]
    async fn preconditions_fail_locally() {
        let backend = Backend::empty().await;
        let signed_in = backend.signed_in_client();
        let anonymous = backend.anonymous_client();

        let err = signed_in.new_contact_cat(&NewContactCat::default()).await.unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
        assert_eq!(
            signed_in.update_contact_cat(&ContactCat::default()).await.unwrap_err().missing_field(),
            Some("contactCat")
        );
        assert_eq!(signed_in.delete_contact_cat("").await.unwrap_err().missing_field(), Some("conid"));
        assert_eq!(signed_in.remove_admin("").await.unwrap_err().missing_field(), Some("adminId"));
        assert_eq!(signed_in.add_admin("").await.unwrap_err().missing_field(), Some("uid"));

        assert!(matches!(
            anonymous.get_admins().await,
            Err(ApiError::Unauthorized { resource: Resource::Admin })
        ));
        // Token is checked before the id.
        assert!(matches!(anonymous.add_admin("").await, Err(ApiError::Unauthorized { .. })));

        assert_eq!(backend.hits(), 0);
    }

    #[tokio::test]
    async fn missing_targets_are_reported_by_resource() {
        let gone = || async { (StatusCode::NOT_FOUND, Json(json!({ "error": "gone" }))) };
        let backend = Backend::spawn(
            Router::new()
                .route("/publishers/{id}", get(gone))
                .route("/publishers/pub-1/contactcats/{conid}", patch(gone).delete(gone))
                .route("/publishers/pub-1/admins/{admin_id}", delete(gone)),
        )
        .await;
        let client = backend.signed_in_client();

        let err = client.get_other_publisher("pub-9").await.unwrap_err();
        assert!(matches!(err, ApiError::NotFound { resource: Resource::Publisher }), "{err:?}");
        assert_eq!(err.to_string(), "Publisher is not found.");

        let cat = ContactCat { id: Some("cc-9".into()), ..Default::default() };
        let err = client.update_contact_cat(&cat).await.unwrap_err();
        assert!(matches!(err, ApiError::NotFound { resource: Resource::ContactCat }), "{err:?}");
        let err = client.delete_contact_cat("cc-9").await.unwrap_err();
        assert!(matches!(err, ApiError::NotFound { resource: Resource::ContactCat }), "{err:?}");

        let err = client.remove_admin("u-9").await.unwrap_err();
        assert!(matches!(err, ApiError::NotFound { resource: Resource::Admin }), "{err:?}");
        assert_eq!(backend.hits(), 4);
    }
}
