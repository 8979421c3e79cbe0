// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file,
// You can obtain one at <https://mozilla.org/MPL/2.0/>.

//! REST client for the family tree service.
//!
//! The controller talks to the service only through the [`TreeApi`] trait; [`HttpTreeApi`] is
//! the production implementation on top of [`reqwest`].
//!
//! | Call                | Endpoint                     |
//! |---------------------|------------------------------|
//! | fetch_tree          | `GET /api/tree/{treeId}`     |
//! | create_person       | `POST /api/person`           |
//! | delete_person       | `DELETE /api/person/{id}`    |
//! | create_relationship | `POST /api/relationship`     |

use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use graph::{Gender, Person, PersonId, Relationship, RelationshipType, TreeData, TreeId};
use serde::{Deserialize, Serialize};

use crate::credentials::CredentialProvider;

/// Body of `POST /api/person`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewPerson {
    pub tree_id: TreeId,
    pub first_name: String,
    pub last_name: String,
    pub gender: Gender,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dob: Option<NaiveDate>,
}

impl NewPerson {
    pub fn new(tree_id: impl Into<TreeId>, first_name: impl Into<String>) -> Self {
        Self {
            tree_id: tree_id.into(),
            first_name: first_name.into(),
            last_name: String::new(),
            gender: Gender::Unknown,
            bio: None,
            dob: None,
        }
    }

    /// The request that would create `person` again.
    pub fn from_person(person: &Person) -> Self {
        Self {
            tree_id: person.tree_id.clone(),
            first_name: person.first_name.clone(),
            last_name: person.last_name.clone().unwrap_or_default(),
            gender: person.gender,
            bio: person.bio.clone(),
            dob: person.dob,
        }
    }

    /// What the person will look like before the server assigns an id.
    pub fn preview(&self, id: impl Into<PersonId>) -> Person {
        let mut person = Person::new(id, self.first_name.clone());
        person.tree_id = self.tree_id.clone();
        person.last_name = Some(self.last_name.clone()).filter(|name| !name.is_empty());
        person.gender = self.gender;
        person.bio = self.bio.clone();
        person.dob = self.dob;
        person
    }
}

/// Body of `POST /api/relationship`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewRelationship {
    pub tree_id: TreeId,
    pub person_1_id: PersonId,
    pub person_2_id: PersonId,
    #[serde(rename = "type")]
    pub relationship_type: RelationshipType,
}

impl NewRelationship {
    pub fn from_relationship(relationship: &Relationship) -> Self {
        Self {
            tree_id: relationship.tree_id.clone(),
            person_1_id: relationship.person_1_id.clone(),
            person_2_id: relationship.person_2_id.clone(),
            relationship_type: relationship.relationship_type,
        }
    }

    /// Replaces every occurrence of `from` among the endpoints with `to`.
    pub fn retarget(mut self, from: &str, to: &str) -> Self {
        if self.person_1_id == from {
            self.person_1_id = to.to_string();
        }
        if self.person_2_id == from {
            self.person_2_id = to.to_string();
        }
        self
    }
}

/// Errors from the REST API layer.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The HTTP request itself failed (network, DNS, TLS, decoding, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The service returned a non-2xx status code.
    #[error("tree service error ({status}): {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// A mutating call was attempted without a bearer token.
    #[error("not signed in: a bearer token is required for this request")]
    MissingCredential,
}

impl ApiError {
    /// HTTP 403: the user may not see or change this tree.
    pub fn is_forbidden(&self) -> bool {
        matches!(self, ApiError::Status { status: 403, .. })
    }
}

/// The calls the controller makes against the tree service.
#[async_trait]
pub trait TreeApi: Send + Sync {
    async fn fetch_tree(&self, tree_id: &str) -> Result<TreeData, ApiError>;

    async fn create_person(&self, person: &NewPerson) -> Result<Person, ApiError>;

    async fn delete_person(&self, person_id: &str) -> Result<(), ApiError>;

    async fn create_relationship(
        &self,
        relationship: &NewRelationship,
    ) -> Result<Relationship, ApiError>;
}

#[async_trait]
impl<T: TreeApi + ?Sized> TreeApi for Arc<T> {
    async fn fetch_tree(&self, tree_id: &str) -> Result<TreeData, ApiError> {
        (**self).fetch_tree(tree_id).await
    }

    async fn create_person(&self, person: &NewPerson) -> Result<Person, ApiError> {
        (**self).create_person(person).await
    }

    async fn delete_person(&self, person_id: &str) -> Result<(), ApiError> {
        (**self).delete_person(person_id).await
    }

    async fn create_relationship(
        &self,
        relationship: &NewRelationship,
    ) -> Result<Relationship, ApiError> {
        (**self).create_relationship(relationship).await
    }
}

/// HTTP client for one tree service.
pub struct HttpTreeApi {
    client: reqwest::Client,
    base_url: String,
    credentials: Arc<dyn CredentialProvider>,
}

impl HttpTreeApi {
    /// Create a new API client.
    ///
    /// * `base_url` - Base HTTP URL, e.g. `https://trees.example.org`.
    pub fn new(base_url: impl Into<String>, credentials: Arc<dyn CredentialProvider>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url, credentials)
    }

    /// Create an API client reusing an existing [`reqwest::Client`].
    pub fn with_client(
        client: reqwest::Client,
        base_url: impl Into<String>,
        credentials: Arc<dyn CredentialProvider>,
    ) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client,
            base_url,
            credentials,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Attach the bearer token when there is one.
    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self.credentials.bearer_token() {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// Like [`Self::authorize`], but fails before sending when there is no token.
    fn authorize_mutation(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<reqwest::RequestBuilder, ApiError> {
        let token = self
            .credentials
            .bearer_token()
            .ok_or(ApiError::MissingCredential)?;
        Ok(request.bearer_auth(token))
    }

    // ---- private helpers ----

    /// Ensure the response has a success status code. Returns the
    /// response unchanged on success, or an [`ApiError::Status`]
    /// containing the status and body text on failure.
    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(ApiError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    /// Parse a successful JSON response body into the expected type.
    async fn parse_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ApiError> {
        let response = Self::ensure_success(response).await?;
        Ok(response.json::<T>().await?)
    }

    /// Assert the response has a success status code, discarding the body.
    async fn check_status(response: reqwest::Response) -> Result<(), ApiError> {
        Self::ensure_success(response).await?;
        Ok(())
    }
}

#[async_trait]
impl TreeApi for HttpTreeApi {
    async fn fetch_tree(&self, tree_id: &str) -> Result<TreeData, ApiError> {
        log::debug!("GET tree {}", tree_id);
        let response = self
            .authorize(self.client.get(self.url(&format!("/api/tree/{}", tree_id))))
            .send()
            .await?;

        Self::parse_response(response).await
    }

    async fn create_person(&self, person: &NewPerson) -> Result<Person, ApiError> {
        let request = self.authorize_mutation(self.client.post(self.url("/api/person")))?;
        let response = request.json(person).send().await?;

        Self::parse_response(response).await
    }

    async fn delete_person(&self, person_id: &str) -> Result<(), ApiError> {
        let request = self.authorize_mutation(
            self.client
                .delete(self.url(&format!("/api/person/{}", person_id))),
        )?;
        let response = request.send().await?;

        Self::check_status(response).await
    }

    async fn create_relationship(
        &self,
        relationship: &NewRelationship,
    ) -> Result<Relationship, ApiError> {
        let request = self.authorize_mutation(self.client.post(self.url("/api/relationship")))?;
        let response = request.json(relationship).send().await?;

        Self::parse_response(response).await
    }
}


// End of File
