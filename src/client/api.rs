//! Remote reservation API used by the publishing workflow

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use super::form::ImageFile;

/// Multipart field the server reads the image from
pub const IMAGE_FIELD: &str = "image";

/// Failure of a remote call, by kind
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// The server answered with an error status; `message` is its explanation
    #[error("{message}")]
    Server { status: u16, message: String },

    #[error("Request failed: {0}")]
    Transport(String),

    #[error("Unexpected response: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            ApiError::Decode(e.to_string())
        } else {
            ApiError::Transport(e.to_string())
        }
    }
}

/// Body of the "create published reservation" call
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewPublishedReservation {
    pub hotelier_id: i32,
    pub name: String,
    pub rooms: i32,
    pub people: i32,
    pub wifi: bool,
    pub breakfast: bool,
    pub air_conditioner: bool,
    pub parking: bool,
    pub room_service: bool,
    pub price: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CreatedReservation {
    pub id: i32,
    pub hotelier_id: i32,
    pub name: String,
}

/// Token and identity returned by a successful login
#[derive(Debug, Clone, PartialEq)]
pub struct LoginGrant {
    pub token: String,
    pub hotelier_id: i32,
}

#[async_trait]
pub trait ReservationApi: Send + Sync {
    async fn create_published_reservation(
        &self,
        reservation: &NewPublishedReservation,
    ) -> Result<CreatedReservation, ApiError>;

    async fn upload_image(&self, reservation_id: i32, image: &ImageFile) -> Result<(), ApiError>;
}

#[derive(Deserialize)]
struct Envelope<T> {
    data: Option<T>,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

#[derive(Deserialize)]
struct LoginData {
    token: String,
    hotelier: LoginHotelier,
}

#[derive(Deserialize)]
struct LoginHotelier {
    id: i32,
}

/// [`ReservationApi`] over the JSON REST API
#[derive(Debug, Clone)]
pub struct HttpReservationApi {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl HttpReservationApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: None,
        }
    }

    /// Send `Authorization: Bearer <token>` on every call.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// Log in by email or username.
    pub async fn login(&self, login: &str, password: &str) -> Result<LoginGrant, ApiError> {
        let response = self
            .client
            .post(self.url("/api/v1/auth/login"))
            .json(&serde_json::json!({ "login": login, "password": password }))
            .send()
            .await?;

        let data: LoginData = read_data(response).await?;
        Ok(LoginGrant {
            token: data.token,
            hotelier_id: data.hotelier.id,
        })
    }
}

/// Unwrap the `data` of a success envelope, or turn an error status into
/// [`ApiError::Server`] carrying the body's `message`.
async fn read_data<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
    let status = response.status();
    if !status.is_success() {
        let text = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&text)
            .ok()
            .and_then(|b| b.message)
            .unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("Unknown error")
                    .to_string()
            });
        debug!(status = status.as_u16(), message = %message, "API call rejected");
        return Err(ApiError::Server {
            status: status.as_u16(),
            message,
        });
    }

    let envelope: Envelope<T> = response.json().await?;
    envelope
        .data
        .ok_or_else(|| ApiError::Decode("response has no data".into()))
}

#[async_trait]
impl ReservationApi for HttpReservationApi {
    async fn create_published_reservation(
        &self,
        reservation: &NewPublishedReservation,
    ) -> Result<CreatedReservation, ApiError> {
        let request = self
            .client
            .post(self.url("/api/v1/published-reservations"))
            .json(reservation);
        let response = self.authorize(request).send().await?;
        read_data(response).await
    }

    async fn upload_image(&self, reservation_id: i32, image: &ImageFile) -> Result<(), ApiError> {
        let part = Part::bytes(image.bytes.clone())
            .file_name(image.file_name.clone())
            .mime_str(&image.content_type)
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        let form = Form::new().part(IMAGE_FIELD, part);

        let request = self
            .client
            .post(self.url(&format!(
                "/api/v1/published-reservations/{}/image",
                reservation_id
            )))
            .multipart(form);
        let response = self.authorize(request).send().await?;
        let _: serde_json::Value = read_data(response).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_error_displays_its_message() {
        let err = ApiError::Server {
            status: 409,
            message: "Reserva já existe".into(),
        };
        assert_eq!(err.to_string(), "Reserva já existe");
        assert!(ApiError::Transport("connection refused".into())
            .to_string()
            .contains("connection refused"));
    }

    #[test]
    fn base_url_trailing_slash_is_dropped() {
        let api = HttpReservationApi::new("http://localhost:3333/");
        assert_eq!(
            api.url("/api/v1/published-reservations"),
            "http://localhost:3333/api/v1/published-reservations"
        );
    }

    #[test]
    fn create_body_uses_snake_case_fields() {
        let body = serde_json::to_value(NewPublishedReservation {
            hotelier_id: 1,
            name: "Suite".into(),
            rooms: 2,
            people: 3,
            wifi: true,
            breakfast: false,
            air_conditioner: true,
            parking: false,
            room_service: false,
            price: 150.5,
        })
        .unwrap();
        assert_eq!(body["hotelier_id"], 1);
        assert_eq!(body["air_conditioner"], true);
        assert_eq!(body["price"], 150.5);
    }

    mod against_server {
        use std::sync::{Arc, Mutex};

        use super::*;
        use crate::client::form::{FormField, PublishForm};
        use crate::client::session::StaticSession;
        use crate::client::ui::{Navigator, Notifier};
        use crate::client::workflow::{PublishOutcome, PublishWorkflow};
        use crate::config::AppConfig;
        use crate::server::{ServerHandle, ServerOptions};

        #[derive(Default)]
        struct Messages(Mutex<Vec<String>>);

        impl Notifier for Messages {
            fn warning(&self, message: &str) {
                self.0.lock().unwrap().push(message.into());
            }
            fn success(&self, message: &str) {
                self.0.lock().unwrap().push(message.into());
            }
            fn error(&self, message: &str) {
                self.0.lock().unwrap().push(message.into());
            }
        }

        struct NoNavigation;

        impl Navigator for NoNavigation {
            fn back(&self) {}
            fn navigate(&self, _route: &str) {}
        }

        async fn start(dir: &std::path::Path) -> (ServerHandle, String) {
            let mut config = AppConfig::default();
            config.server.host = "127.0.0.1".into();
            config.server.port = 0;
            config.database.url = "sqlite::memory:".into();
            config.storage.upload_dir = dir.to_path_buf();
            let handle = ServerHandle::start(ServerOptions {
                config,
                auto_migrate: true,
            })
            .await
            .unwrap();
            let base = format!("http://{}", handle.local_addr);
            (handle, base)
        }

        async fn sign_up(base: &str) -> LoginGrant {
            let status = reqwest::Client::new()
                .post(format!("{}/api/v1/hoteliers", base))
                .json(&serde_json::json!({
                    "name": "Pousada Mar Azul",
                    "email": "contato@marazul.com.br",
                    "username": "marazul",
                    "password": "segredo123"
                }))
                .send()
                .await
                .unwrap()
                .status();
            assert_eq!(status.as_u16(), 201);

            HttpReservationApi::new(base)
                .login("marazul", "segredo123")
                .await
                .unwrap()
        }

        fn form(rooms: &str) -> PublishForm {
            let mut form = PublishForm::new();
            form.set_field(FormField::Name, "Suite Vista Mar");
            form.set_field(FormField::Rooms, rooms);
            form.set_field(FormField::People, "2");
            form.set_field(FormField::Price, "150,50");
            form.select_image(Some(ImageFile::new(
                "quarto.png",
                "image/png",
                b"\x89PNG".to_vec(),
            )));
            form
        }

        #[tokio::test]
        async fn publishes_listing_and_image() {
            let dir = tempfile::tempdir().unwrap();
            let (handle, base) = start(dir.path()).await;
            let grant = sign_up(&base).await;

            let api = HttpReservationApi::new(&base).with_token(grant.token);
            let messages = Arc::new(Messages::default());
            let workflow = PublishWorkflow::new(
                Arc::new(api),
                Arc::new(StaticSession::signed_in(grant.hotelier_id)),
                messages.clone(),
                Arc::new(NoNavigation),
            );

            let PublishOutcome::Published { reservation_id, navigation } =
                workflow.publish(&form("1")).await
            else {
                panic!("publish failed: {:?}", messages.0.lock().unwrap());
            };
            navigation.abort();

            let image = reqwest::get(format!(
                "{}/api/v1/published-reservations/{}/image",
                base, reservation_id
            ))
            .await
            .unwrap()
            .bytes()
            .await
            .unwrap();
            assert_eq!(&image[..], b"\x89PNG");

            handle.shutdown().await;
        }

        #[tokio::test]
        async fn server_rejection_message_reaches_the_notifier() {
            let dir = tempfile::tempdir().unwrap();
            let (handle, base) = start(dir.path()).await;
            let grant = sign_up(&base).await;

            let messages = Arc::new(Messages::default());
            let workflow = PublishWorkflow::new(
                Arc::new(HttpReservationApi::new(&base).with_token(grant.token)),
                Arc::new(StaticSession::signed_in(grant.hotelier_id)),
                messages.clone(),
                Arc::new(NoNavigation),
            );

            let outcome = workflow.publish(&form("0")).await;
            let PublishOutcome::Failed(ApiError::Server { status, message }) = outcome else {
                panic!("expected server rejection, got {:?}", outcome);
            };
            assert_eq!(status, 422);
            assert_eq!(message, "rooms: rooms must be at least 1");
            assert_eq!(messages.0.lock().unwrap().as_slice(), [message]);

            handle.shutdown().await;
        }

        #[tokio::test]
        async fn missing_token_is_a_server_error() {
            let dir = tempfile::tempdir().unwrap();
            let (handle, base) = start(dir.path()).await;

            let err = HttpReservationApi::new(&base)
                .upload_image(1, &ImageFile::new("a.png", "image/png", vec![1]))
                .await
                .unwrap_err();
            assert_eq!(
                err,
                ApiError::Server {
                    status: 401,
                    message: "Missing authentication token".into()
                }
            );

            handle.shutdown().await;
        }
    }
}
