//! Plain-text greeting served at the site root.

use actix_web::{HttpResponse, get};

/// Body returned by the greeting route.
pub const GREETING: &str = "Hello World!";

/// Greeting used by humans and simple uptime checks.
#[utoipa::path(
    get,
    path = "/",
    tags = ["health"],
    security([]),
    responses(
        (status = 200, description = "Greeting", body = String, content_type = "text/plain")
    )
)]
#[get("/")]
pub async fn hello() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/plain; charset=utf-8")
        .body(GREETING)
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{App, test as actix_test};
    use rstest::rstest;

    #[rstest]
    #[actix_web::test]
    async fn root_returns_greeting() {
        let app = actix_test::init_service(App::new().service(hello)).await;

        let response =
            actix_test::call_service(&app, actix_test::TestRequest::get().uri("/").to_request())
                .await;

        assert!(response.status().is_success());
        let body = actix_test::read_body(response).await;
        assert_eq!(body.as_ref(), GREETING.as_bytes());
    }
}
