use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

const TEXT: &str = "text/plain";
const JSON: &str = "application/json";

/// Status code and body produced by a handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    status: StatusCode,
    content_type: &'static str,
    body: String,
}

impl Reply {
    pub fn ok<B: Into<String>>(body: B) -> Self {
        Self {
            status: StatusCode::OK,
            content_type: TEXT,
            body: body.into(),
        }
    }

    pub fn json(body: String) -> Self {
        Self {
            content_type: JSON,
            ..Self::ok(body)
        }
    }

    pub fn status(self, status: StatusCode) -> Self {
        Self { status, ..self }
    }

    pub fn status_code(&self) -> StatusCode {
        self.status
    }

    pub fn body(&self) -> &str {
        &self.body
    }
}

impl IntoResponse for Reply {
    fn into_response(self) -> Response {
        let header = [("content-type", self.content_type)];
        (self.status, header, self.body).into_response()
    }
}
