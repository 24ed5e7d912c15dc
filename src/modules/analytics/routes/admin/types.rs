pub mod request {
    use serde::Deserialize;

    #[derive(Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Filters {
        pub start_date: Option<String>,
        pub end_date: Option<String>,
        pub interval: Option<String>,
        pub status: Option<String>,
        pub payment_methods: Option<String>,
        pub categories: Option<String>,
        pub sellers: Option<String>,
    }

    pub struct Payload {
        pub filters: Filters,
    }
}

pub mod response {
    use crate::modules::analytics::engine::report::Report;
    use axum::{extract::Json, http::StatusCode, response::IntoResponse};
    use serde_json::json;

    pub enum Success {
        Report(Box<Report>),
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::Report(report) => (
                    StatusCode::OK,
                    Json(json!({ "success": true, "data": report })),
                )
                    .into_response(),
            }
        }
    }

    pub enum Error {
        FailedToLoadAnalytics,
    }

    impl IntoResponse for Error {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::FailedToLoadAnalytics => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "success": false, "message": "Failed to load analytics" })),
                )
                    .into_response(),
            }
        }
    }

    pub type Response = Result<Success, Error>;
}
