//! Main page

use axum::response::Html;

/// GET / - the upload page
pub async fn index() -> Html<&'static str> {
    Html(include_str!("../../assets/index.html"))
}
