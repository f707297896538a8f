use axum::response::Html;

/// GET /
/// Serves the resume upload form. The page posts back to `/api/analyze-resume`.
pub async fn upload_form_handler() -> Html<&'static str> {
    Html(include_str!("upload_form.html"))
}
