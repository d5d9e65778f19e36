use axum::response::Html;

const LANDING_PAGE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>Drinks API</title>
</head>
<body>
  <h1>Drinks API</h1>
  <p>Search the cocktail catalog and try out mock drink mutations.</p>
  <ul>
    <li><code>GET /drinks?search=margarita</code></li>
    <li><code>GET /drinks/random</code></li>
    <li><code>POST /drinks</code> (API key with <code>write</code>)</li>
    <li><code>PATCH /drinks/{id}</code> (API key with <code>write</code>)</li>
    <li><code>DELETE /drinks/{id}</code> (API key with <code>delete</code>)</li>
    <li><code>POST /auth/token</code></li>
    <li><code>GET /auth/users</code> (token, admin or moderator)</li>
  </ul>
  <p>Authenticate with <code>Authorization: Bearer &lt;api key or token&gt;</code>.</p>
</body>
</html>
"#;

/// `GET /`
pub async fn index() -> Html<&'static str> {
    Html(LANDING_PAGE)
}
