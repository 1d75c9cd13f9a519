//! Interactive Swagger UI page for the generated document.
//!
//! The page is static; its assets come from the `swagger-ui-dist` CDN and it
//! fetches the JSON document from `/api/docs` in the browser.

/// HTML served at `/api/docs/ui`.
pub const SWAGGER_UI_HTML: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1" />
  <title>Swagger API</title>
  <link rel="stylesheet" href="https://unpkg.com/swagger-ui-dist@5/swagger-ui.css" />
</head>
<body>
  <div id="swagger-ui"></div>
  <script src="https://unpkg.com/swagger-ui-dist@5/swagger-ui-bundle.js" crossorigin></script>
  <script>
    window.onload = () => {
      window.ui = SwaggerUIBundle({ url: "/api/docs", dom_id: "#swagger-ui" });
    };
  </script>
</body>
</html>
"##;
