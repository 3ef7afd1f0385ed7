//! HTML templates for the authorize picker and the endpoint listing.

use fakesso_core::routing::Route;

/// Escape HTML special characters to prevent XSS.
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Generate the authorize page.
///
/// The form submits back to the client's `redirect_uri` with `code` and `state`
/// as query parameters. Known ids, when given, are offered as suggestions.
pub fn authorize_page(redirect_uri: &str, state: &str, known_ids: &[String]) -> String {
    let options: String = known_ids
        .iter()
        .map(|id| format!("\n            <option>{}</option>", html_escape(id)))
        .collect();

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <title>Fake SSO Sign In</title>
    <style>
        body {{
            font-family: -apple-system, BlinkMacSystemFont, sans-serif;
            max-width: 400px;
            margin: 100px auto;
            padding: 20px;
        }}
        form {{
            background: #f8f9fa;
            padding: 20px;
            border-radius: 8px;
        }}
        label {{
            display: block;
            margin-bottom: 5px;
            font-weight: 500;
        }}
        input[type="text"] {{
            width: 100%;
            padding: 10px;
            margin-bottom: 15px;
            border: 1px solid #ced4da;
            border-radius: 4px;
            box-sizing: border-box;
        }}
        button {{
            width: 100%;
            padding: 12px;
            background: #007bff;
            color: white;
            border: none;
            border-radius: 4px;
            cursor: pointer;
            font-size: 16px;
        }}
    </style>
</head>
<body>
    <form method="get" action="{redirect_uri}">
        <input type="hidden" name="state" value="{state}" />

        <label for="code">User identifier</label>
        <input type="text" id="code" name="code" list="known-users" autofocus required />
        <datalist id="known-users">{options}
        </datalist>

        <button type="submit">Sign in</button>
    </form>
</body>
</html>"#,
        redirect_uri = html_escape(redirect_uri),
        state = html_escape(state),
    )
}

/// Generate the endpoint listing served at `/`.
pub fn index_page(base_url: &str) -> String {
    let base_url = html_escape(base_url);
    let endpoints: String = [Route::Authorize, Route::Token, Route::UserInfo]
        .iter()
        .filter_map(Route::path)
        .map(|path| format!("        <li>{base_url}{path}</li>\n"))
        .collect();

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <title>Fake SSO</title>
</head>
<body>
    <ul>
{endpoints}    </ul>
</body>
</html>"#
    )
}
