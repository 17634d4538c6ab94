//! Server-side rendering of the single analyzer page.

use std::fmt::Write;

use super::state::{
    ViewState, EMPTY_INPUT_WARNING, NEGATIVE_MESSAGE, PENDING_MESSAGE, POSITIVE_MESSAGE,
    UNKNOWN_LABEL_NOTE,
};
use crate::classifier::{Prediction, Sentiment};

pub const PAGE_TITLE: &str = "QalAnalyzer | ቃል Analyzer";

const STYLE: &str = r#"
    body {
        background-color: #f5f7fa;
        font-family: "Noto Sans Ethiopic", "Abyssinica SIL", sans-serif;
        margin: 0;
    }
    main {
        max-width: 730px;
        margin: 0 auto;
        padding: 3rem 1rem;
    }
    .center { text-align: center; }
    h1 { color: #1a73e0; }
    h3 { color: #5f6368; }
    label { font-weight: bold; display: block; margin-bottom: 0.5rem; }
    textarea {
        width: 100%;
        height: 150px;
        box-sizing: border-box;
        font-size: 18px;
        font-family: "Noto Sans Ethiopic", sans-serif;
        padding: 0.5rem;
    }
    button {
        background-color: #1a73e0;
        color: white;
        font-size: 18px;
        padding: 10px 20px;
        border: none;
        border-radius: 6px;
        margin-top: 1rem;
        cursor: pointer;
    }
    button:disabled { opacity: 0.6; cursor: progress; }
    .alert { padding: 1rem; border-radius: 6px; margin-top: 1rem; }
    .alert.success { background-color: #e6f4ea; color: #0b8043; }
    .alert.error { background-color: #fce8e6; color: #c5221f; }
    .alert.warning { background-color: #fef7e0; color: #8a6d00; }
    .alert.info { background-color: #e8f0fe; color: #1a73e0; }
    .label { color: #0b8043; font-family: monospace; }
    .pending { margin-top: 1rem; color: #5f6368; }
"#;

// Swaps the button for the pending indicator while the request is in flight.
const PENDING_SCRIPT: &str = r#"
    document.getElementById("analyze-form").addEventListener("submit", function () {
        document.getElementById("pending").hidden = false;
        document.getElementById("analyze-button").disabled = true;
    });
"#;

/// Escapes text for use in HTML element content and quoted attributes.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Renders the full page for `state`, keeping `input` in the text area.
pub fn render(state: &ViewState, input: &str) -> String {
    let mut html = String::with_capacity(4096);
    // Writing into a String cannot fail.
    let _ = write!(
        html,
        r#"<!DOCTYPE html>
<html lang="am">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
<style>{style}</style>
</head>
<body>
<main>
<h1 class="center">🌍 {title}</h1>
<h3 class="center">🔍 Amharic Sentiment Classification using Machine Learning</h3>
<p class="center">Paste or type an Amharic sentence below to detect its sentiment!</p>
<form id="analyze-form" method="post" action="/">
<label for="text">✍️ Enter Amharic text here:</label>
<textarea id="text" name="text">{input}</textarea>
<button id="analyze-button" type="submit">🔎 Analyze Sentiment</button>
</form>
<div id="pending" class="pending" hidden>⏳ {pending}</div>
<section id="result">{result}</section>
</main>
<script>{script}</script>
</body>
</html>
"#,
        title = escape_html(PAGE_TITLE),
        style = STYLE,
        input = escape_html(input),
        pending = PENDING_MESSAGE,
        result = render_result(state),
        script = PENDING_SCRIPT,
    );
    html
}

fn render_result(state: &ViewState) -> String {
    match state {
        ViewState::Idle => String::new(),
        ViewState::Warning => alert("warning", EMPTY_INPUT_WARNING),
        ViewState::Analyzed(prediction) => render_prediction(prediction),
        ViewState::Failed(message) => alert("error", message),
    }
}

fn render_prediction(prediction: &Prediction) -> String {
    let header = format!(
        r#"<hr><h2 class="center">🧠 Predicted Sentiment: <span class="label"><code>{}</code></span></h2>"#,
        escape_html(&prediction.label.to_uppercase())
    );
    let message = match prediction.sentiment {
        Sentiment::Positive => alert("success", POSITIVE_MESSAGE),
        Sentiment::Negative => alert("error", NEGATIVE_MESSAGE),
        Sentiment::Unknown => alert("info", UNKNOWN_LABEL_NOTE),
    };
    format!(
        r#"{}<p class="center">Confidence: {:.1}%</p>{}"#,
        header,
        prediction.confidence * 100.0,
        message
    )
}

fn alert(kind: &str, message: &str) -> String {
    format!(
        r#"<div class="alert {}" role="alert">{}</div>"#,
        kind,
        escape_html(message)
    )
}
