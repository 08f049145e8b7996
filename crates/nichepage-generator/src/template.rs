//! Landing page template filling.
//!
//! Provides a lightweight placeholder substitution rather than a template
//! engine. Placeholders are literal `{{NAME}}` tokens; tokens without a value
//! in the context are left in place.

use std::collections::HashMap;

/// Placeholder for the document title.
pub const TITLE_TOKEN: &str = "TITLE";

/// Placeholder for the meta description.
pub const DESCRIPTION_TOKEN: &str = "DESCRIPTION";

/// Placeholder for the page heading.
pub const H1_TOKEN: &str = "H1";

/// Placeholder for the rendered product cards.
pub const PRODUCT_CARDS_TOKEN: &str = "PRODUCT_CARDS";

/// All placeholders a landing page template may use.
pub const PLACEHOLDERS: &[&str] = &[TITLE_TOKEN, DESCRIPTION_TOKEN, H1_TOKEN, PRODUCT_CARDS_TOKEN];

/// Template context with variables for interpolation.
#[derive(Debug, Clone, Default)]
pub struct TemplateContext {
    variables: HashMap<String, String>,
}

impl TemplateContext {
    /// Create a new empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a variable into the context.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.variables.insert(key.into(), value.into());
    }

    /// Create context with initial variables.
    pub fn with_var(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    /// Get a variable value.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.variables.get(key).map(String::as_str)
    }
}

/// A template document with `{{NAME}}` placeholders.
#[derive(Debug, Clone)]
pub struct Template {
    content: String,
}

impl Template {
    /// Create a template from its source text.
    #[must_use]
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }

    /// Placeholders from [`PLACEHOLDERS`] that the template never mentions.
    #[must_use]
    pub fn missing_placeholders(&self) -> Vec<&'static str> {
        PLACEHOLDERS
            .iter()
            .copied()
            .filter(|name| !self.content.contains(&format!("{{{{{name}}}}}")))
            .collect()
    }

    /// Render the template with the given context.
    ///
    /// Every occurrence of a known placeholder is replaced. Substituted text is
    /// never rescanned, so values containing `{{...}}` are emitted verbatim.
    #[must_use]
    pub fn render(&self, context: &TemplateContext) -> String {
        let mut result = self.content.clone();
        let mut pos = 0;

        while let Some(start) = result[pos..].find("{{") {
            let start = pos + start;
            let Some(end) = result[start + 2..].find("}}") else {
                break;
            };
            let end = start + 2 + end + 2;

            match context.get(&result[start + 2..end - 2]) {
                Some(value) => {
                    let value = value.to_string();
                    result.replace_range(start..end, &value);
                    pos = start + value.len();
                }
                None => pos = start + 1,
            }
        }

        result
    }
}

/// Substitution values for a niche's landing page.
#[must_use]
pub fn page_context(niche: &str, cards_html: &str, year: i32) -> TemplateContext {
    let display = title_case(niche.trim());

    TemplateContext::new()
        .with_var(TITLE_TOKEN, format!("Top {display} ({year})"))
        .with_var(
            DESCRIPTION_TOKEN,
            format!(
                "Best {} — curated picks with specs and links.",
                display.to_lowercase()
            ),
        )
        .with_var(H1_TOKEN, format!("Best {display} in {year}"))
        .with_var(PRODUCT_CARDS_TOKEN, cards_html)
}

/// Fill a landing page template for `niche`.
#[must_use]
pub fn fill(template: &str, niche: &str, cards_html: &str, year: i32) -> String {
    Template::new(template).render(&page_context(niche, cards_html, year))
}

/// Capitalize the first letter of every word and lower-case the rest.
///
/// Any character other than a letter, digit or apostrophe starts a new word,
/// so `t-shirts` becomes `T-Shirts` while `men's` stays `Men's`.
#[must_use]
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut at_word_start = true;

    for c in text.chars() {
        if !c.is_alphanumeric() && c != '\'' {
            at_word_start = true;
            out.push(c);
        } else if at_word_start {
            out.extend(c.to_uppercase());
            at_word_start = false;
        } else {
            out.extend(c.to_lowercase());
        }
    }

    out
}

/// Built-in landing page template written by `nichepage init`.
pub const DEFAULT_INDEX_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{{TITLE}}</title>
    <meta name="description" content="{{DESCRIPTION}}">
    <link rel="stylesheet" href="style.css">
</head>
<body>
    <header>
        <h1>{{H1}}</h1>
        <p class="disclosure">As an Amazon Associate we earn from qualifying purchases.</p>
    </header>
    <main class="grid">
        {{PRODUCT_CARDS}}
    </main>
    <footer>
        <p>Prices and availability are accurate as of the date indicated and are subject to change.</p>
    </footer>
</body>
</html>
"#;

/// Stylesheet shipped alongside [`DEFAULT_INDEX_TEMPLATE`].
pub const DEFAULT_STYLESHEET: &str = r#":root {
    --color-bg: #F8FAFC;
    --color-card: #FFFFFF;
    --color-text: #1E293B;
    --color-muted: #64748B;
    --color-cta: #F97316;
    --color-cta-hover: #EA580C;
    --color-border: #E2E8F0;
}

* { box-sizing: border-box; margin: 0; padding: 0; }

body {
    font-family: system-ui, -apple-system, sans-serif;
    line-height: 1.6;
    color: var(--color-text);
    background-color: var(--color-bg);
}

header, footer {
    max-width: 1100px;
    margin: 0 auto;
    padding: 2rem 1.5rem 1rem;
}

h1 { font-size: 2rem; margin-bottom: 0.5rem; }

.disclosure, footer p {
    font-size: 0.8125rem;
    color: var(--color-muted);
}

.grid {
    max-width: 1100px;
    margin: 0 auto;
    padding: 1rem 1.5rem;
    display: grid;
    grid-template-columns: repeat(auto-fill, minmax(240px, 1fr));
    gap: 1.25rem;
}

.card {
    display: flex;
    flex-direction: column;
    gap: 0.5rem;
    padding: 1rem;
    background-color: var(--color-card);
    border: 1px solid var(--color-border);
    border-radius: 0.75rem;
}

.card img {
    width: 100%;
    height: 200px;
    object-fit: contain;
}

.card h3 { font-size: 1rem; font-weight: 600; }

.price { font-size: 1.125rem; font-weight: 700; }

.badge {
    display: inline-block;
    padding: 0.125rem 0.5rem;
    font-size: 0.75rem;
    border-radius: 9999px;
    background-color: var(--color-bg);
    border: 1px solid var(--color-border);
}

.btn {
    margin-top: auto;
    padding: 0.5rem 1rem;
    text-align: center;
    color: white;
    background-color: var(--color-cta);
    border-radius: 0.5rem;
    text-decoration: none;
}

.btn:hover { background-color: var(--color-cta-hover); }
"#;
