// src/middleware/i18n.rs

use axum::extract::FromRequestParts;
use axum::http::{header, request::Parts};

use crate::common::i18n::DEFAULT_LANG;

// Extrator de idioma a partir do Accept-Language
#[derive(Debug, Clone)]
pub struct Locale(pub String);

impl Default for Locale {
    fn default() -> Self {
        Locale(DEFAULT_LANG.to_string())
    }
}

impl<S> FromRequestParts<S> for Locale
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> Result<Self, Self::Rejection> {
        let lang = parts
            .headers
            .get(header::ACCEPT_LANGUAGE)
            .and_then(|header_value| header_value.to_str().ok())
            .and_then(|header_str| {
                accept_language::parse(header_str)
                    .first() // Pega o idioma preferido (ex: "pt-BR")
                    .map(|tag_string| {
                        // "pt-BR" -> "pt"
                        tag_string.split('-').next().unwrap_or(tag_string).to_lowercase()
                    })
            });

        Ok(lang.map(Locale).unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    async fn locale_for(header: Option<&str>) -> String {
        let mut builder = Request::builder().uri("/");
        if let Some(value) = header {
            builder = builder.header(header::ACCEPT_LANGUAGE, value);
        }
        let (mut parts, _) = builder.body(()).unwrap().into_parts();
        Locale::from_request_parts(&mut parts, &()).await.unwrap().0
    }

    #[tokio::test]
    async fn takes_primary_subtag_of_preferred_language() {
        assert_eq!(locale_for(Some("en-US,en;q=0.9,pt;q=0.8")).await, "en");
        assert_eq!(locale_for(Some("pt-BR")).await, "pt");
    }

    #[tokio::test]
    async fn missing_header_uses_portuguese() {
        assert_eq!(locale_for(None).await, "pt");
    }
}
