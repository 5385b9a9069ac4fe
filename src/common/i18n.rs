// src/common/i18n.rs

use std::{collections::HashMap, sync::{Arc, LazyLock}};

pub const DEFAULT_LANG: &str = "pt";

// Os arquivos de tradução vão embutidos no binário
const LOCALES: &[(&str, &str)] = &[
    ("pt", include_str!("../../locales/pt.json")),
    ("en", include_str!("../../locales/en.json")),
];

static GLOBAL: LazyLock<I18nStore> = LazyLock::new(|| {
    I18nStore::load().unwrap_or_else(|e| {
        tracing::error!("🔥 Falha ao carregar traduções: {}", e);
        I18nStore::empty()
    })
});

/// Mensagens traduzidas, indexadas por idioma e chave.
#[derive(Clone, Debug)]
pub struct I18nStore {
    messages: Arc<HashMap<String, HashMap<String, String>>>,
}

impl I18nStore {
    pub fn load() -> anyhow::Result<Self> {
        let mut messages = HashMap::new();
        for (lang, raw) in LOCALES {
            let table: HashMap<String, String> = serde_json::from_str(raw)
                .map_err(|e| anyhow::anyhow!("locales/{}.json inválido: {}", lang, e))?;
            messages.insert(lang.to_string(), table);
        }
        Ok(Self { messages: Arc::new(messages) })
    }

    fn empty() -> Self {
        Self { messages: Arc::new(HashMap::new()) }
    }

    pub fn global() -> &'static I18nStore {
        &GLOBAL
    }

    /// Busca no idioma pedido, depois no padrão; sem tradução devolve a própria chave.
    pub fn translate<'a>(&'a self, lang: &str, key: &'a str) -> &'a str {
        self.messages
            .get(lang)
            .and_then(|table| table.get(key))
            .or_else(|| self.messages.get(DEFAULT_LANG).and_then(|table| table.get(key)))
            .map(String::as_str)
            .unwrap_or(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_key_exists_in_both_languages() {
        let store = I18nStore::load().unwrap();
        let pt = &store.messages["pt"];
        let en = &store.messages["en"];
        for key in pt.keys() {
            assert!(en.contains_key(key), "falta '{}' em en.json", key);
        }
        assert_eq!(pt.len(), en.len());
    }

    #[test]
    fn unknown_language_falls_back_to_portuguese() {
        let store = I18nStore::load().unwrap();
        assert_eq!(store.translate("de", "empresa"), "Empresa");
    }

    #[test]
    fn unknown_key_is_returned_as_is() {
        let store = I18nStore::load().unwrap();
        assert_eq!(store.translate("en", "chave_inexistente"), "chave_inexistente");
    }
}
