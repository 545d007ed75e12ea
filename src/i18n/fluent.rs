// SPDX-License-Identifier: MPL-2.0
use crate::config::Config;
use fluent_bundle::{FluentArgs, FluentBundle, FluentResource, FluentValue};
use rust_embed::RustEmbed;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use unic_langid::LanguageIdentifier;

#[derive(RustEmbed)]
#[folder = "assets/i18n/"]
struct Asset;

const DEFAULT_LOCALE: &str = "en-US";

pub struct I18n {
    bundles: HashMap<LanguageIdentifier, FluentBundle<FluentResource>>,
    pub available_locales: Vec<LanguageIdentifier>,
    current_locale: LanguageIdentifier,
}

impl Default for I18n {
    fn default() -> Self {
        Self::new(None, None, &Config::default())
    }
}

impl std::fmt::Debug for I18n {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("I18n")
            .field("available_locales", &self.available_locales)
            .field("current_locale", &self.current_locale)
            .finish()
    }
}

impl I18n {
    /// Loads the embedded translations, then the `.ftl` files of `i18n_dir`
    /// (which take precedence), and resolves the starting locale.
    pub fn new(cli_lang: Option<String>, i18n_dir: Option<String>, config: &Config) -> Self {
        let mut i18n = Self {
            bundles: HashMap::new(),
            available_locales: Vec::new(),
            current_locale: default_locale(),
        };

        for file in Asset::iter() {
            let filename = file.as_ref();
            if let Some(content) = Asset::get(filename) {
                let source = String::from_utf8_lossy(content.data.as_ref()).into_owned();
                i18n.add_source(filename, source);
            }
        }

        if let Some(dir) = i18n_dir {
            i18n.load_directory(Path::new(&dir));
        }

        i18n.available_locales.sort_by_key(|locale| locale.to_string());
        if let Some(locale) = resolve_locale(cli_lang, config, &i18n.available_locales) {
            i18n.current_locale = locale;
        }
        i18n
    }

    fn load_directory(&mut self, dir: &Path) {
        let entries = match fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(err) => {
                tracing::warn!(dir = %dir.display(), %err, "cannot read translation directory");
                return;
            }
        };
        for entry in entries.flatten() {
            let path = entry.path();
            let Some(filename) = path.file_name().and_then(|name| name.to_str()) else {
                continue;
            };
            match fs::read_to_string(&path) {
                Ok(source) => self.add_source(filename, source),
                Err(err) => {
                    tracing::warn!(path = %path.display(), %err, "cannot read translation file")
                }
            }
        }
    }

    /// Adds one `<locale>.ftl` file. Messages already known for that locale
    /// are replaced.
    fn add_source(&mut self, filename: &str, source: String) {
        let Some(locale) = filename
            .strip_suffix(".ftl")
            .and_then(|stem| stem.parse::<LanguageIdentifier>().ok())
        else {
            return;
        };

        let resource = match FluentResource::try_new(source) {
            Ok(resource) => resource,
            Err((resource, errors)) => {
                tracing::warn!(file = filename, errors = errors.len(), "translation file has syntax errors");
                resource
            }
        };

        let bundle = self.bundles.entry(locale.clone()).or_insert_with(|| {
            let mut bundle = FluentBundle::new(vec![locale.clone()]);
            bundle.set_use_isolating(false);
            bundle
        });
        bundle.add_resource_overriding(resource);

        if !self.available_locales.contains(&locale) {
            self.available_locales.push(locale);
        }
    }

    pub fn set_locale(&mut self, locale: LanguageIdentifier) {
        if self.bundles.contains_key(&locale) {
            self.current_locale = locale;
        }
    }

    #[must_use]
    pub fn current_locale(&self) -> &LanguageIdentifier {
        &self.current_locale
    }

    pub fn tr(&self, key: &str) -> String {
        self.format(key, None)
    }

    /// Translates `key`, substituting each `{ $name }` placeholder.
    pub fn tr_with_args(&self, key: &str, args: &[(&str, &str)]) -> String {
        let mut fluent_args = FluentArgs::new();
        for (name, value) in args {
            fluent_args.set(*name, FluentValue::from(value.to_string()));
        }
        self.format(key, Some(&fluent_args))
    }

    fn format(&self, key: &str, args: Option<&FluentArgs>) -> String {
        if let Some(bundle) = self.bundles.get(&self.current_locale) {
            if let Some(pattern) = bundle.get_message(key).and_then(|msg| msg.value()) {
                let mut errors = vec![];
                let value = bundle.format_pattern(pattern, args, &mut errors);
                if errors.is_empty() {
                    return value.into_owned();
                }
                tracing::debug!(key, ?errors, "translation formatting failed");
            }
        }
        format!("MISSING: {}", key)
    }
}

fn default_locale() -> LanguageIdentifier {
    DEFAULT_LOCALE.parse().unwrap_or_default()
}

fn parse_available(value: &str, available: &[LanguageIdentifier]) -> Option<LanguageIdentifier> {
    let lang = value.parse::<LanguageIdentifier>().ok()?;
    if available.contains(&lang) {
        return Some(lang);
    }
    // "pt_BR.UTF-8" style OS locales and bare languages ("es-MX" -> "es").
    available
        .iter()
        .find(|candidate| candidate.language == lang.language && candidate.region == lang.region)
        .or_else(|| {
            available
                .iter()
                .find(|candidate| candidate.language == lang.language)
        })
        .cloned()
}

fn resolve_locale(
    cli_lang: Option<String>,
    config: &Config,
    available: &[LanguageIdentifier],
) -> Option<LanguageIdentifier> {
    if let Some(lang) = cli_lang.and_then(|value| parse_available(&value, available)) {
        return Some(lang);
    }

    if let Some(lang) = config
        .general
        .language
        .as_deref()
        .and_then(|value| parse_available(value, available))
    {
        return Some(lang);
    }

    if let Some(lang) = sys_locale::get_locale().and_then(|value| {
        let normalized = value.split('.').next().unwrap_or_default().replace('_', "-");
        parse_available(&normalized, available)
    }) {
        return Some(lang);
    }

    Some(default_locale()).filter(|lang| available.contains(lang))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn locales(values: &[&str]) -> Vec<LanguageIdentifier> {
        values.iter().map(|value| value.parse().unwrap()).collect()
    }

    #[test]
    fn cli_language_wins_over_config() {
        let mut config = Config::default();
        config.general.language = Some("es".to_string());
        let available = locales(&["en-US", "es", "pt-BR"]);
        let lang = resolve_locale(Some("pt-BR".to_string()), &config, &available);
        assert_eq!(lang, Some("pt-BR".parse().unwrap()));
    }

    #[test]
    fn config_language_used_without_cli() {
        let mut config = Config::default();
        config.general.language = Some("es".to_string());
        let available = locales(&["en-US", "es"]);
        assert_eq!(
            resolve_locale(None, &config, &available),
            Some("es".parse().unwrap())
        );
    }

    #[test]
    fn unknown_cli_language_falls_through() {
        let mut config = Config::default();
        config.general.language = Some("es".to_string());
        let available = locales(&["en-US", "es"]);
        assert_eq!(
            resolve_locale(Some("xx".to_string()), &config, &available),
            Some("es".parse().unwrap())
        );
    }

    #[test]
    fn regional_variant_maps_to_base_language() {
        let available = locales(&["en-US", "es", "pt-BR"]);
        assert_eq!(
            parse_available("es-MX", &available),
            Some("es".parse().unwrap())
        );
        assert_eq!(
            parse_available("pt", &available),
            Some("pt-BR".parse().unwrap())
        );
    }

    #[test]
    fn resolution_always_yields_an_available_locale() {
        let available = locales(&["en-US", "es"]);
        let lang = resolve_locale(None, &Config::default(), &available);
        assert!(lang.map_or(false, |lang| available.contains(&lang)));
    }

    #[test]
    fn embedded_locales_are_available() {
        let i18n = I18n::new(Some("en-US".to_string()), None, &Config::default());
        for locale in ["en-US", "es", "pt-BR"] {
            let locale: LanguageIdentifier = locale.parse().unwrap();
            assert!(i18n.available_locales.contains(&locale), "{locale} missing");
        }
        assert_eq!(i18n.tr("app-title"), "Ollama Chatbot");
    }

    #[test]
    fn set_locale_switches_translations() {
        let mut i18n = I18n::new(Some("en-US".to_string()), None, &Config::default());
        i18n.set_locale("es".parse().unwrap());
        assert_eq!(i18n.current_locale().to_string(), "es");
        assert_eq!(i18n.tr("send-button"), "Enviar");

        i18n.set_locale("xx".parse().unwrap());
        assert_eq!(i18n.current_locale().to_string(), "es");
    }

    #[test]
    fn missing_key_is_marked() {
        let i18n = I18n::new(Some("en-US".to_string()), None, &Config::default());
        assert_eq!(i18n.tr("no-such-key"), "MISSING: no-such-key");
    }

    #[test]
    fn arguments_are_interpolated() {
        let i18n = I18n::new(Some("en-US".to_string()), None, &Config::default());
        assert_eq!(
            i18n.tr_with_args("confirm-delete-source", &[("source", "manual.pdf")]),
            "Are you sure you want to delete source: manual.pdf?"
        );
    }

    #[test]
    fn external_directory_overrides_embedded_messages() {
        let dir = tempdir().expect("create temp dir");
        std::fs::write(dir.path().join("en-US.ftl"), "send-button = Go\n").unwrap();
        std::fs::write(dir.path().join("fr.ftl"), "send-button = Envoyer\n").unwrap();

        let i18n = I18n::new(
            Some("en-US".to_string()),
            Some(dir.path().to_string_lossy().into_owned()),
            &Config::default(),
        );
        assert_eq!(i18n.tr("send-button"), "Go");
        assert_eq!(i18n.tr("stop-button"), "Stop");
        assert!(i18n.available_locales.contains(&"fr".parse().unwrap()));
    }
}
