use std::rc::Rc;

use dioxus::prelude::*;
use picdrop_core::AppConfig;
use picdrop_io::{AuthPanel, Authenticator, SimulatedAuthenticator, UploadArea, console};

/// Configuration baked into the binary at build time.
const CONFIG_JSON: &str = include_str!("../picdrop.json");

fn main() {
    dioxus::launch(app);
}

/// Root application component.
///
/// Loads configuration, provides the authenticator to the auth panel
/// as context, and lays out the auth panel and upload area.
fn app() -> Element {
    let config = use_hook(load_config);

    use_context_provider(|| {
        Rc::new(SimulatedAuthenticator::new(&config.auth)) as Rc<dyn Authenticator>
    });

    rsx! {
        // Stylesheet, inlined at build time.
        style { dangerous_inner_html: include_str!("../assets/picdrop.css") }

        div { class: "app",
            header { class: "app__header",
                h1 { class: "app__title", "picdrop" }
                p { class: "app__tagline", "Drop an image to preview it" }
            }

            main { class: "app__main",
                section { class: "app__panel",
                    AuthPanel {}
                }
                section { class: "app__panel",
                    UploadArea { config: config.upload.clone() }
                }
            }
        }
    }
}

/// Parse the embedded configuration, falling back to defaults.
fn load_config() -> AppConfig {
    AppConfig::from_json(CONFIG_JSON).unwrap_or_else(|e| {
        console::warn(&format!("{e}; using default configuration"));
        AppConfig::default()
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn embedded_config_is_valid() {
        let config = AppConfig::from_json(CONFIG_JSON).unwrap();
        assert!(config.upload.validate_drops);
        assert_eq!(config.upload.accept, vec!["image/*"]);
        assert!(config.auth.accounts.is_empty());
    }
}
