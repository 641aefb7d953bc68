use crate::{
    api::RecordsApi, config::ApiConfig, error::RegistrarResult, maud_conveniences::render_nav,
};
use maud::{DOCTYPE, Markup, html};

/// Shared by every handler. Holds no records, only the way to reach them.
#[derive(Clone, Debug)]
pub struct RegistrarState {
    api: RecordsApi,
}

impl RegistrarState {
    pub fn new(api_config: &ApiConfig) -> RegistrarResult<Self> {
        Ok(Self {
            api: RecordsApi::new(api_config)?,
        })
    }

    pub const fn api(&self) -> &RecordsApi {
        &self.api
    }

    #[allow(clippy::unused_self, clippy::needless_pass_by_value)] //in case self is ever needed :), and to allow direct html! usage
    pub fn render(&self, markup: Markup) -> Markup {
        let nav = render_nav();

        html! {
            (DOCTYPE)
            html {
                head {
                    meta charset="UTF-8" {}
                    meta name="viewport" content="width=device-width, initial-scale=1.0" {}
                    script src="https://unpkg.com/htmx.org@2.0.4" integrity="sha384-HGfztofotfshcF7+8n44JQL2oJmowVChPTg48S+jvZoztPfvwD79OC/LTtG6dMp+" crossorigin="anonymous" {}
                    script src="https://cdn.jsdelivr.net/npm/@tailwindcss/browser@4" {}
                    title { "Registrar" }
                }
                body class="bg-gray-900 min-h-screen flex flex-row text-white" {
                    (nav)
                    main class="flex-1 p-8 flex flex-col items-center" {
                        (markup)
                    }
                }
            }
        }
    }
}
