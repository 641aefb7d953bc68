use crate::{
    data::{Entity, FieldSpec, InputKind, SearchEndpoint, SearchMode},
    maud_conveniences::dash_if_none,
};
use maud::{Markup, html};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Address {
    pub id: i64,
    #[serde(rename = "cep")]
    pub postal_code: String,
    #[serde(rename = "endereco")]
    pub street: String,
    #[serde(rename = "bairro", default)]
    pub neighbourhood: Option<String>,
    #[serde(rename = "cidade")]
    pub city: String,
    #[serde(rename = "estado")]
    pub state: String,
    #[serde(rename = "regiao", default)]
    pub region: Option<String>,
}

/// Fields of an address as nested inside a new student.
pub const ADDRESS_FIELDS: [FieldSpec; 5] = [
    FieldSpec::text("cep", "Postal Code").required(),
    FieldSpec::text("endereco", "Street").required(),
    FieldSpec::text("bairro", "Neighbourhood"),
    FieldSpec::text("cidade", "City").required(),
    FieldSpec::state_code("estado", "State (UF)").required(),
];

impl Entity for Address {
    const SLUG: &'static str = "addresses";
    const SINGULAR: &'static str = "Address";
    const PLURAL: &'static str = "Addresses";

    const FIELDS: &'static [FieldSpec] = &[
        ADDRESS_FIELDS[0],
        ADDRESS_FIELDS[1],
        ADDRESS_FIELDS[2],
        ADDRESS_FIELDS[3],
        ADDRESS_FIELDS[4],
        FieldSpec::text("regiao", "Region").update_only(),
    ];
    const SEARCHES: &'static [SearchEndpoint] = &[
        SearchEndpoint {
            mode: SearchMode::ById,
            endpoint: "enderecos-por-id",
            input: InputKind::Number,
        },
        SearchEndpoint {
            mode: SearchMode::ByState,
            endpoint: "enderecos-por-estado",
            input: InputKind::StateCode,
        },
    ];
    const COLUMNS: &'static [&'static str] = &[
        "ID",
        "Postal Code",
        "Street",
        "Neighbourhood",
        "City",
        "State",
        "Region",
    ];

    const CREATE_ENDPOINT: &'static str = "inserir-endereco/";
    const UPDATE_ENDPOINT: &'static str = "atualizar-enderecos";
    const DELETE_ENDPOINT: &'static str = "deletar-endereco";

    fn row(&self) -> Vec<Markup> {
        vec![
            html! {(self.id)},
            html! {(self.postal_code)},
            html! {(self.street)},
            dash_if_none(self.neighbourhood.as_deref()),
            html! {(self.city)},
            html! {(self.state)},
            dash_if_none(self.region.as_deref()),
        ]
    }
}
