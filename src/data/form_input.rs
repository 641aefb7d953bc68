/// The raw `name=value` pairs of a submitted form, in submission order.
///
/// Kept as pairs rather than a map so repeated names (checkbox groups) survive.
#[derive(Debug, Clone, Default)]
pub struct FormInput(Vec<(String, String)>);

impl FormInput {
    /// Trimmed value of the first field called `name`, empty when absent.
    pub fn get(&self, name: &str) -> &str {
        self.0
            .iter()
            .find(|(key, _)| key == name)
            .map_or("", |(_, value)| value.trim())
    }

    /// Like [`FormInput::get`] but `None` for absent or blank fields.
    pub fn non_blank(&self, name: &str) -> Option<&str> {
        Some(self.get(name)).filter(|value| !value.is_empty())
    }

    pub fn all<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.0
            .iter()
            .filter(move |(key, _)| key == name)
            .map(|(_, value)| value.trim())
    }

    /// The fields named `{prefix}{something}`, with the prefix stripped.
    pub fn scoped(&self, prefix: &str) -> Self {
        Self(
            self.0
                .iter()
                .filter_map(|(key, value)| {
                    key.strip_prefix(prefix)
                        .map(|stripped| (stripped.to_string(), value.clone()))
                })
                .collect(),
        )
    }
}

impl From<Vec<(String, String)>> for FormInput {
    fn from(pairs: Vec<(String, String)>) -> Self {
        Self(pairs)
    }
}

impl<const N: usize> From<[(&str, &str); N]> for FormInput {
    fn from(pairs: [(&str, &str); N]) -> Self {
        Self(
            pairs
                .into_iter()
                .map(|(key, value)| (key.to_string(), value.to_string()))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_trims_and_defaults_to_empty() {
        let input = FormInput::from([("nome", "  Ana  "), ("email", "")]);
        assert_eq!(input.get("nome"), "Ana");
        assert_eq!(input.get("email"), "");
        assert_eq!(input.get("missing"), "");
        assert_eq!(input.non_blank("email"), None);
        assert_eq!(input.non_blank("nome"), Some("Ana"));
    }

    #[test]
    fn repeated_names_are_kept() {
        let input = FormInput::from([
            ("disciplinas_ids", "1"),
            ("nome", "Ana"),
            ("disciplinas_ids", "4"),
        ]);
        assert_eq!(input.all("disciplinas_ids").collect::<Vec<_>>(), ["1", "4"]);
    }

    #[test]
    fn scoped_strips_prefix() {
        let input = FormInput::from([
            ("nome", "Ana"),
            ("endereco_info.cidade", "Recife"),
            ("endereco_info.estado", "pe"),
        ]);
        let address = input.scoped("endereco_info.");
        assert_eq!(address.get("cidade"), "Recife");
        assert_eq!(address.get("estado"), "pe");
        assert_eq!(address.get("nome"), "");
    }
}
