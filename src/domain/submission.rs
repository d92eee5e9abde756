/// Form fields as decoded from the request body, in submission order.
#[derive(Debug, Clone, Default)]
pub struct Submission {
    fields: Vec<(String, String)>,
}

impl Submission {
    /// Builds a submission from decoded `name=value` pairs. A repeated name
    /// keeps the position of its first occurrence and the value of its last.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut fields: Vec<(String, String)> = Vec::new();
        for (name, value) in pairs {
            match fields.iter_mut().find(|(existing, _)| *existing == name) {
                Some(field) => field.1 = value,
                None => fields.push((name, value)),
            }
        }
        Self { fields }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value.as_str())
    }

    /// The field value, or `None` when it is absent or blank.
    pub fn non_blank(&self, name: &str) -> Option<&str> {
        self.get(name).filter(|value| !value.trim().is_empty())
    }

    /// A filled honeypot field marks the submission as automated.
    pub fn is_spam(&self) -> bool {
        self.non_blank("_gotcha").is_some()
    }

    /// Required fields that are absent or empty. Whitespace counts as a value.
    pub fn missing<'a>(&self, required: &[&'a str]) -> Vec<&'a str> {
        required
            .iter()
            .copied()
            .filter(|name| self.get(name).map_or(true, str::is_empty))
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }
}
