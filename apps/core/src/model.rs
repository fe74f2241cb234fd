#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppEntry {
    pub name: String,
    pub exec: String,
    normalized_name: String,
}

impl AppEntry {
    pub fn new(name: &str, exec: &str) -> Self {
        Self::from_owned(name.to_string(), exec.to_string())
    }

    pub fn from_owned(name: String, exec: String) -> Self {
        let normalized_name = normalize_for_match(&name);
        Self {
            name,
            exec,
            normalized_name,
        }
    }

    pub fn normalized_name(&self) -> &str {
        &self.normalized_name
    }
}

pub fn normalize_for_match(input: &str) -> String {
    input.chars().flat_map(|c| c.to_lowercase()).collect()
}
