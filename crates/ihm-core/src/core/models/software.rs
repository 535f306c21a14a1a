/// A piece of software used while building the model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Software {
    pub name: String,
    pub classification: String,
    pub description: String,
    pub location: String,
    pub software_type: String,
    pub version: Option<String>,
}

impl Software {
    pub fn new(name: &str, classification: &str, description: &str, location: &str) -> Self {
        Self {
            name: name.to_string(),
            classification: classification.to_string(),
            description: description.to_string(),
            location: location.to_string(),
            software_type: "program".to_string(),
            version: None,
        }
    }

    pub fn with_version(mut self, version: &str) -> Self {
        self.version = Some(version.to_string());
        self
    }

    pub fn with_type(mut self, software_type: &str) -> Self {
        self.software_type = software_type.to_string();
        self
    }
}
