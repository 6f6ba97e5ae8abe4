/// Static AWS credentials plus the region the API lives in.
///
/// Values are opaque: nothing here checks key or region syntax, a bad value
/// only surfaces once the first request is rejected.
#[derive(Clone)]
pub struct Credentials {
    pub access_key: String,
    pub secret_key: String,
    pub region: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("access_key", &self.access_key)
            .field("secret_key", &"<redacted>")
            .field("region", &self.region)
            .finish()
    }
}

/// One page of `ListTypes`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypePage {
    pub types: Vec<String>,
    /// `None` on the last page.
    pub next_token: Option<String>,
}

/// A resolver attached to `(type, field)` with its two VTL bodies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolver {
    pub field_name: String,
    pub request_mapping_template: String,
    pub response_mapping_template: String,
}

impl Resolver {
    pub fn new(
        field_name: impl Into<String>,
        request_mapping_template: impl Into<String>,
        response_mapping_template: impl Into<String>,
    ) -> Self {
        Self {
            field_name: field_name.into(),
            request_mapping_template: request_mapping_template.into(),
            response_mapping_template: response_mapping_template.into(),
        }
    }
}

/// One page of `ListResolvers` for a single type.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolverPage {
    pub resolvers: Vec<Resolver>,
    pub next_token: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_output_hides_secret_key() {
        let credentials = Credentials {
            access_key: "AKIAEXAMPLE".into(),
            secret_key: "wJalrXUtnFEMI".into(),
            region: "eu-central-1".into(),
        };

        let rendered = format!("{credentials:?}");
        assert!(rendered.contains("AKIAEXAMPLE"));
        assert!(rendered.contains("eu-central-1"));
        assert!(!rendered.contains("wJalrXUtnFEMI"));
    }
}
