use crate::catalog::identity::{ServiceCategory, SubCategory};
use crate::catalog::model::ServiceDefinition;

/// Optional criteria for listing services. An empty filter matches everything.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ServiceFilter {
    pub category: Option<ServiceCategory>,
    pub sub_category: Option<SubCategory>,
    /// Case-insensitive substring of the name or description.
    pub query: Option<String>,
}

impl ServiceFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn category(mut self, category: ServiceCategory) -> Self {
        self.category = Some(category);
        self
    }

    pub fn sub_category(mut self, sub_category: SubCategory) -> Self {
        self.sub_category = Some(sub_category);
        self
    }

    /// Blank queries are ignored, as the search box does when cleared.
    pub fn query(mut self, query: impl Into<String>) -> Self {
        let query = query.into();
        self.query = if query.trim().is_empty() { None } else { Some(query) };
        self
    }

    pub fn matches(&self, service: &ServiceDefinition) -> bool {
        if let Some(category) = self.category {
            if service.category != category {
                return false;
            }
        }
        if let Some(sub_category) = &self.sub_category {
            if &service.sub_category != sub_category {
                return false;
            }
        }
        match self.query.as_deref().map(str::trim) {
            Some(query) if !query.is_empty() => {
                let query = query.to_lowercase();
                service.name.to_lowercase().contains(&query)
                    || service.description.to_lowercase().contains(&query)
            }
            _ => true,
        }
    }
}
