//! DTOs for labubu_sea adapter.

/// DTO for inserting a labubu row.
#[derive(Debug, Clone)]
pub struct LabubuCreate {
    pub text: String,
}

impl LabubuCreate {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}
