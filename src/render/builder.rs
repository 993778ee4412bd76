//! Folding rendered variables into a request.
//!
//! [`RequestBuilder::render`] walks every type declared in a collection, asks
//! the [`Renderer`] for the matching base-level variables, and folds them into
//! a fresh [`RenderedRequest`]. Nothing is shared between renders.

use super::base::BaseVariable;
use super::error::RenderError;
use super::renderer::Renderer;
use crate::models::request::{HttpMethod, RenderedRequest};
use crate::variables::VariableCollection;
use log::debug;

/// Builds requests for one endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestBuilder {
    endpoint_url: String,
    method: Option<HttpMethod>,
}

impl RequestBuilder {
    /// Creates a builder for the given endpoint URL (without query string).
    pub fn new(endpoint_url: impl Into<String>) -> Self {
        Self {
            endpoint_url: endpoint_url.into(),
            method: None,
        }
    }

    /// Fixes the HTTP method. Without one, requests with a body are sent as
    /// `POST` and all others as `GET`.
    pub fn with_method(mut self, method: Option<HttpMethod>) -> Self {
        self.method = method;
        self
    }

    pub fn endpoint_url(&self) -> &str {
        &self.endpoint_url
    }

    /// Renders every variable type of `variables` into a new request.
    ///
    /// # Arguments
    ///
    /// * `variables` - The filled collection; each of its `types()` is rendered once
    /// * `renderer` - Maps a type and its members to base-level variables
    ///
    /// # Returns
    ///
    /// The folded request with its method resolved, or the first error the
    /// renderer reports. No partially rendered request is ever returned.
    pub fn render(
        &self,
        variables: &VariableCollection,
        renderer: &dyn Renderer,
    ) -> Result<RenderedRequest, RenderError> {
        let mut request = RenderedRequest::new(format!("{}?", self.endpoint_url));

        for var_type in variables.types() {
            let members = variables.vals(&var_type);
            let rendered = renderer.render(&var_type, &members)?;
            debug!(
                "rendered {} variable(s) of type '{}' into {} base variable(s)",
                members.len(),
                var_type,
                rendered.len()
            );
            request = rendered.into_iter().fold(request, fold);
        }

        request.method = self.method.unwrap_or_else(|| request.inferred_method());
        Ok(request)
    }
}

/// Folds one base-level variable into a request.
///
/// - `UrlParam` appends `name=value&`; repeated names all stay.
/// - `Header` replaces any header of the same name.
/// - `UrlReplacement` replaces every literal `{name}` in the URL.
/// - `Data` sets the body and its Content-Type, replacing any earlier body.
pub fn fold(mut request: RenderedRequest, variable: BaseVariable) -> RenderedRequest {
    match variable {
        BaseVariable::UrlParam { name, value } => {
            request.url.push_str(&format!("{}={}&", name, value));
        }
        BaseVariable::Header { name, value } => {
            request.set_header(name, value);
        }
        BaseVariable::UrlReplacement { name, value } => {
            request.url = request.url.replace(&format!("{{{}}}", name), &value);
        }
        BaseVariable::Data { value, mimetype } => {
            request.data = Some(value);
            match mimetype {
                Some(mimetype) => request.set_header("Content-Type".to_string(), mimetype),
                None => request.remove_header("Content-Type"),
            }
        }
    }
    request
}
