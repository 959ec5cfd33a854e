//! Template engine for server-rendered HTML views using Jinja2 syntax.
//!
//! Templates are compiled into the binary from the `templates/` directory
//! and rendered through a single shared minijinja environment.

use minijinja::{Environment, Value};
use std::sync::OnceLock;
use thiserror::Error;

use crate::core::error::AppError;

/// Global template environment
static TEMPLATE_ENV: OnceLock<Environment<'static>> = OnceLock::new();

/// Errors that can occur during template operations
#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("Template '{0}' not found")]
    NotFound(String),

    #[error("Failed to render template: {0}")]
    RenderError(String),
}

impl From<TemplateError> for AppError {
    fn from(e: TemplateError) -> Self {
        AppError::Internal(e.to_string())
    }
}

/// Initialize the template environment with all embedded templates
fn init_environment() -> Environment<'static> {
    let mut env = Environment::new();

    env.add_template(
        "fileserver.html",
        include_str!("../../templates/fileserver.html"),
    )
    .expect("embedded template 'fileserver.html' must parse");

    env
}

/// Get the global template environment
fn get_environment() -> &'static Environment<'static> {
    TEMPLATE_ENV.get_or_init(init_environment)
}

/// Render a template with the given context.
///
/// # Arguments
/// * `template_name` - The template file name (e.g., "fileserver.html")
/// * `ctx` - The template context, usually built with `minijinja::context!`
pub fn render_template(template_name: &str, ctx: Value) -> Result<String, TemplateError> {
    let env = get_environment();

    let template = env
        .get_template(template_name)
        .map_err(|_| TemplateError::NotFound(template_name.to_string()))?;

    template
        .render(ctx)
        .map_err(|e| TemplateError::RenderError(e.to_string()))
}
