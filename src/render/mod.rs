//! Template rendering module
//!
//! Wraps the tera engine behind a small facade: templates are addressed by
//! logical name (`index`), resolved to `<name>.html` in the configured
//! templates directory. Render failures propagate to the caller, which maps
//! them to a 500 response. Nothing here is retried or cached beyond what
//! tera itself does.

mod view;

pub use view::ViewModel;

use tera::Tera;

/// Template rendering collaborator
pub struct Renderer {
    engine: Tera,
}

impl Renderer {
    /// Load all `*.html` templates under `dir` (recursively)
    ///
    /// Fails at startup when the directory contains a template that does not
    /// parse, so broken templates never make it to serving.
    pub fn from_dir(dir: &str) -> Result<Self, tera::Error> {
        let glob = format!("{}/**/*.html", dir.trim_end_matches('/'));
        let engine = Tera::new(&glob)?;
        Ok(Self { engine })
    }

    /// Build a renderer from in-memory templates, keyed by logical name
    ///
    /// Mostly useful for tests, where no templates directory exists.
    pub fn from_raw<'a, I>(templates: I) -> Result<Self, tera::Error>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut engine = Tera::default();
        let named: Vec<(String, &str)> = templates
            .into_iter()
            .map(|(name, body)| (template_file(name), body))
            .collect();
        engine.add_raw_templates(named)?;
        Ok(Self { engine })
    }

    /// Render the template with the given logical name against a view model
    pub fn render_page(&self, name: &str, view: &ViewModel) -> Result<String, tera::Error> {
        self.engine.render(&template_file(name), &view.to_context())
    }
}

/// Map a logical template name to its file name on disk
fn template_file(name: &str) -> String {
    format!("{name}.html")
}

#[cfg(test)]
mod tests {
    use super::*;

    const INDEX_TEMPLATE: &str = "<html><head><title>{{ title }}</title></head>\
         <body><h1>{{ title }}</h1><p>{{ msg }}</p></body></html>";

    fn index_renderer() -> Renderer {
        Renderer::from_raw([("index", INDEX_TEMPLATE)]).unwrap()
    }

    fn index_view() -> ViewModel {
        let mut view = ViewModel::new();
        view.insert("title", "Welcome");
        view.insert("msg", "Hello there");
        view
    }

    #[test]
    fn test_render_substitutes_fields() {
        let renderer = index_renderer();
        let html = renderer.render_page("index", &index_view()).unwrap();
        assert!(html.contains("<h1>Welcome</h1>"));
        assert!(html.contains("<p>Hello there</p>"));
    }

    #[test]
    fn test_render_is_idempotent() {
        let renderer = index_renderer();
        let first = renderer.render_page("index", &index_view()).unwrap();
        let second = renderer.render_page("index", &index_view()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_missing_template_is_an_error() {
        let renderer = index_renderer();
        let result = renderer.render_page("nope", &index_view());
        assert!(result.is_err());
    }

    #[test]
    fn test_from_dir_missing_directory_yields_empty_engine() {
        // tera treats a glob with no matches as an empty template set, so
        // construction succeeds but any render fails
        let renderer = Renderer::from_dir("no-such-templates-dir").unwrap();
        assert!(renderer.render_page("index", &index_view()).is_err());
    }

    #[test]
    fn test_broken_template_fails_at_load() {
        let result = Renderer::from_raw([("index", "{{ title")]);
        assert!(result.is_err());
    }
}
