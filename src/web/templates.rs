use minijinja::Environment;
use minijinja::value::Value;
use serde::Serialize;
use tracing::error;

pub fn init_templates() -> Result<Environment<'static>, minijinja::Error> {
    let mut env = Environment::new();

    // Register built-in templates
    env.add_template("index.html", include_str!("../../templates/index.html"))?;
    env.add_template("error.html", include_str!("../../templates/error.html"))?;

    // Emits JSON for inline <script> blocks, so it must bypass HTML escaping
    env.add_filter("json", |value: Value| {
        Value::from_safe_string(serde_json::to_string(&value).unwrap_or_else(|_| "null".to_string()))
    });

    Ok(env)
}

pub fn render_template<S: Serialize>(env: &Environment, template_name: &str, context: S) -> String {
    match env.get_template(template_name) {
        Ok(tmpl) => match tmpl.render(context) {
            Ok(result) => result,
            Err(e) => {
                error!("Template render error: {}", e);
                format!("<h1>Template Error</h1><p>{}</p>", e)
            }
        },
        Err(e) => {
            error!("Template not found: {} ({})", template_name, e);
            format!("<h1>Template Not Found</h1><p>{}: {}</p>", template_name, e)
        }
    }
}
