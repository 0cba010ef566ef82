//! HTML rendering over templates embedded at compile time

use minijinja::Environment;
use serde::Serialize;

/// Build the template environment once at startup
pub fn template_env() -> Result<Environment<'static>, minijinja::Error> {
    let mut env = Environment::new();
    env.add_template("lander", include_str!("../../templates/lander.html"))?;
    env.add_template("questions", include_str!("../../templates/questions.html"))?;
    env.add_template("magic", include_str!("../../templates/magic.html"))?;
    Ok(env)
}

/// Render one named template against a serializable view model
pub fn render<S: Serialize>(
    env: &Environment<'_>,
    name: &str,
    view: &S,
) -> Result<String, minijinja::Error> {
    env.get_template(name)?.render(view)
}
