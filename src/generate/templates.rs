//! Fixed-content templates: `.gitignore`, `.env.example`, `requirements.txt`.

/// Content of the generated `.gitignore`.
pub const GITIGNORE: &str = "\
# Environment variables (contain secrets)
.env
.env.local
.env.production

# Netlify local cache
.netlify/

# Python
__pycache__/
*.py[cod]
*$py.class
venv/
.venv/
*.egg-info/

# Node.js
node_modules/

# OS files
.DS_Store
Thumbs.db

# IDE
.vscode/
.idea/
*.swp
*.swo
";

/// Render the `.gitignore` template.
pub fn render_gitignore() -> String {
    GITIGNORE.to_string()
}

fn describe(var: &str) -> Option<&'static str> {
    match var {
        "OPENAI_API_KEY" => Some("# OpenAI API Key - https://platform.openai.com/api-keys"),
        "GOOGLE_API_KEY" => {
            Some("# Google API Key (Gemini) - https://aistudio.google.com/app/apikey")
        }
        "ANTHROPIC_API_KEY" => Some("# Anthropic API Key - https://console.anthropic.com/"),
        "DATABASE_URL" => Some("# Database connection string"),
        "SECRET_KEY" => Some("# Application secret key"),
        "API_KEY" => Some("# API key"),
        _ => None,
    }
}

/// Render `.env.example` for the given variables.
pub fn render_env_example(env_vars: &[String]) -> String {
    let mut lines = vec![
        "# Example environment variables".to_string(),
        "# Copy this file to .env and fill in real values".to_string(),
        String::new(),
    ];

    for var in env_vars {
        if let Some(desc) = describe(var) {
            lines.push(desc.to_string());
        }
        lines.push(format!("{}=your_{}_here", var, var.to_lowercase()));
        lines.push(String::new());
    }

    lines.push("# Never commit the .env file to Git!".to_string());
    lines.join("\n")
}

/// Render `requirements.txt` with SDKs implied by the variables.
pub fn render_requirements(env_vars: &[String]) -> String {
    let has = |name: &str| env_vars.iter().any(|v| v == name);

    let mut packages: Vec<&str> = Vec::new();
    if has("OPENAI_API_KEY") {
        packages.push("openai");
    }
    if has("GOOGLE_API_KEY") {
        packages.push("google-generativeai");
    }
    if has("ANTHROPIC_API_KEY") {
        packages.push("anthropic");
    }
    if packages.is_empty() {
        packages.push("# Add the Python packages you need here");
    }

    packages.join("\n") + "\n"
}
