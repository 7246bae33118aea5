//! Library integration tests.

use netlify_ai::DeployError;

#[test]
fn error_types_are_public() {
    let err = DeployError::UnknownProvider {
        name: "mistral".into(),
    };
    assert!(err.to_string().contains("mistral"));
}

#[test]
fn result_type_alias_is_public() {
    fn test_fn() -> netlify_ai::Result<()> {
        Ok(())
    }
    assert!(test_fn().is_ok());
}

#[test]
fn cli_types_are_public() {
    use clap::Parser;
    use netlify_ai::cli::{Cli, Commands};

    let cli = Cli::parse_from(["netlify-ai", "analyze", "--json", "site"]);
    if let Some(Commands::Analyze(args)) = cli.command {
        assert!(args.json);
        assert_eq!(args.path, std::path::PathBuf::from("site"));
    } else {
        panic!("Expected Analyze command");
    }
}

#[test]
fn analysis_and_generation_work_together() {
    use netlify_ai::analysis::ProjectAnalyzer;
    use netlify_ai::generate::{generate_files, GenerateOptions};

    let temp = tempfile::TempDir::new().unwrap();
    std::fs::create_dir_all(temp.path().join("netlify/functions")).unwrap();
    std::fs::write(
        temp.path().join("netlify/functions/hello.py"),
        "import openai\n",
    )
    .unwrap();

    let analysis = ProjectAnalyzer::new(temp.path()).unwrap().analyze();
    assert!(analysis.has_python);
    assert_eq!(analysis.functions_dir.as_deref(), Some("netlify/functions"));

    let opts = GenerateOptions {
        functions_dir: analysis.functions_dir.clone(),
        env_vars: analysis.env_vars_needed.clone(),
        ..Default::default()
    };
    let results = generate_files(temp.path(), &opts, false).unwrap();
    assert!(results.iter().all(|r| r.success));

    let toml = std::fs::read_to_string(temp.path().join("netlify.toml")).unwrap();
    assert!(toml.contains("functions = \"netlify/functions\""));
    let env = std::fs::read_to_string(temp.path().join(".env.example")).unwrap();
    assert!(env.contains("OPENAI_API_KEY"));
}
