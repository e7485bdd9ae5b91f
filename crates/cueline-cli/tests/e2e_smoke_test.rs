use std::{fs, path::PathBuf};

use tempfile::tempdir;

use cueline_cli::{Args, CliError, run};

/// Collects all .toml storyboards from a directory
fn collect_storyboards(dir: PathBuf) -> Vec<PathBuf> {
    let mut files = if let Ok(entries) = fs::read_dir(&dir) {
        entries
            .flatten()
            .map(|entry| entry.path())
            .filter(|path| {
                path.is_file() && path.extension().and_then(|s| s.to_str()) == Some("toml")
            })
            .collect()
    } else {
        Vec::new()
    };

    // Sort for consistent test output
    files.sort();
    files
}

#[test]
fn e2e_smoke_test_demo_storyboards() {
    // Create a temporary directory for test outputs
    let temp_dir = tempdir().expect("Failed to create temp directory");

    // Demos are at workspace root, relative to workspace not the crate
    let demos_path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .parent()
        .unwrap()
        .join("demos");
    let storyboards = collect_storyboards(demos_path);

    assert!(!storyboards.is_empty(), "No storyboards found in demos/");

    let mut failed = Vec::new();

    for storyboard_path in &storyboards {
        let output_dir = temp_dir
            .path()
            .join(storyboard_path.file_stem().unwrap());

        let args = Args {
            input: storyboard_path.to_string_lossy().to_string(),
            output: output_dir.to_string_lossy().to_string(),
            config: None,
            log_level: "off".to_string(),
        };

        if let Err(e) = run(&args) {
            failed.push((storyboard_path.clone(), e));
            continue;
        }

        // Every completed step leaves a frame behind
        let frames = fs::read_dir(&output_dir)
            .expect("output directory exists")
            .count();
        assert!(frames > 0, "{} rendered no frames", storyboard_path.display());
    }

    if !failed.is_empty() {
        eprintln!("\nStoryboards that failed:");
        for (path, err) in &failed {
            eprintln!("  - {}: {}", path.display(), err);
        }
        panic!("{} storyboard(s) failed unexpectedly", failed.len());
    }

    println!("✅ All {} storyboards passed", storyboards.len());
}

#[test]
fn e2e_broken_dependency_reports_the_step() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let storyboard_path = temp_dir.path().join("broken.toml");
    fs::write(
        &storyboard_path,
        r#"
[[step]]
action = "write"
id = "label"
text = { content = "orphan" }
position = { to = "ghost", side = "above", gap = 16.0 }
"#,
    )
    .expect("Failed to write storyboard");

    let args = Args {
        input: storyboard_path.to_string_lossy().to_string(),
        output: temp_dir.path().join("out").to_string_lossy().to_string(),
        config: None,
        log_level: "off".to_string(),
    };

    match run(&args) {
        Err(CliError::Run(err)) => assert_eq!(err.step_index(), 0),
        other => panic!("expected a choreography error, got {other:?}"),
    }
}

#[test]
fn e2e_invalid_toml_is_a_storyboard_error() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let storyboard_path = temp_dir.path().join("invalid.toml");
    fs::write(&storyboard_path, "[[step]]\naction = 42\n").expect("Failed to write storyboard");

    let args = Args {
        input: storyboard_path.to_string_lossy().to_string(),
        output: temp_dir.path().join("out").to_string_lossy().to_string(),
        config: None,
        log_level: "off".to_string(),
    };

    assert!(matches!(run(&args), Err(CliError::Storyboard { .. })));
}
